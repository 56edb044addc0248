//! The reaction controller: owns one vessel's contents and derives its full
//! observable state from the clock on every tick.
//!
//! The controller stores only what happened and when (which chemicals were
//! added, when the reaction started). Everything the renderer sees — phase,
//! color, fill, progress, precipitate — is recomputed from those facts and
//! `now_ms`, so a tick at any timestamp lands on the right state even after
//! long frame gaps.

use serde::{Deserialize, Serialize};

use crate::catalog::chemical::ChemicalCatalog;
use crate::catalog::experiment::ReactionSpec;
use crate::color::Rgb;
use crate::reaction::notice::{Notice, NoticeBoard};
use crate::reaction::pour::Pour;
use crate::reaction::precipitate;
use crate::reaction::rules::{self, RuleViolation};
use crate::reaction::state::{Phase, ReactionState, EMPTY_COLOR};

/// Result of attempting to add a chemical to the vessel.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added,
    /// The chemical is already in the vessel; nothing changed.
    AlreadyPresent,
    /// A precondition rule blocked the addition. A warning notice was raised.
    Rejected(RuleViolation),
    /// The id resolves to nothing in the catalog; nothing changed.
    Unknown,
}

/// Persistable record of a vessel: what is in it and how far along the
/// reaction is. Restoring marks all pours as settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSnapshot {
    /// Canonical ids in addition order.
    pub chemicals: Vec<String>,
    /// Milliseconds since the reaction started, if it has.
    pub reaction_elapsed_ms: Option<f64>,
}

pub struct ReactionController {
    spec: ReactionSpec,
    /// Canonical ids in addition order. No duplicates.
    contents: Vec<String>,
    reaction_started_at: Option<f64>,
    /// Latched by `tick` once elapsed reaches the duration.
    reaction_complete: bool,
    pour: Option<Pour>,
    notices: NoticeBoard,
}

impl ReactionController {
    pub fn new(spec: ReactionSpec) -> Self {
        Self {
            spec,
            contents: Vec::new(),
            reaction_started_at: None,
            reaction_complete: false,
            pour: None,
            notices: NoticeBoard::new(),
        }
    }

    pub fn spec(&self) -> &ReactionSpec {
        &self.spec
    }

    /// Canonical ids in the order they were added.
    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    /// The active warning, if one has not yet auto-cleared.
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.active()
    }

    pub fn is_complete(&self) -> bool {
        self.reaction_complete
    }

    /// Try to add a chemical at `now_ms`. Ids are normalized through the
    /// catalog, duplicates are ignored, and precondition violations raise a
    /// timed warning instead of mutating the vessel.
    pub fn add_chemical(
        &mut self,
        catalog: &ChemicalCatalog,
        now_ms: f64,
        id: &str,
    ) -> AddOutcome {
        let Some(chem) = catalog.get(id) else {
            log::debug!("ignoring unknown chemical id {id:?}");
            return AddOutcome::Unknown;
        };
        let canonical = chem.id.clone();

        if self.contents.iter().any(|c| c == &canonical) {
            return AddOutcome::AlreadyPresent;
        }

        if let Err(violation) = rules::check(&self.spec.preconditions, &self.contents, &canonical)
        {
            log::info!("rejected {canonical}: missing {:?}", violation.missing);
            self.notices.raise(now_ms, violation.message());
            return AddOutcome::Rejected(violation);
        }

        let current_fill = self.fill_at(now_ms);
        let prior_target = self.pour.map(|p| p.target()).unwrap_or(0.0);
        let target = (prior_target + chem.volume).min(1.0);
        self.pour = Some(Pour::new(current_fill, target, now_ms, chem.pour_ms));

        self.contents.push(canonical);

        // The reaction starts the moment the last required reactant lands.
        if self.reaction_started_at.is_none() && self.spec.is_satisfied(&self.contents) {
            self.reaction_started_at = Some(now_ms);
            log::info!("reaction started at {now_ms}ms");
        }

        AddOutcome::Added
    }

    /// Recompute the observable state for `now_ms`.
    pub fn tick(&mut self, catalog: &ChemicalCatalog, now_ms: f64) -> ReactionState {
        self.notices.tick(now_ms);

        let fill_level = self.fill_at(now_ms);

        let progress = match self.reaction_started_at {
            Some(start) if self.spec.duration_ms > 0.0 => {
                (((now_ms - start) / self.spec.duration_ms).clamp(0.0, 1.0)) as f32
            }
            Some(_) => 1.0,
            None => 0.0,
        };
        if progress >= 1.0 && self.reaction_started_at.is_some() {
            self.reaction_complete = true;
        }

        let phase = if self.contents.is_empty() {
            Phase::Idle
        } else if self.reaction_started_at.is_none() {
            Phase::Partial
        } else if self.reaction_complete {
            Phase::Complete
        } else {
            Phase::Reacting
        };

        let precipitating = self
            .spec
            .precipitate
            .as_ref()
            .map(|spec| precipitate::is_precipitating(spec, &self.contents))
            .unwrap_or(false);
        let has_precipitate = precipitating && self.reaction_started_at.is_some();
        let precipitate_depth = if has_precipitate {
            precipitate::layer_depth(progress)
        } else {
            0.0
        };

        let color = match phase {
            Phase::Idle => EMPTY_COLOR,
            Phase::Partial => self.mix_color(catalog),
            Phase::Reacting | Phase::Complete => {
                if has_precipitate {
                    // Cloudy suspension tint while solid settles out.
                    self.spec
                        .precipitate
                        .as_ref()
                        .map(|s| s.liquid_color)
                        .unwrap_or(EMPTY_COLOR)
                } else {
                    self.spec.ramp().at(progress)
                }
            }
        };

        ReactionState {
            phase,
            coloration_progress: progress,
            fill_level,
            color,
            has_precipitate,
            precipitate_depth,
        }
    }

    /// Empty the vessel and cancel any pending warning.
    pub fn reset(&mut self) {
        self.contents.clear();
        self.reaction_started_at = None;
        self.reaction_complete = false;
        self.pour = None;
        self.notices.clear();
    }

    /// Capture the vessel for persistence.
    pub fn snapshot(&self, now_ms: f64) -> VesselSnapshot {
        VesselSnapshot {
            chemicals: self.contents.clone(),
            reaction_elapsed_ms: self.reaction_started_at.map(|start| now_ms - start),
        }
    }

    /// Rebuild the vessel from a snapshot. Unknown ids are dropped with a
    /// warning; pours are restored already settled.
    pub fn restore(&mut self, catalog: &ChemicalCatalog, snapshot: &VesselSnapshot, now_ms: f64) {
        self.reset();

        let mut level = 0.0f32;
        for id in &snapshot.chemicals {
            let Some(chem) = catalog.get(id) else {
                log::warn!("dropping unknown chemical id {id:?} from snapshot");
                continue;
            };
            if self.contents.iter().any(|c| c == &chem.id) {
                continue;
            }
            level = (level + chem.volume).min(1.0);
            self.contents.push(chem.id.clone());
        }
        if !self.contents.is_empty() {
            self.pour = Some(Pour::settled(level));
        }

        if let Some(elapsed) = snapshot.reaction_elapsed_ms {
            if self.spec.is_satisfied(&self.contents) {
                self.reaction_started_at = Some(now_ms - elapsed.max(0.0));
            }
        } else if self.spec.is_satisfied(&self.contents) {
            // Snapshot predates the start latch; begin now.
            self.reaction_started_at = Some(now_ms);
        }
    }

    fn fill_at(&self, now_ms: f64) -> f32 {
        self.pour.map(|p| p.fill_at(now_ms)).unwrap_or(0.0)
    }

    /// Mix color for the partial phase: authored stage color for the number
    /// of required reactants present, else channel-average of base colors.
    fn mix_color(&self, catalog: &ChemicalCatalog) -> Rgb {
        let present = self.spec.required_present(&self.contents);
        if present > 0 {
            if let Some(&stage) = self.spec.stage_colors.get(present - 1) {
                return stage;
            }
        }
        Rgb::average(
            self.contents
                .iter()
                .filter_map(|id| catalog.get(id))
                .map(|chem| chem.color),
        )
        .unwrap_or(EMPTY_COLOR)
    }
}
