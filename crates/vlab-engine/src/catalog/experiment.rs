//! Experiment definitions and catalog.
//!
//! Each experiment carries the material list and procedure shown in the UI
//! plus a `ReactionSpec` that parameterizes the reaction controller. Loaded
//! from embedded JSON and resolved by slug, the same way route parameters
//! resolve experiment content in the UI layer.

use serde::Deserialize;
use std::collections::HashMap;

use crate::color::{ColorRamp, Rgb};

/// Embed the experiment data at compile time.
const EXPERIMENTS_JSON: &str = include_str!("data/experiments.json");

/// One required material as listed in an experiment record.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRequirement {
    pub name: String,
    pub formula: String,
    pub quantity: String,
}

/// One numbered procedure step.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcedureStep {
    pub step: u32,
    pub description: String,
}

/// A chemical-addition ordering constraint: `target` may only be added once
/// every id in `requires` is already present in the vessel.
#[derive(Debug, Clone, Deserialize)]
pub struct PreconditionRule {
    pub target: String,
    pub requires: Vec<String>,
}

/// Precipitation behavior: while both ids of `pair` are present and `product`
/// is absent, the vessel shows a cloudy suspension with a settling layer.
#[derive(Debug, Clone, Deserialize)]
pub struct PrecipitateSpec {
    pub pair: [String; 2],
    pub product: String,
    /// Liquid tint while the suspension is forming.
    pub liquid_color: Rgb,
}

/// Parameters driving the reaction state machine for one experiment.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionSpec {
    /// Canonical reactant ids that must all be present to start the reaction.
    pub required: Vec<String>,
    /// Reaction duration in milliseconds once started.
    pub duration_ms: f64,
    pub color_start: Rgb,
    /// Present for two-segment transitions (e.g. purple → pink → colorless).
    #[serde(default)]
    pub color_mid: Option<Rgb>,
    pub color_end: Rgb,
    /// Mix color shown while `n` required reactants are present, indexed by
    /// `n - 1`. Missing entries fall back to channel-averaging base colors.
    #[serde(default)]
    pub stage_colors: Vec<Rgb>,
    #[serde(default)]
    pub preconditions: Vec<PreconditionRule>,
    #[serde(default)]
    pub precipitate: Option<PrecipitateSpec>,
}

impl ReactionSpec {
    /// The color transition for the reacting phase.
    pub fn ramp(&self) -> ColorRamp {
        match self.color_mid {
            Some(mid) => ColorRamp::two_segment(self.color_start, mid, self.color_end),
            None => ColorRamp::single(self.color_start, self.color_end),
        }
    }

    /// Number of required reactants present in `contents`.
    pub fn required_present(&self, contents: &[String]) -> usize {
        self.required
            .iter()
            .filter(|id| contents.iter().any(|c| c == *id))
            .count()
    }

    /// Whether every required reactant is present.
    pub fn is_satisfied(&self, contents: &[String]) -> bool {
        self.required_present(contents) == self.required.len()
    }
}

/// A complete experiment record, matching the catalog schema
/// `{title, description, chemicals, procedure, safetyNotes}` plus the
/// reaction parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub chemicals: Vec<MaterialRequirement>,
    pub procedure: Vec<ProcedureStep>,
    #[serde(rename = "safetyNotes")]
    pub safety_notes: String,
    pub reaction: ReactionSpec,
}

#[derive(Debug, Deserialize)]
struct CatalogJson {
    experiments: Vec<ExperimentDefinition>,
}

/// Experiment registry, ordered as authored, with O(1) slug lookup.
pub struct ExperimentCatalog {
    experiments: Vec<ExperimentDefinition>,
    by_id: HashMap<String, usize>,
}

impl ExperimentCatalog {
    /// Load the catalog from embedded JSON.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(EXPERIMENTS_JSON)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: CatalogJson = serde_json::from_str(json)?;
        let by_id = raw
            .experiments
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Ok(Self {
            experiments: raw.experiments,
            by_id,
        })
    }

    /// Resolve an experiment slug to its definition.
    pub fn experiment_by_id(&self, id: &str) -> Option<&ExperimentDefinition> {
        self.by_id.get(id).map(|&i| &self.experiments[i])
    }

    /// Get an experiment by catalog index (UI selection order).
    pub fn get_index(&self, index: usize) -> Option<&ExperimentDefinition> {
        self.experiments.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExperimentDefinition> {
        self.experiments.iter()
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}
