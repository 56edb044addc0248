//! Observable vessel state published to the renderer each frame.

use crate::color::Rgb;

/// Color of an empty (water-rinsed) vessel.
pub const EMPTY_COLOR: Rgb = Rgb::new(230.0 / 255.0, 243.0 / 255.0, 1.0);

/// Where the vessel is in its reaction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing added yet.
    Idle,
    /// Some but not all required reactants present.
    Partial,
    /// All required reactants present, transition in progress.
    Reacting,
    /// Transition finished; state is stable until reset.
    Complete,
}

impl Phase {
    /// Numeric code for the shared frame buffer.
    pub fn code(self) -> f32 {
        match self {
            Phase::Idle => 0.0,
            Phase::Partial => 1.0,
            Phase::Reacting => 2.0,
            Phase::Complete => 3.0,
        }
    }
}

/// Snapshot of everything the renderer needs to draw one vessel.
/// Recomputed from scratch on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionState {
    pub phase: Phase,
    /// 0.0..=1.0 through the color transition. 0 before start, 1 when complete.
    pub coloration_progress: f32,
    /// 0.0..=1.0 fraction of vessel capacity filled.
    pub fill_level: f32,
    /// Current liquid color.
    pub color: Rgb,
    pub has_precipitate: bool,
    /// Settled layer depth as a fraction of vessel height.
    pub precipitate_depth: f32,
}

impl Default for ReactionState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            coloration_progress: 0.0,
            fill_level: 0.0,
            color: EMPTY_COLOR,
            has_precipitate: false,
            precipitate_depth: 0.0,
        }
    }
}
