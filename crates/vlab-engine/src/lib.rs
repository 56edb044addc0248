pub mod anim;
pub mod api;
pub mod bench;
pub mod catalog;
pub mod color;
pub mod core;
pub mod effects;
pub mod input;
pub mod reaction;

// Re-export key types at crate root for convenience
pub use api::lab::{Lab, LabConfig, LabContext, RenderContext};
pub use api::types::{LabEvent, VesselFrame, VesselId};
pub use bench::{Bench, BenchSlot, SlotKind};
pub use catalog::chemical::{Chemical, ChemicalCatalog, PhysicalState};
pub use catalog::experiment::{
    ExperimentCatalog, ExperimentDefinition, PreconditionRule, PrecipitateSpec, ReactionSpec,
};
pub use color::{ColorRamp, Rgb};
pub use core::time::FixedTimestep;
pub use effects::{Rng, SpawnSequence};
pub use input::queue::{InputEvent, InputQueue};
pub use reaction::controller::{AddOutcome, ReactionController, VesselSnapshot};
pub use reaction::notice::{Notice, NoticeBoard};
pub use reaction::rules::RuleViolation;
pub use reaction::state::{Phase, ReactionState};

pub use anim::{ease, lerp, Easing};
