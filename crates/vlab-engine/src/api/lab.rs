use crate::api::types::{LabEvent, VesselFrame};
use crate::input::queue::InputQueue;

/// Configuration for the engine, provided by the lab.
#[derive(Debug, Clone)]
pub struct LabConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Bench width in lab units.
    pub bench_width: f32,
    /// Bench height in lab units.
    pub bench_height: f32,
    /// Maximum number of vessel frames per tick (default: 8).
    pub max_vessel_frames: usize,
    /// Maximum number of lab events per frame (default: 32).
    pub max_events: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            bench_width: 800.0,
            bench_height: 600.0,
            max_vessel_frames: 8,
            max_events: 32,
        }
    }
}

/// The core contract every lab simulation must fulfill.
pub trait Lab {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> LabConfig {
        LabConfig::default()
    }

    /// Set up initial state: load catalogs, place equipment on the bench.
    fn init(&mut self, ctx: &mut LabContext);

    /// The simulation tick. Apply queued input, advance reaction controllers,
    /// emit lab events.
    fn update(&mut self, ctx: &mut LabContext, input: &InputQueue);

    /// Read-only publish pass: write the current vessel state for the
    /// renderer. Called once per frame after all fixed steps.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Lab::init and Lab::update.
pub struct LabContext {
    /// Outbound events for the UI layer, cleared every frame.
    pub events: Vec<LabEvent>,
    /// Simulation clock in milliseconds, advanced by the runner each fixed
    /// step. Reaction controllers take this as `now_ms`.
    clock_ms: f64,
}

impl LabContext {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            clock_ms: 0.0,
        }
    }

    /// Current simulation clock in milliseconds.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Advance the simulation clock. Called by the runner before each fixed
    /// step.
    pub fn advance_clock(&mut self, dt_secs: f32) {
        self.clock_ms += dt_secs as f64 * 1000.0;
    }

    /// Emit a lab event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: LabEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for LabContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Publish context for the per-frame vessel state pass.
pub struct RenderContext<'a> {
    pub frames: &'a mut Vec<VesselFrame>,
}
