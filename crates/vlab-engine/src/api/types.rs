use bytemuck::{Pod, Zeroable};

/// Unique identifier for a vessel on the lab bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VesselId(pub u32);

/// A lab event communicated from Rust to TypeScript via SharedArrayBuffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct LabEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl LabEvent {
    pub const FLOATS: usize = 4;
}

/// Per-vessel visual state, rebuilt from the reaction state every frame.
///
/// This is the whole renderer contract: the UI layer reads these floats from
/// shared memory and owns every geometry/material decision. The engine never
/// references rendering primitives.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VesselFrame {
    /// VesselId of the vessel this frame describes.
    pub vessel: f32,
    /// Phase code (see `reaction::Phase::code`).
    pub phase: f32,
    /// Current interpolated liquid color (linear RGB, 0-1).
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Liquid fill level as a fraction of vessel capacity (0-1).
    pub fill: f32,
    /// Coloration progress through the reaction ramp (0-1).
    pub progress: f32,
    /// 1.0 while an insoluble product is suspended/settling, else 0.0.
    pub precipitate: f32,
    /// Settled precipitate layer depth as a fraction of vessel height.
    pub precipitate_depth: f32,
}

impl VesselFrame {
    pub const FLOATS: usize = 9;
}
