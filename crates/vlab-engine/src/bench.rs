//! Bench layout: circular hit areas for the vessel and reagent beakers.
//!
//! Pointer picking happens in bench coordinates, the same space the renderer
//! draws in. Slots are checked in insertion order; the first hit wins.

use glam::Vec2;

/// What a bench slot holds.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotKind {
    /// The reaction vessel itself.
    Vessel,
    /// A stock beaker; clicking it adds the chemical to the vessel.
    ReagentBeaker { chemical: String },
}

#[derive(Debug, Clone)]
pub struct BenchSlot {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: SlotKind,
}

/// The lab bench: fixed dimensions and a set of pickable slots.
#[derive(Debug, Default)]
pub struct Bench {
    slots: Vec<BenchSlot>,
    width: f32,
    height: f32,
}

impl Bench {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            slots: Vec::new(),
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn add_slot(&mut self, pos: Vec2, radius: f32, kind: SlotKind) -> usize {
        self.slots.push(BenchSlot { pos, radius, kind });
        self.slots.len() - 1
    }

    /// Index of the first slot whose hit circle contains `point`.
    pub fn pick(&self, point: Vec2) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| point.distance_squared(slot.pos) <= slot.radius * slot.radius)
    }

    pub fn slot(&self, index: usize) -> Option<&BenchSlot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
