pub mod easing;

pub use easing::{ease, lerp, Easing};
