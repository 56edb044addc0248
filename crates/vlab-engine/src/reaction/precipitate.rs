//! Precipitate layer model.
//!
//! While a precipitating pair reacts, solid product settles to the bottom of
//! the vessel. The layer depth grows monotonically with reaction progress
//! between fixed bounds, expressed as fractions of vessel height.

use crate::catalog::experiment::PrecipitateSpec;

/// Layer depth when the reaction has just started.
pub const LAYER_MIN: f32 = 0.02;
/// Layer depth when the reaction is complete.
pub const LAYER_MAX: f32 = 0.12;

/// Settled layer depth for a given reaction progress in 0.0..=1.0.
pub fn layer_depth(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    LAYER_MIN + (LAYER_MAX - LAYER_MIN) * p
}

/// Whether the vessel contents are actively precipitating: both members of
/// the pair present, product not yet recorded.
pub fn is_precipitating(spec: &PrecipitateSpec, contents: &[String]) -> bool {
    let pair_present = spec
        .pair
        .iter()
        .all(|id| contents.iter().any(|c| c == id));
    let product_present = contents.iter().any(|c| c == &spec.product);
    pair_present && !product_present
}
