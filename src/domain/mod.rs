//! Domain layer: Core types for flood risk prediction.
//!
//! Pure Rust types with no I/O.

mod features;
mod prediction;

pub use features::{
    FeatureKey, FeatureVector, DEFAULT_SCORE, FEATURE_COUNT, MAX_SCORE, MIN_SCORE,
};
pub use prediction::{Prediction, RiskTier, Severity};
