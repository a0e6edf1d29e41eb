//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports.

mod prediction;

pub use prediction::PredictionService;
