//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundary between the application and the model
//! artifact.

mod model;

pub use model::{FloodModel, ModelError};
