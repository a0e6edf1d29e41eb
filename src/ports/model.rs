//! Flood model port: Trait for probability inference.
//!
//! This trait abstracts the model artifact format from the application logic.

use std::path::PathBuf;

use crate::domain::FeatureVector;

/// Errors raised while loading or evaluating a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model file not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read model file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed model: {0}")]
    Malformed(String),

    #[error("Model checksum mismatch (expected {expected}, got {actual})")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Model features do not match the form: {0}")]
    FeatureMismatch(String),

    #[error("Unsupported objective: {0}")]
    UnsupportedObjective(String),

    #[error("Model returned a non-finite value: {0}")]
    NonFinite(f64),
}

/// Trait for flood probability models.
///
/// Implementations are immutable after loading and safe to share.
pub trait FloodModel: Send + Sync {
    /// Evaluate the model on a single row.
    ///
    /// # Errors
    /// Returns `ModelError` if inference fails.
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// One-line description for the caption.
    fn summary(&self) -> String;
}
