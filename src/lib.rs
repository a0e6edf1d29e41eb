//! # Floodwatch
//!
//! Terminal flood-risk estimator.
//!
//! Twenty risk-factor sliders feed a gradient-boosted model exported from
//! XGBoost; the predicted probability is shown with a five-tier risk
//! message and an echo of the submitted scores.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (FeatureVector, RiskTier, Prediction)
//! - `ports`: Trait definitions for the model seam
//! - `adapters`: Concrete implementations (XGBoost JSON model, banner)
//! - `application`: The Predict use case
//! - `config`: Startup configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{FeatureKey, FeatureVector, Prediction, RiskTier};

/// Result type for Floodwatch operations
pub type Result<T> = std::result::Result<T, FloodwatchError>;

/// Main error type for Floodwatch
#[derive(Debug, thiserror::Error)]
pub enum FloodwatchError {
    #[error("Model error: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
