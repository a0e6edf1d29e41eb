//! Prediction service: The Predict use case.
//!
//! Runs the model on one feature vector and interprets the result.

use std::sync::Arc;

use crate::domain::{FeatureVector, Prediction};
use crate::ports::{FloodModel, ModelError};
use crate::FloodwatchError;

/// Service for running flood predictions.
///
/// Holds the read-only model handle loaded at startup.
pub struct PredictionService<M>
where
    M: FloodModel,
{
    model: Arc<M>,
}

impl<M> PredictionService<M>
where
    M: FloodModel,
{
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Predict the flood probability for one set of scores.
    ///
    /// The raw probability is kept as-is; values outside [0, 1] are logged
    /// and flagged on the returned `Prediction`.
    ///
    /// # Errors
    /// Returns error if the model fails to evaluate or yields NaN/infinity.
    pub fn predict(&self, features: FeatureVector) -> Result<Prediction, FloodwatchError> {
        tracing::debug!("Running model on {:?}", features);
        let probability = self.model.predict(&features)?;
        if !probability.is_finite() {
            return Err(ModelError::NonFinite(probability).into());
        }

        let prediction = Prediction::new(probability, features);
        if prediction.is_out_of_range() {
            tracing::warn!(
                "Model output {} is outside [0, 1]; shown unclamped",
                prediction.probability
            );
        }

        tracing::info!(
            "Model prediction done: probability={}, risk={}",
            prediction.formatted_probability(),
            prediction.tier
        );
        Ok(prediction)
    }

    #[must_use]
    pub fn model_summary(&self) -> String {
        self.model.summary()
    }
}
