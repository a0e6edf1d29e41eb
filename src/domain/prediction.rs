//! Prediction result types.
//!
//! Represents the output of the flood model and its interpretation.

use super::features::FeatureVector;

/// Five ordered flood risk bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskTier {
    /// Normal conditions
    Low,
    /// Stay alert
    Elevated,
    /// Monitor closely and prepare
    Moderate,
    /// Emergency preparations needed
    High,
    /// Evacuation recommended
    Extreme,
}

/// How loudly a tier should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl RiskTier {
    /// Classify a probability. Thresholds are checked top-down and the
    /// first match wins, so every value (including out-of-range ones) maps
    /// to exactly one tier.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.75 {
            Self::Extreme
        } else if probability >= 0.6 {
            Self::High
        } else if probability >= 0.5 {
            Self::Moderate
        } else if probability >= 0.3 {
            Self::Elevated
        } else {
            Self::Low
        }
    }

    /// Advice shown after the tier label.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Extreme => "Evacuation strongly recommended!",
            Self::High => "Emergency preparations needed immediately",
            Self::Moderate => "Monitor closely and prepare",
            Self::Elevated => "Stay alert",
            Self::Low => "Normal conditions",
        }
    }

    /// Full banner message, label plus advice.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{self} — {}", self.advice())
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Extreme | Self::High => Severity::Error,
            Self::Moderate => Severity::Warning,
            Self::Elevated | Self::Low => Severity::Info,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extreme => write!(f, "EXTREME DANGER"),
            Self::High => write!(f, "HIGH RISK"),
            Self::Moderate => write!(f, "MODERATE RISK"),
            Self::Elevated => write!(f, "ELEVATED RISK"),
            Self::Low => write!(f, "LOW RISK"),
        }
    }
}

/// Outcome of one Predict trigger.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Raw model output, not clamped
    pub probability: f64,

    /// `probability * 100`
    pub risk_percent: f64,

    /// Tier derived from `probability`
    pub tier: RiskTier,

    /// Exactly the scores the model saw
    pub inputs: FeatureVector,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    #[must_use]
    pub fn new(probability: f64, inputs: FeatureVector) -> Self {
        Self {
            probability,
            risk_percent: probability * 100.0,
            tier: RiskTier::from_probability(probability),
            inputs,
            created_at: chrono::Utc::now(),
        }
    }

    /// Whether the model produced something that is not a probability.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        !(0.0..=1.0).contains(&self.probability)
    }

    #[must_use]
    pub fn formatted_probability(&self) -> String {
        format!("{:.4}", self.probability)
    }

    #[must_use]
    pub fn formatted_percent(&self) -> String {
        format!("{:.1}%", self.risk_percent)
    }
}
