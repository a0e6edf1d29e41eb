//! Flood risk-factor features.
//!
//! Twenty integer scores on a 0-15 scale, one per [`FeatureKey`]. The key
//! names match the column names of the training data exactly.

use std::fmt;

/// Lowest score a factor can take.
pub const MIN_SCORE: u8 = 0;

/// Highest score a factor can take.
pub const MAX_SCORE: u8 = 15;

/// Score every slider starts at.
pub const DEFAULT_SCORE: u8 = 5;

/// Number of risk factors the model consumes.
pub const FEATURE_COUNT: usize = 20;

/// One of the twenty flood risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureKey {
    MonsoonIntensity,
    TopographyDrainage,
    RiverManagement,
    Deforestation,
    Urbanization,
    ClimateChange,
    DamsQuality,
    Siltation,
    AgriculturalPractices,
    Encroachments,
    IneffectiveDisasterPreparedness,
    DrainageSystems,
    CoastalVulnerability,
    Landslides,
    Watersheds,
    DeterioratingInfrastructure,
    PopulationScore,
    WetlandLoss,
    InadequatePlanning,
    PoliticalFactors,
}

impl FeatureKey {
    /// All keys in display order.
    pub const ALL: [FeatureKey; FEATURE_COUNT] = [
        Self::MonsoonIntensity,
        Self::TopographyDrainage,
        Self::RiverManagement,
        Self::Deforestation,
        Self::Urbanization,
        Self::ClimateChange,
        Self::DamsQuality,
        Self::Siltation,
        Self::AgriculturalPractices,
        Self::Encroachments,
        Self::IneffectiveDisasterPreparedness,
        Self::DrainageSystems,
        Self::CoastalVulnerability,
        Self::Landslides,
        Self::Watersheds,
        Self::DeterioratingInfrastructure,
        Self::PopulationScore,
        Self::WetlandLoss,
        Self::InadequatePlanning,
        Self::PoliticalFactors,
    ];

    /// Position of this key in [`FeatureKey::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the training data and the model export.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MonsoonIntensity => "MonsoonIntensity",
            Self::TopographyDrainage => "TopographyDrainage",
            Self::RiverManagement => "RiverManagement",
            Self::Deforestation => "Deforestation",
            Self::Urbanization => "Urbanization",
            Self::ClimateChange => "ClimateChange",
            Self::DamsQuality => "DamsQuality",
            Self::Siltation => "Siltation",
            Self::AgriculturalPractices => "AgriculturalPractices",
            Self::Encroachments => "Encroachments",
            Self::IneffectiveDisasterPreparedness => "IneffectiveDisasterPreparedness",
            Self::DrainageSystems => "DrainageSystems",
            Self::CoastalVulnerability => "CoastalVulnerability",
            Self::Landslides => "Landslides",
            Self::Watersheds => "Watersheds",
            Self::DeterioratingInfrastructure => "DeterioratingInfrastructure",
            Self::PopulationScore => "PopulationScore",
            Self::WetlandLoss => "WetlandLoss",
            Self::InadequatePlanning => "InadequatePlanning",
            Self::PoliticalFactors => "PoliticalFactors",
        }
    }

    /// Short explanation for the documentation panel.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::MonsoonIntensity => "Strength of monsoon rains",
            Self::TopographyDrainage => "How well water drains from land",
            Self::RiverManagement => "Quality of river control systems",
            Self::Deforestation => "Level of forest loss",
            Self::Urbanization => "City expansion rate",
            Self::ClimateChange => "Impact of global warming",
            Self::DamsQuality => "Condition of dams and reservoirs",
            Self::Siltation => "Soil buildup in rivers/lakes",
            Self::AgriculturalPractices => "Farming methods affecting runoff",
            Self::Encroachments => "Illegal building in flood zones",
            Self::IneffectiveDisasterPreparedness => "Poor planning/response",
            Self::DrainageSystems => "Urban drainage efficiency",
            Self::CoastalVulnerability => "Risk from sea level/tides",
            Self::Landslides => "Slope instability risk",
            Self::Watersheds => "Water catchment health",
            Self::DeterioratingInfrastructure => "Aging bridges/roads",
            Self::PopulationScore => "Population density in risk areas",
            Self::WetlandLoss => "Destruction of natural flood buffers",
            Self::InadequatePlanning => "Poor land-use policies",
            Self::PoliticalFactors => "Corruption or neglect in governance",
        }
    }

    /// Look up a key by its exact column name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The twenty scores submitted for one prediction.
///
/// Indexed by [`FeatureKey`]; every score is kept inside
/// [`MIN_SCORE`]..=[`MAX_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector {
    scores: [u8; FEATURE_COUNT],
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::uniform(DEFAULT_SCORE)
    }
}

impl FeatureVector {
    /// Every factor set to the same score (clamped).
    #[must_use]
    pub fn uniform(score: u8) -> Self {
        Self {
            scores: [score.min(MAX_SCORE); FEATURE_COUNT],
        }
    }

    #[must_use]
    pub fn get(&self, key: FeatureKey) -> u8 {
        self.scores[key.index()]
    }

    /// Set a score, clamping to the slider domain.
    pub fn set(&mut self, key: FeatureKey, score: u8) {
        self.scores[key.index()] = score.min(MAX_SCORE);
    }

    /// `(key, score)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureKey, u8)> + '_ {
        FeatureKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_and_names() {
        assert_eq!(FeatureKey::ALL.len(), FEATURE_COUNT);
        for (i, key) in FeatureKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(FeatureKey::from_name(key.name()), Some(*key));
        }
        assert_eq!(FeatureKey::ALL[0].name(), "MonsoonIntensity");
        assert_eq!(FeatureKey::ALL[19].name(), "PoliticalFactors");
        assert_eq!(FeatureKey::from_name("monsoonintensity"), None);
    }

    #[test]
    fn test_default_is_all_fives() {
        let v = FeatureVector::default();
        assert!(v.iter().all(|(_, s)| s == DEFAULT_SCORE));
        assert_eq!(v.iter().count(), FEATURE_COUNT);
    }

    #[test]
    fn test_set_clamps_to_max() {
        let mut v = FeatureVector::default();
        v.set(FeatureKey::Landslides, 40);
        assert_eq!(v.get(FeatureKey::Landslides), MAX_SCORE);
        assert_eq!(FeatureVector::uniform(99).get(FeatureKey::Siltation), MAX_SCORE);
    }
}
