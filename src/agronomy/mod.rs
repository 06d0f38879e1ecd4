pub mod scorer;
pub mod soil;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::agronomy::soil::SoilCompatibility;
use crate::reference::{CropCategory, SoilTier, WaterNeed};

pub const GOOD_MATCH_THRESHOLD: f64 = 0.75;
pub const PARTIAL_MATCH_THRESHOLD: f64 = 0.5;

/// A crop the user describes instead of picking from the dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomCropInput {
    pub name: String,
    pub ph_min: f64,
    pub ph_max: f64,
    pub min_sunlight: f64,
    pub category: CropCategory,
    #[serde(default)]
    pub water_need: WaterNeed,
    #[serde(default)]
    pub soil_tier: SoilTier,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgronomicVerdict {
    GoodMatch,
    PartialMatch,
    PoorMatch,
    /// A named custom crop found no comparable reference rows.
    NotViable,
    /// An existing crop has no usable score.
    NoData,
}

impl AgronomicVerdict {
    pub fn from_score(score: f64) -> Self {
        if score >= GOOD_MATCH_THRESHOLD {
            Self::GoodMatch
        } else if score >= PARTIAL_MATCH_THRESHOLD {
            Self::PartialMatch
        } else {
            Self::PoorMatch
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Self::GoodMatch => "Good match for the region",
            Self::PartialMatch => "Partial match: some agronomic risk",
            Self::PoorMatch => "Poor match for the region",
            Self::NotViable => "Not viable: no comparable crops grow under these conditions",
            Self::NoData => "No agronomic data available for this crop",
        }
    }
}

impl Display for AgronomicVerdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgronomicAssessment {
    pub score: Option<f64>,
    pub verdict: AgronomicVerdict,
    /// Number of reference rows the score was averaged over.
    pub matched_records: usize,
    pub soil: SoilCompatibility,
}

#[cfg(test)]
mod tests {
    use super::AgronomicVerdict;

    #[test]
    fn thresholds_are_inclusive_at_the_lower_bound() {
        assert_eq!(AgronomicVerdict::from_score(0.75), AgronomicVerdict::GoodMatch);
        assert_eq!(AgronomicVerdict::from_score(0.7499), AgronomicVerdict::PartialMatch);
        assert_eq!(AgronomicVerdict::from_score(0.5), AgronomicVerdict::PartialMatch);
        assert_eq!(AgronomicVerdict::from_score(0.49), AgronomicVerdict::PoorMatch);
        assert_eq!(AgronomicVerdict::from_score(0.0), AgronomicVerdict::PoorMatch);
    }
}
