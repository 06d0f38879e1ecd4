pub mod runner;
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::agronomy::{AgronomicAssessment, CustomCropInput};
use crate::decision::FinalClassification;
use crate::economics::price::{PriceSource, ResolvedPrice};
use crate::economics::EconomicAssessment;
use crate::funding::profile::FarmerProfile;
use crate::funding::FundingMatch;
use crate::reference::CropCategory;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CropSelection {
    Existing { name: String },
    Custom(CustomCropInput),
}

impl CropSelection {
    pub fn name(&self) -> &str {
        match self {
            Self::Existing { name } => name,
            Self::Custom(crop) => &crop.name,
        }
    }

    pub fn declared_category(&self) -> Option<CropCategory> {
        match self {
            Self::Existing { .. } => None,
            Self::Custom(crop) => Some(crop.category),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmParameters {
    pub area_ha: f64,
    /// Pre-filled from the category default when absent.
    #[serde(default)]
    pub cost_per_ha: Option<f64>,
    /// Used only when the dataset has no yield for the crop.
    #[serde(default)]
    pub estimated_yield: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationRequest {
    pub crop: CropSelection,
    pub farm: FarmParameters,
    #[serde(default)]
    pub farmer: Option<FarmerProfile>,
}

/// Values resolved while the request moves through the stages. Each stage
/// fills its own fields and leaves earlier ones alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationContext {
    pub area_ha: f64,
    pub agronomic_score: Option<f64>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub price_source: Option<PriceSource>,
    pub yield_per_ha: Option<f64>,
    pub cost_per_ha: Option<f64>,
    pub profit: Option<f64>,
}

impl EvaluationContext {
    pub fn new(area_ha: f64) -> Self {
        Self {
            area_ha,
            ..Self::default()
        }
    }

    pub fn record_price(&mut self, resolved: Option<ResolvedPrice>) {
        if let Some(resolved) = resolved {
            self.price = Some(resolved.value);
            self.price_source = Some(resolved.source);
        }
    }

    pub fn record_economics(&mut self, assessment: &EconomicAssessment) {
        if let Some(metrics) = &assessment.metrics {
            self.yield_per_ha = Some(metrics.yield_per_ha);
            self.profit = Some(metrics.profit);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReport {
    pub crop: String,
    pub category: Option<String>,
    pub agronomy: AgronomicAssessment,
    pub economics: EconomicAssessment,
    pub category_funding: Vec<FundingMatch>,
    /// `None` when no farmer profile was supplied.
    pub profile_funding: Option<Vec<FundingMatch>>,
    pub classification: FinalClassification,
    pub context: EvaluationContext,
}
