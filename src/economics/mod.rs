pub mod costs;
pub mod evaluator;
pub mod price;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::economics::price::PriceSource;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EconomicVerdict {
    HighViability,
    MediumViability,
    LowViability,
    NoData,
}

impl EconomicVerdict {
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::HighViability => "High viability: recommended",
            Self::MediumViability => "Medium viability: profitable with climate or market risk",
            Self::LowViability => "Low viability: not economically viable",
            Self::NoData => "No economic data available",
        }
    }
}

impl Display for EconomicVerdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

/// Why the economic stage could not produce figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingEconomicData {
    NoAgronomicScore,
    NoPrice,
    NoProduction,
}

impl MissingEconomicData {
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::NoAgronomicScore => "No economic data available: crop has no agronomic score",
            Self::NoPrice => "No economic data available: no price found in any source",
            Self::NoProduction => "No production data: supply an estimated yield",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EconomicMetrics {
    /// Price per 100 kg.
    pub price: f64,
    /// kg per hectare.
    pub yield_per_ha: f64,
    pub area_ha: f64,
    pub cost_per_ha: f64,
    pub gross_revenue: f64,
    pub adjusted_revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconomicAssessment {
    pub verdict: EconomicVerdict,
    pub metrics: Option<EconomicMetrics>,
    pub price_source: Option<PriceSource>,
    pub missing: Option<MissingEconomicData>,
    /// Set when the yield came from the caller's estimate.
    pub estimated_yield: bool,
}

impl EconomicAssessment {
    pub fn no_data(missing: MissingEconomicData, price_source: Option<PriceSource>) -> Self {
        Self {
            verdict: EconomicVerdict::NoData,
            metrics: None,
            price_source,
            missing: Some(missing),
            estimated_yield: false,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self.missing {
            Some(missing) => missing.display_text(),
            None => self.verdict.display_text(),
        }
    }
}
