use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the regional crop dataset. Several rows may share a name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecord {
    #[serde(rename = "Cultura")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    /// Price per 100 kg.
    #[serde(rename = "Preco", default, deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
    /// Yield in kg per hectare.
    #[serde(rename = "Producao", default, deserialize_with = "csv::invalid_option")]
    pub yield_per_ha: Option<f64>,
    #[serde(rename = "score_agro", default, deserialize_with = "csv::invalid_option")]
    pub agronomic_score: Option<f64>,
    #[serde(rename = "solo_pref_cat", default)]
    pub preferred_soil: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ph_min: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ph_max: Option<f64>,
    #[serde(rename = "sol_min", default, deserialize_with = "csv::invalid_option")]
    pub min_sunlight: Option<f64>,
}

/// External reference price, used only when the regional dataset has no price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferencePriceRecord {
    #[serde(rename = "Espécie", alias = "Especie")]
    pub species: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "Preco", default, deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Fruits,
    IndustrialPlants,
    Vegetables,
    PlantsAndFlowers,
    Cereals,
}

impl CropCategory {
    pub const ALL: [CropCategory; 5] = [
        CropCategory::Fruits,
        CropCategory::IndustrialPlants,
        CropCategory::Vegetables,
        CropCategory::PlantsAndFlowers,
        CropCategory::Cereals,
    ];

    /// Label used by the reference datasets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fruits => "Fruits",
            Self::IndustrialPlants => "Industrial plants",
            Self::Vegetables => "Vegetables/Horticultural products",
            Self::PlantsAndFlowers => "Plants and flowers",
            Self::Cereals => "Cereals",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(normalized))
    }
}

impl Display for CropCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Error)]
#[error("unknown crop category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for CropCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(category) = Self::from_label(s) {
            return Ok(category);
        }
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "fruits" | "fruit" => Ok(Self::Fruits),
            "industrial_plants" | "industrial" => Ok(Self::IndustrialPlants),
            "vegetables" | "horticultural" | "vegetables/horticultural_products" => {
                Ok(Self::Vegetables)
            }
            "plants_and_flowers" | "flowers" => Ok(Self::PlantsAndFlowers),
            "cereals" | "cereal" => Ok(Self::Cereals),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaterNeed {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SoilTier {
    Tier1,
    Tier2,
    Tier3,
    #[default]
    Unknown,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::CropCategory;

    #[test]
    fn parses_dataset_labels_and_slugs() {
        assert_eq!(
            CropCategory::from_label(" vegetables/horticultural products "),
            Some(CropCategory::Vegetables)
        );
        assert_eq!(
            CropCategory::from_str("industrial-plants").expect("category"),
            CropCategory::IndustrialPlants
        );
        assert!(CropCategory::from_str("tubers").is_err());
        assert_eq!(CropCategory::from_label("Tubers"), None);
    }
}
