use serde::{Deserialize, Serialize};

use crate::reference::{CropProfile, ReferenceData};

/// Soil conditions of the target region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionProfile {
    #[serde(default = "default_region_name")]
    pub name: String,
    #[serde(default = "default_soil_ph_min")]
    pub soil_ph_min: f64,
    #[serde(default = "default_soil_ph_max")]
    pub soil_ph_max: f64,
}

impl Default for RegionProfile {
    fn default() -> Self {
        Self {
            name: default_region_name(),
            soil_ph_min: default_soil_ph_min(),
            soil_ph_max: default_soil_ph_max(),
        }
    }
}

fn default_region_name() -> String {
    "Madeira".to_string()
}

fn default_soil_ph_min() -> f64 {
    6.0
}

fn default_soil_ph_max() -> f64 {
    7.5
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilCompatibility {
    Compatible,
    Challenging,
    Unknown,
}

impl SoilCompatibility {
    pub fn display_text(&self, region: &RegionProfile) -> String {
        match self {
            Self::Compatible => format!("Likely compatible with {} soils", region.name),
            Self::Challenging => format!("May face challenges in {} soils", region.name),
            Self::Unknown => "Soil pH requirements unknown".to_string(),
        }
    }
}

/// Existing crops only need their lower pH bound inside the regional window.
pub fn known_crop_compatibility(region: &RegionProfile, ph_min: Option<f64>) -> SoilCompatibility {
    match ph_min {
        Some(min) if min.is_nan() => SoilCompatibility::Unknown,
        Some(min) if (region.soil_ph_min..=region.soil_ph_max).contains(&min) => {
            SoilCompatibility::Compatible
        }
        Some(_) => SoilCompatibility::Challenging,
        None => SoilCompatibility::Unknown,
    }
}

/// A declared range must sit entirely inside the regional window.
pub fn custom_crop_compatibility(region: &RegionProfile, ph_min: f64, ph_max: f64) -> SoilCompatibility {
    if ph_min.is_nan() || ph_max.is_nan() {
        return SoilCompatibility::Unknown;
    }
    if region.soil_ph_min <= ph_min && ph_max <= region.soil_ph_max {
        SoilCompatibility::Compatible
    } else {
        SoilCompatibility::Challenging
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropCard {
    #[serde(flatten)]
    pub profile: CropProfile,
    pub soil: SoilCompatibility,
    pub soil_note: String,
}

pub fn inspect_crop(reference: &ReferenceData, region: &RegionProfile, name: &str) -> Option<CropCard> {
    let profile = reference.profile(name)?;
    let soil = known_crop_compatibility(region, profile.ph_min);
    Some(CropCard {
        soil_note: soil.display_text(region),
        profile,
        soil,
    })
}
