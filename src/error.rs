use thiserror::Error;

pub const MIN_AREA_HA: f64 = 0.25;
pub const MAX_AREA_HA: f64 = 100.0;
pub const MIN_PH: f64 = 3.0;
pub const MAX_PH: f64 = 9.0;
pub const MAX_SUNLIGHT_HOURS: f64 = 15.0;
pub const MIN_COST_PER_HA: f64 = 100.0;
pub const MAX_COST_PER_HA: f64 = 50_000.0;
pub const MIN_FARMER_AGE: u32 = 18;
pub const MAX_FARMER_AGE: u32 = 100;

/// Input problems that stop a single evaluation request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("area must be at least {MIN_AREA_HA} ha (got {0})")]
    AreaBelowMinimum(f64),

    #[error("area must not exceed {MAX_AREA_HA} ha (got {0})")]
    AreaAboveMaximum(f64),

    #[error("pH bounds must lie within [{MIN_PH}, {MAX_PH}] with min <= max (got {min}..{max})")]
    PhRange { min: f64, max: f64 },

    #[error("minimum sunlight must lie within [0, {MAX_SUNLIGHT_HOURS}] hours (got {0})")]
    Sunlight(f64),

    #[error("operational cost must lie within [{MIN_COST_PER_HA}, {MAX_COST_PER_HA}] per ha (got {0})")]
    CostPerHectare(f64),

    #[error("farmer age must lie within [{MIN_FARMER_AGE}, {MAX_FARMER_AGE}] (got {0})")]
    FarmerAge(u32),

    #[error("estimated yield must be positive (got {0})")]
    EstimatedYield(f64),

    #[error("crop name is required")]
    EmptyCropName,
}
