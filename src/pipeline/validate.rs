use crate::error::{
    ValidationError, MAX_AREA_HA, MAX_COST_PER_HA, MAX_FARMER_AGE, MAX_PH, MAX_SUNLIGHT_HOURS,
    MIN_AREA_HA, MIN_COST_PER_HA, MIN_FARMER_AGE, MIN_PH,
};
use crate::funding::profile::FarmerProfile;
use crate::pipeline::{CropSelection, EvaluationRequest};

/// The only check the pipeline itself enforces.
pub fn check_area(area_ha: f64) -> Result<(), ValidationError> {
    // NaN fails the comparison and is rejected as well.
    if !(area_ha >= MIN_AREA_HA) {
        return Err(ValidationError::AreaBelowMinimum(area_ha));
    }
    Ok(())
}

/// Input-layer checks: every range the form enforces.
pub fn validate_request(request: &EvaluationRequest) -> Result<(), ValidationError> {
    check_area(request.farm.area_ha)?;
    if request.farm.area_ha > MAX_AREA_HA {
        return Err(ValidationError::AreaAboveMaximum(request.farm.area_ha));
    }
    if let Some(cost) = request.farm.cost_per_ha {
        if !(MIN_COST_PER_HA..=MAX_COST_PER_HA).contains(&cost) {
            return Err(ValidationError::CostPerHectare(cost));
        }
    }
    if let Some(estimate) = request.farm.estimated_yield {
        if !(estimate > 0.0) {
            return Err(ValidationError::EstimatedYield(estimate));
        }
    }
    if request.crop.name().trim().is_empty() {
        return Err(ValidationError::EmptyCropName);
    }
    if let CropSelection::Custom(crop) = &request.crop {
        let in_range = |v: f64| (MIN_PH..=MAX_PH).contains(&v);
        if !in_range(crop.ph_min) || !in_range(crop.ph_max) || crop.ph_min > crop.ph_max {
            return Err(ValidationError::PhRange {
                min: crop.ph_min,
                max: crop.ph_max,
            });
        }
        if !(0.0..=MAX_SUNLIGHT_HOURS).contains(&crop.min_sunlight) {
            return Err(ValidationError::Sunlight(crop.min_sunlight));
        }
    }
    if let Some(farmer) = &request.farmer {
        validate_profile(farmer)?;
    }
    Ok(())
}

pub fn validate_profile(profile: &FarmerProfile) -> Result<(), ValidationError> {
    if !(MIN_FARMER_AGE..=MAX_FARMER_AGE).contains(&profile.age) {
        return Err(ValidationError::FarmerAge(profile.age));
    }
    Ok(())
}
