use crate::reference::CropCategory;

pub const DEFAULT_COST_PER_HA: f64 = 5_000.0;

/// Typical operational cost per hectare, used to pre-fill the cost input.
pub const CATEGORY_COSTS: &[(CropCategory, f64)] = &[
    (CropCategory::Vegetables, 3_400.0),
    (CropCategory::Fruits, 10_500.0),
];

pub fn default_cost_per_hectare(category: Option<CropCategory>) -> f64 {
    let Some(category) = category else {
        return DEFAULT_COST_PER_HA;
    };
    CATEGORY_COSTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, cost)| *cost)
        .unwrap_or(DEFAULT_COST_PER_HA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_defaults() {
        assert_eq!(default_cost_per_hectare(Some(CropCategory::Fruits)), 10_500.0);
        assert_eq!(default_cost_per_hectare(Some(CropCategory::Vegetables)), 3_400.0);
        assert_eq!(default_cost_per_hectare(Some(CropCategory::Cereals)), 5_000.0);
        assert_eq!(default_cost_per_hectare(None), 5_000.0);
    }

    #[test]
    fn dataset_label_case_does_not_change_the_default() {
        let parsed = CropCategory::from_label(" fruits ");
        assert_eq!(default_cost_per_hectare(parsed), 10_500.0);
    }
}
