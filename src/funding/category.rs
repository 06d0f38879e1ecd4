use crate::funding::{FundingCatalog, FundingMatch};
use crate::reference::{CropCategory, ReferenceData};

/// Funding lines suggested for each crop category, in display order.
pub const CATEGORY_FUNDING: &[(CropCategory, &[&str])] = &[
    (CropCategory::Fruits, &["F.1.1", "F.1.3"]),
    (CropCategory::IndustrialPlants, &["F.1.1", "F.1.5"]),
    (CropCategory::Vegetables, &["F.1.1", "F.1.4"]),
    (CropCategory::PlantsAndFlowers, &["F.1.7"]),
];

pub fn codes_for_category(category: CropCategory) -> &'static [&'static str] {
    CATEGORY_FUNDING
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, codes)| *codes)
        .unwrap_or(&[])
}

/// Declared category first, otherwise the first dataset row for the crop.
pub fn resolve_category(
    reference: &ReferenceData,
    crop_name: &str,
    declared: Option<CropCategory>,
) -> Option<CropCategory> {
    declared.or_else(|| {
        reference
            .first_category(crop_name)
            .and_then(CropCategory::from_label)
    })
}

pub fn suggest_for_category(
    catalog: &FundingCatalog,
    category: Option<CropCategory>,
) -> Vec<FundingMatch> {
    match category {
        Some(category) => catalog.resolve(codes_for_category(category).iter().copied()),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::catalog::fixtures::sample_catalog;
    use crate::reference::fixtures::sample;

    fn codes(matches: &[FundingMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.code_label()).collect()
    }

    #[test]
    fn maps_each_category() {
        let catalog = sample_catalog();
        assert_eq!(
            codes(&suggest_for_category(&catalog, Some(CropCategory::Fruits))),
            vec!["F.1.1", "F.1.3"]
        );
        assert_eq!(
            codes(&suggest_for_category(&catalog, Some(CropCategory::IndustrialPlants))),
            vec!["F.1.1", "F.1.5"]
        );
        assert_eq!(
            codes(&suggest_for_category(&catalog, Some(CropCategory::Vegetables))),
            vec!["F.1.1", "F.1.4"]
        );
        assert_eq!(
            codes(&suggest_for_category(&catalog, Some(CropCategory::PlantsAndFlowers))),
            vec!["F.1.7"]
        );
        assert!(suggest_for_category(&catalog, Some(CropCategory::Cereals)).is_empty());
        assert!(suggest_for_category(&catalog, None).is_empty());
    }

    #[test]
    fn declared_category_overrides_dataset() {
        let data = sample();
        assert_eq!(
            resolve_category(&data, "Banana", None),
            Some(CropCategory::Fruits)
        );
        assert_eq!(
            resolve_category(&data, "Banana", Some(CropCategory::Cereals)),
            Some(CropCategory::Cereals)
        );
        assert_eq!(resolve_category(&data, "Kiwi", None), None);
    }
}
