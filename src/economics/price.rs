use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reference::ReferenceData;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PriceSource {
    Internal,
    ExternalCrop,
    ExternalCategory,
}

impl PriceSource {
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Internal => "Price from the regional crop dataset",
            Self::ExternalCrop => "Price from external reference prices for this crop",
            Self::ExternalCategory => {
                "Price estimated from the external category average (no crop-specific price)"
            }
        }
    }
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let slug = match self {
            Self::Internal => "internal",
            Self::ExternalCrop => "external-crop",
            Self::ExternalCategory => "external-category",
        };
        write!(f, "{slug}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResolvedPrice {
    pub value: f64,
    pub source: PriceSource,
}

fn usable(price: f64) -> bool {
    price != 0.0 && !price.is_nan()
}

/// Internal price, then external by crop name, then external by category.
pub fn resolve_price(
    reference: &ReferenceData,
    crop_name: &str,
    category: Option<&str>,
    internal_price: Option<f64>,
) -> Option<ResolvedPrice> {
    if let Some(value) = internal_price.filter(|p| usable(*p)) {
        return Some(ResolvedPrice {
            value,
            source: PriceSource::Internal,
        });
    }

    if let Some(value) = reference
        .external_price_for_species(crop_name)
        .filter(|p| usable(*p))
    {
        debug!("price for {crop_name} resolved from external crop reference");
        return Some(ResolvedPrice {
            value,
            source: PriceSource::ExternalCrop,
        });
    }

    if let Some(value) = category
        .and_then(|c| reference.external_price_for_category(c))
        .filter(|p| usable(*p))
    {
        debug!("price for {crop_name} resolved from external category average");
        return Some(ResolvedPrice {
            value,
            source: PriceSource::ExternalCategory,
        });
    }

    debug!("no price resolvable for {crop_name}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::fixtures::sample;

    #[test]
    fn internal_price_wins_when_present() {
        let data = sample();
        let resolved = resolve_price(&data, "Banana", Some("Fruits"), Some(100.0)).expect("price");
        assert_eq!(resolved.source, PriceSource::Internal);
        assert_eq!(resolved.value, 100.0);
    }

    #[test]
    fn zero_internal_price_prefers_crop_match_over_category() {
        let data = sample();
        let resolved = resolve_price(
            &data,
            "Cana-de-açúcar",
            Some("Industrial plants"),
            Some(0.0),
        )
        .expect("price");
        assert_eq!(resolved.source, PriceSource::ExternalCrop);
        assert_eq!(resolved.value, 4.0);
    }

    #[test]
    fn nan_internal_price_falls_to_category() {
        let data = sample();
        let resolved = resolve_price(&data, "Goiaba", Some("Fruits"), Some(f64::NAN)).expect("price");
        assert_eq!(resolved.source, PriceSource::ExternalCategory);
        assert_eq!(resolved.value, 150.0);
    }

    #[test]
    fn unresolved_when_every_tier_misses() {
        let data = sample();
        assert!(resolve_price(&data, "Goiaba", Some("Cereals"), None).is_none());
        assert!(resolve_price(&data, "Goiaba", None, None).is_none());
    }

    #[test]
    fn source_serializes_as_kebab_tag() {
        let json = serde_json::to_string(&PriceSource::ExternalCategory).expect("json");
        assert_eq!(json, "\"external-category\"");
        assert_eq!(PriceSource::ExternalCrop.to_string(), "external-crop");
    }
}
