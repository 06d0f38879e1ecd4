pub mod loader;
pub mod normalize;
pub mod schema;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use schema::{
    CategoryParseError, CropCategory, CropRecord, ReferencePriceRecord, SoilTier, WaterNeed,
};

use crate::reference::normalize::{mean_present, normalize_species};

/// Read-only crop and reference-price tables. Loaded once, shared by every
/// evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    crops: Vec<CropRecord>,
    reference_prices: Vec<ReferencePriceRecord>,
}

impl ReferenceData {
    pub fn new(crops: Vec<CropRecord>, reference_prices: Vec<ReferencePriceRecord>) -> Self {
        let reference_prices = reference_prices
            .into_iter()
            .map(|mut record| {
                record.species = normalize_species(&record.species);
                record
            })
            .collect();
        Self {
            crops,
            reference_prices,
        }
    }

    pub fn crops(&self) -> &[CropRecord] {
        &self.crops
    }

    pub fn reference_prices(&self) -> &[ReferencePriceRecord] {
        &self.reference_prices
    }

    pub fn records_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CropRecord> + 'a {
        self.crops.iter().filter(move |record| record.name == name)
    }

    pub fn records_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a CropRecord> + 'a {
        let wanted = category.trim();
        self.crops
            .iter()
            .filter(move |record| record.category.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn contains_crop(&self, name: &str) -> bool {
        self.records_for(name).next().is_some()
    }

    /// Sorted, de-duplicated crop names.
    pub fn crop_names(&self) -> Vec<String> {
        self.crops
            .iter()
            .map(|record| record.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Category of the first row carrying this name.
    pub fn first_category(&self, name: &str) -> Option<&str> {
        self.crops
            .iter()
            .find(|record| record.name == name)
            .map(|record| record.category.as_str())
    }

    pub fn mean_price(&self, name: &str) -> Option<f64> {
        mean_present(self.records_for(name).map(|r| r.price))
    }

    pub fn mean_yield(&self, name: &str) -> Option<f64> {
        mean_present(self.records_for(name).map(|r| r.yield_per_ha))
    }

    pub fn category_mean_price(&self, category: &str) -> Option<f64> {
        mean_present(self.records_in_category(category).map(|r| r.price))
    }

    pub fn category_mean_yield(&self, category: &str) -> Option<f64> {
        mean_present(self.records_in_category(category).map(|r| r.yield_per_ha))
    }

    /// External prices for a species, compared after normalization.
    pub fn external_price_for_species(&self, name: &str) -> Option<f64> {
        let wanted = normalize_species(name);
        mean_present(
            self.reference_prices
                .iter()
                .filter(|record| record.species == wanted)
                .map(|record| record.price),
        )
    }

    pub fn external_price_for_category(&self, category: &str) -> Option<f64> {
        let wanted = category.trim();
        mean_present(
            self.reference_prices
                .iter()
                .filter(|record| record.category.trim().eq_ignore_ascii_case(wanted))
                .map(|record| record.price),
        )
    }

    /// Detail card built from the first row carrying this name.
    pub fn profile(&self, name: &str) -> Option<CropProfile> {
        let first = self.records_for(name).next()?;
        Some(CropProfile {
            name: first.name.clone(),
            category: first.category.clone(),
            price: first.price,
            agronomic_score: first.agronomic_score,
            preferred_soil: first.preferred_soil.clone(),
            ph_min: first.ph_min,
            ph_max: first.ph_max,
            record_count: self.records_for(name).count(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub name: String,
    pub category: String,
    pub price: Option<f64>,
    pub agronomic_score: Option<f64>,
    pub preferred_soil: Option<String>,
    pub ph_min: Option<f64>,
    pub ph_max: Option<f64>,
    pub record_count: usize,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{CropRecord, ReferenceData, ReferencePriceRecord};

    pub fn crop(name: &str, category: &str) -> CropRecord {
        CropRecord {
            name: name.to_string(),
            category: category.to_string(),
            price: None,
            yield_per_ha: None,
            agronomic_score: None,
            preferred_soil: None,
            ph_min: None,
            ph_max: None,
            min_sunlight: None,
        }
    }

    pub fn price(species: &str, category: &str, value: f64) -> ReferencePriceRecord {
        ReferencePriceRecord {
            species: species.to_string(),
            category: category.to_string(),
            price: Some(value),
        }
    }

    pub fn sample() -> ReferenceData {
        let mut banana_a = crop("Banana", "Fruits");
        banana_a.price = Some(90.0);
        banana_a.yield_per_ha = Some(30_000.0);
        banana_a.agronomic_score = Some(0.6);
        banana_a.ph_min = Some(5.5);
        banana_a.ph_max = Some(7.0);
        banana_a.min_sunlight = Some(6.0);
        banana_a.preferred_soil = Some("2".to_string());

        let mut banana_b = banana_a.clone();
        banana_b.price = Some(110.0);
        banana_b.yield_per_ha = Some(34_000.0);
        banana_b.agronomic_score = Some(0.9);

        let mut potato = crop("Batata", "Vegetables/Horticultural products");
        potato.price = Some(40.0);
        potato.yield_per_ha = Some(20_000.0);
        potato.agronomic_score = Some(0.4);
        potato.ph_min = Some(5.0);
        potato.ph_max = Some(6.5);
        potato.min_sunlight = None;

        let mut sugarcane = crop("Cana-de-açúcar", "Industrial plants");
        sugarcane.price = Some(0.0);
        sugarcane.yield_per_ha = Some(80_000.0);
        sugarcane.agronomic_score = Some(0.7);
        sugarcane.ph_min = Some(6.0);
        sugarcane.ph_max = Some(8.0);
        sugarcane.min_sunlight = Some(9.0);

        ReferenceData::new(
            vec![banana_a, banana_b, potato, sugarcane],
            vec![
                price(" Cana-de-Açúcar ", "Industrial plants", 4.0),
                price("Tabaco", "Industrial plants", 10.0),
                price("Anona", "Fruits", 150.0),
            ],
        )
    }
}
