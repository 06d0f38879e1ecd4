use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::reference::normalize::normalize_ratio;
use crate::reference::{CropRecord, ReferenceData, ReferencePriceRecord};

pub fn load_reference_data(crops_csv: &Path, reference_prices_csv: &Path) -> Result<ReferenceData> {
    let crops = load_crops(crops_csv)?;
    let prices = if reference_prices_csv.exists() {
        load_reference_prices(reference_prices_csv)?
    } else {
        warn!(
            "reference price file not found, external price fallback disabled: {}",
            reference_prices_csv.display()
        );
        Vec::new()
    };
    Ok(ReferenceData::new(crops, prices))
}

pub fn load_crops(path: &Path) -> Result<Vec<CropRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed opening crop dataset: {}", path.display()))?;
    let crops = parse_crops(file)
        .with_context(|| format!("failed parsing crop dataset: {}", path.display()))?;
    info!("loaded {} crop records from {}", crops.len(), path.display());
    Ok(crops)
}

pub fn load_reference_prices(path: &Path) -> Result<Vec<ReferencePriceRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed opening reference prices: {}", path.display()))?;
    let prices = parse_reference_prices(file)
        .with_context(|| format!("failed parsing reference prices: {}", path.display()))?;
    info!(
        "loaded {} reference price records from {}",
        prices.len(),
        path.display()
    );
    Ok(prices)
}

pub fn parse_crops<R: Read>(reader: R) -> Result<Vec<CropRecord>> {
    let mut crops: Vec<CropRecord> = read_rows(reader)?;
    for record in &mut crops {
        record.name = record.name.trim().to_string();
        record.category = record.category.trim().to_string();
        if let Some(score) = record.agronomic_score {
            let clamped = normalize_ratio(score);
            if clamped != score {
                warn!(
                    "agronomic score {score} for {} outside [0, 1], clamped",
                    record.name
                );
                record.agronomic_score = Some(clamped);
            }
        }
    }
    Ok(crops)
}

pub fn parse_reference_prices<R: Read>(reader: R) -> Result<Vec<ReferencePriceRecord>> {
    read_rows(reader)
}

fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);
    let mut out = Vec::new();
    for row in csv_reader.deserialize() {
        out.push(row?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{parse_crops, parse_reference_prices};

    #[test]
    fn parses_crop_rows_with_missing_cells() {
        let raw = "\
Cultura,categoria,Preco,Producao,score_agro,solo_pref_cat,ph_min,ph_max,sol_min
Banana,Fruits,95.5,32000,0.8,2,5.5,7.0,6
 Batata ,Vegetables/Horticultural products,,18000,1.4,Unknown,5.0,6.5,
Inhame,Vegetables/Horticultural products,n/a,,0.5,,,,
";
        let crops = parse_crops(raw.as_bytes()).expect("crops should parse");
        assert_eq!(crops.len(), 3);
        assert_eq!(crops[0].price, Some(95.5));
        assert_eq!(crops[0].min_sunlight, Some(6.0));
        assert_eq!(crops[1].name, "Batata");
        assert_eq!(crops[1].price, None);
        assert_eq!(crops[1].agronomic_score, Some(1.0));
        assert_eq!(crops[1].min_sunlight, None);
        assert_eq!(crops[2].price, None);
        assert_eq!(crops[2].ph_min, None);
    }

    #[test]
    fn parses_reference_prices_with_accented_header() {
        let raw = "Espécie,categoria,Preco\nAnona,Fruits,150\nTabaco,Industrial plants,\n";
        let prices = parse_reference_prices(raw.as_bytes()).expect("prices should parse");
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].species, "Anona");
        assert_eq!(prices[1].price, None);
    }
}
