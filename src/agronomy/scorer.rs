use tracing::debug;

use crate::agronomy::soil::{custom_crop_compatibility, known_crop_compatibility, RegionProfile};
use crate::agronomy::{AgronomicAssessment, AgronomicVerdict, CustomCropInput};
use crate::reference::normalize::mean_present;
use crate::reference::{CropRecord, ReferenceData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub score: Option<f64>,
    pub matched_records: usize,
}

pub fn score_known_crop(reference: &ReferenceData, name: &str) -> ScoreOutcome {
    let mut matched_records = 0usize;
    let score = mean_present(reference.records_for(name).map(|record| {
        matched_records += 1;
        record.agronomic_score
    }));
    ScoreOutcome {
        score,
        matched_records,
    }
}

pub fn score_custom_crop(reference: &ReferenceData, crop: &CustomCropInput) -> ScoreOutcome {
    let mut matched_records = 0usize;
    let score = mean_present(
        reference
            .crops()
            .iter()
            .filter(|record| matches_conditions(record, crop.ph_min, crop.ph_max, crop.min_sunlight))
            .map(|record| {
                matched_records += 1;
                record.agronomic_score
            }),
    );
    debug!(
        "custom crop {} matched {matched_records} reference rows",
        crop.name
    );
    ScoreOutcome {
        score,
        matched_records,
    }
}

/// pH ranges overlap and the record needs no more sun than is available.
/// Missing sunlight counts as 0; a missing pH bound never matches.
pub fn matches_conditions(record: &CropRecord, ph_min: f64, ph_max: f64, sunlight: f64) -> bool {
    let (Some(record_min), Some(record_max)) = (record.ph_min, record.ph_max) else {
        return false;
    };
    let record_sun = record.min_sunlight.filter(|v| !v.is_nan()).unwrap_or(0.0);
    record_min <= ph_max && record_max >= ph_min && record_sun <= sunlight
}

pub fn assess_known_crop(
    reference: &ReferenceData,
    region: &RegionProfile,
    name: &str,
) -> AgronomicAssessment {
    let outcome = score_known_crop(reference, name);
    let verdict = outcome
        .score
        .map(AgronomicVerdict::from_score)
        .unwrap_or(AgronomicVerdict::NoData);
    let ph_min = reference.records_for(name).next().and_then(|r| r.ph_min);
    AgronomicAssessment {
        score: outcome.score,
        verdict,
        matched_records: outcome.matched_records,
        soil: known_crop_compatibility(region, ph_min),
    }
}

pub fn assess_custom_crop(
    reference: &ReferenceData,
    region: &RegionProfile,
    crop: &CustomCropInput,
) -> AgronomicAssessment {
    let outcome = score_custom_crop(reference, crop);
    let verdict = match outcome.score {
        Some(score) => AgronomicVerdict::from_score(score),
        None if !crop.name.trim().is_empty() => AgronomicVerdict::NotViable,
        None => AgronomicVerdict::NoData,
    };
    AgronomicAssessment {
        score: outcome.score,
        verdict,
        matched_records: outcome.matched_records,
        soil: custom_crop_compatibility(region, crop.ph_min, crop.ph_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::fixtures::{crop, sample};
    use crate::reference::{CropCategory, SoilTier, WaterNeed};

    fn custom(name: &str, ph_min: f64, ph_max: f64, sun: f64) -> CustomCropInput {
        CustomCropInput {
            name: name.to_string(),
            ph_min,
            ph_max,
            min_sunlight: sun,
            category: CropCategory::Fruits,
            water_need: WaterNeed::Medium,
            soil_tier: SoilTier::Unknown,
        }
    }

    #[test]
    fn known_crop_score_is_mean_of_rows() {
        let data = sample();
        let outcome = score_known_crop(&data, "Banana");
        assert_eq!(outcome.matched_records, 2);
        let score = outcome.score.expect("score");
        assert!((score - 0.75).abs() < 1e-9);
        assert_eq!(AgronomicVerdict::from_score(score), AgronomicVerdict::GoodMatch);
    }

    #[test]
    fn unknown_crop_reports_no_data() {
        let data = sample();
        let assessment = assess_known_crop(&data, &RegionProfile::default(), "Kiwi");
        assert_eq!(assessment.score, None);
        assert_eq!(assessment.verdict, AgronomicVerdict::NoData);
    }

    #[test]
    fn custom_filter_uses_overlap_and_sunlight() {
        let mut inside = crop("A", "Fruits");
        inside.ph_min = Some(6.5);
        inside.ph_max = Some(8.0);
        inside.min_sunlight = Some(8.0);
        assert!(matches_conditions(&inside, 6.0, 7.0, 8.0));

        let mut too_acid = inside.clone();
        too_acid.ph_max = Some(5.9);
        too_acid.ph_min = Some(4.0);
        assert!(!matches_conditions(&too_acid, 6.0, 7.0, 8.0));

        let mut too_alkaline = inside.clone();
        too_alkaline.ph_min = Some(7.1);
        assert!(!matches_conditions(&too_alkaline, 6.0, 7.0, 8.0));

        let mut sunny = inside.clone();
        sunny.min_sunlight = Some(8.5);
        assert!(!matches_conditions(&sunny, 6.0, 7.0, 8.0));

        let mut no_sun_data = inside.clone();
        no_sun_data.min_sunlight = None;
        assert!(matches_conditions(&no_sun_data, 6.0, 7.0, 0.0));

        let mut no_ph = inside;
        no_ph.ph_min = None;
        assert!(!matches_conditions(&no_ph, 6.0, 7.0, 8.0));
    }

    #[test]
    fn custom_crop_scores_matching_rows() {
        let data = sample();
        // Banana rows (sun 6) and Batata (no sun data) overlap [6, 7]; sugarcane needs 9h.
        let outcome = score_custom_crop(&data, &custom("Anona", 6.0, 7.0, 8.0));
        assert_eq!(outcome.matched_records, 3);
        let expected = (0.6 + 0.9 + 0.4) / 3.0;
        assert!((outcome.score.expect("score") - expected).abs() < 1e-9);
    }

    #[test]
    fn custom_crop_without_matches_is_not_viable() {
        let data = sample();
        let region = RegionProfile::default();
        let named = assess_custom_crop(&data, &region, &custom("Cacau", 3.0, 4.0, 15.0));
        assert_eq!(named.verdict, AgronomicVerdict::NotViable);
        assert_eq!(named.matched_records, 0);

        let unnamed = assess_custom_crop(&data, &region, &custom("  ", 3.0, 4.0, 15.0));
        assert_eq!(unnamed.verdict, AgronomicVerdict::NoData);
    }
}
