use crate::agronomy::{GOOD_MATCH_THRESHOLD, PARTIAL_MATCH_THRESHOLD};
use crate::economics::price::ResolvedPrice;
use crate::economics::{EconomicAssessment, EconomicMetrics, EconomicVerdict, MissingEconomicData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicInputs {
    pub price: Option<ResolvedPrice>,
    pub yield_per_ha: Option<f64>,
    /// Caller estimate used when the dataset has no yield.
    pub estimated_yield: Option<f64>,
    pub agronomic_score: Option<f64>,
    pub area_ha: f64,
    pub cost_per_ha: f64,
}

/// Prices are per 100 kg, hence the division.
pub fn compute_metrics(
    price: f64,
    yield_per_ha: f64,
    area_ha: f64,
    cost_per_ha: f64,
    agronomic_score: f64,
) -> EconomicMetrics {
    let gross_revenue = price * yield_per_ha * area_ha / 100.0;
    let adjusted_revenue = gross_revenue * agronomic_score;
    let total_cost = cost_per_ha * area_ha;
    EconomicMetrics {
        price,
        yield_per_ha,
        area_ha,
        cost_per_ha,
        gross_revenue,
        adjusted_revenue,
        total_cost,
        profit: adjusted_revenue - total_cost,
    }
}

pub fn classify(agronomic_score: f64, profit: f64) -> EconomicVerdict {
    if agronomic_score >= GOOD_MATCH_THRESHOLD && profit > 0.0 {
        EconomicVerdict::HighViability
    } else if agronomic_score >= PARTIAL_MATCH_THRESHOLD && profit > 0.0 {
        EconomicVerdict::MediumViability
    } else {
        EconomicVerdict::LowViability
    }
}

fn positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

pub fn evaluate_economics(inputs: &EconomicInputs) -> EconomicAssessment {
    let price_source = inputs.price.map(|p| p.source);
    let Some(price) = inputs.price.map(|p| p.value).filter(|p| positive(*p)) else {
        return EconomicAssessment::no_data(MissingEconomicData::NoPrice, price_source);
    };
    let Some(score) = inputs.agronomic_score.filter(|s| !s.is_nan()) else {
        return EconomicAssessment::no_data(MissingEconomicData::NoAgronomicScore, price_source);
    };

    let (yield_per_ha, estimated_yield) = match inputs.yield_per_ha.filter(|y| positive(*y)) {
        Some(value) => (value, false),
        None => match inputs.estimated_yield.filter(|y| positive(*y)) {
            Some(value) => (value, true),
            None => {
                return EconomicAssessment::no_data(
                    MissingEconomicData::NoProduction,
                    price_source,
                )
            }
        },
    };

    let metrics = compute_metrics(price, yield_per_ha, inputs.area_ha, inputs.cost_per_ha, score);
    EconomicAssessment {
        verdict: classify(score, metrics.profit),
        metrics: Some(metrics),
        price_source,
        missing: None,
        estimated_yield,
    }
}
