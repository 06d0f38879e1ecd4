use tracing::{debug, info};

use crate::agronomy::scorer::{assess_custom_crop, assess_known_crop};
use crate::agronomy::soil::RegionProfile;
use crate::decision::synthesize;
use crate::economics::costs::default_cost_per_hectare;
use crate::economics::evaluator::{evaluate_economics, EconomicInputs};
use crate::economics::price::resolve_price;
use crate::error::ValidationError;
use crate::funding::category::{resolve_category, suggest_for_category};
use crate::funding::profile::recommend_for_profile;
use crate::funding::FundingCatalog;
use crate::pipeline::validate::check_area;
use crate::pipeline::{CropSelection, EvaluationContext, EvaluationReport, EvaluationRequest};
use crate::reference::ReferenceData;

/// Runs the agronomic, economic and funding stages for one request.
///
/// Only an undersized area aborts; every missing-data condition ends up as
/// a verdict in the report.
pub fn evaluate(
    reference: &ReferenceData,
    catalog: &FundingCatalog,
    region: &RegionProfile,
    request: &EvaluationRequest,
) -> Result<EvaluationReport, ValidationError> {
    check_area(request.farm.area_ha)?;
    let mut context = EvaluationContext::new(request.farm.area_ha);
    let crop_name = request.crop.name();

    let agronomy = match &request.crop {
        CropSelection::Existing { name } => assess_known_crop(reference, region, name),
        CropSelection::Custom(crop) => assess_custom_crop(reference, region, crop),
    };
    context.agronomic_score = agronomy.score;
    debug!(
        "agronomic stage for {crop_name}: score {:?}, verdict {:?}",
        agronomy.score, agronomy.verdict
    );

    // Known labels are canonicalized once; an unrecognized dataset label is
    // still passed on for the external category lookup.
    let category = resolve_category(reference, crop_name, request.crop.declared_category());
    let category_label = match category {
        Some(category) => Some(category.label()),
        None => reference.first_category(crop_name),
    };
    context.category = category_label.map(str::to_string);

    // Custom crops borrow price and yield from their category; an empty
    // category leaves both unset so the external tiers take over.
    let (internal_price, internal_yield) = match &request.crop {
        CropSelection::Existing { name } => (reference.mean_price(name), reference.mean_yield(name)),
        CropSelection::Custom(crop) => (
            reference.category_mean_price(crop.category.label()),
            reference.category_mean_yield(crop.category.label()),
        ),
    };

    let price = resolve_price(reference, crop_name, category_label, internal_price);
    context.record_price(price);
    let cost_per_ha = request
        .farm
        .cost_per_ha
        .unwrap_or_else(|| default_cost_per_hectare(category));
    context.cost_per_ha = Some(cost_per_ha);

    let economics = evaluate_economics(&EconomicInputs {
        price,
        yield_per_ha: internal_yield,
        estimated_yield: request.farm.estimated_yield,
        agronomic_score: agronomy.score,
        area_ha: request.farm.area_ha,
        cost_per_ha,
    });
    context.record_economics(&economics);
    debug!(
        "economic stage for {crop_name}: verdict {:?}, source {:?}",
        economics.verdict, economics.price_source
    );

    let category_funding = suggest_for_category(catalog, category);
    let profile_funding = request
        .farmer
        .as_ref()
        .map(|farmer| recommend_for_profile(catalog, farmer));

    let classification = synthesize(agronomy.verdict, economics.verdict);
    info!("evaluated {crop_name}: {classification}");

    Ok(EvaluationReport {
        crop: crop_name.to_string(),
        category: context.category.clone(),
        agronomy,
        economics,
        category_funding,
        profile_funding,
        classification,
        context,
    })
}
