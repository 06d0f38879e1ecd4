use anyhow::Result;
use serde::Serialize;

use crate::funding::FundingMatch;
use crate::output::fmt_opt;
use crate::pipeline::EvaluationReport;

pub fn report_to_csv(report: &EvaluationReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "crop",
        "category",
        "agronomic_score",
        "agronomic_verdict",
        "price",
        "price_source",
        "yield_per_ha",
        "adjusted_revenue",
        "profit",
        "economic_verdict",
        "category_funding",
        "profile_funding",
        "classification",
    ])?;
    let metrics = report.economics.metrics.as_ref();
    let join_codes = |matches: &[FundingMatch]| {
        matches
            .iter()
            .map(|m| m.code_label())
            .collect::<Vec<_>>()
            .join(";")
    };
    writer.write_record([
        report.crop.clone(),
        report.category.clone().unwrap_or_default(),
        fmt_opt(report.agronomy.score, 4),
        serde_tag(&report.agronomy.verdict),
        fmt_opt(report.context.price, 2),
        report
            .economics
            .price_source
            .map(|s| s.to_string())
            .unwrap_or_default(),
        fmt_opt(metrics.map(|m| m.yield_per_ha), 0),
        fmt_opt(metrics.map(|m| m.adjusted_revenue), 2),
        fmt_opt(metrics.map(|m| m.profit), 2),
        serde_tag(&report.economics.verdict),
        join_codes(&report.category_funding),
        report
            .profile_funding
            .as_deref()
            .map(join_codes)
            .unwrap_or_default(),
        serde_tag(&report.classification),
    ])?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

/// Same tag the JSON output uses for a unit enum variant.
fn serde_tag<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(tag)) => tag,
        _ => String::new(),
    }
}

/// One list for export: category lines first, then profile lines not already
/// listed. The not-applicable entry survives only when nothing else matched.
pub fn merge_funding(by_category: &[FundingMatch], by_profile: &[FundingMatch]) -> Vec<FundingMatch> {
    let mut merged = by_category.to_vec();
    merged.extend(
        by_profile
            .iter()
            .filter(|m| !by_category.contains(m))
            .cloned(),
    );
    if merged.iter().any(|m| !m.is_not_applicable()) {
        merged.retain(|m| !m.is_not_applicable());
    }
    merged
}

pub fn funding_to_csv(matches: &[FundingMatch]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["code", "name", "objective", "support", "criteria"])?;
    for m in matches {
        writer.write_record([
            m.code_label(),
            m.program.name.as_str(),
            m.program.objective.as_str(),
            m.program.support_text(),
            m.program.criteria.join("; ").as_str(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::{funding_to_csv, merge_funding, report_to_csv};
    use crate::agronomy::soil::RegionProfile;
    use crate::funding::catalog::fixtures::sample_catalog;
    use crate::funding::FundingMatch;
    use crate::pipeline::runner::evaluate;
    use crate::pipeline::{CropSelection, EvaluationRequest, FarmParameters};
    use crate::reference::fixtures::sample;

    #[test]
    fn merged_funding_never_mixes_not_applicable_with_codes() {
        let by_category = sample_catalog().resolve(["F.1.1", "F.1.3"]);
        let merged = merge_funding(&by_category, &[FundingMatch::not_applicable()]);
        let codes: Vec<_> = merged.iter().map(|m| m.code_label()).collect();
        assert_eq!(codes, vec!["F.1.1", "F.1.3"]);

        let only_sentinel = merge_funding(&[], &[FundingMatch::not_applicable()]);
        assert_eq!(only_sentinel.len(), 1);
        assert!(only_sentinel[0].is_not_applicable());
    }

    #[test]
    fn merged_funding_drops_duplicate_codes() {
        let catalog = sample_catalog();
        let merged = merge_funding(
            &catalog.resolve(["F.1.1", "F.1.3"]),
            &catalog.resolve(["F.1.1", "F.5.1"]),
        );
        let codes: Vec<_> = merged.iter().map(|m| m.code_label()).collect();
        assert_eq!(codes, vec!["F.1.1", "F.1.3", "F.5.1"]);
    }

    #[test]
    fn report_row_uses_snake_case_tags() {
        let request = EvaluationRequest {
            crop: CropSelection::Existing {
                name: "Banana".to_string(),
            },
            farm: FarmParameters {
                area_ha: 1.0,
                cost_per_ha: None,
                estimated_yield: None,
            },
            farmer: None,
        };
        let report = evaluate(&sample(), &sample_catalog(), &RegionProfile::default(), &request)
            .expect("report");
        let csv = report_to_csv(&report).expect("csv");
        let row = csv.lines().nth(1).expect("data row");
        assert!(row.contains(",good_match,"));
        assert!(row.contains(",high_viability,"));
        assert!(row.ends_with(",fully_viable"));
    }

    #[test]
    fn funding_csv_has_header_and_rows() {
        let csv = funding_to_csv(&[FundingMatch::not_applicable()]).expect("csv");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("code,name,objective,support,criteria"));
        assert_eq!(lines.next(), Some("N/A,Not applicable,No clear line,N/A,"));
    }
}
