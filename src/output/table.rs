use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::agronomy::soil::{CropCard, RegionProfile};
use crate::decision::Signal;
use crate::funding::FundingMatch;
use crate::output::fmt_opt;
use crate::pipeline::EvaluationReport;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn signal_cell(text: impl Into<String>, signal: Signal) -> Cell {
    let color = match signal {
        Signal::Success => Color::Green,
        Signal::Warning => Color::Yellow,
        Signal::Failure => Color::Red,
    };
    Cell::new(text.into()).fg(color)
}

pub fn render_report(report: &EvaluationReport, region: &RegionProfile) -> String {
    let mut out = String::new();

    let mut agronomy = new_table();
    agronomy.set_header(vec!["Crop", "Category", "Agronomic Score", "Verdict", "Soil"]);
    agronomy.add_row(Row::from(vec![
        Cell::new(&report.crop),
        Cell::new(report.category.as_deref().unwrap_or("-")),
        Cell::new(fmt_opt(report.agronomy.score, 2)),
        signal_cell(
            report.agronomy.verdict.display_text(),
            report.agronomy.verdict.into(),
        ),
        Cell::new(report.agronomy.soil.display_text(region)),
    ]));
    out.push_str(&agronomy.to_string());
    out.push('\n');

    let economics = &report.economics;
    let mut table = new_table();
    match &economics.metrics {
        Some(metrics) => {
            table.set_header(vec![
                "Avg Price (/100kg)",
                "Avg Yield (kg/ha)",
                "Area (ha)",
                "Adjusted Revenue",
                "Total Cost",
                "Profit",
                "Verdict",
            ]);
            let yield_label = if economics.estimated_yield {
                format!("{:.0} (estimated)", metrics.yield_per_ha)
            } else {
                format!("{:.0}", metrics.yield_per_ha)
            };
            table.add_row(Row::from(vec![
                Cell::new(format!("{:.2}", metrics.price)),
                Cell::new(yield_label),
                Cell::new(format!("{:.2}", metrics.area_ha)),
                Cell::new(format!("{:.0}", metrics.adjusted_revenue)),
                Cell::new(format!("{:.0}", metrics.total_cost)),
                Cell::new(format!("{:.0}", metrics.profit)),
                signal_cell(economics.verdict.display_text(), economics.verdict.into()),
            ]));
        }
        None => {
            table.set_header(vec!["Economics"]);
            table.add_row(Row::from(vec![signal_cell(
                economics.summary(),
                Signal::Failure,
            )]));
        }
    }
    out.push_str(&table.to_string());
    if let Some(source) = economics.price_source {
        out.push_str(&format!("\n{}", source.caption()));
    }
    out.push('\n');

    out.push_str("\nSuggested funding lines for this crop category\n");
    if report.category_funding.is_empty() {
        out.push_str("No automatic suggestion for this category.\n");
    } else {
        out.push_str(&render_funding_table(&report.category_funding));
        out.push('\n');
    }

    if let Some(profile_funding) = &report.profile_funding {
        out.push_str("\nFunding lines matching the farmer profile\n");
        out.push_str(&render_funding_table(profile_funding));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nFinal assessment: {}",
        report.classification.display_text()
    ));
    out
}

pub fn render_funding_table(matches: &[FundingMatch]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Code", "Name", "Objective", "Support", "Criteria"]);
    for m in matches {
        let criteria = m
            .program
            .criteria
            .iter()
            .map(|c| format!("- {c}"))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            m.code_label().to_string(),
            m.program.name.clone(),
            m.program.objective.clone(),
            m.program.support_text().to_string(),
            criteria,
        ]);
    }
    table.to_string()
}

pub fn render_crop_list(names: &[String]) -> String {
    let mut table = new_table();
    table.set_header(vec!["#", "Crop"]);
    for (idx, name) in names.iter().enumerate() {
        table.add_row(vec![(idx + 1).to_string(), name.clone()]);
    }
    table.to_string()
}

pub fn render_crop_card(card: &CropCard) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    let profile = &card.profile;
    let ph_range = format!(
        "{} - {}",
        fmt_opt(profile.ph_min, 1),
        fmt_opt(profile.ph_max, 1)
    );
    let rows = vec![
        ("Crop", profile.name.clone()),
        ("Category", profile.category.clone()),
        ("Price (/100kg)", fmt_opt(profile.price, 2)),
        ("Agronomic score", fmt_opt(profile.agronomic_score, 2)),
        (
            "Preferred soil category",
            profile.preferred_soil.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("pH range", ph_range),
        ("Dataset rows", profile.record_count.to_string()),
        ("Soil", card.soil_note.clone()),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::FundingMatch;

    #[test]
    fn funding_table_lists_not_applicable_entry() {
        let rendered = render_funding_table(&[FundingMatch::not_applicable()]);
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("Not applicable"));
        assert!(rendered.contains("No clear line"));
    }

    #[test]
    fn crop_list_is_numbered() {
        let rendered = render_crop_list(&["Banana".to_string(), "Batata".to_string()]);
        assert!(rendered.contains("Banana"));
        assert!(rendered.contains('2'));
    }
}
