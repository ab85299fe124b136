//! Terminal tables for the `scorecard` commands.

use analytics::{
    rank_by_percentage, BalanceReport, DerivedKpi, PerspectiveSummary, ScorecardReport,
    TrendAnalysis,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use core_types::{Perspective, PerspectiveId, UNRESOLVED};
use rust_decimal::Decimal;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn pct(value: Decimal) -> String {
    format!("{}%", value.round_dp(1).normalize())
}

/// KPIs ordered from best to worst attainment.
pub fn kpi_table(kpis: &[DerivedKpi]) -> Table {
    let mut table = table(vec!["Id", "KPI", "Actual", "Target", "%", "Status", "Trend"]);
    for derived in rank_by_percentage(kpis) {
        let kpi = &derived.kpi;
        table.add_row(vec![
            kpi.id.to_string(),
            kpi.name.clone(),
            format!("{} {}", kpi.current_value, kpi.unit).trim().to_string(),
            kpi.target.clone(),
            derived.metric.percentage.to_string(),
            derived.metric.status.to_string(),
            derived.metric.trend.to_string(),
        ]);
    }
    table
}

pub fn perspective_table(summaries: &[PerspectiveSummary]) -> Table {
    let mut table = table(vec![
        "Id",
        "Perspective",
        "Category",
        "Objectives",
        "KPIs",
        "Initiatives",
        "Total",
        "Share",
        "Coverage",
    ]);
    for summary in summaries {
        table.add_row(vec![
            summary.perspective_id.to_string(),
            summary.name.clone(),
            summary.category.to_string(),
            summary.objective_count.to_string(),
            summary.kpi_count.to_string(),
            summary.initiative_count.to_string(),
            summary.total.to_string(),
            pct(summary.percent_of_grand),
            summary.coverage.to_string(),
        ]);
    }
    table
}

pub fn trend_table(trends: &[TrendAnalysis]) -> Table {
    let mut table = table(vec!["KPI", "Readings", "Last", "Trend", "Change", "Performance"]);
    for analysis in trends {
        table.add_row(vec![
            analysis.kpi_id.to_string(),
            analysis.sample_count.to_string(),
            analysis.last_value.normalize().to_string(),
            analysis.trend.to_string(),
            pct(analysis.percent_change),
            analysis.performance_tier.to_string(),
        ]);
    }
    table
}

pub fn balance_table(balance: &BalanceReport) -> Table {
    let leader = balance
        .leading_perspective
        .as_ref()
        .map(|leader| format!("{} ({})", leader.name, leader.total))
        .unwrap_or_else(|| "-".to_string());

    let mut table = table(vec!["Balance", ""]);
    table
        .add_row(vec!["Items".to_string(), balance.grand_total.to_string()])
        .add_row(vec![
            "Active perspectives".to_string(),
            format!(
                "{} / {}",
                balance.active_perspectives, balance.configured_perspectives
            ),
        ])
        .add_row(vec!["Leading".to_string(), leader])
        .add_row(vec![
            "Average per active".to_string(),
            balance.average_per_active_perspective.round_dp(2).normalize().to_string(),
        ])
        .add_row(vec![
            "Recommendation".to_string(),
            balance.recommendation.to_string(),
        ]);
    table
}

/// Status, trend and initiative tallies side by side.
pub fn distribution_table(report: &ScorecardReport) -> Table {
    let status = &report.status;
    let trend = &report.trend_distribution;
    let initiatives = &report.initiatives;

    let mut table = table(vec!["Distribution", "Counts"]);
    table
        .add_row(vec![
            "Status".to_string(),
            format!(
                "success {} / warning {} / danger {}",
                status.success, status.warning, status.danger
            ),
        ])
        .add_row(vec![
            "Trend".to_string(),
            format!(
                "up {} ({}) / stable {} ({}) / down {} ({})",
                trend.up,
                pct(trend.up_pct),
                trend.stable,
                pct(trend.stable_pct),
                trend.down,
                pct(trend.down_pct)
            ),
        ])
        .add_row(vec![
            "Initiatives".to_string(),
            format!(
                "excellent {} / good {} / fair {} / critical {} (avg {}%)",
                initiatives.excellent,
                initiatives.good,
                initiatives.fair,
                initiatives.critical,
                initiatives.average_progress
            ),
        ]);
    table
}

/// One line describing where a label resolved to.
pub fn resolution_line(label: &str, id: PerspectiveId, perspectives: &[Perspective]) -> String {
    if id == UNRESOLVED {
        return format!("\"{label}\" -> unresolved (0)");
    }
    match perspectives.iter().find(|p| p.id == id) {
        Some(perspective) => format!("\"{label}\" -> {} ({id})", perspective.name),
        None => format!("\"{label}\" -> {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::ScorecardEngine;
    use core_types::{Dataset, Kpi, Objective};

    fn report() -> ScorecardReport {
        let dataset = Dataset {
            perspectives: vec![Perspective::new(1, "Finanzas"), Perspective::new(2, "Clientes")],
            objectives: vec![Objective::new(1, "Rentabilidad", 1)],
            kpis: vec![
                Kpi::linked(1, "Ventas", 1, "50", "100"),
                Kpi::linked(2, "Margen", 1, "96", "100"),
            ],
            ..Dataset::default()
        };
        ScorecardEngine::default().evaluate(&dataset)
    }

    #[test]
    fn kpi_table_lists_best_performers_first() {
        let rendered = kpi_table(&report().kpis).to_string();
        let margin = rendered.find("Margen").expect("Margen row");
        let sales = rendered.find("Ventas").expect("Ventas row");
        assert!(margin < sales);
        assert!(rendered.contains("success"));
    }

    #[test]
    fn perspective_table_shows_every_perspective() {
        let rendered = perspective_table(&report().perspectives).to_string();
        assert!(rendered.contains("Finanzas"));
        assert!(rendered.contains("Clientes"));
        assert!(rendered.contains("no data"));
        assert!(rendered.contains("100%"));
    }

    #[test]
    fn balance_table_carries_the_recommendation() {
        let rendered = balance_table(&report().balance).to_string();
        assert!(rendered.contains("needs more balance"));
        assert!(rendered.contains("1 / 2"));
    }

    #[test]
    fn resolution_line_names_the_perspective() {
        let perspectives = vec![Perspective::new(2, "Cliente")];
        assert_eq!(
            resolution_line("cliente", 2, &perspectives),
            "\"cliente\" -> Cliente (2)"
        );
        assert_eq!(
            resolution_line("marketing", UNRESOLVED, &perspectives),
            "\"marketing\" -> unresolved (0)"
        );
    }
}
