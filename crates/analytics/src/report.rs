use core_types::{
    CoverageTier, Kpi, PerformanceTier, PerspectiveCategory, PerspectiveId, Status, Trend,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point-in-time classification of one KPI's actual against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetric {
    /// `round(actual / target * 100)`.
    pub percentage: i64,
    pub status: Status,
    pub trend: Trend,
}

/// A KPI with its derived metric fields attached, serialized as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedKpi {
    #[serde(flatten)]
    pub kpi: Kpi,
    #[serde(flatten)]
    pub metric: DerivedMetric,
}

/// Roll-up of everything that belongs to one configured perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveSummary {
    pub perspective_id: PerspectiveId,
    pub name: String,
    pub category: PerspectiveCategory,
    pub kpi_count: usize,
    pub objective_count: usize,
    pub initiative_count: usize,
    /// `kpi_count + objective_count + initiative_count`.
    pub total: usize,
    /// Share of the grand total across all perspectives, 0 when that total is 0.
    pub percent_of_grand: Decimal,
    pub coverage: CoverageTier,
}

/// Result of analyzing one KPI's historical readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub kpi_id: i64,
    pub trend: Trend,
    /// Magnitude of the change from first to last reading, in percent of the first.
    pub percent_change: Decimal,
    pub performance_tier: PerformanceTier,
    pub last_value: Decimal,
    pub sample_count: usize,
}

/// The perspective holding the most items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadingPerspective {
    pub perspective_id: PerspectiveId,
    pub name: String,
    pub total: usize,
}

/// Qualitative verdict on how evenly the scorecard is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum Recommendation {
    FullyBalanced,
    PartiallyBalanced { remaining: usize },
    NeedsMoreBalance,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::FullyBalanced => f.write_str("fully balanced"),
            Recommendation::PartiallyBalanced { remaining } => {
                write!(f, "partially balanced, {remaining} remaining")
            }
            Recommendation::NeedsMoreBalance => f.write_str("needs more balance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub grand_total: usize,
    pub configured_perspectives: usize,
    pub active_perspectives: usize,
    pub leading_perspective: Option<LeadingPerspective>,
    pub average_per_active_perspective: Decimal,
    pub recommendation: Recommendation,
    /// `recommendation` as the sentence shown to users.
    pub recommendation_text: String,
}

/// How many KPIs sit in each status tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub total: usize,
    pub success: usize,
    pub warning: usize,
    pub danger: usize,
}

/// How many KPIs trend each way, with each count as a share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBreakdown {
    pub total: usize,
    pub up: usize,
    pub stable: usize,
    pub down: usize,
    pub up_pct: Decimal,
    pub stable_pct: Decimal,
    pub down_pct: Decimal,
}

/// Initiative completion grouped by progress tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeProgressSummary {
    pub total: usize,
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub critical: usize,
    /// Rounded mean progress, 0 with no initiatives.
    pub average_progress: i64,
}

/// Everything one evaluation pass produces for the presentation side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardReport {
    pub kpis: Vec<DerivedKpi>,
    pub perspectives: Vec<PerspectiveSummary>,
    pub trends: Vec<TrendAnalysis>,
    pub balance: BalanceReport,
    pub status: StatusBreakdown,
    pub trend_distribution: TrendBreakdown,
    pub initiatives: InitiativeProgressSummary,
    /// Ids of KPIs that could not be tied to any perspective.
    pub unresolved_kpis: Vec<i64>,
}
