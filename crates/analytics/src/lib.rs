//! # Scorecard Analytics Engine
//!
//! This crate turns a raw balanced-scorecard snapshot (perspectives, objectives,
//! KPIs, initiatives and historical readings) into derived metrics and
//! per-perspective roll-ups.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O of any kind. It depends only on `core-types` for the
//!   data model and `configuration` for thresholds and the keyword table.
//! - **Stateless Calculation:** Every component is a deterministic function from
//!   immutable input slices to new output structures. Evaluating the same
//!   dataset twice yields equal reports.
//! - **Total Functions:** Malformed numbers fall back to safe defaults and
//!   dangling references resolve to `UNRESOLVED`; evaluation never fails.
//!
//! ## Public API
//!
//! - `ScorecardEngine`: Runs every calculation and assembles a `ScorecardReport`.
//! - `MetricDerivation`: Percentage, status and trend for a single KPI.
//! - `RelationshipResolver`: Maps KPIs, objectives, initiatives and readings to a perspective.
//! - `HierarchyAggregator`: Per-perspective counts, shares and coverage tiers.
//! - `TimeSeriesAnalyzer`: Trend and performance tier from historical readings.
//! - `BalanceReporter`: Scorecard-wide balance verdict.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod balance;
pub mod category;
pub mod derivation;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod report;
pub mod resolver;
pub mod timeseries;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::HierarchyAggregator;
pub use balance::BalanceReporter;
pub use category::classify_perspective;
pub use derivation::{attainment_percentage, MetricDerivation};
pub use distribution::{
    classify_progress, initiative_progress, rank_by_percentage, status_breakdown, trend_breakdown,
};
pub use engine::ScorecardEngine;
pub use error::AnalyticsError;
pub use report::{
    BalanceReport, DerivedKpi, DerivedMetric, InitiativeProgressSummary, LeadingPerspective,
    PerspectiveSummary, Recommendation, ScorecardReport, StatusBreakdown, TrendAnalysis,
    TrendBreakdown,
};
pub use resolver::{normalize, KpiAssignments, RelationshipResolver};
pub use timeseries::TimeSeriesAnalyzer;
