use crate::derivation::percent_of;
use crate::report::TrendAnalysis;
use configuration::Thresholds;
use core_types::{parse_decimal, parse_or, HistoricalRecord, Kpi, PerformanceTier, Trend};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Turns a KPI's historical readings into a trend and a performance-vs-target tier.
#[derive(Debug, Clone)]
pub struct TimeSeriesAnalyzer {
    excellent: Decimal,
    good: Decimal,
    dead_zone: Decimal,
}

impl Default for TimeSeriesAnalyzer {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

impl TimeSeriesAnalyzer {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            excellent: thresholds.performance_excellent,
            good: thresholds.performance_good,
            dead_zone: thresholds.series_dead_zone_pct,
        }
    }

    /// Analyzes one KPI's readings against an optional raw target.
    ///
    /// Readings are re-sorted by date (stable for ties, unparseable dates first)
    /// before the first and last values are compared.
    pub fn analyze(
        &self,
        kpi_id: i64,
        records: &[HistoricalRecord],
        target: Option<&str>,
    ) -> TrendAnalysis {
        let mut ordered: Vec<&HistoricalRecord> = records.iter().collect();
        sort_by_date(&mut ordered);
        self.analyze_ordered(kpi_id, &ordered, target)
    }

    /// One analysis per KPI that has at least one reading, in KPI input order.
    ///
    /// Readings whose KPI is not in `kpis` are ignored.
    pub fn analyze_all(&self, kpis: &[Kpi], records: &[HistoricalRecord]) -> Vec<TrendAnalysis> {
        let mut by_kpi: HashMap<i64, Vec<&HistoricalRecord>> = HashMap::new();
        for record in records {
            by_kpi.entry(record.kpi_id).or_default().push(record);
        }

        let mut seen = HashSet::with_capacity(kpis.len());
        let analyses: Vec<TrendAnalysis> = kpis
            .iter()
            .filter(|kpi| seen.insert(kpi.id))
            .filter_map(|kpi| {
                let mut series = by_kpi.remove(&kpi.id)?;
                sort_by_date(&mut series);
                Some(self.analyze_ordered(kpi.id, &series, Some(kpi.target.as_str())))
            })
            .collect();

        if !by_kpi.is_empty() {
            tracing::debug!(
                orphan_kpis = by_kpi.len(),
                "Historical records reference unknown KPIs"
            );
        }

        analyses
    }

    fn analyze_ordered(
        &self,
        kpi_id: i64,
        ordered: &[&HistoricalRecord],
        target: Option<&str>,
    ) -> TrendAnalysis {
        let target = target.and_then(known_target);

        let (trend, percent_change, last_value) = match ordered {
            [] => (Trend::Stable, Decimal::ZERO, Decimal::ZERO),
            [only] => (Trend::Stable, Decimal::ZERO, reading(only)),
            [first, .., last] => {
                let first = reading(first);
                let last = reading(last);
                let (trend, change) = self.compare(first, last);
                (trend, change, last)
            }
        };

        let performance_tier = match (ordered.is_empty(), target) {
            (false, Some(target)) => self.performance_tier(last_value, target),
            _ => PerformanceTier::Unknown,
        };

        TrendAnalysis {
            kpi_id,
            trend,
            percent_change,
            performance_tier,
            last_value,
            sample_count: ordered.len(),
        }
    }

    /// Direction and magnitude of the move from `first` to `last`.
    ///
    /// The change is measured against `|first|`, so the up and down bands never
    /// overlap even when the series starts below zero.
    fn compare(&self, first: Decimal, last: Decimal) -> (Trend, Decimal) {
        if first.is_zero() {
            return (Trend::Stable, Decimal::ZERO);
        }

        let signed_change = percent_of(last.saturating_sub(first), first.abs());
        let trend = if signed_change > self.dead_zone {
            Trend::Up
        } else if signed_change < -self.dead_zone {
            Trend::Down
        } else {
            Trend::Stable
        };

        (trend, signed_change.abs())
    }

    pub fn performance_tier(&self, last: Decimal, target: Decimal) -> PerformanceTier {
        let attainment = percent_of(last, target);
        if attainment >= self.excellent {
            PerformanceTier::Excellent
        } else if attainment >= self.good {
            PerformanceTier::Good
        } else {
            PerformanceTier::NeedsAttention
        }
    }
}

/// A target counts as known when it parses to a non-zero number.
fn known_target(raw: &str) -> Option<Decimal> {
    parse_decimal(raw).ok().filter(|target| !target.is_zero())
}

fn reading(record: &HistoricalRecord) -> Decimal {
    parse_or(Some(&record.value), Decimal::ZERO)
}

fn sort_by_date(records: &mut [&HistoricalRecord]) {
    // `sort_by_key` is stable, and `None` orders before any date.
    records.sort_by_key(|record| record.timestamp());
}
