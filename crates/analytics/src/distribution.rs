//! Portfolio-level tallies over derived KPIs and initiatives.

use crate::derivation::{percent_of, round_half_up};
use crate::report::{DerivedKpi, InitiativeProgressSummary, StatusBreakdown, TrendBreakdown};
use core_types::{Initiative, ProgressTier, Status, Trend};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn status_breakdown(kpis: &[DerivedKpi]) -> StatusBreakdown {
    kpis.iter()
        .fold(StatusBreakdown::default(), |mut acc, derived| {
            acc.total += 1;
            match derived.metric.status {
                Status::Success => acc.success += 1,
                Status::Warning => acc.warning += 1,
                Status::Danger => acc.danger += 1,
            }
            acc
        })
}

pub fn trend_breakdown(kpis: &[DerivedKpi]) -> TrendBreakdown {
    let (mut up, mut stable, mut down) = (0usize, 0usize, 0usize);
    for derived in kpis {
        match derived.metric.trend {
            Trend::Up => up += 1,
            Trend::Stable => stable += 1,
            Trend::Down => down += 1,
        }
    }

    let total = kpis.len();
    let share = |count: usize| {
        if total == 0 {
            Decimal::ZERO
        } else {
            percent_of(Decimal::from(count), Decimal::from(total))
        }
    };

    TrendBreakdown {
        total,
        up,
        stable,
        down,
        up_pct: share(up),
        stable_pct: share(stable),
        down_pct: share(down),
    }
}

/// Best performers first. Equal percentages keep their input order.
pub fn rank_by_percentage(kpis: &[DerivedKpi]) -> Vec<&DerivedKpi> {
    let mut ranked: Vec<&DerivedKpi> = kpis.iter().collect();
    ranked.sort_by(|a, b| b.metric.percentage.cmp(&a.metric.percentage));
    ranked
}

pub fn classify_progress(progress: Decimal) -> ProgressTier {
    if progress >= dec!(90) {
        ProgressTier::Excellent
    } else if progress >= dec!(70) {
        ProgressTier::Good
    } else if progress >= dec!(50) {
        ProgressTier::Fair
    } else {
        ProgressTier::Critical
    }
}

pub fn initiative_progress(initiatives: &[Initiative]) -> InitiativeProgressSummary {
    let mut summary = InitiativeProgressSummary::default();
    let mut sum = Decimal::ZERO;

    for initiative in initiatives {
        summary.total += 1;
        sum = sum.saturating_add(initiative.progress);
        match classify_progress(initiative.progress) {
            ProgressTier::Excellent => summary.excellent += 1,
            ProgressTier::Good => summary.good += 1,
            ProgressTier::Fair => summary.fair += 1,
            ProgressTier::Critical => summary.critical += 1,
        }
    }

    if summary.total > 0 {
        summary.average_progress = round_half_up(sum / Decimal::from(summary.total));
    }
    summary
}
