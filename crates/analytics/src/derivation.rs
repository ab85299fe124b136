use crate::report::{DerivedKpi, DerivedMetric};
use configuration::Thresholds;
use core_types::{parse_decimal, parse_or, Kpi, Status, Trend};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) const HUNDRED: Decimal = dec!(100);

/// A stateless calculator turning a KPI's actual/target pair into a `DerivedMetric`.
#[derive(Debug, Clone, Default)]
pub struct MetricDerivation {
    thresholds: Thresholds,
}

impl MetricDerivation {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Derives percentage, status and trend from the raw text of a KPI's fields.
    ///
    /// A missing or non-numeric actual counts as `0`; a missing, non-numeric or
    /// zero target counts as `1`.
    pub fn derive(&self, current_value: &str, target: &str) -> DerivedMetric {
        let percentage = attainment_percentage(current_value, target);
        DerivedMetric {
            percentage,
            status: self.status_for(percentage),
            trend: self.trend_for(percentage),
        }
    }

    pub fn derive_kpi(&self, kpi: &Kpi) -> DerivedKpi {
        DerivedKpi {
            kpi: kpi.clone(),
            metric: self.derive(&kpi.current_value, &kpi.target),
        }
    }

    /// Annotates every KPI, preserving input order.
    pub fn annotate(&self, kpis: &[Kpi]) -> Vec<DerivedKpi> {
        kpis.iter().map(|kpi| self.derive_kpi(kpi)).collect()
    }

    pub fn status_for(&self, percentage: i64) -> Status {
        if percentage >= self.thresholds.status_success {
            Status::Success
        } else if percentage >= self.thresholds.status_warning {
            Status::Warning
        } else {
            Status::Danger
        }
    }

    pub fn trend_for(&self, percentage: i64) -> Trend {
        if percentage >= self.thresholds.trend_up {
            Trend::Up
        } else if percentage >= self.thresholds.trend_stable {
            Trend::Stable
        } else {
            Trend::Down
        }
    }
}

/// `round(actual / target * 100)` with the safe parsing defaults applied.
pub fn attainment_percentage(current_value: &str, target: &str) -> i64 {
    let actual = parse_or(Some(current_value), Decimal::ZERO);
    let target = match parse_decimal(target) {
        Ok(value) if !value.is_zero() => value,
        _ => {
            tracing::trace!(raw_target = target, "Unusable KPI target, dividing by 1");
            Decimal::ONE
        }
    };
    round_half_up(percent_of(actual, target))
}

/// `value / base * 100`, saturating instead of overflowing.
pub(crate) fn percent_of(value: Decimal, base: Decimal) -> Decimal {
    value
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or_else(|| {
            if value.is_sign_negative() != base.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

/// Rounds half-way cases towards positive infinity, as dashboard rounding does.
pub(crate) fn round_half_up(value: Decimal) -> i64 {
    let rounded = value
        .checked_add(dec!(0.5))
        .map(|shifted| shifted.floor())
        .unwrap_or_else(|| value.floor());
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
