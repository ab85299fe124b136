use crate::report::{BalanceReport, LeadingPerspective, PerspectiveSummary, Recommendation};
use rust_decimal::Decimal;

/// Scores how evenly the configured perspectives are populated.
#[derive(Debug, Clone, Default)]
pub struct BalanceReporter;

impl BalanceReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, summaries: &[PerspectiveSummary]) -> BalanceReport {
        let grand_total: usize = summaries.iter().map(|s| s.total).sum();
        let configured = summaries.len();
        let active = summaries.iter().filter(|s| s.total > 0).count();

        // Ties keep the earliest perspective.
        let leading_perspective = summaries
            .iter()
            .fold(None::<&PerspectiveSummary>, |best, candidate| match best {
                Some(best) if best.total >= candidate.total => Some(best),
                _ => Some(candidate),
            })
            .map(|leader| LeadingPerspective {
                perspective_id: leader.perspective_id,
                name: leader.name.clone(),
                total: leader.total,
            });

        let average_per_active_perspective = if active == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(grand_total) / Decimal::from(active)
        };

        let recommendation = if configured > 0 && active == configured {
            Recommendation::FullyBalanced
        } else if active >= 2 {
            Recommendation::PartiallyBalanced {
                remaining: configured - active,
            }
        } else {
            Recommendation::NeedsMoreBalance
        };

        tracing::debug!(
            grand_total,
            configured,
            active,
            %recommendation,
            "Balance evaluated"
        );

        BalanceReport {
            grand_total,
            configured_perspectives: configured,
            active_perspectives: active,
            leading_perspective,
            average_per_active_perspective,
            recommendation_text: recommendation.to_string(),
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CoverageTier, PerspectiveCategory};
    use rust_decimal_macros::dec;

    fn summary(id: i64, name: &str, total: usize) -> PerspectiveSummary {
        PerspectiveSummary {
            perspective_id: id,
            name: name.to_string(),
            category: PerspectiveCategory::Other,
            kpi_count: total,
            objective_count: 0,
            initiative_count: 0,
            total,
            percent_of_grand: Decimal::ZERO,
            coverage: CoverageTier::NoData,
        }
    }

    #[test]
    fn every_perspective_populated_is_fully_balanced() {
        let report = BalanceReporter::new().report(&[
            summary(1, "Finanzas", 4),
            summary(2, "Clientes", 2),
            summary(3, "Procesos", 1),
            summary(4, "Aprendizaje", 3),
        ]);

        assert_eq!(report.grand_total, 10);
        assert_eq!(report.active_perspectives, 4);
        assert_eq!(report.recommendation, Recommendation::FullyBalanced);
        assert_eq!(report.recommendation_text, "fully balanced");
        assert_eq!(report.average_per_active_perspective, dec!(2.5));
        let leader = report.leading_perspective.as_ref().map(|l| l.perspective_id);
        assert_eq!(leader, Some(1));
    }

    #[test]
    fn two_of_four_is_partially_balanced() {
        let report = BalanceReporter::new().report(&[
            summary(1, "Finanzas", 3),
            summary(2, "Clientes", 0),
            summary(3, "Procesos", 3),
            summary(4, "Aprendizaje", 0),
        ]);

        assert_eq!(
            report.recommendation,
            Recommendation::PartiallyBalanced { remaining: 2 }
        );
        assert_eq!(report.recommendation_text, "partially balanced, 2 remaining");
        assert_eq!(report.average_per_active_perspective, dec!(3));
        // Ties go to the earlier perspective.
        assert_eq!(report.leading_perspective.map(|l| l.name), Some("Finanzas".to_string()));
    }

    #[test]
    fn a_single_active_perspective_needs_more_balance() {
        let report =
            BalanceReporter::new().report(&[summary(1, "Finanzas", 5), summary(2, "Clientes", 0)]);
        assert_eq!(report.recommendation, Recommendation::NeedsMoreBalance);
    }

    #[test]
    fn one_configured_and_populated_is_fully_balanced() {
        let report = BalanceReporter::new().report(&[summary(1, "Finanzas", 1)]);
        assert_eq!(report.recommendation, Recommendation::FullyBalanced);
    }

    #[test]
    fn empty_scorecard_is_not_balanced() {
        let report = BalanceReporter::new().report(&[]);
        assert_eq!(report.grand_total, 0);
        assert_eq!(report.configured_perspectives, 0);
        assert_eq!(report.leading_perspective, None);
        assert_eq!(report.average_per_active_perspective, Decimal::ZERO);
        assert_eq!(report.recommendation, Recommendation::NeedsMoreBalance);
        assert_eq!(report.recommendation_text, "needs more balance");
    }

    #[test]
    fn all_empty_perspectives_still_name_a_leader() {
        let report =
            BalanceReporter::new().report(&[summary(7, "Finanzas", 0), summary(8, "Clientes", 0)]);
        assert_eq!(report.leading_perspective.map(|l| l.perspective_id), Some(7));
        assert_eq!(report.recommendation, Recommendation::NeedsMoreBalance);
    }
}
