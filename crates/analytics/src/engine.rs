use crate::aggregator::HierarchyAggregator;
use crate::balance::BalanceReporter;
use crate::derivation::MetricDerivation;
use crate::distribution::{initiative_progress, status_breakdown, trend_breakdown};
use crate::error::AnalyticsError;
use crate::report::ScorecardReport;
use crate::resolver::RelationshipResolver;
use crate::timeseries::TimeSeriesAnalyzer;
use configuration::{Config, KeywordRule, Thresholds};
use core_types::Dataset;

/// A stateless evaluator that turns a scorecard snapshot into a `ScorecardReport`.
#[derive(Debug, Clone)]
pub struct ScorecardEngine {
    thresholds: Thresholds,
    keywords: Vec<KeywordRule>,
}

impl Default for ScorecardEngine {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ScorecardEngine {
    /// Builds an engine without validating its inputs.
    pub fn new(thresholds: Thresholds, keywords: Vec<KeywordRule>) -> Self {
        Self {
            thresholds,
            keywords,
        }
    }

    /// Builds an engine, rejecting unordered thresholds or unusable keyword rules.
    pub fn try_new(
        thresholds: Thresholds,
        keywords: Vec<KeywordRule>,
    ) -> Result<Self, AnalyticsError> {
        let config = Config {
            thresholds,
            keywords,
            ..Config::default()
        };
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.thresholds.clone(), config.keywords.clone())
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn keywords(&self) -> &[KeywordRule] {
        &self.keywords
    }

    /// A resolver over the dataset's perspectives, objectives and KPIs.
    pub fn resolver<'a>(&self, dataset: &'a Dataset) -> RelationshipResolver<'a> {
        RelationshipResolver::new(
            &dataset.perspectives,
            &dataset.objectives,
            &dataset.kpis,
            &self.keywords,
        )
    }

    /// Runs every calculation over the dataset.
    ///
    /// Never fails: malformed numbers and dangling references are recovered
    /// with safe defaults or reported as unresolved.
    pub fn evaluate(&self, dataset: &Dataset) -> ScorecardReport {
        tracing::debug!(
            perspectives = dataset.perspectives.len(),
            objectives = dataset.objectives.len(),
            kpis = dataset.kpis.len(),
            initiatives = dataset.initiatives.len(),
            records = dataset.historical_records.len(),
            "Evaluating scorecard"
        );

        let kpis = MetricDerivation::new(self.thresholds.clone()).annotate(&dataset.kpis);

        let resolver = self.resolver(dataset);
        let assignments = resolver.assign_kpis(&dataset.kpis);
        let perspectives = HierarchyAggregator::new(self.thresholds.coverage_well_documented)
            .summarize(
                &resolver,
                &assignments,
                &dataset.objectives,
                &dataset.initiatives,
            );

        let trends = TimeSeriesAnalyzer::new(&self.thresholds)
            .analyze_all(&dataset.kpis, &dataset.historical_records);
        let balance = BalanceReporter::new().report(&perspectives);

        let report = ScorecardReport {
            status: status_breakdown(&kpis),
            trend_distribution: trend_breakdown(&kpis),
            initiatives: initiative_progress(&dataset.initiatives),
            unresolved_kpis: assignments.unresolved(),
            kpis,
            perspectives,
            trends,
            balance,
        };

        tracing::info!(
            kpis = report.kpis.len(),
            unresolved = report.unresolved_kpis.len(),
            recommendation = %report.balance.recommendation,
            "Scorecard evaluated"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Recommendation;
    use core_types::{HistoricalRecord, Initiative, Kpi, Objective, Perspective, Status};
    use rust_decimal_macros::dec;

    fn dataset() -> Dataset {
        Dataset {
            perspectives: vec![Perspective::new(1, "Finanzas"), Perspective::new(2, "Clientes")],
            objectives: vec![
                Objective::new(10, "Rentabilidad", 1),
                Objective::new(20, "Lealtad", 2),
            ],
            kpis: vec![
                Kpi::linked(100, "Ventas", 10, "96", "100"),
                Kpi::labelled(200, "NPS", "customer", "6", "10"),
                Kpi::labelled(300, "Huella", "medio ambiente", "1", "1"),
            ],
            initiatives: vec![Initiative::new(1, "Campaña", 200, dec!(80))],
            historical_records: vec![
                HistoricalRecord::new(1, 100, "80", "2024-01-01"),
                HistoricalRecord::new(2, 100, "96", "2024-02-01"),
            ],
        }
    }

    #[test]
    fn evaluate_assembles_every_section() {
        let report = ScorecardEngine::default().evaluate(&dataset());

        assert_eq!(report.kpis.len(), 3);
        assert_eq!(report.kpis[0].metric.status, Status::Success);
        assert_eq!(report.perspectives.len(), 2);
        assert_eq!(report.perspectives[0].total, 2);
        assert_eq!(report.perspectives[1].total, 3);
        assert_eq!(report.trends.len(), 1);
        assert_eq!(report.balance.grand_total, 5);
        assert_eq!(report.balance.recommendation, Recommendation::FullyBalanced);
        assert_eq!(report.status.total, 3);
        assert_eq!(report.initiatives.good, 1);
        assert_eq!(report.unresolved_kpis, vec![300]);
    }

    #[test]
    fn evaluate_is_repeatable() {
        let engine = ScorecardEngine::default();
        let data = dataset();
        assert_eq!(engine.evaluate(&data), engine.evaluate(&data));
    }

    #[test]
    fn try_new_rejects_inverted_thresholds() {
        let thresholds = Thresholds {
            status_success: 50,
            status_warning: 80,
            ..Thresholds::default()
        };
        let result = ScorecardEngine::try_new(thresholds, Vec::new());
        assert!(matches!(result, Err(AnalyticsError::InvalidConfiguration(_))));
    }

    #[test]
    fn custom_thresholds_flow_into_derivation() {
        let thresholds = Thresholds {
            status_success: 95,
            ..Thresholds::default()
        };
        let engine = ScorecardEngine::try_new(thresholds, Vec::new()).expect("valid thresholds");
        let report = engine.evaluate(&dataset());
        assert_eq!(report.kpis[0].metric.status, Status::Success);
        assert_eq!(report.kpis[1].metric.status, Status::Danger);
    }
}
