use crate::category::classify_perspective;
use crate::derivation::percent_of;
use crate::report::PerspectiveSummary;
use crate::resolver::{KpiAssignments, RelationshipResolver};
use core_types::{CoverageTier, Initiative, Objective, PerspectiveId, UNRESOLVED};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Per-perspective item counts accumulated during one pass.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    kpis: usize,
    objectives: usize,
    initiatives: usize,
}

/// Rolls KPIs, objectives and initiatives up to the configured perspectives.
#[derive(Debug, Clone)]
pub struct HierarchyAggregator {
    well_documented_at: usize,
}

impl Default for HierarchyAggregator {
    fn default() -> Self {
        Self::new(3)
    }
}

impl HierarchyAggregator {
    pub fn new(well_documented_at: usize) -> Self {
        Self { well_documented_at }
    }

    pub fn coverage_tier(&self, total: usize) -> CoverageTier {
        if total == 0 {
            CoverageTier::NoData
        } else if total < self.well_documented_at {
            CoverageTier::Sparse
        } else {
            CoverageTier::WellDocumented
        }
    }

    /// Produces one summary per configured perspective, in input order.
    ///
    /// KPIs are counted under the perspective in `assignments`; each initiative
    /// is counted once, under whatever its KPI resolved to. Anything unresolved
    /// is left out of every count.
    pub fn summarize(
        &self,
        resolver: &RelationshipResolver<'_>,
        assignments: &KpiAssignments,
        objectives: &[Objective],
        initiatives: &[Initiative],
    ) -> Vec<PerspectiveSummary> {
        let mut tallies: HashMap<PerspectiveId, Tally> = HashMap::new();

        for objective in objectives {
            let perspective_id = resolver.resolve_objective(objective);
            if perspective_id != UNRESOLVED {
                tallies.entry(perspective_id).or_default().objectives += 1;
            }
        }

        for &(_, perspective_id) in assignments.iter() {
            if perspective_id != UNRESOLVED {
                tallies.entry(perspective_id).or_default().kpis += 1;
            }
        }

        for initiative in initiatives {
            let perspective_id = assignments.perspective_of(initiative.kpi_id);
            if perspective_id == UNRESOLVED {
                tracing::debug!(
                    initiative_id = initiative.id,
                    kpi_id = initiative.kpi_id,
                    "Initiative left out of perspective counts"
                );
                continue;
            }
            tallies.entry(perspective_id).or_default().initiatives += 1;
        }

        let perspectives = resolver.perspectives();
        let totals: Vec<(Tally, usize)> = perspectives
            .iter()
            .map(|perspective| {
                let tally = tallies.get(&perspective.id).copied().unwrap_or_default();
                (tally, tally.kpis + tally.objectives + tally.initiatives)
            })
            .collect();
        let grand_total: usize = totals.iter().map(|(_, total)| total).sum();

        tracing::debug!(
            perspectives = perspectives.len(),
            grand_total,
            "Hierarchy aggregated"
        );

        perspectives
            .iter()
            .zip(totals)
            .map(|(perspective, (tally, total))| PerspectiveSummary {
                perspective_id: perspective.id,
                name: perspective.name.clone(),
                category: classify_perspective(&perspective.name),
                kpi_count: tally.kpis,
                objective_count: tally.objectives,
                initiative_count: tally.initiatives,
                total,
                percent_of_grand: if grand_total == 0 {
                    Decimal::ZERO
                } else {
                    percent_of(Decimal::from(total), Decimal::from(grand_total))
                },
                coverage: self.coverage_tier(total),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::default_keyword_rules;
    use core_types::{Kpi, Perspective};
    use rust_decimal_macros::dec;

    #[test]
    fn counts_follow_the_hierarchy() {
        let perspectives = vec![
            Perspective::new(1, "Finanzas"),
            Perspective::new(2, "Cliente"),
            Perspective::new(3, "Procesos"),
        ];
        let objectives = vec![
            Objective::new(1, "Rentabilidad", 1),
            Objective::new(2, "Satisfacción", 2),
            Objective::new(3, "Fidelización", 2),
        ];
        let kpis = vec![
            Kpi::linked(1, "Margen", 1, "30", "40"),
            Kpi::linked(2, "NPS", 2, "8", "10"),
            Kpi::labelled(3, "Quejas", "clientes", "3", "5"),
        ];
        let initiatives = vec![
            Initiative::new(1, "Precios", 1, dec!(50)),
            Initiative::new(2, "Encuestas", 2, dec!(90)),
            Initiative::new(3, "Call center", 3, dec!(20)),
        ];
        let rules = default_keyword_rules();
        let resolver = RelationshipResolver::new(&perspectives, &objectives, &kpis, &rules);
        let assignments = resolver.assign_kpis(&kpis);

        let summaries =
            HierarchyAggregator::default().summarize(&resolver, &assignments, &objectives, &initiatives);

        assert_eq!(summaries.len(), 3);
        let finance = &summaries[0];
        assert_eq!(
            (finance.kpi_count, finance.objective_count, finance.initiative_count),
            (1, 1, 1)
        );
        assert_eq!(finance.total, 3);
        assert_eq!(finance.coverage, CoverageTier::WellDocumented);

        let customer = &summaries[1];
        assert_eq!(
            (customer.kpi_count, customer.objective_count, customer.initiative_count),
            (2, 2, 2)
        );
        assert_eq!(customer.total, 6);
        assert_eq!(customer.percent_of_grand.round_dp(2), dec!(66.67));

        let process = &summaries[2];
        assert_eq!(process.total, 0);
        assert_eq!(process.percent_of_grand, Decimal::ZERO);
        assert_eq!(process.coverage, CoverageTier::NoData);
    }

    #[test]
    fn unresolved_items_are_not_counted_anywhere() {
        let perspectives = vec![Perspective::new(1, "Finanzas")];
        let kpis = vec![Kpi::labelled(1, "Huella", "medio ambiente", "1", "1")];
        let initiatives = vec![
            Initiative::new(1, "Paneles", 1, dec!(10)),
            Initiative::new(2, "Sin KPI", 99, dec!(10)),
        ];
        let rules = default_keyword_rules();
        let resolver = RelationshipResolver::new(&perspectives, &[], &kpis, &rules);
        let assignments = resolver.assign_kpis(&kpis);

        let summaries =
            HierarchyAggregator::default().summarize(&resolver, &assignments, &[], &initiatives);

        assert_eq!(summaries[0].total, 0);
        assert_eq!(summaries[0].percent_of_grand, Decimal::ZERO);
    }

    #[test]
    fn coverage_tiers_follow_the_threshold() {
        let aggregator = HierarchyAggregator::new(3);
        assert_eq!(aggregator.coverage_tier(0), CoverageTier::NoData);
        assert_eq!(aggregator.coverage_tier(1), CoverageTier::Sparse);
        assert_eq!(aggregator.coverage_tier(2), CoverageTier::Sparse);
        assert_eq!(aggregator.coverage_tier(3), CoverageTier::WellDocumented);
    }

    #[test]
    fn no_perspectives_yields_no_summaries() {
        let kpis = vec![Kpi::labelled(1, "Ventas", "finanzas", "1", "1")];
        let resolver = RelationshipResolver::new(&[], &[], &kpis, &[]);
        let assignments = resolver.assign_kpis(&kpis);

        let summaries = HierarchyAggregator::default().summarize(&resolver, &assignments, &[], &[]);

        assert!(summaries.is_empty());
    }
}
