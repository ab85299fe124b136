//! Ownership resolution: which perspective does a KPI, objective, initiative or
//! reading belong to?
//!
//! Explicit links always win: a KPI linked to an objective never falls back to
//! its label, even when the link dangles. Free-text labels are matched against
//! perspective names by bidirectional containment and then through the keyword
//! table. Anything that does not land on a configured perspective is
//! `UNRESOLVED` (`0`) and a warning is logged; resolution never fails.

use configuration::KeywordRule;
use core_types::{
    HistoricalRecord, Initiative, Kpi, Objective, Perspective, PerspectiveId, UNRESOLVED,
};
use std::collections::HashMap;

/// Lower-cases and trims a label or perspective name for matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A keyword rule with its terms and fragments normalized and blanks dropped.
#[derive(Debug, Clone)]
struct NormalizedRule {
    terms: Vec<String>,
    fragments: Vec<String>,
}

impl NormalizedRule {
    fn from_rule(rule: &KeywordRule) -> Self {
        let clean = |items: &[String]| {
            items
                .iter()
                .map(|item| normalize(item))
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
        };
        Self {
            terms: clean(rule.terms.as_slice()),
            fragments: clean(rule.fragments.as_slice()),
        }
    }

    fn applies_to(&self, label: &str) -> bool {
        self.terms.iter().any(|term| label.starts_with(term.as_str()))
    }

    fn accepts(&self, perspective_name: &str) -> bool {
        self.fragments
            .iter()
            .any(|fragment| perspective_name.contains(fragment.as_str()))
    }
}

/// Resolves entities to perspective ids for one pass over borrowed collections.
///
/// Lookups are built once in `new`; the resolver itself holds no mutable state,
/// so resolving the same entity twice always yields the same id.
#[derive(Debug)]
pub struct RelationshipResolver<'a> {
    perspectives: &'a [Perspective],
    /// Normalized perspective names, parallel to `perspectives`.
    names: Vec<String>,
    objectives: HashMap<i64, &'a Objective>,
    kpis: HashMap<i64, &'a Kpi>,
    rules: Vec<NormalizedRule>,
}

impl<'a> RelationshipResolver<'a> {
    /// Indexes the collections. When ids repeat, the first record wins.
    pub fn new(
        perspectives: &'a [Perspective],
        objectives: &'a [Objective],
        kpis: &'a [Kpi],
        keywords: &[KeywordRule],
    ) -> Self {
        let mut objective_index = HashMap::with_capacity(objectives.len());
        for objective in objectives {
            objective_index.entry(objective.id).or_insert(objective);
        }

        let mut kpi_index = HashMap::with_capacity(kpis.len());
        for kpi in kpis {
            kpi_index.entry(kpi.id).or_insert(kpi);
        }

        Self {
            perspectives,
            names: perspectives.iter().map(|p| normalize(&p.name)).collect(),
            objectives: objective_index,
            kpis: kpi_index,
            rules: keywords.iter().map(NormalizedRule::from_rule).collect(),
        }
    }

    pub fn perspectives(&self) -> &'a [Perspective] {
        self.perspectives
    }

    /// Resolves a KPI. A KPI linked to an objective resolves only through that
    /// objective; the free-text label is consulted only when there is no link.
    pub fn resolve_kpi(&self, kpi: &Kpi) -> PerspectiveId {
        let resolved = match kpi.objective_link() {
            Some(objective_id) => self.linked_perspective(kpi.id, objective_id),
            None => kpi
                .free_text_perspective_label
                .as_deref()
                .and_then(|label| self.match_label(label)),
        };

        resolved.unwrap_or_else(|| {
            tracing::warn!(
                kpi_id = kpi.id,
                objective_id = ?kpi.objective_id,
                label = ?kpi.free_text_perspective_label,
                "KPI could not be resolved to a perspective"
            );
            UNRESOLVED
        })
    }

    /// Resolves a bare text label through name containment and the keyword table.
    pub fn resolve_label(&self, label: &str) -> PerspectiveId {
        self.match_label(label).unwrap_or_else(|| {
            tracing::warn!(label, "Perspective label not recognised");
            UNRESOLVED
        })
    }

    /// Resolves an objective: flat `perspectiveId`, then the nested object's id,
    /// then the nested object's name treated as a label.
    ///
    /// A reference to a perspective that is not configured counts as unresolved.
    pub fn resolve_objective(&self, objective: &Objective) -> PerspectiveId {
        self.objective_perspective(objective)
            .and_then(|id| self.configured(id))
            .unwrap_or_else(|| {
                tracing::warn!(
                    objective_id = objective.id,
                    "Objective carries no usable perspective reference"
                );
                UNRESOLVED
            })
    }

    /// Resolves an initiative through its owning KPI.
    pub fn resolve_initiative(&self, initiative: &Initiative) -> PerspectiveId {
        self.resolve_owner(initiative.kpi_id, "initiative", initiative.id)
    }

    /// Resolves a historical reading through its owning KPI.
    pub fn resolve_record(&self, record: &HistoricalRecord) -> PerspectiveId {
        self.resolve_owner(record.kpi_id, "historical record", record.id)
    }

    /// Resolves every KPI once, keeping input order.
    pub fn assign_kpis(&self, kpis: &[Kpi]) -> KpiAssignments {
        let resolved: Vec<(i64, PerspectiveId)> = kpis
            .iter()
            .map(|kpi| (kpi.id, self.resolve_kpi(kpi)))
            .collect();

        let mut by_kpi = HashMap::with_capacity(resolved.len());
        for &(kpi_id, perspective_id) in &resolved {
            by_kpi.entry(kpi_id).or_insert(perspective_id);
        }

        KpiAssignments { resolved, by_kpi }
    }

    fn resolve_owner(&self, kpi_id: i64, kind: &str, id: i64) -> PerspectiveId {
        match self.kpis.get(&kpi_id) {
            Some(kpi) => self.resolve_kpi(kpi),
            None => {
                tracing::warn!(kind, id, kpi_id, "Owning KPI not found");
                UNRESOLVED
            }
        }
    }

    fn linked_perspective(&self, kpi_id: i64, objective_id: i64) -> Option<PerspectiveId> {
        let Some(objective) = self.objectives.get(&objective_id) else {
            tracing::debug!(kpi_id, objective_id, "KPI references an unknown objective");
            return None;
        };
        let perspective_id = self.objective_perspective(objective)?;
        let configured = self.configured(perspective_id);
        if configured.is_none() {
            tracing::debug!(
                kpi_id,
                objective_id,
                perspective_id,
                "KPI's objective points at an unconfigured perspective"
            );
        }
        configured
    }

    fn configured(&self, perspective_id: PerspectiveId) -> Option<PerspectiveId> {
        self.perspectives
            .iter()
            .any(|p| p.id == perspective_id)
            .then_some(perspective_id)
    }

    fn objective_perspective(&self, objective: &Objective) -> Option<PerspectiveId> {
        if let Some(id) = objective.perspective_id.filter(|id| *id != UNRESOLVED) {
            return Some(id);
        }
        let nested = objective.perspective.as_ref()?;
        if let Some(id) = nested.id.filter(|id| *id != UNRESOLVED) {
            return Some(id);
        }
        nested.name.as_deref().and_then(|name| self.match_label(name))
    }

    /// Name containment, then the keyword table. Logs nothing.
    fn match_label(&self, label: &str) -> Option<PerspectiveId> {
        let label = normalize(label);
        if label.is_empty() {
            return None;
        }
        self.match_by_name(&label)
            .or_else(|| self.match_by_keyword(&label))
    }

    fn match_by_name(&self, label: &str) -> Option<PerspectiveId> {
        self.perspectives
            .iter()
            .zip(&self.names)
            .filter(|(_, name)| !name.is_empty())
            .find(|(_, name)| label.contains(name.as_str()) || name.contains(label))
            .map(|(perspective, _)| perspective.id)
    }

    fn match_by_keyword(&self, label: &str) -> Option<PerspectiveId> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(label))
            .find_map(|rule| {
                self.perspectives
                    .iter()
                    .zip(&self.names)
                    .find(|(_, name)| rule.accepts(name))
                    .map(|(perspective, _)| perspective.id)
            })
    }
}

/// The perspective every KPI of one pass resolved to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiAssignments {
    /// One entry per input KPI, in input order.
    resolved: Vec<(i64, PerspectiveId)>,
    /// First resolution per KPI id, used for transitive lookups.
    by_kpi: HashMap<i64, PerspectiveId>,
}

impl KpiAssignments {
    /// The perspective of the KPI with `kpi_id`, or `UNRESOLVED` when unknown.
    pub fn perspective_of(&self, kpi_id: i64) -> PerspectiveId {
        self.by_kpi.get(&kpi_id).copied().unwrap_or(UNRESOLVED)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(i64, PerspectiveId)> {
        self.resolved.iter()
    }

    /// Ids of KPIs that resolved to no perspective, in input order.
    pub fn unresolved(&self) -> Vec<i64> {
        self.resolved
            .iter()
            .filter(|(_, perspective_id)| *perspective_id == UNRESOLVED)
            .map(|(kpi_id, _)| *kpi_id)
            .collect()
    }
}
