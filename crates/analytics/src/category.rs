use crate::resolver::normalize;
use core_types::PerspectiveCategory;

/// Name fragments per category, checked in order; the first hit wins.
const CATEGORY_FRAGMENTS: &[(PerspectiveCategory, &[&str])] = &[
    (
        PerspectiveCategory::Financial,
        &["finanz", "financ", "económ", "econom", "monetar"],
    ),
    (PerspectiveCategory::Customer, &["client", "usuario", "customer"]),
    (
        PerspectiveCategory::Process,
        &["proces", "operac", "operat", "intern"],
    ),
    (
        PerspectiveCategory::Learning,
        &["aprendiz", "crecimient", "desarroll", "capacit", "learn", "growth"],
    ),
    (
        PerspectiveCategory::Sustainability,
        &["sosteni", "sustain", "ambient", "verde", "ecolog"],
    ),
    (
        PerspectiveCategory::Social,
        &["social", "comunidad", "community", "responsabil"],
    ),
    (
        PerspectiveCategory::Innovation,
        &["innovac", "innovat", "tecnolog", "technolog", "digital"],
    ),
];

/// Classifies a perspective into a canonical BSC family by its name.
pub fn classify_perspective(name: &str) -> PerspectiveCategory {
    let normalized = normalize(name);
    CATEGORY_FRAGMENTS
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|f| normalized.contains(f)))
        .map(|(category, _)| *category)
        .unwrap_or(PerspectiveCategory::Other)
}
