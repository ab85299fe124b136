use crate::numeric::string_or_number;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a perspective. `0` is reserved for "unresolved".
pub type PerspectiveId = i64;

/// The sentinel returned whenever no perspective can be determined.
pub const UNRESOLVED: PerspectiveId = 0;

/// A top-level strategic category (financial, customer, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    pub id: PerspectiveId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Perspective {
    pub fn new(id: PerspectiveId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
        }
    }
}

/// The nested perspective object some legacy objective payloads carry instead of an id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveRef {
    #[serde(default)]
    pub id: Option<PerspectiveId>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A strategic goal owned by one perspective.
///
/// Both wire shapes are kept as-is: the flat `perspectiveId` and the nested
/// `perspective` object. `RelationshipResolver` decides which one applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "perspective_id")]
    pub perspective_id: Option<PerspectiveId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<PerspectiveRef>,
}

impl Objective {
    pub fn new(id: i64, title: impl Into<String>, perspective_id: PerspectiveId) -> Self {
        Self {
            id,
            title: title.into(),
            perspective_id: Some(perspective_id),
            perspective: None,
        }
    }
}

/// A measurable indicator with an actual value and a target, both kept as typed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub target: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, alias = "objective_id")]
    pub objective_id: Option<i64>,
    #[serde(default, alias = "current_value", deserialize_with = "string_or_number")]
    pub current_value: String,
    #[serde(
        default,
        alias = "free_text_perspective_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub free_text_perspective_label: Option<String>,
}

impl Kpi {
    /// A KPI linked to its objective.
    pub fn linked(
        id: i64,
        name: impl Into<String>,
        objective_id: i64,
        current_value: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            target: target.into(),
            unit: String::new(),
            objective_id: Some(objective_id),
            current_value: current_value.into(),
            free_text_perspective_label: None,
        }
    }

    /// A legacy KPI that only names its perspective in free text.
    pub fn labelled(
        id: i64,
        name: impl Into<String>,
        label: impl Into<String>,
        current_value: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            target: target.into(),
            unit: String::new(),
            objective_id: None,
            current_value: current_value.into(),
            free_text_perspective_label: Some(label.into()),
        }
    }

    /// The objective link, treating `0` as "no link".
    pub fn objective_link(&self) -> Option<i64> {
        self.objective_id.filter(|id| *id != 0)
    }
}

/// A project tracked against one KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "kpi_id")]
    pub kpi_id: i64,
    /// Completion percentage, nominally 0 to 100.
    #[serde(default)]
    pub progress: Decimal,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, alias = "owner_id")]
    pub owner_id: Option<i64>,
}

impl Initiative {
    pub fn new(id: i64, name: impl Into<String>, kpi_id: i64, progress: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            kpi_id,
            progress,
            start_date: None,
            end_date: None,
            owner_id: None,
        }
    }
}

/// A dated past value of a KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    pub id: i64,
    #[serde(alias = "kpi_id")]
    pub kpi_id: i64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default)]
    pub date: String,
}

impl HistoricalRecord {
    pub fn new(id: i64, kpi_id: i64, value: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id,
            kpi_id,
            value: value.into(),
            date: date.into(),
        }
    }

    /// The reading's date as a timestamp, if it is RFC 3339 or a plain `YYYY-MM-DD`.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.date.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.naive_utc());
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(parsed);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

/// One snapshot of every collection the engine consumes.
///
/// Every collection is optional in the serialized form and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    pub perspectives: Vec<Perspective>,
    pub objectives: Vec<Objective>,
    pub kpis: Vec<Kpi>,
    pub initiatives: Vec<Initiative>,
    #[serde(alias = "historical_records")]
    pub historical_records: Vec<HistoricalRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn dataset_accepts_camel_and_snake_case_fields() {
        let json = r#"{
            "perspectives": [{"id": 1, "name": "Finanzas"}],
            "objectives": [
                {"id": 1, "title": "Crecer", "perspectiveId": 1},
                {"id": 2, "title": "Legacy", "perspective": {"id": 1, "name": "Finanzas"}}
            ],
            "kpis": [
                {"id": 1, "name": "Ventas", "target": 100, "objective_id": 1, "current_value": "96"}
            ],
            "initiatives": [
                {"id": 1, "name": "Campaña", "kpiId": 1, "progress": 75, "startDate": "2024-01-01"}
            ],
            "historical_records": [
                {"id": 1, "kpiId": 1, "value": 90, "date": "2024-01-31"}
            ]
        }"#;

        let dataset: Dataset = serde_json::from_str(json).unwrap();

        assert_eq!(dataset.perspectives[0].description, "");
        assert_eq!(dataset.objectives[0].perspective_id, Some(1));
        assert_eq!(dataset.objectives[1].perspective_id, None);
        assert_eq!(
            dataset.objectives[1].perspective.as_ref().and_then(|p| p.id),
            Some(1)
        );
        assert_eq!(dataset.kpis[0].target, "100");
        assert_eq!(dataset.kpis[0].current_value, "96");
        assert_eq!(dataset.kpis[0].objective_id, Some(1));
        assert_eq!(dataset.initiatives[0].progress, dec!(75));
        assert_eq!(
            dataset.initiatives[0].start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(dataset.historical_records[0].value, "90");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let dataset: Dataset = serde_json::from_str("{}").unwrap();
        assert_eq!(dataset, Dataset::default());
    }

    #[test]
    fn zero_objective_id_is_not_a_link() {
        let mut kpi = Kpi::linked(1, "Ventas", 0, "1", "1");
        assert_eq!(kpi.objective_link(), None);
        kpi.objective_id = Some(4);
        assert_eq!(kpi.objective_link(), Some(4));
    }

    #[test]
    fn record_timestamps_accept_dates_and_datetimes() {
        let plain = HistoricalRecord::new(1, 1, "1", "2024-03-05");
        let rfc = HistoricalRecord::new(2, 1, "1", "2024-03-05T10:30:00Z");
        let local = HistoricalRecord::new(3, 1, "1", "2024-03-05T10:30:00.000");
        let broken = HistoricalRecord::new(4, 1, "1", "last tuesday");

        let midnight = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let half_past = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap();

        assert_eq!(plain.timestamp(), Some(midnight));
        assert_eq!(rfc.timestamp(), Some(half_past));
        assert_eq!(local.timestamp(), Some(half_past));
        assert_eq!(broken.timestamp(), None);
    }
}
