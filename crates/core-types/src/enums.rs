use serde::{Deserialize, Serialize};
use std::fmt;

/// Point-in-time health of a KPI, derived from its attainment percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Warning,
    Danger,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Danger => "danger",
        }
    }
}

/// Direction of a KPI, either from its attainment percentage or from a series of readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Stable,
    Down,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Stable => "stable",
            Trend::Down => "down",
        }
    }
}

/// How the latest reading of a KPI compares with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    NeedsAttention,
    /// No usable target was available.
    Unknown,
}

impl PerformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "excellent",
            PerformanceTier::Good => "good",
            PerformanceTier::NeedsAttention => "needs_attention",
            PerformanceTier::Unknown => "unknown",
        }
    }
}

/// Informational tier describing how much data a perspective holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    NoData,
    Sparse,
    WellDocumented,
}

impl CoverageTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::NoData => "no data",
            CoverageTier::Sparse => "sparse",
            CoverageTier::WellDocumented => "well documented",
        }
    }
}

/// Bucket of an initiative's completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    Excellent,
    Good,
    Fair,
    Critical,
}

impl ProgressTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressTier::Excellent => "excellent",
            ProgressTier::Good => "good",
            ProgressTier::Fair => "fair",
            ProgressTier::Critical => "critical",
        }
    }
}

/// Canonical Balanced-Scorecard family a perspective belongs to, judged by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerspectiveCategory {
    Financial,
    Customer,
    Process,
    Learning,
    Sustainability,
    Social,
    Innovation,
    Other,
}

impl PerspectiveCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerspectiveCategory::Financial => "financial",
            PerspectiveCategory::Customer => "customer",
            PerspectiveCategory::Process => "process",
            PerspectiveCategory::Learning => "learning",
            PerspectiveCategory::Sustainability => "sustainability",
            PerspectiveCategory::Social => "social",
            PerspectiveCategory::Innovation => "innovation",
            PerspectiveCategory::Other => "other",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_via_as_str!(
    Status,
    Trend,
    PerformanceTier,
    CoverageTier,
    ProgressTier,
    PerspectiveCategory,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&PerformanceTier::NeedsAttention).unwrap(),
            "\"needs_attention\""
        );
        assert_eq!(
            serde_json::to_string(&CoverageTier::WellDocumented).unwrap(),
            "\"well_documented\""
        );
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
    }

    #[test]
    fn display_matches_presentation_labels() {
        assert_eq!(CoverageTier::NoData.to_string(), "no data");
        assert_eq!(Status::Warning.to_string(), "warning");
        assert_eq!(PerspectiveCategory::Learning.to_string(), "learning");
    }
}
