use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `scorecard.toml`; omitted sections fall back to
/// the values the dashboard has always used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    /// Fallback table used to map free-text perspective labels onto configured perspectives.
    pub keywords: Vec<KeywordRule>,
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            keywords: default_keyword_rules(),
            logging: Logging::default(),
        }
    }
}

impl Config {
    /// Checks that every threshold pair is ordered and that the keyword table is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        for (index, rule) in self.keywords.iter().enumerate() {
            if rule.terms.iter().all(|t| t.trim().is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "keyword rule #{index} has no terms"
                )));
            }
            if rule.fragments.iter().all(|f| f.trim().is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "keyword rule #{index} has no fragments"
                )));
            }
        }
        Ok(())
    }
}

/// Classification boundaries. All lower bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Attainment percentage at or above which a KPI is `success`.
    pub status_success: i64,
    /// Attainment percentage at or above which a KPI is `warning` (below: `danger`).
    pub status_warning: i64,
    /// Attainment percentage at or above which a KPI trends `up`.
    pub trend_up: i64,
    /// Attainment percentage at or above which a KPI is `stable` (below: `down`).
    pub trend_stable: i64,
    /// Last reading as a percentage of target for an `excellent` series.
    pub performance_excellent: Decimal,
    /// Last reading as a percentage of target for a `good` series.
    pub performance_good: Decimal,
    /// Half-width, in percent of the first reading, of the band a series may move
    /// within and still count as `stable`.
    pub series_dead_zone_pct: Decimal,
    /// Total items at which a perspective counts as well documented.
    pub coverage_well_documented: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            status_success: 90,
            status_warning: 70,
            trend_up: 95,
            trend_stable: 70,
            performance_excellent: dec!(90),
            performance_good: dec!(70),
            series_dead_zone_pct: dec!(5),
            coverage_well_documented: 3,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status_warning > self.status_success {
            return Err(ConfigError::ValidationError(format!(
                "status_warning ({}) must not exceed status_success ({})",
                self.status_warning, self.status_success
            )));
        }
        if self.trend_stable > self.trend_up {
            return Err(ConfigError::ValidationError(format!(
                "trend_stable ({}) must not exceed trend_up ({})",
                self.trend_stable, self.trend_up
            )));
        }
        if self.performance_good > self.performance_excellent {
            return Err(ConfigError::ValidationError(format!(
                "performance_good ({}) must not exceed performance_excellent ({})",
                self.performance_good, self.performance_excellent
            )));
        }
        if self.series_dead_zone_pct.is_sign_negative() {
            return Err(ConfigError::ValidationError(format!(
                "series_dead_zone_pct ({}) must not be negative",
                self.series_dead_zone_pct
            )));
        }
        if self.coverage_well_documented == 0 {
            return Err(ConfigError::ValidationError(
                "coverage_well_documented must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of the keyword fallback table.
///
/// A normalized label that starts with any of `terms` is looked up among the
/// configured perspectives whose normalized name contains any of `fragments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeywordRule {
    pub terms: Vec<String>,
    pub fragments: Vec<String>,
}

impl KeywordRule {
    pub fn new(terms: &[&str], fragments: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The four canonical Balanced-Scorecard perspectives, in Spanish and English.
pub fn default_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            &["finan", "económ", "econom", "monetar"],
            &["finanz", "financ"],
        ),
        KeywordRule::new(&["client", "customer", "usuario"], &["client", "customer"]),
        KeywordRule::new(
            &["proces", "process", "operac", "operat", "intern"],
            &["proces", "operac", "operat"],
        ),
        KeywordRule::new(
            &["aprend", "learn", "crecim", "grow", "desarroll", "capacit"],
            &["aprendiz", "learn", "crecim", "grow"],
        ),
    ]
}

/// Output style of the console log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Where and how verbosely the application logs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
            file_prefix: "scorecard.log".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn inverted_status_thresholds_are_rejected() {
        let thresholds = Thresholds {
            status_warning: 95,
            ..Thresholds::default()
        };
        let err = thresholds.validate().unwrap_err();
        assert!(err.to_string().contains("status_warning"));
    }

    #[test]
    fn zero_coverage_threshold_is_rejected() {
        let thresholds = Thresholds {
            coverage_well_documented: 0,
            ..Thresholds::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn keyword_rule_without_fragments_is_rejected() {
        let config = Config {
            keywords: vec![KeywordRule::new(&["finan"], &[""])],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
