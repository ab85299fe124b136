use configuration::error::ConfigError;
use thiserror::Error;

/// Errors raised while building a `ScorecardEngine`.
///
/// Evaluation itself never fails: malformed records are recovered with safe
/// defaults, so these only surface for an unusable configuration.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid engine configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
