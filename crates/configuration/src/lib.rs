use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{default_keyword_rules, Config, KeywordRule, LogFormat, Logging, Thresholds};

/// The file read when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "scorecard.toml";

/// Prefix of the environment variables that override file settings,
/// e.g. `SCORECARD__THRESHOLDS__STATUS_SUCCESS=85`.
pub const ENV_PREFIX: &str = "SCORECARD";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file, then
/// `SCORECARD__*` environment variables. With `path == None` the default
/// `scorecard.toml` is read if it exists; an explicit path must exist.
/// The merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            File::from(path).format(FileFormat::Toml).required(true)
        }
        None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Missing keys fall back to the `Default` impls through `#[serde(default)]`.
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        keyword_rules = config.keywords.len(),
        "Configuration loaded"
    );

    Ok(config)
}
