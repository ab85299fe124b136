use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
