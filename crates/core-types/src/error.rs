use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Value is not numeric: '{0}'")]
    NotNumeric(String),
}
