use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("phone contains a non-digit character")]
    InvalidCharacter,
    #[error("invalid phone length: {0}")]
    InvalidLength(usize),
    #[error("invalid phone prefix: {0}")]
    InvalidPrefix(String),
    #[error("date is empty")]
    EmptyDate,
    #[error("invalid date format: {0}")]
    MalformedDate(String),
    #[error("invalid year: {0}")]
    InvalidYear(String),
}
