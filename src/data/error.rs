use thiserror::Error;

/// Reasons a launch dataset is rejected at load time.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset contains no launch records")]
    Empty,

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("row {row}: class must be 0 or 1, got '{value}'")]
    InvalidClass { row: usize, value: String },

    #[error("row {row}: payload mass '{value}' is not a non-negative number")]
    InvalidPayload { row: usize, value: String },

    #[error("row {row}: column '{column}' is empty")]
    EmptyCell { row: usize, column: &'static str },
}
