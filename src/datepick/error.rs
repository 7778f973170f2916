use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatepickError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("A range pair with id \"{0}\" already exists")]
    DuplicatePairId(String),

    #[error("Unable to run a function from a picker that's already removed.")]
    AlreadyRemoved,

    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("No picker is registered with that id")]
    UnknownPicker,

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DatepickError {
    /// True for the configuration-time failures grouped as validation errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DatepickError::Validation(_)
                | DatepickError::InvalidConfiguration(_)
                | DatepickError::DuplicatePairId(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DatepickError>;
