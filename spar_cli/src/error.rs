use spar_core::CalcError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CalcError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl CliError {
    /// Process exit code: 2 for bad input, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Argument(_) => 2,
            CliError::Core(e) => match e {
                CalcError::InvalidInput { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::UnsupportedElementKind { .. }
                | CalcError::IncompatibleElementPairing { .. }
                | CalcError::TaskNotFound { .. }
                | CalcError::LoadCaseNotFound { .. } => 2,
                _ => 1,
            },
            _ => 1,
        }
    }
}
