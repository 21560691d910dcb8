use strucgen_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("placement failed: placed {placed} of {target} atoms in {attempts} attempts")]
    ExhaustedAttempts {
        placed: usize,
        target: usize,
        attempts: usize,
    },
}

pub type GenResult<T> = Result<T, GenError>;

impl From<CoreError> for GenError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Invalid(msg) => GenError::Invalid(msg),
        }
    }
}
