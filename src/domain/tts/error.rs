use super::language::UnsupportedSelection;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("Please enter some text first.")]
    EmptyInput,
    #[error("text must be {max} characters or less (got {actual})")]
    TextTooLong { max: usize, actual: usize },
    #[error(transparent)]
    UnsupportedSelection(#[from] UnsupportedSelection),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("audio not found")]
    NotFound,
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::EmptyInput | TtsServiceError::Invalid(_) => {
                AppError::BadRequest(err.to_string())
            }
            TtsServiceError::TextTooLong { .. } => AppError::PayloadTooLarge(err.to_string()),
            TtsServiceError::UnsupportedSelection(e) => AppError::UnsupportedSelection(e.to_string()),
            TtsServiceError::SynthesisFailed(msg) => AppError::ExternalService(msg),
            TtsServiceError::NotFound => AppError::NotFound("Audio not found".to_string()),
            TtsServiceError::Storage(msg) => AppError::Internal(msg),
        }
    }
}
