use crate::ContentType;
use genai_sdk::{ApiError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The input cannot produce a request. Raised before any network call.
    #[error("{0}")]
    Validation(String),
    #[error("The AI returned an invalid format for the {context}. Please try again.")]
    InvalidFormat { context: String },
    #[error("Unsupported content type for generation: {0}")]
    Unsupported(ContentType),
    #[error("Invariant: {0}")]
    Invariant(String),
    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

impl StudioError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_format(context: impl Into<String>) -> Self {
        Self::InvalidFormat {
            context: context.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(error) => error.kind,
            Self::Validation(_) | Self::Unsupported(_) => ErrorKind::RequestShape,
            Self::InvalidFormat { .. } => ErrorKind::Parse,
            Self::Invariant(_) | Self::History(_) => ErrorKind::Unknown,
        }
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("History store lock poisoned")]
    Poisoned,
}

pub type StudioResult<T> = Result<T, StudioError>;
