use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw failure reported by a [`GenerativeModel`](crate::GenerativeModel)
/// implementation, before it is normalized into an [`ApiError`].
#[derive(Error, Debug)]
pub enum GenerativeModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the provider failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),
    /// The request returns a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the provider was unexpected. (e.g. no candidate
    /// returned for a content request)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
    /// The provider refused to produce content because of its safety filters.
    #[error("Blocked by safety filters: {0}")]
    SafetyBlocked(String),
    /// A long-running operation reported an error of its own.
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Request URLs may carry credentials, so they are dropped from transport
/// errors before anything formats them.
impl From<reqwest::Error> for GenerativeModelError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.without_url())
    }
}

pub type GenerativeModelResult<T> = Result<T, GenerativeModelError>;

/// The closed error taxonomy every failure is mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Rate limited, temporarily unavailable or timed out. Worth retrying.
    Transient,
    /// Invalid key, insufficient permission or a billing problem.
    Credential,
    /// Malformed prompt, invalid argument or missing required input.
    RequestShape,
    /// The content was blocked by safety filters.
    Safety,
    /// The response did not have the expected shape.
    Parse,
    /// Anything the classifier could not place.
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Transient | Self::Unknown)
    }
}

const CREDENTIAL_PHRASES: &[&str] = &[
    "api key not valid",
    "api_key_invalid",
    "permission denied",
    "permission_denied",
    "unauthenticated",
    "billing",
];

const SAFETY_PHRASES: &[&str] = &["safety", "prohibited_content", "blocklist"];

const TRANSIENT_PHRASES: &[&str] = &[
    "rate limit",
    "too many requests",
    "resource exhausted",
    "resource_exhausted",
    "unavailable",
    "overloaded",
    "timeout",
    "timed out",
    "deadline exceeded",
    "try again later",
];

const REQUEST_SHAPE_PHRASES: &[&str] = &[
    "invalid argument",
    "invalid_argument",
    "malformed",
    "bad request",
];

impl GenerativeModelError {
    /// The HTTP status carried by the error, either directly or embedded in
    /// its message (e.g. `"code": 429`).
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::StatusCode(status, _) => Some(status.as_u16()),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            Self::OperationFailed(message) | Self::Invariant(_, message) => {
                embedded_status(message)
            }
            Self::InvalidInput(_) | Self::SafetyBlocked(_) => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::RequestShape,
            Self::SafetyBlocked(_) => ErrorKind::Safety,
            Self::Transport(error) if error.is_timeout() || error.is_connect() => {
                ErrorKind::Transient
            }
            Self::Transport(error) if error.is_decode() => ErrorKind::Parse,
            Self::StatusCode(_, message) | Self::OperationFailed(message) => {
                classify(self.status_code(), message)
            }
            Self::Transport(error) => classify(self.status_code(), &error.to_string()),
            Self::Invariant(_, message) => match classify(self.status_code(), message) {
                ErrorKind::RequestShape => ErrorKind::Unknown,
                kind => kind,
            },
        }
    }
}

/// Classify a failure from its status code, falling back to a
/// case-insensitive phrase match on the message. Credential and safety
/// phrases win over the status code because the provider reports an invalid
/// key as a plain 400.
fn classify(status: Option<u16>, message: &str) -> ErrorKind {
    let lower = message.to_lowercase();
    let mentions = |phrases: &[&str]| phrases.iter().any(|phrase| lower.contains(phrase));

    if mentions(CREDENTIAL_PHRASES) {
        return ErrorKind::Credential;
    }
    if mentions(SAFETY_PHRASES) {
        return ErrorKind::Safety;
    }
    match status {
        Some(408 | 429 | 500 | 502 | 503 | 504) => return ErrorKind::Transient,
        Some(401 | 403) => return ErrorKind::Credential,
        Some(400 | 404 | 413 | 422) => return ErrorKind::RequestShape,
        _ => {}
    }
    if mentions(TRANSIENT_PHRASES) {
        ErrorKind::Transient
    } else if mentions(REQUEST_SHAPE_PHRASES) {
        ErrorKind::RequestShape
    } else {
        ErrorKind::Unknown
    }
}

/// Find a status code written into an error message as `"code": 503` or
/// `status 503` / `status: 503`.
fn embedded_status(message: &str) -> Option<u16> {
    let lower = message.to_lowercase();
    ["\"code\"", "status"].iter().find_map(|key| {
        lower.match_indices(key).find_map(|(index, _)| {
            let rest = lower[index + key.len()..].trim_start_matches([':', ' ', '=']);
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            match digits.parse::<u16>() {
                Ok(code) if digits.len() == 3 && (400..600).contains(&code) => Some(code),
                _ => None,
            }
        })
    })
}

/// A normalized failure of the client wrapper. `context` names the operation
/// that failed (e.g. `generateContent`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: context.into(),
        }
    }

    /// Turn a raw provider error into a user-facing one.
    #[must_use]
    pub fn from_model_error(error: &GenerativeModelError, context: &str) -> Self {
        let kind = error.kind();
        let detail = error.to_string();
        let message = match kind {
            ErrorKind::Transient => format!(
                "The API is rate-limited or temporarily unavailable ({detail}). Please wait a \
                 moment and try again."
            ),
            ErrorKind::Credential if detail.to_lowercase().contains("api key") => {
                "The provided API Key is not valid. Please check your configuration.".to_string()
            }
            ErrorKind::Credential => {
                format!("The API rejected the request credentials or permissions: {detail}")
            }
            ErrorKind::Safety => "Request failed due to safety filters.".to_string(),
            ErrorKind::RequestShape => format!("The request was rejected as invalid: {detail}"),
            ErrorKind::Parse => {
                format!("The API returned a response in an unexpected format: {detail}")
            }
            ErrorKind::Unknown => format!("An unexpected API error occurred: {detail}"),
        };
        Self::new(kind, message, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn classifies_rate_limits_and_outages_as_transient() {
        let rate_limited =
            GenerativeModelError::StatusCode(StatusCode::TOO_MANY_REQUESTS, "slow down".into());
        let unavailable =
            GenerativeModelError::StatusCode(StatusCode::SERVICE_UNAVAILABLE, String::new());
        assert_eq!(rate_limited.kind(), ErrorKind::Transient);
        assert_eq!(unavailable.kind(), ErrorKind::Transient);
    }

    #[test]
    fn invalid_key_reported_as_bad_request_is_a_credential_error() {
        let error = GenerativeModelError::StatusCode(
            StatusCode::BAD_REQUEST,
            "API key not valid. Please pass a valid API key.".into(),
        );
        assert_eq!(error.kind(), ErrorKind::Credential);
        assert!(error.kind().is_terminal());
    }

    #[test]
    fn reads_status_embedded_in_operation_messages() {
        let error = GenerativeModelError::OperationFailed(
            r#"{"error": {"code": 503, "message": "The model is busy"}}"#.into(),
        );
        assert_eq!(error.status_code(), Some(503));
        assert_eq!(error.kind(), ErrorKind::Transient);
    }

    #[test]
    fn falls_back_to_phrase_matching() {
        let error = GenerativeModelError::OperationFailed("Resource exhausted, retry".into());
        assert_eq!(error.kind(), ErrorKind::Transient);

        let error = GenerativeModelError::OperationFailed("something odd".into());
        assert_eq!(error.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn safety_blocks_are_terminal() {
        let error = GenerativeModelError::SafetyBlocked("SAFETY".into());
        assert_eq!(error.kind(), ErrorKind::Safety);

        let api_error = ApiError::from_model_error(&error, "generateContent");
        assert_eq!(api_error.message, "Request failed due to safety filters.");
        assert_eq!(api_error.context, "generateContent");
    }

    #[test]
    fn transient_message_asks_the_user_to_wait() {
        let error =
            GenerativeModelError::StatusCode(StatusCode::TOO_MANY_REQUESTS, "quota".into());
        let api_error = ApiError::from_model_error(&error, "generateImage");
        assert_eq!(api_error.kind, ErrorKind::Transient);
        assert!(api_error.message.contains("try again"));
    }
}
