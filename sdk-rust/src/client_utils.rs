use crate::GenerativeModelError;
use reqwest::{header::HeaderMap, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Create a JSON request, parse the response.
/// Throws error on non OK status code.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
) -> Result<R, GenerativeModelError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    parse_json(response).await
}

/// Fetch a JSON resource.
/// Throws error on non OK status code.
pub async fn get_json<R: DeserializeOwned>(
    client: &Client,
    url: &str,
    headers: HeaderMap,
) -> Result<R, GenerativeModelError> {
    let response = client.get(url).headers(headers).send().await?;
    parse_json(response).await
}

async fn parse_json<R: DeserializeOwned>(response: Response) -> Result<R, GenerativeModelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<R>().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GenerativeModelError::StatusCode(status, error_message(&body)))
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Extract the message of a `{"error": {"message", "status"}}` body, keeping
/// the raw body when it has another shape.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error:
                ErrorBody {
                    message: Some(message),
                    status,
                },
        }) => match status {
            Some(status) => format!("{message} ({status})"),
            None => message,
        },
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::error_message;

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid. (INVALID_ARGUMENT)");
        assert_eq!(error_message("upstream down"), "upstream down");
    }
}
