use serde_json::Value;
use thiserror::Error;

/// Classified failure of a gateway call.
///
/// The HTTP status alone decides the variant; the message is whatever could
/// be recovered from the response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Input rejected locally or by the server (4xx other than 401/404).
    #[error("{0}")]
    Validation(String),
    /// The server refused the credentials (401).
    #[error("{0}")]
    Auth(String),
    /// An admin call was attempted without a stored credential.
    #[error("Not authenticated")]
    Unauthenticated,
    /// The resource does not exist (404).
    #[error("{0}")]
    NotFound(String),
    /// The server failed (5xx).
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Best-effort message.
        message: String,
    },
    /// No usable response: transport failure or an undecodable body.
    #[error("{0}")]
    Network(String),
}

impl ApiError {
    /// Maps a non-2xx status and its raw body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = detail_message(body).unwrap_or_else(|| format!("HTTP {status}"));
        match status {
            401 => ApiError::Auth(message),
            404 => ApiError::NotFound(message),
            400..=499 => ApiError::Validation(message),
            _ => ApiError::Server {
                status,
                message,
            },
        }
    }

    /// Whether the stored credential should be discarded.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Auth(_) | ApiError::Unauthenticated)
    }

    /// Message for display, with a generic fallback per kind.
    pub fn display_message(&self) -> String {
        let message = self.to_string();
        if !message.trim().is_empty() {
            return message;
        }
        match self {
            ApiError::Validation(_) => "The request was rejected".to_string(),
            ApiError::Auth(_) => "Authentication failed".to_string(),
            ApiError::Unauthenticated => "Not authenticated".to_string(),
            ApiError::NotFound(_) => "Not found".to_string(),
            ApiError::Server {
                ..
            } => "The server encountered an error".to_string(),
            ApiError::Network(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

/// Pulls a readable message from a `{"detail": ...}` body.
///
/// `detail` may be a plain string or a list of `{"msg": ...}` objects.
pub fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(entries) => {
            let parts = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>();
            (!parts.is_empty()).then(|| parts.join("; "))
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decides_the_kind_even_without_a_body() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Auth("HTTP 401".to_string()));
        assert_eq!(ApiError::from_status(404, "<html>"), ApiError::NotFound("HTTP 404".to_string()));
        assert_eq!(ApiError::from_status(422, ""), ApiError::Validation("HTTP 422".to_string()));
        assert_eq!(
            ApiError::from_status(503, "oops"),
            ApiError::Server {
                status: 503,
                message: "HTTP 503".to_string(),
            }
        );
    }

    #[test]
    fn detail_string_becomes_the_message() {
        let err = ApiError::from_status(404, r#"{"detail":"Submission not found"}"#);
        assert_eq!(err, ApiError::NotFound("Submission not found".to_string()));
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let body = r#"{"detail":[{"loc":["body","rating"],"msg":"too large"},{"msg":"empty review"}]}"#;
        assert_eq!(detail_message(body).as_deref(), Some("too large; empty review"));
    }

    #[test]
    fn display_message_falls_back_per_kind() {
        assert_eq!(
            ApiError::Network(String::new()).display_message(),
            "An unexpected error occurred. Please try again."
        );
        assert_eq!(ApiError::Unauthenticated.display_message(), "Not authenticated");
        assert!(ApiError::Auth("x".to_string()).is_auth_failure());
        assert!(!ApiError::NotFound("x".to_string()).is_auth_failure());
    }
}
