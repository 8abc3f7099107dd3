use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

pub const NETWORK_ERROR_MESSAGE: &str = "Network request failed, please check your connection";

/// Every failure a feature query can surface to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryError {
    /// Rejected locally, nothing was sent
    Validation { message: String },
    /// The upstream answered with a non-2xx status
    Api {
        message: String,
        status: u16,
        code: Option<String>,
        details: Option<Value>,
    },
    /// The request was dispatched but no response came back
    Network { message: String, timed_out: bool },
    Unknown { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Api,
    Network,
    Unknown,
}

impl QueryError {
    pub fn validation(message: impl Into<String>) -> Self {
        QueryError::Validation {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        QueryError::Unknown {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::Validation { .. } => ErrorKind::Validation,
            QueryError::Api { .. } => ErrorKind::Api,
            QueryError::Network { .. } => ErrorKind::Network,
            QueryError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            QueryError::Validation { message }
            | QueryError::Api { message, .. }
            | QueryError::Network { message, .. }
            | QueryError::Unknown { message } => message,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryError::Network { timed_out: true, .. })
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Validation { message } => write!(f, "Validation: {message}"),
            QueryError::Api {
                message, status, ..
            } => write!(f, "API ({status}): {message}"),
            QueryError::Network { message, timed_out } => {
                if *timed_out {
                    write!(f, "Network (timeout): {message}")
                } else {
                    write!(f, "Network: {message}")
                }
            }
            QueryError::Unknown { message } => write!(f, "Unknown: {message}"),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Api => "API_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Unknown => "UNKNOWN_ERROR",
        };
        write!(f, "{name}")
    }
}

// 上游错误响应体, 字段都可能缺失
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<Value>,
    message: Option<String>,
    details: Option<Value>,
}

/// Builds an `Api` error from a non-2xx response.
pub fn api_error(status: StatusCode, body: &[u8]) -> QueryError {
    let parsed = serde_json::from_slice::<ErrorBody>(body).ok();

    let (code, message, details) = match parsed {
        Some(body) => (
            body.code.and_then(|code| match code {
                Value::String(s) if !s.is_empty() => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            body.message.filter(|m| !m.is_empty()),
            body.details,
        ),
        None => (None, None, None),
    };

    QueryError::Api {
        message: message.unwrap_or_else(|| format!("Request failed with HTTP {}", status.as_u16())),
        status: status.as_u16(),
        code,
        details,
    }
}

/// Classifies an error raised by reqwest itself.
pub fn transport_error(error: &reqwest::Error) -> QueryError {
    if error.is_timeout() {
        QueryError::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            timed_out: true,
        }
    } else if error.is_connect() || error.is_request() {
        QueryError::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            timed_out: false,
        }
    } else if error.is_decode() || error.is_body() {
        QueryError::unknown(format!("Unable to read response: {error}"))
    } else {
        QueryError::unknown(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_body_is_surfaced() {
        let body = json!({"code": "X", "message": "domain not found"}).to_string();
        let err = api_error(StatusCode::NOT_FOUND, body.as_bytes());

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "domain not found");
        match err {
            QueryError::Api {
                status, code, details, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(code.as_deref(), Some("X"));
                assert!(details.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn details_are_kept() {
        let body = json!({"message": "bad", "details": {"field": "domain"}}).to_string();
        let QueryError::Api { details, code, .. } =
            api_error(StatusCode::BAD_REQUEST, body.as_bytes())
        else {
            panic!("expected api error");
        };
        assert_eq!(details, Some(json!({"field": "domain"})));
        assert_eq!(code, None);
    }

    #[test]
    fn unstructured_body_falls_back_to_status() {
        let err = api_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(err.message(), "Request failed with HTTP 502");
        assert_eq!(err.kind(), ErrorKind::Api);
    }

    #[test]
    fn empty_message_falls_back_to_status() {
        let body = json!({"code": 500, "message": ""}).to_string();
        let QueryError::Api { message, code, .. } =
            api_error(StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes())
        else {
            panic!("expected api error");
        };
        assert_eq!(message, "Request failed with HTTP 500");
        assert_eq!(code.as_deref(), Some("500"));
    }

    #[test]
    fn kind_names() {
        assert_eq!(ErrorKind::Validation.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorKind::Network.to_string(), "NETWORK_ERROR");
        assert!(
            QueryError::Network {
                message: NETWORK_ERROR_MESSAGE.into(),
                timed_out: true
            }
            .is_timeout()
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let value = serde_json::to_value(QueryError::validation("empty")).unwrap();
        assert_eq!(value, json!({"kind": "VALIDATION", "message": "empty"}));
    }
}
