//! The `{result, message, epidata}` response envelope.

use serde::Deserialize;
use serde_json::Value as Json;
use tracing::debug;

use crate::error::TransportError;
use crate::http::HttpResponse;

/// Result code delivered when no well-formed envelope could be read.
pub const UNKNOWN_ERROR_RESULT: i64 = 0;
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Normalized top-level response.
///
/// `result` is the API's status code (`1` success, `-2` no results, negative
/// values for request errors); `epidata` is `None` when the API sent no
/// records.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub result: i64,
    pub message: String,
    pub epidata: Option<Vec<Json>>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    result: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    epidata: Option<Vec<Json>>,
}

impl ResponseEnvelope {
    /// The failure envelope `(0, "unknown error", None)`.
    pub fn unknown_error() -> Self {
        Self {
            result: UNKNOWN_ERROR_RESULT,
            message: UNKNOWN_ERROR_MESSAGE.to_string(),
            epidata: None,
        }
    }

    /// Decode a response body. Anything that is not a JSON object with an
    /// integer `result` becomes [`ResponseEnvelope::unknown_error`].
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<RawEnvelope>(body) {
            Ok(RawEnvelope {
                result: Some(result),
                message,
                epidata,
            }) => Self {
                result,
                message: message.unwrap_or_default(),
                epidata,
            },
            Ok(_) => {
                debug!("response envelope has no result field");
                Self::unknown_error()
            }
            Err(e) => {
                debug!(error = %e, "response body is not an envelope");
                Self::unknown_error()
            }
        }
    }

    /// Normalize whatever the transport produced. Non-2xx statuses still
    /// carry an envelope describing the failure, so the body is decoded
    /// regardless of status.
    pub fn from_transport(outcome: Result<HttpResponse, TransportError>) -> Self {
        match outcome {
            Ok(response) => {
                if !response.is_success() {
                    debug!(status = response.status, "non-success status from epidata API");
                }
                Self::from_body(&response.body)
            }
            Err(_) => Self::unknown_error(),
        }
    }

    /// Split into the positional `(result, message, epidata)` triple.
    pub fn into_parts(self) -> (i64, String, Option<Vec<Json>>) {
        (self.result, self.message, self.epidata)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn well_formed_envelope() {
        let env = ResponseEnvelope::from_body(r#"{"result":1,"message":"ok","epidata":[{"x":1}]}"#);
        assert_eq!(env.result, 1);
        assert_eq!(env.message, "ok");
        assert_eq!(env.epidata, Some(vec![json!({"x": 1})]));
    }

    #[test]
    fn null_epidata() {
        let env = ResponseEnvelope::from_body(r#"{"result":-2,"message":"no results","epidata":null}"#);
        assert_eq!(env.into_parts(), (-2, "no results".to_string(), None));
    }

    #[test]
    fn missing_result_is_unknown_error() {
        let env = ResponseEnvelope::from_body(r#"{"message":"ok","epidata":[]}"#);
        assert_eq!(env, ResponseEnvelope::unknown_error());
    }

    #[test]
    fn non_json_is_unknown_error() {
        let env = ResponseEnvelope::from_body("<html>502 Bad Gateway</html>");
        assert_eq!(env.into_parts(), (0, "unknown error".to_string(), None));
    }

    #[test]
    fn wrong_shape_is_unknown_error() {
        assert_eq!(
            ResponseEnvelope::from_body(r#"{"result":"one","message":"ok"}"#),
            ResponseEnvelope::unknown_error()
        );
        assert_eq!(
            ResponseEnvelope::from_body(r#"{"result":1,"message":"ok","epidata":{"x":1}}"#),
            ResponseEnvelope::unknown_error()
        );
        assert_eq!(ResponseEnvelope::from_body("[1,2,3]"), ResponseEnvelope::unknown_error());
    }

    #[test]
    fn missing_message_is_empty() {
        let env = ResponseEnvelope::from_body(r#"{"result":1,"epidata":[]}"#);
        assert_eq!(env.message, "");
        assert_eq!(env.epidata, Some(vec![]));
    }

    #[test]
    fn transport_error_is_unknown_error() {
        let env = ResponseEnvelope::from_transport(Err(TransportError::Network("refused".into())));
        assert_eq!(env, ResponseEnvelope::unknown_error());
    }

    #[test]
    fn error_status_body_is_still_decoded() {
        let response = HttpResponse {
            status: 401,
            body: r#"{"result":-1,"message":"unauthenticated"}"#.to_string(),
        };
        let env = ResponseEnvelope::from_transport(Ok(response));
        assert_eq!(env.result, -1);
        assert_eq!(env.message, "unauthenticated");
        assert_eq!(env.epidata, None);
    }
}
