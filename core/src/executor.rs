//! Dispatches one request and delivers its envelope to the caller.
//!
//! # Design
//! The callback is wrapped in a `Completion` that fires exactly once: on the
//! transport's `done`, or from `Drop` with the failure triple if a transport
//! discards `done` without calling it. Callers therefore always get one
//! completion per accepted call.

use serde_json::Value as Json;
use tracing::{debug, warn};

use crate::envelope::ResponseEnvelope;
use crate::http::HttpRequest;
use crate::transport::{Transport, TransportResult};

/// Caller-supplied completion receiving `(result, message, epidata)`.
pub type Callback = Box<dyn FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static>;

struct Completion {
    callback: Option<Callback>,
    source: String,
}

impl Completion {
    fn deliver(mut self, envelope: ResponseEnvelope) {
        if let Some(callback) = self.callback.take() {
            let (result, message, epidata) = envelope.into_parts();
            callback(result, message, epidata);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            warn!(source = %self.source, "transport dropped request without completing it");
            let (result, message, epidata) = ResponseEnvelope::unknown_error().into_parts();
            callback(result, message, epidata);
        }
    }
}

/// Send `request` through `transport` and invoke `callback` exactly once
/// with the normalized envelope.
pub fn execute(transport: &dyn Transport, request: HttpRequest, callback: Callback) {
    let source = request.params.source().to_string();
    debug!(source = %source, url = %request.url(), "dispatching epidata request");

    let completion = Completion {
        callback: Some(callback),
        source,
    };
    transport.get(
        request,
        Box::new(move |outcome: TransportResult| {
            if let Err(e) = &outcome {
                warn!(source = %completion.source, error = %e, "epidata request failed");
            }
            completion.deliver(ResponseEnvelope::from_transport(outcome));
        }),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpResponse;
    use crate::params::RequestParams;
    use crate::transport::Done;

    type Calls = Arc<Mutex<Vec<(i64, String, Option<Vec<Json>>)>>>;

    fn recorder() -> (Calls, Callback) {
        let calls: Calls = Arc::default();
        let sink = Arc::clone(&calls);
        let callback: Callback = Box::new(move |result, message, epidata| {
            sink.lock().unwrap().push((result, message, epidata));
        });
        (calls, callback)
    }

    fn request() -> HttpRequest {
        HttpRequest {
            base_url: "http://localhost/api.php".to_string(),
            params: RequestParams::new("meta"),
        }
    }

    struct Canned(TransportResult);

    impl Transport for Canned {
        fn get(&self, _request: HttpRequest, done: Done) {
            done(self.0.clone());
        }
    }

    struct Discarding;

    impl Transport for Discarding {
        fn get(&self, _request: HttpRequest, done: Done) {
            drop(done);
        }
    }

    #[test]
    fn success_envelope_delivered_once() {
        let (calls, callback) = recorder();
        let transport = Canned(Ok(HttpResponse::ok(
            r#"{"result":1,"message":"ok","epidata":[{"x":1}]}"#,
        )));
        execute(&transport, request(), callback);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (1, "ok".to_string(), Some(vec![json!({"x": 1})])));
    }

    #[test]
    fn malformed_body_delivers_unknown_error_once() {
        let (calls, callback) = recorder();
        execute(&Canned(Ok(HttpResponse::ok("not json"))), request(), callback);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (0, "unknown error".to_string(), None));
    }

    #[test]
    fn transport_error_delivers_unknown_error_once() {
        let (calls, callback) = recorder();
        let transport = Canned(Err(TransportError::Network("connection refused".into())));
        execute(&transport, request(), callback);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (0, "unknown error".to_string(), None));
    }

    #[test]
    fn dropped_completion_still_delivers_once() {
        let (calls, callback) = recorder();
        execute(&Discarding, request(), callback);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 0);
    }
}
