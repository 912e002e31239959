//! The injected transport capability.
//!
//! # Design
//! The core never decides how bytes move. A host picks a `Transport` when it
//! builds the client: the bundled `UreqTransport`, a test double, or its own
//! adapter over whatever HTTP stack it already runs. The contract is one
//! method: deliver the full response or an error, at most once, through the
//! `done` continuation. The executor covers the "at least once" half.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Outcome of one round-trip.
pub type TransportResult = Result<HttpResponse, TransportError>;

/// Continuation a transport calls with the outcome.
pub type Done = Box<dyn FnOnce(TransportResult) + Send + 'static>;

/// Performs a GET and reports the outcome through `done`.
///
/// Implementations may call `done` synchronously or from another thread.
/// They must not block the caller for the duration of the request if they
/// want to honor the client's fire-and-forget contract.
pub trait Transport: Send + Sync {
    fn get(&self, request: HttpRequest, done: Done);
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, request: HttpRequest, done: Done) {
        (**self).get(request, done)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::thread;
    use std::time::Duration;

    use tracing::warn;

    use super::{Done, Transport, TransportResult};
    use crate::config::ClientConfig;
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    /// `Transport` over ureq. Each request runs on its own thread, so `get`
    /// returns immediately and `done` fires from that thread.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
        timeout_ms: Option<u64>,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::with_timeout(None)
        }

        pub fn from_config(config: &ClientConfig) -> Self {
            Self::with_timeout(config.timeout_ms)
        }

        /// `None` waits indefinitely for a response.
        pub fn with_timeout(timeout_ms: Option<u64>) -> Self {
            // Statuses are returned as data: the API reports failures in the
            // envelope, which the executor decodes regardless of status.
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout_ms.map(Duration::from_millis))
                .build()
                .new_agent();
            Self { agent, timeout_ms }
        }

        /// Run the request on the current thread.
        pub fn execute(&self, request: &HttpRequest) -> TransportResult {
            let url = request.url();
            let mut response = self.agent.get(&url).call().map_err(|e| match e {
                ureq::Error::Timeout(_) => TransportError::Timeout(self.timeout_ms.unwrap_or_default()),
                other => TransportError::Network(other.to_string()),
            })?;

            let status = response.status().as_u16();
            // Bulk pulls run past ureq's 10 MB default.
            let body = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_string()
                .map_err(|e| TransportError::Body(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn get(&self, request: HttpRequest, done: Done) {
            let transport = self.clone();
            let spawned = thread::Builder::new()
                .name("epidata-request".to_string())
                .spawn(move || done(transport.execute(&request)));
            // A failed spawn drops `done` unrun; the executor's completion
            // guard still delivers the failure triple.
            if let Err(e) = spawned {
                warn!(error = %e, "could not spawn request thread");
            }
        }
    }
}
