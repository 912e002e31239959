//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`
//! and decodes an `HttpResponse`; whichever `Transport` the host injected (or
//! the host itself, through the FFI crate) performs the round-trip. Every
//! request to the remote API is a GET, so no method field is carried.
//!
//! All fields use owned types so values can cross thread and FFI boundaries
//! without lifetime concerns.

use crate::params::RequestParams;

/// A GET request against the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub base_url: String,
    pub params: RequestParams,
}

impl HttpRequest {
    /// Base URL with the URL-encoded query string appended.
    pub fn url(&self) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{}", self.base_url, self.params.to_query_string())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
