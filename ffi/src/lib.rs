//! C-ABI wrapper around `epidata-core`.
//!
//! # Overview
//! Lets any language with a C FFI validate Epidata queries, get back the
//! request URL, run the GET itself, and hand the body back for decoding.
//! Queries are JSON documents tagged by `endpoint`, e.g.
//! `{"endpoint": "fluview", "regions": "nat", "epiweeks": [201440]}`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Validation errors come back synchronously in `FfiBuildResult`; decoded
//!   responses are delivered through an `EpidataCallback` exactly once.
//! - The C caller owns all returned pointers and must call the matching
//!   `epidata_free_*` function to release them.

pub mod types;

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use epidata_core::{HttpRequest, Query, ResponseEnvelope};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`, or to the public API when
/// `base_url` is null. Returns null if `base_url` is not valid UTF-8.
///
/// The caller must free the returned pointer with `epidata_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn epidata_client_new(base_url: *const c_char) -> *mut FfiEpidataClient {
    catch_unwind(|| {
        let url = if base_url.is_null() {
            epidata_core::DEFAULT_BASE_URL
        } else {
            match unsafe { CStr::from_ptr(base_url) }.to_str() {
                Ok(url) => url,
                Err(_) => return std::ptr::null_mut(),
            }
        };
        let client = FfiEpidataClient {
            base_url: url.trim_end_matches('/').to_string(),
        };
        Box::into_raw(Box::new(client))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `epidata_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn epidata_client_free(client: *mut FfiEpidataClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Validate a JSON query and build its GET request.
///
/// Never returns null. The caller must free the result with
/// `epidata_free_build_result`.
#[unsafe(no_mangle)]
pub extern "C" fn epidata_build_request(
    client: *const FfiEpidataClient,
    query_json: *const c_char,
) -> *mut FfiBuildResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiBuildResult::null_arg("client");
        }
        if query_json.is_null() {
            return FfiBuildResult::null_arg("query_json");
        }
        let client = unsafe { &*client };
        let raw = unsafe { CStr::from_ptr(query_json) }.to_string_lossy();
        let query: Query = match serde_json::from_str(&raw) {
            Ok(q) => q,
            Err(e) => return FfiBuildResult::invalid_query(e),
        };
        match query.build_params() {
            Ok(params) => FfiBuildResult::ok(HttpRequest {
                base_url: client.base_url.clone(),
                params,
            }),
            Err(e) => FfiBuildResult::validation(e),
        }
    })
    .unwrap_or_else(|_| FfiBuildResult::panic("panic in epidata_build_request"))
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

fn deliver(envelope: ResponseEnvelope, callback: EpidataCallback, user_data: *mut c_void) {
    let message = c_string(&envelope.message);
    let epidata = envelope
        .epidata
        .and_then(|records| serde_json::to_string(&records).ok())
        .and_then(|json| CString::new(json).ok());
    let epidata_ptr = epidata.as_ref().map_or(std::ptr::null(), |s| s.as_ptr());
    callback(envelope.result, message.as_ptr(), epidata_ptr, user_data);
}

/// Decode a response and invoke `callback` exactly once with
/// `(result, message, epidata_json, user_data)`.
///
/// Pass a null `response` when the GET failed at the transport level; the
/// callback then receives `(0, "unknown error", NULL)`. Returns `NullArg`
/// without calling anything if `callback` is null.
#[unsafe(no_mangle)]
pub extern "C" fn epidata_parse_response(
    response: *const FfiHttpResponse,
    callback: Option<EpidataCallback>,
    user_data: *mut c_void,
) -> FfiErrorCode {
    let Some(callback) = callback else {
        return FfiErrorCode::NullArg;
    };
    let envelope = catch_unwind(|| {
        if response.is_null() {
            return ResponseEnvelope::unknown_error();
        }
        let resp = unsafe { &*response };
        if resp.body.is_null() {
            return ResponseEnvelope::unknown_error();
        }
        let body = unsafe { CStr::from_ptr(resp.body) }.to_string_lossy();
        ResponseEnvelope::from_body(&body)
    });
    match envelope {
        Ok(envelope) => {
            deliver(envelope, callback, user_data);
            FfiErrorCode::Ok
        }
        Err(_) => {
            deliver(ResponseEnvelope::unknown_error(), callback, user_data);
            FfiErrorCode::Panic
        }
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiBuildResult` returned by `epidata_build_request`, including
/// its request and message. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn epidata_free_build_result(result: *mut FfiBuildResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.request.is_null() {
            let request = unsafe { Box::from_raw(result.request) };
            if !request.url.is_null() {
                drop(unsafe { CString::from_raw(request.url) });
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn cstr(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    fn with_client<T>(f: impl FnOnce(*const FfiEpidataClient) -> T) -> T {
        let base = cstr("http://localhost:3000/api.php");
        let client = epidata_client_new(base.as_ptr());
        let out = f(client);
        epidata_client_free(client);
        out
    }

    fn url_of(result: *mut FfiBuildResult) -> String {
        let result = unsafe { &*result };
        assert_eq!(result.error_code, FfiErrorCode::Ok);
        let request = unsafe { &*result.request };
        unsafe { CStr::from_ptr(request.url) }.to_str().unwrap().to_string()
    }

    fn message_of(result: *mut FfiBuildResult) -> (FfiErrorCode, String) {
        let result = unsafe { &*result };
        assert!(result.request.is_null());
        let msg = unsafe { CStr::from_ptr(result.error_message) }.to_str().unwrap().to_string();
        (result.error_code, msg)
    }

    #[test]
    fn build_fluview_request() {
        let query = cstr(r#"{"endpoint":"fluview","regions":["nat","hhs1"],"epiweeks":{"from":201501,"to":201440}}"#);
        with_client(|client| {
            let result = epidata_build_request(client, query.as_ptr());
            assert_eq!(
                url_of(result),
                "http://localhost:3000/api.php?source=fluview&regions=nat%2Chhs1&epiweeks=201440-201501"
            );
            epidata_free_build_result(result);
        });
    }

    #[test]
    fn build_reports_validation_error() {
        let query = cstr(r#"{"endpoint":"twitter","auth":"x","locations":"nat"}"#);
        with_client(|client| {
            let result = epidata_build_request(client, query.as_ptr());
            assert_eq!(
                message_of(result),
                (
                    FfiErrorCode::Validation,
                    "exactly one of `dates` and `epiweeks` is required".to_string()
                )
            );
            epidata_free_build_result(result);
        });
    }

    #[test]
    fn build_reports_invalid_query() {
        let query = cstr(r#"{"endpoint":"nope"}"#);
        with_client(|client| {
            let result = epidata_build_request(client, query.as_ptr());
            let (code, msg) = message_of(result);
            assert_eq!(code, FfiErrorCode::InvalidQuery);
            assert!(msg.starts_with("invalid query"));
            epidata_free_build_result(result);
        });
    }

    #[test]
    fn build_null_args() {
        let result = epidata_build_request(std::ptr::null(), std::ptr::null());
        assert_eq!(message_of(result).0, FfiErrorCode::NullArg);
        epidata_free_build_result(result);
    }

    #[test]
    fn non_utf8_base_url_returns_null() {
        let base = CString::new(vec![b'h', 0xff, 0xfe]).unwrap();
        assert!(epidata_client_new(base.as_ptr()).is_null());
    }

    #[test]
    fn null_base_url_uses_public_api() {
        let client = epidata_client_new(std::ptr::null());
        assert_eq!(unsafe { &*client }.base_url, epidata_core::DEFAULT_BASE_URL);
        epidata_client_free(client);
    }

    type Seen = Mutex<Vec<(i64, String, Option<String>)>>;

    extern "C" fn record(result: i64, message: *const c_char, epidata_json: *const c_char, user_data: *mut c_void) {
        let seen = unsafe { &*(user_data as *const Seen) };
        let message = unsafe { CStr::from_ptr(message) }.to_str().unwrap().to_string();
        let epidata = if epidata_json.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(epidata_json) }.to_str().unwrap().to_string())
        };
        seen.lock().unwrap().push((result, message, epidata));
    }

    fn parse(response: *const FfiHttpResponse) -> (FfiErrorCode, Vec<(i64, String, Option<String>)>) {
        let seen: Seen = Mutex::new(Vec::new());
        let code = epidata_parse_response(response, Some(record), &seen as *const Seen as *mut c_void);
        (code, seen.into_inner().unwrap())
    }

    #[test]
    fn parse_success_envelope() {
        let body = cstr(r#"{"result":1,"message":"ok","epidata":[{"x":1}]}"#);
        let response = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let (code, seen) = parse(&response);
        assert_eq!(code, FfiErrorCode::Ok);
        assert_eq!(seen, vec![(1, "ok".to_string(), Some(r#"[{"x":1}]"#.to_string()))]);
    }

    #[test]
    fn parse_keeps_message_around_interior_nul() {
        let body = cstr(r#"{"result":-2,"message":"no\u0000 results"}"#);
        let response = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let (_, seen) = parse(&response);
        assert_eq!(seen, vec![(-2, "no results".to_string(), None)]);
    }

    #[test]
    fn parse_malformed_body() {
        let body = cstr("<html></html>");
        let response = FfiHttpResponse {
            status: 502,
            body: body.as_ptr(),
        };
        let (_, seen) = parse(&response);
        assert_eq!(seen, vec![(0, "unknown error".to_string(), None)]);
    }

    #[test]
    fn parse_null_response_is_transport_failure() {
        let (code, seen) = parse(std::ptr::null());
        assert_eq!(code, FfiErrorCode::Ok);
        assert_eq!(seen, vec![(0, "unknown error".to_string(), None)]);
    }

    #[test]
    fn parse_without_callback() {
        let code = epidata_parse_response(std::ptr::null(), None, std::ptr::null_mut());
        assert_eq!(code, FfiErrorCode::NullArg);
    }
}
