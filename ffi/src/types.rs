//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, tagged enums with explicit
//! discriminants. Conversion functions live here to keep `lib.rs` focused on
//! the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use epidata_core::{HttpRequest, ValidationError};

/// Opaque handle holding the API base URL. C callers receive a pointer to
/// this and pass it back into every FFI function.
pub struct FfiEpidataClient {
    pub(crate) base_url: String,
}

/// A GET request as a single URL with the encoded query string.
///
/// The C caller performs the GET and passes the outcome back through
/// `epidata_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
}

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request. The FFI layer
/// reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// Error codes returned by FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// The query violates its endpoint's parameter rules.
    Validation = 1,
    /// The query JSON is malformed or names no known endpoint.
    InvalidQuery = 2,
    Panic = 3,
    NullArg = 4,
}

/// Completion for `epidata_parse_response`: `(result, message, epidata_json,
/// user_data)`. `epidata_json` is null when the envelope carries no data.
/// Both strings are only valid for the duration of the call.
pub type EpidataCallback =
    extern "C" fn(result: i64, message: *const c_char, epidata_json: *const c_char, user_data: *mut c_void);

/// Outcome of `epidata_build_request`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `request`
/// points to the built request. On failure `request` is null and
/// `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiBuildResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub request: *mut FfiHttpRequest,
}

/// Copy `s` into a C string, dropping interior NULs so the rest of the text
/// survives.
pub(crate) fn c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

impl FfiBuildResult {
    pub(crate) fn ok(req: HttpRequest) -> *mut Self {
        let request = Box::new(FfiHttpRequest {
            url: c_string(&req.url()).into_raw(),
        });
        Box::into_raw(Box::new(FfiBuildResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            request: Box::into_raw(request),
        }))
    }

    pub(crate) fn validation(err: ValidationError) -> *mut Self {
        Self::error(FfiErrorCode::Validation, &err.to_string())
    }

    pub(crate) fn invalid_query(err: serde_json::Error) -> *mut Self {
        Self::error(FfiErrorCode::InvalidQuery, &format!("invalid query: {err}"))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }

    fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            error_code,
            error_message: c_string(msg).into_raw(),
            request: std::ptr::null_mut(),
        }))
    }
}
