//! JSON request boundary over FFI.
//!
//! Routes a request path and body through the core request handler and hands
//! back an owned JSON string: the success body on `Ok`, the
//! `{"error": kind, "message": text}` body otherwise.

use blast_effects_core::request::{respond, ErrorBody};
use blast_effects_core::Endpoint;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use crate::error::{BlastEffectsErrorCode, DefaultBlastEffectsError};
use crate::helpers::{borrow_str, clear_last_error, track_error};

fn into_c_string(json: String) -> *mut c_char {
    // serde_json escapes control characters, so the body has no interior NUL
    CString::new(json).map_or(ptr::null_mut(), CString::into_raw)
}

/// Handle a JSON request for `/calculate-blast` or `/calculate-fallout`.
///
/// Parameters
/// - `path`: Request path, null-terminated UTF-8.
/// - `body`: Request body, null-terminated UTF-8 JSON.
/// - `out_json`: Receives an owned response body, or null if none was produced.
///
/// Returns
/// - `BlastEffectsErrorCode::Ok` (0) with the success body in `out_json`
/// - `BlastEffectsErrorCode::NullPointer` / `InvalidUtf8` for bad arguments (no body)
/// - `BlastEffectsErrorCode::UnknownEndpoint` for an unrouted path (no body)
/// - `MalformedRequest`, `InvalidScenario` or `NumericDegenerate` with the
///   error body in `out_json`
///
/// # Safety
/// - `path` and `body` must be null or valid null-terminated strings.
/// - `out_json` must be a valid, non-null pointer.
/// - A non-null `*out_json` MUST be released with `blast_effects_string_free`.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_handle_json(
    path: *const c_char,
    body: *const c_char,
    out_json: *mut *mut c_char,
) -> BlastEffectsErrorCode {
    if out_json.is_null() {
        return track_error(&DefaultBlastEffectsError::null_pointer("out_json"));
    }
    unsafe {
        *out_json = ptr::null_mut();
    }

    let path = match unsafe { borrow_str(path, "path") } {
        Ok(path) => path,
        Err(code) => return code,
    };
    let body = match unsafe { borrow_str(body, "body") } {
        Ok(body) => body,
        Err(code) => return code,
    };
    let Some(endpoint) = Endpoint::from_path(path) else {
        return track_error(&DefaultBlastEffectsError::unknown_endpoint(path));
    };

    let (json, code) = match respond(endpoint, body) {
        Ok(json) => {
            clear_last_error();
            (json, BlastEffectsErrorCode::Ok)
        }
        Err(err) => (
            ErrorBody::from(&err).to_json(),
            track_error(&DefaultBlastEffectsError::from(&err)),
        ),
    };

    unsafe {
        *out_json = into_c_string(json);
    }
    code
}

/// Free a string returned by `blast_effects_handle_json`. Null is a no-op.
///
/// # Safety
/// `json` MUST come from `blast_effects_handle_json` and not be freed already.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_string_free(json: *mut c_char) {
    if json.is_null() {
        return;
    }

    // SAFETY: created by `CString::into_raw`
    unsafe {
        drop(CString::from_raw(json));
    }
}
