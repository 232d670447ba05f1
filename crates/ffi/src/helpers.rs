use crate::error::{
    with_last_error_mut, BlastEffectsError, BlastEffectsErrorCode, DefaultBlastEffectsError,
};
use blast_effects_core::EffectsResult;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl BlastEffectsError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl BlastEffectsError) -> BlastEffectsErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the outcome of a core call: clear on success, track on failure.
pub(crate) fn track_result<T>(result: EffectsResult<T>) -> Result<T, BlastEffectsErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(err) => Err(track_error(&DefaultBlastEffectsError::from(&err))),
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = BlastEffectsErrorCode::Ok;
    });
}

/// Borrow a caller-owned C string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a null-terminated string valid for the call.
pub(crate) unsafe fn borrow_str<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, BlastEffectsErrorCode> {
    if ptr.is_null() {
        return Err(track_error(&DefaultBlastEffectsError::null_pointer(param_name)));
    }
    // SAFETY: non-null and null-terminated per the caller contract
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str()
        .map_err(|_| track_error(&DefaultBlastEffectsError::invalid_utf8(param_name)))
}
