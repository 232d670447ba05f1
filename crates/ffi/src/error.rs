use blast_effects_core::EffectsError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait BlastEffectsError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> BlastEffectsErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `BlastEffectsError` for FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultBlastEffectsError {
    code: BlastEffectsErrorCode,
    msg: String,
}

impl DefaultBlastEffectsError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_effects"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: BlastEffectsErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    pub fn invalid_utf8(param_name: &str) -> Self {
        Self {
            code: BlastEffectsErrorCode::InvalidUtf8,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }

    /// Create error for a request path that names no endpoint.
    pub fn unknown_endpoint(path: &str) -> Self {
        Self {
            code: BlastEffectsErrorCode::UnknownEndpoint,
            msg: format!("Unknown endpoint '{path}'"),
        }
    }

    /// Create error for a grid index outside the field.
    pub fn out_of_bounds(row: u32, col: u32, resolution: usize) -> Self {
        Self {
            code: BlastEffectsErrorCode::OutOfBounds,
            msg: format!("Sample ({row}, {col}) outside {resolution}x{resolution} grid"),
        }
    }
}

impl From<&EffectsError> for DefaultBlastEffectsError {
    fn from(error: &EffectsError) -> Self {
        let code = match error {
            EffectsError::InvalidScenario { .. } => BlastEffectsErrorCode::InvalidScenario,
            EffectsError::NumericDegenerate { .. } => BlastEffectsErrorCode::NumericDegenerate,
            EffectsError::MalformedRequest(_) => BlastEffectsErrorCode::MalformedRequest,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl BlastEffectsError for DefaultBlastEffectsError {
    fn code(&self) -> BlastEffectsErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by blast effects functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastEffectsErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A scenario field is missing, non-numeric, or outside its physical domain.
    InvalidScenario = 2,

    /// An intermediate quantity degenerated (zero slant range, empty fallout field).
    NumericDegenerate = 3,

    /// A JSON request body could not be parsed.
    MalformedRequest = 4,

    /// A C string argument is not valid UTF-8.
    InvalidUtf8 = 5,

    /// A request path names no endpoint.
    UnknownEndpoint = 6,

    /// A grid index lies outside the fallout field.
    OutOfBounds = 7,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, BlastEffectsErrorCode)> =
        const { RefCell::new((None, BlastEffectsErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, BlastEffectsErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, BlastEffectsErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// BlastEffects effects;
/// BlastEffectsErrorCode err = blast_effects_evaluate(&scenario, NULL, &effects);
/// if (err != Ok) {
///     fprintf(stderr, "evaluation failed: %s\n", blast_effects_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn blast_effects_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn blast_effects_get_last_error_code() -> BlastEffectsErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
