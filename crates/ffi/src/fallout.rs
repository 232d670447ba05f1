/// FFI handle for fallout contamination fields.
///
/// The field is computed once by `blast_effects_fallout_new` and owned by an
/// opaque handle; callers query samples or borrow the raw channels, then free
/// the handle with `blast_effects_fallout_destroy`.
use blast_effects_core::{assess_fallout, EffectsConfig, FalloutField, FalloutSample, Scenario};
use std::ptr;

use crate::error::{BlastEffectsErrorCode, DefaultBlastEffectsError};
use crate::helpers::{clear_last_error, track_error, track_result};
use crate::scenario::{BlastConfig, BlastScenario};

/// Opaque fallout field handle.
pub struct BlastFalloutField {
    pub(crate) field: FalloutField,
}

/// C-compatible geolocated contamination sample.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlastFalloutSample {
    /// Longitude (degrees)
    pub longitude: f64,
    /// Latitude (degrees)
    pub latitude: f64,
    /// Contamination (kBq/m²)
    pub contamination: f64,
}

impl From<FalloutSample> for BlastFalloutSample {
    fn from(sample: FalloutSample) -> Self {
        Self {
            longitude: sample.longitude,
            latitude: sample.latitude,
            contamination: sample.contamination,
        }
    }
}

/// Which channel of the field to borrow.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastFalloutChannel {
    /// Longitude (degrees)
    Longitude = 0,
    /// Latitude (degrees)
    Latitude = 1,
    /// Contamination (kBq/m²)
    Contamination = 2,
}

/// Build a fallout field and return it via out-parameter.
///
/// Uses the scenario's yield, burst height, wind and location, and the
/// configured fallout grid (`fallout_resolution`, `fallout_radius_m`).
///
/// Returns
/// - `BlastEffectsErrorCode::Ok` (0) with a valid handle in `out_field`
/// - `BlastEffectsErrorCode::NullPointer` if `scenario` or `out_field` is null
/// - `BlastEffectsErrorCode::InvalidScenario` for invalid inputs or grid size
/// - `BlastEffectsErrorCode::NumericDegenerate` if the plume underflows the grid
///   or the yield overflows the deposited activity
///
/// # Safety
/// - `scenario` must point to a valid `BlastScenario`.
/// - `config` must be null or point to a valid `BlastConfig`.
/// - `out_field` must be a valid, non-null pointer; set to null on failure.
/// - The caller owns the handle and MUST call `blast_effects_fallout_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_fallout_new(
    scenario: *const BlastScenario,
    config: *const BlastConfig,
    out_field: *mut *mut BlastFalloutField,
) -> BlastEffectsErrorCode {
    if out_field.is_null() {
        return track_error(&DefaultBlastEffectsError::null_pointer("out_field"));
    }
    unsafe {
        *out_field = ptr::null_mut();
    }
    if scenario.is_null() {
        return track_error(&DefaultBlastEffectsError::null_pointer("scenario"));
    }

    // SAFETY: non-null and valid per the caller contract
    let scenario = Scenario::from(unsafe { *scenario });
    let config = if config.is_null() {
        EffectsConfig::default()
    } else {
        EffectsConfig::from(unsafe { *config })
    };

    match track_result(assess_fallout(&scenario, &config)) {
        Ok(field) => {
            unsafe {
                *out_field = Box::into_raw(Box::new(BlastFalloutField { field }));
            }
            BlastEffectsErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Samples per side of the field (0 if `field` is null).
///
/// # Safety
/// `field` must be null or a live handle from `blast_effects_fallout_new`.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_fallout_resolution(field: *const BlastFalloutField) -> u32 {
    if field.is_null() {
        return 0;
    }
    let field = unsafe { &(*field).field };
    u32::try_from(field.resolution()).unwrap_or(u32::MAX)
}

/// Read the sample at `row` (north index) and `col` (east index).
///
/// Returns
/// - `BlastEffectsErrorCode::Ok` (0) with `out_sample` filled
/// - `BlastEffectsErrorCode::NullPointer` if `field` or `out_sample` is null
/// - `BlastEffectsErrorCode::OutOfBounds` if the index lies outside the grid
///
/// # Safety
/// - `field` must be a live handle from `blast_effects_fallout_new`.
/// - `out_sample` must point to writable memory for one `BlastFalloutSample`.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_fallout_get(
    field: *const BlastFalloutField,
    row: u32,
    col: u32,
    out_sample: *mut BlastFalloutSample,
) -> BlastEffectsErrorCode {
    if field.is_null() {
        return track_error(&DefaultBlastEffectsError::null_pointer("field"));
    }
    if out_sample.is_null() {
        return track_error(&DefaultBlastEffectsError::null_pointer("out_sample"));
    }

    let field = unsafe { &(*field).field };
    match field.get(row as usize, col as usize) {
        Some(sample) => {
            unsafe {
                *out_sample = sample.into();
            }
            clear_last_error();
            BlastEffectsErrorCode::Ok
        }
        None => track_error(&DefaultBlastEffectsError::out_of_bounds(
            row,
            col,
            field.resolution(),
        )),
    }
}

/// Borrow one channel as a row-major array of `resolution * resolution` doubles.
///
/// Element `[row * resolution + col]` is the sample at north index `row`,
/// east index `col`. Returns null if `field` is null.
///
/// # Safety
/// - `field` must be null or a live handle from `blast_effects_fallout_new`.
/// - `out_len` must be null or point to writable memory; receives the element count.
/// - The returned pointer is valid until `blast_effects_fallout_destroy`. Do not free it.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_fallout_channel(
    field: *const BlastFalloutField,
    channel: BlastFalloutChannel,
    out_len: *mut usize,
) -> *const f64 {
    if field.is_null() {
        track_error(&DefaultBlastEffectsError::null_pointer("field"));
        return ptr::null();
    }

    let field = unsafe { &(*field).field };
    let values = match channel {
        BlastFalloutChannel::Longitude => field.longitude(),
        BlastFalloutChannel::Latitude => field.latitude(),
        BlastFalloutChannel::Contamination => field.contamination(),
    };

    if !out_len.is_null() {
        unsafe {
            *out_len = values.len();
        }
    }
    values.as_ptr()
}

/// Total of all contamination samples (kBq/m² summed over cells).
///
/// # Safety
/// `field` must be null or a live handle from `blast_effects_fallout_new`.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_fallout_total(field: *const BlastFalloutField) -> f64 {
    if field.is_null() {
        return 0.0;
    }
    unsafe { (*field).field.total_contamination() }
}

/// Destroy a fallout field handle. Null is a no-op.
///
/// # Safety
/// - `field` MUST have been created by `blast_effects_fallout_new` and not freed already.
/// - The handle and any channel pointers borrowed from it are invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn blast_effects_fallout_destroy(field: *mut BlastFalloutField) {
    if field.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `blast_effects_fallout_new`
    unsafe {
        drop(Box::from_raw(field));
    }
}
