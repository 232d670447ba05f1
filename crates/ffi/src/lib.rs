//! C-compatible API for the point-explosion effects library.
//!
//! All entry points return a [`BlastEffectsErrorCode`] (0 = success) and
//! record a message retrievable with [`blast_effects_get_last_error`] on the
//! calling thread. Results are written through out-parameters.
//!
//! - [`blast_effects_evaluate`]: blast, thermal and radiation scalars
//! - [`blast_effects_fallout_new`]: opaque fallout field handle with sample and channel queries
//! - [`blast_effects_handle_json`]: the JSON request boundary
//!
//! The C header `BlastEffectsFFI.h` is generated by `build.rs` with cbindgen.

mod error;
mod evaluate;
mod fallout;
mod helpers;
mod json;
mod scenario;

pub use error::{blast_effects_get_last_error, blast_effects_get_last_error_code, BlastEffectsErrorCode};
pub use evaluate::{blast_effects_evaluate, BlastEffects};
pub use fallout::{
    blast_effects_fallout_channel, blast_effects_fallout_destroy, blast_effects_fallout_get,
    blast_effects_fallout_new, blast_effects_fallout_resolution, blast_effects_fallout_total,
    BlastFalloutChannel, BlastFalloutField, BlastFalloutSample,
};
pub use json::{blast_effects_handle_json, blast_effects_string_free};
pub use scenario::{
    blast_effects_default_config, blast_effects_default_scenario, BlastConfig, BlastMaterial,
    BlastScenario,
};
