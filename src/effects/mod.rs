//! Effect system: declarative specs, action application and validation.
//!
//! - `EffectSpec` / `EffectTrigger` / `EffectAction`: the authored data
//! - `ActionApplier`: executes one action against runtime state
//! - `validate_effect_spec`: structural checks before a spec is accepted
//!
//! ## Design Philosophy
//!
//! Actions are a closed set matched exhaustively. Anything the engine does
//! not recognize is carried as `EffectAction::Unknown` and skipped, so one
//! forward-incompatible action never aborts a whole event.

mod effect;
mod resolver;
mod validate;

pub use effect::{EffectAction, EffectSpec, EffectTrigger};
pub use resolver::ActionApplier;
pub use validate::{validate_effect_spec, ValidationReport};
