//! Core runtime types: stats, modifiers, card runtime state, configuration.
//!
//! Everything here is plain data plus pure functions. The stat projector
//! lives next to the stat types because the projection formula is the
//! invariant that ties base stats, modifiers and derived stats together.

pub mod stats;
pub mod modifier;
pub mod state;
pub mod config;

pub use stats::{BaseStats, StatKey, StatMap, StatProjector, ATTACK, COST, HEALTH, PROJECTED_STATS};
pub use modifier::{Duration, Modifier};
pub use state::{create_initial_runtime_state, CardRuntimeState};
pub use config::{EffectSelection, RuntimeConfig};
