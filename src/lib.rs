//! # card-effect-engine
//!
//! A deterministic runtime effect engine for trading-card battle stats.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `apply_event(state, effects, event)` reads its
//!    inputs and returns a new state. No I/O, no shared mutable state.
//!
//! 2. **Deterministic Ordering**: Effects reacting to the same event apply
//!    in ascending `effect_id` order; that order alone decides how
//!    overlapping modifiers accumulate.
//!
//! 3. **Derived Stats Never Stale**: `attack`, `health` and `cost` are
//!    recomputed from base stats plus active modifiers at the end of every
//!    call, clamped at 0.
//!
//! ## Architecture
//!
//! - **Declarative Effects**: Specs are data (trigger, conditions, actions),
//!   validated before they are accepted and trusted afterwards.
//!
//! - **Persistent Data Structures**: Runtime state uses `im-rs`, so each
//!   transition clones in O(1) and never aliases the caller's snapshot.
//!
//! - **State Values**: All stat values are `i64`.
//!
//! ## Modules
//!
//! - `core`: Stats, modifiers, runtime state, stat projection, configuration
//! - `triggers`: Events, payload paths, conditions, trigger matching
//! - `effects`: Effect specs, action application, validation
//! - `engine`: The dispatch engine
//! - `registry`: Versioned effect registry
//! - `store`: Runtime record storage with optimistic versioning
//! - `service`: Cards, effects and store wired to the engine

pub mod core;
pub mod triggers;
pub mod effects;
pub mod engine;
pub mod registry;
pub mod store;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    create_initial_runtime_state, BaseStats, CardRuntimeState, Duration, EffectSelection,
    Modifier, RuntimeConfig, StatKey, StatMap, StatProjector,
};

pub use crate::triggers::{
    Condition, ConditionEvaluator, ConditionOp, ConditionValue, GameEvent, Payload,
    PayloadPath, TriggerEvent, TriggerMatcher,
};

pub use crate::effects::{
    validate_effect_spec, ActionApplier, EffectAction, EffectSpec, EffectTrigger,
    ValidationReport,
};

pub use crate::engine::{apply_event, SimulationResult};

pub use crate::registry::{EffectRegistry, RegistryError, Versioned};

pub use crate::store::{
    InMemoryRuntimeStore, RuntimeProjection, RuntimeStore, StoreError, StoredRuntime,
};

pub use crate::service::{CardProfile, RuntimeService, ServiceError};
