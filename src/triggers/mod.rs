//! Trigger system: events, conditions and trigger matching.
//!
//! Effects react to game events through triggers. A trigger names the
//! event kind it listens for and an optional list of conditions over the
//! event's payload.
//!
//! ## Key Components
//!
//! - [`TriggerEvent`]: The closed set of event kinds
//! - [`GameEvent`]: An event with its free-form payload
//! - [`PayloadPath`]: A dotted path compiled once into segments
//! - [`Condition`]: One payload comparison
//! - [`ConditionEvaluator`]: Total, never-failing condition evaluation
//! - [`TriggerMatcher`]: Which triggers of a spec fire for an event
//!
//! ## Example Usage
//!
//! ```
//! use card_effect_engine::effects::{EffectAction, EffectSpec, EffectTrigger};
//! use card_effect_engine::triggers::{Condition, GameEvent, TriggerEvent, TriggerMatcher};
//!
//! let spec = EffectSpec::new("damage-threshold").with_trigger(
//!     EffectTrigger::on(TriggerEvent::DamageTaken)
//!         .when(Condition::gte("damage", 3))
//!         .with_action(EffectAction::add_badge("enraged")),
//! );
//!
//! assert!(TriggerMatcher::fired(&spec, &GameEvent::damage(1, 2)).is_empty());
//! assert_eq!(TriggerMatcher::fired(&spec, &GameEvent::damage(2, 3)).len(), 1);
//! ```

mod condition;
mod event;
mod matcher;
mod path;

pub use condition::{Condition, ConditionEvaluator, ConditionOp, ConditionValue};
pub use event::{GameEvent, Payload, TriggerEvent};
pub use matcher::{FiredTriggers, TriggerMatcher};
pub use path::PayloadPath;
