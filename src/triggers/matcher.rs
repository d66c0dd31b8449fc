//! Trigger matching.
//!
//! For one effect spec and one incoming event, find the triggers that fire:
//! the trigger's `on` must equal the event kind and every one of its
//! conditions must hold against the event payload.

use smallvec::SmallVec;

use crate::effects::{EffectSpec, EffectTrigger};

use super::condition::ConditionEvaluator;
use super::event::GameEvent;

/// Triggers that fired for one effect, in declaration order.
///
/// Specs rarely declare more than a couple of triggers per event kind.
pub type FiredTriggers<'a> = SmallVec<[&'a EffectTrigger; 4]>;

/// Matches effect triggers against events.
pub struct TriggerMatcher;

impl TriggerMatcher {
    /// Check if a single trigger fires for an event.
    #[must_use]
    pub fn fires(trigger: &EffectTrigger, event: &GameEvent) -> bool {
        trigger.on == event.kind && ConditionEvaluator::evaluate_all(&event.payload, &trigger.when)
    }

    /// Find the triggers of `spec` that fire for `event`, in declaration order.
    #[must_use]
    pub fn fired<'a>(spec: &'a EffectSpec, event: &GameEvent) -> FiredTriggers<'a> {
        spec.triggers
            .iter()
            .filter(|trigger| Self::fires(trigger, event))
            .collect()
    }
}
