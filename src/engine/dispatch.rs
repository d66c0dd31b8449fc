//! Event dispatch - the runtime state transition function.
//!
//! `apply_event` is pure: it reads the caller's snapshot, the effect set
//! and the event, and returns a fresh state plus the trigger-fire log.
//!
//! ## Algorithm
//!
//! 1. Order effects by `effect_id` (ascending, stable).
//! 2. On `TURN_END`, strip every turn-scoped modifier before any trigger
//!    is evaluated.
//! 3. For each effect, for each fired trigger, apply its actions in order.
//!    Every action consumes one tick of the per-call sequence counter; each
//!    fired trigger appends the effect id to the log once.
//! 4. Recompute projected derived stats exactly once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::CardRuntimeState;
use crate::effects::{ActionApplier, EffectSpec};
use crate::triggers::{GameEvent, TriggerEvent, TriggerMatcher};

/// Outcome of applying one event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// The new authoritative state.
    pub next: CardRuntimeState,

    /// One entry per fired trigger, in application order. An effect whose
    /// two triggers both fired appears twice.
    pub applied_effects: Vec<String>,
}

/// Apply one event to a card's runtime state.
///
/// Total over its inputs: undefined payload paths, non-numeric comparisons
/// and unknown actions degrade to "no match" or "no change".
///
/// ## Example
///
/// ```
/// use card_effect_engine::core::{BaseStats, CardRuntimeState, Duration};
/// use card_effect_engine::effects::{EffectAction, EffectSpec, EffectTrigger};
/// use card_effect_engine::engine::apply_event;
/// use card_effect_engine::triggers::{GameEvent, TriggerEvent};
///
/// let aura = EffectSpec::new("class-monitor-aura").with_trigger(
///     EffectTrigger::on(TriggerEvent::TurnStart)
///         .with_action(EffectAction::add_modifier("attack", 2, Duration::Turn)),
/// );
/// let effects = [aura];
///
/// let state = CardRuntimeState::initial("unit-1", BaseStats::new(3, 4, 2));
/// let started = apply_event(&state, &effects, &GameEvent::turn_start(1));
/// assert_eq!(started.next.stat("attack"), Some(5));
///
/// let ended = apply_event(&started.next, &effects, &GameEvent::turn_end(2));
/// assert_eq!(ended.next.stat("attack"), Some(3));
/// ```
#[must_use]
pub fn apply_event(
    current: &CardRuntimeState,
    effects: &[EffectSpec],
    event: &GameEvent,
) -> SimulationResult {
    let mut ordered: Vec<&EffectSpec> = effects.iter().collect();
    ordered.sort_by(|a, b| a.effect_id.cmp(&b.effect_id));

    let mut next = current.clone();
    let mut applied_effects = Vec::new();
    let mut sequence: u32 = 0;

    if event.kind == TriggerEvent::TurnEnd {
        let before = next.modifiers.len();
        next = next.without_turn_modifiers();
        debug!(
            "{}: expired {} turn modifier(s)",
            next.card_id,
            before - next.modifiers.len()
        );
    }

    for effect in ordered {
        for trigger in TriggerMatcher::fired(effect, event) {
            for action in &trigger.actions {
                sequence += 1;
                next = ActionApplier::apply(next, &effect.effect_id, action, sequence);
            }
            debug!("{}: {} fired on {}", next.card_id, effect.effect_id, event.kind);
            applied_effects.push(effect.effect_id.clone());
        }
    }

    next = next.with_projected_stats();

    debug!(
        "{}: applied {} ({} trigger(s) fired, {} action(s))",
        next.card_id,
        event.kind,
        applied_effects.len(),
        sequence
    );

    SimulationResult {
        next,
        applied_effects,
    }
}
