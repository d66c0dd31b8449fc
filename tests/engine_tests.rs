//! Dispatch engine integration tests.
//!
//! These tests drive `apply_event` end to end with specs loaded from the
//! JSON wire format, the way authored effects arrive in practice.

use card_effect_engine::core::{BaseStats, CardRuntimeState, Duration, StatKey};
use card_effect_engine::effects::{EffectAction, EffectSpec, EffectTrigger};
use card_effect_engine::engine::apply_event;
use card_effect_engine::triggers::{Condition, GameEvent, TriggerEvent};
use serde_json::json;

fn spec_from_json(value: serde_json::Value) -> EffectSpec {
    serde_json::from_value(value).expect("spec should deserialize")
}

/// Turn-scoped modifier applies on TURN_START and expires on TURN_END.
#[test]
fn test_turn_modifier_lifecycle() {
    let effects = vec![spec_from_json(json!({
        "effectId": "class-monitor-aura",
        "triggers": [{
            "on": "TURN_START",
            "do": [{ "type": "ADD_MODIFIER", "stat": "attack", "value": 2, "duration": "turn" }]
        }]
    }))];

    let initial = CardRuntimeState::initial("unit-1", BaseStats::new(3, 4, 2));

    let at_start = apply_event(&initial, &effects, &GameEvent::turn_start(1));
    assert_eq!(at_start.next.stat("attack"), Some(5));
    assert_eq!(at_start.applied_effects, vec!["class-monitor-aura"]);

    let at_end = apply_event(&at_start.next, &effects, &GameEvent::turn_end(2));
    assert_eq!(at_end.next.stat("attack"), Some(3));
    assert!(at_end.next.modifiers.is_empty());
}

/// Conditions gate triggers on the event payload.
#[test]
fn test_damage_threshold_badge() {
    let effects = vec![spec_from_json(json!({
        "effectId": "damage-threshold",
        "triggers": [{
            "on": "DAMAGE_TAKEN",
            "when": [{ "path": "damage", "op": "gte", "value": 3 }],
            "do": [{ "type": "ADD_BADGE", "badge": "enraged" }]
        }]
    }))];

    let initial = CardRuntimeState::initial("unit-2", BaseStats::new(2, 2, 1));

    let low = apply_event(&initial, &effects, &GameEvent::damage(1, 2));
    assert!(low.next.badges.is_empty());

    let high = apply_event(&low.next, &effects, &GameEvent::damage(2, 3));
    assert!(high.next.has_badge("enraged"));
}

/// Permanent modifiers survive TURN_END.
#[test]
fn test_permanent_modifier_survives_turn_end() {
    let effects = vec![EffectSpec::new("blessing")
        .with_trigger(
            EffectTrigger::on(TriggerEvent::CardPlayed)
                .with_action(EffectAction::add_modifier("health", 3, Duration::Permanent)),
        )
        .with_trigger(
            EffectTrigger::on(TriggerEvent::TurnStart)
                .with_action(EffectAction::add_modifier("health", 1, Duration::Turn)),
        )];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(1, 1, 1));
    let played = apply_event(&initial, &effects, &GameEvent::new(TriggerEvent::CardPlayed, 1));
    let started = apply_event(&played.next, &effects, &GameEvent::turn_start(2));
    assert_eq!(started.next.stat("health"), Some(5));

    let ended = apply_event(&started.next, &effects, &GameEvent::turn_end(3));
    assert_eq!(ended.next.stat("health"), Some(4));
    assert_eq!(ended.next.modifiers.len(), 1);
    assert_eq!(ended.next.modifiers[0].duration, Duration::Permanent);
}

/// TURN_END expiry happens even when no spec listens for TURN_END.
#[test]
fn test_turn_end_expiry_without_listener() {
    let effects = vec![EffectSpec::new("aura").with_trigger(
        EffectTrigger::on(TriggerEvent::TurnStart)
            .with_action(EffectAction::add_modifier("cost", -1, Duration::Turn)),
    )];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(1, 1, 3));
    let started = apply_event(&initial, &effects, &GameEvent::turn_start(1));
    assert_eq!(started.next.stat("cost"), Some(2));

    let ended = apply_event(&started.next, &[], &GameEvent::turn_end(2));
    assert_eq!(ended.next.stat("cost"), Some(3));
    assert!(ended.applied_effects.is_empty());
}

/// A TURN_END trigger observes the already-expired modifier set.
#[test]
fn test_turn_end_trigger_sees_expired_set() {
    let effects = vec![
        EffectSpec::new("aura").with_trigger(
            EffectTrigger::on(TriggerEvent::TurnStart)
                .with_action(EffectAction::add_modifier("attack", 5, Duration::Turn)),
        ),
        EffectSpec::new("fatigue").with_trigger(
            EffectTrigger::on(TriggerEvent::TurnEnd)
                .with_action(EffectAction::add_modifier("attack", -1, Duration::Permanent)),
        ),
    ];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(3, 3, 3));
    let started = apply_event(&initial, &effects, &GameEvent::turn_start(1));
    assert_eq!(started.next.stat("attack"), Some(8));

    let ended = apply_event(&started.next, &effects, &GameEvent::turn_end(2));
    let ids: Vec<_> = ended.next.modifiers.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["fatigue:1:attack:-1"]);
    assert_eq!(ended.next.stat("attack"), Some(2));
}

/// Effects apply in effect id order regardless of input order.
#[test]
fn test_deterministic_ordering() {
    let make = |id: &str| {
        EffectSpec::new(id).with_trigger(
            EffectTrigger::on(TriggerEvent::AuraApplied)
                .with_action(EffectAction::add_modifier("attack", 1, Duration::Permanent)),
        )
    };

    let initial = CardRuntimeState::initial("unit", BaseStats::new(0, 0, 0));
    let event = GameEvent::new(TriggerEvent::AuraApplied, 1);

    let forward = apply_event(&initial, &[make("a-effect"), make("b-effect")], &event);
    let reverse = apply_event(&initial, &[make("b-effect"), make("a-effect")], &event);

    assert_eq!(forward.applied_effects, vec!["a-effect", "b-effect"]);
    assert_eq!(forward, reverse);
}

/// Badge add/remove sequencing within a single call.
#[test]
fn test_badge_add_then_remove() {
    let effects = vec![
        EffectSpec::new("a-shield").with_trigger(
            EffectTrigger::on(TriggerEvent::AuraApplied)
                .with_action(EffectAction::add_badge("shielded")),
        ),
        EffectSpec::new("b-dispel").with_trigger(
            EffectTrigger::on(TriggerEvent::AuraApplied)
                .when(Condition::eq("aura", "dispel"))
                .with_action(EffectAction::remove_badge("shielded")),
        ),
    ];

    let initial = CardRuntimeState::initial("unit", BaseStats::default());

    let holy = GameEvent::new(TriggerEvent::AuraApplied, 1).with("aura", "holy");
    let plain = apply_event(&initial, &effects, &holy);
    assert!(plain.next.has_badge("shielded"));

    let dispel = GameEvent::new(TriggerEvent::AuraApplied, 1).with("aura", "dispel");
    let dispelled = apply_event(&initial, &effects, &dispel);
    assert!(!dispelled.next.has_badge("shielded"));
    assert_eq!(dispelled.applied_effects, vec!["a-shield", "b-dispel"]);
}

/// Custom stats set via SET_STAT persist across calls; projected ones do not.
#[test]
fn test_set_stat_custom_key_persists() {
    let effects = vec![EffectSpec::new("armor-up").with_trigger(
        EffectTrigger::on(TriggerEvent::CardPlayed)
            .with_action(EffectAction::set_stat("armor", 4))
            .with_action(EffectAction::set_stat("health", 100)),
    )];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(1, 2, 3));
    let played = apply_event(&initial, &effects, &GameEvent::new(TriggerEvent::CardPlayed, 1));
    let later = apply_event(&played.next, &effects, &GameEvent::turn_end(2));

    assert_eq!(later.next.stat("armor"), Some(4));
    assert_eq!(later.next.stat("health"), Some(2));
    assert_eq!(later.next.base_stats.get(&StatKey::new("armor")), None);
}

/// A custom stat in the derived map never freezes the projected ones.
#[test]
fn test_projection_after_custom_stat() {
    let effects = vec![
        EffectSpec::new("armor-up").with_trigger(
            EffectTrigger::on(TriggerEvent::CardPlayed)
                .with_action(EffectAction::set_stat("armor", 1))
                .with_action(EffectAction::set_stat("attack", -3)),
        ),
        EffectSpec::new("aura").with_trigger(
            EffectTrigger::on(TriggerEvent::TurnStart)
                .with_action(EffectAction::add_modifier("attack", 2, Duration::Turn)),
        ),
    ];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(3, 4, 2));
    let played = apply_event(&initial, &effects, &GameEvent::new(TriggerEvent::CardPlayed, 1));
    assert_eq!(played.next.stat("attack"), Some(3));
    assert_eq!(played.next.stat("armor"), Some(1));

    let started = apply_event(&played.next, &effects, &GameEvent::turn_start(2));
    assert_eq!(started.next.modifiers.len(), 1);
    assert_eq!(started.next.stat("attack"), Some(5));

    let ended = apply_event(&started.next, &effects, &GameEvent::turn_end(3));
    assert_eq!(ended.next.stat("attack"), Some(3));
    assert_eq!(ended.next.stat("armor"), Some(1));
}

/// Nested payload paths and multiple AND-ed conditions.
#[test]
fn test_nested_conditions() {
    let effects = vec![spec_from_json(json!({
        "effectId": "spell-ward",
        "triggers": [{
            "on": "DAMAGE_TAKEN",
            "when": [
                { "path": "source.kind", "op": "eq", "value": "spell" },
                { "path": "source.power", "op": "gt", "value": 2 }
            ],
            "do": [{
                "type": "ADD_MODIFIER",
                "stat": "health",
                "value": 1,
                "duration": "permanent"
            }]
        }]
    }))];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(1, 1, 1));
    let weak = GameEvent::damage(1, 1).with("source", json!({ "kind": "spell", "power": 2 }));
    let strong = GameEvent::damage(2, 1).with("source", json!({ "kind": "spell", "power": 3 }));
    let melee = GameEvent::damage(3, 1).with("source", json!({ "kind": "melee", "power": 9 }));

    assert!(apply_event(&initial, &effects, &weak).applied_effects.is_empty());
    assert!(apply_event(&initial, &effects, &melee).applied_effects.is_empty());
    assert_eq!(apply_event(&initial, &effects, &strong).next.stat("health"), Some(2));
}

/// Unknown action tags in authored JSON are skipped, not fatal.
#[test]
fn test_forward_incompatible_action() {
    let effects = vec![spec_from_json(json!({
        "effectId": "future",
        "triggers": [{
            "on": "TURN_START",
            "do": [
                { "type": "SUMMON_TOKEN", "token": "imp" },
                { "type": "ADD_BADGE", "badge": "ready" }
            ]
        }]
    }))];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(1, 1, 1));
    let result = apply_event(&initial, &effects, &GameEvent::turn_start(1));
    assert!(result.next.has_badge("ready"));
    assert_eq!(result.applied_effects, vec!["future"]);
}

/// Event kind must match exactly; the payload is irrelevant otherwise.
#[test]
fn test_non_matching_event_kind() {
    let effects = vec![EffectSpec::new("removed").with_trigger(
        EffectTrigger::on(TriggerEvent::AuraRemoved).with_action(EffectAction::add_badge("bare")),
    )];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(2, 2, 2));
    for kind in TriggerEvent::ALL {
        let result = apply_event(&initial, &effects, &GameEvent::new(kind, 1));
        assert_eq!(result.next.has_badge("bare"), kind == TriggerEvent::AuraRemoved, "kind {kind}");
    }
}

/// Initial state followed by a non-matching event leaves derived == base.
#[test]
fn test_round_trip_initial_state() {
    let initial = CardRuntimeState::initial("unit", BaseStats::new(7, 8, 9));
    let result = apply_event(&initial, &[], &GameEvent::new(TriggerEvent::CardPlayed, 1));
    assert_eq!(result.next.derived_stats, result.next.base_stats);
}

/// The caller's snapshot is never modified.
#[test]
fn test_input_state_untouched() {
    let effects = vec![EffectSpec::new("aura").with_trigger(
        EffectTrigger::on(TriggerEvent::TurnStart)
            .with_action(EffectAction::add_modifier("attack", 2, Duration::Turn))
            .with_action(EffectAction::add_badge("buffed")),
    )];

    let initial = CardRuntimeState::initial("unit", BaseStats::new(3, 4, 2));
    let snapshot = initial.clone();
    let _ = apply_event(&initial, &effects, &GameEvent::turn_start(1));
    assert_eq!(initial, snapshot);
}
