//! Effect definitions.
//!
//! An [`EffectSpec`] is a named, declarative bundle of triggers. Each
//! [`EffectTrigger`] lists the event kind it listens for, optional payload
//! conditions, and the ordered actions to run when it fires.

use serde::{Deserialize, Serialize};

use crate::core::{Duration, StatKey};
use crate::triggers::{Condition, TriggerEvent};

/// An atomic change to a card's runtime state.
///
/// Serialized with a `"type"` tag (`ADD_MODIFIER`, `SET_STAT`, ...).
/// Tags this version does not know deserialize into [`EffectAction::Unknown`],
/// which the applier skips.
///
/// Stat values are whole numbers: a fractional `value` such as `1.5` is
/// rejected when the spec is deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectAction {
    // === Stats ===

    /// Append a modifier. Derived stats pick it up in the projection pass.
    AddModifier {
        stat: StatKey,
        value: i64,
        duration: Duration,
    },

    /// Write a derived stat directly.
    ///
    /// Projected stats (`attack`, `health`, `cost`) are recomputed at the
    /// end of every dispatch, so this only sticks for other keys.
    SetStat {
        stat: StatKey,
        value: i64,
    },

    // === Badges ===

    /// Add a badge unless already present.
    AddBadge {
        badge: String,
    },

    /// Remove a badge if present.
    RemoveBadge {
        badge: String,
    },

    /// Unrecognized action. Leaves state unchanged.
    #[serde(other)]
    Unknown,
}

impl EffectAction {
    /// Create an add modifier action.
    pub fn add_modifier(stat: impl Into<StatKey>, value: i64, duration: Duration) -> Self {
        Self::AddModifier {
            stat: stat.into(),
            value,
            duration,
        }
    }

    /// Create a set stat action.
    pub fn set_stat(stat: impl Into<StatKey>, value: i64) -> Self {
        Self::SetStat {
            stat: stat.into(),
            value,
        }
    }

    /// Create an add badge action.
    pub fn add_badge(badge: impl Into<String>) -> Self {
        Self::AddBadge {
            badge: badge.into(),
        }
    }

    /// Create a remove badge action.
    pub fn remove_badge(badge: impl Into<String>) -> Self {
        Self::RemoveBadge {
            badge: badge.into(),
        }
    }

    /// Wire tag of this action.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddModifier { .. } => "ADD_MODIFIER",
            Self::SetStat { .. } => "SET_STAT",
            Self::AddBadge { .. } => "ADD_BADGE",
            Self::RemoveBadge { .. } => "REMOVE_BADGE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// One event subscription of an effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectTrigger {
    /// Event kind this trigger listens for.
    pub on: TriggerEvent,

    /// Conditions that must all hold. Empty means always.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub when: Vec<Condition>,

    /// Actions to run, in order, when the trigger fires.
    ///
    /// A missing `do` reads as empty so the validator can report it.
    #[serde(rename = "do", default)]
    pub actions: Vec<EffectAction>,
}

impl EffectTrigger {
    /// Create a trigger with no conditions and no actions.
    pub fn on(event: TriggerEvent) -> Self {
        Self {
            on: event,
            when: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a condition (builder pattern).
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.when.push(condition);
        self
    }

    /// Add an action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: EffectAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// A named bundle of triggers describing how a card reacts to events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSpec {
    /// Unique key. Also the dispatch ordering key.
    pub effect_id: String,

    #[serde(default)]
    pub triggers: Vec<EffectTrigger>,
}

impl EffectSpec {
    /// Create a spec with no triggers.
    pub fn new(effect_id: impl Into<String>) -> Self {
        Self {
            effect_id: effect_id.into(),
            triggers: Vec::new(),
        }
    }

    /// Add a trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: EffectTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Check if any trigger listens for `event`.
    #[must_use]
    pub fn listens_to(&self, event: TriggerEvent) -> bool {
        self.triggers.iter().any(|t| t.on == event)
    }
}
