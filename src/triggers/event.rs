//! Game event types.
//!
//! Events are discrete game occurrences delivered to a card's runtime.
//! The event kind is a closed set; everything else an event carries lives
//! in a free-form JSON payload that only conditions look at.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of game occurrence a trigger listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerEvent {
    TurnStart,
    /// Also expires every turn-scoped modifier before triggers run.
    TurnEnd,
    CardPlayed,
    DamageTaken,
    AuraApplied,
    AuraRemoved,
}

impl TriggerEvent {
    /// All event kinds.
    pub const ALL: [TriggerEvent; 6] = [
        TriggerEvent::TurnStart,
        TriggerEvent::TurnEnd,
        TriggerEvent::CardPlayed,
        TriggerEvent::DamageTaken,
        TriggerEvent::AuraApplied,
        TriggerEvent::AuraRemoved,
    ];

    /// Wire name of this event kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TriggerEvent::TurnStart => "TURN_START",
            TriggerEvent::TurnEnd => "TURN_END",
            TriggerEvent::CardPlayed => "CARD_PLAYED",
            TriggerEvent::DamageTaken => "DAMAGE_TAKEN",
            TriggerEvent::AuraApplied => "AURA_APPLIED",
            TriggerEvent::AuraRemoved => "AURA_REMOVED",
        }
    }
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form event data, consumed only by condition evaluation.
pub type Payload = Map<String, Value>;

/// A game event with contextual data.
///
/// Serializes as `{ "event": ..., "at": ..., "payload": { ... } }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// The kind of event.
    #[serde(rename = "event")]
    pub kind: TriggerEvent,

    /// When the event happened (caller-defined clock).
    #[serde(rename = "at", default)]
    pub timestamp: i64,

    /// Event data.
    #[serde(default)]
    pub payload: Payload,
}

impl GameEvent {
    /// Create a new event with an empty payload.
    pub fn new(kind: TriggerEvent, timestamp: i64) -> Self {
        Self {
            kind,
            timestamp,
            payload: Payload::new(),
        }
    }

    /// Add a payload entry (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Replace the whole payload (builder pattern).
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }
}

/// Builders for common event patterns.
impl GameEvent {
    /// Create a turn start event.
    pub fn turn_start(timestamp: i64) -> Self {
        Self::new(TriggerEvent::TurnStart, timestamp)
    }

    /// Create a turn end event.
    pub fn turn_end(timestamp: i64) -> Self {
        Self::new(TriggerEvent::TurnEnd, timestamp)
    }

    /// Create a damage event.
    ///
    /// payload.damage = amount
    pub fn damage(timestamp: i64, amount: i64) -> Self {
        Self::new(TriggerEvent::DamageTaken, timestamp).with("damage", amount)
    }
}
