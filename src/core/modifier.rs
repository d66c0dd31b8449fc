//! Stat modifiers.

use serde::{Deserialize, Serialize};

use super::stats::StatKey;

/// How long a modifier stays active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duration {
    /// Stripped on the next `TURN_END` event.
    Turn,
    /// Never expires.
    Permanent,
}

/// A numeric adjustment to one stat, attributable to a source effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    /// `effectId:sequence:stat:value`. Unique only within one dispatch call.
    pub id: String,
    pub source_effect_id: String,
    pub stat: StatKey,
    pub value: i64,
    pub duration: Duration,
}

impl Modifier {
    /// Create a modifier, deriving its id from the dispatch sequence.
    pub fn new(
        source_effect_id: impl Into<String>,
        sequence: u32,
        stat: StatKey,
        value: i64,
        duration: Duration,
    ) -> Self {
        let source_effect_id = source_effect_id.into();
        Self {
            id: format!("{source_effect_id}:{sequence}:{stat}:{value}"),
            source_effect_id,
            stat,
            value,
            duration,
        }
    }

    /// Check if this modifier expires at turn end.
    #[must_use]
    pub fn expires_at_turn_end(&self) -> bool {
        self.duration == Duration::Turn
    }
}
