//! Card runtime state.
//!
//! ## CardRuntimeState
//!
//! The live battle stats of one card:
//! - Base stats (snapshotted when the record is first created)
//! - Active modifiers, in the order they were added
//! - Derived stats (what is actually in play)
//! - Badges (deduplicated string tags)
//!
//! Uses `im` persistent data structures so every transition can return a
//! new value in O(1) without aliasing the caller's snapshot.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::modifier::Modifier;
use super::stats::{BaseStats, StatKey, StatMap, StatProjector};

/// Live runtime state of a single card.
///
/// Created once via [`CardRuntimeState::initial`] and thereafter only
/// replaced by the results of [`crate::engine::apply_event`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRuntimeState {
    pub card_id: String,
    pub base_stats: StatMap,
    pub modifiers: Vector<Modifier>,
    pub derived_stats: StatMap,
    pub badges: Vector<String>,
}

impl CardRuntimeState {
    /// Create the starting runtime state for a card.
    ///
    /// `cost`, `attack` and `health` are snapshotted into both base and
    /// derived stats (missing values default to 0). No modifiers, no badges.
    pub fn initial(card_id: impl Into<String>, base_stats: BaseStats) -> Self {
        let base = base_stats.to_stat_map();
        Self {
            card_id: card_id.into(),
            derived_stats: base.clone(),
            base_stats: base,
            modifiers: Vector::new(),
            badges: Vector::new(),
        }
    }

    /// Get a derived stat value.
    #[must_use]
    pub fn stat(&self, key: &str) -> Option<i64> {
        self.derived_stats.get(&StatKey::new(key)).copied()
    }

    /// Get a base stat value.
    #[must_use]
    pub fn base_stat(&self, key: &str) -> Option<i64> {
        self.base_stats.get(&StatKey::new(key)).copied()
    }

    /// Check if the card carries a badge.
    #[must_use]
    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|b| b == badge)
    }

    /// Return a copy with every turn-scoped modifier removed.
    #[must_use]
    pub fn without_turn_modifiers(&self) -> Self {
        Self {
            modifiers: self
                .modifiers
                .iter()
                .filter(|m| !m.expires_at_turn_end())
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Return a copy with projected stats recomputed from base + modifiers.
    #[must_use]
    pub fn with_projected_stats(&self) -> Self {
        Self {
            derived_stats: StatProjector::recompute(
                &self.base_stats,
                &self.modifiers,
                &self.derived_stats,
            ),
            ..self.clone()
        }
    }
}

/// Create the starting runtime state for a card.
pub fn create_initial_runtime_state(
    card_id: impl Into<String>,
    base_stats: BaseStats,
) -> CardRuntimeState {
    CardRuntimeState::initial(card_id, base_stats)
}
