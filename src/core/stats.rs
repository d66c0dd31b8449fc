//! Stat keys, stat maps and the stat projector.
//!
//! Cards carry named numeric stats. Three of them (`attack`, `health`,
//! `cost`) are *projected*: their derived value is always recomputed from
//! the base value plus every active modifier. Any other key is carried
//! through untouched and can only be changed by a direct `SET_STAT`.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::modifier::Modifier;

/// Key for accessing a card stat.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatKey(pub String);

impl StatKey {
    /// Create a new stat key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The `attack` stat.
    pub fn attack() -> Self {
        Self::new(ATTACK)
    }

    /// The `health` stat.
    pub fn health() -> Self {
        Self::new(HEALTH)
    }

    /// The `cost` stat.
    pub fn cost() -> Self {
        Self::new(COST)
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the projector owns this stat's derived value.
    #[must_use]
    pub fn is_projected(&self) -> bool {
        PROJECTED_STATS.contains(&self.0.as_str())
    }
}

impl From<&str> for StatKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StatKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const ATTACK: &str = "attack";
pub const HEALTH: &str = "health";
pub const COST: &str = "cost";

/// Stats recomputed from base + modifiers on every dispatch.
pub const PROJECTED_STATS: [&str; 3] = [ATTACK, HEALTH, COST];

/// Persistent map of stat values.
///
/// Ordered so that serialized snapshots are stable.
pub type StatMap = OrdMap<StatKey, i64>;

/// Base stats supplied when a card's runtime record is first created.
///
/// Missing entries default to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub cost: Option<i64>,
    pub attack: Option<i64>,
    pub health: Option<i64>,
}

impl BaseStats {
    /// Create base stats with all three values set.
    pub fn new(attack: i64, health: i64, cost: i64) -> Self {
        Self {
            cost: Some(cost),
            attack: Some(attack),
            health: Some(health),
        }
    }

    /// Snapshot into a stat map, defaulting missing values to 0.
    #[must_use]
    pub fn to_stat_map(&self) -> StatMap {
        let mut stats = StatMap::new();
        stats.insert(StatKey::cost(), self.cost.unwrap_or(0));
        stats.insert(StatKey::attack(), self.attack.unwrap_or(0));
        stats.insert(StatKey::health(), self.health.unwrap_or(0));
        stats
    }
}

/// Computes derived values for the projected stats.
pub struct StatProjector;

impl StatProjector {
    /// Project `attack`, `health` and `cost` from base stats and modifiers.
    ///
    /// Each value is `max(0, base + sum(modifiers on that stat))`, with a
    /// missing base treated as 0. Only the three projected keys appear in
    /// the result.
    #[must_use]
    pub fn project(base: &StatMap, modifiers: &Vector<Modifier>) -> StatMap {
        PROJECTED_STATS
            .iter()
            .map(|&name| {
                let key = StatKey::new(name);
                let base_value = base.get(&key).copied().unwrap_or(0);
                let total = modifiers
                    .iter()
                    .filter(|m| m.stat == key)
                    .fold(base_value, |acc, m| acc.saturating_add(m.value));
                (key, total.max(0))
            })
            .collect()
    }

    /// Overlay projected values onto an existing derived map.
    ///
    /// Keys outside the projected set are left as they are; projected keys
    /// always take the freshly computed value.
    #[must_use]
    pub fn recompute(base: &StatMap, modifiers: &Vector<Modifier>, derived: &StatMap) -> StatMap {
        let mut next = derived.clone();
        for (key, value) in Self::project(base, modifiers) {
            next.insert(key, value);
        }
        next
    }
}
