//! Runtime configuration.
//!
//! The dispatch engine itself is unconfigured. These settings govern the
//! layer that feeds it: which effect specs a card reacts to, and how the
//! runtime service handles concurrent writers.

use serde::{Deserialize, Serialize};

/// Policy for choosing which registered effects apply to a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSelection {
    /// The card's bound `effectId` only; every registered effect when the
    /// card declares none.
    #[default]
    BoundEffect,
    /// Every registered effect, regardless of the card's binding.
    All,
}

/// Configuration for the runtime service.
///
/// ## Example
///
/// ```
/// use card_effect_engine::core::{EffectSelection, RuntimeConfig};
///
/// let config = RuntimeConfig::new()
///     .with_effect_selection(EffectSelection::All)
///     .with_max_conflict_retries(5);
///
/// assert_eq!(config.max_conflict_retries, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Which effects a card reacts to.
    pub effect_selection: EffectSelection,

    /// How many times `apply_event` reloads and retries after losing an
    /// optimistic version check before giving up.
    pub max_conflict_retries: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            effect_selection: EffectSelection::default(),
            max_conflict_retries: 3,
        }
    }
}

impl RuntimeConfig {
    /// Create a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the effect selection policy (builder pattern).
    #[must_use]
    pub fn with_effect_selection(mut self, selection: EffectSelection) -> Self {
        self.effect_selection = selection;
        self
    }

    /// Set the retry budget for version conflicts (builder pattern).
    #[must_use]
    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }
}
