//! Effect registry.
//!
//! Stores validated effect specs keyed by effect id, each with a version
//! that increments on every upsert. Specs that fail validation are rejected
//! here; the dispatch engine trusts whatever the registry hands it.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::EffectSelection;
use crate::effects::{validate_effect_spec, EffectSpec, ValidationReport};

/// A stored value with its version and last update time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioned<T> {
    pub value: T,
    /// Starts at 1, +1 per update.
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

impl<T> Versioned<T> {
    /// Wrap `value` as the successor of `previous` (or as version 1).
    pub fn next(previous: Option<&Versioned<T>>, value: T) -> Self {
        Self {
            value,
            version: previous.map_or(1, |p| p.version + 1),
            updated_at: Utc::now(),
        }
    }
}

/// Errors from registry operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("effect validation failed for '{effect_id}': {}", .issues.join(", "))]
    Invalid {
        effect_id: String,
        issues: Vec<String>,
    },
}

/// Registry of effect specs.
///
/// ## Example
///
/// ```
/// use card_effect_engine::effects::{EffectAction, EffectSpec, EffectTrigger};
/// use card_effect_engine::registry::EffectRegistry;
/// use card_effect_engine::triggers::TriggerEvent;
///
/// let mut registry = EffectRegistry::new();
///
/// let spec = EffectSpec::new("shield").with_trigger(
///     EffectTrigger::on(TriggerEvent::AuraApplied)
///         .with_action(EffectAction::add_badge("shielded")),
/// );
///
/// assert_eq!(registry.upsert(spec.clone()).unwrap().version, 1);
/// assert_eq!(registry.upsert(spec).unwrap().version, 2);
/// assert!(registry.upsert(EffectSpec::new("empty")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    effects: FxHashMap<String, Versioned<EffectSpec>>,
}

impl EffectRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a spec without storing it.
    #[must_use]
    pub fn validate(&self, spec: &EffectSpec) -> ValidationReport {
        validate_effect_spec(spec)
    }

    /// Insert or replace a spec, bumping its version.
    ///
    /// Rejects specs that fail validation and leaves the registry unchanged.
    pub fn upsert(&mut self, spec: EffectSpec) -> Result<Versioned<EffectSpec>, RegistryError> {
        let report = validate_effect_spec(&spec);
        if !report.ok {
            return Err(RegistryError::Invalid {
                effect_id: spec.effect_id,
                issues: report.issues,
            });
        }

        let saved = Versioned::next(self.effects.get(&spec.effect_id), spec);
        info!("effect '{}' stored at version {}", saved.value.effect_id, saved.version);
        self.effects.insert(saved.value.effect_id.clone(), saved.clone());
        Ok(saved)
    }

    /// Get a spec by id.
    #[must_use]
    pub fn get(&self, effect_id: &str) -> Option<&Versioned<EffectSpec>> {
        self.effects.get(effect_id)
    }

    /// Remove a spec.
    pub fn remove(&mut self, effect_id: &str) -> Option<Versioned<EffectSpec>> {
        self.effects.remove(effect_id)
    }

    /// Check if a spec is registered.
    #[must_use]
    pub fn contains(&self, effect_id: &str) -> bool {
        self.effects.contains_key(effect_id)
    }

    /// All specs, most recently updated first (ties by id).
    #[must_use]
    pub fn list(&self) -> Vec<&Versioned<EffectSpec>> {
        let mut all: Vec<_> = self.effects.values().collect();
        all.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.value.effect_id.cmp(&b.value.effect_id))
        });
        all
    }

    /// Specs a card reacts to.
    ///
    /// With [`EffectSelection::BoundEffect`], a card bound to `bound_effect`
    /// gets only that spec (none if it is not registered) and an unbound
    /// card gets every spec. With [`EffectSelection::All`] every spec
    /// applies. Output is in effect id order.
    #[must_use]
    pub fn active_for(
        &self,
        bound_effect: Option<&str>,
        selection: EffectSelection,
    ) -> Vec<EffectSpec> {
        let mut active: Vec<EffectSpec> = match (selection, bound_effect) {
            (EffectSelection::BoundEffect, Some(effect_id)) => {
                self.get(effect_id).map(|v| v.value.clone()).into_iter().collect()
            }
            _ => self.effects.values().map(|v| v.value.clone()).collect(),
        };
        active.sort_by(|a, b| a.effect_id.cmp(&b.effect_id));
        active
    }

    /// Get the number of registered specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Iterate over all stored specs.
    pub fn iter(&self) -> impl Iterator<Item = &Versioned<EffectSpec>> {
        self.effects.values()
    }
}
