//! Runtime service: card profiles, effect registry and store wired to the
//! dispatch engine.
//!
//! The service is the caller the engine assumes. It picks the effect set
//! for a card, loads (or initializes) the card's runtime record, runs the
//! engine, and saves the result under an optimistic version check so that
//! concurrent events on one card are serialized rather than lost.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{BaseStats, CardRuntimeState, RuntimeConfig};
use crate::effects::{EffectSpec, ValidationReport};
use crate::engine::apply_event;
use crate::registry::{EffectRegistry, RegistryError, Versioned};
use crate::store::{RuntimeProjection, RuntimeStore, StoreError};
use crate::triggers::GameEvent;

/// What the runtime needs to know about a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProfile {
    pub card_id: String,
    #[serde(default)]
    pub base_stats: BaseStats,
    /// Effect this card is bound to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_id: Option<String>,
}

impl CardProfile {
    /// Create an unbound profile.
    pub fn new(card_id: impl Into<String>, base_stats: BaseStats) -> Self {
        Self {
            card_id: card_id.into(),
            base_stats,
            effect_id: None,
        }
    }

    /// Bind the card to an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect_id: impl Into<String>) -> Self {
        self.effect_id = Some(effect_id.into());
        self
    }
}

/// Errors from runtime service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("service lock poisoned")]
    Poisoned,
}

/// Runtime service over a [`RuntimeStore`].
pub struct RuntimeService<S: RuntimeStore> {
    config: RuntimeConfig,
    cards: RwLock<FxHashMap<String, CardProfile>>,
    effects: RwLock<EffectRegistry>,
    store: S,
}

impl<S: RuntimeStore> RuntimeService<S> {
    /// Create a service with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(RuntimeConfig::default(), store)
    }

    /// Create a service with explicit configuration.
    pub fn with_config(config: RuntimeConfig, store: S) -> Self {
        Self {
            config,
            cards: RwLock::new(FxHashMap::default()),
            effects: RwLock::new(EffectRegistry::new()),
            store,
        }
    }

    /// The service configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // === Cards ===

    /// Insert or replace a card profile.
    ///
    /// Creates the card's initial runtime record only if none exists yet;
    /// editing a card never resets its runtime state.
    pub fn upsert_card(&self, profile: CardProfile) -> Result<(), ServiceError> {
        let card_id = profile.card_id.clone();
        let initial = CardRuntimeState::initial(card_id.clone(), profile.base_stats);
        write(&self.cards)?.insert(card_id.clone(), profile);

        if self.store.load(&card_id)?.is_none() {
            match self.store.save(&card_id, None, &RuntimeProjection::initial(initial)) {
                Ok(_) => info!("{card_id}: runtime initialized"),
                // Another writer created it first; theirs stands.
                Err(StoreError::VersionConflict { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Get a card profile.
    pub fn card(&self, card_id: &str) -> Result<Option<CardProfile>, ServiceError> {
        Ok(read(&self.cards)?.get(card_id).cloned())
    }

    // === Effects ===

    /// Validate a spec without storing it.
    pub fn validate_effect(&self, spec: &EffectSpec) -> Result<ValidationReport, ServiceError> {
        Ok(read(&self.effects)?.validate(spec))
    }

    /// Insert or replace an effect spec. Invalid specs are rejected.
    pub fn upsert_effect(&self, spec: EffectSpec) -> Result<Versioned<EffectSpec>, ServiceError> {
        Ok(write(&self.effects)?.upsert(spec)?)
    }

    /// The effect set a card currently reacts to.
    pub fn active_effects(&self, card_id: &str) -> Result<Vec<EffectSpec>, ServiceError> {
        let profile = self.require_card(card_id)?;
        self.effects_for(&profile)
    }

    // === Runtime ===

    /// Apply one event to a card and persist the result.
    ///
    /// Retries from a fresh load when another writer saved first, up to
    /// `max_conflict_retries` times.
    pub fn apply_event(
        &self,
        card_id: &str,
        event: &GameEvent,
    ) -> Result<RuntimeProjection, ServiceError> {
        let profile = self.require_card(card_id)?;
        let effects = self.effects_for(&profile)?;
        let mut retries = 0;

        loop {
            let (current, expected_version) = self.current_state(&profile)?;
            let projection = RuntimeProjection::from(apply_event(&current, &effects, event));

            match self.store.save(card_id, expected_version, &projection) {
                Ok(_) => return Ok(projection),
                Err(StoreError::VersionConflict { .. })
                    if retries < self.config.max_conflict_retries =>
                {
                    retries += 1;
                    warn!("{card_id}: version conflict applying {}, retry {retries}", event.kind);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Run a sequence of events from the card's current record without
    /// persisting anything. The returned log concatenates every event's log.
    pub fn simulate(
        &self,
        card_id: &str,
        events: &[GameEvent],
    ) -> Result<RuntimeProjection, ServiceError> {
        let profile = self.require_card(card_id)?;
        let effects = self.effects_for(&profile)?;
        let (initial, _) = self.current_state(&profile)?;

        Ok(events
            .iter()
            .fold(RuntimeProjection::initial(initial), |acc, event| {
                let result = apply_event(&acc.state, &effects, event);
                let mut applied_effects = acc.applied_effects;
                applied_effects.extend(result.applied_effects);
                RuntimeProjection {
                    state: result.next,
                    applied_effects,
                }
            }))
    }

    /// The card's current runtime record, if any.
    pub fn projected_card(&self, card_id: &str) -> Result<Option<RuntimeProjection>, ServiceError> {
        Ok(self.store.load(card_id)?.map(|stored| stored.projection))
    }

    fn require_card(&self, card_id: &str) -> Result<CardProfile, ServiceError> {
        self.card(card_id)?
            .ok_or_else(|| ServiceError::CardNotFound(card_id.to_string()))
    }

    fn effects_for(&self, profile: &CardProfile) -> Result<Vec<EffectSpec>, ServiceError> {
        let effects = read(&self.effects)?;
        Ok(effects.active_for(profile.effect_id.as_deref(), self.config.effect_selection))
    }

    /// Stored state and its version, or a fresh initial state at no version.
    fn current_state(
        &self,
        profile: &CardProfile,
    ) -> Result<(CardRuntimeState, Option<u64>), ServiceError> {
        Ok(match self.store.load(&profile.card_id)? {
            Some(stored) => (stored.projection.state, Some(stored.version)),
            None => (CardRuntimeState::initial(profile.card_id.clone(), profile.base_stats), None),
        })
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, ServiceError> {
    lock.read().map_err(|_| ServiceError::Poisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, ServiceError> {
    lock.write().map_err(|_| ServiceError::Poisoned)
}
