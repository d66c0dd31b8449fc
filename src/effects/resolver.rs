//! Action application - executing effect actions on runtime state.
//!
//! The applier takes a state by value and returns the next state. It never
//! touches projected derived stats for `ADD_MODIFIER`; the dispatch engine
//! recomputes those once, after all actions have run.

use tracing::{trace, warn};

use crate::core::{CardRuntimeState, Modifier};

use super::EffectAction;

/// Applies effect actions to card runtime state.
pub struct ActionApplier;

impl ActionApplier {
    /// Apply one action.
    ///
    /// `sequence` is the dispatch call's counter value for this action and
    /// feeds the id of any modifier created.
    #[must_use]
    pub fn apply(
        mut state: CardRuntimeState,
        effect_id: &str,
        action: &EffectAction,
        sequence: u32,
    ) -> CardRuntimeState {
        trace!("{effect_id}#{sequence}: {}", action.kind());

        match action {
            EffectAction::AddModifier { stat, value, duration } => {
                state
                    .modifiers
                    .push_back(Modifier::new(effect_id, sequence, stat.clone(), *value, *duration));
                state
            }

            EffectAction::SetStat { stat, value } => {
                if stat.is_projected() {
                    warn!("{effect_id}: SET_STAT on projected stat '{stat}' will be recomputed");
                }
                state.derived_stats.insert(stat.clone(), *value);
                state
            }

            EffectAction::AddBadge { badge } => {
                if !state.has_badge(badge) {
                    state.badges.push_back(badge.clone());
                }
                state
            }

            EffectAction::RemoveBadge { badge } => {
                if state.has_badge(badge) {
                    state.badges = state.badges.iter().filter(|b| *b != badge).cloned().collect();
                }
                state
            }

            EffectAction::Unknown => {
                warn!("{effect_id}: skipping unknown action");
                state
            }
        }
    }
}
