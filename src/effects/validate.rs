//! Structural validation of effect specs.
//!
//! Validation collects every issue instead of stopping at the first, and
//! never fails. The caller decides whether an invalid spec is rejected; the
//! dispatch engine does not re-check specs it is handed.

use serde::{Deserialize, Serialize};

use crate::triggers::ConditionOp;

use super::{EffectAction, EffectSpec};

/// Outcome of validating one spec.
///
/// `ok` is true exactly when `issues` is empty. `warnings` flag suspicious
/// but accepted constructs and never affect `ok`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub issues: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Validate an effect spec.
pub fn validate_effect_spec(spec: &EffectSpec) -> ValidationReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if spec.effect_id.trim().is_empty() {
        issues.push("effectId is required".to_string());
    }

    if spec.triggers.is_empty() {
        issues.push("triggers are required".to_string());
    }

    for trigger in &spec.triggers {
        if trigger.actions.is_empty() {
            issues.push(format!("trigger {} has no actions", trigger.on));
        }

        for condition in &trigger.when {
            if condition.op == ConditionOp::Unknown {
                warnings.push(format!(
                    "trigger {} has a condition on '{}' with an unknown operator",
                    trigger.on, condition.path
                ));
            }
            if condition.path.is_empty() {
                warnings.push(format!("trigger {} has a condition with an empty path", trigger.on));
            }
        }

        for action in &trigger.actions {
            match action {
                EffectAction::SetStat { stat, .. } if stat.is_projected() => {
                    warnings.push(format!(
                        "trigger {} sets projected stat '{}', which projection overwrites",
                        trigger.on, stat
                    ));
                }
                EffectAction::Unknown => {
                    warnings.push(format!("trigger {} has an unknown action", trigger.on));
                }
                _ => {}
            }
        }
    }

    ValidationReport {
        ok: issues.is_empty(),
        issues,
        warnings,
    }
}
