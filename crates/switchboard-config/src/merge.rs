//! Scenario overlay merging.
//!
//! Merging is a selective overwrite, not a deep merge. [`MERGE_RULES`] is an
//! ordered allow-list; each rule copies one field from the overlay onto the
//! base, and only when the overlay's value is non-empty or non-zero. Fields
//! without a rule are never touched, even when the overlay sets them.
//!
//! To make another field overridable by scenarios, add a rule. List fields,
//! if ever added, replace the base list when the overlay list is non-empty;
//! they are never concatenated.

use tracing::debug;

use crate::{ConfigError, SwitchboardConfig};

/// One allow-listed field.
#[derive(Clone, Copy)]
pub struct MergeRule {
    /// Field locator, e.g. `system.environment`.
    pub field: &'static str,
    /// Copies the field when the overlay value is set. Returns whether it did.
    pub apply: fn(&mut SwitchboardConfig, &SwitchboardConfig) -> bool,
}

impl std::fmt::Debug for MergeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeRule").field("field", &self.field).finish()
    }
}

/// Fields a scenario overlay may override, in application order.
pub const MERGE_RULES: &[MergeRule] = &[
    MergeRule {
        field: "system.environment",
        apply: |base, overlay| {
            overwrite_string(&mut base.system.environment, &overlay.system.environment)
        },
    },
    MergeRule {
        field: "services.core_orchestrator.workers",
        apply: |base, overlay| {
            overwrite_nonzero(
                &mut base.services.core_orchestrator.workers,
                overlay.services.core_orchestrator.workers,
            )
        },
    },
];

fn overwrite_string(target: &mut String, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value.clone_into(target);
    true
}

fn overwrite_nonzero(target: &mut u32, value: u32) -> bool {
    if value == 0 {
        return false;
    }
    *target = value;
    true
}

/// Fields changed by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Locators of overwritten fields, in rule order.
    pub applied: Vec<&'static str>,
}

/// Apply `overlay` onto `base` using [`MERGE_RULES`].
///
/// # Errors
///
/// Reserved for structural conflicts ([`ConfigError::Merge`]); the current
/// rules cannot fail.
///
/// # Example
///
/// ```
/// use switchboard_config::{merge, SwitchboardConfig};
///
/// let mut base = SwitchboardConfig::default();
/// base.system.environment = "development".to_string();
/// base.services.core_orchestrator.workers = 2;
///
/// let mut overlay = SwitchboardConfig::default();
/// overlay.system.environment = "production".to_string();
///
/// merge(&mut base, &overlay).unwrap();
/// assert_eq!(base.system.environment, "production");
/// assert_eq!(base.services.core_orchestrator.workers, 2);
/// ```
pub fn merge(
    base: &mut SwitchboardConfig,
    overlay: &SwitchboardConfig,
) -> Result<MergeReport, ConfigError> {
    let mut report = MergeReport::default();
    for rule in MERGE_RULES {
        if (rule.apply)(base, overlay) {
            debug!(field = rule.field, "scenario overlay applied");
            report.applied.push(rule.field);
        }
    }
    Ok(report)
}
