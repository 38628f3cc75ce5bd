//! Scenario overlay resolution.
//!
//! A scenario bundle is a multi-document YAML file. Each fragment may define
//! any number of scenarios as top-level keys ending in [`SCENARIO_SUFFIX`]:
//!
//! ```yaml
//! local_dev_scenario:
//!   name: Local Development Setup
//!   system:
//!     environment: development
//!   services:
//!     core_orchestrator:
//!       workers: 1
//! ---
//! production_scenario:
//!   name: Production Cluster
//!   system:
//!     environment: production
//! ```
//!
//! Fragments are heterogeneous, so each one is first read as an untyped YAML
//! value. Only the branch whose `name` matches is converted into a
//! [`SwitchboardConfig`]. A fragment that fails to parse is skipped so its
//! siblings stay usable.

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::{ConfigError, SwitchboardConfig};

/// Boundary between documents in a bundle.
pub const DOCUMENT_BOUNDARY: &str = "---";

/// Suffix marking a top-level key as a scenario definition.
pub const SCENARIO_SUFFIX: &str = "_scenario";

/// Find the overlay for `scenario` in `bundle`.
///
/// Fragments are searched in order, then keys in document order within a
/// fragment. The first branch whose `name` equals `scenario` and converts into
/// a configuration tree wins.
///
/// # Errors
///
/// Returns [`ConfigError::ScenarioNotFound`] when no fragment yields a match.
///
/// # Example
///
/// ```
/// use switchboard_config::resolve_scenario;
///
/// let bundle = "a_scenario:\n  name: A\n  system:\n    environment: qa\n";
/// let overlay = resolve_scenario(bundle, "A").unwrap();
/// assert_eq!(overlay.system.environment, "qa");
/// assert!(resolve_scenario(bundle, "B").is_err());
/// ```
pub fn resolve_scenario(bundle: &str, scenario: &str) -> Result<SwitchboardConfig, ConfigError> {
    for (index, fragment) in fragments(bundle).enumerate() {
        let root: Value = match serde_yaml::from_str(fragment) {
            Ok(value) => value,
            Err(e) => {
                debug!(fragment = index, error = %e, "skipping unparseable bundle fragment");
                continue;
            }
        };

        let Value::Mapping(root) = root else {
            debug!(fragment = index, "skipping bundle fragment without a top-level mapping");
            continue;
        };

        if let Some(overlay) = match_in_fragment(&root, scenario, index) {
            return Ok(overlay);
        }
    }

    Err(ConfigError::scenario_not_found(scenario))
}

/// Names of every scenario defined in `bundle`, in bundle order.
///
/// Unparseable fragments are skipped, as in [`resolve_scenario`].
pub fn scenario_names(bundle: &str) -> Vec<String> {
    fragments(bundle)
        .filter_map(|fragment| match serde_yaml::from_str(fragment) {
            Ok(Value::Mapping(root)) => Some(root),
            _ => None,
        })
        .flat_map(|root| {
            root.into_iter()
                .filter(|(key, _)| is_scenario_key(key))
                .filter_map(|(_, value)| scenario_name(&value).map(str::to_string))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn fragments(bundle: &str) -> impl Iterator<Item = &str> {
    bundle
        .split(DOCUMENT_BOUNDARY)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
}

fn is_scenario_key(key: &Value) -> bool {
    key.as_str()
        .is_some_and(|key| key.ends_with(SCENARIO_SUFFIX))
}

fn scenario_name(value: &Value) -> Option<&str> {
    value.as_mapping()?.get("name")?.as_str()
}

fn match_in_fragment(root: &Mapping, scenario: &str, index: usize) -> Option<SwitchboardConfig> {
    for (key, value) in root {
        if !is_scenario_key(key) || scenario_name(value) != Some(scenario) {
            continue;
        }

        match serde_yaml::from_value::<SwitchboardConfig>(value.clone()) {
            Ok(overlay) => {
                debug!(
                    fragment = index,
                    key = key.as_str().unwrap_or_default(),
                    scenario,
                    "resolved scenario overlay"
                );
                return Some(overlay);
            }
            Err(e) => {
                warn!(
                    fragment = index,
                    key = key.as_str().unwrap_or_default(),
                    scenario,
                    error = %e,
                    "scenario matched but does not fit the configuration schema"
                );
            }
        }
    }
    None
}
