//! Auxiliary domain documents.
//!
//! Providers, stealth profiles, UI preferences and the security policy can
//! each live in their own document. A domain document is consulted only when
//! the base document left that section empty, and it is best-effort: a
//! missing or malformed document leaves the section empty. So does a list
//! document with an entry that fails its value checks.
//!
//! Providers and profiles are written as a mapping from entry name to entry
//! body. The mapping key becomes the entry's `name`:
//!
//! ```yaml
//! providers:
//!   claude:
//!     type: web
//!     priority: 1
//!   openai:
//!     type: api
//!     priority: 2
//! ```

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::document::load_document;
use crate::{
    ConfigError, DocumentLayout, DocumentRole, DocumentSource, ProviderConfig, SecurityConfig,
    StealthProfile, SwitchboardConfig, UiConfig,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProvidersDocument {
    providers: IndexMap<String, ProviderConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StealthProfilesDocument {
    stealth_profiles: IndexMap<String, StealthProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UiDocument {
    ui: UiConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SecurityDocument {
    security: SecurityConfig,
}

/// What happened to one domain section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOutcome {
    /// The base document already populated the section.
    Skipped,
    /// The domain document was loaded. Carries the number of entries for list
    /// domains and 1 for section domains.
    Loaded(usize),
    /// The domain document does not exist.
    Missing,
    /// The domain document exists but could not be read or parsed, or one of
    /// its entries carries an out-of-range value.
    Failed(String),
}

/// Per-domain outcomes of [`fill_domains`], in domain order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainReport {
    /// Outcome for each of the four domains.
    pub outcomes: Vec<(DocumentRole, DomainOutcome)>,
}

impl DomainReport {
    /// Outcome recorded for `role`.
    pub fn outcome(&self, role: DocumentRole) -> Option<&DomainOutcome> {
        self.outcomes
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, outcome)| outcome)
    }

    fn record(&mut self, role: DocumentRole, outcome: DomainOutcome) {
        self.outcomes.push((role, outcome));
    }
}

/// Turn a name-keyed mapping into an ordered list, copying each key into the
/// entry's name.
pub fn flatten_named<T, F>(entries: IndexMap<String, T>, mut set_name: F) -> Vec<T>
where
    F: FnMut(&mut T, String),
{
    entries
        .into_iter()
        .map(|(name, mut entry)| {
            set_name(&mut entry, name);
            entry
        })
        .collect()
}

/// Fill every empty domain section of `config` from its domain document.
///
/// Never fails; per-domain results are returned in the report.
pub fn fill_domains<S>(
    config: &mut SwitchboardConfig,
    source: &S,
    layout: &DocumentLayout,
) -> DomainReport
where
    S: DocumentSource + ?Sized,
{
    let mut report = DomainReport::default();

    let outcome = if config.providers.is_empty() {
        fill(source, layout, DocumentRole::Providers, |doc: ProvidersDocument| {
            let providers = flatten_named(doc.providers, |p, name| p.name = name);
            providers.iter().try_for_each(ProviderConfig::check_values)?;
            config.providers = providers;
            Ok(config.providers.len())
        })
    } else {
        DomainOutcome::Skipped
    };
    report.record(DocumentRole::Providers, outcome);

    let outcome = if config.stealth_profiles.is_empty() {
        fill(
            source,
            layout,
            DocumentRole::StealthProfiles,
            |doc: StealthProfilesDocument| {
                let profiles = flatten_named(doc.stealth_profiles, |p, name| p.name = name);
                profiles.iter().try_for_each(StealthProfile::check_values)?;
                config.stealth_profiles = profiles;
                Ok(config.stealth_profiles.len())
            },
        )
    } else {
        DomainOutcome::Skipped
    };
    report.record(DocumentRole::StealthProfiles, outcome);

    let outcome = if config.ui.is_empty() {
        fill(source, layout, DocumentRole::Ui, |doc: UiDocument| {
            config.ui = doc.ui;
            Ok(1)
        })
    } else {
        DomainOutcome::Skipped
    };
    report.record(DocumentRole::Ui, outcome);

    let outcome = if config.security.is_empty() {
        fill(source, layout, DocumentRole::Security, |doc: SecurityDocument| {
            config.security = doc.security;
            Ok(1)
        })
    } else {
        DomainOutcome::Skipped
    };
    report.record(DocumentRole::Security, outcome);

    report
}

fn fill<S, T, F>(
    source: &S,
    layout: &DocumentLayout,
    role: DocumentRole,
    apply: F,
) -> DomainOutcome
where
    S: DocumentSource + ?Sized,
    T: DeserializeOwned,
    F: FnOnce(T) -> Result<usize, ConfigError>,
{
    let name = layout.name(role);
    match load_document::<T, S>(source, name).and_then(apply) {
        Ok(entries) => {
            debug!(domain = %role, document = name, entries, "loaded domain document");
            DomainOutcome::Loaded(entries)
        }
        Err(e @ ConfigError::NotFound { .. }) => {
            debug!(
                domain = %role,
                document = name,
                error = %e,
                "domain document not present"
            );
            DomainOutcome::Missing
        }
        Err(e) => {
            warn!(
                domain = %role,
                document = name,
                error = %e,
                "ignoring unusable domain document"
            );
            DomainOutcome::Failed(e.to_string())
        }
    }
}
