//! Environment-variable configuration for generation defaults.
//!
//! Loaded once at startup with [`GeneratorConfig::from_env()`]. CLI flags
//! always override these values; the environment only supplies defaults so
//! teams can pin a project-wide domain without repeating flags.
//!
//! ## Environment Variables
//!
//! ### `CRUDGEN_DEFAULT_DOMAIN`
//!
//! Domain segment used for output paths when `--domain` is not passed
//! (e.g. `inventory`). Defaults to `core`.
//!
//! ### `CRUDGEN_FALLBACK_SUBDOMAIN`
//!
//! Subdomain the classifier falls back to when no heuristic rule matches:
//! `master-data` or `operations`. When unset, an unclassifiable table is an
//! error.

use crate::classify::DomainKind;
use std::env;
use tracing::warn;

/// Generation defaults loaded from the environment.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Default domain path segment (`CRUDGEN_DEFAULT_DOMAIN`).
    pub default_domain: Option<String>,
    /// Classifier fallback when no rule matches (`CRUDGEN_FALLBACK_SUBDOMAIN`).
    pub fallback_kind: Option<DomainKind>,
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values are ignored with a warning rather than failing the
    /// run; a bad environment should not block an explicit CLI invocation.
    pub fn from_env() -> Self {
        let default_domain = env::var("CRUDGEN_DEFAULT_DOMAIN")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let fallback_kind = match env::var("CRUDGEN_FALLBACK_SUBDOMAIN") {
            Ok(val) => match DomainKind::parse(&val) {
                Some(kind) => Some(kind),
                None => {
                    warn!(value = %val, "ignoring invalid CRUDGEN_FALLBACK_SUBDOMAIN");
                    None
                }
            },
            Err(_) => None,
        };
        GeneratorConfig {
            default_domain,
            fallback_kind,
        }
    }
}
