//! # Domain Classification Module
//!
//! Heuristically assigns a table to a domain/subdomain based on naming
//! patterns and column shape. The result decides where generated files land
//! in the project tree (`modules/<domain>/<subdomain>/<table>/`).
//!
//! Classification is an ordered list of named rules (see [`rules`]), each
//! independently testable and each returning a confidence level. The first
//! matching rule wins; when none matches, the configured fallback kind is
//! used at Low confidence and surfaced as a warning.
//!
//! ## Known ambiguity
//!
//! The heuristics misclassify configuration tables that track money, the
//! canonical example being a `budgets` table, which looks like master data
//! (a fiscal-year lookup) while behaving like operations (it moves money).
//! Such tables match neither rule and land on the fallback. That ambiguity
//! is a property of the heuristic design; it is warned about at runtime and
//! pinned by tests rather than resolved here. Pass `--domain` to settle it
//! per table.
//!
//! Classification is deterministic: the same descriptor always produces the
//! same result. Nothing here consults the clock, the environment, or any
//! mutable state.

mod rules;

pub use rules::{classification_rules, ClassificationRule, RuleMatch};

use crate::introspect::TableDescriptor;
use std::fmt;
use thiserror::Error;

/// The two subdomain kinds the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    /// Reference/lookup data, rarely changed, referenced by operational data
    MasterData,
    /// Transactional data with workflow/state
    Operations,
}

impl DomainKind {
    /// The path segment used for this kind in generated output trees.
    pub fn subdomain(self) -> &'static str {
        match self {
            DomainKind::MasterData => "master-data",
            DomainKind::Operations => "operations",
        }
    }

    /// Parse a subdomain segment back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "master-data" | "master_data" => Some(DomainKind::MasterData),
            "operations" => Some(DomainKind::Operations),
            _ => None,
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdomain())
    }
}

/// How sure a rule is about its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        f.write_str(s)
    }
}

/// Names the rule (or override) that produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTag {
    /// Workflow/status/audit-trail columns detected
    HasWorkflowColumns,
    /// Only code/name/flag-shaped columns, no outgoing references
    ReferenceShape,
    /// No rule matched; configured default applied
    DefaultFallback,
    /// Classification forced via `--domain <domain>/<subdomain>`
    ExplicitOverride,
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleTag::HasWorkflowColumns => "has-workflow-columns",
            RuleTag::ReferenceShape => "is-reference-shape",
            RuleTag::DefaultFallback => "default-fallback",
            RuleTag::ExplicitOverride => "explicit-override",
        };
        f.write_str(s)
    }
}

/// The classifier's verdict for one table.
///
/// Recomputed on every generation run; never persisted.
#[derive(Debug, Clone)]
pub struct DomainClassification {
    /// Domain path segment (e.g. `inventory`)
    pub domain: String,
    /// Master-data vs operations
    pub kind: DomainKind,
    /// Which rule decided
    pub rule: RuleTag,
    /// How confident that rule was
    pub confidence: Confidence,
    /// Human-readable evidence for the verdict
    pub reasoning: String,
}

impl DomainClassification {
    /// Subdomain path segment for the classified kind.
    pub fn subdomain(&self) -> &'static str {
        self.kind.subdomain()
    }

    /// Build a classification forced by the caller, bypassing the rules.
    pub fn explicit(domain: &str, kind: DomainKind) -> Self {
        DomainClassification {
            domain: domain.to_string(),
            kind,
            rule: RuleTag::ExplicitOverride,
            confidence: Confidence::High,
            reasoning: "subdomain passed explicitly on the command line".to_string(),
        }
    }
}

/// Classification failures.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// No rule matched and no fallback kind is configured.
    #[error(
        "no classification rule matched table {table} and no fallback subdomain is configured; \
         pass --domain <domain>/<subdomain> or set CRUDGEN_FALLBACK_SUBDOMAIN"
    )]
    Unresolved {
        /// Qualified table name
        table: String,
    },
    /// Strict mode rejected a low-confidence classification.
    #[error(
        "classification of {table} is low-confidence ({reasoning}); \
         rerun without --strict or pass --domain <domain>/<subdomain>"
    )]
    Ambiguous {
        /// Qualified table name
        table: String,
        /// Why the classifier was unsure
        reasoning: String,
    },
}

/// Classify a table by evaluating the rule list in priority order.
///
/// `fallback` supplies the kind used when no rule matches. In `strict` mode
/// a fallback (Low confidence) classification is an error instead of a
/// warning.
///
/// # Errors
///
/// [`ClassifyError::Unresolved`] when no rule matches and no fallback is
/// configured; [`ClassifyError::Ambiguous`] for a fallback result under
/// strict mode.
pub fn classify(
    table: &TableDescriptor,
    domain: &str,
    fallback: Option<DomainKind>,
    strict: bool,
) -> Result<DomainClassification, ClassifyError> {
    for rule in classification_rules() {
        if let Some(m) = (rule.apply)(table) {
            return Ok(DomainClassification {
                domain: domain.to_string(),
                kind: m.kind,
                rule: rule.tag,
                confidence: m.confidence,
                reasoning: m.reasoning,
            });
        }
    }
    let Some(kind) = fallback else {
        return Err(ClassifyError::Unresolved {
            table: table.qualified_name(),
        });
    };
    let reasoning = format!("no rule matched; using configured fallback {kind}");
    if strict {
        return Err(ClassifyError::Ambiguous {
            table: table.qualified_name(),
            reasoning,
        });
    }
    Ok(DomainClassification {
        domain: domain.to_string(),
        kind,
        rule: RuleTag::DefaultFallback,
        confidence: Confidence::Low,
        reasoning,
    })
}
