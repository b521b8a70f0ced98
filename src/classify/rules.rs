use super::{Confidence, DomainKind};
use crate::introspect::TableDescriptor;

/// A single named heuristic, evaluated against a table descriptor.
///
/// Rules are plain functions so each one can be tested on its own; the
/// classifier only adds the priority ordering and the fallback.
pub struct ClassificationRule {
    /// Tag reported in the classification result
    pub tag: super::RuleTag,
    /// The heuristic itself
    pub apply: fn(&TableDescriptor) -> Option<RuleMatch>,
}

/// A positive verdict from one rule.
pub struct RuleMatch {
    /// Kind the rule assigns
    pub kind: DomainKind,
    /// How strong the evidence was
    pub confidence: Confidence,
    /// The evidence, for the run summary and the `classify` subcommand
    pub reasoning: String,
}

const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        tag: super::RuleTag::HasWorkflowColumns,
        apply: has_workflow_columns,
    },
    ClassificationRule {
        tag: super::RuleTag::ReferenceShape,
        apply: reference_shape,
    },
];

/// The rule list, in priority order.
///
/// Workflow evidence outranks reference shape: a status column on an
/// otherwise lookup-shaped table still means the rows move through states.
pub fn classification_rules() -> &'static [ClassificationRule] {
    RULES
}

/// Column names treated as workflow/state evidence.
const WORKFLOW_COLUMNS: &[&str] = &[
    "status",
    "workflow_state",
    "approval_status",
    "approved_by",
    "approved_at",
    "submitted_by",
    "submitted_at",
    "reviewed_by",
    "reviewed_at",
    "cancelled_by",
    "cancelled_at",
    "completed_at",
    "requested_by",
    "requested_at",
];

/// Names strongly indicating a state machine rather than an audit trail.
const STATE_COLUMNS: &[&str] = &["status", "workflow_state", "approval_status"];

fn has_workflow_columns(table: &TableDescriptor) -> Option<RuleMatch> {
    let hits: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| WORKFLOW_COLUMNS.contains(&c.name.as_str()))
        .map(|c| c.name.as_str())
        .collect();

    if !hits.is_empty() {
        let state_machine = hits.iter().any(|name| STATE_COLUMNS.contains(name));
        let confidence = if state_machine {
            Confidence::High
        } else {
            Confidence::Medium
        };
        return Some(RuleMatch {
            kind: DomainKind::Operations,
            confidence,
            reasoning: format!("workflow columns present: {}", hits.join(", ")),
        });
    }

    // An author column plus references into other tables is transactional
    // data even without an explicit status.
    let authored = table.columns.iter().any(|c| c.name == "created_by");
    if authored && table.has_external_foreign_keys() {
        return Some(RuleMatch {
            kind: DomainKind::Operations,
            confidence: Confidence::Medium,
            reasoning: "created_by combined with outgoing foreign keys".to_string(),
        });
    }
    None
}

/// Columns allowed in a pure reference table, beyond the primary key.
const REFERENCE_COLUMNS: &[&str] = &[
    "code",
    "name",
    "title",
    "description",
    "is_active",
    "active",
    "sort_order",
    "display_order",
    "created_at",
    "updated_at",
];

fn reference_shape(table: &TableDescriptor) -> Option<RuleMatch> {
    if table.has_external_foreign_keys() {
        return None;
    }
    let fits = |name: &str| {
        table.is_primary_key(name)
            || REFERENCE_COLUMNS.contains(&name)
            || name.ends_with("_code")
            || name.ends_with("_name")
            || table.foreign_key_for(name).is_some()
    };
    if !table.columns.iter().all(|c| fits(&c.name)) {
        return None;
    }
    let labeled = table.columns.iter().any(|c| {
        let n = c.name.as_str();
        n == "code" || n == "name" || n.ends_with("_code") || n.ends_with("_name")
    });
    if !labeled {
        return None;
    }
    Some(RuleMatch {
        kind: DomainKind::MasterData,
        confidence: Confidence::High,
        reasoning: "only code/name/flag columns and no outgoing references".to_string(),
    })
}
