use serde::{Deserialize, Serialize};

/// Representation used for a field that has no value on one side of a diff,
/// e.g. the "before" side of a freshly created field.
pub const ABSENT_REPR: &str = "None";

/// Actions that get recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
}

/// One field's before/after pair within a change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub old: String,
    pub new: String,
}

impl FieldChange {
    pub fn new(
        field: impl Into<String>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            old: old.into(),
            new: new.into(),
        }
    }
}

/// An immutable record of one change event.
///
/// Entries are created exactly once per observed mutation and never mutated
/// or deleted afterwards; the log is append-only. `entity_repr` is the
/// entity's representation at event time, kept verbatim so history stays
/// readable after the entity itself is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub entity_type: String,
    pub entity_id: String,
    pub entity_repr: String,
    pub action: Action,
    /// Ordered per-field before/after pairs; empty for create and delete.
    pub changes: Vec<FieldChange>,
    /// Acting principal, or `None` for unattended changes.
    pub actor: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
