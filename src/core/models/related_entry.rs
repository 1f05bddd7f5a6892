use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::models::log_entry::LogEntry;

/// A secondary record linking a [`LogEntry`] to an ancestor entity reached
/// via a registered relation path.
///
/// At most one of these exists per `(LogEntry, relation)` pair. The
/// originating entry is shared, not copied: the `Arc` keeps it alive for as
/// long as any related record points at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLogEntry {
    pub log_entry: Arc<LogEntry>,
    pub related_entity_type: String,
    pub related_entity_id: String,
    /// The dotted relation path that was traversed, e.g. `"parent"`.
    pub relation: String,
}
