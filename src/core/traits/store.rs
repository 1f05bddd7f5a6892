use std::sync::Arc;

use crate::core::errors::Result;
use crate::core::models::log_entry::LogEntry;
use crate::core::models::related_entry::RelatedLogEntry;

/// Port for persisting and querying audit records.
///
/// Writes are append-only. Failures surface as
/// [`Persistence`](crate::core::errors::AuditrailError::Persistence) errors
/// and are never retried by the core.
pub trait AuditStore: Send + Sync {
    /// Append a log entry.
    fn save_entry(&self, entry: &Arc<LogEntry>) -> Result<()>;

    /// Append a related record.
    fn save_related(&self, related: &RelatedLogEntry) -> Result<()>;

    /// Query all entries, optionally filtered by actor substring and a
    /// lower timestamp bound.
    fn entries(
        &self,
        actor: Option<&str>,
        since: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Vec<Arc<LogEntry>>>;

    /// Related records pointing at the given ancestor entity.
    fn related(&self, entity_type: &str, entity_id: &str) -> Result<Vec<RelatedLogEntry>>;
}
