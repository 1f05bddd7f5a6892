use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::core::errors::Result;
use crate::core::models::log_entry::LogEntry;
use crate::core::models::related_entry::RelatedLogEntry;
use crate::core::traits::store::AuditStore;

/// Append-only audit store backed by in-process vectors.
///
/// Intended for tests and for hosts that flush history elsewhere; nothing
/// survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Arc<LogEntry>>>,
    related: Mutex<Vec<RelatedLogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditStore for MemoryStore {
    fn save_entry(&self, entry: &Arc<LogEntry>) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(entry));
        Ok(())
    }

    fn save_related(&self, related: &RelatedLogEntry) -> Result<()> {
        self.related
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(related.clone());
        Ok(())
    }

    fn entries(
        &self,
        actor: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Arc<LogEntry>>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries
            .iter()
            .filter(|e| matches_actor(e, actor) && matches_since(e, since))
            .cloned()
            .collect())
    }

    fn related(&self, entity_type: &str, entity_id: &str) -> Result<Vec<RelatedLogEntry>> {
        let related = self.related.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(related
            .iter()
            .filter(|r| r.related_entity_type == entity_type && r.related_entity_id == entity_id)
            .cloned()
            .collect())
    }
}

pub(crate) fn matches_actor(entry: &LogEntry, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(filter) => {
            let filter = filter.to_lowercase();
            entry
                .actor
                .as_ref()
                .is_some_and(|a| a.to_lowercase().contains(&filter))
        }
    }
}

pub(crate) fn matches_since(entry: &LogEntry, since: Option<DateTime<Utc>>) -> bool {
    match since {
        None => true,
        Some(since) => entry.timestamp >= since,
    }
}
