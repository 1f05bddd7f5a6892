use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::adapters::store::memory_store::{matches_actor, matches_since};
use crate::config::audit_config::StoreSection;
use crate::core::errors::{AuditrailError, Result};
use crate::core::models::log_entry::LogEntry;
use crate::core::models::related_entry::RelatedLogEntry;
use crate::core::traits::store::AuditStore;

/// Audit store that appends records as JSON lines to a pair of files.
///
/// Each line is a self-contained JSON object: one file holds log entries,
/// the other related records (with the originating entry embedded). The
/// format supports efficient appends and line-by-line streaming reads.
pub struct JsonLineStore {
    entries_path: PathBuf,
    related_path: PathBuf,
}

impl JsonLineStore {
    /// Create a store that writes to `{dir}/{entries_file}` and
    /// `{dir}/{related_file}`.
    pub fn new(dir: &Path, entries_file: &str, related_file: &str) -> Self {
        Self {
            entries_path: dir.join(entries_file),
            related_path: dir.join(related_file),
        }
    }

    /// Create a store from a config section, falling back to the default
    /// file names if the `[store]` section is missing.
    pub fn from_config(dir: &Path, store_section: Option<&StoreSection>) -> Self {
        match store_section {
            Some(section) => Self::new(dir, &section.entries_file, &section.related_file),
            None => Self::new(dir, "entries.log", "related.log"),
        }
    }

    /// Check whether auditing is enabled in the configuration.
    /// Returns `true` when the section is absent (enabled by default).
    pub fn is_enabled(store_section: Option<&StoreSection>) -> bool {
        store_section.map(|s| s.enabled).unwrap_or(true)
    }

    fn append<T: Serialize>(&self, path: &Path, record: &T) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| AuditrailError::Persistence {
            detail: format!("Failed to serialize audit record: {e}"),
        })?;

        // Ensure the parent directory exists
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AuditrailError::Persistence {
                detail: format!("Cannot open audit log at {}: {e}", path.display()),
            })?;

        writeln!(file, "{line}").map_err(|e| AuditrailError::Persistence {
            detail: format!("Failed to write audit record: {e}"),
        })?;

        Ok(())
    }

    fn read_all<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(path).map_err(|e| AuditrailError::Persistence {
            detail: format!("Cannot read audit log: {e}"),
        })?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| AuditrailError::Persistence {
                detail: format!("Error reading audit log line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: T =
                serde_json::from_str(trimmed).map_err(|e| AuditrailError::Persistence {
                    detail: format!("Malformed audit record at line {}: {e}", line_num + 1),
                })?;
            records.push(record);
        }

        Ok(records)
    }
}

impl AuditStore for JsonLineStore {
    fn save_entry(&self, entry: &Arc<LogEntry>) -> Result<()> {
        self.append(&self.entries_path, entry.as_ref())
    }

    fn save_related(&self, related: &RelatedLogEntry) -> Result<()> {
        self.append(&self.related_path, related)
    }

    fn entries(
        &self,
        actor: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Arc<LogEntry>>> {
        let records: Vec<LogEntry> = self.read_all(&self.entries_path)?;
        Ok(records
            .into_iter()
            .filter(|e| matches_actor(e, actor) && matches_since(e, since))
            .map(Arc::new)
            .collect())
    }

    fn related(&self, entity_type: &str, entity_id: &str) -> Result<Vec<RelatedLogEntry>> {
        let records: Vec<RelatedLogEntry> = self.read_all(&self.related_path)?;
        Ok(records
            .into_iter()
            .filter(|r| r.related_entity_type == entity_type && r.related_entity_id == entity_id)
            .collect())
    }
}
