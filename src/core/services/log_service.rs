use std::sync::Arc;

use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::entity::{EntityRef, Snapshot};
use crate::core::models::log_entry::{Action, FieldChange, LogEntry};
use crate::core::models::related_entry::RelatedLogEntry;
use crate::core::services::actor_context::ActorContext;
use crate::core::services::diff_service::DiffService;
use crate::core::services::relation_registry::RelationRegistry;
use crate::core::traits::resolve::RelationResolver;
use crate::core::traits::store::AuditStore;

/// Produces immutable log entries for entity mutations and propagates them
/// to related ancestor entities.
///
/// One service is built per unit of work, borrowing the long-lived store,
/// registry, and resolver alongside that unit's [`ActorContext`]. All work
/// is synchronous and completes within the calling thread.
pub struct LogService<'a> {
    store: &'a dyn AuditStore,
    registry: &'a RelationRegistry,
    resolver: &'a dyn RelationResolver,
    context: &'a ActorContext,
}

impl<'a> LogService<'a> {
    pub fn new(
        store: &'a dyn AuditStore,
        registry: &'a RelationRegistry,
        resolver: &'a dyn RelationResolver,
        context: &'a ActorContext,
    ) -> Self {
        Self {
            store,
            registry,
            resolver,
            context,
        }
    }

    /// Record one mutation as a log entry.
    ///
    /// An update whose change set is empty is suppressed entirely: nothing
    /// is stored and `Ok(None)` is returned. This is policy, not an
    /// optimization — a save that changed nothing leaves no trace.
    ///
    /// Actor resolution order: the explicit `actor` argument, then the
    /// ambient context, then none. A caller-supplied actor always wins.
    pub fn record(
        &self,
        entity: &EntityRef,
        action: Action,
        changes: Vec<FieldChange>,
        actor: Option<&str>,
    ) -> Result<Option<Arc<LogEntry>>> {
        if action == Action::Update && changes.is_empty() {
            debug!(
                entity_type = %entity.entity_type,
                entity_id = %entity.entity_id,
                "no-op update suppressed"
            );
            return Ok(None);
        }
        self.append(entity, action, changes, actor).map(Some)
    }

    /// Create one related record per registered relation path whose
    /// ancestor still resolves.
    ///
    /// A path whose ancestor no longer exists is skipped, not an error:
    /// deleting a parent must not break logging of its orphans.
    pub fn propagate(
        &self,
        entry: &Arc<LogEntry>,
        origin: &EntityRef,
    ) -> Result<Vec<RelatedLogEntry>> {
        let mut related = Vec::new();

        for path in self.registry.resolve(&entry.entity_type) {
            match self.resolver.resolve_related(origin, path) {
                Some(ancestor) => {
                    let record = RelatedLogEntry {
                        log_entry: Arc::clone(entry),
                        related_entity_type: ancestor.entity_type,
                        related_entity_id: ancestor.entity_id,
                        relation: path.to_string(),
                    };
                    self.store.save_related(&record)?;
                    related.push(record);
                }
                None => debug!(
                    entity_type = %entry.entity_type,
                    relation = path,
                    "ancestor missing, relation skipped"
                ),
            }
        }

        Ok(related)
    }

    /// Log an entity creation and propagate it.
    pub fn created(&self, entity: &EntityRef, actor: Option<&str>) -> Result<Arc<LogEntry>> {
        let entry = self.append(entity, Action::Create, Vec::new(), actor)?;
        self.propagate(&entry, entity)?;
        Ok(entry)
    }

    /// Diff the snapshots, log an update if anything changed, and
    /// propagate it. Returns `Ok(None)` for a no-op update.
    pub fn updated(
        &self,
        entity: &EntityRef,
        old: &Snapshot,
        new: &Snapshot,
        actor: Option<&str>,
    ) -> Result<Option<Arc<LogEntry>>> {
        let changes = DiffService.diff(old, new);
        let Some(entry) = self.record(entity, Action::Update, changes, actor)? else {
            return Ok(None);
        };
        self.propagate(&entry, entity)?;
        Ok(Some(entry))
    }

    /// Log an entity deletion and propagate it.
    pub fn deleted(&self, entity: &EntityRef, actor: Option<&str>) -> Result<Arc<LogEntry>> {
        let entry = self.append(entity, Action::Delete, Vec::new(), actor)?;
        self.propagate(&entry, entity)?;
        Ok(entry)
    }

    fn append(
        &self,
        entity: &EntityRef,
        action: Action,
        changes: Vec<FieldChange>,
        actor: Option<&str>,
    ) -> Result<Arc<LogEntry>> {
        let actor = actor
            .map(str::to_string)
            .or_else(|| self.context.current());

        let entry = Arc::new(LogEntry {
            entity_type: entity.entity_type.clone(),
            entity_id: entity.entity_id.clone(),
            entity_repr: entity.repr.clone(),
            action,
            changes,
            actor,
            timestamp: chrono::Utc::now(),
        });

        self.store.save_entry(&entry)?;
        Ok(entry)
    }
}
