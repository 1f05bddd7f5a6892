//! Field-level audit logging with related-entity propagation.
//!
//! `auditrail` records create/update/delete events on host application
//! entities as immutable, append-only log entries. The host hands the core
//! plain value snapshots; the core computes per-field diffs, attributes the
//! change to the actor held in a per-unit-of-work context, and optionally
//! propagates each entry to ancestor entities reached via registered dotted
//! relation paths.
//!
//! Persistence, schema introspection, and relation traversal are ports
//! (traits in [`core::traits`]); the crate ships file-backed and in-memory
//! adapters but any host can plug in its own.

pub mod adapters;
pub mod config;
pub mod core;

pub use crate::config::audit_config::AuditConfig;
pub use crate::core::errors::{AuditrailError, Result};
pub use crate::core::models::entity::{EntityRef, Snapshot};
pub use crate::core::models::log_entry::{ABSENT_REPR, Action, FieldChange, LogEntry};
pub use crate::core::models::related_entry::RelatedLogEntry;
pub use crate::core::services::actor_context::{ActorContext, ActorScope};
pub use crate::core::services::diff_service::DiffService;
pub use crate::core::services::log_service::LogService;
pub use crate::core::services::relation_registry::RelationRegistry;
pub use crate::core::traits::resolve::RelationResolver;
pub use crate::core::traits::schema::SchemaIntrospector;
pub use crate::core::traits::store::AuditStore;
