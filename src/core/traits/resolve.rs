use crate::core::models::entity::EntityRef;

/// Port for walking relation paths between live entity instances.
pub trait RelationResolver: Send + Sync {
    /// Walk the dotted `path` from `entity` and return the ancestor it
    /// leads to, or `None` when any hop no longer exists (e.g. the
    /// ancestor was already deleted).
    fn resolve_related(&self, entity: &EntityRef, path: &str) -> Option<EntityRef>;
}
