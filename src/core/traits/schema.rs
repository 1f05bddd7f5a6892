use std::collections::BTreeSet;

/// Port for inspecting the host's entity schema.
///
/// Decouples relation-path validation from any specific persistence
/// framework: the host answers which fields are relations and where
/// each relation points.
pub trait SchemaIntrospector: Send + Sync {
    /// Names of the relational fields declared on `entity_type`.
    fn relational_fields(&self, entity_type: &str) -> BTreeSet<String>;

    /// The entity type a relational field points at, or `None` when
    /// `field` is not a relation on `entity_type` (plain scalar fields
    /// included).
    fn relation_target(&self, entity_type: &str, field: &str) -> Option<String>;
}
