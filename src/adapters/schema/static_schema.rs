use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::models::entity::EntityRef;
use crate::core::traits::resolve::RelationResolver;
use crate::core::traits::schema::SchemaIntrospector;

/// Hand-declared schema and instance graph.
///
/// Stands in for a real framework's metadata in tests and in hosts whose
/// entity layout is known up front: relational fields are declared with
/// [`relation`](Self::relation) and instance edges with
/// [`link`](Self::link). Implements both schema ports.
#[derive(Debug, Default)]
pub struct StaticSchema {
    /// entity type -> relational field -> target entity type
    relations: HashMap<String, BTreeMap<String, String>>,
    /// (entity type, entity id, field) -> related instance
    links: HashMap<(String, String, String), EntityRef>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a relational field on an entity type.
    pub fn relation(
        &mut self,
        entity_type: impl Into<String>,
        field: impl Into<String>,
        target_type: impl Into<String>,
    ) -> &mut Self {
        self.relations
            .entry(entity_type.into())
            .or_default()
            .insert(field.into(), target_type.into());
        self
    }

    /// Connect one instance to another through a relational field.
    pub fn link(&mut self, from: &EntityRef, field: &str, to: &EntityRef) -> &mut Self {
        self.links.insert(
            (
                from.entity_type.clone(),
                from.entity_id.clone(),
                field.to_string(),
            ),
            to.clone(),
        );
        self
    }

    /// Remove an instance edge, simulating e.g. a deleted ancestor.
    pub fn unlink(&mut self, from: &EntityRef, field: &str) {
        self.links.remove(&(
            from.entity_type.clone(),
            from.entity_id.clone(),
            field.to_string(),
        ));
    }
}

impl SchemaIntrospector for StaticSchema {
    fn relational_fields(&self, entity_type: &str) -> BTreeSet<String> {
        self.relations
            .get(entity_type)
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn relation_target(&self, entity_type: &str, field: &str) -> Option<String> {
        self.relations.get(entity_type)?.get(field).cloned()
    }
}

impl RelationResolver for StaticSchema {
    fn resolve_related(&self, entity: &EntityRef, path: &str) -> Option<EntityRef> {
        let mut current = entity.clone();
        for part in path.split('.') {
            current = self
                .links
                .get(&(
                    current.entity_type.clone(),
                    current.entity_id.clone(),
                    part.to_string(),
                ))?
                .clone();
        }
        Some(current)
    }
}
