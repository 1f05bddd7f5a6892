use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::core::errors::{AuditrailError, Result};
use crate::core::traits::schema::SchemaIntrospector;

/// Per-entity-type registry of validated dotted relation paths.
///
/// Each registered path names a chain of relational fields leading from the
/// tracked type to an ancestor type; log entries for the tracked type get a
/// related record against each reachable ancestor. Validation happens here,
/// at registration time, so logging never encounters a malformed path.
///
/// The registry is read-mostly: mutate it during configuration, then share
/// it immutably with the logging path. Concurrent mutation during active
/// logging is the caller's problem to serialize.
pub struct RelationRegistry {
    schema: Arc<dyn SchemaIntrospector>,
    relations: HashMap<String, BTreeSet<String>>,
}

impl RelationRegistry {
    pub fn new(schema: Arc<dyn SchemaIntrospector>) -> Self {
        Self {
            schema,
            relations: HashMap::new(),
        }
    }

    /// Register relation paths for an entity type, replacing any prior
    /// registration.
    ///
    /// Every path is validated hop by hop against the schema before
    /// anything is stored: each dot-separated component must be a
    /// relational field on the type reached so far. On failure the
    /// registry is left fully unchanged.
    pub fn register<I, S>(&mut self, entity_type: &str, relations: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut validated = BTreeSet::new();
        for relation in relations {
            let relation = relation.into();
            self.validate(entity_type, &relation)?;
            validated.insert(relation);
        }

        debug!(entity_type, relations = validated.len(), "registered relations");
        self.relations.insert(entity_type.to_string(), validated);
        Ok(())
    }

    /// Remove the registration for an entity type. No-op if none exists.
    pub fn unregister(&mut self, entity_type: &str) {
        self.relations.remove(entity_type);
    }

    /// The registered relation paths for an entity type, empty if none.
    pub fn resolve<'a>(&'a self, entity_type: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.relations
            .get(entity_type)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Whether any relations are registered for the type.
    pub fn is_tracked(&self, entity_type: &str) -> bool {
        self.relations.contains_key(entity_type)
    }

    fn validate(&self, entity_type: &str, relation: &str) -> Result<()> {
        let mut current = entity_type.to_string();

        for part in relation.split('.') {
            match self.schema.relation_target(&current, part) {
                Some(target) => current = target,
                None => {
                    return Err(AuditrailError::InvalidRelation {
                        path: relation.to_string(),
                        entity_type: current,
                        field: part.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::schema::static_schema::StaticSchema;

    fn registry() -> RelationRegistry {
        let mut schema = StaticSchema::new();
        schema.relation("Child", "parent", "Parent");
        schema.relation("Parent", "owner", "Owner");
        RelationRegistry::new(Arc::new(schema))
    }

    #[test]
    fn registers_valid_single_hop() {
        let mut reg = registry();
        reg.register("Child", ["parent"]).unwrap();

        let paths: Vec<&str> = reg.resolve("Child").collect();
        assert_eq!(paths, vec!["parent"]);
    }

    #[test]
    fn registers_valid_multi_hop_path() {
        let mut reg = registry();
        reg.register("Child", ["parent.owner"]).unwrap();

        assert!(reg.is_tracked("Child"));
    }

    #[test]
    fn rejects_non_relational_component() {
        let mut reg = registry();
        let err = reg.register("Child", ["parent.text"]).unwrap_err();

        match err {
            AuditrailError::InvalidRelation {
                path,
                entity_type,
                field,
            } => {
                assert_eq!(path, "parent.text");
                assert_eq!(entity_type, "Parent");
                assert_eq!(field, "text");
            }
            other => panic!("expected InvalidRelation, got {other:?}"),
        }
    }

    #[test]
    fn failed_registration_leaves_registry_unchanged() {
        let mut reg = registry();
        reg.register("Child", ["parent"]).unwrap();

        // One valid path and one invalid: nothing may be replaced
        assert!(reg.register("Child", ["parent.owner", "bogus"]).is_err());

        let paths: Vec<&str> = reg.resolve("Child").collect();
        assert_eq!(paths, vec!["parent"]);
    }

    #[test]
    fn register_replaces_prior_registration() {
        let mut reg = registry();
        reg.register("Child", ["parent"]).unwrap();
        reg.register("Child", ["parent.owner"]).unwrap();

        let paths: Vec<&str> = reg.resolve("Child").collect();
        assert_eq!(paths, vec!["parent.owner"]);
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut reg = registry();
        reg.register("Child", ["parent"]).unwrap();

        reg.unregister("Child");
        reg.unregister("Child");
        reg.unregister("NeverRegistered");

        assert!(!reg.is_tracked("Child"));
        assert_eq!(reg.resolve("Child").count(), 0);
    }

    #[test]
    fn resolve_unregistered_type_is_empty() {
        let reg = registry();
        assert_eq!(reg.resolve("Child").count(), 0);
    }
}
