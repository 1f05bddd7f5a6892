use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::errors::{AuditrailError, Result};
use crate::core::services::relation_registry::RelationRegistry;

/// Top-level audit configuration read from a TOML file.
///
/// ```toml
/// [store]
/// enabled = true
/// entries_file = "entries.log"
/// related_file = "related.log"
///
/// [tracked.SimpleChildModel]
/// relations = ["parent"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    pub store: Option<StoreSection>,
    #[serde(default)]
    pub tracked: HashMap<String, TrackedSection>,
}

/// Storage settings for the file-backed store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_entries_file")]
    pub entries_file: String,
    #[serde(default = "default_related_file")]
    pub related_file: String,
}

/// Relation paths to propagate along, per tracked entity type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackedSection {
    #[serde(default)]
    pub relations: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_entries_file() -> String {
    "entries.log".to_string()
}

fn default_related_file() -> String {
    "related.log".to_string()
}

impl AuditConfig {
    /// Load the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuditrailError::InvalidConfig {
                detail: format!("config file not found: {}", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse the configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AuditrailError::InvalidConfig {
            detail: format!("Failed to parse audit config: {e}"),
        })
    }

    /// Register every `[tracked.*]` section with the registry.
    ///
    /// Relation paths are validated by the registry against its schema;
    /// the first invalid path aborts with
    /// [`InvalidRelation`](AuditrailError::InvalidRelation).
    pub fn apply(&self, registry: &mut RelationRegistry) -> Result<()> {
        for (entity_type, section) in &self.tracked {
            registry.register(entity_type, section.relations.iter().cloned())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::schema::static_schema::StaticSchema;
    use std::sync::Arc;

    fn registry() -> RelationRegistry {
        let mut schema = StaticSchema::new();
        schema.relation("Child", "parent", "Parent");
        RelationRegistry::new(Arc::new(schema))
    }

    #[test]
    fn parses_tracked_sections() {
        let config = AuditConfig::parse(
            r#"
            [tracked.Child]
            relations = ["parent"]

            [tracked.Orphan]
            "#,
        )
        .unwrap();

        assert_eq!(config.tracked["Child"].relations, vec!["parent"]);
        assert!(config.tracked["Orphan"].relations.is_empty());
    }

    #[test]
    fn store_section_defaults() {
        let config = AuditConfig::parse("[store]\n").unwrap();
        let store = config.store.unwrap();

        assert!(store.enabled);
        assert_eq!(store.entries_file, "entries.log");
        assert_eq!(store.related_file, "related.log");
    }

    #[test]
    fn missing_store_section_is_none() {
        let config = AuditConfig::parse("").unwrap();
        assert!(config.store.is_none());
    }

    #[test]
    fn apply_registers_relations() {
        let config = AuditConfig::parse(
            r#"
            [tracked.Child]
            relations = ["parent"]
            "#,
        )
        .unwrap();

        let mut reg = registry();
        config.apply(&mut reg).unwrap();

        let paths: Vec<&str> = reg.resolve("Child").collect();
        assert_eq!(paths, vec!["parent"]);
    }

    #[test]
    fn apply_surfaces_invalid_relation() {
        let config = AuditConfig::parse(
            r#"
            [tracked.Child]
            relations = ["sibling"]
            "#,
        )
        .unwrap();

        let err = config.apply(&mut registry()).unwrap_err();
        assert!(matches!(err, AuditrailError::InvalidRelation { .. }));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let err = AuditConfig::parse("tracked = 3").unwrap_err();
        assert!(matches!(err, AuditrailError::InvalidConfig { .. }));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = AuditConfig::load(Path::new("/nonexistent/audit.toml")).unwrap_err();
        assert!(matches!(err, AuditrailError::InvalidConfig { .. }));
    }
}
