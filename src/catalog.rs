//! A file of entity definitions plus the extended association targets they use.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    association::AssociationTargetConfig,
    definition::EntityDefinitionConfig,
    loader::MetadataLoader,
    metadata::EntityMetadata,
    property_path::TargetAction,
};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct DefinitionCatalog {
    pub entities: BTreeMap<String, EntityDefinitionConfig>,
    pub associations: Vec<AssociationTargetConfig>,
}

impl DefinitionCatalog {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse entity definitions")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid definitions in {}", path.display()))
    }

    pub fn entity(&self, entity_class: &str) -> Option<&EntityDefinitionConfig> {
        self.entities.get(entity_class)
    }

    pub fn describe(
        &self,
        loader: &MetadataLoader,
        entity_class: &str,
        target_action: TargetAction,
    ) -> Result<EntityMetadata> {
        let config = self
            .entity(entity_class)
            .with_context(|| format!("entity not defined: {entity_class}"))?;
        loader
            .load(entity_class, config, target_action)
            .with_context(|| format!("failed to build metadata for {entity_class}"))
    }

    pub fn describe_all(
        &self,
        loader: &MetadataLoader,
        target_action: TargetAction,
    ) -> Result<BTreeMap<String, EntityMetadata>> {
        self.entities
            .keys()
            .map(|entity_class| {
                self.describe(loader, entity_class, target_action)
                    .map(|metadata| (entity_class.clone(), metadata))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DefinitionCatalog;
    use crate::{
        bootstrap::build_loader, config::MetadataConfig, property_path::TargetAction,
        relation::RelationType,
    };

    const CATALOG: &str = r#"{
        "entities": {
            "Note": {
                "identifier_field_names": ["id"],
                "fields": {
                    "id": { "data_type": "integer" },
                    "activityTargets": {
                        "data_type": "association:manyToMany:activity",
                        "target_type": "to-many"
                    }
                }
            },
            "Contact": {
                "identifier_field_names": ["id"],
                "fields": {
                    "id": { "data_type": "guid" },
                    "notes": {
                        "data_type": "inverseAssociation:Note:manyToMany:activity",
                        "target_type": "to-many"
                    }
                }
            }
        },
        "associations": [
            {
                "owner_class": "Note",
                "association_type": "manyToMany",
                "association_kind": "activity",
                "target_class": "Contact",
                "field_name": "contact_8d93c122"
            }
        ]
    }"#;

    #[test]
    fn describes_every_entity() {
        let catalog = DefinitionCatalog::from_json(CATALOG).expect("catalog should parse");
        let loader = build_loader(&MetadataConfig::default(), &catalog.associations)
            .expect("loader should build");

        let described = catalog
            .describe_all(&loader, TargetAction::Get)
            .expect("all entities should describe");

        let notes = described["Contact"].association("notes").expect("notes association");
        assert_eq!(notes.inverse_association_field(), Some("contact_8d93c122"));
        assert_eq!(notes.association_type(), RelationType::ManyToMany);

        let targets = described["Note"]
            .association("activityTargets")
            .expect("activity targets association");
        assert!(targets.acceptable_target_class_names().contains("Contact"));
    }

    #[test]
    fn unknown_entity_is_reported() {
        let catalog = DefinitionCatalog::from_json(CATALOG).expect("catalog should parse");
        let loader = build_loader(&MetadataConfig::default(), &catalog.associations)
            .expect("loader should build");

        let err = catalog
            .describe(&loader, "Lead", TargetAction::Get)
            .expect_err("undefined entity should fail");
        assert_eq!(err.to_string(), "entity not defined: Lead");
    }
}
