use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::relation::RelationType;

/// Resolves the acceptable targets of an extended association.
///
/// Returns a map of target class name to the field on the owning class that
/// holds the association for that target.
pub trait AssociationTargetResolver: Send + Sync {
    fn targets(
        &self,
        entity_class: &str,
        association_type: RelationType,
        association_kind: Option<&str>,
    ) -> BTreeMap<String, String>;
}

/// One declared target of an extended association.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssociationTargetConfig {
    pub owner_class: String,
    pub association_type: RelationType,
    #[serde(default)]
    pub association_kind: Option<String>,
    pub target_class: String,
    pub field_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AssociationKey {
    owner_class: String,
    association_type: RelationType,
    association_kind: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AssociationRegistry {
    associations: HashMap<AssociationKey, BTreeMap<String, String>>,
}

impl AssociationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configs<'a, I>(configs: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a AssociationTargetConfig>,
    {
        let mut registry = Self::new();
        for config in configs {
            registry.add_target(
                config.owner_class.clone(),
                config.association_type,
                config.association_kind.as_deref(),
                config.target_class.clone(),
                config.field_name.clone(),
            )?;
        }
        Ok(registry)
    }

    pub fn with_target(
        mut self,
        owner_class: impl Into<String>,
        association_type: RelationType,
        association_kind: Option<&str>,
        target_class: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Result<Self> {
        self.add_target(
            owner_class,
            association_type,
            association_kind,
            target_class,
            field_name,
        )?;
        Ok(self)
    }

    pub fn add_target(
        &mut self,
        owner_class: impl Into<String>,
        association_type: RelationType,
        association_kind: Option<&str>,
        target_class: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Result<()> {
        let key = AssociationKey {
            owner_class: owner_class.into(),
            association_type,
            association_kind: association_kind.map(str::to_string),
        };
        let target_class = target_class.into();
        let targets = self.associations.entry(key).or_default();
        if targets.contains_key(&target_class) {
            bail!("association target already registered: {}", target_class);
        }
        targets.insert(target_class, field_name.into());
        Ok(())
    }
}

impl AssociationTargetResolver for AssociationRegistry {
    fn targets(
        &self,
        entity_class: &str,
        association_type: RelationType,
        association_kind: Option<&str>,
    ) -> BTreeMap<String, String> {
        let key = AssociationKey {
            owner_class: entity_class.to_string(),
            association_type,
            association_kind: association_kind.map(str::to_string),
        };
        self.associations.get(&key).cloned().unwrap_or_default()
    }
}
