//! Declarative entity definitions the metadata is generated from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data_type::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum TargetType {
    #[default]
    #[serde(rename = "to-one")]
    ToOne,
    #[serde(rename = "to-many")]
    ToMany,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct EntityDefinitionConfig {
    pub identifier_field_names: Vec<String>,
    /// Kept in declaration order; generation walks fields in this order.
    pub fields: IndexMap<String, EntityDefinitionFieldConfig>,
}

impl EntityDefinitionConfig {
    pub fn new(identifier_field_names: Vec<String>) -> Self {
        Self {
            identifier_field_names,
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        field: EntityDefinitionFieldConfig,
    ) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&EntityDefinitionFieldConfig> {
        self.fields.get(name)
    }

    pub fn identifier_field_names(&self) -> &[String] {
        &self.identifier_field_names
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct EntityDefinitionFieldConfig {
    pub data_type: Option<DataType>,
    pub property_path: Option<String>,
    pub target_class: Option<String>,
    pub target_type: Option<TargetType>,
    pub target_entity: Option<Box<EntityDefinitionConfig>>,
    pub collapse: bool,
    pub meta_property: bool,
    pub exclude: bool,
}

impl EntityDefinitionFieldConfig {
    pub fn typed(data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            ..Self::default()
        }
    }

    pub fn association(target_class: impl Into<String>, target_type: TargetType) -> Self {
        Self {
            target_class: Some(target_class.into()),
            target_type: Some(target_type),
            ..Self::default()
        }
    }

    pub fn with_target_entity(mut self, target_entity: EntityDefinitionConfig) -> Self {
        self.target_entity = Some(Box::new(target_entity));
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_property_path(mut self, property_path: impl Into<String>) -> Self {
        self.property_path = Some(property_path.into());
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.collapse = true;
        self
    }

    pub fn is_collection_valued_association(&self) -> bool {
        matches!(self.target_type, Some(TargetType::ToMany))
    }

    pub fn target_entity(&self) -> Option<&EntityDefinitionConfig> {
        self.target_entity.as_deref()
    }

    /// Whether this field describes a relationship rather than a scalar.
    pub fn is_association(&self) -> bool {
        self.target_class.is_some()
            || self.target_entity.is_some()
            || self.data_type.as_ref().is_some_and(DataType::is_extended)
    }
}
