//! Metadata tree handed to the API serialization layer.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::relation::RelationType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    class_name: String,
    identifier_field_names: Vec<String>,
    fields: BTreeMap<String, FieldMetadata>,
    meta_properties: BTreeMap<String, MetaPropertyMetadata>,
    associations: BTreeMap<String, AssociationMetadata>,
}

impl EntityMetadata {
    pub fn new(class_name: impl Into<String>, identifier_field_names: Vec<String>) -> Self {
        Self {
            class_name: class_name.into(),
            identifier_field_names,
            fields: BTreeMap::new(),
            meta_properties: BTreeMap::new(),
            associations: BTreeMap::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn identifier_field_names(&self) -> &[String] {
        &self.identifier_field_names
    }

    pub fn is_identifier_field(&self, name: &str) -> bool {
        self.identifier_field_names.iter().any(|id| id == name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldMetadata> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.get(name)
    }

    pub fn meta_properties(&self) -> &BTreeMap<String, MetaPropertyMetadata> {
        &self.meta_properties
    }

    pub fn meta_property(&self, name: &str) -> Option<&MetaPropertyMetadata> {
        self.meta_properties.get(name)
    }

    pub fn associations(&self) -> &BTreeMap<String, AssociationMetadata> {
        &self.associations
    }

    pub fn association(&self, name: &str) -> Option<&AssociationMetadata> {
        self.associations.get(name)
    }

    /// Registers `field`, replacing any field with the same name.
    pub fn add_field(&mut self, field: FieldMetadata) -> &FieldMetadata {
        let name = field.name.clone();
        self.fields.insert(name.clone(), field);
        &self.fields[&name]
    }

    pub fn add_meta_property(
        &mut self,
        meta_property: MetaPropertyMetadata,
    ) -> &MetaPropertyMetadata {
        let name = meta_property.name.clone();
        self.meta_properties.insert(name.clone(), meta_property);
        &self.meta_properties[&name]
    }

    pub fn add_association(&mut self, association: AssociationMetadata) -> &AssociationMetadata {
        let name = association.name.clone();
        self.associations.insert(name.clone(), association);
        &self.associations[&name]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    name: String,
    property_path: String,
    data_type: String,
    is_nullable: bool,
}

impl FieldMetadata {
    pub fn new(
        name: impl Into<String>,
        property_path: impl Into<String>,
        data_type: impl Into<String>,
        is_nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            property_path: property_path.into(),
            data_type: data_type.into(),
            is_nullable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPropertyMetadata {
    name: String,
    property_path: String,
    data_type: String,
}

impl MetaPropertyMetadata {
    pub fn new(
        name: impl Into<String>,
        property_path: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            property_path: property_path.into(),
            data_type: data_type.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationMetadata {
    name: String,
    property_path: String,
    target_class_name: String,
    acceptable_target_class_names: BTreeSet<String>,
    association_type: RelationType,
    is_collection: bool,
    is_nullable: bool,
    is_collapsed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inverse_association_field: Option<String>,
}

impl AssociationMetadata {
    /// Associations are always nullable at this layer.
    pub fn new(
        name: impl Into<String>,
        property_path: impl Into<String>,
        target_class_name: impl Into<String>,
        association_type: RelationType,
        is_collection: bool,
        is_collapsed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            property_path: property_path.into(),
            target_class_name: target_class_name.into(),
            acceptable_target_class_names: BTreeSet::new(),
            association_type,
            is_collection,
            is_nullable: true,
            is_collapsed,
            data_type: None,
            inverse_association_field: None,
        }
    }

    pub fn with_acceptable_target_class_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acceptable_target_class_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_data_type(mut self, data_type: Option<String>) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_inverse_association_field(mut self, field_name: impl Into<String>) -> Self {
        self.inverse_association_field = Some(field_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    pub fn target_class_name(&self) -> &str {
        &self.target_class_name
    }

    pub fn acceptable_target_class_names(&self) -> &BTreeSet<String> {
        &self.acceptable_target_class_names
    }

    pub fn association_type(&self) -> RelationType {
        self.association_type
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    pub fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    pub fn inverse_association_field(&self) -> Option<&str> {
        self.inverse_association_field.as_deref()
    }
}
