use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    association::AssociationTargetResolver,
    data_type::{self, DataType, DataTypeRegistry},
    definition::{EntityDefinitionConfig, EntityDefinitionFieldConfig},
    error::{MetadataError, MetadataResult},
    metadata::{AssociationMetadata, EntityMetadata, FieldMetadata, MetaPropertyMetadata},
    property_path::{PropertyPathResolver, TargetAction},
    relation::RelationType,
};

/// Builds metadata records from entity definitions.
#[derive(Clone)]
pub struct MetadataFactory {
    property_paths: Arc<dyn PropertyPathResolver>,
    data_types: Arc<DataTypeRegistry>,
    association_targets: Arc<dyn AssociationTargetResolver>,
    strict_association_data_type: bool,
}

impl MetadataFactory {
    pub fn new(
        property_paths: Arc<dyn PropertyPathResolver>,
        data_types: Arc<DataTypeRegistry>,
        association_targets: Arc<dyn AssociationTargetResolver>,
    ) -> Self {
        Self {
            property_paths,
            data_types,
            association_targets,
            strict_association_data_type: false,
        }
    }

    /// Fail instead of falling back to `string` when an association's data
    /// type cannot be taken from a single target identifier.
    pub fn with_strict_association_data_type(mut self, strict: bool) -> Self {
        self.strict_association_data_type = strict;
        self
    }

    pub fn create_object_metadata(
        &self,
        entity_class: &str,
        config: &EntityDefinitionConfig,
    ) -> EntityMetadata {
        EntityMetadata::new(entity_class, config.identifier_field_names().to_vec())
    }

    pub fn add_meta_property<'a>(
        &self,
        entity_metadata: &'a mut EntityMetadata,
        entity_class: &str,
        field_name: &str,
        field: &EntityDefinitionFieldConfig,
        target_action: TargetAction,
    ) -> MetadataResult<&'a MetaPropertyMetadata> {
        let property_path = self.property_paths.resolve(field_name, field, target_action);
        let data_type =
            self.data_types
                .assert_data_type(field.data_type.as_ref(), entity_class, field_name)?;

        debug!(entity = entity_class, field = field_name, %data_type, "meta property");
        Ok(entity_metadata.add_meta_property(MetaPropertyMetadata::new(
            field_name,
            property_path,
            data_type,
        )))
    }

    pub fn add_field<'a>(
        &self,
        entity_metadata: &'a mut EntityMetadata,
        entity_class: &str,
        field_name: &str,
        field: &EntityDefinitionFieldConfig,
        target_action: TargetAction,
    ) -> MetadataResult<&'a FieldMetadata> {
        let property_path = self.property_paths.resolve(field_name, field, target_action);
        let data_type =
            self.data_types
                .assert_data_type(field.data_type.as_ref(), entity_class, field_name)?;
        let is_nullable = !entity_metadata.is_identifier_field(field_name);

        debug!(entity = entity_class, field = field_name, %data_type, is_nullable, "field");
        Ok(entity_metadata.add_field(FieldMetadata::new(
            field_name,
            property_path,
            data_type,
            is_nullable,
        )))
    }

    /// `target_class` overrides the target configured on the field.
    pub fn add_association<'a>(
        &self,
        entity_metadata: &'a mut EntityMetadata,
        entity_class: &str,
        field_name: &str,
        field: &EntityDefinitionFieldConfig,
        target_action: TargetAction,
        target_class: Option<&str>,
    ) -> MetadataResult<&'a AssociationMetadata> {
        let association = self.build_association(
            entity_class,
            field_name,
            field,
            target_action,
            target_class,
        )?;

        debug!(
            entity = entity_class,
            field = field_name,
            target_class = association.target_class_name(),
            association_type = %association.association_type(),
            "association"
        );
        Ok(entity_metadata.add_association(association))
    }

    fn build_association(
        &self,
        entity_class: &str,
        field_name: &str,
        field: &EntityDefinitionFieldConfig,
        target_action: TargetAction,
        target_class: Option<&str>,
    ) -> MetadataResult<AssociationMetadata> {
        let target_class = target_class
            .filter(|class| !class.is_empty())
            .or(field.target_class.as_deref())
            .unwrap_or_default();
        let property_path = self.property_paths.resolve(field_name, field, target_action);
        let is_collection = field.is_collection_valued_association();

        let association = match field.data_type.as_ref() {
            None => AssociationMetadata::new(
                field_name,
                property_path,
                target_class,
                RelationType::for_collection(is_collection),
                is_collection,
                field.collapse,
            )
            .with_data_type(self.association_data_type(
                entity_class,
                field_name,
                target_class,
                field,
            )?)
            .with_acceptable_target_class_names(named_class(target_class)),

            Some(DataType::ExtendedAssociation {
                association_type,
                association_kind,
            }) => {
                let targets = self.association_targets.targets(
                    entity_class,
                    *association_type,
                    association_kind.as_deref(),
                );
                AssociationMetadata::new(
                    field_name,
                    property_path,
                    target_class,
                    *association_type,
                    is_collection,
                    field.collapse,
                )
                .with_data_type(self.association_data_type(
                    entity_class,
                    field_name,
                    target_class,
                    field,
                )?)
                .with_acceptable_target_class_names(targets.into_keys())
            }

            Some(DataType::ExtendedInverseAssociation {
                source_class,
                association_type,
                association_kind,
            }) => {
                let mut targets = self.association_targets.targets(
                    source_class,
                    *association_type,
                    association_kind.as_deref(),
                );
                let inverse_field = targets.remove(entity_class).ok_or_else(|| {
                    MetadataError::inverse_target_not_found(entity_class, source_class, field_name)
                })?;
                AssociationMetadata::new(
                    field_name,
                    property_path,
                    source_class.as_str(),
                    association_type.underlying().reverse(),
                    is_collection,
                    field.collapse,
                )
                .with_acceptable_target_class_names([source_class.as_str()])
                .with_inverse_association_field(inverse_field)
            }

            Some(DataType::Plain(data_type)) => AssociationMetadata::new(
                field_name,
                property_path,
                target_class,
                RelationType::for_collection(is_collection),
                is_collection,
                field.collapse,
            )
            .with_data_type(Some(data_type.clone()))
            .with_acceptable_target_class_names(named_class(target_class)),
        };

        Ok(association)
    }

    /// Data type of the target entity's single identifier field.
    fn association_data_type(
        &self,
        entity_class: &str,
        field_name: &str,
        target_class: &str,
        field: &EntityDefinitionFieldConfig,
    ) -> MetadataResult<Option<String>> {
        let Some(target_entity) = field.target_entity() else {
            return Ok(None);
        };

        let identifier = match target_entity.identifier_field_names() {
            [id_field] => target_entity.field(id_field),
            _ => None,
        };

        // A resolved identifier without a declared type leaves the association untyped.
        match identifier {
            Some(id) => Ok(id.data_type.as_ref().map(ToString::to_string)),
            None if self.strict_association_data_type => {
                Err(MetadataError::AmbiguousTargetIdentifier {
                    entity_class: entity_class.to_string(),
                    field_name: field_name.to_string(),
                    target_class: target_class.to_string(),
                })
            }
            None => {
                warn!(
                    entity = entity_class,
                    field = field_name,
                    target_class,
                    "association target has no single identifier, using string data type"
                );
                Ok(Some(data_type::STRING.to_string()))
            }
        }
    }
}

/// An association without a target class accepts no class.
fn named_class(target_class: &str) -> Option<&str> {
    (!target_class.is_empty()).then_some(target_class)
}
