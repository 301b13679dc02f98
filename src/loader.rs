use tracing::{debug, info};

use crate::{
    definition::EntityDefinitionConfig,
    error::MetadataResult,
    factory::MetadataFactory,
    metadata::EntityMetadata,
    property_path::TargetAction,
};

/// Generates the complete metadata of one entity.
#[derive(Clone)]
pub struct MetadataLoader {
    factory: MetadataFactory,
}

impl MetadataLoader {
    pub fn new(factory: MetadataFactory) -> Self {
        Self { factory }
    }

    /// Either every non-excluded field is described or an error is returned.
    pub fn load(
        &self,
        entity_class: &str,
        config: &EntityDefinitionConfig,
        target_action: TargetAction,
    ) -> MetadataResult<EntityMetadata> {
        let mut metadata = self.factory.create_object_metadata(entity_class, config);

        for (field_name, field) in &config.fields {
            if field.exclude {
                debug!(entity = entity_class, field = %field_name, "skipping excluded field");
                continue;
            }

            if field.meta_property {
                self.factory.add_meta_property(
                    &mut metadata,
                    entity_class,
                    field_name,
                    field,
                    target_action,
                )?;
            } else if field.is_association() {
                self.factory.add_association(
                    &mut metadata,
                    entity_class,
                    field_name,
                    field,
                    target_action,
                    None,
                )?;
            } else {
                self.factory.add_field(
                    &mut metadata,
                    entity_class,
                    field_name,
                    field,
                    target_action,
                )?;
            }
        }

        info!(
            entity = entity_class,
            action = target_action.as_str(),
            fields = metadata.fields().len(),
            meta_properties = metadata.meta_properties().len(),
            associations = metadata.associations().len(),
            "entity metadata loaded"
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::MetadataLoader;
    use crate::{
        association::AssociationRegistry,
        data_type::DataTypeRegistry,
        definition::EntityDefinitionConfig,
        error::MetadataError,
        factory::MetadataFactory,
        property_path::{ConfigPropertyPathResolver, TargetAction},
        relation::RelationType,
    };

    fn loader() -> MetadataLoader {
        MetadataLoader::new(MetadataFactory::new(
            Arc::new(ConfigPropertyPathResolver),
            Arc::new(DataTypeRegistry::default()),
            Arc::new(AssociationRegistry::new()),
        ))
    }

    fn order_definition() -> EntityDefinitionConfig {
        serde_json::from_value(json!({
            "identifier_field_names": ["id"],
            "fields": {
                "id": { "data_type": "integer" },
                "status": { "data_type": "string" },
                "internalNote": { "data_type": "text", "exclude": true },
                "__title__": { "data_type": "string", "meta_property": true },
                "customer": { "target_class": "Customer", "collapse": true },
                "items": {
                    "target_class": "OrderItem",
                    "target_type": "to-many",
                    "target_entity": {
                        "identifier_field_names": ["id"],
                        "fields": { "id": { "data_type": "integer" } }
                    }
                }
            }
        }))
        .expect("order definition should deserialize")
    }

    #[test]
    fn dispatches_each_field_kind() {
        let metadata = loader()
            .load("Order", &order_definition(), TargetAction::Get)
            .expect("order metadata should load");

        assert_eq!(
            metadata.fields().keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["id", "status"]
        );
        assert!(metadata.meta_property("__title__").is_some());
        assert!(metadata.field("internalNote").is_none());

        let customer = metadata.association("customer").expect("customer association");
        assert!(customer.is_collapsed());
        assert_eq!(customer.association_type(), RelationType::ManyToOne);

        let items = metadata.association("items").expect("items association");
        assert_eq!(items.data_type(), Some("integer"));
        assert!(items.is_collection());
    }

    #[test]
    fn reports_first_failing_field_in_definition_order() {
        let definition: EntityDefinitionConfig = serde_json::from_str(
            r#"{"fields": {"zeta": {"data_type": "blob1"}, "alpha": {"data_type": "blob2"}}}"#,
        )
        .expect("definition should deserialize");

        let err = loader()
            .load("Order", &definition, TargetAction::Get)
            .expect_err("unknown types should abort the entity");
        assert_eq!(err, MetadataError::unknown_data_type("blob1", "Order", "zeta"));
    }

    #[test]
    fn fails_whole_entity_on_unknown_type() {
        let mut definition = order_definition();
        definition.fields.insert(
            "payload".to_string(),
            serde_json::from_value(json!({ "data_type": "blob" })).expect("field config"),
        );

        let err = loader()
            .load("Order", &definition, TargetAction::Get)
            .expect_err("unknown type should abort the entity");
        assert_eq!(err, MetadataError::unknown_data_type("blob", "Order", "payload"));
    }
}
