use std::sync::Arc;

use crate::{
    association::{AssociationRegistry, AssociationTargetConfig},
    config::MetadataConfig,
    data_type::DataTypeRegistry,
    factory::MetadataFactory,
    loader::MetadataLoader,
    property_path::ConfigPropertyPathResolver,
};

pub fn build_data_types(cfg: &MetadataConfig) -> DataTypeRegistry {
    let mut data_types = DataTypeRegistry::default();
    for name in &cfg.extra_data_types {
        data_types.add_type(name.trim());
    }
    data_types
}

pub fn build_loader(
    cfg: &MetadataConfig,
    associations: &[AssociationTargetConfig],
) -> anyhow::Result<MetadataLoader> {
    let registry = AssociationRegistry::from_configs(associations)?;
    let factory = MetadataFactory::new(
        Arc::new(ConfigPropertyPathResolver),
        Arc::new(build_data_types(cfg)),
        Arc::new(registry),
    )
    .with_strict_association_data_type(cfg.strict_association_data_type);
    Ok(MetadataLoader::new(factory))
}
