pub mod association;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod data_type;
pub mod db;
pub mod definition;
pub mod error;
pub mod factory;
pub mod loader;
pub mod logging;
pub mod metadata;
pub mod migration;
pub mod property_path;
pub mod relation;

pub use error::{MetadataError, MetadataResult};
pub use factory::MetadataFactory;
pub use loader::MetadataLoader;
pub use metadata::{AssociationMetadata, EntityMetadata, FieldMetadata, MetaPropertyMetadata};
