use sea_orm_migration::prelude::*;

pub mod v1_18_1_email_body_synced;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(v1_18_1_email_body_synced::Migration)]
    }
}
