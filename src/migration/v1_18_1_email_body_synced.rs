//! Tracks whether an email body has been synchronized and drops the process
//! that used to synchronize bodies after each mailbox sync.

use sea_orm_migration::prelude::*;
use tracing::info;

pub const EMAIL_TABLE: &str = "oro_email";
pub const BODY_SYNCED_COLUMN: &str = "body_synced";
pub const PROCESS_DEFINITION_TABLE: &str = "oro_process_definition";
pub const BODY_SYNC_PROCESS_NAME: &str = "sync_email_body_after_email_synchronize";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.alter_table(add_body_synced_column()).await?;

        let result = manager
            .get_connection()
            .execute(&delete_body_sync_process())
            .await?;
        info!(
            process = BODY_SYNC_PROCESS_NAME,
            rows = result.rows_affected(),
            "removed obsolete process definition"
        );
        Ok(())
    }
}

pub fn add_body_synced_column() -> TableAlterStatement {
    Table::alter()
        .table(Alias::new(EMAIL_TABLE))
        .add_column(
            ColumnDef::new(Alias::new(BODY_SYNCED_COLUMN))
                .boolean()
                .null()
                .default(false),
        )
        .to_owned()
}

pub fn delete_body_sync_process() -> DeleteStatement {
    Query::delete()
        .from_table(Alias::new(PROCESS_DEFINITION_TABLE))
        .and_where(Expr::col(Alias::new("name")).eq(BODY_SYNC_PROCESS_NAME))
        .to_owned()
}
