use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;

use entity_api_metadata::{
    bootstrap::build_loader, catalog::DefinitionCatalog, config::AppConfig, db::connection,
    logging::init_tracing, migration::Migrator, property_path::TargetAction,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the API metadata of entities as JSON
    Describe {
        /// JSON file with entity definitions and association targets
        definitions: PathBuf,
        /// Entity class to describe (all entities when omitted)
        #[arg(long)]
        entity: Option<String>,
        /// Target action (overrides APP_METADATA__TARGET_ACTION)
        #[arg(long)]
        action: Option<TargetAction>,
    },
    /// Apply schema migrations to the configured database
    Migrate,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("api-metadata failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging)?;

    match cli.command {
        Commands::Describe {
            definitions,
            entity,
            action,
        } => {
            let catalog = DefinitionCatalog::from_path(&definitions)?;
            let loader = build_loader(&cfg.metadata, &catalog.associations)?;
            let action = action.unwrap_or(cfg.metadata.target_action);

            let output = match entity {
                Some(entity) => {
                    serde_json::to_string_pretty(&catalog.describe(&loader, &entity, action)?)?
                }
                None => serde_json::to_string_pretty(&catalog.describe_all(&loader, action)?)?,
            };
            println!("{output}");
        }
        Commands::Migrate => {
            let database = cfg
                .database
                .as_ref()
                .context("database config is required to migrate (set APP_DATABASE__URL)")?;
            let db = connection::connect(database).await?;
            Migrator::up(&db, None).await?;
            tracing::info!("migrations applied");
        }
    }
    Ok(())
}
