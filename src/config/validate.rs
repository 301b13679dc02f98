use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.logging.rust_log.trim().is_empty() {
        errors.push("logging.rust_log must not be empty".to_string());
    }

    for (index, data_type) in cfg.metadata.extra_data_types.iter().enumerate() {
        if data_type.trim().is_empty() {
            errors.push(format!("metadata.extra_data_types[{index}] must not be empty"));
        } else if data_type.contains(':') {
            errors.push(format!(
                "metadata.extra_data_types[{index}] ({data_type}) must not contain ':'"
            ));
        }
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.max_connections == 0 {
            errors.push("database.max_connections must be > 0".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
