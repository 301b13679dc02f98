use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";
    const LIST_KEYS: &'static [&'static str] = &[];
    /// Optional config file (any extension `config` understands), overridden by the environment.
    const FILE_STEM: Option<&'static str> = None;

    fn load_dotenv() {
        // Load .env from crate root (falls back to current dir if missing)
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();

        let mut environment = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true);
        if !Self::LIST_KEYS.is_empty() {
            environment = environment.list_separator(",");
            for key in Self::LIST_KEYS {
                environment = environment.with_list_parse_key(key);
            }
        }

        let mut builder = config_rs::Config::builder();
        if let Some(stem) = Self::FILE_STEM {
            builder = builder.add_source(config_rs::File::with_name(stem).required(false));
        }
        let settings = builder
            .add_source(environment)
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde::Deserialize;

    use super::EnvConfig;

    const LAYER_STEM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/target/envconfig_file_layer");

    #[derive(Debug, Deserialize)]
    struct FileLayered {
        name: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    impl EnvConfig for FileLayered {
        const PREFIX: &'static str = "ENVCONFIG_FILE_LAYER_TEST";
        const FILE_STEM: Option<&'static str> = Some(LAYER_STEM);
    }

    #[test]
    fn reads_optional_config_file_beneath_environment() {
        let path = format!("{LAYER_STEM}.toml");
        if let Some(dir) = Path::new(&path).parent() {
            std::fs::create_dir_all(dir).expect("target dir should exist");
        }
        std::fs::write(&path, "name = \"from-file\"\ntags = [\"a\", \"b\"]\n")
            .expect("config file should be written");

        let cfg = FileLayered::from_env().expect("file layer should load");
        assert_eq!(cfg.name, "from-file");
        assert_eq!(cfg.tags, vec!["a", "b"]);

        std::fs::remove_file(&path).expect("config file should be removed");
    }
}
