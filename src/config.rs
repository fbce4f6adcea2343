use std::path::Path;

use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "blogly.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub template_dir: String,
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database: DatabaseConfig::default(),
            template_dir: "website/templates".to_string(),
            static_dir: "website/static".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: "website/db/blogly.db".to_string(),
            pool_size: 10,
        }
    }
}

impl AppConfig {
    /// Reads `$BLOGLY_CONFIG` (or `blogly.toml`), falling back to defaults
    /// when the file does not exist. `$BLOGLY_DATABASE` overrides the db path.
    pub fn load() -> Result<Self, String> {
        let path =
            std::env::var("BLOGLY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        if let Ok(db) = std::env::var("BLOGLY_DATABASE") {
            if !db.is_empty() {
                config.database.path = db;
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::parse(&raw).map_err(|e| format!("invalid {}: {}", path.display(), e))
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
