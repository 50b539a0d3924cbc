use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded PDFs
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Upper bound on a request body, enforced by the router
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    "data/docvault.db".to_string()
}

fn default_upload_dir() -> String {
    "data/uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| env::var(key).ok());
        config.ensure_directories()?;
        Ok(config)
    }

    /// Load configuration from config.toml
    fn load_from_file() -> anyhow::Result<Self> {
        let config_paths = ["config.toml", "data/config.toml"];

        for path in config_paths {
            if Path::new(path).exists() {
                let content = fs::read_to_string(path)?;
                let config: Config = toml::from_str(&content)?;
                tracing::info!("Loaded configuration from {}", path);
                return Ok(config);
            }
        }

        tracing::info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Apply overrides in the form DV_CONF_<SECTION>_<KEY>.
    /// Values that fail to parse are ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DV_CONF_SERVER_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("DV_CONF_SERVER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }

        if let Some(val) = lookup("DV_CONF_DATABASE_PATH") {
            self.database.path = val;
        }

        if let Some(val) = lookup("DV_CONF_STORAGE_UPLOAD_DIR") {
            if !val.trim().is_empty() {
                self.storage.upload_dir = val;
            }
        }
        if let Some(val) = lookup("DV_CONF_STORAGE_MAX_UPLOAD_BYTES") {
            if let Ok(bytes) = val.parse() {
                self.storage.max_upload_bytes = bytes;
            }
        }
    }

    /// Ensure required directories exist
    fn ensure_directories(&self) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(&self.database.path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::create_dir_all(&self.storage.upload_dir)?;

        Ok(())
    }
}
