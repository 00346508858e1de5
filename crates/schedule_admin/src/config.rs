/// Process configuration, read once at startup
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for the HTTP server, the database file and logging.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address to bind to
    pub address: String,
    pub port: u16,
    /// SQLite database file; its directory is created if missing
    pub database_path: PathBuf,
    /// File that log output is appended to, next to the console output
    pub log_file: PathBuf,
    /// Default filter when `RUST_LOG` is not set, e.g. "debug" or "info"
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            address: "127.0.0.1".to_string(),
            port: 6060,
            database_path: PathBuf::from("BD/YourBD.db"),
            log_file: PathBuf::from("server.log"),
            log_level: "debug".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - The configuration, defaults filled in
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// `address:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
