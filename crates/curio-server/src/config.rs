//! Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Server configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum concurrent WebSocket subscribers.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Items listed at startup.
    #[serde(default = "default_seed")]
    pub seed: Vec<SeedItem>,
}

/// One item to list at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Starting price as a decimal string (e.g. `"500.0"`).
    pub price: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> usize {
    64
}

fn default_seed() -> Vec<SeedItem> {
    vec![SeedItem {
        id: "item1".to_string(),
        name: "Vintage Synthesizer".to_string(),
        description: "Analog polysynth, serviced, original case".to_string(),
        price: "500.0".to_string(),
    }]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            max_connections: default_max_connections(),
            seed: default_seed(),
        }
    }
}

impl ServerConfig {
    /// Load configuration, falling back to defaults when the file is
    /// missing.
    pub fn load(config_path: &str) -> AppResult<Self> {
        if Path::new(config_path).exists() {
            Self::from_file(config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seed_the_demo_item() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed.len(), 1);
        assert_eq!(config.seed[0].id, "item1");
        assert_eq!(config.seed[0].price, "500.0");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            port = 9000
            max_connections = 5

            [[seed]]
            id = "card-7"
            name = "Rookie Card"
            price = "120"
        "#;
        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.seed[0].name, "Rookie Card");
        assert_eq!(config.seed[0].description, "");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ServerConfig::load("/nonexistent/curio.toml").unwrap();
        assert_eq!(config.port, ServerConfig::default().port);
    }
}
