use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PRICECAST_CONFIG";
pub const MODEL_PATH_ENV: &str = "PRICECAST_MODEL_PATH";

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ModelConfig {
    /// Path to the JSON artifact holding the fitted model and scaler.
    pub path: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub json_logs: bool,
    #[serde(default = "default_true")]
    pub metrics: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            metrics: true,
        }
    }
}

fn default_port() -> u16 {
    5050
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("invalid configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Reads the file named by `PRICECAST_CONFIG` (default `config.yaml`),
    /// then applies the `PRICECAST_MODEL_PATH` override.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.yaml".to_string());
        let mut config = Self::from_file(&path)?;
        if let Ok(model_path) = std::env::var(MODEL_PATH_ENV) {
            config.model.path = PathBuf::from(model_path);
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
