use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// OpenAI-compatible chat-completions endpoint.
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShipreadyConfig {
    pub data_dir: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
}

impl Default for ShipreadyConfig {
    fn default() -> Self {
        Self {
            data_dir: "shipready_data".to_string(),
            server: ServerConfig::default(),
            oracle: OracleConfig::default(),
        }
    }
}

/// Layered config: built-in defaults, then `shipready.toml`, then
/// `SHIPREADY_*` environment variables (nested keys split on `__`,
/// e.g. `SHIPREADY_ORACLE__API_KEY`).
pub fn load_config() -> Result<ShipreadyConfig, figment::Error> {
    let figment = Figment::from(Serialized::defaults(ShipreadyConfig::default()))
        .merge(Toml::file("shipready.toml"))
        .merge(Env::prefixed("SHIPREADY_").split("__"));

    let config: ShipreadyConfig = figment.extract()?;

    if config.data_dir.trim().is_empty() {
        return Err(figment::Error::from("data_dir must be set".to_string()));
    }

    Ok(config)
}
