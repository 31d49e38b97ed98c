use std::{env, fs};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::manager_owm::DEFAULT_BASE_URL;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct OpenWeatherMap {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub web_server: WebServer,
    pub open_weather_map: OpenWeatherMap,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_suggestion_limit() -> u8 { 5 }

/// Loads the configuration and starts logging according to it
///
/// The configuration file is given as first program argument, by the `CONFIG_PATH`
/// environment variable or is otherwise expected as `config.toml` in the working directory.
/// A non-empty `OWM_API_KEY` environment variable replaces the api key from the file.
pub fn config() -> Result<Config, ConfigError> {
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or_else(|| "config.toml".to_string());

    let document = fs::read_to_string(&config_path)?;
    let api_key = env::var("OWM_API_KEY").ok();
    let config = parse_config(&document, api_key)?;

    setup_logger(&config.general.log_path, &config.general.log_level, config.general.log_to_stdout)?;

    Ok(config)
}

/// Parses a toml configuration document
///
/// # Arguments
///
/// * 'document' - the configuration document
/// * 'api_key' - api key overriding the one in the document, ignored if empty
fn parse_config(document: &str, api_key: Option<String>) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(document)?;

    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        config.open_weather_map.api_key = key;
    }
    if config.open_weather_map.api_key.is_empty() {
        return Err(ConfigError::from("no OpenWeatherMap api key configured"));
    }

    Ok(config)
}
