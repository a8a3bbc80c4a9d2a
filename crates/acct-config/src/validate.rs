//! Configuration validation logic.

use std::net::SocketAddr;

use crate::Config;
use crate::loader::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];
const LOG_OUTPUTS: [&str; 2] = ["stdout", "stderr"];

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.listen.trim().is_empty() {
        return Err(ConfigError::Validation("server.listen is empty".into()));
    }
    if config.server.listen.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "server.listen is not a socket address: {}",
            config.server.listen
        )));
    }
    if config.storage.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("storage.data_dir is empty".into()));
    }
    if let Some(listen) = &config.metrics.listen
        && listen.parse::<SocketAddr>().is_err()
    {
        return Err(ConfigError::Validation(format!(
            "metrics.listen is not a socket address: {listen}"
        )));
    }
    if let Some(addr) = &config.metrics.listen
        && addr == &config.server.listen
    {
        return Err(ConfigError::Validation(
            "metrics.listen must differ from server.listen".into(),
        ));
    }
    check_one_of("logging.level", config.logging.level.as_deref(), &LOG_LEVELS)?;
    check_one_of("logging.format", config.logging.format.as_deref(), &LOG_FORMATS)?;
    check_one_of("logging.output", config.logging.output.as_deref(), &LOG_OUTPUTS)?;
    Ok(())
}

fn check_one_of(key: &str, value: Option<&str>, allowed: &[&str]) -> Result<(), ConfigError> {
    match value {
        Some(v) if !allowed.contains(&v.to_ascii_lowercase().as_str()) => Err(
            ConfigError::Validation(format!("{key} must be one of: {allowed:?}")),
        ),
        _ => Ok(()),
    }
}
