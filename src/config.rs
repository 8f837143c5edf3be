//! Environment-driven configuration for the two binaries

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
}

/// Settings for the HTTP score service
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub db_path: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var("EGETRACK_DB_PATH").unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            format!("{home}/.egetrack/egetrack.db")
        });

        let port: u16 = std::env::var("EGETRACK_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self { db_path, port }
    }
}

/// Settings for the Telegram bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub api_base_url: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token =
            std::env::var("BOT_TOKEN").map_err(|_| ConfigError::Missing("BOT_TOKEN"))?;

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        Ok(Self {
            bot_token,
            api_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-global, so the cases run in one test.
    #[test]
    fn test_config_defaults_and_overrides() {
        std::env::remove_var("EGETRACK_DB_PATH");
        std::env::remove_var("EGETRACK_PORT");
        std::env::set_var("HOME", "/home/egetrack-test");

        let config = ApiConfig::from_env();
        assert_eq!(config.db_path, "/home/egetrack-test/.egetrack/egetrack.db");
        assert_eq!(config.port, 8000);

        std::env::set_var("EGETRACK_DB_PATH", "/var/lib/egetrack.db");
        std::env::set_var("EGETRACK_PORT", "9100");
        let config = ApiConfig::from_env();
        assert_eq!(config.db_path, "/var/lib/egetrack.db");
        assert_eq!(config.port, 9100);

        // Unparseable port falls back to the default
        std::env::set_var("EGETRACK_PORT", "not-a-port");
        assert_eq!(ApiConfig::from_env().port, 8000);

        std::env::remove_var("BOT_TOKEN");
        std::env::remove_var("API_BASE_URL");
        assert!(matches!(
            BotConfig::from_env(),
            Err(ConfigError::Missing("BOT_TOKEN"))
        ));

        std::env::set_var("BOT_TOKEN", "123:ABC");
        let config = BotConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "123:ABC");
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }
}
