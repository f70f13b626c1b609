use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tracing::{info, warn};

/// Optional file with overrides for the environment settings
pub const CONFIG_FILE: &str = "config/ajanvaraus.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEZONE: &str = "Europe/Helsinki";
pub const DEFAULT_LOCALE: &str = "fi";
pub const DEFAULT_FALLBACK_LOCALE: &str = "en";

/// Main configuration structure for the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind the HTTP server to
    pub host: String,
    /// Port to bind the HTTP server to
    pub port: u16,
    /// Time zone in which business hours are observed
    pub timezone: String,
    /// Locale for messages when a request does not ask for one
    pub locale: String,
    /// Locale used when a message is missing from the requested one
    pub default_locale: String,
}

/// Settings that `config/ajanvaraus.toml` may override
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    timezone: Option<String>,
    locale: Option<String>,
    default_locale: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            default_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_env()?;

        if Path::new(CONFIG_FILE).exists() {
            info!("Loading overrides from {}", CONFIG_FILE);
            let content = fs::read_to_string(CONFIG_FILE)?;
            config = config.merge_toml(&content)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read settings from environment variables, falling back to defaults
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(port) => port.parse::<u16>().map_err(|_| env_error("PORT"))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            timezone: env::var("TIMEZONE").unwrap_or(defaults.timezone),
            locale: env::var("APP_LOCALE").unwrap_or(defaults.locale),
            default_locale: env::var("DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
        })
    }

    /// Apply the values present in a TOML document on top of this config
    pub fn merge_toml(self, content: &str) -> AppResult<Self> {
        let file = toml::from_str::<FileConfig>(content)?;
        Ok(Self {
            host: file.host.unwrap_or(self.host),
            port: file.port.unwrap_or(self.port),
            timezone: file.timezone.unwrap_or(self.timezone),
            locale: file.locale.unwrap_or(self.locale),
            default_locale: file.default_locale.unwrap_or(self.default_locale),
        })
    }

    /// Check that the settings can be used
    pub fn validate(&self) -> AppResult<()> {
        self.tz()?;
        self.socket_addr()?;
        if self.locale.trim().is_empty() || self.default_locale.trim().is_empty() {
            return Err(config_error("Locales must not be empty"));
        }
        if self.port == 0 {
            warn!("PORT is 0, the OS will pick a free port");
        }
        Ok(())
    }

    /// Parsed time zone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown time zone '{}'", self.timezone)))
    }

    /// Address for the HTTP listener
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|_| config_error(&format!("Invalid host address '{}'", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Helsinki);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_merge_toml() {
        let config = Config::default()
            .merge_toml("port = 8080\nlocale = \"en\"")
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.locale, "en");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);

        // An empty file changes nothing
        assert_eq!(Config::default().merge_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_merge_toml_invalid() {
        assert!(matches!(
            Config::default().merge_toml("port = \"eighty\""),
            Err(crate::error::Error::Serialization(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let config = Config {
            timezone: "Mars/Olympus".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(crate::error::Error::Config(_))));

        let config = Config {
            host: "localhost:80".to_string(),
            ..Config::default()
        };
        assert!(config.socket_addr().is_err());

        let config = Config {
            locale: " ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
