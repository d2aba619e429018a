//! Application configuration management.
//!
//! Configuration is loaded once at startup, validated, and then read-only
//! for the lifetime of the process.

use serde::Deserialize;

/// Minimum length of the JWT signing secret. Startup is refused below this.
const MIN_SECRET_LEN: usize = 10;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Runtime mode (`development`, `test`, or `production`).
    #[serde(default = "default_run_mode")]
    pub run_mode: String,
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_run_mode() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in hours.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_hours: i64,
}

fn default_token_expiry() -> i64 {
    12
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later overriding earlier: `config/default`, then
    /// `config/{RUN_MODE}`, then `KHARCHA__`-prefixed environment variables
    /// with `__` separators (e.g. `KHARCHA__DATABASE__URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, or if the signing
    /// secret is shorter than the enforced minimum.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .set_override("run_mode", run_mode.clone())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KHARCHA").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates constraints not expressible through serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JWT secret is shorter than the minimum.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.jwt.secret.len() < MIN_SECRET_LEN {
            return Err(config::ConfigError::Message(format!(
                "jwt.secret must be at least {MIN_SECRET_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(secret: &str) -> AppConfig {
        AppConfig {
            run_mode: "test".to_string(),
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/kharcha_test".to_string(),
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
            },
            jwt: JwtConfig {
                secret: secret.to_string(),
                token_expiry_hours: default_token_expiry(),
            },
        }
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = base_config("too-short");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimum_length_secret_accepted() {
        let config = base_config("0123456789");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                (
                    "KHARCHA__DATABASE__URL",
                    Some("postgres://localhost/kharcha_test"),
                ),
                ("KHARCHA__JWT__SECRET", Some("a-long-enough-secret")),
                ("KHARCHA__SERVER__PORT", Some("5005")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "postgres://localhost/kharcha_test");
                assert_eq!(config.server.port, 5005);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.jwt.token_expiry_hours, 12);
            },
        );
    }

    #[test]
    fn test_load_rejects_weak_secret() {
        temp_env::with_vars(
            [
                (
                    "KHARCHA__DATABASE__URL",
                    Some("postgres://localhost/kharcha_test"),
                ),
                ("KHARCHA__JWT__SECRET", Some("short")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
