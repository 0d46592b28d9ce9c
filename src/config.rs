use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dbname")]
    pub dbname: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_sslmode")]
    pub sslmode: String,
}

/// How the database password is obtained: a static secret from the config
/// file, or a short-lived token minted by an external process and written
/// to a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    #[default]
    Password,
    TokenFile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,

    pub password: Option<String>,
    pub token_file: Option<PathBuf>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "pet_clinic".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_sslmode() -> String {
    "require".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            sslmode: default_sslmode(),
        }
    }
}

impl DatabaseConfig {
    /// Connection options for the configured server with the resolved
    /// secret filled in. Identity and endpoint come from the config file;
    /// the password is supplied per connection attempt.
    pub fn connect_options(&self, password: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(password)
            .ssl_mode(self.ssl_mode())
    }

    fn ssl_mode(&self) -> PgSslMode {
        match self.sslmode.as_str() {
            "disable" => PgSslMode::Disable,
            "allow" => PgSslMode::Allow,
            "prefer" => PgSslMode::Prefer,
            "verify-ca" => PgSslMode::VerifyCa,
            "verify-full" => PgSslMode::VerifyFull,
            _ => PgSslMode::Require,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pet-intake")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_tls() {
        let config = Config::default();
        assert_eq!(config.database.sslmode, "require");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.auth.mode, AuthMode::Password);
    }

    #[test]
    fn parses_token_file_auth() {
        let toml = r#"
            [database]
            host = "db.example.net"
            dbname = "clinic"
            user = "intake@example.net"

            [auth]
            mode = "token-file"
            token_file = "/run/secrets/db-token"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.database.host, "db.example.net");
        assert_eq!(config.auth.mode, AuthMode::TokenFile);
        assert_eq!(
            config.auth.token_file.as_deref(),
            Some(std::path::Path::new("/run/secrets/db-token"))
        );
        // Unset fields fall back to defaults
        assert_eq!(config.database.sslmode, "require");
    }

    #[test]
    fn unknown_sslmode_falls_back_to_require() {
        let db = DatabaseConfig {
            sslmode: "bogus".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(matches!(db.ssl_mode(), PgSslMode::Require));
        assert!(matches!(
            DatabaseConfig::default().ssl_mode(),
            PgSslMode::Require
        ));
    }
}
