//! Server configuration, read from the environment and an optional `.env`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::shell::ENTRY_DOCUMENT;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CLIENT_DIR: &str = "../client/dist";

/// Deployment mode, from NODE_ENV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Production mode serves the built client
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(Error::InvalidEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a PORT value
pub fn parse_port(s: &str) -> Result<u16> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidPort(s.to_string()))
}

/// Everything the backend needs to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    /// Read for parity with deployments that set it; nothing connects to it
    pub db_uri: Option<String>,
    /// Built client served in production
    pub client_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::default(),
            db_uri: None,
            client_dir: PathBuf::from(DEFAULT_CLIENT_DIR),
        }
    }
}

impl ServerConfig {
    /// Build a config from variable lookups, falling back to defaults for
    /// anything unset or empty
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            port: var("PORT")
                .map(|value| parse_port(&value))
                .transpose()?
                .unwrap_or(defaults.port),
            environment: var("NODE_ENV")
                .map(|value| value.parse::<Environment>())
                .transpose()?
                .unwrap_or(defaults.environment),
            db_uri: var("DB_URI"),
            client_dir: var("CLIENT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.client_dir),
        })
    }

    /// Build a config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Entry document returned for unmatched routes in production
    pub fn index_path(&self) -> PathBuf {
        self.client_dir.join(ENTRY_DOCUMENT)
    }

    pub fn client_dir(&self) -> &Path {
        &self.client_dir
    }
}

/// Load `.env` from the working directory into the process environment.
/// Variables already set win over the file.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.index_path(), Path::new("../client/dist/index.html"));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("NODE_ENV", "production"),
            ("DB_URI", "mongodb://localhost/astra"),
            ("CLIENT_DIR", "/srv/astra"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.environment.is_production());
        assert_eq!(config.db_uri.as_deref(), Some("mongodb://localhost/astra"));
        assert_eq!(config.index_path(), Path::new("/srv/astra/index.html"));
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config =
            ServerConfig::from_lookup(lookup(&[("PORT", ""), ("NODE_ENV", "  ")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::InvalidPort(ref p) if p == "eighty"));
        assert!(parse_port("70000").is_err());
        assert_eq!(parse_port(" 3001 ").unwrap(), 3001);
    }

    #[test]
    fn test_invalid_environment() {
        let err = ServerConfig::from_lookup(lookup(&[("NODE_ENV", "staging")])).unwrap_err();
        assert!(matches!(err, Error::InvalidEnvironment(ref e) if e == "staging"));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("Production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(Environment::Production.to_string(), "production");
        assert!(!Environment::Development.is_production());
    }
}
