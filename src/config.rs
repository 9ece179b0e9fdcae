//! Configuration module for Credential Gate.
//!
//! Loads configuration from YAML files and environment variables.

use std::path::Path;

use config::{Config as ConfigLoader, ConfigError, Environment, File, Map};
use serde::Deserialize;

use crate::auth::ConfiguredUser;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

/// Default cap on `/login` request bodies (16 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body in bytes; longer bodies get a 400.
    pub max_body_bytes: usize,
}

/// Credential table configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Fixed username/password entries loaded into the credential store.
    pub users: Vec<ConfiguredUser>,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CREDGATE__*)
    /// 2. Explicit config file passed on the command line
    /// 3. config/local.yaml (if exists)
    /// 4. config/default.yaml (if exists)
    /// 5. Built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, None)
    }

    /// Load with an explicit environment map instead of the process environment.
    ///
    /// `None` reads the real environment.
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false));

        // A file named on the command line must exist
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            // Layer on environment variables with CREDGATE prefix
            .add_source(
                Environment::with_prefix("CREDGATE")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Apply a command line port, which beats every file and environment layer.
    pub fn override_port(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// Socket address string the HTTP adapter binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users: vec![
                ConfiguredUser::new("user1", "password1"),
                ConfiguredUser::new("user2", "password2"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.auth.users.len(), 2);
        assert_eq!(config.auth.users[0].username, "user1");
        assert_eq!(config.auth.users[1].password, "password2");
    }

    #[test]
    fn test_yaml_overrides_users_and_keeps_server_defaults() {
        let yaml = r#"
auth:
  users:
    - username: alice
      password: wonderland
"#;
        let config: Config = ConfigLoader::builder()
            .add_source(File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.users.len(), 1);
        assert_eq!(config.auth.users[0].username, "alice");
        assert_eq!(config.auth.users[0].password, "wonderland");
    }

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn write_yaml(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("gate.yaml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_without_overrides_uses_defaults() {
        let config = Config::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_body_bytes, DEFAULT_BODY_LIMIT);
        assert_eq!(config.auth.users.len(), 2);
    }

    #[test]
    fn test_env_overrides_port() {
        let config =
            Config::load_with_env(None, env(&[("CREDGATE__SERVER__PORT", "9090")])).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_env_without_prefix_is_ignored() {
        let config = Config::load_with_env(None, env(&[("SERVER__PORT", "9090")])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_explicit_file_layers_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(
            &dir,
            "server:\n  port: 7000\nauth:\n  users:\n    - username: alice\n      password: wonderland\n",
        );

        let config = Config::load_with_env(Some(&path), env(&[])).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.auth.users.len(), 1);
        assert_eq!(config.auth.users[0].username, "alice");
    }

    #[test]
    fn test_env_beats_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "server:\n  port: 7000\n");

        let config =
            Config::load_with_env(Some(&path), env(&[("CREDGATE__SERVER__PORT", "9090")]))
                .unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        assert!(Config::load_with_env(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn test_cli_port_beats_environment() {
        let mut config =
            Config::load_with_env(None, env(&[("CREDGATE__SERVER__PORT", "9090")])).unwrap();

        config.override_port(None);
        assert_eq!(config.server.port, 9090);

        config.override_port(Some(7070));
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.bind_addr(), "0.0.0.0:7070");
    }

    #[test]
    fn test_empty_sources_fall_back_to_defaults() {
        let config: Config = ConfigLoader::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.users.len(), 2);
    }
}
