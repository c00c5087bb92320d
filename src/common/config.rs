//! Configuration file handling
//!
//! Connection settings come from an optional TOML file and are then
//! overridden by the `ZULIP_USERNAME`, `ZULIP_API_KEY` and `ZULIP_REALM`
//! environment variables.

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Environment variable holding the account email
pub const ENV_USERNAME: &str = "ZULIP_USERNAME";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "ZULIP_API_KEY";
/// Environment variable holding the server URL
pub const ENV_REALM: &str = "ZULIP_REALM";

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Zulip server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Zulip server connection settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ServerConfig {
    /// Email address of the account (or bot) the examples run as
    pub email: Option<String>,

    /// API key of that account
    pub api_key: Option<String>,

    /// Base URL of the server, e.g. `http://localhost:9991`
    pub site: Option<String>,
}

/// Validated connection parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
    pub site: String,
}

impl Config {
    /// Load configuration from `path`, or from the default config file
    ///
    /// Returns default configuration if no file exists. An explicitly given
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match config_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(email) = get(ENV_USERNAME) {
            self.server.email = Some(email);
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.server.api_key = Some(api_key);
        }
        if let Some(site) = get(ENV_REALM) {
            self.server.site = Some(site);
        }
        self
    }

    /// Validate that all connection parameters are present
    pub fn credentials(&self) -> Result<Credentials> {
        let missing = |field: &str, var: &str| {
            Error::Config(format!(
                "missing server {field}: set {var} or '{field}' under [server] in the config file"
            ))
        };

        Ok(Credentials {
            email: self
                .server
                .email
                .clone()
                .ok_or_else(|| missing("email", ENV_USERNAME))?,
            api_key: self
                .server
                .api_key
                .clone()
                .ok_or_else(|| missing("api_key", ENV_API_KEY))?,
            site: self
                .server
                .site
                .clone()
                .ok_or_else(|| missing("site", ENV_REALM))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nemail = \"iago@zulip.com\"\napi_key = \"abc\"\nsite = \"http://localhost:9991\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        let creds = config.credentials().unwrap();
        assert_eq!(creds.email, "iago@zulip.com");
        assert_eq!(creds.api_key, "abc");
        assert_eq!(creds.site, "http://localhost:9991");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nemail = ").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = Config {
            server: ServerConfig {
                email: Some("file@zulip.com".to_string()),
                api_key: Some("file-key".to_string()),
                site: Some("http://file".to_string()),
            },
        };
        let vars = env(&[(ENV_USERNAME, "env@zulip.com"), (ENV_API_KEY, "")]);

        let creds = config
            .with_overrides(|k| vars.get(k).cloned())
            .credentials()
            .unwrap();
        assert_eq!(creds.email, "env@zulip.com");
        // empty values do not override
        assert_eq!(creds.api_key, "file-key");
        assert_eq!(creds.site, "http://file");
    }

    #[test]
    fn test_missing_credentials() {
        let vars = env(&[(ENV_USERNAME, "iago@zulip.com"), (ENV_REALM, "http://x")]);
        let err = Config::default()
            .with_overrides(|k| vars.get(k).cloned())
            .credentials()
            .unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains(ENV_API_KEY)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
