//! Configuration management for the NetSuite TBA client.
//!
//! Parses `netsuite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: every field of `[credentials]` and `[restlet]`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override account ID.
    pub account_id: Option<String>,
    /// Override HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "netsuite.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TBA credentials.
    pub credentials: Option<CredentialsConfig>,
    /// RESTlet deployment (only needed for RESTlet calls).
    pub restlet: Option<RestletConfig>,
    /// HTTP client configuration.
    pub http: HttpConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// NetSuite TBA credentials.
#[derive(Clone, Deserialize)]
pub struct CredentialsConfig {
    /// Account ID (e.g. `1234567` or `1234567_SB1`).
    pub account_id: String,
    /// OAuth realm; hyphens are normalized to underscores at use.
    pub realm: String,
    /// Integration record consumer key.
    pub consumer_key: String,
    /// Integration record consumer secret.
    pub consumer_secret: String,
    /// Access token ID.
    pub token_id: String,
    /// Access token secret.
    pub token_secret: String,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("account_id", &self.account_id)
            .field("realm", &self.realm)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token_id", &self.token_id)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

impl CredentialsConfig {
    /// Validate that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.account_id, "credentials.account_id")?;
        require_non_empty(&self.realm, "credentials.realm")?;
        require_non_empty(&self.consumer_key, "credentials.consumer_key")?;
        require_non_empty(&self.consumer_secret, "credentials.consumer_secret")?;
        require_non_empty(&self.token_id, "credentials.token_id")?;
        require_non_empty(&self.token_secret, "credentials.token_secret")?;
        Ok(())
    }
}

/// RESTlet script deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct RestletConfig {
    /// Script ID (e.g. `customscript_my_restlet`).
    pub script_id: String,
    /// Deploy ID (e.g. `customdeploy_my_restlet`).
    pub deploy_id: String,
}

impl RestletConfig {
    /// Validate that both IDs are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if either field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.script_id, "restlet.script_id")?;
        require_non_empty(&self.deploy_id, "restlet.deploy_id")?;
        Ok(())
    }
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`credentials.token_secret`").
        field: String,
        /// Error message (e.g., "${`NETSUITE_TOKEN_SECRET`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `netsuite.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(account_id) = &settings.account_id
            && let Some(credentials) = self.credentials.as_mut()
        {
            credentials.account_id.clone_from(account_id);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
    }

    /// Get validated credentials.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_credentials(&self) -> Result<&CredentialsConfig, ConfigError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ConfigError::Validation("[credentials] section required in config".into())
        })?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Get validated RESTlet deployment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_restlet(&self) -> Result<&RestletConfig, ConfigError> {
        let restlet = self.restlet.as_ref().ok_or_else(|| {
            ConfigError::Validation("[restlet] section required in config".into())
        })?;
        restlet.validate()?;
        Ok(restlet)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Sections are validated when required, see [`Config::require_credentials`]
    /// and [`Config::require_restlet`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut credentials) = self.credentials {
            let fields = [
                (&mut credentials.account_id, "credentials.account_id"),
                (&mut credentials.realm, "credentials.realm"),
                (&mut credentials.consumer_key, "credentials.consumer_key"),
                (&mut credentials.consumer_secret, "credentials.consumer_secret"),
                (&mut credentials.token_id, "credentials.token_id"),
                (&mut credentials.token_secret, "credentials.token_secret"),
            ];
            for (value, field) in fields {
                *value = expand::expand_env(value, field)?;
            }
        }

        if let Some(ref mut restlet) = self.restlet {
            restlet.script_id = expand::expand_env(&restlet.script_id, "restlet.script_id")?;
            restlet.deploy_id = expand::expand_env(&restlet.deploy_id, "restlet.deploy_id")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_CONFIG: &str = r#"
[credentials]
account_id = "1234567_SB1"
realm = "1234567-SB1"
consumer_key = "ck"
consumer_secret = "cs"
token_id = "tid"
token_secret = "ts"

[restlet]
script_id = "customscript_my_restlet"
deploy_id = "customdeploy_my_restlet"

[http]
timeout_secs = 10
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.credentials.is_none());
        assert!(config.restlet.is_none());
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();
        let credentials = config.require_credentials().unwrap();
        assert_eq!(credentials.account_id, "1234567_SB1");
        assert_eq!(credentials.realm, "1234567-SB1");
        assert_eq!(credentials.token_secret, "ts");

        let restlet = config.require_restlet().unwrap();
        assert_eq!(restlet.script_id, "customscript_my_restlet");
        assert_eq!(restlet.deploy_id, "customdeploy_my_restlet");
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_require_credentials_missing_section() {
        let config = Config::default();
        let err = config.require_credentials().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[credentials]"));
    }

    #[test]
    fn test_require_credentials_empty_field() {
        let toml = r#"
[credentials]
account_id = "1234567"
realm = "1234567"
consumer_key = "ck"
consumer_secret = ""
token_id = "tid"
token_secret = "ts"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.require_credentials().unwrap_err();
        assert!(err.to_string().contains("credentials.consumer_secret"));
    }

    #[test]
    fn test_require_restlet_only_when_needed() {
        let toml = r#"
[restlet]
script_id = "customscript_x"
deploy_id = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        let err = config.require_restlet().unwrap_err();
        assert!(err.to_string().contains("restlet.deploy_id"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();
        let debug = format!("{:?}", config.credentials.unwrap());
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("\"cs\""));
        assert!(!debug.contains("\"ts\""));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let file = write_config(FULL_CONFIG);
        let config = Config::load(Some(file.path()), None).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
        assert_eq!(config.require_credentials().unwrap().consumer_key, "ck");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/netsuite.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NS_CONFIG_TEST_SECRET", "expanded-secret");
        }
        let file = write_config(
            r#"
[credentials]
account_id = "1234567"
realm = "1234567"
consumer_key = "ck"
consumer_secret = "${NS_CONFIG_TEST_SECRET}"
token_id = "tid"
token_secret = "${NS_CONFIG_TEST_TOKEN_SECRET:-fallback}"
"#,
        );
        let config = Config::load(Some(file.path()), None).unwrap();
        let credentials = config.require_credentials().unwrap();
        assert_eq!(credentials.consumer_secret, "expanded-secret");
        assert_eq!(credentials.token_secret, "fallback");
        unsafe {
            std::env::remove_var("NS_CONFIG_TEST_SECRET");
        }
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let file = write_config("[http]\ntimeout_secs = 0\n");
        let err = Config::load(Some(file.path()), None).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config: Config = toml::from_str(FULL_CONFIG).unwrap();
        config.apply_cli_settings(&CliSettings {
            account_id: Some("7654321".to_owned()),
            timeout_secs: Some(60),
        });
        assert_eq!(config.credentials.unwrap().account_id, "7654321");
        assert_eq!(config.http.timeout_secs, 60);
    }

    #[test]
    fn test_apply_cli_settings_without_credentials() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            account_id: Some("7654321".to_owned()),
            ..Default::default()
        });
        assert!(config.credentials.is_none());
        assert_eq!(config.http.timeout_secs, 30);
    }
}
