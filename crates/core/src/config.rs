//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API origin
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrisConfig {
    /// Library API settings
    pub api: ApiConfig,

    /// Session handling settings
    pub session: SessionConfig,
}

/// Library API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin every request path is appended to
    pub base_url: String,

    /// Request timeout in seconds (ignored in the browser)
    pub timeout_secs: Option<u64>,
}

/// Session handling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Local storage key holding the raw token
    pub storage_key: String,

    /// Period of the expiry check in milliseconds
    pub check_interval_ms: u64,

    /// Whether the user is told before an expired session is cleared
    pub notify_on_expiry: bool,

    /// Text shown when the session expires
    pub expiry_message: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: "token".to_string(),
            check_interval_ms: 60_000,
            notify_on_expiry: true,
            expiry_message: "Your session has expired. Please log in again.".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl SessionConfig {
    /// Expiry check period
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LibrisConfig {
    /// Load configuration from a file, with `LIBRIS_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::CoreResult<Self> {
        let settings = Self::builder_with_defaults()?
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment(None))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from defaults and `LIBRIS_*` environment variables
    ///
    /// Nested keys use a double underscore, e.g. `LIBRIS_API__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> crate::CoreResult<Self> {
        Self::from_vars(None)
    }

    /// `vars` replaces the process environment when given
    fn from_vars(vars: Option<config::Map<String, String>>) -> crate::CoreResult<Self> {
        let settings = Self::builder_with_defaults()?
            .add_source(Self::environment(vars))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    fn environment(vars: Option<config::Map<String, String>>) -> config::Environment {
        config::Environment::with_prefix("LIBRIS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars)
    }

    fn builder_with_defaults()
    -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("session.storage_key", defaults.session.storage_key)?
            .set_default("session.check_interval_ms", defaults.session.check_interval_ms)?
            .set_default("session.notify_on_expiry", defaults.session.notify_on_expiry)?
            .set_default("session.expiry_message", defaults.session.expiry_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LibrisConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.session.storage_key, "token");
        assert_eq!(config.session.check_interval(), Duration::from_secs(60));
        assert!(config.session.notify_on_expiry);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: LibrisConfig =
            serde_json::from_str(r#"{"session":{"check_interval_ms":5000}}"#).unwrap();
        assert_eq!(config.session.check_interval(), Duration::from_secs(5));
        assert_eq!(config.session.storage_key, "token");
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://library.example.org"
timeout_secs = 15

[session]
check_interval_ms = 30000
notify_on_expiry = false
"#
        )
        .unwrap();

        let config = LibrisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://library.example.org");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.session.check_interval_ms, 30_000);
        assert!(!config.session.notify_on_expiry);
        assert_eq!(
            config.session.expiry_message,
            SessionConfig::default().expiry_message
        );
    }

    #[test]
    fn test_environment_overrides() {
        let vars = [
            ("LIBRIS_API__BASE_URL", "https://library.example.org"),
            ("LIBRIS_API__TIMEOUT_SECS", "20"),
            ("LIBRIS_SESSION__CHECK_INTERVAL_MS", "30000"),
            ("LIBRIS_SESSION__NOTIFY_ON_EXPIRY", "false"),
            ("UNRELATED_SETTING", "ignored"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let config = LibrisConfig::from_vars(Some(vars)).unwrap();
        assert_eq!(config.api.base_url, "https://library.example.org");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.session.check_interval(), Duration::from_secs(30));
        assert!(!config.session.notify_on_expiry);
        assert_eq!(config.session.storage_key, "token");
    }

    #[test]
    fn test_environment_without_overrides_uses_defaults() {
        let config = LibrisConfig::from_vars(Some(config::Map::new())).unwrap();
        assert_eq!(config, LibrisConfig::default());
    }

    #[test]
    fn test_invalid_environment_value_fails() {
        let vars = [(
            "LIBRIS_SESSION__CHECK_INTERVAL_MS".to_string(),
            "soon".to_string(),
        )]
        .into_iter()
        .collect();
        assert!(matches!(
            LibrisConfig::from_vars(Some(vars)),
            Err(crate::CoreError::Config(_))
        ));
    }

    #[test]
    fn test_from_missing_file_fails() {
        let result = LibrisConfig::from_file("/definitely/not/here/libris.toml");
        assert!(matches!(result, Err(crate::CoreError::Config(_))));
    }
}
