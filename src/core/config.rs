use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "https://api.binance.com";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_RECV_WINDOW: u64 = 5000;
/// Largest `recvWindow` the exchange accepts.
pub const MAX_RECV_WINDOW: u64 = 60_000;

/// API key pair. Immutable once built and never printed.
#[derive(Clone)]
pub struct Credentials {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
        }
    }

    /// Empty pair, usable for public endpoints only.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Reads `{PREFIX}_API_KEY` and `{PREFIX}_SECRET_KEY`.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_key = required_var(&format!("{}_API_KEY", prefix))?;
        let secret_key = required_var(&format!("{}_SECRET_KEY", prefix))?;
        Ok(Self::new(api_key, secret_key))
    }

    /// Reads a JSON file shaped `{"api_key": "...", "secret_key": "..."}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidConfiguration(format!(
                "Failed to read credentials file '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ConfigError::InvalidConfiguration(format!(
                "Credentials file '{}' is not valid: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

// Never expose secrets in serialization
impl Serialize for Credentials {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Credentials", 2)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Credentials {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct CredentialsHelper {
            api_key: String,
            #[serde(alias = "user_key")]
            secret_key: String,
        }

        let helper = CredentialsHelper::deserialize(deserializer)?;
        Ok(Self::new(helper.api_key, helper.secret_key))
    }
}

/// Connection settings for the exchange client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://api.binance.com`
    pub host: String,
    pub port: u16,
    /// Per-request timeout enforced by the transport
    pub timeout_ms: u64,
    /// Tolerance window sent with every signed request
    pub recv_window: u64,
    pub user_agent: String,
    /// Ask the exchange to leave out zero balances
    pub omit_zero_balances: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            recv_window: DEFAULT_RECV_WINDOW,
            user_agent: format!("spotx/{}", env!("CARGO_PKG_VERSION")),
            omit_zero_balances: true,
        }
    }
}

impl ClientConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_omit_zero_balances(mut self, omit: bool) -> Self {
        self.omit_zero_balances = omit;
        self
    }

    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.host.starts_with("https://") || self.host.starts_with("http://")) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "host must include an http(s) scheme: '{}'",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "port must be non-zero".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.recv_window == 0 || self.recv_window > MAX_RECV_WINDOW {
            return Err(ConfigError::InvalidConfiguration(format!(
                "recv_window must be within 1..={}, got {}",
                MAX_RECV_WINDOW, self.recv_window
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub credentials: Credentials,
    #[serde(default)]
    pub client: ClientConfig,
}

impl ExchangeConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            credentials: Credentials::new(api_key, secret_key),
            client: ClientConfig::default(),
        }
    }

    /// Create configuration for read-only operations (market data only)
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            credentials: Credentials::empty(),
            client: ClientConfig::default(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_KEY` (e.g., `BINANCE_API_KEY`)
    /// - `{PREFIX}_SECRET_KEY` (e.g., `BINANCE_SECRET_KEY`)
    /// - `{PREFIX}_HOST`, `{PREFIX}_PORT`, `{PREFIX}_TIMEOUT_MS`, `{PREFIX}_RECV_WINDOW` (optional)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let credentials = Credentials::from_env(prefix)?;
        let prefix = prefix.to_uppercase();
        let mut client = ClientConfig::default();

        if let Ok(host) = env::var(format!("{}_HOST", prefix)) {
            client.host = host;
        }
        if let Some(port) = parsed_var(&format!("{}_PORT", prefix))? {
            client.port = port;
        }
        if let Some(timeout_ms) = parsed_var(&format!("{}_TIMEOUT_MS", prefix))? {
            client.timeout_ms = timeout_ms;
        }
        if let Some(recv_window) = parsed_var(&format!("{}_RECV_WINDOW", prefix))? {
            client.recv_window = recv_window;
        }

        client.validate()?;
        Ok(Self {
            credentials,
            client,
        })
    }

    /// Create configuration from a .env file and environment variables
    ///
    /// A missing .env file is not an error; system environment variables are
    /// used as-is in that case.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if this configuration has valid credentials for authenticated operations
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_complete()
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvironmentVariable(name.to_string()))
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            ConfigError::InvalidConfiguration(format!("{} has an invalid value: '{}'", name, raw))
        }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://api.binance.com:443");
        assert_eq!(config.timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::default().with_port(0).validate().is_err());
        assert!(ClientConfig::default().with_timeout_ms(0).validate().is_err());
        assert!(ClientConfig::default()
            .with_recv_window(60_001)
            .validate()
            .is_err());
        assert!(ClientConfig::default()
            .with_host("api.binance.com")
            .validate()
            .is_err());
    }

    #[test]
    fn test_credentials_are_redacted() {
        let config = ExchangeConfig::new("my_api_key".to_string(), "my_secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("my_api_key"));
        assert!(!debug.contains("my_secret"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("my_secret"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn test_credentials_accept_legacy_key_name() {
        let creds: Credentials =
            serde_json::from_str(r#"{"api_key":"k","user_key":"s"}"#).unwrap();
        assert_eq!(creds.api_key(), "k");
        assert_eq!(creds.secret_key(), "s");
    }

    #[test]
    fn test_credentials_from_json_file() {
        let path = env::temp_dir().join(format!("spotx-creds-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"api_key":"abc","secret_key":"def"}"#).unwrap();
        let creds = Credentials::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(creds.is_complete());
        assert_eq!(creds.secret_key(), "def");
        assert!(Credentials::from_json_file(&path).is_err());
    }

    #[test]
    fn test_read_only_has_no_credentials() {
        assert!(!ExchangeConfig::read_only().has_credentials());
        assert!(ExchangeConfig::new("k".into(), "s".into()).has_credentials());
    }

    #[test]
    fn test_from_env() {
        env::set_var("SPOTX_CFG_TEST_API_KEY", "key");
        env::set_var("SPOTX_CFG_TEST_SECRET_KEY", "secret");
        env::set_var("SPOTX_CFG_TEST_PORT", "9443");
        env::set_var("SPOTX_CFG_TEST_RECV_WINDOW", "10000");

        let config = ExchangeConfig::from_env("spotx_cfg_test").unwrap();
        assert_eq!(config.credentials.api_key(), "key");
        assert_eq!(config.client.port, 9443);
        assert_eq!(config.client.recv_window, 10_000);
        assert_eq!(config.client.timeout_ms, DEFAULT_TIMEOUT_MS);

        env::set_var("SPOTX_CFG_TEST_PORT", "not-a-port");
        assert!(ExchangeConfig::from_env("spotx_cfg_test").is_err());

        assert!(matches!(
            ExchangeConfig::from_env("spotx_cfg_missing"),
            Err(ConfigError::MissingEnvironmentVariable(_))
        ));
    }
}
