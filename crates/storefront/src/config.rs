//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG_PATH` - Catalog JSON file (default: built-in catalog)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Catalog file; `None` uses the catalog compiled into the binary
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking (contains a project key)
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url.as_str())
            .field("catalog_path", &self.catalog_path)
            .field(
                "sentry_dsn",
                &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", e))?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", e))?;
        let base_url = parse_base_url(&env.required("STOREFRONT_BASE_URL")?)?;
        let catalog_path = env.optional("STOREFRONT_CATALOG_PATH").map(PathBuf::from);

        let sentry_dsn = env.optional("SENTRY_DSN").map(SecretString::from);
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_traces_sample_rate = parse_sample_rate(
            "SENTRY_TRACES_SAMPLE_RATE",
            &env.or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            sentry_dsn,
            sentry_environment,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup that treats empty values as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse the base URL, requiring an http(s) scheme and a host.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    const KEY: &str = "STOREFRONT_BASE_URL";

    let url = Url::parse(value).map_err(|e| invalid(KEY, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(KEY, format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid(KEY, "base_url must have a host"));
    }
    Ok(url)
}

fn parse_sample_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = value.parse::<f32>().map_err(|e| invalid(key, e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(key, format!("{rate} is outside 0.0..=1.0")));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("STOREFRONT_BASE_URL", "http://localhost:3000")]).unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(config.catalog_path.is_none());
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_missing_base_url() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::MissingEnvVar(key)) if key == "STOREFRONT_BASE_URL"
        ));
        assert!(matches!(
            load(&[("STOREFRONT_BASE_URL", "  ")]),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let base = ("STOREFRONT_BASE_URL", "https://books.example.com");
        assert!(matches!(
            load(&[base, ("STOREFRONT_PORT", "eighty")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PORT"
        ));
        assert!(matches!(
            load(&[base, ("STOREFRONT_HOST", "localhost")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_HOST"
        ));
        assert!(matches!(
            load(&[base, ("SENTRY_TRACES_SAMPLE_RATE", "1.5")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("STOREFRONT_BASE_URL", "ftp://books.example.com")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_https_is_secure() {
        let config = load(&[
            ("STOREFRONT_BASE_URL", "https://books.example.com"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_CATALOG_PATH", "/srv/books.json"),
        ])
        .unwrap();

        assert!(config.is_secure());
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.catalog_path.as_deref(),
            Some(std::path::Path::new("/srv/books.json"))
        );
    }

    #[test]
    fn test_debug_redacts_sentry_dsn() {
        let config = load(&[
            ("STOREFRONT_BASE_URL", "http://localhost:3000"),
            ("SENTRY_DSN", "https://super_secret_key@o1.ingest.sentry.io/2"),
        ])
        .unwrap();

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_key"));
    }
}
