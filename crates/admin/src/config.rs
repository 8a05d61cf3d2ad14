//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_API_BASE_URL` - Product backend base URL (default: `http://localhost:5000`)
//! - `CATALOG_API_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `CATALOG_API_TOKEN` - Bearer token sent with admin calls
//! - `CATALOG_DEFAULT_CURRENCY` - Currency for new prices (default: `INR`)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use storeroom_core::CurrencyCode;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MIN_TOKEN_CHARS: usize = 16;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Fragments that mark a copied `.env` template value, matched lowercase.
const PLACEHOLDER_TOKENS: &[&str] = &[
    "your-",
    "your_",
    "api-token",
    "api_token",
    "bearer",
    "changeme",
    "placeholder",
    "example",
    "dummy",
    "xxx",
    "<",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Product backend connection settings
    pub api: CatalogApiConfig,
    /// Currency assigned to prices entered in new forms
    pub default_currency: CurrencyCode,
}

/// Product backend connection settings.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct CatalogApiConfig {
    /// Base URL of the product backend
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Bearer token for admin calls
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for CatalogApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CatalogApiConfig {
    /// Settings for a backend at `base_url` with default timeout and no token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an http(s) URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("CATALOG_API_BASE_URL", base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: None,
        })
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "CATALOG_API_BASE_URL",
            &get_env_or_default(lookup, "CATALOG_API_BASE_URL", DEFAULT_BASE_URL),
        )?;

        let timeout_secs = get_optional_env(lookup, "CATALOG_API_TIMEOUT_SECS")
            .map_or(Ok(DEFAULT_TIMEOUT_SECS), |value| value.trim().parse::<u64>())
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let token = get_optional_env(lookup, "CATALOG_API_TOKEN")
            .map(|token| {
                validate_token(&token, "CATALOG_API_TOKEN")?;
                Ok(SecretString::from(token))
            })
            .transpose()?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            token,
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid or the token fails
    /// validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`AdminConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api = CatalogApiConfig::from_lookup(&lookup)?;
        let default_currency = get_env_or_default(&lookup, "CATALOG_DEFAULT_CURRENCY", "INR")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_DEFAULT_CURRENCY".to_string(), e))?;

        Ok(Self {
            api,
            default_currency,
        })
    }

    /// Load configuration from a fixed map of variables.
    ///
    /// # Errors
    ///
    /// See [`AdminConfig::from_env`].
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable. Blank values count as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Shannon entropy of `s` in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, u32> = HashMap::new();
    let mut total = 0_u32;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = f64::from(total);
    counts
        .values()
        .map(|&count| {
            let p = f64::from(count) / total;
            -p * p.log2()
        })
        .sum()
}

/// Reject bearer tokens that are template leftovers or too guessable.
fn validate_token(token: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();
    if let Some(fragment) = PLACEHOLDER_TOKENS.iter().find(|f| lower.contains(**f)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("looks like a template value (contains '{fragment}'); paste the issued token"),
        ));
    }

    let chars = token.chars().count();
    if chars < MIN_TOKEN_CHARS {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("token is {chars} characters, need at least {MIN_TOKEN_CHARS}"),
        ));
    }

    let entropy = shannon_entropy(token);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "token is too repetitive ({entropy:.2} bits/char, need {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AdminConfig::from_map(&HashMap::new()).unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert!(config.api.token.is_none());
        assert_eq!(config.default_currency, CurrencyCode::INR);
    }

    #[test]
    fn test_overrides() {
        let config = AdminConfig::from_map(&vars(&[
            ("CATALOG_API_BASE_URL", "https://catalog.internal:8443/v1"),
            ("CATALOG_API_TIMEOUT_SECS", "5"),
            ("CATALOG_API_TOKEN", "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"),
            ("CATALOG_DEFAULT_CURRENCY", "usd"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url.host_str(), Some("catalog.internal"));
        assert_eq!(config.api.timeout, Duration::from_secs(5));
        assert_eq!(
            config.api.token.as_ref().unwrap().expose_secret(),
            "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"
        );
        assert_eq!(config.default_currency, CurrencyCode::USD);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = AdminConfig::from_map(&vars(&[
            ("CATALOG_API_BASE_URL", "  "),
            ("CATALOG_API_TOKEN", ""),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:5000/");
        assert!(config.api.token.is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let err = AdminConfig::from_map(&vars(&[("CATALOG_API_BASE_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "CATALOG_API_BASE_URL"));

        let err = AdminConfig::from_map(&vars(&[("CATALOG_API_BASE_URL", "ftp://catalog")])).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(AdminConfig::from_map(&vars(&[("CATALOG_API_TIMEOUT_SECS", "soon")])).is_err());
        assert!(AdminConfig::from_map(&vars(&[("CATALOG_API_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn test_invalid_currency() {
        let err = AdminConfig::from_map(&vars(&[("CATALOG_DEFAULT_CURRENCY", "DOGE")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "CATALOG_DEFAULT_CURRENCY"));
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let err = AdminConfig::from_map(&vars(&[("CATALOG_API_TOKEN", "your-api-token-here")])).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_low_entropy_token_rejected() {
        let result = validate_token("abababababababababababab", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, ref m)) if m.contains("repetitive")));
    }

    #[test]
    fn test_short_token_rejected() {
        let err = validate_token("aB3$xY9!", "TEST_VAR").unwrap_err();
        assert!(err.to_string().contains("8 characters"));
    }

    #[test]
    fn test_template_token_rejected() {
        for token in [
            "<paste-token-here>",
            "Bearer aB3$xY9!mK2@nL5#pQ7&",
            "sk_dummy_aB3$xY9!mK2@nL5",
        ] {
            assert!(validate_token(token, "TEST_VAR").is_err(), "{token}");
        }
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_shannon_entropy_counts_characters_not_bytes() {
        assert!(shannon_entropy("éééé").abs() < f64::EPSILON);
        assert!((shannon_entropy("éa") - 1.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("日本日本") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = AdminConfig::from_map(&vars(&[(
            "CATALOG_API_TOKEN",
            "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6",
        )]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("aB3$xY9"));
    }
}
