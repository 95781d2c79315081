// ABOUTME: Typed configuration loaded from environment variables
// ABOUTME: Gateway credentials/endpoint and workflow limits, validated at startup

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {source}")]
    InvalidNumber {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Connection settings for the model endpoint
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(GEMINI_API_KEY)
            .or_else(|| lookup(API_KEY))
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            info!("{} not set - model calls will fail until a key is provided", GEMINI_API_KEY);
        }

        let model = lookup(BIONIC_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom model: {}", model);
        }

        let base_url = lookup(BIONIC_API_BASE_URL)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let request_timeout = parse_secs(
            &lookup,
            BIONIC_HTTP_REQUEST_TIMEOUT_SECS,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let connect_timeout = parse_secs(
            &lookup,
            BIONIC_HTTP_CONNECT_TIMEOUT_SECS,
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            api_key,
            model,
            base_url,
            request_timeout,
            connect_timeout,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Limits and locations used by the workflows
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Follow-up model calls allowed after tool execution in one concierge turn
    pub max_tool_rounds: usize,
    /// Directory overriding the embedded prompt catalog
    pub prompts_dir: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            prompts_dir: None,
        }
    }
}

impl WorkflowConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_tool_rounds = match lookup(BIONIC_MAX_TOOL_ROUNDS) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|source| ConfigError::InvalidNumber {
                    name: BIONIC_MAX_TOOL_ROUNDS,
                    source,
                })?,
            None => DEFAULT_MAX_TOOL_ROUNDS,
        };
        if max_tool_rounds == 0 {
            return Err(ConfigError::MustBePositive(BIONIC_MAX_TOOL_ROUNDS));
        }

        let prompts_dir = lookup(BIONIC_PROMPTS_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            max_tool_rounds,
            prompts_dir,
        })
    }
}

fn parse_secs<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidNumber { name, source })?,
        None => default,
    };
    if secs == 0 {
        return Err(ConfigError::MustBePositive(name));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_gateway_defaults() {
        let config = GatewayConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_gateway_prefers_gemini_key_over_legacy() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            (API_KEY, "legacy"),
            (GEMINI_API_KEY, "primary"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let legacy = GatewayConfig::from_lookup(lookup_from(&[(API_KEY, "legacy")])).unwrap();
        assert_eq!(legacy.api_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_gateway_trims_base_url_slash() {
        let config = GatewayConfig::from_lookup(lookup_from(&[(
            BIONIC_API_BASE_URL,
            "http://127.0.0.1:9000/",
        )]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_gateway_rejects_bad_values() {
        let bad_url = GatewayConfig::from_lookup(lookup_from(&[(BIONIC_API_BASE_URL, "ftp://x")]));
        assert!(matches!(bad_url, Err(ConfigError::InvalidBaseUrl(_))));

        let bad_timeout =
            GatewayConfig::from_lookup(lookup_from(&[(BIONIC_HTTP_REQUEST_TIMEOUT_SECS, "soon")]));
        assert!(matches!(bad_timeout, Err(ConfigError::InvalidNumber { .. })));

        let zero_timeout =
            GatewayConfig::from_lookup(lookup_from(&[(BIONIC_HTTP_CONNECT_TIMEOUT_SECS, "0")]));
        assert!(matches!(zero_timeout, Err(ConfigError::MustBePositive(_))));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = GatewayConfig::default().with_api_key("secret-key");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_workflow_config() {
        let defaults = WorkflowConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(defaults.max_tool_rounds, DEFAULT_MAX_TOOL_ROUNDS);
        assert!(defaults.prompts_dir.is_none());

        let custom = WorkflowConfig::from_lookup(lookup_from(&[
            (BIONIC_MAX_TOOL_ROUNDS, "5"),
            (BIONIC_PROMPTS_DIR, "/opt/prompts"),
        ]))
        .unwrap();
        assert_eq!(custom.max_tool_rounds, 5);
        assert_eq!(custom.prompts_dir, Some(PathBuf::from("/opt/prompts")));

        let zero = WorkflowConfig::from_lookup(lookup_from(&[(BIONIC_MAX_TOOL_ROUNDS, "0")]));
        assert!(matches!(zero, Err(ConfigError::MustBePositive(_))));
    }
}
