// ABOUTME: Assembles the gateway, CRM sink, and limits every subcommand shares
// ABOUTME: Reads configuration from the environment and applies command-line overrides

use bionic_ai::{GeminiGateway, ModelGateway};
use bionic_config::constants::RUST_LOG;
use bionic_config::{ConfigError, GatewayConfig, WorkflowConfig};
use bionic_prompts::{PromptError, PromptManager};
use bionic_workflows::{CrmRecorder, TracingCrm};
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to load prompts: {0}")]
    Prompts(#[from] PromptError),
}

/// Values from global flags that take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct GatewayOverrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl GatewayOverrides {
    pub fn apply(&self, mut config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
        if let Some(model) = &self.model {
            config = config.with_model(model.as_str());
        }
        if let Some(base_url) = &self.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(ConfigError::InvalidBaseUrl(base_url.clone()));
            }
            config = config.with_base_url(base_url.as_str());
        }
        Ok(config)
    }
}

/// Everything a subcommand needs to run a workflow
pub struct Runtime {
    pub gateway: Arc<dyn ModelGateway>,
    pub crm: Arc<dyn CrmRecorder>,
    pub max_tool_rounds: usize,
    pub model: String,
}

impl Runtime {
    pub fn from_env(overrides: &GatewayOverrides) -> Result<Self, RuntimeError> {
        Self::from_lookup(|name| env::var(name).ok(), overrides)
    }

    pub fn from_lookup<F>(lookup: F, overrides: &GatewayOverrides) -> Result<Self, RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway_config = overrides.apply(GatewayConfig::from_lookup(&lookup)?)?;
        let workflow_config = WorkflowConfig::from_lookup(&lookup)?;
        if gateway_config.api_key.is_none() {
            warn!("No API key configured; set GEMINI_API_KEY before running a workflow");
        }
        debug!(?gateway_config, ?workflow_config, "Runtime configuration");

        let prompts = PromptManager::new(workflow_config.prompts_dir.clone())?;
        let model = gateway_config.model.clone();

        Ok(Self {
            gateway: Arc::new(GeminiGateway::new(gateway_config, prompts)),
            crm: Arc::new(TracingCrm),
            max_tool_rounds: workflow_config.max_tool_rounds,
            model,
        })
    }
}

/// Install the global subscriber; `RUST_LOG` wins over the default directive
pub fn init_tracing(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
