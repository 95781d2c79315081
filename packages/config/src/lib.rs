// ABOUTME: Configuration for Bionic Brokerage
// ABOUTME: Environment variable names plus typed gateway and workflow settings

pub mod constants;
pub mod settings;

pub use settings::{ConfigError, GatewayConfig, WorkflowConfig};
