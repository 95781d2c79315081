// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Bionic Brokerage

// Model Endpoint
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const API_KEY: &str = "API_KEY"; // Legacy
pub const BIONIC_MODEL: &str = "BIONIC_MODEL";
pub const BIONIC_API_BASE_URL: &str = "BIONIC_API_BASE_URL";

// HTTP Client
pub const BIONIC_HTTP_REQUEST_TIMEOUT_SECS: &str = "BIONIC_HTTP_REQUEST_TIMEOUT_SECS";
pub const BIONIC_HTTP_CONNECT_TIMEOUT_SECS: &str = "BIONIC_HTTP_CONNECT_TIMEOUT_SECS";

// Workflows
pub const BIONIC_MAX_TOOL_ROUNDS: &str = "BIONIC_MAX_TOOL_ROUNDS";

// Prompts
pub const BIONIC_PROMPTS_DIR: &str = "BIONIC_PROMPTS_DIR";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 3;
