// ABOUTME: Model gateway for Bionic Brokerage
// ABOUTME: Gemini client, conversation turns, tool declarations, and the ModelGateway trait

pub mod conversation;
pub mod gateway;
pub mod service;
pub mod tools;
pub mod types;

// Re-export gateway types
pub use gateway::{GeminiGateway, ModelGateway};

#[cfg(any(test, feature = "test-utils"))]
pub use gateway::MockModelGateway;

// Re-export service types
pub use service::{AIResponse, AIServiceError, AIServiceResult, GeminiService, Usage};

// Re-export conversation types
pub use conversation::{ConverseReply, ToolCall, ToolResult, Turn};

// Re-export tool types
pub use tools::{QualifyLeadArgs, QUALIFY_LEAD_TOOL};
