// ABOUTME: Uniform success/failure surface shared by every workflow
// ABOUTME: WorkflowStatus for the view layer and WorkflowError for the failure causes

use bionic_ai::AIServiceError;
use std::fmt;
use thiserror::Error;

use crate::leads::LeadProviderError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Generation failed: {0}")]
    GenerationFailed(#[from] AIServiceError),

    #[error("Model requested tools for more than {0} follow-up rounds")]
    ToolRoundsExceeded(usize),

    #[error("Invalid arguments for tool {tool}: {reason}")]
    InvalidToolArguments { tool: String, reason: String },

    #[error("Lead provider error: {0}")]
    LeadProvider(#[from] LeadProviderError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Visible state of a workflow's single in-flight operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Busy,
    Failed(String),
}

impl WorkflowStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, WorkflowStatus::Busy)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            WorkflowStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn from_error(error: &WorkflowError) -> Self {
        WorkflowStatus::Failed(error.to_string())
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Idle => f.write_str("ready"),
            WorkflowStatus::Busy => f.write_str("working..."),
            WorkflowStatus::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}
