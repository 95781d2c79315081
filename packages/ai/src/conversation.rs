// ABOUTME: Provider-neutral conversation turns for the concierge chat
// ABOUTME: Maps user/assistant text and tool invocation/result turns onto Gemini contents

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Content, FunctionCall, FunctionResponse, GenerateContentResponse, Part};

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: Option<String>,
    pub name: String,
    pub args: Value,
    /// Opaque provider signature, replayed verbatim with the invocation
    pub thought_signature: Option<String>,
}

/// The locally computed result reported back for a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub id: Option<String>,
    pub name: String,
    pub response: Value,
}

impl ToolResult {
    /// Result answering the given call
    pub fn for_call(call: &ToolCall, response: Value) -> Self {
        Self {
            id: call.id.clone(),
            name: call.name.clone(),
            response,
        }
    }
}

/// One entry of the history sent to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Turn {
    User(String),
    Assistant(String),
    ToolInvocation(Vec<ToolCall>),
    ToolResult(Vec<ToolResult>),
}

impl Turn {
    pub fn to_content(&self) -> Content {
        match self {
            Turn::User(text) => Content::user(vec![Part::text(text.clone())]),
            Turn::Assistant(text) => Content::model(vec![Part::text(text.clone())]),
            Turn::ToolInvocation(calls) => Content::model(
                calls
                    .iter()
                    .map(|call| {
                        Part::function_call(
                            FunctionCall {
                                id: call.id.clone(),
                                name: call.name.clone(),
                                args: call.args.clone(),
                            },
                            call.thought_signature.clone(),
                        )
                    })
                    .collect(),
            ),
            Turn::ToolResult(results) => Content::user(
                results
                    .iter()
                    .map(|result| {
                        Part::function_response(FunctionResponse {
                            id: result.id.clone(),
                            name: result.name.clone(),
                            response: result.response.clone(),
                        })
                    })
                    .collect(),
            ),
        }
    }
}

/// What the model answered to a conversation: text, tool calls, or both
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConverseReply {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl ConverseReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            text: None,
            tool_calls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

impl From<&GenerateContentResponse> for ConverseReply {
    fn from(response: &GenerateContentResponse) -> Self {
        Self {
            text: response.text(),
            tool_calls: response
                .function_calls()
                .into_iter()
                .map(|(call, thought_signature)| ToolCall {
                    id: call.id,
                    name: call.name,
                    args: call.args,
                    thought_signature,
                })
                .collect(),
        }
    }
}
