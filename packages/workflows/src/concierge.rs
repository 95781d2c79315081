// ABOUTME: Concierge chat session with lead qualification through tool calls
// ABOUTME: Split into begin/resolve/complete so the gateway round-trip can run detached from the session

use bionic_ai::{ConverseReply, ModelGateway, QualifyLeadArgs, ToolCall, ToolResult, Turn, QUALIFY_LEAD_TOOL};
use bionic_core::{is_blank, Message, QualifiedLead};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::crm::CrmRecorder;
use crate::status::{WorkflowError, WorkflowResult, WorkflowStatus};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Bionic Brokerage Concierge. How can I help you dominate the market today?";
pub const APOLOGY_MESSAGE: &str = "Technical glitch in the matrix. Please try again.";
pub const EMPTY_REPLY_FALLBACK: &str = "I've updated the records accordingly. Anything else?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConciergeState {
    Idle,
    AwaitingReply,
    ToolInFlight,
}

/// Intermediate events raised while a turn resolves
#[derive(Debug, Clone, PartialEq)]
pub enum TurnProgress {
    ToolInFlight,
    Qualified(QualifiedLead),
}

/// Everything a resolved turn contributes back to its session
#[derive(Debug)]
pub struct TurnResolution {
    tool_turns: Vec<Turn>,
    qualified_lead: Option<QualifiedLead>,
    outcome: WorkflowResult<String>,
}

impl TurnResolution {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn qualified_lead(&self) -> Option<&QualifiedLead> {
        self.qualified_lead.as_ref()
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        self.outcome.as_ref().err()
    }
}

/// A user turn waiting on the model, detached from the session that began it
#[derive(Debug, Clone)]
pub struct PendingTurn {
    history: Vec<Turn>,
}

impl PendingTurn {
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub async fn resolve(
        self,
        gateway: &dyn ModelGateway,
        crm: &dyn CrmRecorder,
        max_tool_rounds: usize,
    ) -> TurnResolution {
        self.resolve_with_progress(gateway, crm, max_tool_rounds, |_| {})
            .await
    }

    /// Run the converse/tool loop, reporting tool activity as it happens
    pub async fn resolve_with_progress<F>(
        self,
        gateway: &dyn ModelGateway,
        crm: &dyn CrmRecorder,
        max_tool_rounds: usize,
        mut on_progress: F,
    ) -> TurnResolution
    where
        F: FnMut(TurnProgress) + Send,
    {
        let mut history = self.history;
        let mut tool_turns = Vec::new();
        let mut qualified_lead = None;

        let outcome = run_turn(
            &mut history,
            &mut tool_turns,
            &mut qualified_lead,
            gateway,
            crm,
            max_tool_rounds,
            &mut on_progress,
        )
        .await;

        TurnResolution {
            tool_turns,
            qualified_lead,
            outcome,
        }
    }
}

async fn run_turn<F>(
    history: &mut Vec<Turn>,
    tool_turns: &mut Vec<Turn>,
    qualified_lead: &mut Option<QualifiedLead>,
    gateway: &dyn ModelGateway,
    crm: &dyn CrmRecorder,
    max_tool_rounds: usize,
    on_progress: &mut F,
) -> WorkflowResult<String>
where
    F: FnMut(TurnProgress) + Send,
{
    let mut reply = gateway.converse(history).await?;
    let mut rounds = 0;

    while reply.has_tool_calls() {
        if rounds >= max_tool_rounds {
            return Err(WorkflowError::ToolRoundsExceeded(max_tool_rounds));
        }
        rounds += 1;
        on_progress(TurnProgress::ToolInFlight);

        let mut results = Vec::with_capacity(reply.tool_calls.len());
        for call in &reply.tool_calls {
            let (result, lead) = execute_tool(call, crm)?;
            if let Some(lead) = lead {
                on_progress(TurnProgress::Qualified(lead.clone()));
                *qualified_lead = Some(lead);
            }
            results.push(result);
        }

        let ConverseReply { tool_calls, .. } = reply;
        for turn in [Turn::ToolInvocation(tool_calls), Turn::ToolResult(results)] {
            history.push(turn.clone());
            tool_turns.push(turn);
        }

        debug!("Re-invoking concierge after tool round {}", rounds);
        reply = gateway.converse(history).await?;
    }

    Ok(reply
        .text
        .filter(|text| !is_blank(text))
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
}

fn execute_tool(
    call: &ToolCall,
    crm: &dyn CrmRecorder,
) -> WorkflowResult<(ToolResult, Option<QualifiedLead>)> {
    if call.name != QUALIFY_LEAD_TOOL {
        warn!("Model requested unknown tool: {}", call.name);
        let response = json!({
            "status": "error",
            "message": format!("Unknown tool: {}", call.name),
        });
        return Ok((ToolResult::for_call(call, response), None));
    }

    let args: QualifyLeadArgs =
        serde_json::from_value(call.args.clone()).map_err(|e| WorkflowError::InvalidToolArguments {
            tool: call.name.clone(),
            reason: e.to_string(),
        })?;

    let lead = QualifiedLead {
        name: args.name,
        budget: args.budget,
    };
    crm.record_qualified(&lead);

    let response = qualification_receipt(&lead);
    Ok((ToolResult::for_call(call, response), Some(lead)))
}

fn qualification_receipt(lead: &QualifiedLead) -> Value {
    json!({
        "status": "success",
        "message": format!(
            "Lead {} with budget {} has been marked as qualified in the Bionic CRM.",
            lead.name, lead.budget
        ),
    })
}

/// A single concierge conversation: visible transcript, model history, and qualified lead
#[derive(Debug, Clone)]
pub struct ConciergeSession {
    messages: Vec<Message>,
    history: Vec<Turn>,
    qualified_lead: Option<QualifiedLead>,
    state: ConciergeState,
    status: WorkflowStatus,
}

impl Default for ConciergeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConciergeSession {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(WELCOME_MESSAGE)],
            history: vec![Turn::Assistant(WELCOME_MESSAGE.to_string())],
            qualified_lead: None,
            state: ConciergeState::Idle,
            status: WorkflowStatus::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn qualified_lead(&self) -> Option<&QualifiedLead> {
        self.qualified_lead.as_ref()
    }

    pub fn state(&self) -> ConciergeState {
        self.state
    }

    pub fn status(&self) -> &WorkflowStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.state != ConciergeState::Idle
    }

    /// Start a turn; returns None for blank input or while a turn is in flight
    pub fn begin_turn(&mut self, text: &str) -> Option<PendingTurn> {
        if is_blank(text) || self.is_busy() {
            return None;
        }

        self.messages.push(Message::user(text));
        self.history.push(Turn::User(text.to_string()));
        self.state = ConciergeState::AwaitingReply;
        self.status = WorkflowStatus::Busy;

        Some(PendingTurn {
            history: self.history.clone(),
        })
    }

    /// Reflect intermediate progress from a detached resolution
    pub fn apply_progress(&mut self, progress: TurnProgress) {
        if self.state == ConciergeState::Idle {
            return;
        }
        match progress {
            TurnProgress::ToolInFlight => self.state = ConciergeState::ToolInFlight,
            TurnProgress::Qualified(lead) => self.qualified_lead = Some(lead),
        }
    }

    /// Fold a resolution into the session; returns the assistant message it appended
    pub fn complete_turn(&mut self, resolution: TurnResolution) -> &Message {
        let TurnResolution {
            tool_turns,
            qualified_lead,
            outcome,
        } = resolution;

        if let Some(lead) = qualified_lead {
            info!("Concierge qualified lead: {} ({})", lead.name, lead.budget);
            self.qualified_lead = Some(lead);
        }

        let reply = match outcome {
            Ok(text) => {
                self.history.extend(tool_turns);
                self.status = WorkflowStatus::Idle;
                text
            }
            Err(e) => {
                warn!("Concierge turn failed: {}", e);
                self.status = WorkflowStatus::from_error(&e);
                APOLOGY_MESSAGE.to_string()
            }
        };

        self.history.push(Turn::Assistant(reply.clone()));
        self.messages.push(Message::assistant(reply));
        self.state = ConciergeState::Idle;

        &self.messages[self.messages.len() - 1]
    }

    /// Begin, resolve, and complete a turn in one call
    pub async fn submit(
        &mut self,
        text: &str,
        gateway: &dyn ModelGateway,
        crm: &dyn CrmRecorder,
        max_tool_rounds: usize,
    ) -> Option<&Message> {
        let pending = self.begin_turn(text)?;
        let resolution = pending.resolve(gateway, crm, max_tool_rounds).await;
        Some(self.complete_turn(resolution))
    }
}
