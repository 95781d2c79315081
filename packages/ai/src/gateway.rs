// ABOUTME: Model gateway used by every brokerage workflow
// ABOUTME: One trait with four round-trip operations and its Gemini-backed implementation

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bionic_config::GatewayConfig;
use bionic_core::{is_blank, LeadSnapshot, MarketingContent, RankedLead, RoomAnalysis, TOP_LEAD_COUNT};
use bionic_prompts::PromptManager;
use tracing::{debug, info, warn};

use crate::conversation::{ConverseReply, Turn};
use crate::service::{AIServiceError, AIServiceResult, GeminiService};
use crate::tools::concierge_tools;
use crate::types::{Content, GenerateContentRequest, Part};

const CONCIERGE_PROMPT: &str = "concierge";
const LISTING_SUITE_PROMPT: &str = "listing_suite";
const ROOM_ANALYSIS_PROMPT: &str = "room_analysis";
const PROPENSITY_PROMPT: &str = "propensity";

/// Round-trip operations against the hosted model
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send the full conversation with the qualifyLead tool declared
    async fn converse(&self, history: &[Turn]) -> AIServiceResult<ConverseReply>;

    /// Turn free-text property notes into a marketing suite
    async fn generate_marketing_copy(&self, notes: &str) -> AIServiceResult<MarketingContent>;

    /// Extract architectural style and selling features from a room photo
    async fn analyze_image(&self, image: &[u8], mime_type: &str) -> AIServiceResult<RoomAnalysis>;

    /// Ask for the top leads most likely to sell within six months
    async fn rank_propensity(&self, leads: &[LeadSnapshot]) -> AIServiceResult<Vec<RankedLead>>;
}

/// Gateway backed by the Gemini REST API
pub struct GeminiGateway {
    service: GeminiService,
    prompts: PromptManager,
}

impl GeminiGateway {
    pub fn new(config: GatewayConfig, prompts: PromptManager) -> Self {
        Self {
            service: GeminiService::new(config),
            prompts,
        }
    }

    pub fn model(&self) -> &str {
        self.service.model()
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn converse(&self, history: &[Turn]) -> AIServiceResult<ConverseReply> {
        let system_instruction = self.prompts.get_system_prompt(CONCIERGE_PROMPT)?;
        let contents = history.iter().map(Turn::to_content).collect();

        let request = GenerateContentRequest::new(contents)
            .with_system_instruction(system_instruction)
            .with_tools(concierge_tools());

        let response = self.service.generate_content(&request).await?;
        let reply = ConverseReply::from(&response.data);
        debug!(
            "Concierge reply: text={}, tool_calls={}",
            reply.text.is_some(),
            reply.tool_calls.len()
        );
        Ok(reply)
    }

    async fn generate_marketing_copy(&self, notes: &str) -> AIServiceResult<MarketingContent> {
        if is_blank(notes) {
            return Err(AIServiceError::InvalidInput(
                "property notes are empty".to_string(),
            ));
        }

        let prompt = self
            .prompts
            .get_prompt(LISTING_SUITE_PROMPT, &[("notes", notes)])?;
        let schema = self.prompts.get_output_schema(LISTING_SUITE_PROMPT)?;

        let request = GenerateContentRequest::new(vec![Content::user(vec![Part::text(prompt)])])
            .with_json_schema(schema);

        let response = self
            .service
            .generate_structured::<MarketingContent>(&request)
            .await?;
        info!("Generated marketing suite ({} tokens)", response.usage.total_tokens());
        Ok(response.data)
    }

    async fn analyze_image(&self, image: &[u8], mime_type: &str) -> AIServiceResult<RoomAnalysis> {
        if image.is_empty() {
            return Err(AIServiceError::InvalidInput("image is empty".to_string()));
        }
        if is_blank(mime_type) {
            return Err(AIServiceError::InvalidInput(
                "image MIME type is missing".to_string(),
            ));
        }

        let prompt = self.prompts.get_prompt(ROOM_ANALYSIS_PROMPT, &[])?;
        let schema = self.prompts.get_output_schema(ROOM_ANALYSIS_PROMPT)?;

        let parts = vec![
            Part::inline_data(mime_type, STANDARD.encode(image)),
            Part::text(prompt),
        ];
        let request = GenerateContentRequest::new(vec![Content::user(parts)]).with_json_schema(schema);

        let response = self.service.generate_structured::<RoomAnalysis>(&request).await?;
        info!(
            "Analyzed room image ({} bytes, {}): style={}",
            image.len(),
            mime_type,
            response.data.architectural_style
        );
        Ok(response.data)
    }

    async fn rank_propensity(&self, leads: &[LeadSnapshot]) -> AIServiceResult<Vec<RankedLead>> {
        let leads_json = serde_json::to_string(leads)
            .map_err(|e| AIServiceError::InvalidInput(format!("unserializable leads: {}", e)))?;
        let count = leads.len().to_string();

        let prompt = self.prompts.get_prompt(
            PROPENSITY_PROMPT,
            &[("count", count.as_str()), ("leads", leads_json.as_str())],
        )?;
        let schema = self.prompts.get_output_schema(PROPENSITY_PROMPT)?;

        let request = GenerateContentRequest::new(vec![Content::user(vec![Part::text(prompt)])])
            .with_json_schema(schema);

        let mut ranked = self
            .service
            .generate_structured::<Vec<RankedLead>>(&request)
            .await?
            .data;
        if ranked.len() > TOP_LEAD_COUNT {
            warn!(
                "Model returned {} ranked leads, keeping the first {}",
                ranked.len(),
                TOP_LEAD_COUNT
            );
            ranked.truncate(TOP_LEAD_COUNT);
        }

        info!("Ranked {} of {} leads", ranked.len(), leads.len());
        Ok(ranked)
    }
}
