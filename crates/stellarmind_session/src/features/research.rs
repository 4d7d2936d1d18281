//! Long-form research summaries.

use super::{first_text, record, require_text};
use crate::{ActionOutcome, DEEP_RESEARCH_QUERIES, MeteredFeature, SessionContext, run_metered};
use async_trait::async_trait;
use chrono::Utc;
use stellarmind_client::{CancellationToken, OutboundRequest, TransportResponse};
use stellarmind_error::{StellarmindError, StellarmindResult};
use stellarmind_quota::FeatureKey;

/// Summarizes a topic in plain paragraphs and records query and answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResearchFeature;

impl ResearchFeature {
    /// Prompt sent to the text model.
    pub fn prompt(query: &str) -> String {
        format!(
            "As a highly knowledgeable research assistant, provide a comprehensive, detailed, and well-structured summary for the following topic: \"{}\".\n\
             Present the information in clear, continuous paragraphs, without using any markdown formatting symbols like hashtags (#), asterisks (*), underscores (_), or bullet points.\n\
             Ensure the response covers:\n\
             1. Key facts and definitions.\n\
             2. Current understanding or status.\n\
             3. Potential impacts or implications.\n\
             4. Future outlook or predictions (if applicable and based on current trends).\n\
             Provide direct, informative content.",
            query
        )
    }
}

#[async_trait]
impl MeteredFeature for ResearchFeature {
    type Input = String;
    type Output = String;

    fn key(&self) -> FeatureKey {
        FeatureKey::DeepResearchQuery
    }

    fn validate(&self, input: &String) -> Result<(), String> {
        require_text(input, "Please enter a research query.")
    }

    fn build_request(
        &self,
        ctx: &SessionContext,
        input: &String,
    ) -> StellarmindResult<OutboundRequest> {
        ctx.endpoints().text_request(Self::prompt(input))
    }

    fn parse(
        &self,
        _input: &String,
        response: &TransportResponse,
    ) -> StellarmindResult<Option<String>> {
        first_text(response)
    }

    async fn persist(
        &self,
        ctx: &SessionContext,
        input: &String,
        output: &String,
    ) -> StellarmindResult<()> {
        record(
            ctx,
            DEEP_RESEARCH_QUERIES,
            serde_json::json!({
                "query": input,
                "result": output,
                "timestamp": Utc::now(),
                "userId": ctx.identity().user_id(),
            }),
        )
        .await?;
        Ok(())
    }

    fn no_output_message(&self) -> String {
        "Failed to get a valid AI research summary. The LLM response was empty or malformed."
            .to_string()
    }

    fn failure_message(&self, error: &StellarmindError) -> String {
        format!(
            "An error occurred during research: {}. This is likely a network issue or the LLM service is temporarily unavailable. Please try again.",
            error.user_message()
        )
    }
}

/// Research `query`.
pub async fn research(
    ctx: &SessionContext,
    query: &str,
    cancel: Option<&CancellationToken>,
) -> ActionOutcome<String> {
    run_metered(ctx, &ResearchFeature, &query.to_string(), cancel).await
}
