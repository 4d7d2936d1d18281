//! Chat with the assistant.

use super::{first_text, require_text, to_document};
use crate::{ActionOutcome, MESSAGES, MeteredFeature, SessionContext, run_metered};
use async_trait::async_trait;
use stellarmind_client::{CancellationToken, OutboundRequest, TransportResponse};
use stellarmind_core::ChatMessage;
use stellarmind_error::{StellarmindError, StellarmindResult};
use stellarmind_interface::DocumentChangeStream;
use stellarmind_quota::FeatureKey;
use tracing::{debug, instrument, warn};

/// Reply stored when the backend returns no text.
pub const NO_REPLY_FALLBACK: &str = "Sorry, I couldn't generate a response.";

/// One chat turn: the user's message and the assistant's reply are both
/// appended to the user's message collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatFeature;

impl ChatFeature {
    async fn append(&self, ctx: &SessionContext, message: &ChatMessage) -> StellarmindResult<()> {
        super::record(ctx, MESSAGES, to_document(message)?).await?;
        Ok(())
    }

    async fn append_or_warn(&self, ctx: &SessionContext, message: &ChatMessage) {
        if let Err(e) = self.append(ctx, message).await {
            warn!(error = %e, "Could not store assistant message");
        }
    }
}

#[async_trait]
impl MeteredFeature for ChatFeature {
    type Input = String;
    type Output = String;

    fn key(&self) -> FeatureKey {
        FeatureKey::ChatMessage
    }

    fn validate(&self, input: &String) -> Result<(), String> {
        require_text(input, "Please enter a message.")
    }

    async fn before_request(&self, ctx: &SessionContext, input: &String) -> StellarmindResult<()> {
        let message = ChatMessage::user(ctx.identity().user_id(), input.as_str());
        self.append(ctx, &message).await
    }

    fn build_request(
        &self,
        ctx: &SessionContext,
        input: &String,
    ) -> StellarmindResult<OutboundRequest> {
        ctx.endpoints().text_request(input.as_str())
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
        _input: &String,
        output: &String,
    ) -> StellarmindResult<()> {
        self.append(ctx, &ChatMessage::ai(output.as_str())).await
    }

    fn no_output_message(&self) -> String {
        NO_REPLY_FALLBACK.to_string()
    }

    async fn on_no_output(&self, ctx: &SessionContext, _input: &String, message: &str) {
        self.append_or_warn(ctx, &ChatMessage::ai(message)).await;
    }

    fn failure_message(&self, error: &StellarmindError) -> String {
        format!(
            "Error: Could not get a response. {}. Please check your internet connection and ensure the API is running.",
            error.user_message()
        )
    }

    async fn on_failure(
        &self,
        ctx: &SessionContext,
        _input: &String,
        error: &StellarmindError,
        message: &str,
    ) {
        if error.is_cancelled() {
            debug!("Chat cancelled; no error message stored");
            return;
        }
        self.append_or_warn(ctx, &ChatMessage::ai(message)).await;
    }
}

/// Send `text` to the assistant.
pub async fn send_message(
    ctx: &SessionContext,
    text: &str,
    cancel: Option<&CancellationToken>,
) -> ActionOutcome<String> {
    run_metered(ctx, &ChatFeature, &text.to_string(), cancel).await
}

/// Stored chat messages, oldest first.
///
/// Documents that do not decode as a [`ChatMessage`] are skipped.
#[instrument(skip(ctx))]
pub async fn chat_history(ctx: &SessionContext) -> StellarmindResult<Vec<ChatMessage>> {
    let collection = ctx.collection(MESSAGES)?;
    let mut messages: Vec<ChatMessage> = ctx
        .store()
        .list(&collection)
        .await?
        .into_iter()
        .filter_map(|doc| match serde_json::from_value(doc.data().clone()) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!(id = doc.id(), error = %e, "Skipping unreadable chat message");
                None
            }
        })
        .collect();
    messages.sort_by_key(|message| message.timestamp);
    debug!(count = messages.len(), "Loaded chat history");
    Ok(messages)
}

/// Changes to the message collection from now on.
pub fn watch_messages(ctx: &SessionContext) -> StellarmindResult<DocumentChangeStream> {
    Ok(ctx.store().subscribe(&ctx.collection(MESSAGES)?))
}
