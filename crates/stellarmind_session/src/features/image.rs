//! Text-to-image generation.

use super::{record, require_text};
use crate::{ActionOutcome, IMAGE_GENERATIONS, MeteredFeature, SessionContext, run_metered};
use async_trait::async_trait;
use chrono::Utc;
use stellarmind_client::gemini::{GeneratedImage, PredictResponse, decode_json};
use stellarmind_client::{CancellationToken, OutboundRequest, TransportResponse};
use stellarmind_error::{StellarmindError, StellarmindResult};
use stellarmind_quota::FeatureKey;

/// Generates one photorealistic image and records the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFeature;

impl ImageFeature {
    /// Prompt sent to the image model.
    pub fn prompt(input: &str) -> String {
        format!(
            "A clear, high-quality, photorealistic image of the following: \"{}\"",
            input
        )
    }
}

#[async_trait]
impl MeteredFeature for ImageFeature {
    type Input = String;
    type Output = GeneratedImage;

    fn key(&self) -> FeatureKey {
        FeatureKey::ImageGeneration
    }

    fn validate(&self, input: &String) -> Result<(), String> {
        require_text(input, "Please enter a prompt to generate an image.")
    }

    fn build_request(
        &self,
        ctx: &SessionContext,
        input: &String,
    ) -> StellarmindResult<OutboundRequest> {
        ctx.endpoints().image_request(Self::prompt(input))
    }

    fn parse(
        &self,
        _input: &String,
        response: &TransportResponse,
    ) -> StellarmindResult<Option<GeneratedImage>> {
        let decoded: PredictResponse = decode_json(response)?;
        decoded.first_image()
    }

    async fn persist(
        &self,
        ctx: &SessionContext,
        input: &String,
        _output: &GeneratedImage,
    ) -> StellarmindResult<()> {
        record(
            ctx,
            IMAGE_GENERATIONS,
            serde_json::json!({
                "prompt": input,
                "timestamp": Utc::now(),
                "userId": ctx.identity().user_id(),
            }),
        )
        .await?;
        Ok(())
    }

    fn no_output_message(&self) -> String {
        "Failed to generate image. The API response was valid but did not contain image data."
            .to_string()
    }

    fn failure_message(&self, error: &StellarmindError) -> String {
        format!(
            "An unexpected error occurred: {}. Please check your network connection or try again.",
            error.user_message()
        )
    }
}

/// Generate an image of `prompt`.
pub async fn generate_image(
    ctx: &SessionContext,
    prompt: &str,
    cancel: Option<&CancellationToken>,
) -> ActionOutcome<GeneratedImage> {
    run_metered(ctx, &ImageFeature, &prompt.to_string(), cancel).await
}
