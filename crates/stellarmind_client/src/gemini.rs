//! Request and response envelopes of the generative-AI backend.
//!
//! Text features call `models/{model}:generateContent`; image generation calls
//! `models/{model}:predict`. A response that decodes but carries no candidate
//! (or no image) is not an error: the accessors return `None` and the caller
//! shows a fallback message.

use crate::{ClientConfig, OutboundRequest, TransportResponse};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stellarmind_error::{StellarmindResult, UpstreamError, UpstreamErrorKind};
use tracing::warn;

const SNIPPET_CHARS: usize = 200;

/// One piece of message content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    /// Text of this part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A turn of conversation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    /// Author role ("user" or "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Conversation turns
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single user turn holding `prompt`.
    pub fn user_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
        }
    }
}

/// One candidate answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
}

/// Body returned by `generateContent`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate answers; may be absent
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Prompt instance for `predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictInstance {
    /// Image prompt
    pub prompt: String,
}

/// Sampling parameters for `predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    /// Number of images to generate
    pub sample_count: u32,
}

/// Body of a `predict` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Prompt instance
    pub instances: PredictInstance,
    /// Sampling parameters
    pub parameters: PredictParameters,
}

impl PredictRequest {
    /// Request for a single image of `prompt`.
    pub fn single(prompt: impl Into<String>) -> Self {
        Self {
            instances: PredictInstance {
                prompt: prompt.into(),
            },
            parameters: PredictParameters { sample_count: 1 },
        }
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// PNG bytes, base64 encoded
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
}

/// Body returned by `predict`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Generated images; may be absent
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// A decoded image ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Raw PNG bytes
    pub bytes: Vec<u8>,
    /// `data:image/png;base64,...` URL
    pub data_url: String,
}

impl PredictResponse {
    /// First image, validated as base64.
    ///
    /// Returns `Ok(None)` when the response carries no image data.
    pub fn first_image(&self) -> StellarmindResult<Option<GeneratedImage>> {
        let Some(encoded) = self
            .predictions
            .first()
            .and_then(|p| p.bytes_base64_encoded.as_deref())
        else {
            return Ok(None);
        };
        let bytes = STANDARD.decode(encoded).map_err(|e| {
            UpstreamError::new(UpstreamErrorKind::InvalidImageData(e.to_string()))
        })?;
        Ok(Some(GeneratedImage {
            bytes,
            data_url: format!("data:image/png;base64,{}", encoded),
        }))
    }
}

/// Decode a JSON response body.
///
/// Fails with [`UpstreamErrorKind::UnexpectedContentType`] when the response
/// does not declare JSON, and [`UpstreamErrorKind::Decode`] when the body does
/// not match `T`.
pub fn decode_json<T: DeserializeOwned>(response: &TransportResponse) -> StellarmindResult<T> {
    if !response.is_json() {
        let snippet: String = response.text().chars().take(SNIPPET_CHARS).collect();
        warn!(content_type = ?response.content_type(), "Non-JSON response from AI service");
        return Err(UpstreamError::new(UpstreamErrorKind::UnexpectedContentType {
            content_type: response
                .content_type()
                .unwrap_or("no content type")
                .to_string(),
            snippet,
        })
        .into());
    }
    response
        .json()
        .map_err(|e| UpstreamError::new(UpstreamErrorKind::Decode(e.kind().reason().to_string())).into())
}

/// Endpoint URLs and request constructors for one API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiEndpoints {
    base_url: String,
    text_model: String,
    image_model: String,
    api_key: String,
}

impl GeminiEndpoints {
    /// Endpoints for explicit models and key.
    pub fn new(
        base_url: impl Into<String>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            text_model: text_model.into(),
            image_model: image_model.into(),
            api_key: api_key.into(),
        }
    }

    /// Endpoints described by `config`, reading the key from its environment variable.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.text_model,
            &config.image_model,
            config.api_key(),
        )
    }

    /// `generateContent` URL for the text model.
    pub fn text_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.text_model, self.api_key
        )
    }

    /// `predict` URL for the image model.
    pub fn image_url(&self) -> String {
        format!(
            "{}/models/{}:predict?key={}",
            self.base_url, self.image_model, self.api_key
        )
    }

    /// Text generation request for `prompt`.
    pub fn text_request(&self, prompt: impl Into<String>) -> StellarmindResult<OutboundRequest> {
        let body = serde_json::to_value(GenerateContentRequest::user_prompt(prompt))
            .map_err(stellarmind_error::JsonError::encode)?;
        Ok(OutboundRequest::post_json(self.text_url(), body))
    }

    /// Image generation request for `prompt`.
    pub fn image_request(&self, prompt: impl Into<String>) -> StellarmindResult<OutboundRequest> {
        let body = serde_json::to_value(PredictRequest::single(prompt))
            .map_err(stellarmind_error::JsonError::encode)?;
        Ok(OutboundRequest::post_json(self.image_url(), body))
    }
}
