//! Metered feature identifiers.

use crate::{QuotaError, QuotaErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the five metered capabilities.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKey {
    /// Text-to-image generation
    #[display("image_generation")]
    ImageGeneration,
    /// Code assistant
    #[display("code_generation")]
    CodeGeneration,
    /// Creative canvas writing
    #[display("canvas_generation")]
    CanvasGeneration,
    /// Deep research summaries
    #[display("deep_research_query")]
    DeepResearchQuery,
    /// Chat turns
    #[display("chat_message")]
    ChatMessage,
}

impl FeatureKey {
    /// Human-readable name used in notices shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureKey::ImageGeneration => "image generation",
            FeatureKey::CodeGeneration => "code generation",
            FeatureKey::CanvasGeneration => "creative canvas generation",
            FeatureKey::DeepResearchQuery => "deep research query",
            FeatureKey::ChatMessage => "chat message",
        }
    }

    /// Notice shown when this feature's quota is exhausted.
    pub fn exhausted_notice(&self) -> String {
        format!(
            "You've reached the {} limit for your current plan. Please upgrade for more access!",
            self.label()
        )
    }
}

impl FromStr for FeatureKey {
    type Err = QuotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "image_generation" => Ok(FeatureKey::ImageGeneration),
            "code_generation" => Ok(FeatureKey::CodeGeneration),
            "canvas_generation" => Ok(FeatureKey::CanvasGeneration),
            "deep_research_query" => Ok(FeatureKey::DeepResearchQuery),
            "chat_message" => Ok(FeatureKey::ChatMessage),
            _ => Err(QuotaError::new(QuotaErrorKind::InvalidFeature(
                s.to_string(),
            ))),
        }
    }
}
