//! JavaScript code generation.

use super::{first_text, require_text};
use crate::{ActionOutcome, MeteredFeature, SessionContext, run_metered};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use stellarmind_client::{CancellationToken, OutboundRequest, TransportResponse};
use stellarmind_error::{StellarmindError, StellarmindResult};
use stellarmind_quota::FeatureKey;
use tracing::debug;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:javascript|js|jsx|typescript|ts|tsx)?\n([\s\S]*?)\n```")
        .expect("Valid code fence regex")
});

/// Code inside the first fenced block, or the whole reply when there is none.
///
/// Blocks may be untagged or tagged as JavaScript or TypeScript. The result
/// is trimmed either way.
///
/// ```
/// use stellarmind_session::features::extract_code;
///
/// let reply = "Here you go:\n```js\nconsole.log(1);\n```\nEnjoy!";
/// assert_eq!(extract_code(reply), "console.log(1);");
/// assert_eq!(extract_code("  let x = 1;  "), "let x = 1;");
/// ```
pub fn extract_code(reply: &str) -> String {
    match CODE_FENCE.captures(reply).and_then(|caps| caps.get(1)) {
        Some(code) => code.as_str().trim().to_string(),
        None => {
            debug!("No fenced code block in reply; using raw text");
            reply.trim().to_string()
        }
    }
}

/// Asks for JavaScript and keeps only the code.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeFeature;

impl CodeFeature {
    /// Prompt sent to the text model.
    pub fn prompt(input: &str) -> String {
        format!(
            "Generate JavaScript code for the following request: \"{}\". Provide only the code block, without any additional text, explanations, or comments outside the code block itself.",
            input
        )
    }
}

#[async_trait]
impl MeteredFeature for CodeFeature {
    type Input = String;
    type Output = String;

    fn key(&self) -> FeatureKey {
        FeatureKey::CodeGeneration
    }

    fn validate(&self, input: &String) -> Result<(), String> {
        require_text(input, "Please enter a prompt for code generation.")
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
        Ok(first_text(response)?.map(|reply| extract_code(&reply)))
    }

    fn no_output_message(&self) -> String {
        "Failed to get a valid AI response.".to_string()
    }

    fn failure_message(&self, error: &StellarmindError) -> String {
        format!(
            "An error occurred: {}. Please check your internet connection and API status.",
            error.user_message()
        )
    }
}

/// Generate JavaScript for `request`.
pub async fn generate_code(
    ctx: &SessionContext,
    request: &str,
    cancel: Option<&CancellationToken>,
) -> ActionOutcome<String> {
    run_metered(ctx, &CodeFeature, &request.to_string(), cancel).await
}
