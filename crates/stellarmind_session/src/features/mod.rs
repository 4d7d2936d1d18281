//! Feature handlers.
//!
//! Each handler implements [`MeteredFeature`](crate::MeteredFeature) and has a
//! convenience function that runs it through [`run_metered`](crate::run_metered).

mod canvas;
mod chat;
mod code;
mod image;
mod research;

pub use canvas::{CanvasAutosave, CanvasDraft, CanvasFeature, CanvasKind, generate_canvas, load_canvas};
pub use chat::{ChatFeature, NO_REPLY_FALLBACK, chat_history, send_message, watch_messages};
pub use code::{CodeFeature, extract_code, generate_code};
pub use image::{ImageFeature, generate_image};
pub use research::{ResearchFeature, research};

use stellarmind_client::TransportResponse;
use stellarmind_client::gemini::{GenerateContentResponse, decode_json};
use stellarmind_error::{JsonError, StellarmindResult};
use stellarmind_interface::DocumentPath;

use crate::SessionContext;

/// Text of the first candidate, if any.
fn first_text(response: &TransportResponse) -> StellarmindResult<Option<String>> {
    let decoded: GenerateContentResponse = decode_json(response)?;
    Ok(decoded.first_text().map(str::to_string))
}

/// Accept non-blank text, otherwise return `message`.
fn require_text(input: &str, message: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// Append a record to the user's collection `name`.
async fn record(
    ctx: &SessionContext,
    name: &str,
    data: serde_json::Value,
) -> StellarmindResult<DocumentPath> {
    let collection = ctx.collection(name)?;
    ctx.store().add(&collection, data).await
}

fn to_document<T: serde::Serialize>(value: &T) -> StellarmindResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| JsonError::encode(e).into())
}
