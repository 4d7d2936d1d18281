//! Creative canvas: generated writing plus a debounced autosave of edits.

use super::{first_text, require_text};
use crate::{ActionOutcome, CREATIVE_CANVAS, MeteredFeature, SessionContext, run_metered};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use stellarmind_client::{CancellationToken, OutboundRequest, TransportResponse};
use stellarmind_error::{StellarmindError, StellarmindResult};
use stellarmind_interface::{DocumentPath, DocumentStore};
use stellarmind_quota::FeatureKey;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Id of the single canvas document per user.
const CANVAS_DOCUMENT: &str = "main";

/// Quiet period before an edit is saved.
pub const AUTOSAVE_QUIET_PERIOD: Duration = Duration::from_secs(1);

/// Kind of writing requested, detected from the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CanvasKind {
    /// Prompt mentions a story
    Story,
    /// Prompt mentions a poem
    Poem,
    /// Prompt mentions a script
    Script,
    /// Anything else
    Content,
}

impl CanvasKind {
    /// First of story, poem or script mentioned in `prompt`, case-insensitively.
    ///
    /// ```
    /// use stellarmind_session::features::CanvasKind;
    ///
    /// assert_eq!(CanvasKind::detect("A POEM about the sea"), CanvasKind::Poem);
    /// assert_eq!(CanvasKind::detect("a story and a poem"), CanvasKind::Story);
    /// assert_eq!(CanvasKind::detect("a haiku"), CanvasKind::Content);
    /// ```
    pub fn detect(prompt: &str) -> Self {
        let prompt = prompt.to_lowercase();
        if prompt.contains("story") {
            CanvasKind::Story
        } else if prompt.contains("poem") {
            CanvasKind::Poem
        } else if prompt.contains("script") {
            CanvasKind::Script
        } else {
            CanvasKind::Content
        }
    }
}

/// Generated canvas text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasDraft {
    /// Detected kind
    pub kind: CanvasKind,
    /// Generated text
    pub content: String,
}

/// Writes a story, poem, script or other content and saves it to the canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasFeature;

impl CanvasFeature {
    /// Prompt sent to the text model.
    pub fn prompt(input: &str) -> String {
        format!(
            "Generate a {} based on the following prompt: \"{}\".",
            CanvasKind::detect(input).to_string().to_lowercase(),
            input
        )
    }
}

fn canvas_path(ctx: &SessionContext) -> StellarmindResult<DocumentPath> {
    ctx.document(CREATIVE_CANVAS, CANVAS_DOCUMENT)
}

async fn save_canvas(
    store: &dyn DocumentStore,
    path: &DocumentPath,
    content: &str,
) -> StellarmindResult<()> {
    store
        .set(
            path,
            serde_json::json!({"content": content, "timestamp": Utc::now()}),
            true,
        )
        .await
}

#[async_trait]
impl MeteredFeature for CanvasFeature {
    type Input = String;
    type Output = CanvasDraft;

    fn key(&self) -> FeatureKey {
        FeatureKey::CanvasGeneration
    }

    fn validate(&self, input: &String) -> Result<(), String> {
        require_text(
            input,
            "Please enter a prompt before asking AI to generate content.",
        )
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
        input: &String,
        response: &TransportResponse,
    ) -> StellarmindResult<Option<CanvasDraft>> {
        Ok(first_text(response)?.map(|content| CanvasDraft {
            kind: CanvasKind::detect(input),
            content,
        }))
    }

    async fn persist(
        &self,
        ctx: &SessionContext,
        _input: &String,
        output: &CanvasDraft,
    ) -> StellarmindResult<()> {
        save_canvas(ctx.store().as_ref(), &canvas_path(ctx)?, &output.content).await
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

/// Generate canvas content for `prompt`.
pub async fn generate_canvas(
    ctx: &SessionContext,
    prompt: &str,
    cancel: Option<&CancellationToken>,
) -> ActionOutcome<CanvasDraft> {
    run_metered(ctx, &CanvasFeature, &prompt.to_string(), cancel).await
}

/// Saved canvas content, or an empty string when nothing was saved yet.
#[instrument(skip_all)]
pub async fn load_canvas(ctx: &SessionContext) -> StellarmindResult<String> {
    let stored = ctx.store().get(&canvas_path(ctx)?).await?;
    let content = stored
        .as_ref()
        .and_then(|doc| doc.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or_default()
        .to_string();
    if stored.is_none() {
        info!("No canvas content found, starting fresh");
    }
    Ok(content)
}

/// Saves canvas edits once typing pauses.
///
/// Each [`CanvasAutosave::update`] restarts the quiet period; only the latest
/// content is written when it elapses. Save failures are logged and do not
/// stop later saves. [`CanvasAutosave::shutdown`] writes any pending edit.
#[derive(Debug)]
pub struct CanvasAutosave {
    edits: watch::Sender<String>,
    task: JoinHandle<()>,
}

impl CanvasAutosave {
    /// Autosaver for the session's canvas with the default quiet period.
    pub fn for_session(ctx: &SessionContext) -> StellarmindResult<Self> {
        Ok(Self::spawn(
            Arc::clone(ctx.store()),
            canvas_path(ctx)?,
            AUTOSAVE_QUIET_PERIOD,
        ))
    }

    /// Autosaver writing to `path` in `store`.
    pub fn spawn(store: Arc<dyn DocumentStore>, path: DocumentPath, quiet: Duration) -> Self {
        let (edits, receiver) = watch::channel(String::new());
        let task = tokio::spawn(autosave_loop(store, path, quiet, receiver));
        Self { edits, task }
    }

    /// Record an edit.
    pub fn update(&self, content: impl Into<String>) {
        self.edits.send_replace(content.into());
    }

    /// Stop, saving any pending edit first.
    pub async fn shutdown(self) {
        drop(self.edits);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Canvas autosave task ended abnormally");
        }
    }
}

async fn autosave_loop(
    store: Arc<dyn DocumentStore>,
    path: DocumentPath,
    quiet: Duration,
    mut edits: watch::Receiver<String>,
) {
    while edits.changed().await.is_ok() {
        let mut open = true;
        loop {
            match tokio::time::timeout(quiet, edits.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => {
                    open = false;
                    break;
                }
                Err(_) => break,
            }
        }

        let content = edits.borrow_and_update().clone();
        match save_canvas(store.as_ref(), &path, &content).await {
            Ok(()) => debug!(bytes = content.len(), "Canvas content saved"),
            Err(e) => warn!(error = %e, "Failed to save canvas content automatically"),
        }

        if !open {
            break;
        }
    }
}
