//! The metered-action pipeline shared by every feature handler.

use crate::{ActionOutcome, SessionContext};
use async_trait::async_trait;
use stellarmind_client::{CancellationToken, OutboundRequest, TransportResponse};
use stellarmind_error::{StellarmindError, StellarmindResult};
use stellarmind_quota::FeatureKey;
use tracing::{debug, info, instrument, warn};

/// A quota-gated capability backed by one outbound request.
///
/// Implementors describe how to build the request and read the answer;
/// [`run_metered`] handles in-flight tracking, quota and error reporting.
#[async_trait]
pub trait MeteredFeature: Send + Sync {
    /// What the user submits
    type Input: Send + Sync;
    /// What a successful action yields
    type Output: Send + Sync;

    /// Quota this feature draws from.
    fn key(&self) -> FeatureKey;

    /// Reject unusable input with the message to show.
    fn validate(&self, input: &Self::Input) -> Result<(), String>;

    /// Runs after quota is consumed and before the request is sent.
    async fn before_request(
        &self,
        _ctx: &SessionContext,
        _input: &Self::Input,
    ) -> StellarmindResult<()> {
        Ok(())
    }

    /// The outbound request for `input`.
    fn build_request(
        &self,
        ctx: &SessionContext,
        input: &Self::Input,
    ) -> StellarmindResult<OutboundRequest>;

    /// Read the output from a success response; `None` means no usable output.
    fn parse(
        &self,
        input: &Self::Input,
        response: &TransportResponse,
    ) -> StellarmindResult<Option<Self::Output>>;

    /// Stores the output. A failure here fails the action.
    async fn persist(
        &self,
        _ctx: &SessionContext,
        _input: &Self::Input,
        _output: &Self::Output,
    ) -> StellarmindResult<()> {
        Ok(())
    }

    /// Message shown when the response carried no usable output.
    fn no_output_message(&self) -> String;

    /// Runs when the response carried no usable output.
    async fn on_no_output(&self, _ctx: &SessionContext, _input: &Self::Input, _message: &str) {}

    /// Message shown when the action failed with `error`.
    fn failure_message(&self, error: &StellarmindError) -> String {
        error.user_message()
    }

    /// Runs when the action failed with `error`; `message` is what the user sees.
    async fn on_failure(
        &self,
        _ctx: &SessionContext,
        _input: &Self::Input,
        _error: &StellarmindError,
        _message: &str,
    ) {
    }
}

/// Run `feature` for `input` within `ctx`.
///
/// Steps, in order:
/// 1. validate the input ([`ActionOutcome::InvalidInput`]);
/// 2. mark the feature in flight ([`ActionOutcome::Busy`] if it already is);
/// 3. consume one use ([`ActionOutcome::QuotaExhausted`] if none are left);
/// 4. send the request with retry, parse and persist.
///
/// Nothing is consumed on the first two exits, and nothing is sent on the
/// first three. The in-flight marker is cleared on every path.
#[instrument(skip_all, fields(feature = %feature.key()))]
pub async fn run_metered<F: MeteredFeature>(
    ctx: &SessionContext,
    feature: &F,
    input: &F::Input,
    cancel: Option<&CancellationToken>,
) -> ActionOutcome<F::Output> {
    let key = feature.key();

    if let Err(message) = feature.validate(input) {
        debug!("Rejected empty input");
        return ActionOutcome::InvalidInput { message };
    }

    let Some(_guard) = ctx.in_flight().try_acquire(key) else {
        info!("Request already in flight");
        return ActionOutcome::Busy;
    };

    if !ctx.try_consume(key) {
        return ActionOutcome::QuotaExhausted {
            notice: key.exhausted_notice(),
        };
    }

    match perform(ctx, feature, input, cancel).await {
        Ok(Some(output)) => {
            debug!("Action completed");
            ActionOutcome::Completed(output)
        }
        Ok(None) => {
            let message = feature.no_output_message();
            warn!("Response carried no usable output");
            feature.on_no_output(ctx, input, &message).await;
            ActionOutcome::NoOutput { message }
        }
        Err(e) => {
            warn!(error = %e, "Action failed");
            let message = feature.failure_message(&e);
            feature.on_failure(ctx, input, &e, &message).await;
            ActionOutcome::Failed { message }
        }
    }
}

async fn perform<F: MeteredFeature>(
    ctx: &SessionContext,
    feature: &F,
    input: &F::Input,
    cancel: Option<&CancellationToken>,
) -> StellarmindResult<Option<F::Output>> {
    feature.before_request(ctx, input).await?;
    let request = feature.build_request(ctx, input)?;
    let response = ctx.client().fetch_with_retry(&request, cancel).await?;
    let Some(output) = feature.parse(input, &response)? else {
        return Ok(None);
    };
    feature.persist(ctx, input, &output).await?;
    Ok(Some(output))
}
