//! Session-owned quota tracker.

use crate::{FeatureKey, LimitSchedule, QuotaState, Remaining, Tier};
use tracing::{debug, info, instrument};

/// Owns a session's limit schedule and current [`QuotaState`].
///
/// `try_consume` never suspends, so the read and the write of a remaining count
/// always happen in one step.
#[derive(Debug, Clone)]
pub struct QuotaTracker {
    schedule: LimitSchedule,
    state: QuotaState,
}

impl QuotaTracker {
    /// Tracker for `tier` using a configured schedule.
    pub fn new(tier: Tier, schedule: LimitSchedule) -> Self {
        let state = QuotaState::from_schedule(tier, &schedule);
        Self { schedule, state }
    }

    /// Tracker for `tier` using the built-in tables.
    pub fn with_default_limits(tier: Tier) -> Self {
        Self::new(tier, LimitSchedule::default())
    }

    /// Consume one use of `key` if any are left.
    ///
    /// Returns `false` when the quota is exhausted; the caller must not
    /// perform the gated action in that case.
    #[instrument(skip(self), fields(tier = %self.state.tier()))]
    pub fn try_consume(&mut self, key: FeatureKey) -> bool {
        let (next, allowed) = self.state.decrement(key);
        if allowed {
            debug!(remaining = %next.remaining_for(key), "Quota consumed");
            self.state = next;
        } else {
            info!("Quota exhausted");
        }
        allowed
    }

    /// Replace the state with a fresh one for `tier`.
    ///
    /// Partially consumed quota under the old tier is discarded, even when the
    /// tier is unchanged.
    #[instrument(skip(self), fields(from = %self.state.tier()))]
    pub fn on_tier_change(&mut self, tier: Tier) -> &QuotaState {
        info!(to = %tier, "Resetting quota for tier change");
        self.state = QuotaState::from_schedule(tier, &self.schedule);
        &self.state
    }

    /// Uses left for `key`.
    pub fn remaining(&self, key: FeatureKey) -> Remaining {
        self.state.remaining_for(key)
    }

    /// Current tier.
    pub fn tier(&self) -> Tier {
        *self.state.tier()
    }

    /// Current state.
    pub fn state(&self) -> &QuotaState {
        &self.state
    }

    /// Owned copy of the current state for display.
    pub fn snapshot(&self) -> QuotaState {
        self.state.clone()
    }

    /// Schedule used for resets.
    pub fn schedule(&self) -> &LimitSchedule {
        &self.schedule
    }
}
