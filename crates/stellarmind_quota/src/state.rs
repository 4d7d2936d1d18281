//! Per-session quota state.

use crate::{FeatureKey, LimitSchedule, LimitTable, Remaining, Tier};

/// Remaining uses of every metered feature for one session.
///
/// Created from a tier's [`LimitTable`] and changed only through
/// [`QuotaState::decrement`]. A tier change discards the state entirely.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct QuotaState {
    /// Tier the state was initialized for
    tier: Tier,
    /// Bounds the state started from
    limits: LimitTable,
    /// Uses left per feature
    remaining: LimitTable,
}

impl QuotaState {
    /// Fresh state holding the built-in table for `tier`.
    pub fn initialize(tier: Tier) -> Self {
        Self::from_table(tier, LimitTable::for_tier(tier))
    }

    /// Fresh state for `tier` taken from a configured schedule.
    pub fn from_schedule(tier: Tier, schedule: &LimitSchedule) -> Self {
        Self::from_table(tier, *schedule.table(tier))
    }

    fn from_table(tier: Tier, limits: LimitTable) -> Self {
        Self {
            tier,
            limits,
            remaining: limits,
        }
    }

    /// Uses left for `key`.
    pub fn remaining_for(&self, key: FeatureKey) -> Remaining {
        self.remaining.get(key)
    }

    /// Check-and-consume one use of `key`.
    ///
    /// Returns the next state and whether the use is allowed. Unlimited
    /// features and denied uses return an unchanged copy.
    ///
    /// ```
    /// use stellarmind_quota::{FeatureKey, QuotaState, Remaining, Tier};
    ///
    /// let state = QuotaState::initialize(Tier::Basic);
    /// let (next, allowed) = state.decrement(FeatureKey::ImageGeneration);
    /// assert!(allowed);
    /// assert_eq!(next.remaining_for(FeatureKey::ImageGeneration), Remaining::Limited(9));
    /// ```
    #[must_use]
    pub fn decrement(&self, key: FeatureKey) -> (QuotaState, bool) {
        match self.remaining.get(key).consumed() {
            Some(next) => {
                let state = Self {
                    remaining: self.remaining.with(key, next),
                    ..self.clone()
                };
                (state, true)
            }
            None => (self.clone(), false),
        }
    }
}
