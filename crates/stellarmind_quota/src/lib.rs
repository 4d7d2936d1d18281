//! Usage quotas for metered features.
//!
//! Each session owns a [`QuotaState`] derived from the [`LimitTable`] of its
//! [`Tier`]. Metered actions call [`QuotaTracker::try_consume`] before touching
//! the network; a `false` answer means the feature is exhausted for this tier.
//!
//! ## Tiers
//!
//! | Feature              | Guest | Basic | Pro | Ultimate  |
//! |----------------------|-------|-------|-----|-----------|
//! | Image generation     | 5     | 10    | 25  | Unlimited |
//! | Code generation      | 5     | 10    | 25  | Unlimited |
//! | Canvas generation    | 5     | 10    | 25  | Unlimited |
//! | Deep research query  | 5     | 10    | 25  | Unlimited |
//! | Chat message         | 20    | 50    | 100 | Unlimited |
//!
//! ```
//! use stellarmind_quota::{FeatureKey, QuotaTracker, Remaining, Tier};
//!
//! let mut tracker = QuotaTracker::with_default_limits(Tier::Guest);
//! assert!(tracker.try_consume(FeatureKey::ChatMessage));
//! assert_eq!(tracker.remaining(FeatureKey::ChatMessage), Remaining::Limited(19));
//! ```

mod error;
mod feature;
mod remaining;
mod state;
mod table;
mod tier;
mod tracker;

pub use error::{QuotaError, QuotaErrorKind};
pub use feature::FeatureKey;
pub use remaining::Remaining;
pub use state::QuotaState;
pub use table::{LimitSchedule, LimitTable};
pub use tier::Tier;
pub use tracker::QuotaTracker;
