//! Guest and plan tiers.

use crate::{QuotaError, QuotaErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Category controlling which limit table a session uses.
///
/// `Guest` applies to anonymous sessions; `Basic`, `Pro` and `Ultimate` are plans
/// a registered user can select.
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
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Anonymous session
    Guest,
    /// Default plan for registered users
    Basic,
    /// Higher limits
    Pro,
    /// No limits
    Ultimate,
}

impl Tier {
    /// Tier for a session given its guest flag and the selected plan name.
    ///
    /// Guests always get [`Tier::Guest`]. Registered users with a missing or
    /// unrecognised plan fall back to [`Tier::Basic`].
    ///
    /// ```
    /// use stellarmind_quota::Tier;
    ///
    /// assert_eq!(Tier::for_session(true, Some("Ultimate")), Tier::Guest);
    /// assert_eq!(Tier::for_session(false, Some("pro")), Tier::Pro);
    /// assert_eq!(Tier::for_session(false, Some("Platinum")), Tier::Basic);
    /// assert_eq!(Tier::for_session(false, None), Tier::Basic);
    /// ```
    pub fn for_session(is_guest: bool, plan: Option<&str>) -> Self {
        if is_guest {
            return Tier::Guest;
        }
        match plan.map(str::parse::<Tier>) {
            Some(Ok(tier)) if tier.is_plan() => tier,
            other => {
                debug!(plan = ?plan, parsed = ?other, "Unrecognised plan, using Basic");
                Tier::Basic
            }
        }
    }

    /// Whether this tier is a selectable plan (everything except `Guest`).
    pub fn is_plan(&self) -> bool {
        !matches!(self, Tier::Guest)
    }
}

impl FromStr for Tier {
    type Err = QuotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Tier::Guest),
            "basic" => Ok(Tier::Basic),
            "pro" => Ok(Tier::Pro),
            "ultimate" => Ok(Tier::Ultimate),
            _ => Err(QuotaError::new(QuotaErrorKind::InvalidTier(s.to_string()))),
        }
    }
}
