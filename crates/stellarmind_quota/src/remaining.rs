//! Remaining-use counts.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const UNLIMITED: &str = "unlimited";

/// A per-feature bound or remaining count.
///
/// In configuration files a count is written as a plain integer and
/// [`Remaining::Unlimited`] as the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Remaining {
    /// A finite number of uses left
    Limited(u32),
    /// No bound; consuming never changes the count
    Unlimited,
}

impl Remaining {
    /// True when no uses are left.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Remaining::Limited(0))
    }

    /// True for [`Remaining::Unlimited`].
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Remaining::Unlimited)
    }

    /// Count after one use, or `None` when exhausted.
    ///
    /// ```
    /// use stellarmind_quota::Remaining;
    ///
    /// assert_eq!(Remaining::Limited(2).consumed(), Some(Remaining::Limited(1)));
    /// assert_eq!(Remaining::Limited(0).consumed(), None);
    /// assert_eq!(Remaining::Unlimited.consumed(), Some(Remaining::Unlimited));
    /// ```
    pub fn consumed(self) -> Option<Remaining> {
        match self {
            Remaining::Unlimited => Some(Remaining::Unlimited),
            Remaining::Limited(n) => n.checked_sub(1).map(Remaining::Limited),
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Limited(n) => write!(f, "{}", n),
            Remaining::Unlimited => write!(f, "Unlimited"),
        }
    }
}

impl From<Option<u32>> for Remaining {
    /// `None` means unlimited.
    fn from(value: Option<u32>) -> Self {
        value.map_or(Remaining::Unlimited, Remaining::Limited)
    }
}

impl Serialize for Remaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Remaining::Limited(n) => serializer.serialize_u32(*n),
            Remaining::Unlimited => serializer.serialize_str(UNLIMITED),
        }
    }
}

struct RemainingVisitor;

impl<'de> Visitor<'de> for RemainingVisitor {
    type Value = Remaining;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a non-negative integer or \"{}\"", UNLIMITED)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Remaining, E> {
        u32::try_from(v)
            .map(Remaining::Limited)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Remaining, E> {
        u32::try_from(v)
            .map(Remaining::Limited)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Remaining, E> {
        if v.eq_ignore_ascii_case(UNLIMITED) {
            Ok(Remaining::Unlimited)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Remaining {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RemainingVisitor)
    }
}
