//! Limit tables for each tier.

use crate::{FeatureKey, Remaining, Tier};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Per-feature bounds for one tier.
///
/// The same shape holds the remaining counts of a live [`QuotaState`](crate::QuotaState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitTable {
    /// Image generation bound
    pub image_generation: Remaining,
    /// Code generation bound
    pub code_generation: Remaining,
    /// Canvas generation bound
    pub canvas_generation: Remaining,
    /// Deep research bound
    pub deep_research_query: Remaining,
    /// Chat message bound
    pub chat_message: Remaining,
}

impl LimitTable {
    /// Guest sessions.
    pub const GUEST: LimitTable = LimitTable::uniform(5, 20);
    /// Basic plan.
    pub const BASIC: LimitTable = LimitTable::uniform(10, 50);
    /// Pro plan.
    pub const PRO: LimitTable = LimitTable::uniform(25, 100);
    /// Ultimate plan.
    pub const ULTIMATE: LimitTable = LimitTable {
        image_generation: Remaining::Unlimited,
        code_generation: Remaining::Unlimited,
        canvas_generation: Remaining::Unlimited,
        deep_research_query: Remaining::Unlimited,
        chat_message: Remaining::Unlimited,
    };

    const fn uniform(generations: u32, chat_messages: u32) -> Self {
        Self {
            image_generation: Remaining::Limited(generations),
            code_generation: Remaining::Limited(generations),
            canvas_generation: Remaining::Limited(generations),
            deep_research_query: Remaining::Limited(generations),
            chat_message: Remaining::Limited(chat_messages),
        }
    }

    /// The built-in table for `tier`.
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Guest => Self::GUEST,
            Tier::Basic => Self::BASIC,
            Tier::Pro => Self::PRO,
            Tier::Ultimate => Self::ULTIMATE,
        }
    }

    /// Bound for `key`.
    pub fn get(&self, key: FeatureKey) -> Remaining {
        match key {
            FeatureKey::ImageGeneration => self.image_generation,
            FeatureKey::CodeGeneration => self.code_generation,
            FeatureKey::CanvasGeneration => self.canvas_generation,
            FeatureKey::DeepResearchQuery => self.deep_research_query,
            FeatureKey::ChatMessage => self.chat_message,
        }
    }

    /// Copy of this table with `key` set to `value`.
    pub fn with(mut self, key: FeatureKey, value: Remaining) -> Self {
        let slot = match key {
            FeatureKey::ImageGeneration => &mut self.image_generation,
            FeatureKey::CodeGeneration => &mut self.code_generation,
            FeatureKey::CanvasGeneration => &mut self.canvas_generation,
            FeatureKey::DeepResearchQuery => &mut self.deep_research_query,
            FeatureKey::ChatMessage => &mut self.chat_message,
        };
        *slot = value;
        self
    }

    /// All entries in feature order.
    pub fn entries(&self) -> impl Iterator<Item = (FeatureKey, Remaining)> + '_ {
        FeatureKey::iter().map(move |key| (key, self.get(key)))
    }
}

/// One limit table per tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitSchedule {
    /// Table for guests
    pub guest: LimitTable,
    /// Table for the Basic plan
    pub basic: LimitTable,
    /// Table for the Pro plan
    pub pro: LimitTable,
    /// Table for the Ultimate plan
    pub ultimate: LimitTable,
}

impl Default for LimitSchedule {
    fn default() -> Self {
        Self {
            guest: LimitTable::GUEST,
            basic: LimitTable::BASIC,
            pro: LimitTable::PRO,
            ultimate: LimitTable::ULTIMATE,
        }
    }
}

impl LimitSchedule {
    /// Table for `tier`.
    pub fn table(&self, tier: Tier) -> &LimitTable {
        match tier {
            Tier::Guest => &self.guest,
            Tier::Basic => &self.basic,
            Tier::Pro => &self.pro,
            Tier::Ultimate => &self.ultimate,
        }
    }
}
