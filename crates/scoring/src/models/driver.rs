use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ScoringError;

/// Pricing and scoring class of a driver.
///
/// Serialized as the integer `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    One,
    Two,
}

impl TryFrom<u8> for Tier {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::One),
            2 => Ok(Tier::Two),
            other => Err(ScoringError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::One => 1,
            Tier::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: Uuid,
    /// Identifier used by the results feed, e.g. `max_verstappen`.
    pub external_id: Option<String>,
    pub name: String,
    pub nationality: Option<String>,
    pub constructor_id: Option<Uuid>,
    pub tier: Option<Tier>,
    pub price: i32,
}

impl Driver {
    pub fn is_tier(&self, tier: Tier) -> bool {
        self.tier == Some(tier)
    }
}
