use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ScoringError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    Qualifying,
    Sprint,
    Race,
}

impl SessionType {
    /// Scoring order used for every per-driver breakdown.
    pub const ALL: [SessionType; 3] = [SessionType::Qualifying, SessionType::Sprint, SessionType::Race];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qualifying => "Qualifying",
            Self::Sprint => "Sprint",
            Self::Race => "Race",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "qualifying" => Ok(Self::Qualifying),
            "sprint" => Ok(Self::Sprint),
            "race" => Ok(Self::Race),
            _ => Err(ScoringError::UnknownSession(s.to_string())),
        }
    }
}

/// One driver's classification in one session of one race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_id: Uuid,
    pub driver_id: Uuid,
    pub session_type: SessionType,
    /// 1-based finishing order. `0` means the driver was not classified.
    pub position: i32,
    /// Championship points as reported by the results feed. Informational only.
    #[serde(default)]
    pub points: Decimal,
    #[serde(default)]
    pub fastest_lap: bool,
    #[serde(default)]
    pub dnf: bool,
    /// Disables the Tier-2 multiplier and bonus for this result.
    #[serde(default)]
    pub is_tier_override: bool,
}

impl RaceResult {
    pub fn is_classified(&self) -> bool {
        self.position >= 1
    }

    /// Converts a feed's floating point championship points to a two-place decimal.
    pub fn feed_points_from_f64(points: f64) -> Option<Decimal> {
        Decimal::from_f64(points).map(|value| value.round_dp(2))
    }
}
