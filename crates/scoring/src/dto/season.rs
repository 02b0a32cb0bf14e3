use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::breakdown::DriverPoints;

#[derive(Debug, Clone, Serialize)]
pub struct TeamSeasonTotal {
    pub team_id: Uuid,
    /// Drivers in the order they first appear in the team's selections.
    pub driver_points: Vec<DriverPoints>,
    pub prediction_points: Decimal,
    pub team_total: Decimal,
}

impl TeamSeasonTotal {
    pub fn points_for(&self, driver_id: Uuid) -> Option<Decimal> {
        self.driver_points
            .iter()
            .find(|entry| entry.driver_id == driver_id)
            .map(|entry| entry.points)
    }
}

/// Season totals split into the team page's Tier-1 and Tier-2 tables.
#[derive(Debug, Clone, Serialize)]
pub struct TierSplit {
    pub tier_one: Vec<DriverPoints>,
    pub tier_two: Vec<DriverPoints>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierOneUsage {
    pub driver_id: Uuid,
    pub name: String,
    pub selections: usize,
}
