use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::breakdown::DriverRaceBreakdown;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub team_id: Uuid,
    pub team_name: String,
    pub points: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverRankingEntry {
    pub rank: i64,
    pub driver_id: Uuid,
    pub name: String,
    pub constructor_name: Option<String>,
    pub points: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamRaceBreakdown {
    pub team_id: Uuid,
    pub team_name: String,
    pub points: Decimal,
    pub drivers: Vec<DriverRaceBreakdown>,
}

/// Per-team scores for the most recent completed race of a league.
#[derive(Debug, Clone, Serialize)]
pub struct LatestRaceSnapshot {
    pub race_id: Uuid,
    pub race_name: String,
    pub round: i32,
    pub teams: Vec<TeamRaceBreakdown>,
}
