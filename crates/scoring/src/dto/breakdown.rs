use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{SessionType, Tier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionBreakdown {
    pub qualifying: Decimal,
    pub sprint: Decimal,
    pub race: Decimal,
}

impl SessionBreakdown {
    pub fn get(&self, session: SessionType) -> Decimal {
        match session {
            SessionType::Qualifying => self.qualifying,
            SessionType::Sprint => self.sprint,
            SessionType::Race => self.race,
        }
    }

    pub fn set(&mut self, session: SessionType, points: Decimal) {
        match session {
            SessionType::Qualifying => self.qualifying = points,
            SessionType::Sprint => self.sprint = points,
            SessionType::Race => self.race = points,
        }
    }

    pub fn total(&self) -> Decimal {
        self.qualifying + self.sprint + self.race
    }
}

/// One driver's points for one race, split by session.
#[derive(Debug, Clone, Serialize)]
pub struct DriverRaceBreakdown {
    pub driver_id: Uuid,
    pub name: String,
    pub constructor_name: Option<String>,
    pub tier: Option<Tier>,
    pub sessions: SessionBreakdown,
    pub total: Decimal,
}

/// A driver's accumulated points over some set of races.
#[derive(Debug, Clone, Serialize)]
pub struct DriverPoints {
    pub driver_id: Uuid,
    pub name: String,
    pub tier: Option<Tier>,
    pub points: Decimal,
}

/// Everything the race detail page shows for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionBreakdown {
    pub selection_id: Uuid,
    pub race_id: Uuid,
    pub drivers: Vec<DriverRaceBreakdown>,
    pub session_totals: SessionBreakdown,
    pub has_sprint: bool,
    pub driver_total: Decimal,
    pub prediction_points: Decimal,
    pub total: Decimal,
}
