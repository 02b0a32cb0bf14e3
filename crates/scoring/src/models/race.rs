use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One round of a season's calendar, shared by every league's `Race`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceTemplate {
    pub template_id: Uuid,
    pub name: String,
    pub season: i32,
    pub round: i32,
    pub date: NaiveDate,
    pub location: String,
    pub circuit: Option<String>,
    pub qualifying_start: Option<NaiveDateTime>,
    pub practice_start: Option<NaiveDateTime>,
}

impl RaceTemplate {
    /// Which half of the season (1 or 2) this round falls in.
    pub fn season_half(&self, total_races: i32) -> u8 {
        if self.round <= total_races / 2 { 1 } else { 2 }
    }

    pub fn is_past(&self, as_of: NaiveDate) -> bool {
        self.date < as_of
    }
}

/// A league's instance of a calendar round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub race_id: Uuid,
    pub template_id: Uuid,
    pub league_id: Uuid,
    pub lineup_deadline: Option<NaiveDateTime>,
    pub mulligan_deadline: Option<NaiveDateTime>,
}

impl Race {
    pub fn deadline_passed(&self, now: NaiveDateTime) -> bool {
        self.lineup_deadline.is_some_and(|deadline| deadline < now)
    }
}
