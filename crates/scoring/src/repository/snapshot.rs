use serde::{Deserialize, Serialize};

use crate::models::{
    Constructor, Driver, HistoricalConstructorStanding, League, PredictionAnswer,
    PredictionQuestion, Race, RaceResult, RaceTemplate, Team, TeamSelection,
};

/// Every record the scoring core reads, in one serializable document.
///
/// This is the exchange format between the application that owns the data and
/// the `pitwall` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSnapshot {
    pub leagues: Vec<League>,
    pub teams: Vec<Team>,
    pub constructors: Vec<Constructor>,
    pub drivers: Vec<Driver>,
    pub race_templates: Vec<RaceTemplate>,
    pub races: Vec<Race>,
    pub results: Vec<RaceResult>,
    pub standings: Vec<HistoricalConstructorStanding>,
    pub selections: Vec<TeamSelection>,
    pub questions: Vec<PredictionQuestion>,
    pub answers: Vec<PredictionAnswer>,
}
