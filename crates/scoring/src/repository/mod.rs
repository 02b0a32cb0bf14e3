//! Storage seam for the scoring core.
//!
//! The surrounding application owns persistence. Scoring only needs the read
//! queries below plus two writes, so any backend that can answer them can drive
//! the services.

pub mod memory;
pub mod snapshot;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Constructor, Driver, HistoricalConstructorStanding, League, PredictionAnswer,
    PredictionQuestion, Race, RaceResult, RaceTemplate, SessionType, Team, TeamSelection,
};

pub trait LeagueStore {
    fn league(&self, league_id: Uuid) -> Result<League>;
    fn team(&self, team_id: Uuid) -> Result<Team>;
    fn league_teams(&self, league_id: Uuid) -> Result<Vec<Team>>;

    fn constructor(&self, constructor_id: Uuid) -> Result<Constructor>;
    fn driver(&self, driver_id: Uuid) -> Result<Driver>;

    fn race_template(&self, template_id: Uuid) -> Result<RaceTemplate>;
    fn race(&self, race_id: Uuid) -> Result<Race>;
    fn league_races(&self, league_id: Uuid) -> Result<Vec<Race>>;

    /// At most one row exists per (race, driver, session).
    fn race_result(
        &self,
        race_id: Uuid,
        driver_id: Uuid,
        session: SessionType,
    ) -> Result<Option<RaceResult>>;
    fn league_results_for_driver(&self, driver_id: Uuid, league_id: Uuid) -> Result<Vec<RaceResult>>;
    fn historical_standing(
        &self,
        race_id: Uuid,
        constructor_id: Uuid,
    ) -> Result<Option<HistoricalConstructorStanding>>;

    fn selection(&self, selection_id: Uuid) -> Result<TeamSelection>;
    fn race_selections(&self, race_id: Uuid) -> Result<Vec<TeamSelection>>;
    fn team_selections(&self, team_id: Uuid) -> Result<Vec<TeamSelection>>;
    fn league_selections(&self, league_id: Uuid) -> Result<Vec<TeamSelection>>;

    fn prediction_question_for_race(&self, race_id: Uuid) -> Result<Option<PredictionQuestion>>;
    fn prediction_answer(&self, team_id: Uuid, question_id: Uuid) -> Result<Option<PredictionAnswer>>;
    fn question_answers(&self, question_id: Uuid) -> Result<Vec<PredictionAnswer>>;
    fn team_prediction_answers(&self, team_id: Uuid) -> Result<Vec<PredictionAnswer>>;

    fn save_selection_points(&mut self, selection_id: Uuid, points: Decimal) -> Result<()>;
    fn save_prediction_answer(&mut self, answer: PredictionAnswer) -> Result<()>;

    /// League races paired with their calendar templates, in storage order.
    /// The league's races with their calendar rounds, ordered by round.
    fn league_calendar(&self, league_id: Uuid) -> Result<Vec<(Race, RaceTemplate)>> {
        let mut calendar = self
            .league_races(league_id)?
            .into_iter()
            .map(|race| {
                let template = self.race_template(race.template_id)?;
                Ok((race, template))
            })
            .collect::<Result<Vec<_>>>()?;
        calendar.sort_by_key(|(_, template)| template.round);
        Ok(calendar)
    }

    fn race_at_round(&self, league_id: Uuid, round: i32) -> Result<Option<Race>> {
        Ok(self
            .league_calendar(league_id)?
            .into_iter()
            .find(|(_, template)| template.round == round)
            .map(|(race, _)| race))
    }
}
