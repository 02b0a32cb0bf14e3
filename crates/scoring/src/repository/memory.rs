use rust_decimal::Decimal;
use uuid::Uuid;

use super::LeagueStore;
use super::snapshot::LeagueSnapshot;
use crate::error::{Result, ScoringError};
use crate::models::{
    Constructor, Driver, HistoricalConstructorStanding, League, PredictionAnswer,
    PredictionQuestion, Race, RaceResult, RaceTemplate, SessionType, Team, TeamSelection,
};

/// `LeagueStore` backed by plain vectors.
///
/// Enforces the same uniqueness rules a relational backend would, so fixtures
/// and snapshots cannot describe states the scoring rules never expect.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: LeagueSnapshot,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot record by record, rejecting duplicates.
    pub fn from_snapshot(snapshot: LeagueSnapshot) -> Result<Self> {
        let mut store = Self::new();

        for league in snapshot.leagues {
            store.insert_league(league)?;
        }
        for team in snapshot.teams {
            store.insert_team(team)?;
        }
        for constructor in snapshot.constructors {
            store.insert_constructor(constructor)?;
        }
        for driver in snapshot.drivers {
            store.insert_driver(driver)?;
        }
        for template in snapshot.race_templates {
            store.insert_race_template(template)?;
        }
        for race in snapshot.races {
            store.insert_race(race)?;
        }
        for result in snapshot.results {
            store.insert_result(result)?;
        }
        for standing in snapshot.standings {
            store.insert_standing(standing)?;
        }
        for selection in snapshot.selections {
            store.insert_selection(selection)?;
        }
        for question in snapshot.questions {
            store.insert_question(question)?;
        }
        for answer in snapshot.answers {
            store.insert_answer(answer)?;
        }

        Ok(store)
    }

    pub fn snapshot(&self) -> &LeagueSnapshot {
        &self.data
    }

    pub fn into_snapshot(self) -> LeagueSnapshot {
        self.data
    }

    pub fn insert_league(&mut self, league: League) -> Result<()> {
        if self.data.leagues.iter().any(|l| l.league_id == league.league_id) {
            return Err(duplicate("league", league.league_id));
        }
        self.data.leagues.push(league);
        Ok(())
    }

    pub fn insert_team(&mut self, team: Team) -> Result<()> {
        if self.data.teams.iter().any(|t| t.team_id == team.team_id) {
            return Err(duplicate("team", team.team_id));
        }
        self.data.teams.push(team);
        Ok(())
    }

    pub fn insert_constructor(&mut self, constructor: Constructor) -> Result<()> {
        if self
            .data
            .constructors
            .iter()
            .any(|c| c.constructor_id == constructor.constructor_id || c.name == constructor.name)
        {
            return Err(ScoringError::ConstraintViolation(format!(
                "constructor '{}' already exists",
                constructor.name
            )));
        }
        self.data.constructors.push(constructor);
        Ok(())
    }

    pub fn insert_driver(&mut self, driver: Driver) -> Result<()> {
        if self.data.drivers.iter().any(|d| d.driver_id == driver.driver_id) {
            return Err(duplicate("driver", driver.driver_id));
        }
        self.data.drivers.push(driver);
        Ok(())
    }

    pub fn insert_race_template(&mut self, template: RaceTemplate) -> Result<()> {
        if self.data.race_templates.iter().any(|t| {
            t.template_id == template.template_id
                || (t.season == template.season && t.round == template.round)
        }) {
            return Err(ScoringError::ConstraintViolation(format!(
                "race template for season {} round {} already exists",
                template.season, template.round
            )));
        }
        self.data.race_templates.push(template);
        Ok(())
    }

    pub fn insert_race(&mut self, race: Race) -> Result<()> {
        if self.data.races.iter().any(|r| r.race_id == race.race_id) {
            return Err(duplicate("race", race.race_id));
        }
        self.data.races.push(race);
        Ok(())
    }

    pub fn insert_result(&mut self, result: RaceResult) -> Result<()> {
        if self.find_result(result.race_id, result.driver_id, result.session_type).is_some() {
            return Err(ScoringError::ConstraintViolation(format!(
                "{} result for driver {} in race {} already exists",
                result.session_type, result.driver_id, result.race_id
            )));
        }
        self.data.results.push(result);
        Ok(())
    }

    /// Replaces the row for the same (race, driver, session), or inserts it.
    pub fn upsert_result(&mut self, result: RaceResult) {
        match self.find_result(result.race_id, result.driver_id, result.session_type) {
            Some(idx) => self.data.results[idx] = result,
            None => self.data.results.push(result),
        }
    }

    pub fn insert_standing(&mut self, standing: HistoricalConstructorStanding) -> Result<()> {
        if self.find_standing(standing.race_id, standing.constructor_id).is_some() {
            return Err(ScoringError::ConstraintViolation(format!(
                "standing for constructor {} at race {} already exists",
                standing.constructor_id, standing.race_id
            )));
        }
        self.data.standings.push(standing);
        Ok(())
    }

    pub fn upsert_standing(&mut self, standing: HistoricalConstructorStanding) {
        match self.find_standing(standing.race_id, standing.constructor_id) {
            Some(idx) => self.data.standings[idx] = standing,
            None => self.data.standings.push(standing),
        }
    }

    pub fn insert_selection(&mut self, selection: TeamSelection) -> Result<()> {
        if self.data.selections.iter().any(|s| {
            s.selection_id == selection.selection_id
                || (s.team_id == selection.team_id && s.race_id == selection.race_id)
        }) {
            return Err(ScoringError::ConstraintViolation(format!(
                "team {} already has a selection for race {}",
                selection.team_id, selection.race_id
            )));
        }
        self.data.selections.push(selection);
        Ok(())
    }

    pub fn insert_question(&mut self, question: PredictionQuestion) -> Result<()> {
        if self.data.questions.iter().any(|q| {
            q.question_id == question.question_id || q.race_id == question.race_id
        }) {
            return Err(ScoringError::ConstraintViolation(format!(
                "race {} already has a prediction question",
                question.race_id
            )));
        }
        self.data.questions.push(question);
        Ok(())
    }

    pub fn insert_answer(&mut self, answer: PredictionAnswer) -> Result<()> {
        if self.data.answers.iter().any(|a| {
            a.answer_id == answer.answer_id
                || (a.team_id == answer.team_id && a.question_id == answer.question_id)
        }) {
            return Err(ScoringError::ConstraintViolation(format!(
                "team {} already answered question {}",
                answer.team_id, answer.question_id
            )));
        }
        self.data.answers.push(answer);
        Ok(())
    }

    fn find_result(&self, race_id: Uuid, driver_id: Uuid, session: SessionType) -> Option<usize> {
        self.data.results.iter().position(|r| {
            r.race_id == race_id && r.driver_id == driver_id && r.session_type == session
        })
    }

    fn find_standing(&self, race_id: Uuid, constructor_id: Uuid) -> Option<usize> {
        self.data
            .standings
            .iter()
            .position(|s| s.race_id == race_id && s.constructor_id == constructor_id)
    }

    fn league_race_ids(&self, league_id: Uuid) -> Vec<Uuid> {
        self.data
            .races
            .iter()
            .filter(|r| r.league_id == league_id)
            .map(|r| r.race_id)
            .collect()
    }
}

fn duplicate(entity: &str, id: Uuid) -> ScoringError {
    ScoringError::ConstraintViolation(format!("{} {} already exists", entity, id))
}

impl LeagueStore for MemoryStore {
    fn league(&self, league_id: Uuid) -> Result<League> {
        self.data
            .leagues
            .iter()
            .find(|l| l.league_id == league_id)
            .cloned()
            .ok_or(ScoringError::not_found("league", league_id))
    }

    fn team(&self, team_id: Uuid) -> Result<Team> {
        self.data
            .teams
            .iter()
            .find(|t| t.team_id == team_id)
            .cloned()
            .ok_or(ScoringError::not_found("team", team_id))
    }

    fn league_teams(&self, league_id: Uuid) -> Result<Vec<Team>> {
        Ok(self
            .data
            .teams
            .iter()
            .filter(|t| t.league_id == league_id)
            .cloned()
            .collect())
    }

    fn constructor(&self, constructor_id: Uuid) -> Result<Constructor> {
        self.data
            .constructors
            .iter()
            .find(|c| c.constructor_id == constructor_id)
            .cloned()
            .ok_or(ScoringError::not_found("constructor", constructor_id))
    }

    fn driver(&self, driver_id: Uuid) -> Result<Driver> {
        self.data
            .drivers
            .iter()
            .find(|d| d.driver_id == driver_id)
            .cloned()
            .ok_or(ScoringError::not_found("driver", driver_id))
    }

    fn race_template(&self, template_id: Uuid) -> Result<RaceTemplate> {
        self.data
            .race_templates
            .iter()
            .find(|t| t.template_id == template_id)
            .cloned()
            .ok_or(ScoringError::not_found("race template", template_id))
    }

    fn race(&self, race_id: Uuid) -> Result<Race> {
        self.data
            .races
            .iter()
            .find(|r| r.race_id == race_id)
            .cloned()
            .ok_or(ScoringError::not_found("race", race_id))
    }

    fn league_races(&self, league_id: Uuid) -> Result<Vec<Race>> {
        Ok(self
            .data
            .races
            .iter()
            .filter(|r| r.league_id == league_id)
            .cloned()
            .collect())
    }

    fn race_result(
        &self,
        race_id: Uuid,
        driver_id: Uuid,
        session: SessionType,
    ) -> Result<Option<RaceResult>> {
        Ok(self
            .find_result(race_id, driver_id, session)
            .map(|idx| self.data.results[idx].clone()))
    }

    fn league_results_for_driver(&self, driver_id: Uuid, league_id: Uuid) -> Result<Vec<RaceResult>> {
        let race_ids = self.league_race_ids(league_id);
        Ok(self
            .data
            .results
            .iter()
            .filter(|r| r.driver_id == driver_id && race_ids.contains(&r.race_id))
            .cloned()
            .collect())
    }

    fn historical_standing(
        &self,
        race_id: Uuid,
        constructor_id: Uuid,
    ) -> Result<Option<HistoricalConstructorStanding>> {
        Ok(self
            .find_standing(race_id, constructor_id)
            .map(|idx| self.data.standings[idx].clone()))
    }

    fn selection(&self, selection_id: Uuid) -> Result<TeamSelection> {
        self.data
            .selections
            .iter()
            .find(|s| s.selection_id == selection_id)
            .cloned()
            .ok_or(ScoringError::not_found("team selection", selection_id))
    }

    fn race_selections(&self, race_id: Uuid) -> Result<Vec<TeamSelection>> {
        Ok(self
            .data
            .selections
            .iter()
            .filter(|s| s.race_id == race_id)
            .cloned()
            .collect())
    }

    fn team_selections(&self, team_id: Uuid) -> Result<Vec<TeamSelection>> {
        Ok(self
            .data
            .selections
            .iter()
            .filter(|s| s.team_id == team_id)
            .cloned()
            .collect())
    }

    fn league_selections(&self, league_id: Uuid) -> Result<Vec<TeamSelection>> {
        let race_ids = self.league_race_ids(league_id);
        Ok(self
            .data
            .selections
            .iter()
            .filter(|s| race_ids.contains(&s.race_id))
            .cloned()
            .collect())
    }

    fn prediction_question_for_race(&self, race_id: Uuid) -> Result<Option<PredictionQuestion>> {
        Ok(self
            .data
            .questions
            .iter()
            .find(|q| q.race_id == race_id)
            .cloned())
    }

    fn prediction_answer(&self, team_id: Uuid, question_id: Uuid) -> Result<Option<PredictionAnswer>> {
        Ok(self
            .data
            .answers
            .iter()
            .find(|a| a.team_id == team_id && a.question_id == question_id)
            .cloned())
    }

    fn question_answers(&self, question_id: Uuid) -> Result<Vec<PredictionAnswer>> {
        Ok(self
            .data
            .answers
            .iter()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }

    fn team_prediction_answers(&self, team_id: Uuid) -> Result<Vec<PredictionAnswer>> {
        Ok(self
            .data
            .answers
            .iter()
            .filter(|a| a.team_id == team_id)
            .cloned()
            .collect())
    }

    fn save_selection_points(&mut self, selection_id: Uuid, points: Decimal) -> Result<()> {
        let selection = self
            .data
            .selections
            .iter_mut()
            .find(|s| s.selection_id == selection_id)
            .ok_or(ScoringError::not_found("team selection", selection_id))?;
        selection.points = points;
        Ok(())
    }

    fn save_prediction_answer(&mut self, answer: PredictionAnswer) -> Result<()> {
        match self
            .data
            .answers
            .iter_mut()
            .find(|a| a.answer_id == answer.answer_id)
        {
            Some(existing) => {
                *existing = answer;
                Ok(())
            }
            None => self.insert_answer(answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[test]
    fn test_duplicate_result_rejected() {
        let mut fx = Fixture::new();
        let driver = fx.tier_one_driver("Lando Norris", 6);
        let race = fx.race(1);
        fx.result(race, driver, SessionType::Race, 1);

        let err = fx
            .store
            .insert_result(Fixture::result_row(race, driver, SessionType::Race, 2))
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_upsert_result_replaces_row() {
        let mut fx = Fixture::new();
        let driver = fx.tier_one_driver("Lando Norris", 6);
        let race = fx.race(1);
        fx.result(race, driver, SessionType::Race, 1);

        fx.store
            .upsert_result(Fixture::result_row(race, driver, SessionType::Race, 4));

        let row = fx
            .store
            .race_result(race, driver, SessionType::Race)
            .unwrap()
            .unwrap();
        assert_eq!(row.position, 4);
        assert_eq!(fx.store.snapshot().results.len(), 1);
    }

    #[test]
    fn test_one_selection_per_team_and_race() {
        let mut fx = Fixture::new();
        let driver = fx.tier_one_driver("Lando Norris", 6);
        let race = fx.race(1);
        let team = fx.team("Box Box Box");
        fx.selection(team, race, &[driver]);

        let duplicate = TeamSelection {
            selection_id: Uuid::new_v4(),
            team_id: team,
            race_id: race,
            driver_ids: vec![driver],
            total_cost: Decimal::ZERO,
            submitted_on_time: true,
            points: Decimal::ZERO,
        };
        assert!(fx.store.insert_selection(duplicate).unwrap_err().is_unique_violation());
    }

    #[test]
    fn test_league_results_are_scoped_to_league() {
        let mut fx = Fixture::new();
        let driver = fx.tier_one_driver("Lando Norris", 6);
        let race = fx.race(1);
        fx.result(race, driver, SessionType::Race, 1);

        let other_league = Uuid::new_v4();
        assert_eq!(fx.store.league_results_for_driver(driver, fx.league_id).unwrap().len(), 1);
        assert!(fx.store.league_results_for_driver(driver, other_league).unwrap().is_empty());
    }

    #[test]
    fn test_missing_selection_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store.save_selection_points(Uuid::new_v4(), Decimal::ONE).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_snapshot_round_trip_keeps_records() {
        let mut fx = Fixture::new();
        let driver = fx.tier_two_driver("Alex Albon", 3);
        let race = fx.race(1);
        fx.result(race, driver, SessionType::Sprint, 3);

        let json = serde_json::to_string(fx.store.snapshot()).unwrap();
        let restored = MemoryStore::from_snapshot(serde_json::from_str(&json).unwrap()).unwrap();

        let row = restored
            .race_result(race, driver, SessionType::Sprint)
            .unwrap()
            .unwrap();
        assert_eq!(row.position, 3);
        assert_eq!(restored.driver(driver).unwrap().name, "Alex Albon");
    }

    #[test]
    fn test_snapshot_with_duplicate_template_round_rejected() {
        let mut fx = Fixture::new();
        fx.race(1);
        let mut snapshot = fx.store.into_snapshot();
        let mut copy = snapshot.race_templates[0].clone();
        copy.template_id = Uuid::new_v4();
        snapshot.race_templates.push(copy);

        assert!(MemoryStore::from_snapshot(snapshot).unwrap_err().is_unique_violation());
    }
}
