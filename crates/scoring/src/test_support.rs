use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::ScoringRules;
use crate::models::{
    Constructor, Driver, HistoricalConstructorStanding, League, PredictionAnswer,
    PredictionQuestion, QuestionType, Race, RaceResult, RaceTemplate, SessionType, Team,
    TeamSelection, Tier,
};
use crate::repository::memory::MemoryStore;

/// In-memory league with a single season, built up one record at a time.
pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub rules: ScoringRules,
    pub league_id: Uuid,
}

impl Fixture {
    pub fn new() -> Self {
        let league_id = Uuid::new_v4();
        let mut store = MemoryStore::new();
        store
            .insert_league(League {
                league_id,
                name: "Sunday League".to_string(),
                season: 2024,
            })
            .unwrap();

        Self {
            store,
            rules: ScoringRules::default(),
            league_id,
        }
    }

    pub fn date(round: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .checked_add_days(Days::new(14 * (round as u64 - 1)))
            .unwrap()
    }

    pub fn constructor(&mut self, name: &str) -> Uuid {
        let constructor_id = Uuid::new_v4();
        self.store
            .insert_constructor(Constructor {
                constructor_id,
                name: name.to_string(),
                standing: None,
            })
            .unwrap();
        constructor_id
    }

    pub fn driver(
        &mut self,
        name: &str,
        tier: Option<Tier>,
        price: i32,
        constructor_id: Option<Uuid>,
    ) -> Uuid {
        let driver_id = Uuid::new_v4();
        self.store
            .insert_driver(Driver {
                driver_id,
                external_id: None,
                name: name.to_string(),
                nationality: None,
                constructor_id,
                tier,
                price,
            })
            .unwrap();
        driver_id
    }

    pub fn tier_one_driver(&mut self, name: &str, price: i32) -> Uuid {
        self.driver(name, Some(Tier::One), price, None)
    }

    pub fn tier_two_driver(&mut self, name: &str, price: i32) -> Uuid {
        self.driver(name, Some(Tier::Two), price, None)
    }

    pub fn race(&mut self, round: i32) -> Uuid {
        self.race_on(round, Self::date(round))
    }

    pub fn race_on(&mut self, round: i32, date: NaiveDate) -> Uuid {
        let template_id = Uuid::new_v4();
        self.store
            .insert_race_template(RaceTemplate {
                template_id,
                name: format!("Round {} Grand Prix", round),
                season: 2024,
                round,
                date,
                location: "Circuit".to_string(),
                circuit: None,
                qualifying_start: None,
                practice_start: None,
            })
            .unwrap();

        let race_id = Uuid::new_v4();
        self.store
            .insert_race(Race {
                race_id,
                template_id,
                league_id: self.league_id,
                lineup_deadline: date.and_hms_opt(12, 0, 0),
                mulligan_deadline: None,
            })
            .unwrap();
        race_id
    }

    pub fn result_row(race_id: Uuid, driver_id: Uuid, session: SessionType, position: i32) -> RaceResult {
        RaceResult {
            race_id,
            driver_id,
            session_type: session,
            position,
            points: Decimal::ZERO,
            fastest_lap: false,
            dnf: false,
            is_tier_override: false,
        }
    }

    pub fn result(&mut self, race_id: Uuid, driver_id: Uuid, session: SessionType, position: i32) {
        self.store
            .insert_result(Self::result_row(race_id, driver_id, session, position))
            .unwrap();
    }

    pub fn insert_result(&mut self, result: RaceResult) {
        self.store.insert_result(result).unwrap();
    }

    pub fn standing(&mut self, race_id: Uuid, constructor_id: Uuid, standing: i32) {
        self.store
            .insert_standing(HistoricalConstructorStanding {
                race_id,
                constructor_id,
                standing,
            })
            .unwrap();
    }

    pub fn team(&mut self, name: &str) -> Uuid {
        let team_id = Uuid::new_v4();
        self.store
            .insert_team(Team {
                team_id,
                league_id: self.league_id,
                name: name.to_string(),
                owner: name.to_lowercase(),
            })
            .unwrap();
        team_id
    }

    pub fn selection(&mut self, team_id: Uuid, race_id: Uuid, driver_ids: &[Uuid]) -> Uuid {
        let selection_id = Uuid::new_v4();
        self.store
            .insert_selection(TeamSelection {
                selection_id,
                team_id,
                race_id,
                driver_ids: driver_ids.to_vec(),
                total_cost: Decimal::ZERO,
                submitted_on_time: true,
                points: Decimal::ZERO,
            })
            .unwrap();
        selection_id
    }

    pub fn question(&mut self, race_id: Uuid, correct_answer: Option<&str>, points: Decimal) -> Uuid {
        let question_id = Uuid::new_v4();
        self.store
            .insert_question(PredictionQuestion {
                question_id,
                race_id,
                question_text: "Who finishes on the podium?".to_string(),
                question_type: QuestionType::Text,
                options: None,
                correct_answer: correct_answer.map(str::to_string),
                points_awarded: points,
            })
            .unwrap();
        question_id
    }

    pub fn answer(
        &mut self,
        team_id: Uuid,
        question_id: Uuid,
        answer: &str,
        is_correct: bool,
        points_earned: Decimal,
    ) -> Uuid {
        let answer_id = Uuid::new_v4();
        self.store
            .insert_answer(PredictionAnswer {
                answer_id,
                team_id,
                question_id,
                answer: answer.to_string(),
                is_correct,
                points_earned,
            })
            .unwrap();
        answer_id
    }
}
