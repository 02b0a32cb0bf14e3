use rust_decimal::Decimal;
use uuid::Uuid;

use super::points_table::base_points;
use super::tier::{self, BonusContext};
use crate::config::ScoringRules;
use crate::error::Result;
use crate::models::{Driver, Race, RaceResult, RaceTemplate, SessionType};
use crate::repository::LeagueStore;

/// A race together with the calendar round it instantiates.
#[derive(Debug, Clone)]
pub struct RaceContext {
    pub race: Race,
    pub template: RaceTemplate,
}

impl RaceContext {
    pub fn load<S: LeagueStore + ?Sized>(store: &S, race_id: Uuid) -> Result<Self> {
        let race = store.race(race_id)?;
        let template = store.race_template(race.template_id)?;
        Ok(Self { race, template })
    }

    pub fn round(&self) -> i32 {
        self.template.round
    }
}

/// Flat qualifying bonuses: top ten, plus extra for pole.
pub fn qualifying_points(rules: &ScoringRules, position: i32) -> Decimal {
    let mut points = Decimal::ZERO;
    if (1..=10).contains(&position) {
        points += rules.qualifying_top_ten_bonus;
    }
    if position == 1 {
        points += rules.pole_bonus;
    }
    points
}

/// Scores one session given an already resolved bonus context.
pub fn session_points(
    rules: &ScoringRules,
    result: Option<&RaceResult>,
    driver: &Driver,
    session: SessionType,
    bonus: &BonusContext,
) -> Decimal {
    let Some(result) = result else {
        return Decimal::ZERO;
    };

    match session {
        SessionType::Qualifying => qualifying_points(rules, result.position),
        SessionType::Sprint | SessionType::Race => {
            let base = base_points(result.position, session);
            let mut points = tier::adjust_points_by_tier(rules, driver, base, session, result, bonus);
            if result.fastest_lap && (1..=rules.fastest_lap_cutoff).contains(&result.position) {
                points += rules.fastest_lap_bonus;
            }
            points
        }
    }
}

/// Scores one driver's session, querying historical standings only when the
/// Tier-2 bonus is actually in play.
pub fn score_session<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    result: Option<&RaceResult>,
    driver: &Driver,
    session: SessionType,
    race: &RaceContext,
) -> Result<Decimal> {
    let mut bonus = BonusContext {
        round: race.round(),
        previous_standing: None,
    };

    if let Some(result) = result
        && let Some(constructor_id) = driver.constructor_id
        && tier::bonus_possible(rules, driver, session, result, race.round())
    {
        bonus.previous_standing =
            tier::previous_round_standing(store, rules, &race.race, race.round(), constructor_id)?;
    }

    Ok(session_points(rules, result, driver, session, &bonus))
}
