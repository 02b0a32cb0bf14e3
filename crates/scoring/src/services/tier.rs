use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{PreviousRoundPolicy, ScoringRules};
use crate::error::Result;
use crate::models::{Driver, Race, RaceResult, SessionType, Tier};
use crate::repository::LeagueStore;

/// Inputs for the Tier-2 backmarker bonus, resolved before adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusContext {
    pub round: i32,
    /// Standing of the driver's constructor as of the previous round, if recorded.
    pub previous_standing: Option<i32>,
}

/// Applies the Tier-2 multiplier and backmarker bonus to a session's base points.
///
/// Tier-1 and untiered drivers keep their base points. A result flagged with
/// `is_tier_override` is scored as if the driver were Tier-1.
pub fn adjust_points_by_tier(
    rules: &ScoringRules,
    driver: &Driver,
    base_points: Decimal,
    session: SessionType,
    result: &RaceResult,
    bonus: &BonusContext,
) -> Decimal {
    if result.is_tier_override {
        return base_points;
    }

    match driver.tier {
        Some(Tier::Two) => {
            let mut points = base_points * rules.tier_two_multiplier;
            if bonus_applies(rules, session, result, bonus) {
                points += rules.tier_two_bonus;
            }
            points
        }
        Some(Tier::One) | None => base_points,
    }
}

pub fn bonus_applies(
    rules: &ScoringRules,
    session: SessionType,
    result: &RaceResult,
    bonus: &BonusContext,
) -> bool {
    session == SessionType::Race
        && bonus.round > rules.bonus_after_round
        && result.is_classified()
        && result.position <= rules.bonus_position_cutoff
        && bonus
            .previous_standing
            .is_some_and(|standing| standing >= rules.backmarker_standing)
}

/// Whether the bonus could apply at all, so standings are only queried when needed.
pub fn bonus_possible(
    rules: &ScoringRules,
    driver: &Driver,
    session: SessionType,
    result: &RaceResult,
    round: i32,
) -> bool {
    !result.is_tier_override
        && driver.is_tier(Tier::Two)
        && driver.constructor_id.is_some()
        && session == SessionType::Race
        && round > rules.bonus_after_round
        && result.is_classified()
        && result.position <= rules.bonus_position_cutoff
}

/// Looks up the constructor's standing as of the round before `round`.
///
/// Returns `None` rather than an error when the league has no such race or no
/// standing was recorded for it; the bonus simply does not apply.
pub fn previous_round_standing<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    race: &Race,
    round: i32,
    constructor_id: Uuid,
) -> Result<Option<i32>> {
    match rules.previous_round {
        PreviousRoundPolicy::Adjacent => {
            let Some(previous) = store.race_at_round(race.league_id, round - 1)? else {
                warn!(
                    league_id = %race.league_id,
                    round,
                    "No race for previous round; skipping Tier-2 bonus"
                );
                return Ok(None);
            };
            Ok(store
                .historical_standing(previous.race_id, constructor_id)?
                .map(|s| s.standing))
        }
        PreviousRoundPolicy::MostRecentPrior => {
            let calendar = store.league_calendar(race.league_id)?;
            let earlier = calendar
                .into_iter()
                .rev()
                .filter(|(_, template)| template.round < round);

            for (previous, template) in earlier {
                if let Some(standing) = store.historical_standing(previous.race_id, constructor_id)? {
                    debug!(round, standing_round = template.round, "Using most recent prior standing");
                    return Ok(Some(standing.standing));
                }
            }
            Ok(None)
        }
    }
}
