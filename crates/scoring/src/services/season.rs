use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::selection::driver_session_points;
use super::session::RaceContext;
use crate::config::ScoringRules;
use crate::dto::breakdown::DriverPoints;
use crate::dto::season::{TeamSeasonTotal, TierOneUsage, TierSplit};
use crate::error::Result;
use crate::models::Tier;
use crate::repository::LeagueStore;

/// Season-to-date totals for a team over races dated strictly before `as_of`.
///
/// Driver points are recomputed from results rather than read from the stored
/// selection totals. Correct prediction answers count for every race.
pub fn team_season_total<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    team_id: Uuid,
    as_of: NaiveDate,
) -> Result<TeamSeasonTotal> {
    store.team(team_id)?;

    let mut driver_points: Vec<DriverPoints> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut past_races = 0usize;

    for selection in store.team_selections(team_id)? {
        let race = RaceContext::load(store, selection.race_id)?;
        if !race.template.is_past(as_of) {
            continue;
        }
        past_races += 1;

        for driver in driver_session_points(store, rules, &selection, &race)? {
            match index.get(&driver.driver_id) {
                Some(&idx) => driver_points[idx].points += driver.total,
                None => {
                    index.insert(driver.driver_id, driver_points.len());
                    driver_points.push(DriverPoints {
                        driver_id: driver.driver_id,
                        name: driver.name,
                        tier: driver.tier,
                        points: driver.total,
                    });
                }
            }
        }
    }

    let prediction_points: Decimal = store
        .team_prediction_answers(team_id)?
        .iter()
        .map(|answer| answer.awarded_points())
        .sum();

    let driver_total: Decimal = driver_points.iter().map(|d| d.points).sum();

    debug!(
        team_id = %team_id,
        past_races,
        driver_total = %driver_total,
        prediction_points = %prediction_points,
        "Computed season total"
    );

    Ok(TeamSeasonTotal {
        team_id,
        driver_points,
        prediction_points,
        team_total: driver_total + prediction_points,
    })
}

/// Splits a season total into Tier-1 and Tier-2 tables, each sorted by points.
///
/// Untiered drivers appear in neither table.
pub fn tier_split(total: &TeamSeasonTotal) -> TierSplit {
    let mut tier_one: Vec<DriverPoints> = total
        .driver_points
        .iter()
        .filter(|d| d.tier == Some(Tier::One))
        .cloned()
        .collect();
    let mut tier_two: Vec<DriverPoints> = total
        .driver_points
        .iter()
        .filter(|d| d.tier == Some(Tier::Two))
        .cloned()
        .collect();

    tier_one.sort_by(|a, b| b.points.cmp(&a.points));
    tier_two.sort_by(|a, b| b.points.cmp(&a.points));

    TierSplit { tier_one, tier_two }
}

/// How often the team has used each Tier-1 driver in lineups that are locked in.
pub fn tier_one_usage<S: LeagueStore + ?Sized>(
    store: &S,
    team_id: Uuid,
    now: NaiveDateTime,
) -> Result<Vec<TierOneUsage>> {
    let mut usage: Vec<TierOneUsage> = Vec::new();

    for selection in store.team_selections(team_id)? {
        if !store.race(selection.race_id)?.deadline_passed(now) {
            continue;
        }

        for &driver_id in &selection.driver_ids {
            let driver = store.driver(driver_id)?;
            if !driver.is_tier(Tier::One) {
                continue;
            }
            match usage.iter_mut().find(|u| u.driver_id == driver_id) {
                Some(entry) => entry.selections += 1,
                None => usage.push(TierOneUsage {
                    driver_id,
                    name: driver.name,
                    selections: 1,
                }),
            }
        }
    }

    usage.sort_by(|a, b| b.selections.cmp(&a.selections));
    Ok(usage)
}
