use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::season::team_season_total;
use super::selection::{constructor_name, driver_session_points, recompute_race_selections, recompute_selection};
use super::session::{RaceContext, score_session};
use crate::config::ScoringRules;
use crate::dto::ranking::{DriverRankingEntry, LatestRaceSnapshot, LeaderboardEntry, TeamRaceBreakdown};
use crate::error::Result;
use crate::repository::LeagueStore;

/// Recomputes and stores the points of every selection in the league.
pub fn refresh_league<S: LeagueStore + ?Sized>(
    store: &mut S,
    rules: &ScoringRules,
    league_id: Uuid,
) -> Result<usize> {
    let selections = store.league_selections(league_id)?;
    for selection in &selections {
        recompute_selection(store, rules, selection.selection_id)?;
    }
    Ok(selections.len())
}

/// Teams ordered by season total, highest first.
///
/// The sort is stable: teams on equal points keep the order the store lists them in.
pub fn league_leaderboard<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    league_id: Uuid,
    as_of: NaiveDate,
) -> Result<Vec<LeaderboardEntry>> {
    store.league(league_id)?;

    let mut standings = Vec::new();
    for team in store.league_teams(league_id)? {
        let total = team_season_total(store, rules, team.team_id, as_of)?;
        standings.push((team, total.team_total));
    }

    standings.sort_by(|a, b| b.1.cmp(&a.1));

    info!("Built leaderboard for league {} with {} teams", league_id, standings.len());

    Ok(standings
        .into_iter()
        .enumerate()
        .map(|(idx, (team, points))| LeaderboardEntry {
            rank: idx as i64 + 1,
            team_id: team.team_id,
            team_name: team.name,
            points,
        })
        .collect())
}

/// Points a driver scored in every session recorded across the league's races.
pub fn driver_performance<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    driver_id: Uuid,
    league_id: Uuid,
) -> Result<Decimal> {
    let driver = store.driver(driver_id)?;
    let mut races: HashMap<Uuid, RaceContext> = HashMap::new();
    let mut total = Decimal::ZERO;

    for result in store.league_results_for_driver(driver_id, league_id)? {
        if !races.contains_key(&result.race_id) {
            races.insert(result.race_id, RaceContext::load(store, result.race_id)?);
        }
        let race = &races[&result.race_id];
        total += score_session(store, rules, Some(&result), &driver, result.session_type, race)?;
    }

    Ok(total)
}

/// The `n` best drivers among those any team in the league has ever picked.
pub fn top_drivers<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    league_id: Uuid,
    n: usize,
) -> Result<Vec<DriverRankingEntry>> {
    let mut driver_ids: Vec<Uuid> = Vec::new();
    for selection in store.league_selections(league_id)? {
        for driver_id in selection.driver_ids {
            if !driver_ids.contains(&driver_id) {
                driver_ids.push(driver_id);
            }
        }
    }

    let mut ranked = Vec::with_capacity(driver_ids.len());
    for driver_id in driver_ids {
        let driver = store.driver(driver_id)?;
        let points = driver_performance(store, rules, driver_id, league_id)?;
        let constructor_name = match driver.constructor_id {
            Some(constructor_id) => constructor_name(store, constructor_id)?,
            None => None,
        };
        ranked.push((driver, constructor_name, points));
    }

    ranked.sort_by(|a, b| b.2.cmp(&a.2));
    ranked.truncate(n);

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(idx, (driver, constructor_name, points))| DriverRankingEntry {
            rank: idx as i64 + 1,
            driver_id: driver.driver_id,
            name: driver.name,
            constructor_name,
            points,
        })
        .collect())
}

/// Recomputes the league's most recent completed race and returns each team's score
/// for it, highest first.
pub fn latest_race_snapshot<S: LeagueStore + ?Sized>(
    store: &mut S,
    rules: &ScoringRules,
    league_id: Uuid,
    as_of: NaiveDate,
) -> Result<Option<LatestRaceSnapshot>> {
    let latest = store
        .league_calendar(league_id)?
        .into_iter()
        .filter(|(_, template)| template.is_past(as_of))
        .max_by_key(|(_, template)| template.date);

    let Some((race, template)) = latest else {
        return Ok(None);
    };

    recompute_race_selections(store, rules, race.race_id)?;

    let context = RaceContext { race, template };
    let mut teams = Vec::new();
    for selection in store.race_selections(context.race.race_id)? {
        let team = store.team(selection.team_id)?;
        let drivers = driver_session_points(&*store, rules, &selection, &context)?;
        teams.push(TeamRaceBreakdown {
            team_id: team.team_id,
            team_name: team.name,
            points: selection.points,
            drivers,
        });
    }

    teams.sort_by(|a, b| b.points.cmp(&a.points));

    Ok(Some(LatestRaceSnapshot {
        race_id: context.race.race_id,
        race_name: context.template.name,
        round: context.template.round,
        teams,
    }))
}
