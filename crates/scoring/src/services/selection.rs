use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use super::session::{RaceContext, score_session};
use crate::config::ScoringRules;
use crate::dto::breakdown::{DriverRaceBreakdown, SelectionBreakdown, SessionBreakdown};
use crate::error::Result;
use crate::models::{SessionType, TeamSelection};
use crate::repository::LeagueStore;

/// Per-driver, per-session points for every driver in a selection.
pub fn driver_session_points<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    selection: &TeamSelection,
    race: &RaceContext,
) -> Result<Vec<DriverRaceBreakdown>> {
    selection
        .driver_ids
        .iter()
        .map(|&driver_id| {
            let driver = store.driver(driver_id)?;
            let mut sessions = SessionBreakdown::default();

            for session in SessionType::ALL {
                let result = store.race_result(race.race.race_id, driver_id, session)?;
                let points = score_session(store, rules, result.as_ref(), &driver, session, race)?;
                sessions.set(session, points);
            }

            let constructor_name = match driver.constructor_id {
                Some(constructor_id) => constructor_name(store, constructor_id)?,
                None => None,
            };

            Ok(DriverRaceBreakdown {
                driver_id,
                total: sessions.total(),
                name: driver.name,
                constructor_name,
                tier: driver.tier,
                sessions,
            })
        })
        .collect()
}

/// Constructors are a weak reference from drivers; a dangling id reads as no constructor.
pub(crate) fn constructor_name<S: LeagueStore + ?Sized>(
    store: &S,
    constructor_id: Uuid,
) -> Result<Option<String>> {
    match store.constructor(constructor_id) {
        Ok(constructor) => Ok(Some(constructor.name)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Points from the team's answer to this race's prediction question, if it was correct.
pub fn prediction_points<S: LeagueStore + ?Sized>(store: &S, selection: &TeamSelection) -> Result<Decimal> {
    let Some(question) = store.prediction_question_for_race(selection.race_id)? else {
        return Ok(Decimal::ZERO);
    };

    Ok(store
        .prediction_answer(selection.team_id, question.question_id)?
        .map(|answer| answer.awarded_points())
        .unwrap_or(Decimal::ZERO))
}

/// Total points for a selection, computed from scratch without persisting.
pub fn compute_selection_points<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    selection: &TeamSelection,
) -> Result<Decimal> {
    let race = RaceContext::load(store, selection.race_id)?;
    let drivers = driver_session_points(store, rules, selection, &race)?;
    let driver_total: Decimal = drivers.iter().map(|d| d.total).sum();

    Ok(driver_total + prediction_points(store, selection)?)
}

/// Recomputes a selection's points and stores them on the selection.
pub fn recompute_selection<S: LeagueStore + ?Sized>(
    store: &mut S,
    rules: &ScoringRules,
    selection_id: Uuid,
) -> Result<Decimal> {
    let selection = store.selection(selection_id)?;
    let points = compute_selection_points(&*store, rules, &selection)?;
    store.save_selection_points(selection_id, points)?;

    debug!(
        selection_id = %selection_id,
        team_id = %selection.team_id,
        race_id = %selection.race_id,
        points = %points,
        "Recomputed selection points"
    );

    Ok(points)
}

/// Recomputes every selection made for a race. Returns how many were updated.
pub fn recompute_race_selections<S: LeagueStore + ?Sized>(
    store: &mut S,
    rules: &ScoringRules,
    race_id: Uuid,
) -> Result<usize> {
    let selections = store.race_selections(race_id)?;

    for selection in &selections {
        recompute_selection(store, rules, selection.selection_id)?;
    }

    info!("Recomputed {} selections for race {}", selections.len(), race_id);
    Ok(selections.len())
}

/// Per-driver and per-session detail for one selection, as shown on the race page.
pub fn selection_breakdown<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    selection_id: Uuid,
) -> Result<SelectionBreakdown> {
    let selection = store.selection(selection_id)?;
    let race = RaceContext::load(store, selection.race_id)?;
    let drivers = driver_session_points(store, rules, &selection, &race)?;

    let mut session_totals = SessionBreakdown::default();
    for session in SessionType::ALL {
        let total = drivers.iter().map(|d| d.sessions.get(session)).sum();
        session_totals.set(session, total);
    }

    let driver_total = session_totals.total();
    let prediction_points = prediction_points(store, &selection)?;

    Ok(SelectionBreakdown {
        selection_id,
        race_id: selection.race_id,
        has_sprint: drivers.iter().any(|d| d.sessions.sprint > Decimal::ZERO),
        drivers,
        session_totals,
        driver_total,
        prediction_points,
        total: driver_total + prediction_points,
    })
}
