use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::config::ScoringRules;
use crate::dto::selection::{RosterSummary, SelectionRequest};
use crate::error::{Result, ScoringError};
use crate::models::{TeamSelection, Tier};
use crate::repository::LeagueStore;

/// Checks a submitted lineup against the roster rules and prices it.
///
/// Scoring never calls this; it is for whoever creates selections.
pub fn validate_selection<S: LeagueStore + ?Sized>(
    store: &S,
    rules: &ScoringRules,
    request: &SelectionRequest,
) -> Result<RosterSummary> {
    request.validate()?;

    let team = store.team(request.team_id)?;
    let race = store.race(request.race_id)?;
    if team.league_id != race.league_id {
        return Err(ScoringError::RosterViolation(format!(
            "team '{}' is not in the league of race {}",
            team.name, race.race_id
        )));
    }

    let mut summary = RosterSummary {
        tier_one: Vec::new(),
        tier_two: Vec::new(),
        total_cost: Decimal::ZERO,
    };

    for (idx, &driver_id) in request.driver_ids.iter().enumerate() {
        if request.driver_ids[..idx].contains(&driver_id) {
            return Err(ScoringError::RosterViolation(format!(
                "driver {} is selected more than once",
                driver_id
            )));
        }

        let driver = store.driver(driver_id)?;
        match driver.tier {
            Some(Tier::One) => summary.tier_one.push(driver_id),
            Some(Tier::Two) => summary.tier_two.push(driver_id),
            None => {
                return Err(ScoringError::RosterViolation(format!(
                    "{} has no tier and cannot be selected",
                    driver.name
                )));
            }
        }
        summary.total_cost += Decimal::from(driver.price);
    }

    if summary.tier_one.len() != rules.tier_one_drivers {
        return Err(ScoringError::RosterViolation(format!(
            "a lineup needs exactly {} Tier 1 driver(s), got {}",
            rules.tier_one_drivers,
            summary.tier_one.len()
        )));
    }
    if summary.tier_two.len() > rules.max_tier_two_drivers {
        return Err(ScoringError::RosterViolation(format!(
            "you can select up to {} Tier 2 drivers",
            rules.max_tier_two_drivers
        )));
    }
    if summary.total_cost > rules.salary_cap {
        return Err(ScoringError::RosterViolation(format!(
            "total cost {} exceeds the {} salary cap",
            summary.total_cost, rules.salary_cap
        )));
    }

    Ok(summary)
}

/// Builds an unscored selection from a request that passed [`validate_selection`].
pub fn build_selection(request: &SelectionRequest, summary: &RosterSummary) -> TeamSelection {
    TeamSelection {
        selection_id: Uuid::new_v4(),
        team_id: request.team_id,
        race_id: request.race_id,
        driver_ids: summary
            .tier_one
            .iter()
            .chain(summary.tier_two.iter())
            .copied()
            .collect(),
        total_cost: summary.total_cost,
        submitted_on_time: true,
        points: Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    struct Paddock {
        fx: Fixture,
        team: Uuid,
        race: Uuid,
        verstappen: Uuid,
        leclerc: Uuid,
        cheap: Vec<Uuid>,
    }

    fn paddock() -> Paddock {
        let mut fx = Fixture::new();
        let team = fx.team("Pole Sitters");
        let race = fx.race(1);
        let verstappen = fx.tier_one_driver("Max Verstappen", 10);
        let leclerc = fx.tier_one_driver("Charles Leclerc", 8);
        let cheap = (0..5)
            .map(|i| fx.tier_two_driver(&format!("Rookie {}", i), 2))
            .collect();
        Paddock {
            fx,
            team,
            race,
            verstappen,
            leclerc,
            cheap,
        }
    }

    fn request(p: &Paddock, driver_ids: Vec<Uuid>) -> SelectionRequest {
        SelectionRequest {
            team_id: p.team,
            race_id: p.race,
            driver_ids,
        }
    }

    fn assert_roster_violation(result: Result<RosterSummary>) {
        assert!(matches!(result, Err(ScoringError::RosterViolation(_))), "{:?}", result);
    }

    #[test]
    fn test_valid_lineup_is_priced() {
        let p = paddock();
        let req = request(&p, vec![p.cheap[0], p.verstappen, p.cheap[1], p.cheap[2], p.cheap[3]]);
        let summary = validate_selection(&p.fx.store, &p.fx.rules, &req).unwrap();

        assert_eq!(summary.total_cost, Decimal::from(18));
        assert_eq!(summary.tier_one, vec![p.verstappen]);
        assert_eq!(summary.tier_two.len(), 4);

        let selection = build_selection(&req, &summary);
        assert_eq!(selection.driver_ids[0], p.verstappen);
        assert_eq!(selection.points, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_one_tier_one() {
        let p = paddock();
        let none = request(&p, vec![p.cheap[0], p.cheap[1]]);
        let two = request(&p, vec![p.verstappen, p.leclerc]);
        assert_roster_violation(validate_selection(&p.fx.store, &p.fx.rules, &none));
        assert_roster_violation(validate_selection(&p.fx.store, &p.fx.rules, &two));
    }

    #[test]
    fn test_salary_cap() {
        let mut p = paddock();
        let pricey = p.fx.tier_two_driver("Expensive Veteran", 5);
        let req = request(&p, vec![p.verstappen, pricey, p.cheap[0], p.cheap[1], p.cheap[2]]);
        // 10 + 5 + 2 + 2 + 2
        assert_roster_violation(validate_selection(&p.fx.store, &p.fx.rules, &req));
    }

    #[test]
    fn test_too_many_drivers_fails_validation() {
        let p = paddock();
        let mut ids = vec![p.leclerc];
        ids.extend(p.cheap.iter().copied());
        let req = request(&p, ids);
        assert!(matches!(
            validate_selection(&p.fx.store, &p.fx.rules, &req),
            Err(ScoringError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_driver_rejected() {
        let p = paddock();
        let req = request(&p, vec![p.verstappen, p.cheap[0], p.cheap[0]]);
        assert_roster_violation(validate_selection(&p.fx.store, &p.fx.rules, &req));
    }

    #[test]
    fn test_untiered_driver_rejected() {
        let mut p = paddock();
        let reserve = p.fx.driver("Reserve", None, 1, None);
        let req = request(&p, vec![p.verstappen, reserve]);
        assert_roster_violation(validate_selection(&p.fx.store, &p.fx.rules, &req));
    }

    #[test]
    fn test_unknown_driver_is_not_found() {
        let p = paddock();
        let req = request(&p, vec![p.verstappen, Uuid::new_v4()]);
        let err = validate_selection(&p.fx.store, &p.fx.rules, &req).unwrap_err();
        assert!(err.is_not_found());
    }
}
