use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the Tier-2 bonus finds the round whose constructor standings apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviousRoundPolicy {
    /// Exactly `round - 1` in the same league. A gap in the calendar skips the bonus.
    #[default]
    Adjacent,
    /// The latest earlier round in the league that has a standing for the constructor.
    MostRecentPrior,
}

impl FromStr for PreviousRoundPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adjacent" => Ok(Self::Adjacent),
            "most-recent" | "most-recent-prior" => Ok(Self::MostRecentPrior),
            other => Err(format!("unknown previous round policy '{}'", other)),
        }
    }
}

/// League scoring and roster constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    pub salary_cap: Decimal,
    /// Exact number of Tier-1 drivers a lineup must contain.
    pub tier_one_drivers: usize,
    pub max_tier_two_drivers: usize,

    pub tier_two_multiplier: Decimal,
    pub tier_two_bonus: Decimal,
    /// The bonus is only available for rounds strictly greater than this.
    pub bonus_after_round: i32,
    /// Constructors at or below this standing count as backmarkers.
    pub backmarker_standing: i32,
    pub bonus_position_cutoff: i32,

    pub qualifying_top_ten_bonus: Decimal,
    pub pole_bonus: Decimal,
    pub fastest_lap_bonus: Decimal,
    pub fastest_lap_cutoff: i32,

    pub top_driver_count: usize,
    pub previous_round: PreviousRoundPolicy,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            salary_cap: Decimal::from(20),
            tier_one_drivers: 1,
            max_tier_two_drivers: 4,
            tier_two_multiplier: Decimal::new(25, 1),
            tier_two_bonus: Decimal::from(4),
            bonus_after_round: 3,
            backmarker_standing: 8,
            bonus_position_cutoff: 15,
            qualifying_top_ten_bonus: Decimal::from(2),
            pole_bonus: Decimal::from(3),
            fastest_lap_bonus: Decimal::ONE,
            fastest_lap_cutoff: 10,
            top_driver_count: 5,
            previous_round: PreviousRoundPolicy::Adjacent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = ScoringRules::default();
        assert_eq!(rules.salary_cap, Decimal::from(20));
        assert_eq!(rules.tier_two_multiplier.to_string(), "2.5");
        assert_eq!(rules.previous_round, PreviousRoundPolicy::Adjacent);
    }

    #[test]
    fn test_previous_round_policy_parsing() {
        assert_eq!("adjacent".parse::<PreviousRoundPolicy>(), Ok(PreviousRoundPolicy::Adjacent));
        assert_eq!(
            "Most-Recent".parse::<PreviousRoundPolicy>(),
            Ok(PreviousRoundPolicy::MostRecentPrior)
        );
        assert!("latest".parse::<PreviousRoundPolicy>().is_err());
    }
}
