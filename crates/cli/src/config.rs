use anyhow::{Context, Result};
use pitwall_scoring::ScoringRules;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Config {
    pub rules: ScoringRules,
}

impl Config {
    /// Scoring rules with the league's overrides from the environment applied.
    pub fn from_env() -> Result<Self> {
        let mut rules = ScoringRules::default();

        if let Ok(policy) = std::env::var("PITWALL_PREVIOUS_ROUND") {
            rules.previous_round = policy
                .parse()
                .map_err(anyhow::Error::msg)
                .context("PITWALL_PREVIOUS_ROUND must be 'adjacent' or 'most-recent'")?;
        }
        if let Ok(cap) = std::env::var("PITWALL_SALARY_CAP") {
            rules.salary_cap = cap
                .trim()
                .parse::<Decimal>()
                .context("PITWALL_SALARY_CAP must be a number")?;
        }

        Ok(Self { rules })
    }
}
