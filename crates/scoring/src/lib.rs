//! Scoring core for a Formula 1 fantasy league.
//!
//! Turns session results into per-driver points, folds them into team
//! selections and season totals, and ranks teams and drivers. Persistence is
//! reached through [`LeagueStore`]; [`MemoryStore`] is the bundled backend.

pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{PreviousRoundPolicy, ScoringRules};
pub use error::{Result, ScoringError};
pub use repository::LeagueStore;
pub use repository::memory::MemoryStore;
pub use repository::snapshot::LeagueSnapshot;
