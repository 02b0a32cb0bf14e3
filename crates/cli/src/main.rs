mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use pitwall_scoring::dto::selection::SelectionRequest;
use pitwall_scoring::services::{leaderboard, prediction, roster, season, selection};
use pitwall_scoring::{LeagueSnapshot, MemoryStore};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "pitwall")]
#[command(about = "Fantasy F1 league scoring", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// League snapshot JSON to score against.
    #[arg(long, env = "PITWALL_SNAPSHOT")]
    snapshot: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute and store one selection's points.
    RecomputeSelection { selection_id: Uuid },
    /// Recompute every selection of a race, e.g. after its results were imported.
    RecomputeRace { race_id: Uuid },
    /// Recompute every selection in a league.
    RefreshLeague { league_id: Uuid },
    /// Per-driver, per-session points of one selection.
    Breakdown { selection_id: Uuid },
    SeasonTotal {
        team_id: Uuid,

        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Split driver totals into Tier-1 and Tier-2 tables.
        #[arg(long)]
        by_tier: bool,
    },
    TierOneUsage { team_id: Uuid },
    Leaderboard {
        league_id: Uuid,

        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    TopDrivers {
        league_id: Uuid,

        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    LatestRace {
        league_id: Uuid,

        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Check a lineup against the roster rules without storing it.
    CheckSelection {
        #[arg(long)]
        team: Uuid,

        #[arg(long)]
        race: Uuid,

        #[arg(long = "driver", required = true)]
        drivers: Vec<Uuid>,
    },
    /// Grade a race's prediction answers and rescore its selections.
    Regrade { race_id: Uuid },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pitwall={},pitwall_scoring={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let rules = &config.rules;
    let mut store = load_store(&cli.snapshot)?;

    match cli.command {
        Commands::RecomputeSelection { selection_id } => {
            let points = selection::recompute_selection(&mut store, rules, selection_id)?;
            save_store(&cli.snapshot, &store)?;
            print_json(&points)?;
        }
        Commands::RecomputeRace { race_id } => {
            let updated = selection::recompute_race_selections(&mut store, rules, race_id)?;
            save_store(&cli.snapshot, &store)?;
            tracing::info!("Updated {} selections", updated);
        }
        Commands::RefreshLeague { league_id } => {
            let updated = leaderboard::refresh_league(&mut store, rules, league_id)?;
            save_store(&cli.snapshot, &store)?;
            tracing::info!("Updated {} selections", updated);
        }
        Commands::Breakdown { selection_id } => {
            print_json(&selection::selection_breakdown(&store, rules, selection_id)?)?;
        }
        Commands::SeasonTotal {
            team_id,
            as_of,
            by_tier,
        } => {
            let total = season::team_season_total(&store, rules, team_id, as_of.unwrap_or_else(today))?;
            if by_tier {
                print_json(&season::tier_split(&total))?;
            } else {
                print_json(&total)?;
            }
        }
        Commands::TierOneUsage { team_id } => {
            let now = Local::now().naive_local();
            print_json(&season::tier_one_usage(&store, team_id, now)?)?;
        }
        Commands::Leaderboard { league_id, as_of } => {
            let board =
                leaderboard::league_leaderboard(&store, rules, league_id, as_of.unwrap_or_else(today))?;
            print_json(&board)?;
        }
        Commands::TopDrivers { league_id, count } => {
            let count = count.unwrap_or(rules.top_driver_count);
            print_json(&leaderboard::top_drivers(&store, rules, league_id, count)?)?;
        }
        Commands::LatestRace { league_id, as_of } => {
            let snapshot =
                leaderboard::latest_race_snapshot(&mut store, rules, league_id, as_of.unwrap_or_else(today))?;
            save_store(&cli.snapshot, &store)?;
            match snapshot {
                Some(snapshot) => print_json(&snapshot)?,
                None => tracing::info!("League {} has no completed race yet", league_id),
            }
        }
        Commands::CheckSelection {
            team,
            race,
            drivers,
        } => {
            let request = SelectionRequest {
                team_id: team,
                race_id: race,
                driver_ids: drivers,
            };
            let summary = roster::validate_selection(&store, rules, &request)
                .context("Lineup breaks the roster rules")?;
            print_json(&summary)?;
        }
        Commands::Regrade { race_id } => {
            let graded = prediction::regrade_race_answers(&mut store, race_id)?;
            let updated = selection::recompute_race_selections(&mut store, rules, race_id)?;
            save_store(&cli.snapshot, &store)?;
            tracing::info!("Regraded {} answers, updated {} selections", graded, updated);
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load_store(path: &Path) -> Result<MemoryStore> {
    tracing::debug!("Loading league snapshot from: {}", path.display());

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read snapshot {}", path.display()))?;
    let snapshot: LeagueSnapshot = serde_json::from_str(&json)
        .with_context(|| format!("Snapshot {} is not valid JSON", path.display()))?;

    MemoryStore::from_snapshot(snapshot).context("Snapshot violates a uniqueness constraint")
}

fn save_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store.snapshot())?;
    std::fs::write(path, json).with_context(|| format!("Cannot write snapshot {}", path.display()))?;
    tracing::debug!("Saved league snapshot to: {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
