//! `sim`: plays one match between two roster files.
//!
//! The seed comes from `--seed`, then the resolved configuration, then a
//! random draw; it is always printed so the match can be replayed.
//!
//! ```no_run
//! use handball_cli::commands::sim::{SimArgs, handle_sim_command};
//! use std::io;
//!
//! let args = SimArgs {
//!     home: "data/hawks.json".into(),
//!     away: "data/owls.json".into(),
//!     seed: Some(42),
//!     output: Some("data/matches.jsonl".into()),
//!     update_rosters: false,
//! };
//! handle_sim_command(&args, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_box_score, format_result, format_scoreline};
use crate::io_utils::{ensure_parent_dir, load_roster};
use crate::ui;
use handball_engine::engine::Engine;
use handball_engine::logger::MatchLogger;
use handball_engine::roster::Roster;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SimArgs {
    pub home: String,
    pub away: String,
    pub seed: Option<u64>,
    /// JSONL file the outcome is appended to
    pub output: Option<String>,
    /// Write the rosters back with this match added to their season logs
    pub update_rosters: bool,
}

pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    let cfg = resolved.config;

    if args.update_rosters && same_file(&args.home, &args.away) {
        return Err(CliError::InvalidInput(format!(
            "--update-rosters needs two different roster files, both point to {}",
            args.away
        )));
    }

    let mut home = load_roster(&args.home)?;
    let mut away = load_roster(&args.away)?;
    if home.name == away.name {
        ui::display_warning(err, &format!("both rosters are named '{}'", home.name))?;
    }

    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut engine = Engine::new(Some(seed), cfg.match_config());
    let outcome = engine.simulate(&home, &away)?;
    info!(seed, home = %home.name, away = %away.name, "match simulated");

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Coin flip: {}", outcome.team(outcome.coin_flip).name)?;
    writeln!(out)?;
    for line in &outcome.play_by_play {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    for line in format_box_score(&outcome.home)
        .into_iter()
        .chain(format_box_score(&outcome.away))
    {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    writeln!(out, "Final: {}", format_scoreline(&outcome.home, &outcome.away))?;
    writeln!(
        out,
        "Result: {}",
        format_result(outcome.result, &home.name, &away.name)
    )?;

    if let Some(path) = args.output.as_deref() {
        ensure_parent_dir(std::path::Path::new(path)).map_err(CliError::InvalidInput)?;
        let mut logger = MatchLogger::create(path)?;
        let record = logger.log_outcome(&outcome)?;
        writeln!(out, "Saved match {} to {}", record.match_id, path)?;
    }

    if args.update_rosters {
        outcome.apply(&mut home, &mut away)?;
        save_roster(&home, &args.home)?;
        save_roster(&away, &args.away)?;
        writeln!(out, "Updated season logs in {} and {}", args.home, args.away)?;
    }
    Ok(())
}

fn same_file(a: &str, b: &str) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn save_roster(roster: &Roster, path: &str) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(roster).map_err(std::io::Error::other)?;
    std::fs::write(path, json)?;
    Ok(())
}
