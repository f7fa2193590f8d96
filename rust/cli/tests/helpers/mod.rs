#![allow(dead_code)]

use handball_engine::roster::{Lineup, Player, Roster};
use std::path::{Path, PathBuf};

pub const ENV_KEYS: [&str; 4] = [
    "HANDBALL_CONFIG",
    "HANDBALL_SEED",
    "HANDBALL_ALLOW_TIES",
    "HANDBALL_HALF_SECONDS",
];

/// Removes every `HANDBALL_*` variable. Callers must be `#[serial]`.
pub fn clear_env() {
    for key in ENV_KEYS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

pub fn set_env(key: &str, value: impl AsRef<std::ffi::OsStr>) {
    unsafe {
        std::env::set_var(key, value);
    }
}

fn lineup(prefix: &str, count: usize, offense: f64, defense: f64, variance: f64) -> Lineup {
    let make = |pos: &str| -> Vec<Player> {
        (1..=count)
            .map(|i| Player::new(format!("{prefix} {pos}{i}"), offense, defense, variance))
            .collect()
    };
    Lineup {
        forwards: make("F"),
        midfielders: make("M"),
        defense: make("D"),
        goalkeeper: Some(Player::keeper(format!("{prefix} GK"), 0.5, variance)),
    }
}

pub fn roster_with_variance(name: &str, offense: f64, defense: f64, variance: f64) -> Roster {
    Roster::new(
        name,
        lineup(&format!("{name} S"), 3, offense, defense, variance),
        lineup(&format!("{name} B"), 2, offense, defense, variance),
    )
}

pub fn roster(name: &str, offense: f64, defense: f64) -> Roster {
    roster_with_variance(name, offense, defense, 0.5)
}

pub fn write_roster(dir: &Path, roster: &Roster) -> PathBuf {
    let path = dir.join(format!("{}.json", roster.name.to_lowercase()));
    std::fs::write(&path, serde_json::to_string_pretty(roster).unwrap()).unwrap();
    path
}

pub struct Output {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> Output {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["handball"];
    argv.extend_from_slice(args);
    let code = handball_cli::run(argv, &mut out, &mut err);
    Output {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}
