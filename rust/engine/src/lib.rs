//! # handball-engine: Possession-Level Match Simulator
//!
//! A deterministic match engine for a handball-style league. Given two fully
//! resolved rosters it simulates a match possession by possession until the
//! clock runs out, producing a final score, a play-by-play log and per-player
//! box-score lines that can be flushed into each player's season log.
//!
//! ## Core Modules
//!
//! - [`rng`] - Buffered, seedable random source (ChaCha20) and scripted replay
//! - [`clock`] - Countdown game clock with an explicit expiry signal
//! - [`roster`] - Players, lineups, rosters and season logs
//! - [`aggregate`] - Per-match sampling of ratings into team-level figures
//! - [`tracker`] - Shot resolution, box score and play-by-play
//! - [`possession`] - Single-possession state machine
//! - [`engine`] - Match orchestration (coin flip, halves, halftime, postgame)
//! - [`report`] - Match outcome and season-log flush
//! - [`logger`] - JSONL match history
//! - [`config`] - Match timing and rule configuration
//! - [`errors`] - Error types for match operations
//!
//! ## Deterministic Simulation
//!
//! The same seed and rosters always produce the same match:
//!
//! ```no_run
//! use handball_engine::config::MatchConfig;
//! use handball_engine::engine::Engine;
//! # fn rosters() -> (handball_engine::roster::Roster, handball_engine::roster::Roster) { unimplemented!() }
//!
//! let (home, away) = rosters();
//! let a = Engine::new(Some(42), MatchConfig::default()).simulate(&home, &away).unwrap();
//! let b = Engine::new(Some(42), MatchConfig::default()).simulate(&home, &away).unwrap();
//! assert_eq!(a.play_by_play, b.play_by_play);
//! ```
//!
//! ## Shot Probabilities
//!
//! ```rust
//! use handball_engine::possession::shot_probability;
//! use handball_engine::tracker::on_target_probability;
//!
//! // Shooting overtakes passing at the 34 mark
//! assert!((shot_probability(34.0) - 0.5).abs() < 1e-12);
//! assert!(on_target_probability(5.0, 38.0) > on_target_probability(5.0, 30.0));
//! ```

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod possession;
pub mod report;
pub mod rng;
pub mod roster;
pub mod tracker;

pub use engine::{play_match, Engine, MatchPhase};
pub use errors::{EngineError, EngineResult};
pub use report::{MatchOutcome, MatchResult};
