use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{aggregate_rosters, TeamMatchStats, TeamSheet};
use crate::clock::GameClock;
use crate::config::MatchConfig;
use crate::errors::{EngineError, EngineResult};
use crate::possession::{reposition_after, run_possession, PossessionContext, RESTART_POSITION};
use crate::report::{MatchOutcome, MatchResult, PlayerLine, TeamBox};
use crate::rng::{ProbabilityStack, RandomSource};
use crate::roster::{Roster, Unit};
use crate::tracker::{Side, StatTracker};

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Where the orchestrator is in a match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    CoinFlip,
    FirstHalf,
    Halftime,
    SecondHalf,
    Postgame,
}

/// Drives a full match between two rosters: coin flip, two halves with a
/// possession swap and keeper rotation at halftime, and the final result.
///
/// Each engine owns its random source; simulate concurrent matches with
/// separate engines.
///
/// # Examples
///
/// ```no_run
/// use handball_engine::config::MatchConfig;
/// use handball_engine::engine::Engine;
/// # fn rosters() -> (handball_engine::roster::Roster, handball_engine::roster::Roster) { unimplemented!() }
///
/// let (home, away) = rosters();
/// let mut engine = Engine::new(Some(12345), MatchConfig::default());
/// let outcome = engine.simulate(&home, &away).expect("valid rosters");
/// println!("{} - {}", outcome.home_score(), outcome.away_score());
/// ```
#[derive(Debug)]
pub struct Engine<R: RandomSource = ProbabilityStack> {
    config: MatchConfig,
    source: R,
    seed: Option<u64>,
    phase: MatchPhase,
}

impl Engine<ProbabilityStack> {
    pub fn new(seed: Option<u64>, config: MatchConfig) -> Self {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        let source = ProbabilityStack::with_capacity(seed, config.probability_buffer);
        Self {
            config,
            source,
            seed: Some(seed),
            phase: MatchPhase::CoinFlip,
        }
    }
}

impl<R: RandomSource> Engine<R> {
    pub fn with_source(source: R, config: MatchConfig) -> Self {
        Self {
            config,
            source,
            seed: None,
            phase: MatchPhase::CoinFlip,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Simulates one match. Rosters are only read; apply the returned
    /// outcome to flush it into their season logs.
    pub fn simulate(&mut self, home: &Roster, away: &Roster) -> EngineResult<MatchOutcome> {
        self.config.validate()?;
        self.phase = MatchPhase::CoinFlip;

        let aggregate = aggregate_rosters(home, away, &mut self.source)?;
        let coin_flip = if self.source.next_uniform() <= 0.5 {
            Side::Home
        } else {
            Side::Away
        };
        info!(home = %home.name, away = %away.name, ?coin_flip, "coin flip");

        let mut state = MatchState {
            stats: [aggregate.home.stats, aggregate.away.stats],
            scores: [0, 0],
            possession: coin_flip,
            ball: RESTART_POSITION,
            clock: GameClock::new(self.config.half_duration_secs),
            tracker: StatTracker::new(
                aggregate.home.name.clone(),
                aggregate.home.pool.clone(),
                aggregate.away.name.clone(),
                aggregate.away.pool.clone(),
            ),
        };

        self.phase = MatchPhase::FirstHalf;
        self.play_half(&mut state, false);

        self.phase = MatchPhase::Halftime;
        state.possession = coin_flip.opponent();
        state.tracker.start_second_half();
        for stats in state.stats.iter_mut() {
            stats.swap_goalkeepers();
        }
        info!(
            home_score = state.scores[0],
            away_score = state.scores[1],
            "halftime"
        );

        self.phase = MatchPhase::SecondHalf;
        self.play_half(&mut state, true);

        self.phase = MatchPhase::Postgame;
        self.postgame(state, coin_flip, home, away, &aggregate.home, &aggregate.away)
    }

    fn play_half(&mut self, state: &mut MatchState, second_half: bool) {
        state.clock.set_time(self.config.half_duration_secs);
        state.ball = RESTART_POSITION;
        let keeper_return_at = self.config.keeper_return_at();
        let mut backups_in_goal = second_half;

        while !state.clock.is_expired() {
            if backups_in_goal && state.clock.remaining() <= keeper_return_at {
                for stats in state.stats.iter_mut() {
                    stats.swap_goalkeepers();
                }
                backups_in_goal = false;
                info!(remaining = %state.clock.display(), "starting goalkeepers return");
            }

            let side = state.possession;
            let ctx = PossessionContext {
                side,
                offense: &state.stats[side.index()],
                defense: &state.stats[side.opponent().index()],
                config: &self.config,
            };
            let result = run_possession(
                ctx,
                &mut state.ball,
                &mut state.clock,
                &mut state.tracker,
                &mut self.source,
            );
            debug!(?side, ?result, remaining = state.clock.remaining(), "possession");

            if result.scored() {
                state.scores[side.index()] += 1;
            }
            reposition_after(&result, &mut state.ball, &mut state.clock, &self.config);
            state.possession = side.opponent();
        }

        if backups_in_goal {
            for stats in state.stats.iter_mut() {
                stats.swap_goalkeepers();
            }
        }
    }

    fn postgame(
        &self,
        mut state: MatchState,
        coin_flip: Side,
        home: &Roster,
        away: &Roster,
        home_sheet: &TeamSheet,
        away_sheet: &TeamSheet,
    ) -> EngineResult<MatchOutcome> {
        let [home_score, away_score] = state.scores;
        let result = MatchResult::from_scores(home_score, away_score);
        if result == MatchResult::Tie && !self.config.allow_ties {
            return Err(EngineError::TieNotAllowed { score: home_score });
        }
        info!(
            home = %home.name,
            away = %away.name,
            home_score,
            away_score,
            ?result,
            "full time"
        );
        state.tracker.push_log(format!(
            "FINAL: {} {} - {} {}",
            home.name, home_score, away_score, away.name
        ));

        let home_box = build_box(home, home_sheet, &state.tracker, Side::Home, home_score);
        let away_box = build_box(away, away_sheet, &state.tracker, Side::Away, away_score);
        Ok(MatchOutcome::new(
            self.seed,
            coin_flip,
            home_box,
            away_box,
            state.tracker.into_log(),
        ))
    }
}

/// Simulates a match and flushes it into both rosters in one step.
///
/// Nothing is written to either roster unless the whole match completes.
pub fn play_match(
    home: &mut Roster,
    away: &mut Roster,
    seed: Option<u64>,
    config: MatchConfig,
) -> EngineResult<MatchOutcome> {
    let mut engine = Engine::new(seed, config);
    let outcome = engine.simulate(home, away)?;
    outcome.apply(home, away)?;
    Ok(outcome)
}

struct MatchState {
    stats: [TeamMatchStats; 2],
    scores: [u32; 2],
    possession: Side,
    ball: f64,
    clock: GameClock,
    tracker: StatTracker,
}

fn build_box(
    roster: &Roster,
    sheet: &TeamSheet,
    tracker: &StatTracker,
    side: Side,
    score: u32,
) -> TeamBox {
    let lines = tracker.lines(side);
    let mut next_scorer = 0;
    let mut players = Vec::with_capacity(roster.player_count());
    for ((unit, role, player), performance) in roster.players().zip(&sheet.performances) {
        let shoots = unit != Unit::Reserves && role.is_some_and(|r| r.is_scorer());
        let (shots, goals) = if shoots {
            let line = lines.get(next_scorer).copied().unwrap_or_default();
            next_scorer += 1;
            (line.shots, line.goals)
        } else {
            (0, 0)
        };
        players.push(PlayerLine {
            name: player.name.clone(),
            unit,
            role,
            shots,
            goals,
            performance: *performance,
        });
    }
    TeamBox {
        name: roster.name.clone(),
        score,
        tally: *tracker.tally(side),
        players,
    }
}
