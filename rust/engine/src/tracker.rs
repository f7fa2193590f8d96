use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{ScorerPool, TeamMatchStats};
use crate::clock::GameClock;
use crate::rng::RandomSource;

/// Ball position of the opponent's goal line.
pub const GOAL_LINE: f64 = 40.0;
/// Decay of on-target probability with distance from goal
pub const ON_TARGET_DECAY: f64 = 0.35;
/// Chance the attack keeps the ball after a miss or save
pub const RECOVERY_PROBABILITY: f64 = 0.1;
pub const TEAM_GOAL_WEIGHT: f64 = 0.5;
pub const SHOOTER_GOAL_WEIGHT: f64 = 1.25;

pub const HALFTIME_MARKER: &str = "--- HALFTIME ---";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }
}

/// Shots and goals for one scorer-pool slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatLine {
    pub shots: u32,
    pub goals: u32,
}

/// Team-level counters kept alongside the per-player lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTally {
    pub shot_attempts: u32,
    pub goals: u32,
    /// Failed passes
    pub pass_turnovers: u32,
    /// Missed or saved shots that were not recovered
    pub shot_turnovers: u32,
    /// Missed or saved shots won back by the attack
    pub offensive_recoveries: u32,
    /// Subset of `shot_turnovers` where the shot missed the target
    pub off_target_turnovers: u32,
    pub buzzer_beaters: u32,
}

/// How a single shot ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    Scored,
    Recovered,
    TurnedOver,
}

impl ShotOutcome {
    /// `(scored, recovered, turned_over)`
    pub fn as_flags(self) -> (bool, bool, bool) {
        match self {
            ShotOutcome::Scored => (true, false, false),
            ShotOutcome::Recovered => (false, true, false),
            ShotOutcome::TurnedOver => (false, false, true),
        }
    }
}

/// Probability a shot from `position` by a shooter rated `scorer_offense`
/// is on target.
pub fn on_target_probability(scorer_offense: f64, position: f64) -> f64 {
    scorer_offense * (-ON_TARGET_DECAY * (GOAL_LINE - position)).exp()
}

/// Probability an on-target shot beats the defense and keeper.
pub fn goal_probability(
    team_offense: f64,
    scorer_offense: f64,
    opposing_defense: f64,
    opposing_keeper: f64,
) -> f64 {
    let denominator = team_offense + opposing_defense + opposing_keeper;
    if denominator <= 0.0 {
        return 0.0;
    }
    (TEAM_GOAL_WEIGHT * team_offense + SHOOTER_GOAL_WEIGHT * scorer_offense) / denominator
}

#[derive(Debug, Clone)]
struct TeamLedger {
    name: String,
    pool: ScorerPool,
    lines: Vec<MatchStatLine>,
    tally: TeamTally,
}

impl TeamLedger {
    fn new(name: String, pool: ScorerPool) -> Self {
        let lines = vec![MatchStatLine::default(); pool.len()];
        Self {
            name,
            pool,
            lines,
            tally: TeamTally::default(),
        }
    }
}

/// Records shots, goals, turnovers and the play-by-play for one match.
#[derive(Debug, Clone)]
pub struct StatTracker {
    teams: [TeamLedger; 2],
    log: Vec<String>,
    half: u8,
}

impl StatTracker {
    pub fn new(
        home_name: impl Into<String>,
        home_pool: ScorerPool,
        away_name: impl Into<String>,
        away_pool: ScorerPool,
    ) -> Self {
        Self {
            teams: [
                TeamLedger::new(home_name.into(), home_pool),
                TeamLedger::new(away_name.into(), away_pool),
            ],
            log: Vec::new(),
            half: 1,
        }
    }

    /// Resolves one shot by `side` from `position`.
    ///
    /// Draw order: scorer selection, on-target check, then goal check (on
    /// target only), then recovery check (unless scored).
    pub fn resolve_shot<R: RandomSource + ?Sized>(
        &mut self,
        side: Side,
        position: f64,
        offense: &TeamMatchStats,
        defense: &TeamMatchStats,
        clock: &GameClock,
        source: &mut R,
    ) -> ShotOutcome {
        let half = self.half;
        let team = &mut self.teams[side.index()];
        team.tally.shot_attempts += 1;

        let scorer = team.pool.pick(source.next_uniform());
        let scorer_offense = team.pool.scorers().get(scorer).map_or(0.0, |s| s.offense);
        if let Some(line) = team.lines.get_mut(scorer) {
            line.shots += 1;
        }

        let on_target = source.next_uniform() < on_target_probability(scorer_offense, position);
        if on_target {
            let p_goal = goal_probability(
                offense.offense,
                scorer_offense,
                defense.defense,
                defense.goalkeeper,
            );
            if source.next_uniform() < p_goal {
                if let Some(line) = team.lines.get_mut(scorer) {
                    line.goals += 1;
                }
                team.tally.goals += 1;
                let player = team
                    .pool
                    .scorers()
                    .get(scorer)
                    .map_or("unknown", |s| s.name.as_str());
                let entry = format!("[H{} {}] {} GOAL - {}", half, clock.display(), team.name, player);
                debug!(team = %team.name, player, position, "goal");
                self.log.push(entry);
                return ShotOutcome::Scored;
            }
        }

        if source.next_uniform() < RECOVERY_PROBABILITY {
            team.tally.offensive_recoveries += 1;
            ShotOutcome::Recovered
        } else {
            team.tally.shot_turnovers += 1;
            if !on_target {
                team.tally.off_target_turnovers += 1;
            }
            ShotOutcome::TurnedOver
        }
    }

    pub fn record_pass_turnover(&mut self, side: Side) {
        self.teams[side.index()].tally.pass_turnovers += 1;
    }

    pub fn record_buzzer_beater(&mut self, side: Side) {
        self.teams[side.index()].tally.buzzer_beaters += 1;
    }

    /// Tags subsequent log entries as second half.
    pub fn start_second_half(&mut self) {
        self.half = 2;
        self.log.push(HALFTIME_MARKER.to_string());
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn half(&self) -> u8 {
        self.half
    }

    pub fn team_name(&self, side: Side) -> &str {
        &self.teams[side.index()].name
    }

    pub fn lines(&self, side: Side) -> &[MatchStatLine] {
        &self.teams[side.index()].lines
    }

    pub fn tally(&self, side: Side) -> &TeamTally {
        &self.teams[side.index()].tally
    }

    pub fn pool(&self, side: Side) -> &ScorerPool {
        &self.teams[side.index()].pool
    }

    pub fn play_by_play(&self) -> &[String] {
        &self.log
    }

    pub fn total_goals(&self) -> u32 {
        self.teams.iter().map(|t| t.tally.goals).sum()
    }

    pub fn into_log(self) -> Vec<String> {
        self.log
    }
}
