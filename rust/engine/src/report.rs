use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::roster::{Role, Roster, Unit};
use crate::tracker::{Side, TeamTally};

/// Full-time result from the home team's point of view.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    HomeWin,
    AwayWin,
    Tie,
}

impl MatchResult {
    pub fn from_scores(home: u32, away: u32) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => MatchResult::HomeWin,
            std::cmp::Ordering::Less => MatchResult::AwayWin,
            std::cmp::Ordering::Equal => MatchResult::Tie,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            MatchResult::HomeWin => Some(Side::Home),
            MatchResult::AwayWin => Some(Side::Away),
            MatchResult::Tie => None,
        }
    }
}

/// One roster player's line for the match.
///
/// Defense, keepers and reserves always carry zero shots and goals;
/// reserves also carry zero performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub name: String,
    pub unit: Unit,
    pub role: Option<Role>,
    pub shots: u32,
    pub goals: u32,
    pub performance: f64,
}

/// A team's side of the box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBox {
    pub name: String,
    pub score: u32,
    pub tally: TeamTally,
    /// Canonical roster order: starters, bench, reserves
    pub players: Vec<PlayerLine>,
}

impl TeamBox {
    pub fn total_shots(&self) -> u32 {
        self.players.iter().map(|p| p.shots).sum()
    }

    pub fn total_goals(&self) -> u32 {
        self.players.iter().map(|p| p.goals).sum()
    }
}

/// Everything a finished match hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Identity used to refuse a second flush of the same match, including
    /// from clones and deserialized copies
    pub id: Uuid,
    /// Seed the match was simulated from, when known
    pub seed: Option<u64>,
    /// Side that won the opening coin flip
    pub coin_flip: Side,
    pub home: TeamBox,
    pub away: TeamBox,
    pub result: MatchResult,
    pub play_by_play: Vec<String>,
}

impl MatchOutcome {
    pub(crate) fn new(
        seed: Option<u64>,
        coin_flip: Side,
        home: TeamBox,
        away: TeamBox,
        play_by_play: Vec<String>,
    ) -> Self {
        let result = MatchResult::from_scores(home.score, away.score);
        Self {
            id: Uuid::new_v4(),
            seed,
            coin_flip,
            home,
            away,
            result,
            play_by_play,
        }
    }

    pub fn home_score(&self) -> u32 {
        self.home.score
    }

    pub fn away_score(&self) -> u32 {
        self.away.score
    }

    pub fn team(&self, side: Side) -> &TeamBox {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Whether `roster`'s season logs have already received this match.
    pub fn is_applied_to(&self, roster: &Roster) -> bool {
        roster.has_applied(&self.id)
    }

    /// Flushes this match into both rosters: one season-log entry per
    /// player and one win/loss/tie per team.
    ///
    /// The rosters remember the outcome's [`id`](Self::id), so a match can
    /// be applied once no matter how many copies of the outcome exist; later
    /// calls fail with [`EngineError::OutcomeAlreadyApplied`] and change
    /// nothing. Both rosters are checked before either is touched.
    pub fn apply(&self, home: &mut Roster, away: &mut Roster) -> EngineResult<()> {
        if home.has_applied(&self.id) || away.has_applied(&self.id) {
            return Err(EngineError::OutcomeAlreadyApplied);
        }
        check_shape(&self.home, home)?;
        check_shape(&self.away, away)?;

        flush_lines(&self.home, home);
        flush_lines(&self.away, away);
        match self.result {
            MatchResult::HomeWin => {
                home.record_win();
                away.record_loss();
            }
            MatchResult::AwayWin => {
                home.record_loss();
                away.record_win();
            }
            MatchResult::Tie => {
                home.record_tie();
                away.record_tie();
            }
        }
        home.mark_applied(self.id);
        away.mark_applied(self.id);
        Ok(())
    }
}

fn check_shape(team: &TeamBox, roster: &Roster) -> EngineResult<()> {
    let found = roster.player_count();
    if found != team.players.len() {
        return Err(EngineError::RosterMismatch {
            team: roster.name.clone(),
            expected: team.players.len(),
            found,
        });
    }
    Ok(())
}

fn flush_lines(team: &TeamBox, roster: &mut Roster) {
    for (player, line) in roster.players_mut().zip(&team.players) {
        player
            .season_log
            .push_game(line.shots, line.goals, line.performance);
    }
}
