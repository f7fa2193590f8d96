use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Playing role within a lineup. Only forwards and midfielders shoot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Role {
    Forward,
    Midfielder,
    Defense,
    Goalkeeper,
}

impl Role {
    pub fn is_scorer(self) -> bool {
        matches!(self, Role::Forward | Role::Midfielder)
    }
}

/// Per-game history appended to once per match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonLog {
    pub shots_taken: Vec<u32>,
    pub goals: Vec<u32>,
    /// Sampled offensive contribution per game, before minutes weighting
    pub performances: Vec<f64>,
}

impl SeasonLog {
    pub fn games(&self) -> usize {
        self.goals.len()
    }

    pub fn push_game(&mut self, shots: u32, goals: u32, performance: f64) {
        self.shots_taken.push(shots);
        self.goals.push(goals);
        self.performances.push(performance);
    }
}

/// A player with ratings already resolved by the roster collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub offense: f64,
    pub defense: f64,
    #[serde(default)]
    pub goalkeeping: f64,
    /// Standard deviation of the per-match draw around each rating
    #[serde(default)]
    pub variance: f64,
    #[serde(default)]
    pub season_log: SeasonLog,
}

impl Player {
    pub fn new(name: impl Into<String>, offense: f64, defense: f64, variance: f64) -> Self {
        Self {
            name: name.into(),
            offense,
            defense,
            goalkeeping: 0.1,
            variance,
            season_log: SeasonLog::default(),
        }
    }

    pub fn keeper(name: impl Into<String>, goalkeeping: f64, variance: f64) -> Self {
        Self {
            name: name.into(),
            offense: 0.0,
            defense: 0.0,
            goalkeeping,
            variance,
            season_log: SeasonLog::default(),
        }
    }

    pub fn total_season_goals(&self) -> u32 {
        self.season_log.goals.iter().sum()
    }

    pub fn total_season_shots(&self) -> u32 {
        self.season_log.shots_taken.iter().sum()
    }

    /// Goals per shot over the season, `None` before the first shot.
    pub fn shooting_percentage(&self) -> Option<f64> {
        let shots = self.total_season_shots();
        if shots == 0 {
            None
        } else {
            Some(self.total_season_goals() as f64 / shots as f64)
        }
    }
}

/// One partition of a roster (starters or bench).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    #[serde(default)]
    pub forwards: Vec<Player>,
    #[serde(default)]
    pub midfielders: Vec<Player>,
    #[serde(default)]
    pub defense: Vec<Player>,
    #[serde(default)]
    pub goalkeeper: Option<Player>,
}

impl Lineup {
    /// Players in canonical order: forwards, midfielders, defense, keeper.
    pub fn players(&self) -> impl Iterator<Item = (Role, &Player)> {
        self.forwards
            .iter()
            .map(|p| (Role::Forward, p))
            .chain(self.midfielders.iter().map(|p| (Role::Midfielder, p)))
            .chain(self.defense.iter().map(|p| (Role::Defense, p)))
            .chain(self.goalkeeper.iter().map(|p| (Role::Goalkeeper, p)))
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.forwards
            .iter_mut()
            .chain(self.midfielders.iter_mut())
            .chain(self.defense.iter_mut())
            .chain(self.goalkeeper.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.forwards.len()
            + self.midfielders.len()
            + self.defense.len()
            + usize::from(self.goalkeeper.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Win/loss/tie counters for a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl TeamRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Where a player sits in the roster.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Starters,
    Bench,
    Reserves,
}

/// A fully resolved team: starters, bench and reserves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub starters: Lineup,
    #[serde(default)]
    pub bench: Lineup,
    #[serde(default)]
    pub reserves: Vec<Player>,
    #[serde(default)]
    pub record: TeamRecord,
    /// Ids of match outcomes already flushed into this roster
    #[serde(default)]
    pub applied_matches: BTreeSet<Uuid>,
}

impl Roster {
    pub fn new(name: impl Into<String>, starters: Lineup, bench: Lineup) -> Self {
        Self {
            name: name.into(),
            starters,
            bench,
            reserves: Vec::new(),
            record: TeamRecord::default(),
            applied_matches: BTreeSet::new(),
        }
    }

    pub fn with_reserves(mut self, reserves: Vec<Player>) -> Self {
        self.reserves = reserves;
        self
    }

    pub fn has_applied(&self, match_id: &Uuid) -> bool {
        self.applied_matches.contains(match_id)
    }

    pub(crate) fn mark_applied(&mut self, match_id: Uuid) {
        self.applied_matches.insert(match_id);
    }

    pub fn record_win(&mut self) {
        self.record.wins += 1;
    }

    pub fn record_loss(&mut self) {
        self.record.losses += 1;
    }

    pub fn record_tie(&mut self) {
        self.record.ties += 1;
    }

    /// Every player in canonical order: starters, bench, then reserves.
    ///
    /// Reserves carry no role; they never take the court.
    pub fn players(&self) -> impl Iterator<Item = (Unit, Option<Role>, &Player)> {
        self.starters
            .players()
            .map(|(r, p)| (Unit::Starters, Some(r), p))
            .chain(self.bench.players().map(|(r, p)| (Unit::Bench, Some(r), p)))
            .chain(self.reserves.iter().map(|p| (Unit::Reserves, None, p)))
    }

    /// Mutable view in the same order as [`Roster::players`].
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.starters
            .players_mut()
            .chain(self.bench.players_mut())
            .chain(self.reserves.iter_mut())
    }

    pub fn player_count(&self) -> usize {
        self.starters.len() + self.bench.len() + self.reserves.len()
    }

    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players().map(|(_, _, p)| p).find(|p| p.name == name)
    }
}
