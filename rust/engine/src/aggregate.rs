//! Reduction of two rosters into the team-level figures the possession
//! model runs on.
//!
//! Every rating is re-drawn once per match from a normal distribution
//! centred on the player's rating with the player's variance as standard
//! deviation. Sampling order is fixed (home then away; starters then bench;
//! forwards, midfielders, defense, keeper) so a seed fully determines the
//! result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EngineError, EngineResult};
use crate::rng::RandomSource;
use crate::roster::{Lineup, Player, Role, Roster, Unit};

pub const MATCH_MINUTES: f64 = 60.0;
pub const STARTER_MINUTES: f64 = 45.0;
pub const BENCH_MINUTES: f64 = 22.5;

/// Scorer-weight multiplier for starters
pub const STARTER_SHOOTING_LIKELIHOOD: f64 = 1.15;
/// Scorer-weight multiplier for forwards
pub const FORWARD_SHOOTING_LIKELIHOOD: f64 = 1.2;

pub const PRIMARY_WEIGHT: f64 = 1.0;
pub const HYBRID_WEIGHT: f64 = 0.75;
pub const SECONDARY_WEIGHT: f64 = 0.5;

impl Role {
    /// Share of a player's offense that counts toward the team figure.
    pub fn offense_weight(self) -> f64 {
        match self {
            Role::Forward => PRIMARY_WEIGHT,
            Role::Midfielder => HYBRID_WEIGHT,
            Role::Defense => SECONDARY_WEIGHT,
            Role::Goalkeeper => 0.0,
        }
    }

    /// Share of a player's defense that counts toward the team figure.
    pub fn defense_weight(self) -> f64 {
        match self {
            Role::Forward => SECONDARY_WEIGHT,
            Role::Midfielder => HYBRID_WEIGHT,
            Role::Defense => PRIMARY_WEIGHT,
            Role::Goalkeeper => 0.0,
        }
    }
}

impl Unit {
    /// Fraction of the match a player in this unit is expected to play.
    pub fn minutes_fraction(self) -> f64 {
        match self {
            Unit::Starters => STARTER_MINUTES / MATCH_MINUTES,
            Unit::Bench => BENCH_MINUTES / MATCH_MINUTES,
            Unit::Reserves => 0.0,
        }
    }
}

/// Team-level figures for one match. Discarded when the match ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamMatchStats {
    pub offense: f64,
    pub defense: f64,
    /// Pass-completion probability: own offense against opposing defense
    pub ratio: f64,
    /// Keeper currently in goal
    pub goalkeeper: f64,
    /// Keeper waiting on the bench
    pub reserve_goalkeeper: f64,
}

impl TeamMatchStats {
    pub fn swap_goalkeepers(&mut self) {
        std::mem::swap(&mut self.goalkeeper, &mut self.reserve_goalkeeper);
    }
}

/// A player eligible to be credited with a shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorer {
    pub name: String,
    pub role: Role,
    pub unit: Unit,
    /// This match's sampled offense rating
    pub offense: f64,
}

/// Forwards and midfielders, starters then bench, with normalized
/// selection weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerPool {
    scorers: Vec<Scorer>,
    weights: Vec<f64>,
}

impl ScorerPool {
    /// Builds a pool whose weights are `base[i] * scorer.offense`,
    /// renormalized to sum to one. Falls back to equal weights when every
    /// product is zero.
    pub fn new(scorers: Vec<Scorer>, base: &[f64]) -> Self {
        let raw: Vec<f64> = scorers
            .iter()
            .zip(base)
            .map(|(s, b)| (b * s.offense).max(0.0))
            .collect();
        let total: f64 = raw.iter().sum();
        let weights = if total > 0.0 && total.is_finite() {
            raw.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / scorers.len().max(1) as f64; scorers.len()]
        };
        Self { scorers, weights }
    }

    pub fn scorers(&self) -> &[Scorer] {
        &self.scorers
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }

    /// Index of the scorer selected by a uniform draw `u` in `[0, 1)`.
    pub fn pick(&self, u: f64) -> usize {
        let mut cumulative = 0.0;
        for (i, w) in self.weights.iter().enumerate() {
            cumulative += w;
            if u < cumulative {
                return i;
            }
        }
        // rounding can leave the cumulative sum a hair under 1.0
        self.weights
            .iter()
            .rposition(|w| *w > 0.0)
            .unwrap_or(0)
    }
}

/// Everything derived from one roster for one match.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSheet {
    pub name: String,
    pub stats: TeamMatchStats,
    pub pool: ScorerPool,
    /// Sampled offensive contribution per roster player in canonical order;
    /// keepers and reserves are zero
    pub performances: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchAggregate {
    pub home: TeamSheet,
    pub away: TeamSheet,
}

/// Fails with `MissingRole` if a slot the model depends on is empty.
pub fn validate_roster(roster: &Roster) -> EngineResult<()> {
    let missing = |slot: &'static str| EngineError::MissingRole {
        team: roster.name.clone(),
        slot,
    };
    let starters = &roster.starters;
    if starters.forwards.is_empty() {
        return Err(missing("starting forwards"));
    }
    if starters.midfielders.is_empty() {
        return Err(missing("starting midfielders"));
    }
    if starters.defense.is_empty() {
        return Err(missing("starting defense"));
    }
    if starters.goalkeeper.is_none() {
        return Err(missing("starting goalkeeper"));
    }
    if roster.bench.goalkeeper.is_none() {
        return Err(missing("backup goalkeeper"));
    }
    Ok(())
}

/// Samples both rosters and produces their team sheets.
pub fn aggregate_rosters<R: RandomSource + ?Sized>(
    home: &Roster,
    away: &Roster,
    source: &mut R,
) -> EngineResult<MatchAggregate> {
    validate_roster(home)?;
    validate_roster(away)?;

    let home_draw = sample_roster(home, source);
    let away_draw = sample_roster(away, source);

    let home_stats = TeamMatchStats {
        offense: home_draw.offense,
        defense: home_draw.defense,
        ratio: offense_ratio(home_draw.offense, away_draw.defense),
        goalkeeper: home_draw.starting_keeper,
        reserve_goalkeeper: home_draw.backup_keeper,
    };
    let away_stats = TeamMatchStats {
        offense: away_draw.offense,
        defense: away_draw.defense,
        ratio: offense_ratio(away_draw.offense, home_draw.defense),
        goalkeeper: away_draw.starting_keeper,
        reserve_goalkeeper: away_draw.backup_keeper,
    };
    debug!(
        home_offense = home_stats.offense,
        home_defense = home_stats.defense,
        home_ratio = home_stats.ratio,
        away_offense = away_stats.offense,
        away_defense = away_stats.defense,
        away_ratio = away_stats.ratio,
        "rosters aggregated"
    );

    Ok(MatchAggregate {
        home: home_draw.into_sheet(&home.name, home_stats),
        away: away_draw.into_sheet(&away.name, away_stats),
    })
}

/// Own offense / (own offense + opposing defense); an even 0.5 when both
/// are zero.
pub fn offense_ratio(offense: f64, opposing_defense: f64) -> f64 {
    let total = offense + opposing_defense;
    if total > 0.0 {
        offense / total
    } else {
        0.5
    }
}

struct RosterDraw {
    offense: f64,
    defense: f64,
    starting_keeper: f64,
    backup_keeper: f64,
    scorers: Vec<Scorer>,
    scorer_base: Vec<f64>,
    performances: Vec<f64>,
}

impl RosterDraw {
    fn into_sheet(self, name: &str, stats: TeamMatchStats) -> TeamSheet {
        TeamSheet {
            name: name.to_string(),
            stats,
            pool: ScorerPool::new(self.scorers, &self.scorer_base),
            performances: self.performances,
        }
    }
}

fn sample_roster<R: RandomSource + ?Sized>(roster: &Roster, source: &mut R) -> RosterDraw {
    let mut draw = RosterDraw {
        offense: 0.0,
        defense: 0.0,
        starting_keeper: 0.0,
        backup_keeper: 0.0,
        scorers: Vec::new(),
        scorer_base: Vec::new(),
        performances: Vec::with_capacity(roster.player_count()),
    };
    sample_lineup(&roster.starters, Unit::Starters, source, &mut draw);
    sample_lineup(&roster.bench, Unit::Bench, source, &mut draw);
    draw.performances
        .extend(std::iter::repeat(0.0).take(roster.reserves.len()));
    draw
}

fn sample_lineup<R: RandomSource + ?Sized>(
    lineup: &Lineup,
    unit: Unit,
    source: &mut R,
    draw: &mut RosterDraw,
) {
    let minutes = unit.minutes_fraction();
    for (role, player) in lineup.players() {
        if role == Role::Goalkeeper {
            let rating = sample_rating(source, player.goalkeeping, player);
            match unit {
                Unit::Starters => draw.starting_keeper = rating,
                _ => draw.backup_keeper = rating,
            }
            draw.performances.push(0.0);
            continue;
        }

        let offense = sample_rating(source, player.offense, player);
        let defense = sample_rating(source, player.defense, player);
        let off_contribution = offense * role.offense_weight();
        let def_contribution = defense * role.defense_weight();
        draw.offense += off_contribution * minutes;
        draw.defense += def_contribution * minutes;
        draw.performances.push(off_contribution);

        if role.is_scorer() {
            let mut base = minutes;
            if unit == Unit::Starters {
                base *= STARTER_SHOOTING_LIKELIHOOD;
            }
            if role == Role::Forward {
                base *= FORWARD_SHOOTING_LIKELIHOOD;
            }
            draw.scorer_base.push(base);
            draw.scorers.push(Scorer {
                name: player.name.clone(),
                role,
                unit,
                offense,
            });
        }
    }
}

fn sample_rating<R: RandomSource + ?Sized>(source: &mut R, rating: f64, player: &Player) -> f64 {
    source.sample_normal(rating, player.variance).max(0.0)
}
