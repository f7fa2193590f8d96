//! Resolution of a single possession into a score, a turnover, or the end
//! of the half.

use serde::{Deserialize, Serialize};

use crate::aggregate::TeamMatchStats;
use crate::clock::GameClock;
use crate::config::MatchConfig;
use crate::rng::RandomSource;
use crate::tracker::{ShotOutcome, Side, StatTracker, GOAL_LINE};

/// Ball position at which shooting becomes more likely than passing.
pub const SHOT_MIDPOINT: f64 = 34.0;
pub const SHOT_STEEPNESS: f64 = 0.3;
pub const PASS_ADVANCE_MEAN: f64 = 4.0;
pub const PASS_ADVANCE_STD: f64 = 1.5;
/// Ball position for a restart after a goal or at the start of a half
pub const RESTART_POSITION: f64 = 20.0;

/// Probability the ball carrier shoots rather than passes.
pub fn shot_probability(position: f64) -> f64 {
    1.0 / (1.0 + (-SHOT_STEEPNESS * (position - SHOT_MIDPOINT)).exp())
}

pub fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        return 0.0;
    }
    position.clamp(0.0, GOAL_LINE)
}

/// The same position seen from the other team's end.
pub fn mirror_position(position: f64) -> f64 {
    clamp_position(GOAL_LINE - position)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnoverKind {
    /// Failed pass
    Pass,
    /// Missed or saved shot that was not recovered
    Shot,
}

/// Terminal state of one possession.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PossessionResult {
    Scored {
        buzzer_beater: bool,
    },
    /// `position` is measured from the team that lost the ball.
    TurnedOver {
        position: f64,
        kind: TurnoverKind,
    },
    /// The clock ran out without a score or turnover.
    Expired {
        buzzer_beater: bool,
    },
}

impl PossessionResult {
    pub fn scored(&self) -> bool {
        matches!(self, PossessionResult::Scored { .. })
    }

    pub fn turnover_position(&self) -> Option<f64> {
        match self {
            PossessionResult::TurnedOver { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn buzzer_beater(&self) -> bool {
        matches!(
            self,
            PossessionResult::Scored {
                buzzer_beater: true
            } | PossessionResult::Expired {
                buzzer_beater: true
            }
        )
    }
}

/// Fixed inputs for one possession.
#[derive(Debug, Clone, Copy)]
pub struct PossessionContext<'a> {
    pub side: Side,
    pub offense: &'a TeamMatchStats,
    pub defense: &'a TeamMatchStats,
    pub config: &'a MatchConfig,
}

/// Plays out one possession from `*position`, leaving the final ball
/// position in `*position`.
///
/// Each iteration draws the shot-or-pass decision first, then the draws the
/// chosen branch needs, so replaying a draw sequence replays the possession.
pub fn run_possession<R: RandomSource + ?Sized>(
    ctx: PossessionContext<'_>,
    position: &mut f64,
    clock: &mut GameClock,
    tracker: &mut StatTracker,
    source: &mut R,
) -> PossessionResult {
    *position = clamp_position(*position);
    if clock.is_expired() {
        return PossessionResult::Expired {
            buzzer_beater: false,
        };
    }
    loop {
        if source.next_uniform() < shot_probability(*position) {
            clock.decrement(ctx.config.time_per_shot);
            match take_shot(ctx, *position, clock, tracker, source) {
                ShotOutcome::Scored => {
                    return PossessionResult::Scored {
                        buzzer_beater: false,
                    }
                }
                ShotOutcome::TurnedOver => {
                    let scramble = (GOAL_LINE - *position) * source.next_uniform();
                    return PossessionResult::TurnedOver {
                        position: clamp_position(*position + scramble),
                        kind: TurnoverKind::Shot,
                    };
                }
                ShotOutcome::Recovered => {
                    if clock.is_expired() {
                        return PossessionResult::Expired {
                            buzzer_beater: false,
                        };
                    }
                    continue;
                }
            }
        }

        let completed = source.next_uniform() < ctx.offense.ratio;
        let advance = pass_advance(*position, source);
        if completed {
            *position = clamp_position(*position + advance);
            let tick = clock.decrement(ctx.config.time_per_pass);
            if tick.just_expired {
                tracker.record_buzzer_beater(ctx.side);
                return match take_shot(ctx, *position, clock, tracker, source) {
                    ShotOutcome::Scored => PossessionResult::Scored {
                        buzzer_beater: true,
                    },
                    _ => PossessionResult::Expired {
                        buzzer_beater: true,
                    },
                };
            }
        } else {
            let turnover = clamp_position(*position + advance * source.next_uniform());
            clock.decrement(ctx.config.time_per_pass);
            tracker.record_pass_turnover(ctx.side);
            return PossessionResult::TurnedOver {
                position: turnover,
                kind: TurnoverKind::Pass,
            };
        }
    }
}

/// Normally distributed pass length, capped so it cannot overshoot the
/// goal line.
fn pass_advance<R: RandomSource + ?Sized>(position: f64, source: &mut R) -> f64 {
    source
        .sample_normal(PASS_ADVANCE_MEAN, PASS_ADVANCE_STD)
        .min(GOAL_LINE - position)
}

fn take_shot<R: RandomSource + ?Sized>(
    ctx: PossessionContext<'_>,
    position: f64,
    clock: &GameClock,
    tracker: &mut StatTracker,
    source: &mut R,
) -> ShotOutcome {
    tracker.resolve_shot(ctx.side, position, ctx.offense, ctx.defense, clock, source)
}

/// Sets up the next possession: a goal restarts from
/// [`RESTART_POSITION`] and costs `time_after_score`; a turnover hands the
/// ball over at the mirrored position. Returns the new ball position.
pub fn reposition_after(
    result: &PossessionResult,
    ball: &mut f64,
    clock: &mut GameClock,
    config: &MatchConfig,
) -> f64 {
    match result {
        PossessionResult::Scored { .. } => {
            *ball = RESTART_POSITION;
            clock.decrement(config.time_after_score);
        }
        PossessionResult::TurnedOver { position, .. } => {
            *ball = mirror_position(*position);
        }
        PossessionResult::Expired { .. } => {}
    }
    *ball
}
