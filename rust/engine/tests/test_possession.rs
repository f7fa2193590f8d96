use handball_engine::aggregate::{Scorer, ScorerPool, TeamMatchStats};
use handball_engine::clock::GameClock;
use handball_engine::config::MatchConfig;
use handball_engine::possession::{
    clamp_position, mirror_position, reposition_after, run_possession, shot_probability,
    PossessionContext, PossessionResult, TurnoverKind,
};
use handball_engine::rng::{ProbabilityStack, RandomSource, ScriptedSource};
use handball_engine::roster::{Role, Unit};
use handball_engine::tracker::{Side, StatTracker};
use proptest::prelude::*;

fn stats(offense: f64, defense: f64, ratio: f64) -> TeamMatchStats {
    TeamMatchStats {
        offense,
        defense,
        ratio,
        goalkeeper: 0.5,
        reserve_goalkeeper: 0.5,
    }
}

fn pool() -> ScorerPool {
    ScorerPool::new(
        vec![Scorer {
            name: "Shooter".into(),
            role: Role::Forward,
            unit: Unit::Starters,
            offense: 5.0,
        }],
        &[1.0],
    )
}

fn tracker() -> StatTracker {
    StatTracker::new("Home", pool(), "Away", pool())
}

struct Fixture {
    offense: TeamMatchStats,
    defense: TeamMatchStats,
    config: MatchConfig,
    tracker: StatTracker,
}

impl Fixture {
    fn new() -> Self {
        Self {
            offense: stats(30.0, 30.0, 0.5),
            defense: stats(30.0, 30.0, 0.5),
            config: MatchConfig::default(),
            tracker: tracker(),
        }
    }

    fn run<R: RandomSource>(
        &mut self,
        position: &mut f64,
        clock: &mut GameClock,
        source: &mut R,
    ) -> PossessionResult {
        let ctx = PossessionContext {
            side: Side::Home,
            offense: &self.offense,
            defense: &self.defense,
            config: &self.config,
        };
        run_possession(ctx, position, clock, &mut self.tracker, source)
    }
}

#[test]
fn shot_at_the_goal_line_scores_and_logs() {
    let mut fx = Fixture::new();
    let mut position = 40.0;
    let mut clock = GameClock::new(100);
    // shoot, pick scorer, on target, goal
    let mut source = ScriptedSource::new([0.0, 0.0, 0.0, 0.0]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert_eq!(
        result,
        PossessionResult::Scored {
            buzzer_beater: false
        }
    );
    assert_eq!(clock.remaining(), 95);
    assert_eq!(source.uniforms_drawn(), 4);
    let tally = fx.tracker.tally(Side::Home);
    assert_eq!((tally.shot_attempts, tally.goals), (1, 1));
    assert_eq!(fx.tracker.lines(Side::Home)[0].goals, 1);
    assert_eq!(
        fx.tracker.play_by_play(),
        &["[H1 01:35] Home GOAL - Shooter".to_string()]
    );
}

#[test]
fn pass_that_expires_the_clock_triggers_a_buzzer_beater() {
    let mut fx = Fixture::new();
    fx.config.time_per_pass = 5;
    let mut position = 20.0;
    let mut clock = GameClock::new(5);
    // pass, completed, then the buzzer shot: scorer, on target, goal
    let mut source = ScriptedSource::new([0.9, 0.0, 0.0, 0.0, 0.0]).with_normals([4.0]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert!(clock.is_expired());
    assert_eq!(
        result,
        PossessionResult::Scored {
            buzzer_beater: true
        }
    );
    assert_eq!(position, 24.0);
    let tally = fx.tracker.tally(Side::Home);
    assert_eq!(tally.buzzer_beaters, 1);
    assert_eq!(tally.shot_attempts, 1);
    assert_eq!(tally.goals, 1);
    assert_eq!(
        fx.tracker.play_by_play(),
        &["[H1 00:00] Home GOAL - Shooter".to_string()]
    );
}

#[test]
fn missed_buzzer_beater_ends_the_half() {
    let mut fx = Fixture::new();
    let mut position = 20.0;
    let mut clock = GameClock::new(2);
    // pass, completed, scorer, off target, no recovery
    let mut source = ScriptedSource::new([0.9, 0.0, 0.0, 0.99, 0.5]).with_normals([4.0]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert_eq!(
        result,
        PossessionResult::Expired {
            buzzer_beater: true
        }
    );
    assert!(result.buzzer_beater());
    assert_eq!(result.turnover_position(), None);
    assert_eq!(source.uniforms_drawn(), 5);
    assert_eq!(fx.tracker.tally(Side::Home).goals, 0);
}

#[test]
fn failed_pass_is_a_turnover_never_a_buzzer_beater() {
    let mut fx = Fixture::new();
    let mut position = 20.0;
    let mut clock = GameClock::new(2);
    // pass, failed, turnover spot halfway along the attempted advance
    let mut source = ScriptedSource::new([0.9, 0.99, 0.5]).with_normals([4.0]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert_eq!(
        result,
        PossessionResult::TurnedOver {
            position: 22.0,
            kind: TurnoverKind::Pass
        }
    );
    assert!(clock.is_expired());
    let tally = fx.tracker.tally(Side::Home);
    assert_eq!(tally.pass_turnovers, 1);
    assert_eq!(tally.buzzer_beaters, 0);
    assert_eq!(tally.shot_attempts, 0);
}

#[test]
fn missed_shot_without_recovery_scrambles_toward_goal() {
    let mut fx = Fixture::new();
    let mut position = 30.0;
    let mut clock = GameClock::new(100);
    // shoot, scorer, off target, no recovery, scramble halfway to the line
    let mut source = ScriptedSource::new([0.0, 0.0, 0.99, 0.5, 0.5]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert_eq!(
        result,
        PossessionResult::TurnedOver {
            position: 35.0,
            kind: TurnoverKind::Shot
        }
    );
    assert_eq!(clock.remaining(), 95);
    let tally = fx.tracker.tally(Side::Home);
    assert_eq!(tally.shot_turnovers, 1);
    assert_eq!(tally.off_target_turnovers, 1);
    assert_eq!(tally.offensive_recoveries, 0);
}

#[test]
fn saved_shot_turnover_is_not_off_target() {
    let mut fx = Fixture::new();
    let mut position = 30.0;
    let mut clock = GameClock::new(100);
    // shoot, scorer, on target, saved, no recovery, scramble stays put
    let mut source = ScriptedSource::new([0.0, 0.0, 0.0, 0.99, 0.5, 0.0]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert_eq!(result.turnover_position(), Some(30.0));
    let tally = fx.tracker.tally(Side::Home);
    assert_eq!(tally.shot_turnovers, 1);
    assert_eq!(tally.off_target_turnovers, 0);
    assert_eq!(tally.goals, 0);
}

#[test]
fn offensive_recovery_keeps_the_ball() {
    let mut fx = Fixture::new();
    let mut position = 30.0;
    let mut clock = GameClock::new(100);
    let mut source = ScriptedSource::new([
        0.0, 0.0, 0.99, 0.05, // missed, recovered
        0.0, 0.0, 0.99, 0.5, 0.0, // missed again, lost at the shot spot
    ]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert_eq!(result.turnover_position(), Some(30.0));
    assert_eq!(clock.remaining(), 90);
    let tally = fx.tracker.tally(Side::Home);
    assert_eq!(tally.shot_attempts, 2);
    assert_eq!(tally.offensive_recoveries, 1);
    assert_eq!(tally.off_target_turnovers, 1);
    assert_eq!(tally.shot_turnovers, 1);
    assert_eq!(fx.tracker.lines(Side::Home)[0].shots, 2);
}

#[test]
fn recovery_at_zero_ends_the_possession() {
    let mut fx = Fixture::new();
    let mut position = 30.0;
    let mut clock = GameClock::new(5);
    let mut source = ScriptedSource::new([0.0, 0.0, 0.99, 0.05]);

    let result = fx.run(&mut position, &mut clock, &mut source);

    assert_eq!(
        result,
        PossessionResult::Expired {
            buzzer_beater: false
        }
    );
    assert!(clock.is_expired());
    assert_eq!(source.uniforms_drawn(), 4);
}

#[test]
fn completed_passes_advance_and_cap_at_the_goal_line() {
    let mut fx = Fixture::new();
    let mut position = 20.0;
    let mut clock = GameClock::new(100);
    let mut source = ScriptedSource::new([0.9, 0.0, 0.9, 0.0, 0.9, 0.99, 0.0])
        .with_normals([4.0, 4.0, 4.0]);
    let result = fx.run(&mut position, &mut clock, &mut source);
    assert_eq!(result.turnover_position(), Some(28.0));
    assert_eq!(clock.remaining(), 94);

    let mut fx = Fixture::new();
    let mut position = 38.0;
    let mut clock = GameClock::new(100);
    // a long pass from 38 stops at 40, then a shot from the line scores
    let mut source = ScriptedSource::new([0.9, 0.0, 0.0, 0.0, 0.0, 0.0]).with_normals([5.0]);
    let result = fx.run(&mut position, &mut clock, &mut source);
    assert!(result.scored());
    assert_eq!(position, 40.0);
}

#[test]
fn expired_clock_draws_nothing() {
    let mut fx = Fixture::new();
    let mut position = 20.0;
    let mut clock = GameClock::new(0);
    let mut source = ScriptedSource::new([]);
    let result = fx.run(&mut position, &mut clock, &mut source);
    assert_eq!(
        result,
        PossessionResult::Expired {
            buzzer_beater: false
        }
    );
    assert_eq!(source.uniforms_drawn() + source.normals_drawn(), 0);
}

#[test]
fn goal_restarts_at_twenty_and_costs_clock() {
    let config = MatchConfig::default();
    let mut ball = 40.0;
    let mut clock = GameClock::new(100);
    let scored = PossessionResult::Scored {
        buzzer_beater: false,
    };
    assert_eq!(reposition_after(&scored, &mut ball, &mut clock, &config), 20.0);
    assert_eq!(clock.remaining(), 85);

    let lost = PossessionResult::TurnedOver {
        position: 35.0,
        kind: TurnoverKind::Shot,
    };
    assert_eq!(reposition_after(&lost, &mut ball, &mut clock, &config), 5.0);
    assert_eq!(clock.remaining(), 85);
}

#[test]
fn position_helpers() {
    assert!((shot_probability(34.0) - 0.5).abs() < 1e-12);
    assert!(shot_probability(40.0) > shot_probability(20.0));
    assert_eq!(clamp_position(-3.0), 0.0);
    assert_eq!(clamp_position(41.5), 40.0);
    assert_eq!(clamp_position(f64::NAN), 0.0);
    assert_eq!(mirror_position(12.0), 28.0);
}

/// Forwards draws to an inner source and keeps a copy of each one.
struct Recording<R> {
    inner: R,
    uniforms: Vec<f64>,
    normals: Vec<f64>,
}

impl<R: RandomSource> RandomSource for Recording<R> {
    fn next_uniform(&mut self) -> f64 {
        let v = self.inner.next_uniform();
        self.uniforms.push(v);
        v
    }

    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let v = self.inner.sample_normal(mean, std_dev);
        self.normals.push(v);
        v
    }
}

proptest! {
    #[test]
    fn possessions_stay_on_the_court_and_replay(
        seed in any::<u64>(),
        start in 0.0f64..=40.0,
        ratio in 0.0f64..=1.0,
        clock_secs in 1u32..120,
    ) {
        let mut fx = Fixture::new();
        fx.offense.ratio = ratio;
        let mut position = start;
        let mut clock = GameClock::new(clock_secs);
        let mut source = Recording {
            inner: ProbabilityStack::new_with_seed(seed),
            uniforms: Vec::new(),
            normals: Vec::new(),
        };
        let result = fx.run(&mut position, &mut clock, &mut source);

        prop_assert!((0.0..=40.0).contains(&position));
        if let Some(spot) = result.turnover_position() {
            prop_assert!((0.0..=40.0).contains(&spot));
            prop_assert!(!result.scored());
        }
        prop_assert!(clock.remaining() < clock_secs);

        let mut replay_fx = Fixture::new();
        replay_fx.offense.ratio = ratio;
        let mut replay_position = start;
        let mut replay_clock = GameClock::new(clock_secs);
        let mut replay = ScriptedSource::new(source.uniforms.clone())
            .with_normals(source.normals.clone());
        let replayed = replay_fx.run(&mut replay_position, &mut replay_clock, &mut replay);

        prop_assert_eq!(result, replayed);
        prop_assert_eq!(position, replay_position);
        prop_assert_eq!(clock, replay_clock);
        prop_assert!(replay.is_exhausted());
    }
}
