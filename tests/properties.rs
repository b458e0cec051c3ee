// Property tests for the invariants that must hold under any input stream.

use proptest::prelude::*;

use triage_dash::compute_score;
use triage_dash::sim::{GameState, ItemKind, Meter, Player, TickInput, tick};
use triage_dash::tuning::Tuning;

#[derive(Debug, Clone)]
enum MeterOp {
    Erode(f32),
    Pickup(f32),
    Set(f32),
}

fn meter_op() -> impl Strategy<Value = MeterOp> {
    prop_oneof![
        (0.0f32..5000.0).prop_map(MeterOp::Erode),
        (-200.0f32..200.0).prop_map(MeterOp::Pickup),
        (-500.0f32..500.0).prop_map(MeterOp::Set),
    ]
}

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| TickInput {
        left,
        right,
        jump,
    })
}

proptest! {
    #[test]
    fn score_is_linear(p in 0u32..1_000_000, a in 0u32..1_000_000) {
        prop_assert_eq!(
            compute_score(p as f64, a as f64),
            Ok(p as u64 + 2 * a as u64)
        );
    }

    #[test]
    fn score_rejects_negative_either_side(n in 1u32..1_000_000, ok in 0u32..1000) {
        prop_assert!(compute_score(-(n as f64), ok as f64).is_err());
        prop_assert!(compute_score(ok as f64, -(n as f64)).is_err());
    }

    #[test]
    fn meter_stays_in_bounds(ops in prop::collection::vec(meter_op(), 1..200)) {
        let mut meter = Meter::new(50.0);
        for op in ops {
            match op {
                MeterOp::Erode(dt) => { meter.erode(dt, 1000.0, 2.0); }
                MeterOp::Pickup(amount) => meter.add(amount),
                MeterOp::Set(value) => meter.set(value),
            }
            prop_assert!((Meter::MIN..=Meter::MAX).contains(&meter.value));
        }
    }

    #[test]
    fn player_stays_on_stage(
        inputs in prop::collection::vec((tick_input(), 0.0f32..0.5), 1..300),
        vx in -5000.0f32..5000.0,
        vy in -5000.0f32..5000.0,
        x in -1000.0f32..2000.0,
        y in -1000.0f32..2000.0,
    ) {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos = glam::Vec2::new(x, y);
        player.vel = glam::Vec2::new(vx, vy);
        player.grounded = false;

        for (input, dt) in inputs {
            player.step(&input, dt, &tuning);
            prop_assert!(player.rect().max.y <= tuning.floor_y);
            prop_assert!(player.pos.x >= 0.0);
            prop_assert!(player.rect().max.x <= tuning.stage_width + 1e-3);
        }
    }

    #[test]
    fn counters_stay_bounded_under_play(
        seed in any::<u64>(),
        inputs in prop::collection::vec(tick_input(), 1..600),
    ) {
        let mut state = GameState::new(seed);
        let mut treated = 0;
        let mut milestones = 0;
        for input in inputs {
            tick(&mut state, &input, 1.0 / 30.0);
            prop_assert!(state.strikes.count <= state.strikes.max);
            prop_assert!((Meter::MIN..=Meter::MAX).contains(&state.meter.value));
            let milestones_falling = state
                .items
                .iter()
                .filter(|i| i.kind == ItemKind::Milestone)
                .count();
            prop_assert!(milestones_falling <= 1);
            prop_assert!(state.score.treated >= treated);
            prop_assert!(state.score.milestones >= milestones);
            treated = state.score.treated;
            milestones = state.score.milestones;
        }
    }
}
