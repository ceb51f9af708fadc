//! Property tests over arbitrary input sequences

use glam::Vec3;
use proptest::prelude::*;
use tomato_shooter::sim::{GameState, TickInput, next_interval, tick};
use tomato_shooter::{RecordingDisplay, Tuning};

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, up, down, fire)| TickInput {
            left,
            right,
            up,
            down,
            fire,
        },
    )
}

proptest! {
    #[test]
    fn player_stays_in_bounds(inputs in prop::collection::vec(input_strategy(), 1..400)) {
        let mut display = RecordingDisplay::new();
        let mut state = GameState::new(3, Tuning::default(), &mut display);
        for input in &inputs {
            tick(&mut state, input, &mut display);
            let pos = state.player.pos;
            prop_assert!((-5.0..=5.0).contains(&pos.x));
            prop_assert!((0.0..=5.0).contains(&pos.y));
        }
    }

    #[test]
    fn life_never_increases_or_underflows(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
        drops in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0), 0..40),
    ) {
        let mut display = RecordingDisplay::new();
        let mut state = GameState::new(seed, Tuning::default(), &mut display);
        let mut last_life = state.life;
        let mut drops = drops.into_iter();

        for (frame, input) in inputs.iter().enumerate() {
            // Every few frames drop an adversary right on top of the player
            if frame % 7 == 0 {
                if let Some((dx, dy)) = drops.next() {
                    let pos = state.player.pos + Vec3::new(dx - 0.5, dy - 0.5, 0.0);
                    state.add_adversary(pos, Vec3::ZERO, &mut display);
                }
            }
            state.advance_clock(frame as f64 * 50.0, &mut display);
            tick(&mut state, input, &mut display);

            prop_assert!(state.life <= last_life);
            prop_assert!(state.life <= 3);
            prop_assert_eq!(state.is_game_over(), state.life == 0);
            last_life = state.life;
        }
    }

    #[test]
    fn escalation_is_monotonic_and_floored(start in 200u32..100_000, steps in 1usize..40) {
        let mut interval = start;
        for _ in 0..steps {
            let next = next_interval(interval, 200);
            prop_assert!(next <= interval);
            prop_assert!(next >= 200);
            interval = next;
        }
    }
}
