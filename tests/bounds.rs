//! Property tests for the simulation step

use proptest::prelude::*;

use nova_strike::consts::*;
use nova_strike::sim::{GameState, TickInput, tick};

fn arb_input() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(left, right, up, down, fire)| TickInput {
            left,
            right,
            up,
            down,
            fire,
            ..Default::default()
        })
}

proptest! {
    /// No input sequence can push the player off the field, overflow the
    /// lives counter, or produce a score that isn't whole kills.
    #[test]
    fn player_stays_in_bounds(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(arb_input(), 1..400),
    ) {
        let mut state = GameState::new(seed);
        let start = TickInput { start: true, ..Default::default() };
        tick(&mut state, &start, SIM_DT);

        for input in &inputs {
            tick(&mut state, input, SIM_DT);
            prop_assert!(state.player.pos.x >= 0.0);
            prop_assert!(state.player.pos.x <= FIELD_WIDTH - PLAYER_SIZE.x);
            prop_assert!(state.player.pos.y >= 0.0);
            prop_assert!(state.player.pos.y <= FIELD_HEIGHT - PLAYER_SIZE.y);
            prop_assert!(state.lives <= START_LIVES);
            prop_assert!(state.score % KILL_SCORE == 0);
        }
    }
}
