//! Idle/demo mode - the game plays itself
//!
//! Produces the input a player would: press through the start and results
//! screens, and hold the pointer so the active disc turns its gap under the
//! ball.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::wrap_unit;

/// Input for one tick of idle mode
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        // Alternate so every other tick is a fresh press
        GamePhase::Start | GamePhase::Over => TickInput {
            target_x: None,
            pressed: !state.was_pressed,
            idle_mode: true,
        },
        GamePhase::Death { .. } => TickInput {
            idle_mode: true,
            ..Default::default()
        },
        GamePhase::Tutorial { .. } | GamePhase::Playing => {
            let world = &state.world;
            let Some(active) = world.field.active() else {
                return TickInput {
                    idle_mode: true,
                    ..Default::default()
                };
            };

            let ball_x = world.ball.normalized_x(state.tuning.field_width);
            // Small drift around the center of the gap so runs don't look robotic
            let t = state.clock_secs as f32;
            let wobble = ((t * 1.3).sin() * 0.6 + (t * 0.7).sin() * 0.4) * active.gap.size * 0.15;

            // rotation r puts the gap middle at center + r
            let wanted_rotation = ball_x - active.gap.center + wobble;
            TickInput {
                target_x: Some(wrap_unit(wanted_rotation + 0.5)),
                pressed: true,
                idle_mode: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_presses_through_start() {
        let mut state = GameState::new(5, Tuning::default());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, 1.0 / 60.0);
        assert!(matches!(state.phase, GamePhase::Tutorial { step: 0, .. }));
    }

    #[test]
    fn test_targets_active_gap() {
        let mut state = GameState::new(5, Tuning::default()).with_tutorial_done();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Playing);

        let auto = autopilot_input(&state);
        assert!(auto.pressed);
        let target = auto.target_x.expect("autopilot should aim");
        let active = state.active_obstacle().expect("run has discs");
        let rotation = wrap_unit(target - 0.5);
        let ball_x = state.world.ball.normalized_x(state.tuning.field_width);
        assert!(active.gap.test_gap(ball_x, rotation));
    }
}
