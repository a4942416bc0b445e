//! End-to-end behavior of the simulation through its public API

use disc_drop::Tuning;
use disc_drop::sim::{
    GameEvent, GamePhase, GameState, GapArc, Obstacle, ObstacleField, ObstacleKind, Outcome,
    PhysicsProfile, TickInput, TutorialStage, World, start_run, step_world, tick,
};

const DT: f32 = 1.0 / 60.0;

fn disc(index: u32, depth: f32, gap: GapArc, kind: ObstacleKind) -> Obstacle {
    let mut o = Obstacle::new(index, depth, 16.0, gap, kind);
    o.base_points = 10;
    o
}

fn idle() -> TickInput {
    TickInput {
        idle_mode: true,
        ..Default::default()
    }
}

#[test]
fn straight_drop_through_three_gaps_builds_combo() {
    let tuning = Tuning::default();
    let field = ObstacleField::scripted(
        (0..3)
            .map(|i| disc(i, 220.0 + i as f32 * 150.0, GapArc::new(0.5, 0.3), ObstacleKind::Normal))
            .collect(),
    );
    let mut world = World::new(&tuning, field, PhysicsProfile::endless());
    let mut events = Vec::new();
    let mut outcomes = Vec::new();

    for _ in 0..600 {
        let input = TickInput::default();
        if let Some(outcome) = step_world(&mut world, &input, DT, &tuning, &mut events) {
            outcomes.push(outcome);
        }
        if world.field.is_exhausted() {
            break;
        }
    }

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| matches!(o, Outcome::Pass { .. })));
    assert_eq!(world.run.combo, 3);
    assert_eq!(world.run.depth_cleared, 3);
    // x1, x1, then the first tier (3 -> x2)
    assert_eq!(world.run.score, 10 + 10 + 20);
    assert_eq!(events.iter().filter(|e| **e == GameEvent::Pass).count(), 3);
    assert!(events.contains(&GameEvent::Combo(3)));
}

#[test]
fn closed_fatal_disc_kills_on_contact() {
    let mut state = GameState::new(9, Tuning::default()).with_tutorial_done();
    start_run(&mut state);
    let fatal = disc(0, 220.0, GapArc::closed(0.5), ObstacleKind::Fatal);
    state.world.field = ObstacleField::scripted(vec![fatal]);

    // Turning the disc does not help: it has no opening
    let input = TickInput {
        target_x: Some(0.9),
        pressed: true,
        idle_mode: false,
    };
    let mut died = false;
    for _ in 0..600 {
        tick(&mut state, &input, DT);
        let ball = &state.world.ball;
        if ball.pos.y + ball.radius >= 212.0 {
            assert!(matches!(state.phase, GamePhase::Death { .. }));
            died = true;
            break;
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }
    assert!(died);
    assert!(state.events.contains(&GameEvent::Fatal));
    assert_eq!(state.world.run.combo, 0);
}

#[test]
fn force_field_drift_grows_then_recovers() {
    let tuning = Tuning::default();
    let depth = 300.0;
    let field = ObstacleField::scripted(vec![disc(
        0,
        depth,
        GapArc::new(0.5, 0.3),
        ObstacleKind::ForceField {
            force: tuning.field_strength,
        },
    )]);
    let mut world = World::new(&tuning, field, PhysicsProfile::endless());
    let center_x = tuning.field_width / 2.0;
    let mut events = Vec::new();

    let mut last = 0.0_f32;
    let mut peak = 0.0_f32;
    let mut drifted_in_band = false;
    while world.ball.pos.y < depth + tuning.field_band {
        let y = world.ball.pos.y;
        step_world(&mut world, &TickInput::default(), DT, &tuning, &mut events);
        let offset = (world.ball.pos.x - center_x).abs();
        peak = peak.max(offset);

        if y > depth - tuning.field_band && y < depth {
            // Approaching the disc the push only gets stronger
            assert!(offset >= last, "drift shrank inside the band: {} < {}", offset, last);
            drifted_in_band |= offset > last;
        } else if y <= depth - tuning.field_band {
            assert_eq!(offset, 0.0);
        }
        last = offset;
    }
    assert!(drifted_in_band);
    assert!(world.run.depth_cleared == 1, "ball should still drop through");

    // Past the band the damping and recentering win
    for _ in 0..120 {
        step_world(&mut world, &TickInput::default(), DT, &tuning, &mut events);
    }
    let settled = (world.ball.pos.x - center_x).abs();
    assert!(settled < peak, "drift {} should fall below peak {}", settled, peak);
}

#[test]
fn opposite_fields_cancel() {
    let tuning = Tuning::default();
    let field = ObstacleField::scripted(vec![
        disc(
            0,
            200.0,
            GapArc::new(0.5, 0.3),
            ObstacleKind::ForceField { force: 500.0 },
        ),
        disc(
            1,
            201.0,
            GapArc::new(0.5, 0.3),
            ObstacleKind::ForceField { force: -500.0 },
        ),
    ]);
    let accel = disc_drop::sim::physics::field_acceleration(200.5, field.obstacles(), &tuning);
    assert!(accel.abs() < 1e-3);
}

#[test]
fn idle_mode_finishes_tutorial_and_reaches_play() {
    let mut state = GameState::new(17, Tuning::default());
    let mut steps_seen = Vec::new();

    for _ in 0..60 * 120 {
        tick(&mut state, &idle(), DT);
        if let GamePhase::Tutorial { step, .. } = state.phase {
            if steps_seen.last() != Some(&step) {
                steps_seen.push(step);
            }
        }
        if state.phase == GamePhase::Playing {
            break;
        }
    }

    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.tutorial_done);
    assert_eq!(steps_seen, vec![0, 1, 2, 3]);
    // Fresh run: nothing carried over from the tutorial
    assert!(state.world.field.is_procedural());
    assert!(state.world.run.depth_cleared <= 1);
}

#[test]
fn tutorial_success_never_flickers_back() {
    let mut state = GameState::new(4, Tuning::default());
    let mut previous = state.phase;

    for _ in 0..60 * 120 {
        tick(&mut state, &idle(), DT);
        let current = state.phase;
        if let GamePhase::Tutorial {
            step,
            stage: TutorialStage::Success { .. },
        } = previous
        {
            // From success only forward: stay, next step, or into play
            match current {
                GamePhase::Tutorial {
                    step: s,
                    stage: TutorialStage::Success { .. },
                } => assert_eq!(s, step),
                GamePhase::Tutorial {
                    step: s,
                    stage: TutorialStage::Live,
                } => assert_eq!(s, step + 1),
                GamePhase::Playing => {}
                other => panic!("unexpected phase after success: {:?}", other),
            }
        }
        if current == GamePhase::Playing {
            return;
        }
        previous = current;
    }
    panic!("tutorial did not finish");
}

#[test]
fn endless_idle_run_scores_monotonically() {
    let mut state = GameState::new(2024, Tuning::default()).with_tutorial_done();
    let mut last_score = 0;

    for _ in 0..60 * 60 {
        tick(&mut state, &idle(), DT);
        if state.phase != GamePhase::Playing {
            break;
        }
        let run = &state.world.run;
        assert!(run.score >= last_score);
        assert!(run.speed_multiplier >= 1.0 && run.speed_multiplier <= state.tuning.speed_cap);
        for event in state.drain_events() {
            if event == GameEvent::Bounce {
                assert_eq!(state.world.run.combo, 0);
            }
        }
        last_score = state.world.run.score;
    }

    assert!(last_score > 0);
    // The camera window keeps the field bounded however long the run is
    assert!(state.world.field.obstacles().len() < 40);
}

#[test]
fn same_seed_same_run() {
    let play = |seed| {
        let mut state = GameState::new(seed, Tuning::default()).with_tutorial_done();
        for _ in 0..60 * 20 {
            tick(&mut state, &idle(), DT);
        }
        (state.world.run.clone(), state.world.ball.pos)
    };
    assert_eq!(play(77), play(77));
}
