//! Per-frame simulation tick
//!
//! One dispatch point per tick on the game phase. Tutorial steps and endless
//! play both advance through [`step_world`], so the tutorial always teaches
//! the real physics.

use glam::Vec2;

use super::autopilot::autopilot_input;
use super::collision::{self, Outcome};
use super::events::GameEvent;
use super::field::ObstacleField;
use super::physics;
use super::schedule::{ScheduleToken, Transition};
use super::scoring;
use super::state::{GamePhase, GameState, PhysicsProfile, Shard, TutorialStage, World};
use super::tutorial::STEPS;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::wrap_unit;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position across the field (0..1), if the pointer is known
    pub target_x: Option<f32>,
    /// Pointer/touch held
    pub pressed: bool,
    /// Idle/demo mode - the autopilot plays instead
    pub idle_mode: bool,
}

/// Advance the game by one frame. `dt` is clamped to [`MAX_FRAME_DT`].
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

    let input = if input.idle_mode {
        autopilot_input(state)
    } else {
        *input
    };
    let press_edge = input.pressed && !state.was_pressed;
    state.was_pressed = input.pressed;

    state.clock_secs += f64::from(dt);

    // Deferred transitions only ever land here, inside the frame
    for (token, transition) in state.scheduler.take_due(state.clock_secs) {
        // An earlier transition in this batch may have reset the run
        if token.generation != state.run_generation {
            log::debug!(
                "Dropping stale {:?} (generation {} != {})",
                transition,
                token.generation,
                state.run_generation
            );
            continue;
        }
        apply_transition(state, token, transition);
    }

    match state.phase {
        GamePhase::Start => {
            if press_edge {
                if state.tutorial_done {
                    start_run(state);
                } else {
                    begin_tutorial(state);
                }
            }
        }
        GamePhase::Tutorial { step, stage } => tick_tutorial(state, &input, step, stage, dt),
        GamePhase::Playing => {
            let outcome =
                step_world(&mut state.world, &input, dt, &state.tuning, &mut state.events);
            if let Some(Outcome::Fatal { index }) = outcome {
                log::info!("Fatal hit on disc {}", index);
                enter_death(state);
            }
        }
        GamePhase::Death { timer } => tick_death(state, timer, dt),
        GamePhase::Over => {
            if press_edge {
                start_run(state);
            }
        }
    }
}

/// Advance one world by `dt`: input -> integrate -> resolve -> score -> camera.
///
/// This is the only physics/collision path; the phase decides what to do
/// with the returned outcome.
pub fn step_world(
    world: &mut World,
    input: &TickInput,
    dt: f32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Option<Outcome> {
    // Only the active disc turns
    if input.pressed {
        if let (Some(x), Some(active)) = (input.target_x, world.field.active_mut()) {
            active.rotate_toward(wrap_unit(x - 0.5), dt, tuning.rotate_speed);
        }
    }

    let gravity = physics::gravity(world.run.depth_cleared, world.elapsed, &world.profile, tuning);
    let lateral = physics::field_acceleration(world.ball.pos.y, world.field.obstacles(), tuning);
    physics::integrate(&mut world.ball, dt, gravity, lateral, tuning);

    let gap_bonus = physics::ease_gap_bonus(world.elapsed, &world.profile, tuning);
    let outcome = collision::resolve(&mut world.ball, &mut world.field, gap_bonus, tuning);

    match outcome {
        Some(Outcome::Pass {
            base_points,
            accuracy,
            ..
        }) => scoring::record_pass(&mut world.run, base_points, accuracy, tuning, events),
        Some(Outcome::Bounce { .. }) => {
            scoring::break_combo(&mut world.run);
            events.push(GameEvent::Bounce);
        }
        Some(Outcome::Fatal { .. }) => {
            scoring::break_combo(&mut world.run);
            events.push(GameEvent::Fatal);
        }
        Some(Outcome::Rest { .. }) | None => {}
    }

    let progressing = world.ball.vel.y > 0.0
        && !matches!(outcome, Some(Outcome::Bounce { .. } | Outcome::Rest { .. }));
    if !progressing {
        scoring::decay_speed(&mut world.run, dt, tuning);
    }

    let top_tier = tuning.combo_tiers.last().map(|t| t.threshold).unwrap_or(1).max(1);
    world.ball.glow = (world.run.combo as f32 / top_tier as f32).min(1.0);

    world.camera.follow(world.ball.pos.y, tuning);
    world.field.extend(world.camera.generation_frontier(tuning), world.elapsed, tuning);
    world.field.prune(world.camera.prune_line(tuning));

    world.elapsed += dt;
    outcome
}

fn tick_tutorial(
    state: &mut GameState,
    input: &TickInput,
    step: usize,
    stage: TutorialStage,
    dt: f32,
) {
    let Some(current) = STEPS.get(step) else {
        finish_tutorial(state);
        return;
    };

    match stage {
        TutorialStage::Live => {
            let outcome = step_world(&mut state.world, input, dt, &state.tuning, &mut state.events);

            if let Some(Outcome::Fatal { .. }) = outcome {
                log::info!("Tutorial step {} failed, retrying", step + 1);
                enter_tutorial_step(state, step);
                return;
            }

            // Latched: once met, the step stays complete
            if current.goal.is_met(&state.world.run, &state.tuning) {
                log::info!("Tutorial step {} complete: {}", step + 1, current.success);
                state.phase = GamePhase::Tutorial {
                    step,
                    stage: TutorialStage::Success {
                        timer: state.tuning.success_dwell_secs,
                    },
                };
                return;
            }

            let ran_out = state.world.field.is_exhausted()
                && state.world.field.last_depth().is_none_or(|depth| {
                    state.world.ball.pos.y > depth + state.tuning.layer_spacing
                });
            if ran_out {
                log::info!("Tutorial step {} goal missed, retrying", step + 1);
                enter_tutorial_step(state, step);
            }
        }
        TutorialStage::Success { timer } => {
            let timer = timer - dt;
            if timer > 0.0 {
                state.phase = GamePhase::Tutorial {
                    step,
                    stage: TutorialStage::Success { timer },
                };
            } else if step + 1 < STEPS.len() {
                enter_tutorial_step(state, step + 1);
            } else {
                finish_tutorial(state);
            }
        }
    }
}

fn tick_death(state: &mut GameState, timer: f32, dt: f32) {
    let fade = if state.tuning.death_secs > 0.0 {
        dt / state.tuning.death_secs
    } else {
        1.0
    };
    for shard in state.shards.iter_mut() {
        shard.pos += shard.vel * dt;
        shard.vel.y += 400.0 * dt;
        shard.vel *= 0.98;
        shard.life -= fade;
        shard.size *= 0.995;
    }
    state.shards.retain(|s| s.life > 0.0);

    let timer = timer - dt;
    if timer > 0.0 {
        state.phase = GamePhase::Death { timer };
        return;
    }

    let result = state.world.run.result();
    log::info!(
        "Game over: score {} max combo {} depth {}",
        result.score,
        result.max_combo,
        result.depth_cleared
    );
    state.shards.clear();
    state.phase = GamePhase::Over;
    state.pending_result = Some(result);
}

fn apply_transition(state: &mut GameState, token: ScheduleToken, transition: Transition) {
    log::debug!("Applying scheduled {:?}", transition);
    match transition {
        Transition::ToStart => {
            state.run_generation = state.run_generation.wrapping_add(1);
            state.shards.clear();
            state.phase = GamePhase::Start;
        }
        Transition::BeginTutorial => begin_tutorial(state),
        Transition::StartRun => start_run(state),
        Transition::Restart => match state.phase {
            GamePhase::Over => start_run(state),
            // The dying run still has to reach Over and publish its result
            GamePhase::Death { timer } => {
                let due = state.clock_secs + f64::from(timer.max(0.0));
                state.scheduler.defer(token, due, Transition::Restart);
            }
            _ => log::debug!("Ignoring Restart during {:?}", state.phase),
        },
    }
}

/// Reset everything and begin a fresh endless run
pub fn start_run(state: &mut GameState) {
    state.run_generation = state.run_generation.wrapping_add(1);
    state.runs_started += 1;

    let run_seed = state
        .seed
        .wrapping_add(u64::from(state.runs_started).wrapping_mul(2654435761));
    let field = ObstacleField::procedural(run_seed, &state.tuning);
    let mut world = World::new(&state.tuning, field, PhysicsProfile::endless());
    let frontier = world.camera.generation_frontier(&state.tuning);
    world.field.extend(frontier, 0.0, &state.tuning);

    state.world = world;
    state.shards.clear();
    state.pending_result = None;
    state.phase = GamePhase::Playing;
    log::info!("Run {} started (seed {})", state.runs_started, run_seed);
}

/// Start the tutorial from its first step
pub fn begin_tutorial(state: &mut GameState) {
    state.run_generation = state.run_generation.wrapping_add(1);
    state.shards.clear();
    enter_tutorial_step(state, 0);
}

fn enter_tutorial_step(state: &mut GameState, step: usize) {
    let Some(next) = STEPS.get(step) else {
        finish_tutorial(state);
        return;
    };
    log::info!("Tutorial step {}: {}", step + 1, next.instruction);
    state.world = next.setup(&state.tuning);
    state.phase = GamePhase::Tutorial {
        step,
        stage: TutorialStage::Live,
    };
}

fn finish_tutorial(state: &mut GameState) {
    log::info!("Tutorial finished");
    state.tutorial_done = true;
    start_run(state);
}

fn enter_death(state: &mut GameState) {
    let origin = state.world.ball.pos;
    state.shards = (0..SHATTER_SHARDS)
        .map(|i| {
            let hash = i
                .wrapping_mul(2654435761)
                .wrapping_add(state.run_generation.wrapping_mul(31337));
            let rand1 = (hash % 1000) as f32 / 1000.0;
            let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0;
            let rand3 = ((hash >> 20) % 1000) as f32 / 1000.0;

            let angle = std::f32::consts::TAU * (i as f32 / SHATTER_SHARDS as f32) + rand1 * 0.3;
            let outward = Vec2::new(angle.cos(), angle.sin());
            Shard {
                pos: origin,
                vel: outward * (120.0 + rand2 * 180.0),
                life: 1.0,
                size: 3.0 + rand3 * 4.0,
            }
        })
        .collect();

    state.phase = GamePhase::Death {
        timer: state.tuning.death_secs,
    };
}
