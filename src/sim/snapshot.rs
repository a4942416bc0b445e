//! Read-only view of the game for presentation
//!
//! Renderers, UI overlays and the wasm bridge read the game through this
//! copy. Nothing in it points back into [`GameState`].

use glam::Vec2;
use serde::Serialize;

use super::arc::GapArc;
use super::physics;
use super::scoring::combo_multiplier;
use super::state::{GamePhase, GameState, ObstacleKind, Shard, TutorialStage};
use super::tutorial::STEPS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleView {
    pub index: u32,
    pub depth: f32,
    pub thickness: f32,
    pub rotation: f32,
    /// Gap as the collision test currently sees it (ease bonus applied)
    pub gap: GapArc,
    pub kind: ObstacleKind,
    pub resolved: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub glow: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum PhaseView {
    Start,
    #[serde(rename_all = "camelCase")]
    Tutorial {
        step: usize,
        steps: usize,
        instruction: &'static str,
        /// Set while the step's success label shows
        success: Option<&'static str>,
    },
    Playing,
    Death,
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timers {
    pub death_remaining: f32,
    pub dwell_remaining: f32,
    /// Seconds until fatal discs may appear (0 outside endless play)
    pub grace_remaining: f32,
    /// Seconds since the current world was set up
    pub elapsed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: PhaseView,
    pub ball: BallView,
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub combo: u32,
    pub combo_multiplier: u32,
    pub max_combo: u32,
    pub depth_cleared: u32,
    pub speed_multiplier: f32,
    pub level: u32,
    pub camera_top: f32,
    pub view_height: f32,
    pub field_width: f32,
    pub timers: Timers,
    pub shards: Vec<Shard>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;
        let world = &state.world;
        let active = world.field.active_position();
        let gap_bonus = physics::ease_gap_bonus(world.elapsed, &world.profile, tuning);

        let obstacles = world
            .field
            .obstacles()
            .iter()
            .enumerate()
            .filter(|(_, o)| world.camera.contains(o.top(), o.bottom(), tuning))
            .map(|(i, o)| ObstacleView {
                index: o.index,
                depth: o.depth,
                thickness: o.thickness,
                rotation: o.rotation,
                gap: o.gap.widened(gap_bonus, tuning.gap_max),
                kind: o.kind,
                resolved: o.resolved,
                active: active == Some(i),
            })
            .collect();

        let phase = match state.phase {
            GamePhase::Start => PhaseView::Start,
            GamePhase::Tutorial { step, stage } => {
                let current = STEPS.get(step);
                PhaseView::Tutorial {
                    step,
                    steps: STEPS.len(),
                    instruction: current.map(|s| s.instruction).unwrap_or(""),
                    success: match stage {
                        TutorialStage::Live => None,
                        TutorialStage::Success { .. } => current.map(|s| s.success),
                    },
                }
            }
            GamePhase::Playing => PhaseView::Playing,
            GamePhase::Death { .. } => PhaseView::Death,
            GamePhase::Over => PhaseView::Over,
        };

        let timers = Timers {
            death_remaining: match state.phase {
                GamePhase::Death { timer } => timer.max(0.0),
                _ => 0.0,
            },
            dwell_remaining: match state.phase {
                GamePhase::Tutorial {
                    stage: TutorialStage::Success { timer },
                    ..
                } => timer.max(0.0),
                _ => 0.0,
            },
            grace_remaining: if state.phase == GamePhase::Playing {
                (tuning.grace_secs - world.elapsed).max(0.0)
            } else {
                0.0
            },
            elapsed: world.elapsed,
        };

        let run = &world.run;
        Self {
            phase,
            ball: BallView {
                pos: world.ball.pos,
                radius: world.ball.radius,
                glow: world.ball.glow,
            },
            obstacles,
            score: run.score,
            combo: run.combo,
            combo_multiplier: combo_multiplier(run.combo, tuning),
            max_combo: run.max_combo,
            depth_cleared: run.depth_cleared,
            speed_multiplier: run.speed_multiplier,
            level: run.level,
            camera_top: world.camera.top,
            view_height: tuning.view_height,
            field_width: tuning.field_width,
            timers,
            shards: state.shards.clone(),
        }
    }
}
