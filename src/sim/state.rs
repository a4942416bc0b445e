//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here. Hosts read it through
//! [`super::snapshot::Snapshot`] and never write to it directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::GapArc;
use super::camera::Camera;
use super::events::GameEvent;
use super::field::ObstacleField;
use super::schedule::{ScheduleToken, Scheduler, Transition};
use crate::highscores::RunResult;
use crate::tuning::Tuning;
use crate::{shortest_turn, wrap_unit};

/// Where a tutorial sub-step currently is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TutorialStage {
    /// Goal not yet met, player has control
    Live,
    /// Goal met, interaction frozen while the success label shows
    Success { timer: f32 },
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for the player to press
    Start,
    /// Scripted teaching steps running on the real physics
    Tutorial { step: usize, stage: TutorialStage },
    /// Endless run
    Playing,
    /// Fatal hit; non-interactive settle before results
    Death { timer: f32 },
    /// Run ended, results published
    Over,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Bounces the ball on a miss
    Normal,
    /// Bounces on a miss and pushes the ball sideways while in range.
    /// `force` is the signed peak lateral acceleration (px/s², + = right)
    ForceField { force: f32 },
    /// Missing the gap ends the run
    Fatal,
}

/// A disc the ball has to drop through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Generation order, also the sort key along the fall axis
    pub index: u32,
    /// Depth of the disc's centerline
    pub depth: f32,
    /// Vertical thickness of the disc
    pub thickness: f32,
    /// Current rotation (turns, [0, 1)); only changes while active
    pub rotation: f32,
    pub gap: GapArc,
    pub kind: ObstacleKind,
    /// Set once the ball has dropped through; never cleared
    pub resolved: bool,
    /// Points before the combo multiplier
    pub base_points: u32,
}

impl Obstacle {
    pub fn new(index: u32, depth: f32, thickness: f32, gap: GapArc, kind: ObstacleKind) -> Self {
        Self {
            index,
            depth,
            thickness,
            rotation: 0.0,
            gap,
            kind,
            resolved: false,
            base_points: 0,
        }
    }

    /// Upper surface (smaller depth)
    #[inline]
    pub fn top(&self) -> f32 {
        self.depth - self.thickness / 2.0
    }

    /// Lower surface
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.depth + self.thickness / 2.0
    }

    /// Signed lateral force at full strength, if this is a force field
    #[inline]
    pub fn field_force(&self) -> Option<f32> {
        match self.kind {
            ObstacleKind::ForceField { force } => Some(force),
            _ => None,
        }
    }

    /// Turn toward a target rotation along the short way round, at most `max_speed` turns/s
    pub fn rotate_toward(&mut self, target: f32, dt: f32, max_speed: f32) {
        let delta = shortest_turn(self.rotation, target);
        let max_delta = max_speed * dt;
        self.rotation = wrap_unit(self.rotation + delta.clamp(-max_delta, max_delta));
    }
}

/// The falling ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// x across the field, y = depth (grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Visual heat from the current combo (0-1), not read by physics
    #[serde(skip)]
    pub glow: f32,
}

impl Ball {
    /// Ball at the spawn point of the given tuning
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.spawn_y),
            vel: Vec2::new(0.0, tuning.spawn_vy),
            radius: tuning.ball_radius,
            glow: 0.0,
        }
    }

    /// Horizontal position as a fraction of the field width
    #[inline]
    pub fn normalized_x(&self, field_width: f32) -> f32 {
        wrap_unit(self.pos.x / field_width)
    }
}

/// Score and progression for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// Consecutive passes since the last bounce/fatal/reset
    pub combo: u32,
    pub max_combo: u32,
    /// Obstacles resolved this run
    pub depth_cleared: u32,
    /// Presentation speed factor, always within [1, cap]
    pub speed_multiplier: f32,
    pub level: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            depth_cleared: 0,
            speed_multiplier: 1.0,
            level: 0,
        }
    }
}

impl RunState {
    pub fn result(&self) -> RunResult {
        RunResult {
            score: self.score,
            max_combo: self.max_combo,
            depth_cleared: self.depth_cleared,
        }
    }
}

/// How the shared physics is configured for the current phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsProfile {
    /// Multiplies effective gravity (tutorial runs slower)
    pub gravity_scale: f32,
    /// Whether the early-game ease-in applies
    pub ease_in: bool,
}

impl PhysicsProfile {
    pub fn endless() -> Self {
        Self {
            gravity_scale: 1.0,
            ease_in: true,
        }
    }

    pub fn tutorial(tuning: &Tuning) -> Self {
        Self {
            gravity_scale: tuning.tutorial_gravity_scale,
            ease_in: false,
        }
    }
}

/// Everything the physics/collision step operates on.
/// Tutorial steps and endless play both run through this one type.
#[derive(Debug, Clone)]
pub struct World {
    pub ball: Ball,
    pub field: ObstacleField,
    pub camera: Camera,
    pub run: RunState,
    pub profile: PhysicsProfile,
    /// Seconds since this world was set up
    pub elapsed: f32,
}

impl World {
    pub fn new(tuning: &Tuning, field: ObstacleField, profile: PhysicsProfile) -> Self {
        let ball = Ball::spawn(tuning);
        let camera = Camera::new(ball.pos.y - tuning.view_above);
        Self {
            ball,
            field,
            camera,
            run: RunState::default(),
            profile,
            elapsed: 0.0,
        }
    }
}

/// A decorative fragment from a fatal hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 -> 0 over the death phase
    pub life: f32,
    pub size: f32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed; each new endless run derives its generator seed from it
    pub seed: u64,
    pub phase: GamePhase,
    pub world: World,
    /// Bumped whenever a run (or tutorial) is reset; guards deferred transitions
    pub run_generation: u32,
    /// Number of endless runs started
    pub runs_started: u32,
    pub tutorial_done: bool,
    /// Seconds since the game was created (all phases)
    pub clock_secs: f64,
    pub scheduler: Scheduler,
    /// Decorative shatter burst, only animated during `Death`
    pub shards: Vec<Shard>,
    /// Pressed state from the previous tick (for press edges)
    pub was_pressed: bool,
    /// Events raised this tick, drained by the driver
    pub events: Vec<GameEvent>,
    /// Set once at the `Over` transition, taken by the driver
    pub pending_result: Option<RunResult>,
}

impl GameState {
    /// Create a new game state with the given seed and balance
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let field = ObstacleField::scripted(Vec::new());
        let world = World::new(&tuning, field, PhysicsProfile::endless());
        Self {
            tuning,
            seed,
            phase: GamePhase::Start,
            world,
            run_generation: 0,
            runs_started: 0,
            tutorial_done: false,
            clock_secs: 0.0,
            scheduler: Scheduler::default(),
            shards: Vec::new(),
            was_pressed: false,
            events: Vec::new(),
            pending_result: None,
        }
    }

    /// Skip the tutorial on the next start
    pub fn with_tutorial_done(mut self) -> Self {
        self.tutorial_done = true;
        self
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take the run result if the run just ended
    pub fn take_result(&mut self) -> Option<RunResult> {
        self.pending_result.take()
    }

    /// Currently active obstacle (nearest unresolved), if any
    pub fn active_obstacle(&self) -> Option<&Obstacle> {
        self.world.field.active()
    }

    /// Request a transition `delay` seconds from now. It is applied inside a
    /// later tick, and silently dropped if the run is reset before then.
    pub fn schedule(&mut self, delay: f32, transition: Transition) -> ScheduleToken {
        let due = self.clock_secs + f64::from(delay.max(0.0));
        self.scheduler.schedule(due, self.run_generation, transition)
    }
}
