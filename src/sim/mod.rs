//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (obstacles sorted by depth)
//! - No rendering, audio or platform dependencies

pub mod arc;
pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod events;
pub mod field;
pub mod generator;
pub mod physics;
pub mod schedule;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod tutorial;

pub use arc::GapArc;
pub use autopilot::autopilot_input;
pub use camera::Camera;
pub use collision::Outcome;
pub use events::GameEvent;
pub use field::ObstacleField;
pub use generator::Generator;
pub use schedule::{ScheduleToken, Scheduler, Transition};
pub use snapshot::{PhaseView, Snapshot};
pub use state::{
    Ball, GamePhase, GameState, Obstacle, ObstacleKind, PhysicsProfile, RunState, Shard,
    TutorialStage, World,
};
pub use tick::{TickInput, begin_tutorial, start_run, step_world, tick};
pub use tutorial::{STEPS as TUTORIAL_STEPS, TutorialGoal, TutorialStep};
