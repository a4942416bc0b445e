//! Disc Drop - a falling-ball arcade core
//!
//! Core modules:
//! - `sim`: Simulation (physics, gap collisions, generation, game phases)
//! - `tuning`: Data-driven game balance
//! - `effects`: Semantic event sink for audio/visual collaborators
//! - `highscores`: Run result sink and leaderboard
//! - `driver`: Frame clock, input latch and the `Game` wrapper a host calls

pub mod driver;
pub mod effects;
pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{FrameClock, Game, InputLatch};
pub use effects::{EventSink, NullSink, RecordingSink};
pub use error::TuningError;
pub use highscores::{HighScores, ResultSink, RunResult};
pub use tuning::Tuning;

/// Engine constants that are not balance parameters
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds).
    /// Longer frames (tab suspend, hitches) are clamped to this.
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Gap left between the ball and a disc surface after a bounce
    pub const CONTACT_EPSILON: f32 = 0.01;

    /// Number of shards spawned by a fatal hit
    pub const SHATTER_SHARDS: u32 = 24;
}

/// Wrap a value into [0, 1)
#[inline]
pub fn wrap_unit(v: f32) -> f32 {
    let w = v - v.floor();
    // -tiny values round up to exactly 1.0
    if w >= 1.0 { 0.0 } else { w }
}

/// Signed shortest distance from `from` to `to` on the unit circle, in [-0.5, 0.5)
#[inline]
pub fn shortest_turn(from: f32, to: f32) -> f32 {
    let delta = wrap_unit(to - from);
    if delta >= 0.5 { delta - 1.0 } else { delta }
}
