//! Semantic events raised by the simulation
//!
//! The core never touches audio or rendering; it only records what happened.
//! The driver forwards these to an [`crate::EventSink`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball dropped through a gap
    Pass,
    /// Ball hit a closed part of a disc and bounced
    Bounce,
    /// Ball hit a fatal disc
    Fatal,
    /// Combo crossed a multiplier tier (value = combo count)
    Combo(u32),
    /// Progression level reached
    LevelUp(u32),
}
