//! Camera window along the fall axis
//!
//! The camera only ever slides downward. Its window decides how far ahead the
//! field is generated and what falls far enough behind to be pruned.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Depth at the top edge of the view
    pub top: f32,
}

impl Camera {
    pub fn new(top: f32) -> Self {
        Self { top }
    }

    /// Slide down to keep the ball `view_above` below the top edge.
    /// Returns true if the window moved.
    pub fn follow(&mut self, ball_y: f32, tuning: &Tuning) -> bool {
        let target = ball_y - tuning.view_above;
        if target > self.top {
            self.top = target;
            true
        } else {
            false
        }
    }

    /// Depth at the bottom edge of the view
    #[inline]
    pub fn bottom(&self, tuning: &Tuning) -> f32 {
        self.top + tuning.view_height
    }

    /// Generate obstacles up to this depth
    #[inline]
    pub fn generation_frontier(&self, tuning: &Tuning) -> f32 {
        self.bottom(tuning) + tuning.lookahead
    }

    /// Obstacles entirely above this depth can be dropped
    #[inline]
    pub fn prune_line(&self, tuning: &Tuning) -> f32 {
        self.top - tuning.prune_margin
    }

    /// Whether a depth band is (partly) visible
    #[inline]
    pub fn contains(&self, top: f32, bottom: f32, tuning: &Tuning) -> bool {
        bottom >= self.top && top <= self.bottom(tuning)
    }
}
