//! Tutorial steps
//!
//! Each step rebuilds a small scripted field and a fresh ball, then runs on
//! exactly the same physics/collision path as endless play (only the
//! [`PhysicsProfile`] differs). A step is complete once its goal is met.

use super::arc::GapArc;
use super::field::ObstacleField;
use super::scoring::combo_multiplier;
use super::state::{Obstacle, ObstacleKind, PhysicsProfile, RunState, World};
use crate::tuning::Tuning;

/// How a step lays out its discs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialSetup {
    /// Wide gaps straight under the ball
    StraightDrop,
    /// Gaps off to the side: the player has to turn each disc
    TurnToAlign,
    /// Centered gaps on force-field discs
    MagnetDrift,
    /// A longer run of narrower gaps to chain into a multiplier
    ComboChain,
}

/// What finishes a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialGoal {
    DepthCleared(u32),
    /// Combo multiplier at or above this value
    Multiplier(u32),
}

impl TutorialGoal {
    pub fn is_met(&self, run: &RunState, tuning: &Tuning) -> bool {
        match *self {
            TutorialGoal::DepthCleared(n) => run.depth_cleared >= n,
            TutorialGoal::Multiplier(m) => combo_multiplier(run.combo, tuning) >= m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorialStep {
    pub instruction: &'static str,
    pub success: &'static str,
    pub setup: TutorialSetup,
    pub goal: TutorialGoal,
}

pub static STEPS: [TutorialStep; 4] = [
    TutorialStep {
        instruction: "Let the ball drop through the gaps",
        success: "Nice drop!",
        setup: TutorialSetup::StraightDrop,
        goal: TutorialGoal::DepthCleared(3),
    },
    TutorialStep {
        instruction: "Drag to turn the disc under the ball",
        success: "Lined up!",
        setup: TutorialSetup::TurnToAlign,
        goal: TutorialGoal::DepthCleared(3),
    },
    TutorialStep {
        instruction: "Magnetic discs push the ball sideways",
        success: "Steady hands!",
        setup: TutorialSetup::MagnetDrift,
        goal: TutorialGoal::DepthCleared(3),
    },
    TutorialStep {
        instruction: "Chain drops without bouncing for a multiplier",
        success: "Combo!",
        setup: TutorialSetup::ComboChain,
        goal: TutorialGoal::Multiplier(2),
    },
];

impl TutorialStep {
    /// Fresh world for this step: scripted discs, ball at spawn, run state cleared
    pub fn setup(&self, tuning: &Tuning) -> World {
        let discs = match self.setup {
            TutorialSetup::StraightDrop => {
                layout(tuning, &[(0.5, 0.4); 3], |_| ObstacleKind::Normal)
            }
            TutorialSetup::TurnToAlign => layout(
                tuning,
                &[(0.15, 0.35), (0.8, 0.35), (0.3, 0.35)],
                |_| ObstacleKind::Normal,
            ),
            TutorialSetup::MagnetDrift => layout(tuning, &[(0.5, 0.35); 3], |i| {
                let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
                ObstacleKind::ForceField {
                    force: tuning.field_strength * 0.5 * direction,
                }
            }),
            TutorialSetup::ComboChain => layout(
                tuning,
                &[(0.5, 0.3), (0.35, 0.3), (0.65, 0.3), (0.5, 0.3), (0.2, 0.3)],
                |_| ObstacleKind::Normal,
            ),
        };
        World::new(tuning, ObstacleField::scripted(discs), PhysicsProfile::tutorial(tuning))
    }
}

/// Discs at the regular spacing with the given (center, size) gaps
fn layout(
    tuning: &Tuning,
    gaps: &[(f32, f32)],
    kind: impl Fn(usize) -> ObstacleKind,
) -> Vec<Obstacle> {
    gaps.iter()
        .enumerate()
        .map(|(i, &(center, size))| {
            let depth = tuning.first_layer_depth + i as f32 * tuning.layer_spacing;
            let mut disc = Obstacle::new(
                i as u32,
                depth,
                tuning.layer_thickness,
                GapArc::new(center, size),
                kind(i),
            );
            disc.base_points = tuning.base_points;
            disc
        })
        .collect()
}
