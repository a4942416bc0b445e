//! Collision detection and response for the falling ball
//!
//! Only the active disc (nearest unresolved) is ever tested, so at most one
//! disc is resolved per tick. The test is continuous along the fall axis: a
//! disc qualifies as soon as the ball's leading edge is at or past its upper
//! surface, however far the ball moved this tick, so a fast ball cannot skip
//! a disc.

use super::field::ObstacleField;
use super::state::{Ball, Obstacle, ObstacleKind};
use crate::consts::CONTACT_EPSILON;
use crate::tuning::Tuning;

/// What happened when the ball reached the active disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Dropped through the gap
    Pass {
        index: u32,
        base_points: u32,
        /// 1 = dead center, 0 = at the edge
        accuracy: f32,
    },
    /// Hit a closed section hard enough to bounce
    Bounce { index: u32, impact_speed: f32 },
    /// Settled onto a closed section (too slow to count as a bounce)
    Rest { index: u32 },
    /// Hit a closed section of a fatal disc
    Fatal { index: u32 },
}

/// Whether a falling ball has reached a disc's band
#[inline]
pub fn band_reached(ball: &Ball, obstacle: &Obstacle) -> bool {
    ball.vel.y > 0.0 && ball.pos.y + ball.radius >= obstacle.top()
}

/// Test the ball against the active disc and apply the response.
///
/// `gap_bonus` widens every gap at read time (early-game ease-in); the
/// stored discs are never modified by it.
pub fn resolve(
    ball: &mut Ball,
    field: &mut ObstacleField,
    gap_bonus: f32,
    tuning: &Tuning,
) -> Option<Outcome> {
    let position = field.active_position()?;
    let obstacle = &mut field.obstacles_mut()[position];

    if !band_reached(ball, obstacle) {
        return None;
    }

    let gap = obstacle.gap.widened(gap_bonus, tuning.gap_max);
    let x = ball.normalized_x(tuning.field_width);

    if gap.test_gap(x, obstacle.rotation) {
        obstacle.resolved = true;
        return Some(Outcome::Pass {
            index: obstacle.index,
            base_points: obstacle.base_points,
            accuracy: gap.accuracy(x, obstacle.rotation),
        });
    }

    if obstacle.kind == ObstacleKind::Fatal {
        return Some(Outcome::Fatal { index: obstacle.index });
    }

    Some(bounce(ball, obstacle, tuning))
}

/// Put the ball back on top of the disc and reflect its fall
fn bounce(ball: &mut Ball, obstacle: &Obstacle, tuning: &Tuning) -> Outcome {
    let impact_speed = ball.vel.y;
    ball.pos.y = obstacle.top() - ball.radius - CONTACT_EPSILON;

    let rebound = impact_speed * tuning.restitution;
    // Snap tiny rebounds to rest to avoid endless micro-bounces
    ball.vel.y = if rebound < tuning.rest_speed { 0.0 } else { -rebound };

    if impact_speed < tuning.rest_speed {
        Outcome::Rest { index: obstacle.index }
    } else {
        Outcome::Bounce {
            index: obstacle.index,
            impact_speed,
        }
    }
}
