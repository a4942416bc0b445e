//! Ball integration
//!
//! Gravity pulls the ball down the fall axis; force-field discs push it
//! sideways. Laterally the ball is damped and pulled back to its drop column,
//! and it never leaves the play field.

use glam::Vec2;

use super::state::{Ball, Obstacle, PhysicsProfile};
use crate::tuning::Tuning;

/// Nominal gravity for the number of discs cleared, capped
pub fn base_gravity(depth_cleared: u32, tuning: &Tuning) -> f32 {
    (tuning.gravity_base + depth_cleared as f32 * tuning.gravity_per_layer).min(tuning.gravity_max)
}

/// Ease-in progress: 0 while fully eased, ramping linearly to 1
pub fn ease_progress(elapsed: f32, profile: &PhysicsProfile, tuning: &Tuning) -> f32 {
    if !profile.ease_in || elapsed >= tuning.ease_secs + tuning.ease_ramp_secs {
        return 1.0;
    }
    if elapsed <= tuning.ease_secs {
        return 0.0;
    }
    if tuning.ease_ramp_secs <= 0.0 {
        return 1.0;
    }
    ((elapsed - tuning.ease_secs) / tuning.ease_ramp_secs).clamp(0.0, 1.0)
}

/// Extra gap width applied at read time during the ease-in
pub fn ease_gap_bonus(elapsed: f32, profile: &PhysicsProfile, tuning: &Tuning) -> f32 {
    tuning.ease_gap_bonus * (1.0 - ease_progress(elapsed, profile, tuning))
}

/// Gravity actually applied this tick
pub fn gravity(depth_cleared: u32, elapsed: f32, profile: &PhysicsProfile, tuning: &Tuning) -> f32 {
    let t = ease_progress(elapsed, profile, tuning);
    let ease = tuning.ease_gravity_scale + (1.0 - tuning.ease_gravity_scale) * t;
    base_gravity(depth_cleared, tuning) * ease * profile.gravity_scale
}

/// Summed lateral acceleration from every force field within reach of `ball_y`
pub fn field_acceleration(ball_y: f32, obstacles: &[Obstacle], tuning: &Tuning) -> f32 {
    obstacles
        .iter()
        .filter_map(|o| {
            let force = o.field_force()?;
            let distance = (ball_y - o.depth).abs();
            (distance < tuning.field_band).then(|| force * (1.0 - distance / tuning.field_band))
        })
        .sum()
}

/// Advance the ball by `dt`. Returns the new position.
pub fn integrate(
    ball: &mut Ball,
    dt: f32,
    gravity: f32,
    lateral_accel: f32,
    tuning: &Tuning,
) -> Vec2 {
    let center = tuning.field_width / 2.0;

    ball.vel.y += gravity * dt;

    let spring = -tuning.recenter_stiffness * (ball.pos.x - center);
    ball.vel.x += (lateral_accel + spring) * dt;
    ball.vel.x *= (1.0 - tuning.lateral_damping * dt).max(0.0);

    ball.pos += ball.vel * dt;

    // Field walls
    let min_x = ball.radius;
    let max_x = tuning.field_width - ball.radius;
    if ball.pos.x < min_x || ball.pos.x > max_x {
        ball.pos.x = ball.pos.x.clamp(min_x, max_x);
        ball.vel.x = 0.0;
    }

    ball.pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arc::GapArc;
    use crate::sim::state::ObstacleKind;

    const DT: f32 = 1.0 / 60.0;

    fn field_disc(depth: f32, force: f32) -> Obstacle {
        Obstacle::new(
            0,
            depth,
            16.0,
            GapArc::new(0.5, 0.3),
            ObstacleKind::ForceField { force },
        )
    }

    #[test]
    fn test_gravity_grows_with_depth_and_caps() {
        let tuning = Tuning::default();
        assert_eq!(base_gravity(0, &tuning), tuning.gravity_base);
        assert!(base_gravity(10, &tuning) > base_gravity(5, &tuning));
        assert_eq!(base_gravity(100_000, &tuning), tuning.gravity_max);
    }

    #[test]
    fn test_ease_in_ramps_smoothly() {
        let tuning = Tuning::default();
        let profile = PhysicsProfile::endless();
        let eased = gravity(0, 0.0, &profile, &tuning);
        let mid = gravity(0, tuning.ease_secs + tuning.ease_ramp_secs / 2.0, &profile, &tuning);
        let nominal = gravity(0, 100.0, &profile, &tuning);
        assert!((eased - tuning.gravity_base * tuning.ease_gravity_scale).abs() < 1e-3);
        assert!(eased < mid && mid < nominal);
        assert!((nominal - tuning.gravity_base).abs() < 1e-3);

        assert_eq!(ease_gap_bonus(0.0, &profile, &tuning), tuning.ease_gap_bonus);
        assert_eq!(ease_gap_bonus(100.0, &profile, &tuning), 0.0);
    }

    #[test]
    fn test_tutorial_profile_skips_ease() {
        let tuning = Tuning::default();
        let profile = PhysicsProfile::tutorial(&tuning);
        assert_eq!(ease_progress(0.0, &profile, &tuning), 1.0);
        let g = gravity(0, 0.0, &profile, &tuning);
        assert!((g - tuning.gravity_base * tuning.tutorial_gravity_scale).abs() < 1e-3);
    }

    #[test]
    fn test_fields_sum_linearly_and_fade_with_distance() {
        let tuning = Tuning::default();
        let a = field_disc(100.0, 400.0);
        let b = field_disc(100.0, -100.0);
        let both = field_acceleration(100.0, &[a.clone(), b.clone()], &tuning);
        assert!((both - 300.0).abs() < 1e-3);

        let half = field_acceleration(100.0 + tuning.field_band / 2.0, &[a.clone()], &tuning);
        assert!((half - 200.0).abs() < 1e-3);

        assert_eq!(field_acceleration(100.0 + tuning.field_band, &[a], &tuning), 0.0);
    }

    #[test]
    fn test_normal_discs_exert_no_force() {
        let tuning = Tuning::default();
        let disc = Obstacle::new(0, 100.0, 16.0, GapArc::new(0.5, 0.3), ObstacleKind::Normal);
        assert_eq!(field_acceleration(100.0, &[disc], &tuning), 0.0);
    }

    #[test]
    fn test_integrate_falls_straight_without_lateral_force() {
        let tuning = Tuning::default();
        let mut ball = Ball::spawn(&tuning);
        let start_x = ball.pos.x;
        for _ in 0..30 {
            integrate(&mut ball, DT, 900.0, 0.0, &tuning);
        }
        assert_eq!(ball.pos.x, start_x);
        assert!(ball.pos.y > 0.0);
        assert!((ball.vel.y - 900.0 * DT * 30.0).abs() < 0.1);
    }

    #[test]
    fn test_integrate_clamps_to_walls() {
        let tuning = Tuning::default();
        let mut ball = Ball::spawn(&tuning);
        ball.vel.x = 50_000.0;
        integrate(&mut ball, DT, 0.0, 0.0, &tuning);
        assert_eq!(ball.pos.x, tuning.field_width - ball.radius);
        assert_eq!(ball.vel.x, 0.0);
    }

    #[test]
    fn test_lateral_drift_is_damped() {
        let tuning = Tuning::default();
        let mut ball = Ball::spawn(&tuning);
        ball.vel.x = 200.0;
        integrate(&mut ball, DT, 0.0, 0.0, &tuning);
        let first = ball.vel.x;
        assert!(first < 200.0);
        for _ in 0..240 {
            integrate(&mut ball, DT, 0.0, 0.0, &tuning);
        }
        assert!(ball.vel.x.abs() < first.abs());
        assert!((ball.pos.x - tuning.field_width / 2.0).abs() < 5.0);
    }
}
