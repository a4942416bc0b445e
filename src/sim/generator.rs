//! Procedural disc generator
//!
//! Produces an endless, seeded sequence of discs. Difficulty is keyed to the
//! disc index: gaps shrink toward a floor, force fields and fatal discs
//! unlock past fixed indices. Fatal discs are never rolled while the run is
//! still inside its grace window.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arc::GapArc;
use super::state::{Obstacle, ObstacleKind};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Generator {
    rng: Pcg32,
    next_index: u32,
    /// Depth of the most recently generated disc
    frontier: f32,
}

impl Generator {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_index: 0,
            frontier: tuning.first_layer_depth - tuning.layer_spacing,
        }
    }

    /// Depth the next disc will be placed at
    #[inline]
    pub fn next_depth(&self, tuning: &Tuning) -> f32 {
        self.frontier + tuning.layer_spacing
    }

    /// Nominal gap width for a disc index, never below the floor
    pub fn gap_size_for(index: u32, tuning: &Tuning) -> f32 {
        (tuning.gap_start - index as f32 * tuning.gap_shrink_per_layer)
            .max(tuning.gap_min)
            .min(tuning.gap_max)
    }

    /// Roll the next disc. `elapsed` is the run time, used for the grace window.
    pub fn next_obstacle(&mut self, elapsed: f32, tuning: &Tuning) -> Obstacle {
        let index = self.next_index;
        let depth = self.next_depth(tuning);

        // Always draw the same values so the grace window does not shift later rolls
        let center: f32 = self.rng.random();
        let fatal_roll: f32 = self.rng.random();
        let field_roll: f32 = self.rng.random();
        let push_right = self.rng.random_bool(0.5);

        let in_grace = elapsed < tuning.grace_secs;
        let fatal =
            index >= tuning.fatal_min_index && !in_grace && fatal_roll < tuning.fatal_chance;
        let kind = if fatal {
            ObstacleKind::Fatal
        } else if index >= tuning.field_min_index && field_roll < tuning.field_chance {
            let direction = if push_right { 1.0 } else { -1.0 };
            ObstacleKind::ForceField {
                force: tuning.field_strength * direction,
            }
        } else {
            ObstacleKind::Normal
        };

        let base_points = tuning.base_points
            + match kind {
                ObstacleKind::Normal => 0,
                ObstacleKind::ForceField { .. } => tuning.field_bonus_points,
                ObstacleKind::Fatal => tuning.fatal_bonus_points,
            };

        let gap = GapArc::new(center, Self::gap_size_for(index, tuning));
        let mut obstacle = Obstacle::new(index, depth, tuning.layer_thickness, gap, kind);
        obstacle.base_points = base_points;

        if kind != ObstacleKind::Normal {
            log::debug!("Disc {} at depth {:.0}: {:?}", index, depth, kind);
        }

        self.next_index += 1;
        self.frontier = depth;
        obstacle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roll(seed: u64, count: usize, elapsed: f32, tuning: &Tuning) -> Vec<Obstacle> {
        let mut generator = Generator::new(seed, tuning);
        (0..count).map(|_| generator.next_obstacle(elapsed, tuning)).collect()
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let a = roll(42, 50, 100.0, &tuning);
        let b = roll(42, 50, 100.0, &tuning);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.gap, y.gap);
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.depth, y.depth);
        }
    }

    #[test]
    fn test_depth_strictly_increases_with_index() {
        let tuning = Tuning::default();
        let discs = roll(7, 100, 100.0, &tuning);
        assert_eq!(discs[0].depth, tuning.first_layer_depth);
        for pair in discs.windows(2) {
            assert_eq!(pair[1].index, pair[0].index + 1);
            assert!(pair[1].depth > pair[0].depth);
        }
    }

    #[test]
    fn test_gap_shrinks_to_floor() {
        let tuning = Tuning::default();
        assert_eq!(Generator::gap_size_for(0, &tuning), tuning.gap_start);
        assert!(Generator::gap_size_for(10, &tuning) < tuning.gap_start);
        assert_eq!(Generator::gap_size_for(10_000, &tuning), tuning.gap_min);
    }

    #[test]
    fn test_special_kinds_respect_min_index() {
        let tuning = Tuning::default();
        let discs = roll(3, 400, 100.0, &tuning);
        for disc in &discs {
            match disc.kind {
                ObstacleKind::Fatal => assert!(disc.index >= tuning.fatal_min_index),
                ObstacleKind::ForceField { force } => {
                    assert!(disc.index >= tuning.field_min_index);
                    assert_eq!(force.abs(), tuning.field_strength);
                }
                ObstacleKind::Normal => {}
            }
        }
        assert!(discs.iter().any(|d| d.kind == ObstacleKind::Fatal));
        assert!(discs.iter().any(|d| d.field_force().is_some()));
    }

    #[test]
    fn test_no_fatal_during_grace() {
        let tuning = Tuning::default();
        let discs = roll(3, 400, tuning.grace_secs * 0.5, &tuning);
        assert!(discs.iter().all(|d| d.kind != ObstacleKind::Fatal));
    }

    #[test]
    fn test_grace_does_not_shift_gaps() {
        let tuning = Tuning::default();
        let in_grace = roll(11, 60, 0.0, &tuning);
        let after = roll(11, 60, 100.0, &tuning);
        for (a, b) in in_grace.iter().zip(&after) {
            assert_eq!(a.gap, b.gap);
        }
    }

    #[test]
    fn test_some_gaps_straddle_the_seam() {
        let tuning = Tuning::default();
        let discs = roll(5, 200, 100.0, &tuning);
        let straddling = discs
            .iter()
            .filter(|d| {
                let (left, right) = d.gap.edges(0.0);
                left >= right
            })
            .count();
        assert!(straddling > 0);
    }

    proptest! {
        #[test]
        fn prop_gap_never_below_floor(seed in any::<u64>(), elapsed in 0.0f32..60.0) {
            let tuning = Tuning::default();
            for disc in roll(seed, 120, elapsed, &tuning) {
                prop_assert!(disc.gap.size >= tuning.gap_min);
                prop_assert!(disc.gap.size < 1.0);
                prop_assert!(disc.base_points >= tuning.base_points);
            }
        }
    }
}
