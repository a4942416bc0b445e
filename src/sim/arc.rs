//! Gap arc geometry
//!
//! A disc is a full ring with one open arc. Positions around the ring are
//! measured in turns ([0, 1)), so the open arc is defined by:
//! - center: middle of the opening before any rotation
//! - size: width of the opening (0 = closed disc)
//!
//! Rotating the disc shifts the arc; an arc may wrap past 1 -> 0.

use serde::{Deserialize, Serialize};

use crate::{shortest_turn, wrap_unit};

/// The open arc of a disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapArc {
    /// Opening center, turns in [0, 1)
    pub center: f32,
    /// Opening width, turns in [0, 1)
    pub size: f32,
}

impl GapArc {
    pub fn new(center: f32, size: f32) -> Self {
        Self {
            center: wrap_unit(center),
            size: size.clamp(0.0, 1.0),
        }
    }

    /// A disc with no opening
    pub fn closed(center: f32) -> Self {
        Self::new(center, 0.0)
    }

    /// Left and right edges after rotation (each wrapped into [0, 1))
    #[inline]
    pub fn edges(&self, rotation: f32) -> (f32, f32) {
        let half = self.size / 2.0;
        (
            wrap_unit(self.center - half + rotation),
            wrap_unit(self.center + half + rotation),
        )
    }

    /// Check whether a horizontal position falls inside the opening
    pub fn test_gap(&self, normalized_x: f32, rotation: f32) -> bool {
        if self.size <= 0.0 {
            return false;
        }
        let x = wrap_unit(normalized_x);
        let (left, right) = self.edges(rotation);

        if left < right {
            // No wraparound
            x >= left && x < right
        } else {
            // Wraparound case (e.g., left=0.9, right=0.1)
            x >= left || x < right
        }
    }

    /// Middle of the opening after rotation
    #[inline]
    pub fn middle(&self, rotation: f32) -> f32 {
        wrap_unit(self.center + rotation)
    }

    /// How well centered a position is in the opening (1 = dead center, 0 = at/over an edge)
    pub fn accuracy(&self, normalized_x: f32, rotation: f32) -> f32 {
        if self.size <= 0.0 {
            return 0.0;
        }
        let off = shortest_turn(self.middle(rotation), normalized_x).abs();
        (1.0 - off / (self.size / 2.0)).clamp(0.0, 1.0)
    }

    /// The same opening widened by `bonus`, capped at `max` (read-time difficulty easing)
    pub fn widened(&self, bonus: f32, max: f32) -> Self {
        if self.size <= 0.0 {
            return *self;
        }
        Self {
            center: self.center,
            size: (self.size + bonus.max(0.0)).min(max.max(self.size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gap_no_wrap() {
        let gap = GapArc::new(0.5, 0.3);
        assert!(gap.test_gap(0.5, 0.0));
        assert!(gap.test_gap(0.36, 0.0));
        assert!(!gap.test_gap(0.66, 0.0));
        assert!(!gap.test_gap(0.1, 0.0));
    }

    #[test]
    fn test_gap_wraparound() {
        // Opening from 0.9 to 0.1 straddles the seam
        let gap = GapArc::new(0.0, 0.2);
        assert!(gap.test_gap(0.95, 0.0));
        assert!(gap.test_gap(0.0, 0.0));
        assert!(gap.test_gap(0.05, 0.0));
        assert!(!gap.test_gap(0.5, 0.0));
        assert!(!gap.test_gap(0.15, 0.0));
    }

    #[test]
    fn test_gap_rotation_moves_opening() {
        let gap = GapArc::new(0.2, 0.1);
        assert!(!gap.test_gap(0.5, 0.0));
        assert!(gap.test_gap(0.5, 0.3));
        // Rotating past the seam
        assert!(gap.test_gap(0.0, 0.8));
    }

    #[test]
    fn test_closed_disc_never_open() {
        let gap = GapArc::closed(0.5);
        for i in 0..100 {
            assert!(!gap.test_gap(i as f32 / 100.0, 0.0));
        }
    }

    #[test]
    fn test_accuracy() {
        let gap = GapArc::new(0.5, 0.2);
        assert!((gap.accuracy(0.5, 0.0) - 1.0).abs() < 1e-5);
        assert!((gap.accuracy(0.55, 0.0) - 0.5).abs() < 1e-4);
        assert_eq!(gap.accuracy(0.7, 0.0), 0.0);
    }

    #[test]
    fn test_widened_is_capped() {
        let gap = GapArc::new(0.5, 0.3);
        assert!((gap.widened(0.1, 0.9).size - 0.4).abs() < 1e-6);
        assert!((gap.widened(0.8, 0.9).size - 0.9).abs() < 1e-6);
        assert_eq!(GapArc::closed(0.5).widened(0.1, 0.9).size, 0.0);
    }

    proptest! {
        #[test]
        fn prop_open_measure_matches_size(
            center in 0.0f32..1.0,
            size in 0.01f32..0.99,
            rotation in -2.0f32..2.0,
        ) {
            let gap = GapArc::new(center, size);
            let samples = 2000;
            let open = (0..samples)
                .filter(|i| gap.test_gap((*i as f32 + 0.5) / samples as f32, rotation))
                .count();
            let measured = open as f32 / samples as f32;
            prop_assert!((measured - size).abs() <= 2.5 / samples as f32 + 1e-3);
        }

        #[test]
        fn prop_middle_is_open_edges_beyond_are_not(
            center in 0.0f32..1.0,
            size in 0.05f32..0.9,
            rotation in -2.0f32..2.0,
        ) {
            let gap = GapArc::new(center, size);
            prop_assert!(gap.test_gap(gap.middle(rotation), rotation));
            let outside = gap.middle(rotation) + size / 2.0 + 0.01;
            prop_assert!(!gap.test_gap(outside, rotation));
        }
    }
}
