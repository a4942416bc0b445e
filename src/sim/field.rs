//! The ordered set of discs in play
//!
//! Discs are kept sorted by index. A field is either procedural (backed by a
//! [`Generator`], extended ahead of the camera forever) or scripted (a fixed
//! list, used by tutorial steps and tests).

use super::generator::Generator;
use super::state::Obstacle;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    generator: Option<Generator>,
}

impl ObstacleField {
    /// Endless field seeded for one run
    pub fn procedural(seed: u64, tuning: &Tuning) -> Self {
        Self {
            obstacles: Vec::new(),
            generator: Some(Generator::new(seed, tuning)),
        }
    }

    /// Fixed field; discs are sorted by index
    pub fn scripted(mut obstacles: Vec<Obstacle>) -> Self {
        obstacles.sort_by_key(|o| o.index);
        Self {
            obstacles,
            generator: None,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub(crate) fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn is_procedural(&self) -> bool {
        self.generator.is_some()
    }

    /// Append discs until the generated frontier reaches `to_depth`.
    /// Scripted fields never grow. Returns the number of discs added.
    pub fn extend(&mut self, to_depth: f32, elapsed: f32, tuning: &Tuning) -> usize {
        let Some(generator) = self.generator.as_mut() else {
            return 0;
        };
        let mut added = 0;
        while generator.next_depth(tuning) <= to_depth {
            self.obstacles.push(generator.next_obstacle(elapsed, tuning));
            added += 1;
        }
        added
    }

    /// Drop resolved discs lying entirely above `before_depth`.
    /// Returns the number of discs removed.
    pub fn prune(&mut self, before_depth: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles
            .retain(|o| !(o.resolved && o.bottom() < before_depth));
        before - self.obstacles.len()
    }

    /// Position of the nearest unresolved disc
    #[inline]
    pub fn active_position(&self) -> Option<usize> {
        self.obstacles.iter().position(|o| !o.resolved)
    }

    /// The nearest unresolved disc: the only one that accepts rotation
    pub fn active(&self) -> Option<&Obstacle> {
        self.active_position().map(|i| &self.obstacles[i])
    }

    pub fn active_mut(&mut self) -> Option<&mut Obstacle> {
        let i = self.active_position()?;
        self.obstacles.get_mut(i)
    }

    /// True once a scripted field has nothing left to test
    pub fn is_exhausted(&self) -> bool {
        self.generator.is_none() && self.active_position().is_none()
    }

    /// Depth of the deepest disc, if any
    pub fn last_depth(&self) -> Option<f32> {
        self.obstacles.last().map(|o| o.depth)
    }
}
