//! Random trimming of the pickup pool and goal placement.

use std::ops::RangeInclusive;

use maze_quiz_core::{ConfigurationError, ObjectKind};
use rand::Rng;

/// Goal cell and trimmed pickup cells, expressed as row-major linear indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementSet {
    goal: usize,
    pickups: Vec<usize>,
}

impl PlacementSet {
    /// Draws a pickup target from `range` and discards random candidates until
    /// the pool shrinks to it.
    ///
    /// Pools whose size already lies inside `range` are kept whole, and so are
    /// pools smaller than the lower bound. The target is drawn either way.
    pub fn choose<R>(
        candidates: &[usize],
        goal: usize,
        range: &RangeInclusive<usize>,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError>
    where
        R: Rng + ?Sized,
    {
        if range.is_empty() {
            return Err(ConfigurationError::InvalidPickupRange {
                min: *range.start(),
                max: *range.end(),
            });
        }

        let target = rng.gen_range(range.clone());
        let mut pickups = candidates.to_vec();
        if range.contains(&pickups.len()) {
            return Ok(Self { goal, pickups });
        }
        while pickups.len() > target {
            let discarded = rng.gen_range(0..pickups.len());
            let _ = pickups.remove(discarded);
        }

        Ok(Self { goal, pickups })
    }

    /// Linear index of the goal cell.
    #[must_use]
    pub const fn goal(&self) -> usize {
        self.goal
    }

    /// Linear indices of the remaining pickup cells, in candidate order.
    #[must_use]
    pub fn pickups(&self) -> &[usize] {
        &self.pickups
    }

    /// Object placed at the provided linear index. The goal flag wins over a
    /// pickup listed at the same index.
    #[must_use]
    pub fn object_at(&self, index: usize) -> Option<ObjectKind> {
        if index == self.goal {
            Some(ObjectKind::Flag)
        } else if self.pickups.contains(&index) {
            Some(ObjectKind::Question)
        } else {
            None
        }
    }
}
