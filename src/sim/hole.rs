//! Random hole placement
//!
//! Rejection sampling inside the margin box until a point is far enough from
//! the tee. The box is checked for feasibility up front, and sampling is
//! bounded: when the budget runs out the in-margin corner farthest from the tee
//! is used instead (always valid when the box is feasible).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Viewport;

/// Constraints for a hole position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRules {
    pub ball_start: Vec2,
    pub min_distance: f32,
    pub margin: f32,
    pub max_attempts: u32,
}

/// Placement constraints that no point on screen can satisfy
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("hole margin {margin} leaves no room on a {width}x{height} screen")]
    MarginTooLarge { margin: f32, width: u32, height: u32 },

    #[error("no hole position is {min_distance} px from the tee (farthest candidate is {farthest} px)")]
    Unreachable { min_distance: f32, farthest: f32 },
}

impl PlacementRules {
    /// Inclusive sampling box `(min, max)` for the given screen
    pub fn bounds(&self, viewport: Viewport) -> Result<(Vec2, Vec2), PlacementError> {
        let min = Vec2::splat(self.margin);
        let max = viewport.size() - Vec2::splat(self.margin);
        if max.x < min.x || max.y < min.y {
            return Err(PlacementError::MarginTooLarge {
                margin: self.margin,
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok((min, max))
    }

    /// Whether `hole` satisfies both the distance and the margin constraint
    pub fn accepts(&self, hole: Vec2, viewport: Viewport) -> bool {
        let Ok((min, max)) = self.bounds(viewport) else {
            return false;
        };
        hole.cmpge(min).all() && hole.cmple(max).all() && self.is_far_enough(hole)
    }

    #[inline]
    fn is_far_enough(&self, hole: Vec2) -> bool {
        hole.distance(self.ball_start) >= self.min_distance
    }

    /// Corner of the sampling box farthest from the tee
    pub fn far_corner(&self, viewport: Viewport) -> Result<Vec2, PlacementError> {
        let (min, max) = self.bounds(viewport)?;
        let corner = Vec2::new(
            if (self.ball_start.x - min.x).abs() >= (max.x - self.ball_start.x).abs() {
                min.x
            } else {
                max.x
            },
            if (self.ball_start.y - min.y).abs() >= (max.y - self.ball_start.y).abs() {
                min.y
            } else {
                max.y
            },
        );
        Ok(corner)
    }
}

/// Pick a hole position for the given screen
pub fn generate_hole<R: Rng>(
    rng: &mut R,
    viewport: Viewport,
    rules: &PlacementRules,
) -> Result<Vec2, PlacementError> {
    let (min, max) = rules.bounds(viewport)?;

    let fallback = rules.far_corner(viewport)?;
    let farthest = fallback.distance(rules.ball_start);
    if farthest < rules.min_distance {
        return Err(PlacementError::Unreachable {
            min_distance: rules.min_distance,
            farthest,
        });
    }

    for _ in 0..rules.max_attempts {
        let candidate = Vec2::new(
            rng.random_range(min.x..=max.x),
            rng.random_range(min.y..=max.y),
        );
        if rules.is_far_enough(candidate) {
            return Ok(candidate);
        }
    }

    log::warn!(
        "Hole placement gave up after {} attempts, using far corner ({}, {})",
        rules.max_attempts,
        fallback.x,
        fallback.y
    );
    Ok(fallback)
}
