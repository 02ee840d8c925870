//! Drag-to-shoot input mapping
//!
//! Slingshot semantics: the ball launches away from the direction the pointer
//! was pulled. Power grows linearly with drag length up to a cap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Aim arrow sits this far out per pixel of drag...
const ARROW_OFFSET_PER_PX: f32 = 0.1;
/// ...starting from this offset...
const ARROW_OFFSET_BASE: f32 = 5.0;
/// ...and never further than this from the ball center
const ARROW_OFFSET_MAX: f32 = 40.0;

/// Fraction of full power for a drag of the given length, in `[0, 1]`
#[inline]
pub fn power_scalar(drag_distance: f32, max_drag_distance: f32) -> f32 {
    (drag_distance / max_drag_distance).min(1.0)
}

/// A drag gesture resolved into launch parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// `drag_start - drag_end`
    pub vector: Vec2,
    pub distance: f32,
    /// Clamped power ratio
    pub power: f32,
}

impl Shot {
    pub fn from_drag(drag_start: Vec2, drag_end: Vec2, tuning: &Tuning) -> Self {
        let vector = drag_start - drag_end;
        let distance = vector.length();
        Self {
            vector,
            distance,
            power: power_scalar(distance, tuning.max_drag_distance),
        }
    }

    /// Velocity to add to the ball
    #[inline]
    pub fn impulse(&self, tuning: &Tuning) -> Vec2 {
        self.vector * tuning.launch_gain * self.power
    }
}

/// What the aim arrow and power meter show while a drag is held
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimPreview {
    /// Unit launch direction, zero for a zero-length drag
    pub direction: Vec2,
    /// Arrow sprite rotation (sprite points up at 0°)
    pub angle_degrees: f32,
    /// Arrow distance from the ball center
    pub arrow_offset: f32,
    /// Power meter fill ratio
    pub power: f32,
}

impl AimPreview {
    pub fn from_shot(shot: &Shot) -> Self {
        Self {
            direction: shot.vector.normalize_or_zero(),
            angle_degrees: shot.vector.y.atan2(shot.vector.x).to_degrees() + 90.0,
            arrow_offset: (shot.distance * ARROW_OFFSET_PER_PX + ARROW_OFFSET_BASE)
                .min(ARROW_OFFSET_MAX),
            power: shot.power,
        }
    }

    /// Where to draw the arrow for a ball at `ball_pos`
    pub fn arrow_position(&self, ball_pos: Vec2) -> Vec2 {
        ball_pos + self.direction * self.arrow_offset
    }
}
