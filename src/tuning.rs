//! Data-driven tuning
//!
//! Every physics and placement constant lives in [`Tuning`]. The defaults are
//! the reference values the simulation was balanced with at 60 Hz; a JSON file
//! may override any subset of them.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PlacementRules;

/// Errors raised while loading or validating tuning
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics, input and placement constants for one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Collision radius of the ball (px)
    pub ball_radius: f32,
    /// Where the ball sits at the start of every round
    pub ball_start: Vec2,

    /// Radius of the gravity well around the hole
    pub sink_distance: f32,
    /// Velocity added toward the hole each frame inside the well
    pub sink_pull: f32,
    /// Distance from the hole center at which a slow ball drops in
    pub sink_snap_distance: f32,
    /// Squared speed below which the ball is slow enough to drop in
    pub sink_snap_speed_sq: f32,

    /// Speed cap (px/frame)
    pub max_velocity: f32,
    /// Per-frame velocity multiplier
    pub friction: f32,
    /// Speed fraction kept on wall contact
    pub wall_restitution: f32,

    /// Drag length giving full power
    pub max_drag_distance: f32,
    /// Shoot vector to velocity gain
    pub launch_gain: f32,
    /// Squared speed below which a new shot may be lined up
    pub stopped_speed_sq: f32,
    /// Grab radius in multiples of the ball radius
    pub grab_radius_factor: f32,

    /// Minimum hole distance from the ball start
    pub hole_min_distance: f32,
    /// Keep-out band along every screen edge for the hole
    pub hole_margin: f32,
    /// Rejection sampling budget before falling back to the far corner
    pub hole_max_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),

            sink_distance: SINK_DISTANCE,
            sink_pull: SINK_PULL,
            sink_snap_distance: SINK_SNAP_DISTANCE,
            sink_snap_speed_sq: SINK_SNAP_SPEED_SQ,

            max_velocity: MAX_VELOCITY,
            friction: FRICTION,
            wall_restitution: WALL_RESTITUTION,

            max_drag_distance: MAX_DRAG_DISTANCE,
            launch_gain: LAUNCH_GAIN,
            stopped_speed_sq: STOPPED_SPEED_SQ,
            grab_radius_factor: GRAB_RADIUS_FACTOR,

            hole_min_distance: HOLE_MIN_DISTANCE,
            hole_margin: HOLE_MARGIN,
            hole_max_attempts: HOLE_MAX_ATTEMPTS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; omitted fields keep their reference values
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("ball_radius", self.ball_radius),
            ("ball_start.x", self.ball_start.x),
            ("ball_start.y", self.ball_start.y),
            ("sink_distance", self.sink_distance),
            ("sink_pull", self.sink_pull),
            ("sink_snap_distance", self.sink_snap_distance),
            ("sink_snap_speed_sq", self.sink_snap_speed_sq),
            ("max_velocity", self.max_velocity),
            ("friction", self.friction),
            ("wall_restitution", self.wall_restitution),
            ("max_drag_distance", self.max_drag_distance),
            ("launch_gain", self.launch_gain),
            ("stopped_speed_sq", self.stopped_speed_sq),
            ("grab_radius_factor", self.grab_radius_factor),
            ("hole_min_distance", self.hole_min_distance),
            ("hole_margin", self.hole_margin),
        ];
        if let Some((field, _)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(field, "must be finite"));
        }

        if self.ball_radius <= 0.0 {
            return Err(invalid("ball_radius", "must be positive"));
        }
        if self.max_velocity <= 0.0 {
            return Err(invalid("max_velocity", "must be positive"));
        }
        if self.friction <= 0.0 || self.friction > 1.0 {
            return Err(invalid("friction", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.wall_restitution) {
            return Err(invalid("wall_restitution", "must be in [0, 1]"));
        }
        if self.max_drag_distance <= 0.0 {
            return Err(invalid("max_drag_distance", "must be positive"));
        }
        if self.launch_gain < 0.0 {
            return Err(invalid("launch_gain", "must not be negative"));
        }
        if self.sink_distance < 0.0 || self.sink_pull < 0.0 {
            return Err(invalid("sink_distance", "well radius and pull must not be negative"));
        }
        if self.sink_snap_distance < 0.0 || self.sink_snap_distance > self.sink_distance {
            return Err(invalid("sink_snap_distance", "must lie within sink_distance"));
        }
        if self.sink_snap_speed_sq < 0.0 || self.stopped_speed_sq < 0.0 {
            return Err(invalid("stopped_speed_sq", "speed thresholds must not be negative"));
        }
        if self.grab_radius_factor <= 0.0 {
            return Err(invalid("grab_radius_factor", "must be positive"));
        }
        if self.hole_min_distance < 0.0 || self.hole_margin < 0.0 {
            return Err(invalid("hole_margin", "placement distances must not be negative"));
        }
        if self.hole_max_attempts == 0 {
            return Err(invalid("hole_max_attempts", "must be at least 1"));
        }
        Ok(())
    }

    /// Radius around the ball center where a press starts a drag
    #[inline]
    pub fn grab_radius(&self) -> f32 {
        self.ball_radius * self.grab_radius_factor
    }

    /// Hole placement parameters
    pub fn placement_rules(&self) -> PlacementRules {
        PlacementRules {
            ball_start: self.ball_start,
            min_distance: self.hole_min_distance,
            margin: self.hole_margin,
            max_attempts: self.hole_max_attempts,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}
