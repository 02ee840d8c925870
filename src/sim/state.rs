//! Round state and core simulation types
//!
//! Everything the per-frame transition reads or writes lives in [`RoundState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Playfield size in pixels, queried from the display every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::consts::SCREEN_WIDTH, crate::consts::SCREEN_HEIGHT)
    }
}

/// Shot input state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer went down on the stopped ball at `start`
    Dragging { start: Vec2 },
}

impl DragState {
    pub fn start(&self) -> Option<Vec2> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { start } => Some(start),
        }
    }
}

/// Screen axis, for wall bounce reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Things that happened during a tick (for presentation and audio)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A new hole was placed and the ball returned to the tee
    RoundReset { hole: Vec2 },
    DragStarted { start: Vec2 },
    ShotTaken { stroke: u32, impulse: Vec2, power: f32 },
    WallBounce { axis: Axis },
    Sunk { strokes: u32 },
}

/// How a finished round went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    HoleInOne,
    Holed { strokes: u32 },
}

impl RoundOutcome {
    pub fn from_strokes(strokes: u32) -> Self {
        if strokes == 1 {
            RoundOutcome::HoleInOne
        } else {
            RoundOutcome::Holed { strokes }
        }
    }

    pub fn strokes(&self) -> u32 {
        match *self {
            RoundOutcome::HoleInOne => 1,
            RoundOutcome::Holed { strokes } => strokes,
        }
    }
}

/// Complete state of one round (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub ball_pos: Vec2,
    /// Pixels per frame
    pub ball_vel: Vec2,
    pub hole_pos: Vec2,
    /// Completed shots this round
    pub strokes: u32,
    /// Ball dropped; physics and shot input are frozen until reset
    pub sunk: bool,
    pub drag: DragState,
    /// Simulation ticks since the round started
    pub time_ticks: u64,
}

impl RoundState {
    /// Fresh round with the ball at rest on the tee
    pub fn new(ball_start: Vec2, hole_pos: Vec2) -> Self {
        Self {
            ball_pos: ball_start,
            ball_vel: Vec2::ZERO,
            hole_pos,
            strokes: 0,
            sunk: false,
            drag: DragState::Idle,
            time_ticks: 0,
        }
    }

    /// Slow enough to line up another shot
    #[inline]
    pub fn is_ball_stopped(&self, tuning: &Tuning) -> bool {
        self.ball_vel.length_squared() < tuning.stopped_speed_sq
    }

    #[inline]
    pub fn distance_to_hole(&self) -> f32 {
        self.ball_pos.distance(self.hole_pos)
    }

    /// Whether a press at `pointer` may start a drag right now
    pub fn can_start_drag(&self, pointer: Vec2, tuning: &Tuning) -> bool {
        !self.sunk
            && self.drag == DragState::Idle
            && self.is_ball_stopped(tuning)
            && pointer.distance(self.ball_pos) < tuning.grab_radius()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.sunk.then(|| RoundOutcome::from_strokes(self.strokes))
    }
}
