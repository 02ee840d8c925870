//! Mini Golf - a single-screen putting round
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, shot input, hole placement, round lifecycle)
//! - `tuning`: Data-driven physics and placement constants
//! - `ui`: Read-only presentation model (HUD text, aim arrow, win banner, play again button)

pub mod sim;
pub mod tuning;
pub mod ui;

pub use sim::{Round, RoundError, RoundEvent, RoundOutcome, RoundState, TickInput, Viewport};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (reference tuning)
pub mod consts {
    /// Fixed simulation rate the physics constants are tuned for
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Default window size
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = 100.0;
    pub const BALL_START_Y: f32 = 500.0;
    /// Ball counts as stopped below this squared speed (px/frame)²
    pub const STOPPED_SPEED_SQ: f32 = 0.1;
    /// Drag may begin within this many ball radii of the ball center
    pub const GRAB_RADIUS_FACTOR: f32 = 1.5;

    /// Gravity well around the hole
    pub const SINK_DISTANCE: f32 = 30.0;
    pub const SINK_PULL: f32 = 0.5;
    /// Win transition: ball this close to the hole center...
    pub const SINK_SNAP_DISTANCE: f32 = 5.0;
    /// ...and slower than this squared speed
    pub const SINK_SNAP_SPEED_SQ: f32 = 1.0;

    /// Hard velocity cap (px/frame)
    pub const MAX_VELOCITY: f32 = 15.0;
    /// Per-frame velocity multiplier
    pub const FRICTION: f32 = 0.95;
    /// Fraction of the normal speed kept after hitting a wall
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Drag length that yields full power
    pub const MAX_DRAG_DISTANCE: f32 = 200.0;
    /// Shoot vector to velocity gain
    pub const LAUNCH_GAIN: f32 = 0.15;

    /// Hole placement
    pub const HOLE_MIN_DISTANCE: f32 = 300.0;
    pub const HOLE_MARGIN: f32 = 50.0;
    pub const HOLE_MAX_ATTEMPTS: u32 = 10_000;
}

/// Seed derived from the wall clock, for a fresh course each launch
pub fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()).rotate_left(32))
        .unwrap_or(0x5EED)
}
