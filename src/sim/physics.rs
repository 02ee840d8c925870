//! Ball integrator
//!
//! One step per 60 Hz frame, in this order (later stages override earlier ones):
//! 1. Gravity well: inside `sink_distance` the ball is pulled toward the hole
//! 2. Win check (only inside the well): close and slow enough snaps the ball in
//! 3. Speed cap
//! 4. Explicit Euler move
//! 5. Friction
//! 6. Wall bounce, each axis on its own
//!
//! Velocities are in pixels per frame, so a step is always one frame long.
//! Callers with a variable render rate must go through [`super::FixedTimestep`].

use glam::Vec2;

use super::state::{Axis, DragState, RoundState, Viewport};
use crate::tuning::Tuning;

/// What a single step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub sunk: bool,
    pub bounced_x: bool,
    pub bounced_y: bool,
}

impl StepOutcome {
    /// Axes that bounced, X first
    pub fn bounces(&self) -> impl Iterator<Item = Axis> {
        [(self.bounced_x, Axis::X), (self.bounced_y, Axis::Y)]
            .into_iter()
            .filter_map(|(hit, axis)| hit.then_some(axis))
    }

    fn merge(&mut self, other: StepOutcome) {
        self.sunk |= other.sunk;
        self.bounced_x |= other.bounced_x;
        self.bounced_y |= other.bounced_y;
    }
}

/// Pull toward the hole, then test the win condition. Returns true on sink.
///
/// The snap looks at the velocity after the pull, so a slow ball right next to
/// the hole can still be carried past it.
pub fn apply_sink(state: &mut RoundState, tuning: &Tuning) -> bool {
    let to_hole = state.hole_pos - state.ball_pos;
    let dist = to_hole.length();
    if dist >= tuning.sink_distance {
        return false;
    }

    // Ball dead center has no direction to be pulled in
    state.ball_vel += to_hole.normalize_or_zero() * tuning.sink_pull;

    if dist < tuning.sink_snap_distance
        && state.ball_vel.length_squared() < tuning.sink_snap_speed_sq
    {
        state.sunk = true;
        state.ball_pos = state.hole_pos;
        state.ball_vel = Vec2::ZERO;
        state.drag = DragState::Idle;
        return true;
    }
    false
}

/// Rescale to `max_speed` if faster, keeping direction
#[inline]
pub fn cap_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    if vel.length() > max_speed {
        vel.normalize_or_zero() * max_speed
    } else {
        vel
    }
}

#[inline]
pub fn apply_friction(vel: Vec2, friction: f32) -> Vec2 {
    vel * friction
}

/// Keep a ball of `radius` inside `[radius, extent - radius]` on one axis.
/// Returns the new position, new velocity and whether it bounced.
#[inline]
fn bounce_axis(pos: f32, vel: f32, radius: f32, extent: f32, restitution: f32) -> (f32, f32, bool) {
    // A screen narrower than the ball pins it to the middle
    let low = radius.min(extent / 2.0);
    let high = (extent - radius).max(low);

    if pos < low {
        (low, -vel * restitution, true)
    } else if pos > high {
        (high, -vel * restitution, true)
    } else {
        (pos, vel, false)
    }
}

/// Wall response for both axes
pub fn bounce_walls(
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    viewport: Viewport,
    restitution: f32,
) -> (Vec2, Vec2, StepOutcome) {
    let size = viewport.size();
    let (x, vx, bounced_x) = bounce_axis(pos.x, vel.x, radius, size.x, restitution);
    let (y, vy, bounced_y) = bounce_axis(pos.y, vel.y, radius, size.y, restitution);
    (
        Vec2::new(x, y),
        Vec2::new(vx, vy),
        StepOutcome {
            sunk: false,
            bounced_x,
            bounced_y,
        },
    )
}

/// Advance the ball by one frame. Does nothing once the ball is sunk.
pub fn step(state: &mut RoundState, tuning: &Tuning, viewport: Viewport) -> StepOutcome {
    if state.sunk {
        return StepOutcome::default();
    }

    if apply_sink(state, tuning) {
        return StepOutcome {
            sunk: true,
            ..Default::default()
        };
    }

    state.ball_vel = cap_speed(state.ball_vel, tuning.max_velocity);
    state.ball_pos += state.ball_vel;
    state.ball_vel = apply_friction(state.ball_vel, tuning.friction);

    let (pos, vel, outcome) = bounce_walls(
        state.ball_pos,
        state.ball_vel,
        tuning.ball_radius,
        viewport,
        tuning.wall_restitution,
    );
    state.ball_pos = pos;
    state.ball_vel = vel;
    outcome
}

/// Advance by `ticks` whole frames, stopping early if the ball drops
pub fn integrate(
    state: &mut RoundState,
    tuning: &Tuning,
    viewport: Viewport,
    ticks: u32,
) -> StepOutcome {
    let mut total = StepOutcome::default();
    for _ in 0..ticks {
        if state.sunk {
            break;
        }
        total.merge(step(state, tuning, viewport));
        state.time_ticks += 1;
    }
    total
}
