//! Shot planner for demo / headless play
//!
//! Aims straight at the hole with just enough power for friction to bring the
//! ball to rest on it, then inverts the drag mapping to find the drag gesture.

use glam::Vec2;

use super::state::RoundState;
use crate::tuning::Tuning;

/// Drag gesture that produces the planned shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedShot {
    pub drag_start: Vec2,
    pub drag_end: Vec2,
}

/// Launch speed that rolls `distance` pixels before friction stops it
pub fn speed_for_distance(distance: f32, tuning: &Tuning) -> f32 {
    // v + v·f + v·f² + ... = v / (1 - f)
    let decay = 1.0 - tuning.friction;
    if decay <= 0.0 {
        return tuning.max_velocity;
    }
    (distance * decay).min(tuning.max_velocity)
}

/// Drag length whose impulse has magnitude `speed`
pub fn drag_length_for_speed(speed: f32, tuning: &Tuning) -> f32 {
    if tuning.launch_gain <= 0.0 {
        return 0.0;
    }
    // speed = gain · d · min(d / max_drag, 1)
    let full_power_speed = tuning.launch_gain * tuning.max_drag_distance;
    if speed >= full_power_speed {
        speed / tuning.launch_gain
    } else {
        (speed * tuning.max_drag_distance / tuning.launch_gain).sqrt()
    }
}

/// Next shot, if one can be taken right now
pub fn plan_shot(state: &RoundState, tuning: &Tuning) -> Option<PlannedShot> {
    if state.sunk || !state.is_ball_stopped(tuning) {
        return None;
    }

    let to_hole = state.hole_pos - state.ball_pos;
    let direction = to_hole.normalize_or_zero();
    let speed = speed_for_distance(to_hole.length(), tuning);
    let drag = drag_length_for_speed(speed, tuning);

    Some(PlannedShot {
        drag_start: state.ball_pos,
        drag_end: state.ball_pos - direction * drag,
    })
}
