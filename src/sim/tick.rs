//! Per-frame simulation tick
//!
//! Input sampling plus the pure state transition: shot input first, then one
//! physics step against the frame's screen size.

use glam::Vec2;

use super::physics;
use super::shot::Shot;
use super::state::{DragState, RoundEvent, RoundState, Viewport};
use crate::tuning::Tuning;

/// Display size source
pub trait Screen {
    fn screen_width(&self) -> u32;
    fn screen_height(&self) -> u32;
}

/// Primary pointer (mouse button / touch) source
pub trait Pointer {
    fn position(&self) -> Vec2;
    fn pressed_this_frame(&self) -> bool;
    fn released_this_frame(&self) -> bool;
    fn held_down(&self) -> bool;
}

impl Screen for Viewport {
    fn screen_width(&self) -> u32 {
        self.width
    }

    fn screen_height(&self) -> u32 {
        self.height
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    pub pointer: Vec2,
    /// Button went down this frame
    pub pressed: bool,
    /// Button went up this frame
    pub released: bool,
    pub held: bool,
    pub viewport: Viewport,
}

impl TickInput {
    /// Capture the current frame from the platform
    pub fn sample(pointer: &impl Pointer, screen: &impl Screen) -> Self {
        Self {
            pointer: pointer.position(),
            pressed: pointer.pressed_this_frame(),
            released: pointer.released_this_frame(),
            held: pointer.held_down(),
            viewport: Viewport::new(screen.screen_width(), screen.screen_height()),
        }
    }

    /// Same frame with the edge-triggered flags cleared (for extra substeps)
    pub fn without_edges(&self) -> Self {
        Self {
            pressed: false,
            released: false,
            ..*self
        }
    }
}

/// Advance the round by one frame
pub fn tick(state: &mut RoundState, input: &TickInput, tuning: &Tuning) -> Vec<RoundEvent> {
    let mut events = apply_input(state, input, tuning);
    run_physics(state, tuning, input.viewport, 1, &mut events);
    events
}

/// Pointer edges only: start a drag on press, take the shot on release
pub fn apply_input(state: &mut RoundState, input: &TickInput, tuning: &Tuning) -> Vec<RoundEvent> {
    let mut events = Vec::new();
    if state.sunk {
        return events;
    }

    if input.pressed && state.can_start_drag(input.pointer, tuning) {
        state.drag = DragState::Dragging {
            start: input.pointer,
        };
        events.push(RoundEvent::DragStarted {
            start: input.pointer,
        });
    }

    if input.released {
        if let DragState::Dragging { start } = state.drag {
            let shot = Shot::from_drag(start, input.pointer, tuning);
            let impulse = shot.impulse(tuning);
            state.ball_vel += impulse;
            state.strokes += 1;
            state.drag = DragState::Idle;

            log::debug!(
                "Stroke {}: power {:.2}, impulse ({:.2}, {:.2})",
                state.strokes,
                shot.power,
                impulse.x,
                impulse.y
            );
            events.push(RoundEvent::ShotTaken {
                stroke: state.strokes,
                impulse,
                power: shot.power,
            });
        }
    }

    events
}

/// Integrate `ticks` frames and report bounces and the sink
pub(crate) fn run_physics(
    state: &mut RoundState,
    tuning: &Tuning,
    viewport: Viewport,
    ticks: u32,
    events: &mut Vec<RoundEvent>,
) {
    if state.sunk {
        return;
    }

    let outcome = physics::integrate(state, tuning, viewport, ticks);
    events.extend(outcome.bounces().map(|axis| RoundEvent::WallBounce { axis }));
    if outcome.sunk {
        log::info!("Ball sunk in {} strokes", state.strokes);
        events.push(RoundEvent::Sunk {
            strokes: state.strokes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(at: Vec2) -> TickInput {
        TickInput {
            pointer: at,
            pressed: true,
            held: true,
            ..Default::default()
        }
    }

    fn release(at: Vec2) -> TickInput {
        TickInput {
            pointer: at,
            released: true,
            ..Default::default()
        }
    }

    fn fresh() -> RoundState {
        RoundState::new(Vec2::new(100.0, 500.0), Vec2::new(700.0, 100.0))
    }

    #[test]
    fn test_drag_and_release_takes_shot() {
        let tuning = Tuning::default();
        let mut state = fresh();

        let events = tick(&mut state, &press(Vec2::new(100.0, 500.0)), &tuning);
        assert_eq!(
            events,
            vec![RoundEvent::DragStarted {
                start: Vec2::new(100.0, 500.0)
            }]
        );
        assert!(matches!(state.drag, DragState::Dragging { .. }));

        let events = tick(&mut state, &release(Vec2::new(0.0, 500.0)), &tuning);
        assert_eq!(state.strokes, 1);
        assert_eq!(state.drag, DragState::Idle);
        assert!(matches!(events[0], RoundEvent::ShotTaken { stroke: 1, .. }));
        // Impulse (7.5, 0), moved once, then friction
        assert!((state.ball_pos.x - 107.5).abs() < 1e-4);
        assert!((state.ball_vel.x - 7.5 * tuning.friction).abs() < 1e-4);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_press_away_from_ball_is_ignored() {
        let tuning = Tuning::default();
        let mut state = fresh();

        let events = tick(&mut state, &press(Vec2::new(300.0, 300.0)), &tuning);
        assert!(events.is_empty());
        assert_eq!(state.drag, DragState::Idle);

        tick(&mut state, &release(Vec2::new(0.0, 0.0)), &tuning);
        assert_eq!(state.strokes, 0);
        assert_eq!(state.ball_vel, Vec2::ZERO);
    }

    #[test]
    fn test_press_while_rolling_is_ignored() {
        let tuning = Tuning::default();
        let mut state = fresh();
        state.ball_vel = Vec2::new(2.0, 0.0);
        let input = press(state.ball_pos);

        tick(&mut state, &input, &tuning);
        assert_eq!(state.drag, DragState::Idle);
    }

    #[test]
    fn test_press_and_release_same_frame() {
        let tuning = Tuning::default();
        let mut state = fresh();
        let input = TickInput {
            pointer: state.ball_pos,
            pressed: true,
            released: true,
            ..Default::default()
        };

        let events = tick(&mut state, &input, &tuning);

        // Zero-length drag: counts as a stroke, ball does not move
        assert_eq!(state.strokes, 1);
        assert_eq!(state.ball_vel, Vec2::ZERO);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_sunk_round_ignores_input() {
        let tuning = Tuning::default();
        let mut state = fresh();
        state.sunk = true;
        state.strokes = 3;
        let input = press(state.ball_pos);

        assert!(tick(&mut state, &input, &tuning).is_empty());
        assert!(tick(&mut state, &release(Vec2::ZERO), &tuning).is_empty());
        assert_eq!(state.strokes, 3);
        assert_eq!(state.drag, DragState::Idle);
    }

    #[test]
    fn test_drag_dropped_when_ball_drifts_in() {
        let tuning = Tuning::default();
        let hole = Vec2::new(400.0, 300.0);
        let mut state = RoundState::new(hole + Vec2::new(30.5, 0.0), hole);
        // Slow enough to count as stopped, just outside the well
        state.ball_vel = Vec2::new(-0.3, 0.0);
        let input = press(state.ball_pos);

        tick(&mut state, &input, &tuning);
        assert!(matches!(state.drag, DragState::Dragging { .. }));

        let held = TickInput {
            pointer: state.ball_pos + Vec2::new(40.0, 0.0),
            held: true,
            ..Default::default()
        };
        for _ in 0..600 {
            if state.sunk {
                break;
            }
            tick(&mut state, &held, &tuning);
        }

        assert!(state.sunk);
        assert_eq!(state.drag, DragState::Idle);
    }

    #[test]
    fn test_sample_from_platform() {
        struct Mouse;
        impl Pointer for Mouse {
            fn position(&self) -> Vec2 {
                Vec2::new(12.0, 34.0)
            }
            fn pressed_this_frame(&self) -> bool {
                true
            }
            fn released_this_frame(&self) -> bool {
                false
            }
            fn held_down(&self) -> bool {
                true
            }
        }

        let input = TickInput::sample(&Mouse, &Viewport::new(1024, 768));
        assert_eq!(input.pointer, Vec2::new(12.0, 34.0));
        assert!(input.pressed && input.held && !input.released);
        assert_eq!(input.viewport, Viewport::new(1024, 768));

        let quiet = input.without_edges();
        assert!(!quiet.pressed && !quiet.released && quiet.held);
    }
}
