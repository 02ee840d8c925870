use glam::Vec2;
use mini_golf::sim::autoplay::drag_length_for_speed;
use mini_golf::sim::{DragState, Round, RoundEvent, RoundOutcome, TickInput, Viewport, plan_shot};
use mini_golf::ui::{self, HudView, PlayAgainButton};
use mini_golf::Tuning;

fn idle(at: Vec2) -> TickInput {
    TickInput {
        pointer: at,
        ..Default::default()
    }
}

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

/// Run idle frames until the ball drops; returns frames used
fn roll_until_sunk(round: &mut Round, max_frames: u32) -> Option<u32> {
    for frame in 0..max_frames {
        if round.is_won() {
            return Some(frame);
        }
        round.tick(&idle(Vec2::ZERO));
    }
    round.is_won().then_some(max_frames)
}

/// Drag from the ball center so the ball launches toward `target` at `speed`
fn shoot_toward(round: &mut Round, target: Vec2, speed: f32) -> Vec<RoundEvent> {
    let ball = round.state.ball_pos;
    let dir = (target - ball).normalize_or_zero();
    let drag = drag_length_for_speed(speed, round.tuning());

    let mut events = round.tick(&press(ball));
    events.extend(round.tick(&release(ball - dir * drag)));
    events
}

#[test]
fn direct_hit_across_the_screen() {
    // One shot has to carry ~720 px, so lift the speed cap for this fixture
    let tuning = Tuning {
        max_velocity: 40.0,
        ..Default::default()
    };
    let mut round = Round::new(1, tuning, Viewport::default()).unwrap();
    let hole = Vec2::new(700.0, 100.0);
    round.state.hole_pos = hole;
    assert_eq!(round.state.ball_pos, Vec2::new(100.0, 500.0));

    // Friction stops it 10 px short of the hole, inside the well
    let distance = round.state.ball_pos.distance(hole);
    let speed = (distance - 10.0) * (1.0 - round.tuning().friction);
    let events = shoot_toward(&mut round, hole, speed);
    assert!(events.iter().any(|e| matches!(e, RoundEvent::ShotTaken { stroke: 1, .. })));

    let frames = roll_until_sunk(&mut round, 600).expect("ball should drop");
    assert!(frames < 600);

    assert!(round.state.sunk);
    assert_eq!(round.state.strokes, 1);
    assert_eq!(round.state.ball_pos, hole);
    assert_eq!(round.state.ball_vel, Vec2::ZERO);
    assert_eq!(round.outcome(), Some(RoundOutcome::HoleInOne));
}

#[test]
fn short_putt_with_reference_tuning() {
    let mut round = Round::new(2, Tuning::default(), Viewport::default()).unwrap();
    let hole = Vec2::new(300.0, 500.0);
    round.state.hole_pos = hole;

    // 200 px of roll at 0.95 friction needs 10 px/frame
    shoot_toward(&mut round, hole, 10.0);

    assert!(roll_until_sunk(&mut round, 600).is_some());
    assert_eq!(round.state.strokes, 1);
    assert_eq!(round.state.ball_pos, hole);
}

#[test]
fn wall_bounce_through_a_round() {
    let mut round = Round::new(3, Tuning::default(), Viewport::default()).unwrap();
    let radius = round.tuning().ball_radius;
    round.state.ball_pos = Vec2::new(radius - 1.0, 300.0);
    round.state.ball_vel = Vec2::new(-5.0, 0.0);

    let events = round.tick(&idle(Vec2::ZERO));

    assert!(events.contains(&RoundEvent::WallBounce {
        axis: mini_golf::sim::Axis::X
    }));
    assert_eq!(round.state.ball_pos.x, radius);
    let expected = 5.0 * round.tuning().friction * round.tuning().wall_restitution;
    assert!((round.state.ball_vel.x - expected).abs() < 1e-5);
}

#[test]
fn reset_twice_keeps_invariants() {
    let mut round = Round::new(4, Tuning::default(), Viewport::default()).unwrap();
    shoot_toward(&mut round, Vec2::new(400.0, 300.0), 8.0);
    assert_eq!(round.state.strokes, 1);

    for _ in 0..2 {
        round.reset_round().unwrap();
        let state = &round.state;
        assert_eq!(state.ball_pos, round.tuning().ball_start);
        assert_eq!(state.ball_vel, Vec2::ZERO);
        assert_eq!(state.strokes, 0);
        assert!(!state.sunk);
        assert_eq!(state.drag, DragState::Idle);
        assert!(
            round
                .tuning()
                .placement_rules()
                .accepts(state.hole_pos, round.viewport())
        );
    }
}

#[test]
fn no_new_drag_while_ball_is_rolling() {
    let mut round = Round::new(5, Tuning::default(), Viewport::default()).unwrap();
    shoot_toward(&mut round, Vec2::new(400.0, 500.0), 6.0);

    // Pointer right on the moving ball
    let ball = round.state.ball_pos;
    let events = round.tick(&press(ball));
    assert!(events.iter().all(|e| !matches!(e, RoundEvent::DragStarted { .. })));
    assert_eq!(round.state.drag, DragState::Idle);

    round.tick(&release(ball - Vec2::new(100.0, 0.0)));
    assert_eq!(round.state.strokes, 1);
}

#[test]
fn sunk_round_is_frozen_until_play_again() {
    let mut round = Round::new(6, Tuning::default(), Viewport::default()).unwrap();
    let hole = round.state.hole_pos;
    round.state.ball_pos = hole + Vec2::new(2.0, 0.0);
    round.state.strokes = 2;
    round.tick(&idle(Vec2::ZERO));
    assert!(round.is_won());

    let frozen = round.state.clone();
    round.tick(&press(hole));
    round.tick(&release(hole - Vec2::new(150.0, 0.0)));
    assert_eq!(round.state, frozen);

    let hud = HudView::build(&round.state, round.tuning(), round.viewport(), Vec2::ZERO);
    assert_eq!(hud.banner.unwrap().text, "YOU SUNK IT IN 2 STROKES!");

    let button = PlayAgainButton::layout(round.viewport());
    assert!(ui::handle_play_again(&mut round, &press(button.rect.center())).unwrap());
    assert!(!round.is_won());
    assert_eq!(round.state.strokes, 0);
}

#[test]
fn autoplay_finishes_rounds() {
    for seed in [11u64, 22, 33, 44, 55] {
        let mut round = Round::new(seed, Tuning::default(), Viewport::default()).unwrap();
        let mut pending = None;

        for _ in 0..5000 {
            if round.is_won() {
                break;
            }
            let input = if let Some(end) = pending.take() {
                release(end)
            } else if let Some(plan) = plan_shot(&round.state, round.tuning()) {
                pending = Some(plan.drag_end);
                press(plan.drag_start)
            } else {
                idle(Vec2::ZERO)
            };
            round.tick(&input);
        }

        assert!(round.is_won(), "seed {} did not finish", seed);
        assert!(round.state.strokes >= 1);
    }
}
