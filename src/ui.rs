//! Presentation read model
//!
//! Everything a renderer needs to draw a frame, derived from the round state.
//! Nothing here draws; the only write back into the simulation is the
//! "play again" action.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{
    AimPreview, PlacementError, Round, RoundOutcome, RoundState, Shot, TickInput, Viewport,
};
use crate::tuning::Tuning;

/// Shadow sprite offset from the ball
pub const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 2.0);

pub const PLAY_AGAIN_WIDTH: f32 = 200.0;
pub const PLAY_AGAIN_HEIGHT: f32 = 50.0;
/// Button top edge sits this far below the screen center
pub const PLAY_AGAIN_DROP: f32 = 100.0;

/// Text outline colors (RGBA)
pub const GOLD: [u8; 4] = [255, 200, 0, 255];
pub const DARK_BLUE: [u8; 4] = [0, 82, 172, 255];

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Inclusive on all edges
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The post-win "Play Again?" control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayAgainButton {
    pub rect: Rect,
}

impl PlayAgainButton {
    pub const LABEL: &'static str = "Play Again?";

    pub fn layout(viewport: Viewport) -> Self {
        let center = viewport.center();
        Self {
            rect: Rect {
                x: center.x - PLAY_AGAIN_WIDTH / 2.0,
                y: center.y + PLAY_AGAIN_DROP,
                width: PLAY_AGAIN_WIDTH,
                height: PLAY_AGAIN_HEIGHT,
            },
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    /// Background alpha: faint normally, darker under the pointer
    pub fn fill_alpha(&self, pointer: Vec2) -> u8 {
        if self.contains(pointer) { 150 } else { 50 }
    }
}

/// Win message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    pub outline: [u8; 4],
}

impl Banner {
    pub fn for_outcome(outcome: RoundOutcome) -> Self {
        match outcome {
            RoundOutcome::HoleInOne => Self {
                text: "HOLE-IN-ONE! (1 STROKE)".to_string(),
                outline: GOLD,
            },
            RoundOutcome::Holed { strokes } => Self {
                text: format!("YOU SUNK IT IN {} STROKES!", strokes),
                outline: DARK_BLUE,
            },
        }
    }
}

pub fn stroke_label(strokes: u32) -> String {
    format!("STROKES: {}", strokes)
}

/// One frame of HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub ball: Vec2,
    /// Hidden once it drops
    pub ball_visible: bool,
    pub shadow: Vec2,
    pub hole: Vec2,
    /// Present while a drag is held on a live round
    pub aim: Option<AimPreview>,
    pub arrow_position: Option<Vec2>,
    pub stroke_label: String,
    pub banner: Option<Banner>,
    pub play_again: Option<PlayAgainButton>,
}

impl HudView {
    pub fn build(state: &RoundState, tuning: &Tuning, viewport: Viewport, pointer: Vec2) -> Self {
        let aim = state
            .drag
            .start()
            .filter(|_| !state.sunk)
            .map(|start| AimPreview::from_shot(&Shot::from_drag(start, pointer, tuning)));
        let outcome = state.outcome();

        Self {
            ball: state.ball_pos,
            ball_visible: !state.sunk,
            shadow: state.ball_pos + SHADOW_OFFSET,
            hole: state.hole_pos,
            arrow_position: aim.map(|a| a.arrow_position(state.ball_pos)),
            aim,
            stroke_label: stroke_label(state.strokes),
            banner: outcome.map(Banner::for_outcome),
            play_again: outcome.map(|_| PlayAgainButton::layout(viewport)),
        }
    }

    /// Power meter fill ratio, if the meter is showing
    pub fn power(&self) -> Option<f32> {
        self.aim.map(|a| a.power)
    }
}

/// Reset the round when the player clicks "play again" after a win.
/// Returns whether a new round started.
pub fn handle_play_again(round: &mut Round, input: &TickInput) -> Result<bool, PlacementError> {
    if !round.is_won() || !input.pressed {
        return Ok(false);
    }
    if !PlayAgainButton::layout(input.viewport).contains(input.pointer) {
        return Ok(false);
    }
    round.set_viewport(input.viewport);
    round.reset_round()?;
    Ok(true)
}
