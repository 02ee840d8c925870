//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod hole;
pub mod physics;
pub mod round;
pub mod shot;
pub mod state;
pub mod tick;
pub mod timestep;

pub use autoplay::{PlannedShot, plan_shot};
pub use hole::{PlacementError, PlacementRules, generate_hole};
pub use physics::{StepOutcome, integrate, step};
pub use round::{Round, RoundError};
pub use shot::{AimPreview, Shot, power_scalar};
pub use state::{Axis, DragState, RoundEvent, RoundOutcome, RoundState, Viewport};
pub use tick::{Pointer, Screen, TickInput, apply_input, tick};
pub use timestep::FixedTimestep;
