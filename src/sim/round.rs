//! Round lifecycle
//!
//! [`Round`] owns the single [`RoundState`], the tuning and the seeded hole
//! generator. It starts the first round on construction and starts a new one
//! whenever the player asks to play again.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::hole::{PlacementError, generate_hole};
use super::state::{DragState, RoundEvent, RoundOutcome, RoundState, Viewport};
use super::tick::{TickInput, apply_input, run_physics, tick};
use super::timestep::FixedTimestep;
use crate::tuning::{Tuning, TuningError};

/// Why a round could not be set up
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error(transparent)]
    Tuning(#[from] TuningError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

#[derive(Debug, Clone)]
pub struct Round {
    pub state: RoundState,
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    viewport: Viewport,
    clock: FixedTimestep,
    rounds_started: u32,
}

impl Round {
    /// Validate the tuning, seed the generator and place the first hole
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Result<Self, RoundError> {
        tuning.validate()?;
        let hole = tuning.ball_start;
        let mut round = Self {
            state: RoundState::new(tuning.ball_start, hole),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            clock: FixedTimestep::new(),
            rounds_started: 0,
        };
        round.reset_round()?;
        Ok(round)
    }

    /// Seeded from the wall clock
    pub fn with_time_seed(tuning: Tuning, viewport: Viewport) -> Result<Self, RoundError> {
        Self::new(crate::time_seed(), tuning, viewport)
    }

    /// New hole, ball back on the tee, strokes cleared
    pub fn reset_round(&mut self) -> Result<(), PlacementError> {
        let rules = self.tuning.placement_rules();
        let hole = generate_hole(&mut self.rng, self.viewport, &rules)?;

        self.state = RoundState::new(self.tuning.ball_start, hole);
        self.clock.reset();
        self.rounds_started += 1;

        log::info!(
            "Round {} started: hole at ({:.0}, {:.0})",
            self.rounds_started,
            hole.x,
            hole.y
        );
        Ok(())
    }

    /// One frame at the tuned rate
    pub fn tick(&mut self, input: &TickInput) -> Vec<RoundEvent> {
        self.viewport = input.viewport;
        tick(&mut self.state, input, &self.tuning)
    }

    /// Feed `dt` seconds of wall time.
    ///
    /// Pointer edges are applied as soon as they arrive, even on frames too
    /// short to produce a physics tick.
    pub fn advance(&mut self, input: &TickInput, dt: f32) -> Vec<RoundEvent> {
        self.viewport = input.viewport;
        let mut events = apply_input(&mut self.state, input, &self.tuning);

        for _ in 0..self.clock.push(dt) {
            run_physics(&mut self.state, &self.tuning, self.viewport, 1, &mut events);
        }
        events
    }

    pub fn is_won(&self) -> bool {
        self.state.sunk
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.state.outcome()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.drag != DragState::Idle
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Takes effect on the next reset
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }
}
