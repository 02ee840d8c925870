//! Fixed timestep accumulator
//!
//! Physics constants are per 60 Hz frame. Render loops running at any other
//! rate convert elapsed wall time into whole ticks here.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds and return how many ticks to simulate now
    pub fn push(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt > MAX_FRAME_DT {
            log::warn!("Frame took {:.3}s, clamping to {:.3}s", dt, MAX_FRAME_DT);
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }

        // Drop backlog we refused to simulate
        if ticks == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            self.accumulator %= SIM_DT;
        }
        ticks
    }

    /// Leftover fraction of a tick, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
