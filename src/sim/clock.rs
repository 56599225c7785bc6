//! Fixed timestep accumulator
//!
//! Converts variable host frame deltas into a whole number of `SIM_DT`
//! steps so the tick and the spawner advance in lockstep.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedClock {
    accumulator: f32,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame delta; returns how many fixed steps to run now.
    ///
    /// Large deltas are clamped and the substep count is capped at
    /// `MAX_SUBSTEPS`; leftover time carries to the next frame.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Discard pending time (pause, menu)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}
