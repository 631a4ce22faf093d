use territory_core::{Intent, MatchState, IDLE};

/// Cells to drop between horizontal passes of the sweep pilot.
const SWEEP_STRIDE_CELLS: f64 = 3.0;

/// Scripted stand-in for the human player.
pub enum Pilot {
    Idle,
    /// Boustrophedon passes across the arena, bouncing off the top and bottom.
    Sweep(Sweep),
}

pub struct Sweep {
    horizontal: i32,
    vertical: i32,
    descend_from: Option<f64>,
}

impl Pilot {
    pub fn next_intent(&mut self, state: &MatchState) -> Intent {
        match self {
            Pilot::Idle => IDLE,
            Pilot::Sweep(sweep) => sweep.next_intent(state),
        }
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            horizontal: 1,
            vertical: 1,
            descend_from: None,
        }
    }
}

impl Sweep {
    fn next_intent(&mut self, state: &MatchState) -> Intent {
        let Some(h) = state.agents.iter().find(|a| a.is_human()) else {
            return IDLE;
        };
        if h.respawning || h.frozen {
            self.descend_from = None;
            return IDLE;
        }
        let cols = state.grid.cols() as f64;
        let rows = state.grid.rows() as f64;

        if let Some(start_y) = self.descend_from {
            if (h.y - start_y).abs() < SWEEP_STRIDE_CELLS {
                if (self.vertical > 0 && h.y >= rows - 1.0) || (self.vertical < 0 && h.y <= 1.0) {
                    self.vertical = -self.vertical;
                }
                return Intent::new(0, self.vertical);
            }
            self.descend_from = None;
        }

        let at_edge = (self.horizontal > 0 && h.x >= cols - 1.5) || (self.horizontal < 0 && h.x <= 1.5);
        if at_edge {
            self.horizontal = -self.horizontal;
            self.descend_from = Some(h.y);
            return Intent::new(0, self.vertical);
        }
        Intent::new(self.horizontal, 0)
    }
}
