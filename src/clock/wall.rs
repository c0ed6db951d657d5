use std::time::Instant;

use super::{ClockState, TransportClock};

/// Realtime clock backed by [`Instant`].
///
/// While running, the reading is the accrued total plus the time elapsed
/// since the last resume. Suspending folds the elapsed span into the total,
/// so the reading freezes; resuming restarts the span from zero and the
/// reading continues without a jump.
#[derive(Debug, Clone)]
pub struct WallClock {
    /// Instant of the last resume (meaningful only while running).
    origin: Instant,
    /// Seconds accrued across previous running spans.
    accrued: f64,
    state: ClockState,
}

impl WallClock {
    /// Create a running clock at reading 0.0.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            accrued: 0.0,
            state: ClockState::Running,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportClock for WallClock {
    fn now(&self) -> f64 {
        match self.state {
            ClockState::Running => self.accrued + self.origin.elapsed().as_secs_f64(),
            ClockState::Suspended => self.accrued,
        }
    }

    fn state(&self) -> ClockState {
        self.state
    }

    fn suspend(&mut self) {
        if self.state == ClockState::Running {
            self.accrued += self.origin.elapsed().as_secs_f64();
            self.state = ClockState::Suspended;
        }
    }

    fn resume(&mut self) {
        if self.state == ClockState::Suspended {
            self.origin = Instant::now();
            self.state = ClockState::Running;
        }
    }
}
