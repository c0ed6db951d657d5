use std::sync::{Arc, Mutex};

use super::{ClockState, TransportClock};

#[derive(Debug)]
struct Inner {
    elapsed: f64,
    state: ClockState,
}

/// A clock advanced explicitly by the caller.
///
/// Time accrues only through [`advance`](ManualClock::advance) and only while
/// running, which makes scheduling tests fully deterministic: a suspended
/// manual clock stays frozen no matter how often it is "advanced".
///
/// Clones are handles to the same clock, so a test can keep one handle to
/// drive time while the scheduler owns the other.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<Inner>>,
}

impl ManualClock {
    /// Create a running clock at reading 0.0.
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Create a running clock at an arbitrary reading.
    pub fn starting_at(secs: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                elapsed: secs,
                state: ClockState::Running,
            })),
        }
    }

    /// Move the reading forward by `secs`. Ignored while suspended.
    pub fn advance(&self, secs: f64) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == ClockState::Running {
            inner.elapsed += secs;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportClock for ManualClock {
    fn now(&self) -> f64 {
        self.inner.lock().unwrap().elapsed
    }

    fn state(&self) -> ClockState {
        self.inner.lock().unwrap().state
    }

    fn suspend(&mut self) {
        self.inner.lock().unwrap().state = ClockState::Suspended;
    }

    fn resume(&mut self) {
        self.inner.lock().unwrap().state = ClockState::Running;
    }
}
