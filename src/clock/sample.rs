use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{ClockState, TransportClock};

/// Writer half of a [`SampleClock`]: the audio callback advances this once
/// per rendered block.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    frames: Arc<AtomicU64>,
}

impl FrameCounter {
    /// Record `frames` more rendered frames.
    pub fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::Relaxed);
    }

    /// Total frames recorded so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

/// Clock derived from frames an audio callback has rendered.
///
/// The reading is `frames / sample_rate`, which tracks the device's own
/// crystal rather than the OS scheduler: time as the hardware has actually
/// played it.
///
/// The counter usually keeps running while the clock is suspended (an output
/// stream does not stop rendering just because playback paused), so suspend
/// snapshots the reading and resume subtracts the frames that accrued in
/// between. The reading therefore freezes exactly and continues with no
/// jump.
#[derive(Debug)]
pub struct SampleClock {
    frames: Arc<AtomicU64>,
    sample_rate: f64,
    state: ClockState,
    /// Frames to subtract from the raw counter (accrued while suspended).
    skew: u64,
    /// Raw counter value captured at suspend.
    raw_at_suspend: u64,
    /// Reading captured at suspend.
    frozen: f64,
}

impl SampleClock {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
            state: ClockState::Running,
            skew: 0,
            raw_at_suspend: 0,
            frozen: 0.0,
        }
    }

    /// Handle for the rendering thread to advance the counter.
    pub fn frame_counter(&self) -> FrameCounter {
        FrameCounter {
            frames: Arc::clone(&self.frames),
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn raw(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl TransportClock for SampleClock {
    fn now(&self) -> f64 {
        match self.state {
            ClockState::Running => (self.raw() - self.skew) as f64 / self.sample_rate,
            ClockState::Suspended => self.frozen,
        }
    }

    fn state(&self) -> ClockState {
        self.state
    }

    fn suspend(&mut self) {
        if self.state == ClockState::Running {
            self.raw_at_suspend = self.raw();
            self.frozen = (self.raw_at_suspend - self.skew) as f64 / self.sample_rate;
            self.state = ClockState::Suspended;
        }
    }

    fn resume(&mut self) {
        if self.state == ClockState::Suspended {
            // Everything the counter accrued during suspension is skew.
            self.skew += self.raw() - self.raw_at_suspend;
            self.state = ClockState::Running;
        }
    }
}
