use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::clock::{TransportClock, WallClock};
use crate::sequencing::{Cue, CueSheet, CueSheetError};

use super::registry::{OutputRegistry, SharedOutputs};
use super::scheduler::{CueCallback, PlayState, Scheduler};
use super::SchedulerConfig;

/// Playback transport: a [`Scheduler`] plus the poll chain that re-invokes
/// its dispatch loop every `interval`.
///
/// The chain is a thread that sleeps, locks the scheduler, runs one
/// dispatch pass, and repeats - the coarse half of the dual-clock design.
/// Each chain is tagged with the scheduler generation it was spawned under:
/// a chain that wakes to find its generation stale (any halt bumps it)
/// exits without dispatching. Cancellation is therefore best-effort but
/// harmless - a rapid stop/start leaves the old chain at most one silent
/// wakeup before it winds down, and the restarted playback never sees a
/// duplicate pass.
///
/// All shared state lives behind one mutex; control calls and poll ticks
/// serialize through it. The dispatch callback runs under that lock, so it
/// must not call back into the `Player` - hand work off (a ring buffer, a
/// channel) and return.
pub struct Player<T> {
    core: Arc<Mutex<Scheduler<T>>>,
}

impl<T: Send + 'static> Player<T> {
    pub fn new(scheduler: Scheduler<T>) -> Self {
        Self {
            core: Arc::new(Mutex::new(scheduler)),
        }
    }

    pub fn builder() -> PlayerBuilder<T> {
        PlayerBuilder::new()
    }

    /// Start playback from the top: stop whatever was playing, rewind,
    /// capture a fresh start offset, dispatch the first window
    /// synchronously, and arm a new poll chain. Re-entrant.
    pub fn start(&mut self) {
        let (generation, interval) = {
            let mut core = self.core.lock().unwrap();
            core.restart();
            (core.generation(), core.config().interval)
        };

        let core = Arc::clone(&self.core);
        thread::spawn(move || poll_chain(core, generation, interval));
    }

    /// Stop playback: suspend the clock, halt every registered output,
    /// mark the poll chain stale. Idempotent.
    pub fn stop(&mut self) {
        self.core.lock().unwrap().halt();
    }

    /// Toggle pause. See [`Scheduler::pause`].
    pub fn pause(&mut self) {
        self.core.lock().unwrap().pause();
    }

    /// Rewind without touching the poll chain. See [`Scheduler::reset`].
    pub fn reset(&mut self) {
        self.core.lock().unwrap().reset();
    }

    /// Append a cue mid-playback; picked up by a later poll pass.
    pub fn append(&mut self, cue: Cue<T>) -> Result<(), CueSheetError> {
        self.core.lock().unwrap().append(cue)
    }

    pub fn state(&self) -> PlayState {
        self.core.lock().unwrap().state()
    }

    /// Consistent snapshot of the transport for display.
    pub fn snapshot(&self) -> TransportSnapshot {
        let core = self.core.lock().unwrap();
        TransportSnapshot {
            state: core.state(),
            cursor: core.cursor(),
            cue_count: core.len(),
            clock_now: core.clock_now(),
            start_offset: core.start_offset(),
        }
    }
}

impl<T> Drop for Player<T> {
    fn drop(&mut self) {
        // Wind the chain down; it exits on its next wakeup.
        if let Ok(mut core) = self.core.lock() {
            core.halt();
        }
    }
}

/// The poll chain: sleep, dispatch, re-arm, forever.
///
/// Deliberately re-arms even when the sheet is exhausted - appended cues
/// must still be picked up - so only a halt (stale generation or `Stopped`
/// state) ends it.
fn poll_chain<T>(core: Arc<Mutex<Scheduler<T>>>, generation: u64, interval: Duration) {
    loop {
        thread::sleep(interval);
        let mut core = core.lock().unwrap();
        if core.generation() != generation || core.state() == PlayState::Stopped {
            return;
        }
        core.dispatch_due();
    }
}

/// Transport state at one instant, for UIs and logging.
#[derive(Debug, Clone, Copy)]
pub struct TransportSnapshot {
    pub state: PlayState,
    /// Next undispatched cue index.
    pub cursor: usize,
    pub cue_count: usize,
    /// Transport clock reading, in absolute clock seconds.
    pub clock_now: f64,
    pub start_offset: f64,
}

impl TransportSnapshot {
    /// Playback position in cue-sheet seconds (clock minus start offset).
    pub fn position_secs(&self) -> f64 {
        self.clock_now - self.start_offset
    }
}

/// Construction configuration for a [`Player`].
///
/// Everything is optional: the clock defaults to a [`WallClock`], the
/// callback to a no-op, the sheet to empty (append later), the registry to
/// a fresh one.
pub struct PlayerBuilder<T> {
    config: SchedulerConfig,
    cues: CueSheet<T>,
    callback: Option<CueCallback<T>>,
    clock: Option<Box<dyn TransportClock>>,
    outputs: Option<SharedOutputs>,
}

impl<T: Send + 'static> PlayerBuilder<T> {
    fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            cues: CueSheet::new(),
            callback: None,
            clock: None,
            outputs: None,
        }
    }

    /// Poll period in milliseconds (default 50).
    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.config.interval = Duration::from_millis(ms);
        self
    }

    /// Lookahead window in milliseconds (default 100). Keep it at or above
    /// the interval for gap-free coverage.
    pub fn lookahead_ms(mut self, ms: u64) -> Self {
        self.config.lookahead = Duration::from_millis(ms);
        self
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cues(mut self, cues: CueSheet<T>) -> Self {
        self.cues = cues;
        self
    }

    /// The dispatch callback. Runs on the poll thread, under the scheduler
    /// lock; keep it short and never call back into the `Player`.
    pub fn on_cue(mut self, callback: impl FnMut(&Cue<T>, f64) + Send + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn clock(mut self, clock: impl TransportClock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn outputs(mut self, outputs: SharedOutputs) -> Self {
        self.outputs = Some(outputs);
        self
    }

    pub fn build(self) -> Player<T> {
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(WallClock::new()) as Box<dyn TransportClock>);
        let callback: CueCallback<T> = self.callback.unwrap_or_else(|| Box::new(|_, _| {}));
        let outputs = self.outputs.unwrap_or_else(OutputRegistry::shared);
        Player::new(Scheduler::new(
            clock,
            self.cues,
            callback,
            outputs,
            self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder_defaults() {
        let player: Player<u8> = Player::builder().build();
        assert_eq!(player.state(), PlayState::Stopped);

        let snap = player.snapshot();
        assert_eq!(snap.cursor, 0);
        assert_eq!(snap.cue_count, 0);
    }

    #[test]
    fn test_manual_clock_player_dispatches_nothing_until_started() {
        let clock = ManualClock::new();
        let dispatched = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&dispatched);

        let _player = Player::builder()
            .clock(clock.clone())
            .cues(CueSheet::from_sorted(vec![Cue::at(0.0, ())]).unwrap())
            .on_cue(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        clock.advance(10.0);
        assert_eq!(dispatched.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_snapshot_position() {
        let snap = TransportSnapshot {
            state: PlayState::Playing,
            cursor: 0,
            cue_count: 0,
            clock_now: 5.25,
            start_offset: 5.0,
        };
        assert_eq!(snap.position_secs(), 0.25);
    }
}
