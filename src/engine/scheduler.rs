use crate::clock::{ClockState, TransportClock};
use crate::sequencing::{Cue, CueSheet, CueSheetError};

use super::registry::SharedOutputs;
use super::SchedulerConfig;

/*
Dual-clock lookahead scheduling
===============================

Two clocks drive playback, and neither is good at the other's job:

  poll clock    A coarse, unreliable periodic wakeup (a sleeping thread
                here). Jitter of several milliseconds is normal. Cheap to
                run, hopeless for placing sounds.

  transport     A precise reading of playback time (audio hardware frames,
  clock         or a monotonic OS clock). Exact, but nobody will call us
                back when it reaches a value - it can only be read.

The trick is to use the coarse clock only to *wake up*, and the precise
clock to decide *what is due*. On every wakeup the dispatch loop hands the
callback every cue whose fire time falls within a lookahead window measured
from the precise clock:

    cue.time + start_offset  <  clock.now() + lookahead

As long as the window is at least one poll period wide, every cue is
delivered ahead of its fire time no matter how badly the poll jitters, and
the consumer (an audio-synthesis routine, typically) can place it
sample-accurately against the same precise clock.

The loop drains *all* admitted cues in one pass, not just the next one, so
the number of wakeups needed is independent of how dense the sheet is.
*/

/// Playback state as one explicit enum, rather than two independently
/// toggled flags (clock running? poll chain armed?), so the transitions can
/// be stated - and tested - directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
}

/// Callback invoked once per dispatched cue, with the start-time offset so
/// the consumer can translate cue time into absolute clock coordinates.
pub type CueCallback<T> = Box<dyn FnMut(&Cue<T>, f64) + Send>;

/// The lookahead scheduler core.
///
/// Owns every piece of playback state: the transport clock, the sorted cue
/// sheet, the cursor marking the next undispatched cue, the start-time
/// offset captured at the last reset, and the play state. All methods are
/// synchronous; the periodic re-invocation of [`dispatch_due`] lives in
/// [`Player`](super::Player).
///
/// Invariants:
/// - the cursor is monotonically non-decreasing except across `reset()`,
///   and never exceeds the sheet length;
/// - `start_offset` is recaptured exactly once per `reset()`, never
///   mid-playback;
/// - cues reach the callback in sheet order, exactly once per start cycle.
pub struct Scheduler<T> {
    clock: Box<dyn TransportClock>,
    cues: CueSheet<T>,
    callback: CueCallback<T>,
    outputs: SharedOutputs,
    config: SchedulerConfig,
    /// Index of the next cue not yet dispatched.
    cursor: usize,
    /// Clock reading captured at the most recent reset. Cue times are
    /// relative to this.
    start_offset: f64,
    state: PlayState,
    /// Poll-chain tag. Bumped by every halt; a chain spawned under an older
    /// generation exits without dispatching.
    generation: u64,
}

impl<T> Scheduler<T> {
    pub fn new(
        clock: Box<dyn TransportClock>,
        cues: CueSheet<T>,
        callback: CueCallback<T>,
        outputs: SharedOutputs,
        config: SchedulerConfig,
    ) -> Self {
        let start_offset = clock.now();
        Self {
            clock,
            cues,
            callback,
            outputs,
            config,
            cursor: 0,
            start_offset,
            state: PlayState::Stopped,
            generation: 0,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Current reading of the transport clock.
    pub fn clock_now(&self) -> f64 {
        self.clock.now()
    }

    pub fn cues(&self) -> &CueSheet<T> {
        &self.cues
    }

    /// Append a cue during playback. The poll chain re-arms forever even
    /// with the sheet exhausted, precisely so late additions get picked up
    /// on a later pass.
    pub fn append(&mut self, cue: Cue<T>) -> Result<(), CueSheetError> {
        self.cues.push(cue)
    }

    /// Full restart: halt, rewind, capture a fresh start offset, and run
    /// one dispatch pass synchronously. Returns the number of cues the
    /// pass dispatched.
    ///
    /// Re-entrant by design: restarting mid-playback replays the whole
    /// sheet from cue 0 against the new offset.
    pub fn restart(&mut self) -> usize {
        self.halt();
        self.reset();
        self.state = PlayState::Playing;
        self.dispatch_due()
    }

    /// Stop: suspend the clock if running, halt every registered output,
    /// mark the poll chain stale. Idempotent.
    pub fn halt(&mut self) {
        if self.clock.state() == ClockState::Running {
            self.clock.suspend();
        }
        self.outputs.lock().unwrap().halt_all();
        self.state = PlayState::Stopped;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Rewind: resume the clock if suspended, cursor back to 0, recapture
    /// the start offset from the current reading.
    ///
    /// Does not change whether polling is active: from `Paused` this lands
    /// back in `Playing` (the chain never stopped ticking); from `Stopped`
    /// it stays `Stopped` with the clock running, and a later `start`
    /// captures its own offset anyway.
    pub fn reset(&mut self) {
        if self.clock.state() == ClockState::Suspended {
            self.clock.resume();
        }
        self.cursor = 0;
        self.start_offset = self.clock.now();
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    /// Toggle pause. Playing -> clock suspended -> `Paused`; paused ->
    /// clock resumed -> `Playing`. The poll chain keeps ticking either way:
    /// with the clock frozen the admission test simply stops admitting, so
    /// the queue position is preserved without touching the cursor.
    ///
    /// While `Stopped` this is a no-op - tolerated, not rejected.
    pub fn pause(&mut self) {
        match self.state {
            PlayState::Playing => {
                self.clock.suspend();
                self.state = PlayState::Paused;
            }
            PlayState::Paused => {
                self.clock.resume();
                self.state = PlayState::Playing;
            }
            PlayState::Stopped => {}
        }
    }

    /// One dispatch pass: hand the callback every cue inside the lookahead
    /// window, in order, advancing the cursor past each. Returns how many
    /// dispatched.
    ///
    /// The pass ends early at the first cue without a finite time - an
    /// explicit end marker or a non-finite reading - and the cursor parks
    /// there for good: cues beyond a marker are unreachable on every later
    /// pass too. That is the schedule's terminal condition, not an error.
    pub fn dispatch_due(&mut self) -> usize {
        let lookahead = self.config.lookahead_secs();
        let mut dispatched = 0;

        while let Some(cue) = self.cues.get(self.cursor) {
            let time = match cue.time.finite() {
                Some(t) => t,
                None => break,
            };
            // Strict <, and the clock is re-read every iteration: a long
            // pass admits cues against the freshest reading available.
            if time + self.start_offset >= self.clock.now() + lookahead {
                break;
            }
            (self.callback)(cue, self.start_offset);
            self.cursor += 1;
            dispatched += 1;
        }

        dispatched
    }
}
