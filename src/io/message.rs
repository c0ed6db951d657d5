#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// A dispatched cue, translated into absolute clock coordinates for an
/// audio rendering thread.
///
/// The dispatch callback runs on the poll thread; whatever actually sounds
/// runs somewhere else. This is the record that crosses over: `at` is
/// `cue.time + start_offset`, so the renderer can place the event against
/// the same transport clock the scheduler admitted it by.
#[derive(Debug, Copy, Clone)]
pub struct CueMessage {
    /// Absolute clock time the cue should sound at, in seconds.
    pub at: f64,
    /// Oscillator frequency in Hz.
    pub frequency: f32,
    /// MIDI-style velocity, 0-127.
    pub velocity: u8,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<CueMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<CueMessage> {
    fn pop(&mut self) -> Option<CueMessage> {
        Consumer::pop(self).ok()
    }
}
