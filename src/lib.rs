pub mod clock;
pub mod engine; // Lookahead scheduling and playback transport
pub mod io;
pub mod sequencing; // Cues, cue sheets, tempo math

/// Default poll period in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 50;
/// Default lookahead window in milliseconds.
pub const DEFAULT_LOOKAHEAD_MS: u64 = 100;
