//! Static display state, captured once before the stream starts.
//!
//! Everything that changes per frame comes from the player's
//! `TransportSnapshot` instead.

/// One cue's place on the timeline.
#[derive(Clone, Copy, Debug)]
pub struct CueMark {
    /// Fire time in cue-sheet seconds.
    pub secs: f64,
    /// Accented (downbeat) cues draw brighter.
    pub accent: bool,
}

/// Static state sent once at initialization
#[derive(Clone)]
pub struct UiInit {
    /// Tempo in BPM
    pub bpm: f64,
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Fire time of the last cue, for scaling the timeline
    pub span_secs: f64,
    /// Every cue with a finite fire time
    pub marks: Vec<CueMark>,
}
