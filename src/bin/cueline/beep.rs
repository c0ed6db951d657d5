//! Minimal sine beep voice with an exponential decay.
//!
//! Just enough synthesis to make the scheduler audible; the scheduling core
//! neither knows nor cares what a cue sounds like.

use cueline::io::CueMessage;

/// How long a beep rings, roughly (time to fall 60 dB).
const DECAY_SECS: f32 = 0.12;

/// Below this level a voice is spent and can be dropped.
const SILENCE_FLOOR: f32 = 1.0e-4;

pub struct BeepVoice {
    /// Absolute frame the beep starts sounding at.
    start_frame: u64,
    phase: f32,
    phase_inc: f32,
    level: f32,
    /// Per-frame level multiplier.
    /// decay^(DECAY_SECS * sample_rate) = 0.001, i.e. -60 dB over DECAY_SECS.
    decay: f32,
}

impl BeepVoice {
    pub fn new(msg: CueMessage, sample_rate: f32) -> Self {
        Self {
            start_frame: (msg.at * sample_rate as f64) as u64,
            phase: 0.0,
            phase_inc: std::f32::consts::TAU * msg.frequency / sample_rate,
            level: msg.velocity as f32 / 127.0,
            decay: 0.001_f32.powf(1.0 / (DECAY_SECS * sample_rate)),
        }
    }

    /// One mono sample for the given absolute frame. Silent until the
    /// voice's start frame arrives - this is where the lookahead margin
    /// turns back into sample accuracy.
    pub fn render_frame(&mut self, frame: u64) -> f32 {
        if frame < self.start_frame {
            return 0.0;
        }

        let sample = self.phase.sin() * self.level * 0.5;
        self.phase += self.phase_inc;
        if self.phase >= std::f32::consts::TAU {
            self.phase -= std::f32::consts::TAU;
        }
        self.level *= self.decay;
        sample
    }

    pub fn is_active(&self) -> bool {
        self.level > SILENCE_FLOOR
    }
}
