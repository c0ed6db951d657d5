//! Cueline - main application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cueline::{
    clock::SampleClock,
    engine::{OutputRegistry, Player},
    io::{CueMessage, MessageReceiver},
    sequencing::{Cue, CueSheet, Tempo},
};

use super::beep::BeepVoice;
use super::ui::{CueMark, UiApp, UiInit};

/// What each metronome cue carries: pitch and weight of the click.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    pub frequency: f32,
    pub velocity: u8,
}

/// Main application builder
pub struct Cueline {
    bpm: f64,
    bars: u32,
    beats_per_bar: u32,
}

impl Cueline {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            bars: 8,
            beats_per_bar: 4,
        }
    }

    /// Set the tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// How many bars of clicks to schedule
    pub fn bars(mut self, bars: u32) -> Self {
        self.bars = bars;
        self
    }

    pub fn beats_per_bar(mut self, beats: u32) -> Self {
        self.beats_per_bar = beats;
        self
    }

    /// Lay out the click track: accented downbeats, plain offbeats.
    fn build_sheet(&self) -> CueSheet<Pulse> {
        let tempo = Tempo::new(self.bpm);
        let mut sheet = CueSheet::new();

        for beat in 0..self.bars * self.beats_per_bar {
            let accent = beat % self.beats_per_bar == 0;
            let pulse = Pulse {
                frequency: if accent { 880.0 } else { 440.0 },
                velocity: if accent { 127 } else { 96 },
            };
            // Times come out of the grid already ascending, so push cannot
            // fail here.
            sheet
                .push(Cue::at(tempo.beats(beat as f64), pulse))
                .expect("grid times are ascending");
        }

        sheet
    }

    /// Run the application (takes over, plays audio and the TUI)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let sheet = self.build_sheet();

        // The precise clock: frames the device has actually rendered.
        let clock = SampleClock::new(sample_rate as f64);
        let counter = clock.frame_counter();

        // Dispatched cues cross to the audio thread through this ring.
        let (mut cue_tx, mut cue_rx) = rtrb::RingBuffer::<CueMessage>::new(256);

        // Halt handle: stop() raises the flag, the audio callback clears
        // its voices on the next block.
        let killed = Arc::new(AtomicBool::new(false));
        let outputs = OutputRegistry::shared();
        {
            let killed = Arc::clone(&killed);
            outputs.lock().unwrap().register(move || {
                killed.store(true, Ordering::Relaxed);
            });
        }

        // UI reads the sheet shape once, up front.
        let ui_init = UiInit {
            bpm: self.bpm,
            sample_rate,
            span_secs: sheet.span(),
            marks: sheet
                .iter()
                .filter_map(|cue| {
                    cue.time.finite().map(|secs| CueMark {
                        secs,
                        accent: cue.payload.velocity >= 127,
                    })
                })
                .collect(),
        };

        // The scheduler hands each cue over in absolute clock coordinates;
        // a full ring drops the click rather than blocking the poll thread.
        let mut player = Player::builder()
            .cues(sheet)
            .clock(clock)
            .outputs(outputs)
            .on_cue(move |cue: &Cue<Pulse>, offset| {
                if let Some(secs) = cue.time.finite() {
                    let _ = cue_tx.push(CueMessage {
                        at: secs + offset,
                        frequency: cue.payload.frequency,
                        velocity: cue.payload.velocity,
                    });
                }
            })
            .build();

        // Audio callback: advance the clock, drain the ring into voices,
        // render mono fanned out to every channel.
        let mut voices: Vec<BeepVoice> = Vec::new();
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let frames = (data.len() / channels) as u64;
                let first_frame = counter.frames();

                if killed.swap(false, Ordering::Relaxed) {
                    voices.clear();
                }
                while let Some(msg) = MessageReceiver::pop(&mut cue_rx) {
                    voices.push(BeepVoice::new(msg, sample_rate));
                }

                for i in 0..frames {
                    let mut sample = 0.0f32;
                    for voice in voices.iter_mut() {
                        sample += voice.render_frame(first_frame + i);
                    }
                    let out_off = i as usize * channels;
                    for ch in 0..channels {
                        data[out_off + ch] = sample;
                    }
                }

                voices.retain(|v| v.is_active());
                counter.advance(frames);
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;

        stream.play()?;
        player.start();

        // Hand the terminal to the UI until the user quits.
        let mut terminal = ratatui::init();
        let result = UiApp::new(ui_init).run(&mut terminal, &mut player);
        ratatui::restore();

        player.stop();
        result
    }
}

impl Default for Cueline {
    fn default() -> Self {
        Self::new()
    }
}
