//! cueline - lookahead scheduling demo
//!
//! A metronome that schedules beep cues through the lookahead scheduler and
//! renders them sample-accurately against the audio device's own clock.
//! Run with: cargo run

mod app;
mod beep;
mod ui;

use app::Cueline;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    Cueline::new()
        .bpm(120.0)
        .bars(8)
        .beats_per_bar(4)
        .run()
}
