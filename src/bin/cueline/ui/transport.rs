//! Transport bar widget - shows play state, position, cursor, and clock info

use cueline::engine::{PlayState, TransportSnapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::UiInit;

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    init: &UiInit,
    snapshot: &TransportSnapshot,
) {
    let block = Block::default().title(" cueline ").borders(Borders::ALL);

    let (symbol, label, color) = match snapshot.state {
        PlayState::Playing => ("▶", "Playing", Color::Green),
        PlayState::Paused => ("⏸", "Paused", Color::Yellow),
        PlayState::Stopped => ("■", "Stopped", Color::Red),
    };

    // Position only means something relative to the current start offset.
    let position = snapshot.position_secs().max(0.0);

    // Format sample rate nicely (e.g., 48000 -> "48kHz")
    let sample_rate_khz = init.sample_rate / 1000.0;

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", init.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{} {}  ", symbol, label), Style::default().fg(color)),
        Span::styled(
            format!("{:.2}s / {:.2}s  ", position, init.span_secs),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("cue {}/{}  ", snapshot.cursor, snapshot.cue_count),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("clock {:.2}s  ", snapshot.clock_now),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz", sample_rate_khz),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
