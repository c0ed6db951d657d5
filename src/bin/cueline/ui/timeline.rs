//! Timeline widget - cue markers with a playhead

use cueline::engine::{PlayState, TransportSnapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::UiInit;

/// Render the cue timeline: a second ruler, a row of dispatched cues, a row
/// of pending cues, and a playhead.
pub fn render_timeline(
    frame: &mut Frame,
    area: Rect,
    init: &UiInit,
    snapshot: &TransportSnapshot,
) {
    if area.height < 4 || area.width < 20 || init.marks.is_empty() {
        return;
    }

    let width = area.width as usize;
    // Leave one trailing column so the final cue lands inside the row.
    let secs_per_char = init.span_secs.max(0.001) / (width - 1) as f64;

    let col_of = |secs: f64| -> usize { ((secs / secs_per_char) as usize).min(width - 1) };

    // Second ruler: a tick every whole second.
    let mut ruler = vec![' '; width];
    let mut sec = 0.0;
    while sec <= init.span_secs {
        let col = col_of(sec);
        ruler[col] = '|';
        sec += 1.0;
    }

    // Marker row: one cell per cue, later cues overwrite earlier ones when
    // the timeline is denser than the terminal.
    let mut dispatched_row = vec![' '; width];
    let mut pending_row = vec![' '; width];
    for (index, mark) in init.marks.iter().enumerate() {
        let glyph = if mark.accent { '●' } else { '•' };
        let col = col_of(mark.secs);
        if index < snapshot.cursor {
            dispatched_row[col] = glyph;
        } else {
            pending_row[col] = glyph;
        }
    }

    // Playhead row.
    let mut playhead_row = vec![' '; width];
    if snapshot.state != PlayState::Stopped {
        let position = snapshot.position_secs().clamp(0.0, init.span_secs);
        playhead_row[col_of(position)] = '▲';
    }

    let lines = vec![
        Line::from(Span::styled(
            ruler.iter().collect::<String>(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            dispatched_row.iter().collect::<String>(),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            pending_row.iter().collect::<String>(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            playhead_row.iter().collect::<String>(),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}
