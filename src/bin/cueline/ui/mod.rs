//! TUI module for cueline
//!
//! Shows the transport state and the cue timeline while the scheduler runs,
//! and forwards transport keys to the player.

pub mod state;
mod timeline;
mod transport;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use cueline::engine::{Player, TransportSnapshot};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders},
    DefaultTerminal, Frame,
};
use std::time::Duration;

pub use state::{CueMark, UiInit};

use timeline::render_timeline;
use transport::render_transport;

use super::app::Pulse;

/// UI application state
pub struct UiApp {
    init: UiInit,
    should_quit: bool,
}

impl UiApp {
    pub fn new(init: UiInit) -> Self {
        Self {
            init,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        player: &mut Player<Pulse>,
    ) -> EyreResult<()> {
        while !self.should_quit {
            let snapshot = player.snapshot();

            terminal.draw(|frame| self.render(frame, &snapshot))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, player);
                    }
                }
            }
        }

        Ok(())
    }

    /// Map transport keys onto player operations
    fn handle_key(&mut self, key: KeyCode, player: &mut Player<Pulse>) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => player.pause(),
            KeyCode::Enter => player.start(),
            KeyCode::Char('s') | KeyCode::Char('S') => player.stop(),
            KeyCode::Char('r') | KeyCode::Char('R') => player.reset(),
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame, snapshot: &TransportSnapshot) {
        let area = frame.area();

        // Main layout: transport, timeline, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(4),    // Timeline
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.init, snapshot);

        let timeline_block = Block::default().title(" Cues ").borders(Borders::ALL);
        let timeline_inner = timeline_block.inner(chunks[1]);
        frame.render_widget(timeline_block, chunks[1]);
        render_timeline(frame, timeline_inner, &self.init, snapshot);

        let help = ratatui::widgets::Paragraph::new(
            " [Q] Quit  [Space] Pause/Resume  [Enter] Restart  [S] Stop  [R] Rewind",
        )
        .style(ratatui::style::Style::default().fg(ratatui::style::Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
