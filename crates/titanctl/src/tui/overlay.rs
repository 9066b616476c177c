//! Document overlay drawn with ratatui on the alternate screen
//!
//! Showing the overlay switches to the alternate screen, so the main
//! terminal stream underneath is left untouched and reappears on hide.

use crate::viewer::{DocumentSurface, DocumentView};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use titan_common::{Result, TitanError};

#[derive(Default)]
pub struct RatatuiViewer {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    view: Option<DocumentView>,
    lines: Vec<String>,
    scroll: u16,
}

impl RatatuiViewer {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }
}

impl DocumentSurface for RatatuiViewer {
    fn show(&mut self, view: &DocumentView) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = leave_on_error(Terminal::new(CrosstermBackend::new(stdout)))?;
        self.terminal = Some(terminal);
        self.lines = view.lines();
        self.view = Some(view.clone());
        self.scroll = 0;
        self.redraw()
    }

    fn scroll(&mut self, delta: i32) -> Result<()> {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = next as u16;
        self.redraw()
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(terminal), Some(view)) = (self.terminal.as_mut(), self.view.as_ref()) else {
            return Ok(());
        };
        terminal.draw(|f| draw_document(f, view, &self.lines, self.scroll))?;
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            terminal.show_cursor()?;
        }
        self.view = None;
        self.lines.clear();
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }
}

/// Drop back to the main screen when overlay setup fails, so the error
/// reported on the main stream stays visible
fn leave_on_error<T>(result: io::Result<T>) -> Result<T> {
    result.map_err(|e| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        TitanError::from(e)
    })
}

fn draw_document(f: &mut Frame, view: &DocumentView, lines: &[String], scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    let body: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    let document = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", view.heading),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .style(Style::default().fg(Color::Rgb(0xff, 0xb8, 0x6c)))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(document, chunks[0]);

    let status_color = if view.status.is_alert() {
        Color::Red
    } else {
        Color::Green
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(view.status.label(), Style::default().fg(status_color)),
        Span::styled("   Esc/q close, Up/Down scroll", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_on_error_passes_success_through() {
        assert_eq!(leave_on_error(Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_leave_on_error_reports_setup_failure() {
        let failed: io::Result<()> = Err(io::Error::new(io::ErrorKind::Other, "no tty"));
        match leave_on_error(failed) {
            Err(TitanError::Io(e)) => assert_eq!(e.to_string(), "no tty"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_hidden_viewer_ignores_scroll_and_redraw() {
        let mut viewer = RatatuiViewer::new();
        assert!(viewer.redraw().is_ok());
        assert!(viewer.scroll(3).is_ok());
        assert_eq!(viewer.scroll, 0);
    }
}
