//! Terminal backend built on ratatui/crossterm.

use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::backend::{Backend, BackendError, InputSymbol, Snapshot};
use crate::engine::{Grid, Status};

/// Interactive terminal front end.
///
/// Owns the terminal in raw mode on an alternate screen between `init` and
/// `teardown`; `read_input` blocks on the next key event.
#[derive(Debug, Default)]
pub struct TerminalBackend {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl TerminalBackend {
    /// Create a backend; the terminal is acquired by `init`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for TerminalBackend {
    fn init(&mut self) -> Result<(), BackendError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        Ok(())
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) -> Result<(), BackendError> {
        let terminal = self
            .terminal
            .as_mut()
            .ok_or_else(|| BackendError::new("terminal backend not initialized"))?;
        terminal
            .draw(|frame| ui(frame, snapshot))
            .map_err(|e| BackendError::new(e.to_string()))?;
        Ok(())
    }

    fn read_input(&mut self) -> Result<InputSymbol, BackendError> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key.code)),
            // Resize and other events surface as no-ops so the loop redraws
            _ => Ok(InputSymbol::None),
        }
    }

    fn teardown(&mut self) -> Result<(), BackendError> {
        disable_raw_mode()?;
        if let Some(terminal) = self.terminal.as_mut() {
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        }
        self.terminal = None;
        Ok(())
    }
}

/// Translate a key press into an input symbol.
fn map_key(code: KeyCode) -> InputSymbol {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => InputSymbol::Up,
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => InputSymbol::Down,
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => InputSymbol::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => InputSymbol::Right,
        KeyCode::Char('r' | 'R') => InputSymbol::Restart,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => InputSymbol::Quit,
        _ => InputSymbol::None,
    }
}

fn ui(frame: &mut Frame, snapshot: &Snapshot<'_>) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], snapshot);
    render_board(frame, chunks[1], snapshot.grid);
    render_footer(frame, chunks[2], snapshot.status);
}

fn render_header(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let status = match snapshot.status {
        Status::Playing => "PLAYING",
        Status::Won => "YOU WIN",
        Status::Lost => "GAME OVER",
    };

    let title = format!(
        " slide48 | Score: {} | Best: {} | {} ",
        snapshot.score, snapshot.high_score, status
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, area: Rect, grid: &Grid) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for row in 0..grid.size() {
        let mut spans = vec![Span::raw("  ")];
        for col in 0..grid.size() {
            let value = grid.get(row, col).unwrap_or(0);
            let (text, style) = if value == 0 {
                (
                    format!("{:>6} ", "."),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                (
                    format!("{value:>6} "),
                    Style::default()
                        .fg(tile_color(value))
                        .add_modifier(Modifier::BOLD),
                )
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Board "));

    frame.render_widget(board, area);
}

fn tile_color(value: u32) -> Color {
    match value {
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::Yellow,
        16 => Color::LightRed,
        32 => Color::Red,
        64 => Color::LightMagenta,
        128 => Color::Magenta,
        256 => Color::LightCyan,
        512 => Color::Cyan,
        1024 => Color::LightGreen,
        2048 => Color::Green,
        _ => Color::LightBlue,
    }
}

fn render_footer(frame: &mut Frame, area: Rect, status: Status) {
    let controls = if status.is_terminal() {
        " [r] New game  [q] Quit "
    } else {
        " [arrows/wasd/hjkl] Move  [r] Restart  [q] Quit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key_directions() {
        assert_eq!(map_key(KeyCode::Up), InputSymbol::Up);
        assert_eq!(map_key(KeyCode::Char('w')), InputSymbol::Up);
        assert_eq!(map_key(KeyCode::Char('k')), InputSymbol::Up);
        assert_eq!(map_key(KeyCode::Down), InputSymbol::Down);
        assert_eq!(map_key(KeyCode::Char('j')), InputSymbol::Down);
        assert_eq!(map_key(KeyCode::Left), InputSymbol::Left);
        assert_eq!(map_key(KeyCode::Char('h')), InputSymbol::Left);
        assert_eq!(map_key(KeyCode::Right), InputSymbol::Right);
        assert_eq!(map_key(KeyCode::Char('l')), InputSymbol::Right);
    }

    #[test]
    fn test_map_key_meta() {
        assert_eq!(map_key(KeyCode::Char('r')), InputSymbol::Restart);
        assert_eq!(map_key(KeyCode::Char('q')), InputSymbol::Quit);
        assert_eq!(map_key(KeyCode::Esc), InputSymbol::Quit);
        assert_eq!(map_key(KeyCode::Tab), InputSymbol::None);
        assert_eq!(map_key(KeyCode::Char('x')), InputSymbol::None);
    }

    #[test]
    fn test_tile_colors_distinct_low_values() {
        assert_ne!(tile_color(2), tile_color(4));
        assert_ne!(tile_color(1024), tile_color(2048));
    }
}
