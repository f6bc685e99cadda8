//! Full-screen dialogs backing the terminal selector: a list picker for
//! columns and rows, and a one-line text input for cell values.

use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use csvsh_config::ColorScheme;

use crate::prompt::LineBuffer;
use crate::util;

/// Result of feeding one key to a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Submit(String),
    Cancel,
}

trait Dialog {
    fn handle_key(&mut self, key: KeyEvent) -> Option<DialogResult>;
    fn draw(&mut self, frame: &mut Frame, palette: &Palette);
}

/// Ratatui colors derived from a color scheme.
struct Palette {
    bg: Color,
    border: Color,
    title: Color,
    text: Color,
    highlight: Color,
}

impl Palette {
    fn from_scheme(scheme: &ColorScheme) -> Self {
        let rgb = |c: Option<csvsh_config::Color>, fallback: Color| {
            c.map(|c| Color::Rgb(c.r, c.g, c.b)).unwrap_or(fallback)
        };
        Self {
            bg: rgb(scheme.bg_color(), Color::Black),
            border: rgb(scheme.border_color(), Color::DarkGray),
            title: rgb(scheme.title_color(), Color::Cyan),
            text: rgb(scheme.text_color(), Color::Gray),
            highlight: rgb(scheme.highlight_color(), Color::White),
        }
    }
}

// ============================================================================
// List picker
// ============================================================================

pub struct ListPicker {
    title: String,
    items: Vec<String>,
    cursor: usize,
    scroll: usize,
}

impl ListPicker {
    pub fn new(title: impl Into<String>, items: &[String]) -> Self {
        Self { title: title.into(), items: items.to_vec(), cursor: 0, scroll: 0 }
    }

    pub fn selected(&self) -> Option<&str> {
        self.items.get(self.cursor).map(String::as_str)
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }

    fn ensure_visible(&mut self, visible: usize) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        if visible > 0 && self.cursor >= self.scroll + visible {
            self.scroll = self.cursor + 1 - visible;
        }
    }
}

impl Dialog for ListPicker {
    fn handle_key(&mut self, key: KeyEvent) -> Option<DialogResult> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Some(DialogResult::Cancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(DialogResult::Cancel)
            }
            KeyCode::Enter => {
                return Some(match self.selected() {
                    Some(item) => DialogResult::Submit(item.to_string()),
                    None => DialogResult::Cancel,
                })
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = self.items.len().saturating_sub(1),
            _ => {}
        }
        None
    }

    fn draw(&mut self, frame: &mut Frame, palette: &Palette) {
        let area = frame.area();
        let widest = self.items.iter().map(|s| util::display_width(s)).max().unwrap_or(0);
        let width = (widest.max(self.title.len()) + 8).clamp(24, 72) as u16;
        let height = (self.items.len() + 2).clamp(3, 20) as u16;
        let popup = util::centered(area, width, height);

        let visible = popup.height.saturating_sub(2) as usize;
        self.ensure_visible(visible);
        let inner_width = popup.width.saturating_sub(4) as usize;

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible)
            .map(|(i, item)| {
                let marker = if i == self.cursor { "(*) " } else { "( ) " };
                let text = util::pad_right(item, inner_width.saturating_sub(marker.len()));
                let style = if i == self.cursor {
                    Style::default().fg(palette.bg).bg(palette.highlight).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.text)
                };
                Line::from(vec![Span::styled(marker, style), Span::styled(text, style)])
            })
            .collect();

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block(&self.title, palette)), popup);
    }
}

// ============================================================================
// Text input
// ============================================================================

pub struct InputDialog {
    title: String,
    buffer: LineBuffer,
}

impl InputDialog {
    pub fn new(title: impl Into<String>, initial: Option<&str>) -> Self {
        Self { title: title.into(), buffer: LineBuffer::with_text(initial.unwrap_or("")) }
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }
}

impl Dialog for InputDialog {
    fn handle_key(&mut self, key: KeyEvent) -> Option<DialogResult> {
        match key.code {
            KeyCode::Esc => Some(DialogResult::Cancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(DialogResult::Cancel)
            }
            KeyCode::Enter => Some(DialogResult::Submit(self.buffer.text())),
            _ => {
                self.buffer.edit(&key);
                None
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame, palette: &Palette) {
        let area = frame.area();
        let width = (self.title.len() + 8).clamp(40, 72) as u16;
        let popup = util::centered(area, width, 3);
        let inner = Rect::new(popup.x + 1, popup.y + 1, popup.width.saturating_sub(2), 1);

        // Scroll horizontally so the cursor stays inside the box
        let chars = self.buffer.chars();
        let cursor = self.buffer.cursor();
        let room = inner.width.saturating_sub(1) as usize;
        let mut start = 0;
        while util::chars_width(&chars[start..], cursor - start) > room {
            start += 1;
        }
        let shown: String = chars[start..].iter().collect();

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(shown, Style::default().fg(palette.highlight))))
                .block(block(&self.title, palette)),
            popup,
        );
        let x = inner.x + util::chars_width(&chars[start..], cursor - start) as u16;
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

fn block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(palette.title).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(palette.bg))
}

/// Let the user pick one of `items`. `Ok(None)` means cancelled.
pub fn pick(title: &str, items: &[String], scheme: &ColorScheme) -> Result<Option<String>, String> {
    if items.is_empty() {
        return Ok(None);
    }
    run_dialog(ListPicker::new(title, items), scheme)
}

/// Ask for a line of text, optionally pre-filled. `Ok(None)` means cancelled.
pub fn input(title: &str, initial: Option<&str>, scheme: &ColorScheme) -> Result<Option<String>, String> {
    run_dialog(InputDialog::new(title, initial), scheme)
}

fn run_dialog(mut dialog: impl Dialog, scheme: &ColorScheme) -> Result<Option<String>, String> {
    let palette = Palette::from_scheme(scheme);

    terminal::enable_raw_mode()
        .map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        terminal
            .draw(|frame| dialog.draw(frame, &palette))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("event poll error: {}", e))?
        {
            if let Event::Key(key) =
                event::read().map_err(|e| format!("event read error: {}", e))?
            {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match dialog.handle_key(key) {
                    Some(DialogResult::Submit(value)) => return Ok(Some(value)),
                    Some(DialogResult::Cancel) => return Ok(None),
                    None => {}
                }
            }
        }
    }
}
