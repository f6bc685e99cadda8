//! Line editor for the interactive prompt.
//!
//! Runs in crossterm raw mode for the duration of one `read_line` call so
//! that Alt chords can be bound to actions without waiting for Enter.

use std::io::{self, stdout, Write};

use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use csvsh_config::{KeyAction, KeyBindings, Modifier};

use crate::util;

pub const PROMPT: &str = ">>> ";

/// What ended a `read_line` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Line(String),
    Action(KeyAction),
    /// Ctrl-C: the line was discarded
    Interrupt,
    /// Ctrl-D on an empty line
    Eof,
}

/// Editable text with a cursor, in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Return the text and leave the buffer empty.
    pub fn take(&mut self) -> String {
        let text = self.text();
        self.clear();
        text
    }

    /// Apply an editing key. Returns false when the key is not an edit.
    pub fn edit(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return false,
        }
        true
    }
}

pub struct Prompt {
    bindings: KeyBindings,
    buffer: LineBuffer,
    color: Option<Color>,
}

impl Prompt {
    pub fn new(bindings: KeyBindings, color: Option<Color>) -> Self {
        Self { bindings, buffer: LineBuffer::new(), color }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Feed one key. `Some` ends the current `read_line`.
    ///
    /// A bound chord leaves the typed text in place so the line can be
    /// finished after the action runs.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PromptEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if let KeyCode::Char(c) = key.code {
            if key.modifiers.contains(KeyModifiers::ALT) {
                return self.bindings.action_for(Modifier::Alt, c).map(PromptEvent::Action);
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                if let Some(action) = self.bindings.action_for(Modifier::Ctrl, c) {
                    return Some(PromptEvent::Action(action));
                }
                return match c {
                    'c' => {
                        self.buffer.clear();
                        Some(PromptEvent::Interrupt)
                    }
                    'd' if self.buffer.is_empty() => Some(PromptEvent::Eof),
                    'd' => {
                        self.buffer.delete();
                        None
                    }
                    'a' => {
                        self.buffer.home();
                        None
                    }
                    'e' => {
                        self.buffer.end();
                        None
                    }
                    'u' => {
                        self.buffer.clear();
                        None
                    }
                    _ => None,
                };
            }
        }

        if key.code == KeyCode::Enter {
            return Some(PromptEvent::Line(self.buffer.take()));
        }
        self.buffer.edit(&key);
        None
    }

    /// Read keys until a line, an action, Ctrl-C or Ctrl-D.
    pub fn read_line(&mut self) -> io::Result<PromptEvent> {
        terminal::enable_raw_mode()?;

        struct Cleanup;
        impl Drop for Cleanup {
            fn drop(&mut self) {
                let _ = terminal::disable_raw_mode();
            }
        }
        let _cleanup = Cleanup;

        let mut out = stdout();
        loop {
            self.draw(&mut out)?;
            if let Event::Key(key) = event::read()? {
                if let Some(event) = self.handle_key(key) {
                    queue!(out, Print("\r\n"))?;
                    out.flush()?;
                    return Ok(event);
                }
            }
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let text = self.buffer.text();
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        match self.color {
            Some(color) => queue!(out, SetForegroundColor(color), Print(PROMPT), ResetColor)?,
            None => queue!(out, Print(PROMPT))?,
        }
        let column = util::display_width(PROMPT)
            + util::chars_width(self.buffer.chars(), self.buffer.cursor());
        queue!(
            out,
            Print(text),
            MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX))
        )?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chord(modifiers: KeyModifiers, c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), modifiers)
    }

    fn typed(prompt: &mut Prompt, text: &str) {
        for c in text.chars() {
            assert_eq!(prompt.handle_key(key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn buffer_edits_at_cursor() {
        let mut b = LineBuffer::with_text("ac");
        b.left();
        b.insert('b');
        assert_eq!(b.text(), "abc");
        b.home();
        b.delete();
        assert_eq!(b.text(), "bc");
        b.end();
        b.backspace();
        assert_eq!(b.text(), "b");
        b.backspace();
        b.backspace();
        assert!(b.is_empty());
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn enter_returns_the_line() {
        let mut p = Prompt::new(KeyBindings::default(), None);
        typed(&mut p, "ls row");
        assert_eq!(p.handle_key(key(KeyCode::Enter)), Some(PromptEvent::Line("ls row".into())));
        assert!(p.buffer().is_empty());
    }

    #[test]
    fn alt_chords_map_to_actions_and_keep_text() {
        let mut p = Prompt::new(KeyBindings::default(), None);
        typed(&mut p, "cell");
        assert_eq!(
            p.handle_key(chord(KeyModifiers::ALT, 'h')),
            Some(PromptEvent::Action(KeyAction::Help))
        );
        assert_eq!(p.buffer().text(), "cell");
        assert_eq!(p.handle_key(chord(KeyModifiers::ALT, 'z')), None);
    }

    #[test]
    fn ctrl_c_discards_ctrl_d_exits_on_empty() {
        let mut p = Prompt::new(KeyBindings::default(), None);
        typed(&mut p, "x");
        assert_eq!(p.handle_key(key(KeyCode::Left)), None);
        assert_eq!(p.handle_key(chord(KeyModifiers::CONTROL, 'd')), None);
        assert!(p.buffer().is_empty());
        typed(&mut p, "y");
        assert_eq!(p.handle_key(chord(KeyModifiers::CONTROL, 'c')), Some(PromptEvent::Interrupt));
        assert!(p.buffer().is_empty());
        assert_eq!(p.handle_key(chord(KeyModifiers::CONTROL, 'd')), Some(PromptEvent::Eof));
    }

    #[test]
    fn shifted_characters_are_typed() {
        let mut p = Prompt::new(KeyBindings::default(), None);
        assert_eq!(p.handle_key(chord(KeyModifiers::SHIFT, 'A')), None);
        assert_eq!(p.buffer().text(), "A");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut p = Prompt::new(KeyBindings::default(), None);
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(p.handle_key(release), None);
        assert!(p.buffer().is_empty());
    }
}
