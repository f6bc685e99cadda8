//! Outcome rendering for the terminal.
//!
//! Three modes: colored (interactive terminal), plain text (pipes) and JSON
//! lines (`--json`). In colored mode the `«…»` spans of a body are drawn in
//! the title's color with the guillemets removed; the other modes print the
//! body unchanged.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use csvsh_config::{Color as SchemeColor, ColorScheme};
use csvsh_engine::outcome::WARNING_TITLE;
use csvsh_engine::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Color,
    Plain,
    Json,
}

pub struct Renderer<W: Write> {
    out: W,
    mode: OutputMode,
    scheme: ColorScheme,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: OutputMode, scheme: ColorScheme) -> Self {
        Self { out, mode, scheme }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn outcome(&mut self, outcome: &Outcome) -> io::Result<()> {
        match self.mode {
            OutputMode::Plain => writeln!(self.out, "{}", plain(outcome))?,
            OutputMode::Json => {
                let line = serde_json::to_string(outcome)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                writeln!(self.out, "{}", line)?;
            }
            OutputMode::Color => {
                let color = title_color(outcome);
                queue!(
                    self.out,
                    SetForegroundColor(color),
                    SetAttribute(Attribute::Bold),
                    Print(&outcome.title),
                    SetAttribute(Attribute::Reset),
                    ResetColor,
                    Print(": ")
                )?;
                for (highlighted, text) in spans(&outcome.body) {
                    if highlighted {
                        queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)?;
                    } else {
                        // Raw mode may be off or on; normalize line endings either way
                        queue!(self.out, Print(text.replace('\n', "\r\n")))?;
                    }
                }
                queue!(self.out, Print("\r\n"))?;
            }
        }
        self.out.flush()
    }

    pub fn outcomes(&mut self, outcomes: &[Outcome]) -> io::Result<()> {
        for outcome in outcomes {
            self.outcome(outcome)?;
        }
        Ok(())
    }

    /// Clear the terminal. Only meaningful in colored mode.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.mode == OutputMode::Color {
            queue!(self.out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0))?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn goodbye(&mut self) -> io::Result<()> {
        if self.mode == OutputMode::Color {
            queue!(self.out, SetForegroundColor(Color::DarkGrey), Print("Bye!!!\r\n"), ResetColor)?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Prompt color taken from the scheme's highlight color.
    pub fn prompt_color(&self) -> Option<Color> {
        self.scheme.highlight_color().map(to_crossterm)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `"Title: body"` with the body verbatim.
pub fn plain(outcome: &Outcome) -> String {
    format!("{}: {}", outcome.title, outcome.body)
}

/// Split a body into `(highlighted, text)` runs on `«` and `»`.
///
/// An unmatched `«` highlights to the end of the text; a stray `»` is dropped.
pub fn spans(body: &str) -> Vec<(bool, &str)> {
    let mut out = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        match rest.find('«') {
            Some(start) => {
                push_plain(&mut out, &rest[..start]);
                let inner = &rest[start + '«'.len_utf8()..];
                match inner.find('»') {
                    Some(end) => {
                        if end > 0 {
                            out.push((true, &inner[..end]));
                        }
                        rest = &inner[end + '»'.len_utf8()..];
                    }
                    None => {
                        if !inner.is_empty() {
                            out.push((true, inner));
                        }
                        rest = "";
                    }
                }
            }
            None => {
                push_plain(&mut out, rest);
                rest = "";
            }
        }
    }
    out
}

fn push_plain<'a>(out: &mut Vec<(bool, &'a str)>, text: &'a str) {
    out.extend(text.split('»').filter(|part| !part.is_empty()).map(|part| (false, part)));
}

fn title_color(outcome: &Outcome) -> Color {
    if outcome.ok {
        Color::Green
    } else if outcome.title == WARNING_TITLE {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn to_crossterm(color: SchemeColor) -> Color {
    Color::Rgb { r: color.r, g: color.g, b: color.b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(mode: OutputMode, outcome: &Outcome) -> String {
        let mut r = Renderer::new(Vec::new(), mode, ColorScheme::nord());
        r.outcome(outcome).unwrap();
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn spans_split_on_guillemets() {
        assert_eq!(
            spans("The column «Age» was deleted"),
            vec![(false, "The column "), (true, "Age"), (false, " was deleted")]
        );
        assert_eq!(spans("«0:» a"), vec![(true, "0:"), (false, " a")]);
        assert_eq!(spans("no marks"), vec![(false, "no marks")]);
        assert_eq!(spans("open «tail"), vec![(false, "open "), (true, "tail")]);
        assert_eq!(spans("stray » mark"), vec![(false, "stray "), (false, " mark")]);
        assert!(spans("").is_empty());
    }

    #[test]
    fn plain_mode_keeps_body() {
        let o = Outcome::error("The row «7» does not exist!");
        assert_eq!(render(OutputMode::Plain, &o), "Error: The row «7» does not exist!\n");
    }

    #[test]
    fn json_mode_is_one_object_per_line() {
        let o = Outcome::success("Rows", "[0, 2]");
        let out = render(OutputMode::Json, &o);
        assert_eq!(out.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["title"], "Rows");
        assert_eq!(value["body"], "[0, 2]");
    }

    #[test]
    fn color_mode_strips_guillemets() {
        let out = render(OutputMode::Color, &Outcome::error("No «CSV file» has been loaded"));
        assert!(out.contains("CSV file"));
        assert!(!out.contains('«'));
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn clear_is_silent_when_plain() {
        let mut r = Renderer::new(Vec::new(), OutputMode::Plain, ColorScheme::nord());
        r.clear_screen().unwrap();
        r.goodbye().unwrap();
        assert!(r.into_inner().is_empty());
    }
}
