//! The read-process-render loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use csvsh_config::{ColorScheme, KeyAction, Settings, SettingsError};
use csvsh_engine::{process, Effect, NoSelector, Outcome, Response, Selector, Session, Snapshot};
use csvsh_io::{html, CsvLoader};

use crate::host::NamedFileLoader;
use crate::prompt::{Prompt, PromptEvent};
use crate::render::Renderer;

pub struct Shell<W: Write> {
    session: Session,
    settings: Settings,
    scheme: ColorScheme,
    loader: CsvLoader,
    renderer: Renderer<W>,
    /// Open exported pages in a browser instead of printing their path
    open_pages: bool,
    page_dir: PathBuf,
    clipboard: Option<arboard::Clipboard>,
}

impl<W: Write> Shell<W> {
    pub fn new(settings: Settings, loader: CsvLoader, renderer: Renderer<W>, open_pages: bool) -> Self {
        let session = Session::new().with_strict_columns(settings.strict_columns);
        let scheme = renderer.scheme().clone();
        Self {
            session,
            settings,
            scheme,
            loader,
            renderer,
            open_pages,
            page_dir: std::env::temp_dir(),
            clipboard: None,
        }
    }

    /// Write exported pages into `dir` instead of the system temp directory.
    pub fn with_page_dir(mut self, dir: PathBuf) -> Self {
        self.page_dir = dir;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn warn_settings(&mut self, err: &SettingsError) -> io::Result<()> {
        self.renderer.outcome(&Outcome::warning(err.to_string()))
    }

    /// Run one command line and show everything it produced.
    pub fn execute(&mut self, line: &str, selector: &mut dyn Selector) -> io::Result<Response> {
        let loader = NamedFileLoader::new(&self.settings.named_files, self.loader);
        let response = process(line, &mut self.session, selector, &loader);

        self.renderer.outcomes(&response.outcomes)?;
        if let Some(effect) = &response.effect {
            self.apply(effect)?;
        }
        Ok(response)
    }

    /// Run the action bound to a key chord.
    pub fn key_action(&mut self, action: KeyAction, selector: &mut dyn Selector) -> io::Result<()> {
        match action {
            KeyAction::ClearScreen => self.renderer.clear_screen(),
            KeyAction::Help => self.execute("help", selector).map(drop),
            KeyAction::ShowTable => self.execute("show", selector).map(drop),
            KeyAction::ListNamedFiles => {
                let outcome = self.named_files();
                self.renderer.outcome(&outcome)
            }
        }
    }

    pub fn named_files(&self) -> Outcome {
        let named = &self.settings.named_files;
        if named.is_empty() {
            return Outcome::error("There are no «Named Files»");
        }
        let body: String = named
            .iter()
            .map(|(name, path)| format!("\n«{}:» {}", name, path))
            .collect();
        Outcome::success("Named Files", body)
    }

    /// Read commands line by line until EOF. Missing arguments are never asked for.
    pub fn run_lines(&mut self, input: impl BufRead) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            self.execute(&line, &mut NoSelector)?;
        }
        Ok(())
    }

    /// Interactive loop on the terminal.
    pub fn run_interactive(&mut self, prompt: &mut Prompt, selector: &mut dyn Selector) -> io::Result<()> {
        loop {
            match prompt.read_line()? {
                PromptEvent::Line(line) => {
                    self.execute(&line, selector)?;
                }
                PromptEvent::Action(action) => self.key_action(action, selector)?,
                PromptEvent::Interrupt => {}
                PromptEvent::Eof => break,
            }
        }
        self.renderer.goodbye()
    }

    pub fn into_output(self) -> W {
        self.renderer.into_inner()
    }

    fn apply(&mut self, effect: &Effect) -> io::Result<()> {
        match effect {
            Effect::ClearScreen => self.renderer.clear_screen(),
            Effect::ShowTable(snapshot) => {
                let outcome = self.show(snapshot);
                match outcome {
                    Some(outcome) => self.renderer.outcome(&outcome),
                    None => Ok(()),
                }
            }
            Effect::CopyToClipboard(text) => match self.copy(text) {
                Ok(()) => Ok(()),
                Err(e) => {
                    log::warn!("clipboard unavailable: {}", e);
                    self.renderer.outcome(&Outcome::error(format!("Could not copy to the clipboard: {}", e)))
                }
            },
        }
    }

    // Nothing is printed when the page opens in a browser.
    fn show(&self, snapshot: &Snapshot) -> Option<Outcome> {
        let path = match html::write_page(snapshot, &self.scheme, &self.page_dir) {
            Ok(path) => path,
            Err(e) => return Some(Outcome::error(format!("Could not write the table: {}", e))),
        };

        if !self.open_pages {
            return Some(Outcome::success("Table", format!("Written to «{}»", path.display())));
        }
        match open::that(&path) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("failed to open {}: {}", path.display(), e);
                Some(Outcome::error(format!("Could not open «{}» in a browser", path.display())))
            }
        }
    }

    fn copy(&mut self, text: &str) -> Result<(), String> {
        if self.clipboard.is_none() {
            self.clipboard = Some(arboard::Clipboard::new().map_err(|e| e.to_string())?);
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_string()).map_err(|e| e.to_string()),
            None => Err("no clipboard".to_string()),
        }
    }
}
