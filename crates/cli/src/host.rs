//! Terminal-side capabilities handed to the interpreter.

use csvsh_config::{ColorScheme, NamedFiles};
use csvsh_engine::{LoadError, Selector, Table, TableLoader};
use csvsh_io::CsvLoader;

use crate::tui;

/// Asks the user through full-screen dialogs.
pub struct TerminalSelector {
    scheme: ColorScheme,
}

impl TerminalSelector {
    pub fn new(scheme: ColorScheme) -> Self {
        Self { scheme }
    }
}

impl Selector for TerminalSelector {
    fn choose_column(&mut self, names: &[String]) -> Option<String> {
        cancelled_on_error(tui::pick("Column", names, &self.scheme))
    }

    fn choose_row(&mut self, indices: &[String]) -> Option<String> {
        cancelled_on_error(tui::pick("Row", indices, &self.scheme))
    }

    fn input_value(&mut self, title: &str, initial: Option<&str>) -> Option<String> {
        cancelled_on_error(tui::input(title, initial, &self.scheme))
    }
}

fn cancelled_on_error(result: Result<Option<String>, String>) -> Option<String> {
    result.unwrap_or_else(|e| {
        log::warn!("dialog failed: {}", e);
        None
    })
}

/// Resolves named files and `~` before reading CSV.
pub struct NamedFileLoader<'a> {
    named: &'a NamedFiles,
    csv: CsvLoader,
}

impl<'a> NamedFileLoader<'a> {
    pub fn new(named: &'a NamedFiles, csv: CsvLoader) -> Self {
        Self { named, csv }
    }
}

impl TableLoader for NamedFileLoader<'_> {
    fn load(&self, name: &str) -> Result<Table, LoadError> {
        let path = self.named.resolve(name);
        let expanded = shellexpand::tilde(path);
        if path != name {
            log::debug!("named file {} -> {}", name, expanded);
        }
        self.csv.load(&expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn named_file_is_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name\nAda\n").unwrap();

        let mut named = NamedFiles::new();
        named.insert("people", path.to_str().unwrap());
        let loader = NamedFileLoader::new(&named, CsvLoader::default());

        let table = loader.load("people").unwrap();
        assert_eq!(table.get_cell("name", "0"), Ok("Ada"));
        assert_eq!(loader.load(path.to_str().unwrap()).unwrap().row_count(), 1);
    }

    #[test]
    fn unknown_name_is_treated_as_path() {
        let named = NamedFiles::new();
        let loader = NamedFileLoader::new(&named, CsvLoader::default());
        assert!(matches!(loader.load("/no/such/file.csv"), Err(LoadError::NotFound(_))));
    }
}
