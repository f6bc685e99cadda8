//! Outcome contract consumed by the display layer.
//!
//! Each processed command yields plain `{ok, title, body}` messages. No
//! styling is embedded; names quoted with `«…»` are ordinary text that a
//! display layer may choose to highlight.

use serde::Serialize;

use crate::lookup::TableError;
use crate::table::Snapshot;

pub const ERROR_TITLE: &str = "Error";
pub const WARNING_TITLE: &str = "Warning";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub ok: bool,
    pub title: String,
    pub body: String,
}

impl Outcome {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { ok: true, title: title.into(), body: body.into() }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self { ok: false, title: ERROR_TITLE.to_string(), body: body.into() }
    }

    pub fn warning(body: impl Into<String>) -> Self {
        Self { ok: false, title: WARNING_TITLE.to_string(), body: body.into() }
    }

    /// Error outcome using the error's own message.
    pub fn from_error(err: &TableError) -> Self {
        Self::error(err.to_string())
    }

    pub fn not_valid() -> Self {
        Self::from_error(&TableError::UnknownCommand)
    }

    pub fn not_loaded() -> Self {
        Self::from_error(&TableError::NotLoaded)
    }
}

/// Side effect the display layer performs after showing the outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClearScreen,
    ShowTable(Snapshot),
    CopyToClipboard(String),
}

/// Everything one command produced.
///
/// No outcomes and no effect is the neutral no-op: a blank line or a
/// selection the user cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub outcomes: Vec<Outcome>,
    pub effect: Option<Effect>,
}

impl Response {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn one(outcome: Outcome) -> Self {
        Self { outcomes: vec![outcome], effect: None }
    }

    pub fn many(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes, effect: None }
    }

    pub fn effect(effect: Effect) -> Self {
        Self { outcomes: Vec::new(), effect: Some(effect) }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn is_noop(&self) -> bool {
        self.outcomes.is_empty() && self.effect.is_none()
    }

    /// True when every outcome succeeded.
    pub fn ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.ok)
    }
}

// ============================================================================
// Per-operation formatting
// ============================================================================

pub fn columns(list: String) -> Outcome {
    Outcome::success("Columns", list)
}

pub fn rows(range: Result<String, TableError>) -> Outcome {
    match range {
        Ok(range) => Outcome::success("Rows", range),
        Err(e) => Outcome::from_error(&e),
    }
}

pub fn peek_column(column: &str, result: Result<Vec<String>, TableError>) -> Outcome {
    match result {
        Ok(values) => {
            let body: String = values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("\n«{}:» {}", i, v))
                .collect();
            Outcome::success(capitalize(column), body)
        }
        Err(e @ TableError::AmbiguousColumn { .. }) => Outcome::from_error(&e),
        Err(_) => Outcome::error(format!("The column «{}» doesn't exist!", column)),
    }
}

pub fn peek_row(row: &str, result: Result<Vec<(String, String)>, TableError>) -> Outcome {
    match result {
        Ok(pairs) => {
            let body: String = pairs
                .iter()
                .map(|(name, value)| format!("\n«{}:» {}", name, value))
                .collect();
            Outcome::success(row, body)
        }
        Err(_) => Outcome::error(format!("The row «{}» does not exist!", row)),
    }
}

pub fn deleted_column(column: &str, result: Result<(), TableError>) -> Outcome {
    match result {
        Ok(()) => Outcome::success("Deleted", format!("The column «{}» was successfully deleted!", column)),
        Err(e @ TableError::AmbiguousColumn { .. }) => Outcome::from_error(&e),
        Err(_) => Outcome::error(format!("The column «{}» does not exist!", column)),
    }
}

pub fn deleted_row(row: &str, result: Result<(), TableError>) -> Outcome {
    match result {
        Ok(()) => Outcome::success("Deleted", format!("The row «{}» was successfully deleted!", row)),
        Err(_) => Outcome::error(format!("The row «{}» does not exist!", row)),
    }
}

pub fn switched_rows(first: &str, second: &str, result: Result<(), TableError>) -> Outcome {
    match result {
        Ok(()) => Outcome::success(
            "Switched",
            format!("The rows «{}» and «{}» were successfully switched!", first, second),
        ),
        Err(_) => Outcome::error(format!(
            "At least one of «row {}» and «row {}» do not exist!",
            first, second
        )),
    }
}

pub fn switched_columns(first: &str, second: &str, result: Result<(), TableError>) -> Outcome {
    match result {
        Ok(()) => Outcome::success(
            "Switched",
            format!("The columns «{}» and «{}» were successfully switched!", first, second),
        ),
        Err(e @ TableError::AmbiguousColumn { .. }) => Outcome::from_error(&e),
        Err(_) => Outcome::error(format!(
            "At least one of «column {}» and «column {}» do not exist!",
            first, second
        )),
    }
}

/// Any lookup failure other than an ambiguous column is reported as one
/// message naming both inputs.
pub fn cell(column: &str, row: &str, result: Result<&str, TableError>) -> Outcome {
    match result {
        Ok(value) => Outcome::success(format!("Cell {}-{}", column, row), value),
        Err(e @ TableError::AmbiguousColumn { .. }) => Outcome::from_error(&e),
        Err(_) => cell_missing(column, row),
    }
}

pub fn cell_missing(column: &str, row: &str) -> Outcome {
    Outcome::error(format!(
        "At least one of «column {}» and «row {}» do not exist!",
        column, row
    ))
}

/// Set failures do not say which argument was wrong.
pub fn set_cell(content: &str, result: Result<(), TableError>) -> Outcome {
    match result {
        Ok(()) => Outcome::success("Set to", content),
        Err(_) => Outcome::error("It's not possible to set that cell"),
    }
}

pub fn value_not_set() -> Outcome {
    Outcome::error("The value was not set!")
}

pub fn loaded(path: &str, rows: usize, columns: usize) -> Outcome {
    Outcome::success(
        "Loaded",
        format!("The file «{}» was loaded ({} rows, {} columns)", path, rows, columns),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_use_error_title() {
        let o = cell_missing("A", "9");
        assert!(!o.ok);
        assert_eq!(o.title, "Error");
        assert_eq!(o.body, "At least one of «column A» and «row 9» do not exist!");
    }

    #[test]
    fn warning_title() {
        assert_eq!(Outcome::warning("x").title, "Warning");
    }

    #[test]
    fn peek_column_lists_values_by_position() {
        let o = peek_column("last name", Ok(vec!["a".into(), "b".into()]));
        assert!(o.ok);
        assert_eq!(o.title, "Last name");
        assert_eq!(o.body, "\n«0:» a\n«1:» b");
    }

    #[test]
    fn rows_error_is_no_rows() {
        let o = rows(Err(TableError::NoRows));
        assert!(!o.ok);
        assert_eq!(o.body, "There are no rows!");
    }

    #[test]
    fn set_cell_failure_is_generic() {
        let o = set_cell("9", Err(TableError::InvalidIndex { row: "7".into() }));
        assert_eq!(o.body, "It's not possible to set that cell");
        assert_eq!(set_cell("9", Ok(())), Outcome::success("Set to", "9"));
    }

    #[test]
    fn ambiguous_column_is_reported_as_such() {
        let err = TableError::AmbiguousColumn { column: "id".into(), count: 2 };
        let o = deleted_column("id", Err(err));
        assert_eq!(o.body, "The column «id» appears 2 times in the header");
    }

    #[test]
    fn response_noop() {
        assert!(Response::none().is_noop());
        assert!(!Response::effect(Effect::ClearScreen).is_noop());
        assert!(Response::one(Outcome::success("t", "b")).ok());
    }
}
