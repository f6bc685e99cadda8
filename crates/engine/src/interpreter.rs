//! Command interpreter.
//!
//! `process` takes one command line, the session it applies to, and the two
//! capabilities the core cannot provide itself: a [`Selector`] that asks the
//! user for a missing argument, and a [`TableLoader`] that turns a path into
//! a table. It always returns a [`Response`]; nothing escapes as a panic.

use std::panic::{self, AssertUnwindSafe};

use crate::command::{self, Axis, CellAddress, Command, ListTarget, HELP};
use crate::outcome::{self, Effect, Outcome, Response};
use crate::table::Table;

/// Interactive source for arguments the user left out.
///
/// Every method returns `None` when the user cancels.
pub trait Selector {
    fn choose_column(&mut self, names: &[String]) -> Option<String>;

    fn choose_row(&mut self, indices: &[String]) -> Option<String>;

    /// Ask for free text. `initial` pre-fills the input.
    fn input_value(&mut self, title: &str, initial: Option<&str>) -> Option<String>;
}

/// A selector that always cancels, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelector;

impl Selector for NoSelector {
    fn choose_column(&mut self, _names: &[String]) -> Option<String> {
        None
    }

    fn choose_row(&mut self, _indices: &[String]) -> Option<String> {
        None
    }

    fn input_value(&mut self, _title: &str, _initial: Option<&str>) -> Option<String> {
        None
    }
}

/// Errors a [`TableLoader`] can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    NotFound(String),
    Io(String),
    Parse(String),
    /// The source has no header row.
    Empty(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound(_) => write!(f, "That file does not exist"),
            LoadError::Io(msg) => write!(f, "Could not read the file: {}", msg),
            LoadError::Parse(msg) => write!(f, "Could not parse the file: {}", msg),
            LoadError::Empty(path) => write!(f, "The file «{}» is empty", path),
        }
    }
}

impl std::error::Error for LoadError {}

/// Produces a whole table (header and rows together) from a path or name.
pub trait TableLoader {
    fn load(&self, path: &str) -> Result<Table, LoadError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    NoTableLoaded,
    TableLoaded,
}

/// The table under edit plus the interpreter state around it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Table,
    state: State,
    strict_columns: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate column names become errors instead of resolving to the first.
    pub fn with_strict_columns(mut self, strict: bool) -> Self {
        self.strict_columns = strict;
        self.table.set_strict_columns(strict);
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Replace the current table and mark the session as loaded.
    pub fn install(&mut self, mut table: Table) {
        table.set_strict_columns(self.strict_columns);
        self.table = table;
        self.state = State::TableLoaded;
    }
}

/// Process one command line against `session`.
///
/// A panic inside dispatch is logged and reported as "Not a valid command!";
/// the session stays usable.
pub fn process(
    line: &str,
    session: &mut Session,
    selector: &mut dyn Selector,
    loader: &dyn TableLoader,
) -> Response {
    let result = panic::catch_unwind(AssertUnwindSafe(|| dispatch(line, session, selector, loader)));
    match result {
        Ok(response) => response,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!("command {:?} panicked: {}", line, msg);
            Response::one(Outcome::not_valid())
        }
    }
}

fn dispatch(
    line: &str,
    session: &mut Session,
    selector: &mut dyn Selector,
    loader: &dyn TableLoader,
) -> Response {
    // Before a load only clear, help and load are recognized; any other
    // word, known or not, gets the not-loaded message.
    let (verb, args) = match command::split_verb(line) {
        Ok(Some(split)) => split,
        Ok(None) => return Response::none(),
        Err(_) if session.state == State::NoTableLoaded => {
            return Response::one(Outcome::not_loaded())
        }
        Err(e) => return Response::one(Outcome::from_error(&e)),
    };

    if verb.needs_table() && session.state == State::NoTableLoaded {
        return Response::one(Outcome::not_loaded());
    }

    let command = match command::parse_args(verb, &args) {
        Ok(command) => command,
        Err(e) => return Response::one(Outcome::from_error(&e)),
    };
    log::debug!("dispatching {:?}", command);

    match command {
        Command::Clear => Response::effect(Effect::ClearScreen),
        Command::Help => Response::one(Outcome::success("Help", format!("\n{}", HELP))),
        Command::Load { path } => load(session, loader, &path),
        Command::Show => Response::effect(Effect::ShowTable(session.table.snapshot())),
        Command::List(target) => list(&session.table, target),
        Command::Peek { axis, target } => peek(&session.table, selector, axis, target),
        Command::Delete { axis, target } => delete(&mut session.table, selector, axis, target),
        Command::Switch { axis, pair } => switch(&mut session.table, selector, axis, pair),
        Command::Cell(address) => {
            let Some(address) = resolve_address(&session.table, selector, address) else {
                return Response::none();
            };
            let result = session.table.get_cell(&address.column, &address.row);
            Response::one(outcome::cell(&address.column, &address.row, result))
        }
        Command::Copy(address) => {
            let Some(address) = resolve_address(&session.table, selector, address) else {
                return Response::none();
            };
            match session.table.get_cell(&address.column, &address.row) {
                Ok(value) => {
                    let value = value.to_string();
                    let response =
                        Response::one(outcome::cell(&address.column, &address.row, Ok(value.as_str())));
                    // Nothing to copy from an empty cell
                    if value.is_empty() {
                        response
                    } else {
                        response.with_effect(Effect::CopyToClipboard(value))
                    }
                }
                Err(e) => Response::one(outcome::cell(&address.column, &address.row, Err(e))),
            }
        }
        Command::Edit(address) => edit(&mut session.table, selector, address, true),
        Command::Replace(address) => edit(&mut session.table, selector, address, false),
    }
}

fn load(session: &mut Session, loader: &dyn TableLoader, path: &str) -> Response {
    match loader.load(path) {
        Ok(table) if table.header().is_empty() => {
            Response::one(Outcome::error(LoadError::Empty(path.to_string()).to_string()))
        }
        Ok(table) => {
            let (rows, columns) = (table.row_count(), table.column_count());
            session.install(table);
            log::info!("loaded {} ({} rows, {} columns)", path, rows, columns);
            Response::one(outcome::loaded(path, rows, columns))
        }
        Err(e) => {
            log::warn!("failed to load {}: {:?}", path, e);
            Response::one(Outcome::error(e.to_string()))
        }
    }
}

fn list(table: &Table, target: ListTarget) -> Response {
    match target {
        ListTarget::Columns => Response::one(outcome::columns(table.column_list())),
        ListTarget::Rows => Response::one(outcome::rows(table.row_range())),
        ListTarget::Both => Response::many(vec![
            outcome::rows(table.row_range()),
            outcome::columns(table.column_list()),
        ]),
    }
}

fn peek(table: &Table, selector: &mut dyn Selector, axis: Axis, target: Option<String>) -> Response {
    let Some(target) = target.or_else(|| choose(table, selector, axis)) else {
        return Response::none();
    };
    match axis {
        Axis::Column => Response::one(outcome::peek_column(&target, table.peek_column(&target))),
        Axis::Row => Response::one(outcome::peek_row(&target, table.peek_row(&target))),
    }
}

fn delete(table: &mut Table, selector: &mut dyn Selector, axis: Axis, target: Option<String>) -> Response {
    let Some(target) = target.or_else(|| choose(table, selector, axis)) else {
        return Response::none();
    };
    match axis {
        Axis::Column => {
            let result = table.delete_column(&target);
            Response::one(outcome::deleted_column(&target, result))
        }
        Axis::Row => {
            let result = table.delete_row(&target);
            Response::one(outcome::deleted_row(&target, result))
        }
    }
}

fn switch(
    table: &mut Table,
    selector: &mut dyn Selector,
    axis: Axis,
    pair: Option<(String, String)>,
) -> Response {
    let pair = match pair {
        Some(pair) => pair,
        None => {
            let Some(first) = choose(table, selector, axis) else {
                return Response::none();
            };
            let Some(second) = choose(table, selector, axis) else {
                return Response::none();
            };
            (first, second)
        }
    };
    let (first, second) = pair;
    match axis {
        Axis::Column => {
            let result = table.switch_columns(&first, &second);
            Response::one(outcome::switched_columns(&first, &second, result))
        }
        Axis::Row => {
            let result = table.switch_rows(&first, &second);
            Response::one(outcome::switched_rows(&first, &second, result))
        }
    }
}

// `edit` pre-fills the prompt with the current value, `replace` starts empty.
fn edit(
    table: &mut Table,
    selector: &mut dyn Selector,
    address: Option<CellAddress>,
    prefill: bool,
) -> Response {
    let Some(CellAddress { column, row }) = resolve_address(table, selector, address) else {
        return Response::none();
    };
    let current = match table.get_cell(&column, &row) {
        Ok(value) => value.to_string(),
        Err(e) => return Response::one(outcome::cell(&column, &row, Err(e))),
    };

    let title = format!("{} - {}", column, row);
    let initial = prefill.then_some(current.as_str());
    match selector.input_value(&title, initial) {
        Some(value) if !value.is_empty() => {
            let result = table.set_cell(&column, &row, &value);
            Response::one(outcome::set_cell(&value, result))
        }
        _ => Response::one(outcome::value_not_set()),
    }
}

fn choose(table: &Table, selector: &mut dyn Selector, axis: Axis) -> Option<String> {
    match axis {
        Axis::Column => selector.choose_column(table.header()),
        Axis::Row => selector.choose_row(&table.row_indices()),
    }
}

/// Use the typed address, or ask for a column and then a row.
fn resolve_address(
    table: &Table,
    selector: &mut dyn Selector,
    address: Option<CellAddress>,
) -> Option<CellAddress> {
    if address.is_some() {
        return address;
    }
    let column = selector.choose_column(table.header())?;
    let row = selector.choose_row(&table.row_indices())?;
    Some(CellAddress { column, row })
}
