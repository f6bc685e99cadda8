//! Column and row lookup.
//!
//! Columns are addressed by name, rows by their zero-based position. Every
//! table operation goes through [`Resolver`] so the tie-break rules below are
//! applied identically everywhere:
//!
//! - a column name resolves to the **first** header entry that equals it
//!   exactly (case-sensitive), even when the header contains duplicates;
//! - a row token must parse as a base-10 integer inside `[0, len(rows))`;
//!   a non-integer and an out-of-range integer are the same error.
//!
//! Strict mode turns duplicate column names into [`TableError::AmbiguousColumn`]
//! instead of picking the first one. Resolution order never changes.

/// Errors produced by table lookups and the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A table-dependent command was issued before any table was loaded.
    NotLoaded,
    /// No header entry matches the column name.
    NotFound { column: String },
    /// The row token is not an integer or is out of range.
    InvalidIndex { row: String },
    /// A required argument was blank.
    EmptyArgument { argument: Argument },
    /// Strict mode only: the column name occurs more than once.
    AmbiguousColumn { column: String, count: usize },
    /// The table has no data rows to list.
    NoRows,
    /// The verb or its argument shape is not recognized.
    UnknownCommand,
}

/// Which positional argument an [`TableError::EmptyArgument`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Column,
    Row,
    Content,
}

impl Argument {
    pub fn name(self) -> &'static str {
        match self {
            Argument::Column => "column",
            Argument::Row => "row",
            Argument::Content => "content",
        }
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::NotLoaded => write!(f, "No «CSV file» has been loaded"),
            TableError::NotFound { column } => write!(f, "The column «{}» doesn't exist!", column),
            TableError::InvalidIndex { row } => write!(f, "The row «{}» does not exist!", row),
            TableError::EmptyArgument { argument } => {
                write!(f, "The «{}» argument can't be empty", argument.name())
            }
            TableError::AmbiguousColumn { column, count } => {
                write!(f, "The column «{}» appears {} times in the header", column, count)
            }
            TableError::NoRows => write!(f, "There are no rows!"),
            TableError::UnknownCommand => write!(f, "Not a valid command!"),
        }
    }
}

impl std::error::Error for TableError {}

/// Resolves column names and row tokens against a header and a row count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolver {
    strict: bool,
}

impl Resolver {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Position of the first header entry equal to `name`.
    pub fn column(&self, header: &[String], name: &str) -> Result<usize, TableError> {
        let index = header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::NotFound { column: name.to_string() })?;

        if self.strict {
            let count = header[index..].iter().filter(|h| *h == name).count();
            if count > 1 {
                return Err(TableError::AmbiguousColumn { column: name.to_string(), count });
            }
        }

        Ok(index)
    }

    /// Parse `token` as a row position in `[0, row_count)`.
    pub fn row(&self, row_count: usize, token: &str) -> Result<usize, TableError> {
        let invalid = || TableError::InvalidIndex { row: token.to_string() };
        let index: i64 = token.trim().parse().map_err(|_| invalid())?;
        if index < 0 || index as u64 >= row_count as u64 {
            return Err(invalid());
        }
        Ok(index as usize)
    }
}

/// Fail with [`TableError::EmptyArgument`] when `value` is blank.
pub(crate) fn require(value: &str, argument: Argument) -> Result<&str, TableError> {
    if value.trim().is_empty() {
        Err(TableError::EmptyArgument { argument })
    } else {
        Ok(value)
    }
}
