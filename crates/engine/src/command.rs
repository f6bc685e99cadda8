//! Command grammar: verbs, aliases and argument shapes.
//!
//! A command line is split on whitespace. The first token selects the verb
//! (case-insensitive); the rest are arguments. Arguments the user left out
//! are kept as `None` so the interpreter can ask the selector for them.

use crate::lookup::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Clear,
    Help,
    Load,
    Delete,
    Peek,
    Show,
    List,
    Cell,
    Copy,
    Switch,
    Edit,
    Replace,
}

/// Every verb with the words that select it.
pub const VERBS: &[(Verb, &[&str])] = &[
    (Verb::Clear, &["clear", "cls", "c"]),
    (Verb::Help, &["help", "h"]),
    (Verb::Load, &["load", "ld"]),
    (Verb::Delete, &["delete", "del"]),
    (Verb::Peek, &["peek"]),
    (Verb::Show, &["show", "s"]),
    (Verb::List, &["ls"]),
    (Verb::Cell, &["cell"]),
    (Verb::Copy, &["copy", "cp"]),
    (Verb::Switch, &["switch", "sw"]),
    (Verb::Edit, &["edit"]),
    (Verb::Replace, &["replace"]),
];

impl Verb {
    pub fn parse(word: &str) -> Option<Verb> {
        let word = word.to_lowercase();
        VERBS
            .iter()
            .find(|(_, aliases)| aliases.contains(&word.as_str()))
            .map(|(verb, _)| *verb)
    }

    /// Verbs that work before a table has been loaded.
    pub fn needs_table(self) -> bool {
        !matches!(self, Verb::Clear | Verb::Help | Verb::Load)
    }
}

/// Whether an argument names a column or a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Column,
    Row,
}

impl Axis {
    fn parse(word: &str) -> Option<Axis> {
        match word {
            "column" => Some(Axis::Column),
            "row" => Some(Axis::Row),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Column => "column",
            Axis::Row => "row",
        }
    }
}

/// What `ls` should list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Columns,
    Rows,
    Both,
}

/// A column name and a row token as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddress {
    pub column: String,
    pub row: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Clear,
    Help,
    Load { path: String },
    Delete { axis: Axis, target: Option<String> },
    Peek { axis: Axis, target: Option<String> },
    Show,
    List(ListTarget),
    Cell(Option<CellAddress>),
    Copy(Option<CellAddress>),
    Switch { axis: Axis, pair: Option<(String, String)> },
    Edit(Option<CellAddress>),
    Replace(Option<CellAddress>),
}

/// Split a line into its verb and the remaining tokens.
///
/// Returns `Ok(None)` for a blank line.
pub fn split_verb(line: &str) -> Result<Option<(Verb, Vec<&str>)>, TableError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };
    let verb = Verb::parse(first).ok_or(TableError::UnknownCommand)?;
    Ok(Some((verb, tokens.collect())))
}

/// Build a [`Command`] from a verb and its argument tokens.
pub fn parse_args(verb: Verb, args: &[&str]) -> Result<Command, TableError> {
    let command = match verb {
        Verb::Clear => Command::Clear,
        Verb::Help => Command::Help,
        Verb::Show => Command::Show,
        Verb::Load => {
            if args.is_empty() {
                return Err(TableError::UnknownCommand);
            }
            Command::Load { path: args.join(" ") }
        }
        Verb::Delete => {
            let (axis, rest) = axis_and_rest(args)?;
            Command::Delete { axis, target: target(axis, rest) }
        }
        Verb::Peek => {
            let (axis, rest) = axis_and_rest(args)?;
            Command::Peek { axis, target: target(axis, rest) }
        }
        Verb::List => Command::List(match args.first() {
            Some(&"column") => ListTarget::Columns,
            Some(&"row") => ListTarget::Rows,
            _ => ListTarget::Both,
        }),
        Verb::Cell => Command::Cell(cell_address(args)),
        Verb::Copy => Command::Copy(cell_address(args)),
        Verb::Edit => Command::Edit(cell_address(args)),
        Verb::Replace => Command::Replace(cell_address(args)),
        Verb::Switch => {
            let (axis, rest) = axis_and_rest(args)?;
            Command::Switch { axis, pair: pair(rest) }
        }
    };
    Ok(command)
}

/// Parse a whole line. `Ok(None)` means the line was blank.
pub fn parse(line: &str) -> Result<Option<Command>, TableError> {
    match split_verb(line)? {
        Some((verb, args)) => parse_args(verb, &args).map(Some),
        None => Ok(None),
    }
}

fn axis_and_rest<'a, 'b>(args: &'b [&'a str]) -> Result<(Axis, &'b [&'a str]), TableError> {
    let (first, rest) = args.split_first().ok_or(TableError::UnknownCommand)?;
    let axis = Axis::parse(first).ok_or(TableError::UnknownCommand)?;
    Ok((axis, rest))
}

// Column names may contain spaces; a row is always a single token.
fn target(axis: Axis, rest: &[&str]) -> Option<String> {
    match axis {
        Axis::Column if !rest.is_empty() => Some(rest.join(" ")),
        Axis::Row => rest.first().map(|s| s.to_string()),
        _ => None,
    }
}

fn cell_address(args: &[&str]) -> Option<CellAddress> {
    let (row, column) = args.split_last()?;
    Some(CellAddress { column: column.join(" "), row: row.to_string() })
}

fn pair(rest: &[&str]) -> Option<(String, String)> {
    let joined = rest.join(" ");
    let mut sides = joined.split('|');
    match (sides.next(), sides.next()) {
        (Some(a), Some(b)) => Some((a.trim().to_string(), b.trim().to_string())),
        _ => None,
    }
}

/// Command reference shown by `help`.
pub const HELP: &str = "\
* load, ld: Load a new csv file into memory
    * load «path_to_file|named_file»
    * ld «path_to_file|named_file»

* peek: show a single column or row
    * peek «column|row» «name»

* ls: show the names of all columns, rows or both
    * ls «column|row| »

* delete, del: delete all the values on a specified column or row
    * delete «column|row» «name»
    * del «column|row» «name»

* cell: show the value of a specified cell
    * cell «column_name» «row_name»

* copy, cp: copy to the clipboard the contents of a specified cell
    * copy «column_name» «row_name»
    * cp «column_name» «row_name»

* switch, sw: switch the values between two columns or two rows
    * switch «column|row» «name_1» | «name_2»
    * sw «column|row» «name_1» | «name_2»

* edit: edit the content of a specified cell
    * edit «column_name» «row_name»

* replace: replace the content of a specified cell
    * replace «column_name» «row_name»

* show, s: show the current csv file as an html table inside a browser

* help, h: show this message

* clear, cls, c: clear the screen";
