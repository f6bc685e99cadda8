//! Table model and command interpreter for csvsh.
//!
//! The crate has no I/O of its own: loading files and asking the user for
//! missing arguments are capabilities supplied by the caller through
//! [`TableLoader`] and [`Selector`].

pub mod command;
pub mod interpreter;
pub mod lookup;
pub mod outcome;
pub mod table;

pub use interpreter::{process, LoadError, NoSelector, Selector, Session, State, TableLoader};
pub use lookup::{Argument, Resolver, TableError};
pub use outcome::{Effect, Outcome, Response};
pub use table::{Snapshot, Table};
