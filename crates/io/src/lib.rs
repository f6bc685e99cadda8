// File I/O operations

pub mod csv;
pub mod html;

pub use crate::csv::{CsvLoader, Delimiter};
