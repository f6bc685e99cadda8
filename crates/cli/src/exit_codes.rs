//! CLI Exit Code Registry
//!
//! Exit codes are part of the shell contract; scripts piping commands into
//! `csvsh` rely on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Normal exit (EOF or Ctrl-D)                         |
//! | 1    | General error (unspecified)                         |
//! | 2    | Usage error (bad arguments, unreadable config path) |
//! | 3    | Terminal or stdin/stdout I/O failure                |
//!
//! Command failures inside the session (unknown column, bad row, ...) are
//! reported as outcomes and never change the exit code.

/// Success.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments or options.
pub const EXIT_USAGE: u8 = 2;

/// Reading commands or writing output failed.
pub const EXIT_TERMINAL: u8 = 3;
