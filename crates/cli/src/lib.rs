// csvsh terminal front end: shell loop, rendering, prompt and dialogs

pub mod crash;
pub mod exit_codes;
pub mod host;
pub mod prompt;
pub mod render;
pub mod shell;
pub mod tui;

mod util;
