//! Panic reporting through the log instead of the terminal.

use std::any::Any;
use std::panic::{self, Location};

/// Replace the default panic hook with one that logs at `error`.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        log::error!("{}", describe(info.payload(), info.location()));
    }));
}

/// One-line description of a panic payload and where it was raised.
pub fn describe(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    match location {
        Some(loc) => format!("panicked at {}:{}: {}", loc.file(), loc.line(), message),
        None => format!("panicked: {}", message),
    }
}
