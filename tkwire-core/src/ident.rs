// tkwire-core/src/ident.rs
use std::cell::Cell;

/// Monotonic source of identifiers for widget path segments, toolkit
/// variables and callback command names.
///
/// One generator lives inside each [`crate::Tk`]; it is `!Sync` on purpose,
/// all identifiers are minted on the event-loop thread.
#[derive(Debug)]
pub struct IdGenerator {
    last: Cell<u64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { last: Cell::new(0) }
    }

    /// Next identifier: "1", "2", "3", ...
    pub fn next(&self) -> String {
        let id = self.last.get() + 1;
        self.last.set(id);
        id.to_string()
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> u64 {
        self.last.get()
    }
}

/// Join a parent widget path and an identifier. The empty parent is the
/// main window, so its children are `.1`, `.2`, ...
pub fn child_path(parent: &str, id: &str) -> String {
    format!("{}.{}", parent, id)
}

/// Render a widget path as a command target; the main window is `.`.
pub fn window_target(path: &str) -> &str {
    if path.is_empty() { "." } else { path }
}
