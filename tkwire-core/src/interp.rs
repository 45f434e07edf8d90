// tkwire-core/src/interp.rs
use crate::callback::Handle;
use crate::command::Command;

/// The interpreter rejected a command. Carries its diagnostic text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The external command evaluator: the only thing that crosses into the
/// toolkit runtime.
///
/// Implementations are driven from the event-loop thread only and must be
/// re-entrant: while `eval` runs (`tkwait`, `event generate`, `update`) the
/// runtime may call back into [`crate::Tk::dispatch`], which evaluates more
/// commands on the same interpreter.
pub trait Interpreter {
    /// Evaluate one script, returning the interpreter result on success
    fn eval(&self, script: &str) -> Result<String, EvalError>;

    /// Create an interpreter command `name` that forwards its arguments,
    /// merged into one list string, to `Tk::dispatch(handle, ..)`
    fn create_command(&self, name: &str, handle: Handle) -> Result<(), EvalError>;

    /// Remove a command created by `create_command`
    fn delete_command(&self, name: &str) -> Result<(), EvalError> {
        let cmd = Command::new("rename").arg(name).arg("");
        self.eval(&cmd.to_string()).map(|_| ())
    }

    fn set_var(&self, name: &str, value: &str) -> Result<(), EvalError> {
        let cmd = Command::new("set").arg(name).arg(value);
        self.eval(&cmd.to_string()).map(|_| ())
    }

    fn get_var(&self, name: &str) -> Result<String, EvalError> {
        let cmd = Command::new("set").arg(name);
        self.eval(&cmd.to_string())
    }

    fn unset_var(&self, name: &str) -> Result<(), EvalError> {
        let cmd = Command::new("unset").arg("-nocomplain").arg(name);
        self.eval(&cmd.to_string()).map(|_| ())
    }

    /// Run the toolkit main loop until the last window closes
    fn main_loop(&self);
}
