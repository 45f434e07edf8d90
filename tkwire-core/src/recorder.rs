// tkwire-core/src/recorder.rs
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::callback::Handle;
use crate::command::Command;
use crate::interp::{EvalError, Interpreter};

type Hook = Rc<dyn Fn(&str)>;

/// An interpreter that evaluates nothing and remembers everything.
///
/// Used as the test double for the toolkit and by the CLI to produce a
/// script without a display. Canned results are matched by command prefix,
/// most recent first; unmatched commands succeed with an empty result.
#[derive(Default)]
pub struct Recorder {
    log: RefCell<Vec<String>>,
    responses: RefCell<Vec<(String, Result<String, String>)>>,
    hooks: RefCell<Vec<(String, Hook)>>,
    vars: RefCell<HashMap<String, String>>,
    commands: RefCell<Vec<(String, Handle)>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `result`
    pub fn respond(&self, prefix: &str, result: &str) {
        self.responses
            .borrow_mut()
            .push((prefix.to_string(), Ok(result.to_string())));
    }

    /// Fail commands starting with `prefix` with diagnostic `message`
    pub fn fail(&self, prefix: &str, message: &str) {
        self.responses
            .borrow_mut()
            .push((prefix.to_string(), Err(message.to_string())));
    }

    /// Run `hook` whenever a command starting with `prefix` is evaluated,
    /// the way the toolkit runs bindings during `event generate`
    pub fn hook(&self, prefix: &str, hook: impl Fn(&str) + 'static) {
        self.hooks
            .borrow_mut()
            .push((prefix.to_string(), Rc::new(hook)));
    }

    /// Every command evaluated so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Commands evaluated so far that start with `prefix`
    pub fn commands_starting_with(&self, prefix: &str) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Drain the command log
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Handle behind a live callback command
    pub fn handle_of(&self, name: &str) -> Option<Handle> {
        self.commands
            .borrow()
            .iter()
            .find(|(command, _)| command == name)
            .map(|(_, handle)| *handle)
    }

    pub fn var(&self, name: &str) -> Option<String> {
        self.vars.borrow().get(name).cloned()
    }

    /// The recorded session as a script: a stub procedure per callback
    /// command, then every command in evaluation order
    pub fn script(&self) -> String {
        let mut lines: Vec<String> = self
            .commands
            .borrow()
            .iter()
            .map(|(name, _)| format!("proc {} args {{}}", name))
            .collect();
        lines.extend(self.log.borrow().iter().cloned());
        let mut script = lines.join("\n");
        script.push('\n');
        script
    }

    fn record(&self, script: &str) {
        self.log.borrow_mut().push(script.to_string());
    }
}

impl Interpreter for Recorder {
    fn eval(&self, script: &str) -> Result<String, EvalError> {
        self.record(script);

        let response = self
            .responses
            .borrow()
            .iter()
            .rev()
            .find(|(prefix, _)| script.starts_with(prefix.as_str()))
            .map(|(_, result)| result.clone());

        let hooks: Vec<Hook> = self
            .hooks
            .borrow()
            .iter()
            .filter(|(prefix, _)| script.starts_with(prefix.as_str()))
            .map(|(_, hook)| hook.clone())
            .collect();
        for hook in hooks {
            hook(script);
        }

        match response {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(EvalError::new(message)),
            None => Ok(String::new()),
        }
    }

    fn create_command(&self, name: &str, handle: Handle) -> Result<(), EvalError> {
        let mut commands = self.commands.borrow_mut();
        commands.retain(|(command, _)| command != name);
        commands.push((name.to_string(), handle));
        Ok(())
    }

    fn delete_command(&self, name: &str) -> Result<(), EvalError> {
        self.commands
            .borrow_mut()
            .retain(|(command, _)| command != name);
        Ok(())
    }

    fn set_var(&self, name: &str, value: &str) -> Result<(), EvalError> {
        self.record(&Command::new("set").arg(name).arg(value).to_string());
        self.vars
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get_var(&self, name: &str) -> Result<String, EvalError> {
        self.vars
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::new(format!("can't read \"{}\": no such variable", name)))
    }

    fn unset_var(&self, name: &str) -> Result<(), EvalError> {
        self.record(&Command::new("unset").arg("-nocomplain").arg(name).to_string());
        self.vars.borrow_mut().remove(name);
        Ok(())
    }

    fn main_loop(&self) {}
}
