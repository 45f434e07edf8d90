// tkwire-core/src/tk.rs
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::callback::{CallbackRegistry, Handle, LookupError};
use crate::command::Command;
use crate::component::Component;
use crate::ident::IdGenerator;
use crate::interp::{EvalError, Interpreter};
use crate::mailbox::{Mailbox, Poster};

/// A live callback: the interpreter command name plus its registry handle.
/// Displays as the command name, so it can be dropped straight into a
/// `-command` option or a binding script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackToken {
    name: String,
    handle: Handle,
}

impl CallbackToken {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl fmt::Display for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

struct Registered {
    component: Rc<dyn Component>,
    any: Rc<dyn Any>,
}

struct Inner {
    interp: Rc<dyn Interpreter>,
    ids: IdGenerator,
    last_result: RefCell<String>,
    callbacks: RefCell<CallbackRegistry>,
    widgets: RefCell<HashMap<String, Registered>>,
    mailbox: Mailbox,
}

/// Handle on one interpreter and everything bound to it: identifier
/// generator, callback registry and the path → widget map.
///
/// Cloning is cheap and every clone refers to the same context. `Tk` is
/// `!Send`, which pins all widget work to the thread that created it.
/// No `RefCell` borrow is held while the interpreter runs, so callbacks
/// fired from inside `eval` may evaluate, register and dispatch freely.
#[derive(Clone)]
pub struct Tk {
    inner: Rc<Inner>,
}

impl Tk {
    pub fn new(interp: Rc<dyn Interpreter>) -> Self {
        Self {
            inner: Rc::new(Inner {
                interp,
                ids: IdGenerator::new(),
                last_result: RefCell::new(String::new()),
                callbacks: RefCell::new(CallbackRegistry::new()),
                widgets: RefCell::new(HashMap::new()),
                mailbox: Mailbox::new(),
            }),
        }
    }

    pub fn interpreter(&self) -> Rc<dyn Interpreter> {
        self.inner.interp.clone()
    }

    /// Fresh identifier, unique for the lifetime of this context
    pub fn next_id(&self) -> String {
        self.inner.ids.next()
    }

    /// Evaluate a command; the interpreter result (or diagnostic) becomes
    /// [`Tk::last_result`]
    pub fn eval(&self, cmd: &Command) -> Result<(), EvalError> {
        if cmd.is_detached() {
            tracing::warn!(command = %cmd, "widget is not placed yet, command dropped");
            return Err(EvalError::new("widget is not placed yet"));
        }
        self.eval_script(&cmd.to_string())
    }

    /// Evaluate a raw script. Reserved for fixed helper procedures.
    pub fn eval_script(&self, script: &str) -> Result<(), EvalError> {
        tracing::debug!(%script, "eval");
        let outcome = self.inner.interp.eval(script);
        match outcome {
            Ok(result) => {
                *self.inner.last_result.borrow_mut() = result;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%script, error = %err, "command failed");
                *self.inner.last_result.borrow_mut() = err.message.clone();
                Err(err)
            }
        }
    }

    /// Evaluate and ignore failure; it has already been logged. This is the
    /// default for creation and placement commands.
    pub fn send(&self, cmd: &Command) {
        let _ = self.eval(cmd);
    }

    /// Evaluate and return the interpreter result
    pub fn query(&self, cmd: &Command) -> Result<String, EvalError> {
        self.eval(cmd)?;
        Ok(self.last_result())
    }

    pub fn last_result(&self) -> String {
        self.inner.last_result.borrow().clone()
    }

    // ---- callbacks ----

    /// Store `callback` and expose it to the interpreter as a new command
    pub fn register_callback(&self, callback: impl Fn(&str) + 'static) -> CallbackToken {
        let name = self.next_id();
        let handle = self
            .inner
            .callbacks
            .borrow_mut()
            .register(&name, Rc::new(callback));

        if let Err(err) = self.inner.interp.create_command(&name, handle) {
            tracing::warn!(command = %name, error = %err, "failed to create callback command");
        }
        CallbackToken { name, handle }
    }

    pub fn unregister_callback(&self, token: &CallbackToken) {
        let removed = self.inner.callbacks.borrow_mut().unregister(token.handle);
        if removed.is_some()
            && let Err(err) = self.inner.interp.delete_command(&token.name)
        {
            tracing::warn!(command = %token.name, error = %err, "failed to delete callback command");
        }
    }

    /// Entry point for the event loop: run the callback behind `handle`
    /// synchronously with the raw payload.
    ///
    /// # Panics
    /// If `handle` was never issued by this context. The interpreter and the
    /// registry disagree at that point and nothing sensible can follow.
    pub fn dispatch(&self, handle: Handle, payload: &str) {
        let lookup = self.inner.callbacks.borrow().get(handle);
        let callback = match lookup {
            Ok(callback) => callback,
            Err(err @ LookupError::OutOfRange { .. }) => {
                panic!("callback registry out of sync with interpreter: {err}")
            }
            Err(err @ LookupError::Stale(_)) => {
                tracing::warn!(%handle, error = %err, "dropping call to stale callback");
                return;
            }
        };

        tracing::debug!(%handle, %payload, "dispatch");
        callback(payload);
    }

    /// Weak dispatch handle for interpreter implementations, which are
    /// created before the context they call back into
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn callback_count(&self) -> usize {
        self.inner.callbacks.borrow().len()
    }

    // ---- widget map ----

    pub fn register_widget<T: Component + 'static>(&self, path: &str, widget: Rc<T>) {
        let entry = Registered {
            component: widget.clone(),
            any: widget,
        };
        self.inner
            .widgets
            .borrow_mut()
            .insert(path.to_string(), entry);
    }

    /// Drop `path` and every path below it from the widget map. Returns the
    /// number of entries removed.
    pub fn forget_widget(&self, path: &str) -> usize {
        let prefix = format!("{}.", path);
        let mut widgets = self.inner.widgets.borrow_mut();
        let before = widgets.len();
        widgets.retain(|key, _| key != path && !key.starts_with(&prefix));
        before - widgets.len()
    }

    /// The widget most recently materialized at `path`
    pub fn lookup(&self, path: &str) -> Option<Rc<dyn Component>> {
        self.inner
            .widgets
            .borrow()
            .get(path)
            .map(|entry| entry.component.clone())
    }

    /// Typed lookup: `None` when the path is unknown or holds another type
    pub fn lookup_as<T: 'static>(&self, path: &str) -> Option<Rc<T>> {
        let any = self.inner.widgets.borrow().get(path)?.any.clone();
        any.downcast::<T>().ok()
    }

    pub fn widget_count(&self) -> usize {
        self.inner.widgets.borrow().len()
    }

    // ---- variables ----

    pub fn set_var(&self, name: &str, value: impl fmt::Display) {
        if let Err(err) = self.inner.interp.set_var(name, &value.to_string()) {
            tracing::warn!(var = %name, error = %err, "failed to set variable");
        }
    }

    pub fn get_var(&self, name: &str) -> Option<String> {
        match self.inner.interp.get_var(name) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(var = %name, error = %err, "failed to read variable");
                None
            }
        }
    }

    pub fn unset_var(&self, name: &str) {
        if let Err(err) = self.inner.interp.unset_var(name) {
            tracing::warn!(var = %name, error = %err, "failed to unset variable");
        }
    }

    // ---- loop ----

    pub fn main_loop(&self) {
        self.inner.interp.main_loop();
    }

    pub fn poster(&self) -> Poster {
        self.inner.mailbox.poster()
    }

    /// Run every job posted from other threads, in posting order. Call from
    /// the loop thread (an idle handler or a timer callback).
    pub fn drain_posted(&self) -> usize {
        let mut ran = 0;
        while let Some(job) = self.inner.mailbox.next() {
            job(self);
            ran += 1;
        }
        ran
    }
}

/// Weak reference used by interpreter implementations to reach
/// [`Tk::dispatch`]
#[derive(Clone)]
pub struct Dispatcher {
    inner: Weak<Inner>,
}

impl Dispatcher {
    /// Returns `false` when the context has been dropped
    pub fn dispatch(&self, handle: Handle, payload: &str) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                Tk { inner }.dispatch(handle, payload);
                true
            }
            None => false,
        }
    }
}
