// tkwire-widgets/src/dialog.rs
use std::cell::Cell;
use std::rc::Rc;

use tkwire_core::{CallbackToken, Command, Component, Container, Flags, Tk, child_path};

use crate::stack::Stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Created,
    Visible,
    Grabbed,
    Withdrawn,
    Destroyed,
}

/// Toplevel window holding one box. Modal unless [`Flags::NOT_MODAL`];
/// a non-modal dialog is only hidden by [`Dialog::destroy`] and can be
/// shown again.
pub struct Dialog {
    tk: Tk,
    path: String,
    flags: Flags,
    stack: Rc<Stack>,
    close_request: CallbackToken,
    state: Cell<DialogState>,
}

impl Dialog {
    pub fn new(tk: &Tk, title: &str, flags: Flags) -> Rc<Self> {
        let path = child_path("", &tk.next_id());
        tk.send(&Command::new("toplevel").arg(&path));
        tk.send(&wm("title", &path).arg(title));
        tk.send(&wm("geometry", &path).arg("+50+50"));
        if flags.contains(Flags::TOPMOST) {
            tk.send(&wm("attributes", &path).opt("-topmost", 1));
        }

        // the window manager's close button does nothing; the dialog closes
        // through its own controls
        let window = path.clone();
        let close_request = tk.register_callback(move |_| {
            tracing::trace!(dialog = %window, "ignoring close request");
        });
        tk.send(
            &wm("protocol", &path)
                .arg("WM_DELETE_WINDOW")
                .script(close_request.name()),
        );

        let stack = Stack::new(tk, flags);
        let (stack_path, _) = stack.clone().materialize(&path);
        tk.send(
            &Command::new("pack")
                .arg(&stack_path)
                .opt("-expand", "yes")
                .opt("-fill", "both"),
        );

        Rc::new(Self {
            tk: tk.clone(),
            path,
            flags,
            stack,
            close_request,
            state: Cell::new(DialogState::Created),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> DialogState {
        self.state.get()
    }

    pub fn is_modal(&self) -> bool {
        !self.flags.contains(Flags::NOT_MODAL)
    }

    /// Show the dialog. A modal dialog grabs input and returns only once
    /// the window is gone.
    pub fn call(&self) {
        self.tk.send(&Command::new("focus").arg(&self.path));
        self.tk
            .send(&Command::new("tkwait").arg("visibility").arg(&self.path));
        self.state.set(DialogState::Visible);
        if !self.is_modal() {
            return;
        }

        self.tk.send(&Command::new("grab").arg(&self.path));
        self.state.set(DialogState::Grabbed);
        self.tk
            .send(&Command::new("tkwait").arg("window").arg(&self.path));

        // a callback may already have destroyed it while we waited
        if self.state.get() != DialogState::Destroyed {
            self.release();
        }
    }

    /// Bring a withdrawn dialog back
    pub fn show(&self) {
        self.tk.send(&wm("deiconify", &self.path));
        self.state.set(DialogState::Visible);
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.tk
            .send(&wm("geometry", &self.path).arg(format!("{}x{}", width, height)));
    }

    /// Close the dialog: hide it when non-modal, destroy it otherwise
    pub fn destroy(&self) {
        if !self.is_modal() {
            self.tk.send(&wm("withdraw", &self.path));
            self.state.set(DialogState::Withdrawn);
            return;
        }

        self.tk.send(&Command::new("destroy").arg(&self.path));
        self.release();
    }

    fn release(&self) {
        let forgotten = self.tk.forget_widget(&self.path);
        self.tk.unregister_callback(&self.close_request);
        self.state.set(DialogState::Destroyed);
        tracing::debug!(dialog = %self.path, forgotten, "dialog destroyed");
    }
}

impl Container for Dialog {
    fn add(&self, children: &[Rc<dyn Component>]) {
        self.stack.add(children);
    }
}

fn wm(subcommand: &str, path: &str) -> Command {
    Command::new("wm").arg(subcommand).arg(path)
}
