// tkwire-widgets/src/root.rs
use std::cell::RefCell;
use std::rc::Rc;

use tkwire_core::{Command, Component, Container, EvalError, Flags, Tk};

use crate::button::Button;
use crate::label::Label;
use crate::stack::Stack;
use crate::table::install_sort_helper;

/// The main window: a horizontal toolbar on top, the main box in the middle
/// and a horizontal status bar at the bottom. Adding to the root adds to the
/// main box.
pub struct Root {
    tk: Tk,
    toolbar: Rc<Stack>,
    main: Rc<Stack>,
    status_bar: Rc<Stack>,
    status_fields: RefCell<Vec<Rc<Label>>>,
}

impl Root {
    pub fn init(tk: &Tk, title: &str, flags: Flags) -> Result<Self, EvalError> {
        install_sort_helper(tk)?;

        let toolbar = Self::bar(tk, Flags::HORIZONTAL, "x");
        let main = Self::bar(tk, flags, "both");
        let status_bar = Self::bar(tk, Flags::HORIZONTAL, "x");

        let root = Self {
            tk: tk.clone(),
            toolbar,
            main,
            status_bar,
            status_fields: RefCell::new(Vec::new()),
        };
        root.set_title(title);
        tracing::debug!(title, "root window initialized");
        Ok(root)
    }

    fn bar(tk: &Tk, flags: Flags, fill: &str) -> Rc<Stack> {
        let stack = Stack::new(tk, flags);
        let (path, _) = stack.clone().materialize("");
        let mut cmd = Command::new("pack")
            .arg(&path)
            .opt("-padx", 1)
            .opt("-pady", 1)
            .opt("-fill", fill);
        if fill == "both" {
            cmd = cmd.opt("-expand", "yes");
        }
        tk.send(&cmd);
        stack
    }

    pub fn tk(&self) -> &Tk {
        &self.tk
    }

    pub fn main(&self) -> &Rc<Stack> {
        &self.main
    }

    pub fn toolbar(&self) -> &Rc<Stack> {
        &self.toolbar
    }

    pub fn status_bar(&self) -> &Rc<Stack> {
        &self.status_bar
    }

    pub fn set_title(&self, title: &str) {
        self.tk.send(&Command::new("wm").arg("title").arg(".").arg(title));
    }

    pub fn set_size(&self, width: u32, height: u32) {
        let geometry = format!("{}x{}", width, height);
        self.tk
            .send(&Command::new("wm").arg("geometry").arg(".").arg(geometry));
    }

    /// Append an empty field to the status bar; returns its index
    pub fn add_status_field(&self) -> usize {
        let label = Label::new(&self.tk, "", Flags::empty());
        self.status_bar.add(&[label.clone()]);
        let mut fields = self.status_fields.borrow_mut();
        fields.push(label);
        fields.len() - 1
    }

    pub fn status_field_count(&self) -> usize {
        self.status_fields.borrow().len()
    }

    pub fn set_status(&self, field: usize, text: &str) {
        let label = self.status_fields.borrow().get(field).cloned();
        match label {
            Some(label) => label.set_text(text),
            None => tracing::warn!(field, "no such status field"),
        }
    }

    pub fn add_tool_button(&self, button: Rc<Button>) {
        self.toolbar.add(&[button]);
    }

    pub fn set_theme(&self, theme: &str) {
        self.tk.send(&Command::new("ttk::setTheme").arg(theme));
    }

    pub fn message_box(&self, message: &str) {
        self.tk
            .send(&Command::new("tk_messageBox").opt("-message", message));
    }

    /// Run the event loop until the main window closes
    pub fn main_loop(&self) {
        self.tk.main_loop();
    }
}

impl Container for Root {
    fn add(&self, children: &[Rc<dyn Component>]) {
        self.main.add(children);
    }
}
