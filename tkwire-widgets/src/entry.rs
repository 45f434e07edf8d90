// tkwire-widgets/src/entry.rs
use std::rc::Rc;

use tkwire_core::{CallbackToken, Command, Component, Flags, Tk, WidgetBase};

use crate::common::dot_decimal;

/// Single-line text input; [`Flags::PASSWORD`] masks the input
pub struct Entry {
    base: WidgetBase,
    initial: String,
}

impl Entry {
    pub fn new(tk: &Tk, text: &str, flags: Flags) -> Rc<Self> {
        let mut init = Command::args();
        if flags.contains(Flags::PASSWORD) {
            init = init.opt("-show", "*");
        }
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::entry", init, flags),
            initial: text.to_string(),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn clear(&self) {
        self.base
            .tk()
            .send(&self.base.command("delete").arg(0).arg("end"));
    }

    pub fn set_text(&self, text: &str) {
        self.clear();
        self.insert(text);
    }

    pub fn text(&self) -> String {
        self.base
            .tk()
            .query(&self.base.command("get"))
            .unwrap_or_default()
    }

    /// Text with the first decimal comma turned into a dot
    pub fn dot_text(&self) -> String {
        dot_decimal(&self.text())
    }

    /// Call `callback` with the current text when Return is pressed
    pub fn on_enter(self: &Rc<Self>, callback: impl Fn(&str) + 'static) -> CallbackToken {
        let entry = Rc::downgrade(self);
        self.base.bind("<Key-Return>", "", move |_| {
            if let Some(entry) = entry.upgrade() {
                callback(&entry.text());
            }
        })
    }

    fn insert(&self, text: &str) {
        self.base
            .tk()
            .send(&self.base.command("insert").arg(0).arg(text));
    }
}

impl Component for Entry {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.base.create(parent);
        self.base.tk().register_widget(&path, self.clone());
        self.insert(&self.initial);
        (path, flags)
    }
}
