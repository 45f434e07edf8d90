// tkwire-widgets/src/combobox.rs
use std::cell::RefCell;
use std::rc::Rc;

use tkwire_core::{CallbackToken, Command, Component, Flags, Tk, WidgetBase};

use crate::error::SelectionError;

/// Read-only drop-down list
pub struct Combobox {
    base: WidgetBase,
    values: RefCell<Vec<String>>,
}

impl Combobox {
    pub fn new(tk: &Tk, values: Vec<String>, flags: Flags) -> Rc<Self> {
        let init = Command::args()
            .opt("-state", "readonly")
            .arg("-values")
            .list(&values);
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::combobox", init, flags),
            values: RefCell::new(values),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn values(&self) -> Vec<String> {
        self.values.borrow().clone()
    }

    fn select_first(&self) {
        if !self.values.borrow().is_empty() {
            self.base.tk().send(&self.base.command("current").arg(0));
        }
    }

    /// Replace the choices and select the first one
    pub fn update(&self, values: Vec<String>) {
        let cmd = self.base.command("configure").arg("-values").list(&values);
        self.base.tk().send(&cmd);
        *self.values.borrow_mut() = values;
        self.select_first();
    }

    pub fn set_selection(&self, index: usize) -> Result<(), SelectionError> {
        if index >= self.values.borrow().len() {
            return Err(SelectionError::NoSuchItem(index.to_string()));
        }
        self.base.tk().eval(&self.base.command("current").arg(index))?;
        self.base.event_generate("<<ComboboxSelected>>");
        Ok(())
    }

    /// Show `value` even if it is not one of the choices
    pub fn set_value(&self, value: &str) {
        self.base.tk().send(&self.base.command("set").arg(value));
        self.base.event_generate("<<ComboboxSelected>>");
    }

    /// Index and text of the current choice
    pub fn selection(&self) -> Option<(usize, String)> {
        let tk = self.base.tk();
        let current = tk.query(&self.base.command("current")).ok()?;
        // -1 when the shown value is not one of the choices
        let index: usize = current.trim().parse().ok()?;
        let value = tk.query(&self.base.command("get")).ok()?;
        Some((index, value))
    }

    pub fn on_select(self: &Rc<Self>, callback: impl Fn(usize, &str) + 'static) -> CallbackToken {
        let combobox = Rc::downgrade(self);
        self.base.bind("<<ComboboxSelected>>", "", move |_| {
            if let Some((index, value)) = combobox.upgrade().and_then(|c| c.selection()) {
                callback(index, &value);
            }
        })
    }

    pub fn set_width(&self, width: i32) {
        self.base.configure("-width", width);
    }
}

impl Component for Combobox {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.base.create(parent);
        self.base.tk().register_widget(&path, self.clone());
        self.select_first();
        (path, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkwire_core::Recorder;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_create_selects_first_value() {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let combo = Combobox::new(&tk, values(&["red", "dark blue"]), Flags::empty());
        combo.clone().materialize("");

        assert_eq!(
            rec.commands(),
            vec![
                "ttk::combobox .1 -state readonly -values {red {dark blue}}",
                ".1 current 0",
            ]
        );

        rec.respond(".1 current", "1");
        rec.respond(".1 get", "dark blue");
        assert_eq!(combo.selection(), Some((1, "dark blue".to_string())));
    }

    #[test]
    fn test_value_outside_choices_has_no_index() {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let combo = Combobox::new(&tk, Vec::new(), Flags::empty());
        combo.clone().materialize("");
        assert_eq!(rec.commands().len(), 1);

        combo.set_value("custom");
        rec.respond(".1 current", "-1");
        assert_eq!(combo.selection(), None);
        assert!(combo.set_selection(0).is_err());
    }
}
