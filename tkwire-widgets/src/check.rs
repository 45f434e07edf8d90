// tkwire-widgets/src/check.rs
use std::cell::RefCell;
use std::rc::Rc;

use tkwire_core::{CallbackToken, Command, Component, Flags, Tk, WidgetBase};

/// Check box backed by a toolkit variable
pub struct Check {
    base: WidgetBase,
    initial: bool,
    variable: RefCell<String>,
}

impl Check {
    pub fn new(tk: &Tk, text: &str, checked: bool, flags: Flags) -> Rc<Self> {
        let init = Command::args().opt("-text", text);
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::checkbutton", init, flags),
            initial: checked,
            variable: RefCell::new(String::new()),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    /// Name of the backing variable; empty until materialized
    pub fn variable(&self) -> String {
        self.variable.borrow().clone()
    }

    pub fn get(&self) -> bool {
        self.base
            .tk()
            .get_var(&self.variable())
            .is_some_and(|value| value != "0")
    }

    pub fn set(&self, checked: bool) {
        self.base
            .tk()
            .set_var(&self.variable(), if checked { 1 } else { 0 });
    }

    pub fn on_toggle(&self, callback: impl Fn(&str) + 'static) -> CallbackToken {
        let token = self.base.tk().register_callback(callback);
        self.base.configure("-command", &token);
        token
    }
}

impl Component for Check {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.base.create(parent);
        let tk = self.base.tk();
        tk.register_widget(&path, self.clone());

        let variable = tk.next_id();
        *self.variable.borrow_mut() = variable.clone();
        self.set(self.initial);
        self.base.configure("-variable", &variable);
        (path, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkwire_core::Recorder;

    #[test]
    fn test_variable_backs_state() {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let check = Check::new(&tk, "Remember", true, Flags::empty());
        check.clone().materialize("");

        assert_eq!(check.variable(), "2");
        assert_eq!(
            rec.commands(),
            vec![
                "ttk::checkbutton .1 -text Remember",
                "set 2 1",
                ".1 configure -variable 2",
            ]
        );
        assert!(check.get());

        check.set(false);
        assert!(!check.get());
        assert_eq!(rec.var("2").as_deref(), Some("0"));
    }
}
