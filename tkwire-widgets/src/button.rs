// tkwire-widgets/src/button.rs
use std::rc::Rc;

use tkwire_core::{CallbackToken, Command, Flags, Tk, WidgetBase};

pub struct Button {
    base: WidgetBase,
}

plain_component!(Button);

impl Button {
    pub fn new(tk: &Tk, text: &str, flags: Flags) -> Rc<Self> {
        let init = Command::args().opt("-text", text);
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::button", init, flags),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn set_text(&self, text: &str) {
        self.base.configure("-text", text);
    }

    pub fn text(&self) -> String {
        self.base.cget("-text").unwrap_or_default()
    }

    /// Run `callback` when the button is pressed
    pub fn on_press(&self, callback: impl Fn(&str) + 'static) -> CallbackToken {
        let token = self.base.tk().register_callback(callback);
        self.base.configure("-command", &token);
        token
    }

    /// Press the button programmatically
    pub fn invoke(&self) {
        self.base.tk().send(&self.base.command("invoke"));
    }

    pub fn set_width(&self, width: i32) {
        self.base.configure("-width", width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tkwire_core::{Component, Recorder};

    #[test]
    fn test_press_dispatches_to_callback() {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let button = Button::new(&tk, "OK", Flags::empty());
        button.clone().materialize("");

        let pressed = Rc::new(Cell::new(0));
        let counter = pressed.clone();
        let token = button.on_press(move |_| counter.set(counter.get() + 1));

        assert_eq!(rec.commands()[1], format!(".1 configure -command {}", token.name()));

        // the toolkit runs the command when the button is invoked
        let loop_tk = tk.clone();
        let handle = token.handle();
        rec.hook(".1 invoke", move |_| loop_tk.dispatch(handle, ""));
        button.invoke();
        assert_eq!(pressed.get(), 1);
    }
}
