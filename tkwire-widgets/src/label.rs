// tkwire-widgets/src/label.rs
use std::rc::Rc;

use tkwire_core::{Command, Flags, Tk, WidgetBase};

/// Static text
pub struct Label {
    base: WidgetBase,
}

plain_component!(Label);

impl Label {
    pub fn new(tk: &Tk, text: &str, flags: Flags) -> Rc<Self> {
        let init = Command::args().opt("-text", text);
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::label", init, flags),
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

    /// Foreground and background colours; `None` leaves one unchanged
    pub fn color(&self, fg: Option<&str>, bg: Option<&str>) {
        if let Some(fg) = fg {
            self.base.configure("-foreground", fg);
        }
        if let Some(bg) = bg {
            self.base.configure("-background", bg);
        }
    }
}
