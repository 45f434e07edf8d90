// tkwire-widgets/src/text.rs
use std::rc::Rc;

use tkwire_core::{CallbackToken, Command, Component, Flags, Tk, WidgetBase};

use crate::common::Viewport;

/// Multi-line word-wrapped text area
pub struct Text {
    view: Viewport,
    initial: String,
}

impl Text {
    pub fn new(tk: &Tk, text: &str, flags: Flags) -> Rc<Self> {
        let init = Command::args()
            .opt("-wrap", "word")
            .opt("-width", 20)
            .opt("-height", 5);
        Rc::new(Self {
            view: Viewport::new(tk, "text", init, flags, true),
            initial: text.to_string(),
        })
    }

    pub fn path(&self) -> String {
        self.view.frame().path()
    }

    pub fn widget_path(&self) -> String {
        self.view.widget().path()
    }

    pub fn widget(&self) -> &WidgetBase {
        self.view.widget()
    }

    /// The viewport frame, which is what the parent places
    pub fn frame(&self) -> &WidgetBase {
        self.view.frame()
    }

    /// Bind `event` on the text area itself
    pub fn bind(&self, event: &str, params: &str, callback: impl Fn(&str) + 'static) -> CallbackToken {
        self.view.widget().bind(event, params, callback)
    }

    pub fn event_generate(&self, event: &str) {
        self.view.widget().event_generate(event);
    }

    /// Destroy the viewport together with the widget and its scrollbars
    pub fn destroy(&self) {
        self.view.destroy();
    }

    pub fn clear(&self) {
        let cmd = self.widget().command("delete").arg("1.0").arg("end");
        self.widget().tk().send(&cmd);
    }

    /// Insert at the very beginning
    pub fn insert(&self, text: &str) {
        let cmd = self.widget().command("insert").arg("1.0").arg(text);
        self.widget().tk().send(&cmd);
    }

    pub fn append(&self, text: &str) {
        let cmd = self.widget().command("insert").arg("end").arg(text);
        self.widget().tk().send(&cmd);
    }

    /// Whole content without surrounding whitespace
    pub fn get(&self) -> String {
        let cmd = self.widget().command("get").arg("1.0").arg("end");
        self.widget()
            .tk()
            .query(&cmd)
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }
}

impl Component for Text {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.view.create(parent);
        self.widget().tk().register_widget(&path, self.clone());
        if !self.initial.is_empty() {
            self.insert(&self.initial);
        }
        (path, flags)
    }
}
