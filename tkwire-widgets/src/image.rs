// tkwire-widgets/src/image.rs
use std::rc::Rc;

use tkwire_core::{Command, Component, Flags, Tk, WidgetBase};

/// Shows a named photo image created elsewhere (`image create photo ...`)
pub struct Image {
    base: WidgetBase,
    image: String,
}

impl Image {
    pub fn new(tk: &Tk, image: &str, flags: Flags) -> Rc<Self> {
        Rc::new(Self {
            base: WidgetBase::new(tk, "label", Command::args(), flags),
            image: image.to_string(),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn set_image(&self, image: &str) {
        self.base.configure("-image", image);
    }
}

impl Component for Image {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.base.create(parent);
        self.base.tk().register_widget(&path, self.clone());
        self.set_image(&self.image);
        (path, flags)
    }
}
