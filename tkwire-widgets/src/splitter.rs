// tkwire-widgets/src/splitter.rs
use std::rc::Rc;

use tkwire_core::{Command, Component, Container, Flags, Tk, WidgetBase};

/// Resizable panes. Expanding children get weight 1 and share extra space;
/// the rest get weight 0 and keep their size.
pub struct Splitter {
    base: WidgetBase,
}

plain_component!(Splitter);

impl Splitter {
    pub fn new(tk: &Tk, flags: Flags) -> Rc<Self> {
        let mut init = Command::args();
        if flags.is_horizontal() {
            init = init.opt("-orient", "horizontal");
        }
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::panedwindow", init, flags),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }
}

impl Container for Splitter {
    fn add(&self, children: &[Rc<dyn Component>]) {
        let Some(path) = self.base.placed_path("add") else {
            return;
        };
        for child in children {
            let (child_path, child_flags) = child.clone().materialize(&path);
            let weight = if child_flags.expands() { 1 } else { 0 };
            self.base.tk().send(
                &Command::new(&path)
                    .arg("add")
                    .arg(&child_path)
                    .opt("-weight", weight),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;
    use tkwire_core::Recorder;

    #[test]
    fn test_pane_weights_follow_expand() {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let split = Splitter::new(&tk, Flags::HORIZONTAL);
        split.clone().materialize("");

        split.add(&[
            Label::new(&tk, "wide", Flags::EXPAND),
            Label::new(&tk, "narrow", Flags::empty()),
        ]);

        let commands = rec.commands();
        assert_eq!(commands[0], "ttk::panedwindow .1 -orient horizontal");
        assert_eq!(
            rec.commands_starting_with(".1 add"),
            vec![".1 add .1.2 -weight 1", ".1 add .1.3 -weight 0"]
        );
    }
}
