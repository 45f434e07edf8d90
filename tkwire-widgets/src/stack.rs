// tkwire-widgets/src/stack.rs
use std::rc::Rc;

use tkwire_core::{Command, Component, Container, Flags, Tk, WidgetBase};

/// Linear box: packs children one after another, stacked top to bottom or,
/// with [`Flags::HORIZONTAL`], left to right.
pub struct Stack {
    base: WidgetBase,
}

plain_component!(Stack);

impl Stack {
    pub fn new(tk: &Tk, flags: Flags) -> Rc<Self> {
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::frame", Command::args(), flags),
        })
    }

    /// Wrap a window that already exists (the main window is `""`)
    pub fn attach(tk: &Tk, path: &str, flags: Flags) -> Rc<Self> {
        let stack = Self::new(tk, flags);
        stack.base.adopt(path);
        stack
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn destroy(&self) {
        self.base.destroy();
    }

    pub fn destroy_children(&self) {
        self.base.destroy_children();
    }

    /// Placement of one child under this box's packing policy
    fn placement(&self, child: &str, child_flags: Flags) -> Command {
        let horizontal = self.base.flags().is_horizontal();
        let mut cmd = Command::new("pack")
            .arg(child)
            .opt("-padx", 1)
            .opt("-pady", 1);
        if horizontal {
            cmd = cmd.opt("-side", "left");
        }

        if child_flags.expands() {
            cmd.opt("-fill", "both").opt("-expand", "yes")
        } else if horizontal {
            cmd.opt("-fill", "y")
        } else {
            cmd.opt("-fill", "x")
        }
    }
}

impl Container for Stack {
    fn add(&self, children: &[Rc<dyn Component>]) {
        let Some(path) = self.base.placed_path("add") else {
            return;
        };
        for child in children {
            let (child_path, child_flags) = child.clone().materialize(&path);
            self.base.tk().send(&self.placement(&child_path, child_flags));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;
    use tkwire_core::Recorder;

    fn context() -> (Rc<Recorder>, Tk) {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        (rec, tk)
    }

    #[test]
    fn test_horizontal_box_with_two_labels() {
        let (rec, tk) = context();
        let row = Stack::attach(&tk, ".root", Flags::HORIZONTAL);
        let a = Label::new(&tk, "A", Flags::empty());
        let b = Label::new(&tk, "B", Flags::empty());

        row.add(&[a.clone(), b.clone()]);

        assert_eq!(a.path(), ".root.1");
        assert_eq!(b.path(), ".root.2");
        assert_eq!(
            rec.commands_starting_with("pack"),
            vec![
                "pack .root.1 -padx 1 -pady 1 -side left -fill y",
                "pack .root.2 -padx 1 -pady 1 -side left -fill y",
            ]
        );
    }

    #[test]
    fn test_vertical_fill_policy() {
        let (rec, tk) = context();
        let column = Stack::new(&tk, Flags::empty());
        column.clone().materialize("");

        let grows = Label::new(&tk, "grows", Flags::EXPAND);
        let fixed = Label::new(&tk, "fixed", Flags::empty());
        column.add(&[grows, fixed]);

        assert_eq!(
            rec.commands_starting_with("pack"),
            vec![
                "pack .1.2 -padx 1 -pady 1 -fill both -expand yes",
                "pack .1.3 -padx 1 -pady 1 -fill x",
            ]
        );
    }

    #[test]
    fn test_materialize_registers_path() {
        let (_rec, tk) = context();
        let inner = Stack::new(&tk, Flags::empty());
        let (path, _) = inner.clone().materialize(".top");

        assert!(path.starts_with(".top."));
        let found = tk.lookup_as::<Stack>(&path).unwrap();
        assert!(Rc::ptr_eq(&found, &inner));
        assert!(tk.lookup(&path).is_some());
    }

    #[test]
    fn test_destroy_prunes_subtree() {
        let (_rec, tk) = context();
        let outer = Stack::new(&tk, Flags::empty());
        outer.clone().materialize("");
        let inner = Stack::new(&tk, Flags::empty());
        outer.add(&[inner.clone()]);
        inner.add(&[Label::new(&tk, "x", Flags::empty())]);
        assert_eq!(tk.widget_count(), 3);

        outer.destroy();
        assert_eq!(tk.widget_count(), 0);
        assert!(tk.lookup(&inner.path()).is_none());
    }

    #[test]
    fn test_unplaced_widgets_leave_the_tree_alone() {
        let (rec, tk) = context();
        let main = Stack::new(&tk, Flags::empty());
        main.clone().materialize("");
        main.add(&[Label::new(&tk, "placed", Flags::empty())]);
        assert_eq!(tk.widget_count(), 2);
        rec.take();

        let stray = Label::new(&tk, "stray", Flags::empty());
        stray.set_text("x");
        stray.base().destroy();
        let loose = Stack::new(&tk, Flags::empty());
        loose.add(&[Label::new(&tk, "orphan", Flags::empty())]);

        assert!(rec.commands().is_empty());
        assert_eq!(tk.widget_count(), 2);
    }
}
