// tkwire-widgets/src/common/scroll.rs
use std::cell::RefCell;

use tkwire_core::{Command, Flags, Tk, WidgetBase, child_path};

/// Frame that hosts one real widget at grid cell (0,0) plus optional
/// scrollbars at (0,1) and (1,0). Row 0 and column 0 always carry weight 1,
/// so the hosted widget fills whatever the frame is given.
pub struct Viewport {
    frame: WidgetBase,
    inner: WidgetBase,
    scrollbars: RefCell<(Option<String>, Option<String>)>,
}

impl Viewport {
    /// `always_expand` makes the frame report EXPAND to its parent whatever
    /// the widget flags say; otherwise only the widget's own EXPAND bit
    /// reaches the parent.
    pub fn new(tk: &Tk, kind: &'static str, init: Command, flags: Flags, always_expand: bool) -> Self {
        let frame_flags = if always_expand {
            flags | Flags::EXPAND
        } else {
            flags & Flags::EXPAND
        };

        Self {
            frame: WidgetBase::new(tk, "ttk::frame", Command::args(), frame_flags),
            inner: WidgetBase::new(tk, kind, init, flags),
            scrollbars: RefCell::new((None, None)),
        }
    }

    /// Create frame, widget and scrollbars; returns the frame's path and
    /// flags, which is what the parent places
    pub fn create(&self, parent: &str) -> (String, Flags) {
        let tk = self.frame.tk();
        let (frame, frame_flags) = self.frame.create(parent);
        let (inner, _) = self.inner.create(&frame);

        tk.send(&grid_cell(&inner, 0, 0, "news"));

        let flags = self.inner.flags();
        let vertical = flags.contains(Flags::SCROLL_Y).then(|| {
            let bar = child_path(&frame, &tk.next_id());
            link_scrollbar(tk, &inner, &bar, "y", "vertical");
            tk.send(&grid_cell(&bar, 0, 1, "ns"));
            bar
        });
        let horizontal = flags.contains(Flags::SCROLL_X).then(|| {
            let bar = child_path(&frame, &tk.next_id());
            link_scrollbar(tk, &inner, &bar, "x", "horizontal");
            tk.send(&grid_cell(&bar, 1, 0, "ew"));
            bar
        });
        *self.scrollbars.borrow_mut() = (vertical, horizontal);

        for axis in ["rowconfigure", "columnconfigure"] {
            tk.send(
                &Command::new("grid")
                    .arg(axis)
                    .arg(&frame)
                    .arg(0)
                    .opt("-weight", 1),
            );
        }

        (frame, frame_flags)
    }

    /// The hosted widget
    pub fn widget(&self) -> &WidgetBase {
        &self.inner
    }

    pub fn frame(&self) -> &WidgetBase {
        &self.frame
    }

    /// Paths of the (vertical, horizontal) scrollbars, if any
    pub fn scrollbars(&self) -> (Option<String>, Option<String>) {
        self.scrollbars.borrow().clone()
    }

    pub fn destroy(&self) {
        self.frame.destroy();
    }
}

fn grid_cell(path: &str, row: usize, column: usize, sticky: &str) -> Command {
    Command::new("grid")
        .arg(path)
        .opt("-row", row)
        .opt("-column", column)
        .opt("-sticky", sticky)
}

fn link_scrollbar(tk: &Tk, widget: &str, bar: &str, axis: &str, orient: &str) {
    tk.send(
        &Command::new(widget)
            .arg("configure")
            .opt(&format!("-{}scrollcommand", axis), format!("{} set", bar)),
    );
    tk.send(
        &Command::new("ttk::scrollbar")
            .arg(bar)
            .opt("-orient", orient)
            .opt("-command", format!("{} {}view", widget, axis)),
    );
}
