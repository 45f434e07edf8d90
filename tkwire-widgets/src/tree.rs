// tkwire-widgets/src/tree.rs
use std::rc::Rc;

use tkwire_core::{CallbackToken, Command, Component, Flags, Tk, WidgetBase, parse_list};

use crate::common::{Viewport, treeview};
use crate::error::SelectionError;

/// Hierarchical item view (`ttk::treeview -show tree`)
pub struct Tree {
    view: Viewport,
}

impl Tree {
    pub fn new(tk: &Tk, flags: Flags) -> Rc<Self> {
        let init = Command::args().opt("-show", "tree");
        Rc::new(Self {
            view: Viewport::new(tk, "ttk::treeview", init, flags, true),
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

    /// Bind `event` on the tree itself
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

    /// Id and column values of the first selected item
    pub fn selection(&self) -> Option<(String, Vec<String>)> {
        let id = treeview::selected_item(self.widget())?;
        let values = treeview::item_option(self.widget(), &id, "-values")?;
        Some((id, parse_list(&values).ok()?))
    }

    pub fn on_select(
        self: &Rc<Self>,
        callback: impl Fn(&str, &[String]) + 'static,
    ) -> CallbackToken {
        let tree = Rc::downgrade(self);
        self.widget().bind("<<TreeviewSelect>>", "", move |_| {
            if let Some((id, values)) = tree.upgrade().and_then(|tree| tree.selection()) {
                callback(&id, &values);
            }
        })
    }

    /// Data columns shown next to the tree column
    pub fn columns(&self, columns: &[&str]) {
        let cmd = self.widget().command("configure").arg("-columns").list(columns);
        self.widget().tk().send(&cmd);
    }

    /// Append an item under `parent` (`""` is the root), expanded when `open`
    pub fn insert(&self, parent: &str, id: &str, text: &str, values: Option<&[String]>, open: bool) {
        let mut cmd = treeview::insert_command(self.widget(), parent, id, text);
        if let Some(values) = values {
            cmd = cmd.arg("-values").list(values);
        }
        if open {
            cmd = cmd.opt("-open", "true");
        }
        self.widget().tk().send(&cmd);
    }

    /// Append an unnamed item carrying only column values
    pub fn insert_data(&self, parent: &str, values: &[String]) {
        let cmd = self
            .widget()
            .command("insert")
            .arg(parent)
            .arg("end")
            .arg("-values")
            .list(values);
        self.widget().tk().send(&cmd);
    }

    pub fn clear(&self) {
        treeview::clear(self.widget());
    }

    pub fn set_selection(&self, id: &str) -> Result<(), SelectionError> {
        treeview::select(self.widget(), id)
    }

    /// Width of the tree column in pixels
    pub fn set_width(&self, width: i32) {
        let cmd = self.widget().command("column").arg("#0").opt("-width", width);
        self.widget().tk().send(&cmd);
    }
}

impl Component for Tree {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.view.create(parent);
        self.widget().tk().register_widget(&path, self.clone());
        (path, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkwire_core::Recorder;

    fn tree() -> (Rc<Recorder>, Rc<Tree>) {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let tree = Tree::new(&tk, Flags::empty());
        let (_, flags) = tree.clone().materialize("");
        assert!(flags.contains(Flags::EXPAND));
        rec.take();
        (rec, tree)
    }

    #[test]
    fn test_insert_open_and_closed() {
        let (rec, tree) = tree();
        let values = vec!["12 kB".to_string(), "rw".to_string()];
        tree.insert("", "home", "Home dir", Some(&values), true);
        tree.insert("home", "docs", "docs", None, false);
        tree.set_width(120);

        assert_eq!(
            rec.commands(),
            vec![
                ".1.2 insert {} end -id home -text \"Home dir\" -values {{12 kB} rw} -open true",
                ".1.2 insert home end -id docs -text docs",
                ".1.2 column #0 -width 120",
            ]
        );
    }

    #[test]
    fn test_selection_and_clear() {
        let (rec, tree) = tree();
        rec.respond(".1.2 selection", "docs");
        rec.respond(".1.2 item docs -values", "{12 kB} rw");
        assert_eq!(
            tree.selection(),
            Some(("docs".to_string(), vec!["12 kB".to_string(), "rw".to_string()]))
        );

        tree.clear();
        assert_eq!(
            rec.commands().last().unwrap(),
            ".1.2 delete [.1.2 children {}]"
        );
    }

    #[test]
    fn test_set_selection_reports_unknown_item() {
        let (rec, tree) = tree();
        rec.fail(".1.2 see", "Item ghost not found");
        assert!(matches!(
            tree.set_selection("ghost"),
            Err(SelectionError::NoSuchItem(id)) if id == "ghost"
        ));
        assert_eq!(rec.commands()[0], ".1.2 selection set {ghost}");
    }
}
