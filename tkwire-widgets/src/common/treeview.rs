// tkwire-widgets/src/common/treeview.rs
//! Item operations shared by [`crate::Tree`] and [`crate::Table`], which
//! both wrap a `ttk::treeview`.

use tkwire_core::{Command, WidgetBase};

use super::first_item;
use crate::error::SelectionError;

/// Id of the first selected item
pub fn selected_item(view: &WidgetBase) -> Option<String> {
    let selected = view.tk().query(&view.command("selection")).ok()?;
    first_item(&selected)
}

/// `<view> item <id> <option>`
pub fn item_option(view: &WidgetBase, id: &str, option: &str) -> Option<String> {
    view.tk()
        .query(&view.command("item").arg(id).arg(option))
        .ok()
}

/// Top-level item ids
pub fn children(view: &WidgetBase) -> Vec<String> {
    view.tk()
        .query(&view.command("children").arg(""))
        .ok()
        .and_then(|listing| tkwire_core::parse_list(&listing).ok())
        .unwrap_or_default()
}

/// Delete every top-level item (and with it the whole tree)
pub fn clear(view: &WidgetBase) {
    let children = format!("[{} children {{}}]", view.path());
    view.tk().send(&view.command("delete").raw(children));
}

/// Select `id` and scroll it into view
pub fn select(view: &WidgetBase, id: &str) -> Result<(), SelectionError> {
    let tk = view.tk();
    let set = view.command("selection").arg("set").list([id]);
    let see = view.command("see").arg(id);
    if tk.eval(&set).is_err() || tk.eval(&see).is_err() {
        return Err(SelectionError::NoSuchItem(id.to_string()));
    }
    Ok(())
}

/// `<view> insert <parent> end -id <id> -text <text> [-values <list>]`
pub fn insert_command(view: &WidgetBase, parent: &str, id: &str, text: &str) -> Command {
    view.command("insert")
        .arg(parent)
        .arg("end")
        .opt("-id", id)
        .opt("-text", text)
}
