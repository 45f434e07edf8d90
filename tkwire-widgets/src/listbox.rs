// tkwire-widgets/src/listbox.rs
use std::cell::RefCell;
use std::rc::Rc;

use tkwire_core::{
    CallbackToken, Command, Component, Flags, Tk, WidgetBase, list_string, parse_list,
};

use crate::common::{Viewport, first_item, index_of_value};
use crate::error::SelectionError;

/// Plain listbox whose items live in a toolkit list variable
pub struct Listbox {
    view: Viewport,
    variable: String,
    list: RefCell<Vec<String>>,
}

impl Listbox {
    pub fn new(tk: &Tk, list: Vec<String>, flags: Flags) -> Rc<Self> {
        let variable = tk.next_id();
        let init = Command::args().opt("-listvariable", &variable);
        Rc::new(Self {
            view: Viewport::new(tk, "listbox", init, flags, false),
            variable,
            list: RefCell::new(list),
        })
    }

    /// Path of the viewport frame, which is what the parent places
    pub fn path(&self) -> String {
        self.view.frame().path()
    }

    /// Path of the listbox itself
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

    /// Bind `event` on the listbox itself
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

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn list(&self) -> Vec<String> {
        self.list.borrow().clone()
    }

    /// Replace the shown items without touching the stored list
    pub fn update_with_list(&self, list: &[String]) {
        self.view.widget().tk().set_var(&self.variable, list_string(list));
    }

    /// Show the stored list
    pub fn list_to_box(&self) {
        let list = self.list();
        self.update_with_list(&list);
    }

    /// Replace the stored list; call [`Listbox::list_to_box`] to show it
    pub fn update_list(&self, list: Vec<String>) {
        *self.list.borrow_mut() = list;
    }

    pub fn clear(&self) {
        let widget = self.view.widget();
        widget.tk().send(&widget.command("delete").arg(0).arg("end"));
    }

    /// Index and text of the first selected item
    pub fn selection(&self) -> Option<(usize, String)> {
        let widget = self.view.widget();
        let tk = widget.tk();
        let selected = tk.query(&widget.command("curselection")).ok()?;
        let index: usize = first_item(&selected)?.parse().ok()?;
        let value = tk.query(&widget.command("get").arg(index)).ok()?;
        Some((index, value))
    }

    /// Call `callback` with the selected index and text
    pub fn on_select(self: &Rc<Self>, callback: impl Fn(usize, &str) + 'static) -> CallbackToken {
        let listbox = Rc::downgrade(self);
        self.view.widget().bind("<<ListboxSelect>>", "", move |_| {
            let selected = listbox.upgrade().and_then(|listbox| listbox.selection());
            if let Some((index, value)) = selected {
                callback(index, &value);
            }
        })
    }

    pub fn set_selection(&self, index: usize) -> Result<(), SelectionError> {
        if index >= self.shown().len() {
            return Err(SelectionError::NoSuchItem(index.to_string()));
        }

        let widget = self.view.widget();
        let tk = widget.tk();
        tk.eval(&widget.command("activate").arg(index))?;
        tk.eval(&widget.command("selection").arg("set").arg(index))?;
        tk.eval(&widget.command("see").arg(index))?;
        widget.event_generate("<<ListboxSelect>>");
        Ok(())
    }

    pub fn set_selection_value(&self, value: &str) -> Result<(), SelectionError> {
        let index = index_of_value(&self.list.borrow(), value)
            .ok_or_else(|| SelectionError::ValueNotFound(value.to_string()))?;
        self.set_selection(index)
    }

    /// Items as the toolkit currently holds them
    pub fn shown(&self) -> Vec<String> {
        self.view
            .widget()
            .tk()
            .get_var(&self.variable)
            .and_then(|value| parse_list(&value).ok())
            .unwrap_or_default()
    }
}

impl Component for Listbox {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.view.create(parent);
        self.view.widget().tk().register_widget(&path, self.clone());
        self.list_to_box();
        (path, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tkwire_core::Recorder;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn listbox() -> (Rc<Recorder>, Tk, Rc<Listbox>) {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let lb = Listbox::new(&tk, items(&["alpha", "beta gamma"]), Flags::EXPAND);
        lb.clone().materialize("");
        (rec, tk, lb)
    }

    #[test]
    fn test_list_variable_holds_items() {
        let (rec, _tk, lb) = listbox();
        assert_eq!(lb.path(), ".2");
        assert_eq!(lb.widget_path(), ".2.3");
        assert_eq!(rec.commands()[1], "listbox .2.3 -listvariable 1");
        assert_eq!(rec.var("1").as_deref(), Some("alpha {beta gamma}"));
        assert_eq!(lb.shown(), items(&["alpha", "beta gamma"]));

        lb.update_list(items(&["x"]));
        assert_eq!(lb.shown().len(), 2);
        lb.list_to_box();
        assert_eq!(lb.shown(), items(&["x"]));
    }

    #[test]
    fn test_set_selection_value_fires_select() {
        let (rec, tk, lb) = listbox();
        let picked = Rc::new(Cell::new(usize::MAX));
        let sink = picked.clone();
        lb.on_select(move |index, _| sink.set(index));

        let token_name = rec.commands().last().unwrap().clone();
        let name = token_name
            .trim_start_matches("bind .2.3 <<ListboxSelect>> {")
            .trim_end_matches('}')
            .to_string();
        let handle = rec.handle_of(&name).unwrap();
        let hook_tk = tk.clone();
        rec.hook("event generate .2.3 <<ListboxSelect>>", move |_| {
            hook_tk.dispatch(handle, "")
        });
        rec.respond(".2.3 curselection", "1");
        rec.respond(".2.3 get 1", "beta gamma");

        lb.set_selection_value("beta gamma").unwrap();
        assert_eq!(picked.get(), 1);
        assert_eq!(lb.selection(), Some((1, "beta gamma".to_string())));
    }

    #[test]
    fn test_selection_errors() {
        let (_rec, _tk, lb) = listbox();
        assert!(matches!(
            lb.set_selection(5),
            Err(SelectionError::NoSuchItem(_))
        ));
        assert!(matches!(
            lb.set_selection_value("zeta"),
            Err(SelectionError::ValueNotFound(_))
        ));
        assert_eq!(lb.selection(), None);
    }

    #[test]
    fn test_selection_bounds_follow_shown_items() {
        let (rec, _tk, lb) = listbox();
        lb.update_with_list(&items(&["a", "b", "c", "d"]));
        assert_eq!(lb.list().len(), 2);

        lb.set_selection(3).unwrap();
        assert!(rec.commands().contains(&".2.3 selection set 3".to_string()));
        assert!(lb.set_selection(4).is_err());
    }

    #[test]
    fn test_destroy_removes_frame_from_map() {
        let (rec, tk, lb) = listbox();
        lb.bind("<Double-1>", "", |_| {});
        assert!(rec.commands().last().unwrap().starts_with("bind .2.3 <Double-1> "));

        lb.destroy();
        assert_eq!(rec.commands().last().unwrap(), "destroy .2");
        assert!(tk.lookup(".2").is_none());
    }
}
