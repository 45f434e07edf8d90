// tkwire-widgets/src/table.rs
use std::cell::RefCell;
use std::rc::Rc;

use tkwire_core::{
    CallbackToken, Command, Component, EvalError, Flags, Tk, WidgetBase, list_string, parse_list,
};

use crate::common::{Viewport, treeview};
use crate::error::SelectionError;

/// Toolkit procedure that sorts a table by one column; clicking a heading
/// calls it and it flips the direction for the next click.
pub const SORT_PROC: &str = "tkwire_sort_column";

const SORT_SCRIPT: &str = r#"proc tkwire_sort_column {table col descending} {
    set rows {}
    foreach row [$table children {}] {
        lappend rows [list [$table set $row $col] $row]
    }
    set order [expr {$descending ? "-decreasing" : "-increasing"}]
    set at -1
    foreach entry [lsort -dictionary -index 0 $order $rows] {
        $table move [lindex $entry 1] {} [incr at]
    }
    $table heading $col -command [list tkwire_sort_column $table $col [expr {!$descending}]]
}"#;

/// Define [`SORT_PROC`] in the interpreter
pub fn install_sort_helper(tk: &Tk) -> Result<(), EvalError> {
    tk.eval_script(SORT_SCRIPT)
}

/// Rows of values under column headings. Each row's first value is its
/// text and its last value is its item id.
pub struct Table {
    view: Viewport,
    data: RefCell<Vec<Vec<String>>>,
}

impl Table {
    pub fn new(tk: &Tk, data: Vec<Vec<String>>, flags: Flags) -> Rc<Self> {
        let init = Command::args()
            .opt("-displaycolumns", "#all")
            .opt("-show", "headings");
        Rc::new(Self {
            view: Viewport::new(tk, "ttk::treeview", init, flags, false),
            data: RefCell::new(data),
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

    /// Bind `event` on the table itself
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

    fn insert_rows(&self, rows: &[Vec<String>]) {
        let widget = self.widget();
        for row in rows {
            let (Some(text), Some(id)) = (row.first(), row.last()) else {
                tracing::warn!(table = %widget.path(), "skipping empty row");
                continue;
            };
            let cmd = treeview::insert_command(widget, "", id, text)
                .arg("-values")
                .list(row);
            widget.tk().send(&cmd);
        }
    }

    /// Append rows after the existing ones
    pub fn update_with_data(&self, rows: Vec<Vec<String>>) {
        self.insert_rows(&rows);
        self.data.borrow_mut().extend(rows);
    }

    pub fn append(&self, row: Vec<String>) {
        self.update_with_data(vec![row]);
    }

    pub fn delete(&self, id: &str) {
        self.widget()
            .tk()
            .send(&self.widget().command("delete").arg(id));
    }

    pub fn clear(&self) {
        treeview::clear(self.widget());
        self.data.borrow_mut().clear();
    }

    /// Values of every row, in display order
    pub fn rows(&self) -> Vec<Vec<String>> {
        let widget = self.widget();
        treeview::children(widget)
            .iter()
            .map(|id| {
                treeview::item_option(widget, id, "-values")
                    .and_then(|values| parse_list(&values).ok())
                    .unwrap_or_default()
            })
            .collect()
    }

    fn heading(&self, column: &str) {
        let widget = self.widget();
        let path = widget.path();
        let sort = list_string([SORT_PROC, path.as_str(), column, "1"]);
        let cmd = widget
            .command("heading")
            .arg(column)
            .opt("-text", column)
            .opt("-command", sort);
        widget.tk().send(&cmd);
    }

    fn column_width(&self, column: &str, width: usize) {
        let cmd = self.widget().command("column").arg(column).opt("-width", width);
        self.widget().tk().send(&cmd);
    }

    /// Declare sortable columns without touching their widths
    pub fn set_columns(&self, columns: &[&str]) {
        let cmd = self.widget().command("configure").arg("-columns").list(columns);
        self.widget().tk().send(&cmd);
        for column in columns {
            self.heading(column);
        }
    }

    /// Declare sortable columns sized from the first and last rows
    pub fn columns(&self, columns: &[&str]) {
        self.set_columns(columns);

        let widths: Vec<usize> = {
            let data = self.data.borrow();
            let cell = |row: Option<&Vec<String>>, i: usize| {
                row.and_then(|row| row.get(i)).map_or(0, |value| value.len())
            };
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| (cell(data.first(), i) + cell(data.last(), i) + column.len()) * 5)
                .collect()
        };
        for (column, width) in columns.iter().zip(widths) {
            self.column_width(column, width);
        }
    }

    /// Declare sortable columns with explicit pixel widths
    pub fn set_columns_with_width(&self, columns: &[&str], widths: &[usize]) {
        self.set_columns(columns);
        for (column, width) in columns.iter().zip(widths) {
            self.column_width(column, *width);
        }
    }

    /// Id and values of the first selected row
    pub fn selection(&self) -> Option<(String, Vec<String>)> {
        let id = treeview::selected_item(self.widget())?;
        let values = treeview::item_option(self.widget(), &id, "-values")?;
        Some((id, parse_list(&values).ok()?))
    }

    pub fn on_select(
        self: &Rc<Self>,
        callback: impl Fn(&str, &[String]) + 'static,
    ) -> CallbackToken {
        let table = Rc::downgrade(self);
        self.widget().bind("<<TreeviewSelect>>", "", move |_| {
            if let Some((id, values)) = table.upgrade().and_then(|table| table.selection()) {
                callback(&id, &values);
            }
        })
    }

    pub fn set_selection(&self, id: &str) -> Result<(), SelectionError> {
        treeview::select(self.widget(), id)
    }
}

impl Component for Table {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.view.create(parent);
        self.widget().tk().register_widget(&path, self.clone());
        let rows = self.data.borrow().clone();
        self.insert_rows(&rows);
        (path, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkwire_core::Recorder;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn table() -> (Rc<Recorder>, Rc<Table>) {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let data = vec![row(&["Ann", "42", "a1"]), row(&["Bob Stone", "7", "b2"])];
        let table = Table::new(&tk, data, Flags::SCROLL_Y);
        table.clone().materialize("");
        (rec, table)
    }

    #[test]
    fn test_initial_rows_use_last_value_as_id() {
        let (rec, table) = table();
        assert_eq!(table.widget_path(), ".1.2");
        assert_eq!(
            rec.commands_starting_with(".1.2 insert"),
            vec![
                ".1.2 insert {} end -id a1 -text Ann -values {Ann 42 a1}",
                ".1.2 insert {} end -id b2 -text \"Bob Stone\" -values {{Bob Stone} 7 b2}",
            ]
        );
    }

    #[test]
    fn test_columns_get_sort_command_and_auto_width() {
        let (rec, table) = table();
        rec.take();
        table.columns(&["name", "age", "id"]);

        let cmds = rec.commands();
        assert_eq!(cmds[0], ".1.2 configure -columns {name age id}");
        assert_eq!(
            cmds[1],
            ".1.2 heading name -text name -command \"tkwire_sort_column .1.2 name 1\""
        );
        // (len("Ann") + len("Bob Stone") + len("name")) * 5
        assert!(cmds.contains(&".1.2 column name -width 80".to_string()));
        assert!(cmds.contains(&".1.2 column age -width 30".to_string()));
    }

    #[test]
    fn test_rows_read_back() {
        let (rec, table) = table();
        rec.respond(".1.2 children {}", "a1 b2");
        rec.respond(".1.2 item a1 -values", "Ann 42 a1");
        rec.respond(".1.2 item b2 -values", "{Bob Stone} 7 b2");
        assert_eq!(
            table.rows(),
            vec![row(&["Ann", "42", "a1"]), row(&["Bob Stone", "7", "b2"])]
        );

        rec.respond(".1.2 selection", "b2");
        assert_eq!(
            table.selection(),
            Some(("b2".to_string(), row(&["Bob Stone", "7", "b2"])))
        );
    }

    #[test]
    fn test_column_with_space_stays_one_sort_argument() {
        let (rec, table) = table();
        rec.take();
        table.set_columns(&["full name"]);
        assert_eq!(
            rec.commands()[1],
            ".1.2 heading \"full name\" -text \"full name\" -command \"tkwire_sort_column .1.2 {full name} 1\""
        );
    }

    #[test]
    fn test_destroy_removes_table_from_map() {
        let (rec, table) = table();
        let tk = table.widget().tk().clone();
        assert!(tk.lookup_as::<Table>(".1").is_some());

        table.event_generate("<<TreeviewSelect>>");
        assert_eq!(rec.commands().last().unwrap(), "event generate .1.2 <<TreeviewSelect>>");

        table.destroy();
        assert_eq!(rec.commands().last().unwrap(), "destroy .1");
        assert!(tk.lookup(".1").is_none());
        assert_eq!(tk.widget_count(), 0);
    }

    #[test]
    fn test_sort_helper_defines_proc() {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        install_sort_helper(&tk).unwrap();
        assert!(rec.commands()[0].starts_with(&format!("proc {} ", SORT_PROC)));
    }
}
