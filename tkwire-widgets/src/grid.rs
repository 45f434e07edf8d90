// tkwire-widgets/src/grid.rs
use std::cell::Cell;
use std::rc::Rc;

use tkwire_core::{Command, Component, Container, Flags, Tk, WidgetBase};

/// Fixed-width grid filled row by row. A cell holding an expanding child
/// gives its row and column weight 1.
pub struct Grid {
    base: WidgetBase,
    columns: usize,
    cursor: Cell<(usize, usize)>,
}

plain_component!(Grid);

impl Grid {
    /// `columns` below 1 is treated as 1
    pub fn new(tk: &Tk, columns: usize, flags: Flags) -> Rc<Self> {
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::frame", Command::args(), flags),
            columns: columns.max(1),
            cursor: Cell::new((0, 0)),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// (row, column) the next cell will occupy
    pub fn next_cell(&self) -> (usize, usize) {
        let (row, col) = self.cursor.get();
        if col >= self.columns { (row + 1, 0) } else { (row, col) }
    }

    /// Add cells in order; `None` leaves a blank cell
    pub fn add_cells(&self, cells: &[Option<Rc<dyn Component>>]) {
        if self.base.placed_path("add").is_none() {
            return;
        }
        for cell in cells {
            self.place(cell.as_ref());
        }
    }

    /// Skip one cell
    pub fn blank(&self) {
        self.place(None);
    }

    fn place(&self, cell: Option<&Rc<dyn Component>>) {
        let (row, col) = self.next_cell();

        if let Some(child) = cell {
            let path = self.base.path();
            let tk = self.base.tk();
            let (child_path, child_flags) = child.clone().materialize(&path);
            tk.send(
                &Command::new("grid")
                    .arg(&child_path)
                    .opt("-row", row)
                    .opt("-column", col)
                    .opt("-sticky", "news")
                    .opt("-padx", 1)
                    .opt("-pady", 1),
            );

            if child_flags.expands() {
                for (axis, index) in [("rowconfigure", row), ("columnconfigure", col)] {
                    tk.send(
                        &Command::new("grid")
                            .arg(axis)
                            .arg(&path)
                            .arg(index)
                            .opt("-weight", 1),
                    );
                }
            }
        }

        self.cursor.set((row, col + 1));
    }
}

impl Container for Grid {
    fn add(&self, children: &[Rc<dyn Component>]) {
        if self.base.placed_path("add").is_none() {
            return;
        }
        for child in children {
            self.place(Some(child));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;
    use tkwire_core::Recorder;

    fn grid(columns: usize) -> (Rc<Recorder>, Tk, Rc<Grid>) {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let grid = Grid::new(&tk, columns, Flags::empty());
        grid.base().adopt(".g");
        (rec, tk, grid)
    }

    #[test]
    fn test_wraps_to_new_rows() {
        let columns = 3;
        let (rec, tk, grid) = grid(columns);
        let labels: Vec<Rc<dyn Component>> = (0..columns * 2 + 1)
            .map(|i| Label::new(&tk, &i.to_string(), Flags::empty()) as Rc<dyn Component>)
            .collect();

        grid.add(&labels);

        let placed = rec.commands_starting_with("grid .g.");
        assert_eq!(placed.len(), columns * 2 + 1);
        assert_eq!(
            placed[columns * 2],
            "grid .g.7 -row 2 -column 0 -sticky news -padx 1 -pady 1"
        );
        assert_eq!(placed[columns], "grid .g.4 -row 1 -column 0 -sticky news -padx 1 -pady 1");
        assert_eq!(grid.next_cell(), (2, 1));
    }

    #[test]
    fn test_blank_cells_advance_cursor() {
        let (rec, tk, grid) = grid(2);
        grid.add_cells(&[
            None,
            Some(Label::new(&tk, "b", Flags::empty())),
            None,
            Some(Label::new(&tk, "d", Flags::empty())),
        ]);

        assert_eq!(
            rec.commands_starting_with("grid .g."),
            vec![
                "grid .g.1 -row 0 -column 1 -sticky news -padx 1 -pady 1",
                "grid .g.2 -row 1 -column 1 -sticky news -padx 1 -pady 1",
            ]
        );
        // blank cells create nothing
        assert_eq!(rec.commands_starting_with("ttk::label").len(), 2);
    }

    #[test]
    fn test_expanding_cell_weights_row_and_column() {
        let (rec, tk, grid) = grid(2);
        grid.blank();
        grid.blank();
        grid.blank();
        grid.add(&[Label::new(&tk, "big", Flags::EXPAND)]);

        assert_eq!(
            rec.commands_starting_with("grid ")[1..],
            [
                "grid rowconfigure .g 1 -weight 1",
                "grid columnconfigure .g 1 -weight 1",
            ]
        );
    }
}
