// tkwire-widgets/src/builder.rs
//! Turns a [`ConfigFile`] layout into live widgets.

use std::rc::Rc;

use tkwire_core::{ConfigError, ConfigFile, Component, Container, Node, Tk, parse_flags};

use crate::{
    BuildError, Button, Check, Combobox, Entry, Grid, Image, Label, Listbox, Notebook, Root,
    Splitter, Stack, Table, Text, Tree,
};

/// Where built nodes go. Only a grid knows what to do with a blank cell.
enum Parent<'a> {
    Container(&'a dyn Container),
    Grid(&'a Grid),
}

impl Parent<'_> {
    fn place(&self, child: Rc<dyn Component>) {
        match self {
            Parent::Container(container) => container.add(&[child]),
            Parent::Grid(grid) => grid.add(&[child]),
        }
    }

    fn blank(&self) {
        match self {
            Parent::Container(_) => tracing::debug!("blank cell outside a grid ignored"),
            Parent::Grid(grid) => grid.blank(),
        }
    }
}

/// Build `nodes` in order and add them to `parent`
pub fn populate(tk: &Tk, parent: &dyn Container, nodes: &[Node]) -> Result<(), ConfigError> {
    populate_into(tk, &Parent::Container(parent), nodes)
}

fn populate_into(tk: &Tk, parent: &Parent<'_>, nodes: &[Node]) -> Result<(), ConfigError> {
    for node in nodes {
        build_node(tk, parent, node)?;
    }
    Ok(())
}

fn build_node(tk: &Tk, parent: &Parent<'_>, node: &Node) -> Result<(), ConfigError> {
    let flags = node.flags()?;

    // containers are placed before their children so the children have a
    // path to hang off
    match node {
        Node::Box { items, .. } => {
            let stack = Stack::new(tk, flags);
            parent.place(stack.clone());
            populate_into(tk, &Parent::Container(&*stack), items)?;
        }
        Node::Splitter { items, .. } => {
            let splitter = Splitter::new(tk, flags);
            parent.place(splitter.clone());
            populate_into(tk, &Parent::Container(&*splitter), items)?;
        }
        Node::Grid { columns, items, .. } => {
            let grid = Grid::new(tk, *columns, flags);
            parent.place(grid.clone());
            populate_into(tk, &Parent::Grid(&grid), items)?;
        }
        Node::Notebook { tabs, .. } => {
            let notebook = Notebook::new(tk, flags);
            parent.place(notebook.clone());
            for tab in tabs {
                let page = notebook.new_tab(&tab.title, parse_flags(&tab.flags)?);
                populate_into(tk, &Parent::Container(&*page), &tab.items)?;
            }
        }
        Node::Label { text, .. } => parent.place(Label::new(tk, text, flags)),
        Node::Button { text, .. } => {
            let button = Button::new(tk, text, flags);
            parent.place(button.clone());
            log_presses(&button, text);
        }
        Node::Check { text, checked, .. } => parent.place(Check::new(tk, text, *checked, flags)),
        Node::Entry { text, .. } => parent.place(Entry::new(tk, text, flags)),
        Node::Listbox { values, .. } => parent.place(Listbox::new(tk, values.clone(), flags)),
        Node::Tree { .. } => parent.place(Tree::new(tk, flags)),
        Node::Table { columns, rows, .. } => {
            let table = Table::new(tk, rows.clone(), flags);
            parent.place(table.clone());
            if !columns.is_empty() {
                let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
                table.columns(&columns);
            }
        }
        Node::Text { text, .. } => parent.place(Text::new(tk, text, flags)),
        Node::Combobox { values, .. } => parent.place(Combobox::new(tk, values.clone(), flags)),
        Node::Image { name, .. } => parent.place(Image::new(tk, name, flags)),
        Node::Blank => parent.blank(),
    }
    Ok(())
}

/// Layout buttons have no handler of their own; presses are logged
fn log_presses(button: &Button, caption: &str) {
    let caption = caption.to_string();
    button.on_press(move |_| tracing::info!(button = %caption, "pressed"));
}

/// Create the main window described by `config` and fill it
pub fn build_window(tk: &Tk, config: &ConfigFile) -> Result<Root, BuildError> {
    let window = &config.window;
    let root = Root::init(tk, &window.title, parse_flags(&window.flags)?)?;

    if let Some(theme) = &window.theme {
        root.set_theme(theme);
    }
    if let (Some(width), Some(height)) = (window.width, window.height) {
        root.set_size(width, height);
    }
    for caption in &window.toolbar {
        let button = Button::new(tk, caption, tkwire_core::Flags::empty());
        root.add_tool_button(button.clone());
        log_presses(&button, caption);
    }
    for _ in 0..window.status_fields {
        root.add_status_field();
    }

    populate(tk, &root, &config.layout)?;
    tracing::info!(
        title = %window.title,
        widgets = tk.widget_count(),
        callbacks = tk.callback_count(),
        "window built"
    );
    Ok(root)
}
