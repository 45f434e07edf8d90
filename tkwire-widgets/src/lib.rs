/// Implement `Component` for a widget whose whole creation is its
/// `base: WidgetBase` plus registration in the widget map
macro_rules! plain_component {
    ($widget:ty) => {
        impl tkwire_core::Component for $widget {
            fn materialize(
                self: std::rc::Rc<Self>,
                parent: &str,
            ) -> (String, tkwire_core::Flags) {
                let (path, flags) = self.base.create(parent);
                self.base.tk().register_widget(&path, self.clone());
                (path, flags)
            }
        }
    };
}

pub mod builder;
pub mod button;
pub mod check;
pub mod combobox;
pub mod common;
pub mod dialog;
pub mod entry;
pub mod error;
pub mod grid;
pub mod image;
pub mod label;
pub mod listbox;
pub mod notebook;
pub mod root;
pub mod splitter;
pub mod stack;
pub mod table;
pub mod text;
pub mod tree;

pub use builder::{build_window, populate};
pub use button::Button;
pub use check::Check;
pub use combobox::Combobox;
pub use common::index_of_value;
pub use dialog::{Dialog, DialogState};
pub use entry::Entry;
pub use error::{BuildError, SelectionError};
pub use grid::Grid;
pub use image::Image;
pub use label::Label;
pub use listbox::Listbox;
pub use notebook::{Notebook, Tab, TabState};
pub use root::Root;
pub use splitter::Splitter;
pub use stack::Stack;
pub use table::{SORT_PROC, Table, install_sort_helper};
pub use text::Text;
pub use tree::Tree;
