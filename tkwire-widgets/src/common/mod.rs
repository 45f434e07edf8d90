pub mod scroll;
pub mod treeview;
pub mod values;

pub use scroll::Viewport;
pub use values::{dot_decimal, index_of_value};

pub(crate) use values::first_item;
