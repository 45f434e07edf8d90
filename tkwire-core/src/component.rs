// tkwire-core/src/component.rs
use std::rc::Rc;

use crate::flags::Flags;

/// Anything that can be placed into a container.
///
/// `materialize` creates the toolkit object under `parent`, records it in
/// the widget map and hands back the assigned path together with the flags
/// the parent should use to place it. It is meant to run exactly once per
/// instance; a second call creates a second toolkit object.
pub trait Component {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags);
}

/// A component that lays out other components.
///
/// `add` materializes each child under this container, then issues the
/// placement command for this container kind, in child order. Placement
/// failures are logged and skipped, never abort the batch.
pub trait Container {
    fn add(&self, children: &[Rc<dyn Component>]);
}
