// tkwire-core/src/callback.rs
use std::fmt;
use std::rc::Rc;

/// A registered callable. Receives the raw payload string from the toolkit.
pub type Callback = Rc<dyn Fn(&str)>;

/// Handle to a registered callback: slot index plus the slot's generation
/// at registration time. A handle whose slot has since been freed and
/// reused no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Why a handle did not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("callback index {index} was never issued (registry holds {len} slots)")]
    OutOfRange { index: u32, len: usize },
    #[error("callback {0} was unregistered")]
    Stale(Handle),
}

struct Entry {
    name: String,
    callback: Callback,
}

struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Indexed table of callbacks reachable from the toolkit by handle.
///
/// Slots are reused after [`CallbackRegistry::unregister`]; the generation
/// counter on each slot keeps old handles from reaching the new occupant.
#[derive(Default)]
pub struct CallbackRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, callback: Callback) -> Handle {
        let entry = Entry {
            name: name.to_string(),
            callback,
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            return Handle::from_parts(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        Handle::from_parts(index, 0)
    }

    /// Free the slot behind `handle`, returning the command name it carried
    pub fn unregister(&mut self, handle: Handle) -> Option<String> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(entry.name)
    }

    pub fn get(&self, handle: Handle) -> Result<Callback, LookupError> {
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or(LookupError::OutOfRange {
                index: handle.index,
                len: self.slots.len(),
            })?;

        match &slot.entry {
            Some(entry) if slot.generation == handle.generation => Ok(entry.callback.clone()),
            _ => Err(LookupError::Stale(handle)),
        }
    }

    pub fn name_of(&self, handle: Handle) -> Option<&str> {
        let slot = self.slots.get(handle.index as usize)?;
        match &slot.entry {
            Some(entry) if slot.generation == handle.generation => Some(entry.name.as_str()),
            _ => None,
        }
    }

    /// Number of live callbacks
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_register_and_get() {
        let mut registry = CallbackRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let handle = registry.register("1", Rc::new(move |s: &str| sink.borrow_mut().push(s.to_string())));
        assert_eq!(handle.index(), 0);
        assert_eq!(registry.name_of(handle), Some("1"));

        (registry.get(handle).unwrap())("payload");
        assert_eq!(*seen.borrow(), vec!["payload".to_string()]);
    }

    #[test]
    fn test_out_of_range() {
        let registry = CallbackRegistry::new();
        let err = registry.get(Handle::from_parts(3, 0)).err();
        assert_eq!(err, Some(LookupError::OutOfRange { index: 3, len: 0 }));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut registry = CallbackRegistry::new();
        let first = registry.register("1", Rc::new(|_: &str| {}));
        assert_eq!(registry.unregister(first), Some("1".to_string()));
        assert!(registry.is_empty());

        let second = registry.register("2", Rc::new(|_: &str| {}));
        assert_eq!(second.index(), first.index());
        assert_ne!(second.generation(), first.generation());

        assert_eq!(registry.get(first).err(), Some(LookupError::Stale(first)));
        assert!(registry.get(second).is_ok());
        assert_eq!(registry.unregister(first), None);
        assert_eq!(registry.len(), 1);
    }
}
