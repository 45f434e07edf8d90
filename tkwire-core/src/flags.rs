// tkwire-core/src/flags.rs
bitflags::bitflags! {
    /// Layout and behaviour options fixed at construction time.
    ///
    /// A widget never reads its own placement bits; its parent does, when
    /// placing the child returned by `materialize`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u32 {
        /// Grow with the parent when the window is resized
        const EXPAND = 1 << 1;
        /// Attach a horizontal scrollbar where the widget supports one
        const SCROLL_X = 1 << 2;
        /// Attach a vertical scrollbar where the widget supports one
        const SCROLL_Y = 1 << 3;
        /// Entry shows `*` instead of the typed text
        const PASSWORD = 1 << 4;
        /// Containers lay children out side by side instead of stacked
        const HORIZONTAL = 1 << 5;
        /// Notebook tab ignores double-click close
        const DO_NOT_CLOSE = 1 << 6;
        /// Notebook tab wants confirmation before closing (not acted upon)
        const ASK_FOR_CLOSE = 1 << 7;
        /// Notebook swallows button-1 clicks instead of closing tabs
        const NOTEBOOK_BREAK_B1 = 1 << 8;
        /// Dialog does not grab input and is withdrawn instead of destroyed
        const NOT_MODAL = 1 << 9;
        /// Dialog stays above other windows
        const TOPMOST = 1 << 10;
    }
}

impl Flags {
    /// Look up a flag by name, ignoring case and accepting `-` for `_`
    pub fn parse_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_uppercase().replace('-', "_");
        Self::from_name(&normalized)
    }

    pub fn expands(self) -> bool {
        self.contains(Self::EXPAND)
    }

    pub fn is_horizontal(self) -> bool {
        self.contains(Self::HORIZONTAL)
    }
}
