//! Click and drag notifications delivered by the inventory host.

use std::collections::BTreeSet;
use std::fmt;

use crate::item::ItemStack;

/// Raw slot reported by the host for clicks outside of any inventory.
pub const OUTSIDE_SLOT: i32 = -999;

/// Identifies a player viewing a GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(u64);

impl ViewerId {
    /// Create a viewer id from the host's raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 value of this viewer ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

/// Which part of an open inventory view was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventorySection {
    /// The GUI's own inventory.
    Top,
    /// The viewer's player inventory below it.
    Bottom,
    /// Outside of both inventories.
    Outside,
}

/// How the viewer clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickKind {
    #[default]
    Left,
    Right,
    ShiftLeft,
    ShiftRight,
    Middle,
    /// A hotbar number key was pressed while hovering the slot.
    NumberKey(u8),
    Drop,
    DoubleClick,
}

impl ClickKind {
    /// Whether shift was held.
    pub fn is_shift(self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }
}

/// A click inside an open inventory view.
///
/// The host fills in the raw slot (numbered across the whole view: top
/// inventory first, then the player's storage rows and hotbar), the section
/// and the stack currently in the clicked slot. Handlers may cancel the
/// event to keep the host from moving items.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    raw_slot: i32,
    section: InventorySection,
    kind: ClickKind,
    current_item: Option<ItemStack>,
    cursor: Option<ItemStack>,
    title: String,
    viewer: ViewerId,
    cancelled: bool,
}

impl ClickEvent {
    /// Create a click at `raw_slot` in `section` by `viewer`.
    pub fn new(viewer: ViewerId, raw_slot: i32, section: InventorySection) -> Self {
        Self {
            raw_slot,
            section,
            kind: ClickKind::default(),
            current_item: None,
            cursor: None,
            title: String::new(),
            viewer,
            cancelled: false,
        }
    }

    /// Create a click outside of the view.
    pub fn outside(viewer: ViewerId) -> Self {
        Self::new(viewer, OUTSIDE_SLOT, InventorySection::Outside)
    }

    /// Set the stack in the clicked slot (builder pattern).
    pub fn with_current_item(mut self, item: Option<ItemStack>) -> Self {
        self.current_item = item;
        self
    }

    /// Set the stack on the viewer's cursor (builder pattern).
    pub fn with_cursor(mut self, cursor: Option<ItemStack>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set the click kind (builder pattern).
    pub fn with_kind(mut self, kind: ClickKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the title of the clicked view (builder pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Slot number across the whole view.
    pub fn raw_slot(&self) -> i32 {
        self.raw_slot
    }

    /// Which section was clicked.
    pub fn section(&self) -> InventorySection {
        self.section
    }

    /// How the viewer clicked.
    pub fn kind(&self) -> ClickKind {
        self.kind
    }

    /// The non-empty stack in the clicked slot, if any.
    pub fn current_item(&self) -> Option<&ItemStack> {
        self.current_item.as_ref().filter(|item| !item.is_air())
    }

    /// The stack on the viewer's cursor, if any.
    pub fn cursor(&self) -> Option<&ItemStack> {
        self.cursor.as_ref().filter(|item| !item.is_air())
    }

    /// Title of the clicked view.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the title of the clicked view.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The clicking viewer.
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    /// Whether the click has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Cancel or un-cancel the click.
    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// How a dragged cursor stack is spread over the slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragKind {
    /// Split evenly over every slot (left mouse button).
    #[default]
    Even,
    /// One item per slot (right mouse button).
    Single,
}

impl DragKind {
    /// The click a drag over a single slot stands for.
    pub fn as_click(self) -> ClickKind {
        match self {
            Self::Even => ClickKind::Left,
            Self::Single => ClickKind::Right,
        }
    }
}

/// A cursor stack dragged over one or more slots of an open view.
#[derive(Debug, Clone)]
pub struct DragEvent {
    raw_slots: BTreeSet<i32>,
    kind: DragKind,
    old_cursor: Option<ItemStack>,
    viewer: ViewerId,
    cancelled: bool,
}

impl DragEvent {
    /// Create a drag by `viewer` over `raw_slots`.
    pub fn new(viewer: ViewerId, raw_slots: impl IntoIterator<Item = i32>) -> Self {
        Self {
            raw_slots: raw_slots.into_iter().collect(),
            kind: DragKind::default(),
            old_cursor: None,
            viewer,
            cancelled: false,
        }
    }

    /// Set the drag kind (builder pattern).
    pub fn with_kind(mut self, kind: DragKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the cursor stack from before the drag (builder pattern).
    pub fn with_old_cursor(mut self, cursor: Option<ItemStack>) -> Self {
        self.old_cursor = cursor;
        self
    }

    /// Raw slots covered by the drag, ascending.
    pub fn raw_slots(&self) -> &BTreeSet<i32> {
        &self.raw_slots
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// The cursor stack from before the drag.
    pub fn old_cursor(&self) -> Option<&ItemStack> {
        self.old_cursor.as_ref()
    }

    /// The dragging viewer.
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Cancel or un-cancel the drag.
    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_not_a_current_item() {
        let event = ClickEvent::new(ViewerId::new(1), 3, InventorySection::Top)
            .with_current_item(Some(ItemStack::air()));
        assert!(event.current_item().is_none());
    }

    #[test]
    fn test_cancel() {
        let mut event = ClickEvent::outside(ViewerId::new(7));
        assert_eq!(event.raw_slot(), OUTSIDE_SLOT);
        assert_eq!(event.section(), InventorySection::Outside);
        assert!(!event.is_cancelled());
        event.set_cancelled(true);
        assert!(event.is_cancelled());
    }

    #[test]
    fn test_builders() {
        let event = ClickEvent::new(ViewerId::new(2), 12, InventorySection::Bottom)
            .with_kind(ClickKind::ShiftLeft)
            .with_title("Shop");
        assert!(event.kind().is_shift());
        assert_eq!(event.title(), "Shop");
        assert_eq!(event.viewer().to_string(), "viewer#2");
    }

    #[test]
    fn test_drag_slots_are_sorted_and_unique() {
        let drag = DragEvent::new(ViewerId::new(3), [14, 2, 14, 9])
            .with_kind(DragKind::Single)
            .with_old_cursor(Some(ItemStack::new("sand").with_amount(8)));

        assert_eq!(drag.raw_slots().iter().copied().collect::<Vec<_>>(), vec![2, 9, 14]);
        assert_eq!(drag.kind().as_click(), ClickKind::Right);
        assert_eq!(DragKind::Even.as_click(), ClickKind::Left);
        assert_eq!(drag.old_cursor().map(ItemStack::amount), Some(8));
        assert!(!drag.is_cancelled());
    }

    #[test]
    fn test_air_cursor_is_empty() {
        let event = ClickEvent::new(ViewerId::new(1), 0, InventorySection::Top)
            .with_cursor(Some(ItemStack::air()));
        assert!(event.cursor().is_none());
    }
}
