//! Storage for player inventories hidden while a GUI uses them.

use std::collections::HashMap;

use horizon_inventory_core::logging::targets;
use horizon_inventory_core::{Inventory, ItemStack, MAX_STACK_SIZE, ViewerId};

use super::Viewer;

/// Player inventory contents saved while a GUI paints into them.
///
/// A viewer's contents are stored at most once; storing again before a
/// restore keeps the first snapshot, so items the GUI painted are never
/// mistaken for the player's own.
#[derive(Debug, Clone, Default)]
pub struct ViewerCache {
    stored: HashMap<ViewerId, Vec<Option<ItemStack>>>,
}

impl ViewerCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the contents of `viewer` are stored.
    pub fn contains(&self, viewer: ViewerId) -> bool {
        self.stored.contains_key(&viewer)
    }

    /// Number of stored viewers.
    pub fn len(&self) -> usize {
        self.stored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    /// Save the storage contents of `viewer` and clear them.
    pub fn store_and_clear(&mut self, viewer: &Viewer) {
        if self.contains(viewer.id()) {
            return;
        }

        let mut inventory = viewer.inventory().lock();
        self.stored.insert(viewer.id(), inventory.contents());
        inventory.clear();

        tracing::debug!(target: targets::GUI, viewer = %viewer.id(), "player inventory stored");
    }

    /// Put the saved contents back into the viewer's inventory and forget
    /// them. Returns whether anything was stored.
    pub fn restore_and_forget(&mut self, viewer: &Viewer) -> bool {
        let Some(contents) = self.stored.remove(&viewer.id()) else {
            return false;
        };

        viewer.inventory().lock().set_storage_contents(contents);
        tracing::debug!(target: targets::GUI, viewer = %viewer.id(), "player inventory restored");
        true
    }

    /// Add `stack` to the saved contents of `viewer`.
    ///
    /// Similar stored stacks are topped up first, then empty slots are filled
    /// in storage order. Returns how many items did not fit; a viewer without
    /// saved contents takes nothing.
    pub fn add(&mut self, viewer: ViewerId, stack: &ItemStack) -> u32 {
        let Some(contents) = self.stored.get_mut(&viewer) else {
            return stack.amount();
        };

        let mut remaining = stack.amount();
        for stored in contents.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if !stored.is_similar(stack) {
                continue;
            }
            let moved = MAX_STACK_SIZE.saturating_sub(stored.amount()).min(remaining);
            stored.set_amount(stored.amount() + moved);
            remaining -= moved;
        }

        for slot in contents.iter_mut().filter(|slot| slot.is_none()) {
            if remaining == 0 {
                break;
            }
            let moved = remaining.min(MAX_STACK_SIZE);
            *slot = Some(stack.clone().with_amount(moved));
            remaining -= moved;
        }

        tracing::debug!(
            target: targets::GUI,
            %viewer,
            material = stack.material(),
            left_over = remaining,
            "item added to stored inventory"
        );
        remaining
    }

    /// The saved contents of `viewer`.
    pub fn stored(&self, viewer: ViewerId) -> Option<&[Option<ItemStack>]> {
        self.stored.get(&viewer).map(Vec::as_slice)
    }
}
