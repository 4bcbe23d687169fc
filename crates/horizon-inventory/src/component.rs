//! The inventory component: a fixed-size grid composed of panes.
//!
//! An [`InventoryComponent`] owns a `length x height` grid of optional
//! [`GuiItem`]s and a priority-sorted list of panes. Rendering clears the grid
//! and lets every visible pane paint into it, lowest priority first. The
//! finished grid is then copied into a host [`Inventory`] with
//! [`InventoryComponent::place_items`].
//!
//! # Example
//!
//! ```ignore
//! use horizon_inventory::prelude::*;
//!
//! let mut component = InventoryComponent::new(9, 1)?;
//! let mut pane = OutlinePane::new(9, 1)?;
//! pane.add_item(GuiItem::new(ItemStack::new("diamond")));
//! component.add_pane(share(pane));
//!
//! let mut chest = ChestInventory::new("Shop", 1);
//! component.display_into(&mut chest, 0);
//! ```

use std::sync::Arc;

use horizon_inventory_core::geometry::contains;
use horizon_inventory_core::logging::{span_names, targets};
use horizon_inventory_core::{ClickEvent, Error, Inventory, PerfSpan, Result, SlotLayout};

use crate::item::GuiItem;
use crate::pane::{self, GuiContext, SharedPane};

/// A fixed-size grid of items composed from priority-ordered panes.
#[derive(Debug)]
pub struct InventoryComponent {
    length: i32,
    height: i32,
    /// Row-major cells.
    items: Vec<Option<GuiItem>>,
    /// Sorted by ascending priority.
    panes: Vec<SharedPane>,
}

impl InventoryComponent {
    /// Create an empty component. Sizes may be zero but not negative.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        if length < 0 || height < 0 {
            return Err(Error::precondition(
                "Sizes must be greater or equal to zero",
            ));
        }

        Ok(Self {
            length,
            height,
            items: vec![None; (length * height) as usize],
            panes: Vec::new(),
        })
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    pub fn size(&self) -> i32 {
        self.length * self.height
    }

    /// The panes of this component in ascending priority.
    pub fn panes(&self) -> &[SharedPane] {
        &self.panes
    }

    /// Add a pane, keeping the list sorted by priority.
    ///
    /// A pane is placed after every pane with a lower or equal priority.
    pub fn add_pane(&mut self, pane: SharedPane) {
        pane::insert_by_priority(&mut self.panes, pane);
    }

    /// Remove every pane.
    pub fn clear_panes(&mut self) {
        self.panes.clear();
    }

    // =========================================================================
    // Cells
    // =========================================================================

    /// The item at `(x, y)`.
    pub fn item(&self, x: i32, y: i32) -> Result<Option<&GuiItem>> {
        let index = self.index_of(x, y)?;
        Ok(self.items[index].as_ref())
    }

    /// Whether a cell at `(x, y)` holds an item.
    pub fn has_item_at(&self, x: i32, y: i32) -> Result<bool> {
        self.item(x, y).map(|item| item.is_some())
    }

    /// Whether any cell holds an item.
    pub fn has_item(&self) -> bool {
        self.items.iter().any(Option::is_some)
    }

    /// Store a copy of `item` at `(x, y)`, re-applying its identity tag.
    pub fn set_item(&mut self, item: &GuiItem, x: i32, y: i32) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.items[index] = Some(item.copy());
        Ok(())
    }

    /// Paint `item` at `(x, y)` if the cell exists.
    ///
    /// Used by panes while rendering; cells outside of the grid are clipped.
    /// Returns whether the item was stored.
    pub fn paint(&mut self, item: &GuiItem, x: i32, y: i32) -> bool {
        match self.set_item(item, x, y) {
            Ok(()) => true,
            Err(_) => {
                tracing::trace!(
                    target: targets::PANE,
                    x,
                    y,
                    length = self.length,
                    height = self.height,
                    material = item.stack().material(),
                    "item clipped outside of component"
                );
                false
            }
        }
    }

    fn index_of(&self, x: i32, y: i32) -> Result<usize> {
        if !contains(x, y, self.length, self.height) {
            return Err(Error::out_of_bounds(x, y, self.length, self.height));
        }
        Ok((y * self.length + x) as usize)
    }

    fn clear_items(&mut self) {
        self.items.iter_mut().for_each(|cell| *cell = None);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Re-render the grid from the panes.
    ///
    /// The grid is cleared and every visible pane paints into it in ascending
    /// priority, so higher priorities overwrite shared cells.
    pub fn display(&mut self) {
        let _perf = PerfSpan::new(span_names::DISPLAY);
        self.clear_items();

        let panes: Vec<SharedPane> = self.panes.clone();
        let (length, height) = (self.length, self.height);
        for pane in &panes {
            let pane = pane.read();
            if !pane.is_visible() {
                continue;
            }
            pane.display(self, 0, 0, length, height);
        }

        tracing::trace!(
            target: targets::COMPONENT,
            panes = panes.len(),
            length,
            height,
            "component displayed"
        );
    }

    /// Render, then copy the grid into `inventory` starting at `offset`.
    pub fn display_into(&mut self, inventory: &mut dyn Inventory, offset: usize) {
        self.display();
        self.place_items(inventory, offset);
    }

    /// Copy the grid into `inventory` starting at `offset`.
    ///
    /// Cells are numbered with the inventory's [`SlotLayout`]. Empty cells
    /// clear their slot; cells that fall outside of the inventory are skipped.
    pub fn place_items(&self, inventory: &mut dyn Inventory, offset: usize) {
        let layout = inventory.layout();
        let length = self.length as usize;
        let height = self.height as usize;

        for y in 0..height {
            for x in 0..length {
                let slot = match layout {
                    SlotLayout::RowMajor => y * length + x + offset,
                    SlotLayout::Player if y == height - 1 => x + offset,
                    SlotLayout::Player => (y + 1) * length + x + offset,
                };

                if slot >= inventory.size() {
                    continue;
                }

                let stack = self.items[y * length + x]
                    .as_ref()
                    .map(|item| item.stack().clone());
                inventory.set_item(slot, stack);
            }
        }
    }

    // =========================================================================
    // Clicks
    // =========================================================================

    /// Offer a click on `slot` to the panes, highest priority first.
    ///
    /// Dispatch stops at the first pane that claims the click. Returns whether
    /// any pane claimed it.
    pub fn click(&self, gui: &mut GuiContext, event: &mut ClickEvent, slot: i32) -> bool {
        let _perf = PerfSpan::new(span_names::CLICK);
        let panes: Vec<SharedPane> = self.panes.iter().rev().cloned().collect();

        let claimed = pane::click_first(
            &panes,
            gui,
            self,
            event,
            slot,
            0,
            0,
            self.length,
            self.height,
        );

        tracing::debug!(
            target: targets::COMPONENT,
            slot,
            claimed,
            "click dispatched"
        );
        claimed
    }

    // =========================================================================
    // Derived components
    // =========================================================================

    /// Deep copy of the grid and of every pane.
    pub fn copy(&self) -> Self {
        let mut copy = Self {
            length: self.length,
            height: self.height,
            items: self.items.iter().map(|cell| cell.as_ref().map(GuiItem::copy)).collect(),
            panes: Vec::with_capacity(self.panes.len()),
        };

        for pane in &self.panes {
            copy.add_pane(pane.read().copy());
        }
        copy
    }

    /// A component without the rows `from..=to`.
    ///
    /// The new component shares its panes with this one; items outside of the
    /// removed rows are carried over.
    pub fn exclude_rows(&self, from: i32, to: i32) -> Result<Self> {
        if from < 0 || to >= self.height || from > to {
            return Err(Error::precondition(
                "Specified range includes non-existent rows",
            ));
        }

        let mut excluded = Self::new(self.length, self.height - (to - from + 1))?;
        for pane in &self.panes {
            excluded.add_pane(Arc::clone(pane));
        }

        let mut new_y = 0;
        for y in 0..self.height {
            if (from..=to).contains(&y) {
                continue;
            }
            for x in 0..self.length {
                if let Some(item) = &self.items[(y * self.length + x) as usize] {
                    excluded.items[(new_y * self.length + x) as usize] = Some(item.clone());
                }
            }
            new_y += 1;
        }

        Ok(excluded)
    }

    /// Every item the panes can show, including nested panes.
    pub fn pane_items(&self) -> Vec<GuiItem> {
        self.panes.iter().flat_map(|pane| pane.read().items()).collect()
    }
}
