//! Backward and forward buttons driving a paginated pane.

use std::sync::Arc;

use parking_lot::RwLock;

use horizon_inventory_core::logging::targets;
use horizon_inventory_core::{ClickEvent, Error, ItemStack, Result};

use crate::component::InventoryComponent;
use crate::item::GuiItem;
use crate::pane::{GuiContext, PaginatedPane, Pane, PaneBase, SharedPane, impl_pane_any, share};

const BUTTON_MATERIAL: &str = "arrow";

/// A single row with page buttons at both ends.
///
/// The backward button sits in the leftmost cell while the bound pane has a
/// previous page; the forward button sits in the rightmost cell while it has
/// a next page. The bound pane is shared, not owned: copies of the buttons
/// drive the same pane.
#[derive(Debug)]
pub struct PagingButtons {
    base: PaneBase,
    pages: Arc<RwLock<PaginatedPane>>,
    backward: GuiItem,
    forward: GuiItem,
}

impl PagingButtons {
    /// Create buttons for `pages` in a row of `length` cells.
    ///
    /// The row must be at least two cells long.
    pub fn new(length: i32, pages: Arc<RwLock<PaginatedPane>>) -> Result<Self> {
        if length < 2 {
            return Err(Error::precondition(
                "Length of paging buttons must be at least 2",
            ));
        }

        Ok(Self {
            base: PaneBase::new(length, 1)?,
            pages,
            backward: GuiItem::new(ItemStack::new(BUTTON_MATERIAL)),
            forward: GuiItem::new(ItemStack::new(BUTTON_MATERIAL)),
        })
    }

    /// The paginated pane the buttons drive.
    pub fn pages(&self) -> &Arc<RwLock<PaginatedPane>> {
        &self.pages
    }

    pub fn backward_button(&self) -> &GuiItem {
        &self.backward
    }

    pub fn set_backward_button(&mut self, item: GuiItem) {
        self.backward = item;
    }

    pub fn forward_button(&self) -> &GuiItem {
        &self.forward
    }

    pub fn set_forward_button(&mut self, item: GuiItem) {
        self.forward = item;
    }

    /// Move the bound pane by `delta` pages.
    fn turn(&self, delta: i32) -> bool {
        let mut pages = self.pages.write();
        let target = pages.page() + delta;

        match pages.set_page(target) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(
                    target: targets::PANE,
                    page = target,
                    "paging button ignored: {}",
                    error
                );
                false
            }
        }
    }
}

impl Pane for PagingButtons {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "PagingButtons"
    }

    fn display(
        &self,
        component: &mut InventoryComponent,
        offset_x: i32,
        offset_y: i32,
        max_length: i32,
        max_height: i32,
    ) {
        let (length, height) = self.base.extent(max_length, max_height);
        if length <= 0 || height <= 0 {
            return;
        }
        let Some((pane_x, pane_y)) = self.base.position(max_length) else {
            return;
        };
        let (x, y) = (offset_x + pane_x, offset_y + pane_y);

        let pages = self.pages.read();
        let page = pages.page();

        if page > 0 && self.backward.is_visible() {
            component.paint(&self.backward, x, y);
        }
        if page < pages.page_count() as i32 - 1 && self.forward.is_visible() {
            component.paint(&self.forward, x + length - 1, y);
        }
    }

    fn click(
        &mut self,
        gui: &mut GuiContext,
        component: &InventoryComponent,
        event: &mut ClickEvent,
        slot: i32,
        offset_x: i32,
        offset_y: i32,
        max_length: i32,
        max_height: i32,
    ) -> bool {
        if self
            .base
            .locate_click(component, slot, offset_x, offset_y, max_length, max_height)
            .is_none()
        {
            return false;
        }

        self.base.call_on_click(event, self.kind());

        let Some(stack) = event.current_item().cloned() else {
            return false;
        };

        let (button, delta) = if self.backward.matches(&stack) {
            (&self.backward, -1)
        } else if self.forward.matches(&stack) {
            (&self.forward, 1)
        } else {
            return false;
        };

        if !self.turn(delta) {
            return false;
        }
        button.call_action(event);
        gui.request_update();
        true
    }

    fn copy(&self) -> SharedPane {
        share(Self {
            base: self.base.duplicate(),
            pages: Arc::clone(&self.pages),
            backward: self.backward.copy(),
            forward: self.forward.copy(),
        })
    }

    fn items(&self) -> Vec<GuiItem> {
        vec![self.backward.clone(), self.forward.clone()]
    }

    /// The buttons keep their items.
    fn clear(&mut self) {}

    impl_pane_any!();
}

static_assertions::assert_impl_all!(PagingButtons: Send, Sync);
