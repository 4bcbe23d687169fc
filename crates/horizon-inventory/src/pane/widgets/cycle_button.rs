//! Button cycling through a list of panes.

use horizon_inventory_core::{ClickEvent, Error, Result};

use crate::component::InventoryComponent;
use crate::item::GuiItem;
use crate::pane::{
    GuiContext, Pane, PaneBase, SharedPane, impl_pane_any, share,
};

/// A button showing one of its panes at a time.
///
/// Every click inside the button advances to the next pane, wrapping after
/// the last one, and is claimed. The click itself is forwarded to the pane
/// that was shown when the viewer clicked.
#[derive(Debug)]
pub struct CycleButton {
    base: PaneBase,
    panes: Vec<SharedPane>,
    position: usize,
}

impl CycleButton {
    /// Create a button without panes.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        Ok(Self {
            base: PaneBase::new(length, height)?,
            panes: Vec::new(),
            position: 0,
        })
    }

    /// Append a pane to the cycle.
    pub fn add_pane(&mut self, pane: SharedPane) {
        self.panes.push(pane);
    }

    /// Insert a pane into the cycle at `index`.
    pub fn insert_pane(&mut self, index: usize, pane: SharedPane) -> Result<()> {
        if index > self.panes.len() {
            return Err(Error::precondition(format!(
                "Index {index} is out of range for {} panes",
                self.panes.len()
            )));
        }
        self.panes.insert(index, pane);
        Ok(())
    }

    /// The panes of the cycle in order.
    pub fn cycle_panes(&self) -> &[SharedPane] {
        &self.panes
    }

    /// Index of the shown pane.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance to the next pane, wrapping after the last one.
    pub fn cycle(&mut self) {
        if self.panes.is_empty() {
            return;
        }
        self.position = (self.position + 1) % self.panes.len();
    }

    fn shown(&self) -> Option<&SharedPane> {
        self.panes.get(self.position)
    }
}

impl Pane for CycleButton {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "CycleButton"
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
        let Some((pane_x, pane_y)) = self.base.position(max_length) else {
            return;
        };
        let Some(pane) = self.shown() else {
            return;
        };

        pane.read()
            .display(component, offset_x + pane_x, offset_y + pane_y, length, height);
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
        let (length, height) = self.base.extent(max_length, max_height);
        let Some((pane_x, pane_y)) = self.base.position(max_length) else {
            return false;
        };

        let clicked = self.shown().cloned();
        self.cycle();

        self.base.call_on_click(event, self.kind());

        if let Some(pane) = clicked {
            pane.write().click(
                gui,
                component,
                event,
                slot,
                offset_x + pane_x,
                offset_y + pane_y,
                length,
                height,
            );
        }

        gui.request_update();
        true
    }

    fn copy(&self) -> SharedPane {
        share(Self {
            base: self.base.duplicate(),
            panes: self.panes.iter().map(|pane| pane.read().copy()).collect(),
            position: self.position,
        })
    }

    fn items(&self) -> Vec<GuiItem> {
        self.panes
            .iter()
            .flat_map(|pane| pane.read().items())
            .collect()
    }

    fn children(&self) -> Vec<SharedPane> {
        self.panes.clone()
    }

    fn clear(&mut self) {
        self.panes.clear();
        self.position = 0;
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(CycleButton: Send, Sync);
