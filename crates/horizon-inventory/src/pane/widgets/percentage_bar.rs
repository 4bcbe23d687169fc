//! Read-only progress bar.

use horizon_inventory_core::{ClickEvent, Flip, Orientation, Result};

use super::VariableBar;
use crate::component::InventoryComponent;
use crate::item::GuiItem;
use crate::pane::{GuiContext, Pane, PaneBase, SharedPane, impl_pane_any, share};

/// A bar showing a percentage.
///
/// Clicks inside the bar are always cancelled, so viewers cannot take the
/// fill or background items.
#[derive(Debug)]
pub struct PercentageBar {
    bar: VariableBar,
}

impl PercentageBar {
    /// Create an empty horizontal bar.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        Ok(Self {
            bar: VariableBar::new(length, height)?,
        })
    }

    /// The filled fraction in `[0, 1]`.
    pub fn percentage(&self) -> f32 {
        self.bar.value()
    }

    /// Set the filled fraction. Fails outside of `[0, 1]`.
    pub fn set_percentage(&mut self, percentage: f32) -> Result<()> {
        self.bar.set_value(percentage)
    }

    pub fn orientation(&self) -> Orientation {
        self.bar.orientation()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.bar.set_orientation(orientation);
    }

    pub fn flip(&self) -> Flip {
        self.bar.flip()
    }

    pub fn flip_horizontally(&mut self, flip: bool) {
        self.bar.flip_horizontally(flip);
    }

    pub fn flip_vertically(&mut self, flip: bool) {
        self.bar.flip_vertically(flip);
    }

    pub fn set_fill_item(&mut self, item: GuiItem) {
        self.bar.set_fill_item(item);
    }

    pub fn set_background_item(&mut self, item: GuiItem) {
        self.bar.set_background_item(item);
    }

    /// The underlying bar.
    pub fn bar(&self) -> &VariableBar {
        &self.bar
    }
}

impl Pane for PercentageBar {
    fn pane_base(&self) -> &PaneBase {
        self.bar.base()
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        self.bar.base_mut()
    }

    fn kind(&self) -> &'static str {
        "PercentageBar"
    }

    fn display(
        &self,
        component: &mut InventoryComponent,
        offset_x: i32,
        offset_y: i32,
        max_length: i32,
        max_height: i32,
    ) {
        self.bar
            .display(component, offset_x, offset_y, max_length, max_height);
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
            .bar
            .base()
            .locate_click(component, slot, offset_x, offset_y, max_length, max_height)
            .is_none()
        {
            return false;
        }

        self.bar.base().call_on_click(event, self.kind());
        event.set_cancelled(true);

        self.bar.forward_click(
            gui, component, event, slot, offset_x, offset_y, max_length, max_height,
        )
    }

    fn copy(&self) -> SharedPane {
        share(Self {
            bar: self.bar.duplicate(),
        })
    }

    fn items(&self) -> Vec<GuiItem> {
        self.bar.items()
    }

    fn children(&self) -> Vec<SharedPane> {
        self.bar.children()
    }

    /// Bars keep their fill and background.
    fn clear(&mut self) {}

    fn set_length(&mut self, length: i32) {
        self.bar.set_length(length);
    }

    fn set_height(&mut self, height: i32) {
        self.bar.set_height(height);
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(PercentageBar: Send, Sync);
