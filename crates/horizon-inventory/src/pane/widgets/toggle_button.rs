//! Two-state button.

use std::sync::Arc;

use parking_lot::RwLock;

use horizon_inventory_core::{ClickEvent, Result};

use super::{replace_item, solid_pane};
use crate::component::InventoryComponent;
use crate::item::GuiItem;
use crate::pane::{GuiContext, OutlinePane, Pane, PaneBase, SharedPane, impl_pane_any, share};

const ENABLED_MATERIAL: &str = "green_stained_glass_pane";
const DISABLED_MATERIAL: &str = "red_stained_glass_pane";

/// A button that switches between an enabled and a disabled look.
///
/// Every click inside the button toggles it (unless toggling is disallowed)
/// and is claimed, whether or not an item was hit.
#[derive(Debug)]
pub struct ToggleButton {
    base: PaneBase,
    enabled_pane: Arc<RwLock<OutlinePane>>,
    disabled_pane: Arc<RwLock<OutlinePane>>,
    enabled: bool,
    allow_toggle: bool,
}

impl ToggleButton {
    /// Create a disabled button.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        Ok(Self {
            base: PaneBase::new(length, height)?,
            enabled_pane: Arc::new(RwLock::new(solid_pane(length, height, ENABLED_MATERIAL)?)),
            disabled_pane: Arc::new(RwLock::new(solid_pane(length, height, DISABLED_MATERIAL)?)),
            enabled: false,
            allow_toggle: true,
        })
    }

    /// Set the initial state (builder pattern).
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the state.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Whether clicks toggle the button.
    pub fn allows_toggle(&self) -> bool {
        self.allow_toggle
    }

    /// Allow or forbid clicks to toggle the button.
    pub fn set_allow_toggle(&mut self, allow_toggle: bool) {
        self.allow_toggle = allow_toggle;
    }

    /// Show `item` in every cell while enabled.
    pub fn set_enabled_item(&mut self, item: GuiItem) {
        replace_item(&mut self.enabled_pane.write(), item);
    }

    /// Show `item` in every cell while disabled.
    pub fn set_disabled_item(&mut self, item: GuiItem) {
        replace_item(&mut self.disabled_pane.write(), item);
    }

    fn shown_pane(&self, enabled: bool) -> &Arc<RwLock<OutlinePane>> {
        if enabled {
            &self.enabled_pane
        } else {
            &self.disabled_pane
        }
    }
}

impl Pane for ToggleButton {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "ToggleButton"
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

        self.shown_pane(self.enabled).read().display(
            component,
            offset_x + pane_x,
            offset_y + pane_y,
            length,
            height,
        );
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

        let shown_before = self.enabled;
        if self.allow_toggle {
            self.toggle();
        }

        self.base.call_on_click(event, self.kind());

        self.shown_pane(shown_before).write().click(
            gui,
            component,
            event,
            slot,
            offset_x + pane_x,
            offset_y + pane_y,
            length,
            height,
        );

        gui.request_update();
        true
    }

    fn copy(&self) -> SharedPane {
        share(Self {
            base: self.base.duplicate(),
            enabled_pane: Arc::new(RwLock::new(self.enabled_pane.read().duplicate())),
            disabled_pane: Arc::new(RwLock::new(self.disabled_pane.read().duplicate())),
            enabled: self.enabled,
            allow_toggle: self.allow_toggle,
        })
    }

    fn items(&self) -> Vec<GuiItem> {
        let mut items = self.enabled_pane.read().items();
        items.extend(self.disabled_pane.read().items());
        items
    }

    fn children(&self) -> Vec<SharedPane> {
        let enabled: SharedPane = self.enabled_pane.clone();
        let disabled: SharedPane = self.disabled_pane.clone();
        vec![enabled, disabled]
    }

    /// Buttons keep both looks.
    fn clear(&mut self) {}

    fn set_length(&mut self, length: i32) {
        self.base.set_length(length);
        self.enabled_pane.write().set_length(length);
        self.disabled_pane.write().set_length(length);
    }

    fn set_height(&mut self, height: i32) {
        self.base.set_height(height);
        self.enabled_pane.write().set_height(height);
        self.disabled_pane.write().set_height(height);
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(ToggleButton: Send, Sync);
