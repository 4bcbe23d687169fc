//! Bar with a fill proportional to a value in `[0, 1]`.

use std::sync::Arc;

use parking_lot::RwLock;

use horizon_inventory_core::{ClickEvent, Error, Flip, Orientation, Result, Slot};

use super::{replace_item, solid_pane};
use crate::component::InventoryComponent;
use crate::item::GuiItem;
use crate::pane::{GuiContext, OutlinePane, Pane, PaneBase, SharedPane};

const FILL_MATERIAL: &str = "green_stained_glass_pane";
const BACKGROUND_MATERIAL: &str = "red_stained_glass_pane";

/// The shared state of [`PercentageBar`](super::PercentageBar) and
/// [`Slider`](super::Slider).
///
/// A bar is a background pane covering the whole bar and a fill pane drawn
/// on top of it. Along the bar's orientation the fill covers
/// `round(extent * value)` cells; it is hidden while that is zero. Flipping
/// the bar along its orientation anchors the fill to the far edge.
#[derive(Debug)]
pub struct VariableBar {
    base: PaneBase,
    fill: Arc<RwLock<OutlinePane>>,
    background: Arc<RwLock<OutlinePane>>,
    value: f32,
    orientation: Orientation,
    flip: Flip,
}

impl VariableBar {
    /// Create an empty horizontal bar.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        let base = PaneBase::new(length, height)?;
        let mut fill = solid_pane(length, height, FILL_MATERIAL)?;
        fill.set_visible(false);
        let background = solid_pane(length, height, BACKGROUND_MATERIAL)?;

        Ok(Self {
            base,
            fill: Arc::new(RwLock::new(fill)),
            background: Arc::new(RwLock::new(background)),
            value: 0.0,
            orientation: Orientation::Horizontal,
            flip: Flip::default(),
        })
    }

    pub fn base(&self) -> &PaneBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the filled fraction of the bar.
    ///
    /// Fails when `value` lies outside of `[0, 1]`.
    pub fn set_value(&mut self, value: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::precondition("Value is out of range (0,1)"));
        }

        self.value = value;
        self.resize_fill();
        Ok(())
    }

    /// Set the filled fraction, clamping it into `[0, 1]`.
    pub(crate) fn set_value_clamped(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
        self.resize_fill();
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the axis the bar fills along.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;

        let mut fill = self.fill.write();
        match orientation {
            Orientation::Horizontal => fill.set_height(self.base.height()),
            Orientation::Vertical => fill.set_length(self.base.length()),
        }
        drop(fill);

        self.resize_fill();
    }

    pub fn flip(&self) -> Flip {
        self.flip
    }

    pub fn flip_horizontally(&mut self, flip: bool) {
        self.flip.horizontal = flip;
        self.resize_fill();
    }

    pub fn flip_vertically(&mut self, flip: bool) {
        self.flip.vertical = flip;
        self.resize_fill();
    }

    /// Resize the bar, keeping the fill proportional.
    pub fn set_length(&mut self, length: i32) {
        self.base.set_length(length);
        self.background.write().set_length(length);
        if self.orientation == Orientation::Vertical {
            self.fill.write().set_length(length);
        }
        self.resize_fill();
    }

    /// Resize the bar, keeping the fill proportional.
    pub fn set_height(&mut self, height: i32) {
        self.base.set_height(height);
        self.background.write().set_height(height);
        if self.orientation == Orientation::Horizontal {
            self.fill.write().set_height(height);
        }
        self.resize_fill();
    }

    /// Show `item` in every filled cell.
    pub fn set_fill_item(&mut self, item: GuiItem) {
        replace_item(&mut self.fill.write(), item);
    }

    /// Show `item` in every unfilled cell.
    pub fn set_background_item(&mut self, item: GuiItem) {
        replace_item(&mut self.background.write(), item);
    }

    /// The pane drawn over the filled part of the bar.
    pub fn fill_pane(&self) -> Arc<RwLock<OutlinePane>> {
        Arc::clone(&self.fill)
    }

    /// The pane drawn under the whole bar.
    pub fn background_pane(&self) -> Arc<RwLock<OutlinePane>> {
        Arc::clone(&self.background)
    }

    /// Fit the fill pane to the current value.
    fn resize_fill(&mut self) {
        let mut fill = self.fill.write();

        match self.orientation {
            Orientation::Horizontal => {
                let length = fill_extent(self.base.length(), self.value);
                fill.set_visible(length != 0);
                if length != 0 {
                    fill.set_length(length);
                }

                let x = if self.flip.horizontal {
                    self.base.length() - fill.length()
                } else {
                    0
                };
                fill.set_slot(Slot::xy(x, 0));
            }
            Orientation::Vertical => {
                let height = fill_extent(self.base.height(), self.value);
                fill.set_visible(height != 0);
                if height != 0 {
                    fill.set_height(height);
                }

                let y = if self.flip.vertical {
                    self.base.height() - fill.height()
                } else {
                    0
                };
                fill.set_slot(Slot::xy(0, y));
            }
        }
    }

    /// Paint the background, then the fill when it is visible.
    pub(crate) fn display(
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
        let (x, y) = (offset_x + pane_x, offset_y + pane_y);

        self.background.read().display(component, x, y, length, height);

        let fill = self.fill.read();
        if fill.is_visible() {
            fill.display(component, x, y, length, height);
        }
    }

    /// Offer a click to the fill, then to the background.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn forward_click(
        &self,
        gui: &mut GuiContext,
        component: &InventoryComponent,
        event: &mut ClickEvent,
        slot: i32,
        offset_x: i32,
        offset_y: i32,
        max_length: i32,
        max_height: i32,
    ) -> bool {
        let (length, height) = self.base.extent(max_length, max_height);
        let Some((pane_x, pane_y)) = self.base.position(max_length) else {
            return false;
        };
        let (x, y) = (offset_x + pane_x, offset_y + pane_y);

        let mut fill = self.fill.write();
        if fill.is_visible() && fill.click(gui, component, event, slot, x, y, length, height) {
            return true;
        }
        drop(fill);

        self.background
            .write()
            .click(gui, component, event, slot, x, y, length, height)
    }

    /// A deep copy with a fresh identity, keeping value, orientation and
    /// flips.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            base: self.base.duplicate(),
            fill: Arc::new(RwLock::new(self.fill.read().duplicate())),
            background: Arc::new(RwLock::new(self.background.read().duplicate())),
            value: self.value,
            orientation: self.orientation,
            flip: self.flip,
        }
    }

    pub(crate) fn items(&self) -> Vec<GuiItem> {
        let mut items = self.fill.read().items();
        items.extend(self.background.read().items());
        items
    }

    pub(crate) fn children(&self) -> Vec<SharedPane> {
        let fill: SharedPane = self.fill.clone();
        let background: SharedPane = self.background.clone();
        vec![fill, background]
    }
}

/// Number of filled cells of a bar `extent` cells long.
fn fill_extent(extent: i32, value: f32) -> i32 {
    (extent as f32 * value).round() as i32
}

static_assertions::assert_impl_all!(VariableBar: Send, Sync);
