//! Masonry pane: child panes packed into the first free position.

use horizon_inventory_core::{ClickEvent, Orientation, Result, Slot};

use super::{
    GuiContext, Pane, PaneBase, SharedPane, click_first, impl_pane_any, share,
};
use crate::component::InventoryComponent;
use crate::item::GuiItem;

/// A pane that places its children automatically.
///
/// On every render each visible child, in insertion order, is moved to the
/// first position where it fits without overlapping an earlier child.
/// Positions are scanned row by row for [`Orientation::Horizontal`] and
/// column by column for [`Orientation::Vertical`]. Children that fit nowhere
/// are not rendered.
#[derive(Debug, Clone)]
pub struct MasonryPane {
    base: PaneBase,
    children: Vec<SharedPane>,
    orientation: Orientation,
}

impl MasonryPane {
    /// Create an empty `length x height` pane.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        Ok(Self {
            base: PaneBase::new(length, height)?,
            children: Vec::new(),
            orientation: Orientation::default(),
        })
    }

    /// Append a child pane.
    pub fn add_pane(&mut self, pane: SharedPane) {
        self.children.push(pane);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Set the orientation (builder pattern).
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Occupancy grid used while packing children.
struct Occupancy {
    cells: Vec<bool>,
    length: i32,
    height: i32,
}

impl Occupancy {
    fn new(length: i32, height: i32) -> Self {
        Self {
            cells: vec![false; (length.max(0) * height.max(0)) as usize],
            length,
            height,
        }
    }

    fn fits(&self, x: i32, y: i32, length: i32, height: i32) -> bool {
        if x + length > self.length || y + height > self.height {
            return false;
        }
        (y..y + height).all(|cy| {
            (x..x + length).all(|cx| !self.cells[(cy * self.length + cx) as usize])
        })
    }

    fn occupy(&mut self, x: i32, y: i32, length: i32, height: i32) {
        for cy in y..y + height {
            for cx in x..x + length {
                self.cells[(cy * self.length + cx) as usize] = true;
            }
        }
    }

    /// First free position for a `length x height` block.
    fn find(&self, length: i32, height: i32, orientation: Orientation) -> Option<(i32, i32)> {
        match orientation {
            Orientation::Horizontal => (0..self.height)
                .flat_map(|y| (0..self.length).map(move |x| (x, y)))
                .find(|&(x, y)| self.fits(x, y, length, height)),
            Orientation::Vertical => (0..self.length)
                .flat_map(|x| (0..self.height).map(move |y| (x, y)))
                .find(|&(x, y)| self.fits(x, y, length, height)),
        }
    }
}

impl Pane for MasonryPane {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "MasonryPane"
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
        let mut occupancy = Occupancy::new(length, height);

        for child in &self.children {
            let mut child = child.write();
            if !child.is_visible() {
                continue;
            }

            let Some((x, y)) = occupancy.find(child.length(), child.height(), self.orientation)
            else {
                tracing::trace!(
                    target: horizon_inventory_core::logging::targets::PANE,
                    child = %child.id(),
                    "child does not fit into masonry pane"
                );
                continue;
            };

            occupancy.occupy(x, y, child.length(), child.height());
            child.set_slot(Slot::xy(x, y));
            child.display(component, offset_x + pane_x, offset_y + pane_y, length, height);
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
        let Some((pane_x, pane_y)) = self.base.position(max_length) else {
            return false;
        };
        let (length, height) = self.base.extent(max_length, max_height);

        self.base.call_on_click(event, self.kind());

        let children = self.children.clone();
        click_first(
            &children,
            gui,
            component,
            event,
            slot,
            offset_x + pane_x,
            offset_y + pane_y,
            length,
            height,
        )
    }

    fn copy(&self) -> SharedPane {
        share(Self {
            base: self.base.duplicate(),
            children: self.children.iter().map(|child| child.read().copy()).collect(),
            orientation: self.orientation,
        })
    }

    fn items(&self) -> Vec<GuiItem> {
        self.children
            .iter()
            .flat_map(|child| child.read().items())
            .collect()
    }

    fn children(&self) -> Vec<SharedPane> {
        self.children.clone()
    }

    fn clear(&mut self) {
        self.children.clear();
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(MasonryPane: Send, Sync);
