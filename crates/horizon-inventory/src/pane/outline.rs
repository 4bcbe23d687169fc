//! Outline pane: items flowing through the enabled cells of a mask.

use horizon_inventory_core::{
    Alignment, ClickEvent, Error, Flip, Mask, Orientation, Result, Rotation,
};

use super::{GuiContext, Pane, PaneBase, SharedPane, click_matching_item, impl_pane_any, share};
use crate::component::InventoryComponent;
use crate::item::GuiItem;

/// A pane that lays out an ordered list of items line by line.
///
/// Lines are rows for [`Orientation::Horizontal`] and columns for
/// [`Orientation::Vertical`]. Only cells enabled in the pane's [`Mask`]
/// receive items. Between two items `gap` enabled cells are left empty. With
/// `repeat` enabled the item list wraps around so every enabled cell is
/// filled.
#[derive(Debug, Clone)]
pub struct OutlinePane {
    base: PaneBase,
    items: Vec<GuiItem>,
    orientation: Orientation,
    alignment: Alignment,
    rotation: Rotation,
    flip: Flip,
    gap: usize,
    repeat: bool,
    mask: Mask,
}

impl OutlinePane {
    /// Create an empty `length x height` pane with a fully enabled mask.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        let base = PaneBase::new(length, height)?;

        Ok(Self {
            base,
            items: Vec::new(),
            orientation: Orientation::default(),
            alignment: Alignment::default(),
            rotation: Rotation::NONE,
            flip: Flip::default(),
            gap: 0,
            repeat: false,
            mask: Mask::filled(length as usize, height as usize),
        })
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Append an item.
    pub fn add_item(&mut self, item: GuiItem) {
        self.items.push(item);
    }

    /// Insert an item at `index`, shifting later items.
    ///
    /// Fails when `index` is past the end of the item list.
    pub fn insert_item(&mut self, item: GuiItem, index: usize) -> Result<()> {
        if index > self.items.len() {
            return Err(Error::precondition(format!(
                "Index {index} is out of range for {} items",
                self.items.len()
            )));
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove every occurrence of `item`.
    pub fn remove_item(&mut self, item: &GuiItem) {
        self.items.retain(|existing| existing != item);
    }

    /// The items in layout order.
    pub fn item_list(&self) -> &[GuiItem] {
        &self.items
    }

    // =========================================================================
    // Layout options
    // =========================================================================

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

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Set the alignment (builder pattern).
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Number of empty enabled cells between two items.
    pub fn gap(&self) -> usize {
        self.gap
    }

    pub fn set_gap(&mut self, gap: usize) {
        self.gap = gap;
    }

    pub fn does_repeat(&self) -> bool {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    /// Enable or disable repeating (builder pattern).
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn flip(&self) -> Flip {
        self.flip
    }

    pub fn flip_horizontally(&mut self, flip: bool) {
        self.flip.horizontal = flip;
    }

    pub fn flip_vertically(&mut self, flip: bool) {
        self.flip.vertical = flip;
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Rotate the content clockwise. Only square panes can be rotated.
    pub fn set_rotation(&mut self, degrees: i32) -> Result<()> {
        if self.base.length() != self.base.height() {
            return Err(Error::precondition("length and height are different"));
        }
        self.rotation = Rotation::from_degrees(degrees)?;
        Ok(())
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Replace the mask. Its dimensions must equal the pane's.
    pub fn apply_mask(&mut self, mask: Mask) -> Result<()> {
        if mask.length() as i32 != self.base.length() || mask.height() as i32 != self.base.height()
        {
            return Err(Error::precondition(
                "Mask's dimension must be the same as the pane's dimension",
            ));
        }
        self.mask = mask;
        Ok(())
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Items assigned to the enabled cells of one line, `None` for gaps.
    fn fill_line(&self, enabled: usize, item_index: &mut usize, gap_count: &mut usize) -> Vec<Option<&GuiItem>> {
        let slots = if self.repeat {
            enabled
        } else {
            let remaining = self.items.len() - *item_index;
            let positions = *gap_count + (remaining - 1) * (self.gap + 1) + 1;
            enabled.min(positions)
        };

        let mut line = Vec::with_capacity(slots);
        for _ in 0..slots {
            if *gap_count == 0 {
                line.push(self.items.get(*item_index));
                *item_index += 1;
                if self.repeat && *item_index >= self.items.len() {
                    *item_index = 0;
                }
                *gap_count = self.gap;
            } else {
                line.push(None);
                *gap_count -= 1;
            }
        }
        line
    }

    /// Local cells and the item each one shows, before clipping.
    fn layout(&self, length: i32, height: i32) -> Vec<(i32, i32, &GuiItem)> {
        let lines = match self.orientation {
            Orientation::Horizontal => height,
            Orientation::Vertical => length,
        };

        let mut placed = Vec::new();
        let mut item_index = 0;
        let mut gap_count = 0;

        for line_index in 0..lines.max(0) as usize {
            if item_index >= self.items.len() {
                break;
            }

            let mask_line = match self.orientation {
                Orientation::Horizontal => self.mask.row(line_index),
                Orientation::Vertical => self.mask.column(line_index),
            };
            let Ok(mask_line) = mask_line else {
                break;
            };

            let enabled = mask_line.iter().filter(|cell| **cell).count();
            let line = self.fill_line(enabled, &mut item_index, &mut gap_count);

            let mut index: i64 = match self.alignment {
                Alignment::Begin => 0,
                Alignment::Center => -(((enabled - line.len()) / 2) as i64),
            };

            for (cross_index, _) in mask_line.iter().enumerate().filter(|(_, cell)| **cell) {
                if index >= 0 {
                    if let Some(Some(item)) = line.get(index as usize) {
                        let (x, y) = match self.orientation {
                            Orientation::Horizontal => (cross_index as i32, line_index as i32),
                            Orientation::Vertical => (line_index as i32, cross_index as i32),
                        };
                        placed.push((x, y, *item));
                    }
                }
                index += 1;
            }
        }

        placed
    }

    /// A deep copy with a fresh pane identity; items keep their identity.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            base: self.base.duplicate(),
            items: self.items.iter().map(GuiItem::copy).collect(),
            ..self.clone()
        }
    }
}

impl Pane for OutlinePane {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "OutlinePane"
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

        for (x, y, item) in self.layout(length, height) {
            let (x, y) = self.flip.apply(x, y, length, height);
            let (x, y) = self.rotation.apply(x, y, length, height);

            if x < 0 || x >= length || y < 0 || y >= height || !item.is_visible() {
                continue;
            }

            component.paint(item, pane_x + x + offset_x, pane_y + y + offset_y);
        }
    }

    fn click(
        &mut self,
        _gui: &mut GuiContext,
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
        click_matching_item(&self.items, event)
    }

    fn copy(&self) -> SharedPane {
        share(self.duplicate())
    }

    fn items(&self) -> Vec<GuiItem> {
        self.items.clone()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn set_length(&mut self, length: i32) {
        self.base.set_length(length);
        self.mask = self.mask.with_length(length.max(0) as usize);
    }

    fn set_height(&mut self, height: i32) {
        self.base.set_height(height);
        self.mask = self.mask.with_height(height.max(0) as usize);
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(OutlinePane: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_inventory_core::{InventorySection, ItemStack, Slot, ViewerId};

    fn item(material: &str) -> GuiItem {
        GuiItem::new(ItemStack::new(material))
    }

    fn materials(component: &InventoryComponent, y: i32) -> Vec<Option<String>> {
        (0..component.length())
            .map(|x| {
                component
                    .item(x, y)
                    .unwrap()
                    .map(|item| item.stack().material().to_string())
            })
            .collect()
    }

    fn render(pane: OutlinePane, length: i32, height: i32) -> InventoryComponent {
        let mut component = InventoryComponent::new(length, height).unwrap();
        component.add_pane(share(pane));
        component.display();
        component
    }

    #[test]
    fn test_items_fill_row_in_order() {
        let mut pane = OutlinePane::new(9, 1).unwrap();
        pane.add_item(item("a"));
        pane.add_item(item("b"));

        let component = render(pane, 9, 1);
        let row = materials(&component, 0);

        assert_eq!(row[0].as_deref(), Some("a"));
        assert_eq!(row[1].as_deref(), Some("b"));
        assert!(row[2..].iter().all(Option::is_none));
    }

    #[test]
    fn test_gap_leaves_empty_cells() {
        let mut pane = OutlinePane::new(5, 1).unwrap();
        pane.set_gap(1);
        pane.add_item(item("a"));
        pane.add_item(item("b"));
        pane.add_item(item("c"));

        let component = render(pane, 5, 1);
        let row = materials(&component, 0);

        assert_eq!(
            row,
            vec![
                Some("a".into()),
                None,
                Some("b".into()),
                None,
                Some("c".into())
            ]
        );
    }

    #[test]
    fn test_repeat_fills_every_enabled_cell() {
        let mut pane = OutlinePane::new(3, 2).unwrap().with_repeat(true);
        pane.apply_mask(Mask::new(["101", "111"]).unwrap()).unwrap();
        pane.add_item(item("a"));
        pane.add_item(item("b"));

        let component = render(pane, 3, 2);

        assert_eq!(
            materials(&component, 0),
            vec![Some("a".into()), None, Some("b".into())]
        );
        assert_eq!(
            materials(&component, 1),
            vec![Some("a".into()), Some("b".into()), Some("a".into())]
        );
    }

    #[test]
    fn test_center_alignment() {
        let mut pane = OutlinePane::new(5, 1).unwrap().with_alignment(Alignment::Center);
        pane.add_item(item("a"));

        let component = render(pane, 5, 1);
        let row = materials(&component, 0);

        assert_eq!(row[2].as_deref(), Some("a"));
        assert_eq!(row.iter().filter(|cell| cell.is_some()).count(), 1);
    }

    #[test]
    fn test_vertical_orientation() {
        let mut pane = OutlinePane::new(2, 2)
            .unwrap()
            .with_orientation(Orientation::Vertical);
        pane.add_item(item("a"));
        pane.add_item(item("b"));
        pane.add_item(item("c"));

        let component = render(pane, 2, 2);

        assert_eq!(materials(&component, 0), vec![Some("a".into()), Some("c".into())]);
        assert_eq!(materials(&component, 1), vec![Some("b".into()), None]);
    }

    #[test]
    fn test_horizontal_flip() {
        let mut pane = OutlinePane::new(3, 1).unwrap();
        pane.flip_horizontally(true);
        pane.add_item(item("a"));

        let component = render(pane, 3, 1);
        assert_eq!(materials(&component, 0), vec![None, None, Some("a".into())]);
    }

    #[test]
    fn test_rotation_requires_square_pane() {
        let mut pane = OutlinePane::new(3, 1).unwrap();
        assert!(pane.set_rotation(90).unwrap_err().is_precondition());

        let mut square = OutlinePane::new(2, 2).unwrap();
        square.set_rotation(90).unwrap();
        square.add_item(item("a"));

        // (0, 0) rotated clockwise lands in the top right corner.
        let component = render(square, 2, 2);
        assert_eq!(materials(&component, 0), vec![None, Some("a".into())]);
    }

    #[test]
    fn test_invisible_item_keeps_its_cell() {
        let mut pane = OutlinePane::new(3, 1).unwrap();
        pane.add_item(item("a").with_visible(false));
        pane.add_item(item("b"));

        let component = render(pane, 3, 1);
        assert_eq!(materials(&component, 0), vec![None, Some("b".into()), None]);
    }

    #[test]
    fn test_pane_is_clipped_to_parent() {
        let mut pane = OutlinePane::new(4, 1)
            .unwrap()
            .with_slot(Slot::xy(1, 0))
            .with_repeat(true);
        pane.add_item(item("a"));

        let component = render(pane, 3, 1);
        assert_eq!(
            materials(&component, 0),
            vec![None, Some("a".into()), Some("a".into())]
        );
    }

    #[test]
    fn test_mask_dimensions_must_match() {
        let mut pane = OutlinePane::new(3, 1).unwrap();
        assert!(pane.apply_mask(Mask::new(["11"]).unwrap()).is_err());
    }

    #[test]
    fn test_resizing_resizes_mask() {
        let mut pane = OutlinePane::new(2, 1).unwrap();
        pane.apply_mask(Mask::new(["01"]).unwrap()).unwrap();

        pane.set_length(3);
        pane.set_height(2);

        assert_eq!(pane.mask().to_rows(), vec!["011", "111"]);
    }

    #[test]
    fn test_click_calls_matching_item() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let clicked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&clicked);
        let target = item("a").with_action(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let mut pane = OutlinePane::new(9, 1).unwrap();
        pane.add_item(target.clone());
        let pane = share(pane);

        let mut component = InventoryComponent::new(9, 1).unwrap();
        component.add_pane(Arc::clone(&pane));
        component.display();

        let rendered = component.item(0, 0).unwrap().unwrap().stack().clone();
        let mut event = ClickEvent::new(ViewerId::new(1), 0, InventorySection::Top)
            .with_current_item(Some(rendered));
        let mut gui = GuiContext::new();

        assert!(component.click(&mut gui, &mut event, 0));
        assert!(clicked.load(Ordering::SeqCst));

        let mut empty = ClickEvent::new(ViewerId::new(1), 5, InventorySection::Top);
        assert!(!component.click(&mut gui, &mut empty, 5));
    }

    #[test]
    fn test_copy_keeps_items_and_options() {
        let mut pane = OutlinePane::new(3, 1).unwrap().with_repeat(true);
        pane.set_gap(2);
        pane.add_item(item("a"));

        let copy = pane.copy();
        let copy = copy.read();
        let copy = copy.as_any().downcast_ref::<OutlinePane>().unwrap();

        assert_ne!(copy.id(), pane.id());
        assert_eq!(copy.gap(), 2);
        assert!(copy.does_repeat());
        assert_eq!(copy.item_list()[0].id(), pane.item_list()[0].id());
    }
}
