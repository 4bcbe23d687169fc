//! Static pane: items at fixed slots.

use std::collections::BTreeMap;

use horizon_inventory_core::{ClickEvent, Error, Flip, ItemStack, Result, Rotation, Slot};

use super::{GuiContext, Pane, PaneBase, SharedPane, click_matching_item, impl_pane_any, share};
use crate::component::InventoryComponent;
use crate::item::{ClickAction, GuiItem};

/// A pane holding items at explicit slots.
///
/// Slots are resolved against the pane's own length, so `Slot::indexed(3)`
/// in a pane of length 2 is the cell `(1, 1)`.
#[derive(Debug, Clone)]
pub struct StaticPane {
    base: PaneBase,
    items: BTreeMap<Slot, GuiItem>,
    rotation: Rotation,
    flip: Flip,
}

impl StaticPane {
    /// Create an empty `length x height` pane.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        Ok(Self {
            base: PaneBase::new(length, height)?,
            items: BTreeMap::new(),
            rotation: Rotation::NONE,
            flip: Flip::default(),
        })
    }

    /// Put `item` at `slot`, replacing any item there.
    pub fn add_item(&mut self, item: GuiItem, slot: Slot) {
        self.items.insert(slot, item);
    }

    /// Remove every occurrence of `item`.
    pub fn remove_item(&mut self, item: &GuiItem) {
        self.items.retain(|_, existing| existing != item);
    }

    /// Remove the item stored under `slot`.
    pub fn remove_item_at(&mut self, slot: Slot) -> Option<GuiItem> {
        self.items.remove(&slot)
    }

    /// The item stored under `slot`.
    pub fn item_at(&self, slot: Slot) -> Option<&GuiItem> {
        self.items.get(&slot)
    }

    /// Fill every empty cell with a new item showing `stack`.
    ///
    /// All created items share `action`.
    pub fn fill_with(&mut self, stack: ItemStack, action: Option<ClickAction>) {
        let length = self.base.length();
        let height = self.base.height();

        for y in 0..height {
            for x in 0..length {
                let occupied = self.items.keys().any(|slot| slot.is_at(x, y, length));
                if occupied {
                    continue;
                }

                let mut item = GuiItem::new(stack.clone());
                item.set_action(action.clone());
                self.items.insert(Slot::xy(x, y), item);
            }
        }
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
}

impl Pane for StaticPane {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "StaticPane"
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

        for (slot, item) in &self.items {
            if !item.is_visible() {
                continue;
            }
            let Ok((x, y)) = slot.resolve(self.base.length()) else {
                continue;
            };

            let (x, y) = self.flip.apply(x, y, length, height);
            let (x, y) = self.rotation.apply(x, y, length, height);
            if x < 0 || x >= length || y < 0 || y >= height {
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
        click_matching_item(self.items.values(), event)
    }

    fn copy(&self) -> SharedPane {
        share(Self {
            base: self.base.duplicate(),
            items: self
                .items
                .iter()
                .map(|(slot, item)| (*slot, item.copy()))
                .collect(),
            rotation: self.rotation,
            flip: self.flip,
        })
    }

    fn items(&self) -> Vec<GuiItem> {
        self.items.values().cloned().collect()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(StaticPane: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::cancel_click;
    use horizon_inventory_core::{InventorySection, ViewerId};

    fn item(material: &str) -> GuiItem {
        GuiItem::new(ItemStack::new(material))
    }

    #[test]
    fn test_indexed_slot_resolves_against_pane_length() {
        let mut pane = StaticPane::new(9, 1).unwrap();
        let diamond = item("diamond");
        pane.add_item(diamond.clone(), Slot::indexed(3));

        let mut component = InventoryComponent::new(9, 1).unwrap();
        component.add_pane(share(pane));
        component.display();

        for x in 0..9 {
            let cell = component.item(x, 0).unwrap();
            if x == 3 {
                assert_eq!(cell.unwrap().id(), diamond.id());
            } else {
                assert!(cell.is_none());
            }
        }
    }

    #[test]
    fn test_fill_with_only_fills_empty_cells() {
        let mut pane = StaticPane::new(2, 2).unwrap();
        let keep = item("diamond");
        pane.add_item(keep.clone(), Slot::indexed(1));

        pane.fill_with(ItemStack::new("glass"), Some(cancel_click()));

        let items = pane.items();
        assert_eq!(items.len(), 4);
        assert_eq!(pane.item_at(Slot::indexed(1)).unwrap().id(), keep.id());
        assert!(pane.item_at(Slot::xy(1, 0)).is_none());
        assert!(pane.item_at(Slot::xy(0, 0)).unwrap().has_action());
    }

    #[test]
    fn test_remove_items() {
        let mut pane = StaticPane::new(3, 1).unwrap();
        let a = item("a");
        pane.add_item(a.clone(), Slot::xy(0, 0));
        pane.add_item(a.clone(), Slot::xy(1, 0));
        pane.add_item(item("b"), Slot::xy(2, 0));

        pane.remove_item(&a);
        assert_eq!(pane.items().len(), 1);

        assert!(pane.remove_item_at(Slot::xy(2, 0)).is_some());
        assert!(pane.items().is_empty());
    }

    #[test]
    fn test_vertical_flip() {
        let mut pane = StaticPane::new(1, 3).unwrap();
        pane.flip_vertically(true);
        let a = item("a");
        pane.add_item(a.clone(), Slot::xy(0, 0));

        let mut component = InventoryComponent::new(1, 3).unwrap();
        component.add_pane(share(pane));
        component.display();

        assert_eq!(component.item(0, 2).unwrap().unwrap().id(), a.id());
    }

    #[test]
    fn test_click_outside_items_is_not_claimed() {
        let mut pane = StaticPane::new(3, 1).unwrap();
        pane.add_item(item("a"), Slot::xy(0, 0));
        let mut component = InventoryComponent::new(3, 1).unwrap();
        component.add_pane(share(pane));
        component.display();

        let mut gui = GuiContext::new();
        let mut event = ClickEvent::new(ViewerId::new(1), 1, InventorySection::Top);
        assert!(!component.click(&mut gui, &mut event, 1));
    }
}
