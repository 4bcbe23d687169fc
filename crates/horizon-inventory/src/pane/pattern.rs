//! Pattern pane: items bound to the characters of a pattern.

use std::collections::BTreeMap;

use horizon_inventory_core::{ClickEvent, Error, Flip, Pattern, Result, Rotation};

use super::{GuiContext, Pane, PaneBase, SharedPane, click_matching_item, impl_pane_any, share};
use crate::component::InventoryComponent;
use crate::item::GuiItem;

/// A pane whose cells show the item bound to the cell's pattern character.
///
/// Many cells may share a character and therefore the same item. Cells with
/// an unbound character stay empty.
#[derive(Debug, Clone)]
pub struct PatternPane {
    base: PaneBase,
    pattern: Pattern,
    bindings: BTreeMap<char, GuiItem>,
    rotation: Rotation,
    flip: Flip,
}

impl PatternPane {
    /// Create a `length x height` pane showing `pattern`.
    ///
    /// The pattern's dimensions must equal the pane's.
    pub fn new(length: i32, height: i32, pattern: Pattern) -> Result<Self> {
        let base = PaneBase::new(length, height)?;
        check_dimensions(&base, &pattern)?;

        Ok(Self {
            base,
            pattern,
            bindings: BTreeMap::new(),
            rotation: Rotation::NONE,
            flip: Flip::default(),
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Replace the pattern. Its dimensions must equal the pane's.
    pub fn set_pattern(&mut self, pattern: Pattern) -> Result<()> {
        check_dimensions(&self.base, &pattern)?;
        self.pattern = pattern;
        Ok(())
    }

    /// Bind `item` to every cell showing `character`.
    pub fn bind_item(&mut self, character: char, item: GuiItem) {
        self.bindings.insert(character, item);
    }

    /// Remove the binding of `character`.
    pub fn unbind(&mut self, character: char) -> Option<GuiItem> {
        self.bindings.remove(&character)
    }

    /// The item bound to `character`.
    pub fn binding(&self, character: char) -> Option<&GuiItem> {
        self.bindings.get(&character)
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
            return Err(Error::precondition(
                "Rotations can only be applied to square panes",
            ));
        }
        self.rotation = Rotation::from_degrees(degrees)?;
        Ok(())
    }

    /// Bound items whose character occurs in the pattern.
    fn shown_items(&self) -> impl Iterator<Item = &GuiItem> {
        self.bindings
            .iter()
            .filter(|(character, _)| self.pattern.contains(**character))
            .map(|(_, item)| item)
    }
}

fn check_dimensions(base: &PaneBase, pattern: &Pattern) -> Result<()> {
    if pattern.length() as i32 != base.length() || pattern.height() as i32 != base.height() {
        return Err(Error::precondition(
            "Dimensions of the provided pattern do not match the dimensions of the pane",
        ));
    }
    Ok(())
}

impl Pane for PatternPane {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "PatternPane"
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

        for y in 0..height {
            for x in 0..length {
                let Ok(character) = self.pattern.character(x as usize, y as usize) else {
                    continue;
                };
                let Some(item) = self.bindings.get(&character) else {
                    continue;
                };
                if !item.is_visible() {
                    continue;
                }

                let (new_x, new_y) = self.flip.apply(x, y, length, height);
                let (new_x, new_y) = self.rotation.apply(new_x, new_y, length, height);

                component.paint(item, pane_x + new_x + offset_x, pane_y + new_y + offset_y);
            }
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
        click_matching_item(self.shown_items(), event)
    }

    fn copy(&self) -> SharedPane {
        share(Self {
            base: self.base.duplicate(),
            pattern: self.pattern.clone(),
            bindings: self
                .bindings
                .iter()
                .map(|(character, item)| (*character, item.copy()))
                .collect(),
            rotation: self.rotation,
            flip: self.flip,
        })
    }

    fn items(&self) -> Vec<GuiItem> {
        self.shown_items().cloned().collect()
    }

    fn clear(&mut self) {
        self.bindings.clear();
    }

    fn set_length(&mut self, length: i32) {
        self.base.set_length(length);
        self.pattern = self.pattern.with_length(length.max(0) as usize);
    }

    fn set_height(&mut self, height: i32) {
        self.base.set_height(height);
        self.pattern = self.pattern.with_height(height.max(0) as usize);
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(PatternPane: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_inventory_core::ItemStack;

    fn item(material: &str) -> GuiItem {
        GuiItem::new(ItemStack::new(material))
    }

    fn render(pane: PatternPane) -> InventoryComponent {
        let mut component = InventoryComponent::new(pane.length(), pane.height()).unwrap();
        component.add_pane(share(pane));
        component.display();
        component
    }

    #[test]
    fn test_bound_characters_are_rendered() {
        let pattern = Pattern::new(["aba", "bab"]).unwrap();
        let mut pane = PatternPane::new(3, 2, pattern).unwrap();
        let a = item("glass");
        pane.bind_item('a', a.clone());

        let component = render(pane);

        assert_eq!(component.item(0, 0).unwrap().unwrap().id(), a.id());
        assert_eq!(component.item(2, 0).unwrap().unwrap().id(), a.id());
        assert_eq!(component.item(1, 1).unwrap().unwrap().id(), a.id());
        assert!(component.item(1, 0).unwrap().is_none());
    }

    #[test]
    fn test_items_only_lists_used_bindings() {
        let pattern = Pattern::new(["aa"]).unwrap();
        let mut pane = PatternPane::new(2, 1, pattern).unwrap();
        pane.bind_item('a', item("a"));
        pane.bind_item('z', item("z"));

        assert_eq!(pane.items().len(), 1);
    }

    #[test]
    fn test_pattern_dimensions_must_match() {
        let pattern = Pattern::new(["ab"]).unwrap();
        assert!(PatternPane::new(3, 1, pattern.clone()).is_err());

        let mut pane = PatternPane::new(2, 1, pattern).unwrap();
        assert!(pane.set_pattern(Pattern::new(["a"]).unwrap()).is_err());
    }

    #[test]
    fn test_resizing_extends_pattern() {
        let mut pane = PatternPane::new(2, 1, Pattern::new(["ab"]).unwrap()).unwrap();
        pane.set_length(3);
        pane.set_height(2);
        assert_eq!(pane.pattern().to_rows(), vec!["abb", "abb"]);
    }

    #[test]
    fn test_copy_keeps_bindings() {
        let mut pane = PatternPane::new(1, 1, Pattern::new(["x"]).unwrap()).unwrap();
        let x = item("x");
        pane.bind_item('x', x.clone());

        let copy = pane.copy();
        let copy = copy.read();
        let items = copy.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), x.id());
    }

    #[test]
    fn test_rotation_half_turn() {
        let mut pane = PatternPane::new(2, 2, Pattern::new(["ab", "cd"]).unwrap()).unwrap();
        let a = item("a");
        pane.bind_item('a', a.clone());
        pane.set_rotation(180).unwrap();

        let component = render(pane);
        assert_eq!(component.item(1, 1).unwrap().unwrap().id(), a.id());
    }
}
