//! Paginated pane: pages of child panes, one page shown at a time.

use std::collections::BTreeMap;

use horizon_inventory_core::{ClickEvent, Error, ItemStack, Result};

use super::{
    GuiContext, OutlinePane, Pane, PaneBase, SharedPane, click_first,
    impl_pane_any, insert_by_priority, share,
};
use crate::component::InventoryComponent;
use crate::item::GuiItem;

/// A pane holding numbered pages of panes.
///
/// Only the current page is rendered and receives clicks. Panes on a page are
/// kept sorted by priority.
#[derive(Debug, Clone)]
pub struct PaginatedPane {
    base: PaneBase,
    pages: BTreeMap<i32, Vec<SharedPane>>,
    page: i32,
}

impl PaginatedPane {
    /// Create a `length x height` pane without pages.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        Ok(Self {
            base: PaneBase::new(length, height)?,
            pages: BTreeMap::new(),
            page: 0,
        })
    }

    /// The current page.
    pub fn page(&self) -> i32 {
        self.page
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Show `page`. Fails when the page does not exist.
    pub fn set_page(&mut self, page: i32) -> Result<()> {
        if !self.pages.contains_key(&page) {
            return Err(Error::precondition("page outside range"));
        }
        self.page = page;
        Ok(())
    }

    /// Whether `page` exists.
    pub fn has_page(&self, page: i32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Add a new page after the highest existing one, holding `pane`.
    pub fn add_page(&mut self, pane: SharedPane) -> Result<()> {
        let index = match self.pages.keys().next_back() {
            None => 0,
            Some(&highest) => highest.checked_add(1).ok_or_else(|| {
                Error::precondition("Can't increment page index beyond its maximum value")
            })?,
        };
        self.pages.insert(index, vec![pane]);
        Ok(())
    }

    /// Add `pane` to `page`, creating the page if needed.
    pub fn add_pane(&mut self, page: i32, pane: SharedPane) {
        insert_by_priority(self.pages.entry(page).or_default(), pane);
    }

    /// The panes on `page`. Fails when the page does not exist.
    pub fn panes_on(&self, page: i32) -> Result<&[SharedPane]> {
        self.pages
            .get(&page)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::precondition("Invalid page"))
    }

    /// Remove `page`, shifting every higher page down by one.
    pub fn delete_page(&mut self, page: i32) {
        if self.pages.remove(&page).is_none() {
            return;
        }

        let shifted: Vec<(i32, Vec<SharedPane>)> = self.pages.split_off(&page).into_iter().collect();
        for (index, panes) in shifted {
            self.pages.insert(index - 1, panes);
        }
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Split `items` into pages of outline panes filling this pane.
    ///
    /// Page `i` holds items `i * n .. (i + 1) * n` where `n` is the number of
    /// cells of this pane. Existing pages with the same index receive the new
    /// pane in addition to their current ones.
    pub fn populate_with_gui_items(&mut self, items: Vec<GuiItem>) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let length = self.base.length();
        let height = self.base.height();
        let per_page = (length * height) as usize;

        for (page, chunk) in items.chunks(per_page).enumerate() {
            let mut pane = OutlinePane::new(length, height)?;
            for item in chunk {
                pane.add_item(item.clone());
            }
            self.add_pane(page as i32, share(pane));
        }
        Ok(())
    }

    /// Like [`populate_with_gui_items`](Self::populate_with_gui_items) for
    /// plain stacks without actions.
    pub fn populate_with_item_stacks(&mut self, stacks: Vec<ItemStack>) -> Result<()> {
        self.populate_with_gui_items(stacks.into_iter().map(GuiItem::new).collect())
    }

    /// Populate with stacks of `material` named after `display_names`.
    ///
    /// Nothing happens for air.
    pub fn populate_with_names<S: Into<String>>(
        &mut self,
        display_names: impl IntoIterator<Item = S>,
        material: &str,
    ) -> Result<()> {
        let template = ItemStack::new(material);
        if template.is_air() {
            return Ok(());
        }

        self.populate_with_item_stacks(
            display_names
                .into_iter()
                .map(|name| template.clone().with_display_name(name))
                .collect(),
        )
    }

    fn current_panes(&self) -> Vec<SharedPane> {
        self.pages.get(&self.page).cloned().unwrap_or_default()
    }
}

impl Pane for PaginatedPane {
    fn pane_base(&self) -> &PaneBase {
        &self.base
    }

    fn pane_base_mut(&mut self) -> &mut PaneBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "PaginatedPane"
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

        for pane in self.current_panes() {
            let pane = pane.read();
            if !pane.is_visible() {
                continue;
            }
            pane.display(component, offset_x + pane_x, offset_y + pane_y, length, height);
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

        let panes: Vec<SharedPane> = self.current_panes().into_iter().rev().collect();
        click_first(
            &panes,
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
        let mut copy = Self {
            base: self.base.duplicate(),
            pages: BTreeMap::new(),
            page: self.page,
        };
        for (&page, panes) in &self.pages {
            for pane in panes {
                copy.add_pane(page, pane.read().copy());
            }
        }
        share(copy)
    }

    fn items(&self) -> Vec<GuiItem> {
        self.pages
            .values()
            .flatten()
            .flat_map(|pane| pane.read().items())
            .collect()
    }

    /// The panes of every page, in page order.
    fn children(&self) -> Vec<SharedPane> {
        self.pages.values().flatten().cloned().collect()
    }

    fn clear(&mut self) {
        self.pages.clear();
    }

    impl_pane_any!();
}

static_assertions::assert_impl_all!(PaginatedPane: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use horizon_inventory_core::{InventorySection, ViewerId};

    fn item(material: &str) -> GuiItem {
        GuiItem::new(ItemStack::new(material))
    }

    fn single_item_page(material: &str) -> (SharedPane, GuiItem) {
        let gui_item = item(material);
        let mut pane = OutlinePane::new(1, 1).unwrap();
        pane.add_item(gui_item.clone());
        (share(pane), gui_item)
    }

    #[test]
    fn test_add_page_appends() {
        let mut paginated = PaginatedPane::new(1, 1).unwrap();
        paginated.add_page(single_item_page("a").0).unwrap();
        paginated.add_page(single_item_page("b").0).unwrap();

        assert_eq!(paginated.page_count(), 2);
        assert_eq!(paginated.panes_on(1).unwrap().len(), 1);
        assert!(paginated.panes_on(2).is_err());
    }

    #[test]
    fn test_set_page_rejects_missing_page() {
        let mut paginated = PaginatedPane::new(1, 1).unwrap();
        assert!(paginated.set_page(0).unwrap_err().is_precondition());

        paginated.add_page(single_item_page("a").0).unwrap();
        paginated.set_page(0).unwrap();
        assert_eq!(paginated.page(), 0);
    }

    #[test]
    fn test_only_current_page_is_displayed() {
        let mut paginated = PaginatedPane::new(1, 1).unwrap();
        let (first, first_item) = single_item_page("a");
        let (second, second_item) = single_item_page("b");
        paginated.add_page(first).unwrap();
        paginated.add_page(second).unwrap();
        let paginated = Arc::new(parking_lot::RwLock::new(paginated));

        let mut component = InventoryComponent::new(1, 1).unwrap();
        component.add_pane(paginated.clone());
        component.display();
        assert_eq!(component.item(0, 0).unwrap().unwrap().id(), first_item.id());

        paginated.write().set_page(1).unwrap();
        component.display();
        assert_eq!(component.item(0, 0).unwrap().unwrap().id(), second_item.id());
    }

    #[test]
    fn test_delete_page_shifts_higher_pages() {
        let mut paginated = PaginatedPane::new(1, 1).unwrap();
        for material in ["a", "b", "c"] {
            paginated.add_page(single_item_page(material).0).unwrap();
        }

        let third = Arc::clone(&paginated.panes_on(2).unwrap()[0]);
        paginated.delete_page(1);

        assert_eq!(paginated.page_count(), 2);
        assert!(Arc::ptr_eq(&paginated.panes_on(1).unwrap()[0], &third));

        paginated.delete_page(7);
        assert_eq!(paginated.page_count(), 2);
    }

    #[test]
    fn test_populate_splits_items_into_pages() {
        let mut paginated = PaginatedPane::new(2, 2).unwrap();
        let items: Vec<GuiItem> = (0..9).map(|i| item(&format!("item_{i}"))).collect();

        paginated.populate_with_gui_items(items).unwrap();

        assert_eq!(paginated.page_count(), 3);
        assert_eq!(paginated.panes_on(2).unwrap()[0].read().items().len(), 1);
        assert_eq!(paginated.items().len(), 9);
    }

    #[test]
    fn test_populate_with_names() {
        let mut paginated = PaginatedPane::new(9, 1).unwrap();
        paginated
            .populate_with_names(["One", "Two"], "paper")
            .unwrap();

        let items = paginated.items();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[1].stack().meta().display_name.as_deref(),
            Some("Two")
        );

        let mut empty = PaginatedPane::new(9, 1).unwrap();
        empty.populate_with_names(["Ignored"], "air").unwrap();
        assert_eq!(empty.page_count(), 0);
    }

    #[test]
    fn test_click_reaches_current_page() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let clicked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&clicked);
        let target = item("a").with_action(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let mut page = OutlinePane::new(1, 1).unwrap();
        page.add_item(target);
        let mut paginated = PaginatedPane::new(1, 1).unwrap();
        paginated.add_page(share(page)).unwrap();

        let mut component = InventoryComponent::new(1, 1).unwrap();
        component.add_pane(share(paginated));
        component.display();

        let rendered = component.item(0, 0).unwrap().unwrap().stack().clone();
        let mut event = ClickEvent::new(ViewerId::new(1), 0, InventorySection::Top)
            .with_current_item(Some(rendered));

        assert!(component.click(&mut GuiContext::new(), &mut event, 0));
        assert!(clicked.load(Ordering::SeqCst));
    }

    #[test]
    fn test_click_prefers_highest_priority_on_page() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::pane::widgets::ToggleButton;
        use crate::pane::{Priority, StaticPane};
        use horizon_inventory_core::Slot;

        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let mut front = StaticPane::new(1, 1).unwrap().with_priority(Priority::High);
        front.add_item(
            item("diamond").with_action(move |event| {
                counter.fetch_add(1, Ordering::SeqCst);
                event.set_cancelled(true);
                Ok(())
            }),
            Slot::xy(0, 0),
        );
        let toggle = Arc::new(parking_lot::RwLock::new(
            ToggleButton::new(1, 1).unwrap().with_priority(Priority::Low),
        ));

        let mut paginated = PaginatedPane::new(1, 1).unwrap();
        paginated.add_pane(0, toggle.clone());
        paginated.add_pane(0, share(front));

        let mut component = InventoryComponent::new(1, 1).unwrap();
        component.add_pane(share(paginated));
        component.display();

        let rendered = component.item(0, 0).unwrap().unwrap().stack().clone();
        assert_eq!(rendered.material(), "diamond");
        let mut event = ClickEvent::new(ViewerId::new(1), 0, InventorySection::Top)
            .with_current_item(Some(rendered));

        assert!(component.click(&mut GuiContext::new(), &mut event, 0));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!toggle.read().is_enabled());
    }

    #[test]
    fn test_copy_is_deep() {
        let mut paginated = PaginatedPane::new(1, 1).unwrap();
        paginated.add_page(single_item_page("a").0).unwrap();

        let copy = paginated.copy();
        let copy = copy.read();
        let copy = copy.as_any().downcast_ref::<PaginatedPane>().unwrap();

        assert!(!Arc::ptr_eq(
            &copy.panes_on(0).unwrap()[0],
            &paginated.panes_on(0).unwrap()[0]
        ));
        assert_eq!(copy.items()[0].id(), paginated.items()[0].id());
    }
}
