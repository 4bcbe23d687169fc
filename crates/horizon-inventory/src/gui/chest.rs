//! Chest GUI.

use std::sync::Arc;

use horizon_inventory_core::logging::{span_names, targets};
use horizon_inventory_core::{
    ChestInventory, ClickEvent, DragEvent, Error, Inventory, InventorySection, ItemStack,
    PerfSpan, Result, ROW_LENGTH, ViewerId,
};

use super::{CloseAction, DragAction, Viewer, ViewerCache};
use crate::component::InventoryComponent;
use crate::item::{ClickAction, GuiItem};
use crate::pane::{GuiContext, SharedPane};

/// Rows of a viewer's inventory that take part in rendering: three storage
/// rows and the hotbar.
const PLAYER_ROWS: i32 = 4;

/// A GUI shown in a chest with one to six rows.
///
/// The GUI's component is nine columns wide and `rows + 4` rows high. The top
/// `rows` rows are painted into the chest; the bottom four are painted into
/// the viewer's own inventory, whose items are stored away while the GUI
/// uses it and restored on close.
pub struct ChestGui {
    title: String,
    component: InventoryComponent,
    inventory: ChestInventory,
    viewers: Vec<Viewer>,
    cache: ViewerCache,
    updating: bool,

    on_top_click: Option<ClickAction>,
    on_bottom_click: Option<ClickAction>,
    on_global_click: Option<ClickAction>,
    on_outside_click: Option<ClickAction>,
    on_top_drag: Option<DragAction>,
    on_bottom_drag: Option<DragAction>,
    on_global_drag: Option<DragAction>,
    on_close: Option<CloseAction>,
}

impl ChestGui {
    /// Create a GUI with `rows` chest rows.
    ///
    /// Fails unless `rows` is between 1 and 6.
    pub fn new(rows: i32, title: impl Into<String>) -> Result<Self> {
        check_rows(rows)?;
        let title = title.into();

        Ok(Self {
            component: InventoryComponent::new(ROW_LENGTH as i32, rows + PLAYER_ROWS)?,
            inventory: ChestInventory::new(title.clone(), rows as usize),
            title,
            viewers: Vec::new(),
            cache: ViewerCache::new(),
            updating: false,
            on_top_click: None,
            on_bottom_click: None,
            on_global_click: None,
            on_outside_click: None,
            on_top_drag: None,
            on_bottom_drag: None,
            on_global_drag: None,
            on_close: None,
        })
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rename the GUI. Viewers see the new title the next time it is shown.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.inventory = ChestInventory::new(self.title.clone(), self.rows() as usize);
    }

    /// Number of chest rows.
    pub fn rows(&self) -> i32 {
        self.component.height() - PLAYER_ROWS
    }

    /// Change the number of chest rows, keeping every pane.
    ///
    /// Fails unless `rows` is between 1 and 6.
    pub fn set_rows(&mut self, rows: i32) -> Result<()> {
        check_rows(rows)?;

        let mut component = InventoryComponent::new(ROW_LENGTH as i32, rows + PLAYER_ROWS)?;
        for pane in self.component.panes() {
            component.add_pane(Arc::clone(pane));
        }
        self.component = component;
        self.inventory = ChestInventory::new(self.title.clone(), rows as usize);
        Ok(())
    }

    /// The component spanning chest and player rows.
    pub fn component(&self) -> &InventoryComponent {
        &self.component
    }

    /// The chest inventory viewers see.
    pub fn inventory(&self) -> &ChestInventory {
        &self.inventory
    }

    /// Add a top level pane.
    pub fn add_pane(&mut self, pane: SharedPane) {
        self.component.add_pane(pane);
    }

    /// The top level panes in render order.
    pub fn panes(&self) -> &[SharedPane] {
        self.component.panes()
    }

    /// Every item of every pane, without duplicates.
    pub fn items(&self) -> Vec<GuiItem> {
        let mut items: Vec<GuiItem> = Vec::new();
        for item in self.component.pane_items() {
            if !items.contains(&item) {
                items.push(item);
            }
        }
        items
    }

    /// Whether any pane renders into the viewer's own inventory.
    pub fn is_player_inventory_used(&self) -> bool {
        let mut component = self.component.copy();
        component.display();
        self.player_rows(&component)
            .map(|bottom| bottom.has_item())
            .unwrap_or(false)
    }

    fn chest_rows(&self, component: &InventoryComponent) -> Result<InventoryComponent> {
        let height = component.height();
        component.exclude_rows(height - PLAYER_ROWS, height - 1)
    }

    fn player_rows(&self, component: &InventoryComponent) -> Result<InventoryComponent> {
        let height = component.height();
        component.exclude_rows(0, height - PLAYER_ROWS - 1)
    }

    // =========================================================================
    // Viewers
    // =========================================================================

    /// Render the GUI for `viewer` and register them as a viewer.
    pub fn show(&mut self, viewer: &Viewer) -> Result<()> {
        let _span = PerfSpan::new(span_names::DISPLAY);

        self.inventory.clear();
        self.component.display();

        let top = self.chest_rows(&self.component)?;
        let bottom = self.player_rows(&self.component)?;

        top.place_items(&mut self.inventory, 0);

        if bottom.has_item() {
            self.cache.store_and_clear(viewer);
            bottom.place_items(&mut *viewer.inventory().lock(), 0);
        }

        if !self.viewers.iter().any(|known| known.id() == viewer.id()) {
            self.viewers.push(viewer.clone());
        }

        tracing::debug!(
            target: targets::GUI,
            title = %self.title,
            viewer = %viewer.id(),
            "gui shown"
        );
        Ok(())
    }

    /// Render the GUI again for every viewer.
    pub fn update(&mut self) -> Result<()> {
        self.updating = true;

        let viewers = self.viewers.clone();
        let result = viewers.iter().try_for_each(|viewer| self.show(viewer));

        self.updating = false;
        result
    }

    /// Whether an update is in progress.
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// The viewers currently looking at the GUI.
    pub fn viewers(&self) -> &[Viewer] {
        &self.viewers
    }

    /// The viewer with `id`, if they are looking at the GUI.
    pub fn viewer(&self, id: ViewerId) -> Option<&Viewer> {
        self.viewers.iter().find(|viewer| viewer.id() == id)
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    /// Close the GUI for `viewer`.
    ///
    /// Runs the close callback and gives the viewer their stored items back.
    /// Closing while an update re-shows the GUI does nothing.
    pub fn close(&mut self, viewer: ViewerId) {
        if self.updating {
            return;
        }

        self.call_on_close(viewer);

        let Some(index) = self.viewers.iter().position(|known| known.id() == viewer) else {
            return;
        };
        let viewer = self.viewers.remove(index);
        self.cache.restore_and_forget(&viewer);

        if self.viewers.is_empty() {
            self.inventory.clear();
        }

        tracing::debug!(target: targets::GUI, title = %self.title, viewer = %viewer.id(), "gui closed");
    }

    /// Saved player inventories.
    pub fn cache(&self) -> &ViewerCache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut ViewerCache {
        &mut self.cache
    }

    // =========================================================================
    // Raw slots
    // =========================================================================

    /// Which part of the view `raw_slot` belongs to.
    pub fn section_of(&self, raw_slot: i32) -> InventorySection {
        let chest = self.rows() * ROW_LENGTH as i32;
        if raw_slot < 0 {
            InventorySection::Outside
        } else if raw_slot < chest {
            InventorySection::Top
        } else if raw_slot < chest + PLAYER_ROWS * ROW_LENGTH as i32 {
            InventorySection::Bottom
        } else {
            InventorySection::Outside
        }
    }

    /// The stack `viewer` sees in `raw_slot`.
    ///
    /// Bottom slots read the viewer's player inventory, whose hotbar is the
    /// last row of the view but the first nine player slots.
    pub fn view_item(&self, viewer: &Viewer, raw_slot: i32) -> Option<ItemStack> {
        match self.section_of(raw_slot) {
            InventorySection::Top => self.inventory.item(raw_slot as usize).cloned(),
            InventorySection::Bottom => {
                let local = (raw_slot - self.rows() * ROW_LENGTH as i32) as usize;
                let (x, y) = (local % ROW_LENGTH, local / ROW_LENGTH);
                let slot = if y == PLAYER_ROWS as usize - 1 {
                    x
                } else {
                    (y + 1) * ROW_LENGTH + x
                };
                viewer.inventory().lock().item(slot).cloned()
            }
            InventorySection::Outside => None,
        }
    }

    // =========================================================================
    // Clicks
    // =========================================================================

    /// Dispatch a click into the panes.
    ///
    /// The raw slot of the event indexes the component directly: chest rows
    /// first, then the viewer's storage rows and hotbar. When a pane asks
    /// for it, every viewer is re-rendered after dispatch. Returns whether a
    /// pane claimed the click.
    pub fn click(&mut self, event: &mut ClickEvent) -> Result<bool> {
        let mut gui = GuiContext::new();
        let slot = event.raw_slot();
        let claimed = self.component.click(&mut gui, event, slot);

        if gui.take_update_request() {
            self.update()?;
        }
        Ok(claimed)
    }

    pub fn set_on_top_click(&mut self, on_click: Option<ClickAction>) {
        self.on_top_click = on_click;
    }

    pub fn set_on_bottom_click(&mut self, on_click: Option<ClickAction>) {
        self.on_bottom_click = on_click;
    }

    pub fn set_on_global_click(&mut self, on_click: Option<ClickAction>) {
        self.on_global_click = on_click;
    }

    pub fn set_on_outside_click(&mut self, on_click: Option<ClickAction>) {
        self.on_outside_click = on_click;
    }

    pub fn set_on_top_drag(&mut self, on_drag: Option<DragAction>) {
        self.on_top_drag = on_drag;
    }

    pub fn set_on_bottom_drag(&mut self, on_drag: Option<DragAction>) {
        self.on_bottom_drag = on_drag;
    }

    pub fn set_on_global_drag(&mut self, on_drag: Option<DragAction>) {
        self.on_global_drag = on_drag;
    }

    pub fn set_on_close(&mut self, on_close: Option<CloseAction>) {
        self.on_close = on_close;
    }

    pub fn call_on_top_click(&self, event: &mut ClickEvent) {
        self.call_click_callback(self.on_top_click.as_ref(), event, "on_top_click");
    }

    pub fn call_on_bottom_click(&self, event: &mut ClickEvent) {
        self.call_click_callback(self.on_bottom_click.as_ref(), event, "on_bottom_click");
    }

    pub fn call_on_global_click(&self, event: &mut ClickEvent) {
        self.call_click_callback(self.on_global_click.as_ref(), event, "on_global_click");
    }

    pub fn call_on_outside_click(&self, event: &mut ClickEvent) {
        self.call_click_callback(self.on_outside_click.as_ref(), event, "on_outside_click");
    }

    pub fn call_on_top_drag(&self, event: &mut DragEvent) {
        self.call_drag_callback(self.on_top_drag.as_ref(), event, "on_top_drag");
    }

    pub fn call_on_bottom_drag(&self, event: &mut DragEvent) {
        self.call_drag_callback(self.on_bottom_drag.as_ref(), event, "on_bottom_drag");
    }

    pub fn call_on_global_drag(&self, event: &mut DragEvent) {
        self.call_drag_callback(self.on_global_drag.as_ref(), event, "on_global_drag");
    }

    pub fn call_on_close(&self, viewer: ViewerId) {
        let Some(on_close) = &self.on_close else {
            return;
        };

        if let Err(error) = on_close(viewer) {
            tracing::error!(
                target: targets::GUI,
                title = %self.title,
                %viewer,
                callback = "on_close",
                "exception while handling callback: {}",
                error
            );
        }
    }

    fn call_click_callback(
        &self,
        callback: Option<&ClickAction>,
        event: &mut ClickEvent,
        name: &'static str,
    ) {
        let Some(callback) = callback else {
            return;
        };

        if let Err(error) = callback(event) {
            tracing::error!(
                target: targets::GUI,
                title = %self.title,
                slot = event.raw_slot(),
                callback = name,
                "exception while handling callback: {}",
                error
            );
        }
    }

    fn call_drag_callback(
        &self,
        callback: Option<&DragAction>,
        event: &mut DragEvent,
        name: &'static str,
    ) {
        let Some(callback) = callback else {
            return;
        };

        if let Err(error) = callback(event) {
            tracing::error!(
                target: targets::GUI,
                title = %self.title,
                viewer = %event.viewer(),
                callback = name,
                "exception while handling callback: {}",
                error
            );
        }
    }

    /// A copy with deep copied panes and the same callbacks, without viewers.
    pub fn copy(&self) -> Self {
        Self {
            title: self.title.clone(),
            component: self.component.copy(),
            inventory: ChestInventory::new(self.title.clone(), self.rows() as usize),
            viewers: Vec::new(),
            cache: ViewerCache::new(),
            updating: false,
            on_top_click: self.on_top_click.clone(),
            on_bottom_click: self.on_bottom_click.clone(),
            on_global_click: self.on_global_click.clone(),
            on_outside_click: self.on_outside_click.clone(),
            on_top_drag: self.on_top_drag.clone(),
            on_bottom_drag: self.on_bottom_drag.clone(),
            on_global_drag: self.on_global_drag.clone(),
            on_close: self.on_close.clone(),
        }
    }
}

fn check_rows(rows: i32) -> Result<()> {
    if !(1..=6).contains(&rows) {
        return Err(Error::precondition("Rows should be between 1 and 6"));
    }
    Ok(())
}

impl std::fmt::Debug for ChestGui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChestGui")
            .field("title", &self.title)
            .field("rows", &self.rows())
            .field("panes", &self.component.panes().len())
            .field("viewers", &self.viewers)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ChestGui: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::gui::close_action;
    use crate::item::action;
    use crate::pane::{OutlinePane, Pane, StaticPane, share};
    use horizon_inventory_core::{InventorySection, ItemStack, Slot};

    fn item(material: &str) -> GuiItem {
        GuiItem::new(ItemStack::new(material))
    }

    #[test]
    fn test_rows_are_checked() {
        assert!(ChestGui::new(0, "x").unwrap_err().is_precondition());
        assert!(ChestGui::new(7, "x").is_err());

        let mut gui = ChestGui::new(3, "Shop").unwrap();
        assert_eq!(gui.rows(), 3);
        assert_eq!(gui.component().height(), 7);
        assert!(gui.set_rows(9).is_err());
    }

    #[test]
    fn test_set_rows_keeps_panes() {
        let mut gui = ChestGui::new(2, "Shop").unwrap();
        gui.add_pane(share(StaticPane::new(1, 1).unwrap()));
        gui.set_rows(5).unwrap();

        assert_eq!(gui.rows(), 5);
        assert_eq!(gui.panes().len(), 1);
        assert_eq!(gui.inventory().size(), 45);
    }

    #[test]
    fn test_show_fills_chest_only() {
        let mut gui = ChestGui::new(1, "Shop").unwrap();
        let mut pane = StaticPane::new(9, 1).unwrap();
        pane.add_item(item("diamond"), Slot::xy(4, 0));
        gui.add_pane(share(pane));

        let viewer = Viewer::new(ViewerId::new(1));
        viewer
            .inventory()
            .lock()
            .set_item(0, Some(ItemStack::new("bread")));
        gui.show(&viewer).unwrap();

        assert_eq!(gui.inventory().item(4).map(ItemStack::material), Some("diamond"));
        assert!(!gui.is_player_inventory_used());
        assert!(!gui.cache().contains(viewer.id()));
        assert_eq!(
            viewer.inventory().lock().item(0).map(ItemStack::material),
            Some("bread")
        );
        assert_eq!(gui.viewer_count(), 1);
    }

    #[test]
    fn test_player_rows_store_and_restore() {
        let mut gui = ChestGui::new(1, "Shop").unwrap();
        // Row 4 of the component is the hotbar.
        let mut hotbar = StaticPane::new(9, 1).unwrap().with_slot(Slot::xy(0, 4));
        hotbar.add_item(item("compass"), Slot::xy(2, 0));
        gui.add_pane(share(hotbar));

        let viewer = Viewer::new(ViewerId::new(1));
        viewer
            .inventory()
            .lock()
            .set_item(20, Some(ItemStack::new("bread")));

        gui.show(&viewer).unwrap();
        assert!(gui.is_player_inventory_used());
        {
            let inventory = viewer.inventory().lock();
            assert_eq!(inventory.item(2).map(ItemStack::material), Some("compass"));
            assert!(inventory.item(20).is_none());
        }

        gui.close(viewer.id());
        let inventory = viewer.inventory().lock();
        assert!(inventory.item(2).is_none());
        assert_eq!(inventory.item(20).map(ItemStack::material), Some("bread"));
        assert_eq!(gui.viewer_count(), 0);
    }

    #[test]
    fn test_click_reaches_item() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let mut gui = ChestGui::new(1, "Shop").unwrap();
        let mut pane = OutlinePane::new(9, 1).unwrap();
        pane.add_item(item("emerald").with_action(move |event| {
            counter.fetch_add(1, Ordering::SeqCst);
            event.set_cancelled(true);
            Ok(())
        }));
        gui.add_pane(share(pane));

        let viewer = Viewer::new(ViewerId::new(1));
        gui.show(&viewer).unwrap();

        let current = gui.inventory().item(0).cloned();
        let mut event =
            ClickEvent::new(viewer.id(), 0, InventorySection::Top).with_current_item(current);
        assert!(gui.click(&mut event).unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(event.is_cancelled());
    }

    #[test]
    fn test_close_callback_runs_once_per_close() {
        let closed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&closed);

        let mut gui = ChestGui::new(1, "Shop").unwrap();
        gui.set_on_close(Some(close_action(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })));
        gui.set_on_global_click(Some(action(|_| Err("boom".into()))));

        let viewer = Viewer::new(ViewerId::new(3));
        gui.show(&viewer).unwrap();

        // Failing callbacks are logged, not propagated.
        let mut event = ClickEvent::new(viewer.id(), 0, InventorySection::Top);
        gui.call_on_global_click(&mut event);

        gui.close(viewer.id());
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_copy_has_no_viewers() {
        let mut gui = ChestGui::new(2, "Shop").unwrap();
        gui.add_pane(share(StaticPane::new(1, 1).unwrap()));
        gui.show(&Viewer::new(ViewerId::new(1))).unwrap();

        let copy = gui.copy();
        assert_eq!(copy.viewer_count(), 0);
        assert_eq!(copy.rows(), 2);
        assert!(!Arc::ptr_eq(&copy.panes()[0], &gui.panes()[0]));
    }

    #[test]
    fn test_raw_slot_sections_and_view_items() {
        let mut gui = ChestGui::new(2, "Shop").unwrap();
        let mut pane = StaticPane::new(9, 1).unwrap();
        pane.add_item(item("emerald"), Slot::xy(1, 0));
        gui.add_pane(share(pane));

        assert_eq!(gui.section_of(-999), InventorySection::Outside);
        assert_eq!(gui.section_of(17), InventorySection::Top);
        assert_eq!(gui.section_of(18), InventorySection::Bottom);
        assert_eq!(gui.section_of(53), InventorySection::Bottom);
        assert_eq!(gui.section_of(54), InventorySection::Outside);

        let viewer = Viewer::new(ViewerId::new(1));
        {
            let mut inventory = viewer.inventory().lock();
            inventory.set_item(9, Some(item("bread").stack().clone()));
            inventory.set_item(3, Some(item("torch").stack().clone()));
        }
        gui.show(&viewer).unwrap();

        let material = |slot| gui.view_item(&viewer, slot).map(|stack| stack.material().to_string());
        assert_eq!(material(1).as_deref(), Some("emerald"));
        // First storage row, then the hotbar as the last row of the view.
        assert_eq!(material(18).as_deref(), Some("bread"));
        assert_eq!(material(18 + 27 + 3).as_deref(), Some("torch"));
        assert!(gui.view_item(&viewer, 60).is_none());
    }
}
