//! Routing of host notifications into GUIs.

use horizon_inventory_core::logging::{span_names, targets};
use horizon_inventory_core::{
    ClickEvent, DragEvent, InventorySection, ItemStack, PerfSpan, Result, SharedTaskQueue,
    ViewerId,
};

use super::{SharedGui, Viewer};

/// How a click notification was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click landed outside of the view; only the outside callback ran.
    Outside,
    /// A pane claimed the click.
    Claimed,
    /// The callbacks ran but no pane claimed the click.
    Ignored,
}

impl ClickOutcome {
    /// Whether a pane claimed the click.
    pub fn was_claimed(&self) -> bool {
        matches!(self, Self::Claimed)
    }
}

/// How an item pickup was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// The GUI does not use the player inventory; the host picks up as usual.
    Ignored,
    /// The stack went into the viewer's stored inventory. The host cancels
    /// the pickup and leaves `left_over` items on the ground, removing the
    /// item when none are left.
    Absorbed { left_over: u32 },
}

/// Feeds host inventory notifications into GUIs.
///
/// Work that must not run while the host is still processing the
/// notification is posted to the listener's task queue and runs on the next
/// [`tick`](Self::tick).
#[derive(Clone, Default)]
pub struct GuiListener {
    tasks: SharedTaskQueue,
}

impl GuiListener {
    /// Create a listener with its own task queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a listener posting to an existing queue.
    pub fn with_tasks(tasks: SharedTaskQueue) -> Self {
        Self { tasks }
    }

    /// The queue deferred work is posted to.
    pub fn tasks(&self) -> &SharedTaskQueue {
        &self.tasks
    }

    /// Handle a click in a view showing `gui`.
    ///
    /// Clicks outside of the view only run the outside callback. Other
    /// clicks run the global callback, then the top or bottom callback, then
    /// dispatch into the panes. If the event ends up cancelled, the clicking
    /// viewer's off-hand slot is resent on the next tick so the client does
    /// not show a ghost item there.
    pub fn on_inventory_click(
        &self,
        gui: &SharedGui,
        event: &mut ClickEvent,
    ) -> Result<ClickOutcome> {
        let _span = PerfSpan::new(span_names::CLICK);
        let mut gui = gui.lock();

        if event.section() == InventorySection::Outside {
            gui.call_on_outside_click(event);
            return Ok(ClickOutcome::Outside);
        }

        gui.call_on_global_click(event);
        match event.section() {
            InventorySection::Top => gui.call_on_top_click(event),
            _ => gui.call_on_bottom_click(event),
        }

        let claimed = gui.click(event)?;

        if event.is_cancelled() {
            if let Some(viewer) = gui.viewer(event.viewer()) {
                let inventory = viewer.inventory().clone();
                self.tasks.post(move || inventory.lock().resync_off_hand());
            }
        }

        tracing::trace!(
            target: targets::GUI,
            slot = event.raw_slot(),
            claimed,
            cancelled = event.is_cancelled(),
            "click handled"
        );

        Ok(if claimed {
            ClickOutcome::Claimed
        } else {
            ClickOutcome::Ignored
        })
    }

    /// Handle a drag of the cursor stack in a view showing `gui`.
    ///
    /// A drag over several slots runs the global drag callback, then the top
    /// and bottom drag callbacks for the sections it touches. A drag over a
    /// single slot is handled as a click on that slot, and the drag ends up
    /// cancelled exactly when that click did.
    pub fn on_inventory_drag(
        &self,
        gui: &SharedGui,
        event: &mut DragEvent,
    ) -> Result<ClickOutcome> {
        let slots: Vec<i32> = event.raw_slots().iter().copied().collect();

        let &[slot] = slots.as_slice() else {
            if !slots.is_empty() {
                let gui = gui.lock();
                let sections: Vec<InventorySection> =
                    slots.iter().map(|&slot| gui.section_of(slot)).collect();

                gui.call_on_global_drag(event);
                if sections.contains(&InventorySection::Top) {
                    gui.call_on_top_drag(event);
                }
                if sections.contains(&InventorySection::Bottom) {
                    gui.call_on_bottom_drag(event);
                }
            }
            return Ok(ClickOutcome::Ignored);
        };

        let mut click = {
            let gui = gui.lock();
            let current = gui
                .viewer(event.viewer())
                .and_then(|viewer| gui.view_item(viewer, slot));
            ClickEvent::new(event.viewer(), slot, gui.section_of(slot))
                .with_kind(event.kind().as_click())
                .with_current_item(current)
                .with_cursor(event.old_cursor().cloned())
                .with_title(gui.title())
        };

        let outcome = self.on_inventory_click(gui, &mut click)?;
        event.set_cancelled(click.is_cancelled());
        Ok(outcome)
    }

    /// Handle `viewer` picking up `stack` while a view showing `gui` is open.
    ///
    /// While the GUI paints into the viewer's player inventory the items go
    /// into the stored inventory instead, so they come back on close.
    pub fn on_item_pickup(
        &self,
        gui: &SharedGui,
        viewer: ViewerId,
        stack: &ItemStack,
    ) -> PickupOutcome {
        let mut gui = gui.lock();
        if !gui.is_player_inventory_used() {
            return PickupOutcome::Ignored;
        }

        let left_over = gui.cache_mut().add(viewer, stack);
        PickupOutcome::Absorbed { left_over }
    }

    /// Handle `viewer` closing a view showing `gui`.
    pub fn on_inventory_close(&self, gui: &SharedGui, viewer: &Viewer) {
        viewer.inventory().lock().resync_off_hand();
        gui.lock().close(viewer.id());
    }

    /// Run the deferred work posted before this tick began.
    ///
    /// Returns the number of tasks run.
    pub fn tick(&self) -> usize {
        self.tasks.run_tick()
    }
}

impl std::fmt::Debug for GuiListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiListener")
            .field("pending_tasks", &self.tasks.pending_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(GuiListener: Send, Sync);
