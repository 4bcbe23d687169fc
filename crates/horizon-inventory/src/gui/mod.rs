//! GUIs shown to viewers and the glue that feeds host events into them.
//!
//! A [`ChestGui`] owns an [`InventoryComponent`](crate::InventoryComponent)
//! spanning the chest rows and the viewer's own storage rows. Hosts forward
//! click, drag, pickup and close notifications to a [`GuiListener`], which runs the GUI's
//! callbacks, dispatches clicks into the panes and schedules follow-up work
//! on a [`TaskQueue`](horizon_inventory_core::TaskQueue).

mod cache;
mod chest;
mod listener;

pub use cache::ViewerCache;
pub use chest::ChestGui;
pub use listener::{ClickOutcome, GuiListener, PickupOutcome};

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use horizon_inventory_core::{DragEvent, PlayerInventory, ViewerId};

use crate::item::ActionResult;

/// A shared, lockable handle to a player's inventory.
pub type SharedPlayerInventory = Arc<Mutex<PlayerInventory>>;

/// A shared, lockable handle to a GUI.
pub type SharedGui = Arc<Mutex<ChestGui>>;

/// Handler run when a viewer closes a GUI.
pub type CloseAction = Arc<dyn Fn(ViewerId) -> ActionResult + Send + Sync>;

/// Wrap a closure into a [`CloseAction`].
pub fn close_action<F>(f: F) -> CloseAction
where
    F: Fn(ViewerId) -> ActionResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Handler run when a viewer drags items over a GUI.
pub type DragAction = Arc<dyn Fn(&mut DragEvent) -> ActionResult + Send + Sync>;

/// Wrap a closure into a [`DragAction`].
pub fn drag_action<F>(f: F) -> DragAction
where
    F: Fn(&mut DragEvent) -> ActionResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A player looking at a GUI, with a handle to their own inventory.
#[derive(Clone)]
pub struct Viewer {
    id: ViewerId,
    inventory: SharedPlayerInventory,
}

impl Viewer {
    /// Create a viewer with an empty player inventory.
    pub fn new(id: ViewerId) -> Self {
        Self::with_inventory(id, Arc::new(Mutex::new(PlayerInventory::new())))
    }

    /// Create a viewer for an existing player inventory.
    pub fn with_inventory(id: ViewerId, inventory: SharedPlayerInventory) -> Self {
        Self { id, inventory }
    }

    pub fn id(&self) -> ViewerId {
        self.id
    }

    /// The viewer's player inventory.
    pub fn inventory(&self) -> &SharedPlayerInventory {
        &self.inventory
    }
}

impl fmt::Debug for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer").field("id", &self.id).finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Viewer: Send, Sync);
