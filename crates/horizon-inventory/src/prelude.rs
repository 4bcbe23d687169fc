//! Prelude module for Horizon Inventory.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_inventory::prelude::*;
//! ```
//!
//! This provides access to:
//! - Core model (`Slot`, `Mask`, `Pattern`, `ItemStack`, `ClickEvent`)
//! - Items and actions (`GuiItem`, `action`, `cancel_click`)
//! - Panes and widgets (`OutlinePane`, `StaticPane`, `Slider`, etc.)
//! - GUIs (`ChestGui`, `GuiListener`, `Viewer`)

// ============================================================================
// Core Model
// ============================================================================

pub use horizon_inventory_core::{
    Alignment, ChestInventory, ClickEvent, ClickKind, DragEvent, DragKind, Error, Flip, Inventory,
    InventorySection, ItemMeta, ItemStack, Mask, Orientation, Pattern, PlayerInventory, Result,
    Rotation, Slot, TaskQueue, ViewerId,
};

// ============================================================================
// Items
// ============================================================================

pub use crate::item::{ActionResult, ClickAction, GuiItem, PropertyValue, action, cancel_click};

// ============================================================================
// Panes
// ============================================================================

pub use crate::component::InventoryComponent;
pub use crate::pane::{
    GuiContext, MasonryPane, OutlinePane, PaginatedPane, Pane, PaneBase, PatternPane, Priority,
    SharedPane, StaticPane, create_border, share,
};

// Widgets (from pane::widgets)
pub use crate::pane::widgets::{
    CycleButton, PagingButtons, PercentageBar, Slider, ToggleButton,
};

// ============================================================================
// GUIs
// ============================================================================

pub use crate::gui::{
    ChestGui, ClickOutcome, GuiListener, PickupOutcome, SharedGui, Viewer, close_action,
    drag_action,
};

#[cfg(feature = "xml")]
pub use crate::xml::LoadContext;
