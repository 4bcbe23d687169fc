//! Core model for Horizon Inventory.
//!
//! This crate provides the building blocks the pane engine in
//! `horizon-inventory` renders with:
//!
//! - **Slots**: [`Slot`] positions resolved against a container length
//! - **Masks and Patterns**: immutable grids describing eligible cells
//!   ([`Mask`]) and repeating symbols ([`Pattern`])
//! - **Geometry**: orientation, alignment, flips and clockwise rotation
//! - **Host model**: [`ItemStack`], [`ClickEvent`], [`DragEvent`] and the [`Inventory`] trait
//!   with chest and player inventories
//! - **Task Queue**: work deferred to the host's next tick
//! - **Errors and logging**: the shared [`Error`] taxonomy and tracing targets
//!
//! # Example
//!
//! ```
//! use horizon_inventory_core::{Mask, Pattern, Slot};
//!
//! assert_eq!(Slot::indexed(10).resolve(9).unwrap(), (1, 1));
//!
//! let border = Mask::new(["111", "101", "111"]).unwrap();
//! assert_eq!(border.enabled_count(), 8);
//!
//! let pattern = Pattern::new(["ab", "ba"]).unwrap().with_length(3);
//! assert_eq!(pattern.character(2, 0).unwrap(), 'b');
//! ```

mod error;
pub mod event;
pub mod geometry;
pub mod inventory;
pub mod item;
pub mod logging;
mod mask;
mod pattern;
mod slot;
mod task;

pub use error::{Error, Result};
pub use event::{
    ClickEvent, ClickKind, DragEvent, DragKind, InventorySection, ViewerId, OUTSIDE_SLOT,
};
pub use geometry::{Alignment, Flip, Orientation, Rotation};
pub use inventory::{ChestInventory, Inventory, PlayerInventory, SlotLayout, ROW_LENGTH};
pub use item::{ItemMeta, ItemStack, MAX_STACK_SIZE};
pub use logging::PerfSpan;
pub use mask::Mask;
pub use pattern::Pattern;
pub use slot::Slot;
pub use task::{SharedTaskQueue, TaskId, TaskQueue};
