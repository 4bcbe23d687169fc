//! Horizon Inventory - pane composition and rendering for inventory GUIs.
//!
//! GUIs are built from panes: rectangular layout strategies that place
//! [`GuiItem`]s onto the cells of an [`InventoryComponent`]. A component is
//! rendered into a host inventory and clicks reported by the host are routed
//! back to the pane, and then the item, that owns the clicked cell.
//!
//! This crate re-exports the core model of `horizon-inventory-core`.
//!
//! # Example
//!
//! ```
//! use horizon_inventory::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut gui = ChestGui::new(1, "Shop")?;
//!
//!     let mut pane = OutlinePane::new(9, 1)?;
//!     pane.add_item(GuiItem::new(ItemStack::new("diamond")).with_action(|event| {
//!         event.set_cancelled(true);
//!         Ok(())
//!     }));
//!     gui.add_pane(share(pane));
//!
//!     let viewer = Viewer::new(ViewerId::new(1));
//!     gui.show(&viewer)?;
//!     assert_eq!(gui.inventory().item(0).map(|stack| stack.material()), Some("diamond"));
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `xml` (default): load panes and GUIs from XML documents, see [`xml`].

pub mod component;
pub mod debug;
pub mod gui;
pub mod item;
pub mod pane;
pub mod prelude;

#[cfg(feature = "xml")]
pub mod xml;

pub use horizon_inventory_core::*;

pub use component::InventoryComponent;
pub use gui::{ChestGui, GuiListener, Viewer};
pub use item::{GuiItem, ItemId};
pub use pane::{Pane, PaneBase, Priority, SharedPane, share};
