//! Interactive panes built from the layout panes.
//!
//! Widgets own their inner panes and decide which of them is rendered and
//! which receives a click. Inner panes are exposed through
//! [`Pane::panes`](super::Pane::panes) like any other nested pane.

mod cycle_button;
mod paging_buttons;
mod percentage_bar;
mod slider;
mod toggle_button;
mod variable_bar;

pub use cycle_button::CycleButton;
pub use paging_buttons::PagingButtons;
pub use percentage_bar::PercentageBar;
pub use slider::Slider;
pub use toggle_button::ToggleButton;
pub use variable_bar::VariableBar;

use horizon_inventory_core::{ItemStack, Result};

use super::{OutlinePane, Pane};
use crate::item::{GuiItem, cancel_click};

/// A repeating `length x height` outline pane showing a single item whose
/// action cancels the click.
pub(crate) fn solid_pane(length: i32, height: i32, material: &str) -> Result<OutlinePane> {
    let mut pane = OutlinePane::new(length, height)?.with_repeat(true);
    pane.add_item(solid_item(material));
    Ok(pane)
}

fn solid_item(material: &str) -> GuiItem {
    let mut item = GuiItem::new(ItemStack::new(material));
    item.set_action(Some(cancel_click()));
    item
}

/// Replace the content of `pane` with `item`.
pub(crate) fn replace_item(pane: &mut OutlinePane, item: GuiItem) {
    pane.clear();
    pane.add_item(item);
}
