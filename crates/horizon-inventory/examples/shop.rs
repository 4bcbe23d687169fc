//! Horizon Inventory Shop Example
//!
//! Builds a paginated shop, simulates a viewer browsing it and prints the
//! rendered grid after every click.
//!
//! Run with: cargo run -p horizon-inventory --example shop

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use horizon_inventory::debug::PaneTreeDebug;
use horizon_inventory::prelude::*;

fn build_shop() -> Result<ChestGui> {
    let mut gui = ChestGui::new(3, "Shop")?;

    let border = create_border(
        Slot::xy(0, 0),
        9,
        3,
        GuiItem::new(ItemStack::new("black_stained_glass_pane")).with_action(|event| {
            event.set_cancelled(true);
            Ok(())
        }),
    )?
    .with_priority(Priority::Lowest);
    gui.add_pane(share(border));

    let mut stock = PaginatedPane::new(7, 1)?.with_slot(Slot::xy(1, 1));
    let wares = [
        "diamond",
        "emerald",
        "gold_ingot",
        "iron_ingot",
        "coal",
        "redstone",
        "lapis_lazuli",
        "quartz",
        "amethyst_shard",
    ];
    stock.populate_with_gui_items(
        wares
            .iter()
            .map(|material| {
                GuiItem::new(ItemStack::new(material)).with_action(|event| {
                    if let Some(stack) = event.current_item() {
                        tracing::info!(viewer = %event.viewer(), material = stack.material(), "purchase");
                    }
                    event.set_cancelled(true);
                    Ok(())
                })
            })
            .collect(),
    )?;
    let stock = Arc::new(RwLock::new(stock));
    gui.add_pane(stock.clone());

    let buttons = PagingButtons::new(9, stock)?
        .with_slot(Slot::xy(0, 2))
        .with_priority(Priority::High);
    gui.add_pane(share(buttons));

    gui.set_on_close(Some(close_action(|viewer| {
        tracing::info!(%viewer, "left the shop");
        Ok(())
    })));
    Ok(gui)
}

fn print_grid(gui: &SharedGui, heading: &str) {
    println!("{heading}");
    let grid = PaneTreeDebug::new().format_grid(gui.lock().component());
    for line in grid.lines().take(3) {
        println!("  {line}");
    }
    println!();
}

fn click(listener: &GuiListener, gui: &SharedGui, viewer: &Viewer, slot: i32) -> Result<ClickOutcome> {
    let current = gui.lock().inventory().item(slot as usize).cloned();
    let mut event =
        ClickEvent::new(viewer.id(), slot, InventorySection::Top).with_current_item(current);
    let outcome = listener.on_inventory_click(gui, &mut event)?;
    listener.tick();
    Ok(outcome)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let gui: SharedGui = Arc::new(Mutex::new(build_shop()?));
    let listener = GuiListener::new();
    let viewer = Viewer::new(ViewerId::new(1));

    println!("{}", PaneTreeDebug::new().format_component(gui.lock().component()));

    gui.lock().show(&viewer)?;
    print_grid(&gui, "Page 1:");

    click(&listener, &gui, &viewer, 10)?;

    let outcome = click(&listener, &gui, &viewer, 26)?;
    print_grid(&gui, &format!("Page 2 ({outcome:?}):"));

    click(&listener, &gui, &viewer, 10)?;

    listener.on_inventory_close(&gui, &viewer);
    Ok(())
}
