//! Tests for how each pane kind renders into a component grid.

use std::sync::Arc;

use parking_lot::RwLock;

use horizon_inventory::debug::PaneTreeDebug;
use horizon_inventory::prelude::*;

fn item(material: &str) -> GuiItem {
    GuiItem::new(ItemStack::new(material))
}

/// Render `panes` into a fresh `length x height` component and draw the grid.
fn render(length: i32, height: i32, panes: Vec<SharedPane>) -> String {
    let mut component = InventoryComponent::new(length, height).unwrap();
    for pane in panes {
        component.add_pane(pane);
    }
    component.display();
    PaneTreeDebug::new().format_grid(&component)
}

fn click(component: &InventoryComponent, gui: &mut GuiContext, x: i32, y: i32) -> bool {
    let slot = y * component.length() + x;
    let current = component.item(x, y).unwrap().map(|item| item.stack().clone());
    let mut event =
        ClickEvent::new(ViewerId::new(1), slot, InventorySection::Top).with_current_item(current);
    component.click(gui, &mut event, slot)
}

#[test]
fn test_border() {
    let border = create_border(Slot::xy(0, 0), 3, 3, item("glass")).unwrap();
    assert_eq!(
        render(3, 3, vec![share(border)]),
        "gla gla gla\ngla .   gla\ngla gla gla\n"
    );
}

#[test]
fn test_pattern_leaves_unbound_cells_empty() {
    let pattern = Pattern::new(["aba", "bab"]).unwrap();
    let mut pane = PatternPane::new(3, 2, pattern).unwrap();
    pane.bind_item('a', item("stone"));

    assert_eq!(render(3, 2, vec![share(pane)]), "sto .   sto\n.   sto .\n");
}

#[test]
fn test_outline_gap_and_alignment() {
    let mut gapped = OutlinePane::new(5, 1).unwrap();
    gapped.set_gap(1);
    for material in ["apple", "bread", "carrot"] {
        gapped.add_item(item(material));
    }
    assert_eq!(render(5, 1, vec![share(gapped)]), "app .   bre .   car\n");

    let mut centered = OutlinePane::new(5, 1).unwrap().with_alignment(Alignment::Center);
    centered.add_item(item("diamond"));
    assert_eq!(render(5, 1, vec![share(centered)]), ".   .   dia .   .\n");
}

#[test]
fn test_outline_vertical_orientation() {
    let mut pane = OutlinePane::new(2, 2)
        .unwrap()
        .with_orientation(Orientation::Vertical);
    for material in ["apple", "bread", "carrot"] {
        pane.add_item(item(material));
    }
    assert_eq!(render(2, 2, vec![share(pane)]), "app car\nbre .\n");
}

#[test]
fn test_rotation_and_flip() {
    let mut rotated = OutlinePane::new(3, 3).unwrap();
    rotated.add_item(item("diamond"));
    rotated.set_rotation(90).unwrap();
    assert_eq!(
        render(3, 3, vec![share(rotated)]),
        ".   .   dia\n.   .   .\n.   .   .\n"
    );

    let mut flipped = OutlinePane::new(3, 1).unwrap();
    flipped.add_item(item("diamond"));
    flipped.flip_horizontally(true);
    assert_eq!(render(3, 1, vec![share(flipped)]), ".   .   dia\n");

    let mut oblong = OutlinePane::new(3, 1).unwrap();
    assert!(oblong.set_rotation(90).unwrap_err().is_precondition());
    assert!(OutlinePane::new(2, 2).unwrap().set_rotation(45).is_err());
}

#[test]
fn test_panes_are_clipped_to_the_component() {
    let mut pane = OutlinePane::new(4, 1).unwrap().with_slot(Slot::xy(1, 0));
    pane.set_repeat(true);
    pane.add_item(item("stone"));

    assert_eq!(render(3, 1, vec![share(pane)]), ".   sto sto\n");
}

#[test]
fn test_masonry_packs_children() {
    let filled = |length, height, material: &str| {
        let mut pane = OutlinePane::new(length, height).unwrap().with_repeat(true);
        pane.add_item(item(material));
        share(pane)
    };

    let mut masonry = MasonryPane::new(3, 2).unwrap();
    masonry.add_pane(filled(2, 1, "apple"));
    masonry.add_pane(filled(2, 1, "bread"));
    masonry.add_pane(filled(1, 1, "carrot"));

    assert_eq!(render(3, 2, vec![share(masonry)]), "app app car\nbre bre .\n");
}

#[test]
fn test_paginated_pages() {
    let mut pages = PaginatedPane::new(2, 1).unwrap();
    pages
        .populate_with_item_stacks(vec![
            ItemStack::new("apple"),
            ItemStack::new("bread"),
            ItemStack::new("carrot"),
        ])
        .unwrap();
    assert_eq!(pages.page_count(), 2);

    let pages = Arc::new(RwLock::new(pages));
    let shared: SharedPane = pages.clone();
    assert_eq!(render(2, 1, vec![Arc::clone(&shared)]), "app bre\n");

    pages.write().set_page(1).unwrap();
    assert_eq!(render(2, 1, vec![Arc::clone(&shared)]), "car .\n");

    assert!(pages.write().set_page(2).is_err());
    assert_eq!(pages.read().page(), 1);
}

#[test]
fn test_paging_buttons_turn_pages() {
    let mut paginated = PaginatedPane::new(3, 1).unwrap();
    paginated
        .populate_with_names(["a", "b", "c", "d"], "paper")
        .unwrap();
    let pages = Arc::new(RwLock::new(paginated));

    let buttons = PagingButtons::new(3, Arc::clone(&pages))
        .unwrap()
        .with_slot(Slot::xy(0, 1));

    let mut component = InventoryComponent::new(3, 2).unwrap();
    component.add_pane(pages.clone());
    component.add_pane(share(buttons));
    component.display();

    let debug = PaneTreeDebug::new();
    assert_eq!(debug.format_grid(&component), "pap pap pap\n.   .   arr\n");

    let mut gui = GuiContext::new();
    assert!(click(&component, &mut gui, 2, 1));
    assert!(gui.take_update_request());
    assert_eq!(pages.read().page(), 1);

    component.display();
    assert_eq!(debug.format_grid(&component), "pap .   .\narr .   .\n");
}

#[test]
fn test_percentage_bar() {
    let mut bar = PercentageBar::new(4, 1).unwrap();
    bar.set_percentage(0.5).unwrap();
    let bar = Arc::new(RwLock::new(bar));

    assert_eq!(render(4, 1, vec![bar.clone() as SharedPane]), "gre gre red red\n");

    bar.write().flip_horizontally(true);
    assert_eq!(render(4, 1, vec![bar.clone() as SharedPane]), "red red gre gre\n");

    assert!(bar.write().set_percentage(1.5).unwrap_err().is_precondition());
}

#[test]
fn test_slider_follows_clicks() {
    let slider = Arc::new(RwLock::new(Slider::new(4, 1).unwrap()));
    let mut component = InventoryComponent::new(4, 1).unwrap();
    component.add_pane(slider.clone());
    component.display();
    assert_eq!(
        PaneTreeDebug::new().format_grid(&component),
        "red red red red\n"
    );

    let mut gui = GuiContext::new();
    click(&component, &mut gui, 2, 0);
    assert!(gui.take_update_request());
    assert!((slider.read().value() - 0.75).abs() < f32::EPSILON);

    component.display();
    assert_eq!(
        PaneTreeDebug::new().format_grid(&component),
        "gre gre gre red\n"
    );
}

#[test]
fn test_toggle_button() {
    let toggle = Arc::new(RwLock::new(ToggleButton::new(2, 1).unwrap()));
    let mut component = InventoryComponent::new(2, 1).unwrap();
    component.add_pane(toggle.clone());
    component.display();
    assert_eq!(PaneTreeDebug::new().format_grid(&component), "red red\n");

    let mut gui = GuiContext::new();
    assert!(click(&component, &mut gui, 0, 0));
    assert!(toggle.read().is_enabled());

    component.display();
    assert_eq!(PaneTreeDebug::new().format_grid(&component), "gre gre\n");

    toggle.write().set_allow_toggle(false);
    assert!(click(&component, &mut gui, 1, 0));
    assert!(toggle.read().is_enabled());
}

#[test]
fn test_cycle_button_wraps() {
    let mut cycle = CycleButton::new(1, 1).unwrap();
    for material in ["apple", "bread"] {
        let mut pane = OutlinePane::new(1, 1).unwrap();
        pane.add_item(item(material));
        cycle.add_pane(share(pane));
    }
    let cycle = Arc::new(RwLock::new(cycle));

    let mut component = InventoryComponent::new(1, 1).unwrap();
    component.add_pane(cycle.clone());

    let mut gui = GuiContext::new();
    let mut shown = Vec::new();
    for _ in 0..3 {
        component.display();
        shown.push(PaneTreeDebug::new().format_grid(&component));
        assert!(click(&component, &mut gui, 0, 0));
    }

    assert_eq!(shown, ["app\n", "bre\n", "app\n"]);
    assert_eq!(cycle.read().position(), 1);
}
