//! Diagnostic views of pane trees and rendered grids.
//!
//! ```ignore
//! use horizon_inventory::debug::PaneTreeDebug;
//!
//! let debug = PaneTreeDebug::new();
//! println!("{}", debug.format_component(gui.component()));
//! println!("{}", debug.format_grid(gui.component()));
//! ```

use std::fmt::Write as FmtWrite;

use crate::component::InventoryComponent;
use crate::pane::{Pane, SharedPane};

/// Connector style of tree output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// `+--` and `|` connectors.
    Ascii,
    /// Box drawing connectors.
    #[default]
    Unicode,
    /// A dash per node, two-space indentation.
    Compact,
}

impl TreeStyle {
    /// Connector of a middle child, of a last child, and the continuation
    /// under a middle and a last child.
    fn glyphs(self) -> [&'static str; 4] {
        match self {
            Self::Ascii => ["+-- ", "`-- ", "|   ", "    "],
            Self::Unicode => ["\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} ", "\u{2502}   ", "    "],
            Self::Compact => ["- ", "- ", "  ", "  "],
        }
    }
}

/// Configuration for pane tree output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Whether to show pane identities.
    pub show_ids: bool,
    /// Whether to show slot, size and priority.
    pub show_geometry: bool,
    /// Whether to show the number of items of each pane.
    pub show_items: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_geometry: true,
            show_items: false,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Options for minimal output: pane kinds only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_geometry: false,
            ..Default::default()
        }
    }
}

/// Formats pane trees for logs and test failures.
#[derive(Debug, Clone, Default)]
pub struct PaneTreeDebug {
    options: TreeFormatOptions,
}

impl PaneTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every pane of `component`, in painting order.
    pub fn format_component(&self, component: &InventoryComponent) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "InventoryComponent {}x{} ({} panes)",
            component.length(),
            component.height(),
            component.panes().len()
        );
        self.format_children(component.panes(), 1, "", &mut output);
        output
    }

    /// Format `pane` and everything nested in it.
    pub fn format_pane(&self, pane: &SharedPane) -> String {
        let mut output = String::new();
        let pane = pane.read();
        output.push_str(&self.label(&*pane));
        output.push('\n');
        self.format_children(&pane.children(), 1, "", &mut output);
        output
    }

    fn format_children(
        &self,
        children: &[SharedPane],
        depth: usize,
        prefix: &str,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        let [middle, last, through, after] = self.options.style.glyphs();
        for (index, child) in children.iter().enumerate() {
            let is_last = index + 1 == children.len();
            let child = child.read();

            output.push_str(prefix);
            output.push_str(if is_last { last } else { middle });
            output.push_str(&self.label(&*child));
            output.push('\n');

            let nested = format!("{prefix}{}", if is_last { after } else { through });
            self.format_children(&child.children(), depth + 1, &nested, output);
        }
    }

    fn label(&self, pane: &dyn Pane) -> String {
        let mut label = pane.kind().to_string();

        if self.options.show_ids {
            let _ = write!(label, " [{}]", pane.id());
        }
        if self.options.show_geometry {
            let _ = write!(
                label,
                " at {} {}x{} {:?}",
                pane.slot(),
                pane.length(),
                pane.height(),
                pane.priority()
            );
        }
        if self.options.show_items {
            let _ = write!(label, " items={}", pane.items().len());
        }
        if !pane.is_visible() {
            label.push_str(" (hidden)");
        }
        label
    }

    /// Draw the rendered grid of `component`, one row per line.
    ///
    /// Each cell shows the first three characters of the item's material, or
    /// `.` when empty.
    pub fn format_grid(&self, component: &InventoryComponent) -> String {
        let mut output = String::new();

        for y in 0..component.height() {
            let cells: Vec<String> = (0..component.length())
                .map(|x| match component.item(x, y) {
                    Ok(Some(item)) => {
                        let material: String = item.stack().material().chars().take(3).collect();
                        format!("{material:<3}")
                    }
                    _ => ".  ".to_string(),
                })
                .collect();
            output.push_str(cells.join(" ").trim_end());
            output.push('\n');
        }

        output
    }
}
