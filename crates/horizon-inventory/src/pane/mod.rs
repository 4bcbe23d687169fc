//! Panes: rectangular layout strategies painted onto an [`InventoryComponent`].
//!
//! Every pane occupies a `length x height` region at a [`Slot`] and knows how
//! to paint its items into a component grid and how to handle a click that
//! lands inside its region. Panes are composed through shared handles
//! ([`SharedPane`]) so that the same pane may appear in several components
//! (see [`InventoryComponent::exclude_rows`]) or be driven by another pane
//! (see [`PagingButtons`]).
//!
//! # Built-in panes
//!
//! - [`OutlinePane`]: items flow through the enabled cells of a [`Mask`]
//! - [`StaticPane`]: items at fixed slots
//! - [`PatternPane`]: items bound to the characters of a [`Pattern`]
//! - [`PaginatedPane`]: pages of child panes, one page shown at a time
//! - [`MasonryPane`]: child panes packed into the first free position
//! - [`widgets`]: bars, sliders and buttons composed of the panes above
//!
//! # Rendering and click order
//!
//! Panes are rendered in ascending [`Priority`], so a higher priority pane
//! overwrites the cells it shares with a lower one. Clicks are offered in
//! descending priority and stop at the first pane that claims them.
//!
//! [`Mask`]: horizon_inventory_core::Mask
//! [`Pattern`]: horizon_inventory_core::Pattern

mod fixed;
mod masonry;
mod outline;
mod paginated;
mod pattern;
pub mod widgets;

pub use fixed::StaticPane;
pub use masonry::MasonryPane;
pub use outline::OutlinePane;
pub use paginated::PaginatedPane;
pub use pattern::PatternPane;
pub use widgets::{
    CycleButton, PagingButtons, PercentageBar, Slider, ToggleButton, VariableBar,
};

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use horizon_inventory_core::logging::targets;
use horizon_inventory_core::{ClickEvent, Error, Mask, Result, Slot};

use crate::component::InventoryComponent;
use crate::item::{ClickAction, GuiItem};

pub use crate::item::find_matching_item;

// ============================================================================
// Shared handles
// ============================================================================

/// A shared, lockable handle to a pane of any type.
pub type SharedPane = Arc<RwLock<dyn Pane>>;

/// Wrap a pane into a [`SharedPane`].
pub fn share<P: Pane + 'static>(pane: P) -> SharedPane {
    Arc::new(RwLock::new(pane))
}

/// Insert `pane` after every pane with a lower or equal priority.
///
/// Panes of equal priority keep their insertion order.
pub(crate) fn insert_by_priority(panes: &mut Vec<SharedPane>, pane: SharedPane) {
    let priority = pane.read().priority();
    let index = panes.partition_point(|existing| existing.read().priority() <= priority);
    panes.insert(index, pane);
}

/// Collect the panes below each of `panes`, followed by the pane itself.
pub(crate) fn flatten_panes<'a, I>(panes: I) -> Vec<SharedPane>
where
    I: IntoIterator<Item = &'a SharedPane>,
{
    let mut all = Vec::new();
    for pane in panes {
        all.extend(pane.read().panes());
        all.push(Arc::clone(pane));
    }
    all
}

// ============================================================================
// Identity and priority
// ============================================================================

/// Identity token of a pane.
///
/// Every constructed or copied pane receives a fresh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(u64);

impl PaneId {
    /// Get the raw u64 value of this pane ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

/// Global counter for generating unique pane IDs.
static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

fn next_pane_id() -> PaneId {
    PaneId(NEXT_PANE_ID.fetch_add(1, Ordering::Relaxed))
}

/// Rendering tier of a pane.
///
/// Lower priorities are painted first and receive clicks last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Priority {
    Lowest = 0,
    Low = 1,
    #[default]
    Normal = 2,
    High = 3,
    Highest = 4,
    /// Painted last; use for overlays that must stay on top.
    Monitor = 5,
}

impl Priority {
    /// Whether `self` is painted before `other`.
    pub fn is_less_than(self, other: Priority) -> bool {
        self < other
    }

    /// Whether `self` is painted after `other`.
    pub fn is_greater_than(self, other: Priority) -> bool {
        self > other
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lowest" => Ok(Self::Lowest),
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "highest" => Ok(Self::Highest),
            "monitor" => Ok(Self::Monitor),
            _ => Err(Error::load(format!("Unknown priority '{s}'"))),
        }
    }
}

// ============================================================================
// Click context
// ============================================================================

/// State collected while a click is dispatched through a GUI.
///
/// Panes cannot re-render the GUI while it is dispatching; they request an
/// update here instead and the GUI renders once dispatch has finished.
#[derive(Debug, Clone, Default)]
pub struct GuiContext {
    update_requested: bool,
}

impl GuiContext {
    /// Create a context without pending requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the GUI to be re-rendered after dispatch.
    pub fn request_update(&mut self) {
        self.update_requested = true;
    }

    /// Whether an update was requested.
    pub fn is_update_requested(&self) -> bool {
        self.update_requested
    }

    /// Take the pending update request, resetting it.
    pub fn take_update_request(&mut self) -> bool {
        std::mem::take(&mut self.update_requested)
    }
}

// ============================================================================
// PaneBase
// ============================================================================

/// State shared by every pane.
///
/// Pane implementations embed a `PaneBase` and return it from
/// [`Pane::pane_base`]; the geometry accessors of the [`Pane`] trait delegate
/// to it.
#[derive(Clone)]
pub struct PaneBase {
    slot: Slot,
    length: i32,
    height: i32,
    priority: Priority,
    visible: bool,
    on_click: Option<ClickAction>,
    id: PaneId,
}

impl PaneBase {
    /// Create the base of a `length x height` pane at `(0, 0)`.
    ///
    /// Both dimensions must be greater than zero.
    pub fn new(length: i32, height: i32) -> Result<Self> {
        if length <= 0 || height <= 0 {
            return Err(Error::precondition(
                "Length and height of pane must be greater than zero",
            ));
        }

        Ok(Self {
            slot: Slot::default(),
            length,
            height,
            priority: Priority::default(),
            visible: true,
            on_click: None,
            id: next_pane_id(),
        })
    }

    /// A copy of this base with a fresh identity.
    pub fn duplicate(&self) -> Self {
        Self {
            id: next_pane_id(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn set_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn set_length(&mut self, length: i32) {
        self.length = length;
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_on_click(&mut self, on_click: Option<ClickAction>) {
        self.on_click = on_click;
    }

    pub fn has_on_click(&self) -> bool {
        self.on_click.is_some()
    }

    /// Extent of the pane clipped to the space its parent grants it.
    pub fn extent(&self, max_length: i32, max_height: i32) -> (i32, i32) {
        (self.length.min(max_length), self.height.min(max_height))
    }

    /// Position of the pane inside a parent of length `max_length`.
    ///
    /// Index slots cannot be resolved against a zero length; `None` then.
    pub fn position(&self, max_length: i32) -> Option<(i32, i32)> {
        self.slot.resolve(max_length).ok()
    }

    /// Convert a raw component slot into coordinates local to this pane.
    ///
    /// Returns `None` when the slot lies outside of the pane's visible
    /// extent, in which case the click does not belong to this pane.
    pub fn locate_click(
        &self,
        component: &InventoryComponent,
        slot: i32,
        offset_x: i32,
        offset_y: i32,
        max_length: i32,
        max_height: i32,
    ) -> Option<(i32, i32)> {
        let total_length = component.length();
        if total_length == 0 {
            return None;
        }

        let (length, height) = self.extent(max_length, max_height);
        let (x_position, y_position) = self.position(max_length)?;

        let adjusted = slot - (x_position + offset_x) - total_length * (y_position + offset_y);
        let x = adjusted % total_length;
        let y = adjusted / total_length;

        if x < 0 || x >= length || y < 0 || y >= height {
            return None;
        }

        Some((x, y))
    }

    /// Run the pane-level click handler, logging any failure.
    pub fn call_on_click(&self, event: &mut ClickEvent, kind: &str) {
        let Some(on_click) = &self.on_click else {
            return;
        };

        if let Err(error) = on_click(event) {
            tracing::error!(
                target: targets::PANE,
                title = event.title(),
                slot = event.raw_slot(),
                pane = kind,
                id = %self.id,
                pane_slot = %self.slot,
                length = self.length,
                height = self.height,
                "exception while handling click event: {}",
                error
            );
        }
    }
}

impl fmt::Debug for PaneBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaneBase")
            .field("id", &self.id)
            .field("slot", &self.slot)
            .field("length", &self.length)
            .field("height", &self.height)
            .field("priority", &self.priority)
            .field("visible", &self.visible)
            .finish()
    }
}

// ============================================================================
// Pane trait
// ============================================================================

/// A layout strategy that maps items onto cells of a rectangular region.
pub trait Pane: Send + Sync + Any {
    // =========================================================================
    // Required Methods
    // =========================================================================

    /// Get a reference to the pane's base.
    fn pane_base(&self) -> &PaneBase;

    /// Get a mutable reference to the pane's base.
    fn pane_base_mut(&mut self) -> &mut PaneBase;

    /// Short name of the pane type, used in logs and debug output.
    fn kind(&self) -> &'static str;

    /// Paint the pane's items into `component`.
    ///
    /// The pane is positioned at `offset + slot.resolve(max_length)` and
    /// clipped to `min(extent, max)`. Cells falling outside of the component
    /// are dropped.
    fn display(
        &self,
        component: &mut InventoryComponent,
        offset_x: i32,
        offset_y: i32,
        max_length: i32,
        max_height: i32,
    );

    /// Handle a click on the raw component `slot`.
    ///
    /// Returns whether the pane claimed the click.
    #[allow(clippy::too_many_arguments)]
    fn click(
        &mut self,
        gui: &mut GuiContext,
        component: &InventoryComponent,
        event: &mut ClickEvent,
        slot: i32,
        offset_x: i32,
        offset_y: i32,
        max_length: i32,
        max_height: i32,
    ) -> bool;

    /// Deep copy of the pane with a fresh identity.
    ///
    /// Items are copied keeping their identity; nested panes are copied too.
    fn copy(&self) -> SharedPane;

    /// Every item the pane (and any nested pane) can show.
    fn items(&self) -> Vec<GuiItem>;

    /// Remove the pane's content.
    fn clear(&mut self);

    /// Get a reference to this pane as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get a mutable reference to this pane as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    // =========================================================================
    // Composition
    // =========================================================================

    /// The panes directly nested in this pane.
    fn children(&self) -> Vec<SharedPane> {
        Vec::new()
    }

    /// Every pane nested in this pane, at any depth, without duplicates.
    fn panes(&self) -> Vec<SharedPane> {
        let mut all: Vec<SharedPane> = Vec::new();
        for pane in flatten_panes(&self.children()) {
            if !all.iter().any(|existing| Arc::ptr_eq(existing, &pane)) {
                all.push(pane);
            }
        }
        all
    }

    // =========================================================================
    // Geometry (default implementations delegate to PaneBase)
    // =========================================================================

    fn id(&self) -> PaneId {
        self.pane_base().id()
    }

    fn slot(&self) -> Slot {
        self.pane_base().slot()
    }

    fn set_slot(&mut self, slot: Slot) {
        self.pane_base_mut().set_slot(slot);
    }

    fn length(&self) -> i32 {
        self.pane_base().length()
    }

    /// Change the length. Panes keeping auxiliary grids resize them too.
    fn set_length(&mut self, length: i32) {
        self.pane_base_mut().set_length(length);
    }

    fn height(&self) -> i32 {
        self.pane_base().height()
    }

    /// Change the height. Panes keeping auxiliary grids resize them too.
    fn set_height(&mut self, height: i32) {
        self.pane_base_mut().set_height(height);
    }

    fn priority(&self) -> Priority {
        self.pane_base().priority()
    }

    fn set_priority(&mut self, priority: Priority) {
        self.pane_base_mut().set_priority(priority);
    }

    fn is_visible(&self) -> bool {
        self.pane_base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.pane_base_mut().set_visible(visible);
    }

    /// Set the handler run whenever a click lands inside the pane.
    fn set_on_click(&mut self, on_click: Option<ClickAction>) {
        self.pane_base_mut().set_on_click(on_click);
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Set the slot (builder pattern).
    fn with_slot(mut self, slot: Slot) -> Self
    where
        Self: Sized,
    {
        self.set_slot(slot);
        self
    }

    /// Set the priority (builder pattern).
    fn with_priority(mut self, priority: Priority) -> Self
    where
        Self: Sized,
    {
        self.set_priority(priority);
        self
    }

    /// Set the visibility (builder pattern).
    fn with_visible(mut self, visible: bool) -> Self
    where
        Self: Sized,
    {
        self.set_visible(visible);
        self
    }

    /// Set the pane-level click handler (builder pattern).
    fn with_on_click<F>(mut self, f: F) -> Self
    where
        Self: Sized,
        F: Fn(&mut ClickEvent) -> crate::item::ActionResult + Send + Sync + 'static,
    {
        self.set_on_click(Some(Arc::new(f)));
        self
    }
}

impl fmt::Debug for dyn Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kind())
            .field("base", self.pane_base())
            .finish_non_exhaustive()
    }
}

/// Implements the boilerplate `Any` accessors of [`Pane`].
macro_rules! impl_pane_any {
    () => {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}
pub(crate) use impl_pane_any;

// ============================================================================
// Helpers
// ============================================================================

/// Dispatch a click to the first of `panes` that claims it.
///
/// Invisible panes are skipped. Every child receives the parent's pane offset
/// and extent.
#[allow(clippy::too_many_arguments)]
pub(crate) fn click_first(
    panes: &[SharedPane],
    gui: &mut GuiContext,
    component: &InventoryComponent,
    event: &mut ClickEvent,
    slot: i32,
    offset_x: i32,
    offset_y: i32,
    max_length: i32,
    max_height: i32,
) -> bool {
    for pane in panes {
        let mut pane = pane.write();
        if !pane.is_visible() {
            continue;
        }

        if pane.click(
            gui, component, event, slot, offset_x, offset_y, max_length, max_height,
        ) {
            return true;
        }
    }
    false
}

/// Claim a click for the item rendered in the clicked slot.
///
/// Finds the item among `items` whose identity matches the event's current
/// stack and runs its action. Returns whether such an item existed.
pub(crate) fn click_matching_item<'a, I>(items: I, event: &mut ClickEvent) -> bool
where
    I: IntoIterator<Item = &'a GuiItem>,
{
    let Some(stack) = event.current_item().cloned() else {
        return false;
    };

    match find_matching_item(items, &stack) {
        Some(item) => {
            item.call_action(event);
            true
        }
        None => false,
    }
}

/// Create a pane that draws `item` along the border of a `length x height`
/// region.
///
/// The result is an [`OutlinePane`] with a border mask and repeat enabled.
pub fn create_border(slot: Slot, length: i32, height: i32, item: GuiItem) -> Result<OutlinePane> {
    if length < 0 {
        return Err(Error::precondition("Length should be non-negative"));
    }
    if height < 0 {
        return Err(Error::precondition("Height should be non-negative"));
    }

    let length_cells = length as usize;
    let rows: Vec<String> = (0..height)
        .map(|y| {
            if y == 0 || y == height - 1 || length_cells < 2 {
                "1".repeat(length_cells)
            } else {
                format!("1{}1", "0".repeat(length_cells - 2))
            }
        })
        .collect();

    let mut pane = OutlinePane::new(length, height)?.with_slot(slot);
    pane.apply_mask(Mask::new(rows)?)?;
    pane.add_item(item);
    pane.set_repeat(true);
    Ok(pane)
}

static_assertions::assert_impl_all!(PaneBase: Send, Sync);
static_assertions::assert_impl_all!(GuiContext: Send, Sync);
