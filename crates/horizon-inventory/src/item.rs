//! GUI items.
//!
//! A [`GuiItem`] is what panes lay out: the stack shown to the viewer, an
//! optional click action and an identity. The identity is written into the
//! stack's persistent data under [`ITEM_ID_KEY`], so that when the host later
//! reports a click on a rendered stack, the owning item can be found again
//! with [`GuiItem::matches`].
//!
//! Click actions return a [`ActionResult`]. Failures are logged by
//! [`GuiItem::call_action`] and never reach the caller, so one failing item
//! cannot break dispatch for the rest of the GUI.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_inventory_core::logging::targets;
use horizon_inventory_core::{ClickEvent, ItemStack};

/// Persistent data key under which the item identity is stored.
pub const ITEM_ID_KEY: &str = "horizon-inventory:item-id";

/// Identity token of a [`GuiItem`].
///
/// Copies of an item share its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Get the raw u64 value of this item ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Read the identity tag from a rendered stack.
    pub fn from_stack(stack: &ItemStack) -> Option<Self> {
        stack
            .meta()
            .persistent_data(ITEM_ID_KEY)?
            .parse()
            .ok()
            .map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Global counter for generating unique item IDs.
static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

fn next_item_id() -> ItemId {
    ItemId(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
}

/// Error returned by a failing click action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a click action.
pub type ActionResult = Result<(), ActionError>;

/// A click callback shared between an item and its copies.
pub type ClickAction = Arc<dyn Fn(&mut ClickEvent) -> ActionResult + Send + Sync>;

/// Wrap a closure into a [`ClickAction`].
pub fn action<F>(f: F) -> ClickAction
where
    F: Fn(&mut ClickEvent) -> ActionResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An action that cancels the click and does nothing else.
pub fn cancel_click() -> ClickAction {
    action(|event| {
        event.set_cancelled(true);
        Ok(())
    })
}

/// A typed value attached to an item by a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Boolean(bool),
    Byte(i8),
    Character(char),
    Double(f64),
    Float(f32),
    Integer(i32),
    Long(i64),
    Short(i16),
    String(String),
}

/// A renderable item with click behavior and identity.
#[derive(Clone)]
pub struct GuiItem {
    stack: ItemStack,
    action: Option<ClickAction>,
    id: ItemId,
    visible: bool,
    properties: Vec<PropertyValue>,
}

impl GuiItem {
    /// Create a visible item without an action.
    pub fn new(stack: ItemStack) -> Self {
        let mut item = Self {
            stack,
            action: None,
            id: next_item_id(),
            visible: true,
            properties: Vec::new(),
        };
        item.apply_id();
        item
    }

    /// Set the click action (builder pattern).
    pub fn with_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ClickEvent) -> ActionResult + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(f));
        self
    }

    /// Set the visibility (builder pattern).
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The identity token.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The stack shown to viewers, carrying the identity tag.
    pub fn stack(&self) -> &ItemStack {
        &self.stack
    }

    /// Replace the displayed stack. The identity tag is re-applied.
    pub fn set_stack(&mut self, stack: ItemStack) {
        self.stack = stack;
        self.apply_id();
    }

    /// Set or clear the click action.
    pub fn set_action(&mut self, action: Option<ClickAction>) {
        self.action = action;
    }

    /// Whether a click action is set.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Whether the item is rendered.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the item.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Properties attached by a declaration.
    pub fn properties(&self) -> &[PropertyValue] {
        &self.properties
    }

    /// Replace the attached properties.
    pub fn set_properties(&mut self, properties: Vec<PropertyValue>) {
        self.properties = properties;
    }

    /// A value-independent copy keeping identity and visibility.
    pub fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.apply_id();
        copy
    }

    /// Whether `stack` is a rendering of this item.
    pub fn matches(&self, stack: &ItemStack) -> bool {
        ItemId::from_stack(stack) == Some(self.id)
    }

    /// Run the click action, logging any failure.
    pub fn call_action(&self, event: &mut ClickEvent) {
        let Some(action) = &self.action else {
            return;
        };

        if let Err(error) = action(event) {
            tracing::error!(
                target: targets::ITEM,
                title = event.title(),
                slot = event.raw_slot(),
                material = self.stack.material(),
                "exception while handling click event: {}",
                error
            );
        }
    }

    fn apply_id(&mut self) {
        self.stack
            .meta_mut()
            .set_persistent_data(ITEM_ID_KEY, self.id.to_string());
    }
}

impl PartialEq for GuiItem {
    /// Items are equal when they share an identity.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GuiItem {}

impl fmt::Debug for GuiItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuiItem")
            .field("id", &self.id)
            .field("stack", &self.stack)
            .field("visible", &self.visible)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(GuiItem: Send, Sync);

/// Find the first item in `items` that rendered `stack`.
pub fn find_matching_item<'a, I>(items: I, stack: &ItemStack) -> Option<&'a GuiItem>
where
    I: IntoIterator<Item = &'a GuiItem>,
{
    let id = ItemId::from_stack(stack)?;
    items.into_iter().find(|item| item.id == id)
}
