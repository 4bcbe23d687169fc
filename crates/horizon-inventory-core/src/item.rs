//! Host item model.
//!
//! [`ItemStack`] mirrors the host platform's notion of a stack of items: a
//! material, an amount and display metadata. The metadata carries a
//! string-keyed persistent data container that survives the round trip
//! through the client, which is how rendered stacks are matched back to the
//! GUI items that produced them.

use std::collections::BTreeMap;
use std::fmt;

/// Material identifier of an empty slot.
pub const AIR: &str = "air";

/// Most items a single slot holds.
pub const MAX_STACK_SIZE: u32 = 64;

/// Display metadata attached to an [`ItemStack`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMeta {
    /// Custom display name.
    pub display_name: Option<String>,
    /// Lore lines shown below the name.
    pub lore: Vec<String>,
    /// Custom model data used by resource packs.
    pub custom_model_data: Option<i32>,
    /// Enchantment levels keyed by enchantment identifier.
    pub enchantments: BTreeMap<String, u32>,
    /// Owner of a player head.
    pub skull_owner: Option<String>,
    /// Persistent string data keyed by namespaced key.
    persistent_data: BTreeMap<String, String>,
}

impl ItemMeta {
    /// Read a persistent data value.
    pub fn persistent_data(&self, key: &str) -> Option<&str> {
        self.persistent_data.get(key).map(String::as_str)
    }

    /// Write a persistent data value.
    pub fn set_persistent_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.persistent_data.insert(key.into(), value.into());
    }

    /// Remove a persistent data value.
    pub fn remove_persistent_data(&mut self, key: &str) -> Option<String> {
        self.persistent_data.remove(key)
    }
}

/// A stack of items as understood by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    material: String,
    amount: u32,
    meta: ItemMeta,
}

impl ItemStack {
    /// Create a stack of one item of `material`.
    ///
    /// Materials are case-insensitive and stored in lower case.
    pub fn new(material: impl AsRef<str>) -> Self {
        Self {
            material: material.as_ref().to_ascii_lowercase(),
            amount: 1,
            meta: ItemMeta::default(),
        }
    }

    /// An empty stack.
    pub fn air() -> Self {
        Self::new(AIR)
    }

    /// Set the amount (builder pattern).
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Set the display name (builder pattern).
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.meta.display_name = Some(name.into());
        self
    }

    /// Append a lore line (builder pattern).
    pub fn with_lore_line(mut self, line: impl Into<String>) -> Self {
        self.meta.lore.push(line.into());
        self
    }

    /// The material identifier.
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Whether this stack represents an empty slot.
    pub fn is_air(&self) -> bool {
        self.material == AIR
    }

    /// Number of items in the stack.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Set the number of items in the stack.
    pub fn set_amount(&mut self, amount: u32) {
        self.amount = amount;
    }

    /// The stack's metadata.
    pub fn meta(&self) -> &ItemMeta {
        &self.meta
    }

    /// Mutable access to the stack's metadata.
    pub fn meta_mut(&mut self) -> &mut ItemMeta {
        &mut self.meta
    }

    /// Whether two stacks are the same item, ignoring the amount.
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.material == other.material && self.meta == other.meta
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.amount, self.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_is_lower_case() {
        let stack = ItemStack::new("DIAMOND_SWORD");
        assert_eq!(stack.material(), "diamond_sword");
        assert!(!stack.is_air());
        assert!(ItemStack::air().is_air());
    }

    #[test]
    fn test_persistent_data() {
        let mut stack = ItemStack::new("stone");
        stack.meta_mut().set_persistent_data("plugin:key", "value");
        assert_eq!(stack.meta().persistent_data("plugin:key"), Some("value"));
        assert_eq!(
            stack.meta_mut().remove_persistent_data("plugin:key"),
            Some("value".to_string())
        );
        assert_eq!(stack.meta().persistent_data("plugin:key"), None);
    }

    #[test]
    fn test_is_similar_ignores_amount() {
        let a = ItemStack::new("stone").with_amount(3);
        let b = ItemStack::new("stone").with_amount(64);
        assert!(a.is_similar(&b));
        assert_ne!(a, b);
        assert!(!a.is_similar(&ItemStack::new("stone").with_display_name("Rock")));
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemStack::new("arrow").with_amount(2).to_string(), "2 x arrow");
    }
}
