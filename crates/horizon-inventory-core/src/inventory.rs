//! Host inventories.
//!
//! The rendering engine writes finished grids into an [`Inventory`]. Every
//! inventory declares the [`SlotLayout`] its host uses to number slots, so the
//! same grid can be painted into a chest (plain row-major numbering) or into a
//! player inventory (hotbar first).

use crate::item::ItemStack;

/// Number of columns of every host inventory row.
pub const ROW_LENGTH: usize = 9;

/// How a host numbers the slots of an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotLayout {
    /// Row by row from the top left: slot `y * length + x`.
    #[default]
    RowMajor,
    /// Player storage: the bottom row (hotbar) is numbered first, the rows
    /// above it follow from the top, so row `y` of an `n` row grid starts at
    /// `(y + 1) * length` and row `n - 1` starts at `0`.
    Player,
}

/// A mutable fixed-size slot array owned by the host.
pub trait Inventory: Send + Sync {
    /// Number of slots.
    fn size(&self) -> usize;

    /// The stack in `slot`, if any.
    fn item(&self, slot: usize) -> Option<&ItemStack>;

    /// Put a stack into `slot`. Slots outside the inventory are ignored.
    fn set_item(&mut self, slot: usize, item: Option<ItemStack>);

    /// How the host numbers this inventory's slots.
    fn layout(&self) -> SlotLayout {
        SlotLayout::RowMajor
    }

    /// Empty every slot.
    fn clear(&mut self) {
        for slot in 0..self.size() {
            self.set_item(slot, None);
        }
    }

    /// Snapshot of every slot.
    fn contents(&self) -> Vec<Option<ItemStack>> {
        (0..self.size()).map(|slot| self.item(slot).cloned()).collect()
    }
}

/// A chest-style inventory with a title.
#[derive(Debug, Clone, PartialEq)]
pub struct ChestInventory {
    title: String,
    slots: Vec<Option<ItemStack>>,
}

impl ChestInventory {
    /// Create a chest with `rows` rows of nine slots.
    pub fn new(title: impl Into<String>, rows: usize) -> Self {
        Self::with_size(title, rows * ROW_LENGTH)
    }

    /// Create a chest with an arbitrary number of slots.
    pub fn with_size(title: impl Into<String>, size: usize) -> Self {
        Self {
            title: title.into(),
            slots: vec![None; size],
        }
    }

    /// The chest's title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Inventory for ChestInventory {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn set_item(&mut self, slot: usize, item: Option<ItemStack>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = item;
        }
    }
}

/// A player's own inventory.
///
/// Only the 36 storage slots (hotbar `0..9`, main rows `9..36`) take part in
/// GUI rendering. The off-hand slot is tracked separately so that hosts can
/// resynchronize it after a cancelled click.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInventory {
    storage: Vec<Option<ItemStack>>,
    off_hand: Option<ItemStack>,
    /// Incremented whenever a slot is written.
    revision: u64,
}

impl PlayerInventory {
    /// Number of storage slots.
    pub const STORAGE_SIZE: usize = 36;

    /// Create an empty player inventory.
    pub fn new() -> Self {
        Self {
            storage: vec![None; Self::STORAGE_SIZE],
            off_hand: None,
            revision: 0,
        }
    }

    /// The stack in the off hand.
    pub fn off_hand(&self) -> Option<&ItemStack> {
        self.off_hand.as_ref()
    }

    /// Put a stack into the off hand.
    pub fn set_off_hand(&mut self, item: Option<ItemStack>) {
        self.off_hand = item;
        self.revision += 1;
    }

    /// Rewrite the off-hand slot with its current value so the client redraws it.
    pub fn resync_off_hand(&mut self) {
        let item = self.off_hand.take();
        self.set_off_hand(item);
        crate::inventory_trace!(revision = self.revision, "off-hand resent");
    }

    /// Number of writes performed on this inventory.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the storage slots with `contents`, padding or truncating to 36 slots.
    pub fn set_storage_contents(&mut self, mut contents: Vec<Option<ItemStack>>) {
        let dropped = contents
            .iter()
            .skip(Self::STORAGE_SIZE)
            .filter(|slot| slot.is_some())
            .count();
        if dropped > 0 {
            crate::inventory_warn!(dropped, "player storage truncated, items beyond slot 36 dropped");
        }
        contents.resize(Self::STORAGE_SIZE, None);
        self.storage = contents;
        self.revision += 1;
        crate::inventory_debug!(revision = self.revision, "player storage replaced");
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory for PlayerInventory {
    fn size(&self) -> usize {
        self.storage.len()
    }

    fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.storage.get(slot).and_then(Option::as_ref)
    }

    fn set_item(&mut self, slot: usize, item: Option<ItemStack>) {
        if let Some(entry) = self.storage.get_mut(slot) {
            *entry = item;
            self.revision += 1;
        }
    }

    fn layout(&self) -> SlotLayout {
        SlotLayout::Player
    }
}

static_assertions::assert_impl_all!(ChestInventory: Send, Sync);
static_assertions::assert_impl_all!(PlayerInventory: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chest_size_and_access() {
        let mut chest = ChestInventory::new("Shop", 3);
        assert_eq!(chest.size(), 27);
        assert_eq!(chest.layout(), SlotLayout::RowMajor);

        chest.set_item(5, Some(ItemStack::new("stone")));
        assert_eq!(chest.item(5).map(ItemStack::material), Some("stone"));

        chest.set_item(27, Some(ItemStack::new("dirt")));
        assert!(chest.item(27).is_none());

        chest.clear();
        assert!(chest.contents().iter().all(Option::is_none));
    }

    #[test]
    fn test_player_inventory_storage() {
        let mut player = PlayerInventory::new();
        assert_eq!(player.size(), PlayerInventory::STORAGE_SIZE);
        assert_eq!(player.layout(), SlotLayout::Player);

        player.set_storage_contents(vec![Some(ItemStack::new("bread"))]);
        assert_eq!(player.item(0).map(ItemStack::material), Some("bread"));
        assert_eq!(player.contents().len(), 36);
    }

    #[test]
    fn test_storage_contents_are_truncated() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let mut contents = vec![None; PlayerInventory::STORAGE_SIZE];
        contents[35] = Some(ItemStack::new("apple"));
        contents.push(Some(ItemStack::new("cookie")));

        let mut player = PlayerInventory::new();
        player.set_storage_contents(contents);

        assert_eq!(player.contents().len(), PlayerInventory::STORAGE_SIZE);
        assert_eq!(player.item(35).map(ItemStack::material), Some("apple"));
        assert!(player.contents().iter().flatten().all(|item| item.material() != "cookie"));
    }

    #[test]
    fn test_resync_off_hand_bumps_revision() {
        let mut player = PlayerInventory::new();
        player.set_off_hand(Some(ItemStack::new("shield")));
        let before = player.revision();

        player.resync_off_hand();

        assert_eq!(player.revision(), before + 1);
        assert_eq!(player.off_hand().map(ItemStack::material), Some("shield"));
    }
}
