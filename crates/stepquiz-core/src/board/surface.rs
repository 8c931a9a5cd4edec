//! Placement surface: the unplaced pool and the ordered slots.
//!
//! The board maintains one invariant across every operation: each item
//! resides in exactly one location (the pool, or a single slot), and no
//! slot holds more than one item. Placement is atomic -- the moved item
//! leaves its prior location and any displaced occupant reaches the pool
//! within the same call.

use serde::{Deserialize, Serialize};

use crate::config::QuizConfig;

/// A draggable unit representing one step of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub token: String,
    pub label: String,
}

/// A fixed drop target expecting a specific step number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub step: u8,
    pub title: String,
    /// Token of the occupying item, if any.
    pub occupant: Option<String>,
}

/// Where an item currently resides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Pool,
    Slot(usize),
}

/// Slot/pool assignments for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    items: Vec<Item>,
    /// Tokens of unplaced items, in presentation order.
    pool: Vec<String>,
    slots: Vec<Slot>,
}

impl Board {
    /// Build the initial board: every item unplaced, every slot empty.
    ///
    /// Assumes the configuration has already been validated.
    pub fn from_config(config: &QuizConfig) -> Self {
        let items: Vec<Item> = config
            .items
            .iter()
            .map(|i| Item {
                token: i.token.clone(),
                label: i.label.clone(),
            })
            .collect();
        let pool = items.iter().map(|i| i.token.clone()).collect();
        let slots = config
            .slots
            .iter()
            .map(|s| Slot {
                step: s.step,
                title: s.title.clone(),
                occupant: None,
            })
            .collect();
        Self { items, pool, slots }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn item(&self, token: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.token == token)
    }

    pub fn location_of(&self, token: &str) -> Option<Location> {
        if self.pool.iter().any(|t| t == token) {
            return Some(Location::Pool);
        }
        self.slots
            .iter()
            .position(|s| s.occupant.as_deref() == Some(token))
            .map(Location::Slot)
    }

    /// Number of slots holding an item.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupant.is_some()).count()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Move `token` into slot `index`, returning the displaced occupant's
    /// token if the slot was taken. The item leaves its prior location
    /// (pool or another slot); the displaced occupant goes to the pool.
    ///
    /// Caller guarantees `token` names a known item and `index` is in
    /// bounds; the session layer rejects anything else before it gets
    /// here.
    pub fn place(&mut self, token: &str, index: usize) -> Option<String> {
        self.detach(token);
        let displaced = self.slots[index].occupant.take();
        if let Some(ref evicted) = displaced {
            self.pool.push(evicted.clone());
        }
        self.slots[index].occupant = Some(token.to_string());
        displaced
    }

    /// Move `token` back to the unplaced pool.
    pub fn return_to_pool(&mut self, token: &str) {
        self.detach(token);
        self.pool.push(token.to_string());
    }

    /// Remove `token` from wherever it currently resides.
    fn detach(&mut self, token: &str) {
        if let Some(pos) = self.pool.iter().position(|t| t == token) {
            self.pool.remove(pos);
            return;
        }
        for slot in &mut self.slots {
            if slot.occupant.as_deref() == Some(token) {
                slot.occupant = None;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_config(&QuizConfig::default())
    }

    #[test]
    fn initial_board_has_everything_pooled() {
        let b = board();
        assert_eq!(b.pool().len(), b.items().len());
        assert_eq!(b.filled_count(), 0);
        assert_eq!(b.location_of("1"), Some(Location::Pool));
    }

    #[test]
    fn place_moves_item_out_of_pool() {
        let mut b = board();
        assert_eq!(b.place("1", 0), None);
        assert_eq!(b.location_of("1"), Some(Location::Slot(0)));
        assert!(!b.pool().contains(&"1".to_string()));
        assert_eq!(b.filled_count(), 1);
    }

    #[test]
    fn place_displaces_occupant_to_pool() {
        let mut b = board();
        b.place("1", 0);
        let displaced = b.place("2", 0);
        assert_eq!(displaced.as_deref(), Some("1"));
        assert_eq!(b.location_of("1"), Some(Location::Pool));
        assert_eq!(b.location_of("2"), Some(Location::Slot(0)));
        assert_eq!(b.filled_count(), 1);
    }

    #[test]
    fn place_relocates_between_slots() {
        let mut b = board();
        b.place("1", 0);
        let displaced = b.place("1", 3);
        assert_eq!(displaced, None);
        assert_eq!(b.location_of("1"), Some(Location::Slot(3)));
        assert_eq!(b.filled_count(), 1);
    }

    #[test]
    fn place_onto_own_slot_keeps_item_there() {
        let mut b = board();
        b.place("1", 0);
        // The item leaves the slot before the occupant check, so it does
        // not count as displacing itself.
        let displaced = b.place("1", 0);
        assert_eq!(displaced, None);
        assert_eq!(b.location_of("1"), Some(Location::Slot(0)));
        assert_eq!(b.filled_count(), 1);
    }

    #[test]
    fn return_to_pool_empties_the_slot() {
        let mut b = board();
        b.place("3", 2);
        b.return_to_pool("3");
        assert_eq!(b.location_of("3"), Some(Location::Pool));
        assert_eq!(b.filled_count(), 0);
    }
}
