pub mod helpers;

use hashbrown::HashMap;
use peakrando_game::{Item, PlayerId};
use serde::{Deserialize, Serialize};

pub use helpers::{is_requirement_satisfied, is_rule_satisfied};

/// Read-only view of what a player has collected, as supplied by the host
/// while it evaluates access rules.
pub trait CollectionState {
    fn count(&self, item: &str, player: PlayerId) -> usize;

    fn has(&self, item: &str, player: PlayerId) -> bool {
        self.count(item, player) > 0
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inventory {
    counts: HashMap<PlayerId, HashMap<String, usize>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&mut self, item: &Item) {
        self.collect_name(&item.name, item.player);
    }

    pub fn collect_name(&mut self, name: &str, player: PlayerId) {
        *self
            .counts
            .entry(player)
            .or_default()
            .entry(name.to_string())
            .or_insert(0) += 1;
    }
}

impl CollectionState for Inventory {
    fn count(&self, item: &str, player: PlayerId) -> usize {
        self.counts
            .get(&player)
            .and_then(|m| m.get(item))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peakrando_game::ItemClassification;

    fn item(name: &str, player: PlayerId) -> Item {
        Item {
            name: name.to_string(),
            code: None,
            classification: ItemClassification::Progression,
            player,
        }
    }

    #[test]
    fn test_collect_counts_per_player() {
        let mut inv = Inventory::new();
        let a = item("Ascent 1 Unlock", 1);
        inv.collect(&a);
        inv.collect(&a);
        inv.collect(&item("Ascent 1 Unlock", 2));
        inv.collect_name("Mesa Access", 2);
        assert_eq!(inv.count("Ascent 1 Unlock", 1), 2);
        assert_eq!(inv.count("Ascent 1 Unlock", 2), 1);
        assert!(!inv.has("Ascent 2 Unlock", 1));
        assert!(!inv.has("Mesa Access", 1));
        assert!(inv.has("Mesa Access", 2));
        assert_eq!(inv.count("Ascent 1 Unlock", 3), 0);
    }
}
