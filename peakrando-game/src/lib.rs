pub mod items;
pub mod locations;
pub mod util;

use anyhow::{bail, Context, Result};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::borrow::ToOwned;
use std::fmt::{self, Display, Formatter};
use std::hash::Hash;

pub use items::{ItemClassification, ItemData, Trap, ITEM_TABLE};
pub use locations::{EventData, EventKind, LocationData, LocationKind, Zone, EVENT_TABLE, LOCATION_TABLE};

pub const GAME_NAME: &str = "PEAK";
pub const NUM_ASCENTS: usize = 7;

pub type ItemCode = u32; // Item ID in the game's reserved block (76000..77100)
pub type LocationCode = u32; // Location ID in the game's reserved block; events have none
pub type PlayerId = usize; // Slot number assigned by the host, starting at 1

#[derive(Clone)]
pub struct IndexedVec<T: Hash + Eq> {
    pub keys: Vec<T>,
    pub index_by_key: HashMap<T, usize>,
}

impl<T: Hash + Eq> Default for IndexedVec<T> {
    fn default() -> Self {
        IndexedVec {
            keys: vec![],
            index_by_key: HashMap::new(),
        }
    }
}

impl<T: Hash + Eq> IndexedVec<T> {
    pub fn add<U: ToOwned<Owned = T> + ?Sized>(&mut self, name: &U) -> usize {
        if !self.index_by_key.contains_key(&name.to_owned()) {
            let idx = self.keys.len();
            self.index_by_key.insert(name.to_owned(), self.keys.len());
            self.keys.push(name.to_owned());
            idx
        } else {
            self.index_by_key[&name.to_owned()]
        }
    }
}

/// Access rule attached to a location, event or entrance. Rules are plain data
/// evaluated against a collection state, so any values they depend on (ascent
/// numbers, required events) are captured when the rule is built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    Free,
    Never,
    Item(String),
    And(Vec<Requirement>),
    Or(Vec<Requirement>),
}

impl Requirement {
    pub fn item(name: &str) -> Requirement {
        Requirement::Item(name.to_string())
    }

    pub fn make_and(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            if let Requirement::Never = req {
                return Requirement::Never;
            } else if let Requirement::Free = req {
                continue;
            } else if let Requirement::And(and_reqs) = req {
                out_reqs.extend(and_reqs);
            } else {
                out_reqs.push(req);
            }
        }
        if out_reqs.len() > 1 {
            Requirement::And(out_reqs)
        } else {
            out_reqs.pop().unwrap_or(Requirement::Free)
        }
    }

    pub fn make_or(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            if let Requirement::Never = req {
                continue;
            } else if let Requirement::Free = req {
                return Requirement::Free;
            } else if let Requirement::Or(or_reqs) = req {
                out_reqs.extend(or_reqs);
            } else {
                out_reqs.push(req);
            }
        }
        if out_reqs.len() > 1 {
            Requirement::Or(out_reqs)
        } else {
            out_reqs.pop().unwrap_or(Requirement::Never)
        }
    }

    /// Names of every item this rule can query, in order of first appearance.
    pub fn referenced_items(&self) -> Vec<&str> {
        let mut out: Vec<&str> = vec![];
        self.collect_items(&mut out);
        out
    }

    fn collect_items<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Requirement::Item(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Requirement::And(reqs) | Requirement::Or(reqs) => {
                for r in reqs {
                    r.collect_items(out);
                }
            }
            Requirement::Free | Requirement::Never => {}
        }
    }
}

impl Display for Requirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Free => write!(f, "Free"),
            Requirement::Never => write!(f, "Never"),
            Requirement::Item(name) => write!(f, "{name}"),
            Requirement::And(reqs) | Requirement::Or(reqs) => {
                let sep = if let Requirement::And(_) = self {
                    " & "
                } else {
                    " | "
                };
                write!(f, "(")?;
                for (i, r) in reqs.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{sep}")?;
                    }
                    write!(f, "{r}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// An item instance headed for the multiworld pool, or locked onto an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub code: Option<ItemCode>, // None for event items
    pub classification: ItemClassification,
    pub player: PlayerId,
}

impl Item {
    pub fn is_event(&self) -> bool {
        self.code.is_none()
    }
}

pub struct GameData {
    pub item_isv: IndexedVec<String>,
    pub location_isv: IndexedVec<String>,
    pub items: &'static [ItemData],
    pub locations: &'static [LocationData],
    pub events: &'static [EventData],
    pub item_name_groups: Vec<(String, Vec<String>)>,
    pub location_name_groups: Vec<(String, Vec<String>)>,
}

impl GameData {
    pub fn load() -> Result<GameData> {
        GameData::from_tables(ITEM_TABLE, LOCATION_TABLE, EVENT_TABLE)
    }

    pub fn from_tables(
        items: &'static [ItemData],
        locations: &'static [LocationData],
        events: &'static [EventData],
    ) -> Result<GameData> {
        let mut item_isv: IndexedVec<String> = IndexedVec::default();
        for item in items {
            item_isv.add(item.name);
        }
        let mut location_isv: IndexedVec<String> = IndexedVec::default();
        for loc in locations {
            location_isv.add(loc.name);
        }
        Ok(GameData {
            item_isv,
            location_isv,
            items,
            locations,
            events,
            item_name_groups: items::item_name_groups(items),
            location_name_groups: locations::location_name_groups(locations),
        })
    }

    pub fn lookup_item(&self, name: &str) -> Result<&ItemData> {
        let idx = self
            .item_isv
            .index_by_key
            .get(name)
            .with_context(|| format!("Item '{name}' not found in item table"))?;
        Ok(&self.items[*idx])
    }

    pub fn items_by_classification(
        &self,
        classification: ItemClassification,
    ) -> impl Iterator<Item = &ItemData> {
        self.items
            .iter()
            .filter(move |x| x.classification == classification)
    }

    /// Check that names and numeric codes are unique across the item and location tables.
    pub fn validate_ids(&self) -> Result<()> {
        if self.item_isv.keys.len() != self.items.len() {
            bail!(
                "Duplicate item names found: {:?}",
                find_duplicates(self.items.iter().map(|x| x.name))
            );
        }
        let dupe_items = find_duplicates(self.items.iter().map(|x| x.code));
        if !dupe_items.is_empty() {
            bail!("Duplicate item IDs found: {:?}", dupe_items);
        }

        if self.location_isv.keys.len() != self.locations.len() {
            bail!(
                "Duplicate location names found: {:?}",
                find_duplicates(self.locations.iter().map(|x| x.name))
            );
        }
        let dupe_locs = find_duplicates(self.locations.iter().map(|x| x.code));
        if !dupe_locs.is_empty() {
            bail!("Duplicate location IDs found: {:?}", dupe_locs);
        }

        let dupe_events = find_duplicates(
            self.events
                .iter()
                .map(|x| x.name)
                .chain(self.locations.iter().map(|x| x.name)),
        );
        if !dupe_events.is_empty() {
            bail!("Event names collide with locations: {:?}", dupe_events);
        }
        Ok(())
    }
}

fn find_duplicates<T: Hash + Eq + Clone>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut counts: IndexedVec<T> = IndexedVec::default();
    let mut seen: Vec<usize> = vec![];
    for v in values {
        let idx = counts.add(&v);
        if idx == seen.len() {
            seen.push(0);
        }
        seen[idx] += 1;
    }
    counts
        .keys
        .into_iter()
        .zip(seen)
        .filter(|(_, cnt)| *cnt > 1)
        .map(|(k, _)| k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_and_or() {
        let a = Requirement::item("Ascent 1 Completed");
        let b = Requirement::item("Ascent 2 Completed");
        assert_eq!(Requirement::make_and(vec![]), Requirement::Free);
        assert_eq!(
            Requirement::make_and(vec![Requirement::Free, a.clone()]),
            a.clone()
        );
        assert_eq!(
            Requirement::make_and(vec![a.clone(), Requirement::Never]),
            Requirement::Never
        );
        assert_eq!(
            Requirement::make_and(vec![Requirement::And(vec![a.clone(), b.clone()]), a.clone()]),
            Requirement::And(vec![a.clone(), b.clone(), a.clone()])
        );
        assert_eq!(Requirement::make_or(vec![]), Requirement::Never);
        assert_eq!(
            Requirement::make_or(vec![a.clone(), Requirement::Free]),
            Requirement::Free
        );
        assert_eq!(
            Requirement::make_or(vec![Requirement::Never, b.clone()]),
            b.clone()
        );
    }

    #[test]
    fn test_display_and_referenced_items() {
        let req = Requirement::make_and(vec![
            Requirement::item("Mesa Access"),
            Requirement::make_or(vec![
                Requirement::item("Ascent 1 Completed"),
                Requirement::item("Mesa Access"),
            ]),
        ]);
        assert_eq!(
            req.to_string(),
            "(Mesa Access & (Ascent 1 Completed | Mesa Access))"
        );
        assert_eq!(
            req.referenced_items(),
            vec!["Mesa Access", "Ascent 1 Completed"]
        );
    }

    #[test]
    fn test_builtin_tables_valid() {
        let game_data = GameData::load().unwrap();
        game_data.validate_ids().unwrap();
    }

    #[test]
    fn test_duplicate_item_codes_rejected() {
        static ITEMS: [ItemData; 2] = [
            ItemData::new("Rope Spool", 77000, ItemClassification::Useful),
            ItemData::new("Rope Cannon", 77000, ItemClassification::Useful),
        ];
        let game_data = GameData::from_tables(&ITEMS, LOCATION_TABLE, EVENT_TABLE).unwrap();
        let err = game_data.validate_ids().unwrap_err();
        assert!(err.to_string().contains("Duplicate item IDs found: [77000]"));
    }

    #[test]
    fn test_duplicate_location_codes_rejected() {
        static LOCATIONS: [LocationData; 2] = [
            LocationData::new("Open 1 luggage", 76200, LocationKind::Luggage, false),
            LocationData::new("Open 10 luggage", 76200, LocationKind::Luggage, false),
        ];
        let game_data = GameData::from_tables(ITEM_TABLE, &LOCATIONS, EVENT_TABLE).unwrap();
        let err = game_data.validate_ids().unwrap_err();
        assert!(err
            .to_string()
            .contains("Duplicate location IDs found: [76200]"));
    }

    #[test]
    fn test_find_duplicates_generic() {
        assert_eq!(find_duplicates([3u32, 1, 3, 2, 1, 3].into_iter()), vec![3, 1]);
        assert!(find_duplicates(["Egg", "Conch"].into_iter()).is_empty());
        let empty: IndexedVec<u32> = IndexedVec::default();
        assert!(empty.keys.is_empty());
    }

    #[test]
    fn test_lookup_unknown_item() {
        let game_data = GameData::load().unwrap();
        let err = game_data.lookup_item("Nonexistent Item").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
