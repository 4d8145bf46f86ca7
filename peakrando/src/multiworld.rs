use anyhow::{bail, Result};
use hashbrown::HashMap;
use peakrando_game::{Item, LocationCode, PlayerId, Requirement};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationProgressType {
    #[default]
    Default,
    // Never receives a progression item.
    Excluded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub code: Option<LocationCode>, // None for event locations
    pub player: PlayerId,
    pub progress_type: LocationProgressType,
    pub access_rule: Option<Requirement>, // None means always accessible
    pub locked_item: Option<Item>,
}

impl Location {
    pub fn new(name: &str, code: Option<LocationCode>, player: PlayerId) -> Self {
        Location {
            name: name.to_string(),
            code,
            player,
            progress_type: LocationProgressType::Default,
            access_rule: None,
            locked_item: None,
        }
    }

    pub fn is_event(&self) -> bool {
        self.code.is_none()
    }

    pub fn place_locked_item(&mut self, item: Item) {
        self.locked_item = Some(item);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrance {
    pub name: String,
    pub connected_region: String,
    pub access_rule: Option<Requirement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub player: PlayerId,
    pub locations: Vec<Location>,
    pub exits: Vec<Entrance>,
}

impl Region {
    pub fn new(name: &str, player: PlayerId) -> Self {
        Region {
            name: name.to_string(),
            player,
            locations: vec![],
            exits: vec![],
        }
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.push(location);
    }

    pub fn connect(&mut self, target: &str, access_rule: Option<Requirement>) {
        self.exits.push(Entrance {
            name: format!("{} -> {}", self.name, target),
            connected_region: target.to_string(),
            access_rule,
        });
    }
}

/// The parts of the multiworld host that a world plugin reads and writes.
pub trait MultiworldRegistry {
    fn player_name(&self, player: PlayerId) -> Option<&str>;
    fn add_region(&mut self, region: Region) -> Result<()>;
    fn get_region(&self, player: PlayerId, name: &str) -> Option<&Region>;
    fn get_location(&self, player: PlayerId, name: &str) -> Option<&Location>;
    fn get_location_mut(&mut self, player: PlayerId, name: &str) -> Option<&mut Location>;
    /// All locations owned by the player, in creation order.
    fn player_locations(&self, player: PlayerId) -> Vec<&Location>;
    fn push_item(&mut self, item: Item);
    /// Pool items owned by the player, in the order they were pushed.
    fn player_items(&self, player: PlayerId) -> Vec<&Item>;
    fn set_completion_rule(&mut self, player: PlayerId, rule: Requirement);
    fn completion_rule(&self, player: PlayerId) -> Option<&Requirement>;

    fn count_locations(&self, player: PlayerId) -> usize {
        self.player_locations(player).len()
    }

    fn count_non_event_locations(&self, player: PlayerId) -> usize {
        self.player_locations(player)
            .into_iter()
            .filter(|x| !x.is_event())
            .count()
    }

    fn count_player_items(&self, player: PlayerId) -> usize {
        self.player_items(player).len()
    }
}

/// In-memory host used by the CLI and tests.
#[derive(Default)]
pub struct LocalMultiworld {
    pub player_names: Vec<String>, // Index 0 is player 1
    pub regions: Vec<Region>,
    pub itempool: Vec<Item>,
    region_index: HashMap<(PlayerId, String), usize>,
    location_index: HashMap<(PlayerId, String), (usize, usize)>,
    completion: HashMap<PlayerId, Requirement>,
}

impl LocalMultiworld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, name: &str) -> PlayerId {
        self.player_names.push(name.to_string());
        self.player_names.len()
    }
}

impl MultiworldRegistry for LocalMultiworld {
    fn player_name(&self, player: PlayerId) -> Option<&str> {
        let idx = player.checked_sub(1)?;
        self.player_names.get(idx).map(|x| x.as_str())
    }

    fn add_region(&mut self, region: Region) -> Result<()> {
        let region_idx = self.regions.len();
        let key = (region.player, region.name.clone());
        if self.region_index.contains_key(&key) {
            bail!(
                "Region '{}' already exists for player {}",
                region.name,
                region.player
            );
        }
        let mut new_locations: HashMap<(PlayerId, String), (usize, usize)> = HashMap::new();
        for (i, loc) in region.locations.iter().enumerate() {
            let loc_key = (loc.player, loc.name.clone());
            if self.location_index.contains_key(&loc_key) || new_locations.contains_key(&loc_key) {
                bail!(
                    "Location '{}' already exists for player {}",
                    loc.name,
                    loc.player
                );
            }
            new_locations.insert(loc_key, (region_idx, i));
        }
        self.location_index.extend(new_locations);
        self.region_index.insert(key, region_idx);
        self.regions.push(region);
        Ok(())
    }

    fn get_region(&self, player: PlayerId, name: &str) -> Option<&Region> {
        let idx = self.region_index.get(&(player, name.to_string()))?;
        Some(&self.regions[*idx])
    }

    fn get_location(&self, player: PlayerId, name: &str) -> Option<&Location> {
        let (r, l) = self.location_index.get(&(player, name.to_string()))?;
        Some(&self.regions[*r].locations[*l])
    }

    fn get_location_mut(&mut self, player: PlayerId, name: &str) -> Option<&mut Location> {
        let (r, l) = *self.location_index.get(&(player, name.to_string()))?;
        Some(&mut self.regions[r].locations[l])
    }

    fn player_locations(&self, player: PlayerId) -> Vec<&Location> {
        self.regions
            .iter()
            .filter(|r| r.player == player)
            .flat_map(|r| r.locations.iter())
            .collect()
    }

    fn push_item(&mut self, item: Item) {
        self.itempool.push(item);
    }

    fn player_items(&self, player: PlayerId) -> Vec<&Item> {
        self.itempool.iter().filter(|x| x.player == player).collect()
    }

    fn set_completion_rule(&mut self, player: PlayerId, rule: Requirement) {
        self.completion.insert(player, rule);
    }

    fn completion_rule(&self, player: PlayerId) -> Option<&Requirement> {
        self.completion.get(&player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_multiworld_lookup() {
        let mut mw = LocalMultiworld::new();
        let p1 = mw.add_player("Scout");
        let p2 = mw.add_player("Other");
        assert_eq!(mw.player_name(p1), Some("Scout"));
        assert_eq!(mw.player_name(0), None);

        let mut region = Region::new("Mountain", p1);
        region.add_location(Location::new("Open 1 luggage", Some(76200), p1));
        region.add_location(Location::new("Mesa Access", None, p1));
        mw.add_region(region).unwrap();
        mw.add_region(Region::new("Mountain", p2)).unwrap();
        assert!(mw.add_region(Region::new("Mountain", p1)).is_err());

        assert_eq!(mw.count_locations(p1), 2);
        assert_eq!(mw.count_non_event_locations(p1), 1);
        assert_eq!(mw.count_locations(p2), 0);
        assert!(mw.get_location(p2, "Open 1 luggage").is_none());

        mw.get_location_mut(p1, "Open 1 luggage")
            .unwrap()
            .access_rule = Some(Requirement::Never);
        assert_eq!(
            mw.get_location(p1, "Open 1 luggage").unwrap().access_rule,
            Some(Requirement::Never)
        );
    }

    #[test]
    fn test_rejected_region_leaves_no_locations() {
        let mut mw = LocalMultiworld::new();
        let p = mw.add_player("Scout");
        let mut region = Region::new("Mountain", p);
        region.add_location(Location::new("A", Some(1), p));
        region.add_location(Location::new("A", Some(2), p));
        assert!(mw.add_region(region).is_err());
        assert!(mw.get_location(p, "A").is_none());
        assert!(mw.get_location_mut(p, "A").is_none());
        assert_eq!(mw.count_locations(p), 0);

        let mut region = Region::new("Mountain", p);
        region.add_location(Location::new("A", Some(1), p));
        mw.add_region(region).unwrap();
        assert_eq!(mw.get_location(p, "A").unwrap().code, Some(1));

        let mut clash = Region::new("Peak", p);
        clash.add_location(Location::new("B", Some(3), p));
        clash.add_location(Location::new("A", Some(4), p));
        assert!(mw.add_region(clash).is_err());
        assert!(mw.get_location(p, "B").is_none());
        assert!(mw.get_region(p, "Peak").is_none());
    }
}
