use std::collections::BTreeMap;

use hashbrown::HashMap;
use peakrando_game::util::{ordered_counts, sorted_hashmap_iter};
use peakrando_game::{GameData, PlayerId};
use serde::{Deserialize, Serialize};

use crate::multiworld::{LocationProgressType, MultiworldRegistry};
use crate::settings::PeakOptions;
use crate::traverse::{full_pool_state, get_reachable_locations, is_goal_reachable};

/// Per-slot data sent to the game client: every option as an integer, plus
/// the trap weight table keyed by trap name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotData {
    #[serde(flatten)]
    pub options: BTreeMap<String, i64>,
    pub trap_weights: BTreeMap<String, usize>,
    pub version: String,
}

impl SlotData {
    pub fn new(options: &PeakOptions) -> Self {
        SlotData {
            options: options.option_values().into_iter().collect(),
            trap_weights: options
                .trap_weights
                .iter()
                .map(|(trap, w)| (trap.name().to_string(), w.weight()))
                .collect(),
            version: crate::VERSION.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct SpoilerPoolEntry {
    pub item: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize)]
pub struct SpoilerLocation {
    pub name: String,
    pub code: Option<u32>,
    pub excluded: bool,
    pub rule: String,
    pub locked_item: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SpoilerLog {
    pub seed: usize,
    pub player_name: String,
    pub options: PeakOptions,
    pub item_pool: Vec<SpoilerPoolEntry>,
    pub classification_counts: Vec<(String, usize)>,
    pub item_group_counts: Vec<(String, usize)>,
    pub location_group_counts: Vec<(String, usize)>,
    pub locations: Vec<SpoilerLocation>,
    pub completion_rule: Option<String>,
    pub reachable_locations: usize,
    pub goal_reachable: bool,
}

/// For each named group, how many of `names` belong to it. Groups keep their
/// table order.
pub fn group_counts<'a>(
    groups: &[(String, Vec<String>)],
    names: impl Iterator<Item = &'a str> + Clone,
) -> Vec<(String, usize)> {
    groups
        .iter()
        .map(|(group, members)| {
            let n = names
                .clone()
                .filter(|x| members.iter().any(|m| m == x))
                .count();
            (group.clone(), n)
        })
        .collect()
}

pub fn get_spoiler_log(
    world: &impl MultiworldRegistry,
    game_data: &GameData,
    player: PlayerId,
    options: &PeakOptions,
    seed: usize,
) -> SpoilerLog {
    let items = world.player_items(player);
    let item_pool: Vec<SpoilerPoolEntry> = ordered_counts(items.iter().map(|x| x.name.as_str()))
        .into_iter()
        .map(|(item, count)| SpoilerPoolEntry {
            item: item.to_string(),
            count,
        })
        .collect();

    let mut by_class: HashMap<String, usize> = HashMap::new();
    for item in &items {
        *by_class
            .entry(format!("{:?}", item.classification))
            .or_insert(0) += 1;
    }
    let classification_counts: Vec<(String, usize)> = sorted_hashmap_iter(&by_class)
        .map(|(k, v)| (k.clone(), *v))
        .collect();

    let item_group_counts = group_counts(
        &game_data.item_name_groups,
        items.iter().map(|x| x.name.as_str()),
    );
    let player_locations = world.player_locations(player);
    let location_group_counts = group_counts(
        &game_data.location_name_groups,
        player_locations.iter().map(|x| x.name.as_str()),
    );

    let locations: Vec<SpoilerLocation> = player_locations
        .into_iter()
        .map(|loc| SpoilerLocation {
            name: loc.name.clone(),
            code: loc.code,
            excluded: loc.progress_type == LocationProgressType::Excluded,
            rule: match &loc.access_rule {
                Some(req) => req.to_string(),
                None => "Free".to_string(),
            },
            locked_item: loc.locked_item.as_ref().map(|x| x.name.clone()),
        })
        .collect();

    let state = full_pool_state(world, player);
    SpoilerLog {
        seed,
        player_name: world.player_name(player).unwrap_or_default().to_string(),
        options: options.clone(),
        item_pool,
        classification_counts,
        item_group_counts,
        location_group_counts,
        locations,
        completion_rule: world.completion_rule(player).map(|x| x.to_string()),
        reachable_locations: get_reachable_locations(world, player, &state).len(),
        goal_reachable: is_goal_reachable(world, player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Goal, TrapWeight};
    use peakrando_game::Trap;

    #[test]
    fn test_slot_data_shape() {
        let mut options = PeakOptions {
            goal: Goal::TwentyFourKaratBadge,
            death_link: true,
            ..PeakOptions::default()
        };
        options.trap_weights.set(Trap::Tornado, TrapWeight::High);
        options.trap_weights.set(Trap::Yeet, TrapWeight::None);
        let slot_data = SlotData::new(&options);
        let json = serde_json::to_value(&slot_data).unwrap();
        assert_eq!(json["goal"], 2);
        assert_eq!(json["death_link"], 1);
        assert_eq!(json["ascent_count"], 4);
        assert_eq!(json["tornado_trap_weight"], 4);
        assert_eq!(json["trap_weights"]["Tornado Trap"], 4);
        assert_eq!(json["trap_weights"]["Yeet Trap"], 0);
        assert_eq!(json["trap_weights"]["Gust Trap"], 2);
        assert_eq!(json["version"], crate::VERSION);
    }

    #[test]
    fn test_group_counts() {
        let groups = vec![
            ("Luggage".to_string(), vec!["Open 1 luggage".to_string()]),
            (
                "Ascents".to_string(),
                vec!["Ascent 1 badge".to_string(), "Ascent 2 badge".to_string()],
            ),
        ];
        let names = ["Ascent 2 badge", "Open 1 luggage", "Ascent 1 badge", "Beachcomber"];
        assert_eq!(
            group_counts(&groups, names.iter().copied()),
            vec![("Luggage".to_string(), 1), ("Ascents".to_string(), 2)]
        );
    }
}
