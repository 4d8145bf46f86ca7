use peakrando_game::PlayerId;
use peakrando_logic::{is_requirement_satisfied, is_rule_satisfied, CollectionState, Inventory};

use crate::multiworld::{Location, MultiworldRegistry};

/// Collect every event item whose location is accessible, repeating until no
/// new events open up. Returns the names of the newly collected events in
/// collection order.
pub fn sweep_events(
    world: &impl MultiworldRegistry,
    player: PlayerId,
    state: &mut Inventory,
) -> Vec<String> {
    let mut collected: Vec<String> = vec![];
    let mut done: Vec<bool> = vec![];
    loop {
        let locations = world.player_locations(player);
        done.resize(locations.len(), false);
        let mut changed = false;
        for (i, loc) in locations.iter().enumerate() {
            if done[i] || !loc.is_event() {
                continue;
            }
            let Some(item) = &loc.locked_item else {
                continue;
            };
            if is_rule_satisfied(loc.access_rule.as_ref(), &*state, player) {
                state.collect(item);
                collected.push(item.name.clone());
                done[i] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    collected
}

pub fn get_reachable_locations<'a>(
    world: &'a impl MultiworldRegistry,
    player: PlayerId,
    state: &impl CollectionState,
) -> Vec<&'a Location> {
    world
        .player_locations(player)
        .into_iter()
        .filter(|x| !x.is_event() && is_rule_satisfied(x.access_rule.as_ref(), state, player))
        .collect()
}

/// State with every pool item owned by the player collected and events swept.
pub fn full_pool_state(world: &impl MultiworldRegistry, player: PlayerId) -> Inventory {
    let mut state = Inventory::new();
    for item in world.player_items(player) {
        state.collect(item);
    }
    sweep_events(world, player, &mut state);
    state
}

/// Whether the completion rule holds once every pool item is collected.
/// A player with no completion rule can never finish.
pub fn is_goal_reachable(world: &impl MultiworldRegistry, player: PlayerId) -> bool {
    let state = full_pool_state(world, player);
    match world.completion_rule(player) {
        Some(req) => is_requirement_satisfied(req, &state, player),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiworld::{LocalMultiworld, Region};
    use peakrando_game::{Item, ItemClassification, Requirement};

    fn event(name: &str, rule: Option<Requirement>, player: PlayerId) -> Location {
        let mut loc = Location::new(name, None, player);
        loc.access_rule = rule;
        loc.place_locked_item(Item {
            name: name.to_string(),
            code: None,
            classification: ItemClassification::Progression,
            player,
        });
        loc
    }

    #[test]
    fn test_sweep_chains_events() {
        let mut mw = LocalMultiworld::new();
        let p = mw.add_player("Scout");
        let mut region = Region::new("Mountain", p);
        // Listed out of dependency order so the sweep needs a second pass.
        region.add_location(event("B", Some(Requirement::item("A")), p));
        region.add_location(event("A", None, p));
        region.add_location(event("C", Some(Requirement::item("Key")), p));
        let mut gated = Location::new("Gated", Some(1), p);
        gated.access_rule = Some(Requirement::item("B"));
        region.add_location(gated);
        mw.add_region(region).unwrap();

        let mut state = Inventory::new();
        assert!(get_reachable_locations(&mw, p, &state).is_empty());
        let collected = sweep_events(&mw, p, &mut state);
        assert_eq!(collected, vec!["A".to_string(), "B".to_string()]);
        assert!(!state.has("C", p));
        let reachable = get_reachable_locations(&mw, p, &state);
        assert_eq!(reachable.len(), 1);
        assert_eq!(reachable[0].name, "Gated");
    }
}
