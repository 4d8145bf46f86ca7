use anyhow::Result;
use log::debug;
use peakrando_game::{
    EventData, GameData, Item, ItemClassification, LocationData, PlayerId,
};

use crate::multiworld::{Location, LocationProgressType, MultiworldRegistry, Region};
use crate::settings::{Goal, PeakOptions};

pub const MENU_REGION: &str = "Menu";
pub const MOUNTAIN_REGION: &str = "Mountain";

/// Under the reach-peak goal, content tied to an ascent above the required
/// count is left out of the world entirely.
fn ascent_included(ascent: Option<usize>, options: &PeakOptions) -> bool {
    match (options.goal, ascent) {
        (Goal::ReachPeak, Some(a)) => a <= options.ascent_count,
        _ => true,
    }
}

pub fn included_locations<'a>(
    game_data: &'a GameData,
    options: &'a PeakOptions,
) -> impl Iterator<Item = &'a LocationData> {
    game_data
        .locations
        .iter()
        .filter(move |x| ascent_included(x.kind.ascent(), options))
}

pub fn included_events<'a>(
    game_data: &'a GameData,
    options: &'a PeakOptions,
) -> impl Iterator<Item = &'a EventData> {
    game_data
        .events
        .iter()
        .filter(move |x| ascent_included(x.ascent(), options))
}

pub fn create_regions(
    world: &mut impl MultiworldRegistry,
    game_data: &GameData,
    options: &PeakOptions,
    player: PlayerId,
) -> Result<()> {
    let mut menu = Region::new(MENU_REGION, player);
    menu.connect(MOUNTAIN_REGION, None);

    let mut mountain = Region::new(MOUNTAIN_REGION, player);
    for data in included_locations(game_data, options) {
        let mut loc = Location::new(data.name, Some(data.code), player);
        if data.excluded {
            loc.progress_type = LocationProgressType::Excluded;
        }
        mountain.add_location(loc);
    }
    let num_locations = mountain.locations.len();

    for ev in included_events(game_data, options) {
        let mut loc = Location::new(ev.name, None, player);
        loc.place_locked_item(Item {
            name: ev.name.to_string(),
            code: None,
            classification: ItemClassification::Progression,
            player,
        });
        mountain.add_location(loc);
    }
    let num_events = mountain.locations.len() - num_locations;

    world.add_region(menu)?;
    world.add_region(mountain)?;
    debug!("Player {player}: created {num_locations} locations and {num_events} events");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiworld::LocalMultiworld;

    fn build(options: &PeakOptions) -> (LocalMultiworld, PlayerId) {
        let game_data = GameData::load().unwrap();
        let mut mw = LocalMultiworld::new();
        let player = mw.add_player("Scout");
        create_regions(&mut mw, &game_data, options, player).unwrap();
        (mw, player)
    }

    #[test]
    fn test_menu_connects_to_mountain() {
        let (mw, player) = build(&PeakOptions::default());
        let menu = mw.get_region(player, MENU_REGION).unwrap();
        assert_eq!(menu.exits.len(), 1);
        assert_eq!(menu.exits[0].connected_region, MOUNTAIN_REGION);
        assert_eq!(menu.exits[0].access_rule, None);
        assert!(menu.locations.is_empty());
    }

    #[test]
    fn test_all_content_for_badge_goal() {
        let options = PeakOptions {
            goal: Goal::CompleteAllBadges,
            ascent_count: 1,
            ..PeakOptions::default()
        };
        let (mw, player) = build(&options);
        assert_eq!(mw.count_non_event_locations(player), 145);
        assert_eq!(mw.count_locations(player), 145 + 12);
        assert!(mw
            .get_location(player, "Goat Scout sashe (Ascent 7)")
            .is_some());
    }

    #[test]
    fn test_excluded_and_event_locations() {
        let (mw, player) = build(&PeakOptions::default());
        let lone_wolf = mw.get_location(player, "Lone Wolf Badge").unwrap();
        assert_eq!(lone_wolf.progress_type, LocationProgressType::Excluded);
        let mesa = mw.get_location(player, "Mesa Access").unwrap();
        assert!(mesa.is_event());
        let locked = mesa.locked_item.as_ref().unwrap();
        assert_eq!(locked.name, "Mesa Access");
        assert!(locked.is_event());
        assert_eq!(locked.classification, ItemClassification::Progression);
    }
}
