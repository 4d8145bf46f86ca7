use anyhow::{bail, Result};
use log::debug;
use peakrando_game::items::ascent_unlock_name;
use peakrando_game::locations::{ascent_completed_name, ALL_BADGES_COLLECTED, IDOL_DUNKED};
use peakrando_game::{EventKind, GameData, LocationKind, PlayerId, Requirement, Zone, NUM_ASCENTS};

use crate::multiworld::{Location, MultiworldRegistry};
use crate::settings::{Goal, PeakOptions};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Combine {
    And,
    Or,
}

pub fn set_rule(location: &mut Location, rule: Requirement) {
    location.access_rule = Some(rule);
}

/// Combine `rule` with whatever is already attached. An unset rule counts as
/// always satisfied, so OR leaves it unset and AND replaces it.
pub fn add_rule(location: &mut Location, rule: Requirement, combine: Combine) {
    location.access_rule = match (location.access_rule.take(), combine) {
        (None, Combine::And) => Some(rule),
        (None, Combine::Or) => None,
        (Some(old), Combine::And) => Some(Requirement::make_and(vec![old, rule])),
        (Some(old), Combine::Or) => Some(Requirement::make_or(vec![old, rule])),
    };
}

pub fn location_rule(kind: &LocationKind) -> Requirement {
    match kind {
        LocationKind::Badge | LocationKind::Luggage => Requirement::Free,
        LocationKind::Acquire { zone: None } => Requirement::Free,
        LocationKind::Acquire { zone: Some(zone) } => Requirement::item(zone.access_event()),
        LocationKind::AscentBadge { ascent } => Requirement::item(&ascent_completed_name(*ascent)),
        LocationKind::ScoutSash { ascent } => Requirement::make_and(
            (1..*ascent)
                .map(|a| Requirement::item(&ascent_completed_name(a)))
                .collect(),
        ),
    }
}

pub fn event_rule(kind: &EventKind) -> Requirement {
    match kind {
        EventKind::AscentCompleted { ascent } => Requirement::item(&ascent_unlock_name(*ascent)),
        EventKind::ZoneAccess(_) => Requirement::Free,
        EventKind::IdolDunked => Requirement::item(Zone::Mesa.access_event()),
        EventKind::AllBadgesCollected => Requirement::Free,
    }
}

/// Attach a rule to a location by name. Locations that were not created for
/// this player are skipped.
pub fn set_location_rule(
    world: &mut impl MultiworldRegistry,
    player: PlayerId,
    name: &str,
    rule: Requirement,
) -> bool {
    match world.get_location_mut(player, name) {
        Some(loc) => {
            set_rule(loc, rule);
            true
        }
        None => false,
    }
}

pub fn add_location_rule(
    world: &mut impl MultiworldRegistry,
    player: PlayerId,
    name: &str,
    rule: Requirement,
    combine: Combine,
) -> bool {
    match world.get_location_mut(player, name) {
        Some(loc) => {
            add_rule(loc, rule, combine);
            true
        }
        None => false,
    }
}

pub fn apply_rules(world: &mut impl MultiworldRegistry, game_data: &GameData, player: PlayerId) {
    let mut num_applied = 0;
    for loc in game_data.locations {
        if set_location_rule(world, player, loc.name, location_rule(&loc.kind)) {
            num_applied += 1;
        }
    }
    for ev in game_data.events {
        if set_location_rule(world, player, ev.name, event_rule(&ev.kind)) {
            num_applied += 1;
        }
    }
    debug!("Player {player}: applied {num_applied} access rules");
}

/// Every name a rule in this player's world queries must be either a table
/// item or an event created for the player.
pub fn check_rule_references(
    world: &impl MultiworldRegistry,
    game_data: &GameData,
    player: PlayerId,
) -> Result<()> {
    let locations = world.player_locations(player);
    for loc in &locations {
        let Some(rule) = &loc.access_rule else {
            continue;
        };
        for name in rule.referenced_items() {
            let is_item = game_data.lookup_item(name).is_ok();
            let is_event = locations.iter().any(|x| x.is_event() && x.name == name);
            if !is_item && !is_event {
                bail!(
                    "Rule for '{}' requires '{}', which is not an item or event in this world",
                    loc.name,
                    name
                );
            }
        }
    }
    Ok(())
}

pub fn completion_requirement(options: &PeakOptions) -> Option<Requirement> {
    match options.goal {
        Goal::ReachPeak => {
            if (1..=NUM_ASCENTS).contains(&options.ascent_count) {
                Some(Requirement::item(&ascent_completed_name(
                    options.ascent_count,
                )))
            } else {
                None
            }
        }
        Goal::CompleteAllBadges => Some(Requirement::item(ALL_BADGES_COLLECTED)),
        Goal::TwentyFourKaratBadge => Some(Requirement::item(IDOL_DUNKED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiworld::{LocalMultiworld, Region};

    fn loc() -> Location {
        Location::new("Acquire Cactus", Some(76464), 1)
    }

    #[test]
    fn test_add_rule_to_unset() {
        let mut l = loc();
        add_rule(&mut l, Requirement::item("Mesa Access"), Combine::Or);
        assert_eq!(l.access_rule, None);
        add_rule(&mut l, Requirement::item("Mesa Access"), Combine::And);
        assert_eq!(l.access_rule, Some(Requirement::item("Mesa Access")));
    }

    #[test]
    fn test_add_rule_combines() {
        let mut l = loc();
        set_rule(&mut l, Requirement::item("Mesa Access"));
        add_rule(&mut l, Requirement::item("Alpine Access"), Combine::Or);
        assert_eq!(
            l.access_rule,
            Some(Requirement::Or(vec![
                Requirement::item("Mesa Access"),
                Requirement::item("Alpine Access"),
            ]))
        );
        set_rule(&mut l, Requirement::item("Roots Access"));
        add_rule(&mut l, Requirement::Free, Combine::And);
        assert_eq!(l.access_rule, Some(Requirement::item("Roots Access")));
    }

    #[test]
    fn test_scout_sash_rules() {
        assert_eq!(
            location_rule(&LocationKind::ScoutSash { ascent: 1 }),
            Requirement::Free
        );
        assert_eq!(
            location_rule(&LocationKind::ScoutSash { ascent: 2 }),
            Requirement::item("Ascent 1 Completed")
        );
        assert_eq!(
            location_rule(&LocationKind::ScoutSash { ascent: 4 }),
            Requirement::And(vec![
                Requirement::item("Ascent 1 Completed"),
                Requirement::item("Ascent 2 Completed"),
                Requirement::item("Ascent 3 Completed"),
            ])
        );
    }

    #[test]
    fn test_zone_and_event_rules() {
        assert_eq!(
            location_rule(&LocationKind::Acquire {
                zone: Some(Zone::Alpine)
            }),
            Requirement::item("Alpine Access")
        );
        assert_eq!(
            location_rule(&LocationKind::AscentBadge { ascent: 6 }),
            Requirement::item("Ascent 6 Completed")
        );
        assert_eq!(
            event_rule(&EventKind::AscentCompleted { ascent: 3 }),
            Requirement::item("Ascent 3 Unlock")
        );
        assert_eq!(
            event_rule(&EventKind::IdolDunked),
            Requirement::item("Mesa Access")
        );
        assert_eq!(
            event_rule(&EventKind::ZoneAccess(Zone::Roots)),
            Requirement::Free
        );
    }

    #[test]
    fn test_completion_requirement() {
        let mut options = PeakOptions {
            ascent_count: 3,
            ..PeakOptions::default()
        };
        assert_eq!(
            completion_requirement(&options),
            Some(Requirement::item("Ascent 3 Completed"))
        );
        options.ascent_count = 0;
        assert_eq!(completion_requirement(&options), None);
        options.goal = Goal::CompleteAllBadges;
        assert_eq!(
            completion_requirement(&options),
            Some(Requirement::item("All Badges Collected"))
        );
        options.goal = Goal::TwentyFourKaratBadge;
        assert_eq!(
            completion_requirement(&options),
            Some(Requirement::item("Idol Dunked"))
        );
    }

    #[test]
    fn test_missing_location_is_skipped() {
        let mut mw = LocalMultiworld::new();
        let p = mw.add_player("Scout");
        let mut region = Region::new("Mountain", p);
        region.add_location(loc());
        mw.add_region(region).unwrap();
        let before = mw.player_locations(p).into_iter().cloned().collect::<Vec<_>>();

        let rule = Requirement::item("Ascent 5 Completed");
        assert!(!set_location_rule(&mut mw, p, "Owl Scout sashe (Ascent 5)", rule.clone()));
        assert!(!add_location_rule(
            &mut mw,
            p,
            "Owl Scout sashe (Ascent 5)",
            rule.clone(),
            Combine::And
        ));
        assert!(!set_location_rule(&mut mw, p + 1, "Acquire Cactus", rule.clone()));
        let after = mw.player_locations(p).into_iter().cloned().collect::<Vec<_>>();
        assert_eq!(before, after);

        assert!(add_location_rule(
            &mut mw,
            p,
            "Acquire Cactus",
            Requirement::item("Mesa Access"),
            Combine::And
        ));
        assert_eq!(
            mw.get_location(p, "Acquire Cactus").unwrap().access_rule,
            Some(Requirement::item("Mesa Access"))
        );
    }

    #[test]
    fn test_rule_references_must_resolve() {
        let game_data = GameData::load().unwrap();
        let mut mw = LocalMultiworld::new();
        let p = mw.add_player("Scout");
        let mut region = Region::new("Mountain", p);
        region.add_location(loc());
        mw.add_region(region).unwrap();

        set_location_rule(&mut mw, p, "Acquire Cactus", Requirement::item("Ascent 2 Unlock"));
        check_rule_references(&mw, &game_data, p).unwrap();

        set_location_rule(&mut mw, p, "Acquire Cactus", Requirement::item("Mesa Access"));
        let err = check_rule_references(&mw, &game_data, p).unwrap_err();
        assert!(err.to_string().contains("Mesa Access"));
    }
}
