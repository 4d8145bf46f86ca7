use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::LocationCode;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
pub enum Zone {
    Mesa,
    Roots,
    Alpine,
}

impl Zone {
    pub fn access_event(self) -> &'static str {
        match self {
            Zone::Mesa => "Mesa Access",
            Zone::Roots => "Roots Access",
            Zone::Alpine => "Alpine Access",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Badge,
    Luggage,
    // Zone is None for items that can be picked up anywhere on the mountain.
    Acquire { zone: Option<Zone> },
    AscentBadge { ascent: usize },
    ScoutSash { ascent: usize },
}

impl LocationKind {
    pub fn ascent(&self) -> Option<usize> {
        match self {
            LocationKind::AscentBadge { ascent } | LocationKind::ScoutSash { ascent } => {
                Some(*ascent)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationData {
    pub name: &'static str,
    pub code: LocationCode,
    pub kind: LocationKind,
    // Excluded locations never hold progression items.
    pub excluded: bool,
}

impl LocationData {
    pub const fn new(
        name: &'static str,
        code: LocationCode,
        kind: LocationKind,
        excluded: bool,
    ) -> Self {
        LocationData {
            name,
            code,
            kind,
            excluded,
        }
    }
}

const fn loc(name: &'static str, code: LocationCode, kind: LocationKind, excluded: bool) -> LocationData {
    LocationData::new(name, code, kind, excluded)
}

#[rustfmt::skip]
pub static LOCATION_TABLE: &[LocationData] = &[
    // Badges
    loc("Beachcomber Badge", 76100, LocationKind::Badge, false),
    loc("Trailblazer Badge", 76101, LocationKind::Badge, false),
    loc("Alpinist Badge", 76102, LocationKind::Badge, false),
    loc("Volcanology Badge", 76103, LocationKind::Badge, false),
    loc("Cooking Badge", 76104, LocationKind::Badge, false),
    loc("Bouldering Badge", 76105, LocationKind::Badge, false),
    loc("Toxicology Badge", 76106, LocationKind::Badge, false),
    loc("Foraging Badge", 76107, LocationKind::Badge, false),
    loc("Esoterica Badge", 76108, LocationKind::Badge, false),
    loc("Peak Badge", 76109, LocationKind::Badge, false),
    loc("Lone Wolf Badge", 76110, LocationKind::Badge, true),
    loc("Balloon Badge", 76111, LocationKind::Badge, false),
    loc("Leave No Trace Badge", 76112, LocationKind::Badge, false),
    loc("Speed Climber Badge", 76113, LocationKind::Badge, false),
    loc("Bing Bong Badge", 76114, LocationKind::Badge, false),
    loc("Naturalist Badge", 76115, LocationKind::Badge, false),
    loc("Gourmand Badge", 76116, LocationKind::Badge, false),
    loc("Mycology Badge", 76117, LocationKind::Badge, false),
    loc("Survivalist Badge", 76118, LocationKind::Badge, false),
    loc("Animal Serenading Badge", 76119, LocationKind::Badge, false),
    loc("Arborist Badge", 76120, LocationKind::Badge, false),
    loc("Mentorship Badge", 76121, LocationKind::Badge, false),
    loc("Knot Tying Badge", 76122, LocationKind::Badge, false),
    loc("Plunderer Badge", 76123, LocationKind::Badge, false),
    loc("Endurance Badge", 76124, LocationKind::Badge, false),
    loc("Nomad Badge", 76125, LocationKind::Badge, false),
    loc("Cool Cucumber Badge", 76126, LocationKind::Badge, false),
    loc("Needlepoint Badge", 76127, LocationKind::Badge, false),
    loc("Aeronautics Badge", 76128, LocationKind::Badge, false),
    loc("24 Karat Badge", 76129, LocationKind::Badge, false),
    loc("Daredevil Badge", 76130, LocationKind::Badge, false),
    loc("Megaentomology Badge", 76131, LocationKind::Badge, false),
    loc("Astronomy Badge", 76132, LocationKind::Badge, false),
    loc("Bundled Up Badge", 76133, LocationKind::Badge, false),
    // Luggage milestones
    loc("Open 1 luggage", 76200, LocationKind::Luggage, false),
    loc("Open 5 luggage in a single run", 76201, LocationKind::Luggage, false),
    loc("Open 10 luggage", 76202, LocationKind::Luggage, false),
    loc("Open 10 luggage in a single run", 76203, LocationKind::Luggage, false),
    loc("Open 20 luggage in a single run", 76204, LocationKind::Luggage, true),
    loc("Open 25 luggage", 76205, LocationKind::Luggage, false),
    loc("Open 50 luggage", 76206, LocationKind::Luggage, true),
    // Ascent-tier badges
    loc("Beachcomber II Badge (Ascent 1)", 76300, LocationKind::AscentBadge { ascent: 1 }, false),
    loc("Trailblazer II Badge (Ascent 1)", 76301, LocationKind::AscentBadge { ascent: 1 }, false),
    loc("Desolate II Badge (Ascent 1)", 76302, LocationKind::AscentBadge { ascent: 1 }, false),
    loc("Volcanology II Badge (Ascent 1)", 76303, LocationKind::AscentBadge { ascent: 1 }, false),
    loc("Beachcomber III Badge (Ascent 2)", 76304, LocationKind::AscentBadge { ascent: 2 }, false),
    loc("Trailblazer III Badge (Ascent 2)", 76305, LocationKind::AscentBadge { ascent: 2 }, false),
    loc("Desolate III Badge (Ascent 2)", 76306, LocationKind::AscentBadge { ascent: 2 }, false),
    loc("Volcanology III Badge (Ascent 2)", 76307, LocationKind::AscentBadge { ascent: 2 }, false),
    loc("Beachcomber IV Badge (Ascent 3)", 76308, LocationKind::AscentBadge { ascent: 3 }, false),
    loc("Trailblazer IV Badge (Ascent 3)", 76309, LocationKind::AscentBadge { ascent: 3 }, false),
    loc("Desolate IV Badge (Ascent 3)", 76310, LocationKind::AscentBadge { ascent: 3 }, false),
    loc("Volcanology IV Badge (Ascent 3)", 76311, LocationKind::AscentBadge { ascent: 3 }, false),
    loc("Beachcomber V Badge (Ascent 4)", 76312, LocationKind::AscentBadge { ascent: 4 }, false),
    loc("Trailblazer V Badge (Ascent 4)", 76313, LocationKind::AscentBadge { ascent: 4 }, false),
    loc("Desolate V Badge (Ascent 4)", 76314, LocationKind::AscentBadge { ascent: 4 }, false),
    loc("Volcanology V Badge (Ascent 4)", 76315, LocationKind::AscentBadge { ascent: 4 }, false),
    loc("Beachcomber VI Badge (Ascent 5)", 76316, LocationKind::AscentBadge { ascent: 5 }, false),
    loc("Trailblazer VI Badge (Ascent 5)", 76317, LocationKind::AscentBadge { ascent: 5 }, false),
    loc("Desolate VI Badge (Ascent 5)", 76318, LocationKind::AscentBadge { ascent: 5 }, false),
    loc("Volcanology VI Badge (Ascent 5)", 76319, LocationKind::AscentBadge { ascent: 5 }, false),
    loc("Beachcomber VII Badge (Ascent 6)", 76320, LocationKind::AscentBadge { ascent: 6 }, false),
    loc("Trailblazer VII Badge (Ascent 6)", 76321, LocationKind::AscentBadge { ascent: 6 }, false),
    loc("Desolate VII Badge (Ascent 6)", 76322, LocationKind::AscentBadge { ascent: 6 }, false),
    loc("Volcanology VII Badge (Ascent 6)", 76323, LocationKind::AscentBadge { ascent: 6 }, false),
    loc("Beachcomber VIII Badge (Ascent 7)", 76324, LocationKind::AscentBadge { ascent: 7 }, false),
    loc("Trailblazer VIII Badge (Ascent 7)", 76325, LocationKind::AscentBadge { ascent: 7 }, false),
    loc("Desolate VIII Badge (Ascent 7)", 76326, LocationKind::AscentBadge { ascent: 7 }, false),
    loc("Volcanology VIII Badge (Ascent 7)", 76327, LocationKind::AscentBadge { ascent: 7 }, false),
    // Scout sashes
    loc("Rabbit Scout sashe (Ascent 1)", 76340, LocationKind::ScoutSash { ascent: 1 }, false),
    loc("Raccoon Scout sashe (Ascent 2)", 76341, LocationKind::ScoutSash { ascent: 2 }, false),
    loc("Mule Scout sashe (Ascent 3)", 76342, LocationKind::ScoutSash { ascent: 3 }, false),
    loc("Kangaroo Scout sashe (Ascent 4)", 76343, LocationKind::ScoutSash { ascent: 4 }, false),
    loc("Owl Scout sashe (Ascent 5)", 76344, LocationKind::ScoutSash { ascent: 5 }, false),
    loc("Wolf Scout sashe (Ascent 6)", 76345, LocationKind::ScoutSash { ascent: 6 }, false),
    loc("Goat Scout sashe (Ascent 7)", 76346, LocationKind::ScoutSash { ascent: 7 }, false),
    // Acquire checks
    loc("Acquire Rope Spool", 76400, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Rope Cannon", 76401, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Anti-Rope Spool", 76402, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Anti-Rope Cannon", 76403, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Chain Launcher", 76404, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Piton", 76405, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Magic Bean", 76406, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Parasol", 76407, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Balloon", 76408, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Balloon Bunch", 76409, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Scout Cannon", 76410, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Portable Stove", 76411, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Campfire", 76412, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Lantern", 76413, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Flare", 76414, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Torch", 76415, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Compass", 76416, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Pirate's Compass", 76417, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Binoculars", 76418, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Flying Disc", 76419, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Bandages", 76420, LocationKind::Acquire { zone: None }, false),
    loc("Acquire First-Aid Kit", 76421, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Antidote", 76422, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Heat Pack", 76423, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Cure-All", 76424, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Faerie Lantern", 76425, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Scout Effigy", 76426, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Cursed Skull", 76427, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Pandora's Lunchbox", 76428, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Bugle of Friendship", 76429, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Bugle", 76430, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Remedy Fungus", 76431, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Medicinal Root", 76432, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Guidebook", 76433, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Shelf Shroom", 76434, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Bounce Shroom", 76435, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Trail Mix", 76436, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Granola Bar", 76437, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Scout Cookies", 76438, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Airline Food", 76439, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Energy Drink", 76440, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Sports Drink", 76441, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Big Lollipop", 76442, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Button Shroom", 76443, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Bugle Shroom", 76444, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Cluster Shroom", 76445, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Chubby Shroom", 76446, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Conch", 76447, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Banana Peel", 76448, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Dynamite", 76449, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Bing Bong", 76450, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Red Crispberry", 76451, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Green Crispberry", 76452, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Yellow Crispberry", 76453, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Coconut", 76454, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Coconut Half", 76455, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Brown Berrynana", 76456, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Blue Berrynana", 76457, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Pink Berrynana", 76458, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Yellow Berrynana", 76459, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Yellow Winterberry", 76460, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Strange Gem", 76461, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Egg", 76462, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Turkey", 76463, LocationKind::Acquire { zone: None }, false),
    loc("Acquire Cactus", 76464, LocationKind::Acquire { zone: Some(Zone::Mesa) }, false),
    loc("Acquire Aloe Vera", 76465, LocationKind::Acquire { zone: Some(Zone::Mesa) }, false),
    loc("Acquire Sunscreen", 76466, LocationKind::Acquire { zone: Some(Zone::Mesa) }, false),
    loc("Acquire Ancient Idol", 76467, LocationKind::Acquire { zone: Some(Zone::Mesa) }, false),
    loc("Acquire Orange Winterberry", 76468, LocationKind::Acquire { zone: Some(Zone::Alpine) }, false),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    AscentCompleted { ascent: usize },
    ZoneAccess(Zone),
    IdolDunked,
    AllBadgesCollected,
}

/// A logic-only location holding a locked progression item of the same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventData {
    pub name: &'static str,
    pub kind: EventKind,
}

impl EventData {
    pub const fn new(name: &'static str, kind: EventKind) -> Self {
        EventData { name, kind }
    }

    pub fn ascent(&self) -> Option<usize> {
        match self.kind {
            EventKind::AscentCompleted { ascent } => Some(ascent),
            _ => None,
        }
    }
}

pub static EVENT_TABLE: &[EventData] = &[
    EventData::new("Ascent 1 Completed", EventKind::AscentCompleted { ascent: 1 }),
    EventData::new("Ascent 2 Completed", EventKind::AscentCompleted { ascent: 2 }),
    EventData::new("Ascent 3 Completed", EventKind::AscentCompleted { ascent: 3 }),
    EventData::new("Ascent 4 Completed", EventKind::AscentCompleted { ascent: 4 }),
    EventData::new("Ascent 5 Completed", EventKind::AscentCompleted { ascent: 5 }),
    EventData::new("Ascent 6 Completed", EventKind::AscentCompleted { ascent: 6 }),
    EventData::new("Ascent 7 Completed", EventKind::AscentCompleted { ascent: 7 }),
    EventData::new("Mesa Access", EventKind::ZoneAccess(Zone::Mesa)),
    EventData::new("Roots Access", EventKind::ZoneAccess(Zone::Roots)),
    EventData::new("Alpine Access", EventKind::ZoneAccess(Zone::Alpine)),
    EventData::new("Idol Dunked", EventKind::IdolDunked),
    EventData::new("All Badges Collected", EventKind::AllBadgesCollected),
];

pub const IDOL_DUNKED: &str = "Idol Dunked";
pub const ALL_BADGES_COLLECTED: &str = "All Badges Collected";

pub fn ascent_completed_name(ascent: usize) -> String {
    format!("Ascent {ascent} Completed")
}

pub fn excluded_location_codes(locations: &[LocationData]) -> Vec<LocationCode> {
    locations
        .iter()
        .filter(|x| x.excluded)
        .map(|x| x.code)
        .collect()
}

pub fn location_name_groups(locations: &[LocationData]) -> Vec<(String, Vec<String>)> {
    let names = |pred: fn(&LocationKind) -> bool| -> Vec<String> {
        locations
            .iter()
            .filter(|x| pred(&x.kind))
            .map(|x| x.name.to_string())
            .collect()
    };
    vec![
        (
            "Badges".to_string(),
            names(|k: &LocationKind| {
                matches!(k, LocationKind::Badge | LocationKind::AscentBadge { .. })
            }),
        ),
        (
            "Luggage".to_string(),
            names(|k: &LocationKind| *k == LocationKind::Luggage),
        ),
        (
            "Acquire".to_string(),
            names(|k: &LocationKind| matches!(k, LocationKind::Acquire { .. })),
        ),
        (
            "Ascents".to_string(),
            names(|k: &LocationKind| k.ascent().is_some()),
        ),
        (
            "Scout Sashes".to_string(),
            names(|k: &LocationKind| matches!(k, LocationKind::ScoutSash { .. })),
        ),
    ]
}
