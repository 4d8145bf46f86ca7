use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::ItemCode;

pub const PROGRESSIVE_STAMINA_BAR: &str = "Progressive Stamina Bar";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClassification {
    Progression,
    Useful,
    Filler,
    Trap,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemData {
    pub name: &'static str,
    pub code: ItemCode,
    pub classification: ItemClassification,
}

impl ItemData {
    pub const fn new(name: &'static str, code: ItemCode, classification: ItemClassification) -> Self {
        ItemData {
            name,
            code,
            classification,
        }
    }
}

// Note: variant order is significant; it indexes the per-trap weight options.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumCount,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(usize)]
pub enum Trap {
    #[strum(serialize = "Spawn Bee Swarm")]
    SpawnBeeSwarm,
    #[strum(serialize = "Destroy Held Item")]
    DestroyHeldItem,
    #[strum(serialize = "Minor Poison Trap")]
    MinorPoison,
    #[strum(serialize = "Poison Trap")]
    Poison,
    #[strum(serialize = "Deadly Poison Trap")]
    DeadlyPoison,
    #[strum(serialize = "Tornado Trap")]
    Tornado,
    #[strum(serialize = "Nap Time Trap")]
    NapTime,
    #[strum(serialize = "Balloon Trap")]
    Balloon,
    #[strum(serialize = "Hungry Hungry Camper Trap")]
    HungryHungryCamper,
    #[strum(serialize = "Banana Peel Trap")]
    BananaPeel,
    #[strum(serialize = "Swap Trap")]
    Swap,
    #[strum(serialize = "Slip Trap")]
    Slip,
    #[strum(serialize = "Freeze Trap")]
    Freeze,
    #[strum(serialize = "Cold Trap")]
    Cold,
    #[strum(serialize = "Hot Trap")]
    Hot,
    #[strum(serialize = "Injury Trap")]
    Injury,
    #[strum(serialize = "Cactus Ball Trap")]
    CactusBall,
    #[strum(serialize = "Instant Death Trap")]
    InstantDeath,
    #[strum(serialize = "Yeet Trap")]
    Yeet,
    #[strum(serialize = "Tumbleweed Trap")]
    Tumbleweed,
    #[strum(serialize = "Zombie Horde Trap")]
    ZombieHorde,
    #[strum(serialize = "Gust Trap")]
    Gust,
    #[strum(serialize = "Mandrake Trap")]
    Mandrake,
    #[strum(serialize = "Fungal Infection Trap")]
    FungalInfection,
    #[strum(serialize = "Pokemon Trivia Trap")]
    PokemonTrivia,
    #[strum(serialize = "Blackout Trap")]
    Blackout,
}

pub const NUM_TRAPS: usize = Trap::COUNT;

impl Trap {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Key of the weight option for this trap, e.g. "nap_time_trap_weight".
    pub fn option_key(self) -> String {
        let snake: String = self
            .name()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{snake}_weight")
    }
}

impl TryFrom<String> for Trap {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

use ItemClassification::{Filler, Progression, Trap as TrapItem, Useful};

pub static ITEM_TABLE: &[ItemData] = &[
    // Ascent unlocks
    ItemData::new("Ascent 1 Unlock", 76019, Progression),
    ItemData::new("Ascent 2 Unlock", 76020, Progression),
    ItemData::new("Ascent 3 Unlock", 76021, Progression),
    ItemData::new("Ascent 4 Unlock", 76022, Progression),
    ItemData::new("Ascent 5 Unlock", 76023, Progression),
    ItemData::new("Ascent 6 Unlock", 76024, Progression),
    ItemData::new("Ascent 7 Unlock", 76025, Progression),
    // Repeatable; only added by the stamina step of pool construction.
    ItemData::new(PROGRESSIVE_STAMINA_BAR, 77080, Useful),
    // Abilities
    ItemData::new("Bounce Fungus", 76000, Useful),
    ItemData::new("Speed Upgrade", 76031, Useful),
    ItemData::new("Chain Launcher", 76007, Useful),
    // Traps
    ItemData::new("Spawn Bee Swarm", 76027, TrapItem),
    ItemData::new("Destroy Held Item", 76029, TrapItem),
    ItemData::new("Minor Poison Trap", 76032, TrapItem),
    ItemData::new("Poison Trap", 76033, TrapItem),
    ItemData::new("Deadly Poison Trap", 76034, TrapItem),
    ItemData::new("Tornado Trap", 76035, TrapItem),
    ItemData::new("Nap Time Trap", 76036, TrapItem),
    ItemData::new("Balloon Trap", 76037, TrapItem),
    ItemData::new("Hungry Hungry Camper Trap", 76038, TrapItem),
    ItemData::new("Banana Peel Trap", 76039, TrapItem),
    ItemData::new("Swap Trap", 76040, TrapItem),
    ItemData::new("Slip Trap", 76041, TrapItem),
    ItemData::new("Freeze Trap", 76042, TrapItem),
    ItemData::new("Cold Trap", 76043, TrapItem),
    ItemData::new("Hot Trap", 76044, TrapItem),
    ItemData::new("Injury Trap", 76045, TrapItem),
    ItemData::new("Cactus Ball Trap", 76046, TrapItem),
    ItemData::new("Instant Death Trap", 76047, TrapItem),
    ItemData::new("Yeet Trap", 76048, TrapItem),
    ItemData::new("Tumbleweed Trap", 76049, TrapItem),
    ItemData::new("Zombie Horde Trap", 76050, TrapItem),
    ItemData::new("Gust Trap", 76051, TrapItem),
    ItemData::new("Mandrake Trap", 76052, TrapItem),
    ItemData::new("Fungal Infection Trap", 76053, TrapItem),
    ItemData::new("Pokemon Trivia Trap", 76054, TrapItem),
    ItemData::new("Blackout Trap", 76055, TrapItem),
    // Physical game items
    ItemData::new("Rope Spool", 77000, Useful),
    ItemData::new("Rope Cannon", 77001, Useful),
    ItemData::new("Anti-Rope Spool", 77002, Useful),
    ItemData::new("Anti-Rope Cannon", 77003, Useful),
    ItemData::new("Piton", 77005, Useful),
    ItemData::new("Magic Bean", 77006, Useful),
    ItemData::new("Parasol", 77007, Useful),
    ItemData::new("Balloon", 77008, Useful),
    ItemData::new("Balloon Bunch", 77009, Useful),
    ItemData::new("Scout Cannon", 77010, Useful),
    ItemData::new("Portable Stove", 77011, Useful),
    ItemData::new("Campfire", 77012, Useful),
    ItemData::new("Lantern", 77013, Useful),
    ItemData::new("Flare", 77014, Useful),
    ItemData::new("Torch", 77015, Useful),
    ItemData::new("Cactus", 77016, Useful),
    ItemData::new("Compass", 77017, Useful),
    ItemData::new("Pirate's Compass", 77018, Useful),
    ItemData::new("Binoculars", 77019, Useful),
    ItemData::new("Flying Disc", 77020, Useful),
    ItemData::new("Bandages", 77021, Filler),
    ItemData::new("First-Aid Kit", 77022, Useful),
    ItemData::new("Antidote", 77023, Useful),
    ItemData::new("Heat Pack", 77024, Useful),
    ItemData::new("Cure-All", 77025, Useful),
    ItemData::new("Faerie Lantern", 77026, Useful),
    ItemData::new("Remedy Fungus", 77027, Useful),
    ItemData::new("Aloe Vera", 77028, Useful),
    ItemData::new("Sunscreen", 77029, Useful),
    ItemData::new("Scout Effigy", 77030, Useful),
    ItemData::new("Cursed Skull", 77031, Filler),
    ItemData::new("Pandora's Lunchbox", 77032, Useful),
    ItemData::new("Ancient Idol", 77033, Useful),
    ItemData::new("Bugle of Friendship", 77034, Useful),
    ItemData::new("Bugle", 77035, Useful),
    ItemData::new("Medicinal Root", 77036, Useful),
    ItemData::new("Shelf Shroom", 77037, Useful),
    ItemData::new("Bounce Shroom", 77038, Useful),
    ItemData::new("Trail Mix", 77039, Filler),
    ItemData::new("Granola Bar", 77040, Filler),
    ItemData::new("Scout Cookies", 77041, Filler),
    ItemData::new("Airline Food", 77042, Useful),
    ItemData::new("Energy Drink", 77043, Useful),
    ItemData::new("Sports Drink", 77044, Useful),
    ItemData::new("Big Lollipop", 77045, Useful),
    ItemData::new("Button Shroom", 77046, Useful),
    ItemData::new("Bugle Shroom", 77047, Useful),
    ItemData::new("Cluster Shroom", 77048, Useful),
    ItemData::new("Chubby Shroom", 77049, Useful),
    ItemData::new("Conch", 77050, Useful),
    ItemData::new("Banana Peel", 77051, Filler),
    ItemData::new("Dynamite", 77052, Filler),
    ItemData::new("Bing Bong", 77053, Useful),
    ItemData::new("Red Crispberry", 77054, Filler),
    ItemData::new("Green Crispberry", 77055, Filler),
    ItemData::new("Yellow Crispberry", 77056, Filler),
    ItemData::new("Coconut", 77057, Filler),
    ItemData::new("Coconut Half", 77058, Filler),
    ItemData::new("Brown Berrynana", 77059, Filler),
    ItemData::new("Blue Berrynana", 77060, Filler),
    ItemData::new("Pink Berrynana", 77061, Filler),
    ItemData::new("Yellow Berrynana", 77062, Filler),
    ItemData::new("Orange Winterberry", 77063, Useful),
    ItemData::new("Yellow Winterberry", 77064, Filler),
    ItemData::new("Guidebook", 77065, Useful),
    ItemData::new("Strange Gem", 77066, Filler),
    ItemData::new("Egg", 77067, Useful),
    ItemData::new("Turkey", 77068, Useful),
];

pub fn ascent_unlock_name(ascent: usize) -> String {
    format!("Ascent {ascent} Unlock")
}

pub fn item_name_groups(items: &[ItemData]) -> Vec<(String, Vec<String>)> {
    let names = |classification: ItemClassification| -> Vec<String> {
        items
            .iter()
            .filter(|x| x.classification == classification)
            .map(|x| x.name.to_string())
            .collect()
    };
    vec![
        ("Ascent Unlocks".to_string(), names(Progression)),
        ("Useful".to_string(), names(Useful)),
        ("Filler".to_string(), names(Filler)),
        ("Traps".to_string(), names(TrapItem)),
    ]
}
