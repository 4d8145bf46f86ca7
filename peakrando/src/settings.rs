use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use peakrando_game::items::NUM_TRAPS;
use peakrando_game::Trap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr, VariantNames};

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Goal {
    #[default]
    ReachPeak = 0,
    CompleteAllBadges = 1,
    TwentyFourKaratBadge = 2,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeathLinkBehavior {
    #[default]
    ResetRun = 0,
    ResetToLastCheckpoint = 1,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrapWeight {
    None,
    Low,
    #[default]
    Medium,
    High,
}

impl TrapWeight {
    pub fn weight(self) -> usize {
        match self {
            TrapWeight::None => 0,
            TrapWeight::Low => 1,
            TrapWeight::Medium => 2,
            TrapWeight::High => 4,
        }
    }
}

/// One weight per trap, indexed by `Trap` discriminant. Serialized as a map
/// from trap name to weight; traps missing from the map keep the default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Trap, TrapWeight>",
    into = "BTreeMap<Trap, TrapWeight>"
)]
pub struct TrapWeights([TrapWeight; NUM_TRAPS]);

impl Default for TrapWeights {
    fn default() -> Self {
        TrapWeights([TrapWeight::default(); NUM_TRAPS])
    }
}

impl TrapWeights {
    pub fn uniform(weight: TrapWeight) -> Self {
        TrapWeights([weight; NUM_TRAPS])
    }

    pub fn get(&self, trap: Trap) -> TrapWeight {
        self.0[trap as usize]
    }

    pub fn set(&mut self, trap: Trap, weight: TrapWeight) {
        self.0[trap as usize] = weight;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trap, TrapWeight)> + '_ {
        Trap::iter().map(|t| (t, self.get(t)))
    }

    /// Each trap repeated as many times as its weight, in trap order.
    pub fn weighted_traps(&self) -> Vec<Trap> {
        let mut out = vec![];
        for (trap, weight) in self.iter() {
            out.extend(std::iter::repeat(trap).take(weight.weight()));
        }
        out
    }
}

impl From<BTreeMap<Trap, TrapWeight>> for TrapWeights {
    fn from(map: BTreeMap<Trap, TrapWeight>) -> Self {
        let mut weights = TrapWeights::default();
        for (trap, weight) in map {
            weights.set(trap, weight);
        }
        weights
    }
}

impl From<TrapWeights> for BTreeMap<Trap, TrapWeight> {
    fn from(weights: TrapWeights) -> Self {
        weights.iter().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeakOptions {
    pub goal: Goal,
    pub ascent_count: usize,
    pub badge_count: usize,
    pub trap_percentage: usize,
    pub progressive_stamina: bool,
    pub additional_stamina_bars: bool,
    pub death_link: bool,
    pub death_link_behavior: DeathLinkBehavior,
    pub ring_link: bool,
    pub hard_ring_link: bool,
    pub energy_link: bool,
    pub trap_link: bool,
    pub trap_weights: TrapWeights,
}

impl Default for PeakOptions {
    fn default() -> Self {
        PeakOptions {
            goal: Goal::ReachPeak,
            ascent_count: 4,
            badge_count: 20,
            trap_percentage: 10,
            progressive_stamina: false,
            additional_stamina_bars: false,
            death_link: false,
            death_link_behavior: DeathLinkBehavior::ResetRun,
            ring_link: false,
            hard_ring_link: false,
            energy_link: false,
            trap_link: false,
            trap_weights: TrapWeights::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum OptionKind {
    Toggle,
    Range { start: i64, end: i64 },
    Choice { options: Vec<(&'static str, i64)> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionDef {
    pub key: String,
    pub display_name: String,
    pub doc: &'static str,
    pub kind: OptionKind,
    pub default: i64,
}

impl OptionDef {
    fn toggle(key: &str, display_name: &str, doc: &'static str) -> Self {
        OptionDef {
            key: key.to_string(),
            display_name: display_name.to_string(),
            doc,
            kind: OptionKind::Toggle,
            default: 0,
        }
    }

    fn range(
        key: &str,
        display_name: &str,
        doc: &'static str,
        start: i64,
        end: i64,
        default: i64,
    ) -> Self {
        OptionDef {
            key: key.to_string(),
            display_name: display_name.to_string(),
            doc,
            kind: OptionKind::Range { start, end },
            default,
        }
    }

    fn choice<T>(key: &str, display_name: &str, doc: &'static str, value: fn(T) -> i64) -> Self
    where
        T: IntoEnumIterator + Default + Into<&'static str> + Copy,
    {
        OptionDef {
            key: key.to_string(),
            display_name: display_name.to_string(),
            doc,
            kind: OptionKind::Choice {
                options: T::iter().map(|x| (x.into(), value(x))).collect(),
            },
            default: value(T::default()),
        }
    }

    /// Whether `value` is one of the legal values for this option.
    pub fn accepts(&self, value: i64) -> bool {
        match &self.kind {
            OptionKind::Toggle => value == 0 || value == 1,
            OptionKind::Range { start, end } => (*start..=*end).contains(&value),
            OptionKind::Choice { options } => options.iter().any(|(_, v)| *v == value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    pub name: &'static str,
    pub options: Vec<OptionDef>,
}

fn trap_weight_value(w: TrapWeight) -> i64 {
    w.weight() as i64
}

pub fn get_option_groups() -> Vec<OptionGroup> {
    vec![
        OptionGroup {
            name: "Goal",
            options: vec![
                OptionDef::choice::<Goal>(
                    "goal",
                    "Goal",
                    "Set the goal for completion.",
                    |g| g as i64,
                ),
                OptionDef::range(
                    "ascent_count",
                    "Required Ascent Count",
                    "Select how many ascents are required for completion.",
                    0,
                    7,
                    4,
                ),
                OptionDef::range(
                    "badge_count",
                    "Required Badge Count",
                    "Select how many badges are required for completion.",
                    10,
                    50,
                    20,
                ),
            ],
        },
        OptionGroup {
            name: "Stamina",
            options: vec![
                OptionDef::toggle(
                    "progressive_stamina",
                    "Progressive Stamina",
                    "Start with a reduced stamina bar and find Progressive Stamina Bar items to restore it.",
                ),
                OptionDef::toggle(
                    "additional_stamina_bars",
                    "Additional Stamina Bars",
                    "With progressive stamina, add three extra bars beyond the normal maximum.",
                ),
            ],
        },
        OptionGroup {
            name: "Multiplayer Links",
            options: vec![
                OptionDef::toggle(
                    "death_link",
                    "Death Link",
                    "Enable death link mode, affecting all linked players.",
                ),
                OptionDef::choice::<DeathLinkBehavior>(
                    "death_link_behavior",
                    "Death Link Behavior",
                    "Choose what happens when Death Link triggers.",
                    |b| b as i64,
                ),
                OptionDef::toggle(
                    "ring_link",
                    "Ring Link",
                    "Share stamina restores and drains with other linked players.",
                ),
                OptionDef::toggle(
                    "hard_ring_link",
                    "Hard Ring Link",
                    "Ring Link also shares damage taken.",
                ),
                OptionDef::toggle(
                    "energy_link",
                    "Energy Link",
                    "Contribute to and draw from the shared energy pool.",
                ),
                OptionDef::toggle(
                    "trap_link",
                    "Trap Link",
                    "Receive traps triggered by other linked players.",
                ),
            ],
        },
        OptionGroup {
            name: "Traps",
            options: std::iter::once(OptionDef::range(
                "trap_percentage",
                "Trap Percentage",
                "Set a percentage of how many filler items are replaced with traps.",
                0,
                100,
                10,
            ))
            .chain(Trap::iter().map(|trap| {
                OptionDef::choice::<TrapWeight>(
                    &trap.option_key(),
                    &format!("{} Weight", trap.name()),
                    "Relative chance of this trap being chosen. None removes it from the pool.",
                    trap_weight_value,
                )
            }))
            .collect(),
        },
    ]
}

impl PeakOptions {
    /// Every option as (key, integer value), in option group order.
    pub fn option_values(&self) -> Vec<(String, i64)> {
        let flag = |b: bool| b as i64;
        let mut out: Vec<(String, i64)> = vec![
            ("goal".to_string(), self.goal as i64),
            ("ascent_count".to_string(), self.ascent_count as i64),
            ("badge_count".to_string(), self.badge_count as i64),
            ("progressive_stamina".to_string(), flag(self.progressive_stamina)),
            (
                "additional_stamina_bars".to_string(),
                flag(self.additional_stamina_bars),
            ),
            ("death_link".to_string(), flag(self.death_link)),
            (
                "death_link_behavior".to_string(),
                self.death_link_behavior as i64,
            ),
            ("ring_link".to_string(), flag(self.ring_link)),
            ("hard_ring_link".to_string(), flag(self.hard_ring_link)),
            ("energy_link".to_string(), flag(self.energy_link)),
            ("trap_link".to_string(), flag(self.trap_link)),
            ("trap_percentage".to_string(), self.trap_percentage as i64),
        ];
        for (trap, weight) in self.trap_weights.iter() {
            out.push((trap.option_key(), trap_weight_value(weight)));
        }
        out
    }

    pub fn validate(&self) -> Result<()> {
        let values = self.option_values();
        for group in get_option_groups() {
            for def in &group.options {
                let Some((_, value)) = values.iter().find(|(k, _)| k == &def.key) else {
                    bail!("Option '{}' has no value", def.key);
                };
                if !def.accepts(*value) {
                    bail!(
                        "Option '{}' value {} is out of range: {:?}",
                        def.key,
                        value,
                        def.kind
                    );
                }
            }
        }
        Ok(())
    }
}

/// Rewrite the numeric form of a toggle (0/1) or choice (its value) into the
/// named form the option types deserialize from.
fn normalize_option_value(def: &OptionDef, value: &mut serde_json::Value) -> Result<()> {
    let Some(n) = value.as_i64() else {
        return Ok(());
    };
    match &def.kind {
        OptionKind::Toggle => match n {
            0 => *value = serde_json::Value::Bool(false),
            1 => *value = serde_json::Value::Bool(true),
            _ => bail!("Option '{}' value {} is not a toggle (0 or 1)", def.key, n),
        },
        OptionKind::Choice { options } => match options.iter().find(|(_, v)| *v == n) {
            Some((name, _)) => *value = serde_json::Value::String(name.to_string()),
            None => bail!(
                "Option '{}' value {} is not one of {:?}",
                def.key,
                n,
                options
            ),
        },
        OptionKind::Range { .. } => {}
    }
    Ok(())
}

/// Parse an options file. Per-trap weights may be given either in a nested
/// `trap_weights` map keyed by trap name, or as flat `<trap>_weight` keys.
/// Toggles and choices accept their integer values as well as their names.
pub fn parse_options(options_json: &str) -> Result<PeakOptions> {
    let mut value: serde_json::Value =
        serde_json::from_str(options_json).context("invalid options JSON")?;
    if let Some(obj) = value.as_object_mut() {
        let mut flat_weights = serde_json::Map::new();
        for trap in Trap::iter() {
            if let Some(w) = obj.remove(&trap.option_key()) {
                flat_weights.insert(trap.name().to_string(), w);
            }
        }
        if !flat_weights.is_empty() {
            let nested = obj
                .entry("trap_weights")
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            let Some(nested) = nested.as_object_mut() else {
                bail!("trap_weights must be an object");
            };
            for (k, v) in flat_weights {
                nested.insert(k, v);
            }
        }

        let defs: Vec<OptionDef> = get_option_groups()
            .into_iter()
            .flat_map(|g| g.options)
            .collect();
        for def in &defs {
            if let Some(v) = obj.get_mut(&def.key) {
                normalize_option_value(def, v)?;
            }
        }
        if let Some(nested) = obj.get_mut("trap_weights").and_then(|x| x.as_object_mut()) {
            for trap in Trap::iter() {
                let Some(v) = nested.get_mut(trap.name()) else {
                    continue;
                };
                let key = trap.option_key();
                if let Some(def) = defs.iter().find(|d| d.key == key) {
                    normalize_option_value(def, v)?;
                }
            }
        }
    }
    let options: PeakOptions = serde_path_to_error::deserialize(value)?;
    options.validate()?;
    Ok(options)
}
