use anyhow::{bail, ensure, Context, Result};
use log::{debug, info};
use peakrando_game::items::PROGRESSIVE_STAMINA_BAR;
use peakrando_game::{GameData, Item, ItemClassification, PlayerId, NUM_ASCENTS};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::multiworld::MultiworldRegistry;
use crate::regions;
use crate::rules;
use crate::settings::{Goal, PeakOptions};
use crate::spoiler_log::SlotData;

const STAMINA_BARS: usize = 4;
const STAMINA_BARS_EXTENDED: usize = 7;

pub fn make_rng(seed: usize) -> rand::rngs::StdRng {
    let mut rng_seed = [0u8; 32];
    rng_seed[..8].copy_from_slice(&(seed as u64).to_le_bytes());
    rand::rngs::StdRng::from_seed(rng_seed)
}

/// Number of traps to add when `remaining` pool slots are still open.
pub fn trap_count(remaining: usize, trap_percentage: usize, num_weighted_traps: usize) -> usize {
    if num_weighted_traps == 0 {
        return 0;
    }
    (remaining * trap_percentage).div_ceil(100)
}

/// One player's PEAK world. The host calls `generate_early`, `create_regions`,
/// `create_items`, `set_rules` and `fill_slot_data` once each, in that order.
pub struct PeakWorld<'a> {
    pub game_data: &'a GameData,
    pub options: PeakOptions,
    pub player: PlayerId,
}

impl<'a> PeakWorld<'a> {
    pub fn new(game_data: &'a GameData, options: PeakOptions, player: PlayerId) -> Self {
        PeakWorld {
            game_data,
            options,
            player,
        }
    }

    pub fn generate_early(&self) -> Result<()> {
        self.game_data.validate_ids()?;
        self.options.validate()?;
        if self.options.goal == Goal::ReachPeak {
            ensure!(
                (1..=NUM_ASCENTS).contains(&self.options.ascent_count),
                "ascent_count must be between 1 and {NUM_ASCENTS} when the goal is reach_peak (got {})",
                self.options.ascent_count
            );
        }
        Ok(())
    }

    pub fn create_regions(&self, world: &mut impl MultiworldRegistry) -> Result<()> {
        regions::create_regions(world, self.game_data, &self.options, self.player)
    }

    pub fn create_item(&self, name: &str) -> Result<Item> {
        let data = self.game_data.lookup_item(name)?;
        Ok(Item {
            name: data.name.to_string(),
            code: Some(data.code),
            classification: data.classification,
            player: self.player,
        })
    }

    pub fn get_filler_item_name<R: Rng>(&self, rng: &mut R) -> Result<&'static str> {
        let filler: Vec<&'static str> = self
            .game_data
            .items_by_classification(ItemClassification::Filler)
            .map(|x| x.name)
            .collect();
        filler
            .choose(rng)
            .copied()
            .context("No filler items available in item table")
    }

    /// Build the item pool for `total_locations` open locations.
    pub fn build_item_pool<R: Rng>(&self, total_locations: usize, rng: &mut R) -> Result<Vec<Item>> {
        let mut pool: Vec<Item> = vec![];

        for data in self
            .game_data
            .items_by_classification(ItemClassification::Progression)
        {
            pool.push(self.create_item(data.name)?);
        }

        if self.options.progressive_stamina {
            let num_bars = if self.options.additional_stamina_bars {
                STAMINA_BARS_EXTENDED
            } else {
                STAMINA_BARS
            };
            for _ in 0..num_bars {
                pool.push(self.create_item(PROGRESSIVE_STAMINA_BAR)?);
            }
        }

        for data in self
            .game_data
            .items_by_classification(ItemClassification::Useful)
        {
            if data.name == PROGRESSIVE_STAMINA_BAR {
                continue;
            }
            pool.push(self.create_item(data.name)?);
        }

        let weighted_traps = self.options.trap_weights.weighted_traps();
        let remaining = total_locations.saturating_sub(pool.len());
        let num_traps = trap_count(
            remaining,
            self.options.trap_percentage,
            weighted_traps.len(),
        );
        for _ in 0..num_traps {
            if let Some(trap) = weighted_traps.choose(rng) {
                pool.push(self.create_item(trap.name())?);
            }
        }

        let num_fixed = pool.len();
        while pool.len() < total_locations {
            let name = self.get_filler_item_name(rng)?;
            pool.push(self.create_item(name)?);
        }

        if pool.len() > total_locations {
            bail!(
                "Item pool has {} items but only {} locations are available",
                pool.len(),
                total_locations
            );
        }
        debug!(
            "Player {}: pool has {} fixed items, {} traps, {} filler",
            self.player,
            num_fixed - num_traps,
            num_traps,
            pool.len() - num_fixed
        );
        Ok(pool)
    }

    pub fn create_items<R: Rng>(
        &self,
        world: &mut impl MultiworldRegistry,
        rng: &mut R,
    ) -> Result<()> {
        let total_locations = world.count_non_event_locations(self.player);
        let pool = self.build_item_pool(total_locations, rng)?;
        for item in pool {
            world.push_item(item);
        }
        Ok(())
    }

    pub fn set_rules<R: Rng>(&self, world: &mut impl MultiworldRegistry, rng: &mut R) -> Result<()> {
        rules::apply_rules(world, self.game_data, self.player);
        rules::check_rule_references(world, self.game_data, self.player)?;
        if let Some(req) = rules::completion_requirement(&self.options) {
            world.set_completion_rule(self.player, req);
        }

        let num_locations = world.count_non_event_locations(self.player);
        let mut num_items = world.count_player_items(self.player);
        while num_items < num_locations {
            let name = self.get_filler_item_name(rng)?;
            world.push_item(self.create_item(name)?);
            num_items += 1;
        }
        Ok(())
    }

    pub fn fill_slot_data(&self) -> SlotData {
        SlotData::new(&self.options)
    }

    /// Run every host callback in order against `world`.
    pub fn generate<R: Rng>(
        &self,
        world: &mut impl MultiworldRegistry,
        rng: &mut R,
    ) -> Result<SlotData> {
        self.generate_early()?;
        self.create_regions(world)?;
        self.create_items(world, rng)?;
        self.set_rules(world, rng)?;
        let slot_data = self.fill_slot_data();
        info!(
            "Player {} ({}): {} locations, {} items, goal {:?}",
            self.player,
            world.player_name(self.player).unwrap_or("?"),
            world.count_non_event_locations(self.player),
            world.count_player_items(self.player),
            self.options.goal
        );
        Ok(slot_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{TrapWeight, TrapWeights};

    #[test]
    fn test_trap_count() {
        assert_eq!(trap_count(50, 10, 52), 5);
        assert_eq!(trap_count(51, 10, 52), 6);
        assert_eq!(trap_count(77, 100, 1), 77);
        assert_eq!(trap_count(77, 0, 52), 0);
        assert_eq!(trap_count(77, 50, 0), 0);
    }

    #[test]
    fn test_pool_with_stamina() {
        let game_data = GameData::load().unwrap();
        let options = PeakOptions {
            progressive_stamina: true,
            additional_stamina_bars: true,
            trap_weights: TrapWeights::uniform(TrapWeight::None),
            ..PeakOptions::default()
        };
        let world = PeakWorld::new(&game_data, options, 1);
        let pool = world.build_item_pool(120, &mut make_rng(0)).unwrap();
        assert_eq!(pool.len(), 120);
        let bars = pool
            .iter()
            .filter(|x| x.name == PROGRESSIVE_STAMINA_BAR)
            .count();
        assert_eq!(bars, 7);
        assert!(pool
            .iter()
            .all(|x| x.classification != ItemClassification::Trap));
        assert!(pool.iter().all(|x| x.player == 1 && !x.is_event()));
    }

    #[test]
    fn test_pool_too_large() {
        let game_data = GameData::load().unwrap();
        let world = PeakWorld::new(&game_data, PeakOptions::default(), 1);
        let err = world.build_item_pool(10, &mut make_rng(0)).unwrap_err();
        assert!(err.to_string().contains("only 10 locations"));
    }

    #[test]
    fn test_create_unknown_item() {
        let game_data = GameData::load().unwrap();
        let world = PeakWorld::new(&game_data, PeakOptions::default(), 1);
        assert!(world.create_item("Golden Piton").is_err());
        let item = world.create_item("Ascent 3 Unlock").unwrap();
        assert_eq!(item.code, Some(76021));
        assert_eq!(item.classification, ItemClassification::Progression);
    }

    #[test]
    fn test_generate_early_rejects_zero_ascents() {
        let game_data = GameData::load().unwrap();
        let options = PeakOptions {
            ascent_count: 0,
            ..PeakOptions::default()
        };
        let world = PeakWorld::new(&game_data, options.clone(), 1);
        assert!(world.generate_early().is_err());

        let options = PeakOptions {
            goal: Goal::CompleteAllBadges,
            ..options
        };
        let world = PeakWorld::new(&game_data, options, 1);
        world.generate_early().unwrap();
    }
}
