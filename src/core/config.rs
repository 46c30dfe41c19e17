//! Summon configuration with documented constants
//!
//! All summon tunables are collected here with explanations of their
//! purpose and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::DataError;
use crate::core::types::{Grade, Percent};

/// Configuration for the summon and placement systems
///
/// These values reproduce the live game's balance. Changing them
/// affects summon pacing and economy pressure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummonConfig {
    // === ROSTER ===
    /// Maximum number of active units on the board at once
    ///
    /// Summon attempts at this count fail before any resource is spent.
    pub max_roster: u32,

    /// Number of preallocated unit slots in the pool
    ///
    /// Must be at least `max_roster`; the headroom above it covers
    /// preview summons that are drafted but never placed.
    pub pool_capacity: usize,

    // === LUCKY SUMMON OFFERS ===
    /// Success chance of the standing Rare lucky-summon offer (percent)
    pub rare_lucky_chance: Percent,

    /// Success chance of the standing Heroic lucky-summon offer (percent)
    pub heroic_lucky_chance: Percent,

    /// Success chance of the standing Legendary lucky-summon offer (percent)
    pub legendary_lucky_chance: Percent,

    /// Gem cost of a Rare lucky summon
    pub rare_gem_cost: u32,

    /// Gem cost of a Heroic lucky summon
    pub heroic_gem_cost: u32,

    /// Gem cost of a Legendary lucky summon
    pub legendary_gem_cost: u32,

    // === ECONOMY ===
    /// Coin cost of the first normal summon
    pub initial_summon_coin_cost: u32,

    /// Amount the coin cost rises after each successful normal summon
    ///
    /// The escalator never resets during a level, so normal summons get
    /// steadily more expensive while lucky summons stay flat.
    pub summon_coin_cost_step: u32,

    // === DRAW ORDER ===
    /// Sort key assigned to the first cell in scan order
    pub draw_order_offset: i32,

    /// Sort-key step between consecutive cells in scan order
    ///
    /// Cells earlier in the scan (higher rows) draw behind later ones,
    /// so units layer front-to-back consistently.
    pub draw_order_step: i32,
}

impl Default for SummonConfig {
    fn default() -> Self {
        Self {
            max_roster: 20,
            pool_capacity: 24,
            rare_lucky_chance: 60.0,
            heroic_lucky_chance: 20.0,
            legendary_lucky_chance: 10.0,
            rare_gem_cost: 1,
            heroic_gem_cost: 1,
            legendary_gem_cost: 2,
            initial_summon_coin_cost: 20,
            summon_coin_cost_step: 2,
            draw_order_offset: 5,
            draw_order_step: 3,
        }
    }
}

impl SummonConfig {
    /// One-time validation pass at data-load time
    pub fn validate(&self) -> Result<(), DataError> {
        if self.max_roster == 0 {
            return Err(DataError::BadConfig("max_roster must be positive".into()));
        }
        if self.pool_capacity < self.max_roster as usize {
            return Err(DataError::BadConfig(format!(
                "pool_capacity {} is below max_roster {}",
                self.pool_capacity, self.max_roster
            )));
        }
        for (name, chance) in [
            ("rare_lucky_chance", self.rare_lucky_chance),
            ("heroic_lucky_chance", self.heroic_lucky_chance),
            ("legendary_lucky_chance", self.legendary_lucky_chance),
        ] {
            if !chance.is_finite() || !(0.0..=100.0).contains(&chance) {
                return Err(DataError::BadConfig(format!(
                    "{} is {} (must be finite and in 0..=100)",
                    name, chance
                )));
            }
        }
        if self.draw_order_step <= 0 {
            return Err(DataError::BadConfig(
                "draw_order_step must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Standing lucky-summon chance for a grade
    ///
    /// Common has no lucky offer; callers build offers through
    /// [`crate::summon::LuckyOffer`], which never asks for it.
    pub fn lucky_chance(&self, grade: Grade) -> Option<Percent> {
        match grade {
            Grade::Common => None,
            Grade::Rare => Some(self.rare_lucky_chance),
            Grade::Heroic => Some(self.heroic_lucky_chance),
            Grade::Legendary => Some(self.legendary_lucky_chance),
        }
    }

    /// Gem cost of a lucky summon for a grade
    ///
    /// # Panics
    /// Panics for `Grade::Common`: no gem cost exists and no code path
    /// builds a Common lucky offer.
    pub fn lucky_gem_cost(&self, grade: Grade) -> u32 {
        match grade {
            Grade::Common => panic!("no lucky summon offer exists for Common"),
            Grade::Rare => self.rare_gem_cost,
            Grade::Heroic => self.heroic_gem_cost,
            Grade::Legendary => self.legendary_gem_cost,
        }
    }
}
