//! Game data loading - TOML catalogs, ladders and skill lists
//!
//! Everything is loaded once before first use and validated in a single
//! pass; malformed data never reaches the game systems.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::config::SummonConfig;
use crate::core::error::{DataError, Result};
use crate::skills::SkillRecord;
use crate::summon::ladder::ProbabilityTable;
use crate::units::{UnitCatalog, UnitDefinition};

/// On-disk document shape
#[derive(Debug, Deserialize)]
struct GameDataFile {
    #[serde(default)]
    summon: SummonConfigFile,
    units: Vec<UnitDefinition>,
    ladder: Vec<ProbabilityTable>,
    #[serde(default)]
    skills: Vec<SkillRecord>,
}

/// Summon tunables with every field optional, falling back to defaults
#[derive(Debug, Default, Deserialize)]
struct SummonConfigFile {
    max_roster: Option<u32>,
    pool_capacity: Option<usize>,
    rare_lucky_chance: Option<f32>,
    heroic_lucky_chance: Option<f32>,
    legendary_lucky_chance: Option<f32>,
    rare_gem_cost: Option<u32>,
    heroic_gem_cost: Option<u32>,
    legendary_gem_cost: Option<u32>,
    initial_summon_coin_cost: Option<u32>,
    summon_coin_cost_step: Option<u32>,
    draw_order_offset: Option<i32>,
    draw_order_step: Option<i32>,
}

impl SummonConfigFile {
    fn into_config(self) -> SummonConfig {
        let d = SummonConfig::default();
        SummonConfig {
            max_roster: self.max_roster.unwrap_or(d.max_roster),
            pool_capacity: self.pool_capacity.unwrap_or(d.pool_capacity),
            rare_lucky_chance: self.rare_lucky_chance.unwrap_or(d.rare_lucky_chance),
            heroic_lucky_chance: self.heroic_lucky_chance.unwrap_or(d.heroic_lucky_chance),
            legendary_lucky_chance: self
                .legendary_lucky_chance
                .unwrap_or(d.legendary_lucky_chance),
            rare_gem_cost: self.rare_gem_cost.unwrap_or(d.rare_gem_cost),
            heroic_gem_cost: self.heroic_gem_cost.unwrap_or(d.heroic_gem_cost),
            legendary_gem_cost: self.legendary_gem_cost.unwrap_or(d.legendary_gem_cost),
            initial_summon_coin_cost: self
                .initial_summon_coin_cost
                .unwrap_or(d.initial_summon_coin_cost),
            summon_coin_cost_step: self
                .summon_coin_cost_step
                .unwrap_or(d.summon_coin_cost_step),
            draw_order_offset: self.draw_order_offset.unwrap_or(d.draw_order_offset),
            draw_order_step: self.draw_order_step.unwrap_or(d.draw_order_step),
        }
    }
}

/// Fully validated startup data
#[derive(Debug)]
pub struct GameData {
    pub config: SummonConfig,
    pub catalog: UnitCatalog,
    pub ladder_tables: Vec<ProbabilityTable>,
    pub skills: Vec<SkillRecord>,
}

/// Load and validate a game-data document from disk
pub fn load_game_data(path: &Path) -> Result<GameData> {
    let content = fs::read_to_string(path)?;
    parse_game_data(&content)
}

/// Parse and validate a game-data document
pub fn parse_game_data(content: &str) -> Result<GameData> {
    let file: GameDataFile = toml::from_str(content)?;

    let config = file.summon.into_config();
    config.validate()?;

    let catalog = UnitCatalog::new(file.units)?;

    if file.ladder.is_empty() {
        return Err(DataError::EmptyLadder);
    }
    for (i, table) in file.ladder.iter().enumerate() {
        table.validate(i)?;
    }

    // Compile once here purely to surface duplicate ids and bad
    // chances at load; the caller compiles its own book from the
    // returned records
    let book = crate::skills::SkillBook::compile(&file.skills)?;

    for grade in crate::core::types::Grade::ALL {
        for def in catalog.tier(grade) {
            if let Some(skill) = def.skill {
                if book.record(skill).is_none() {
                    return Err(DataError::UnknownSkillRef {
                        unit: def.id,
                        skill,
                    });
                }
            }
        }
    }

    Ok(GameData {
        config,
        catalog,
        ladder_tables: file.ladder,
        skills: file.skills,
    })
}
