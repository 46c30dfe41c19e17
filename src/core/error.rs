use thiserror::Error;

use crate::core::types::{Grade, SkillId, UnitDefId};

/// Startup/data errors. These indicate corrupt configuration data, not
/// player behavior, and are rejected before the game systems ever run.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Enforcement ladder has no probability tables")]
    EmptyLadder,

    #[error("Probability table {table}: chance for {grade} is {chance} (must be finite and in 0..=100)")]
    BadChance {
        table: usize,
        grade: Grade,
        chance: f32,
    },

    #[error("Probability table {table}: chances sum to {total} (must not exceed 100)")]
    TableOverflow { table: usize, total: f32 },

    #[error("Unit catalog has no definitions for grade {0}")]
    EmptyGradeTier(Grade),

    #[error("Duplicate unit definition id: {0:?}")]
    DuplicateUnitId(UnitDefId),

    #[error("Duplicate skill id: {0:?}")]
    DuplicateSkillId(SkillId),

    #[error("Skill {id:?}: {field} is {value} (must be finite and in 0..=100)")]
    BadSkillChance {
        id: SkillId,
        field: &'static str,
        value: f32,
    },

    #[error("Skill {id:?}: magnitude {value} is invalid (must be finite, and non-negative for resource grants)")]
    BadSkillMagnitude { id: SkillId, value: f32 },

    #[error("Unit {unit:?} references unknown skill {skill:?}")]
    UnknownSkillRef { unit: UnitDefId, skill: SkillId },

    #[error("Invalid summon config: {0}")]
    BadConfig(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
