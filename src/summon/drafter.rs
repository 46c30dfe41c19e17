//! Grade-weighted random drafter
//!
//! Draws a grade by cumulative-probability sampling against the active
//! table, then a definition uniformly within that grade's tier.

use thiserror::Error;

use crate::core::types::{Grade, Percent};
use crate::summon::dice::Dice;
use crate::summon::ladder::ProbabilityTable;
use crate::units::{UnitCatalog, UnitDefinition};

/// A weighted draw that could not resolve. This is a data problem, not
/// a gameplay failure, and is never folded into a user-facing outcome.
#[derive(Error, Debug, PartialEq)]
pub enum DraftError {
    #[error("roll {roll} exceeds the table's cumulative chance {total}")]
    RollBeyondTable { roll: Percent, total: Percent },
}

/// Walk grades in enumeration order accumulating chances; the first
/// grade whose running total reaches the roll wins. A boundary roll
/// resolves to the earlier grade.
pub fn draft_grade(table: &ProbabilityTable, roll: Percent) -> Result<Grade, DraftError> {
    let mut total = 0.0;
    for grade in Grade::ALL {
        total += table.chance(grade);
        if roll <= total {
            return Ok(grade);
        }
    }
    Err(DraftError::RollBeyondTable { roll, total })
}

/// Uniform pick within the grade's definition list.
///
/// The catalog rejects empty tiers at load, so the tier is non-empty
/// here by construction.
pub fn draft_definition<'a>(
    catalog: &'a UnitCatalog,
    grade: Grade,
    dice: &mut dyn Dice,
) -> &'a UnitDefinition {
    let tier = catalog.tier(grade);
    assert!(!tier.is_empty(), "catalog tier {} is empty", grade);
    &tier[dice.pick(tier.len())]
}
