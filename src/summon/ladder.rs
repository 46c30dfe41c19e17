//! Probability-enforcement ladder
//!
//! An ordered sequence of probability tables, advanced one way by
//! paying each table's coin cost. Better tables shift weight from
//! Common toward the high tiers. The index never moves backward except
//! through full level reinitialization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::DataError;
use crate::core::types::{Grade, Percent};
use crate::economy::ResourceLedger;

/// Per-tier summon chances plus the coin cost to advance past them
///
/// `chances` is index-aligned with the `Grade` enumeration. Entries
/// need not sum to 100; see the drafter for how a short total behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTable {
    pub chances: [Percent; Grade::COUNT],
    pub enforce_cost: u32,
}

impl ProbabilityTable {
    pub fn chance(&self, grade: Grade) -> Percent {
        self.chances[grade.index()]
    }

    /// Load-time validation: finite entries in [0, 100], total ≤ 100
    pub fn validate(&self, table_index: usize) -> Result<(), DataError> {
        for grade in Grade::ALL {
            let chance = self.chance(grade);
            if !chance.is_finite() || !(0.0..=100.0).contains(&chance) {
                return Err(DataError::BadChance {
                    table: table_index,
                    grade,
                    chance,
                });
            }
        }
        let total: f32 = self.chances.iter().sum();
        if total > 100.0 + 1e-3 {
            return Err(DataError::TableOverflow {
                table: table_index,
                total,
            });
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnforceError {
    #[error("not enough coins to enforce the probability")]
    NotEnoughCoins,
}

/// Forward-only walk over the probability tables
#[derive(Debug)]
pub struct EnforcementLadder {
    tables: Vec<ProbabilityTable>,
    index: usize,
}

impl EnforcementLadder {
    pub fn new(tables: Vec<ProbabilityTable>) -> Result<Self, DataError> {
        if tables.is_empty() {
            return Err(DataError::EmptyLadder);
        }
        for (i, table) in tables.iter().enumerate() {
            table.validate(i)?;
        }
        Ok(Self { tables, index: 0 })
    }

    pub fn current(&self) -> &ProbabilityTable {
        &self.tables[self.index]
    }

    /// 1-based level for display
    pub fn level(&self) -> u32 {
        self.index as u32 + 1
    }

    pub fn max_level(&self) -> u32 {
        self.tables.len() as u32
    }

    /// At the last table the advance action is disabled entirely;
    /// callers gate on this before offering it
    pub fn is_maxed(&self) -> bool {
        self.index + 1 == self.tables.len()
    }

    /// Pay the current table's cost and adopt the next table.
    ///
    /// On a refused debit nothing changes.
    ///
    /// # Panics
    /// Panics when called at the final index; callers must check
    /// [`is_maxed`](Self::is_maxed) first.
    pub fn advance(&mut self, ledger: &mut dyn ResourceLedger) -> Result<(), EnforceError> {
        assert!(
            !self.is_maxed(),
            "advance called on a maxed enforcement ladder"
        );

        if !ledger.try_debit_coin(self.current().enforce_cost) {
            return Err(EnforceError::NotEnoughCoins);
        }

        self.index += 1;
        Ok(())
    }

    /// Back to the first table (level reinitialization only)
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
