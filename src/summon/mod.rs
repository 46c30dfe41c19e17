//! Summon orchestrator
//!
//! Sequences a summon request end to end: roster guard, payment, draft,
//! pool acquire, placement and bookkeeping. Collaborators (resource
//! ledger, presentation sink) are injected at construction; randomness
//! comes in per call through the [`dice::Dice`] seam.

pub mod dice;
pub mod drafter;
pub mod ladder;

pub use dice::{Dice, ScriptedDice, StandardDice};
pub use drafter::DraftError;
pub use ladder::{EnforceError, EnforcementLadder, ProbabilityTable};

use thiserror::Error;

use crate::core::config::SummonConfig;
use crate::core::error::DataError;
use crate::core::types::{CellPos, Grade, Percent, UnitDefId};
use crate::economy::ResourceLedger;
use crate::grid::placement::{place_unit, OccupancyIndex};
use crate::grid::{SlotBoard, SlotId};
use crate::presentation::PresentationSink;
use crate::units::pool::{UnitHandle, UnitPool};
use crate::units::UnitCatalog;

/// A standing lucky-summon offer: an explicit grade and success chance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuckyOffer {
    pub grade: Grade,
    pub chance: Percent,
}

impl LuckyOffer {
    /// Arbitrary offer. The standing offers below are the normal entry
    /// points; a `Common` offer has no gem cost and a paid summon with
    /// one panics in the cost lookup.
    pub fn new(grade: Grade, chance: Percent) -> Self {
        Self { grade, chance }
    }

    pub fn rare(config: &SummonConfig) -> Self {
        Self::new(Grade::Rare, config.rare_lucky_chance)
    }

    pub fn heroic(config: &SummonConfig) -> Self {
        Self::new(Grade::Heroic, config.heroic_lucky_chance)
    }

    pub fn legendary(config: &SummonConfig) -> Self {
        Self::new(Grade::Legendary, config.legendary_lucky_chance)
    }
}

/// How a summon draws its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummonMode {
    /// Weighted draw against the active enforcement-ladder table
    Normal,
    /// Explicit grade and success chance; a miss keeps the cost
    Lucky(LuckyOffer),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummonRequest {
    pub mode: SummonMode,
    /// When false, the drafted unit is returned without placement,
    /// count or cost-escalation bookkeeping (preview flows); the caller
    /// owns releasing it back to the pool
    pub place_in_cell: bool,
    /// When false, no resources are debited at all (reward flows)
    pub spend_resources: bool,
}

impl SummonRequest {
    pub fn normal() -> Self {
        Self {
            mode: SummonMode::Normal,
            place_in_cell: true,
            spend_resources: true,
        }
    }

    pub fn lucky(offer: LuckyOffer) -> Self {
        Self {
            mode: SummonMode::Lucky(offer),
            place_in_cell: true,
            spend_resources: true,
        }
    }

    pub fn free(mode: SummonMode) -> Self {
        Self {
            mode,
            place_in_cell: true,
            spend_resources: false,
        }
    }

    pub fn preview(mode: SummonMode) -> Self {
        Self {
            mode,
            place_in_cell: false,
            spend_resources: true,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SummonError {
    #[error("unit roster is full")]
    RosterFull,

    #[error("not enough coins")]
    NotEnoughCoins,

    #[error("not enough gems")]
    NotEnoughGems,

    /// The gamble missed; the cost is intentionally not refunded
    #[error("lucky summon missed")]
    LuckyMiss,

    #[error("no cell available")]
    NoCellAvailable,

    #[error("unit pool exhausted")]
    PoolExhausted,

    /// Data-level draft failure, kept distinct from gameplay failures
    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// A completed summon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummonOutcome {
    pub unit: UnitHandle,
    pub definition: UnitDefId,
    pub grade: Grade,
    /// `None` for preview summons
    pub slot: Option<SlotId>,
}

/// Top-level summon state: board, pool, ladder, occupancy history and
/// the injected collaborators
pub struct Summoner<L: ResourceLedger, S: PresentationSink> {
    config: SummonConfig,
    catalog: UnitCatalog,
    pool: UnitPool,
    board: SlotBoard,
    occupancy: OccupancyIndex,
    ladder: EnforcementLadder,
    ledger: L,
    sink: S,
    active_count: u32,
}

impl<L: ResourceLedger, S: PresentationSink> Summoner<L, S> {
    /// Wire up a summoner for a level. `positions` is the raw cell
    /// geometry from the level source; order does not matter.
    ///
    /// Publishes the initial unit count, probability table and lucky
    /// offers through the sink.
    pub fn new(
        config: SummonConfig,
        catalog: UnitCatalog,
        ladder: EnforcementLadder,
        positions: impl IntoIterator<Item = CellPos>,
        ledger: L,
        mut sink: S,
    ) -> Result<Self, DataError> {
        config.validate()?;

        let board = SlotBoard::from_positions(
            positions,
            config.draw_order_offset,
            config.draw_order_step,
        );
        let pool = UnitPool::new(config.pool_capacity);

        sink.report_unit_count(0, config.max_roster);
        sink.report_probability_table(ladder.level(), ladder.max_level(), ladder.current());
        let offers = [
            (Grade::Rare, config.rare_lucky_chance, config.rare_gem_cost),
            (
                Grade::Heroic,
                config.heroic_lucky_chance,
                config.heroic_gem_cost,
            ),
            (
                Grade::Legendary,
                config.legendary_lucky_chance,
                config.legendary_gem_cost,
            ),
        ];
        sink.report_lucky_gem_costs(&offers);

        Ok(Self {
            config,
            catalog,
            pool,
            board,
            occupancy: OccupancyIndex::new(),
            ladder,
            ledger,
            sink,
            active_count: 0,
        })
    }

    /// Run one summon request to completion
    pub fn summon(
        &mut self,
        request: SummonRequest,
        dice: &mut dyn Dice,
    ) -> Result<SummonOutcome, SummonError> {
        if self.active_count >= self.config.max_roster {
            return Err(self.fail("Unit roster is full.", SummonError::RosterFull));
        }

        if request.spend_resources {
            self.pay(&request.mode)?;
        }

        let grade = match request.mode {
            SummonMode::Normal => {
                match drafter::draft_grade(self.ladder.current(), dice.percent()) {
                    Ok(grade) => grade,
                    Err(err) => {
                        // Corrupt table data, not a gameplay outcome
                        tracing::error!("weighted draft failed: {}", err);
                        return Err(SummonError::Draft(err));
                    }
                }
            }
            SummonMode::Lucky(offer) => {
                let roll = dice.percent();
                if offer.chance < roll {
                    return Err(self.fail("Lucky summon failed.....", SummonError::LuckyMiss));
                }
                offer.grade
            }
        };

        let def = drafter::draft_definition(&self.catalog, grade, dice);
        let def_id = def.id;

        let Some(handle) = self.pool.acquire(def) else {
            return Err(self.fail("No free unit slot in the pool.", SummonError::PoolExhausted));
        };

        if !request.place_in_cell {
            tracing::debug!(?def_id, %grade, "drafted preview unit");
            return Ok(SummonOutcome {
                unit: handle,
                definition: def_id,
                grade,
                slot: None,
            });
        }

        let Some(slot) = place_unit(&mut self.board, &mut self.occupancy, def_id, handle) else {
            self.pool.release(handle);
            return Err(self.fail(
                "There is no cell available to place a unit.",
                SummonError::NoCellAvailable,
            ));
        };

        if let Some(unit) = self.pool.get_mut(handle) {
            unit.slot = Some(slot);
        }

        self.active_count += 1;
        self.sink
            .report_unit_count(self.active_count, self.config.max_roster);

        if request.mode == SummonMode::Normal && request.spend_resources {
            self.ledger.escalate_summon_coin_cost();
        }

        let message = match request.mode {
            SummonMode::Lucky(_) => {
                format!("Lucky summon success! You've summoned a {} unit!", grade)
            }
            SummonMode::Normal => format!(
                "With a {}% chance, summoned a {} unit!",
                self.ladder.current().chance(grade),
                grade
            ),
        };
        self.sink.report_message(&message);

        tracing::debug!(
            ?def_id,
            %grade,
            slot = slot.index(),
            roster = self.active_count,
            "summoned unit"
        );

        Ok(SummonOutcome {
            unit: handle,
            definition: def_id,
            grade,
            slot: Some(slot),
        })
    }

    fn pay(&mut self, mode: &SummonMode) -> Result<(), SummonError> {
        match mode {
            SummonMode::Normal => {
                let cost = self.ledger.summon_coin_cost();
                if !self.ledger.try_debit_coin(cost) {
                    return Err(self.fail(
                        "Not enough coins to summon a unit.",
                        SummonError::NotEnoughCoins,
                    ));
                }
            }
            SummonMode::Lucky(offer) => {
                let cost = self.config.lucky_gem_cost(offer.grade);
                if !self.ledger.try_debit_gem(cost) {
                    return Err(self.fail(
                        "Not enough gems to summon a unit.",
                        SummonError::NotEnoughGems,
                    ));
                }
            }
        }
        Ok(())
    }

    fn fail(&mut self, message: &str, err: SummonError) -> SummonError {
        self.sink.report_message(message);
        self.sink.report_failure_sound();
        err
    }

    /// Pay the current table's cost and adopt the next one.
    ///
    /// Callers must gate on [`ladder`](Self::ladder)'s `is_maxed`; at
    /// the final level the action is disabled, not failing.
    pub fn enforce_probability(&mut self) -> Result<(), EnforceError> {
        match self.ladder.advance(&mut self.ledger) {
            Ok(()) => {
                self.sink.report_probability_table(
                    self.ladder.level(),
                    self.ladder.max_level(),
                    self.ladder.current(),
                );
                Ok(())
            }
            Err(err) => {
                self.sink
                    .report_message("Not enough coins to enforce the probability.");
                self.sink.report_failure_sound();
                Err(err)
            }
        }
    }

    /// Return a unit to the pool, vacating its slot if it holds one.
    /// Used for preview units and for the unit destruction path; the
    /// roster counter is adjusted separately via [`remove_units`](Self::remove_units).
    pub fn release_unit(&mut self, handle: UnitHandle) {
        if let Some(slot) = self.pool.get(handle).and_then(|u| u.slot) {
            self.board.slot_mut(slot).vacate();
        }
        self.pool.release(handle);
    }

    /// Drop `count` units from the roster counter and republish it
    pub fn remove_units(&mut self, count: u32) {
        self.active_count = self.active_count.saturating_sub(count);
        self.sink
            .report_unit_count(self.active_count, self.config.max_roster);
    }

    /// Level reinitialization: pristine pool, empty board and history,
    /// ladder back to the first table
    pub fn reset_for_level(&mut self) {
        self.pool.reset();
        self.board.clear();
        self.occupancy.clear();
        self.ladder.reset();
        self.active_count = 0;

        self.sink.report_unit_count(0, self.config.max_roster);
        self.sink.report_probability_table(
            self.ladder.level(),
            self.ladder.max_level(),
            self.ladder.current(),
        );
    }

    pub fn active_count(&self) -> u32 {
        self.active_count
    }

    pub fn config(&self) -> &SummonConfig {
        &self.config
    }

    pub fn ladder(&self) -> &EnforcementLadder {
        &self.ladder
    }

    pub fn board(&self) -> &SlotBoard {
        &self.board
    }

    pub fn pool(&self) -> &UnitPool {
        &self.pool
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
