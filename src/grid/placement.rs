//! Placement engine - occupancy-biased slot search with deterministic fallback

use ahash::AHashMap;

use crate::core::types::UnitDefId;
use crate::grid::{SlotBoard, SlotId};
use crate::units::pool::UnitHandle;

/// Cells previously occupied by each unit definition
///
/// Purely advisory: placement tries these first so duplicates of a unit
/// cluster in the cells that already took them, but always falls back
/// to the full scan when the cached cells reject the unit.
#[derive(Debug, Default)]
pub struct OccupancyIndex {
    by_definition: AHashMap<UnitDefId, Vec<SlotId>>,
}

impl OccupancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful placement. Idempotent: a slot already in the
    /// definition's list is not added again.
    pub fn record(&mut self, def_id: UnitDefId, slot: SlotId) {
        let slots = self.by_definition.entry(def_id).or_default();
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }

    /// Previously-successful slots for a definition, in insertion order
    pub fn preferred(&self, def_id: UnitDefId) -> &[SlotId] {
        self.by_definition
            .get(&def_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.by_definition.clear();
    }
}

/// Find a slot for the unit and occupy it.
///
/// Previously-successful cells for this definition are scanned first in
/// insertion order, then the whole board in fixed scan order. Returns
/// the slot taken, or `None` when no slot accepts the unit; in that
/// case no state has changed and the caller must return the unit to
/// the pool.
///
/// On success the occupancy index is updated and draw order reassigned
/// across the whole board.
pub fn place_unit(
    board: &mut SlotBoard,
    occupancy: &mut OccupancyIndex,
    def_id: UnitDefId,
    unit: UnitHandle,
) -> Option<SlotId> {
    let chosen = find_slot(board, occupancy, def_id, unit)?;

    board.occupy(chosen, unit);
    occupancy.record(def_id, chosen);
    board.assign_draw_order();

    Some(chosen)
}

fn find_slot(
    board: &SlotBoard,
    occupancy: &OccupancyIndex,
    def_id: UnitDefId,
    unit: UnitHandle,
) -> Option<SlotId> {
    for &slot_id in occupancy.preferred(def_id) {
        if board.slot(slot_id).accepts(unit) {
            return Some(slot_id);
        }
    }

    board
        .iter()
        .find(|(_, slot)| slot.accepts(unit))
        .map(|(id, _)| id)
}
