//! Spawn grid - cell slots, deterministic scan order and draw order

pub mod placement;

pub use placement::OccupancyIndex;

use ordered_float::OrderedFloat;

use crate::core::types::CellPos;
use crate::units::pool::UnitHandle;

/// Index of a cell in the board's fixed scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single grid position hosting at most one active unit
#[derive(Debug, Clone)]
pub struct CellSlot {
    pos: CellPos,
    draw_order: i32,
    occupant: Option<UnitHandle>,
}

impl CellSlot {
    fn new(pos: CellPos) -> Self {
        Self {
            pos,
            draw_order: 0,
            occupant: None,
        }
    }

    pub fn pos(&self) -> CellPos {
        self.pos
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    pub fn occupant(&self) -> Option<UnitHandle> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Whether this slot will take the unit. The acceptance rule is the
    /// slot's own: the base rule is plain vacancy.
    pub fn accepts(&self, _unit: UnitHandle) -> bool {
        self.occupant.is_none()
    }

    pub fn vacate(&mut self) -> Option<UnitHandle> {
        self.occupant.take()
    }
}

/// All cell slots of the level, held in fixed scan order
///
/// Scan order is established once from the raw level geometry: rows by
/// descending y, then ascending x within a row. Placement fallback and
/// draw-order assignment both walk this order.
#[derive(Debug)]
pub struct SlotBoard {
    slots: Vec<CellSlot>,
    draw_order_offset: i32,
    draw_order_step: i32,
}

impl SlotBoard {
    /// Build the board from the unordered raw positions supplied by the
    /// level-geometry source. The input is authoritative; nothing is
    /// deduplicated or filtered here.
    pub fn from_positions(
        positions: impl IntoIterator<Item = CellPos>,
        draw_order_offset: i32,
        draw_order_step: i32,
    ) -> Self {
        let mut board = Self {
            slots: positions.into_iter().map(CellSlot::new).collect(),
            draw_order_offset,
            draw_order_step,
        };
        board.resort();
        board
    }

    /// Re-sort the slots into scan order and reassign draw order.
    ///
    /// Only valid while the board is empty: a [`SlotId`] is an index
    /// into the scan order, so reordering occupied slots would leave
    /// every handed-out id pointing at the wrong cell.
    pub fn resort(&mut self) {
        assert!(
            self.slots.iter().all(|s| s.occupant.is_none()),
            "resort on an occupied board would invalidate slot ids"
        );
        self.slots.sort_by(|a, b| {
            OrderedFloat(b.pos.y)
                .cmp(&OrderedFloat(a.pos.y))
                .then(OrderedFloat(a.pos.x).cmp(&OrderedFloat(b.pos.x)))
        });
        self.assign_draw_order();
    }

    /// Walk the scan order assigning monotonically increasing sort keys
    /// so units layer front-to-back consistently
    pub fn assign_draw_order(&mut self) {
        let mut order = self.draw_order_offset;
        for slot in &mut self.slots {
            slot.draw_order = order;
            order += self.draw_order_step;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, id: SlotId) -> &CellSlot {
        &self.slots[id.0]
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut CellSlot {
        &mut self.slots[id.0]
    }

    /// Slots in scan order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &CellSlot)> {
        self.slots.iter().enumerate().map(|(i, s)| (SlotId(i), s))
    }

    pub(crate) fn occupy(&mut self, id: SlotId, unit: UnitHandle) {
        debug_assert!(self.slots[id.0].occupant.is_none(), "slot already occupied");
        self.slots[id.0].occupant = Some(unit);
    }

    /// Vacate every slot (level reinitialization)
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.occupant = None;
        }
    }
}
