//! Unit pool - free-list arena for summoned unit instances
//!
//! All unit storage is preallocated upfront. Acquire pops an index off
//! the free list and resets that slot from the chosen template; release
//! clears the active flag and pushes the index back. Handles are plain
//! indices, guarded by the active flag against stale access.

use crate::units::{Unit, UnitDefinition};

/// Handle to a unit slot in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitHandle(usize);

impl UnitHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Preallocated arena of reusable unit instances
#[derive(Debug)]
pub struct UnitPool {
    slots: Vec<Unit>,
    free_list: Vec<usize>,
}

impl UnitPool {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "pool capacity must be positive");
        Self {
            slots: vec![Unit::default(); capacity],
            // Pop order matches slot order: index 0 comes out first
            free_list: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Take a unit out of the pool, reset from `def`.
    ///
    /// Returns `None` when every slot is in use.
    pub fn acquire(&mut self, def: &UnitDefinition) -> Option<UnitHandle> {
        let index = self.free_list.pop()?;
        self.slots[index].reset_from(def);
        Some(UnitHandle(index))
    }

    /// Return a unit to the pool, deactivating it.
    ///
    /// Double release is a no-op apart from a debug assertion.
    pub fn release(&mut self, handle: UnitHandle) {
        let unit = &mut self.slots[handle.0];
        debug_assert!(unit.active, "release of an inactive unit handle");
        if !unit.active {
            return;
        }
        unit.active = false;
        unit.slot = None;
        self.free_list.push(handle.0);
    }

    /// Access an active unit; stale handles yield `None`
    pub fn get(&self, handle: UnitHandle) -> Option<&Unit> {
        self.slots.get(handle.0).filter(|u| u.active)
    }

    pub fn get_mut(&mut self, handle: UnitHandle) -> Option<&mut Unit> {
        self.slots.get_mut(handle.0).filter(|u| u.active)
    }

    /// Active units and their handles, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (UnitHandle, &Unit)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, u)| u.active)
            .map(|(i, u)| (UnitHandle(i), u))
    }

    /// Deactivate every unit and rebuild the pristine free list
    pub fn reset(&mut self) {
        for unit in &mut self.slots {
            unit.active = false;
            unit.slot = None;
        }
        self.free_list = (0..self.slots.len()).rev().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Grade, UnitDefId};

    fn def() -> UnitDefinition {
        UnitDefinition {
            id: UnitDefId(9),
            name: "test".into(),
            grade: Grade::Rare,
            attack: 25.0,
            attack_speed: 1.5,
            skill: None,
        }
    }

    #[test]
    fn test_acquire_resets_from_template() {
        let mut pool = UnitPool::new(4);
        let handle = pool.acquire(&def()).unwrap();

        let unit = pool.get(handle).unwrap();
        assert_eq!(unit.definition, UnitDefId(9));
        assert_eq!(unit.grade, Grade::Rare);
        assert_eq!(unit.slot, None);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_release_returns_slot() {
        let mut pool = UnitPool::new(2);
        let a = pool.acquire(&def()).unwrap();
        let b = pool.acquire(&def()).unwrap();
        assert!(pool.acquire(&def()).is_none());

        pool.release(a);
        assert_eq!(pool.active_count(), 1);
        assert!(pool.get(a).is_none());
        assert!(pool.get(b).is_some());

        // Freed slot is reusable
        assert!(pool.acquire(&def()).is_some());
    }

    #[test]
    fn test_stale_handle_after_reset() {
        let mut pool = UnitPool::new(2);
        let handle = pool.acquire(&def()).unwrap();
        pool.reset();
        assert!(pool.get(handle).is_none());
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_reuse_keeps_no_prior_state() {
        let mut pool = UnitPool::new(1);
        let a = pool.acquire(&def()).unwrap();
        pool.get_mut(a).unwrap().attack = 999.0;
        pool.release(a);

        let b = pool.acquire(&def()).unwrap();
        assert_eq!(pool.get(b).unwrap().attack, 25.0);
    }
}
