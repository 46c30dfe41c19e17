//! Unit definitions, the per-grade catalog and runtime unit instances

pub mod pool;

use serde::{Deserialize, Serialize};

use crate::core::error::DataError;
use crate::core::types::{Grade, SkillId, UnitDefId};
use crate::grid::SlotId;

/// Static unit template, loaded once at startup and never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub id: UnitDefId,
    pub name: String,
    pub grade: Grade,
    pub attack: f32,
    pub attack_speed: f32,
    /// Passive skill granted by this unit, if any
    #[serde(default)]
    pub skill: Option<SkillId>,
}

/// All unit definitions, bucketed by grade for uniform in-tier draws
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    by_grade: [Vec<UnitDefinition>; Grade::COUNT],
}

impl UnitCatalog {
    /// Build the catalog, rejecting duplicate ids and empty tiers.
    ///
    /// Every grade must have at least one definition: a weighted draw
    /// can land on any tier, and an empty tier would otherwise surface
    /// mid-game as a draft that cannot complete.
    pub fn new(definitions: Vec<UnitDefinition>) -> Result<Self, DataError> {
        let mut by_grade: [Vec<UnitDefinition>; Grade::COUNT] = Default::default();
        let mut seen = ahash::AHashSet::new();

        for def in definitions {
            if !seen.insert(def.id) {
                return Err(DataError::DuplicateUnitId(def.id));
            }
            by_grade[def.grade.index()].push(def);
        }

        for grade in Grade::ALL {
            if by_grade[grade.index()].is_empty() {
                return Err(DataError::EmptyGradeTier(grade));
            }
        }

        Ok(Self { by_grade })
    }

    /// Definitions of one grade, in load order
    pub fn tier(&self, grade: Grade) -> &[UnitDefinition] {
        &self.by_grade[grade.index()]
    }

    pub fn find(&self, id: UnitDefId) -> Option<&UnitDefinition> {
        self.by_grade.iter().flatten().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.by_grade.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runtime unit instance
///
/// Lives in the [`pool::UnitPool`] arena for the whole process. Between
/// uses it is inactive and owned by the pool; while summoned it is
/// active and occupies at most one cell slot.
#[derive(Debug, Clone, Default)]
pub struct Unit {
    pub definition: UnitDefId,
    pub grade: Grade,
    pub attack: f32,
    pub attack_speed: f32,
    pub skill: Option<SkillId>,
    /// Cell currently occupied, if placed
    pub slot: Option<SlotId>,
    pub(crate) active: bool,
}

impl Unit {
    /// Reset all fields to the template's defaults
    pub(crate) fn reset_from(&mut self, def: &UnitDefinition) {
        self.definition = def.id;
        self.grade = def.grade;
        self.attack = def.attack;
        self.attack_speed = def.attack_speed;
        self.skill = def.skill;
        self.slot = None;
        self.active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: u32, grade: Grade) -> UnitDefinition {
        UnitDefinition {
            id: UnitDefId(id),
            name: format!("unit-{}", id),
            grade,
            attack: 10.0,
            attack_speed: 1.0,
            skill: None,
        }
    }

    fn full_roster() -> Vec<UnitDefinition> {
        vec![
            def(1, Grade::Common),
            def(2, Grade::Common),
            def(3, Grade::Rare),
            def(4, Grade::Heroic),
            def(5, Grade::Legendary),
        ]
    }

    #[test]
    fn test_catalog_buckets_by_grade() {
        let catalog = UnitCatalog::new(full_roster()).unwrap();
        assert_eq!(catalog.tier(Grade::Common).len(), 2);
        assert_eq!(catalog.tier(Grade::Rare).len(), 1);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_catalog_rejects_empty_tier() {
        let defs = vec![def(1, Grade::Common), def(2, Grade::Rare), def(3, Grade::Heroic)];
        match UnitCatalog::new(defs) {
            Err(DataError::EmptyGradeTier(Grade::Legendary)) => {}
            other => panic!("expected empty Legendary tier, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_catalog_rejects_duplicate_id() {
        let mut defs = full_roster();
        defs.push(def(1, Grade::Rare));
        assert!(matches!(
            UnitCatalog::new(defs),
            Err(DataError::DuplicateUnitId(UnitDefId(1)))
        ));
    }
}
