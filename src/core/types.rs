//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Percentage in [0, 100]
pub type Percent = f32;

/// Unique identifier for unit definitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitDefId(pub u32);

/// Unique identifier for passive skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(pub u32);

/// Rarity tier of a unit definition
///
/// Per-tier tables are fixed-size arrays indexed by `Grade::index()`,
/// so the tier count is enforced at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Common,
    Rare,
    Heroic,
    Legendary,
}

impl Grade {
    pub const COUNT: usize = 4;

    pub const ALL: [Grade; Grade::COUNT] =
        [Grade::Common, Grade::Rare, Grade::Heroic, Grade::Legendary];

    /// Index into per-tier arrays, aligned with enumeration order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Grade> {
        Grade::ALL.get(index).copied()
    }
}

impl Default for Grade {
    fn default() -> Self {
        Grade::Common
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Grade::Common => "Common",
            Grade::Rare => "Rare",
            Grade::Heroic => "Heroic",
            Grade::Legendary => "Legendary",
        };
        write!(f, "{}", name)
    }
}

/// World-space position of a spawn cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CellPos {
    pub x: f32,
    pub y: f32,
}

impl CellPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_index_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(Grade::from_index(grade.index()), Some(grade));
        }
        assert_eq!(Grade::from_index(Grade::COUNT), None);
    }

    #[test]
    fn test_grade_enumeration_order() {
        // Weighted draws walk grades in this order, lowest tier first
        assert_eq!(Grade::Common.index(), 0);
        assert_eq!(Grade::Rare.index(), 1);
        assert_eq!(Grade::Heroic.index(), 2);
        assert_eq!(Grade::Legendary.index(), 3);
    }

    #[test]
    fn test_unit_def_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<UnitDefId, &str> = HashMap::new();
        map.insert(UnitDefId(7), "archer");
        assert_eq!(map.get(&UnitDefId(7)), Some(&"archer"));
    }
}
