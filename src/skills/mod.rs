//! Passive-skill records and the effect compiler
//!
//! Declarative skill records are compiled once at startup into four
//! typed tables keyed by skill id, one per effect category. Effects are
//! plain-data variants dispatched by `match`; the constants a proc
//! needs are captured as fields at compile time.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::DataError;
use crate::core::types::{Percent, SkillId};
use crate::economy::{ResourceKind, ResourceLedger};
use crate::summon::dice::Dice;

/// Whether a skill helps its owner or hurts its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Buff,
    Debuff,
}

/// What a skill does. The set is closed: compilation partitions it
/// exhaustively into the four effect tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillEffectType {
    AtkValue,
    AtkSpeedValue,
    AtkRate,
    AtkSpeedRate,
    AcquireCoin,
    AcquireGem,
    SpeedValue,
    SpeedRate,
}

/// Static declarative skill definition, loaded once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: SkillId,
    pub skill_type: SkillType,
    pub effect: SkillEffectType,
    pub magnitude: f32,
    /// Seconds a timed effect lasts; unused by stat and resource effects
    #[serde(default)]
    pub duration: f32,
    /// Proc chance in percent; unused by always-on stat effects
    #[serde(default = "default_chance")]
    pub chance: Percent,
}

fn default_chance() -> Percent {
    100.0
}

/// Flat stat adjustment; the slot the effect does not touch stays 0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatDelta {
    pub attack: f32,
    pub attack_speed: f32,
}

/// Multiplicative stat adjustment in percent; 0 means "no change"
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatMultiplier {
    pub attack_rate: f32,
    pub attack_speed_rate: f32,
}

/// On-attack chance to be granted a resource
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceProc {
    pub resource: ResourceKind,
    pub amount: u32,
    pub chance: Percent,
}

/// Form of a movement-speed debuff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebuffKind {
    SpeedValue,
    SpeedRate,
}

/// On-attack debuff applied to the struck enemy
///
/// The proc decision belongs to the target: magnitude, duration and
/// chance are handed over as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDebuffProc {
    pub kind: DebuffKind,
    pub magnitude: f32,
    pub duration: f32,
    pub chance: Percent,
}

/// Movement-speed-reduction capability of an enemy
pub trait SpeedDebuffTarget {
    fn apply_speed_reduction(&mut self, amount: f32, duration: f32, chance: Percent);
    fn apply_speed_reduction_rate(&mut self, rate: f32, duration: f32, chance: Percent);
}

/// The four compiled effect tables
///
/// Stateless after construction; compiling the same records twice
/// yields identical tables.
#[derive(Debug, Default)]
pub struct SkillBook {
    records: AHashMap<SkillId, SkillRecord>,
    stat_values: AHashMap<SkillId, StatDelta>,
    stat_rates: AHashMap<SkillId, StatMultiplier>,
    resource_procs: AHashMap<SkillId, ResourceProc>,
    target_procs: AHashMap<SkillId, TargetDebuffProc>,
}

impl SkillBook {
    /// Partition the records into the four tables. Exactly one table
    /// receives each record; duplicate ids are rejected.
    pub fn compile(records: &[SkillRecord]) -> Result<Self, DataError> {
        let mut book = SkillBook::default();

        for record in records {
            if book.records.contains_key(&record.id) {
                return Err(DataError::DuplicateSkillId(record.id));
            }
            if !record.chance.is_finite() || !(0.0..=100.0).contains(&record.chance) {
                return Err(DataError::BadSkillChance {
                    id: record.id,
                    field: "chance",
                    value: record.chance,
                });
            }
            if !record.magnitude.is_finite() {
                return Err(DataError::BadSkillMagnitude {
                    id: record.id,
                    value: record.magnitude,
                });
            }
            // A negative grant would truncate to a zero-amount proc
            // that fires and credits nothing; reject it up front
            if matches!(
                record.effect,
                SkillEffectType::AcquireCoin | SkillEffectType::AcquireGem
            ) && record.magnitude < 0.0
            {
                return Err(DataError::BadSkillMagnitude {
                    id: record.id,
                    value: record.magnitude,
                });
            }
            book.records.insert(record.id, record.clone());

            // Buff keeps the magnitude positive, Debuff flips it
            let signed = match record.skill_type {
                SkillType::Buff => record.magnitude,
                SkillType::Debuff => -record.magnitude,
            };

            match record.effect {
                SkillEffectType::AtkValue => {
                    book.stat_values.insert(
                        record.id,
                        StatDelta {
                            attack: signed,
                            attack_speed: 0.0,
                        },
                    );
                }
                SkillEffectType::AtkSpeedValue => {
                    book.stat_values.insert(
                        record.id,
                        StatDelta {
                            attack: 0.0,
                            attack_speed: signed,
                        },
                    );
                }
                SkillEffectType::AtkRate => {
                    book.stat_rates.insert(
                        record.id,
                        StatMultiplier {
                            attack_rate: signed,
                            attack_speed_rate: 0.0,
                        },
                    );
                }
                SkillEffectType::AtkSpeedRate => {
                    book.stat_rates.insert(
                        record.id,
                        StatMultiplier {
                            attack_rate: 0.0,
                            attack_speed_rate: signed,
                        },
                    );
                }
                SkillEffectType::AcquireCoin => {
                    book.resource_procs.insert(
                        record.id,
                        ResourceProc {
                            resource: ResourceKind::Coin,
                            amount: record.magnitude as u32,
                            chance: record.chance,
                        },
                    );
                }
                SkillEffectType::AcquireGem => {
                    book.resource_procs.insert(
                        record.id,
                        ResourceProc {
                            resource: ResourceKind::Gem,
                            amount: record.magnitude as u32,
                            chance: record.chance,
                        },
                    );
                }
                SkillEffectType::SpeedValue => {
                    book.target_procs.insert(
                        record.id,
                        TargetDebuffProc {
                            kind: DebuffKind::SpeedValue,
                            magnitude: record.magnitude,
                            duration: record.duration,
                            chance: record.chance,
                        },
                    );
                }
                SkillEffectType::SpeedRate => {
                    book.target_procs.insert(
                        record.id,
                        TargetDebuffProc {
                            kind: DebuffKind::SpeedRate,
                            magnitude: record.magnitude,
                            duration: record.duration,
                            chance: record.chance,
                        },
                    );
                }
            }
        }

        Ok(book)
    }

    pub fn record(&self, id: SkillId) -> Option<&SkillRecord> {
        self.records.get(&id)
    }

    pub fn stat_value(&self, id: SkillId) -> Option<StatDelta> {
        self.stat_values.get(&id).copied()
    }

    pub fn stat_rate(&self, id: SkillId) -> Option<StatMultiplier> {
        self.stat_rates.get(&id).copied()
    }

    pub fn resource_proc(&self, id: SkillId) -> Option<ResourceProc> {
        self.resource_procs.get(&id).copied()
    }

    pub fn target_proc(&self, id: SkillId) -> Option<TargetDebuffProc> {
        self.target_procs.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fire an on-attack resource proc: roll once, credit the ledger on
    /// success. Returns whether the grant happened; `None` when the id
    /// has no resource proc.
    pub fn fire_resource_proc(
        &self,
        id: SkillId,
        dice: &mut dyn Dice,
        ledger: &mut dyn ResourceLedger,
    ) -> Option<bool> {
        let proc = self.resource_proc(id)?;
        let roll = dice.percent();
        if roll <= proc.chance {
            ledger.credit(proc.resource, proc.amount);
            Some(true)
        } else {
            Some(false)
        }
    }

    /// Fire an on-attack debuff against an enemy. The target owns the
    /// proc decision. Returns whether the id had a target proc.
    pub fn fire_target_proc(&self, id: SkillId, target: &mut dyn SpeedDebuffTarget) -> bool {
        let Some(proc) = self.target_proc(id) else {
            return false;
        };
        match proc.kind {
            DebuffKind::SpeedValue => {
                target.apply_speed_reduction(proc.magnitude, proc.duration, proc.chance)
            }
            DebuffKind::SpeedRate => {
                target.apply_speed_reduction_rate(proc.magnitude, proc.duration, proc.chance)
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, skill_type: SkillType, effect: SkillEffectType, magnitude: f32) -> SkillRecord {
        SkillRecord {
            id: SkillId(id),
            skill_type,
            effect,
            magnitude,
            duration: 2.0,
            chance: 30.0,
        }
    }

    #[test]
    fn test_each_record_lands_in_exactly_one_table() {
        let records = vec![
            record(1, SkillType::Buff, SkillEffectType::AtkValue, 10.0),
            record(2, SkillType::Buff, SkillEffectType::AtkRate, 15.0),
            record(3, SkillType::Buff, SkillEffectType::AcquireCoin, 5.0),
            record(4, SkillType::Debuff, SkillEffectType::SpeedRate, 20.0),
        ];
        let book = SkillBook::compile(&records).unwrap();

        for id in [1, 2, 3, 4].map(SkillId) {
            let hits = [
                book.stat_value(id).is_some(),
                book.stat_rate(id).is_some(),
                book.resource_proc(id).is_some(),
                book.target_proc(id).is_some(),
            ]
            .iter()
            .filter(|&&h| h)
            .count();
            assert_eq!(hits, 1, "{:?} must land in exactly one table", id);
        }
    }

    #[test]
    fn test_debuff_flips_sign() {
        let records = vec![
            record(1, SkillType::Buff, SkillEffectType::AtkValue, 10.0),
            record(2, SkillType::Debuff, SkillEffectType::AtkValue, 10.0),
            record(3, SkillType::Debuff, SkillEffectType::AtkSpeedRate, 25.0),
        ];
        let book = SkillBook::compile(&records).unwrap();

        assert_eq!(book.stat_value(SkillId(1)).unwrap().attack, 10.0);
        assert_eq!(book.stat_value(SkillId(2)).unwrap().attack, -10.0);
        let rate = book.stat_rate(SkillId(3)).unwrap();
        assert_eq!(rate.attack_speed_rate, -25.0);
        assert_eq!(rate.attack_rate, 0.0);
    }

    #[test]
    fn test_untouched_stat_slot_stays_neutral() {
        let records = vec![record(1, SkillType::Buff, SkillEffectType::AtkSpeedValue, 0.4)];
        let book = SkillBook::compile(&records).unwrap();
        let delta = book.stat_value(SkillId(1)).unwrap();
        assert_eq!(delta.attack, 0.0);
        assert_eq!(delta.attack_speed, 0.4);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let records = vec![
            record(1, SkillType::Buff, SkillEffectType::AtkValue, 10.0),
            record(1, SkillType::Buff, SkillEffectType::AtkRate, 10.0),
        ];
        assert!(matches!(
            SkillBook::compile(&records),
            Err(DataError::DuplicateSkillId(SkillId(1)))
        ));
    }

    #[test]
    fn test_out_of_range_chance_rejected() {
        let mut bad = record(1, SkillType::Buff, SkillEffectType::AcquireGem, 1.0);
        bad.chance = 130.0;
        assert!(SkillBook::compile(&[bad]).is_err());
    }

    #[test]
    fn test_negative_resource_grant_rejected() {
        // Would otherwise truncate to a zero-coin grant that still fires
        let bad = record(1, SkillType::Buff, SkillEffectType::AcquireCoin, -5.0);
        assert!(matches!(
            SkillBook::compile(&[bad]),
            Err(DataError::BadSkillMagnitude { id: SkillId(1), .. })
        ));
    }

    #[test]
    fn test_non_finite_magnitude_rejected() {
        let bad = record(1, SkillType::Buff, SkillEffectType::AtkValue, f32::NAN);
        assert!(matches!(
            SkillBook::compile(&[bad]),
            Err(DataError::BadSkillMagnitude { .. })
        ));
    }

    #[test]
    fn test_negative_stat_magnitude_still_compiles() {
        // Stat deltas may legitimately carry a negative base value
        let odd = record(1, SkillType::Buff, SkillEffectType::AtkValue, -3.0);
        let book = SkillBook::compile(&[odd]).unwrap();
        assert_eq!(book.stat_value(SkillId(1)).unwrap().attack, -3.0);
    }
}
