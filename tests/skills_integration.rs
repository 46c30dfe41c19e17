//! Integration tests for skill compilation and proc firing

use lucky_bastion::core::types::{Percent, SkillId};
use lucky_bastion::economy::{InGameLedger, ResourceKind};
use lucky_bastion::skills::{
    DebuffKind, SkillBook, SkillEffectType, SkillRecord, SkillType, SpeedDebuffTarget,
};
use lucky_bastion::summon::ScriptedDice;

fn record(
    id: u32,
    skill_type: SkillType,
    effect: SkillEffectType,
    magnitude: f32,
    chance: Percent,
) -> SkillRecord {
    SkillRecord {
        id: SkillId(id),
        skill_type,
        effect,
        magnitude,
        duration: 2.5,
        chance,
    }
}

fn mixed_records() -> Vec<SkillRecord> {
    vec![
        record(1, SkillType::Buff, SkillEffectType::AtkValue, 5.0, 100.0),
        record(2, SkillType::Debuff, SkillEffectType::AtkSpeedValue, 0.3, 100.0),
        record(3, SkillType::Buff, SkillEffectType::AtkRate, 15.0, 100.0),
        record(4, SkillType::Debuff, SkillEffectType::AtkSpeedRate, 20.0, 100.0),
        record(5, SkillType::Buff, SkillEffectType::AcquireCoin, 3.0, 10.0),
        record(6, SkillType::Buff, SkillEffectType::AcquireGem, 1.0, 3.0),
        record(7, SkillType::Debuff, SkillEffectType::SpeedValue, 0.8, 25.0),
        record(8, SkillType::Debuff, SkillEffectType::SpeedRate, 30.0, 20.0),
    ]
}

// ============================================================================
// Compilation partitioning
// ============================================================================

#[test]
fn test_full_record_list_partitions_into_four_tables() {
    let book = SkillBook::compile(&mixed_records()).unwrap();

    assert_eq!(book.len(), 8);
    assert!(book.stat_value(SkillId(1)).is_some());
    assert!(book.stat_value(SkillId(2)).is_some());
    assert!(book.stat_rate(SkillId(3)).is_some());
    assert!(book.stat_rate(SkillId(4)).is_some());
    assert!(book.resource_proc(SkillId(5)).is_some());
    assert!(book.resource_proc(SkillId(6)).is_some());
    assert!(book.target_proc(SkillId(7)).is_some());
    assert!(book.target_proc(SkillId(8)).is_some());

    // Every raw record stays reachable by id
    for id in 1..=8 {
        assert!(book.record(SkillId(id)).is_some());
    }
}

#[test]
fn test_buff_and_debuff_signs() {
    let book = SkillBook::compile(&mixed_records()).unwrap();

    assert_eq!(book.stat_value(SkillId(1)).unwrap().attack, 5.0);
    assert_eq!(book.stat_value(SkillId(2)).unwrap().attack_speed, -0.3);
    assert_eq!(book.stat_rate(SkillId(3)).unwrap().attack_rate, 15.0);
    assert_eq!(book.stat_rate(SkillId(4)).unwrap().attack_speed_rate, -20.0);

    // Target debuffs keep the raw magnitude; the reduction direction
    // is the target capability's own semantics
    assert_eq!(book.target_proc(SkillId(7)).unwrap().magnitude, 0.8);
    assert_eq!(book.target_proc(SkillId(8)).unwrap().magnitude, 30.0);
}

/// Compiling the same list twice yields identical tables
#[test]
fn test_compilation_is_idempotent() {
    let records = mixed_records();
    let first = SkillBook::compile(&records).unwrap();
    let second = SkillBook::compile(&records).unwrap();

    assert_eq!(first.len(), second.len());
    for record in &records {
        assert_eq!(first.record(record.id), second.record(record.id));
        assert_eq!(first.stat_value(record.id), second.stat_value(record.id));
        assert_eq!(first.stat_rate(record.id), second.stat_rate(record.id));
        assert_eq!(
            first.resource_proc(record.id),
            second.resource_proc(record.id)
        );
        assert_eq!(
            first.target_proc(record.id),
            second.target_proc(record.id)
        );
    }
}

// ============================================================================
// Resource procs against the ledger
// ============================================================================

#[test]
fn test_coin_proc_credits_on_roll_at_or_under_chance() {
    let book = SkillBook::compile(&mixed_records()).unwrap();
    let mut ledger = InGameLedger::new(0, 0, 20, 2);

    // Chance is 10: a roll exactly on the boundary still fires
    let mut dice = ScriptedDice::with_percents([10.0]);
    let fired = book.fire_resource_proc(SkillId(5), &mut dice, &mut ledger);
    assert_eq!(fired, Some(true));
    assert_eq!(ledger.coins(), 3);
}

#[test]
fn test_coin_proc_misses_on_roll_over_chance() {
    let book = SkillBook::compile(&mixed_records()).unwrap();
    let mut ledger = InGameLedger::new(0, 0, 20, 2);

    let mut dice = ScriptedDice::with_percents([10.1]);
    let fired = book.fire_resource_proc(SkillId(5), &mut dice, &mut ledger);
    assert_eq!(fired, Some(false));
    assert_eq!(ledger.coins(), 0);
}

#[test]
fn test_gem_proc_credits_gems_not_coins() {
    let book = SkillBook::compile(&mixed_records()).unwrap();
    let mut ledger = InGameLedger::new(0, 0, 20, 2);

    let mut dice = ScriptedDice::with_percents([1.0]);
    book.fire_resource_proc(SkillId(6), &mut dice, &mut ledger);
    assert_eq!(ledger.gems(), 1);
    assert_eq!(ledger.coins(), 0);

    assert_eq!(
        book.resource_proc(SkillId(6)).unwrap().resource,
        ResourceKind::Gem
    );
}

#[test]
fn test_non_resource_skill_fires_nothing() {
    let book = SkillBook::compile(&mixed_records()).unwrap();
    let mut ledger = InGameLedger::new(0, 0, 20, 2);
    let mut dice = ScriptedDice::new();

    // Stat skill: no proc, no roll consumed, no credit
    assert_eq!(
        book.fire_resource_proc(SkillId(1), &mut dice, &mut ledger),
        None
    );
    assert_eq!(ledger.coins(), 0);
}

// ============================================================================
// Target debuff delegation
// ============================================================================

#[derive(Debug, Default)]
struct RecordingEnemy {
    value_calls: Vec<(f32, f32, Percent)>,
    rate_calls: Vec<(f32, f32, Percent)>,
}

impl SpeedDebuffTarget for RecordingEnemy {
    fn apply_speed_reduction(&mut self, amount: f32, duration: f32, chance: Percent) {
        self.value_calls.push((amount, duration, chance));
    }

    fn apply_speed_reduction_rate(&mut self, rate: f32, duration: f32, chance: Percent) {
        self.rate_calls.push((rate, duration, chance));
    }
}

/// The debuff handler hands magnitude, duration and chance to the
/// target unchanged; the proc decision is the target's
#[test]
fn test_target_proc_delegates_with_raw_parameters() {
    let book = SkillBook::compile(&mixed_records()).unwrap();
    let mut enemy = RecordingEnemy::default();

    assert!(book.fire_target_proc(SkillId(7), &mut enemy));
    assert!(book.fire_target_proc(SkillId(8), &mut enemy));

    assert_eq!(enemy.value_calls, vec![(0.8, 2.5, 25.0)]);
    assert_eq!(enemy.rate_calls, vec![(30.0, 2.5, 20.0)]);
}

#[test]
fn test_debuff_kind_routes_to_matching_capability() {
    let book = SkillBook::compile(&mixed_records()).unwrap();

    assert_eq!(
        book.target_proc(SkillId(7)).unwrap().kind,
        DebuffKind::SpeedValue
    );
    assert_eq!(
        book.target_proc(SkillId(8)).unwrap().kind,
        DebuffKind::SpeedRate
    );

    let mut enemy = RecordingEnemy::default();
    book.fire_target_proc(SkillId(7), &mut enemy);
    assert_eq!(enemy.value_calls.len(), 1);
    assert!(enemy.rate_calls.is_empty());
}

#[test]
fn test_stat_skill_is_not_a_target_proc() {
    let book = SkillBook::compile(&mixed_records()).unwrap();
    let mut enemy = RecordingEnemy::default();

    assert!(!book.fire_target_proc(SkillId(3), &mut enemy));
    assert!(enemy.value_calls.is_empty());
    assert!(enemy.rate_calls.is_empty());
}
