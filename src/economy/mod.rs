//! Resource ledger - coin/gem balances and the summon-cost escalator
//!
//! The summon systems never touch balances directly; they go through the
//! [`ResourceLedger`] contract so the orchestrator can be wired to the
//! real in-game economy or to a test double.

use serde::{Deserialize, Serialize};

/// Kind of spendable resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Coin,
    Gem,
}

/// Debit/credit contract with the game economy
pub trait ResourceLedger {
    /// Deduct coins; returns false and leaves the balance untouched
    /// when funds are insufficient
    fn try_debit_coin(&mut self, amount: u32) -> bool;

    /// Deduct gems; returns false and leaves the balance untouched
    /// when funds are insufficient
    fn try_debit_gem(&mut self, amount: u32) -> bool;

    fn credit_coin(&mut self, amount: u32);

    fn credit_gem(&mut self, amount: u32);

    fn credit(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Coin => self.credit_coin(amount),
            ResourceKind::Gem => self.credit_gem(amount),
        }
    }

    /// Coin cost of the next normal summon
    fn summon_coin_cost(&self) -> u32;

    /// Raise the cost of the next normal summon; called once per
    /// successful placed normal summon
    fn escalate_summon_coin_cost(&mut self);
}

/// Concrete ledger with the live game's linear cost escalation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InGameLedger {
    coins: u32,
    gems: u32,
    summon_coin_cost: u32,
    cost_step: u32,
}

impl InGameLedger {
    pub fn new(coins: u32, gems: u32, initial_summon_cost: u32, cost_step: u32) -> Self {
        Self {
            coins,
            gems,
            summon_coin_cost: initial_summon_cost,
            cost_step,
        }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn gems(&self) -> u32 {
        self.gems
    }
}

impl ResourceLedger for InGameLedger {
    fn try_debit_coin(&mut self, amount: u32) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    fn try_debit_gem(&mut self, amount: u32) -> bool {
        if self.gems < amount {
            return false;
        }
        self.gems -= amount;
        true
    }

    fn credit_coin(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    fn credit_gem(&mut self, amount: u32) {
        self.gems = self.gems.saturating_add(amount);
    }

    fn summon_coin_cost(&self) -> u32 {
        self.summon_coin_cost
    }

    fn escalate_summon_coin_cost(&mut self) {
        self.summon_coin_cost += self.cost_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_refused_leaves_balance() {
        let mut ledger = InGameLedger::new(10, 0, 20, 2);
        assert!(!ledger.try_debit_coin(20));
        assert_eq!(ledger.coins(), 10);

        assert!(ledger.try_debit_coin(10));
        assert_eq!(ledger.coins(), 0);
    }

    #[test]
    fn test_gem_debit_independent_of_coins() {
        let mut ledger = InGameLedger::new(0, 5, 20, 2);
        assert!(ledger.try_debit_gem(3));
        assert_eq!(ledger.gems(), 2);
        assert!(!ledger.try_debit_gem(3));
        assert_eq!(ledger.gems(), 2);
    }

    #[test]
    fn test_cost_escalation_is_linear() {
        let mut ledger = InGameLedger::new(1000, 0, 20, 2);
        assert_eq!(ledger.summon_coin_cost(), 20);
        ledger.escalate_summon_coin_cost();
        ledger.escalate_summon_coin_cost();
        assert_eq!(ledger.summon_coin_cost(), 24);
    }

    #[test]
    fn test_credit_by_kind() {
        let mut ledger = InGameLedger::new(0, 0, 20, 2);
        ledger.credit(ResourceKind::Coin, 7);
        ledger.credit(ResourceKind::Gem, 3);
        assert_eq!(ledger.coins(), 7);
        assert_eq!(ledger.gems(), 3);
    }
}
