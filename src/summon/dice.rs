//! Dice - the randomness seam for summon and proc rolls
//!
//! Production code wraps any `rand::Rng`; tests script exact rolls so
//! boundary cases are reachable deterministically.

use std::collections::VecDeque;

use rand::Rng;

use crate::core::types::Percent;

/// Source of the two draw shapes the summon systems need
pub trait Dice {
    /// Uniform roll in [0, 100)
    fn percent(&mut self) -> Percent;

    /// Uniform index in [0, len); `len` must be positive
    fn pick(&mut self, len: usize) -> usize;
}

/// Dice backed by a real RNG
#[derive(Debug)]
pub struct StandardDice<R: Rng> {
    rng: R,
}

impl<R: Rng> StandardDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Dice for StandardDice<R> {
    fn percent(&mut self) -> Percent {
        self.rng.gen::<f32>() * 100.0
    }

    fn pick(&mut self, len: usize) -> usize {
        assert!(len > 0, "pick from an empty range");
        self.rng.gen_range(0..len)
    }
}

/// Dice that replay queued rolls, for tests
///
/// Panics when a queue runs dry: a test that rolls more than it
/// scripted is wrong.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    percents: VecDeque<Percent>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_percents(percents: impl IntoIterator<Item = Percent>) -> Self {
        Self {
            percents: percents.into_iter().collect(),
            picks: VecDeque::new(),
        }
    }

    pub fn queue_percent(&mut self, roll: Percent) -> &mut Self {
        self.percents.push_back(roll);
        self
    }

    pub fn queue_pick(&mut self, index: usize) -> &mut Self {
        self.picks.push_back(index);
        self
    }
}

impl Dice for ScriptedDice {
    fn percent(&mut self) -> Percent {
        self.percents
            .pop_front()
            .expect("scripted dice ran out of percent rolls")
    }

    fn pick(&mut self, len: usize) -> usize {
        assert!(len > 0, "pick from an empty range");
        match self.picks.pop_front() {
            Some(index) => {
                assert!(index < len, "scripted pick {} out of range {}", index, len);
                index
            }
            // Unscripted picks default to the first entry
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_standard_percent_in_range() {
        let mut dice = StandardDice::new(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..1000 {
            let roll = dice.percent();
            assert!((0.0..100.0).contains(&roll));
        }
    }

    #[test]
    fn test_standard_pick_in_range() {
        let mut dice = StandardDice::new(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..1000 {
            assert!(dice.pick(5) < 5);
        }
    }

    #[test]
    fn test_scripted_replay_order() {
        let mut dice = ScriptedDice::with_percents([5.0, 95.0]);
        dice.queue_pick(2);
        assert_eq!(dice.percent(), 5.0);
        assert_eq!(dice.percent(), 95.0);
        assert_eq!(dice.pick(3), 2);
        assert_eq!(dice.pick(3), 0);
    }
}
