// Sources of the kitchen's randomness: how long a pizza takes and which
// outcome code it rolls.

use std::collections::VecDeque;

use pizzeria_config::KitchenConfig;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `Dice` supplies the two draws the kitchen makes per pizza.
///
/// Implementations move onto the kitchen thread, hence `Send`.
pub trait Dice: Send {
    /// Number of time units the next pizza takes, within `min..=max`.
    fn delay(&mut self, min: u64, max: u64) -> u64;

    /// Outcome code of the next pizza, within `1..=max`.
    fn outcome_code(&mut self, max: u32) -> u32;
}

/// Uniform draws from any [`rand::Rng`], a seeded `ChaCha8Rng` by default.
pub struct RandomDice<R: Rng + Send = ChaCha8Rng> {
    rng: R,
}

impl RandomDice<ChaCha8Rng> {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().next_u64())
    }

    /// Seeded from [`KitchenConfig::seed`] when one is set, from entropy otherwise.
    #[must_use]
    pub fn from_config(config: &KitchenConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng + Send> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Dice for RandomDice<R> {
    fn delay(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn outcome_code(&mut self, max: u32) -> u32 {
        self.rng.random_range(1..=max.max(1))
    }
}

/// Replays a fixed list of outcome codes and never makes the kitchen wait.
///
/// Once the list runs out every further pizza rolls `max`, which always succeeds
/// for a valid [`KitchenConfig`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    codes: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new<I: IntoIterator<Item = u32>>(codes: I) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.codes.len()
    }
}

impl Dice for ScriptedDice {
    fn delay(&mut self, _min: u64, _max: u64) -> u64 {
        0
    }

    fn outcome_code(&mut self, max: u32) -> u32 {
        self.codes.pop_front().unwrap_or(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_draw_within_configured_ranges() {
        let mut dice = RandomDice::seeded(7);

        for _ in 0..500 {
            let delay = dice.delay(1, 5);
            assert!((1..=5).contains(&delay));

            let code = dice.outcome_code(12);
            assert!((1..=12).contains(&code));
        }
    }

    #[test]
    fn should_repeat_draws_for_the_same_seed() {
        let mut first = RandomDice::seeded(42);
        let mut second = RandomDice::seeded(42);

        let first_draws: Vec<_> = (0..20)
            .map(|_| (first.delay(1, 5), first.outcome_code(12)))
            .collect();
        let second_draws: Vec<_> = (0..20)
            .map(|_| (second.delay(1, 5), second.outcome_code(12)))
            .collect();

        assert_eq!(first_draws, second_draws);
    }

    #[test]
    fn should_collapse_empty_delay_range() {
        let mut dice = RandomDice::seeded(1);
        assert_eq!(dice.delay(3, 3), 3);
    }

    #[test]
    fn should_replay_scripted_codes_then_succeed() {
        let mut dice = ScriptedDice::new([1, 3, 6]);

        assert_eq!(dice.delay(1, 5), 0);
        assert_eq!(dice.outcome_code(12), 1);
        assert_eq!(dice.outcome_code(12), 3);
        assert_eq!(dice.outcome_code(12), 6);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.outcome_code(12), 12);
    }

    #[test]
    fn should_seed_from_config_when_present() {
        let config = KitchenConfig {
            seed: Some(9),
            ..KitchenConfig::default()
        };

        let mut from_config = RandomDice::from_config(&config);
        let mut seeded = RandomDice::seeded(9);

        assert_eq!(from_config.outcome_code(12), seeded.outcome_code(12));
    }
}
