use crate::common::DSize;

/// Entropy source for the executor.
///
/// Blanket-implemented for every [`rand::Rng`], so `thread_rng()` works for
/// production and a seeded `rand_chacha` generator reproduces rolls exactly.
pub trait Roller {
    /// Uniform draw over `[1, sides]`. `sides` is always at least 1.
    fn roll(&mut self, sides: DSize) -> DSize;
}

impl<R: rand::Rng> Roller for R {
    fn roll(&mut self, sides: DSize) -> DSize {
        self.gen_range(1..=sides)
    }
}

#[cfg(test)]
pub(crate) use test_rollers::{SeqRoller, StepRoller};
