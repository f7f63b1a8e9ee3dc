use rand::{Rng, RngCore};

/// Source of the uniform integers consumed by a draw.
///
/// Every [`RngCore`] is a `RandomSource`, so a seeded
/// `rand::rngs::StdRng` gives reproducible draws.
pub trait RandomSource {
    /// Returns an integer uniformly distributed in `[0, bound)`.
    ///
    /// `bound` is never zero.
    fn below(&mut self, bound: u64) -> u64;
}

impl<R: RngCore> RandomSource for R {
    fn below(&mut self, bound: u64) -> u64 {
        self.gen_range(0..bound)
    }
}
