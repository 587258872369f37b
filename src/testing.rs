//! Repeatable random inputs for tests.
use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    7, 3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9, 3, 2, 3, 8, 4, 6, 2, 6, 4, 3, 3, 8, 3, 2, 7, 9,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator,
/// uniform on `[0, 1)` for floats
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}
