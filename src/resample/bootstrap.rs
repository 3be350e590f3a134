use rand::Rng;

use super::Re;
use crate::Sample;

/// Draws `data.len()` elements uniformly at random, with replacement, from
/// `data`, using the injected random source.
///
/// An empty input yields an empty resample without touching the generator
/// (a uniform draw over an empty range is undefined).
pub fn sample_with_replacement<T, R>(data: &[T], rng: &mut R) -> Vec<T>
where
    T: Copy,
    R: Rng + ?Sized,
{
    let n = data.len();
    let mut resample = Vec::with_capacity(n);
    if n == 0 {
        return resample;
    }

    resample.extend((0..n).map(|_| data[rng.gen_range(0..n)]));
    resample
}

/// Efron's nonparametric bootstrap: resamples observations uniformly with
/// replacement.
///
/// The resampler owns its random source and clones it into each stream it
/// builds, so the same `Bootstrap` value always replays the same resamples.
/// Inject a seeded generator for reproducible runs, or a thread-local
/// entropy generator in production.
#[derive(Clone, Copy, Default)]
pub struct Bootstrap<R: Rng> {
    /// Injected random source.
    pub rng: R,
}

impl<R: Rng> Bootstrap<R> {
    /// Creates a resampler around an injected random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<T: Copy, R: Rng + Clone> Re<Sample<T>> for Bootstrap<R> {
    type Item = Sample<T>;

    fn re(&self, sample: &Sample<T>) -> impl Iterator<Item = Self::Item> {
        BootstrapIter {
            data: &sample.data,
            rng: self.rng.clone(),
        }
    }
}

/// Joint form for two-group tests: every step draws a resample of the first
/// sample, then of the second, sequentially from the one stream. The two
/// draws are independent; the stream is consumed, never reused.
impl<T: Copy, R: Rng + Clone> Re<(Sample<T>, Sample<T>)> for Bootstrap<R> {
    type Item = (Sample<T>, Sample<T>);

    fn re(&self, pair: &(Sample<T>, Sample<T>)) -> impl Iterator<Item = Self::Item> {
        BootstrapPairIter {
            x: &pair.0.data,
            y: &pair.1.data,
            rng: self.rng.clone(),
        }
    }
}

struct BootstrapIter<'a, T, R> {
    data: &'a [T],
    rng: R,
}

impl<T: Copy, R: Rng> Iterator for BootstrapIter<'_, T, R> {
    type Item = Sample<T>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(Sample::new(sample_with_replacement(self.data, &mut self.rng)))
    }
}

struct BootstrapPairIter<'a, T, R> {
    x: &'a [T],
    y: &'a [T],
    rng: R,
}

impl<T: Copy, R: Rng> Iterator for BootstrapPairIter<'_, T, R> {
    type Item = (Sample<T>, Sample<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let bx = Sample::new(sample_with_replacement(self.x, &mut self.rng));
        let by = Sample::new(sample_with_replacement(self.y, &mut self.rng));
        Some((bx, by))
    }
}

/// SplitMix64 stream derivation (Steele et al. 2014, and the seeding routine
/// recommended by the xoshiro authors): maps one base draw plus a simulation
/// index to a well-mixed per-simulation seed, so parallel workers get
/// independent streams without sharing generator state.
#[cfg(feature = "rayon")]
pub(crate) fn stream_seed(base: u64, stream: u64) -> u64 {
    let mut z = base.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
