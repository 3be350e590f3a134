pub use rand::Rng;

/// Resampling abstraction: turns one dataset into a stream of resampled
/// datasets.
///
/// Implementations own their random source and clone it into the returned
/// iterator, so a resampler value always replays the same stream and the
/// results are a pure function of the input and the injected source.
pub trait Re<T> {
    /// Type of each resample.
    type Item;
    /// Build the (typically infinite) stream of resamples over `t`.
    fn re(&self, t: &T) -> impl Iterator<Item = Self::Item>;
}

mod bootstrap;

pub use bootstrap::{Bootstrap, sample_with_replacement};

#[cfg(feature = "rayon")]
pub(crate) use bootstrap::stream_seed;
