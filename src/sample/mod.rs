use std::iter::Iterator;

use crate::statistics::Statistic;

/// An observed sample: a thin wrapper around raw observations.
///
/// Bootstrap machinery hands these around by reference; resamplers borrow the
/// underlying slice and yield fresh `Sample`s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample<T> {
    /// Raw observations, in insertion order.
    pub data: Vec<T>,
}

impl<T> Sample<T> {
    /// Create a new sample from raw data
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of observations in the sample
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sample contains no observations
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Estimate a statistic from the sample data
    pub fn estimate<Output>(&self, statistic: impl Statistic<Self, Output>) -> Output {
        statistic.compute(self)
    }
}

impl<T> FromIterator<T> for Sample<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sample<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Collects a fixed number of items from a (typically infinite) resample
/// stream into a [`Sample`].
pub trait SamplingIterator: Iterator {
    /// Equivalent to `self.take(n).collect()`.
    fn sample(self, n: usize) -> Sample<Self::Item>
    where
        Self: Sized,
    {
        self.take(n).collect()
    }
}

impl<I: Iterator> SamplingIterator for I {}

impl<T> AsRef<[T]> for Sample<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mean;
    use approx::assert_abs_diff_eq;

    #[test]
    fn collects_from_iterator() {
        let sample: Sample<f64> = (1..=4).map(f64::from).collect();
        assert_eq!(sample.len(), 4);
        assert!(!sample.is_empty());
        assert_eq!(sample.as_ref(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn estimates_statistics_in_place() {
        let sample = Sample::new(vec![2.0_f64, 4.0, 6.0]);
        assert_abs_diff_eq!(sample.estimate(Mean), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn sampling_iterator_truncates() {
        let sample = (0..).map(|i| i as f64).sample(3);
        assert_eq!(sample.data, vec![0.0, 1.0, 2.0]);
    }
}
