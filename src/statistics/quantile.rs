use num_traits::{Float, FromPrimitive, float::TotalOrder};

use super::Statistic;

/// Quantile estimator using Hyndman & Fan's **Definition 7**, the default of
/// R's `quantile()` and of NumPy's `linear` method.
///
/// With order statistics `x₍₁₎ ≤ … ≤ x₍ₙ₎`:
/// ```text
/// h = p·(n − 1) + 1,   j = ⌊h⌋,   g = h − j
/// Q(p) = (1 − g)·x₍ⱼ₎ + g·x₍ⱼ₊₁₎
/// ```
///
/// Edge behavior:
/// - `p` NaN or outside `[0, 1]` evaluates to NaN, never clamped.
/// - `p == 1` returns the maximum element directly, skipping the
///   interpolation arithmetic.
/// - Empty samples, and singleton samples at `p < 1`, evaluate to NaN (the
///   upper order statistic `x₍ⱼ₊₁₎` does not exist).
///
/// Sorting happens on a private copy in IEEE 754 total order, so NaN
/// observations sort after `+∞` and surface in the top quantiles. The input
/// is never mutated and repeated calls return identical results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantile {
    /// Probability level, nominally in `[0, 1]`.
    pub p: f64,
}

impl Quantile {
    /// Estimator for the `p`-quantile. Out-of-range probabilities are
    /// accepted here and surface as NaN from [`Statistic::compute`].
    pub fn new(p: f64) -> Self {
        Self { p }
    }

    /// Estimator for the median.
    pub fn median() -> Self {
        Self::new(0.5)
    }
}

impl<D, T> Statistic<D, T> for Quantile
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive + TotalOrder,
{
    fn compute(&self, data: &D) -> T {
        let sorted = sorted_copy(data.as_ref());
        estimate_sorted(&sorted, self.p)
    }
}

/// Batch form of [`Quantile`]: sorts the sample once and evaluates every
/// probability against the shared order statistics.
///
/// Element-wise identical to the scalar estimator, invalid probabilities
/// included; one `O(n log n)` sort plus `O(1)` per probability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quantiles {
    /// Probability levels, evaluated in the given order.
    pub probs: Vec<f64>,
}

impl Quantiles {
    /// Estimator evaluating each of `probs` against one sorted copy.
    pub fn new(probs: impl Into<Vec<f64>>) -> Self {
        Self { probs: probs.into() }
    }
}

impl<D, T> Statistic<D, Vec<T>> for Quantiles
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive + TotalOrder,
{
    fn compute(&self, data: &D) -> Vec<T> {
        let sorted = sorted_copy(data.as_ref());
        self.probs
            .iter()
            .map(|&p| estimate_sorted(&sorted, p))
            .collect()
    }
}

fn sorted_copy<T: Float + TotalOrder>(slice: &[T]) -> Vec<T> {
    let mut sorted = slice.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    sorted
}

fn estimate_sorted<T>(sorted: &[T], p: f64) -> T
where
    T: Float + FromPrimitive,
{
    // NaN probabilities fail both bounds and land here too
    if !(0.0..=1.0).contains(&p) {
        return T::nan();
    }

    let n = sorted.len();
    if n == 0 {
        return T::nan();
    }
    if p == 1.0 {
        return sorted[n - 1];
    }

    let h = p * (n as f64 - 1.0) + 1.0;
    let g = T::from_f64(h.fract()).expect("interpolation weight is a valid float");
    // h ≥ 1 whenever p ≥ 0, so the 0-indexed ⌊h⌋ − 1 cannot underflow
    let j = h.floor() as usize - 1;

    match (sorted.get(j), sorted.get(j + 1)) {
        (Some(&lo), Some(&hi)) => lo * (T::one() - g) + hi * g,
        // x₍ⱼ₊₁₎ runs off the end only for singleton samples
        _ => T::nan(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    // Expected values checked against R: quantile(x, probs, type = 7)
    const R_FIXTURE: [(f64, f64); 8] = [
        (0.0, -10.50),
        (0.05, -7.0896),
        (0.15, -0.2688075),
        (0.55, 18.725),
        (0.75, 42.53),
        (0.90, 130.50),
        (0.99, 202.95),
        (1.0, 211.0),
    ];

    fn r_sample() -> Vec<f64> {
        vec![14.54, 20.12, 50.0, 211.0, -10.5, 3.14159]
    }

    #[test]
    fn matches_r_reference_small_sample() {
        let data = r_sample();
        for (p, expected) in R_FIXTURE {
            assert_abs_diff_eq!(Quantile::new(p).compute(&data), expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn matches_r_reference_large_sample() {
        let data: Vec<f64> = (1..=1000).map(f64::from).collect();
        let expected = [
            (0.0, 1.0),
            (0.05, 50.95),
            (0.15, 150.85),
            (0.55, 550.45),
            (0.75, 750.25),
            (0.90, 900.10),
            (0.99, 990.01),
            (1.0, 1000.0),
        ];
        for (p, value) in expected {
            assert_abs_diff_eq!(Quantile::new(p).compute(&data), value, epsilon = 1e-3);
        }
    }

    #[test]
    fn extreme_probabilities_hit_min_and_max() {
        let data = r_sample();
        assert_abs_diff_eq!(Quantile::new(0.0).compute(&data), -10.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Quantile::new(1.0).compute(&data), 211.0, epsilon = 1e-12);
    }

    #[test]
    fn out_of_range_probabilities_are_nan() {
        let data = r_sample();
        for p in [-10.0, -1e-9, 1.0 + 1e-9, 2.5, 44.123, f64::NAN, f64::INFINITY] {
            let q: f64 = Quantile::new(p).compute(&data);
            assert!(q.is_nan(), "p = {} must produce NaN (got: {})", p, q);
        }
    }

    #[test]
    fn constant_sample_returns_the_constant() {
        let data = vec![7.25_f64; 12];
        for p in [0.0, 0.123, 0.5, 0.777, 1.0] {
            assert_abs_diff_eq!(Quantile::new(p).compute(&data), 7.25, epsilon = 1e-12);
        }
    }

    // The upper order statistic x₍ⱼ₊₁₎ does not exist for a singleton, so
    // every p < 1 is NaN while p = 1 still returns the element.
    #[test]
    fn singleton_boundary() {
        let data = vec![4.2_f64];
        for p in [0.0, 0.25, 0.5, 0.999] {
            let q: f64 = Quantile::new(p).compute(&data);
            assert!(q.is_nan(), "singleton at p = {} must be NaN (got: {})", p, q);
        }
        assert_abs_diff_eq!(Quantile::new(1.0).compute(&data), 4.2, epsilon = 1e-12);
    }

    #[test]
    fn empty_sample_is_nan_everywhere() {
        let data = Vec::<f64>::new();
        for p in [0.0, 0.5, 1.0] {
            let q: f64 = Quantile::new(p).compute(&data);
            assert!(q.is_nan(), "empty sample at p = {} must be NaN", p);
        }
    }

    // Total order sorts [NaN, +∞, 1.0, 5.431] as [1.0, 5.431, +∞, NaN]:
    // low probabilities interpolate the finite pair, the top of the range
    // touches the NaN slot and propagates it.
    #[test]
    fn total_order_places_nan_last() {
        let data = vec![f64::NAN, f64::INFINITY, 1.0, 5.431];

        assert_abs_diff_eq!(Quantile::new(0.12).compute(&data), 2.59516, epsilon = 1e-10);
        assert!(Quantile::new(0.99).compute(&data).is_nan());
        assert!(Quantile::new(1.0).compute(&data).is_nan());

        let q: f64 = Quantile::median().compute(&data);
        assert!(q.is_infinite() && q.is_sign_positive());
    }

    #[test]
    fn infinity_interpolates_to_infinity() {
        let data = vec![1.0_f64, 5.431, f64::INFINITY];
        let q: f64 = Quantile::new(0.9).compute(&data);
        assert!(q.is_infinite() && q.is_sign_positive());
    }

    #[test]
    fn median_convenience() {
        let data = vec![4.0_f64, 1.0, 3.0, 2.0];
        assert_abs_diff_eq!(Quantile::median().compute(&data), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn works_for_f32_samples() {
        let data: Vec<f32> = r_sample().into_iter().map(|x| x as f32).collect();
        for (p, expected) in R_FIXTURE {
            assert_abs_diff_eq!(Quantile::new(p).compute(&data), expected as f32, epsilon = 1e-3);
        }
    }

    #[test]
    fn batch_agrees_with_scalar_calls() {
        let data = r_sample();
        // Deliberately includes out-of-range probabilities
        let probs = vec![0.0, 1.0, -19.0, 44.123, 0.04, 0.000123, 0.995, 0.55, 0.75, 0.88];

        let batch: Vec<f64> = Quantiles::new(probs.clone()).compute(&data);
        let scalar: Vec<f64> = probs.iter().map(|&p| Quantile::new(p).compute(&data)).collect();

        for (p, (b, s)) in probs.iter().zip_eq(batch.iter().zip_eq(scalar.iter())) {
            assert!(
                (b == s) || (b.is_nan() && s.is_nan()),
                "batch and scalar disagree at p = {}: {} vs {}",
                p,
                b,
                s
            );
        }
    }

    #[test]
    fn input_is_not_mutated_and_calls_are_idempotent() {
        let data = r_sample();
        let snapshot = data.clone();

        let first: f64 = Quantile::new(0.75).compute(&data);
        assert_eq!(data, snapshot, "estimator must not reorder the input");
        let second: f64 = Quantile::new(0.75).compute(&data);
        assert_eq!(first.to_bits(), second.to_bits());

        let batch1: Vec<f64> = Quantiles::new([0.1, 0.9]).compute(&data);
        let batch2: Vec<f64> = Quantiles::new([0.1, 0.9]).compute(&data);
        assert_eq!(data, snapshot);
        assert_eq!(batch1, batch2);
    }
}
