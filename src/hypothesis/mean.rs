use std::fmt::Display;

use num_traits::float::TotalOrder;
use num_traits::{Float, FromPrimitive};
use rand::rngs::ThreadRng;
use rand::{Rng, thread_rng};
use statrs::distribution::{ContinuousCDF, Normal};

#[cfg(feature = "rayon")]
use rand::{RngCore, SeedableRng};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::{TestError, TestResult};
#[cfg(feature = "rayon")]
use crate::resample::{sample_with_replacement, stream_seed};
use crate::{
    Bootstrap, ConfidenceInterval, Mean, Quantiles, Re, SEMean, Sample, SamplingIterator,
    Statistic, Studentized, Sum, WelchT,
};

/// Bootstrap test for equality of the means of two independent samples.
///
/// Tests the null hypothesis `H₀: mean(x) = mean(y)` without assuming
/// normality of either distribution, after Efron and Tibshirani,
/// "An Introduction to the Bootstrap" (1993). Both samples are shifted onto
/// their pooled mean, resampled with replacement `n_sim` times, and the
/// observed Welch statistic is ranked against the simulated ones:
/// `p = count(tᵢ >= t₀) / n_sim`.
///
/// # Statistical assumptions
/// - **Assumes**: i.i.d. observations within each sample, independent samples
/// - **Does not require**: normality, equal variances, equal sample sizes
/// - **Test type**: one-sided (upper tail)
///
/// # Example
/// ```rust
/// use efron::{BootstrapMeanTest, Sample, Statistic};
///
/// let x: Sample<f64> = vec![4.1, 5.2, 6.3, 4.8, 5.5].into_iter().collect();
/// let y: Sample<f64> = vec![1.2, 2.1, 1.8, 2.4, 1.5].into_iter().collect();
///
/// let test = BootstrapMeanTest::with_thread_rng(1000).unwrap();
/// let result = test.compute(&(x, y));
///
/// assert!((0.0..=1.0).contains(&result.p_value));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BootstrapMeanTest<R: Rng> {
    /// Random source driving every resampling draw.
    pub rng: R,
    /// Number of bootstrap simulations approximating the null distribution.
    pub n_sim: usize,
}

/// Bootstrap test for the mean of a single sample against a hypothesized
/// value.
///
/// Tests `H₀: mean(x) = u₀` by resampling the sample shifted onto `u₀` and
/// ranking the observed studentized statistic against the simulated ones.
/// Alongside the p-value it reports a bootstrap-t confidence interval with
/// nominal coverage `1 - 2 * alpha`, built from the `alpha` and `1 - alpha`
/// quantiles of the simulated t distribution. An `alpha` that is NaN,
/// infinite or outside `[0, 1]` turns the interval into the explicit
/// `(-inf, +inf)` sentinel.
///
/// # Example
/// ```rust
/// use efron::{BootstrapMeanSingleTest, Sample, Statistic};
///
/// let x: Sample<f64> = vec![5.1, 4.9, 5.3, 5.0, 4.8, 5.2].into_iter().collect();
///
/// let test = BootstrapMeanSingleTest::with_thread_rng(5.0, 0.05, 1000).unwrap();
/// let result = test.compute(&x);
///
/// assert!(result.confidence_interval.is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BootstrapMeanSingleTest<T, R: Rng> {
    /// Random source driving every resampling draw.
    pub rng: R,
    /// Hypothesized mean under the null hypothesis.
    pub null_mean: T,
    /// Tail probability of the reported confidence interval; nominal
    /// coverage is `1 - 2 * alpha`.
    pub alpha: f64,
    /// Number of bootstrap simulations approximating the null distribution.
    pub n_sim: usize,
}

impl<R: Rng> BootstrapMeanTest<R> {
    /// Builds the test from an explicit simulation count.
    ///
    /// `n_sim = 1000` is a reasonable default for exploratory work.
    ///
    /// # Errors
    /// Returns [`TestError::NoSimulations`] when `n_sim` is zero.
    pub fn new(rng: R, n_sim: usize) -> Result<Self, TestError> {
        if n_sim == 0 {
            return Err(TestError::NoSimulations);
        }
        Ok(Self { rng, n_sim })
    }

    /// Builds the test from a target absolute accuracy of the p-value
    /// estimate instead of a raw simulation count.
    ///
    /// # Statistical guarantee
    /// The half-width of the `confidence_level` interval around the
    /// estimated p-value does not exceed `accuracy` in the worst case (true
    /// p-value near 0.5). The bound is conservative: far from 0.5 the
    /// estimate is substantially tighter.
    ///
    /// # Formula
    /// Conservative binomial sample size, clamped to `[100, 10_000_000]`:
    /// ```text
    /// n_sim = ceil( z²_{1 - (1 - confidence_level)/2} * 0.25 / accuracy² )
    /// ```
    ///
    /// # Example accuracy levels
    /// - `accuracy = 0.02` at 95% confidence: 2,401 simulations
    /// - `accuracy = 0.01` at 95% confidence: 9,604 simulations
    /// - `accuracy = 0.005` at 95% confidence: 38,415 simulations
    ///
    /// # Errors
    /// Returns [`TestError::InvalidAccuracy`] unless `0 < accuracy < 0.5`,
    /// and [`TestError::InvalidConfidenceLevel`] unless
    /// `0.5 < confidence_level < 1`.
    pub fn from_absolute_accuracy(
        rng: R,
        accuracy: f64,
        confidence_level: f64,
    ) -> Result<Self, TestError> {
        Ok(Self {
            rng,
            n_sim: simulations_for_accuracy(accuracy, confidence_level)?,
        })
    }
}

impl BootstrapMeanTest<ThreadRng> {
    /// Builds the test on the thread-local entropy generator.
    ///
    /// # Errors
    /// Returns [`TestError::NoSimulations`] when `n_sim` is zero.
    pub fn with_thread_rng(n_sim: usize) -> Result<Self, TestError> {
        Self::new(thread_rng(), n_sim)
    }
}

impl<T, R: Rng> BootstrapMeanSingleTest<T, R> {
    /// Builds the test from an explicit simulation count.
    ///
    /// `alpha` is the tail probability of the reported confidence interval;
    /// it does not change the p-value.
    ///
    /// # Errors
    /// Returns [`TestError::NoSimulations`] when `n_sim` is zero.
    pub fn new(rng: R, null_mean: T, alpha: f64, n_sim: usize) -> Result<Self, TestError> {
        if n_sim == 0 {
            return Err(TestError::NoSimulations);
        }
        Ok(Self {
            rng,
            null_mean,
            alpha,
            n_sim,
        })
    }

    /// Builds the test from a target absolute accuracy of the p-value
    /// estimate; see [`BootstrapMeanTest::from_absolute_accuracy`] for the
    /// sizing formula.
    ///
    /// # Errors
    /// Returns [`TestError::InvalidAccuracy`] unless `0 < accuracy < 0.5`,
    /// and [`TestError::InvalidConfidenceLevel`] unless
    /// `0.5 < confidence_level < 1`.
    pub fn from_absolute_accuracy(
        rng: R,
        null_mean: T,
        alpha: f64,
        accuracy: f64,
        confidence_level: f64,
    ) -> Result<Self, TestError> {
        Ok(Self {
            rng,
            null_mean,
            alpha,
            n_sim: simulations_for_accuracy(accuracy, confidence_level)?,
        })
    }
}

impl<T> BootstrapMeanSingleTest<T, ThreadRng> {
    /// Builds the test on the thread-local entropy generator.
    ///
    /// # Errors
    /// Returns [`TestError::NoSimulations`] when `n_sim` is zero.
    pub fn with_thread_rng(null_mean: T, alpha: f64, n_sim: usize) -> Result<Self, TestError> {
        Self::new(thread_rng(), null_mean, alpha, n_sim)
    }
}

impl<Dx, Dy, T, R> Statistic<(Dx, Dy), TestResult<T>> for BootstrapMeanTest<R>
where
    Dx: AsRef<[T]>,
    Dy: AsRef<[T]>,
    T: Float + FromPrimitive,
    R: Rng + Clone,
{
    fn compute(&self, data: &(Dx, Dy)) -> TestResult<T> {
        let x = data.0.as_ref();
        let y = data.1.as_ref();

        let t0 = WelchT.compute(&(x, y));

        // Under the null both groups share one mean, so resampling happens on
        // copies shifted onto the pooled mean of the concatenated data.
        let pooled_mean = (Sum.compute(&x) + Sum.compute(&y))
            / T::from_usize(x.len() + y.len()).expect("sample length fits in a float");
        let null = (shift_to_mean(x, pooled_mean), shift_to_mean(y, pooled_mean));

        let t_null: Sample<T> = Bootstrap::new(self.rng.clone())
            .re(&null)
            .map(|resampled| WelchT.compute(&resampled))
            .sample(self.n_sim);

        TestResult {
            null_hypothesis: String::from("mean(x) = mean(y)"),
            statistic: t0,
            p_value: upper_tail_share(&t_null, t0),
            confidence_interval: None,
        }
    }
}

impl<D, T, R> Statistic<D, TestResult<T>> for BootstrapMeanSingleTest<T, R>
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive + TotalOrder + Display,
    R: Rng + Clone,
{
    fn compute(&self, data: &D) -> TestResult<T> {
        let x = data.as_ref();

        let t = Studentized::mean(self.null_mean);
        let t0 = t.compute(&x);
        let (mean, se): (T, T) = (Mean, SEMean::default()).compute(&x);

        let null = shift_to_mean(x, self.null_mean);
        let t_null: Sample<T> = Bootstrap::new(self.rng.clone())
            .re(&null)
            .map(|resampled| t.compute(&resampled))
            .sample(self.n_sim);

        TestResult {
            null_hypothesis: format!("mean(x) = {}", self.null_mean),
            statistic: t0,
            p_value: upper_tail_share(&t_null, t0),
            confidence_interval: Some(self.confidence_interval(&t_null, mean, se)),
        }
    }
}

impl<T, R> BootstrapMeanSingleTest<T, R>
where
    T: Float + FromPrimitive + TotalOrder,
    R: Rng,
{
    /// Bootstrap-t interval from the simulated null distribution.
    ///
    /// Degenerate inputs leave both bounds NaN; an out-of-domain `alpha` is
    /// reported as the explicit infinite interval instead.
    fn confidence_interval(&self, t_null: &Sample<T>, mean: T, se: T) -> ConfidenceInterval<T> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return ConfidenceInterval::infinite();
        }

        let quantiles = Quantiles::new([self.alpha, 1.0 - self.alpha]).compute(t_null);
        let (lower_q, upper_q) = (quantiles[0], quantiles[1]);
        let interval =
            ConfidenceInterval::new(mean - upper_q * se, mean - lower_q * se).with_estimate(mean);

        let nominal = 1.0 - 2.0 * self.alpha;
        if (0.0..=1.0).contains(&nominal) {
            interval.with_confidence(nominal)
        } else {
            interval
        }
    }
}

#[cfg(feature = "rayon")]
impl<R> BootstrapMeanTest<R>
where
    R: Rng + SeedableRng + Clone,
{
    /// Runs the simulations of [`Statistic::compute`] across the rayon pool.
    ///
    /// Every simulation owns a generator seeded by splitting one base draw
    /// from the test's generator, so workers never share state and the
    /// report does not depend on the worker count. A panicking simulation
    /// aborts the whole computation.
    pub fn par_compute<Dx, Dy, T>(&self, data: &(Dx, Dy)) -> TestResult<T>
    where
        Dx: AsRef<[T]>,
        Dy: AsRef<[T]>,
        T: Float + FromPrimitive + Send + Sync,
    {
        let x = data.0.as_ref();
        let y = data.1.as_ref();

        let t0 = WelchT.compute(&(x, y));

        let pooled_mean = (Sum.compute(&x) + Sum.compute(&y))
            / T::from_usize(x.len() + y.len()).expect("sample length fits in a float");
        let null_x = shift_to_mean(x, pooled_mean);
        let null_y = shift_to_mean(y, pooled_mean);

        let mut seeder = self.rng.clone();
        let base = seeder.next_u64();
        let simulated: Vec<T> = (0..self.n_sim as u64)
            .into_par_iter()
            .map(|stream| {
                let mut rng = R::seed_from_u64(stream_seed(base, stream));
                let bx = sample_with_replacement(null_x.as_ref(), &mut rng);
                let by = sample_with_replacement(null_y.as_ref(), &mut rng);
                WelchT.compute(&(bx, by))
            })
            .collect();
        let t_null = Sample::new(simulated);

        TestResult {
            null_hypothesis: String::from("mean(x) = mean(y)"),
            statistic: t0,
            p_value: upper_tail_share(&t_null, t0),
            confidence_interval: None,
        }
    }
}

#[cfg(feature = "rayon")]
impl<T, R> BootstrapMeanSingleTest<T, R>
where
    T: Float + FromPrimitive + TotalOrder + Display + Send + Sync,
    R: Rng + SeedableRng + Clone,
{
    /// Parallel twin of [`Statistic::compute`]; see
    /// [`BootstrapMeanTest::par_compute`] for the seeding scheme.
    pub fn par_compute<D: AsRef<[T]>>(&self, data: &D) -> TestResult<T> {
        let x = data.as_ref();

        let t = Studentized::mean(self.null_mean);
        let t0 = t.compute(&x);
        let (mean, se): (T, T) = (Mean, SEMean::default()).compute(&x);

        let null = shift_to_mean(x, self.null_mean);
        let mut seeder = self.rng.clone();
        let base = seeder.next_u64();
        let simulated: Vec<T> = (0..self.n_sim as u64)
            .into_par_iter()
            .map(|stream| {
                let mut rng = R::seed_from_u64(stream_seed(base, stream));
                t.compute(&sample_with_replacement(null.as_ref(), &mut rng))
            })
            .collect();
        let t_null = Sample::new(simulated);

        TestResult {
            null_hypothesis: format!("mean(x) = {}", self.null_mean),
            statistic: t0,
            p_value: upper_tail_share(&t_null, t0),
            confidence_interval: Some(self.confidence_interval(&t_null, mean, se)),
        }
    }
}

/// Shifts every observation so the sample mean lands on `target`.
fn shift_to_mean<T: Float + FromPrimitive>(data: &[T], target: T) -> Sample<T> {
    let offset = target - Mean.compute(&data);
    data.iter().map(|&value| value + offset).collect()
}

/// Share of simulated statistics at least as large as the observed one.
///
/// Ties count as extreme; NaN simulations never do, and a NaN observed
/// statistic makes every comparison false.
fn upper_tail_share<T: Float + FromPrimitive>(simulated: &Sample<T>, observed: T) -> T {
    let extreme = simulated
        .as_ref()
        .iter()
        .filter(|&&t| t >= observed)
        .count();
    T::from_usize(extreme).expect("simulation count fits in a float")
        / T::from_usize(simulated.len()).expect("simulation count fits in a float")
}

/// Simulation count that pins the p-value estimate to `accuracy` at the
/// requested confidence, by the conservative binomial sample size at the
/// worst case `p = 0.5`.
fn simulations_for_accuracy(accuracy: f64, confidence_level: f64) -> Result<usize, TestError> {
    if !(accuracy > 0.0 && accuracy < 0.5) {
        return Err(TestError::InvalidAccuracy(accuracy));
    }
    if !(confidence_level > 0.5 && confidence_level < 1.0) {
        return Err(TestError::InvalidConfidenceLevel(confidence_level));
    }

    let tail = (1.0 - confidence_level) / 2.0;
    let z = Normal::new(0.0, 1.0)
        .expect("N(0, 1) is a valid distribution")
        .inverse_cdf(1.0 - tail);

    let n_min = (z * z * 0.25) / (accuracy * accuracy);
    Ok((n_min.ceil() as usize).clamp(100, 10_000_000))
}
