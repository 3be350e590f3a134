use num_traits::{Float, FromPrimitive};

use super::{Mean, SEMean, Statistic, Variance};

/// Studentized statistic for hypothesis testing: `t = (θ̂ - θ₀) / SE(θ̂)`.
///
/// Computes the standardized distance between an estimate and a null
/// hypothesis value, scaled by the estimate's standard error:
/// ```text
/// t = (estimate - null_value) / standard_error
/// ```
///
/// The division follows plain IEEE 754 semantics: a zero standard error
/// yields `±∞` (or NaN for `0/0`), and NaN from either side propagates.
/// Degenerate samples therefore surface as NaN without special cases.
#[derive(Debug, Clone, Copy)]
pub struct Studentized<Estimator, SEE, T> {
    /// Point estimator for θ̂.
    pub statistic: Estimator,
    /// Standard error estimator for SE(θ̂).
    pub se: SEE,
    /// Hypothesized parameter value θ₀ under H₀.
    pub null_value: T,
}

impl<Estimator, SEE, T> Studentized<Estimator, SEE, T> {
    /// Creates a studentized statistic (t-statistic) for hypothesis testing.
    pub fn new(statistic: Estimator, se: SEE, null_value: T) -> Self {
        Self {
            statistic,
            se,
            null_value,
        }
    }
}

impl<T> Studentized<Mean, SEMean, T> {
    /// One-sample t-statistic for the mean: `t = (x̄ - μ₀) / sqrt(s²/n)`.
    pub fn mean(null_value: T) -> Self {
        Self::new(Mean, SEMean::default(), null_value)
    }
}

impl<D, T, Estimator, SEE> Statistic<D, T> for Studentized<Estimator, SEE, T>
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
    Estimator: Statistic<D, T>,
    SEE: Statistic<D, T>,
{
    #[inline]
    fn compute(&self, data: &D) -> T {
        (self.statistic.compute(data) - self.null_value) / self.se.compute(data)
    }
}

/// Welch-style two-sample t-statistic over a pair of samples:
/// ```text
/// t = (x̄ - ȳ) / sqrt( s²ₓ/nₓ + s²ᵧ/nᵧ )
/// ```
/// with unbiased per-group variances and no pooling, so unequal group
/// variances and sizes are handled as-is. Empty or singleton groups
/// propagate NaN through the arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct WelchT;

impl<Dx, Dy, T> Statistic<(Dx, Dy), T> for WelchT
where
    Dx: AsRef<[T]>,
    Dy: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &(Dx, Dy)) -> T {
        let (x, y) = (data.0.as_ref(), data.1.as_ref());

        let (mean_x, var_x) = (Mean, Variance::default()).compute(&x);
        let (mean_y, var_y) = (Mean, Variance::default()).compute(&y);

        let nx = T::from_usize(x.len()).expect("sample length fits in a float");
        let ny = T::from_usize(y.len()).expect("sample length fits in a float");

        (mean_x - mean_y) / (var_x / nx + var_y / ny).sqrt()
    }
}
