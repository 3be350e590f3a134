use num_traits::{Float, FromPrimitive};

use super::{Statistic, Variance};

/// Standard Error of the Mean (SEM).
///
/// Computes the standard error of the sample mean:
/// ```text
/// SE = sqrt( variance / n )
/// ```
/// where `variance` is computed using the configured [`Variance`] estimator
/// (sample variance with Bessel's correction by default).
///
/// Degenerate samples (n < 2) surface as NaN through the variance estimate;
/// no clamping, no panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SEMean {
    variance: Variance,
}

impl SEMean {
    /// Creates a new `SEMean` with a custom variance estimator.
    pub fn with_variance(variance: Variance) -> Self {
        Self { variance }
    }
}

impl<D, T> Statistic<D, T> for SEMean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let var_est = self.variance.compute(data);
        let n = T::from_usize(data.as_ref().len()).expect("sample length fits in a float");

        // NaN variance (n < 2) and n = 0 both propagate as NaN
        (var_est / n).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_closed_form() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        // s² = 2.5, n = 5 → SE = sqrt(0.5)
        assert_abs_diff_eq!(SEMean::default().compute(&data), 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn population_variance_variant() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let se = SEMean::with_variance(Variance::new(0)).compute(&data);
        assert_abs_diff_eq!(se, 0.4_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_samples_are_nan() {
        assert!(SEMean::default().compute(&Vec::<f64>::new()).is_nan());
        assert!(SEMean::default().compute(&[1.5_f64]).is_nan());
    }

    #[test]
    fn constant_sample_has_zero_se() {
        let data = vec![2.5_f64; 8];
        assert_abs_diff_eq!(SEMean::default().compute(&data), 0.0, epsilon = 1e-12);
    }
}
