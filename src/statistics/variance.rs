use num_traits::{Float, FromPrimitive};

use super::{Mean, Statistic};

/// Two-pass variance estimator with a configurable degrees-of-freedom
/// adjustment.
#[derive(Debug, Clone, Copy)]
pub struct Variance {
    /// Delta degrees of freedom subtracted from the divisor.
    pub ddof: usize,
}

impl Variance {
    /// Creates a new `Variance` estimator with the given degrees of freedom adjustment.
    ///
    /// - `ddof = 0`: population variance (biased)
    /// - `ddof = 1`: sample variance (unbiased, Bessel's correction), the default
    pub fn new(ddof: usize) -> Self {
        Variance { ddof }
    }
}

impl Default for Variance {
    /// Returns a `Variance` estimator with `ddof = 1` (unbiased sample variance).
    fn default() -> Self {
        Variance { ddof: 1 }
    }
}

impl<D, T> Statistic<D, T> for Variance
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let slice = data.as_ref();

        // Variance undefined for n < 2, or when no degrees of freedom remain
        if slice.len() < 2 || slice.len() <= self.ddof {
            return T::nan();
        }

        let mean = Mean.compute(data);

        // Kahan summation for squared deviations
        let mut sq_sum = T::zero();
        let mut c2 = T::zero();
        for &x in slice {
            let dev = x - mean;
            let y = dev * dev - c2;
            let t = sq_sum + y;
            c2 = (t - sq_sum) - y;
            sq_sum = t;
        }

        let dof = T::from_usize(slice.len() - self.ddof).expect("usize fits in float");
        sq_sum / dof
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_reference_value() {
        // Checked against R: var(c(15.123, 5.321, 10.123, -166.100, 321.123))
        let data = vec![15.123_f64, 5.321, 10.123, -166.100, 321.123];
        assert_abs_diff_eq!(Variance::default().compute(&data), 31044.99, epsilon = 0.01);
    }

    #[test]
    fn unbiased_and_population_divisors() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        assert_abs_diff_eq!(Variance::default().compute(&data), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Variance::new(0).compute(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn short_samples_are_nan() {
        assert!(Variance::default().compute(&Vec::<f64>::new()).is_nan());
        assert!(Variance::default().compute(&[4.2_f64]).is_nan());
    }

    #[test]
    fn excessive_ddof_is_nan() {
        let data = vec![1.0_f64, 2.0, 3.0];
        assert!(Variance::new(3).compute(&data).is_nan());
        assert!(Variance::new(7).compute(&data).is_nan());
    }

    #[test]
    fn constant_sample_has_zero_variance() {
        let data = vec![3.25_f64; 16];
        assert_abs_diff_eq!(Variance::default().compute(&data), 0.0, epsilon = 1e-12);
    }
}
