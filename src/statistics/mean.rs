use num_traits::{Float, FromPrimitive};

use super::Statistic;

/// Total of a sample, accumulated with **Kahan summation** to keep
/// floating-point error from growing with the sample size.
///
/// Sums sit in the innermost loop of every bootstrap replication, so the
/// compensation matters when:
/// - Summing >10⁴ values
/// - Values have large dynamic range
///
/// An empty sample sums to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<D, T> Statistic<D, T> for Sum
where
    D: AsRef<[T]>,
    T: Float,
{
    fn compute(&self, data: &D) -> T {
        let mut sum = T::zero();
        let mut c = T::zero();

        for &x in data.as_ref() {
            let y = x - c;
            let t = sum + y;
            c = (t - sum) - y;
            sum = t;
        }

        sum
    }
}

/// Arithmetic mean over a compensated sum.
///
/// Undefined for empty samples: evaluates to NaN rather than panicking, so
/// degenerate inputs flow through downstream arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl<D, T> Statistic<D, T> for Mean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let slice = data.as_ref();

        if slice.is_empty() {
            return T::nan();
        }

        // Length conversion is exact for practical dataset sizes
        // (f32: exact ≤ 16M elements; f64: exact ≤ 9 quadrillion)
        Sum.compute(data) / T::from_usize(slice.len()).expect("sample length fits in a float")
    }
}
