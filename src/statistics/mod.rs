/// A statistic: anything computable from a borrowed dataset.
///
/// `D` is the dataset type (usually something slice-like), `T` the output.
/// Estimators, standard errors and whole hypothesis tests all live behind
/// this one seam, so they compose freely.
pub trait Statistic<D, T> {
    /// Compute the statistic over `data` without consuming it.
    fn compute(&self, data: &D) -> T;
}

mod ci;
mod mean;
mod quantile;
mod se;
mod studentized;
mod variance;

pub use ci::ConfidenceInterval;
pub use mean::{Mean, Sum};
pub use quantile::{Quantile, Quantiles};
pub use se::SEMean;
pub use studentized::{Studentized, WelchT};
pub use variance::Variance;

// Pairs of statistics evaluate component-wise over the same borrowed input,
// e.g. `(Mean, Variance::default()).compute(&data)`.
impl<D, T1, T2, S1, S2> Statistic<D, (T1, T2)> for (S1, S2)
where
    S1: Statistic<D, T1>,
    S2: Statistic<D, T2>,
{
    #[inline]
    fn compute(&self, data: &D) -> (T1, T2) {
        let out1 = self.0.compute(data);
        let out2 = self.1.compute(data);
        (out1, out2)
    }
}
