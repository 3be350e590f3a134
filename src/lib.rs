//! Nonparametric bootstrap hypothesis tests for sample means, after Efron
//! and Tibshirani, "An Introduction to the Bootstrap" (1993).
//!
//! Two entry points drive the crate:
//!
//! - [`BootstrapMeanTest`] asks whether two independent samples share a mean.
//! - [`BootstrapMeanSingleTest`] asks whether one sample's mean equals a
//!   hypothesized value, and reports a bootstrap-t confidence interval.
//!
//! Both are backed by reusable layers: descriptive statistics ([`Mean`],
//! [`Variance`], [`SEMean`]), a Hyndman-Fan definition 7 quantile estimator
//! ([`Quantile`], [`Quantiles`]), and resampling with replacement
//! ([`Bootstrap`]). Degenerate numeric inputs flow through the arithmetic as
//! NaN sentinels instead of panicking; structural misuse such as a zero
//! simulation count is a [`TestError`].
//!
//! Every randomized operation owns an injected random source: seed a
//! deterministic generator for reproducible reports, or use the
//! `with_thread_rng` constructors in production.
//!
//! # Example
//! ```rust
//! use efron::{BootstrapMeanTest, Sample, Statistic};
//!
//! let x: Sample<f64> = vec![14.54, 20.12, 50.0, 21.0, 10.5].into_iter().collect();
//! let y: Sample<f64> = vec![3.14, 2.72, 1.62, 4.67, 2.50].into_iter().collect();
//!
//! let test = BootstrapMeanTest::with_thread_rng(1000).unwrap();
//! let result = test.compute(&(x, y));
//!
//! println!("{result}");
//! assert!((0.0..=1.0).contains(&result.p_value));
//! ```

mod display;
mod hypothesis;
mod resample;
mod sample;
mod statistics;

pub use crate::hypothesis::*;
pub use crate::resample::*;
pub use crate::sample::{Sample, SamplingIterator};
pub use crate::statistics::*;
pub use rand;
