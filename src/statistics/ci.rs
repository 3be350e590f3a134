use std::fmt;

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Confidence interval with optional point estimate and nominal confidence
/// level.
///
/// Two sentinel states are part of the contract:
/// - [`ConfidenceInterval::nan`], both bounds NaN: the interval could not
///   be computed (degenerate arithmetic upstream).
/// - [`ConfidenceInterval::infinite`], `[-∞, +∞]`: the requested tail
///   probability was invalid, so no finite interval is claimed.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ConfidenceInterval<T> {
    /// Lower bound.
    pub lower: T,
    /// Upper bound.
    pub upper: T,
    /// Point estimate the interval was built around, when known.
    pub estimate: Option<T>,
    /// Nominal coverage in `(0, 1)`, when known.
    pub confidence: Option<f64>,
}

impl<T: PartialOrd + Copy> ConfidenceInterval<T> {
    /// Create an interval from raw bounds.
    #[inline]
    pub const fn new(lower: T, upper: T) -> Self {
        Self {
            lower,
            upper,
            estimate: None,
            confidence: None,
        }
    }

    /// Fluent builder: attach the point estimate.
    #[must_use]
    pub const fn with_estimate(mut self, estimate: T) -> Self {
        self.estimate = Some(estimate);
        self
    }

    /// Fluent builder: attach the nominal confidence level.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Check if value lies within `[lower, upper]` (inclusive).
    ///
    /// NaN bounds compare false, so a not-computed interval contains
    /// nothing.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.lower <= *value && *value <= self.upper
    }
}

impl<T: Float> ConfidenceInterval<T> {
    /// Interval width: `upper - lower`.
    #[inline]
    pub fn width(&self) -> T {
        self.upper - self.lower
    }

    /// Midpoint: `(lower + upper) / 2`.
    #[inline]
    pub fn midpoint(&self) -> T {
        (self.lower + self.upper) / (T::one() + T::one())
    }

    /// Sentinel for "could not be computed": both bounds NaN.
    pub fn nan() -> Self {
        Self::new(T::nan(), T::nan())
    }

    /// Sentinel for "invalid tail probability": `[-∞, +∞]`.
    pub fn infinite() -> Self {
        Self::new(T::neg_infinity(), T::infinity())
    }

    /// False exactly for the [`ConfidenceInterval::nan`] sentinel.
    #[inline]
    pub fn is_computed(&self) -> bool {
        !(self.lower.is_nan() && self.upper.is_nan())
    }

    /// True when both bounds are finite numbers.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

impl<T: Float + fmt::Display> fmt::Display for ConfidenceInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.estimate {
            Some(est) => write!(f, "{} ∈ [{}, {}]", est, self.lower, self.upper)?,
            None => write!(f, "[{}, {}]", self.lower, self.upper)?,
        }
        if let Some(conf) = self.confidence {
            write!(f, " with {:.2}", conf)?;
        }
        Ok(())
    }
}
