mod mean;

pub use mean::{BootstrapMeanSingleTest, BootstrapMeanTest};

use std::error::Error as StdError;
use std::fmt;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::ConfidenceInterval;

/// Outcome of a bootstrap hypothesis test.
///
/// Carries the observed statistic, the simulated p-value and, where the test
/// produces one, a confidence interval for the estimated parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult<T: Float> {
    /// Plain-language statement of the null hypothesis being tested.
    pub null_hypothesis: String,
    /// Observed value of the test statistic on the original data.
    pub statistic: T,
    /// Share of simulated statistics at least as large as the observed one.
    pub p_value: T,
    /// Confidence interval for the estimated parameter; `None` for tests
    /// that do not produce one.
    pub confidence_interval: Option<ConfidenceInterval<T>>,
}

impl<T: Float> TestResult<T> {
    /// Whether the null hypothesis is rejected at significance level `alpha`.
    ///
    /// A NaN p-value never rejects.
    #[must_use]
    pub fn is_significant(&self, alpha: T) -> bool {
        self.p_value < alpha
    }
}

/// Rejected test configuration.
///
/// Degenerate numeric inputs inside an already-built test flow through the
/// arithmetic as NaN sentinels; this error covers structural misuse caught
/// while the test is being built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestError {
    /// The simulation count was zero.
    NoSimulations,
    /// The target p-value accuracy was outside `(0, 0.5)`.
    InvalidAccuracy(f64),
    /// The confidence level for the accuracy target was outside `(0.5, 1.0)`.
    InvalidConfidenceLevel(f64),
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestError::NoSimulations => {
                write!(f, "the number of simulations must be positive")
            }
            TestError::InvalidAccuracy(accuracy) => {
                write!(f, "accuracy must be in (0, 0.5), got {}", accuracy)
            }
            TestError::InvalidConfidenceLevel(level) => {
                write!(f, "confidence level must be in (0.5, 1.0), got {}", level)
            }
        }
    }
}

impl StdError for TestError {}
