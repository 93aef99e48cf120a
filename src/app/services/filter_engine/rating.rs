//! Rating interval with a closed top bound

use serde::{Deserialize, Serialize};

use crate::constants::{RATING_MAX, RATING_MIN, RATING_STEP};
use crate::{Error, Result};

/// A `[low, high]` rating filter within the rating domain
///
/// Matching is closed-open, except that an interval reaching the top of the
/// domain is closed at both ends so maximum-rated routes are never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingInterval {
    low: f64,
    high: f64,
}

impl RatingInterval {
    /// Create an interval, requiring `RATING_MIN <= low <= high <= RATING_MAX`
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let in_domain = |v: f64| v.is_finite() && (RATING_MIN..=RATING_MAX).contains(&v);
        if !in_domain(low) || !in_domain(high) || low > high {
            return Err(Error::invalid_rating_interval(low, high));
        }
        Ok(Self { low, high })
    }

    /// Create an interval with both bounds rounded to the slider step
    pub fn rounded(low: f64, high: f64) -> Result<Self> {
        Self::new(round_to_step(low), round_to_step(high))
    }

    /// The whole rating domain
    pub fn full() -> Self {
        Self {
            low: RATING_MIN,
            high: RATING_MAX,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Whether a route with this rating passes the filter
    pub fn contains(&self, rating: f64) -> bool {
        if rating < self.low {
            return false;
        }
        if self.high >= RATING_MAX {
            rating <= self.high
        } else {
            rating < self.high
        }
    }
}

impl Default for RatingInterval {
    fn default() -> Self {
        Self::full()
    }
}

impl std::fmt::Display for RatingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.1}, {:.1}]", self.low, self.high)
    }
}

fn round_to_step(value: f64) -> f64 {
    let steps = (value / RATING_STEP).round();
    // Re-parse to drop representation noise such as 3.3000000000000003
    format!("{:.1}", steps * RATING_STEP)
        .parse()
        .unwrap_or(value)
}
