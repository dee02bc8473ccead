//! Relative deviation of an executed price from the pre-trade mid price.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Price impact as a ratio in `[0, 1)`.
///
/// `0.0` means the trade executed at the mid price; values approach `1.0`
/// as the trade grows relative to the pool.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PriceImpact(f64);

impl PriceImpact {
    /// No impact.
    pub const ZERO: Self = Self(0.0);

    /// Impact above which a trade is flagged to the user (5%).
    pub const HIGH: Self = Self(0.05);

    /// Creates a price impact ratio.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] unless `0 <= ratio < 1`.
    pub fn new(ratio: f64) -> crate::error::Result<Self> {
        if !ratio.is_finite() || !(0.0..1.0).contains(&ratio) {
            return Err(AmmError::InvalidInput("price impact must be in [0, 1)"));
        }
        Ok(Self(ratio))
    }

    /// Returns the ratio.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns the impact as a percentage.
    #[must_use]
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Returns `true` if this impact is strictly above `threshold`.
    #[must_use]
    pub fn exceeds(&self, threshold: Self) -> bool {
        self.0 > threshold.0
    }
}

impl TryFrom<f64> for PriceImpact {
    type Error = AmmError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PriceImpact> for f64 {
    fn from(impact: PriceImpact) -> Self {
        impact.0
    }
}

impl fmt::Display for PriceImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}
