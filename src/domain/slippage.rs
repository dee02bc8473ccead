//! User-tolerated deviation between quoted and settled output.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Slippage tolerance, stored as a percentage in `[0, 100)`.
///
/// The swap form defaults to 0.5%.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SlippageTolerance(f64);

impl SlippageTolerance {
    /// 0.5%, the swap screen default.
    pub const DEFAULT: Self = Self(0.5);

    /// Exact execution only.
    pub const NONE: Self = Self(0.0);

    /// Creates a tolerance from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] unless `0 <= percent < 100`.
    pub fn from_percent(percent: f64) -> crate::error::Result<Self> {
        if !percent.is_finite() || !(0.0..100.0).contains(&percent) {
            return Err(AmmError::InvalidInput(
                "slippage tolerance must be in [0, 100) percent",
            ));
        }
        Ok(Self(percent))
    }

    /// Returns the tolerance as a percentage.
    #[must_use]
    pub const fn as_percent(&self) -> f64 {
        self.0
    }

    /// Returns the tolerance as a fraction.
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl Default for SlippageTolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for SlippageTolerance {
    type Error = AmmError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_percent(value)
    }
}

impl From<SlippageTolerance> for f64 {
    fn from(tolerance: SlippageTolerance) -> Self {
        tolerance.0
    }
}

impl fmt::Display for SlippageTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
