//! Proportional trading fee charged on swap input.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints};
use crate::error::AmmError;

/// Fraction of the input amount kept by the pool as a trading fee.
///
/// Always in `[0, 1)`: a 100% fee would leave nothing to trade.
/// The protocol default is [`FeeRate::DEFAULT`] (0.30%, 30 bp).
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Amount, BasisPoints, FeeRate};
///
/// let fee = FeeRate::from_basis_points(BasisPoints::new(30)).expect("valid");
/// assert_eq!(fee, FeeRate::DEFAULT);
///
/// let charged = fee.apply(Amount::new(10_000.0).expect("finite"));
/// assert_eq!(charged.get(), 10_000.0 * 0.003);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FeeRate(f64);

impl FeeRate {
    /// 0.30%, the protocol default.
    pub const DEFAULT: Self = Self(0.003);

    /// No fee.
    pub const ZERO: Self = Self(0.0);

    /// Creates a fee rate from a fraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] unless `0 <= rate < 1`.
    pub fn new(rate: f64) -> crate::error::Result<Self> {
        if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
            return Err(AmmError::InvalidFee("fee rate must be in [0, 1)"));
        }
        Ok(Self(rate))
    }

    /// Creates a fee rate from basis points.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for 10 000 bp or more.
    pub fn from_basis_points(bps: BasisPoints) -> crate::error::Result<Self> {
        if bps.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(AmmError::InvalidFee("100% fee makes swap impossible"));
        }
        Self::new(bps.as_fraction())
    }

    /// Returns the fee as a fraction.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Fee charged on `amount`: exactly `amount * rate`.
    pub fn apply(&self, amount: Amount) -> Amount {
        // rate in [0, 1) and amount finite, so the product stays finite and non-negative
        Amount::new(amount.get() * self.0).unwrap_or(Amount::ZERO)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for FeeRate {
    type Error = AmmError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeeRate> for f64 {
    fn from(rate: FeeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
