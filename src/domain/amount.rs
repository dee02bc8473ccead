//! Token quantity as a finite, non-negative real number.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// A token quantity (reserve, trade size, fee, withdrawal).
///
/// Wraps an `f64` that is always finite and non-negative. Construction
/// through [`Amount::new`] rejects NaN, infinities and negative values;
/// [`Amount::positive`] additionally rejects zero and is what the pricing
/// engine uses to validate trade sizes and reserves.
///
/// # Examples
///
/// ```
/// use tidepool::domain::Amount;
///
/// let a = Amount::new(1.5).expect("finite");
/// assert!((a.get() - 1.5).abs() < f64::EPSILON);
/// assert!(Amount::positive(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
#[must_use]
pub struct Amount(f64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0.0);

    /// Creates an `Amount` from a finite, non-negative `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the value is negative, NaN
    /// or infinite.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() {
            return Err(AmmError::InvalidInput("amount must be finite"));
        }
        if value < 0.0 {
            return Err(AmmError::InvalidInput("amount must be non-negative"));
        }
        Ok(Self(value))
    }

    /// Creates an `Amount` from a finite, strictly positive `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the value is zero, negative,
    /// NaN or infinite.
    pub fn positive(value: f64) -> crate::error::Result<Self> {
        let amount = Self::new(value)?;
        if amount.is_zero() {
            return Err(AmmError::InvalidInput("amount must be positive"));
        }
        Ok(amount)
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Returns the smaller of two amounts.
    pub fn min(self, other: Self) -> Self {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmmError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_valid() {
        let Ok(a) = Amount::new(42.0) else {
            panic!("expected Ok");
        };
        assert!((a.get() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_zero_allowed() {
        let Ok(a) = Amount::new(0.0) else {
            panic!("expected Ok");
        };
        assert!(a.is_zero());
    }

    #[test]
    fn new_rejects_negative() {
        assert!(matches!(
            Amount::new(-1.0),
            Err(AmmError::InvalidInput(_))
        ));
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::new(f64::INFINITY).is_err());
        assert!(Amount::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(matches!(
            Amount::positive(0.0),
            Err(AmmError::InvalidInput(_))
        ));
    }

    #[test]
    fn positive_accepts_tiny() {
        assert!(Amount::positive(f64::MIN_POSITIVE).is_ok());
    }

    // -- Helpers ------------------------------------------------------------

    #[test]
    fn default_is_zero() {
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn min_picks_smaller() {
        let Ok(a) = Amount::new(1.0) else {
            panic!("expected Ok");
        };
        let Ok(b) = Amount::new(2.0) else {
            panic!("expected Ok");
        };
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }

    #[test]
    fn display() {
        let Ok(a) = Amount::new(1_000_000.0) else {
            panic!("expected Ok");
        };
        assert_eq!(format!("{a}"), "1000000");
    }

    #[test]
    fn ordering() {
        let Ok(a) = Amount::new(1.0) else {
            panic!("expected Ok");
        };
        assert!(Amount::ZERO < a);
    }

    // -- Serde --------------------------------------------------------------

    #[test]
    fn deserialize_rejects_negative() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[allow(dead_code)]
            value: Amount,
        }
        let parsed: Result<Wrapper, _> = toml::from_str("value = -5.0");
        assert!(parsed.is_err());
    }
}
