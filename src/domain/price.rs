//! Exchange rate between the two sides of a pool.

use core::fmt;

use super::Amount;
use crate::error::AmmError;

/// Units of the quote token per unit of the base token.
///
/// Produced by [`spot_price`](crate::math::spot_price) (reserve ratio) and
/// [`SwapQuote::effective_price`](super::SwapQuote::effective_price)
/// (realized rate). Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Zero rate.
    pub const ZERO: Self = Self(0.0);

    /// Validates a raw rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] for a negative or non-finite rate.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(AmmError::InvalidInput("price must be finite and non-negative"))
        }
    }

    /// Raw rate.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Rate of `quote` units per `base` unit.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] for a zero `base` or an
    /// unrepresentable ratio.
    pub fn from_amounts(quote: Amount, base: Amount) -> crate::error::Result<Self> {
        if base.is_zero() {
            return Err(AmmError::InvalidInput("price denominator must be positive"));
        }
        Self::new(quote.get() / base.get())
    }

    /// The same rate seen from the other side of the pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] for a zero rate.
    pub fn inverse(&self) -> crate::error::Result<Self> {
        if self.0 > 0.0 {
            Self::new(self.0.recip())
        } else {
            Err(AmmError::InvalidInput("cannot invert a zero price"))
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
