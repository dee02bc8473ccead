//! Checked arithmetic for [`Amount`].
//!
//! `f64` never overflows into a panic; it silently produces infinities,
//! NaN, or negative values. The [`CheckedArithmetic`] trait turns each of
//! those outcomes into an explicit [`AmmError`] so pool bookkeeping can
//! propagate them with `?`.
//!
//! # Examples
//!
//! ```
//! use tidepool::domain::Amount;
//! use tidepool::math::CheckedArithmetic;
//!
//! let a = Amount::new(100.0).expect("finite");
//! let b = Amount::new(200.0).expect("finite");
//! assert!(a.safe_add(&b).is_ok());
//! assert!(a.safe_sub(&b).is_err());
//! ```

use crate::domain::Amount;
use crate::error::AmmError;

/// Fallible arithmetic for amounts.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: a negative or non-finite result is an error, never
///   clamped.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum is not finite.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product is not finite.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `other` is zero, or
    /// [`AmmError::Overflow`] if the quotient is not finite.
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        Amount::new(self.get() + other.get())
            .map_err(|_| AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        if other.get() > self.get() {
            return Err(AmmError::InsufficientLiquidity);
        }
        Amount::new(self.get() - other.get())
            .map_err(|_| AmmError::Overflow("amount subtraction overflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        Amount::new(self.get() * other.get())
            .map_err(|_| AmmError::Overflow("amount multiplication overflow"))
    }

    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        if other.is_zero() {
            return Err(AmmError::InvalidInput("division by zero amount"));
        }
        Amount::new(self.get() / other.get())
            .map_err(|_| AmmError::Overflow("amount division overflow"))
    }
}
