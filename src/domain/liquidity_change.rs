//! Deposits into and withdrawals from a pool.

use core::fmt;

use super::Amount;
use crate::error::AmmError;

/// Describes a liquidity mutation: depositing both tokens or burning
/// LP shares.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Amount, LiquidityChange};
///
/// let change = LiquidityChange::add(
///     Amount::new(100.0).expect("finite"),
///     Amount::new(200.0).expect("finite"),
/// );
/// assert!(change.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiquidityChange {
    /// Add liquidity by depositing token amounts.
    Add {
        /// Amount of token A to deposit.
        amount_a: Amount,
        /// Amount of token B to deposit.
        amount_b: Amount,
    },
    /// Burn LP shares and withdraw the proportional reserves.
    Remove {
        /// LP shares to burn.
        shares: Amount,
    },
}

impl LiquidityChange {
    /// Creates an `Add` variant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidLiquidity`] if both amounts are zero.
    pub fn add(amount_a: Amount, amount_b: Amount) -> crate::error::Result<Self> {
        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(AmmError::InvalidLiquidity(
                "at least one amount must be positive",
            ));
        }
        Ok(Self::Add { amount_a, amount_b })
    }

    /// Creates a `Remove` variant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidLiquidity`] if `shares` is zero.
    pub fn remove(shares: Amount) -> crate::error::Result<Self> {
        if shares.is_zero() {
            return Err(AmmError::InvalidLiquidity("cannot remove zero shares"));
        }
        Ok(Self::Remove { shares })
    }

    /// Returns `true` if this is an `Add` variant.
    #[must_use]
    pub const fn is_add(&self) -> bool {
        matches!(self, Self::Add { .. })
    }

    /// Returns `true` if this is a `Remove` variant.
    #[must_use]
    pub const fn is_remove(&self) -> bool {
        matches!(self, Self::Remove { .. })
    }
}

impl fmt::Display for LiquidityChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { amount_a, amount_b } => write!(f, "Add(a={amount_a}, b={amount_b})"),
            Self::Remove { shares } => write!(f, "Remove(shares={shares})"),
        }
    }
}

/// Token amounts paid out when LP shares are burned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Withdrawal {
    /// Token A returned to the provider.
    pub amount_a: Amount,
    /// Token B returned to the provider.
    pub amount_b: Amount,
}
