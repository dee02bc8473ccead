//! Core swap pool trait for quoting and settling swaps.
//!
//! [`SwapPool`] is the abstraction the swap screen talks to. It covers
//! the lifecycle of a trade:
//!
//! 1. **Quote**: [`SwapPool::quote`] prices a trade without touching
//!    reserves.
//! 2. **Settle**: [`SwapPool::swap`] re-prices against current reserves,
//!    enforces the caller's minimum output, and applies the trade.
//! 3. **Inspect**: [`SwapPool::spot_price`] and [`SwapPool::fee_rate`].
//!
//! # Fee Deduction Invariant
//!
//! All implementations deduct the fee from the input amount before
//! applying the pricing curve:
//!
//! ```text
//! fee_amount = amount_in × fee_rate
//! net_input  = amount_in − fee_amount
//! amount_out = price_curve(net_input)
//! ```

use crate::domain::{Amount, FeeRate, Price, SwapQuote, TokenSide};
use crate::error::AmmError;

/// Trait for pools that can price and execute swaps.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`]. Common variants:
///
/// - [`AmmError::InvalidInput`]: non-positive or non-finite trade size
/// - [`AmmError::SlippageExceeded`]: output below the caller's minimum
pub trait SwapPool {
    /// Prices selling `amount_in` of `side_in` without mutating the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if the amount or a reserve is not
    ///   strictly positive.
    fn quote(&self, side_in: TokenSide, amount_in: Amount) -> Result<SwapQuote, AmmError>;

    /// Sells `amount_in` of `side_in` and updates reserves atomically.
    ///
    /// The swap either completes fully or returns an error with the pool
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if the amount is not strictly positive.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_output`.
    fn swap(
        &mut self,
        side_in: TokenSide,
        amount_in: Amount,
        min_output: Amount,
    ) -> Result<SwapQuote, AmmError>;

    /// Current mid price: units of the opposite side per unit of `base`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if a reserve is zero.
    fn spot_price(&self, base: TokenSide) -> Result<Price, AmmError>;

    /// Returns the fee charged on swap input.
    #[must_use]
    fn fee_rate(&self) -> FeeRate;
}
