//! Liquidity management trait extending [`SwapPool`].
//!
//! # Share Accounting Invariant
//!
//! The total share supply reported by [`LiquidityPool::total_shares`]
//! **only** changes through [`LiquidityPool::add_liquidity`] and
//! [`LiquidityPool::remove_liquidity`]. Swaps grow reserves (the fee stays
//! in the pool) without minting shares, so each share's claim grows.

use super::SwapPool;
use crate::domain::{Amount, LiquidityChange, Withdrawal};
use crate::error::AmmError;

/// Trait for pools that accept deposits and pay out withdrawals.
pub trait LiquidityPool: SwapPool {
    /// Deposits tokens and returns the LP shares minted.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidLiquidity`] if `change` is not an `Add`.
    /// - [`AmmError::InvalidInput`] if either side is zero or the deposit
    ///   is too small to mint.
    fn add_liquidity(&mut self, change: &LiquidityChange) -> Result<Amount, AmmError>;

    /// Burns LP shares and returns the proportional reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidLiquidity`] if `change` is not a `Remove`.
    /// - [`AmmError::InsufficientLiquidity`] if more shares are burned
    ///   than exist, or the withdrawal would empty the pool.
    fn remove_liquidity(&mut self, change: &LiquidityChange) -> Result<Withdrawal, AmmError>;

    /// Returns the outstanding LP share supply.
    #[must_use]
    fn total_shares(&self) -> Amount;
}
