//! Outcome of pricing a swap.

use core::fmt;

use super::{Amount, Price, PriceImpact, SlippageTolerance};
use crate::error::AmmError;

/// The economics of a swap: what goes in, what comes out, the fee
/// deducted and the price impact.
///
/// Quotes are derived and ephemeral; a pool produces a fresh one per
/// request and settlement returns the quote it executed.
///
/// # Invariants
///
/// - `input_amount > 0`.
/// - `fee_amount <= input_amount`.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Amount, PriceImpact, SwapQuote};
///
/// let quote = SwapQuote::new(
///     Amount::new(100.0).expect("finite"),
///     Amount::new(95.0).expect("finite"),
///     Amount::new(0.3).expect("finite"),
///     PriceImpact::new(0.01).expect("in range"),
/// );
/// assert!(quote.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapQuote {
    input_amount: Amount,
    output_amount: Amount,
    fee_amount: Amount,
    price_impact: PriceImpact,
}

impl SwapQuote {
    /// Creates a new `SwapQuote` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `input_amount` is zero or
    /// the fee exceeds the input.
    pub fn new(
        input_amount: Amount,
        output_amount: Amount,
        fee_amount: Amount,
        price_impact: PriceImpact,
    ) -> crate::error::Result<Self> {
        if input_amount.is_zero() {
            return Err(AmmError::InvalidInput("input amount must be positive"));
        }
        if fee_amount > input_amount {
            return Err(AmmError::InvalidInput("fee must not exceed input amount"));
        }
        Ok(Self {
            input_amount,
            output_amount,
            fee_amount,
            price_impact,
        })
    }

    /// Returns the gross input amount (fee included).
    pub const fn input_amount(&self) -> Amount {
        self.input_amount
    }

    /// Returns the output amount.
    pub const fn output_amount(&self) -> Amount {
        self.output_amount
    }

    /// Returns the fee deducted from the input.
    pub const fn fee_amount(&self) -> Amount {
        self.fee_amount
    }

    /// Returns the price impact.
    #[must_use]
    pub const fn price_impact(&self) -> PriceImpact {
        self.price_impact
    }

    /// Realized price as `output_amount / input_amount`, fee included.
    ///
    /// # Errors
    ///
    /// Propagates [`Price::from_amounts`] failures.
    pub fn effective_price(&self) -> crate::error::Result<Price> {
        Price::from_amounts(self.output_amount, self.input_amount)
    }

    /// Smallest output the caller accepts at the given tolerance:
    /// `output_amount × (1 − tolerance)`.
    pub fn minimum_received(&self, tolerance: SlippageTolerance) -> Amount {
        let scaled = self.output_amount.get() * (1.0 - tolerance.as_fraction());
        Amount::new(scaled).unwrap_or(Amount::ZERO)
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote(in={}, out={}, fee={}, impact={})",
            self.input_amount, self.output_amount, self.fee_amount, self.price_impact
        )
    }
}
