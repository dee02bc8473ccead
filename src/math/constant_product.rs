//! Constant-product (`x · y = k`) swap pricing.
//!
//! These are the stateless pricing functions every pool, quote screen and
//! settlement path calls into. They read only their arguments.
//!
//! # Swap Algorithm (exact input)
//!
//! 1. `fee = amount_in × fee_rate`
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = reserve_out − reserve_in × reserve_out / (reserve_in + net_input)`
//!    which is evaluated as `reserve_out × net_input / (reserve_in + net_input)`
//!    to avoid cancellation between two nearly equal terms.
//! 4. `price_impact = 1 − (amount_out / net_input) / (reserve_out / reserve_in)`
//!    `= net_input / (reserve_in + net_input)`
//!
//! Because the fee is removed before the invariant is applied,
//! `(reserve_in + amount_in) × (reserve_out − amount_out) ≥ k` once a
//! trade is settled.

use crate::domain::{Amount, FeeRate, Price, PriceImpact, SwapQuote};
use crate::error::AmmError;

/// Quotes an exact-input swap at the protocol default fee (0.30%).
///
/// # Errors
///
/// Returns [`AmmError::InvalidInput`] if any argument is zero, negative,
/// NaN or infinite, or if the trade is so large relative to the pool that
/// the output cannot be represented as strictly less than `reserve_out`.
///
/// # Examples
///
/// ```
/// use tidepool::math::quote_swap;
///
/// let quote = quote_swap(10_000.0, 1_000_000.0, 1_000_000.0).expect("valid trade");
/// assert!((quote.fee_amount().get() - 30.0).abs() < 1e-9);
/// assert!((quote.output_amount().get() - 9_871.580_343_97).abs() < 1e-6);
/// ```
pub fn quote_swap(
    input_amount: f64,
    reserve_in: f64,
    reserve_out: f64,
) -> crate::error::Result<SwapQuote> {
    quote_swap_with_fee(input_amount, reserve_in, reserve_out, FeeRate::DEFAULT)
}

/// Quotes an exact-input swap with an explicit fee rate.
///
/// # Errors
///
/// Same as [`quote_swap`].
pub fn quote_swap_with_fee(
    input_amount: f64,
    reserve_in: f64,
    reserve_out: f64,
    fee: FeeRate,
) -> crate::error::Result<SwapQuote> {
    let amount_in = positive(input_amount, "input amount must be positive and finite")?;
    let reserve_in = positive(reserve_in, "input reserve must be positive and finite")?;
    let reserve_out = positive(reserve_out, "output reserve must be positive and finite")?;

    let fee_amount = fee.apply(amount_in);
    let net_input = amount_in.get() - fee_amount.get();

    let denominator = reserve_in.get() + net_input;
    if !denominator.is_finite() {
        return Err(AmmError::InvalidInput("trade size exceeds representable range"));
    }

    // share of the output reserve released by the trade, in (0, 1)
    let share = net_input / denominator;
    let output = reserve_out.get() * share;
    if share >= 1.0 || output >= reserve_out.get() {
        return Err(AmmError::InvalidInput("trade would drain the output reserve"));
    }

    SwapQuote::new(
        amount_in,
        Amount::new(output)?,
        fee_amount,
        PriceImpact::new(share)?,
    )
}

/// Quotes an exact-output swap: the gross input (fee included) needed to
/// receive `output_amount`.
///
/// Inverts the exact-input formula:
/// `net_input = reserve_in × amount_out / (reserve_out − amount_out)`,
/// `amount_in = net_input / (1 − fee_rate)`.
///
/// # Errors
///
/// - [`AmmError::InvalidInput`] if any argument is zero, negative, NaN or
///   infinite, or the required input is not representable.
/// - [`AmmError::InsufficientLiquidity`] if `output_amount >= reserve_out`.
pub fn quote_exact_out(
    output_amount: f64,
    reserve_in: f64,
    reserve_out: f64,
    fee: FeeRate,
) -> crate::error::Result<SwapQuote> {
    let amount_out = positive(output_amount, "output amount must be positive and finite")?;
    let reserve_in = positive(reserve_in, "input reserve must be positive and finite")?;
    let reserve_out = positive(reserve_out, "output reserve must be positive and finite")?;

    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }

    let remaining = reserve_out.get() - amount_out.get();
    let net_input = reserve_in.get() * (amount_out.get() / remaining);
    let gross = net_input / (1.0 - fee.get());
    let amount_in = positive(gross, "required input exceeds representable range")?;

    let impact = net_input / (reserve_in.get() + net_input);

    SwapQuote::new(
        amount_in,
        amount_out,
        fee.apply(amount_in),
        PriceImpact::new(impact)?,
    )
}

/// Pre-trade mid price: units of the output token per unit of input,
/// `reserve_out / reserve_in`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidInput`] if either reserve is not positive
/// and finite.
pub fn spot_price(reserve_in: f64, reserve_out: f64) -> crate::error::Result<Price> {
    let reserve_in = positive(reserve_in, "input reserve must be positive and finite")?;
    let reserve_out = positive(reserve_out, "output reserve must be positive and finite")?;
    Price::from_amounts(reserve_out, reserve_in)
}

fn positive(value: f64, reason: &'static str) -> crate::error::Result<Amount> {
    Amount::positive(value).map_err(|_| AmmError::InvalidInput(reason))
}
