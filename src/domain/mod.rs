//! Fundamental domain value types used throughout the library.
//!
//! This module contains the value types that model the pool domain:
//! amounts, fee rates, prices, price impact, swap quotes, pool sides and
//! wallet identifiers. Numeric types are newtypes with validated
//! constructors that reject NaN, infinities and out-of-range values.

mod amount;
mod basis_points;
mod fee_rate;
mod liquidity_change;
mod pool_id;
mod pool_metrics;
mod pool_token;
mod price;
mod price_impact;
mod slippage;
mod swap_quote;
mod token_side;
mod wallet_address;

pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use fee_rate::FeeRate;
pub use liquidity_change::{LiquidityChange, Withdrawal};
pub use pool_id::PoolId;
pub use pool_metrics::PoolMetrics;
pub use pool_token::PoolToken;
pub use price::Price;
pub use price_impact::PriceImpact;
pub use slippage::SlippageTolerance;
pub use swap_quote::SwapQuote;
pub use token_side::TokenSide;
pub use wallet_address::{TransactionSignature, WalletAddress};
