//! Core trait abstractions.
//!
//! [`SwapPool`] prices and settles swaps, [`LiquidityPool`] manages LP
//! shares, [`FromConfig`] builds pools from configuration, and
//! [`WalletConnector`] abstracts the user's wallet session.

mod from_config;
mod liquidity_pool;
mod swap_pool;
mod wallet_connector;

pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
pub use wallet_connector::WalletConnector;
