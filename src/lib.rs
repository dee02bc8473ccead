//! # Tidepool
//!
//! Constant-product AMM engine for a Solana-style DeFi dashboard: swap
//! quoting, pool bookkeeping, liquidity shares, mocked wallet flows, a
//! yield farm and proposal voting.
//!
//! # Quick Start
//!
//! ## Quote a swap
//!
//! ```rust
//! use tidepool::math::quote_swap;
//!
//! // sell 10 000 of token A into a 1M / 1M pool at the 0.30% default fee
//! let quote = quote_swap(10_000.0, 1_000_000.0, 1_000_000.0).expect("valid trade");
//!
//! assert!((quote.fee_amount().get() - 30.0).abs() < 1e-9);
//! assert!(quote.output_amount().get() < 9_970.0);
//! ```
//!
//! ## Load pools and settle a trade
//!
//! ```rust
//! use tidepool::config::EngineConfig;
//! use tidepool::domain::{Amount, PoolId, SlippageTolerance, TokenSide};
//! use tidepool::pools::PoolRegistry;
//!
//! let cfg = EngineConfig::from_toml_str(r#"
//!     [[pools]]
//!     id = "sol-usdc"
//!     name = "SOL/USDC"
//!     token_a = { symbol = "SOL", reserve = 10000.0 }
//!     token_b = { symbol = "USDC", reserve = 1000000.0 }
//! "#).expect("valid config");
//!
//! let registry = PoolRegistry::from_config(&cfg).expect("registry");
//! let id = PoolId::new("sol-usdc");
//! let amount = Amount::new(5.0).expect("finite");
//!
//! let quote = registry.quote(&id, TokenSide::A, amount).expect("quote");
//! let min_out = quote.minimum_received(SlippageTolerance::DEFAULT);
//! let settled = registry
//!     .settle_swap(&id, TokenSide::A, amount, min_out)
//!     .expect("settled");
//! assert!(settled.output_amount() >= min_out);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ EngineConfig │  TOML → validated pool blueprints
//! └──────┬───────┘
//!        │ PoolRegistry::from_config
//!        ▼
//! ┌──────────────┐
//! │ PoolRegistry │  one lock per pool, quote-check-apply under the lock
//! └──────┬───────┘
//!        │ SwapPool + LiquidityPool traits
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  ConstantProductPool: reserves, shares, fee counters
//! └──────┬───────┘
//!        │ quote_swap_with_fee
//!        ▼
//! ┌──────────────┐
//! │     Math     │  pure constant-product pricing
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Validated value types: [`Amount`](domain::Amount), [`FeeRate`](domain::FeeRate), [`SwapQuote`](domain::SwapQuote), etc. |
//! | [`math`]   | Pricing functions and checked arithmetic |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FromConfig`](traits::FromConfig), [`WalletConnector`](traits::WalletConnector) |
//! | [`config`] | [`EngineConfig`](config::EngineConfig) and [`PoolConfig`](config::PoolConfig), loadable from TOML |
//! | [`pools`]  | [`ConstantProductPool`](pools::ConstantProductPool) and [`PoolRegistry`](pools::PoolRegistry) |
//! | [`wallet`] | Mock connection, demo wallet and devnet faucet |
//! | [`farm`]   | [`YieldFarm`](farm::YieldFarm) staking rewards |
//! | [`governance`] | [`Governance`](governance::Governance) proposals, votes and delegation |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits `tracing` events (settlements, liquidity changes,
//! airdrops, farm updates, votes) and never installs a subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod farm;
pub mod governance;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
pub mod wallet;
