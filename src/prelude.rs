//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use tidepool::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    Amount, BasisPoints, FeeRate, LiquidityChange, PoolId, PoolToken, Price, PriceImpact,
    SlippageTolerance, SwapQuote, TokenSide, WalletAddress, Withdrawal,
};

// Re-export core traits
pub use crate::traits::{FromConfig, LiquidityPool, SwapPool, WalletConnector};

// Re-export math utilities
pub use crate::math::{quote_swap, CheckedArithmetic};

// Re-export configuration
pub use crate::config::{EngineConfig, PoolConfig};

// Re-export error types
pub use crate::error::{AmmError, Result};

// Re-export pools, wallet, farm and governance
pub use crate::farm::YieldFarm;
pub use crate::governance::{Governance, ProposalType, VoteType};
pub use crate::pools::{ConstantProductPool, PoolRegistry};
pub use crate::wallet::{DevnetFaucet, MockConnection, MockWallet};
