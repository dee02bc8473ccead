//! Mocked chain connectivity: balances, airdrops and a demo wallet.
//!
//! Nothing here touches a network. [`MockConnection`] fabricates balances
//! and signatures, [`MockWallet`] implements
//! [`WalletConnector`](crate::traits::WalletConnector) on top of it, and
//! [`DevnetFaucet`] drives the airdrop flow end to end.

mod faucet;
mod mock;

pub use faucet::{AirdropReceipt, DevnetFaucet};
pub use mock::{MockConnection, MockWallet};

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Converts lamports to SOL.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
