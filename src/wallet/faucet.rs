//! Devnet faucet flow: airdrop, confirm, refresh balance.

use std::sync::Arc;

use tracing::debug;

use super::{lamports_to_sol, MockConnection, LAMPORTS_PER_SOL};
use crate::domain::{Amount, TransactionSignature};
use crate::error::AmmError;
use crate::traits::WalletConnector;

/// Outcome of a successful airdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct AirdropReceipt {
    /// Signature of the confirmed airdrop.
    pub signature: TransactionSignature,
    /// Balance reported after the airdrop, in SOL.
    pub balance: Amount,
}

/// Requests fixed-size airdrops for a connected wallet.
#[derive(Debug, Clone)]
pub struct DevnetFaucet {
    connection: Arc<MockConnection>,
    lamports_per_request: u64,
}

impl DevnetFaucet {
    /// Creates a faucet that drops 1 SOL per request.
    #[must_use]
    pub const fn new(connection: Arc<MockConnection>) -> Self {
        Self {
            connection,
            lamports_per_request: LAMPORTS_PER_SOL,
        }
    }

    /// Returns the airdrop size in lamports.
    #[must_use]
    pub const fn lamports_per_request(&self) -> u64 {
        self.lamports_per_request
    }

    /// Airdrops to `wallet`, confirms, and reads the new balance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::WalletNotConnected`] if `wallet` has no session.
    /// - [`AmmError::InvalidSignature`] if confirmation fails.
    pub fn request_airdrop<W: WalletConnector>(
        &self,
        wallet: &W,
    ) -> Result<AirdropReceipt, AmmError> {
        let address = wallet.address().ok_or(AmmError::WalletNotConnected)?;
        let signature = self
            .connection
            .request_airdrop(address, self.lamports_per_request)?;
        self.connection.confirm_transaction(&signature)?;
        let balance = wallet.get_balance()?;

        debug!(
            address = %address,
            sol = lamports_to_sol(self.lamports_per_request),
            signature = signature.short(),
            balance = balance.get(),
            "airdrop confirmed"
        );

        Ok(AirdropReceipt { signature, balance })
    }

    /// Reads the connected wallet's balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::WalletNotConnected`] without a session.
    pub fn check_balance<W: WalletConnector>(&self, wallet: &W) -> Result<Amount, AmmError> {
        wallet.get_balance()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::wallet::MockWallet;

    fn setup() -> (DevnetFaucet, MockWallet) {
        let conn = Arc::new(MockConnection::with_seed(MockConnection::DEVNET_ENDPOINT, 1));
        (DevnetFaucet::new(Arc::clone(&conn)), MockWallet::new(conn))
    }

    #[test]
    fn airdrop_requires_connection() {
        let (faucet, wallet) = setup();
        assert!(matches!(
            faucet.request_airdrop(&wallet),
            Err(AmmError::WalletNotConnected)
        ));
        assert!(matches!(
            faucet.check_balance(&wallet),
            Err(AmmError::WalletNotConnected)
        ));
    }

    #[test]
    fn airdrop_returns_signature_and_balance() {
        let (faucet, mut wallet) = setup();
        let Ok(_) = wallet.connect() else {
            panic!("expected Ok");
        };
        let Ok(receipt) = faucet.request_airdrop(&wallet) else {
            panic!("expected Ok");
        };
        assert!(receipt.signature.as_str().starts_with("mock_signature_"));
        assert!(receipt.balance.get() >= 0.5);
        assert_eq!(faucet.lamports_per_request(), LAMPORTS_PER_SOL);
    }
}
