//! Deterministic-when-seeded stand-ins for an RPC connection and a wallet.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Amount, TransactionSignature, WalletAddress};
use crate::error::AmmError;
use crate::traits::WalletConnector;

const SIGNATURE_PREFIX: &str = "mock_signature_";
const ADDRESS_PREFIX: &str = "Demo";
const ADDRESS_SUFFIX_LEN: usize = 11;
const SIGNATURE_SUFFIX_LEN: usize = 9;
const MIN_BALANCE_SOL: f64 = 0.5;
const MAX_BALANCE_SOL: f64 = 5.0;

/// Fake RPC connection.
///
/// Holds its RNG behind a `Mutex`, so one connection can be shared across
/// threads through an `Arc`.
#[derive(Debug)]
pub struct MockConnection {
    endpoint: String,
    rng: Mutex<StdRng>,
}

impl MockConnection {
    /// Public devnet RPC endpoint.
    pub const DEVNET_ENDPOINT: &'static str = "https://api.devnet.solana.com";

    /// Creates a connection seeded from OS entropy.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a connection with a fixed seed for reproducible output.
    #[must_use]
    pub fn with_seed(endpoint: impl Into<String>, seed: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns the endpoint this connection was created for.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns a random balance in `[0.5, 5.0)` SOL for any address.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches a real RPC lookup.
    pub fn get_balance(&self, _address: &WalletAddress) -> Result<Amount, AmmError> {
        let sol = self.rng.lock().gen_range(MIN_BALANCE_SOL..MAX_BALANCE_SOL);
        Amount::new(sol)
    }

    /// Pretends to airdrop `lamports` to `address` and returns a
    /// `mock_signature_<millis>_<9 base36 chars>` signature.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] for a zero amount.
    pub fn request_airdrop(
        &self,
        address: &WalletAddress,
        lamports: u64,
    ) -> Result<TransactionSignature, AmmError> {
        if lamports == 0 {
            return Err(AmmError::InvalidInput("airdrop amount must be positive"));
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let suffix = self.base36(SIGNATURE_SUFFIX_LEN);
        tracing::debug!(address = %address, lamports, "airdrop requested");
        Ok(TransactionSignature::new(format!(
            "{SIGNATURE_PREFIX}{millis}_{suffix}"
        )))
    }

    /// Confirms a signature produced by [`MockConnection::request_airdrop`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidSignature`] for a signature this
    /// connection could not have issued.
    pub fn confirm_transaction(&self, signature: &TransactionSignature) -> Result<(), AmmError> {
        let valid = signature
            .as_str()
            .strip_prefix(SIGNATURE_PREFIX)
            .and_then(|rest| rest.split_once('_'))
            .is_some_and(|(millis, suffix)| {
                !millis.is_empty()
                    && millis.bytes().all(|b| b.is_ascii_digit())
                    && suffix.len() == SIGNATURE_SUFFIX_LEN
                    && suffix.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
            });
        if valid {
            Ok(())
        } else {
            Err(AmmError::InvalidSignature(signature.as_str().to_owned()))
        }
    }

    /// Generates a `Demo` + 11 base36 char address.
    #[must_use]
    pub fn random_address(&self) -> WalletAddress {
        WalletAddress::new(format!(
            "{ADDRESS_PREFIX}{}",
            self.base36(ADDRESS_SUFFIX_LEN)
        ))
    }

    fn base36(&self, len: usize) -> String {
        let mut rng = self.rng.lock();
        (0..len)
            .filter_map(|_| char::from_digit(rng.gen_range(0..36), 36))
            .collect()
    }
}

/// Demo wallet that connects without user interaction.
#[derive(Debug, Clone)]
pub struct MockWallet {
    connection: Arc<MockConnection>,
    address: Option<WalletAddress>,
}

impl MockWallet {
    /// Creates a disconnected wallet backed by `connection`.
    #[must_use]
    pub const fn new(connection: Arc<MockConnection>) -> Self {
        Self {
            connection,
            address: None,
        }
    }

    /// Returns the backing connection.
    #[must_use]
    pub const fn connection(&self) -> &Arc<MockConnection> {
        &self.connection
    }
}

impl WalletConnector for MockWallet {
    fn connect(&mut self) -> Result<WalletAddress, AmmError> {
        if let Some(address) = &self.address {
            return Ok(address.clone());
        }
        let address = self.connection.random_address();
        tracing::debug!(address = %address, "wallet connected");
        self.address = Some(address.clone());
        Ok(address)
    }

    fn disconnect(&mut self) {
        if let Some(address) = self.address.take() {
            tracing::debug!(address = %address, "wallet disconnected");
        }
    }

    fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    fn address(&self) -> Option<&WalletAddress> {
        self.address.as_ref()
    }

    fn get_balance(&self) -> Result<Amount, AmmError> {
        let address = self.address.as_ref().ok_or(AmmError::WalletNotConnected)?;
        self.connection.get_balance(address)
    }
}
