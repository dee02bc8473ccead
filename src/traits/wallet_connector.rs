//! Wallet capability used by the dashboard.

use crate::domain::{Amount, WalletAddress};
use crate::error::AmmError;

/// A wallet the user can connect, inspect and disconnect.
///
/// Signing and broadcasting are out of scope; the trait only covers the
/// session and balance lookups the dashboard needs.
pub trait WalletConnector {
    /// Establishes a session and returns the wallet address.
    ///
    /// Connecting an already connected wallet returns the existing
    /// address.
    ///
    /// # Errors
    ///
    /// Implementation-specific connection failures.
    fn connect(&mut self) -> Result<WalletAddress, AmmError>;

    /// Ends the session. Disconnecting twice is a no-op.
    fn disconnect(&mut self);

    /// Returns `true` while a session is open.
    #[must_use]
    fn is_connected(&self) -> bool;

    /// Returns the connected address, if any.
    #[must_use]
    fn address(&self) -> Option<&WalletAddress>;

    /// Returns the native-token balance of the connected wallet.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::WalletNotConnected`] without a session.
    fn get_balance(&self) -> Result<Amount, AmmError>;
}
