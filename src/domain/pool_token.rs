//! One side of a pool: a token symbol and its reserve.

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// A token held by a pool together with its current reserve.
///
/// # Examples
///
/// ```
/// use tidepool::domain::{Amount, PoolToken};
///
/// let sol = PoolToken::new("SOL", Amount::new(10_000.0).expect("finite")).expect("valid");
/// assert_eq!(sol.symbol(), "SOL");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolToken {
    symbol: String,
    reserve: Amount,
}

impl PoolToken {
    /// Creates a pool token.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the symbol is blank.
    pub fn new(symbol: impl Into<String>, reserve: Amount) -> crate::error::Result<Self> {
        let token = Self {
            symbol: symbol.into(),
            reserve,
        };
        token.validate()?;
        Ok(token)
    }

    /// Validates the symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the symbol is blank.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("token symbol must not be empty"));
        }
        Ok(())
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the current reserve.
    pub const fn reserve(&self) -> Amount {
        self.reserve
    }

    pub(crate) fn set_reserve(&mut self, reserve: Amount) {
        self.reserve = reserve;
    }
}
