//! Construction of pools from their configuration blueprints.
//!
//! # Validation Contract
//!
//! Implementations **must** validate every configuration invariant during
//! construction. A successfully constructed pool is in a valid initial
//! state: positive reserves, a fee below 100%, and a non-zero share supply.

use crate::error::AmmError;

/// Builds a value from a configuration of type `C`.
pub trait FromConfig<C>: Sized {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] (or a more specific
    /// variant) if the configuration is invalid.
    fn from_config(config: &C) -> Result<Self, AmmError>;
}
