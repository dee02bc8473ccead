//! Configuration for a single constant-product pool.

use serde::Deserialize;

use crate::domain::{Amount, BasisPoints, FeeRate, PoolId, PoolMetrics, PoolToken};
use crate::error::AmmError;

/// Blueprint for a constant-product pool (`x · y = k`).
///
/// Defines the immutable identity of a pool (id, display name, token
/// symbols), its initial reserves, an optional fee override and the
/// display metrics shown next to it.
///
/// # Derived Values
///
/// - Initial invariant: `k = reserve_a × reserve_b`
/// - Initial price of A in B: `P₀ = reserve_b / reserve_a`
///
/// # Validation
///
/// - Id and name must not be blank.
/// - Both reserves must be strictly positive.
/// - The two symbols must differ.
/// - A fee override must be below 10 000 bp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PoolConfig {
    id: PoolId,
    name: String,
    token_a: PoolToken,
    token_b: PoolToken,
    #[serde(default)]
    fee_bps: Option<BasisPoints>,
    #[serde(default)]
    metrics: PoolMetrics,
}

impl PoolConfig {
    /// Creates a new `PoolConfig` using the engine-wide fee.
    ///
    /// # Errors
    ///
    /// Returns any error from [`PoolConfig::validate`].
    pub fn new(
        id: PoolId,
        name: impl Into<String>,
        token_a: PoolToken,
        token_b: PoolToken,
    ) -> Result<Self, AmmError> {
        let config = Self {
            id,
            name: name.into(),
            token_a,
            token_b,
            fee_bps: None,
            metrics: PoolMetrics::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Overrides the engine-wide fee for this pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for 10 000 bp or more.
    pub fn with_fee(mut self, fee_bps: BasisPoints) -> Result<Self, AmmError> {
        FeeRate::from_basis_points(fee_bps)?;
        self.fee_bps = Some(fee_bps);
        Ok(self)
    }

    /// Attaches display metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: PoolMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for a blank id, name or symbol,
    ///   or identical symbols.
    /// - [`AmmError::InvalidInput`] if either reserve is zero.
    /// - [`AmmError::InvalidFee`] for an out-of-range fee override.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.id.is_blank() {
            return Err(AmmError::InvalidConfiguration("pool id must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("pool name must not be empty"));
        }
        self.token_a.validate()?;
        self.token_b.validate()?;
        if self.token_a.symbol() == self.token_b.symbol() {
            return Err(AmmError::InvalidConfiguration(
                "pool requires two distinct token symbols",
            ));
        }
        if self.token_a.reserve().is_zero() || self.token_b.reserve().is_zero() {
            return Err(AmmError::InvalidInput("initial reserves must be positive"));
        }
        if let Some(bps) = self.fee_bps {
            FeeRate::from_basis_points(bps)?;
        }
        Ok(())
    }

    /// Returns the pool id.
    #[must_use]
    pub const fn id(&self) -> &PoolId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns token A with its initial reserve.
    #[must_use]
    pub const fn token_a(&self) -> &PoolToken {
        &self.token_a
    }

    /// Returns token B with its initial reserve.
    #[must_use]
    pub const fn token_b(&self) -> &PoolToken {
        &self.token_b
    }

    /// Returns the initial reserve of token A.
    pub const fn reserve_a(&self) -> Amount {
        self.token_a.reserve()
    }

    /// Returns the initial reserve of token B.
    pub const fn reserve_b(&self) -> Amount {
        self.token_b.reserve()
    }

    /// Returns the fee override, if any.
    #[must_use]
    pub const fn fee_bps(&self) -> Option<BasisPoints> {
        self.fee_bps
    }

    /// Resolves the effective fee: the override, or `default` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for an out-of-range override.
    pub fn fee_rate(&self, default: FeeRate) -> Result<FeeRate, AmmError> {
        self.fee_bps
            .map_or(Ok(default), FeeRate::from_basis_points)
    }

    /// Returns the display metrics.
    #[must_use]
    pub const fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }
}
