//! Engine-wide settings and the list of pools to create.

use std::path::Path;

use serde::Deserialize;

use super::PoolConfig;
use crate::domain::{BasisPoints, FeeRate, PriceImpact, SlippageTolerance};
use crate::error::AmmError;

/// Top-level configuration: protocol fee, quote-screen thresholds and the
/// mock pools a [`PoolRegistry`](crate::pools::PoolRegistry) starts with.
///
/// Every field has a default, so an empty document is a valid
/// configuration (30 bp fee, 5% high-impact threshold, 0.5% slippage, no
/// pools).
///
/// # Examples
///
/// ```
/// use tidepool::config::EngineConfig;
///
/// let cfg = EngineConfig::from_toml_str(r#"
///     fee_bps = 25
///
///     [[pools]]
///     id = "sol-usdc"
///     name = "SOL/USDC"
///     token_a = { symbol = "SOL", reserve = 10000.0 }
///     token_b = { symbol = "USDC", reserve = 1000000.0 }
/// "#).expect("valid config");
///
/// assert_eq!(cfg.fee_bps().get(), 25);
/// assert_eq!(cfg.pools().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    fee_bps: BasisPoints,
    high_impact_threshold: PriceImpact,
    default_slippage_percent: SlippageTolerance,
    pools: Vec<PoolConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fee_bps: BasisPoints::new(30),
            high_impact_threshold: PriceImpact::HIGH,
            default_slippage_percent: SlippageTolerance::DEFAULT,
            pools: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ConfigParse`] if the document is malformed or a value
    ///   fails its type's validation.
    /// - Any error from [`EngineConfig::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self, AmmError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Io`] if the file cannot be read.
    /// - Any error from [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AmmError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading engine configuration");
        Self::from_toml_str(&source)
    }

    /// Adds a pool.
    #[must_use]
    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pools.push(pool);
        self
    }

    /// Sets the protocol fee.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for 10 000 bp or more.
    pub fn with_fee(mut self, fee_bps: BasisPoints) -> Result<Self, AmmError> {
        FeeRate::from_basis_points(fee_bps)?;
        self.fee_bps = fee_bps;
        Ok(self)
    }

    /// Validates the fee and every pool, and rejects duplicate pool ids.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] for an out-of-range fee.
    /// - [`AmmError::DuplicatePool`] if two pools share an id.
    /// - Any error from [`PoolConfig::validate`].
    pub fn validate(&self) -> Result<(), AmmError> {
        FeeRate::from_basis_points(self.fee_bps)?;
        for (idx, pool) in self.pools.iter().enumerate() {
            pool.validate()?;
            if self.pools[..idx].iter().any(|p| p.id() == pool.id()) {
                return Err(AmmError::DuplicatePool(pool.id().clone()));
            }
        }
        Ok(())
    }

    /// Returns the protocol fee in basis points.
    #[must_use]
    pub const fn fee_bps(&self) -> BasisPoints {
        self.fee_bps
    }

    /// Returns the protocol fee as a rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for an out-of-range fee.
    pub fn fee_rate(&self) -> Result<FeeRate, AmmError> {
        FeeRate::from_basis_points(self.fee_bps)
    }

    /// Returns the impact above which quotes are flagged.
    #[must_use]
    pub const fn high_impact_threshold(&self) -> PriceImpact {
        self.high_impact_threshold
    }

    /// Returns the default slippage tolerance.
    #[must_use]
    pub const fn default_slippage(&self) -> SlippageTolerance {
        self.default_slippage_percent
    }

    /// Returns the configured pools.
    #[must_use]
    pub fn pools(&self) -> &[PoolConfig] {
        &self.pools
    }
}
