//! Shared pool registry with per-pool serialized settlement.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use super::ConstantProductPool;
use crate::config::EngineConfig;
use crate::domain::{Amount, LiquidityChange, PoolId, Price, SwapQuote, TokenSide, Withdrawal};
use crate::error::AmmError;
use crate::traits::{LiquidityPool, SwapPool};

type PoolHandle = Arc<Mutex<ConstantProductPool>>;

/// Thread-safe collection of pools keyed by [`PoolId`].
///
/// The id map sits behind an `RwLock` and each pool behind its own
/// `Mutex`. A settlement holds its pool's lock for the whole
/// quote-check-apply sequence, so concurrent trades on one pool are
/// serialized while trades on different pools proceed in parallel.
///
/// # Example
///
/// ```rust
/// use tidepool::config::EngineConfig;
/// use tidepool::domain::{Amount, PoolId, TokenSide};
/// use tidepool::pools::PoolRegistry;
///
/// let cfg = EngineConfig::from_toml_str(r#"
///     [[pools]]
///     id = "sol-usdc"
///     name = "SOL/USDC"
///     token_a = { symbol = "SOL", reserve = 10000.0 }
///     token_b = { symbol = "USDC", reserve = 1000000.0 }
/// "#).expect("valid config");
///
/// let registry = PoolRegistry::from_config(&cfg).expect("registry built");
/// let id = PoolId::new("sol-usdc");
/// let amount = Amount::new(1.0).expect("finite");
/// let quote = registry.quote(&id, TokenSide::A, amount).expect("quote");
/// let settled = registry
///     .settle_swap(&id, TokenSide::A, amount, quote.output_amount())
///     .expect("settled");
/// assert_eq!(settled, quote);
/// ```
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: RwLock<HashMap<PoolId, PoolHandle>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every configured pool, using the engine fee for pools
    /// without an override.
    ///
    /// # Errors
    ///
    /// - Any error from [`EngineConfig::validate`].
    /// - Any error from [`ConstantProductPool::with_default_fee`].
    pub fn from_config(config: &EngineConfig) -> Result<Self, AmmError> {
        config.validate()?;
        let default_fee = config.fee_rate()?;
        let registry = Self::new();
        for pool_config in config.pools() {
            registry.register(ConstantProductPool::with_default_fee(pool_config, default_fee)?)?;
        }
        Ok(registry)
    }

    /// Adds a pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DuplicatePool`] if the id is already taken.
    pub fn register(&self, pool: ConstantProductPool) -> Result<(), AmmError> {
        let mut pools = self.pools.write();
        if pools.contains_key(pool.id()) {
            return Err(AmmError::DuplicatePool(pool.id().clone()));
        }
        debug!(pool = %pool.id(), name = pool.name(), "pool registered");
        pools.insert(pool.id().clone(), Arc::new(Mutex::new(pool)));
        Ok(())
    }

    /// Returns the number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.read().len()
    }

    /// Returns `true` if no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.read().is_empty()
    }

    /// Returns the registered ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<PoolId> {
        let mut ids: Vec<PoolId> = self.pools.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns a copy of the pool's current state.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown id.
    pub fn snapshot(&self, id: &PoolId) -> Result<ConstantProductPool, AmmError> {
        Ok(self.handle(id)?.lock().clone())
    }

    /// Prices a swap against the pool's current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown id.
    /// - Any error from [`SwapPool::quote`].
    pub fn quote(
        &self,
        id: &PoolId,
        side_in: TokenSide,
        amount_in: Amount,
    ) -> Result<SwapQuote, AmmError> {
        self.handle(id)?.lock().quote(side_in, amount_in)
    }

    /// Prices buying exactly `amount_out` from the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown id.
    /// - Any error from [`ConstantProductPool::quote_exact_out`].
    pub fn quote_exact_out(
        &self,
        id: &PoolId,
        side_in: TokenSide,
        amount_out: Amount,
    ) -> Result<SwapQuote, AmmError> {
        self.handle(id)?.lock().quote_exact_out(side_in, amount_out)
    }

    /// Returns the pool's mid price for `base`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown id.
    /// - Any error from [`SwapPool::spot_price`].
    pub fn spot_price(&self, id: &PoolId, base: TokenSide) -> Result<Price, AmmError> {
        self.handle(id)?.lock().spot_price(base)
    }

    /// Re-prices and applies a swap under the pool's lock.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown id.
    /// - [`AmmError::SlippageExceeded`] if the fresh output is below
    ///   `min_output`; the pool is left unchanged.
    /// - Any other error from [`SwapPool::swap`].
    pub fn settle_swap(
        &self,
        id: &PoolId,
        side_in: TokenSide,
        amount_in: Amount,
        min_output: Amount,
    ) -> Result<SwapQuote, AmmError> {
        self.handle(id)?.lock().swap(side_in, amount_in, min_output)
    }

    /// Deposits into the pool and returns the minted shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown id.
    /// - Any error from [`LiquidityPool::add_liquidity`].
    pub fn add_liquidity(&self, id: &PoolId, change: &LiquidityChange) -> Result<Amount, AmmError> {
        self.handle(id)?.lock().add_liquidity(change)
    }

    /// Burns shares and returns the withdrawn amounts.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown id.
    /// - Any error from [`LiquidityPool::remove_liquidity`].
    pub fn remove_liquidity(
        &self,
        id: &PoolId,
        change: &LiquidityChange,
    ) -> Result<Withdrawal, AmmError> {
        self.handle(id)?.lock().remove_liquidity(change)
    }

    // The map lock is released before the pool lock is taken.
    fn handle(&self, id: &PoolId) -> Result<PoolHandle, AmmError> {
        self.pools
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| AmmError::PoolNotFound(id.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::thread;

    use super::*;
    use crate::config::PoolConfig;
    use crate::domain::{BasisPoints, PoolToken};
    use crate::traits::FromConfig;

    fn amt(v: f64) -> Amount {
        let Ok(a) = Amount::new(v) else {
            panic!("valid amount");
        };
        a
    }

    fn pool(id: &str, ra: f64, rb: f64) -> ConstantProductPool {
        let (Ok(a), Ok(b)) = (PoolToken::new("AAA", amt(ra)), PoolToken::new("BBB", amt(rb)))
        else {
            panic!("valid tokens");
        };
        let Ok(cfg) = PoolConfig::new(PoolId::new(id), id, a, b) else {
            panic!("valid config");
        };
        let Ok(p) = ConstantProductPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        p
    }

    fn registry_with(pools: Vec<ConstantProductPool>) -> PoolRegistry {
        let registry = PoolRegistry::new();
        for p in pools {
            let Ok(()) = registry.register(p) else {
                panic!("register");
            };
        }
        registry
    }

    #[test]
    fn register_and_list() {
        let registry = registry_with(vec![pool("b", 10.0, 10.0), pool("a", 10.0, 10.0)]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec![PoolId::new("a"), PoolId::new("b")]);
    }

    #[test]
    fn duplicate_rejected() {
        let registry = registry_with(vec![pool("a", 10.0, 10.0)]);
        assert!(matches!(
            registry.register(pool("a", 20.0, 20.0)),
            Err(AmmError::DuplicatePool(_))
        ));
        let Ok(snap) = registry.snapshot(&PoolId::new("a")) else {
            panic!("expected Ok");
        };
        assert_eq!(snap.reserve_a(), amt(10.0));
    }

    #[test]
    fn unknown_pool() {
        let registry = PoolRegistry::new();
        assert!(registry.is_empty());
        let id = PoolId::new("missing");
        assert!(matches!(
            registry.quote(&id, TokenSide::A, amt(1.0)),
            Err(AmmError::PoolNotFound(_))
        ));
        assert!(matches!(
            registry.settle_swap(&id, TokenSide::A, amt(1.0), Amount::ZERO),
            Err(AmmError::PoolNotFound(_))
        ));
    }

    #[test]
    fn from_config_applies_engine_fee() {
        let Ok(cfg) = EngineConfig::default().with_fee(BasisPoints::new(0)) else {
            panic!("expected Ok");
        };
        let (Ok(a), Ok(b)) = (PoolToken::new("X", amt(100.0)), PoolToken::new("Y", amt(100.0)))
        else {
            panic!("valid tokens");
        };
        let Ok(pc) = PoolConfig::new(PoolId::new("xy"), "X/Y", a, b) else {
            panic!("valid config");
        };
        let Ok(registry) = PoolRegistry::from_config(&cfg.with_pool(pc)) else {
            panic!("expected Ok");
        };
        let Ok(q) = registry.quote(&PoolId::new("xy"), TokenSide::A, amt(10.0)) else {
            panic!("expected Ok");
        };
        assert!(q.fee_amount().is_zero());
    }

    #[test]
    fn stale_minimum_is_rejected_after_competing_trade() {
        let registry = registry_with(vec![pool("p", 1_000.0, 1_000.0)]);
        let id = PoolId::new("p");
        let Ok(first) = registry.quote(&id, TokenSide::A, amt(50.0)) else {
            panic!("expected Ok");
        };
        let Ok(_) = registry.settle_swap(&id, TokenSide::A, amt(50.0), Amount::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(before) = registry.snapshot(&id) else {
            panic!("expected Ok");
        };
        let result = registry.settle_swap(&id, TokenSide::A, amt(50.0), first.output_amount());
        assert!(matches!(result, Err(AmmError::SlippageExceeded { .. })));
        let Ok(after) = registry.snapshot(&id) else {
            panic!("expected Ok");
        };
        assert_eq!(before, after);
    }

    #[test]
    fn concurrent_settlements_are_serialized() {
        let registry = Arc::new(registry_with(vec![pool("p", 1_000_000.0, 1_000_000.0)]));
        let id = PoolId::new("p");
        let k_before = match registry.snapshot(&id) {
            Ok(p) => p.invariant(),
            Err(e) => panic!("snapshot: {e}"),
        };

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let id = id.clone();
                thread::spawn(move || {
                    let side = if i % 2 == 0 { TokenSide::A } else { TokenSide::B };
                    for _ in 0..50 {
                        if registry.settle_swap(&id, side, amt(100.0), Amount::ZERO).is_err() {
                            panic!("settlement failed");
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            if handle.join().is_err() {
                panic!("worker panicked");
            }
        }

        let Ok(after) = registry.snapshot(&id) else {
            panic!("expected Ok");
        };
        let total_fees = after.accumulated_fees_a().get() + after.accumulated_fees_b().get();
        assert!((total_fees - 8.0 * 50.0 * 0.3).abs() < 1e-6);
        assert!(after.invariant() >= k_before);
    }

    #[test]
    fn liquidity_through_registry() {
        let registry = registry_with(vec![pool("p", 1_000.0, 1_000.0)]);
        let id = PoolId::new("p");
        let Ok(change) = LiquidityChange::add(amt(100.0), amt(100.0)) else {
            panic!("valid change");
        };
        let Ok(minted) = registry.add_liquidity(&id, &change) else {
            panic!("expected Ok");
        };
        let Ok(burn) = LiquidityChange::remove(minted) else {
            panic!("valid change");
        };
        let Ok(out) = registry.remove_liquidity(&id, &burn) else {
            panic!("expected Ok");
        };
        assert!((out.amount_a.get() - 100.0).abs() < 1e-9);
    }
}
