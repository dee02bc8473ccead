//! Constant-product pool record and its settlement rules.
//!
//! The pool delegates pricing to [`math::quote_swap_with_fee`] and owns
//! the bookkeeping around it: reserves, LP shares and fee counters.
//!
//! # Settlement (side A → side B)
//!
//! 1. quote against current reserves
//! 2. reject if `amount_out < min_output`
//! 3. `reserve_a += amount_in` (the fee stays in the pool)
//! 4. `reserve_b -= amount_out`
//!
//! # Invariant
//!
//! After every swap `k_after ≥ k_before`, because the fee component
//! grows the input reserve without a matching output.

use tracing::{debug, warn};

use crate::config::PoolConfig;
use crate::domain::{
    Amount, FeeRate, LiquidityChange, PoolId, PoolMetrics, PoolToken, Price, SwapQuote,
    TokenSide, Withdrawal,
};
use crate::error::AmmError;
use crate::math::{self, CheckedArithmetic};
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

/// A constant-product pool (`x · y = k`).
///
/// Created from a [`PoolConfig`] via [`FromConfig`]. Pricing is stateless;
/// only [`SwapPool::swap`] and the [`LiquidityPool`] methods mutate the
/// pool, and each does so atomically.
///
/// # State
///
/// - `token_a` / `token_b`: symbols and current reserves (fees included)
/// - `total_shares`: outstanding LP shares, `√(reserve_a × reserve_b)` at genesis
/// - `accumulated_fees_a` / `accumulated_fees_b`: fee counters since the last collection
/// - `metrics`: display figures supplied by configuration, never recomputed
///
/// # Example
///
/// ```rust
/// use tidepool::config::PoolConfig;
/// use tidepool::domain::{Amount, PoolId, PoolToken, TokenSide};
/// use tidepool::pools::ConstantProductPool;
/// use tidepool::traits::{FromConfig, SwapPool};
///
/// let cfg = PoolConfig::new(
///     PoolId::new("sol-usdc"),
///     "SOL/USDC",
///     PoolToken::new("SOL", Amount::new(10_000.0).expect("finite")).expect("symbol"),
///     PoolToken::new("USDC", Amount::new(1_000_000.0).expect("finite")).expect("symbol"),
/// )
/// .expect("valid config");
///
/// let mut pool = ConstantProductPool::from_config(&cfg).expect("pool created");
/// let amount = Amount::new(10.0).expect("finite");
/// let quote = pool.swap(TokenSide::A, amount, Amount::ZERO).expect("swap ok");
/// assert!(quote.output_amount().get() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantProductPool {
    id: PoolId,
    name: String,
    token_a: PoolToken,
    token_b: PoolToken,
    fee: FeeRate,
    total_shares: Amount,
    accumulated_fees_a: Amount,
    accumulated_fees_b: Amount,
    metrics: PoolMetrics,
}

impl ConstantProductPool {
    /// Builds a pool from its configuration with an explicit engine fee.
    ///
    /// The pool's own fee override, if any, wins over `default_fee`.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`PoolConfig::validate`].
    /// - Returns [`AmmError::Overflow`] if the initial invariant overflows.
    pub fn with_default_fee(config: &PoolConfig, default_fee: FeeRate) -> Result<Self, AmmError> {
        config.validate()?;

        let ra = config.reserve_a();
        let rb = config.reserve_b();
        let shares = Amount::new(ra.safe_mul(&rb)?.get().sqrt())?;

        Ok(Self {
            id: config.id().clone(),
            name: config.name().to_owned(),
            token_a: config.token_a().clone(),
            token_b: config.token_b().clone(),
            fee: config.fee_rate(default_fee)?,
            total_shares: shares,
            accumulated_fees_a: Amount::ZERO,
            accumulated_fees_b: Amount::ZERO,
            metrics: *config.metrics(),
        })
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

    /// Returns the token on `side`.
    #[must_use]
    pub const fn token(&self, side: TokenSide) -> &PoolToken {
        match side {
            TokenSide::A => &self.token_a,
            TokenSide::B => &self.token_b,
        }
    }

    /// Returns the current reserve of token A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.token_a.reserve()
    }

    /// Returns the current reserve of token B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.token_b.reserve()
    }

    /// Returns the display metrics.
    #[must_use]
    pub const fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }

    /// Returns the fees collected on token A since the last collection.
    #[must_use]
    pub const fn accumulated_fees_a(&self) -> Amount {
        self.accumulated_fees_a
    }

    /// Returns the fees collected on token B since the last collection.
    #[must_use]
    pub const fn accumulated_fees_b(&self) -> Amount {
        self.accumulated_fees_b
    }

    /// Returns the current invariant `k = reserve_a × reserve_b`.
    #[must_use]
    pub fn invariant(&self) -> f64 {
        self.reserve_a().get() * self.reserve_b().get()
    }

    /// Prices buying exactly `amount_out` of the side opposite `side_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if the amount is not strictly positive.
    /// - [`AmmError::InsufficientLiquidity`] if the pool cannot pay it out.
    pub fn quote_exact_out(
        &self,
        side_in: TokenSide,
        amount_out: Amount,
    ) -> Result<SwapQuote, AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        math::quote_exact_out(amount_out.get(), reserve_in.get(), reserve_out.get(), self.fee)
    }

    /// Returns and resets the fee counters as `(token_a, token_b)`.
    ///
    /// Fees already sit in the reserves; collecting only clears the
    /// counters and never moves tokens.
    pub fn collect_fees(&mut self) -> (Amount, Amount) {
        let fees = (self.accumulated_fees_a, self.accumulated_fees_b);
        self.accumulated_fees_a = Amount::ZERO;
        self.accumulated_fees_b = Amount::ZERO;
        fees
    }

    /// `(reserve_in, reserve_out)` for a trade entering through `side_in`.
    const fn oriented_reserves(&self, side_in: TokenSide) -> (Amount, Amount) {
        match side_in {
            TokenSide::A => (self.token_a.reserve(), self.token_b.reserve()),
            TokenSide::B => (self.token_b.reserve(), self.token_a.reserve()),
        }
    }

    fn mint_shares(&self, amount: Amount, reserve: Amount) -> Result<Amount, AmmError> {
        if amount.is_zero() {
            return Ok(Amount::ZERO);
        }
        amount.safe_mul(&self.total_shares)?.safe_div(&reserve)
    }
}

impl FromConfig<PoolConfig> for ConstantProductPool {
    /// Creates a new pool at the protocol default fee (30 bp) unless the
    /// configuration overrides it.
    ///
    /// Initial LP shares are set to `√(reserve_a × reserve_b)`.
    ///
    /// # Errors
    ///
    /// Same as [`ConstantProductPool::with_default_fee`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        Self::with_default_fee(config, FeeRate::DEFAULT)
    }
}

impl SwapPool for ConstantProductPool {
    fn quote(&self, side_in: TokenSide, amount_in: Amount) -> Result<SwapQuote, AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        math::quote_swap_with_fee(amount_in.get(), reserve_in.get(), reserve_out.get(), self.fee)
    }

    /// Executes a swap on the constant product pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if the amount is not strictly positive.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_output`.
    /// - [`AmmError::Overflow`] if a reserve update is not representable.
    fn swap(
        &mut self,
        side_in: TokenSide,
        amount_in: Amount,
        min_output: Amount,
    ) -> Result<SwapQuote, AmmError> {
        let quote = self.quote(side_in, amount_in)?;

        if quote.output_amount() < min_output {
            warn!(
                pool = %self.id,
                side = %side_in,
                output = quote.output_amount().get(),
                minimum = min_output.get(),
                "swap rejected: slippage exceeded"
            );
            return Err(AmmError::SlippageExceeded {
                output: quote.output_amount().get(),
                minimum: min_output.get(),
            });
        }

        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        let new_reserve_in = reserve_in.safe_add(&quote.input_amount())?;
        let new_reserve_out = reserve_out.safe_sub(&quote.output_amount())?;

        match side_in {
            TokenSide::A => {
                let fees = self.accumulated_fees_a.safe_add(&quote.fee_amount())?;
                self.token_a.set_reserve(new_reserve_in);
                self.token_b.set_reserve(new_reserve_out);
                self.accumulated_fees_a = fees;
            }
            TokenSide::B => {
                let fees = self.accumulated_fees_b.safe_add(&quote.fee_amount())?;
                self.token_b.set_reserve(new_reserve_in);
                self.token_a.set_reserve(new_reserve_out);
                self.accumulated_fees_b = fees;
            }
        }

        debug!(
            pool = %self.id,
            side = %side_in,
            amount_in = quote.input_amount().get(),
            amount_out = quote.output_amount().get(),
            fee = quote.fee_amount().get(),
            "swap settled"
        );

        Ok(quote)
    }

    fn spot_price(&self, base: TokenSide) -> Result<Price, AmmError> {
        let (reserve_base, reserve_quote) = self.oriented_reserves(base);
        math::spot_price(reserve_base.get(), reserve_quote.get())
    }

    fn fee_rate(&self) -> FeeRate {
        self.fee
    }
}

impl LiquidityPool for ConstantProductPool {
    /// Adds liquidity to the pool.
    ///
    /// When no shares exist, shares equal `√(amount_a × amount_b)`.
    /// Otherwise shares are proportional to the smaller deposit ratio
    /// `min(Δa/Ra, Δb/Rb) × S`. Any excess on the larger side stays in the
    /// pool, so a one-sided deposit mints nothing and is rejected.
    fn add_liquidity(&mut self, change: &LiquidityChange) -> Result<Amount, AmmError> {
        let LiquidityChange::Add { amount_a, amount_b } = *change else {
            return Err(AmmError::InvalidLiquidity(
                "expected LiquidityChange::Add variant",
            ));
        };

        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(AmmError::InvalidLiquidity("must deposit at least one token"));
        }

        let minted = if self.total_shares.is_zero() {
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::InvalidLiquidity(
                    "first deposit requires both tokens",
                ));
            }
            Amount::new(amount_a.safe_mul(&amount_b)?.get().sqrt())?
        } else {
            let share_a = self.mint_shares(amount_a, self.reserve_a())?;
            let share_b = self.mint_shares(amount_b, self.reserve_b())?;
            share_a.min(share_b)
        };

        if minted.is_zero() {
            return Err(AmmError::InvalidInput("deposit too small to mint shares"));
        }

        let new_a = self.reserve_a().safe_add(&amount_a)?;
        let new_b = self.reserve_b().safe_add(&amount_b)?;
        let new_total = self.total_shares.safe_add(&minted)?;

        self.token_a.set_reserve(new_a);
        self.token_b.set_reserve(new_b);
        self.total_shares = new_total;

        debug!(
            pool = %self.id,
            amount_a = amount_a.get(),
            amount_b = amount_b.get(),
            minted = minted.get(),
            "liquidity added"
        );

        Ok(minted)
    }

    /// Removes liquidity from the pool.
    ///
    /// Pays out `reserve_x × shares / total_shares` of each token. Burning
    /// the entire supply is rejected so the pool keeps positive reserves.
    fn remove_liquidity(&mut self, change: &LiquidityChange) -> Result<Withdrawal, AmmError> {
        let LiquidityChange::Remove { shares } = *change else {
            return Err(AmmError::InvalidLiquidity(
                "expected LiquidityChange::Remove variant",
            ));
        };

        if shares.is_zero() {
            return Err(AmmError::InvalidLiquidity("cannot remove zero shares"));
        }
        if shares >= self.total_shares {
            return Err(AmmError::InsufficientLiquidity);
        }

        let amount_a = self
            .reserve_a()
            .safe_mul(&shares)?
            .safe_div(&self.total_shares)?;
        let amount_b = self
            .reserve_b()
            .safe_mul(&shares)?
            .safe_div(&self.total_shares)?;

        let new_a = self.reserve_a().safe_sub(&amount_a)?;
        let new_b = self.reserve_b().safe_sub(&amount_b)?;
        let new_total = self.total_shares.safe_sub(&shares)?;
        if new_a.is_zero() || new_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        self.token_a.set_reserve(new_a);
        self.token_b.set_reserve(new_b);
        self.total_shares = new_total;

        debug!(
            pool = %self.id,
            shares = shares.get(),
            amount_a = amount_a.get(),
            amount_b = amount_b.get(),
            "liquidity removed"
        );

        Ok(Withdrawal { amount_a, amount_b })
    }

    fn total_shares(&self) -> Amount {
        self.total_shares
    }
}
