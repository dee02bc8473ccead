//! Property-based tests using `proptest` for pricing and pool invariants.
//!
//! 1. **No drain**: output stays strictly below the output reserve.
//! 2. **Monotonicity**: larger input ⇒ larger output and larger impact.
//! 3. **Fee exactness**: `fee == input × fee_rate`.
//! 4. **Invalid input**: non-positive or non-finite input is rejected.
//! 5. **No free round trip**: A→B→A against settled reserves returns ≤ input.
//! 6. **Invariant growth**: `k` never decreases across swaps.
//! 7. **Liquidity conservation**: add then remove ≈ deposited amounts.
//! 8. **No free withdrawal**: add then remove never returns more of either
//!    token than was deposited, including one-sided deposits.

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{Amount, FeeRate, LiquidityChange, PoolId, PoolToken, TokenSide};
use crate::error::AmmError;
use crate::math::quote_swap;
use crate::pools::ConstantProductPool;
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn amt(v: f64) -> Amount {
    let Ok(a) = Amount::new(v) else {
        panic!("valid amount");
    };
    a
}

fn make_pool(ra: f64, rb: f64) -> ConstantProductPool {
    let (Ok(a), Ok(b)) = (PoolToken::new("AAA", amt(ra)), PoolToken::new("BBB", amt(rb))) else {
        panic!("valid tokens");
    };
    let Ok(cfg) = PoolConfig::new(PoolId::new("prop"), "AAA/BBB", a, b) else {
        panic!("valid config");
    };
    let Ok(pool) = ConstantProductPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reserves in [1e3, 1e12].
fn reserve_strategy() -> impl Strategy<Value = f64> {
    (3.0f64..12.0).prop_map(|e| 10f64.powf(e))
}

/// Trade size as a fraction of the input reserve, in [1e-6, 10].
fn fraction_strategy() -> impl Strategy<Value = f64> {
    (-6.0f64..1.0).prop_map(|e| 10f64.powf(e))
}

/// Deposit as a fraction of the reserve, in {0} ∪ [1e-4, 1].
fn deposit_fraction_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        3 => (-4.0f64..0.0).prop_map(|e| 10f64.powf(e)),
    ]
}

fn side_strategy() -> impl Strategy<Value = TokenSide> {
    prop_oneof![Just(TokenSide::A), Just(TokenSide::B)]
}

// ---------------------------------------------------------------------------
// Pricing properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_output_below_reserve(
        rin in reserve_strategy(),
        rout in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let Ok(q) = quote_swap(rin * frac, rin, rout) else {
            return Ok(());
        };
        prop_assert!(q.output_amount().get() < rout);
        prop_assert!(q.output_amount().get() > 0.0);
    }

    #[test]
    fn prop_output_and_impact_increase_with_input(
        rin in reserve_strategy(),
        rout in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let small = rin * frac;
        let large = small * 1.5;
        let (Ok(qs), Ok(ql)) = (quote_swap(small, rin, rout), quote_swap(large, rin, rout)) else {
            return Ok(());
        };
        prop_assert!(ql.output_amount() > qs.output_amount());
        prop_assert!(ql.price_impact() > qs.price_impact());
    }

    #[test]
    fn prop_fee_is_exact(
        rin in reserve_strategy(),
        rout in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let input = rin * frac;
        let Ok(q) = quote_swap(input, rin, rout) else {
            return Ok(());
        };
        prop_assert_eq!(q.fee_amount().get(), input * FeeRate::DEFAULT.get());
    }

    #[test]
    fn prop_non_positive_input_rejected(
        rin in reserve_strategy(),
        rout in reserve_strategy(),
        input in prop_oneof![
            (-1e12f64..=0.0),
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
        ],
    ) {
        prop_assert!(matches!(
            quote_swap(input, rin, rout),
            Err(AmmError::InvalidInput(_))
        ));
    }
}

// ---------------------------------------------------------------------------
// Pool properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_round_trip_never_profits(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in fraction_strategy(),
        side in side_strategy(),
    ) {
        let mut pool = make_pool(ra, rb);
        let reserve_in = match side {
            TokenSide::A => ra,
            TokenSide::B => rb,
        };
        let input = amt(reserve_in * frac);

        let Ok(out) = pool.swap(side, input, Amount::ZERO) else {
            return Ok(());
        };
        let Ok(back) = pool.quote(side.opposite(), out.output_amount()) else {
            return Ok(());
        };
        prop_assert!(
            back.output_amount() <= input,
            "round trip returned {} for {}",
            back.output_amount(), input
        );
    }

    #[test]
    fn prop_invariant_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trades in prop::collection::vec((side_strategy(), fraction_strategy()), 1..8),
    ) {
        let mut pool = make_pool(ra, rb);
        for (side, frac) in trades {
            let reserve_in = pool.token(side).reserve().get();
            let k_before = pool.invariant();
            if pool.swap(side, amt(reserve_in * frac), Amount::ZERO).is_err() {
                continue;
            }
            prop_assert!(pool.invariant() >= k_before);
        }
    }

    #[test]
    fn prop_add_remove_conserves(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in (-4.0f64..0.0).prop_map(|e| 10f64.powf(e)),
    ) {
        let mut pool = make_pool(ra, rb);
        let (da, db) = (ra * frac, rb * frac);
        let Ok(add) = LiquidityChange::add(amt(da), amt(db)) else {
            return Ok(());
        };
        let Ok(minted) = pool.add_liquidity(&add) else {
            return Ok(());
        };
        let Ok(remove) = LiquidityChange::remove(minted) else {
            return Ok(());
        };
        let Ok(out) = pool.remove_liquidity(&remove) else {
            return Ok(());
        };
        prop_assert!((out.amount_a.get() - da).abs() <= da * 1e-9);
        prop_assert!((out.amount_b.get() - db).abs() <= db * 1e-9);
    }

    #[test]
    fn prop_add_remove_never_returns_more_than_deposited(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac_a in deposit_fraction_strategy(),
        frac_b in deposit_fraction_strategy(),
    ) {
        let mut pool = make_pool(ra, rb);
        let (da, db) = (ra * frac_a, rb * frac_b);
        let Ok(add) = LiquidityChange::add(amt(da), amt(db)) else {
            return Ok(());
        };
        let minted = pool.add_liquidity(&add);
        if da == 0.0 || db == 0.0 {
            prop_assert!(matches!(minted, Err(AmmError::InvalidInput(_))));
            return Ok(());
        }
        let Ok(minted) = minted else {
            return Ok(());
        };
        let Ok(remove) = LiquidityChange::remove(minted) else {
            return Ok(());
        };
        let Ok(out) = pool.remove_liquidity(&remove) else {
            return Ok(());
        };
        prop_assert!(
            out.amount_a.get() <= da * (1.0 + 1e-9),
            "withdrew {} A for {} deposited", out.amount_a, da
        );
        prop_assert!(
            out.amount_b.get() <= db * (1.0 + 1e-9),
            "withdrew {} B for {} deposited", out.amount_b, db
        );
    }
}
