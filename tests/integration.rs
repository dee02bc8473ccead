//! Integration tests exercising the full system from config to settlement.
//!
//! These tests verify end-to-end flows through the public API:
//! configuration loading, registry quoting and settlement, the
//! wallet/faucet flow, the yield farm lifecycle and governance voting.

#![allow(clippy::panic)]

use std::sync::Arc;

use tidepool::config::EngineConfig;
use tidepool::domain::{
    Amount, LiquidityChange, PoolId, SlippageTolerance, TokenSide, WalletAddress,
};
use tidepool::error::AmmError;
use tidepool::farm::YieldFarm;
use tidepool::governance::{Governance, ProposalStatus, ProposalType, VoteType};
use tidepool::math::quote_swap;
use tidepool::pools::PoolRegistry;
use tidepool::traits::WalletConnector;
use tidepool::wallet::{DevnetFaucet, MockConnection, MockWallet};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const POOLS: &str = r#"
    fee_bps = 30
    high_impact_threshold = 0.05
    default_slippage_percent = 0.5

    [[pools]]
    id = "sol-usdc"
    name = "SOL/USDC"
    token_a = { symbol = "SOL", reserve = 10000.0 }
    token_b = { symbol = "USDC", reserve = 1000000.0 }
    metrics = { total_liquidity = 2000000.0, volume_24h = 150000.0, fees_24h = 450.0, apy = 0.124 }

    [[pools]]
    id = "ray-sol"
    name = "RAY/SOL"
    fee_bps = 25
    token_a = { symbol = "RAY", reserve = 50000.0 }
    token_b = { symbol = "SOL", reserve = 2500.0 }
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn amt(v: f64) -> Amount {
    let Ok(a) = Amount::new(v) else {
        panic!("valid amount");
    };
    a
}

fn registry() -> (EngineConfig, PoolRegistry) {
    let Ok(cfg) = EngineConfig::from_toml_str(POOLS) else {
        panic!("valid config");
    };
    let Ok(registry) = PoolRegistry::from_config(&cfg) else {
        panic!("valid registry");
    };
    (cfg, registry)
}

// ===========================================================================
// Suite 1: Pricing reference values
// ===========================================================================

#[test]
fn reference_trade() {
    let Ok(q) = quote_swap(10_000.0, 1_000_000.0, 1_000_000.0) else {
        panic!("valid trade");
    };
    assert!((q.fee_amount().get() - 30.0).abs() < 1e-9);
    let expected = 1_000_000.0 - 1e12 / 1_009_970.0;
    assert!((q.output_amount().get() - expected).abs() < 1e-6);
    assert!(q.output_amount().get() < 9_970.0);
}

#[test]
fn invalid_trades_rejected() {
    for (input, rin, rout) in [
        (0.0, 1.0, 1.0),
        (-5.0, 1.0, 1.0),
        (1.0, 0.0, 1.0),
        (1.0, 1.0, 0.0),
        (f64::NAN, 1.0, 1.0),
    ] {
        assert!(matches!(
            quote_swap(input, rin, rout),
            Err(AmmError::InvalidInput(_))
        ));
    }
}

// ===========================================================================
// Suite 2: Config → registry → quote → settle
// ===========================================================================

#[test]
fn quote_then_settle_with_slippage_guard() {
    init_tracing();
    let (cfg, registry) = registry();
    assert_eq!(registry.ids().len(), 2);

    let id = PoolId::new("sol-usdc");
    let Ok(quote) = registry.quote(&id, TokenSide::A, amt(10.0)) else {
        panic!("expected quote");
    };
    assert!(!quote.price_impact().exceeds(cfg.high_impact_threshold()));

    let min_out = quote.minimum_received(cfg.default_slippage());
    let Ok(settled) = registry.settle_swap(&id, TokenSide::A, amt(10.0), min_out) else {
        panic!("expected settlement");
    };
    assert_eq!(settled, quote);

    let Ok(pool) = registry.snapshot(&id) else {
        panic!("expected snapshot");
    };
    assert_eq!(pool.reserve_a(), amt(10_010.0));
    assert!((pool.reserve_b().get() - (1_000_000.0 - quote.output_amount().get())).abs() < 1e-6);
}

#[test]
fn large_trade_flags_high_impact() {
    let (cfg, registry) = registry();
    let Ok(quote) = registry.quote(&PoolId::new("sol-usdc"), TokenSide::A, amt(1_000.0)) else {
        panic!("expected quote");
    };
    assert!(quote.price_impact().exceeds(cfg.high_impact_threshold()));
}

#[test]
fn stale_quote_fails_after_competing_trade() {
    let (_, registry) = registry();
    let id = PoolId::new("ray-sol");
    let Ok(quote) = registry.quote(&id, TokenSide::A, amt(500.0)) else {
        panic!("expected quote");
    };
    let Ok(_) = registry.settle_swap(&id, TokenSide::A, amt(5_000.0), Amount::ZERO) else {
        panic!("expected settlement");
    };
    let min_out = quote.minimum_received(SlippageTolerance::NONE);
    assert!(matches!(
        registry.settle_swap(&id, TokenSide::A, amt(500.0), min_out),
        Err(AmmError::SlippageExceeded { .. })
    ));
}

#[test]
fn per_pool_fee_override() {
    let (_, registry) = registry();
    let Ok(q) = registry.quote(&PoolId::new("ray-sol"), TokenSide::A, amt(100.0)) else {
        panic!("expected quote");
    };
    assert!((q.fee_amount().get() - 0.25).abs() < 1e-9);
}

#[test]
fn round_trip_never_profits() {
    let (_, registry) = registry();
    let id = PoolId::new("sol-usdc");
    let Ok(out) = registry.settle_swap(&id, TokenSide::B, amt(25_000.0), Amount::ZERO) else {
        panic!("expected settlement");
    };
    let Ok(back) = registry.quote(&id, TokenSide::A, out.output_amount()) else {
        panic!("expected quote");
    };
    assert!(back.output_amount() <= amt(25_000.0));
}

#[test]
fn liquidity_lifecycle() {
    let (_, registry) = registry();
    let id = PoolId::new("sol-usdc");
    let Ok(add) = LiquidityChange::add(amt(100.0), amt(10_000.0)) else {
        panic!("valid change");
    };
    let Ok(minted) = registry.add_liquidity(&id, &add) else {
        panic!("expected mint");
    };
    assert!(minted.get() > 0.0);

    let Ok(_) = registry.settle_swap(&id, TokenSide::A, amt(50.0), Amount::ZERO) else {
        panic!("expected settlement");
    };

    let Ok(remove) = LiquidityChange::remove(minted) else {
        panic!("valid change");
    };
    let Ok(out) = registry.remove_liquidity(&id, &remove) else {
        panic!("expected withdrawal");
    };
    // fees from the trade accrue to LPs
    assert!(out.amount_a.get() > 100.0);
}

#[test]
fn unknown_pool_everywhere() {
    let (_, registry) = registry();
    let id = PoolId::new("nope");
    assert!(matches!(registry.snapshot(&id), Err(AmmError::PoolNotFound(_))));
    assert!(matches!(
        registry.spot_price(&id, TokenSide::A),
        Err(AmmError::PoolNotFound(_))
    ));
}

// ===========================================================================
// Suite 3: Wallet → faucet
// ===========================================================================

#[test]
fn faucet_flow() {
    init_tracing();
    let conn = Arc::new(MockConnection::with_seed(MockConnection::DEVNET_ENDPOINT, 99));
    let faucet = DevnetFaucet::new(Arc::clone(&conn));
    let mut wallet = MockWallet::new(conn);

    assert!(matches!(
        faucet.request_airdrop(&wallet),
        Err(AmmError::WalletNotConnected)
    ));

    let Ok(address) = wallet.connect() else {
        panic!("expected connect");
    };
    assert!(address.as_str().starts_with("Demo"));

    let Ok(receipt) = faucet.request_airdrop(&wallet) else {
        panic!("expected airdrop");
    };
    assert!(receipt.signature.as_str().starts_with("mock_signature_"));
    assert!((0.5..5.0).contains(&receipt.balance.get()));

    wallet.disconnect();
    assert!(matches!(wallet.get_balance(), Err(AmmError::WalletNotConnected)));
}

// ===========================================================================
// Suite 4: Yield farm lifecycle
// ===========================================================================

#[test]
fn farm_lifecycle() {
    init_tracing();
    let Ok(mut farm) = YieldFarm::new(50, 1_700_000_000, 86_400) else {
        panic!("valid farm");
    };
    let alice = WalletAddress::new("alice");
    let bob = WalletAddress::new("bob");
    let t0 = 1_700_000_000;

    let Ok(()) = farm.stake(&alice, 1_000, t0) else {
        panic!("expected stake");
    };
    let Ok(()) = farm.stake(&bob, 1_000, t0 + 100) else {
        panic!("expected stake");
    };

    // alice alone for 100s, then half of the next 100s
    assert_eq!(farm.pending_rewards(&alice, t0 + 200).ok(), Some(7_500));
    assert_eq!(farm.pending_rewards(&bob, t0 + 200).ok(), Some(2_500));

    let Ok(claimed) = farm.claim_rewards(&alice, t0 + 200) else {
        panic!("expected claim");
    };
    assert_eq!(claimed, 7_500);
    assert!(matches!(
        farm.claim_rewards(&alice, t0 + 200),
        Err(AmmError::NoRewards)
    ));

    let Ok(()) = farm.deactivate(t0 + 300) else {
        panic!("expected deactivate");
    };
    assert!(matches!(
        farm.stake(&alice, 1, t0 + 301),
        Err(AmmError::FarmNotActive)
    ));
    let Ok(()) = farm.unstake(&bob, 1_000, t0 + 400) else {
        panic!("expected unstake");
    };
    assert_eq!(farm.claim_rewards(&bob, t0 + 500).ok(), Some(5_000));
    assert!(farm.stake_of(&bob).is_none());
}

// ===========================================================================
// Suite 5: Governance proposal lifecycle
// ===========================================================================

#[test]
fn governance_lifecycle() {
    init_tracing();
    let t0 = 1_700_000_000;
    let Ok(mut dao) = Governance::new(3 * 86_400, 86_400, 10_000, 25_000) else {
        panic!("valid governance");
    };
    let alice = WalletAddress::new("alice");
    let bob = WalletAddress::new("bob");
    let carol = WalletAddress::new("carol");

    let Ok(id) = dao.create_proposal(
        &alice,
        12_000,
        "Add RAY/USDC farm",
        "Open a 30 day farm for the RAY/USDC pool",
        ProposalType::AddFarm,
        t0,
    ) else {
        panic!("expected proposal");
    };

    let Ok(()) = dao.delegate_voting_power(&carol, &bob, 5_000, 8_000, t0) else {
        panic!("expected delegation");
    };
    assert_eq!(dao.delegated_to(&bob).ok(), Some(5_000));

    let Ok(()) = dao.cast_vote(&alice, id, VoteType::For, 12_000, 12_000, t0 + 10) else {
        panic!("expected vote");
    };
    let Ok(()) = dao.cast_vote(&bob, id, VoteType::Against, 9_000, 9_000, t0 + 20) else {
        panic!("expected vote");
    };
    assert!(matches!(
        dao.queue_proposal(id, t0 + 30),
        Err(AmmError::VotingPeriodNotEnded)
    ));

    let deadline = t0 + 3 * 86_400;
    let Ok(()) = dao.cast_vote(&carol, id, VoteType::For, 8_000, 8_000, deadline) else {
        panic!("expected vote");
    };
    assert!(matches!(
        dao.cast_vote(&WalletAddress::new("dave"), id, VoteType::For, 1, 1, deadline + 1),
        Err(AmmError::VotingPeriodEnded)
    ));

    let Ok(eta) = dao.queue_proposal(id, deadline + 1) else {
        panic!("expected queue");
    };
    assert_eq!(eta, deadline + 1 + 86_400);
    let Ok(proposal) = dao.proposal(id) else {
        panic!("expected proposal");
    };
    assert_eq!(proposal.status(), ProposalStatus::Queued);
    assert_eq!(proposal.votes_for(), 20_000);
    assert_eq!(proposal.votes_against(), 9_000);
}
