//! Quote-then-settle walkthrough on a SOL/USDC pool.
//!
//! Loads pools from TOML, quotes a swap, settles it with a slippage guard
//! and shows a stale quote being refused after the reserves move.
//!
//! # Run
//!
//! ```bash
//! cargo run --example quote_and_settle
//! ```

use tidepool::config::EngineConfig;
use tidepool::domain::{Amount, PoolId, TokenSide};
use tidepool::error::AmmError;
use tidepool::pools::PoolRegistry;

const CONFIG: &str = r#"
    fee_bps = 30
    high_impact_threshold = 0.05
    default_slippage_percent = 0.5

    [[pools]]
    id = "sol-usdc"
    name = "SOL/USDC"
    token_a = { symbol = "SOL", reserve = 10000.0 }
    token_b = { symbol = "USDC", reserve = 1000000.0 }
"#;

fn main() -> Result<(), AmmError> {
    println!("=== Quote and settle ===\n");

    // ── 1. Load configuration and build the registry ────────────────────
    let config = EngineConfig::from_toml_str(CONFIG)?;
    let registry = PoolRegistry::from_config(&config)?;
    let id = PoolId::new("sol-usdc");

    let pool = registry.snapshot(&id)?;
    println!("Pool {id}");
    println!("  Reserves:   {} SOL / {} USDC", pool.reserve_a(), pool.reserve_b());
    println!("  Spot price: {} USDC per SOL", registry.spot_price(&id, TokenSide::A)?);

    // ── 2. Quote selling 50 SOL ─────────────────────────────────────────
    let amount = Amount::new(50.0)?;
    let quote = registry.quote(&id, TokenSide::A, amount)?;
    let min_out = quote.minimum_received(config.default_slippage());

    println!("\nQuote for {amount} SOL");
    println!("  Output:       {} USDC", quote.output_amount());
    println!("  Fee:          {} SOL", quote.fee_amount());
    println!("  Price impact: {}", quote.price_impact());
    println!("  Min received: {min_out} USDC");
    if quote.price_impact().exceeds(config.high_impact_threshold()) {
        println!("  Warning: high price impact");
    }

    // ── 3. Settle under the pool lock ───────────────────────────────────
    let settled = registry.settle_swap(&id, TokenSide::A, amount, min_out)?;
    println!("\nSettled: {} USDC out", settled.output_amount());

    let pool = registry.snapshot(&id)?;
    println!("  Reserves:   {} SOL / {} USDC", pool.reserve_a(), pool.reserve_b());

    // ── 4. Replaying the same guard against moved reserves fails ────────
    match registry.settle_swap(&id, TokenSide::A, amount, quote.output_amount()) {
        Err(AmmError::SlippageExceeded { output, minimum }) => {
            println!("\nStale quote refused: {output:.4} < {minimum:.4}");
        }
        Ok(_) => println!("\nUnexpected settlement"),
        Err(e) => return Err(e),
    }

    Ok(())
}
