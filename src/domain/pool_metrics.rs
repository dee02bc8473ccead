//! Display metrics attached to a pool.

use serde::{Deserialize, Serialize};

use super::Amount;

/// Aggregate figures shown on a pool card.
///
/// These are supplied from outside (mock data) and never derived by the
/// pricing engine; swaps and liquidity changes leave them untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolMetrics {
    /// Total value locked, in quote currency.
    pub total_liquidity: Amount,
    /// Trading volume over the last 24 hours.
    pub volume_24h: Amount,
    /// Fees earned over the last 24 hours.
    pub fees_24h: Amount,
    /// Annual percentage yield as a fraction (0.124 = 12.4%).
    pub apy: Amount,
}
