//! Yield farming: stake tokens, accrue rewards over time, claim them.

mod yield_farm;

pub use yield_farm::{UserStake, YieldFarm, REWARD_SCALE};
