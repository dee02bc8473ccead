//! Pool state and settlement.
//!
//! | Type | Role |
//! |------|------|
//! | [`ConstantProductPool`] | reserves, LP shares and fee counters of one pool |
//! | [`PoolRegistry`] | shared map of pools with per-pool serialized mutation |

pub mod constant_product;
mod registry;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use constant_product::ConstantProductPool;
pub use registry::PoolRegistry;
