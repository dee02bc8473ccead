//! Declarative configuration for the engine and its pools.
//!
//! [`EngineConfig`] carries engine-wide settings (protocol fee, quote
//! thresholds) and the list of [`PoolConfig`] blueprints. Both validate on
//! construction and can be loaded from TOML.

mod engine_config;
mod pool_config;

pub use engine_config::EngineConfig;
pub use pool_config::PoolConfig;
