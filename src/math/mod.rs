//! Pricing functions and checked arithmetic for pool calculations.
//!
//! [`quote_swap`] is the stateless constant-product pricing engine;
//! [`CheckedArithmetic`] turns `f64` overflow and underflow into
//! [`AmmError`](crate::error::AmmError) values for pool bookkeeping.

mod checked;
mod constant_product;

pub use checked::CheckedArithmetic;
pub use constant_product::{quote_exact_out, quote_swap, quote_swap_with_fee, spot_price};
