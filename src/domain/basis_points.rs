//! Fee settings in basis points, as they appear in configuration files.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Integer fee setting: 1 bp = 0.01%, so 30 bp is the 0.30% default fee.
///
/// Any `u32` parses; range checks happen where the value becomes a
/// [`FeeRate`](super::FeeRate).
///
/// ```
/// use tidepool::domain::BasisPoints;
///
/// assert!((BasisPoints::new(30).as_fraction() - 0.003).abs() < 1e-12);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// The whole trade; never a valid fee.
    pub const MAX_PERCENT: Self = Self(10_000);

    /// Wraps a raw basis-point count.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw basis-point count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// `self / 10 000`.
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX_PERCENT.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_of_common_fees() {
        assert!(BasisPoints::ZERO.as_fraction().abs() < f64::EPSILON);
        assert!((BasisPoints::new(25).as_fraction() - 0.0025).abs() < 1e-12);
        assert!((BasisPoints::MAX_PERCENT.as_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_as_bare_integer() {
        #[derive(serde::Deserialize)]
        struct Doc {
            fee_bps: BasisPoints,
        }
        let doc: Result<Doc, _> = toml::from_str("fee_bps = 30");
        assert_eq!(doc.ok().map(|d| d.fee_bps), Some(BasisPoints::new(30)));
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(30).to_string(), "30bp");
    }
}
