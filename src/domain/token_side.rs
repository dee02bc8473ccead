//! Which side of a two-token pool a trade enters through.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One side of a two-token pool.
///
/// Swaps are expressed by the side being sold; the other side is bought.
///
/// # Examples
///
/// ```
/// use tidepool::domain::TokenSide;
///
/// assert_eq!(TokenSide::A.opposite(), TokenSide::B);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSide {
    /// The pool's first token.
    A,
    /// The pool's second token.
    B,
}

impl TokenSide {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for TokenSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}
