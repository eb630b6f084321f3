//! # Permutation Sign
//!
//! The parity of a permutation as a two-valued type instead of a bare
//! integer. Multiplication composes parities; negation is a single
//! transposition. Serializes as the integer `1` or `-1`.

use std::ops::{Mul, MulAssign, Neg};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sign of a permutation relative to a reference order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sign {
    /// Even permutation, `+1`.
    #[default]
    Plus,
    /// Odd permutation, `-1`.
    Minus,
}

/// Integer that is neither `1` nor `-1`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a permutation sign; expected 1 or -1")]
pub struct InvalidSign(pub i8);

impl Sign {
    /// Sign of a permutation built from `count` transpositions.
    pub fn from_transpositions(count: usize) -> Self {
        if count % 2 == 0 {
            Self::Plus
        } else {
            Self::Minus
        }
    }

    /// The sign as `1` or `-1`.
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    /// The sign as `1.0` or `-1.0`, for weighting numeric terms.
    pub fn as_f64(self) -> f64 {
        f64::from(self.as_i8())
    }
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        if self == rhs {
            Self::Plus
        } else {
            Self::Minus
        }
    }
}

impl MulAssign for Sign {
    fn mul_assign(&mut self, rhs: Sign) {
        *self = *self * rhs;
    }
}

impl std::iter::Product for Sign {
    fn product<I: Iterator<Item = Sign>>(iter: I) -> Sign {
        iter.fold(Sign::Plus, Mul::mul)
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> i8 {
        sign.as_i8()
    }
}

impl TryFrom<i8> for Sign {
    type Error = InvalidSign;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Plus),
            -1 => Ok(Self::Minus),
            other => Err(InvalidSign(other)),
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Plus => "+1",
            Self::Minus => "-1",
        })
    }
}
