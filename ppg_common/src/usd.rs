use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const USD_CURRENCY_CODE: &str = "USD";
pub const USD_CURRENCY_CODE_LOWER: &str = "usd";

//--------------------------------------     UsdAmount       ---------------------------------------------------------
/// A USD amount in integer cents. All prices in the storefront are stored and compared in this form to avoid the
/// cents-vs-dollars ambiguity that floating point prices invite.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct UsdAmount(i64);

op!(binary UsdAmount, Add, add);
op!(binary UsdAmount, Sub, sub);
op!(inplace UsdAmount, SubAssign, sub_assign);
op!(unary UsdAmount, Neg, neg);

impl Mul<i64> for UsdAmount {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for UsdAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in US cents: {0}")]
pub struct UsdConversionError(String);

impl From<i64> for UsdAmount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for UsdAmount {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for UsdAmount {}

impl TryFrom<u64> for UsdAmount {
    type Error = UsdConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(UsdConversionError(format!("Value {value} is too large to convert to UsdAmount")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for UsdAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `self.0 / 100` is zero for -99..=-1, which would swallow the sign.
        let sign = if self.0 < 0 { "-" } else { "" };
        let dollars = (self.0 / 100).abs();
        let cents = (self.0 % 100).abs();
        write!(f, "{sign}${dollars}.{cents:02}")
    }
}

impl UsdAmount {
    /// The amount in cents.
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// The amount in whole dollars, truncating any cents.
    pub fn whole_dollars(&self) -> i64 {
        self.0 / 100
    }
}
