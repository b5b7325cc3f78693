//! Integer semantics for IMP programs.
//!
//! IMP integers are signed, and every arithmetic operation is checked: a
//! result that does not fit the integer type is an evaluation error rather
//! than a silently wrapped value. Programs run with [`ImpSize`] by default, or
//! with the practically unbounded [`ImpBigInt`].

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};

/// The default integer type of IMP programs.
pub type ImpSize = i64;

/// An arbitrary-precision integer.
pub type ImpBigInt = num_bigint::BigInt;

/// The operations an integer type needs to support for IMP programs to be
/// parsed into, and evaluated over, that type.
///
/// This is implemented for every type satisfying its bounds, in particular
/// [`ImpSize`] and [`ImpBigInt`].
pub trait ImpInt:
    'static
    + Clone
    + Debug
    + Display
    + Ord
    + FromStr
    + From<i64>
    + Zero
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + CheckedDiv
{
}

impl<T> ImpInt for T where
    T: 'static
        + Clone
        + Debug
        + Display
        + Ord
        + FromStr
        + From<i64>
        + Zero
        + CheckedAdd
        + CheckedSub
        + CheckedMul
        + CheckedDiv
{
}
