use super::impl_serde_str;
use num_bigint::{BigInt, Sign};
use ruc::*;
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

/// Signed integer of unbounded size, the amount type of `Coin`.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(pub(crate) BigInt);

impl Int {
    pub fn zero() -> Self {
        Int::default()
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    pub fn mul(&self, other: &Int) -> Int {
        Int(&self.0 * &other.0)
    }

    /// Truncating division, `None` for a zero divisor.
    pub fn quo(&self, other: &Int) -> Option<Int> {
        if other.is_zero() {
            return None;
        }
        Some(Int(&self.0 / &other.0))
    }

    pub fn to_u128(&self) -> Option<u128> {
        u128::try_from(&self.0).ok()
    }

    pub fn as_big_int(&self) -> &BigInt {
        &self.0
    }
}

impl From<u64> for Int {
    fn from(v: u64) -> Self {
        Int(BigInt::from(v))
    }
}

impl From<u128> for Int {
    fn from(v: u128) -> Self {
        Int(BigInt::from(v))
    }
}

impl From<i64> for Int {
    fn from(v: i64) -> Self {
        Int(BigInt::from(v))
    }
}

impl From<BigInt> for Int {
    fn from(v: BigInt) -> Self {
        Int(v)
    }
}

impl Add for Int {
    type Output = Int;
    fn add(self, rhs: Int) -> Int {
        Int(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Int> for &'a Int {
    type Output = Int;
    fn add(self, rhs: &'a Int) -> Int {
        Int(&self.0 + &rhs.0)
    }
}

impl Sub for Int {
    type Output = Int;
    fn sub(self, rhs: Int) -> Int {
        Int(self.0 - rhs.0)
    }
}

impl<'a> Sub<&'a Int> for &'a Int {
    type Output = Int;
    fn sub(self, rhs: &'a Int) -> Int {
        Int(&self.0 - &rhs.0)
    }
}

impl Neg for Int {
    type Output = Int;
    fn neg(self) -> Int {
        Int(-self.0)
    }
}

impl PartialEq<u64> for Int {
    fn eq(&self, other: &u64) -> bool {
        self.0 == BigInt::from(*other)
    }
}

impl PartialOrd<u64> for Int {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        self.0.partial_cmp(&BigInt::from(*other))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Int {
    type Err = Box<dyn RucError>;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(eg!("empty integer string"));
        }
        BigInt::from_str(trimmed)
            .map(Int)
            .map_err(|e| eg!(format!("invalid integer '{}': {}", s, e)))
    }
}

impl_serde_str!(Int);
