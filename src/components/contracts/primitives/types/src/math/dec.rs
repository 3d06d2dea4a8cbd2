use super::{impl_serde_str, Int};
use num_bigint::{BigInt, Sign};
use ruc::*;
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

/// Number of decimal digits of a `Dec`.
pub const PRECISION: u32 = 18;

const PRECISION_MULTIPLIER: u64 = 1_000_000_000_000_000_000;

fn precision_multiplier() -> BigInt {
    BigInt::from(PRECISION_MULTIPLIER)
}

/// Divides by the precision multiplier, rounding half to even.
fn chop_precision_and_round(d: BigInt) -> BigInt {
    if d.sign() == Sign::Minus {
        return -chop_precision_and_round(-d);
    }

    let pm = precision_multiplier();
    let quo = &d / &pm;
    let rem = &d % &pm;
    if rem.sign() == Sign::NoSign {
        return quo;
    }

    let half = pm / BigInt::from(2u8);
    match rem.cmp(&half) {
        Ordering::Less => quo,
        Ordering::Greater => quo + BigInt::from(1u8),
        Ordering::Equal => {
            if (&quo % BigInt::from(2u8)).sign() == Sign::NoSign {
                quo
            } else {
                quo + BigInt::from(1u8)
            }
        }
    }
}

/// Signed fixed point decimal with 18 digits after the point.
///
/// `mul`/`quo` round half to even, the `_truncate` variants round toward zero.
/// Reward math uses the truncating forms wherever rounding up could pay out more
/// than was allocated.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigInt);

impl Dec {
    pub fn zero() -> Self {
        Dec::default()
    }

    pub fn one() -> Self {
        Dec(precision_multiplier())
    }

    /// The smallest positive value, 10^-18.
    pub fn smallest() -> Self {
        Dec(BigInt::from(1u8))
    }

    /// An integral decimal.
    pub fn new(i: i64) -> Self {
        Dec(BigInt::from(i) * precision_multiplier())
    }

    /// `i * 10^-prec`, `prec` is capped at `PRECISION`.
    pub fn with_prec(i: i64, prec: u32) -> Self {
        let prec = prec.min(PRECISION);
        Dec(BigInt::from(i) * BigInt::from(10u8).pow(PRECISION - prec))
    }

    pub fn from_int(i: &Int) -> Self {
        Dec(&i.0 * precision_multiplier())
    }

    /// Builds a decimal from its raw scaled integer.
    pub fn from_atto(raw: BigInt) -> Self {
        Dec(raw)
    }

    pub fn atto(&self) -> &BigInt {
        &self.0
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

    pub fn abs(&self) -> Dec {
        if self.is_negative() {
            Dec(-&self.0)
        } else {
            self.clone()
        }
    }

    pub fn mul(&self, other: &Dec) -> Dec {
        Dec(chop_precision_and_round(&self.0 * &other.0))
    }

    pub fn mul_truncate(&self, other: &Dec) -> Dec {
        Dec(&self.0 * &other.0 / precision_multiplier())
    }

    pub fn mul_int(&self, i: &Int) -> Dec {
        Dec(&self.0 * &i.0)
    }

    /// `None` when `other` is zero.
    pub fn quo(&self, other: &Dec) -> Option<Dec> {
        if other.is_zero() {
            return None;
        }
        let pm = precision_multiplier();
        let mul = &self.0 * &pm * &pm;
        Some(Dec(chop_precision_and_round(mul / &other.0)))
    }

    /// `None` when `other` is zero.
    pub fn quo_truncate(&self, other: &Dec) -> Option<Dec> {
        if other.is_zero() {
            return None;
        }
        Some(Dec(&self.0 * precision_multiplier() / &other.0))
    }

    /// `None` when `i` is zero.
    pub fn quo_int(&self, i: &Int) -> Option<Dec> {
        if i.is_zero() {
            return None;
        }
        Some(Dec(&self.0 / &i.0))
    }

    /// The integral part, rounded toward zero.
    pub fn truncate_int(&self) -> Int {
        Int(&self.0 / precision_multiplier())
    }

    pub fn truncate_dec(&self) -> Dec {
        Dec::from_int(&self.truncate_int())
    }
}

impl From<Int> for Dec {
    fn from(i: Int) -> Self {
        Dec::from_int(&i)
    }
}

impl Add for Dec {
    type Output = Dec;
    fn add(self, rhs: Dec) -> Dec {
        Dec(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn add(self, rhs: &'a Dec) -> Dec {
        Dec(&self.0 + &rhs.0)
    }
}

impl Sub for Dec {
    type Output = Dec;
    fn sub(self, rhs: Dec) -> Dec {
        Dec(self.0 - rhs.0)
    }
}

impl<'a> Sub<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn sub(self, rhs: &'a Dec) -> Dec {
        Dec(&self.0 - &rhs.0)
    }
}

impl Neg for Dec {
    type Output = Dec;
    fn neg(self) -> Dec {
        Dec(-self.0)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pm = precision_multiplier();
        let abs = self.abs().0;
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:0>width$}",
            sign,
            &abs / &pm,
            (&abs % &pm).to_string(),
            width = PRECISION as usize
        )
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Dec {
    type Err = Box<dyn RucError>;

    fn from_str(s: &str) -> Result<Self> {
        let body = s.trim();
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let mut parts = body.splitn(2, '.');
        let int_part = parts.next().unwrap_or_default();
        let frac_part = parts.next();

        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) {
            return Err(eg!(format!("invalid decimal '{}'", s)));
        }
        let frac = match frac_part {
            Some(frac) if !all_digits(frac) => {
                return Err(eg!(format!("invalid decimal '{}'", s)));
            }
            Some(frac) if frac.len() > PRECISION as usize => {
                return Err(eg!(format!(
                    "decimal '{}' exceeds {} fractional digits",
                    s, PRECISION
                )));
            }
            Some(frac) => frac,
            None => "",
        };

        let digits = format!("{}{:0<width$}", int_part, frac, width = PRECISION as usize);
        let raw = BigInt::from_str(&digits).c(d!())?;
        Ok(Dec(if negative { -raw } else { raw }))
    }
}

impl_serde_str!(Dec);
