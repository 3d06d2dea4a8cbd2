use crate::error::InvariantViolation;
use crate::math::{Dec, Int};
use ruc::*;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};
use std::fmt;

/// An integral amount of one denom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Int,
}

impl Coin {
    pub fn new<S: Into<String>, A: Into<Int>>(denom: S, amount: A) -> Self {
        Coin {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// A decimal amount of one denom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Dec,
}

impl DecCoin {
    pub fn new<S: Into<String>>(denom: S, amount: Dec) -> Self {
        DecCoin {
            denom: denom.into(),
            amount,
        }
    }
}

/// Integral amounts keyed by denom, ascending, zero amounts are never kept.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(BTreeMap<String, Int>);

impl Coins {
    pub fn new() -> Self {
        Coins::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Int> {
        self.0.iter()
    }

    pub fn denoms(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn amount_of(&self, denom: &str) -> Int {
        self.0.get(denom).cloned().unwrap_or_default()
    }

    pub fn add_coin(&mut self, denom: &str, amount: &Int) {
        let sum = &self.amount_of(denom) + amount;
        if sum.is_zero() {
            self.0.remove(denom);
        } else {
            self.0.insert(denom.to_owned(), sum);
        }
    }

    pub fn add(&self, other: &Coins) -> Coins {
        let mut res = self.clone();
        for (denom, amount) in other.iter() {
            res.add_coin(denom, amount);
        }
        res
    }

    /// The difference, plus whether any amount went negative.
    pub fn safe_sub(&self, other: &Coins) -> (Coins, bool) {
        let mut res = self.clone();
        for (denom, amount) in other.iter() {
            res.add_coin(denom, &-amount.clone());
        }
        let has_neg = res.is_any_negative();
        (res, has_neg)
    }

    /// Fails with an `InvariantViolation` when any amount would go negative.
    pub fn sub(&self, other: &Coins) -> Result<Coins> {
        let (res, has_neg) = self.safe_sub(other);
        if has_neg {
            return Err(eg!(InvariantViolation::new(format!(
                "negative coin amount: {} - {}",
                self, other
            ))));
        }
        Ok(res)
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.values().any(|a| a.is_negative())
    }

    /// Every denom of `other` is covered by `self`.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other
            .iter()
            .all(|(denom, amount)| &self.amount_of(denom) >= amount)
    }

    pub fn to_dec_coins(&self) -> DecCoins {
        DecCoins::from(self)
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        let mut res = Coins::new();
        for c in coins {
            res.add_coin(&c.denom, &c.amount);
        }
        res
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins
            .0
            .into_iter()
            .map(|(denom, amount)| Coin { denom, amount })
            .collect()
    }
}

impl FromIterator<Coin> for Coins {
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        Coins::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(denom, amount)| format!("{}{}", amount, denom))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

impl fmt::Debug for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coins({})", self)
    }
}

/// Decimal amounts keyed by denom, ascending, zero amounts are never kept.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DecCoin>", into = "Vec<DecCoin>")]
pub struct DecCoins(BTreeMap<String, Dec>);

impl DecCoins {
    pub fn new() -> Self {
        DecCoins::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Dec> {
        self.0.iter()
    }

    pub fn denoms(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn amount_of(&self, denom: &str) -> Dec {
        self.0.get(denom).cloned().unwrap_or_default()
    }

    pub fn add_coin(&mut self, denom: &str, amount: &Dec) {
        let sum = &self.amount_of(denom) + amount;
        if sum.is_zero() {
            self.0.remove(denom);
        } else {
            self.0.insert(denom.to_owned(), sum);
        }
    }

    pub fn add(&self, other: &DecCoins) -> DecCoins {
        let mut res = self.clone();
        for (denom, amount) in other.iter() {
            res.add_coin(denom, amount);
        }
        res
    }

    /// The difference, plus whether any amount went negative.
    pub fn safe_sub(&self, other: &DecCoins) -> (DecCoins, bool) {
        let mut res = self.clone();
        for (denom, amount) in other.iter() {
            res.add_coin(denom, &-amount.clone());
        }
        let has_neg = res.is_any_negative();
        (res, has_neg)
    }

    /// Fails with an `InvariantViolation` when any amount would go negative.
    pub fn sub(&self, other: &DecCoins) -> Result<DecCoins> {
        let (res, has_neg) = self.safe_sub(other);
        if has_neg {
            return Err(eg!(InvariantViolation::new(format!(
                "negative decimal coin amount: {} - {}",
                self, other
            ))));
        }
        Ok(res)
    }

    /// Per denom minimum, denoms missing on either side are dropped.
    pub fn intersect(&self, other: &DecCoins) -> DecCoins {
        let mut res = DecCoins::new();
        for (denom, amount) in self.iter() {
            if let Some(o) = other.0.get(denom) {
                res.add_coin(denom, amount.min(o));
            }
        }
        res
    }

    /// Splits into the integral coins and the decimal change.
    pub fn truncate_decimal(&self) -> (Coins, DecCoins) {
        let mut truncated = Coins::new();
        let mut change = DecCoins::new();
        for (denom, amount) in self.iter() {
            let int = amount.truncate_int();
            let rest = amount - &Dec::from_int(&int);
            truncated.add_coin(denom, &int);
            change.add_coin(denom, &rest);
        }
        (truncated, change)
    }

    pub fn mul_dec(&self, d: &Dec) -> DecCoins {
        self.map_amounts(|a| a.mul(d))
    }

    pub fn mul_dec_truncate(&self, d: &Dec) -> DecCoins {
        self.map_amounts(|a| a.mul_truncate(d))
    }

    /// Fails with an `InvariantViolation` on a zero divisor.
    pub fn quo_dec_truncate(&self, d: &Dec) -> Result<DecCoins> {
        if d.is_zero() {
            return Err(eg!(InvariantViolation::new(format!(
                "division of {} by zero",
                self
            ))));
        }
        Ok(self.map_amounts(|a| a.quo_truncate(d).unwrap_or_default()))
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.values().any(|a| a.is_negative())
    }

    fn map_amounts<F: Fn(&Dec) -> Dec>(&self, f: F) -> DecCoins {
        let mut res = DecCoins::new();
        for (denom, amount) in self.iter() {
            res.add_coin(denom, &f(amount));
        }
        res
    }
}

impl From<&Coins> for DecCoins {
    fn from(coins: &Coins) -> Self {
        let mut res = DecCoins::new();
        for (denom, amount) in coins.iter() {
            res.add_coin(denom, &Dec::from_int(amount));
        }
        res
    }
}

impl From<Vec<DecCoin>> for DecCoins {
    fn from(coins: Vec<DecCoin>) -> Self {
        let mut res = DecCoins::new();
        for c in coins {
            res.add_coin(&c.denom, &c.amount);
        }
        res
    }
}

impl From<DecCoins> for Vec<DecCoin> {
    fn from(coins: DecCoins) -> Self {
        coins
            .0
            .into_iter()
            .map(|(denom, amount)| DecCoin { denom, amount })
            .collect()
    }
}

impl FromIterator<DecCoin> for DecCoins {
    fn from_iter<I: IntoIterator<Item = DecCoin>>(iter: I) -> Self {
        DecCoins::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Display for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(denom, amount)| format!("{}{}", amount, denom))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

impl fmt::Debug for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecCoins({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_invariant_violation;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    fn dcs(items: &[(&str, &str)]) -> DecCoins {
        items
            .iter()
            .map(|(denom, amount)| DecCoin::new(*denom, dec(amount)))
            .collect()
    }

    #[test]
    fn coins_drop_zero_and_sort() {
        let coins: Coins = vec![
            Coin::new("uusd", 5u64),
            Coin::new("ufra", 10u64),
            Coin::new("uusd", -5i64),
        ]
        .into_iter()
        .collect();
        assert_eq!(coins.denoms(), vec!["ufra".to_string()]);
        assert_eq!(coins.to_string(), "10ufra");

        let a: Coins = vec![Coin::new("b", 1u64), Coin::new("a", 2u64)].into();
        let b: Coins = vec![Coin::new("a", 2u64), Coin::new("b", 1u64)].into();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn coins_sub_negative_is_invariant_violation() {
        let a: Coins = vec![Coin::new("ufra", 10u64)].into();
        let b: Coins = vec![Coin::new("ufra", 11u64)].into();
        let (diff, has_neg) = a.safe_sub(&b);
        assert!(has_neg);
        assert_eq!(diff.amount_of("ufra"), Int::from(-1i64));

        let e = a.sub(&b).unwrap_err();
        assert!(is_invariant_violation(&*e));
        assert!(a.sub(&a).unwrap().is_empty());
        assert!(a.is_all_gte(&a));
        assert!(!a.is_all_gte(&b));
    }

    #[test]
    fn dec_coins_intersect() {
        let a = dcs(&[("a", "1.5"), ("b", "2"), ("c", "3")]);
        let b = dcs(&[("a", "2"), ("b", "1.25"), ("d", "7")]);
        assert_eq!(a.intersect(&b), dcs(&[("a", "1.5"), ("b", "1.25")]));
    }

    #[test]
    fn dec_coins_truncate_decimal() {
        let (coins, change) = dcs(&[("ufra", "10.5"), ("uusd", "3")]).truncate_decimal();
        assert_eq!(coins.amount_of("ufra"), Int::from(10u64));
        assert_eq!(coins.amount_of("uusd"), Int::from(3u64));
        assert_eq!(change, dcs(&[("ufra", "0.5")]));

        let (coins, change) = dcs(&[("ufra", "0.25")]).truncate_decimal();
        assert!(coins.is_empty());
        assert_eq!(change, dcs(&[("ufra", "0.25")]));
    }

    #[test]
    fn dec_coins_scale() {
        let a = dcs(&[("ufra", "100")]);
        assert_eq!(a.mul_dec_truncate(&dec("0.98")), dcs(&[("ufra", "98")]));
        assert_eq!(a.mul_dec(&dec("0.5")), dcs(&[("ufra", "50")]));
        assert_eq!(
            a.quo_dec_truncate(&dec("3")).unwrap(),
            dcs(&[("ufra", "33.333333333333333333")])
        );
        let e = a.quo_dec_truncate(&Dec::zero()).unwrap_err();
        assert!(is_invariant_violation(&*e));
        assert!(a.mul_dec(&Dec::zero()).is_empty());
    }

    #[test]
    fn dec_coins_sub() {
        let a = dcs(&[("ufra", "1")]);
        let b = dcs(&[("ufra", "0.4"), ("uusd", "1")]);
        assert!(a.sub(&b).is_err());
        assert_eq!(a.sub(&dcs(&[("ufra", "0.4")])).unwrap(), dcs(&[("ufra", "0.6")]));
        let (diff, has_neg) = a.safe_sub(&b);
        assert!(has_neg);
        assert!(diff.is_any_negative());
    }

    #[test]
    fn dec_coins_serde() {
        let a = dcs(&[("uusd", "1.5"), ("ufra", "2")]);
        let s = serde_json::to_string(&a).unwrap();
        assert_eq!(
            s,
            r#"[{"denom":"ufra","amount":"2.000000000000000000"},{"denom":"uusd","amount":"1.500000000000000000"}]"#
        );
        assert_eq!(serde_json::from_str::<DecCoins>(&s).unwrap(), a);
    }
}
