//! Reward pools: one bag of coins per reward denom.
//!
//! A pool is named after the staking denom whose holders share it, its coins are the
//! rewards accrued in that pool. Collections keep the pools ascending by denom and never
//! keep an empty pool, so two equal collections always serialize to the same bytes.

use crate::coin::{Coins, DecCoins};
use crate::error::InvariantViolation;
use ruc::*;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub denom: String,
    pub coins: Coins,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecPool {
    pub denom: String,
    pub dec_coins: DecCoins,
}

impl DecPool {
    pub fn new<S: Into<String>>(denom: S, dec_coins: DecCoins) -> Self {
        DecPool {
            denom: denom.into(),
            dec_coins,
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Pool>", into = "Vec<Pool>")]
pub struct Pools(BTreeMap<String, Coins>);

impl Pools {
    pub fn new() -> Self {
        Pools::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Coins> {
        self.0.iter()
    }

    pub fn add_pool(&mut self, denom: &str, coins: &Coins) {
        let merged = self.coins_of(denom).add(coins);
        if merged.is_empty() {
            self.0.remove(denom);
        } else {
            self.0.insert(denom.to_owned(), merged);
        }
    }

    pub fn coins_of(&self, denom: &str) -> Coins {
        self.0.get(denom).cloned().unwrap_or_default()
    }

    /// All pools merged into one bag of coins.
    pub fn sum(&self) -> Coins {
        self.0
            .values()
            .fold(Coins::new(), |acc, coins| acc.add(coins))
    }

    pub fn to_dec_pools(&self) -> DecPools {
        let mut res = DecPools::new();
        for (denom, coins) in self.iter() {
            res.add_pool(denom, &coins.to_dec_coins());
        }
        res
    }
}

impl From<Vec<Pool>> for Pools {
    fn from(pools: Vec<Pool>) -> Self {
        let mut res = Pools::new();
        for p in pools {
            res.add_pool(&p.denom, &p.coins);
        }
        res
    }
}

impl From<Pools> for Vec<Pool> {
    fn from(pools: Pools) -> Self {
        pools
            .0
            .into_iter()
            .map(|(denom, coins)| Pool { denom, coins })
            .collect()
    }
}

impl fmt::Debug for Pools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DecPool>", into = "Vec<DecPool>")]
pub struct DecPools(BTreeMap<String, DecCoins>);

impl DecPools {
    pub fn new() -> Self {
        DecPools::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DecCoins> {
        self.0.iter()
    }

    pub fn denoms(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn coins_of(&self, denom: &str) -> DecCoins {
        self.0.get(denom).cloned().unwrap_or_default()
    }

    fn put(&mut self, denom: &str, coins: DecCoins) {
        if coins.is_empty() {
            self.0.remove(denom);
        } else {
            self.0.insert(denom.to_owned(), coins);
        }
    }

    pub fn add_pool(&mut self, denom: &str, coins: &DecCoins) {
        let merged = self.coins_of(denom).add(coins);
        self.put(denom, merged);
    }

    pub fn add(&self, other: &DecPools) -> DecPools {
        let mut res = self.clone();
        for (denom, coins) in other.iter() {
            res.add_pool(denom, coins);
        }
        res
    }

    /// The difference, plus whether any amount went negative.
    pub fn safe_sub(&self, other: &DecPools) -> (DecPools, bool) {
        let mut res = self.clone();
        let mut has_neg = false;
        for (denom, coins) in other.iter() {
            let (diff, neg) = res.coins_of(denom).safe_sub(coins);
            has_neg |= neg;
            res.put(denom, diff);
        }
        (res, has_neg)
    }

    /// Fails with an `InvariantViolation` when any amount would go negative.
    pub fn sub(&self, other: &DecPools) -> Result<DecPools> {
        let (res, has_neg) = self.safe_sub(other);
        if has_neg {
            return Err(eg!(InvariantViolation::new(format!(
                "negative pool amount: {} - {}",
                self, other
            ))));
        }
        Ok(res)
    }

    /// Per pool, per denom minimum.
    pub fn intersect(&self, other: &DecPools) -> DecPools {
        let mut res = DecPools::new();
        for (denom, coins) in self.iter() {
            if let Some(o) = other.0.get(denom) {
                res.put(denom, coins.intersect(o));
            }
        }
        res
    }

    /// Splits every pool into its integral coins and the decimal change.
    pub fn truncate_decimal(&self) -> (Pools, DecPools) {
        let mut truncated = Pools::new();
        let mut change = DecPools::new();
        for (denom, coins) in self.iter() {
            let (int, rest) = coins.truncate_decimal();
            truncated.add_pool(denom, &int);
            change.put(denom, rest);
        }
        (truncated, change)
    }

    /// All pools merged into one bag of coins.
    pub fn sum(&self) -> DecCoins {
        self.0
            .values()
            .fold(DecCoins::new(), |acc, coins| acc.add(coins))
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.values().any(|c| c.is_any_negative())
    }
}

impl From<Vec<DecPool>> for DecPools {
    fn from(pools: Vec<DecPool>) -> Self {
        let mut res = DecPools::new();
        for p in pools {
            res.add_pool(&p.denom, &p.dec_coins);
        }
        res
    }
}

impl From<DecPools> for Vec<DecPool> {
    fn from(pools: DecPools) -> Self {
        pools
            .0
            .into_iter()
            .map(|(denom, dec_coins)| DecPool { denom, dec_coins })
            .collect()
    }
}

impl FromIterator<DecPool> for DecPools {
    fn from_iter<I: IntoIterator<Item = DecPool>>(iter: I) -> Self {
        DecPools::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Display for DecPools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(denom, coins)| format!("{}:[{}]", denom, coins))
            .collect();
        write!(f, "{}", parts.join(";"))
    }
}

impl fmt::Debug for DecPools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecPools({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::DecCoin;
    use crate::error::is_invariant_violation;
    use crate::math::{Dec, Int};

    fn pool(denom: &str, items: &[(&str, &str)]) -> DecPool {
        DecPool::new(
            denom,
            items
                .iter()
                .map(|(d, a)| DecCoin::new(*d, a.parse::<Dec>().unwrap()))
                .collect(),
        )
    }

    #[test]
    fn dec_pools_add_sub() {
        let a: DecPools = vec![pool("ufra", &[("ufra", "10")])].into();
        let b: DecPools = vec![
            pool("ufra", &[("ufra", "2.5")]),
            pool("uinit", &[("ufra", "1")]),
        ]
        .into();

        let sum = a.add(&b);
        assert_eq!(sum.denoms(), vec!["ufra".to_string(), "uinit".to_string()]);
        assert_eq!(sum.sub(&b).unwrap(), a);

        let e = a.sub(&b).unwrap_err();
        assert!(is_invariant_violation(&*e));

        // an emptied pool disappears
        assert!(a.sub(&a).unwrap().is_empty());
    }

    #[test]
    fn dec_pools_intersect_and_sum() {
        let a: DecPools = vec![
            pool("ufra", &[("ufra", "10"), ("uusd", "1")]),
            pool("uinit", &[("ufra", "3")]),
        ]
        .into();
        let b: DecPools = vec![pool("ufra", &[("ufra", "9.5")])].into();
        let expect: DecPools = vec![pool("ufra", &[("ufra", "9.5")])].into();
        assert_eq!(a.intersect(&b), expect);

        let sum = a.sum();
        assert_eq!(sum.amount_of("ufra"), "13".parse::<Dec>().unwrap());
        assert_eq!(sum.amount_of("uusd"), Dec::one());
    }

    #[test]
    fn dec_pools_truncate_decimal() {
        let a: DecPools = vec![
            pool("ufra", &[("ufra", "10.5")]),
            pool("uinit", &[("ufra", "0.75")]),
        ]
        .into();
        let (pools, change) = a.truncate_decimal();
        assert_eq!(pools.coins_of("ufra").amount_of("ufra"), Int::from(10u64));
        assert!(pools.coins_of("uinit").is_empty());
        assert_eq!(pools.sum().amount_of("ufra"), Int::from(10u64));
        assert_eq!(change.sum().amount_of("ufra"), "1.25".parse::<Dec>().unwrap());
        assert_eq!(change.add(&DecPools::new()).len(), 2);
    }

    #[test]
    fn dec_pools_order_independent_bytes() {
        let a: DecPools = vec![
            pool("b", &[("x", "1")]),
            pool("a", &[("y", "2"), ("x", "1")]),
        ]
        .into();
        let b: DecPools = vec![
            pool("a", &[("x", "1"), ("y", "2")]),
            pool("b", &[("x", "1")]),
        ]
        .into();
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
        let back: DecPools = serde_json::from_slice(&serde_json::to_vec(&a).unwrap()).unwrap();
        assert_eq!(back, a);
    }
}
