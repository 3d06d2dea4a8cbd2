//! Read-only views of the staking state this crate's consumers are handed.

use crate::coin::{Coins, DecCoins};
use crate::crypto::Address;
use crate::math::Dec;
use serde::{Deserialize, Serialize};

/// A validator as seen from outside the staking module.
///
/// A validator may be bonded in several denoms at once, each with its own token
/// total and its own delegator share total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub operator: Address,
    pub tokens: Coins,
    pub delegator_shares: DecCoins,
    pub commission_rate: Dec,
}

impl ValidatorInfo {
    /// Tokens backing `shares`, rounded half to even.
    pub fn tokens_from_shares(&self, shares: &DecCoins) -> DecCoins {
        let mut res = DecCoins::new();
        for (denom, share) in shares.iter() {
            let total = self.delegator_shares.amount_of(denom);
            if total.is_zero() {
                continue;
            }
            let tokens = Dec::from_int(&self.tokens.amount_of(denom));
            if let Some(v) = share.mul(&tokens).quo(&total) {
                res.add_coin(denom, &v);
            }
        }
        res
    }

    /// Tokens backing `shares`, rounded toward zero.
    pub fn tokens_from_shares_truncated(&self, shares: &DecCoins) -> DecCoins {
        let mut res = DecCoins::new();
        for (denom, share) in shares.iter() {
            let total = self.delegator_shares.amount_of(denom);
            if total.is_zero() {
                continue;
            }
            let tokens = Dec::from_int(&self.tokens.amount_of(denom));
            if let Some(v) = share.mul(&tokens).quo_truncate(&total) {
                res.add_coin(denom, &v);
            }
        }
        res
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationInfo {
    pub delegator: Address,
    pub validator: Address,
    pub shares: DecCoins,
}

/// One entry of the last commit's votes. Every listed validator shares the fees
/// by its power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteInfo {
    pub validator: Address,
    pub power: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::{Coin, DecCoin};

    #[test]
    fn tokens_from_shares_after_slash() {
        let val = ValidatorInfo {
            operator: Address::from([1u8; 20]),
            tokens: vec![Coin::new("ufra", 50u64)].into(),
            delegator_shares: vec![DecCoin::new("ufra", Dec::new(150))].into(),
            commission_rate: Dec::zero(),
        };
        let shares: DecCoins = vec![DecCoin::new("ufra", Dec::new(100))].into();

        assert_eq!(
            val.tokens_from_shares(&shares).amount_of("ufra"),
            "33.333333333333333333".parse::<Dec>().unwrap()
        );
        let mut two_thirds = val.clone();
        two_thirds.tokens = vec![Coin::new("ufra", 100u64)].into();
        assert_eq!(
            two_thirds.tokens_from_shares(&shares).amount_of("ufra"),
            "66.666666666666666667".parse::<Dec>().unwrap()
        );
        assert_eq!(
            two_thirds.tokens_from_shares_truncated(&shares).amount_of("ufra"),
            "66.666666666666666666".parse::<Dec>().unwrap()
        );

        // no shares issued in a denom, nothing backs it
        let other: DecCoins = vec![DecCoin::new("uusd", Dec::one())].into();
        assert!(val.tokens_from_shares(&other).is_empty());
    }
}
