//! Records kept per validator and per delegation.

use crate::error::DistrError;
use fp_types::{
    actions::distribution::{Params, RewardWeight},
    coin::DecCoins,
    crypto::Address,
    math::Dec,
    pool::DecPools,
};
use ruc::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rewards accrued in the open period of a validator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRewards {
    pub rewards: DecPools,
    pub period: u64,
}

/// Cumulative reward per token as of the end of a closed period.
///
/// Referenced by the period chain of the validator and by at most one
/// delegation starting info or slash event, so `reference_count` never exceeds 2.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRewards {
    pub cumulative_reward_ratios: DecPools,
    pub reference_count: u8,
}

/// The period and stake a delegation last settled at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingInfo {
    pub previous_period: u64,
    pub stakes: DecCoins,
    pub height: u64,
}

/// Share of the tokens of each denom cut at `validator_period`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashEvent {
    pub validator_period: u64,
    pub fractions: DecCoins,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePool {
    pub community_pool: DecCoins,
}

/// Rewards owed to a validator operator, as returned by queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDistributionInfo {
    pub operator_address: Address,
    pub self_bond_rewards: DecPools,
    pub commission: DecPools,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationDelegatorReward {
    pub validator: Address,
    pub reward: DecPools,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationTotalRewards {
    pub rewards: Vec<DelegationDelegatorReward>,
    pub total: DecPools,
}

/// Params of a fresh chain: a 2% community tax and the whole reward going to the
/// pool of `base_denom`.
pub fn default_params(base_denom: &str) -> Params {
    Params {
        community_tax: Dec::with_prec(2, 2),
        withdraw_addr_enabled: true,
        reward_weights: vec![RewardWeight {
            denom: base_denom.to_owned(),
            weight: Dec::one(),
        }],
    }
}

pub fn validate_params(params: &Params) -> Result<()> {
    let invalid = |detail: String| eg!(DistrError::InvalidParams(detail));

    let tax = &params.community_tax;
    if tax.is_negative() || tax > &Dec::one() {
        return Err(invalid(format!("community tax must be within [0, 1]: {}", tax)));
    }
    if params.reward_weights.is_empty() {
        return Err(invalid("at least one reward weight is required".to_owned()));
    }

    let mut seen = BTreeSet::new();
    for w in params.reward_weights.iter() {
        if w.denom.is_empty() {
            return Err(invalid("empty reward denom".to_owned()));
        }
        if !w.weight.is_positive() {
            return Err(invalid(format!(
                "reward weight of {} must be positive: {}",
                w.denom, w.weight
            )));
        }
        if !seen.insert(w.denom.as_str()) {
            return Err(invalid(format!("duplicated reward denom {}", w.denom)));
        }
    }
    Ok(())
}
