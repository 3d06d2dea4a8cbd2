use crate::{coin::Coins, crypto::Address, math::Dec};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SetWithdrawAddress(SetWithdrawAddress),
    WithdrawDelegatorReward(WithdrawDelegatorReward),
    WithdrawValidatorCommission(WithdrawValidatorCommission),
    FundCommunityPool(FundCommunityPool),
    CommunityPoolSpend(CommunityPoolSpend),
    UpdateParams(UpdateParams),
}

/// Relative weight of one reward pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardWeight {
    pub denom: String,
    pub weight: Dec,
}

/// Governance controlled parameters of the distribution module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub community_tax: Dec,
    pub withdraw_addr_enabled: bool,
    pub reward_weights: Vec<RewardWeight>,
}

/// Route the rewards of the sender to `withdraw_address` from now on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWithdrawAddress {
    pub withdraw_address: Address,
}

/// Pay the rewards of the sender's delegation to `validator`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawDelegatorReward {
    pub validator: Address,
}

/// Pay the accumulated commission, the sender must be the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawValidatorCommission {
    pub validator: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundCommunityPool {
    pub amount: Coins,
}

/// Governance only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityPoolSpend {
    pub recipient: Address,
    pub amount: Coins,
}

/// Governance only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateParams {
    pub params: Params,
}
