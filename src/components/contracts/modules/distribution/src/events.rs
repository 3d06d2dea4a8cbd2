use fp_events::*;
use fp_types::{
    coin::{Coins, DecCoins},
    crypto::Address,
};

/// Commission accrued by `validator` in `pool`.
#[derive(Event)]
pub struct Commission {
    pub validator: Address,
    pub pool: String,
    pub amount: DecCoins,
}

/// Total reward, commission included, allocated to `validator` in `pool`.
#[derive(Event)]
pub struct Rewards {
    pub validator: Address,
    pub pool: String,
    pub amount: DecCoins,
}

#[derive(Event)]
pub struct WithdrawRewards {
    pub delegator: Address,
    pub validator: Address,
    pub amount: Coins,
}

#[derive(Event)]
pub struct WithdrawCommission {
    pub validator: Address,
    pub amount: Coins,
}

#[derive(Event)]
pub struct SetWithdrawAddress {
    pub delegator: Address,
    pub withdraw_address: Address,
}

#[derive(Event)]
pub struct FundCommunityPool {
    pub depositor: Address,
    pub amount: Coins,
}

#[derive(Event)]
pub struct CommunityPoolSpend {
    pub recipient: Address,
    pub amount: Coins,
}
