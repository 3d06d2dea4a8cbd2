//! Runtime shared by the distribution integration tests.

#![allow(dead_code)]

use fp_core::{context::Context, macros::Get, parameter_types};
use fp_mocks::*;
use fp_traits::{bank::BankKeeper, staking::StakingKeeper};
use fp_types::{
    actions::distribution::{Params, RewardWeight},
    coin::{Coins, DecCoins},
    crypto::Address,
    math::Dec,
    pool::{DecPool, DecPools},
    staking::VoteInfo,
};
use module_distribution::{
    genesis::GenesisState, types::default_params, App, Config, Hooks, MODULE_NAME,
};

pub struct TestRuntime;

parameter_types! {
    pub TestBaseDenom: String = "ufra".to_owned();
    pub TestFeeCollector: String = "fee_collector".to_owned();
    pub TestAuthority: Address = *CHARLIE;
    pub TestDriftMargin: u64 = 3;
    pub TestCheckPeriod: u64 = 1;
    pub TestParams: Params = default_params("ufra");
}

impl Config for TestRuntime {
    type Bank = MockBank;
    type Staking = MockStaking;
    type Dex = MockDex;
    type BaseDenom = TestBaseDenom;
    type FeeCollector = TestFeeCollector;
    type Authority = TestAuthority;
    type StakeDriftMarginUlps = TestDriftMargin;
    type InvariantCheckPeriod = TestCheckPeriod;
    type DefaultParams = TestParams;
}

pub type Distr = App<TestRuntime>;

/// A chain at height 1 with the distribution hooks registered and `params` in genesis.
pub fn setup_with_params(params: Params) -> (Context, MockStaking) {
    let ctx = new_context();
    let mut staking = MockStaking::new();
    staking.register_hooks(Box::new(Hooks::<TestRuntime>::default()));
    Distr::init_genesis_state(&ctx, &GenesisState::new(params)).unwrap();
    (ctx, staking)
}

pub fn setup() -> (Context, MockStaking) {
    setup_with_params(TestParams::get())
}

pub fn params_without_tax() -> Params {
    let mut params = default_params("ufra");
    params.community_tax = Dec::zero();
    params
}

pub fn weighted_params(tax: &str, weights: &[(&str, &str)]) -> Params {
    Params {
        community_tax: dec(tax),
        withdraw_addr_enabled: true,
        reward_weights: weights
            .iter()
            .map(|(denom, w)| RewardWeight {
                denom: (*denom).to_owned(),
                weight: dec(w),
            })
            .collect(),
    }
}

pub fn fee_collector() -> Address {
    Address::module(&TestFeeCollector::get())
}

pub fn module_account() -> Address {
    Address::module(MODULE_NAME)
}

/// Puts `amount` into the fee collector, to be distributed by the next allocation.
pub fn collect_fees(ctx: &Context, amount: &Coins) {
    MockBank::add_balance(ctx, &fee_collector(), amount).unwrap();
}

/// Votes of every validator, each with its `ufra` tokens as power.
pub fn votes(ctx: &Context) -> (u64, Vec<VoteInfo>) {
    let votes: Vec<VoteInfo> = MockStaking::validators(ctx)
        .unwrap()
        .into_iter()
        .map(|v| VoteInfo {
            validator: v.operator,
            power: v.tokens.amount_of("ufra").to_u128().unwrap_or(0) as u64,
        })
        .collect();
    (votes.iter().map(|v| v.power).sum(), votes)
}

/// Collects `amount` in fees and distributes them to every validator.
pub fn allocate(ctx: &Context, amount: &Coins) {
    collect_fees(ctx, amount);
    let (power, votes) = votes(ctx);
    Distr::allocate_tokens(ctx, power, &votes).unwrap();
}

pub fn pools(items: &[(&str, &[(&str, &str)])]) -> DecPools {
    items
        .iter()
        .map(|(denom, coins)| DecPool::new(*denom, dec_coins(coins)))
        .collect()
}

pub fn community_pool(ctx: &Context) -> DecCoins {
    Distr::fee_pool(ctx).unwrap().community_pool
}

pub fn balance(ctx: &Context, who: &Address) -> Coins {
    MockBank::get_all_balances(ctx, who).unwrap()
}
