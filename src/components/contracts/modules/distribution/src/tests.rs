use crate::storage::*;
use crate::types::{default_params, HistoricalRewards, StartingInfo};
use crate::*;
use fp_core::context::Context;
use fp_mocks::*;
use fp_traits::{bank::BankKeeper, staking::StakingKeeper};
use fp_types::{
    coin::{Coins, DecCoin, DecCoins},
    error::is_invariant_violation,
    math::Dec,
    pool::{DecPool, DecPools},
};

pub struct TestRuntime;

parameter_types! {
    pub TestBaseDenom: String = "ufra".to_owned();
    pub TestFeeCollector: String = "fee_collector".to_owned();
    pub TestAuthority: Address = *CHARLIE;
    pub TestDriftMargin: u64 = 3;
    pub TestCheckPeriod: u64 = 0;
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

type Distr = App<TestRuntime>;

fn setup() -> (Context, MockStaking) {
    let ctx = new_context();
    let mut staking = MockStaking::new();
    staking.register_hooks(Box::new(Hooks::<TestRuntime>::default()));
    (ctx, staking)
}

fn pools(items: &[(&str, &[(&str, &str)])]) -> DecPools {
    items
        .iter()
        .map(|(denom, coins)| DecPool::new(*denom, dec_coins(coins)))
        .collect()
}

#[test]
fn new_validator_opens_period_one() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, dec("0.1"), &Coins::new())
        .unwrap();

    assert_eq!(Distr::current_rewards(&ctx, &VAL_A).unwrap().period, 1);
    let genesis = Distr::historical_rewards(&ctx, &VAL_A, 0).unwrap();
    assert_eq!(genesis.reference_count, 1);
    assert!(genesis.cumulative_reward_ratios.is_empty());
    assert!(Distr::outstanding_rewards(&ctx, &VAL_A).unwrap().is_empty());
    assert!(Distr::accumulated_commission(&ctx, &VAL_A).unwrap().is_empty());
}

#[test]
fn increment_period_archives_ratio() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 100)]))
        .unwrap();
    // the self bond closed period 1 and pinned it
    assert_eq!(Distr::current_rewards(&ctx, &VAL_A).unwrap().period, 2);
    assert_eq!(
        Distr::historical_rewards(&ctx, &VAL_A, 1)
            .unwrap()
            .reference_count,
        2
    );
    assert!(ValidatorHistoricalRewards::get(&ctx.state.read(), &VAL_A, &0)
        .unwrap()
        .is_none());

    let val = MockStaking::validator(&ctx, &VAL_A).unwrap().unwrap();
    Distr::allocate_tokens_to_validator_pool(&ctx, &val, "ufra", &dec_coins(&[("ufra", "50")]))
        .unwrap();
    assert_eq!(Distr::increment_validator_period(&ctx, &val).unwrap(), 2);

    let closed = Distr::historical_rewards(&ctx, &VAL_A, 2).unwrap();
    assert_eq!(closed.reference_count, 1);
    assert_eq!(
        closed.cumulative_reward_ratios,
        pools(&[("ufra", &[("ufra", "0.5")])])
    );
    // period 1 lost the forward reference, the delegation still holds it
    assert_eq!(
        Distr::historical_rewards(&ctx, &VAL_A, 1)
            .unwrap()
            .reference_count,
        1
    );
    let current = Distr::current_rewards(&ctx, &VAL_A).unwrap();
    assert_eq!(current.period, 3);
    assert!(current.rewards.is_empty());
}

#[test]
fn zero_token_pool_goes_to_community() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 100)]))
        .unwrap();
    let val = MockStaking::validator(&ctx, &VAL_A).unwrap().unwrap();

    // nobody bonded uinit with this validator
    Distr::allocate_tokens_to_validator_pool(&ctx, &val, "uinit", &dec_coins(&[("ufra", "7")]))
        .unwrap();
    Distr::allocate_tokens_to_validator_pool(&ctx, &val, "ufra", &dec_coins(&[("ufra", "3")]))
        .unwrap();
    let period = Distr::increment_validator_period(&ctx, &val).unwrap();

    assert_eq!(
        Distr::fee_pool(&ctx).unwrap().community_pool,
        dec_coins(&[("ufra", "7")])
    );
    assert_eq!(
        Distr::outstanding_rewards(&ctx, &VAL_A).unwrap(),
        pools(&[("ufra", &[("ufra", "3")])])
    );
    let ratios = Distr::historical_rewards(&ctx, &VAL_A, period)
        .unwrap()
        .cumulative_reward_ratios;
    assert!(ratios.coins_of("uinit").is_empty());
    assert_eq!(ratios.coins_of("ufra"), dec_coins(&[("ufra", "0.03")]));
}

#[test]
fn reference_count_bounds() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &Coins::new())
        .unwrap();

    Distr::increment_reference_count(&ctx, &VAL_A, 0).unwrap();
    let e = Distr::increment_reference_count(&ctx, &VAL_A, 0).unwrap_err();
    assert!(is_invariant_violation(&*e));

    let zero = HistoricalRewards {
        cumulative_reward_ratios: DecPools::new(),
        reference_count: 0,
    };
    ValidatorHistoricalRewards::insert(&mut ctx.state.write(), &VAL_A, &7, &zero).unwrap();
    let e = Distr::decrement_reference_count(&ctx, &VAL_A, 7).unwrap_err();
    assert!(is_invariant_violation(&*e));

    // dropping the last reference deletes the record
    Distr::decrement_reference_count(&ctx, &VAL_A, 0).unwrap();
    Distr::decrement_reference_count(&ctx, &VAL_A, 0).unwrap();
    assert!(ValidatorHistoricalRewards::get(&ctx.state.read(), &VAL_A, &0)
        .unwrap()
        .is_none());
    let e = Distr::decrement_reference_count(&ctx, &VAL_A, 0).unwrap_err();
    assert!(is_invariant_violation(&*e));
}

#[test]
fn rewards_between_preconditions() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 10)]))
        .unwrap();
    let stakes = dec_coins(&[("ufra", "10")]);

    assert!(Distr::rewards_between(&ctx, &VAL_A, 1, 1, &stakes)
        .unwrap()
        .is_empty());

    let e = Distr::rewards_between(&ctx, &VAL_A, 2, 1, &stakes).unwrap_err();
    assert!(is_invariant_violation(&*e));

    let negative: DecCoins = vec![DecCoin::new("ufra", Dec::new(-1))].into();
    let e = Distr::rewards_between(&ctx, &VAL_A, 1, 1, &negative).unwrap_err();
    assert!(is_invariant_violation(&*e));
}

#[test]
fn slash_fraction_must_be_a_fraction() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 10)]))
        .unwrap();

    let e = staking
        .slash(&ctx, &VAL_A, &dec_coins(&[("ufra", "1.5")]))
        .unwrap_err();
    assert!(is_invariant_violation(&*e));

    staking
        .slash(&ctx, &VAL_A, &dec_coins(&[("ufra", "0.25")]))
        .unwrap();
    let events = Distr::slash_events_between(&ctx, &VAL_A, 0, 10).unwrap();
    assert_eq!(events.len(), 1);
    let ((height, period), event) = &events[0];
    assert_eq!((*height, *period), (1, 2));
    assert_eq!(event.validator_period, 2);
    // pinned by the chain and by the slash event
    assert_eq!(
        Distr::historical_rewards(&ctx, &VAL_A, 2)
            .unwrap()
            .reference_count,
        2
    );
}

#[test]
fn stake_drift_is_clamped_within_margin() {
    let (mut ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 100)]))
        .unwrap();
    next_block(&mut ctx);

    let val = MockStaking::validator(&ctx, &VAL_A).unwrap().unwrap();
    let del = MockStaking::delegation(&ctx, &VAL_A, &VAL_A).unwrap().unwrap();
    Distr::allocate_tokens_to_validator_pool(&ctx, &val, "ufra", &dec_coins(&[("ufra", "100")]))
        .unwrap();

    let mut info = Distr::starting_info(&ctx, &VAL_A, &VAL_A).unwrap();
    info.stakes = dec_coins(&[("ufra", "100.000000000000000003")]);
    DelegatorStartingInfo::insert(&mut ctx.state.write(), &VAL_A, &VAL_A, &info).unwrap();

    let cache = ctx.copy_with_state();
    let ending = Distr::increment_validator_period(&cache, &val).unwrap();
    let rewards = Distr::calculate_delegation_rewards(&cache, &val, &del, ending).unwrap();
    assert_eq!(rewards, pools(&[("ufra", &[("ufra", "100")])]));

    info.stakes = dec_coins(&[("ufra", "100.000000000000000004")]);
    DelegatorStartingInfo::insert(&mut ctx.state.write(), &VAL_A, &VAL_A, &info).unwrap();
    let ending = Distr::increment_validator_period(&ctx, &val).unwrap();
    let e = Distr::calculate_delegation_rewards(&ctx, &val, &del, ending).unwrap_err();
    assert!(is_invariant_violation(&*e));
}

#[test]
fn withdraw_is_capped_by_outstanding_rewards() {
    let (mut ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 100)]))
        .unwrap();
    next_block(&mut ctx);

    let val = MockStaking::validator(&ctx, &VAL_A).unwrap().unwrap();
    let del = MockStaking::delegation(&ctx, &VAL_A, &VAL_A).unwrap().unwrap();
    Distr::allocate_tokens_to_validator_pool(&ctx, &val, "ufra", &dec_coins(&[("ufra", "100")]))
        .unwrap();
    MockBank::add_balance(
        &ctx,
        &MockBank::module_address(MODULE_NAME),
        &coins(&[("ufra", 100)]),
    )
    .unwrap();

    // less is outstanding than the ratios promise
    let short = pools(&[("ufra", &[("ufra", "60.5")])]);
    ValidatorOutstandingRewards::insert(&mut ctx.state.write(), &VAL_A, &short).unwrap();

    let before = MockBank::balance(&ctx, &VAL_A);
    let paid = Distr::withdraw_delegation_rewards(&ctx, &val, &del).unwrap();
    assert_eq!(paid.sum(), coins(&[("ufra", 60)]));
    assert_eq!(
        MockBank::balance(&ctx, &VAL_A),
        before.add(&coins(&[("ufra", 60)]))
    );

    let outstanding = Distr::outstanding_rewards(&ctx, &VAL_A).unwrap();
    assert!(outstanding.is_empty());
    assert!(!outstanding.is_any_negative());
    assert_eq!(
        Distr::fee_pool(&ctx).unwrap().community_pool,
        dec_coins(&[("ufra", "0.5")])
    );
}

#[test]
fn no_rewards_in_the_starting_block() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 100)]))
        .unwrap();
    let val = MockStaking::validator(&ctx, &VAL_A).unwrap().unwrap();
    let del = MockStaking::delegation(&ctx, &VAL_A, &VAL_A).unwrap().unwrap();
    Distr::allocate_tokens_to_validator_pool(&ctx, &val, "ufra", &dec_coins(&[("ufra", "100")]))
        .unwrap();

    let ending = Distr::increment_validator_period(&ctx, &val).unwrap();
    assert!(Distr::calculate_delegation_rewards(&ctx, &val, &del, ending)
        .unwrap()
        .is_empty());
}

#[test]
fn withdraw_without_starting_info_is_a_user_error() {
    let (ctx, staking) = setup();
    staking
        .create_validator(&ctx, &VAL_A, Dec::zero(), &coins(&[("ufra", 100)]))
        .unwrap();
    let val = MockStaking::validator(&ctx, &VAL_A).unwrap().unwrap();
    let mut del = MockStaking::delegation(&ctx, &VAL_A, &VAL_A).unwrap().unwrap();
    del.delegator = *BOB;

    let period = Distr::current_rewards(&ctx, &VAL_A).unwrap().period;
    let e = Distr::withdraw_delegation_rewards(&ctx, &val, &del).unwrap_err();
    assert!(DistrError::NoDelegationDistInfo.is_cause_of(&*e));
    assert!(!is_invariant_violation(&*e));
    assert_eq!(Distr::current_rewards(&ctx, &VAL_A).unwrap().period, period);
}

#[test]
fn starting_info_round_trips_through_storage() {
    let (ctx, _) = setup();
    let info = StartingInfo {
        previous_period: 4,
        stakes: dec_coins(&[("ufra", "1.5"), ("uinit", "2")]),
        height: 9,
    };
    DelegatorStartingInfo::insert(&mut ctx.state.write(), &VAL_B, &ALICE, &info).unwrap();
    assert_eq!(Distr::starting_info(&ctx, &VAL_B, &ALICE).unwrap(), info);
    let all = DelegatorStartingInfo::iterate_prefix(&ctx.state.read(), &VAL_B).unwrap();
    assert_eq!(all, vec![(*ALICE, info)]);
}
