use crate::storage::*;
use crate::types::StartingInfo;
use crate::{events, App, Config, DistrError, MODULE_NAME};
use fp_core::{context::Context, ensure_invariant, invariant, macros::Get};
use fp_events::Event;
use fp_traits::{bank::BankKeeper, staking::StakingKeeper};
use fp_types::{
    coin::DecCoins,
    crypto::Address,
    math::{Dec, PRECISION},
    pool::{DecPools, Pools},
    staking::{DelegationInfo, ValidatorInfo},
};
use ruc::*;
use tracing::{debug, warn};

impl<C: Config> App<C> {
    pub fn starting_info(ctx: &Context, val: &Address, del: &Address) -> Result<StartingInfo> {
        DelegatorStartingInfo::get(&ctx.state.read(), val, del)?
            .c(d!(DistrError::NoDelegationDistInfo))
    }

    /// Where the rewards of `del` are paid to.
    pub fn withdraw_address(ctx: &Context, del: &Address) -> Result<Address> {
        DelegatorWithdrawInfo::get(&ctx.state.read(), del).map(|a| a.unwrap_or(*del))
    }

    /// Records the period and stake a delegation starts accruing from, the period
    /// just closed by the staking hook.
    pub fn initialize_delegation(ctx: &Context, val: &Address, del: &Address) -> Result<()> {
        let previous_period = Self::current_rewards(ctx, val)?.period - 1;
        let validator =
            C::Staking::validator(ctx, val)?.c(d!(DistrError::NoValidatorDistInfo))?;
        let delegation =
            C::Staking::delegation(ctx, del, val)?.c(d!(DistrError::NoDelegationDistInfo))?;

        Self::increment_reference_count(ctx, val, previous_period)?;

        let info = StartingInfo {
            previous_period,
            stakes: validator.tokens_from_shares_truncated(&delegation.shares),
            height: ctx.block_height(),
        };
        DelegatorStartingInfo::insert(&mut ctx.state.write(), val, del, &info)
    }

    /// Rewards of `stakes` between two closed periods of `val`.
    pub(crate) fn rewards_between(
        ctx: &Context,
        val: &Address,
        starting_period: u64,
        ending_period: u64,
        stakes: &DecCoins,
    ) -> Result<DecPools> {
        ensure_invariant!(
            starting_period <= ending_period,
            "starting period {} is after ending period {}",
            starting_period,
            ending_period
        );
        ensure_invariant!(!stakes.is_any_negative(), "negative stake: {}", stakes);

        let starting = Self::historical_rewards(ctx, val, starting_period)?;
        let ending = Self::historical_rewards(ctx, val, ending_period)?;
        let difference = ending
            .cumulative_reward_ratios
            .sub(&starting.cumulative_reward_ratios)
            .c(d!())?;

        let mut rewards = DecPools::new();
        for (denom, ratio) in difference.iter() {
            rewards.add_pool(denom, &ratio.mul_dec_truncate(&stakes.amount_of(denom)));
        }
        Ok(rewards)
    }

    /// Rewards owed to `del` up to `ending_period`, slashes in between included.
    pub fn calculate_delegation_rewards(
        ctx: &Context,
        val: &ValidatorInfo,
        del: &DelegationInfo,
        ending_period: u64,
    ) -> Result<DecPools> {
        let addr = &val.operator;
        let info = Self::starting_info(ctx, addr, &del.delegator)?;
        if info.height == ctx.block_height() {
            return Ok(DecPools::new());
        }

        let mut starting_period = info.previous_period;
        let mut stakes = info.stakes;
        let mut rewards = DecPools::new();

        let slashes = Self::slash_events_between(ctx, addr, info.height, ctx.block_height())?;
        for (_, event) in slashes {
            if event.validator_period > starting_period {
                rewards = rewards.add(&Self::rewards_between(
                    ctx,
                    addr,
                    starting_period,
                    event.validator_period,
                    &stakes,
                )?);

                let mut slashed = DecCoins::new();
                for (denom, stake) in stakes.iter() {
                    let kept = &Dec::one() - &event.fractions.amount_of(denom);
                    slashed.add_coin(denom, &stake.mul_truncate(&kept));
                }
                stakes = slashed;
                starting_period = event.validator_period;
            }
        }

        // the stake is tracked incrementally and may drift from the one derived
        // from shares by a few units of rounding
        let current_stakes = val.tokens_from_shares(&del.shares);
        let margin = Dec::with_prec(C::StakeDriftMarginUlps::get() as i64, PRECISION);
        let mut reconciled = DecCoins::new();
        for (denom, stake) in stakes.iter() {
            let current = current_stakes.amount_of(denom);
            if stake <= &current {
                reconciled.add_coin(denom, stake);
            } else if stake <= &(&current + &margin) {
                reconciled.add_coin(denom, &current);
            } else {
                invariant!(
                    "calculated final stake of delegator {} for {} is greater than current stake: {} > {}",
                    del.delegator,
                    denom,
                    stake,
                    current
                );
            }
        }

        rewards = rewards.add(&Self::rewards_between(
            ctx,
            addr,
            starting_period,
            ending_period,
            &reconciled,
        )?);
        Ok(rewards)
    }

    /// Pays the rewards of `del` and drops its starting info.
    ///
    /// The caller opens a new starting info afterwards, unless the delegation is
    /// being removed.
    pub fn withdraw_delegation_rewards(
        ctx: &Context,
        val: &ValidatorInfo,
        del: &DelegationInfo,
    ) -> Result<Pools> {
        let addr = &val.operator;
        let starting = Self::starting_info(ctx, addr, &del.delegator)?;

        let ending_period = Self::increment_validator_period(ctx, val)?;
        let raw = Self::calculate_delegation_rewards(ctx, val, del, ending_period)?;
        let mut outstanding = Self::outstanding_rewards(ctx, addr)?;

        let rewards = raw.intersect(&outstanding);
        if rewards != raw {
            warn!(
                target: "distribution",
                "rounding error withdrawing rewards of {} from {}: got {}, outstanding {}",
                del.delegator, addr, raw, outstanding
            );
        }

        let (pools, remainder) = rewards.truncate_decimal();
        let coins = pools.sum();
        if !coins.is_empty() {
            let withdraw_addr = Self::withdraw_address(ctx, &del.delegator)?;
            C::Bank::send_coins_from_module_to_account(ctx, MODULE_NAME, &withdraw_addr, &coins)
                .c(d!())?;
        }

        outstanding = outstanding.sub(&rewards).c(d!())?;
        Self::set_outstanding_rewards(ctx, addr, &outstanding)?;
        Self::fund_community(ctx, &remainder.sum())?;

        Self::decrement_reference_count(ctx, addr, starting.previous_period)?;
        DelegatorStartingInfo::remove(&mut ctx.state.write(), addr, &del.delegator)?;

        debug!(
            target: "distribution",
            "{} withdrew {} from {}, {} to the community pool",
            del.delegator, coins, addr, remainder.sum()
        );
        ctx.emit_event(events::WithdrawRewards::emit_serde_event(
            MODULE_NAME.to_string(),
            events::WithdrawRewards {
                delegator: del.delegator,
                validator: *addr,
                amount: coins,
            },
        ));
        Ok(pools)
    }
}
