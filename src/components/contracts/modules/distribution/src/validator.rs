use crate::storage::*;
use crate::types::{CurrentRewards, FeePool, HistoricalRewards, SlashEvent};
use crate::{App, Config, DistrError};
use fp_core::{context::Context, ensure_invariant};
use fp_types::{
    coin::DecCoins, crypto::Address, math::Dec, pool::DecPools, staking::ValidatorInfo,
};
use ruc::*;
use tracing::debug;

impl<C: Config> App<C> {
    pub fn fee_pool(ctx: &Context) -> Result<FeePool> {
        FeePoolStore::get_or_default(&ctx.state.read())
    }

    pub(crate) fn set_fee_pool(ctx: &Context, pool: &FeePool) -> Result<()> {
        FeePoolStore::put(&mut ctx.state.write(), pool)
    }

    /// Adds `coins` to the community pool.
    pub(crate) fn fund_community(ctx: &Context, coins: &DecCoins) -> Result<()> {
        if coins.is_empty() {
            return Ok(());
        }
        let mut pool = Self::fee_pool(ctx)?;
        pool.community_pool = pool.community_pool.add(coins);
        Self::set_fee_pool(ctx, &pool)
    }

    pub fn outstanding_rewards(ctx: &Context, val: &Address) -> Result<DecPools> {
        ValidatorOutstandingRewards::get(&ctx.state.read(), val)
            .map(|r| r.unwrap_or_default())
    }

    pub(crate) fn set_outstanding_rewards(
        ctx: &Context,
        val: &Address,
        rewards: &DecPools,
    ) -> Result<()> {
        ValidatorOutstandingRewards::insert(&mut ctx.state.write(), val, rewards)
    }

    pub fn accumulated_commission(ctx: &Context, val: &Address) -> Result<DecPools> {
        ValidatorAccumulatedCommission::get(&ctx.state.read(), val)
            .map(|c| c.unwrap_or_default())
    }

    pub(crate) fn set_accumulated_commission(
        ctx: &Context,
        val: &Address,
        commission: &DecPools,
    ) -> Result<()> {
        ValidatorAccumulatedCommission::insert(&mut ctx.state.write(), val, commission)
    }

    pub fn current_rewards(ctx: &Context, val: &Address) -> Result<CurrentRewards> {
        ValidatorCurrentRewards::get(&ctx.state.read(), val)?
            .c(d!(DistrError::NoValidatorDistInfo))
    }

    /// The snapshot closing `period`, its absence means the period chain is broken.
    pub fn historical_rewards(
        ctx: &Context,
        val: &Address,
        period: u64,
    ) -> Result<HistoricalRewards> {
        match ValidatorHistoricalRewards::get(&ctx.state.read(), val, &period)? {
            Some(h) => Ok(h),
            None => fp_core::invariant!(
                "historical rewards of {} for period {} not found",
                val,
                period
            ),
        }
    }

    /// Opens period 1 of a new validator on top of an empty period 0.
    pub fn initialize_validator(ctx: &Context, val: &Address) -> Result<()> {
        let genesis = HistoricalRewards {
            cumulative_reward_ratios: DecPools::new(),
            reference_count: 1,
        };
        let current = CurrentRewards {
            rewards: DecPools::new(),
            period: 1,
        };

        let mut state = ctx.state.write();
        ValidatorHistoricalRewards::insert(&mut state, val, &0, &genesis)?;
        ValidatorCurrentRewards::insert(&mut state, val, &current)?;
        ValidatorAccumulatedCommission::insert(&mut state, val, &DecPools::new())?;
        ValidatorOutstandingRewards::insert(&mut state, val, &DecPools::new())
    }

    /// Closes the current period of `val` and returns its number.
    ///
    /// Rewards of a pool whose denom the validator holds no tokens of can not become a
    /// ratio, they go to the community pool instead.
    pub fn increment_validator_period(ctx: &Context, val: &ValidatorInfo) -> Result<u64> {
        let addr = &val.operator;
        let current = Self::current_rewards(ctx, addr)?;
        ensure_invariant!(current.period > 0, "current period of {} is 0", addr);

        let mut ratio = DecPools::new();
        let mut to_community = DecPools::new();
        for (denom, rewards) in current.rewards.iter() {
            let tokens = val.tokens.amount_of(denom);
            if tokens.is_zero() {
                to_community.add_pool(denom, rewards);
            } else {
                let increment = rewards.quo_dec_truncate(&Dec::from_int(&tokens)).c(d!())?;
                ratio.add_pool(denom, &increment);
            }
        }

        if !to_community.is_empty() {
            let outstanding = Self::outstanding_rewards(ctx, addr)?
                .sub(&to_community)
                .c(d!())?;
            Self::set_outstanding_rewards(ctx, addr, &outstanding)?;
            Self::fund_community(ctx, &to_community.sum())?;
        }

        let previous = Self::historical_rewards(ctx, addr, current.period - 1)?;
        let closed = HistoricalRewards {
            cumulative_reward_ratios: previous.cumulative_reward_ratios.add(&ratio),
            reference_count: 1,
        };
        ValidatorHistoricalRewards::insert(
            &mut ctx.state.write(),
            addr,
            &current.period,
            &closed,
        )?;
        Self::decrement_reference_count(ctx, addr, current.period - 1)?;

        let next = CurrentRewards {
            rewards: DecPools::new(),
            period: current.period + 1,
        };
        ValidatorCurrentRewards::insert(&mut ctx.state.write(), addr, &next)?;

        debug!(target: "distribution", "validator {} closed period {}", addr, current.period);
        Ok(current.period)
    }

    pub(crate) fn increment_reference_count(
        ctx: &Context,
        val: &Address,
        period: u64,
    ) -> Result<()> {
        let mut historical = Self::historical_rewards(ctx, val, period)?;
        ensure_invariant!(
            historical.reference_count < 2,
            "reference count of {} period {} would exceed 2",
            val,
            period
        );
        historical.reference_count += 1;
        ValidatorHistoricalRewards::insert(&mut ctx.state.write(), val, &period, &historical)
    }

    /// Deletes the snapshot once nothing references it.
    pub(crate) fn decrement_reference_count(
        ctx: &Context,
        val: &Address,
        period: u64,
    ) -> Result<()> {
        let mut historical = Self::historical_rewards(ctx, val, period)?;
        ensure_invariant!(
            historical.reference_count > 0,
            "reference count of {} period {} would go below 0",
            val,
            period
        );
        historical.reference_count -= 1;

        let mut state = ctx.state.write();
        if historical.reference_count == 0 {
            ValidatorHistoricalRewards::remove(&mut state, val, &period)
        } else {
            ValidatorHistoricalRewards::insert(&mut state, val, &period, &historical)
        }
    }

    /// Closes the period and pins it, the slash event keeps a reference to it.
    pub fn update_validator_slash_fraction(
        ctx: &Context,
        val: &ValidatorInfo,
        fractions: &DecCoins,
    ) -> Result<()> {
        for (denom, fraction) in fractions.iter() {
            ensure_invariant!(
                !fraction.is_negative() && fraction <= &Dec::one(),
                "slash fraction of {} must be within [0, 1]: {}",
                denom,
                fraction
            );
        }

        let period = Self::increment_validator_period(ctx, val)?;
        Self::increment_reference_count(ctx, &val.operator, period)?;

        let height = ctx.block_height();
        let event = SlashEvent {
            validator_period: period,
            fractions: fractions.clone(),
        };
        ValidatorSlashEvents::insert(
            &mut ctx.state.write(),
            &val.operator,
            &(height, period),
            &event,
        )
    }

    /// Slash events of `val` recorded at heights within `[start, end]`, ascending by
    /// height then period.
    pub fn slash_events_between(
        ctx: &Context,
        val: &Address,
        start: u64,
        end: u64,
    ) -> Result<Vec<((u64, u64), SlashEvent)>> {
        let events = ValidatorSlashEvents::iterate_prefix(&ctx.state.read(), val)?;
        Ok(events
            .into_iter()
            .filter(|((height, _), _)| *height >= start && *height <= end)
            .collect())
    }

    /// Drops every record of a removed validator.
    pub(crate) fn delete_validator_records(ctx: &Context, val: &Address) -> Result<()> {
        let mut state = ctx.state.write();
        ValidatorOutstandingRewards::remove(&mut state, val)?;
        ValidatorAccumulatedCommission::remove(&mut state, val)?;
        ValidatorCurrentRewards::remove(&mut state, val)?;
        ValidatorHistoricalRewards::remove_prefix(&mut state, val)?;
        ValidatorSlashEvents::remove_prefix(&mut state, val)
    }
}
