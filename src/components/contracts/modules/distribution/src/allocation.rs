use crate::{events, App, Config, MODULE_NAME};
use fp_core::{context::Context, macros::Get};
use fp_events::Event;
use fp_traits::{bank::BankKeeper, dex::DexKeeper, staking::StakingKeeper};
use fp_types::{
    coin::{Coin, DecCoins},
    math::{Dec, Int},
    staking::{ValidatorInfo, VoteInfo},
};
use ruc::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

impl<C: Config> App<C> {
    /// Distributes the fees collected during the previous block.
    ///
    /// `total_previous_power` and `votes` describe the validator set that signed the
    /// previous block. Nothing is paid when the total power is 0, the whole amount
    /// goes to the community pool.
    pub fn allocate_tokens(
        ctx: &Context,
        total_previous_power: u64,
        votes: &[VoteInfo],
    ) -> Result<()> {
        let fees = Self::collect_fees(ctx).c(d!())?;
        if fees.is_empty() {
            return Ok(());
        }

        if total_previous_power == 0 {
            debug!(target: "distribution", "no voting power, {} sent to the community pool", fees);
            return Self::fund_community(ctx, &fees);
        }

        let params = Self::params(ctx)?;
        let vote_multiplier = &Dec::one() - &params.community_tax;
        let total_weight = params
            .reward_weights
            .iter()
            .fold(Dec::zero(), |acc, w| &acc + &w.weight);

        // pool denom => validators holding tokens of it, in vote order
        let mut holders: BTreeMap<String, Vec<(ValidatorInfo, Int)>> = BTreeMap::new();
        let mut pool_tokens: BTreeMap<String, Int> = BTreeMap::new();
        for vote in votes.iter() {
            let val = match C::Staking::validator(ctx, &vote.validator)? {
                Some(v) => v,
                None => {
                    warn!(target: "distribution", "vote of unknown validator {}", vote.validator);
                    continue;
                }
            };
            for (denom, tokens) in val.tokens.iter() {
                let sum = pool_tokens.entry(denom.clone()).or_insert_with(Int::zero);
                *sum = &*sum + tokens;
                holders
                    .entry(denom.clone())
                    .or_default()
                    .push((val.clone(), tokens.clone()));
            }
        }

        let mut remaining = fees.clone();
        for w in params.reward_weights.iter() {
            let (validators, sum) = match (holders.get(&w.denom), pool_tokens.get(&w.denom)) {
                (Some(v), Some(s)) if s.is_positive() => (v, Dec::from_int(s)),
                _ => continue,
            };
            let pool_fraction = w.weight.quo_truncate(&total_weight).c(d!())?;
            let pool_reward = fees
                .mul_dec_truncate(&vote_multiplier)
                .mul_dec_truncate(&pool_fraction);

            for (val, tokens) in validators.iter() {
                let fraction = Dec::from_int(tokens).quo_truncate(&sum).c(d!())?;
                let reward = pool_reward.mul_dec_truncate(&fraction);
                Self::allocate_tokens_to_validator_pool(ctx, val, &w.denom, &reward)?;
                remaining = remaining.sub(&reward).c(d!())?;
            }
        }

        debug!(
            target: "distribution",
            "allocated {} at height {}, {} left to the community pool",
            fees,
            ctx.block_height(),
            remaining
        );
        Self::fund_community(ctx, &remaining)
    }

    /// Splits `reward` into commission and delegator rewards of `pool`.
    pub fn allocate_tokens_to_validator_pool(
        ctx: &Context,
        val: &ValidatorInfo,
        pool: &str,
        reward: &DecCoins,
    ) -> Result<()> {
        if reward.is_empty() {
            return Ok(());
        }
        let addr = &val.operator;
        let commission = reward.mul_dec(&val.commission_rate);
        let shared = reward.sub(&commission).c(d!())?;

        let mut accumulated = Self::accumulated_commission(ctx, addr)?;
        accumulated.add_pool(pool, &commission);
        Self::set_accumulated_commission(ctx, addr, &accumulated)?;

        let mut current = Self::current_rewards(ctx, addr)?;
        current.rewards.add_pool(pool, &shared);
        crate::storage::ValidatorCurrentRewards::insert(&mut ctx.state.write(), addr, &current)?;

        let mut outstanding = Self::outstanding_rewards(ctx, addr)?;
        outstanding.add_pool(pool, reward);
        Self::set_outstanding_rewards(ctx, addr, &outstanding)?;

        ctx.emit_event(events::Commission::emit_serde_event(
            MODULE_NAME.to_string(),
            events::Commission {
                validator: *addr,
                pool: pool.to_owned(),
                amount: commission,
            },
        ));
        ctx.emit_event(events::Rewards::emit_serde_event(
            MODULE_NAME.to_string(),
            events::Rewards {
                validator: *addr,
                pool: pool.to_owned(),
                amount: reward.clone(),
            },
        ));
        Ok(())
    }

    /// Swaps the non base fees into the base denom and moves the whole fee collector
    /// balance into the module account.
    fn collect_fees(ctx: &Context) -> Result<DecCoins> {
        let fee_collector = C::FeeCollector::get();
        let base_denom = C::BaseDenom::get();
        let collector = C::Bank::module_address(&fee_collector);

        let balances = C::Bank::get_all_balances(ctx, &collector)?;
        for (denom, amount) in balances.iter() {
            if denom == &base_denom {
                continue;
            }
            let coin = Coin::new(denom.clone(), amount.clone());
            C::Dex::swap_to_base(ctx, &collector, &coin, &base_denom).c(d!())?;
        }

        let collected = C::Bank::get_all_balances(ctx, &collector)?;
        if !collected.is_empty() {
            C::Bank::send_coins_from_module_to_module(
                ctx,
                &fee_collector,
                MODULE_NAME,
                &collected,
            )
            .c(d!())?;
        }
        Ok(collected.to_dec_coins())
    }
}
