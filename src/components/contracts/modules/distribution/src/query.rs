use crate::types::{
    DelegationDelegatorReward, DelegationTotalRewards, ValidatorDistributionInfo,
};
use crate::{App, Config, DistrError};
use fp_core::context::Context;
use fp_traits::staking::StakingKeeper;
use fp_types::{crypto::Address, pool::DecPools};
use ruc::*;
use serde::Serialize;

fn parse_address(s: &str) -> Result<Address> {
    s.parse::<Address>().c(d!(format!("invalid address '{}'", s)))
}

fn parse_height(s: &str) -> Result<u64> {
    s.parse::<u64>().c(d!(format!("invalid height '{}'", s)))
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).c(d!())
}

impl<C: Config> App<C> {
    /// Serves `query_route`, every argument is a path segment.
    pub(crate) fn query(ctx: &Context, path: &[&str]) -> Result<Vec<u8>> {
        match path {
            ["params"] => to_json(&Self::params(ctx)?),
            ["community_pool"] => to_json(&Self::fee_pool(ctx)?.community_pool),
            ["validator_outstanding_rewards", val] => {
                to_json(&Self::outstanding_rewards(ctx, &parse_address(val)?)?)
            }
            ["validator_commission", val] => {
                to_json(&Self::accumulated_commission(ctx, &parse_address(val)?)?)
            }
            ["validator_slashes", val, start, end] => {
                let (start, end) = (parse_height(start)?, parse_height(end)?);
                if start > end {
                    return Err(eg!("starting height is after ending height"));
                }
                let events = Self::slash_events_between(ctx, &parse_address(val)?, start, end)?;
                to_json(&events.into_iter().map(|(_, e)| e).collect::<Vec<_>>())
            }
            ["validator_distribution_info", val] => {
                to_json(&Self::validator_distribution_info(ctx, &parse_address(val)?)?)
            }
            ["delegation_rewards", del, val] => to_json(&Self::delegation_rewards(
                ctx,
                &parse_address(del)?,
                &parse_address(val)?,
            )?),
            ["delegation_total_rewards", del] => {
                to_json(&Self::delegation_total_rewards(ctx, &parse_address(del)?)?)
            }
            ["delegator_validators", del] => {
                let dels = C::Staking::delegator_delegations(ctx, &parse_address(del)?)?;
                to_json(&dels.into_iter().map(|d| d.validator).collect::<Vec<_>>())
            }
            ["delegator_withdraw_address", del] => {
                to_json(&Self::withdraw_address(ctx, &parse_address(del)?)?)
            }
            _ => Err(eg!(format!("unknown query path '{}'", path.join("/")))),
        }
    }

    /// Rewards `del` would receive withdrawing now, computed on a copy of the state.
    pub fn delegation_rewards(ctx: &Context, del: &Address, val: &Address) -> Result<DecPools> {
        let cache = ctx.copy_with_state();
        Self::pending_rewards(&cache, del, val)
    }

    pub fn delegation_total_rewards(
        ctx: &Context,
        del: &Address,
    ) -> Result<DelegationTotalRewards> {
        let cache = ctx.copy_with_state();
        let mut res = DelegationTotalRewards::default();
        for delegation in C::Staking::delegator_delegations(&cache, del)?.iter() {
            let reward = Self::pending_rewards(&cache, del, &delegation.validator)?;
            res.total = res.total.add(&reward);
            res.rewards.push(DelegationDelegatorReward {
                validator: delegation.validator,
                reward,
            });
        }
        Ok(res)
    }

    pub fn validator_distribution_info(
        ctx: &Context,
        val: &Address,
    ) -> Result<ValidatorDistributionInfo> {
        let cache = ctx.copy_with_state();
        let self_bond_rewards = match C::Staking::delegation(&cache, val, val)? {
            Some(_) => Self::pending_rewards(&cache, val, val)?,
            None => DecPools::new(),
        };
        Ok(ValidatorDistributionInfo {
            operator_address: *val,
            self_bond_rewards,
            commission: Self::accumulated_commission(&cache, val)?,
        })
    }

    /// Closes the period on `cache` so rewards of the open period are included.
    fn pending_rewards(cache: &Context, del: &Address, val: &Address) -> Result<DecPools> {
        let validator =
            C::Staking::validator(cache, val)?.c(d!(DistrError::NoValidatorDistInfo))?;
        let delegation = C::Staking::delegation(cache, del, val)?
            .c(d!(DistrError::NoDelegationDistInfo))?;
        let ending_period = Self::increment_validator_period(cache, &validator)?;
        Self::calculate_delegation_rewards(cache, &validator, &delegation, ending_period)
    }
}
