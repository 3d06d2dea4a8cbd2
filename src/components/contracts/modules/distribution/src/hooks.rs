use crate::{App, Config, DistrError, MODULE_NAME};
use fp_core::context::Context;
use fp_traits::{
    bank::BankKeeper,
    staking::{StakingHooks, StakingKeeper},
};
use fp_types::{coin::DecCoins, crypto::Address, staking::ValidatorInfo};
use ruc::*;
use std::marker::PhantomData;
use tracing::debug;

/// Staking lifecycle callbacks driving the reward accounting.
///
/// Register it with the staking module, every callback runs inside the session of
/// the change that triggered it.
pub struct Hooks<C> {
    phantom: PhantomData<C>,
}

impl<C: Config> Default for Hooks<C> {
    fn default() -> Self {
        Hooks {
            phantom: Default::default(),
        }
    }
}

fn validator_of<C: Config>(ctx: &Context, val: &Address) -> Result<ValidatorInfo> {
    C::Staking::validator(ctx, val)?.c(d!(DistrError::NoValidatorDistInfo))
}

impl<C: Config> StakingHooks for Hooks<C> {
    fn after_validator_created(&self, ctx: &Context, val: &Address) -> Result<()> {
        App::<C>::initialize_validator(ctx, val)
    }

    fn before_delegation_created(
        &self,
        ctx: &Context,
        _del: &Address,
        val: &Address,
    ) -> Result<()> {
        let validator = validator_of::<C>(ctx, val)?;
        App::<C>::increment_validator_period(ctx, &validator).map(|_| ())
    }

    fn before_delegation_shares_modified(
        &self,
        ctx: &Context,
        del: &Address,
        val: &Address,
    ) -> Result<()> {
        let validator = validator_of::<C>(ctx, val)?;
        let delegation =
            C::Staking::delegation(ctx, del, val)?.c(d!(DistrError::NoDelegationDistInfo))?;
        App::<C>::withdraw_delegation_rewards(ctx, &validator, &delegation).map(|_| ())
    }

    fn after_delegation_modified(
        &self,
        ctx: &Context,
        del: &Address,
        val: &Address,
    ) -> Result<()> {
        App::<C>::initialize_delegation(ctx, val, del)
    }

    fn before_validator_slashed(
        &self,
        ctx: &Context,
        val: &Address,
        fractions: &DecCoins,
    ) -> Result<()> {
        let validator = validator_of::<C>(ctx, val)?;
        App::<C>::update_validator_slash_fraction(ctx, &validator, fractions)
    }

    /// Pays the remaining commission and sends every other outstanding reward to the
    /// community pool. The validator has no delegations left at this point.
    fn after_validator_removed(&self, ctx: &Context, val: &Address) -> Result<()> {
        let outstanding = App::<C>::outstanding_rewards(ctx, val)?;
        let commission = App::<C>::accumulated_commission(ctx, val)?;

        if !commission.is_empty() {
            let (pools, remainder) = commission.truncate_decimal();
            let coins = pools.sum();
            if !coins.is_empty() {
                let withdraw_addr = App::<C>::withdraw_address(ctx, val)?;
                C::Bank::send_coins_from_module_to_account(
                    ctx,
                    MODULE_NAME,
                    &withdraw_addr,
                    &coins,
                )
                .c(d!())?;
            }
            App::<C>::fund_community(ctx, &remainder.sum())?;
        }

        let leftover = outstanding.sub(&commission).c(d!())?;
        App::<C>::fund_community(ctx, &leftover.sum())?;
        App::<C>::delete_validator_records(ctx, val)?;

        debug!(target: "distribution", "validator {} removed, {} swept", val, leftover);
        Ok(())
    }
}
