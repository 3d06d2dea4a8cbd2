use crate::storage::*;
use crate::types::validate_params;
use crate::{events, App, Config, DistrError, MODULE_NAME};
use fp_core::{context::Context, ensure, macros::Get};
use fp_events::Event;
use fp_traits::{bank::BankKeeper, staking::StakingKeeper};
use fp_types::{
    actions::distribution::Params,
    coin::Coins,
    crypto::Address,
    pool::Pools,
};
use ruc::*;
use tracing::debug;

impl<C: Config> App<C> {
    pub fn params(ctx: &Context) -> Result<Params> {
        match ParamsStore::get(&ctx.state.read())? {
            Some(params) => Ok(params),
            None => Ok(C::DefaultParams::get()),
        }
    }

    pub(crate) fn set_params(ctx: &Context, params: &Params) -> Result<()> {
        ParamsStore::put(&mut ctx.state.write(), params)
    }

    /// Governance only.
    pub fn update_params(ctx: &Context, sender: &Address, params: Params) -> Result<()> {
        ensure!(sender == &C::Authority::get(), DistrError::Unauthorized);
        validate_params(&params)?;
        Self::set_params(ctx, &params)
    }

    pub fn set_withdraw_address(
        ctx: &Context,
        del: &Address,
        withdraw_addr: &Address,
    ) -> Result<()> {
        ensure!(
            Self::params(ctx)?.withdraw_addr_enabled,
            DistrError::SetWithdrawAddrDisabled
        );
        ensure!(
            !C::Bank::blocked_addr(ctx, withdraw_addr),
            DistrError::BlockedWithdrawAddress
        );

        DelegatorWithdrawInfo::insert(&mut ctx.state.write(), del, withdraw_addr)?;
        ctx.emit_event(events::SetWithdrawAddress::emit_serde_event(
            MODULE_NAME.to_string(),
            events::SetWithdrawAddress {
                delegator: *del,
                withdraw_address: *withdraw_addr,
            },
        ));
        Ok(())
    }

    /// Pays the rewards of the delegation and restarts it from the current period.
    pub fn withdraw_delegator_reward(
        ctx: &Context,
        del: &Address,
        val: &Address,
    ) -> Result<Coins> {
        let validator =
            C::Staking::validator(ctx, val)?.c(d!(DistrError::NoValidatorDistInfo))?;
        let delegation =
            C::Staking::delegation(ctx, del, val)?.c(d!(DistrError::NoDelegationDistInfo))?;

        let paid = Self::withdraw_delegation_rewards(ctx, &validator, &delegation)?;
        Self::initialize_delegation(ctx, val, del)?;
        Ok(paid.sum())
    }

    /// Pays the integral part of the commission, the decimal change stays in place.
    pub fn withdraw_validator_commission(ctx: &Context, val: &Address) -> Result<Pools> {
        let commission = Self::accumulated_commission(ctx, val)?;
        ensure!(!commission.is_empty(), DistrError::NoValidatorCommission);

        let (pools, remainder) = commission.truncate_decimal();
        Self::set_accumulated_commission(ctx, val, &remainder)?;

        let outstanding = Self::outstanding_rewards(ctx, val)?
            .sub(&pools.to_dec_pools())
            .c(d!())?;
        Self::set_outstanding_rewards(ctx, val, &outstanding)?;

        let coins = pools.sum();
        if !coins.is_empty() {
            let withdraw_addr = Self::withdraw_address(ctx, val)?;
            C::Bank::send_coins_from_module_to_account(ctx, MODULE_NAME, &withdraw_addr, &coins)
                .c(d!())?;
        }

        debug!(target: "distribution", "{} withdrew commission {}", val, coins);
        ctx.emit_event(events::WithdrawCommission::emit_serde_event(
            MODULE_NAME.to_string(),
            events::WithdrawCommission {
                validator: *val,
                amount: coins,
            },
        ));
        Ok(pools)
    }

    pub fn fund_community_pool(ctx: &Context, depositor: &Address, amount: &Coins) -> Result<()> {
        ensure!(!amount.is_empty(), DistrError::EmptyAmount);
        C::Bank::send_coins_from_account_to_module(ctx, depositor, MODULE_NAME, amount)
            .c(d!())?;
        Self::fund_community(ctx, &amount.to_dec_coins())?;

        ctx.emit_event(events::FundCommunityPool::emit_serde_event(
            MODULE_NAME.to_string(),
            events::FundCommunityPool {
                depositor: *depositor,
                amount: amount.clone(),
            },
        ));
        Ok(())
    }

    /// Governance only.
    pub fn community_pool_spend(
        ctx: &Context,
        sender: &Address,
        recipient: &Address,
        amount: &Coins,
    ) -> Result<()> {
        ensure!(sender == &C::Authority::get(), DistrError::Unauthorized);
        ensure!(!amount.is_empty(), DistrError::EmptyAmount);
        ensure!(
            !C::Bank::blocked_addr(ctx, recipient),
            DistrError::BlockedRecipient
        );

        let mut fee_pool = Self::fee_pool(ctx)?;
        let (rest, negative) = fee_pool.community_pool.safe_sub(&amount.to_dec_coins());
        ensure!(!negative, DistrError::InsufficientCommunityPool);

        fee_pool.community_pool = rest;
        Self::set_fee_pool(ctx, &fee_pool)?;
        C::Bank::send_coins_from_module_to_account(ctx, MODULE_NAME, recipient, amount)
            .c(d!())?;

        ctx.emit_event(events::CommunityPoolSpend::emit_serde_event(
            MODULE_NAME.to_string(),
            events::CommunityPoolSpend {
                recipient: *recipient,
                amount: amount.clone(),
            },
        ));
        Ok(())
    }
}
