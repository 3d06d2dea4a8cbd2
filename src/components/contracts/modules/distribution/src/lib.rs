#![deny(warnings)]
#![allow(missing_docs)]

//! Multi-pool F1 fee distribution.
//!
//! Rewards are tracked per validator as a cumulative reward-per-token ratio for each
//! reward pool. A delegation only remembers the period and stake it last settled at,
//! so neither allocation nor withdrawal ever walks the delegator set.

mod allocation;
mod basic;
mod delegation;
pub mod error;
pub mod events;
pub mod genesis;
mod hooks;
pub mod invariants;
mod keeper;
mod query;
pub mod types;
mod validator;

#[cfg(test)]
mod tests;

pub use crate::error::DistrError;
pub use crate::hooks::Hooks;
pub use crate::storage::*;

use config::distribution::global_cfg::CFG;
use fp_core::{
    context::Context,
    ensure,
    macros::Get,
    module::{AppModule, RequestBeginBlock, RequestEndBlock, RequestQuery, ResponseQuery},
    parameter_types,
    transaction::{ActionResult, Executable},
};
use fp_traits::{bank::BankKeeper, dex::DexKeeper, staking::StakingKeeper};
use fp_types::{
    actions::distribution::{Action, Params, RewardWeight},
    crypto::Address,
    math::Dec,
};
use ruc::*;
use std::marker::PhantomData;
use tracing::debug;

pub const MODULE_NAME: &str = "distribution";

pub trait Config {
    type Bank: BankKeeper;
    type Staking: StakingKeeper;
    type Dex: DexKeeper;
    /// Denom every collected fee is swapped into.
    type BaseDenom: Get<String>;
    /// Module account fees are collected into.
    type FeeCollector: Get<String>;
    /// Account allowed to update params and spend the community pool.
    type Authority: Get<Address>;
    /// Accepted overshoot of a tracked stake, in smallest decimal units per denom.
    type StakeDriftMarginUlps: Get<u64>;
    /// Run every invariant each `n` blocks, 0 disables the checks.
    type InvariantCheckPeriod: Get<u64>;
    /// Params of the default genesis.
    type DefaultParams: Get<Params>;
}

parameter_types! {
    pub BaseDenom: String = CFG.base_denom.clone();
    pub FeeCollector: String = CFG.fee_collector.clone();
    pub Authority: Address = authority_from_config();
    pub StakeDriftMarginUlps: u64 = CFG.stake_drift_margin_ulps;
    pub InvariantCheckPeriod: u64 = CFG.invariant_check_period;
    pub DefaultParams: Params = params_from_config();
}

fn authority_from_config() -> Address {
    match CFG.authority.as_ref() {
        Some(addr) => pnk!(addr.parse::<Address>()),
        None => Address::module(&CFG.authority_module),
    }
}

fn params_from_config() -> Params {
    Params {
        community_tax: pnk!(CFG.community_tax.parse::<Dec>()),
        withdraw_addr_enabled: CFG.withdraw_addr_enabled,
        reward_weights: vec![RewardWeight {
            denom: CFG.base_denom.clone(),
            weight: Dec::one(),
        }],
    }
}

mod storage {
    use crate::types::{CurrentRewards, FeePool, HistoricalRewards, SlashEvent, StartingInfo};
    use fp_storage::*;
    use fp_types::{actions::distribution::Params, crypto::Address, pool::DecPools};

    generate_storage!(Distribution, ParamsStore => Value<Params>);
    generate_storage!(Distribution, FeePoolStore => Value<FeePool>);
    // delegator => withdraw address, absent means the delegator itself
    generate_storage!(Distribution, DelegatorWithdrawInfo => Map<Address, Address>);
    generate_storage!(Distribution, ValidatorOutstandingRewards => Map<Address, DecPools>);
    generate_storage!(Distribution, ValidatorAccumulatedCommission => Map<Address, DecPools>);
    generate_storage!(Distribution, ValidatorCurrentRewards => Map<Address, CurrentRewards>);
    // (validator, period)
    generate_storage!(Distribution, ValidatorHistoricalRewards => DoubleMap<Address, u64, HistoricalRewards>);
    // (validator, delegator)
    generate_storage!(Distribution, DelegatorStartingInfo => DoubleMap<Address, Address, StartingInfo>);
    // (validator, (height, period))
    generate_storage!(Distribution, ValidatorSlashEvents => DoubleMap<Address, (u64, u64), SlashEvent>);
}

#[derive(Clone)]
pub struct App<C> {
    phantom: PhantomData<C>,
}

impl<C: Config> Default for App<C> {
    fn default() -> Self {
        App {
            phantom: Default::default(),
        }
    }
}

impl<C: Config> AppModule for App<C> {
    fn query_route(
        &self,
        ctx: Context,
        path: Vec<&str>,
        _req: &RequestQuery,
    ) -> ResponseQuery {
        let mut resp = ResponseQuery::default();
        match Self::query(&ctx, &path) {
            Ok(value) => resp.value = value,
            Err(e) => {
                resp.code = 1;
                resp.log = format!("distribution: {}", e.get_lowest_msg());
            }
        }
        resp
    }

    fn begin_block(&mut self, ctx: &mut Context, req: &RequestBeginBlock) -> Result<()> {
        // the votes of the genesis block carry no power yet
        if ctx.block_height() > 1 {
            let total_power = req.votes.iter().map(|v| v.power).sum::<u64>();
            Self::allocate_tokens(ctx, total_power, &req.votes).c(d!())?;
        }
        Ok(())
    }

    fn end_block(&mut self, ctx: &mut Context, req: &RequestEndBlock) -> Result<()> {
        let period = C::InvariantCheckPeriod::get();
        if period > 0 && req.height % period == 0 {
            invariants::all_invariants::<C>(ctx).c(d!())?;
        }
        Ok(())
    }
}

impl<C: Config> Executable for App<C> {
    type Origin = Address;
    type Call = Action;

    fn execute(
        origin: Option<Self::Origin>,
        call: Self::Call,
        ctx: &Context,
    ) -> Result<ActionResult> {
        let sender = origin.c(d!(DistrError::InvalidOrigin))?;
        debug!(target: "distribution", "execute {:?} from {}", call, sender);

        match call {
            Action::SetWithdrawAddress(action) => {
                Self::set_withdraw_address(ctx, &sender, &action.withdraw_address)?;
                Ok(ActionResult::default())
            }
            Action::WithdrawDelegatorReward(action) => {
                let paid = Self::withdraw_delegator_reward(ctx, &sender, &action.validator)?;
                Ok(ActionResult {
                    data: serde_json::to_vec(&paid).c(d!())?,
                    ..Default::default()
                })
            }
            Action::WithdrawValidatorCommission(action) => {
                ensure!(sender == action.validator, DistrError::Unauthorized);
                let paid = Self::withdraw_validator_commission(ctx, &action.validator)?;
                Ok(ActionResult {
                    data: serde_json::to_vec(&paid.sum()).c(d!())?,
                    ..Default::default()
                })
            }
            Action::FundCommunityPool(action) => {
                Self::fund_community_pool(ctx, &sender, &action.amount)?;
                Ok(ActionResult::default())
            }
            Action::CommunityPoolSpend(action) => {
                Self::community_pool_spend(ctx, &sender, &action.recipient, &action.amount)?;
                Ok(ActionResult::default())
            }
            Action::UpdateParams(action) => {
                Self::update_params(ctx, &sender, action.params)?;
                Ok(ActionResult::default())
            }
        }
    }
}
