//! Import and export of the whole distribution state.

use crate::storage::*;
use crate::types::{
    validate_params, CurrentRewards, FeePool, HistoricalRewards, SlashEvent,
    StartingInfo,
};
use crate::{App, Config, DistrError, MODULE_NAME};
use fp_core::context::Context;
use fp_traits::bank::BankKeeper;
use fp_types::{
    actions::distribution::Params, coin::Coins, crypto::Address, math::Dec, pool::DecPools,
};
use ruc::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawAddressRecord {
    pub delegator: Address,
    pub withdraw_address: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingRewardsRecord {
    pub validator: Address,
    pub outstanding_rewards: DecPools,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatedCommissionRecord {
    pub validator: Address,
    pub accumulated: DecPools,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRewardsRecord {
    pub validator: Address,
    pub period: u64,
    pub rewards: HistoricalRewards,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRewardsRecord {
    pub validator: Address,
    pub rewards: CurrentRewards,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingInfoRecord {
    pub delegator: Address,
    pub validator: Address,
    pub starting_info: StartingInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashEventRecord {
    pub validator: Address,
    pub height: u64,
    pub period: u64,
    pub event: SlashEvent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    pub fee_pool: FeePool,
    pub withdraw_infos: Vec<WithdrawAddressRecord>,
    pub outstanding_rewards: Vec<OutstandingRewardsRecord>,
    pub accumulated_commissions: Vec<AccumulatedCommissionRecord>,
    pub historical_rewards: Vec<HistoricalRewardsRecord>,
    pub current_rewards: Vec<CurrentRewardsRecord>,
    pub starting_infos: Vec<StartingInfoRecord>,
    pub slash_events: Vec<SlashEventRecord>,
}

impl GenesisState {
    pub fn new(params: Params) -> Self {
        GenesisState {
            params,
            fee_pool: FeePool::default(),
            withdraw_infos: vec![],
            outstanding_rewards: vec![],
            accumulated_commissions: vec![],
            historical_rewards: vec![],
            current_rewards: vec![],
            starting_infos: vec![],
            slash_events: vec![],
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_params(&self.params).c(d!())?;

        let invalid = |detail: String| eg!(DistrError::InvalidGenesis(detail));
        if self.fee_pool.community_pool.is_any_negative() {
            return Err(invalid("negative community pool".to_owned()));
        }
        for r in self.outstanding_rewards.iter() {
            if r.outstanding_rewards.is_any_negative() {
                return Err(invalid(format!("negative outstanding rewards of {}", r.validator)));
            }
        }
        for r in self.accumulated_commissions.iter() {
            if r.accumulated.is_any_negative() {
                return Err(invalid(format!("negative commission of {}", r.validator)));
            }
        }
        for r in self.historical_rewards.iter() {
            let rc = r.rewards.reference_count;
            if rc == 0 || rc > 2 {
                return Err(invalid(format!(
                    "reference count of {} period {} must be 1 or 2, got {}",
                    r.validator, r.period, rc
                )));
            }
        }
        for r in self.starting_infos.iter() {
            if r.starting_info.stakes.is_any_negative() {
                return Err(invalid(format!(
                    "negative stake of {} on {}",
                    r.delegator, r.validator
                )));
            }
        }
        for r in self.slash_events.iter() {
            if r.event.validator_period != r.period {
                return Err(invalid(format!(
                    "slash event of {} at height {} is keyed by period {} but records {}",
                    r.validator, r.height, r.period, r.event.validator_period
                )));
            }
            for (denom, fraction) in r.event.fractions.iter() {
                if fraction.is_negative() || fraction > &Dec::one() {
                    return Err(invalid(format!(
                        "slash fraction of {} in {} at height {} is outside [0, 1]: {}",
                        r.validator, denom, r.height, fraction
                    )));
                }
            }
        }
        Ok(())
    }

    /// Integral coins the module account must hold to pay every record out.
    pub fn owed(&self) -> Coins {
        let mut owed = self.fee_pool.community_pool.clone();
        for r in self.outstanding_rewards.iter() {
            owed = owed.add(&r.outstanding_rewards.sum());
        }
        owed.truncate_decimal().0
    }
}

impl<C: Config> App<C> {
    pub fn init_genesis_state(ctx: &Context, genesis: &GenesisState) -> Result<()> {
        genesis.validate().c(d!())?;

        let owed = genesis.owed();
        let balance = C::Bank::get_all_balances(ctx, &C::Bank::module_address(MODULE_NAME))?;
        if !balance.is_empty() && !balance.is_all_gte(&owed) {
            return Err(eg!(DistrError::InvalidGenesis(format!(
                "module account holds {}, less than the {} owed",
                balance, owed
            ))));
        }

        {
            let mut state = ctx.state.write();
            ParamsStore::put(&mut state, &genesis.params)?;
            FeePoolStore::put(&mut state, &genesis.fee_pool)?;
            for r in genesis.withdraw_infos.iter() {
                DelegatorWithdrawInfo::insert(&mut state, &r.delegator, &r.withdraw_address)?;
            }
            for r in genesis.outstanding_rewards.iter() {
                ValidatorOutstandingRewards::insert(
                    &mut state,
                    &r.validator,
                    &r.outstanding_rewards,
                )?;
            }
            for r in genesis.accumulated_commissions.iter() {
                ValidatorAccumulatedCommission::insert(&mut state, &r.validator, &r.accumulated)?;
            }
            for r in genesis.historical_rewards.iter() {
                ValidatorHistoricalRewards::insert(&mut state, &r.validator, &r.period, &r.rewards)?;
            }
            for r in genesis.current_rewards.iter() {
                ValidatorCurrentRewards::insert(&mut state, &r.validator, &r.rewards)?;
            }
            for r in genesis.starting_infos.iter() {
                DelegatorStartingInfo::insert(
                    &mut state,
                    &r.validator,
                    &r.delegator,
                    &r.starting_info,
                )?;
            }
            for r in genesis.slash_events.iter() {
                ValidatorSlashEvents::insert(
                    &mut state,
                    &r.validator,
                    &(r.height, r.period),
                    &r.event,
                )?;
            }
        }
        Ok(())
    }

    /// Every record, ascending by key.
    pub fn export_genesis_state(ctx: &Context) -> Result<GenesisState> {
        let params = Self::params(ctx)?;
        let fee_pool = Self::fee_pool(ctx)?;
        let state = ctx.state.read();

        Ok(GenesisState {
            params,
            fee_pool,
            withdraw_infos: DelegatorWithdrawInfo::iterate(&state)?
                .into_iter()
                .map(|(delegator, withdraw_address)| WithdrawAddressRecord {
                    delegator,
                    withdraw_address,
                })
                .collect(),
            outstanding_rewards: ValidatorOutstandingRewards::iterate(&state)?
                .into_iter()
                .map(|(validator, outstanding_rewards)| OutstandingRewardsRecord {
                    validator,
                    outstanding_rewards,
                })
                .collect(),
            accumulated_commissions: ValidatorAccumulatedCommission::iterate(&state)?
                .into_iter()
                .map(|(validator, accumulated)| AccumulatedCommissionRecord {
                    validator,
                    accumulated,
                })
                .collect(),
            historical_rewards: ValidatorHistoricalRewards::iterate(&state)?
                .into_iter()
                .map(|(validator, period, rewards)| HistoricalRewardsRecord {
                    validator,
                    period,
                    rewards,
                })
                .collect(),
            current_rewards: ValidatorCurrentRewards::iterate(&state)?
                .into_iter()
                .map(|(validator, rewards)| CurrentRewardsRecord { validator, rewards })
                .collect(),
            starting_infos: DelegatorStartingInfo::iterate(&state)?
                .into_iter()
                .map(|(validator, delegator, starting_info)| StartingInfoRecord {
                    delegator,
                    validator,
                    starting_info,
                })
                .collect(),
            slash_events: ValidatorSlashEvents::iterate(&state)?
                .into_iter()
                .map(|(validator, (height, period), event)| SlashEventRecord {
                    validator,
                    height,
                    period,
                    event,
                })
                .collect(),
        })
    }
}
