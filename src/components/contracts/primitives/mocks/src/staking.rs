use fp_core::context::Context;
use fp_traits::staking::{StakingHooks, StakingKeeper};
use fp_types::{
    coin::{Coins, DecCoins},
    crypto::Address,
    math::Dec,
    staking::{DelegationInfo, ValidatorInfo},
};
use ruc::*;

mod storage {
    use fp_storage::*;
    use fp_types::{
        crypto::Address,
        staking::{DelegationInfo, ValidatorInfo},
    };

    generate_storage!(MockStaking, Validators => Map<Address, ValidatorInfo>);
    // (validator, delegator)
    generate_storage!(MockStaking, Delegations => DoubleMap<Address, Address, DelegationInfo>);
}

use self::storage::{Delegations, Validators};

/// Validators and delegations bookkeeping, coins are never moved.
///
/// Registered hooks run in registration order. A `before_*` hook runs before the
/// change is written, an `after_*` hook right after it, both inside the same session.
#[derive(Default)]
pub struct MockStaking {
    hooks: Vec<Box<dyn StakingHooks>>,
}

impl MockStaking {
    pub fn new() -> Self {
        MockStaking::default()
    }

    pub fn register_hooks(&mut self, hooks: Box<dyn StakingHooks>) {
        self.hooks.push(hooks);
    }

    pub fn create_validator(
        &self,
        ctx: &Context,
        operator: &Address,
        commission_rate: Dec,
        self_bond: &Coins,
    ) -> Result<()> {
        if Self::validator(ctx, operator)?.is_some() {
            return Err(eg!("validator already exists"));
        }
        let val = ValidatorInfo {
            operator: *operator,
            tokens: Coins::new(),
            delegator_shares: DecCoins::new(),
            commission_rate,
        };
        Validators::insert(&mut ctx.state.write(), operator, &val)?;
        for h in self.hooks.iter() {
            h.after_validator_created(ctx, operator).c(d!())?;
        }

        if !self_bond.is_empty() {
            self.delegate(ctx, operator, operator, self_bond)?;
        }
        Ok(())
    }

    /// Bonds `amount`, shares are issued at the current token/share rate of each denom.
    pub fn delegate(
        &self,
        ctx: &Context,
        del: &Address,
        val_addr: &Address,
        amount: &Coins,
    ) -> Result<()> {
        let mut val = Self::validator(ctx, val_addr)?.c(d!("unknown validator"))?;
        let existing = Self::delegation(ctx, del, val_addr)?;

        for h in self.hooks.iter() {
            if existing.is_some() {
                h.before_delegation_shares_modified(ctx, del, val_addr).c(d!())?;
            } else {
                h.before_delegation_created(ctx, del, val_addr).c(d!())?;
            }
        }

        let mut new_shares = DecCoins::new();
        for (denom, amount) in amount.iter() {
            let tokens = val.tokens.amount_of(denom);
            let total_shares = val.delegator_shares.amount_of(denom);
            let amount = Dec::from_int(amount);
            let shares = if tokens.is_zero() || total_shares.is_zero() {
                amount
            } else {
                total_shares
                    .mul(&amount)
                    .quo(&Dec::from_int(&tokens))
                    .c(d!())?
            };
            new_shares.add_coin(denom, &shares);
        }

        val.tokens = val.tokens.add(amount);
        val.delegator_shares = val.delegator_shares.add(&new_shares);
        let delegation = DelegationInfo {
            delegator: *del,
            validator: *val_addr,
            shares: existing
                .map(|d| d.shares)
                .unwrap_or_default()
                .add(&new_shares),
        };
        {
            let mut state = ctx.state.write();
            Validators::insert(&mut state, val_addr, &val)?;
            Delegations::insert(&mut state, val_addr, del, &delegation)?;
        }

        for h in self.hooks.iter() {
            h.after_delegation_modified(ctx, del, val_addr).c(d!())?;
        }
        Ok(())
    }

    /// Unbonds `shares`, returning the tokens they were worth.
    pub fn undelegate(
        &self,
        ctx: &Context,
        del: &Address,
        val_addr: &Address,
        shares: &DecCoins,
    ) -> Result<Coins> {
        let mut val = Self::validator(ctx, val_addr)?.c(d!("unknown validator"))?;
        let mut delegation = Self::delegation(ctx, del, val_addr)?.c(d!("no delegation"))?;
        let remaining = delegation.shares.sub(shares).c(d!("not enough shares"))?;

        for h in self.hooks.iter() {
            h.before_delegation_shares_modified(ctx, del, val_addr).c(d!())?;
        }

        let (tokens, _) = val.tokens_from_shares_truncated(shares).truncate_decimal();
        val.tokens = val.tokens.sub(&tokens).c(d!())?;
        val.delegator_shares = val.delegator_shares.sub(shares).c(d!())?;
        Validators::insert(&mut ctx.state.write(), val_addr, &val)?;

        if remaining.is_empty() {
            for h in self.hooks.iter() {
                h.before_delegation_removed(ctx, del, val_addr).c(d!())?;
            }
            Delegations::remove(&mut ctx.state.write(), val_addr, del)?;
        } else {
            delegation.shares = remaining;
            Delegations::insert(&mut ctx.state.write(), val_addr, del, &delegation)?;
            for h in self.hooks.iter() {
                h.after_delegation_modified(ctx, del, val_addr).c(d!())?;
            }
        }
        Ok(tokens)
    }

    /// Cuts `fractions` of the tokens of every denom.
    pub fn slash(&self, ctx: &Context, val_addr: &Address, fractions: &DecCoins) -> Result<()> {
        let mut val = Self::validator(ctx, val_addr)?.c(d!("unknown validator"))?;

        for h in self.hooks.iter() {
            h.before_validator_slashed(ctx, val_addr, fractions).c(d!())?;
        }

        let mut burned = Coins::new();
        for (denom, fraction) in fractions.iter() {
            let tokens = Dec::from_int(&val.tokens.amount_of(denom));
            burned.add_coin(denom, &tokens.mul_truncate(fraction).truncate_int());
        }
        val.tokens = val.tokens.sub(&burned).c(d!())?;
        Validators::insert(&mut ctx.state.write(), val_addr, &val)
    }

    /// Only a validator without delegations can be removed.
    pub fn remove_validator(&self, ctx: &Context, val_addr: &Address) -> Result<()> {
        if Self::validator(ctx, val_addr)?.is_none() {
            return Err(eg!("unknown validator"));
        }
        if !Self::validator_delegations(ctx, val_addr)?.is_empty() {
            return Err(eg!("validator still has delegations"));
        }
        Validators::remove(&mut ctx.state.write(), val_addr)?;

        for h in self.hooks.iter() {
            h.after_validator_removed(ctx, val_addr).c(d!())?;
        }
        Ok(())
    }
}

impl StakingKeeper for MockStaking {
    fn validator(ctx: &Context, val: &Address) -> Result<Option<ValidatorInfo>> {
        Validators::get(&ctx.state.read(), val)
    }

    fn delegation(
        ctx: &Context,
        del: &Address,
        val: &Address,
    ) -> Result<Option<DelegationInfo>> {
        Delegations::get(&ctx.state.read(), val, del)
    }

    fn validators(ctx: &Context) -> Result<Vec<ValidatorInfo>> {
        let vals = Validators::iterate(&ctx.state.read())?;
        Ok(vals.into_iter().map(|(_, v)| v).collect())
    }

    fn validator_delegations(ctx: &Context, val: &Address) -> Result<Vec<DelegationInfo>> {
        let dels = Delegations::iterate_prefix(&ctx.state.read(), val)?;
        Ok(dels.into_iter().map(|(_, d)| d).collect())
    }

    fn delegator_delegations(ctx: &Context, del: &Address) -> Result<Vec<DelegationInfo>> {
        let all = Delegations::iterate(&ctx.state.read())?;
        Ok(all
            .into_iter()
            .filter(|(_, d, _)| d == del)
            .map(|(_, _, info)| info)
            .collect())
    }
}
