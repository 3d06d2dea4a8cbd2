//! Consistency checks over the whole distribution state.
//!
//! Each check returns a report and whether the invariant is broken. They are run
//! by `end_block` every `InvariantCheckPeriod` blocks and by the tests.

use crate::storage::*;
use crate::{App, Config, MODULE_NAME};
use fp_core::{context::Context, invariant};
use fp_traits::{bank::BankKeeper, staking::StakingKeeper};
use fp_types::coin::DecCoins;
use ruc::*;
use tracing::error;

pub type InvariantFn = fn(&Context) -> Result<(String, bool)>;

/// Every invariant of the module, in the order `all_invariants` runs them.
pub fn registered_invariants<C: Config>() -> Vec<(&'static str, InvariantFn)> {
    vec![
        ("nonnegative-outstanding", nonnegative_outstanding::<C> as InvariantFn),
        ("can-withdraw", can_withdraw::<C> as InvariantFn),
        ("reference-count", reference_count::<C> as InvariantFn),
        ("module-account", module_account::<C> as InvariantFn),
    ]
}

/// Fails with an `InvariantViolation` naming the first broken invariant.
pub fn all_invariants<C: Config>(ctx: &Context) -> Result<()> {
    for (name, check) in registered_invariants::<C>() {
        let (msg, broken) = check(ctx).c(d!())?;
        if broken {
            error!(target: "distribution", "invariant {} broken: {}", name, msg);
            invariant!("distribution/{}: {}", name, msg);
        }
    }
    Ok(())
}

pub fn nonnegative_outstanding<C: Config>(ctx: &Context) -> Result<(String, bool)> {
    let all = ValidatorOutstandingRewards::iterate(&ctx.state.read())?;

    let mut msg = String::new();
    let mut count = 0;
    for (val, outstanding) in all.iter() {
        if outstanding.is_any_negative() {
            count += 1;
            msg += &format!("\t{} has negative outstanding coins: {}\n", val, outstanding);
        }
    }
    Ok((
        format!("found {} validators with negative outstanding rewards\n{}", count, msg),
        count != 0,
    ))
}

/// Withdraws every commission and every delegation on a copy of the state, no
/// outstanding reward may go negative doing so.
pub fn can_withdraw<C: Config>(ctx: &Context) -> Result<(String, bool)> {
    let cache = ctx.copy_with_state();

    for val in C::Staking::validators(&cache)?.iter() {
        let commission = App::<C>::accumulated_commission(&cache, &val.operator)?;
        if !commission.is_empty() {
            if let Err(e) = App::<C>::withdraw_validator_commission(&cache, &val.operator) {
                return Ok((
                    format!("withdrawing commission of {} failed: {}", val.operator, e),
                    true,
                ));
            }
        }

        for del in C::Staking::validator_delegations(&cache, &val.operator)?.iter() {
            if let Err(e) = App::<C>::withdraw_delegation_rewards(&cache, val, del) {
                return Ok((
                    format!(
                        "withdrawing rewards of {} from {} failed: {}",
                        del.delegator, val.operator, e
                    ),
                    true,
                ));
            }
        }
    }

    let remaining = ValidatorOutstandingRewards::iterate(&cache.state.read())?;
    let broken = remaining.iter().any(|(_, o)| o.is_any_negative());
    Ok((
        "remaining outstanding rewards are negative after withdrawing everything".to_owned(),
        broken,
    ))
}

/// Every historical record is referenced by its validator, a delegation starting
/// info or a slash event.
pub fn reference_count<C: Config>(ctx: &Context) -> Result<(String, bool)> {
    let validators = C::Staking::validators(ctx)?;
    let mut delegations = 0;
    for val in validators.iter() {
        delegations += C::Staking::validator_delegations(ctx, &val.operator)?.len();
    }
    let slashes = ValidatorSlashEvents::iterate(&ctx.state.read())?.len();
    let expected = (validators.len() + delegations + slashes) as u64;

    let count = ValidatorHistoricalRewards::iterate(&ctx.state.read())?
        .iter()
        .map(|(_, _, h)| h.reference_count as u64)
        .sum::<u64>();

    Ok((
        format!(
            "expected historical reference count: {} = {} validators + {} delegations + {} slashes\ntotal validator historical reference count: {}",
            expected,
            validators.len(),
            delegations,
            slashes,
            count
        ),
        count != expected,
    ))
}

/// The module account holds at least the outstanding rewards plus the community pool.
pub fn module_account<C: Config>(ctx: &Context) -> Result<(String, bool)> {
    let mut expected: DecCoins = App::<C>::fee_pool(ctx)?.community_pool;
    for (_, outstanding) in ValidatorOutstandingRewards::iterate(&ctx.state.read())?.iter() {
        expected = expected.add(&outstanding.sum());
    }
    let (expected, _) = expected.truncate_decimal();

    let balance = C::Bank::get_all_balances(ctx, &C::Bank::module_address(MODULE_NAME))?;
    Ok((
        format!("expected at least {} in the module account, found {}", expected, balance),
        !balance.is_all_gte(&expected),
    ))
}
