use fp_core::context::Context;
use fp_types::{
    coin::DecCoins,
    crypto::Address,
    staking::{DelegationInfo, ValidatorInfo},
};
use ruc::Result;

/// Read-only access to validators and delegations.
pub trait StakingKeeper {
    fn validator(ctx: &Context, val: &Address) -> Result<Option<ValidatorInfo>>;

    fn delegation(
        ctx: &Context,
        del: &Address,
        val: &Address,
    ) -> Result<Option<DelegationInfo>>;

    /// Every validator, ascending by operator address.
    fn validators(ctx: &Context) -> Result<Vec<ValidatorInfo>>;

    fn validator_delegations(ctx: &Context, val: &Address) -> Result<Vec<DelegationInfo>>;

    fn delegator_delegations(ctx: &Context, del: &Address) -> Result<Vec<DelegationInfo>>;
}

/// Callbacks of the staking lifecycle.
///
/// The staking module invokes every registered hook in registration order, and
/// before it commits the change that triggered the call, so a hook still observes
/// the state as it was before the change. An error aborts the triggering change.
pub trait StakingHooks {
    fn after_validator_created(&self, _ctx: &Context, _val: &Address) -> Result<()> {
        Ok(())
    }

    fn before_delegation_created(
        &self,
        _ctx: &Context,
        _del: &Address,
        _val: &Address,
    ) -> Result<()> {
        Ok(())
    }

    fn before_delegation_shares_modified(
        &self,
        _ctx: &Context,
        _del: &Address,
        _val: &Address,
    ) -> Result<()> {
        Ok(())
    }

    fn after_delegation_modified(
        &self,
        _ctx: &Context,
        _del: &Address,
        _val: &Address,
    ) -> Result<()> {
        Ok(())
    }

    fn before_delegation_removed(
        &self,
        _ctx: &Context,
        _del: &Address,
        _val: &Address,
    ) -> Result<()> {
        Ok(())
    }

    /// `fractions` holds the share of the tokens of each denom about to be cut.
    fn before_validator_slashed(
        &self,
        _ctx: &Context,
        _val: &Address,
        _fractions: &DecCoins,
    ) -> Result<()> {
        Ok(())
    }

    fn after_validator_removed(&self, _ctx: &Context, _val: &Address) -> Result<()> {
        Ok(())
    }
}
