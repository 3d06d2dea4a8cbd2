use fp_core::context::Context;
use fp_types::{coin::Coin, crypto::Address};
use ruc::Result;

/// Converts collected fees into the base denom.
pub trait DexKeeper {
    /// Swaps `coin`, held by `account`, into `base_denom`.
    ///
    /// A denom without a market is left as it is and reported as success.
    fn swap_to_base(
        ctx: &Context,
        account: &Address,
        coin: &Coin,
        base_denom: &str,
    ) -> Result<()>;
}

impl DexKeeper for () {
    fn swap_to_base(
        _ctx: &Context,
        _account: &Address,
        _coin: &Coin,
        _base_denom: &str,
    ) -> Result<()> {
        Ok(())
    }
}
