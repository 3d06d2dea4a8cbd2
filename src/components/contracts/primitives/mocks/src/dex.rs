use crate::bank::MockBank;
use fp_core::context::Context;
use fp_traits::dex::DexKeeper;
use fp_types::{
    coin::{Coin, Coins},
    crypto::Address,
    math::Dec,
};
use ruc::*;

mod storage {
    use fp_storage::*;
    use fp_types::math::Dec;

    generate_storage!(MockDex, Prices => Map<String, Dec>);
}

use self::storage::Prices;

/// Swaps at a fixed price per denom, denoms without a price have no market.
pub struct MockDex;

impl MockDex {
    /// One unit of `denom` buys `price` units of the base denom.
    pub fn set_price(ctx: &Context, denom: &str, price: Dec) -> Result<()> {
        Prices::insert(&mut ctx.state.write(), &denom.to_owned(), &price)
    }
}

impl DexKeeper for MockDex {
    fn swap_to_base(
        ctx: &Context,
        account: &Address,
        coin: &Coin,
        base_denom: &str,
    ) -> Result<()> {
        let price = match Prices::get(&ctx.state.read(), &coin.denom)? {
            Some(p) => p,
            None => return Ok(()),
        };
        let out = Dec::from_int(&coin.amount).mul_truncate(&price).truncate_int();

        let sold: Coins = vec![coin.clone()].into();
        let bought: Coins = vec![Coin::new(base_denom, out)].into();
        MockBank::sub_balance(ctx, account, &sold).c(d!())?;
        MockBank::add_balance(ctx, account, &bought).c(d!())
    }
}
