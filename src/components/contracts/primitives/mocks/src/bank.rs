use fp_core::context::Context;
use fp_traits::bank::{BankError, BankKeeper};
use fp_types::{coin::Coins, crypto::Address};
use ruc::*;

mod storage {
    use fp_storage::*;
    use fp_types::{coin::Coins, crypto::Address};

    generate_storage!(MockBank, Balances => Map<Address, Coins>);
    generate_storage!(MockBank, Blocked => Map<Address, bool>);
}

use self::storage::{Balances, Blocked};

/// Balances keyed by address, module accounts are blocked once they are used.
pub struct MockBank;

impl MockBank {
    pub fn balance(ctx: &Context, who: &Address) -> Coins {
        Balances::get(&ctx.state.read(), who)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    pub fn module_balance(ctx: &Context, module: &str) -> Coins {
        Self::balance(ctx, &Address::module(module))
    }

    /// Credits `amount` out of thin air.
    pub fn add_balance(ctx: &Context, who: &Address, amount: &Coins) -> Result<()> {
        let balance = Self::get_all_balances(ctx, who)?.add(amount);
        Balances::insert(&mut ctx.state.write(), who, &balance)
    }

    /// Burns `amount`, failing when `who` does not hold it.
    pub fn sub_balance(ctx: &Context, who: &Address, amount: &Coins) -> Result<()> {
        let balance = Self::get_all_balances(ctx, who)?;
        if !balance.is_all_gte(amount) {
            return Err(eg!(BankError::InsufficientFunds));
        }
        let rest = balance.sub(amount).c(d!())?;
        Balances::insert(&mut ctx.state.write(), who, &rest)
    }

    pub fn block(ctx: &Context, who: &Address) -> Result<()> {
        Blocked::insert(&mut ctx.state.write(), who, &true)
    }

    fn transfer(ctx: &Context, from: &Address, to: &Address, amount: &Coins) -> Result<()> {
        Self::sub_balance(ctx, from, amount).c(d!())?;
        Self::add_balance(ctx, to, amount).c(d!())
    }

    fn module_account(ctx: &Context, module: &str) -> Result<Address> {
        let addr = Self::module_address(module);
        Self::block(ctx, &addr)?;
        Ok(addr)
    }
}

impl BankKeeper for MockBank {
    fn get_all_balances(ctx: &Context, who: &Address) -> Result<Coins> {
        Balances::get(&ctx.state.read(), who).map(|b| b.unwrap_or_default())
    }

    fn send_coins_from_module_to_module(
        ctx: &Context,
        from_module: &str,
        to_module: &str,
        amount: &Coins,
    ) -> Result<()> {
        let from = Self::module_account(ctx, from_module)?;
        let to = Self::module_account(ctx, to_module)?;
        Self::transfer(ctx, &from, &to, amount)
    }

    fn send_coins_from_module_to_account(
        ctx: &Context,
        from_module: &str,
        to: &Address,
        amount: &Coins,
    ) -> Result<()> {
        if Self::blocked_addr(ctx, to) {
            return Err(eg!(BankError::BlockedRecipient));
        }
        let from = Self::module_account(ctx, from_module)?;
        Self::transfer(ctx, &from, to, amount)
    }

    fn send_coins_from_account_to_module(
        ctx: &Context,
        from: &Address,
        to_module: &str,
        amount: &Coins,
    ) -> Result<()> {
        let to = Self::module_account(ctx, to_module)?;
        Self::transfer(ctx, from, &to, amount)
    }

    fn mint_coins(ctx: &Context, module: &str, amount: &Coins) -> Result<()> {
        let to = Self::module_account(ctx, module)?;
        Self::add_balance(ctx, &to, amount)
    }

    fn blocked_addr(ctx: &Context, who: &Address) -> bool {
        Blocked::get(&ctx.state.read(), who)
            .ok()
            .flatten()
            .unwrap_or(false)
    }
}
