use fp_core::context::Context;
use fp_types::{coin::Coins, crypto::Address};
use ruc::{Result, RucError};
use std::fmt;

/// Failures a bank reports distinctly, raised as `eg!(BankError::X)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError {
    InsufficientFunds,
    BlockedRecipient,
}

impl BankError {
    /// Whether the root cause of `e` is `self`.
    pub fn is_cause_of(&self, e: &dyn RucError) -> bool {
        e.get_lowest_msg().contains(&self.to_string())
    }
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::InsufficientFunds => write!(f, "bank: insufficient funds"),
            BankError::BlockedRecipient => write!(f, "bank: recipient is blocked"),
        }
    }
}

/// Moves coins between accounts and module accounts.
pub trait BankKeeper {
    /// Every balance held by `who`.
    fn get_all_balances(ctx: &Context, who: &Address) -> Result<Coins>;

    fn send_coins_from_module_to_module(
        ctx: &Context,
        from_module: &str,
        to_module: &str,
        amount: &Coins,
    ) -> Result<()>;

    /// Fails with `BankError::BlockedRecipient` when `to` may not receive coins.
    fn send_coins_from_module_to_account(
        ctx: &Context,
        from_module: &str,
        to: &Address,
        amount: &Coins,
    ) -> Result<()>;

    fn send_coins_from_account_to_module(
        ctx: &Context,
        from: &Address,
        to_module: &str,
        amount: &Coins,
    ) -> Result<()>;

    /// Only used by genesis and tests.
    fn mint_coins(ctx: &Context, module: &str, amount: &Coins) -> Result<()>;

    /// Module accounts, and any address the chain refuses to pay.
    fn blocked_addr(ctx: &Context, who: &Address) -> bool;

    /// The account of the module `name`.
    fn module_address(name: &str) -> Address {
        Address::module(name)
    }
}
