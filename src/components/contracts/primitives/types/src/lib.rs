#![deny(warnings)]
#![allow(missing_docs)]

pub mod actions;
pub mod coin;
pub mod crypto;
pub mod error;
pub mod math;
pub mod pool;
pub mod staking;

pub use coin::{Coin, Coins, DecCoin, DecCoins};
pub use math::{Dec, Int};
pub use pool::{DecPool, DecPools, Pool, Pools};
