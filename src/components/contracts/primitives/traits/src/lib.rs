#![deny(warnings)]
#![allow(missing_docs)]

pub mod bank;
pub mod dex;
pub mod staking;
