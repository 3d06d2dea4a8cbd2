//! In-state bank, staking and dex used to drive modules in tests.
//!
//! Every mock keeps its data in the context state, so a discarded session or a
//! `copy_with_state` context behaves exactly like it would for a real module.

#![cfg_attr(test, allow(unused_imports))]

mod bank;
mod dex;
mod staking;

pub use bank::MockBank;
pub use dex::MockDex;
pub use staking::MockStaking;

use fp_core::context::{Context, RunTxMode};
use fp_types::{
    coin::{Coin, Coins, DecCoin, DecCoins},
    crypto::Address,
    math::Dec,
};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use rand_chacha::{rand_core::SeedableRng, ChaChaRng};
use ruc::*;
use std::sync::Arc;
use storage::{db::MemDB, state::ChainState};

lazy_static! {
    pub static ref ALICE: Address = generate_address(1);
    pub static ref BOB: Address = generate_address(2);
    pub static ref CHARLIE: Address = generate_address(3);
    pub static ref VAL_A: Address = generate_address(101);
    pub static ref VAL_B: Address = generate_address(102);
    pub static ref VAL_C: Address = generate_address(103);
}

/// A deterministic address, distinct for every `n`.
pub fn generate_address(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xab;
    bytes[19] = n;
    Address::from(bytes)
}

/// A fresh context over an empty in-memory chain, at height 1 in deliver mode.
pub fn new_context() -> Context {
    let chain_state = ChainState::new(MemDB::new(), "mock_db".to_string());
    let mut ctx = Context::new(Arc::new(RwLock::new(chain_state)));
    ctx.run_mode = RunTxMode::Deliver;
    ctx.header.chain_id = "mock-chain".to_string();
    ctx.header.height = 1;
    ctx
}

/// Commits the block and moves the context to the next height.
pub fn next_block(ctx: &mut Context) {
    let height = ctx.header.height;
    pnk!(ctx.state.write().commit(height));
    ctx.header.height = height + 1;
    ctx.header.time += 5;
}

pub fn seeded_rng(seed: u64) -> ChaChaRng {
    ChaChaRng::seed_from_u64(seed)
}

/// `coins(&[("ufra", 100)])`
pub fn coins(items: &[(&str, u64)]) -> Coins {
    items
        .iter()
        .map(|(denom, amount)| Coin::new(*denom, *amount))
        .collect()
}

/// `dec_coins(&[("ufra", "0.5")])`, panics on a malformed amount.
pub fn dec_coins(items: &[(&str, &str)]) -> DecCoins {
    items
        .iter()
        .map(|(denom, amount)| DecCoin::new(*denom, dec(amount)))
        .collect()
}

/// Panics on a malformed amount.
pub fn dec(s: &str) -> Dec {
    s.parse()
        .unwrap_or_else(|e| panic!("invalid decimal '{}': {}", s, e))
}
