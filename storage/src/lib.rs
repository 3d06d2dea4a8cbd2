//! Key-value state used by every module.
//!
//! A `ChainState` owns the committed data inside a `MerkleDB`, a `State` layers a
//! sessioned write cache on top of it, and the `store` helpers give typed access to
//! prefix-scoped objects.

#![deny(warnings)]

pub mod db;
pub mod state;
pub mod store;
