//! State of the chain as seen by the modules: the committed `ChainState` plus a
//! `SessionedCache` collecting the writes of the running block.

pub mod cache;
pub mod chain_state;

use crate::db::{IterOrder, KVBatch, KValue, MerkleDB};
pub use cache::{KVMap, KVecMap, SessionedCache};
pub use chain_state::ChainState;
use parking_lot::RwLock;
use ruc::*;
use std::sync::Arc;

pub struct State<D>
where
    D: MerkleDB,
{
    chain_state: Arc<RwLock<ChainState<D>>>,
    cache: SessionedCache,
}

impl<D> State<D>
where
    D: MerkleDB,
{
    /// Creates a State with an empty cache over `cs`.
    pub fn new(cs: Arc<RwLock<ChainState<D>>>) -> Self {
        State {
            chain_state: cs,
            cache: SessionedCache::new(),
        }
    }

    /// A State sharing the same ChainState with a copy of the current cache.
    ///
    /// Writes to the copy are never seen by `self`.
    pub fn copy(&self) -> Self {
        State {
            chain_state: self.chain_state.clone(),
            cache: self.cache.clone(),
        }
    }

    pub fn chain_state(&self) -> Arc<RwLock<ChainState<D>>> {
        self.chain_state.clone()
    }

    /// Cache first, then the chain state.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if let Some(v) = self.cache.get(key) {
            return Ok(v);
        }
        self.chain_state.read().get(key)
    }

    /// Returns false for a key deleted in the cache.
    pub fn exists(&self, key: &[u8]) -> Result<bool> {
        match self.cache.get(key) {
            Some(v) => Ok(v.is_some()),
            None => self.chain_state.read().exists(key),
        }
    }

    pub fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.cache.put(key, value);
    }

    /// Leaves a tombstone when the chain state or the accepted session knows the key,
    /// otherwise the key is simply dropped from the running session.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        let in_chain = self.chain_state.read().exists(key).c(d!())?;
        if in_chain || self.cache.accepted(key) {
            self.cache.delete(key);
        } else {
            self.cache.remove(key);
        }
        Ok(())
    }

    /// Iterates the chain state only.
    pub fn iterate(
        &self,
        lower: &[u8],
        upper: &[u8],
        order: IterOrder,
        func: &mut dyn FnMut(KValue) -> bool,
    ) -> bool {
        self.chain_state.read().iterate(lower, upper, order, func)
    }

    /// Overlays the cached KVs under `prefix` onto `map`.
    pub fn iterate_cache(&self, prefix: &[u8], map: &mut KVecMap) {
        self.cache.iter_prefix(prefix, map);
    }

    /// Persists the block into the chain state and starts over with an empty cache.
    pub fn commit(&mut self, height: u64) -> Result<(Vec<u8>, u64)> {
        let kv_batch = self.cache.commit();
        self.cache = SessionedCache::new();
        self.chain_state.write().commit(kv_batch, height, true)
    }

    /// Accepts the writes of the running session.
    pub fn commit_session(&mut self) -> KVBatch {
        self.cache.commit()
    }

    /// Drops the writes of the running session.
    pub fn discard_session(&mut self) {
        self.cache.discard()
    }

    pub fn height(&self) -> Result<u64> {
        self.chain_state.read().height()
    }
}
