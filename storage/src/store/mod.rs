use crate::db::{IterOrder, KValue, MerkleDB};
use crate::state::{KVecMap, State};
use ruc::*;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::btree_map::IntoIter;

mod util;
pub use util::{Prefix, SPLIT_BGN, SPLIT_END};

/// Typed access to a `State` without holding it.
///
/// Every method receives the state explicitly, so an implementor is just a marker type
/// naming one storage. Objects are stored as json.
pub trait StatelessStore {
    //===========================read=============================

    /// Returns None if the key is missing or deleted.
    fn get<D: MerkleDB>(state: &State<D>, key: &[u8]) -> Result<Option<Vec<u8>>> {
        state.get(key)
    }

    fn get_obj<T, D>(state: &State<D>, key: &[u8]) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        D: MerkleDB,
    {
        match Self::get(state, key).c(d!())? {
            Some(value) => serde_json::from_slice::<T>(&value).c(d!()).map(Some),
            None => Ok(None),
        }
    }

    fn get_obj_or<T, D>(state: &State<D>, key: &[u8], default: T) -> Result<T>
    where
        T: DeserializeOwned,
        D: MerkleDB,
    {
        Self::get_obj(state, key).map(|v| v.unwrap_or(default))
    }

    fn exists<D: MerkleDB>(state: &State<D>, key: &[u8]) -> Result<bool> {
        state.exists(key)
    }

    /// Iterates the committed data only.
    fn iter_db<D: MerkleDB>(
        state: &State<D>,
        prefix: Prefix,
        asc: bool,
        func: &mut dyn FnMut(KValue) -> bool,
    ) -> bool {
        let order = if asc { IterOrder::Asc } else { IterOrder::Desc };
        state.iterate(&prefix.begin(), &prefix.end(), order, func)
    }

    /// Iterates the committed data overlaid with the cache, ascending by key.
    fn iter_cur<D: MerkleDB>(
        state: &State<D>,
        prefix: Prefix,
    ) -> IntoIter<Vec<u8>, Vec<u8>> {
        let mut kv_map = KVecMap::new();
        state.iterate(
            &prefix.begin(),
            &prefix.end(),
            IterOrder::Asc,
            &mut |(k, v)| -> bool {
                kv_map.insert(k, v);
                false
            },
        );
        state.iterate_cache(&prefix.begin(), &mut kv_map);
        kv_map.into_iter()
    }

    //===========================write=============================

    fn set<D: MerkleDB>(state: &mut State<D>, key: &[u8], value: Vec<u8>) -> Result<()> {
        state.set(key, value);
        Ok(())
    }

    fn set_obj<T, D>(state: &mut State<D>, key: &[u8], obj: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
        D: MerkleDB,
    {
        let value = serde_json::to_vec(obj).c(d!())?;
        Self::set(state, key, value)
    }

    /// Nothing happens if the key is not found.
    fn delete<D: MerkleDB>(state: &mut State<D>, key: &[u8]) -> Result<()> {
        state.delete(key)
    }
}
