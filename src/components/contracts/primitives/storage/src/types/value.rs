use crate::*;
use std::marker::PhantomData;
use storage::db::MerkleDB;
use storage::state::State;

/// A single value stored at `module_prefix ++ STORAGE_PREFIX`.
pub struct StorageValue<Instance, Value>(PhantomData<(Instance, Value)>);

impl<Instance, Value> StorageValue<Instance, Value>
where
    Instance: StorageInstance,
    Value: Serialize + DeserializeOwned,
{
    pub fn module_prefix() -> &'static [u8] {
        Instance::module_prefix().as_bytes()
    }

    pub fn storage_prefix() -> &'static [u8] {
        Instance::STORAGE_PREFIX.as_bytes()
    }

    pub fn store_key() -> Vec<u8> {
        Instance::prefix().as_ref().to_vec()
    }

    pub fn exists<D: MerkleDB>(state: &State<D>) -> Result<bool> {
        Instance::exists(state, &Self::store_key())
    }

    pub fn get<D: MerkleDB>(state: &State<D>) -> Result<Option<Value>> {
        Instance::get_obj::<Value, D>(state, &Self::store_key())
    }

    pub fn put<D: MerkleDB>(state: &mut State<D>, val: &Value) -> Result<()> {
        Instance::set_obj::<Value, D>(state, &Self::store_key(), val)
    }

    pub fn take<D: MerkleDB>(state: &mut State<D>) -> Result<Option<Value>> {
        let val = Self::get(state)?;
        Self::delete(state)?;
        Ok(val)
    }

    pub fn delete<D: MerkleDB>(state: &mut State<D>) -> Result<()> {
        Instance::delete(state, &Self::store_key())
    }
}

impl<Instance, Value> StorageValue<Instance, Value>
where
    Instance: StorageInstance,
    Value: Serialize + DeserializeOwned + Default,
{
    /// The stored value, or `Value::default()` when nothing was ever stored.
    pub fn get_or_default<D: MerkleDB>(state: &State<D>) -> Result<Value> {
        Self::get(state).map(Option::unwrap_or_default)
    }
}
