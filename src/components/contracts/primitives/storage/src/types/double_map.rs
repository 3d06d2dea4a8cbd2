use crate::*;
use ruc::*;
use storage::db::MerkleDB;
use storage::state::State;
use storage::store::{Prefix, SPLIT_BGN};

/// Values keyed by a `(key1, key2)` couple. Entries sharing `key1` can be listed or
/// removed together.
///
/// Each value is stored at:
/// ```nocompile
/// Instance::module_prefix() ++ Instance::STORAGE_PREFIX
///    ++ "_" ++ encode_key(key1)
///    ++ "_" ++ encode_key(key2)
/// ```
///
/// `key1` must not encode to a string containing `_`.
pub struct StorageDoubleMap<Instance, Key1, Key2, Value>(
    std::marker::PhantomData<(Instance, Key1, Key2, Value)>,
);

impl<Instance, Key1, Key2, Value>
    StorageDoubleMap<Instance, Key1, Key2, Value>
where
    Instance: StorageInstance,
    Key1: StorageKey,
    Key2: StorageKey,
    Value: Serialize + DeserializeOwned,
{
    pub fn module_prefix() -> &'static [u8] {
        Instance::module_prefix().as_bytes()
    }

    pub fn storage_prefix() -> &'static [u8] {
        Instance::STORAGE_PREFIX.as_bytes()
    }

    fn prefix() -> Prefix {
        Instance::prefix()
    }

    /// The full storage key of one entry.
    pub fn build_key_for(k1: &Key1, k2: &Key2) -> Vec<u8> {
        Self::prefix()
            .push_sub(k1.encode_key().as_bytes(), k2.encode_key().as_bytes())
            .as_ref()
            .to_vec()
    }

    /// Recovers both keys from a full storage key.
    pub fn parse_key_for(raw: &[u8]) -> Result<(Key1, Key2)> {
        let begin = Self::prefix().begin();
        let rest = raw
            .strip_prefix(begin.as_slice())
            .c(d!("storage key outside of the map"))?;
        let rest = std::str::from_utf8(rest).c(d!())?;
        let (k1, k2) = rest
            .split_once(SPLIT_BGN)
            .c(d!(format!("malformed double map key '{}'", rest)))?;
        Ok((Key1::decode_key(k1)?, Key2::decode_key(k2)?))
    }

    /// Does the value (explicitly) exist in storage?
    pub fn contains_key<D: MerkleDB>(
        state: &State<D>,
        k1: &Key1,
        k2: &Key2,
    ) -> Result<bool> {
        Instance::exists(state, Self::build_key_for(k1, k2).as_slice())
    }

    /// Load the value associated with the given key from the map.
    pub fn get<D: MerkleDB>(
        state: &State<D>,
        k1: &Key1,
        k2: &Key2,
    ) -> Result<Option<Value>> {
        Instance::get_obj::<Value, D>(state, Self::build_key_for(k1, k2).as_slice())
    }

    /// Store a value to be associated with the given key from the map.
    pub fn insert<D: MerkleDB>(
        state: &mut State<D>,
        k1: &Key1,
        k2: &Key2,
        val: &Value,
    ) -> Result<()> {
        Instance::set_obj::<Value, D>(state, Self::build_key_for(k1, k2).as_slice(), val)
    }

    /// Remove the value under a key.
    pub fn remove<D: MerkleDB>(state: &mut State<D>, k1: &Key1, k2: &Key2) -> Result<()> {
        Instance::delete(state, Self::build_key_for(k1, k2).as_slice())
    }

    /// Remove all values under the first key.
    pub fn remove_prefix<D: MerkleDB>(state: &mut State<D>, k1: &Key1) -> Result<()> {
        for (k2, _) in Self::iterate_prefix(state, k1)?.iter() {
            Self::remove(state, k1, k2)?;
        }
        Ok(())
    }

    /// Iter over all values under the first key, ascending by the second key.
    pub fn iterate_prefix<D: MerkleDB>(
        state: &State<D>,
        k1: &Key1,
    ) -> Result<Vec<(Key2, Value)>> {
        let final_key = Self::prefix().push(k1.encode_key().as_bytes());
        let kv_map = Instance::iter_cur(state, final_key);

        let mut res = Vec::new();
        for (k, v) in kv_map {
            let (_, key2) = Self::parse_key_for(k.as_slice())?;
            let value = serde_json::from_slice::<Value>(v.as_slice()).c(d!())?;
            res.push((key2, value));
        }
        Ok(res)
    }

    /// Iter over all values of the storage, ascending by the first then the second key.
    pub fn iterate<D: MerkleDB>(state: &State<D>) -> Result<Vec<(Key1, Key2, Value)>> {
        let kv_map = Instance::iter_cur(state, Self::prefix());

        let mut res = Vec::new();
        for (k, v) in kv_map {
            let (key1, key2) = Self::parse_key_for(k.as_slice())?;
            let value = serde_json::from_slice::<Value>(v.as_slice()).c(d!())?;
            res.push((key1, key2, value));
        }
        Ok(res)
    }
}
