use crate::*;
use ruc::*;
use storage::db::MerkleDB;
use storage::state::State;
use storage::store::Prefix;

/// Values keyed by one `StorageKey`, iterable in key order.
///
/// Each value is stored at:
/// ```nocompile
/// Instance::module_prefix() ++ Instance::STORAGE_PREFIX ++ "_" ++ encode_key(key)
/// ```
///
pub struct StorageMap<Instance, Key, Value>(
    std::marker::PhantomData<(Instance, Key, Value)>,
);

impl<Instance, Key, Value> StorageMap<Instance, Key, Value>
where
    Instance: StorageInstance,
    Key: StorageKey,
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
    pub fn build_key_for(key: &Key) -> Vec<u8> {
        Self::prefix()
            .push(key.encode_key().as_bytes())
            .as_ref()
            .to_vec()
    }

    /// Recovers the key from a full storage key.
    pub fn parse_key_for(raw: &[u8]) -> Result<Key> {
        let begin = Self::prefix().begin();
        let rest = raw
            .strip_prefix(begin.as_slice())
            .c(d!("storage key outside of the map"))?;
        let rest = std::str::from_utf8(rest).c(d!())?;
        Key::decode_key(rest)
    }

    /// Does the value (explicitly) exist in storage?
    pub fn contains_key<D: MerkleDB>(state: &State<D>, key: &Key) -> Result<bool> {
        Instance::exists(state, Self::build_key_for(key).as_slice())
    }

    /// Load the value associated with the given key from the map.
    pub fn get<D: MerkleDB>(state: &State<D>, key: &Key) -> Result<Option<Value>> {
        Instance::get_obj::<Value, D>(state, Self::build_key_for(key).as_slice())
    }

    /// Store a value to be associated with the given key from the map.
    pub fn insert<D: MerkleDB>(
        state: &mut State<D>,
        key: &Key,
        val: &Value,
    ) -> Result<()> {
        Instance::set_obj::<Value, D>(state, Self::build_key_for(key).as_slice(), val)
    }

    /// Remove the value under a key.
    pub fn remove<D: MerkleDB>(state: &mut State<D>, key: &Key) -> Result<()> {
        Instance::delete(state, Self::build_key_for(key).as_slice())
    }

    /// Iter over all value of the storage, ascending by encoded key.
    pub fn iterate<D: MerkleDB>(state: &State<D>) -> Result<Vec<(Key, Value)>> {
        let kv_map = Instance::iter_cur(state, Self::prefix());

        let mut res = Vec::new();
        for (k, v) in kv_map {
            let key = Self::parse_key_for(k.as_slice())?;
            let value = serde_json::from_slice::<Value>(v.as_slice()).c(d!())?;
            res.push((key, value));
        }
        Ok(res)
    }
}
