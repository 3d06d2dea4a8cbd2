use ruc::*;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// key-value pairs
pub type StoreKey = Vec<u8>;
pub type KValue = (StoreKey, Vec<u8>);
pub type KVEntry = (StoreKey, Option<Vec<u8>>);
pub type KVBatch = Vec<KVEntry>;

/// iterator
pub type DBIter<'a> = Box<dyn Iterator<Item = KValue> + 'a>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterOrder {
    Asc,
    Desc,
}

/// Merkleized KV store interface
pub trait MerkleDB {
    fn root_hash(&self) -> Vec<u8>;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn get_aux(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn put_batch(&mut self, kvs: KVBatch) -> Result<()>;

    fn iter(&self, lower: &[u8], upper: &[u8], order: IterOrder) -> DBIter;

    fn commit(&mut self, aux: KVBatch, flush: bool) -> Result<()>;

    fn as_mut(&mut self) -> &mut Self {
        self
    }
}

/// In-memory db
///
/// Keeps the primary and the auxiliary sections in ordered maps. The root hash is
/// recomputed on every commit over the primary section only.
#[derive(Clone, Default)]
pub struct MemDB {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    aux: BTreeMap<Vec<u8>, Vec<u8>>,
    root: Vec<u8>,
}

impl MemDB {
    pub fn new() -> Self {
        MemDB::default()
    }

    /// Number of KVs in the primary section.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn digest(&self) -> Vec<u8> {
        if self.data.is_empty() {
            return vec![0; 32];
        }
        let mut hasher = Sha256::new();
        for (k, v) in self.data.iter() {
            hasher.update((k.len() as u64).to_be_bytes());
            hasher.update(k);
            hasher.update((v.len() as u64).to_be_bytes());
            hasher.update(v);
        }
        hasher.finalize().to_vec()
    }
}

fn range_of<'a>(
    map: &'a BTreeMap<Vec<u8>, Vec<u8>>,
    lower: &[u8],
    upper: &[u8],
    order: IterOrder,
) -> DBIter<'a> {
    if lower >= upper {
        return Box::new(std::iter::empty());
    }
    let range = map
        .range(lower.to_vec()..upper.to_vec())
        .map(|(k, v)| (k.clone(), v.clone()));
    match order {
        IterOrder::Asc => Box::new(range),
        IterOrder::Desc => Box::new(range.rev()),
    }
}

fn apply(map: &mut BTreeMap<Vec<u8>, Vec<u8>>, kvs: KVBatch) {
    for (key, val) in kvs {
        match val {
            Some(val) => {
                map.insert(key, val);
            }
            None => {
                map.remove(&key);
            }
        }
    }
}

impl MerkleDB for MemDB {
    /// Returns the root hash of the last commit, zero-filled when the db is empty.
    fn root_hash(&self) -> Vec<u8> {
        if self.root.is_empty() {
            return vec![0; 32];
        }
        self.root.clone()
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.get(key).cloned())
    }

    fn get_aux(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.aux.get(key).cloned())
    }

    /// Puts a batch of KVs, `None` values delete the key.
    fn put_batch(&mut self, kvs: KVBatch) -> Result<()> {
        apply(&mut self.data, kvs);
        Ok(())
    }

    fn iter(&self, lower: &[u8], upper: &[u8], order: IterOrder) -> DBIter {
        range_of(&self.data, lower, upper, order)
    }

    /// Commits changes. `flush` has no meaning for memory and is ignored.
    fn commit(&mut self, aux: KVBatch, _flush: bool) -> Result<()> {
        apply(&mut self.aux, aux);
        self.root = self.digest();
        Ok(())
    }
}
