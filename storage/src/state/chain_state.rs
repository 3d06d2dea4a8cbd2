//! Committed state of the chain.
//!
//! `ChainState` wraps a `MerkleDB` and records the last committed height in the
//! auxiliary section, which does not take part in the root hash.

use crate::db::{IterOrder, KVBatch, KValue, MerkleDB};
use ruc::*;

const HEIGHT_KEY: &[u8; 6] = b"Height";

pub struct ChainState<D>
where
    D: MerkleDB,
{
    name: String,
    db: D,
}

impl<D> ChainState<D>
where
    D: MerkleDB,
{
    /// Creates a ChainState over `db`, named `chain-state` when `name` is empty.
    pub fn new(db: D, name: String) -> Self {
        let name = if name.is_empty() {
            "chain-state".to_owned()
        } else {
            name
        };
        ChainState { name, db }
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db.get(key)
    }

    /// Feeds every KV of `[lower, upper)` to `func` until it returns `true`.
    pub fn iterate(
        &self,
        lower: &[u8],
        upper: &[u8],
        order: IterOrder,
        func: &mut dyn FnMut(KValue) -> bool,
    ) -> bool {
        for entry in self.db.iter(lower, upper, order) {
            if func(entry) {
                break;
            }
        }
        true
    }

    pub fn exists(&self, key: &[u8]) -> Result<bool> {
        self.get(key).c(d!()).map(|v| v.is_some())
    }

    /// Writes a sorted batch and stores `height` in the auxiliary section.
    ///
    /// Returns the new root hash together with the committed height.
    pub fn commit(
        &mut self,
        mut batch: KVBatch,
        height: u64,
        flush: bool,
    ) -> Result<(Vec<u8>, u64)> {
        batch.sort();
        self.db.put_batch(batch).c(d!())?;
        self.db
            .commit(
                vec![(HEIGHT_KEY.to_vec(), Some(height.to_string().into_bytes()))],
                flush,
            )
            .c(d!())?;

        Ok((self.db.root_hash(), height))
    }

    /// Last committed height, 0 before the first commit.
    pub fn height(&self) -> Result<u64> {
        match self.db.get_aux(HEIGHT_KEY).c(d!())? {
            Some(value) => String::from_utf8(value)
                .c(d!())?
                .parse::<u64>()
                .c(d!()),
            None => Ok(0),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{IterOrder, KValue, MemDB, MerkleDB};
    use crate::state::chain_state::ChainState;

    fn ordered_batch() -> Vec<(Vec<u8>, Option<Vec<u8>>)> {
        (1..=8)
            .map(|i| {
                (
                    format!("k{}0", i).into_bytes(),
                    Some(format!("v{}0", i).into_bytes()),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_name() {
        let cs = ChainState::new(MemDB::new(), String::new());
        assert_eq!(cs.name(), "chain-state");

        let cs = ChainState::new(MemDB::new(), "distribution".to_owned());
        assert_eq!(cs.name(), "distribution");
    }

    #[test]
    fn test_get_and_aux() {
        let mut db = MemDB::new();
        db.put_batch(vec![
            (b"k10".to_vec(), Some(b"v10".to_vec())),
            (b"k20".to_vec(), Some(b"v20".to_vec())),
        ])
        .unwrap();
        db.commit(vec![(b"Height".to_vec(), Some(b"25".to_vec()))], false)
            .unwrap();

        let cs = ChainState::new(db, "test_db".to_string());
        assert_eq!(cs.get(b"k10").unwrap(), Some(b"v10".to_vec()));
        assert_eq!(cs.get(b"kN/A").unwrap(), None);
        assert_eq!(cs.height().unwrap(), 25);

        // aux data never leaks into the primary section
        assert_eq!(cs.get(b"Height").unwrap(), None);
        assert!(cs.exists(b"k20").unwrap());
        assert!(!cs.exists(b"k30").unwrap());
    }

    #[test]
    fn test_commit_then_iterate() {
        let batch = ordered_batch();
        let expected = batch.clone();

        let mut cs = ChainState::new(MemDB::new(), "test_db".to_string());
        let (_, height) = cs.commit(batch, 55, false).unwrap();
        assert_eq!(height, 55);

        let mut index = 0;
        let mut func_iter = |entry: KValue| {
            assert_eq!(entry.0, expected[index].0);
            assert_eq!(Some(entry.1), expected[index].1);
            index += 1;
            false
        };
        cs.iterate(b"k10", b"k80", IterOrder::Asc, &mut func_iter);
        // upper bound is exclusive
        assert_eq!(index, 7);
    }

    #[test]
    fn test_iterate_stops_early() {
        let mut cs = ChainState::new(MemDB::new(), "test_db".to_string());
        cs.commit(ordered_batch(), 1, false).unwrap();

        let mut seen = vec![];
        cs.iterate(b"k", b"l", IterOrder::Desc, &mut |(k, _)| {
            seen.push(k);
            seen.len() == 2
        });
        assert_eq!(seen, vec![b"k80".to_vec(), b"k70".to_vec()]);
    }

    #[test]
    fn test_root_hash_and_height() {
        let mut cs = ChainState::new(MemDB::new(), "test_db".to_string());
        assert_eq!(cs.height().unwrap(), 0);

        let (root1, _) = cs
            .commit(vec![(b"k10".to_vec(), Some(b"v10".to_vec()))], 32, false)
            .unwrap();
        assert_eq!(cs.height().unwrap(), 32);

        let (root2, _) = cs
            .commit(vec![(b"k10".to_vec(), Some(b"v20".to_vec()))], 33, false)
            .unwrap();
        assert_ne!(root1, root2);

        let (root3, _) = cs.commit(vec![], 34, false).unwrap();
        assert_eq!(root2, root3);
        assert_eq!(cs.height().unwrap(), 34);
    }
}
