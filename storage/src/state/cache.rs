use crate::db::KVBatch;
use std::collections::BTreeMap;

/// key-value map, a `None` value marks a deleted key
pub type KVMap = BTreeMap<Vec<u8>, Option<Vec<u8>>>;
pub type KVecMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// Write cache split into sessions.
///
/// `cur` holds every change of the running block, `base` the changes that were
/// already accepted by `commit`. A `discard` rolls `cur` back to `base`, which is how a
/// failed message is undone without touching the rest of the block.
#[derive(Clone, Default)]
pub struct SessionedCache {
    cur: KVMap,
    base: KVMap,
}

impl SessionedCache {
    pub fn new() -> Self {
        SessionedCache::default()
    }

    /// put/update value by key
    pub fn put(&mut self, key: &[u8], value: Vec<u8>) {
        self.cur.insert(key.to_owned(), Some(value));
    }

    /// mark a key as deleted
    pub fn delete(&mut self, key: &[u8]) {
        self.cur.insert(key.to_owned(), None);
    }

    /// Forget a key in the running session, `base` may still know it.
    pub fn remove(&mut self, key: &[u8]) {
        self.cur.remove(key);
    }

    /// Accepts the running session and returns every change made in the block so far.
    pub fn commit(&mut self) -> KVBatch {
        self.base = self.cur.clone();
        self.values()
    }

    /// Rolls the running session back to the last accepted one.
    pub fn discard(&mut self) {
        self.cur = self.base.clone();
    }

    /// Updated or deleted in this block, even with the same value.
    pub fn touched(&self, key: &[u8]) -> bool {
        self.cur.contains_key(key)
    }

    pub fn deleted(&self, key: &[u8]) -> bool {
        matches!(self.cur.get(key), Some(None))
    }

    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.cur.keys().cloned().collect()
    }

    pub fn values(&self) -> KVBatch {
        self.cur
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Has a live value in the cache, so the db must not be consulted.
    pub fn hasv(&self, key: &[u8]) -> bool {
        matches!(self.cur.get(key), Some(Some(_)))
    }

    pub fn getv(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.cur.get(key).cloned().flatten()
    }

    /// Live in the last accepted session.
    pub fn accepted(&self, key: &[u8]) -> bool {
        matches!(self.base.get(key), Some(Some(_)))
    }

    /// `Some(None)` for a deleted key, `None` for a key never seen.
    pub fn get(&self, key: &[u8]) -> Option<Option<Vec<u8>>> {
        self.cur.get(key).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &Option<Vec<u8>>)> {
        self.cur.iter()
    }

    /// Overlays the cached KVs starting with `prefix` onto `map`.
    pub fn iter_prefix(&self, prefix: &[u8], map: &mut KVecMap) {
        for (k, v) in self.cur.range(prefix.to_vec()..) {
            if !k.starts_with(prefix) {
                break;
            }
            match v {
                Some(v) => {
                    map.insert(k.clone(), v.clone());
                }
                None => {
                    map.remove(k);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KVecMap, SessionedCache};

    #[test]
    fn cache_put_update_delete() {
        let mut cache = SessionedCache::new();
        cache.put(b"k10", b"v10".to_vec());
        cache.put(b"k20", b"v20".to_vec());
        cache.put(b"k10", b"v11".to_vec());
        cache.delete(b"k20");

        assert!(cache.touched(b"k10"));
        assert!(cache.touched(b"k20"));
        assert!(!cache.deleted(b"k10"));
        assert!(cache.deleted(b"k20"));
        assert!(cache.hasv(b"k10"));
        assert!(!cache.hasv(b"k20"));

        assert_eq!(cache.getv(b"k10"), Some(b"v11".to_vec()));
        assert_eq!(cache.getv(b"k20"), None);
        assert_eq!(cache.get(b"k20"), Some(None));
        assert_eq!(cache.get(b"k30"), None);
        assert_eq!(cache.keys(), vec![b"k10".to_vec(), b"k20".to_vec()]);
    }

    #[test]
    fn cache_commit_then_discard() {
        let mut cache = SessionedCache::new();
        cache.put(b"k10", b"v10".to_vec());
        cache.put(b"k20", b"v20".to_vec());
        cache.commit();

        cache.put(b"k10", b"v11".to_vec());
        cache.delete(b"k20");
        cache.put(b"k30", b"v30".to_vec());
        cache.discard();

        assert_eq!(
            cache.values(),
            vec![
                (b"k10".to_vec(), Some(b"v10".to_vec())),
                (b"k20".to_vec(), Some(b"v20".to_vec())),
            ]
        );
        assert!(!cache.touched(b"k30"));
    }

    #[test]
    fn cache_values_are_sorted() {
        let mut cache = SessionedCache::new();
        cache.put(b"k40", b"v40".to_vec());
        cache.put(b"k10", b"v10".to_vec());
        cache.put(b"k30", b"v30".to_vec());
        cache.delete(b"k10");
        cache.delete(b"k10");

        assert_eq!(
            cache.values(),
            vec![
                (b"k10".to_vec(), None),
                (b"k30".to_vec(), Some(b"v30".to_vec())),
                (b"k40".to_vec(), Some(b"v40".to_vec())),
            ]
        );
    }

    #[test]
    fn cache_remove() {
        let mut cache = SessionedCache::new();
        cache.put(b"k40", b"v40".to_vec());
        cache.commit();

        cache.remove(b"k40");
        assert_eq!(cache.get(b"k40"), None);

        cache.discard();
        assert_eq!(cache.get(b"k40"), Some(Some(b"v40".to_vec())));

        cache.remove(b"k50");
        assert_eq!(cache.get(b"k50"), None);
    }

    #[test]
    fn cache_iter_prefix() {
        let mut cache = SessionedCache::new();
        let mut overlay = KVecMap::new();
        overlay.insert(b"validator_1".to_vec(), b"db".to_vec());
        overlay.insert(b"validator_9".to_vec(), b"db".to_vec());

        cache.put(b"validator_1", b"v10".to_vec());
        cache.put(b"k30", b"v30".to_vec());
        cache.put(b"validator_5", b"v50".to_vec());
        cache.put(b"validator_3", b"v30".to_vec());
        cache.put(b"validatorx", b"vx".to_vec());
        cache.delete(b"validator_1");
        cache.delete(b"validator_3");

        cache.iter_prefix(b"validator_", &mut overlay);

        let values: Vec<_> = overlay.into_iter().collect();
        assert_eq!(
            values,
            vec![
                (b"validator_5".to_vec(), b"v50".to_vec()),
                (b"validator_9".to_vec(), b"db".to_vec()),
            ]
        );
    }
}
