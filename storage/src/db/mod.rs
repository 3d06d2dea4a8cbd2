mod mem_db;

pub use mem_db::{DBIter, IterOrder, KVBatch, KVEntry, KValue, MemDB, MerkleDB, StoreKey};
