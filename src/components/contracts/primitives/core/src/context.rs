use fp_events::EventRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{
    db::MemDB,
    state::{ChainState, State},
};

pub use parking_lot::RwLock;

#[derive(Clone, PartialEq, Eq, Debug, Hash, Copy)]
pub enum RunTxMode {
    None = 0,
    /// Check a transaction
    Check = 1,
    /// Recheck a (pending) transaction after a commit
    ReCheck = 2,
    /// Simulate a transaction
    Simulate = 3,
    /// Deliver a transaction
    Deliver = 4,
}

/// Header of the block being processed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub chain_id: String,
    pub height: u64,
    /// Unix seconds.
    pub time: u64,
}

#[derive(Clone)]
pub struct Context {
    pub state: Arc<RwLock<State<MemDB>>>,
    pub run_mode: RunTxMode,
    pub header: BlockHeader,
    pub events: Arc<RwLock<Vec<EventRecord>>>,
}

impl Context {
    pub fn new(chain_state: Arc<RwLock<ChainState<MemDB>>>) -> Self {
        Context {
            state: Arc::new(RwLock::new(State::new(chain_state))),
            run_mode: RunTxMode::None,
            header: Default::default(),
            events: Default::default(),
        }
    }

    /// A context over a copy of the current state, writes never reach `self`.
    pub fn copy_with_state(&self) -> Self {
        let state = self.state.read().copy();
        Context {
            state: Arc::new(RwLock::new(state)),
            run_mode: RunTxMode::None,
            header: self.header.clone(),
            events: Default::default(),
        }
    }
}

impl Context {
    pub fn run_mode(&self) -> RunTxMode {
        self.run_mode
    }

    pub fn block_header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn block_height(&self) -> u64 {
        self.header.height
    }

    pub fn emit_event(&self, event: EventRecord) {
        self.events.write().push(event);
    }

    pub fn events_len(&self) -> usize {
        self.events.read().len()
    }

    /// Drops every event emitted after the first `len` ones.
    pub fn truncate_events(&self, len: usize) {
        self.events.write().truncate(len);
    }

    /// Removes and returns every event emitted so far.
    pub fn take_events(&self) -> Vec<EventRecord> {
        std::mem::take(&mut *self.events.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_context() -> Context {
        let cs = ChainState::new(MemDB::new(), "test_db".to_string());
        Context::new(Arc::new(RwLock::new(cs)))
    }

    #[test]
    fn copy_with_state_is_isolated() {
        let ctx = new_context();
        ctx.state.write().set(b"k1", b"v1".to_vec());

        let copy = ctx.copy_with_state();
        copy.state.write().set(b"k1", b"v2".to_vec());
        assert_eq!(copy.state.read().get(b"k1").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(ctx.state.read().get(b"k1").unwrap(), Some(b"v1".to_vec()));
    }

    #[test]
    fn events_are_collected() {
        let ctx = new_context();
        ctx.emit_event(EventRecord {
            type_: "a".to_string(),
            attributes: vec![],
        });
        ctx.emit_event(EventRecord::default());
        ctx.truncate_events(1);
        assert_eq!(ctx.events_len(), 1);
        assert_eq!(ctx.take_events()[0].type_, "a");
        assert_eq!(ctx.events_len(), 0);
    }
}
