use crate::context::{Context, RunTxMode};
use fp_events::EventRecord;
use ruc::*;

/// A action (module function and argument values) that can be executed.
pub trait Executable {
    /// The caller
    type Origin;
    /// The call to execute
    type Call;

    /// Actually execute this action and return the result of it.
    fn execute(
        origin: Option<Self::Origin>,
        call: Self::Call,
        ctx: &Context,
    ) -> Result<ActionResult>;
}

/// Runs `call` in its own session of the context state.
///
/// The writes of the action are accepted only when it succeeds, a failed action leaves
/// neither state changes nor events behind. In `Check` mode the action is run and then
/// rolled back whatever the outcome.
pub fn apply_action<E: Executable>(
    ctx: &Context,
    origin: Option<E::Origin>,
    call: E::Call,
) -> Result<ActionResult> {
    ctx.state.write().commit_session();
    let events_before = ctx.events_len();

    match E::execute(origin, call, ctx) {
        Ok(mut res) => {
            if ctx.run_mode == RunTxMode::Check {
                ctx.state.write().discard_session();
                ctx.truncate_events(events_before);
                return Ok(res);
            }
            ctx.state.write().commit_session();
            res.events = ctx.events.read()[events_before..].to_vec();
            Ok(res)
        }
        Err(e) => {
            ctx.state.write().discard_session();
            ctx.truncate_events(events_before);
            Err(e)
        }
    }
}

/// Action execution result in the transaction.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct ActionResult {
    /// code: 0 is succeed, others is failed
    pub code: u32,
    /// Data is any data returned from message or handler execution.
    pub data: Vec<u8>,
    /// Log contains the log information from message or handler execution.
    pub log: String,
    /// Events contains a slice of Event objects that were emitted during message
    /// or handler execution.
    pub events: Vec<EventRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::sync::Arc;
    use storage::{db::MemDB, state::ChainState};

    struct Counter;

    impl Executable for Counter {
        type Origin = ();
        type Call = u8;

        fn execute(_origin: Option<()>, call: u8, ctx: &Context) -> Result<ActionResult> {
            ctx.state.write().set(b"counter", vec![call]);
            ctx.emit_event(EventRecord {
                type_: "counter_Set".to_string(),
                attributes: vec![],
            });
            if call > 100 {
                return Err(eg!("too large"));
            }
            Ok(ActionResult {
                data: vec![call],
                ..Default::default()
            })
        }
    }

    fn new_context() -> Context {
        let cs = ChainState::new(MemDB::new(), "test_db".to_string());
        Context::new(Arc::new(RwLock::new(cs)))
    }

    #[test]
    fn failed_action_is_rolled_back() {
        let ctx = new_context();
        let res = apply_action::<Counter>(&ctx, None, 1).unwrap();
        assert_eq!(res.data, vec![1]);
        assert_eq!(res.events.len(), 1);

        assert!(apply_action::<Counter>(&ctx, None, 200).is_err());
        assert_eq!(ctx.state.read().get(b"counter").unwrap(), Some(vec![1]));
        assert_eq!(ctx.events_len(), 1);
    }

    #[test]
    fn check_mode_never_writes() {
        let mut ctx = new_context();
        ctx.run_mode = RunTxMode::Check;
        assert!(apply_action::<Counter>(&ctx, None, 7).is_ok());
        assert_eq!(ctx.state.read().get(b"counter").unwrap(), None);
        assert_eq!(ctx.events_len(), 0);
    }
}
