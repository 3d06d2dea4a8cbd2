use crate::context::Context;
use fp_types::staking::VoteInfo;
use ruc::Result;
use serde::{Deserialize, Serialize};

/// Read-only query sent to a module, `data` is json.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestQuery {
    pub path: String,
    pub data: Vec<u8>,
}

/// code: 0 is succeed, others is failed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseQuery {
    pub code: u32,
    pub log: String,
    pub value: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBeginBlock {
    /// Votes of the last commit, with the power each validator had then.
    pub votes: Vec<VoteInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEndBlock {
    pub height: u64,
}

/// AppModuleBasic is the standard form for basic non-dependant elements of an application module.
pub trait AppModuleBasic {
    /// Returns the module's name.
    fn name() -> String;

    /// Returns default genesis state as raw bytes for the module.
    fn default_genesis(&self) -> Vec<u8>;

    /// Performs genesis state validation for the module.
    fn validate_genesis(&self, genesis: &[u8]) -> Result<()>;

    /// Performs genesis initialization for the module.
    fn init_genesis(&self, ctx: &Context, genesis: &[u8]) -> Result<()>;

    /// Returns the exported genesis state as raw bytes for the module.
    fn export_genesis(&self, ctx: &Context) -> Result<Vec<u8>>;
}

/// AppModule is the standard form for an application module
pub trait AppModule: AppModuleBasic {
    /// query_route returns the application module's query response.
    fn query_route(
        &self,
        _ctx: Context,
        _path: Vec<&str>,
        _req: &RequestQuery,
    ) -> ResponseQuery {
        Default::default()
    }

    /// Called at the start of processing a block of transactions.
    fn begin_block(&mut self, _ctx: &mut Context, _req: &RequestBeginBlock) -> Result<()> {
        Ok(())
    }

    /// Called at the end of the block.
    fn end_block(&mut self, _ctx: &mut Context, _req: &RequestEndBlock) -> Result<()> {
        Ok(())
    }
}
