use crate::genesis::GenesisState;
use crate::{App, Config, MODULE_NAME};
use fp_core::{context::Context, macros::Get, module::AppModuleBasic};
use ruc::*;

impl<C: Config> AppModuleBasic for App<C> {
    fn name() -> String {
        MODULE_NAME.into()
    }

    fn default_genesis(&self) -> Vec<u8> {
        serde_json::to_vec(&GenesisState::new(C::DefaultParams::get())).unwrap_or_default()
    }

    fn validate_genesis(&self, genesis: &[u8]) -> Result<()> {
        let genesis = serde_json::from_slice::<GenesisState>(genesis).c(d!())?;
        genesis.validate()
    }

    fn init_genesis(&self, ctx: &Context, genesis: &[u8]) -> Result<()> {
        let genesis = serde_json::from_slice::<GenesisState>(genesis).c(d!())?;
        Self::init_genesis_state(ctx, &genesis)
    }

    fn export_genesis(&self, ctx: &Context) -> Result<Vec<u8>> {
        let genesis = Self::export_genesis_state(ctx)?;
        serde_json::to_vec(&genesis).c(d!())
    }
}
