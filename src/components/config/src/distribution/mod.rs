use {
    ruc::*,
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

/// Settings of the distribution module that are not governance params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Every collected fee is swapped into this denom before allocation.
    pub base_denom: String,

    /// Module account the fees of a block are collected into.
    pub fee_collector: String,

    /// Module whose account may update params and spend the community pool.
    pub authority_module: String,

    /// Bech32 address overriding `authority_module`.
    pub authority: Option<String>,

    /// Run every invariant each `n` blocks, 0 disables the checks.
    pub invariant_check_period: u64,

    /// Accepted overshoot, in smallest decimal units per denom, of a tracked
    /// delegation stake over the stake computed from shares.
    pub stake_drift_margin_ulps: u64,

    /// Genesis default of `Params::community_tax`.
    pub community_tax: String,

    /// Genesis default of `Params::withdraw_addr_enabled`.
    pub withdraw_addr_enabled: bool,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        DistributionConfig {
            base_denom: "ufra".to_owned(),
            fee_collector: "fee_collector".to_owned(),
            authority_module: "gov".to_owned(),
            authority: None,
            invariant_check_period: 0,
            stake_drift_margin_ulps: 3,
            community_tax: "0.02".to_owned(),
            withdraw_addr_enabled: true,
        }
    }
}

impl DistributionConfig {
    /// Loads a toml file, json is accepted as well.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DistributionConfig> {
        let contents = fs::read_to_string(path).c(d!())?;
        match toml::from_str::<DistributionConfig>(&contents) {
            Ok(cfg) => Ok(cfg),
            Err(_) => serde_json::from_str(&contents).c(d!("neither toml nor json")),
        }
    }
}

pub mod global_cfg {
    use super::DistributionConfig;
    use lazy_static::lazy_static;
    use ruc::*;
    use std::env;

    lazy_static! {
        /// Global distribution config.
        pub static ref CFG: DistributionConfig = pnk!(get_config());
    }

    fn get_config() -> Result<DistributionConfig> {
        let mut cfg = match env::var("DISTR_CONFIG_FILE") {
            Ok(path) => DistributionConfig::from_file(path).c(d!())?,
            Err(_) => DistributionConfig::default(),
        };

        if let Ok(v) = env::var("DISTR_BASE_DENOM") {
            cfg.base_denom = v;
        }
        if let Ok(v) = env::var("DISTR_FEE_COLLECTOR") {
            cfg.fee_collector = v;
        }
        if let Ok(v) = env::var("DISTR_AUTHORITY") {
            cfg.authority = Some(v);
        }
        if let Ok(v) = env::var("DISTR_INV_CHECK_PERIOD") {
            cfg.invariant_check_period = v.parse::<u64>().c(d!())?;
        }
        if let Ok(v) = env::var("DISTR_STAKE_DRIFT_MARGIN") {
            cfg.stake_drift_margin_ulps = v.parse::<u64>().c(d!())?;
        }

        Ok(cfg)
    }
}
