use std::path::Path;

use ::config::{Config, Environment, File};
use cosmwasm_std::{coin, Addr, Coin, Timestamp, Uint128};
use log::info;
use punks_nft::msg::InstantiateMsg;
use serde::Deserialize;
use thiserror::Error;

use crate::local_chain::LocalChain;

pub const DEFAULT_NAME: &str = "DAPP Punks";
pub const DEFAULT_SYMBOL: &str = "DPP";
pub const DEFAULT_COST: u128 = 1_000;
pub const DEFAULT_MAX_SUPPLY: u64 = 25;
/// 2024-05-22T06:50:45Z
pub const DEFAULT_MINT_DATE: u64 = 1_716_360_645;
pub const DEFAULT_IPFS_URI: &str = "ipfs://QmQPEMsfd1tJnqYPbnTQCjoa8vczfsV1FmqZWgRdNQ7z3g/";

const DEPLOY_ENV_PREFIX: &str = "PUNKS_DEPLOY";

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Chain(#[from] anyhow::Error),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeployParams {
    pub name: String,
    pub symbol: String,
    pub cost: Coin,
    pub max_supply: u64,
    pub mint_date: Timestamp,
    pub ipfs_uri: String,
    pub whitelist_enabled: bool,
    pub whitelist: Vec<String>,
}

/// File or environment overrides, every field optional
#[derive(Debug, Default, Deserialize)]
struct DeployOverrides {
    name: Option<String>,
    symbol: Option<String>,
    /// Base units, an integer or a decimal string
    cost: Option<Uint128>,
    max_supply: Option<u64>,
    mint_date: Option<u64>,
    ipfs_uri: Option<String>,
    whitelist_enabled: Option<bool>,
    whitelist: Option<Vec<String>>,
}

impl DeployParams {
    /// Collection defaults, priced in `denom`
    pub fn with_denom(denom: &str) -> Self {
        DeployParams {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            cost: coin(DEFAULT_COST, denom),
            max_supply: DEFAULT_MAX_SUPPLY,
            mint_date: Timestamp::from_seconds(DEFAULT_MINT_DATE),
            ipfs_uri: DEFAULT_IPFS_URI.to_string(),
            whitelist_enabled: false,
            whitelist: vec![],
        }
    }

    /// Defaults overridden by an optional file and `PUNKS_DEPLOY_*` variables
    pub fn load(path: Option<&Path>, denom: &str) -> Result<Self, DeployError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let overrides: DeployOverrides = builder
            .add_source(
                Environment::with_prefix(DEPLOY_ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("whitelist"),
            )
            .build()?
            .try_deserialize()?;

        Ok(Self::with_denom(denom).apply(overrides))
    }

    fn apply(mut self, overrides: DeployOverrides) -> Self {
        if let Some(name) = overrides.name {
            self.name = name;
        }
        if let Some(symbol) = overrides.symbol {
            self.symbol = symbol;
        }
        if let Some(cost) = overrides.cost {
            self.cost.amount = cost;
        }
        if let Some(max_supply) = overrides.max_supply {
            self.max_supply = max_supply;
        }
        if let Some(mint_date) = overrides.mint_date {
            self.mint_date = Timestamp::from_seconds(mint_date);
        }
        if let Some(ipfs_uri) = overrides.ipfs_uri {
            self.ipfs_uri = ipfs_uri;
        }
        if let Some(enabled) = overrides.whitelist_enabled {
            self.whitelist_enabled = enabled;
        }
        if let Some(whitelist) = overrides.whitelist {
            self.whitelist = whitelist;
        }
        self
    }

    pub fn mint_date(mut self, mint_date: Timestamp) -> Self {
        self.mint_date = mint_date;
        self
    }

    pub fn cost(mut self, cost: Coin) -> Self {
        self.cost = cost;
        self
    }

    pub fn max_supply(mut self, max_supply: u64) -> Self {
        self.max_supply = max_supply;
        self
    }

    pub fn whitelist(mut self, addresses: Vec<String>) -> Self {
        self.whitelist_enabled = true;
        self.whitelist = addresses;
        self
    }

    pub fn into_msg(self) -> InstantiateMsg {
        InstantiateMsg {
            name: self.name,
            symbol: self.symbol,
            cost: self.cost,
            max_supply: self.max_supply,
            allow_minting_on: self.mint_date,
            base_uri: self.ipfs_uri,
            base_extension: None,
            whitelist_enabled: Some(self.whitelist_enabled),
            whitelist: Some(self.whitelist),
        }
    }
}

/// Instantiate the collection from `deployer`, who becomes its owner
pub fn deploy(
    chain: &LocalChain,
    deployer: &str,
    params: DeployParams,
) -> Result<Addr, DeployError> {
    let label = params.name.clone();
    let msg = params.into_msg();
    let addr = chain.instantiate_punks(deployer, &msg, &label)?;
    info!("Deployed {} ({}) at {}", msg.name, msg.symbol, addr);
    Ok(addr)
}
