use std::{collections::HashMap, path::Path};

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variables with this prefix override file values,
/// e.g. `PUNKS__LOCAL__NFT__ADDRESS`.
pub const ENV_PREFIX: &str = "PUNKS";

pub const DEFAULT_PREVIEW_IMAGE: &str = "preview.png";
pub const DEFAULT_IMAGE_BASE: &str =
    "https://gateway.pinata.cloud/ipfs/QmQPEMsfd1tJnqYPbnTQCjoa8vczfsV1FmqZWgRdNQ7z3g/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] ::config::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    pub address: String,
}

/// Native currency of a network, used to display prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub denom: String,
    pub display: String,
    pub decimals: u32,
}

impl Default for Currency {
    fn default() -> Self {
        Currency {
            denom: "ucosm".to_string(),
            display: "COSM".to_string(),
            decimals: 6,
        }
    }
}

/// Deployment of the collection on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    pub nft: ContractEntry,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default = "default_preview_image")]
    pub preview_image: String,
    #[serde(default = "default_image_base")]
    pub image_base: String,
}

impl NetworkEntry {
    pub fn new(address: impl Into<String>) -> Self {
        NetworkEntry {
            nft: ContractEntry {
                address: address.into(),
            },
            currency: Currency::default(),
            preview_image: default_preview_image(),
            image_base: default_image_base(),
        }
    }
}

fn default_preview_image() -> String {
    DEFAULT_PREVIEW_IMAGE.to_string()
}

fn default_image_base() -> String {
    DEFAULT_IMAGE_BASE.to_string()
}

/// Static map from chain id to deployment. Chain ids are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    networks: HashMap<String, NetworkEntry>,
}

impl NetworkConfig {
    /// Load from a JSON or TOML file (picked by extension) with environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Self::from_settings(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let networks: HashMap<String, NetworkEntry> = settings.try_deserialize()?;
        Ok(NetworkConfig {
            networks: networks
                .into_iter()
                .map(|(chain_id, entry)| (chain_id.to_lowercase(), entry))
                .collect(),
        })
    }

    pub fn get(&self, chain_id: &str) -> Option<&NetworkEntry> {
        self.networks.get(&chain_id.to_lowercase())
    }

    pub fn insert(&mut self, chain_id: &str, entry: NetworkEntry) {
        self.networks.insert(chain_id.to_lowercase(), entry);
    }
}
