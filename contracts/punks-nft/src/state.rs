use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Empty, Timestamp};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};

pub const DEFAULT_BASE_EXTENSION: &str = ".json";

#[cw_serde]
pub struct Config {
    pub name: String,
    pub symbol: String,
    /// Price of a single token
    pub cost: Coin,
    pub max_supply: u64,
    /// Block time from which minting is accepted
    pub allow_minting_on: Timestamp,
    pub base_uri: String,
    pub base_extension: String,
    /// When false every address passes the allow-list gate
    pub whitelist_enabled: bool,
}

impl Config {
    pub fn token_uri(&self, token_id: u64) -> String {
        format!("{}{}{}", self.base_uri, token_id, self.base_extension)
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Controls if minting is paused or not by the owner
pub const PAUSED: Item<bool> = Item::new("paused");

pub const TOTAL_SUPPLY: Item<u64> = Item::new("total_supply");

/// Contract owner, receives withdrawals
pub const OWNER: Admin = Admin::new("owner");

/// token id -> owner
pub const TOKEN_OWNERS: Map<u64, Addr> = Map::new("to");

/// owner -> number of tokens held
pub const BALANCES: Map<&Addr, u64> = Map::new("bal");

/// (owner, token id), used to enumerate a wallet
pub const WALLETS: Map<(&Addr, u64), Empty> = Map::new("wal");

/// Allow-listed addresses
pub const WHITELIST: Map<&Addr, Empty> = Map::new("wl");
