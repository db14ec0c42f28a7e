use cosmwasm_std::{Coin, Timestamp};

use crate::config::NetworkEntry;

/// One round of contract reads, stored verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSnapshot {
    pub account_balance: u64,
    pub reveal_time: Timestamp,
    pub max_supply: u64,
    pub total_supply: u64,
    pub cost: Coin,
    pub paused: bool,
    pub whitelisted: bool,
}

impl ChainSnapshot {
    pub fn available_to_mint(&self) -> u64 {
        self.max_supply.saturating_sub(self.total_supply)
    }

    /// Client-side gate only, the contract re-validates every mint
    pub fn mint_allowed(&self) -> bool {
        !self.paused && self.whitelisted
    }
}

/// Everything the UI renders from. Only the owning [`crate::DApp`] mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub account: Option<String>,
    pub contract: Option<String>,
    pub network: Option<NetworkEntry>,
    pub chain: Option<ChainSnapshot>,
    pub is_loading: bool,
    /// A mint submitted from this state is waiting for confirmation
    pub is_waiting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            account: None,
            contract: None,
            network: None,
            chain: None,
            is_loading: true,
            is_waiting: false,
        }
    }
}

impl AppState {
    /// Drop everything read from the chain
    pub fn clear(&mut self) {
        self.account = None;
        self.contract = None;
        self.network = None;
        self.chain = None;
    }
}
