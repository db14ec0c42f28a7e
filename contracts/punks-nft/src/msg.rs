use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Timestamp};
use cw721::{ContractInfoResponse, NumTokensResponse, OwnerOfResponse};
use cw_controllers::AdminResponse;

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub cost: Coin,
    pub max_supply: u64,
    pub allow_minting_on: Timestamp,
    pub base_uri: String,
    /// Defaults to `.json`
    pub base_extension: Option<String>,
    pub whitelist_enabled: Option<bool>,
    pub whitelist: Option<Vec<String>>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint `mint_amount` tokens to the sender, paying `cost * mint_amount`
    Mint { mint_amount: u32 },
    /// Send the collected mint proceeds to the owner
    Withdraw {},
    SetCost { cost: Coin },
    SetPaused { paused: bool },
    SetWhitelistEnabled { enabled: bool },
    AddToWhitelist { addresses: Vec<String> },
    RemoveFromWhitelist { addresses: Vec<String> },
    /// Move a token to another account, only the token owner can call this
    TransferNft { recipient: String, token_id: u64 },
    /// Hand the contract over to a new owner, or renounce ownership with `None`
    UpdateOwner { owner: Option<String> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(String)]
    Name {},
    #[returns(String)]
    Symbol {},
    #[returns(ContractInfoResponse)]
    ContractInfo {},
    #[returns(Coin)]
    Cost {},
    #[returns(u64)]
    MaxSupply {},
    #[returns(u64)]
    TotalSupply {},
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(u64)]
    BalanceOf { owner: String },
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
    #[returns(String)]
    TokenUri { token_id: u64 },
    #[returns(Timestamp)]
    AllowMintingOn {},
    #[returns(bool)]
    Paused {},
    /// True if the address may mint under the current allow-list setting
    #[returns(bool)]
    Whitelisted { address: String },
    #[returns(Vec<u64>)]
    WalletOfOwner { owner: String },
    #[returns(String)]
    BaseUri {},
    #[returns(AdminResponse)]
    Owner {},
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub config: Config,
    pub paused: bool,
    pub total_supply: u64,
}

#[cw_serde]
pub struct MigrateMsg {}
