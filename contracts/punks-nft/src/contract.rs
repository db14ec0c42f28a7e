#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coin, Addr, BankMsg, Coin, Deps, DepsMut, Empty, Env, Event, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_utils::{may_pay, nonpayable};
use semver::Version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg};
use crate::state::{
    Config, BALANCES, CONFIG, DEFAULT_BASE_EXTENSION, OWNER, PAUSED, TOKEN_OWNERS, TOTAL_SUPPLY,
    WALLETS, WHITELIST,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:punks-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.max_supply == 0 {
        return Err(ContractError::InvalidMaxSupply {});
    }
    if msg.cost.denom.is_empty() {
        return Err(ContractError::InvalidCost {});
    }

    let config = Config {
        name: msg.name,
        symbol: msg.symbol,
        cost: msg.cost,
        max_supply: msg.max_supply,
        allow_minting_on: msg.allow_minting_on,
        base_uri: msg.base_uri,
        base_extension: msg
            .base_extension
            .unwrap_or_else(|| DEFAULT_BASE_EXTENSION.to_string()),
        whitelist_enabled: msg.whitelist_enabled.unwrap_or(false),
    };
    CONFIG.save(deps.storage, &config)?;
    PAUSED.save(deps.storage, &false)?;
    TOTAL_SUPPLY.save(deps.storage, &0u64)?;
    OWNER.set(deps.branch(), Some(info.sender.clone()))?;

    let mut addresses = msg.whitelist.unwrap_or_default();
    addresses.sort_unstable();
    addresses.dedup();
    for address in addresses.iter() {
        let addr = deps.api.addr_validate(address)?;
        WHITELIST.save(deps.storage, &addr, &Empty {})?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("max_supply", config.max_supply.to_string())
        .add_attribute("cost", config.cost.to_string())
        .add_attribute("whitelisted", addresses.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let api = deps.api;

    match msg {
        ExecuteMsg::Mint { mint_amount } => execute_mint(deps, env, info, mint_amount),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
        ExecuteMsg::SetCost { cost } => execute_set_cost(deps, info, cost),
        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),
        ExecuteMsg::SetWhitelistEnabled { enabled } => {
            execute_set_whitelist_enabled(deps, info, enabled)
        }
        ExecuteMsg::AddToWhitelist { addresses } => {
            execute_add_to_whitelist(deps, info, addresses)
        }
        ExecuteMsg::RemoveFromWhitelist { addresses } => {
            execute_remove_from_whitelist(deps, info, addresses)
        }
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, info, api.addr_validate(&recipient)?, token_id),
        ExecuteMsg::UpdateOwner { owner } => {
            nonpayable(&info)?;
            let owner = owner.map(|o| api.addr_validate(&o)).transpose()?;
            Ok(OWNER.execute_update_admin(deps, info, owner)?)
        }
    }
}

/// Total price for `mint_amount` tokens at `cost` each
pub fn mint_price(cost: &Coin, mint_amount: u32) -> Result<Coin, ContractError> {
    let amount = cost.amount.checked_mul(Uint128::from(mint_amount))?;
    Ok(coin(amount.u128(), &cost.denom))
}

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    mint_amount: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if PAUSED.load(deps.storage)? {
        return Err(ContractError::MintingPaused {});
    }
    if !passes_whitelist(deps.as_ref(), &config, &info.sender) {
        return Err(ContractError::NotWhitelisted {});
    }
    if env.block.time < config.allow_minting_on {
        return Err(ContractError::MintingNotStarted(config.allow_minting_on));
    }
    if mint_amount == 0 {
        return Err(ContractError::InvalidMintAmount {});
    }

    let price = mint_price(&config.cost, mint_amount)?;
    let payment = may_pay(&info, &config.cost.denom)?;
    if payment < price.amount {
        return Err(ContractError::InsufficientPayment {
            expected: price,
            got: coin(payment.u128(), &config.cost.denom),
        });
    }

    let supply = TOTAL_SUPPLY.load(deps.storage)?;
    let remaining = config.max_supply.saturating_sub(supply);
    if u64::from(mint_amount) > remaining {
        return Err(ContractError::MaxSupplyExceeded { remaining });
    }

    let minter = info.sender;
    let mut events = Vec::with_capacity(mint_amount as usize);
    for token_id in supply + 1..=supply + u64::from(mint_amount) {
        TOKEN_OWNERS.save(deps.storage, token_id, &minter)?;
        WALLETS.save(deps.storage, (&minter, token_id), &Empty {})?;
        events.push(
            Event::new("mint")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("minter", minter.to_string()),
        );
    }
    BALANCES.update(deps.storage, &minter, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default() + u64::from(mint_amount))
    })?;
    TOTAL_SUPPLY.save(deps.storage, &(supply + u64::from(mint_amount)))?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("minter", minter)
        .add_attribute("mint_amount", mint_amount.to_string())
        .add_attribute("payment", payment.to_string())
        .add_events(events))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;

    // every denom, proceeds may predate a cost change
    let balances = deps.querier.query_all_balances(&env.contract.address)?;
    if balances.is_empty() {
        return Err(ContractError::NothingToWithdraw {});
    }

    let amount = balances
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let msg = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: balances,
    };
    let event = Event::new("withdraw")
        .add_attribute("amount", amount)
        .add_attribute("owner", info.sender);
    Ok(Response::new().add_message(msg).add_event(event))
}

pub fn execute_set_cost(
    deps: DepsMut,
    info: MessageInfo,
    cost: Coin,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;
    if cost.denom.is_empty() {
        return Err(ContractError::InvalidCost {});
    }

    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.cost = cost.clone();
        Ok(config)
    })?;

    let event = Event::new("set_cost")
        .add_attribute("cost", cost.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;

    PAUSED.save(deps.storage, &paused)?;

    let event = Event::new("set_paused")
        .add_attribute("paused", paused.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_set_whitelist_enabled(
    deps: DepsMut,
    info: MessageInfo,
    enabled: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;

    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.whitelist_enabled = enabled;
        Ok(config)
    })?;

    let event = Event::new("set_whitelist_enabled")
        .add_attribute("enabled", enabled.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_add_to_whitelist(
    deps: DepsMut,
    info: MessageInfo,
    mut addresses: Vec<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;

    // dedupe
    addresses.sort_unstable();
    addresses.dedup();

    for address in addresses.iter() {
        let addr = deps.api.addr_validate(address)?;
        if WHITELIST.has(deps.storage, &addr) {
            return Err(ContractError::AddressAlreadyWhitelisted {
                addr: addr.to_string(),
            });
        }
        WHITELIST.save(deps.storage, &addr, &Empty {})?;
    }

    let event = Event::new("add_to_whitelist")
        .add_attribute("count", addresses.len().to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_remove_from_whitelist(
    deps: DepsMut,
    info: MessageInfo,
    mut addresses: Vec<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;

    // dedupe
    addresses.sort_unstable();
    addresses.dedup();

    for address in addresses.iter() {
        let addr = deps.api.addr_validate(address)?;
        if !WHITELIST.has(deps.storage, &addr) {
            return Err(ContractError::AddressNotWhitelisted {
                addr: addr.to_string(),
            });
        }
        WHITELIST.remove(deps.storage, &addr);
    }

    let event = Event::new("remove_from_whitelist")
        .add_attribute("count", addresses.len().to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_transfer_nft(
    deps: DepsMut,
    info: MessageInfo,
    recipient: Addr,
    token_id: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let owner = TOKEN_OWNERS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::TokenNotFound(token_id))?;
    if owner != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    TOKEN_OWNERS.save(deps.storage, token_id, &recipient)?;
    WALLETS.remove(deps.storage, (&owner, token_id));
    WALLETS.save(deps.storage, (&recipient, token_id), &Empty {})?;
    BALANCES.update(deps.storage, &owner, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().saturating_sub(1))
    })?;
    BALANCES.update(deps.storage, &recipient, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default() + 1)
    })?;

    let event = Event::new("transfer_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("sender", owner)
        .add_attribute("recipient", recipient);
    Ok(Response::new().add_event(event))
}

/// True when `config` lets `address` through the allow-list gate
pub fn passes_whitelist(deps: Deps, config: &Config, address: &Addr) -> bool {
    !config.whitelist_enabled || WHITELIST.has(deps.storage, address)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let current_version = cw2::get_contract_version(deps.storage)?;
    if current_version.contract != CONTRACT_NAME {
        return Err(StdError::generic_err("Cannot upgrade to a different contract").into());
    }
    let version: Version = current_version
        .version
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;
    let new_version: Version = CONTRACT_VERSION
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;

    if version > new_version {
        return Err(StdError::generic_err("Cannot upgrade to a previous contract version").into());
    }
    // if same version return
    if version == new_version {
        return Ok(Response::new());
    }

    // set new contract version
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}
