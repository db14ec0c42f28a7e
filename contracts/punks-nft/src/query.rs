#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, Env, Order, StdError, StdResult};
use cw721::{ContractInfoResponse, NumTokensResponse, OwnerOfResponse};

use crate::{
    contract::passes_whitelist,
    msg::{ConfigResponse, QueryMsg},
    state::{BALANCES, CONFIG, OWNER, PAUSED, TOKEN_OWNERS, TOTAL_SUPPLY, WALLETS},
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Name {} => to_binary(&CONFIG.load(deps.storage)?.name),
        QueryMsg::Symbol {} => to_binary(&CONFIG.load(deps.storage)?.symbol),
        QueryMsg::ContractInfo {} => to_binary(&query_contract_info(deps)?),
        QueryMsg::Cost {} => to_binary(&CONFIG.load(deps.storage)?.cost),
        QueryMsg::MaxSupply {} => to_binary(&CONFIG.load(deps.storage)?.max_supply),
        QueryMsg::TotalSupply {} => to_binary(&TOTAL_SUPPLY.load(deps.storage)?),
        QueryMsg::NumTokens {} => to_binary(&NumTokensResponse {
            count: TOTAL_SUPPLY.load(deps.storage)?,
        }),
        QueryMsg::BalanceOf { owner } => to_binary(&query_balance_of(deps, owner)?),
        QueryMsg::OwnerOf { token_id } => to_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::TokenUri { token_id } => to_binary(&query_token_uri(deps, token_id)?),
        QueryMsg::AllowMintingOn {} => to_binary(&CONFIG.load(deps.storage)?.allow_minting_on),
        QueryMsg::Paused {} => to_binary(&PAUSED.load(deps.storage)?),
        QueryMsg::Whitelisted { address } => to_binary(&query_whitelisted(deps, address)?),
        QueryMsg::WalletOfOwner { owner } => to_binary(&query_wallet_of_owner(deps, owner)?),
        QueryMsg::BaseUri {} => to_binary(&CONFIG.load(deps.storage)?.base_uri),
        QueryMsg::Owner {} => to_binary(&OWNER.query_admin(deps)?),
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
    }
}

fn query_contract_info(deps: Deps) -> StdResult<ContractInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ContractInfoResponse {
        name: config.name,
        symbol: config.symbol,
    })
}

pub fn query_balance_of(deps: Deps, owner: String) -> StdResult<u64> {
    let owner = deps.api.addr_validate(&owner)?;
    Ok(BALANCES.may_load(deps.storage, &owner)?.unwrap_or_default())
}

pub fn query_owner_of(deps: Deps, token_id: u64) -> StdResult<OwnerOfResponse> {
    let owner = TOKEN_OWNERS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| StdError::not_found(format!("token {}", token_id)))?;
    Ok(OwnerOfResponse {
        owner: owner.to_string(),
        approvals: vec![],
    })
}

pub fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<String> {
    if !TOKEN_OWNERS.has(deps.storage, token_id) {
        return Err(StdError::generic_err(format!(
            "URI query for nonexistent token {}",
            token_id
        )));
    }
    let config = CONFIG.load(deps.storage)?;
    Ok(config.token_uri(token_id))
}

pub fn query_whitelisted(deps: Deps, address: String) -> StdResult<bool> {
    let addr = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;
    Ok(passes_whitelist(deps, &config, &addr))
}

pub fn query_wallet_of_owner(deps: Deps, owner: String) -> StdResult<Vec<u64>> {
    let owner = deps.api.addr_validate(&owner)?;
    WALLETS
        .prefix(&owner)
        .keys(deps.storage, None, None, Order::Ascending)
        .collect()
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    Ok(ConfigResponse {
        config: CONFIG.load(deps.storage)?,
        paused: PAUSED.load(deps.storage)?,
        total_supply: TOTAL_SUPPLY.load(deps.storage)?,
    })
}
