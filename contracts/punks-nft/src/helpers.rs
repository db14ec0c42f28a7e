use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Addr, Coin, CosmosMsg, QuerierWrapper, QueryRequest, StdResult, Timestamp,
    WasmMsg, WasmQuery,
};
use serde::de::DeserializeOwned;

use crate::contract::mint_price;
use crate::msg::{ExecuteMsg, QueryMsg};
use crate::ContractError;

/// PunksContract is a wrapper around Addr that provides a lot of helpers
#[cw_serde]
pub struct PunksContract(pub Addr);

impl PunksContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<ExecuteMsg>>(&self, msg: T, funds: Vec<Coin>) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds,
        }
        .into())
    }

    /// Mint message carrying exactly `cost * mint_amount`
    pub fn mint(&self, cost: &Coin, mint_amount: u32) -> Result<CosmosMsg, ContractError> {
        let price = mint_price(cost, mint_amount)?;
        let funds = if price.amount.is_zero() {
            vec![]
        } else {
            vec![price]
        };
        Ok(self.call(ExecuteMsg::Mint { mint_amount }, funds)?)
    }

    fn query<T: DeserializeOwned>(&self, querier: &QuerierWrapper, msg: &QueryMsg) -> StdResult<T> {
        querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(msg)?,
        }))
    }

    pub fn cost(&self, querier: &QuerierWrapper) -> StdResult<Coin> {
        self.query(querier, &QueryMsg::Cost {})
    }

    pub fn total_supply(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        self.query(querier, &QueryMsg::TotalSupply {})
    }

    pub fn max_supply(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        self.query(querier, &QueryMsg::MaxSupply {})
    }

    pub fn allow_minting_on(&self, querier: &QuerierWrapper) -> StdResult<Timestamp> {
        self.query(querier, &QueryMsg::AllowMintingOn {})
    }

    pub fn balance_of(&self, querier: &QuerierWrapper, owner: &str) -> StdResult<u64> {
        self.query(
            querier,
            &QueryMsg::BalanceOf {
                owner: owner.to_string(),
            },
        )
    }

    pub fn whitelisted(&self, querier: &QuerierWrapper, address: &str) -> StdResult<bool> {
        self.query(
            querier,
            &QueryMsg::Whitelisted {
                address: address.to_string(),
            },
        )
    }
}
