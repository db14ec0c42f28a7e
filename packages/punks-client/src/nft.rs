use cosmwasm_std::{from_binary, to_binary, Coin, Timestamp};
use cw721::OwnerOfResponse;
use punks_nft::msg::{ExecuteMsg, QueryMsg};
use serde::de::DeserializeOwned;

use crate::provider::{PendingTransaction, ProviderResult, Signer, TxRequest, WalletProvider};

/// Read-only handle on a deployed collection
#[derive(Debug)]
pub struct NftClient<'a, P: WalletProvider + ?Sized> {
    address: String,
    provider: &'a P,
}

impl<'a, P: WalletProvider + ?Sized> NftClient<'a, P> {
    pub fn new(address: impl Into<String>, provider: &'a P) -> Self {
        NftClient {
            address: address.into(),
            provider,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Pair the handle with a signer so it can submit transactions
    pub fn connect(&self, signer: Box<dyn Signer>) -> SignedNftClient {
        SignedNftClient {
            address: self.address.clone(),
            signer,
        }
    }

    async fn query<T: DeserializeOwned>(&self, msg: &QueryMsg) -> ProviderResult<T> {
        let res = self
            .provider
            .query_smart(&self.address, to_binary(msg)?)
            .await?;
        Ok(from_binary(&res)?)
    }

    pub async fn name(&self) -> ProviderResult<String> {
        self.query(&QueryMsg::Name {}).await
    }

    pub async fn symbol(&self) -> ProviderResult<String> {
        self.query(&QueryMsg::Symbol {}).await
    }

    pub async fn cost(&self) -> ProviderResult<Coin> {
        self.query(&QueryMsg::Cost {}).await
    }

    pub async fn max_supply(&self) -> ProviderResult<u64> {
        self.query(&QueryMsg::MaxSupply {}).await
    }

    pub async fn total_supply(&self) -> ProviderResult<u64> {
        self.query(&QueryMsg::TotalSupply {}).await
    }

    pub async fn balance_of(&self, owner: &str) -> ProviderResult<u64> {
        self.query(&QueryMsg::BalanceOf {
            owner: owner.to_string(),
        })
        .await
    }

    pub async fn owner_of(&self, token_id: u64) -> ProviderResult<String> {
        let res: OwnerOfResponse = self.query(&QueryMsg::OwnerOf { token_id }).await?;
        Ok(res.owner)
    }

    pub async fn token_uri(&self, token_id: u64) -> ProviderResult<String> {
        self.query(&QueryMsg::TokenUri { token_id }).await
    }

    pub async fn allow_minting_on(&self) -> ProviderResult<Timestamp> {
        self.query(&QueryMsg::AllowMintingOn {}).await
    }

    pub async fn paused(&self) -> ProviderResult<bool> {
        self.query(&QueryMsg::Paused {}).await
    }

    pub async fn whitelisted(&self, address: &str) -> ProviderResult<bool> {
        self.query(&QueryMsg::Whitelisted {
            address: address.to_string(),
        })
        .await
    }

    pub async fn wallet_of_owner(&self, owner: &str) -> ProviderResult<Vec<u64>> {
        self.query(&QueryMsg::WalletOfOwner {
            owner: owner.to_string(),
        })
        .await
    }
}

/// Collection handle able to submit transactions
#[derive(Debug)]
pub struct SignedNftClient {
    address: String,
    signer: Box<dyn Signer>,
}

impl SignedNftClient {
    pub async fn mint(
        &self,
        mint_amount: u32,
        payment: Vec<Coin>,
    ) -> ProviderResult<Box<dyn PendingTransaction>> {
        let tx = TxRequest {
            contract: self.address.clone(),
            msg: to_binary(&ExecuteMsg::Mint { mint_amount })?,
            funds: payment,
        };
        self.signer.send_transaction(tx).await
    }
}
