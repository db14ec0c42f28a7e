use log::{debug, error, info, warn};
use thiserror::Error;

use crate::{
    config::{NetworkConfig, NetworkEntry},
    nft::NftClient,
    provider::{ProviderError, WalletProvider},
    state::{AppState, ChainSnapshot},
};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

struct Loaded {
    account: String,
    contract: String,
    network: NetworkEntry,
    chain: ChainSnapshot,
}

/// Reads the collection state for the connected wallet
#[derive(Debug, Clone)]
pub struct StateLoader {
    config: NetworkConfig,
}

impl StateLoader {
    pub fn new(config: NetworkConfig) -> Self {
        StateLoader { config }
    }

    /// Run one load cycle. Any failed read fails the whole cycle and leaves no
    /// partial state behind; `is_loading` is cleared in every case.
    pub async fn load<P: WalletProvider + ?Sized>(
        &self,
        provider: &P,
        state: &mut AppState,
    ) -> Result<(), LoadError> {
        state.is_loading = true;
        let res = self.read(provider).await;
        state.is_loading = false;

        match res {
            Ok(Some(loaded)) => {
                state.account = Some(loaded.account);
                state.contract = Some(loaded.contract);
                state.network = Some(loaded.network);
                state.chain = Some(loaded.chain);
                Ok(())
            }
            Ok(None) => {
                state.clear();
                Ok(())
            }
            Err(err) => {
                state.clear();
                Err(err)
            }
        }
    }

    /// UI-facing load: failures are logged, never returned
    pub async fn refresh<P: WalletProvider + ?Sized>(&self, provider: &P, state: &mut AppState) {
        if let Err(err) = self.load(provider, state).await {
            error!("Failed to load blockchain data: {}", err);
        }
    }

    async fn read<P: WalletProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<Option<Loaded>, LoadError> {
        let chain_id = provider.chain_id().await?;
        let Some(network) = self.config.get(&chain_id) else {
            warn!("No deployment configured for chain {}", chain_id);
            return Ok(None);
        };

        let contract = NftClient::new(network.nft.address.clone(), provider);

        let accounts = provider.request_accounts().await?;
        let account = accounts
            .into_iter()
            .next()
            .ok_or(ProviderError::NoAccounts)?;
        debug!("Loading {} for {} on {}", contract.address(), account, chain_id);

        let account_balance = contract.balance_of(&account).await?;
        let reveal_time = contract.allow_minting_on().await?;
        let max_supply = contract.max_supply().await?;
        let total_supply = contract.total_supply().await?;
        let cost = contract.cost().await?;
        let paused = contract.paused().await?;
        let whitelisted = contract.whitelisted(&account).await?;

        info!(
            "Loaded {}: {}/{} minted, cost {}",
            contract.address(),
            total_supply,
            max_supply,
            cost
        );

        Ok(Some(Loaded {
            account,
            contract: network.nft.address.clone(),
            network: network.clone(),
            chain: ChainSnapshot {
                account_balance,
                reveal_time,
                max_supply,
                total_supply,
                cost,
                paused,
                whitelisted,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::coin;

    use super::*;
    use crate::{
        config::NetworkEntry,
        deploy::{deploy, DeployParams},
        local_chain::{LocalChain, LOCAL_DENOM},
    };

    const ACCOUNT: &str = "punk";

    #[tokio::test]
    async fn loads_deployed_collection() {
        let chain = LocalChain::new("punks-local");
        let params = DeployParams::with_denom(LOCAL_DENOM).mint_date(chain.block_time());
        let nft = deploy(&chain, "deployer", params).unwrap();

        let mut config = NetworkConfig::default();
        config.insert("punks-local", NetworkEntry::new(nft.to_string()));
        let loader = StateLoader::new(config);
        let wallet = chain.wallet(ACCOUNT);

        let mut state = AppState::default();
        loader.load(&wallet, &mut state).await.unwrap();

        assert!(!state.is_loading);
        assert_eq!(state.account.as_deref(), Some(ACCOUNT));
        assert_eq!(state.contract.as_deref(), Some(nft.as_str()));
        let snapshot = state.chain.unwrap();
        assert_eq!(snapshot.max_supply, 25);
        assert_eq!(snapshot.total_supply, 0);
        assert_eq!(snapshot.account_balance, 0);
        assert_eq!(snapshot.cost, coin(1_000, LOCAL_DENOM));
        assert_eq!(snapshot.reveal_time, chain.block_time());
        assert!(!snapshot.paused);
        assert!(snapshot.whitelisted);
    }

    #[tokio::test]
    async fn unknown_network_leaves_state_empty() {
        let chain = LocalChain::new("punks-local");
        let mut config = NetworkConfig::default();
        config.insert("other-chain", NetworkEntry::new("contract0"));
        let loader = StateLoader::new(config);

        let mut state = AppState::default();
        loader.load(&chain.wallet(ACCOUNT), &mut state).await.unwrap();

        assert!(!state.is_loading);
        assert!(state.account.is_none());
        assert!(state.chain.is_none());
    }

    #[tokio::test]
    async fn failed_read_clears_state() {
        let chain = LocalChain::new("punks-local");
        let mut config = NetworkConfig::default();
        // nothing deployed at this address
        config.insert("punks-local", NetworkEntry::new("contract42"));
        let loader = StateLoader::new(config);

        let mut state = AppState {
            account: Some("stale".to_string()),
            ..AppState::default()
        };
        let res = loader.load(&chain.wallet(ACCOUNT), &mut state).await;

        assert!(res.is_err());
        assert!(!state.is_loading);
        assert!(state.account.is_none());
        assert!(state.chain.is_none());

        // refresh swallows the same failure
        loader.refresh(&chain.wallet(ACCOUNT), &mut state).await;
        assert!(!state.is_loading);
    }
}
