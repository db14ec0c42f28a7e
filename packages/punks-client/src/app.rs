use cosmwasm_std::Timestamp;
use log::debug;

use crate::{
    config::NetworkConfig,
    loader::StateLoader,
    mint::{InFlightMint, LogNotifier, MintError, MintSubmitter, Notifier},
    provider::{TxReceipt, WalletProvider},
    state::AppState,
    view::{render, View},
};

/// Owns the application state and drives loads and mints against one wallet
#[derive(Debug)]
pub struct DApp<P: WalletProvider, N: Notifier = LogNotifier> {
    provider: P,
    loader: StateLoader,
    submitter: MintSubmitter<N>,
    state: AppState,
}

impl<P: WalletProvider> DApp<P> {
    pub fn new(provider: P, config: NetworkConfig) -> Self {
        DApp::with_submitter(provider, config, MintSubmitter::default())
    }
}

impl<P: WalletProvider, N: Notifier> DApp<P, N> {
    pub fn with_submitter(
        provider: P,
        config: NetworkConfig,
        submitter: MintSubmitter<N>,
    ) -> Self {
        DApp {
            provider,
            loader: StateLoader::new(config),
            submitter,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Reload everything from the chain
    pub async fn refresh(&mut self) {
        self.loader.refresh(&self.provider, &mut self.state).await;
    }

    /// Mint `quantity` tokens at the loaded cost and wait for inclusion
    pub async fn mint(&mut self, quantity: u32) -> Result<Option<TxReceipt>, MintError> {
        match self.begin_mint(quantity).await? {
            Some(flight) => self.finish_mint(flight).await.map(Some),
            None => Ok(None),
        }
    }

    /// Form submission: sign and broadcast, leaving the state waiting until
    /// [`DApp::finish_mint`]. Refused without touching the wallet while the
    /// loaded state disables the form.
    pub async fn begin_mint(
        &mut self,
        quantity: u32,
    ) -> Result<Option<InFlightMint>, MintError> {
        let (Some(contract), Some(chain)) = (&self.state.contract, &self.state.chain) else {
            debug!("Nothing loaded, ignoring mint");
            return Ok(None);
        };
        if !chain.mint_allowed() || self.state.is_waiting {
            return Err(MintError::MintDisabled);
        }
        let contract = contract.clone();
        let cost = chain.cost.clone();

        self.state.is_waiting = true;
        match self
            .submitter
            .send(&self.provider, &contract, &cost, quantity)
            .await
        {
            Ok(flight) => Ok(Some(flight)),
            Err(err) => {
                self.state.is_waiting = false;
                if !err.is_refusal() {
                    self.refresh().await;
                }
                Err(err)
            }
        }
    }

    /// Wait for a mint started with [`DApp::begin_mint`], then reload state
    /// whether it was included or reverted.
    pub async fn finish_mint(&mut self, flight: InFlightMint) -> Result<TxReceipt, MintError> {
        let res = self.submitter.confirm(flight).await;
        self.state.is_waiting = false;
        self.refresh().await;
        res
    }

    pub fn view(&self, now: Timestamp) -> View {
        render(&self.state, now)
    }
}
