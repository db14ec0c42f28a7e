use std::sync::Arc;

use cosmwasm_std::{Coin, OverflowError, Uint128};
use dashmap::{mapref::entry::Entry, DashMap};
use log::{error, info, warn};
use thiserror::Error;

use crate::{
    nft::NftClient,
    provider::{PendingTransaction, ProviderError, TxReceipt, WalletProvider},
};

/// The one message shown to the user for any failed mint
pub const MINT_FAILED_ALERT: &str = "User rejected or transaction reverted";

#[derive(Error, Debug)]
pub enum MintError {
    #[error("Mint quantity must be at least 1")]
    InvalidQuantity,

    #[error("A mint for this account is already waiting for confirmation")]
    AlreadyInFlight,

    #[error("Minting is disabled for this account")]
    MintDisabled,

    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl MintError {
    /// Refused on the client, nothing was sent to the chain
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            MintError::InvalidQuantity
                | MintError::AlreadyInFlight
                | MintError::MintDisabled
                | MintError::Overflow(_)
        )
    }
}

/// Blocking, user-facing alert
pub trait Notifier {
    fn alert(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!("{}", message);
    }
}

type FlightKey = (String, String);

/// Set of (account, contract) pairs with a mint in flight. Clones share the set.
#[derive(Debug, Default, Clone)]
pub struct SingleFlight {
    in_flight: Arc<DashMap<FlightKey, ()>>,
}

impl SingleFlight {
    /// Claim the key, or `None` if it is already held
    pub fn try_acquire(&self, account: &str, contract: &str) -> Option<FlightGuard> {
        let key = (account.to_string(), contract.to_string());
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(entry) => {
                entry.insert(());
                Some(FlightGuard {
                    in_flight: Arc::clone(&self.in_flight),
                    key,
                })
            }
        }
    }

    pub fn is_in_flight(&self, account: &str, contract: &str) -> bool {
        self.in_flight
            .contains_key(&(account.to_string(), contract.to_string()))
    }
}

/// Releases its key on drop
#[derive(Debug)]
pub struct FlightGuard {
    in_flight: Arc<DashMap<FlightKey, ()>>,
    key: FlightKey,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}

/// Total payment for `quantity` tokens
pub fn mint_payment(cost: &Coin, quantity: u32) -> Result<Vec<Coin>, OverflowError> {
    let amount = cost.amount.checked_mul(Uint128::from(quantity))?;
    if amount.is_zero() {
        return Ok(vec![]);
    }
    Ok(vec![Coin {
        denom: cost.denom.clone(),
        amount,
    }])
}

/// A broadcast mint waiting for inclusion
#[derive(Debug)]
pub struct InFlightMint {
    pending: Box<dyn PendingTransaction>,
    _flight: FlightGuard,
}

impl InFlightMint {
    pub fn hash(&self) -> String {
        self.pending.hash()
    }
}

#[derive(Debug, Clone)]
pub struct MintSubmitter<N: Notifier = LogNotifier> {
    guard: SingleFlight,
    notifier: N,
}

impl Default for MintSubmitter<LogNotifier> {
    fn default() -> Self {
        MintSubmitter::new(SingleFlight::default(), LogNotifier)
    }
}

impl<N: Notifier> MintSubmitter<N> {
    pub fn new(guard: SingleFlight, notifier: N) -> Self {
        MintSubmitter { guard, notifier }
    }

    pub fn guard(&self) -> &SingleFlight {
        &self.guard
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Submit one mint of `quantity` tokens at `cost` each and wait for it to be
    /// included. Signing and execution failures raise the alert before returning.
    pub async fn submit<P: WalletProvider + ?Sized>(
        &self,
        provider: &P,
        contract: &str,
        cost: &Coin,
        quantity: u32,
    ) -> Result<TxReceipt, MintError> {
        let flight = self.send(provider, contract, cost, quantity).await?;
        self.confirm(flight).await
    }

    /// Sign and broadcast. The (account, contract) key stays held until the
    /// returned mint is confirmed or dropped.
    pub async fn send<P: WalletProvider + ?Sized>(
        &self,
        provider: &P,
        contract: &str,
        cost: &Coin,
        quantity: u32,
    ) -> Result<InFlightMint, MintError> {
        if quantity == 0 {
            return Err(MintError::InvalidQuantity);
        }

        let signer = self.provider_step(provider.signer().await)?;
        let account = signer.address();
        let flight = self
            .guard
            .try_acquire(&account, contract)
            .ok_or(MintError::AlreadyInFlight)?;

        let payment = mint_payment(cost, quantity)?;
        let nft = NftClient::new(contract, provider).connect(signer);

        let pending = self.provider_step(nft.mint(quantity, payment).await)?;
        info!("Mint of {} submitted as {}", quantity, pending.hash());
        Ok(InFlightMint {
            pending,
            _flight: flight,
        })
    }

    /// Wait for a sent mint to be included
    pub async fn confirm(&self, mint: InFlightMint) -> Result<TxReceipt, MintError> {
        let receipt = self.provider_step(mint.pending.wait().await)?;
        info!("Mint {} confirmed at height {}", receipt.hash, receipt.height);
        Ok(receipt)
    }

    fn provider_step<T>(&self, res: Result<T, ProviderError>) -> Result<T, MintError> {
        res.map_err(|err| {
            error!("Mint failed: {}", err);
            self.notifier.alert(MINT_FAILED_ALERT);
            MintError::Provider(err)
        })
    }
}
