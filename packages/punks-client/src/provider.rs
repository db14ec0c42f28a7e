use std::fmt;

use async_trait::async_trait;
use cosmwasm_std::{Binary, Coin, Event, StdError};
use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("Wallet exposes no accounts")]
    NoAccounts,

    #[error("User rejected the request")]
    Rejected,

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Transaction {hash} reverted: {reason}")]
    Reverted { hash: String, reason: String },
}

/// A state-changing call against one contract
#[derive(Debug, Clone, PartialEq)]
pub struct TxRequest {
    pub contract: String,
    pub msg: Binary,
    pub funds: Vec<Coin>,
}

/// Outcome of a confirmed transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TxReceipt {
    pub hash: String,
    pub height: u64,
    pub events: Vec<Event>,
}

impl TxReceipt {
    /// Values of `key` across all events of type `ty`, in emission order
    pub fn attribute_values(&self, ty: &str, key: &str) -> Vec<String> {
        self.events
            .iter()
            .filter(|e| e.ty == ty)
            .flat_map(|e| e.attributes.iter())
            .filter(|a| a.key == key)
            .map(|a| a.value.clone())
            .collect()
    }
}

/// Injected wallet: account access plus a read-only view of the chain.
///
/// Everything runs on one event loop, so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait WalletProvider: fmt::Debug {
    /// Ask the wallet for its accounts, the first one is the active account
    async fn request_accounts(&self) -> ProviderResult<Vec<String>>;

    /// Identifier of the network the wallet is connected to
    async fn chain_id(&self) -> ProviderResult<String>;

    /// Smart query against `contract`, returns the raw JSON answer
    async fn query_smart(&self, contract: &str, msg: Binary) -> ProviderResult<Binary>;

    /// Signer bound to the active account
    async fn signer(&self) -> ProviderResult<Box<dyn Signer>>;
}

#[async_trait(?Send)]
pub trait Signer: fmt::Debug {
    fn address(&self) -> String;

    /// Sign and broadcast. Fails with [`ProviderError::Rejected`] when the user declines.
    async fn send_transaction(&self, tx: TxRequest)
        -> ProviderResult<Box<dyn PendingTransaction>>;
}

#[async_trait(?Send)]
pub trait PendingTransaction: fmt::Debug {
    fn hash(&self) -> String;

    /// Resolves once the transaction is included, or with
    /// [`ProviderError::Reverted`] if execution failed.
    async fn wait(&self) -> ProviderResult<TxReceipt>;
}
