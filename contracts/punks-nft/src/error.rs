use cosmwasm_std::{Coin, OverflowError, StdError, Timestamp};
use cw_controllers::AdminError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("MintingPaused")]
    MintingPaused {},

    #[error("NotWhitelisted")]
    NotWhitelisted {},

    #[error("MintingNotStarted: opens at {0}")]
    MintingNotStarted(Timestamp),

    #[error("InvalidMintAmount")]
    InvalidMintAmount {},

    #[error("InsufficientPayment: expected {expected}, got {got}")]
    InsufficientPayment { expected: Coin, got: Coin },

    #[error("MaxSupplyExceeded: {remaining} remaining")]
    MaxSupplyExceeded { remaining: u64 },

    #[error("InvalidMaxSupply")]
    InvalidMaxSupply {},

    #[error("InvalidCost")]
    InvalidCost {},

    #[error("TokenNotFound: {0}")]
    TokenNotFound(u64),

    #[error("NothingToWithdraw")]
    NothingToWithdraw {},

    #[error("AddressAlreadyWhitelisted: {addr}")]
    AddressAlreadyWhitelisted { addr: String },

    #[error("AddressNotWhitelisted: {addr}")]
    AddressNotWhitelisted { addr: String },
}
