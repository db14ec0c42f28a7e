pub mod app;
pub mod config;
pub mod deploy;
pub mod loader;
pub mod local_chain;
pub mod mint;
pub mod nft;
pub mod provider;
pub mod state;
pub mod view;

pub use crate::app::DApp;
pub use crate::config::NetworkConfig;
pub use crate::state::{AppState, ChainSnapshot};
