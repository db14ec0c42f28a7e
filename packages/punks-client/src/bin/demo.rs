use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use clap::Parser;
use cosmwasm_std::{coins, Timestamp};
use log::info;
use punks_client::{
    config::NetworkEntry,
    deploy::{deploy, DeployParams},
    local_chain::{LocalChain, LOCAL_DENOM},
    DApp, NetworkConfig,
};

const CHAIN_ID: &str = "punks-local";
const DEPLOYER: &str = "deployer";

#[derive(Parser, Debug)]
#[command(version, about = "Deploy DApp Punks on an in-process chain and mint from it", long_about = None)]
struct Args {
    /// Network config (JSON or TOML), its `punks-local` entry supplies currency and images
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Deployment parameter overrides
    #[arg(short, long)]
    deploy_config: Option<PathBuf>,
    /// Account the wallet exposes
    #[arg(short, long, default_value = "punk")]
    account: String,
    /// Tokens to mint
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
    /// Balance given to the account before minting, in base units
    #[arg(long, default_value_t = 1_000_000)]
    funds: u128,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let chain = LocalChain::new(CHAIN_ID);
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
    chain.set_block_time(Timestamp::from_seconds(now.as_secs()));
    chain.fund(&args.account, coins(args.funds, LOCAL_DENOM))?;

    let params = DeployParams::load(args.deploy_config.as_deref(), LOCAL_DENOM)?;
    let nft = deploy(&chain, DEPLOYER, params)?;

    let mut config = match &args.config {
        Some(path) => NetworkConfig::load(path)?,
        None => NetworkConfig::default(),
    };
    let mut entry = config
        .get(CHAIN_ID)
        .cloned()
        .unwrap_or_else(|| NetworkEntry::new(nft.as_str()));
    entry.nft.address = nft.to_string();
    config.insert(CHAIN_ID, entry);

    let mut app = DApp::new(chain.wallet(&args.account), config);
    app.refresh().await;
    println!("{}\n", app.view(chain.block_time()));

    match app.mint(args.quantity).await {
        Ok(Some(receipt)) => info!(
            "Minted token(s) {}",
            receipt.attribute_values("wasm-mint", "token_id").join(", ")
        ),
        Ok(None) => info!("Nothing loaded, mint skipped"),
        Err(err) => info!("Mint did not go through: {}", err),
    }

    println!("{}", app.view(chain.block_time()));
    Ok(())
}
