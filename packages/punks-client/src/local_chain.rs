//! In-process chain backed by `cw-multi-test`, standing in for a browser wallet
//! connected to a local node.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use cosmwasm_std::{
    to_binary, Addr, Binary, Coin, ContractResult, CosmosMsg, Empty, Querier, QueryRequest,
    StdResult, SystemResult, Timestamp, WasmMsg, WasmQuery,
};
use cw_multi_test::{
    next_block, App, AppResponse, BankSudo, Contract, ContractWrapper, Executor, SudoMsg,
};
use log::debug;
use punks_nft::msg::{InstantiateMsg, QueryMsg};
use serde::de::DeserializeOwned;

use crate::provider::{
    PendingTransaction, ProviderError, ProviderResult, Signer, TxReceipt, TxRequest,
    WalletProvider,
};

pub const LOCAL_DENOM: &str = "ucosm";

fn contract_punks() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        punks_nft::contract::execute,
        punks_nft::contract::instantiate,
        punks_nft::query::query,
    )
    .with_migrate(punks_nft::contract::migrate);
    Box::new(contract)
}

pub struct LocalChain {
    app: RefCell<App>,
    punks_code_id: u64,
    rejecting: Cell<bool>,
    tx_count: Cell<u64>,
}

impl fmt::Debug for LocalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalChain")
            .field("chain_id", &self.chain_id())
            .field("punks_code_id", &self.punks_code_id)
            .finish_non_exhaustive()
    }
}

impl LocalChain {
    /// New chain with the collection code already stored
    pub fn new(chain_id: &str) -> Rc<Self> {
        let mut app = App::default();
        let punks_code_id = app.store_code(contract_punks());
        app.update_block(|block| block.chain_id = chain_id.to_string());

        Rc::new(LocalChain {
            app: RefCell::new(app),
            punks_code_id,
            rejecting: Cell::new(false),
            tx_count: Cell::new(0),
        })
    }

    pub fn chain_id(&self) -> String {
        self.app.borrow().block_info().chain_id
    }

    pub fn block_time(&self) -> Timestamp {
        self.app.borrow().block_info().time
    }

    pub fn set_block_time(&self, time: Timestamp) {
        self.app.borrow_mut().update_block(|block| block.time = time);
    }

    /// While set, every signature request is declined as a user would
    pub fn reject_signatures(&self, reject: bool) {
        self.rejecting.set(reject);
    }

    pub fn fund(&self, address: &str, amount: Vec<Coin>) -> AnyResult<()> {
        self.app
            .borrow_mut()
            .sudo(SudoMsg::Bank(BankSudo::Mint {
                to_address: address.to_string(),
                amount,
            }))?;
        Ok(())
    }

    pub fn balance(&self, address: &str, denom: &str) -> AnyResult<Coin> {
        Ok(self.app.borrow().wrap().query_balance(address, denom)?)
    }

    pub fn instantiate_punks(
        &self,
        sender: &str,
        msg: &InstantiateMsg,
        label: &str,
    ) -> AnyResult<Addr> {
        let mut app = self.app.borrow_mut();
        let addr = app.instantiate_contract(
            self.punks_code_id,
            Addr::unchecked(sender),
            msg,
            &[],
            label,
            Some(sender.to_string()),
        )?;
        app.update_block(next_block);
        Ok(addr)
    }

    /// Execute as `sender`, then close the block
    pub fn execute(&self, sender: &str, msg: CosmosMsg) -> AnyResult<AppResponse> {
        let mut app = self.app.borrow_mut();
        let res = app.execute(Addr::unchecked(sender), msg);
        app.update_block(next_block);
        res
    }

    pub fn query_smart(&self, contract: &str, msg: Binary) -> ProviderResult<Binary> {
        let request: QueryRequest<Empty> = QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: contract.to_string(),
            msg,
        });
        let app = self.app.borrow();
        match app.wrap().raw_query(&to_binary(&request)?) {
            SystemResult::Ok(ContractResult::Ok(res)) => Ok(res),
            SystemResult::Ok(ContractResult::Err(err)) => Err(ProviderError::Query(err)),
            SystemResult::Err(err) => Err(ProviderError::Query(err.to_string())),
        }
    }

    /// Typed query, bypassing any wallet
    pub fn query_wasm<T: DeserializeOwned>(&self, contract: &str, msg: &QueryMsg) -> StdResult<T> {
        self.app.borrow().wrap().query_wasm_smart(contract, msg)
    }

    /// Wallet whose only account is `account`
    pub fn wallet(self: &Rc<Self>, account: &str) -> LocalWallet {
        LocalWallet {
            chain: Rc::clone(self),
            account: account.to_string(),
        }
    }

    /// Transactions signed and broadcast so far
    pub fn sent_transactions(&self) -> u64 {
        self.tx_count.get()
    }

    fn next_hash(&self) -> String {
        let n = self.tx_count.get() + 1;
        self.tx_count.set(n);
        format!("{:064X}", n)
    }
}

#[derive(Debug, Clone)]
pub struct LocalWallet {
    chain: Rc<LocalChain>,
    account: String,
}

#[async_trait(?Send)]
impl WalletProvider for LocalWallet {
    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        if self.chain.rejecting.get() {
            return Err(ProviderError::Rejected);
        }
        Ok(vec![self.account.clone()])
    }

    async fn chain_id(&self) -> ProviderResult<String> {
        Ok(self.chain.chain_id())
    }

    async fn query_smart(&self, contract: &str, msg: Binary) -> ProviderResult<Binary> {
        self.chain.query_smart(contract, msg)
    }

    async fn signer(&self) -> ProviderResult<Box<dyn Signer>> {
        Ok(Box::new(LocalSigner {
            chain: Rc::clone(&self.chain),
            account: self.account.clone(),
        }))
    }
}

#[derive(Debug)]
struct LocalSigner {
    chain: Rc<LocalChain>,
    account: String,
}

#[async_trait(?Send)]
impl Signer for LocalSigner {
    fn address(&self) -> String {
        self.account.clone()
    }

    async fn send_transaction(
        &self,
        tx: TxRequest,
    ) -> ProviderResult<Box<dyn PendingTransaction>> {
        if self.chain.rejecting.get() {
            return Err(ProviderError::Rejected);
        }

        let hash = self.chain.next_hash();
        debug!("Broadcasting {} from {} to {}", hash, self.account, tx.contract);
        let msg = CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: tx.contract,
            msg: tx.msg,
            funds: tx.funds,
        });
        let outcome = self
            .chain
            .execute(&self.account, msg)
            .map(|res| TxReceipt {
                hash: hash.clone(),
                height: self.chain.app.borrow().block_info().height,
                events: res.events,
            })
            .map_err(|err| err.root_cause().to_string());

        Ok(Box::new(LocalPendingTx { hash, outcome }))
    }
}

#[derive(Debug)]
struct LocalPendingTx {
    hash: String,
    outcome: Result<TxReceipt, String>,
}

#[async_trait(?Send)]
impl PendingTransaction for LocalPendingTx {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    async fn wait(&self) -> ProviderResult<TxReceipt> {
        self.outcome
            .clone()
            .map_err(|reason| ProviderError::Reverted {
                hash: self.hash.clone(),
                reason,
            })
    }
}
