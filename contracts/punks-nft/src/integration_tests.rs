use anyhow::Result as AnyResult;
use cosmwasm_std::{coin, coins, Addr, Coin, Empty, Timestamp};
use cw721::OwnerOfResponse;
use cw_multi_test::{App, AppResponse, BankSudo, Contract, ContractWrapper, Executor, SudoMsg};

use crate::contract::{execute, instantiate, migrate};
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query::query;
use crate::{ContractError, PunksContract};

const DEPLOYER: &str = "deployer";
const USER: &str = "user";
const USER2: &str = "user2";
const DENOM: &str = "ustars";
const COST: u128 = 10;
const MAX_SUPPLY: u64 = 25;
const BASE_URI: &str = "ipfs://QmQPEMsfd1tJnqYPbnTQCjoa8vczfsV1FmqZWgRdNQ7z3g/";

pub fn contract_punks() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(execute, instantiate, query).with_migrate(migrate);
    Box::new(contract)
}

fn fund(app: &mut App, to: &str, amount: u128) {
    app.sudo(SudoMsg::Bank(BankSudo::Mint {
        to_address: to.to_string(),
        amount: coins(amount, DENOM),
    }))
    .unwrap();
}

fn update_block_time(app: &mut App, add_secs: u64) {
    let mut block = app.block_info();
    block.time = block.time.plus_seconds(add_secs);
    app.set_block(block);
}

/// Deploys the collection with minting opening `open_in` seconds from now
fn setup(open_in: u64, whitelist_enabled: bool) -> (App, Addr) {
    let mut app = App::default();
    let code_id = app.store_code(contract_punks());
    let allow_minting_on = app.block_info().time.plus_seconds(open_in);

    let msg = InstantiateMsg {
        name: "DDS Punks".to_string(),
        symbol: "DDSP".to_string(),
        cost: coin(COST, DENOM),
        max_supply: MAX_SUPPLY,
        allow_minting_on,
        base_uri: BASE_URI.to_string(),
        base_extension: None,
        whitelist_enabled: Some(whitelist_enabled),
        whitelist: Some(vec![USER.to_string()]),
    };
    let nft = app
        .instantiate_contract(
            code_id,
            Addr::unchecked(DEPLOYER),
            &msg,
            &[],
            "DDS Punks",
            Some(DEPLOYER.to_string()),
        )
        .unwrap();

    fund(&mut app, USER, 1_000);
    fund(&mut app, USER2, 1_000);

    (app, nft)
}

fn mint(
    app: &mut App,
    nft: &Addr,
    user: &str,
    mint_amount: u32,
    paid: u128,
) -> AnyResult<AppResponse> {
    let funds: Vec<Coin> = if paid == 0 { vec![] } else { coins(paid, DENOM) };
    app.execute_contract(
        Addr::unchecked(user),
        nft.clone(),
        &ExecuteMsg::Mint { mint_amount },
        &funds,
    )
}

fn total_supply(app: &App, nft: &Addr) -> u64 {
    app.wrap()
        .query_wasm_smart(nft, &QueryMsg::TotalSupply {})
        .unwrap()
}

fn balance_of(app: &App, nft: &Addr, owner: &str) -> u64 {
    app.wrap()
        .query_wasm_smart(
            nft,
            &QueryMsg::BalanceOf {
                owner: owner.to_string(),
            },
        )
        .unwrap()
}

fn owner_of(app: &App, nft: &Addr, token_id: u64) -> String {
    let res: OwnerOfResponse = app
        .wrap()
        .query_wasm_smart(nft, &QueryMsg::OwnerOf { token_id })
        .unwrap();
    res.owner
}

fn contract_error(res: AnyResult<AppResponse>) -> ContractError {
    res.unwrap_err().downcast().unwrap()
}

mod execute {
    use super::*;

    #[test]
    fn helper_pays_exact_price() {
        let (mut app, nft) = setup(0, true);
        let punks = PunksContract(nft.clone());

        let cost = punks.cost(&app.wrap()).unwrap();
        let msg = punks.mint(&cost, 3).unwrap();
        app.execute(Addr::unchecked(USER), msg).unwrap();

        assert_eq!(punks.total_supply(&app.wrap()).unwrap(), 3);
        assert_eq!(punks.max_supply(&app.wrap()).unwrap(), MAX_SUPPLY);
        assert!(punks.allow_minting_on(&app.wrap()).unwrap() <= app.block_info().time);
        assert_eq!(punks.balance_of(&app.wrap(), USER).unwrap(), 3);
        assert!(punks.whitelisted(&app.wrap(), USER).unwrap());
        assert!(!punks.whitelisted(&app.wrap(), USER2).unwrap());
        assert_eq!(
            app.wrap().query_balance(USER, DENOM).unwrap().amount.u128(),
            1_000 - 3 * COST
        );
    }

    #[test]
    fn mint_single_token() {
        let (mut app, nft) = setup(0, false);

        let res = mint(&mut app, &nft, USER, 1, COST);
        assert!(res.is_ok());

        assert_eq!(total_supply(&app, &nft), 1);
        let balance = app.wrap().query_balance(&nft, DENOM).unwrap();
        assert_eq!(balance.amount.u128(), COST);
        assert_eq!(owner_of(&app, &nft, 1), USER.to_string());
    }

    #[test]
    fn mint_emits_one_event_per_token() {
        let (mut app, nft) = setup(0, false);

        let res = mint(&mut app, &nft, USER, 3, 3 * COST).unwrap();
        let ids: Vec<String> = res
            .events
            .iter()
            .filter(|e| e.ty == "wasm-mint")
            .flat_map(|e| e.attributes.iter())
            .filter(|a| a.key == "token_id")
            .map(|a| a.value.clone())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn mint_grows_supply_and_balance() {
        let (mut app, nft) = setup(0, false);

        let mut supply = 0u64;
        for (user, q) in [(USER, 1u32), (USER2, 4), (USER, 7), (USER2, 2)] {
            let before = balance_of(&app, &nft, user);
            mint(&mut app, &nft, user, q, COST * q as u128).unwrap();

            assert_eq!(total_supply(&app, &nft), supply + q as u64);
            assert_eq!(balance_of(&app, &nft, user), before + q as u64);
            for token_id in supply + 1..=supply + q as u64 {
                assert_eq!(owner_of(&app, &nft, token_id), user.to_string());
            }
            supply += q as u64;
        }
    }

    #[test]
    fn overpayment_is_accepted() {
        let (mut app, nft) = setup(0, false);

        mint(&mut app, &nft, USER, 2, 3 * COST).unwrap();
        let balance = app.wrap().query_balance(&nft, DENOM).unwrap();
        assert_eq!(balance.amount.u128(), 3 * COST);
    }

    #[test]
    fn underpayment_is_rejected() {
        let (mut app, nft) = setup(0, false);

        for q in 1..=5u32 {
            let err = contract_error(mint(&mut app, &nft, USER, q, COST * q as u128 - 1));
            assert!(matches!(err, ContractError::InsufficientPayment { .. }));
        }
        let err = contract_error(mint(&mut app, &nft, USER, 1, 0));
        assert!(matches!(err, ContractError::InsufficientPayment { .. }));
        assert_eq!(total_supply(&app, &nft), 0);
    }

    #[test]
    fn wrong_denom_is_rejected() {
        let (mut app, nft) = setup(0, false);
        app.sudo(SudoMsg::Bank(BankSudo::Mint {
            to_address: USER.to_string(),
            amount: coins(100, "uatom"),
        }))
        .unwrap();

        let res = app.execute_contract(
            Addr::unchecked(USER),
            nft.clone(),
            &ExecuteMsg::Mint { mint_amount: 1 },
            &coins(COST, "uatom"),
        );
        assert!(matches!(contract_error(res), ContractError::Payment(_)));
    }

    #[test]
    fn zero_mint_is_rejected() {
        let (mut app, nft) = setup(0, false);

        let err = contract_error(mint(&mut app, &nft, USER, 0, COST));
        assert!(matches!(err, ContractError::InvalidMintAmount {}));
    }

    #[test]
    fn mint_before_open_is_rejected() {
        let (mut app, nft) = setup(120, false);

        for paid in [COST, 10 * COST, 100 * COST] {
            let err = contract_error(mint(&mut app, &nft, USER, 1, paid));
            assert!(matches!(err, ContractError::MintingNotStarted(_)));
        }

        update_block_time(&mut app, 120);
        assert!(mint(&mut app, &nft, USER, 1, COST).is_ok());
    }

    #[test]
    fn mint_beyond_supply_is_rejected() {
        let (mut app, nft) = setup(0, false);
        fund(&mut app, USER, 1_000);

        let err = contract_error(mint(&mut app, &nft, USER, 26, 26 * COST));
        assert!(matches!(
            err,
            ContractError::MaxSupplyExceeded { remaining: 25 }
        ));

        mint(&mut app, &nft, USER, 24, 24 * COST).unwrap();
        let err = contract_error(mint(&mut app, &nft, USER2, 2, 2 * COST));
        assert!(matches!(
            err,
            ContractError::MaxSupplyExceeded { remaining: 1 }
        ));

        mint(&mut app, &nft, USER2, 1, COST).unwrap();
        assert_eq!(total_supply(&app, &nft), MAX_SUPPLY);
        let err = contract_error(mint(&mut app, &nft, USER2, 1, COST));
        assert!(matches!(
            err,
            ContractError::MaxSupplyExceeded { remaining: 0 }
        ));
    }

    #[test]
    fn paused_and_whitelist_gates() {
        let (mut app, nft) = setup(0, true);

        let err = contract_error(mint(&mut app, &nft, USER2, 1, COST));
        assert!(matches!(err, ContractError::NotWhitelisted {}));
        assert!(mint(&mut app, &nft, USER, 1, COST).is_ok());

        app.execute_contract(
            Addr::unchecked(DEPLOYER),
            nft.clone(),
            &ExecuteMsg::SetPaused { paused: true },
            &[],
        )
        .unwrap();
        let err = contract_error(mint(&mut app, &nft, USER, 1, COST));
        assert!(matches!(err, ContractError::MintingPaused {}));
    }

    #[test]
    fn owner_withdraws_proceeds() {
        let (mut app, nft) = setup(0, false);
        mint(&mut app, &nft, USER, 3, 3 * COST).unwrap();

        let res = app.execute_contract(
            Addr::unchecked(USER),
            nft.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        );
        assert!(matches!(contract_error(res), ContractError::Admin(_)));

        app.execute_contract(
            Addr::unchecked(DEPLOYER),
            nft.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
        .unwrap();
        let deployer = app.wrap().query_balance(DEPLOYER, DENOM).unwrap();
        assert_eq!(deployer.amount.u128(), 3 * COST);
        let contract = app.wrap().query_balance(&nft, DENOM).unwrap();
        assert!(contract.amount.is_zero());

        let res = app.execute_contract(
            Addr::unchecked(DEPLOYER),
            nft.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        );
        assert!(matches!(
            contract_error(res),
            ContractError::NothingToWithdraw {}
        ));
    }

    #[test]
    fn withdraw_sends_proceeds_in_every_denom() {
        let (mut app, nft) = setup(0, false);
        mint(&mut app, &nft, USER, 3, 3 * COST).unwrap();

        app.execute_contract(
            Addr::unchecked(DEPLOYER),
            nft.clone(),
            &ExecuteMsg::SetCost {
                cost: coin(5, "uatom"),
            },
            &[],
        )
        .unwrap();
        app.sudo(SudoMsg::Bank(BankSudo::Mint {
            to_address: USER2.to_string(),
            amount: coins(5, "uatom"),
        }))
        .unwrap();
        app.execute_contract(
            Addr::unchecked(USER2),
            nft.clone(),
            &ExecuteMsg::Mint { mint_amount: 1 },
            &coins(5, "uatom"),
        )
        .unwrap();

        let res = app
            .execute_contract(
                Addr::unchecked(DEPLOYER),
                nft.clone(),
                &ExecuteMsg::Withdraw {},
                &[],
            )
            .unwrap();
        let withdraw = res.events.iter().find(|e| e.ty == "wasm-withdraw").unwrap();
        let amount = withdraw.attributes.iter().find(|a| a.key == "amount").unwrap();
        assert_eq!(amount.value, "5uatom,30ustars");

        let deployer = app.wrap().query_all_balances(DEPLOYER).unwrap();
        assert_eq!(deployer, vec![coin(5, "uatom"), coin(3 * COST, DENOM)]);
        assert!(app.wrap().query_all_balances(&nft).unwrap().is_empty());
    }

    #[test]
    fn ownership_transfer() {
        let (mut app, nft) = setup(0, false);

        app.execute_contract(
            Addr::unchecked(DEPLOYER),
            nft.clone(),
            &ExecuteMsg::UpdateOwner {
                owner: Some(USER2.to_string()),
            },
            &[],
        )
        .unwrap();

        let res = app.execute_contract(
            Addr::unchecked(DEPLOYER),
            nft.clone(),
            &ExecuteMsg::SetPaused { paused: true },
            &[],
        );
        assert!(res.is_err());
        assert!(app
            .execute_contract(
                Addr::unchecked(USER2),
                nft,
                &ExecuteMsg::SetPaused { paused: true },
                &[],
            )
            .is_ok());
    }
}

mod query {
    use super::*;

    #[test]
    fn deployment_values() {
        let (app, nft) = setup(120, false);

        let name: String = app.wrap().query_wasm_smart(&nft, &QueryMsg::Name {}).unwrap();
        assert_eq!(name, "DDS Punks");
        let symbol: String = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::Symbol {})
            .unwrap();
        assert_eq!(symbol, "DDSP");
        let cost: Coin = app.wrap().query_wasm_smart(&nft, &QueryMsg::Cost {}).unwrap();
        assert_eq!(cost, coin(COST, DENOM));
        let max_supply: u64 = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::MaxSupply {})
            .unwrap();
        assert_eq!(max_supply, MAX_SUPPLY);
        let allow: Timestamp = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::AllowMintingOn {})
            .unwrap();
        assert_eq!(allow, app.block_info().time.plus_seconds(120));
        let base_uri: String = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::BaseUri {})
            .unwrap();
        assert_eq!(base_uri, BASE_URI);
        let owner: cw_controllers::AdminResponse = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::Owner {})
            .unwrap();
        assert_eq!(owner.admin, Some(DEPLOYER.to_string()));
    }

    #[test]
    fn token_uri() {
        let (mut app, nft) = setup(0, false);

        let res: cosmwasm_std::StdResult<String> = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::TokenUri { token_id: 1 });
        assert!(res.is_err());

        mint(&mut app, &nft, USER, 2, 2 * COST).unwrap();
        let uri: String = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::TokenUri { token_id: 2 })
            .unwrap();
        assert_eq!(uri, format!("{}2.json", BASE_URI));

        let res: cosmwasm_std::StdResult<String> = app
            .wrap()
            .query_wasm_smart(&nft, &QueryMsg::TokenUri { token_id: 3 });
        assert!(res.is_err());
    }

    #[test]
    fn wallet_of_owner() {
        let (mut app, nft) = setup(0, false);
        mint(&mut app, &nft, USER, 2, 2 * COST).unwrap();
        mint(&mut app, &nft, USER2, 1, COST).unwrap();
        mint(&mut app, &nft, USER, 1, COST).unwrap();

        let wallet: Vec<u64> = app
            .wrap()
            .query_wasm_smart(
                &nft,
                &QueryMsg::WalletOfOwner {
                    owner: USER.to_string(),
                },
            )
            .unwrap();
        assert_eq!(wallet, vec![1, 2, 4]);
    }
}
