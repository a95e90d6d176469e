//! End-to-end scenario: create, issue, transfer, stake, unstake, refund and
//! rewarddrop, submitted as JSON requests and checked through table queries.

use serde_json::json;

use seed_nullables::{NullClock, NullStore};
use seed_token::{ActionRequest, Table, TokenEngine, TokenError};
use seed_types::{AccountName, SymbolCode, TokenParams};

fn request(name: &str, data: serde_json::Value, signer: &str) -> ActionRequest {
    serde_json::from_value(json!({
        "authorization": [signer],
        "action": {"name": name, "data": data},
    }))
    .unwrap()
}

fn send(
    engine: &TokenEngine<NullStore>,
    clock: &NullClock,
    name: &str,
    data: serde_json::Value,
    signer: &str,
) -> Result<(), TokenError> {
    engine.apply(&request(name, data, signer), clock.now()).map(|_| ())
}

fn rows(engine: &TokenEngine<NullStore>, table: &str, scope: &str) -> serde_json::Value {
    let table: Table = table.parse().unwrap();
    serde_json::to_value(engine.query_table(table, scope).unwrap()).unwrap()
}

#[test]
fn token_contract_scenario() {
    let engine = TokenEngine::new(NullStore::new(), TokenParams::default());
    let clock = NullClock::new(1_600_000_000);
    let code = SymbolCode::new("SEED").unwrap();

    // Create
    send(
        &engine,
        &clock,
        "create",
        json!({"issuer": "parslseed123", "maximum_supply": "10000000000.0000 SEED"}),
        "parslseed123@active",
    )
    .unwrap();
    assert_eq!(rows(&engine, "stat", "SEED")[0]["max_supply"], "10000000000.0000 SEED");

    let again = send(
        &engine,
        &clock,
        "create",
        json!({"issuer": "parslseed123", "maximum_supply": "10000000000.0000 SEED"}),
        "parslseed123@active",
    );
    assert_eq!(again.unwrap_err().kind(), "AlreadyExists");

    // Issue
    send(
        &engine,
        &clock,
        "issue",
        json!({"to": "parslseed123", "quantity": "10000.0000 SEED", "memo": "User1"}),
        "parslseed123@active",
    )
    .unwrap();
    send(
        &engine,
        &clock,
        "issue",
        json!({"to": "user2", "quantity": "10000.0000 SEED", "memo": "User2"}),
        "parslseed123@active",
    )
    .unwrap();
    assert_eq!(rows(&engine, "stat", "SEED")[0]["supply"], "20000.0000 SEED");

    // Transfer
    send(
        &engine,
        &clock,
        "transfer",
        json!({"from": "parslseed123", "to": "user1", "quantity": "2000.0000 SEED", "memo": "User1"}),
        "parslseed123@active",
    )
    .unwrap();
    let overdraft = send(
        &engine,
        &clock,
        "transfer",
        json!({"from": "user2", "to": "user1", "quantity": "1000000000.0000 SEED", "memo": "User1"}),
        "user2@active",
    );
    assert_eq!(overdraft.unwrap_err().kind(), "InsufficientBalance");
    assert_eq!(rows(&engine, "accounts", "user1")[0]["balance"], "2000.0000 SEED");
    assert_eq!(rows(&engine, "accounts", "user2")[0]["balance"], "10000.0000 SEED");

    // Staking
    send(&engine, &clock, "stake", json!({"owner": "user1", "quantity": "2000.0000 SEED"}), "user1@active")
        .unwrap();
    assert_eq!(rows(&engine, "accounts", "user1"), json!([]));

    clock.advance(60);
    send(&engine, &clock, "unstake", json!({"owner": "user1", "quantity": "1000.0000 SEED"}), "user1@active")
        .unwrap();

    let early = send(&engine, &clock, "refund", json!({"owner": "user1", "sym": "4,SEED"}), "user1@active");
    assert_eq!(early.unwrap_err().kind(), "RefundNotMatured");

    assert_eq!(rows(&engine, "stake", "user1")[0]["quantity"], "1000.0000 SEED");
    let refund = rows(&engine, "refund", "user1");
    assert_eq!(refund[0]["quantity"], "1000.0000 SEED");
    assert_eq!(refund[0]["maturity"], json!(clock.now().as_secs() + 604_800));

    // The refund matures a week after the unstake.
    let user1 = AccountName::new("user1").unwrap();
    let pending = engine.get_refund(&user1, &code).unwrap().unwrap();
    clock.advance_to(pending.maturity);
    send(&engine, &clock, "refund", json!({"owner": "user1", "sym": "4,SEED"}), "user1@active").unwrap();
    assert_eq!(rows(&engine, "accounts", "user1")[0]["balance"], "1000.0000 SEED");
    assert_eq!(rows(&engine, "refund", "user1"), json!([]));

    // Reward drop
    send(
        &engine,
        &clock,
        "issue",
        json!({"to": "parslseed123", "quantity": "10000.0000 SEED", "memo": "User3"}),
        "parslseed123@active",
    )
    .unwrap();
    send(
        &engine,
        &clock,
        "rewarddrop",
        json!({"from": "parslseed123", "to": "user3", "quantity": "10000.0000 SEED", "memo": "User3"}),
        "parslseed123@active",
    )
    .unwrap();
    assert_eq!(rows(&engine, "stake", "user3")[0]["quantity"], "10000.0000 SEED");
    assert_eq!(rows(&engine, "accounts", "user3"), json!([]));

    let audit = engine.audit(&code).unwrap().unwrap();
    assert!(audit.is_balanced());
    assert_eq!(audit.supply.to_string(), "40000.0000 SEED");
}

#[test]
fn unknown_action_name_is_rejected_at_parse_time() {
    let result: Result<ActionRequest, _> = serde_json::from_value(json!({
        "authorization": ["user1@active"],
        "action": {"name": "burn", "data": {"owner": "user1", "quantity": "1.0000 SEED"}},
    }));
    assert!(result.is_err());
}

#[test]
fn currencies_with_different_issuers_stay_isolated() {
    let engine = TokenEngine::new(NullStore::new(), TokenParams::default());
    let clock = NullClock::new(1_600_000_000);
    let seed_code = SymbolCode::new("SEED").unwrap();
    let tree_code = SymbolCode::new("TREE").unwrap();
    let user1 = AccountName::new("user1").unwrap();

    send(
        &engine,
        &clock,
        "create",
        json!({"issuer": "parslseed123", "maximum_supply": "1000.0000 SEED"}),
        "parslseed123@active",
    )
    .unwrap();
    send(
        &engine,
        &clock,
        "create",
        json!({"issuer": "treekeeper1", "maximum_supply": "500.0000 TREE"}),
        "treekeeper1@active",
    )
    .unwrap();

    // Each issuer only controls its own symbol.
    let foreign = send(
        &engine,
        &clock,
        "issue",
        json!({"to": "user1", "quantity": "5.0000 TREE", "memo": ""}),
        "parslseed123@active",
    );
    assert_eq!(foreign.unwrap_err().kind(), "Unauthorized");
    let foreign = send(
        &engine,
        &clock,
        "rewarddrop",
        json!({"from": "treekeeper1", "to": "user1", "quantity": "5.0000 SEED", "memo": ""}),
        "treekeeper1@active",
    );
    assert_eq!(foreign.unwrap_err().kind(), "Unauthorized");

    send(
        &engine,
        &clock,
        "issue",
        json!({"to": "user1", "quantity": "10.0000 SEED", "memo": ""}),
        "parslseed123@active",
    )
    .unwrap();
    send(
        &engine,
        &clock,
        "issue",
        json!({"to": "user1", "quantity": "5.0000 TREE", "memo": ""}),
        "treekeeper1@active",
    )
    .unwrap();

    // Staking SEED leaves every TREE row alone.
    send(&engine, &clock, "stake", json!({"owner": "user1", "quantity": "4.0000 SEED"}), "user1@active")
        .unwrap();
    let unstake_tree = send(
        &engine,
        &clock,
        "unstake",
        json!({"owner": "user1", "quantity": "1.0000 TREE"}),
        "user1@active",
    );
    assert_eq!(unstake_tree.unwrap_err().kind(), "InsufficientStake");
    send(&engine, &clock, "unstake", json!({"owner": "user1", "quantity": "1.0000 SEED"}), "user1@active")
        .unwrap();

    assert_eq!(engine.get_balance(&user1, &seed_code).unwrap().unwrap().to_string(), "6.0000 SEED");
    assert_eq!(engine.get_stake(&user1, &seed_code).unwrap().unwrap().to_string(), "3.0000 SEED");
    assert!(engine.get_refund(&user1, &seed_code).unwrap().is_some());
    assert_eq!(engine.get_balance(&user1, &tree_code).unwrap().unwrap().to_string(), "5.0000 TREE");
    assert!(engine.get_stake(&user1, &tree_code).unwrap().is_none());
    assert!(engine.get_refund(&user1, &tree_code).unwrap().is_none());

    let refund_tree = send(&engine, &clock, "refund", json!({"owner": "user1", "sym": "4,TREE"}), "user1@active");
    assert_eq!(refund_tree.unwrap_err().kind(), "NothingToRefund");

    // Both balances come back from one accounts query, one row per symbol.
    assert_eq!(rows(&engine, "accounts", "user1").as_array().unwrap().len(), 2);

    let audits = engine.audit_all().unwrap();
    assert_eq!(audits.len(), 2);
    assert!(audits.iter().all(|audit| audit.is_balanced()));
    assert_eq!(engine.get_supply(&seed_code).unwrap().unwrap().to_string(), "10.0000 SEED");
    assert_eq!(engine.get_supply(&tree_code).unwrap().unwrap().to_string(), "5.0000 TREE");
}
