use serde_json::{json, Value};

mod common;
use common::TestApp;

/// Decimal fields may arrive as JSON numbers or strings depending on scale,
/// so comparisons go through f64.
fn dec(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().expect("Failed to parse decimal string"),
        Value::Number(n) => n.as_f64().expect("Failed to read decimal number"),
        other => panic!("Expected a decimal value, got {other}"),
    }
}

async fn create_category(app: &TestApp, prefix: &str, kind: &str) -> String {
    let payload = json!({
        "name": app.unique_name(prefix),
        "type": kind
    });
    let response = app.post("/api/v1/categories", &payload).await;
    assert_eq!(response.status(), 201);
    let body = response.json().await;
    body["id"].as_str().expect("Category id missing").to_string()
}

async fn create_account(app: &TestApp, prefix: &str, balance: f64) -> String {
    let payload = json!({
        "name": app.unique_name(prefix),
        "balance": balance
    });
    let response = app.post("/api/v1/accounts", &payload).await;
    assert_eq!(response.status(), 201);
    let body = response.json().await;
    body["id"].as_str().expect("Account id missing").to_string()
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_create_category_success() {
    let app = TestApp::new().await;
    let name = app.unique_name("groceries");

    let payload = json!({
        "name": name,
        "type": "expense",
        "icon": "cart"
    });

    let response = app.post("/api/v1/categories", &payload).await;

    assert_eq!(response.status(), 201);
    let body = response.json().await;
    assert_eq!(body["name"], name);
    assert_eq!(body["type"], "expense");
    assert_eq!(body["icon"], "cart");
    assert!(body["id"].is_string());
}

#[actix_rt::test]
async fn test_malformed_json_body_yields_error_response() {
    let app = TestApp::new().await;

    let response = app.post_raw("/api/v1/accounts", "{not json").await;

    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_create_category_rejects_unknown_kind() {
    let app = TestApp::new().await;

    let payload = json!({
        "name": app.unique_name("badkind"),
        "type": "transfer"
    });

    let response = app.post("/api/v1/categories", &payload).await;

    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("expense"));
}

#[actix_rt::test]
async fn test_create_category_rejects_oversized_icon() {
    let app = TestApp::new().await;

    let payload = json!({
        "name": app.unique_name("big_icon"),
        "type": "expense",
        "icon": "x".repeat(51)
    });

    let response = app.post("/api/v1/categories", &payload).await;

    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("Icon"));
}

#[actix_rt::test]
async fn test_list_categories_filters_by_kind() {
    let app = TestApp::new().await;
    let expense_id = create_category(&app, "filter_exp", "expense").await;
    let income_id = create_category(&app, "filter_inc", "income").await;

    let response = app.get("/api/v1/categories?type=income").await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    let categories = body.as_array().expect("Expected category array");
    let ids: Vec<&str> = categories
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert!(ids.contains(&income_id.as_str()));
    assert!(!ids.contains(&expense_id.as_str()));
    assert!(categories.iter().all(|c| c["type"] == "income"));
}

#[actix_rt::test]
async fn test_update_category() {
    let app = TestApp::new().await;
    let id = create_category(&app, "rename_me", "expense").await;
    let new_name = app.unique_name("renamed");

    let payload = json!({
        "name": new_name,
        "type": "expense"
    });

    let response = app.put(&format!("/api/v1/categories/{id}"), &payload).await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert_eq!(body["name"], new_name);
}

#[actix_rt::test]
async fn test_create_account_defaults_balance_to_zero() {
    let app = TestApp::new().await;

    let payload = json!({ "name": app.unique_name("wallet") });

    let response = app.post("/api/v1/accounts", &payload).await;

    assert_eq!(response.status(), 201);
    let body = response.json().await;
    assert_eq!(dec(&body["balance"]), 0.0);
}

#[actix_rt::test]
async fn test_list_accounts_includes_total_balance() {
    let app = TestApp::new().await;
    let id = create_account(&app, "list_me", 150.0).await;

    let response = app.get("/api/v1/accounts").await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    let accounts = body["accounts"].as_array().expect("Expected accounts array");
    assert!(accounts.iter().any(|a| a["id"] == id.as_str()));

    let sum: f64 = accounts.iter().map(|a| dec(&a["balance"])).sum();
    assert!((dec(&body["total_balance"]) - sum).abs() < 1e-9);
}

#[actix_rt::test]
async fn test_update_account_overwrites_fields() {
    let app = TestApp::new().await;
    let id = create_account(&app, "update_me", 10.0).await;
    let new_name = app.unique_name("updated");

    let payload = json!({
        "name": new_name,
        "balance": 250.0
    });

    let response = app.put(&format!("/api/v1/accounts/{id}"), &payload).await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert_eq!(body["name"], new_name);
    assert_eq!(dec(&body["balance"]), 250.0);
}

#[actix_rt::test]
async fn test_update_missing_account_returns_404() {
    let app = TestApp::new().await;

    let payload = json!({
        "name": app.unique_name("ghost"),
        "balance": 1.0
    });

    let response = app
        .put(
            "/api/v1/accounts/00000000-0000-0000-0000-000000000000",
            &payload,
        )
        .await;

    assert_eq!(response.status(), 404);
}

#[actix_rt::test]
async fn test_expense_posting_decreases_balance() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "spender", 100.0).await;
    let category_id = create_category(&app, "food", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 50.0,
        "type": "expense",
        "description": "lunch"
    });

    let response = app.post("/api/v1/transactions", &payload).await;

    assert_eq!(response.status(), 201);
    let body = response.json().await;
    assert_eq!(dec(&body["new_balance"]), 50.0);
    assert_eq!(body["transaction"]["type"], "expense");
    assert_eq!(dec(&body["transaction"]["amount"]), 50.0);
}

#[actix_rt::test]
async fn test_income_posting_increases_balance() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "earner", 100.0).await;
    let category_id = create_category(&app, "salary", "income").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 75.5,
        "type": "income"
    });

    let response = app.post("/api/v1/transactions", &payload).await;

    assert_eq!(response.status(), 201);
    let body = response.json().await;
    assert_eq!(dec(&body["new_balance"]), 175.5);
}

#[actix_rt::test]
async fn test_posting_type_mismatch_rejected_and_balance_untouched() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "mismatch", 100.0).await;
    let income_category = create_category(&app, "wages", "income").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": income_category,
        "amount": 30.0,
        "type": "expense"
    });

    let response = app.post("/api/v1/transactions", &payload).await;

    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("does not match"));

    // The failed posting must not have moved the balance
    let accounts = app.get("/api/v1/accounts").await.json().await;
    let account = accounts["accounts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == account_id.as_str())
        .expect("Account missing from list")
        .clone();
    assert_eq!(dec(&account["balance"]), 100.0);
}

#[actix_rt::test]
async fn test_posting_rejects_non_positive_amount() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "zero_amt", 100.0).await;
    let category_id = create_category(&app, "zero_cat", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 0.0,
        "type": "expense"
    });

    let response = app.post("/api/v1/transactions", &payload).await;

    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn test_posting_to_missing_account_returns_404() {
    let app = TestApp::new().await;
    let category_id = create_category(&app, "orphan_cat", "expense").await;

    let payload = json!({
        "account_id": "00000000-0000-0000-0000-000000000000",
        "category_id": category_id,
        "amount": 10.0,
        "type": "expense"
    });

    let response = app.post("/api/v1/transactions", &payload).await;

    assert_eq!(response.status(), 404);
    let body = response.json().await;
    assert_eq!(body["error"], "Account not found");
}

#[actix_rt::test]
async fn test_posting_to_missing_category_returns_404() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "no_cat", 100.0).await;

    let payload = json!({
        "account_id": account_id,
        "category_id": "00000000-0000-0000-0000-000000000000",
        "amount": 10.0,
        "type": "expense"
    });

    let response = app.post("/api/v1/transactions", &payload).await;

    assert_eq!(response.status(), 404);
    let body = response.json().await;
    assert_eq!(body["error"], "Category not found");
}

#[actix_rt::test]
async fn test_list_transactions_filters_by_account() {
    let app = TestApp::new().await;
    let account_a = create_account(&app, "acct_a", 100.0).await;
    let account_b = create_account(&app, "acct_b", 100.0).await;
    let category_id = create_category(&app, "shared_cat", "expense").await;

    for account_id in [&account_a, &account_b] {
        let payload = json!({
            "account_id": account_id,
            "category_id": category_id,
            "amount": 5.0,
            "type": "expense"
        });
        let response = app.post("/api/v1/transactions", &payload).await;
        assert_eq!(response.status(), 201);
    }

    let response = app
        .get(&format!("/api/v1/transactions?account_id={account_a}"))
        .await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    let transactions = body.as_array().expect("Expected transaction array");
    assert!(!transactions.is_empty());
    assert!(transactions
        .iter()
        .all(|t| t["account"]["id"] == account_a.as_str()));
}

#[actix_rt::test]
async fn test_delete_category_with_transactions_rejected() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "del_guard", 100.0).await;
    let category_id = create_category(&app, "del_cat", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 10.0,
        "type": "expense"
    });
    let response = app.post("/api/v1/transactions", &payload).await;
    assert_eq!(response.status(), 201);

    let response = app.delete(&format!("/api/v1/categories/{category_id}")).await;

    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("transactions"));
}

#[actix_rt::test]
async fn test_delete_unreferenced_category_succeeds() {
    let app = TestApp::new().await;
    let category_id = create_category(&app, "del_free", "expense").await;

    let response = app.delete(&format!("/api/v1/categories/{category_id}")).await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert_eq!(body["id"], category_id);

    // A second delete hits nothing
    let response = app.delete(&format!("/api/v1/categories/{category_id}")).await;
    assert_eq!(response.status(), 404);
}

#[actix_rt::test]
async fn test_delete_account_with_transactions_rejected() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "del_acct", 100.0).await;
    let category_id = create_category(&app, "del_acct_cat", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 10.0,
        "type": "expense"
    });
    let response = app.post("/api/v1/transactions", &payload).await;
    assert_eq!(response.status(), 201);

    let response = app.delete(&format!("/api/v1/accounts/{account_id}")).await;

    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("transactions"));
}

#[actix_rt::test]
async fn test_delete_empty_account_succeeds() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "del_empty", 0.0).await;

    let response = app.delete(&format!("/api/v1/accounts/{account_id}")).await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert_eq!(body["id"], account_id);
}

#[actix_rt::test]
async fn test_budget_status_tracks_spend() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "budgeted", 1000.0).await;
    let category_id = create_category(&app, "budget_cat", "expense").await;

    // Window wide enough to contain today's postings
    let budget_payload = json!({
        "category_id": category_id,
        "amount": 1000.0,
        "start_date": "2020-01-01",
        "end_date": "2099-12-31"
    });
    let response = app.post("/api/v1/budgets", &budget_payload).await;
    assert_eq!(response.status(), 201);
    let budget = response.json().await;
    let budget_id = budget["id"].as_str().unwrap().to_string();
    assert_eq!(budget["category"]["id"], category_id);

    for amount in [100.0, 200.0] {
        let payload = json!({
            "account_id": account_id,
            "category_id": category_id,
            "amount": amount,
            "type": "expense"
        });
        let response = app.post("/api/v1/transactions", &payload).await;
        assert_eq!(response.status(), 201);
    }

    let response = app.get(&format!("/api/v1/budgets/{budget_id}/status")).await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert_eq!(dec(&body["status"]["actual_expense"]), 300.0);
    assert_eq!(dec(&body["status"]["remaining"]), 700.0);
    assert!((dec(&body["status"]["percentage_used"]) - 30.0).abs() < 1e-9);
}

#[actix_rt::test]
async fn test_budget_rejects_non_positive_amount() {
    let app = TestApp::new().await;
    let category_id = create_category(&app, "bad_budget", "expense").await;

    let payload = json!({
        "category_id": category_id,
        "amount": 0.0,
        "start_date": "2025-02-01",
        "end_date": "2025-02-28"
    });

    let response = app.post("/api/v1/budgets", &payload).await;

    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn test_budget_rejects_inverted_window() {
    let app = TestApp::new().await;
    let category_id = create_category(&app, "inverted", "expense").await;

    let payload = json!({
        "category_id": category_id,
        "amount": 100.0,
        "start_date": "2025-02-28",
        "end_date": "2025-02-01"
    });

    let response = app.post("/api/v1/budgets", &payload).await;

    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("start date"));
}

#[actix_rt::test]
async fn test_budget_for_missing_category_returns_404() {
    let app = TestApp::new().await;

    let payload = json!({
        "category_id": "00000000-0000-0000-0000-000000000000",
        "amount": 100.0,
        "start_date": "2025-02-01",
        "end_date": "2025-02-28"
    });

    let response = app.post("/api/v1/budgets", &payload).await;

    assert_eq!(response.status(), 404);
    let body = response.json().await;
    assert_eq!(body["error"], "Category not found");
}

#[actix_rt::test]
async fn test_budget_list_filters_by_overlap() {
    let app = TestApp::new().await;
    let category_id = create_category(&app, "overlap", "expense").await;

    let payload = json!({
        "category_id": category_id,
        "amount": 500.0,
        "start_date": "2025-03-10",
        "end_date": "2025-03-20"
    });
    let response = app.post("/api/v1/budgets", &payload).await;
    assert_eq!(response.status(), 201);
    let budget_id = response.json().await["id"].as_str().unwrap().to_string();

    // A window that merely touches the budget's window matches
    let response = app
        .get(&format!(
            "/api/v1/budgets?category_id={category_id}&start_date=2025-03-15&end_date=2025-04-15"
        ))
        .await;
    assert_eq!(response.status(), 200);
    let listed = response.json().await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"] == budget_id.as_str()));

    // A disjoint window does not
    let response = app
        .get(&format!(
            "/api/v1/budgets?category_id={category_id}&start_date=2025-04-01&end_date=2025-04-30"
        ))
        .await;
    assert_eq!(response.status(), 200);
    let listed = response.json().await;
    assert!(!listed
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"] == budget_id.as_str()));
}

#[actix_rt::test]
async fn test_budget_update_and_delete() {
    let app = TestApp::new().await;
    let category_id = create_category(&app, "lifecycle", "expense").await;

    let payload = json!({
        "category_id": category_id,
        "amount": 100.0,
        "start_date": "2025-05-01",
        "end_date": "2025-05-31"
    });
    let response = app.post("/api/v1/budgets", &payload).await;
    assert_eq!(response.status(), 201);
    let budget_id = response.json().await["id"].as_str().unwrap().to_string();

    let update = json!({
        "category_id": category_id,
        "amount": 150.0,
        "start_date": "2025-05-01",
        "end_date": "2025-06-30"
    });
    let response = app.put(&format!("/api/v1/budgets/{budget_id}"), &update).await;
    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert_eq!(dec(&body["amount"]), 150.0);
    assert_eq!(body["end_date"], "2025-06-30");

    let response = app.delete(&format!("/api/v1/budgets/{budget_id}")).await;
    assert_eq!(response.status(), 200);

    let response = app.get(&format!("/api/v1/budgets/{budget_id}/status")).await;
    assert_eq!(response.status(), 404);
}

#[actix_rt::test]
async fn test_statistics_net_amount_is_income_minus_expense() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "stats", 0.0).await;
    let expense_cat = create_category(&app, "stats_exp", "expense").await;
    let income_cat = create_category(&app, "stats_inc", "income").await;

    for (category_id, amount, kind) in [
        (&expense_cat, 40.0, "expense"),
        (&income_cat, 100.0, "income"),
    ] {
        let payload = json!({
            "account_id": account_id,
            "category_id": category_id,
            "amount": amount,
            "type": kind
        });
        let response = app.post("/api/v1/transactions", &payload).await;
        assert_eq!(response.status(), 201);
    }

    let response = app.get("/api/v1/statistics").await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    let income = dec(&body["total_income"]);
    let expense = dec(&body["total_expense"]);
    assert!((dec(&body["net_amount"]) - (income - expense)).abs() < 1e-9);
    assert!(body["by_category"].is_array());
    assert!(body["by_month"].is_array());

    // Our categories contributed, so they show up in the breakdown
    let by_category = body["by_category"].as_array().unwrap();
    assert!(by_category
        .iter()
        .any(|c| c["category_id"] == expense_cat.as_str()));
}

#[actix_rt::test]
async fn test_statistics_rejects_malformed_date() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/statistics?start_date=not-a-date").await;

    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn test_budget_overview_reports_current_month() {
    let app = TestApp::new().await;
    let category_id = create_category(&app, "overview", "expense").await;

    let payload = json!({
        "category_id": category_id,
        "amount": 500.0,
        "start_date": "2020-01-01",
        "end_date": "2099-12-31"
    });
    let response = app.post("/api/v1/budgets", &payload).await;
    assert_eq!(response.status(), 201);
    let budget_id = response.json().await["id"].as_str().unwrap().to_string();

    let response = app.get("/api/v1/statistics/budget-overview").await;

    assert_eq!(response.status(), 200);
    let body = response.json().await;
    assert!(body["current_month"]["start_date"].is_string());
    assert!(body["current_month"]["end_date"].is_string());
    let entry = body["budgets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == budget_id.as_str())
        .expect("Overlapping budget missing from overview")
        .clone();
    assert!((dec(&entry["remaining"]) - (dec(&entry["amount"]) - dec(&entry["actual_expense"]))).abs() < 1e-9);
}

#[actix_rt::test]
async fn test_reversal_restores_balance() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "reverser", 100.0).await;
    let category_id = create_category(&app, "rev_cat", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 40.0,
        "type": "expense"
    });
    let response = app.post("/api/v1/transactions", &payload).await;
    assert_eq!(response.status(), 201);
    let posted = response.json().await;
    assert_eq!(dec(&posted["new_balance"]), 60.0);
    let transaction_id = posted["transaction"]["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/v1/transactions/{transaction_id}/reversal"),
            &json!({}),
        )
        .await;

    assert_eq!(response.status(), 201);
    let body = response.json().await;
    assert_eq!(dec(&body["new_balance"]), 100.0);
    assert_eq!(dec(&body["transaction"]["amount"]), -40.0);
    assert_eq!(body["transaction"]["type"], "expense");
    assert_eq!(
        body["transaction"]["reverses_transaction_id"],
        transaction_id.as_str()
    );
}

#[actix_rt::test]
async fn test_reversal_nets_out_of_budget_spend() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "rev_net", 500.0).await;
    let category_id = create_category(&app, "rev_net_cat", "expense").await;

    // Budget window wide enough to contain today's postings
    let budget_payload = json!({
        "category_id": category_id,
        "amount": 500.0,
        "start_date": "2020-01-01",
        "end_date": "2099-12-31"
    });
    let response = app.post("/api/v1/budgets", &budget_payload).await;
    assert_eq!(response.status(), 201);
    let budget_id = response.json().await["id"].as_str().unwrap().to_string();

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 120.0,
        "type": "expense"
    });
    let response = app.post("/api/v1/transactions", &payload).await;
    assert_eq!(response.status(), 201);
    let transaction_id = response.json().await["transaction"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let status_path = format!("/api/v1/budgets/{budget_id}/status");
    let before = app.get(&status_path).await.json().await;
    assert_eq!(dec(&before["status"]["actual_expense"]), 120.0);

    let response = app
        .post(
            &format!("/api/v1/transactions/{transaction_id}/reversal"),
            &json!({}),
        )
        .await;
    assert_eq!(response.status(), 201);

    // The negated reversal entry cancels the original in the expense sum
    let after = app.get(&status_path).await.json().await;
    assert_eq!(dec(&after["status"]["actual_expense"]), 0.0);
    assert_eq!(dec(&after["status"]["remaining"]), 500.0);
    assert_eq!(dec(&after["status"]["percentage_used"]), 0.0);
}

#[actix_rt::test]
async fn test_reversal_nets_out_of_statistics_breakdown() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "rev_stats", 500.0).await;
    let category_id = create_category(&app, "rev_stats_cat", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 75.0,
        "type": "expense"
    });
    let response = app.post("/api/v1/transactions", &payload).await;
    assert_eq!(response.status(), 201);
    let transaction_id = response.json().await["transaction"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .post(
            &format!("/api/v1/transactions/{transaction_id}/reversal"),
            &json!({}),
        )
        .await;
    assert_eq!(response.status(), 201);

    // Only our own category is concurrency-safe to assert on: global totals
    // move while parallel tests post transactions. The category's contribution
    // to the breakdown must net to zero as if nothing had been posted.
    let body = app.get("/api/v1/statistics").await.json().await;
    let contribution = body["by_category"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category_id"] == category_id.as_str())
        .map(|c| dec(&c["amount"]))
        .unwrap_or(0.0);
    assert!(contribution.abs() < 1e-9);
}

#[actix_rt::test]
async fn test_double_reversal_rejected() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "double_rev", 100.0).await;
    let category_id = create_category(&app, "double_rev_cat", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 10.0,
        "type": "expense"
    });
    let response = app.post("/api/v1/transactions", &payload).await;
    assert_eq!(response.status(), 201);
    let transaction_id = response.json().await["transaction"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let path = format!("/api/v1/transactions/{transaction_id}/reversal");
    let response = app.post(&path, &json!({})).await;
    assert_eq!(response.status(), 201);

    let response = app.post(&path, &json!({})).await;
    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("already"));
}

#[actix_rt::test]
async fn test_reversing_a_reversal_rejected() {
    let app = TestApp::new().await;
    let account_id = create_account(&app, "rev_of_rev", 100.0).await;
    let category_id = create_category(&app, "rev_of_rev_cat", "expense").await;

    let payload = json!({
        "account_id": account_id,
        "category_id": category_id,
        "amount": 10.0,
        "type": "expense"
    });
    let response = app.post("/api/v1/transactions", &payload).await;
    assert_eq!(response.status(), 201);
    let transaction_id = response.json().await["transaction"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .post(
            &format!("/api/v1/transactions/{transaction_id}/reversal"),
            &json!({}),
        )
        .await;
    assert_eq!(response.status(), 201);
    let reversal_id = response.json().await["transaction"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .post(
            &format!("/api/v1/transactions/{reversal_id}/reversal"),
            &json!({}),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response.json().await;
    assert!(body["error"].as_str().unwrap().contains("reversal"));
}

#[actix_rt::test]
async fn test_reversing_missing_transaction_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/transactions/00000000-0000-0000-0000-000000000000/reversal",
            &json!({}),
        )
        .await;

    assert_eq!(response.status(), 404);
}
