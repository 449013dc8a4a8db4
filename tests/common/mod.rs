#![allow(dead_code)]

use hsa_client::application::workflow::Workflow;
use hsa_client::domain::field::Field;
use hsa_client::domain::ports::Endpoint;
use hsa_client::infrastructure::in_memory::InMemoryBankingApi;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A workflow over a fresh in-memory backend, plus a handle on that backend.
pub fn workflow() -> (Workflow, InMemoryBankingApi) {
    let api = InMemoryBankingApi::new();
    (Workflow::new(Box::new(api.clone())), api)
}

pub async fn fill(workflow: &Workflow, values: &[(Field, &str)]) {
    for (field, value) in values {
        workflow.set(*field, *value).await;
    }
}

/// Scripts every endpoint with the answers the demo backend gives for a
/// fresh user.
pub async fn script_happy_path(api: &InMemoryBankingApi) {
    api.respond(
        Endpoint::Merchants,
        json!([
            {"id": 1, "name": "CVS Pharmacy", "mcc": "5912", "category": "Pharmacy"},
            {"id": 4, "name": "Walmart", "mcc": "5411", "category": "Grocery"}
        ]),
    )
    .await;
    api.respond(
        Endpoint::Users,
        json!({"user_id": 1, "account_id": 42, "balance": 0.0}),
    )
    .await;
    api.respond(
        Endpoint::Deposits,
        json!({"account_id": 42, "new_balance": 200.0}),
    )
    .await;
    api.respond(
        Endpoint::Cards,
        json!({
            "card_id": 7,
            "account_id": 42,
            "masked_pan": "4111 **** **** 1234",
            "cvv": "123",
            "exp_date": "12/2029"
        }),
    )
    .await;
    api.respond(
        Endpoint::Purchase,
        json!({
            "transaction_id": 1,
            "status": "APPROVED",
            "decline_reason": null,
            "new_balance": 150.5
        }),
    )
    .await;
    api.respond(
        Endpoint::Accounts,
        json!({"account_id": 42, "balance": 150.5, "card": null, "transactions": []}),
    )
    .await;
}

/// Mounts the demo backend's endpoints on a mock HTTP server under `/api`.
pub async fn mount_backend(server: &MockServer) {
    let routes = [
        (
            "GET",
            "/api/merchants",
            json!([{"id": 1, "name": "CVS Pharmacy", "mcc": "5912"}]),
        ),
        ("POST", "/api/users", json!({"user_id": 1, "account_id": 42, "balance": 0.0})),
        ("POST", "/api/deposits", json!({"account_id": 42, "new_balance": 200.0})),
        ("POST", "/api/cards", json!({"card_id": 7, "account_id": 42})),
        (
            "POST",
            "/api/purchase",
            json!({"transaction_id": 1, "status": "DECLINED",
                   "decline_reason": "INSUFFICIENT_FUNDS", "new_balance": 200.0}),
        ),
        ("GET", "/api/accounts/42", json!({"account_id": 42, "balance": 200.0})),
    ];
    for (verb, route, body) in routes {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

/// Writes console commands to a file that can be handed to the binary's stdin.
pub fn script_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// A local URL that refuses connections.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}
