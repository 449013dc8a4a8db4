use crate::domain::merchant::Merchant;
use crate::domain::operation::{CardRequest, DepositRequest, NewUser, PurchaseRequest};
use crate::domain::ports::{BankingApi, Endpoint};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

/// A request as seen by the in-memory backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    /// The JSON request body, or the path parameters for reads.
    pub body: Value,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(Value),
    Unavailable,
}

/// A scripted stand-in for the banking backend.
///
/// Each endpoint answers with whatever body was scripted for it, or fails as
/// if the service were unreachable. Every call is recorded, so tests can
/// assert that validation kept a request from being sent. An optional gate
/// holds every call in flight until it is notified.
///
/// Clones share replies, recorded calls and the gate.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBankingApi {
    replies: Arc<RwLock<HashMap<Endpoint, Reply>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    gate: Option<Arc<Notify>>,
}

impl InMemoryBankingApi {
    /// Creates a backend with nothing scripted: every call fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds each call until `gate` is notified once for it.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Scripts `endpoint` to answer with `body`.
    pub async fn respond(&self, endpoint: Endpoint, body: Value) {
        self.replies.write().await.insert(endpoint, Reply::Body(body));
    }

    /// Scripts `endpoint` to fail as an unreachable service would.
    pub async fn fail(&self, endpoint: Endpoint) {
        self.replies.write().await.insert(endpoint, Reply::Unavailable);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn exchange(&self, endpoint: Endpoint, body: Value) -> Result<Value> {
        self.calls.write().await.push(RecordedCall { endpoint, body });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.replies.read().await.get(&endpoint).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Unavailable) | None => Err(ClientError::Unavailable(format!(
                "no reply for {}",
                endpoint.path()
            ))),
        }
    }
}

#[async_trait]
impl BankingApi for InMemoryBankingApi {
    async fn list_merchants(&self) -> Result<Vec<Merchant>> {
        let body = self.exchange(Endpoint::Merchants, Value::Null).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn create_user(&self, request: &NewUser) -> Result<Value> {
        self.exchange(Endpoint::Users, serde_json::to_value(request)?)
            .await
    }

    async fn deposit(&self, request: &DepositRequest) -> Result<Value> {
        self.exchange(Endpoint::Deposits, serde_json::to_value(request)?)
            .await
    }

    async fn issue_card(&self, request: &CardRequest) -> Result<Value> {
        self.exchange(Endpoint::Cards, serde_json::to_value(request)?)
            .await
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<Value> {
        self.exchange(Endpoint::Purchase, serde_json::to_value(request)?)
            .await
    }

    async fn account_summary(&self, account_id: u64) -> Result<Value> {
        self.exchange(Endpoint::Accounts, json!({ "account_id": account_id }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_reply_and_recording() {
        let api = InMemoryBankingApi::new();
        api.respond(Endpoint::Cards, json!({"card_id": 7})).await;

        let body = api.issue_card(&CardRequest { account_id: 3 }).await.unwrap();
        assert_eq!(body, json!({"card_id": 7}));

        let calls = api.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].endpoint, Endpoint::Cards);
        assert_eq!(calls[0].body, json!({"account_id": 3}));
    }

    #[tokio::test]
    async fn test_unscripted_endpoint_fails() {
        let api = InMemoryBankingApi::new();
        let result = api.account_summary(1).await;
        assert!(matches!(result, Err(ClientError::Unavailable(_))));
        // The attempt is still recorded.
        assert_eq!(api.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_scripted_failure_overrides_reply() {
        let api = InMemoryBankingApi::new();
        api.respond(Endpoint::Accounts, json!({"account_id": 1})).await;
        assert!(api.account_summary(1).await.is_ok());

        api.fail(Endpoint::Accounts).await;
        assert!(matches!(
            api.account_summary(1).await,
            Err(ClientError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_merchant_list_is_a_json_error() {
        let api = InMemoryBankingApi::new();
        api.respond(Endpoint::Merchants, json!({"detail": "Not Found"}))
            .await;
        let result = api.list_merchants().await;
        assert!(matches!(result, Err(ClientError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let api = InMemoryBankingApi::new();
        let clone = api.clone();
        clone.respond(Endpoint::Users, json!({"account_id": 1})).await;

        let request = NewUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        api.create_user(&request).await.unwrap();
        assert_eq!(clone.call_count().await, 1);
    }
}
