use crate::domain::merchant::Merchant;
use crate::domain::operation::{CardRequest, DepositRequest, NewUser, PurchaseRequest};
use crate::domain::ports::{BankingApi, Endpoint};
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// `BankingApi` over HTTP/JSON.
///
/// Any response whose body decodes as JSON is returned, whatever its status
/// code; the backend reports business errors inside the body. No timeouts or
/// retries are applied.
#[derive(Debug, Clone)]
pub struct HttpBankingApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBankingApi {
    /// Creates a client rooted at `base_url` (e.g. `http://127.0.0.1:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        // `json` sets `Content-Type: application/json`.
        let response = self.client.post(&url).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let url = response.url().clone();
    if !status.is_success() {
        warn!(%url, %status, "backend answered with a non-success status");
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl BankingApi for HttpBankingApi {
    async fn list_merchants(&self) -> Result<Vec<Merchant>> {
        self.get(Endpoint::Merchants.path()).await
    }

    async fn create_user(&self, request: &NewUser) -> Result<Value> {
        self.post(Endpoint::Users.path(), request).await
    }

    async fn deposit(&self, request: &DepositRequest) -> Result<Value> {
        self.post(Endpoint::Deposits.path(), request).await
    }

    async fn issue_card(&self, request: &CardRequest) -> Result<Value> {
        self.post(Endpoint::Cards.path(), request).await
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<Value> {
        self.post(Endpoint::Purchase.path(), request).await
    }

    async fn account_summary(&self, account_id: u64) -> Result<Value> {
        self.get(&format!("{}/{account_id}", Endpoint::Accounts.path())).await
    }
}
