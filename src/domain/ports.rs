use super::merchant::Merchant;
use super::operation::{CardRequest, DepositRequest, NewUser, PurchaseRequest};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The remote banking service, one method per endpoint.
///
/// Responses are returned as decoded JSON; the orchestrator reads the few
/// fields it needs and displays the rest verbatim.
#[async_trait]
pub trait BankingApi: Send + Sync {
    async fn list_merchants(&self) -> Result<Vec<Merchant>>;
    async fn create_user(&self, request: &NewUser) -> Result<Value>;
    async fn deposit(&self, request: &DepositRequest) -> Result<Value>;
    async fn issue_card(&self, request: &CardRequest) -> Result<Value>;
    async fn purchase(&self, request: &PurchaseRequest) -> Result<Value>;
    async fn account_summary(&self, account_id: u64) -> Result<Value>;
}

pub type BankingApiBox = Box<dyn BankingApi>;

/// The backend endpoints, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Merchants,
    Users,
    Deposits,
    Cards,
    Purchase,
    Accounts,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Merchants => "/merchants",
            Endpoint::Users => "/users",
            Endpoint::Deposits => "/deposits",
            Endpoint::Cards => "/cards",
            Endpoint::Purchase => "/purchase",
            Endpoint::Accounts => "/accounts",
        }
    }
}
