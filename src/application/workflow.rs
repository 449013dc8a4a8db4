use super::control::Control;
use super::render;
use crate::domain::field::{Field, parse_amount, parse_id};
use crate::domain::merchant::MerchantOption;
use crate::domain::operation::{
    CardIssued, CardRequest, DepositRequest, MERCHANTS_UNAVAILABLE, NewUser, Operation,
    PurchaseRequest, UserCreated, read_schema,
};
use crate::domain::ports::BankingApiBox;
use crate::error::ClientError;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// What one invocation of an operation wrote to its output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Local validation failed; nothing was sent.
    Blocked(&'static str),
    /// The backend answered; holds the rendered response.
    Completed(String),
    /// Transport or decoding failed.
    Failed(&'static str),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Blocked(message) | Outcome::Failed(message) => message,
            Outcome::Completed(rendered) => rendered,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, Default)]
struct Session {
    fields: HashMap<Field, String>,
    outputs: HashMap<Operation, String>,
    merchants: Vec<MerchantOption>,
}

impl Session {
    fn value(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct Controls {
    create_user: Control,
    deposit: Control,
    issue_card: Control,
    purchase: Control,
    summary: Control,
}

impl Controls {
    fn get(&self, operation: Operation) -> &Control {
        match operation {
            Operation::CreateUser => &self.create_user,
            Operation::Deposit => &self.deposit,
            Operation::IssueCard => &self.issue_card,
            Operation::Purchase => &self.purchase,
            Operation::Summary => &self.summary,
        }
    }
}

/// Sequences the client's operations against the banking backend.
///
/// The workflow owns the form slots the operator edits, one output region and
/// one control per operation, and the merchant options. Operations take
/// `&self`, so different operations can be in flight at the same time; slot
/// writes are last-write-wins.
///
/// Every operation validates its slots before anything is sent, disables its
/// control for the duration of the call, and replaces its output region with
/// exactly one [`Outcome`].
pub struct Workflow {
    api: BankingApiBox,
    session: RwLock<Session>,
    controls: Controls,
}

impl Workflow {
    pub fn new(api: BankingApiBox) -> Self {
        Self {
            api,
            session: RwLock::new(Session::default()),
            controls: Controls::default(),
        }
    }

    /// Overwrites a form slot.
    pub async fn set(&self, field: Field, value: impl Into<String>) {
        self.session.write().await.fields.insert(field, value.into());
    }

    pub async fn value(&self, field: Field) -> String {
        self.session.read().await.value(field).to_string()
    }

    /// Current content of an operation's output region.
    pub async fn output(&self, operation: Operation) -> String {
        let session = self.session.read().await;
        session.outputs.get(&operation).cloned().unwrap_or_default()
    }

    pub async fn merchant_options(&self) -> Vec<MerchantOption> {
        self.session.read().await.merchants.clone()
    }

    pub fn is_enabled(&self, operation: Operation) -> bool {
        self.controls.get(operation).is_enabled()
    }

    /// Loads the merchant options. Called once at startup.
    ///
    /// On success the options are replaced and the merchant slot takes the
    /// first entry. On failure the options and the slot are cleared and a
    /// diagnostic lands in the purchase output.
    pub async fn bootstrap(&self) {
        let result = self.api.list_merchants().await;
        let mut session = self.session.write().await;
        match result {
            Ok(merchants) => {
                let options: Vec<MerchantOption> =
                    merchants.iter().map(MerchantOption::from).collect();
                let selected = options
                    .first()
                    .map(|option| option.value.clone())
                    .unwrap_or_default();
                info!(count = options.len(), "merchant list loaded");
                session.fields.insert(Field::Merchant, selected);
                session.merchants = options;
            }
            Err(e) => {
                warn!(error = %e, "could not load merchant list");
                session.merchants.clear();
                session.fields.insert(Field::Merchant, String::new());
                session
                    .outputs
                    .insert(Operation::Purchase, MERCHANTS_UNAVAILABLE.to_string());
            }
        }
    }

    /// Runs `operation` against the current slot values.
    pub async fn trigger(&self, operation: Operation) -> Outcome {
        match operation {
            Operation::CreateUser => self.create_user().await,
            Operation::Deposit => self.deposit().await,
            Operation::IssueCard => self.issue_card().await,
            Operation::Purchase => self.purchase().await,
            Operation::Summary => self.summary().await,
        }
    }

    /// Creates a user and funding account from the name and email slots.
    ///
    /// A returned `account_id` is copied into every account slot.
    pub async fn create_user(&self) -> Outcome {
        let operation = Operation::CreateUser;
        let request = {
            let session = self.session.read().await;
            NewUser {
                name: session.value(Field::Name).trim().to_string(),
                email: session.value(Field::Email).trim().to_string(),
            }
        };
        if request.name.is_empty() || request.email.is_empty() {
            return self.block(operation).await;
        }

        let _control = self.controls.get(operation).acquire();
        debug!(%operation, "dispatching");
        let outcome = match self.api.create_user(&request).await {
            Ok(body) => {
                let created: UserCreated = read_schema(&body);
                if let Some(account_id) = created.account_id {
                    self.propagate(&Field::ACCOUNT_TARGETS, account_id).await;
                }
                Outcome::Completed(render::pretty(&body))
            }
            Err(e) => failed(operation, e),
        };
        self.record(operation, outcome).await
    }

    pub async fn deposit(&self) -> Outcome {
        let operation = Operation::Deposit;
        let (account_id, amount) = {
            let session = self.session.read().await;
            (
                parse_id(session.value(Field::DepositAccount)),
                parse_amount(session.value(Field::DepositAmount)),
            )
        };
        let (Some(account_id), Some(amount)) = (account_id, amount) else {
            return self.block(operation).await;
        };

        let _control = self.controls.get(operation).acquire();
        debug!(%operation, account_id, %amount, "dispatching");
        let request = DepositRequest { account_id, amount };
        let outcome = match self.api.deposit(&request).await {
            Ok(body) => Outcome::Completed(render::pretty(&body)),
            Err(e) => failed(operation, e),
        };
        self.record(operation, outcome).await
    }

    /// Issues a card; a returned `card_id` is copied into the purchase card slot.
    pub async fn issue_card(&self) -> Outcome {
        let operation = Operation::IssueCard;
        let account_id = parse_id(&self.value(Field::CardAccount).await);
        let Some(account_id) = account_id else {
            return self.block(operation).await;
        };

        let _control = self.controls.get(operation).acquire();
        debug!(%operation, account_id, "dispatching");
        let outcome = match self.api.issue_card(&CardRequest { account_id }).await {
            Ok(body) => {
                let issued: CardIssued = read_schema(&body);
                if let Some(card_id) = issued.card_id {
                    self.propagate(&[Field::PurchaseCard], card_id).await;
                }
                Outcome::Completed(render::pretty(&body))
            }
            Err(e) => failed(operation, e),
        };
        self.record(operation, outcome).await
    }

    /// Submits a purchase for authorization and renders the backend's
    /// approve/decline decision.
    pub async fn purchase(&self) -> Outcome {
        let operation = Operation::Purchase;
        let request = {
            let session = self.session.read().await;
            match (
                parse_id(session.value(Field::PurchaseAccount)),
                parse_id(session.value(Field::PurchaseCard)),
                parse_id(session.value(Field::Merchant)),
                parse_amount(session.value(Field::PurchaseAmount)),
            ) {
                (Some(account_id), Some(card_id), Some(merchant_id), Some(amount)) => {
                    Some(PurchaseRequest {
                        account_id,
                        card_id,
                        merchant_id,
                        amount,
                    })
                }
                _ => None,
            }
        };
        let Some(request) = request else {
            return self.block(operation).await;
        };

        let _control = self.controls.get(operation).acquire();
        debug!(%operation, ?request, "dispatching");
        let outcome = match self.api.purchase(&request).await {
            Ok(body) => Outcome::Completed(render::purchase_report(&body)),
            Err(e) => failed(operation, e),
        };
        self.record(operation, outcome).await
    }

    pub async fn summary(&self) -> Outcome {
        let operation = Operation::Summary;
        let Some(account_id) = parse_id(&self.value(Field::SummaryAccount).await) else {
            return self.block(operation).await;
        };

        let _control = self.controls.get(operation).acquire();
        debug!(%operation, account_id, "dispatching");
        let outcome = match self.api.account_summary(account_id).await {
            Ok(body) => Outcome::Completed(render::pretty(&body)),
            Err(e) => failed(operation, e),
        };
        self.record(operation, outcome).await
    }

    async fn propagate(&self, targets: &[Field], id: u64) {
        info!(?targets, id, "propagating identifier");
        let mut session = self.session.write().await;
        for field in targets {
            session.fields.insert(*field, id.to_string());
        }
    }

    async fn block(&self, operation: Operation) -> Outcome {
        debug!(%operation, "input validation blocked dispatch");
        self.record(operation, Outcome::Blocked(operation.invalid_input_message()))
            .await
    }

    async fn record(&self, operation: Operation, outcome: Outcome) -> Outcome {
        self.session
            .write()
            .await
            .outputs
            .insert(operation, outcome.text().to_string());
        outcome
    }
}

fn failed(operation: Operation, error: ClientError) -> Outcome {
    warn!(%operation, %error, "call failed");
    Outcome::Failed(operation.failure_message())
}
