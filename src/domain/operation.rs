use crate::domain::amount::Amount;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Shown in the purchase output when the merchant list cannot be loaded.
pub const MERCHANTS_UNAVAILABLE: &str =
    "Could not load merchants. Is the /merchants endpoint available on the backend?";

/// An operator-triggered exchange with the backend. Each one owns a control
/// and an output region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUser,
    Deposit,
    IssueCard,
    Purchase,
    Summary,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::CreateUser,
        Operation::Deposit,
        Operation::IssueCard,
        Operation::Purchase,
        Operation::Summary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateUser => "create",
            Operation::Deposit => "deposit",
            Operation::IssueCard => "card",
            Operation::Purchase => "purchase",
            Operation::Summary => "summary",
        }
    }

    /// Message written when local input validation blocks dispatch.
    pub fn invalid_input_message(&self) -> &'static str {
        match self {
            Operation::CreateUser => "Please enter name and email.",
            Operation::Deposit => "Enter valid account ID and amount.",
            Operation::IssueCard | Operation::Summary => "Enter a valid account ID.",
            Operation::Purchase => "Enter account, card, merchant, and amount.",
        }
    }

    /// Message written when the call fails in transport or decoding.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::CreateUser => "Error creating user.",
            Operation::Deposit => "Error depositing funds.",
            Operation::IssueCard => "Error issuing card.",
            Operation::Purchase => "Error making purchase.",
            Operation::Summary => "Error fetching summary.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositRequest {
    pub account_id: u64,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRequest {
    pub account_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRequest {
    pub account_id: u64,
    pub card_id: u64,
    pub merchant_id: u64,
    pub amount: Amount,
}

/// The part of a create-user response the client reads.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct UserCreated {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub account_id: Option<u64>,
}

/// The part of an issue-card response the client reads.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct CardIssued {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub card_id: Option<u64>,
}

/// The authorization decision carried by a purchase response.
///
/// Fields are kept as raw JSON: the client only formats what the backend
/// decided and must not fail on unexpected shapes.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct PurchaseDecision {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub new_balance: Option<Value>,
    /// `Some(Value::Null)` when the backend sends an explicit `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub decline_reason: Option<Value>,
}

impl PurchaseDecision {
    pub const APPROVED: &'static str = "APPROVED";

    pub fn is_approved(&self) -> bool {
        matches!(&self.status, Some(Value::String(status)) if status == Self::APPROVED)
    }
}

/// Reads a response schema out of a decoded body.
///
/// Bodies that are not JSON objects, or whose fields have unexpected types,
/// yield the schema's default (every field absent).
pub fn read_schema<T: DeserializeOwned + Default>(body: &Value) -> T {
    if body.is_object() {
        T::deserialize(body).unwrap_or_default()
    } else {
        T::default()
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Accepts a positive integer, a whole-number float, or a string holding an
/// integer. Anything else is treated as absent.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|id| id.fract() == 0.0 && *id >= 1.0 && *id < u64::MAX as f64)
                .map(|id| id as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(id.filter(|id| *id != 0))
}
