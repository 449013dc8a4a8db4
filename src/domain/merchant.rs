use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A merchant as listed by the backend. Read-only on the client.
///
/// Rows with a missing name or category code still load, so one incomplete
/// entry does not empty the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    #[serde(deserialize_with = "deserialize_text_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Merchant category code. Sent as a string by the backend, but numbers
    /// are accepted as well.
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub mcc: String,
}

fn deserialize_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// One entry of the merchant selector: what the operator sees and the id
/// that lands in the merchant slot when it is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantOption {
    pub label: String,
    pub value: String,
}

impl From<&Merchant> for MerchantOption {
    fn from(merchant: &Merchant) -> Self {
        Self {
            label: format!("{} (MCC {})", merchant.name, merchant.mcc),
            value: merchant.id.clone(),
        }
    }
}

impl fmt::Display for MerchantOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.value, self.label)
    }
}
