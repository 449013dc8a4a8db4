use crate::domain::amount::Amount;
use crate::domain::operation::{PurchaseDecision, read_schema};
use serde_json::Value;

/// Shown after `Reason: ` when a non-approved response carries no
/// `decline_reason` at all.
pub const MISSING_REASON: &str = "undefined";

/// Formats a decoded response as indented JSON, keeping the backend's key
/// order.
pub fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

/// Reads a balance field. Absent or non-numeric values count as zero.
pub fn balance(value: Option<&Value>) -> Amount {
    let parsed = match value {
        Some(Value::Number(number)) => Amount::parse(&number.to_string())
            .or_else(|| number.as_f64().filter(|v| v.is_finite()).map(Amount::Wide)),
        Some(Value::String(text)) => Amount::parse(text.trim()),
        _ => None,
    };
    parsed.unwrap_or(Amount::ZERO)
}

/// The purchase output: a banner for the backend's decision, a blank line,
/// then the full response.
pub fn purchase_report(body: &Value) -> String {
    let decision: PurchaseDecision = read_schema(body);
    let banner = if decision.is_approved() {
        format!(
            "✅ {} • New Balance: {}",
            PurchaseDecision::APPROVED,
            balance(decision.new_balance.as_ref()).dollars()
        )
    } else {
        let reason = match &decision.decline_reason {
            Some(Value::String(reason)) => reason.clone(),
            Some(other) => other.to_string(),
            None => MISSING_REASON.to_string(),
        };
        format!("❌ DECLINED • Reason: {reason}")
    };
    format!("{banner}\n\n{}", pretty(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_pretty_uses_two_space_indent_and_keeps_order() {
        let body = json!({"user_id": 1, "account_id": 1, "balance": 0.0});
        assert_eq!(
            pretty(&body),
            "{\n  \"user_id\": 1,\n  \"account_id\": 1,\n  \"balance\": 0.0\n}"
        );
    }

    #[test]
    fn test_balance_defaults_to_zero() {
        assert_eq!(balance(None), Amount::ZERO);
        assert_eq!(balance(Some(&json!(null))), Amount::ZERO);
        assert_eq!(balance(Some(&json!("n/a"))), Amount::ZERO);
        assert_eq!(balance(Some(&json!({"amount": 1}))), Amount::ZERO);
    }

    #[test]
    fn test_balance_reads_numbers_and_numeric_strings() {
        assert_eq!(balance(Some(&json!(150.5))), Amount::Exact(dec!(150.5)));
        assert_eq!(balance(Some(&json!(20))), Amount::Exact(dec!(20)));
        assert_eq!(balance(Some(&json!(" 7.25 "))), Amount::Exact(dec!(7.25)));
    }

    #[test]
    fn test_balance_beyond_decimal_range() {
        assert_eq!(balance(Some(&json!(1e30))), Amount::Wide(1e30));
        assert_eq!(balance(Some(&json!("1e-30"))), Amount::Wide(1e-30));
    }

    #[test]
    fn test_approved_report() {
        let report = purchase_report(&json!({"status": "APPROVED", "new_balance": 150.5}));
        assert!(report.starts_with("✅ APPROVED • New Balance: $150.50\n\n{"));
        assert!(report.contains("\"new_balance\": 150.5"));
    }

    #[test]
    fn test_approved_report_with_huge_balance() {
        let report = purchase_report(&json!({"status": "APPROVED", "new_balance": 1e30}));
        assert!(
            report.starts_with("✅ APPROVED • New Balance: $1000000000000000019884624838656.00")
        );
    }

    #[test]
    fn test_approved_without_balance_shows_zero() {
        let report = purchase_report(&json!({"status": "APPROVED"}));
        assert!(report.contains("New Balance: $0.00"));
    }

    #[test]
    fn test_declined_report() {
        let report = purchase_report(&json!({
            "status": "DECLINED",
            "decline_reason": "INSUFFICIENT_FUNDS"
        }));
        assert!(report.starts_with("❌ DECLINED • Reason: INSUFFICIENT_FUNDS\n\n"));
        assert!(!report.contains('$'));
    }

    #[test]
    fn test_missing_reason_differs_from_empty_and_null() {
        let report = purchase_report(&json!({"error": "INVALID_CARD"}));
        assert!(report.starts_with("❌ DECLINED • Reason: undefined\n\n"));
        assert!(report.contains("INVALID_CARD"));

        let report = purchase_report(&json!({"status": "DECLINED", "decline_reason": ""}));
        assert!(report.starts_with("❌ DECLINED • Reason: \n\n"));

        let report = purchase_report(&json!({"status": "DECLINED", "decline_reason": null}));
        assert!(report.starts_with("❌ DECLINED • Reason: null\n\n"));
    }
}
