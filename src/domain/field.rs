use crate::domain::amount::Amount;
use clap::ValueEnum;
use std::fmt;

/// An editable input slot on the console form.
///
/// Each operation reads its inputs from named slots at dispatch time. A few
/// slots double as propagation targets: identifiers returned by one operation
/// are written into them as convenience defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Field {
    Name,
    Email,
    DepositAccount,
    DepositAmount,
    CardAccount,
    PurchaseAccount,
    PurchaseCard,
    Merchant,
    PurchaseAmount,
    SummaryAccount,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Email,
        Field::DepositAccount,
        Field::DepositAmount,
        Field::CardAccount,
        Field::PurchaseAccount,
        Field::PurchaseCard,
        Field::Merchant,
        Field::PurchaseAmount,
        Field::SummaryAccount,
    ];

    /// Slots that receive the account id of a newly created user.
    pub const ACCOUNT_TARGETS: [Field; 4] = [
        Field::DepositAccount,
        Field::CardAccount,
        Field::PurchaseAccount,
        Field::SummaryAccount,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::DepositAccount => "deposit-account",
            Field::DepositAmount => "deposit-amount",
            Field::CardAccount => "card-account",
            Field::PurchaseAccount => "purchase-account",
            Field::PurchaseCard => "purchase-card",
            Field::Merchant => "merchant",
            Field::PurchaseAmount => "purchase-amount",
            Field::SummaryAccount => "summary-account",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parses an identifier slot.
///
/// Leading whitespace and a leading `+` are accepted, then the leading run of
/// digits is read and anything after it ignored. Zero, negative values and
/// input without digits are all treated as absent.
pub fn parse_id(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let unsigned = match trimmed.as_bytes().first() {
        Some(b'-') => return None,
        Some(b'+') => &trimmed[1..],
        _ => trimmed,
    };
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    match unsigned[..digits].parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(id),
    }
}

/// Parses an amount slot from its longest leading decimal prefix.
///
/// `"12.5abc"` reads as `12.5`, `"1e3"` as `1000`. Returns `None` when no
/// numeric prefix exists or the value is not finite.
pub fn parse_amount(input: &str) -> Option<Amount> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    let mantissa = s[..end].trim_end_matches('.');
    let mantissa = mantissa.strip_prefix('+').unwrap_or(mantissa);
    let mantissa = if mantissa.starts_with('.') {
        format!("0{mantissa}")
    } else if let Some(rest) = mantissa.strip_prefix("-.") {
        format!("-0.{rest}")
    } else {
        mantissa.to_string()
    };

    // Optional exponent, only taken when it carries at least one digit.
    let mut exp_end = end;
    if exp_end < bytes.len() && matches!(bytes[exp_end], b'e' | b'E') {
        exp_end += 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            let exponent = &s[end + 1..exp_end];
            return Amount::parse(&format!("{mantissa}e{exponent}"));
        }
    }

    Amount::parse(&mantissa)
}
