use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A monetary value typed by the operator or reported by the backend.
///
/// Values that fit a `Decimal` stay exact. Magnitudes beyond its range, or
/// with more fractional digits than it holds, are carried as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Exact(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Wide(f64),
}

impl Amount {
    pub const ZERO: Amount = Amount::Exact(Decimal::ZERO);

    /// Reads a plain numeric literal such as `"12.5"`, `"-3"` or `"1e30"`.
    ///
    /// NaN and infinities are rejected.
    pub fn parse(literal: &str) -> Option<Self> {
        let exact = if literal.contains(['e', 'E']) {
            Decimal::from_scientific(literal)
        } else {
            Decimal::from_str(literal)
        };
        match exact {
            Ok(value) => Some(Amount::Exact(value)),
            Err(_) => literal
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Amount::Wide),
        }
    }

    /// `$` and two decimal places.
    ///
    /// Exact halves round away from zero.
    pub fn dollars(&self) -> String {
        match self {
            Amount::Exact(value) => {
                let rounded =
                    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                format!("${rounded:.2}")
            }
            Amount::Wide(value) => format!("${value:.2}"),
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Exact(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Exact(value) => value.fmt(f),
            Amount::Wide(value) => value.fmt(f),
        }
    }
}
