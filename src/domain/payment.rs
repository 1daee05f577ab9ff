//! Payments against bookings and per-franchise invoice numbering.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    BankTransfer,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::BankTransfer => "bank_transfer",
        };
        write!(f, "{s}")
    }
}

impl FromStr for PaymentMethod {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown payment method: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub franchise_id: i32,
    pub booking_id: i32,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub received_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewPayment {
    pub franchise_id: i32,
    pub booking_id: i32,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub received_by: i32,
}

/// Per-franchise invoice counter. The next number renders as
/// `{prefix}{last_number + 1}` zero-padded to three digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InvoiceSequence {
    pub id: i32,
    pub franchise_id: i32,
    pub prefix: String,
    pub last_number: i32,
    pub updated_at: NaiveDateTime,
}

impl InvoiceSequence {
    pub fn render(prefix: &str, number: i32) -> String {
        format!("{prefix}{number:03}")
    }
}

/// Split an invoice number into its letter/hyphen prefix and numeric tail.
/// The whole string must be a prefix of letters or hyphens followed by
/// digits only.
pub fn parse_invoice_number(value: &str) -> Result<(String, i32), TypeConstraintError> {
    let invalid = || TypeConstraintError::InvalidValue(format!("invalid invoice number: {value}"));
    let digits_at = value.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
    let (prefix, digits) = value.split_at(digits_at);
    if prefix.is_empty()
        || !prefix.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    let number: i32 = digits.parse().map_err(|_| invalid())?;
    Ok((prefix.to_string(), number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefix_and_number() {
        assert_eq!(
            parse_invoice_number("INV-0042").unwrap(),
            ("INV-".to_string(), 42)
        );
        assert_eq!(parse_invoice_number("SAF7").unwrap(), ("SAF".to_string(), 7));
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(parse_invoice_number("0042").is_err());
        assert!(parse_invoice_number("INV-").is_err());
        assert!(parse_invoice_number("INV-42A").is_err());
        assert!(parse_invoice_number("IN V-42").is_err());
        assert!(parse_invoice_number("").is_err());
    }

    #[test]
    fn renders_padded() {
        assert_eq!(InvoiceSequence::render("INV-", 7), "INV-007");
        assert_eq!(InvoiceSequence::render("INV-", 1234), "INV-1234");
    }

    #[test]
    fn method_round_trips() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Card,
            PaymentMethod::Upi,
            PaymentMethod::BankTransfer,
        ] {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
    }
}
