//! Typed WhatsApp notifications and the delivery log.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, round2};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingConfirmation,
    PaymentReceived,
    DeliveryReminder,
    ReturnReminder,
    Invoice,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationKind::BookingConfirmation => "booking_confirmation",
            NotificationKind::PaymentReceived => "payment_received",
            NotificationKind::DeliveryReminder => "delivery_reminder",
            NotificationKind::ReturnReminder => "return_reminder",
            NotificationKind::Invoice => "invoice",
        };
        write!(f, "{s}")
    }
}

impl FromStr for NotificationKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking_confirmation" => Ok(NotificationKind::BookingConfirmation),
            "payment_received" => Ok(NotificationKind::PaymentReceived),
            "delivery_reminder" => Ok(NotificationKind::DeliveryReminder),
            "return_reminder" => Ok(NotificationKind::ReturnReminder),
            "invoice" => Ok(NotificationKind::Invoice),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown notification type: {other}"
            ))),
        }
    }
}

/// A business notification with everything needed to render its WATI
/// template parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum WhatsAppNotification {
    BookingConfirmation {
        customer_name: String,
        booking_number: String,
        booking_date: String,
        total_amount: f64,
    },
    PaymentReceived {
        customer_name: String,
        booking_number: String,
        amount_paid: f64,
        remaining_balance: f64,
    },
    DeliveryReminder {
        customer_name: String,
        booking_number: String,
        delivery_date: String,
        delivery_time: String,
    },
    ReturnReminder {
        customer_name: String,
        booking_number: String,
        return_date: String,
    },
    Invoice {
        customer_name: String,
        booking_number: String,
        invoice_url: String,
    },
}

impl WhatsAppNotification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            WhatsAppNotification::BookingConfirmation { .. } => {
                NotificationKind::BookingConfirmation
            }
            WhatsAppNotification::PaymentReceived { .. } => NotificationKind::PaymentReceived,
            WhatsAppNotification::DeliveryReminder { .. } => NotificationKind::DeliveryReminder,
            WhatsAppNotification::ReturnReminder { .. } => NotificationKind::ReturnReminder,
            WhatsAppNotification::Invoice { .. } => NotificationKind::Invoice,
        }
    }

    /// WATI template the notification renders through. The invoice template
    /// is named differently from its notification type upstream.
    pub fn template_name(&self) -> &'static str {
        match self.kind() {
            NotificationKind::BookingConfirmation => "booking_confirmation",
            NotificationKind::PaymentReceived => "payment_received",
            NotificationKind::DeliveryReminder => "delivery_reminder",
            NotificationKind::ReturnReminder => "return_reminder",
            NotificationKind::Invoice => "invoice_sent",
        }
    }

    /// Ordered positional template parameters.
    pub fn parameters(&self) -> Vec<String> {
        match self {
            WhatsAppNotification::BookingConfirmation {
                customer_name,
                booking_number,
                booking_date,
                total_amount,
            } => vec![
                customer_name.clone(),
                booking_number.clone(),
                booking_date.clone(),
                format!("₹{}", format_inr(*total_amount)),
            ],
            WhatsAppNotification::PaymentReceived {
                customer_name,
                booking_number,
                amount_paid,
                remaining_balance,
            } => vec![
                customer_name.clone(),
                booking_number.clone(),
                format!("₹{}", format_inr(*amount_paid)),
                format!("₹{}", format_inr(*remaining_balance)),
            ],
            WhatsAppNotification::DeliveryReminder {
                customer_name,
                booking_number,
                delivery_date,
                delivery_time,
            } => vec![
                customer_name.clone(),
                booking_number.clone(),
                delivery_date.clone(),
                delivery_time.clone(),
            ],
            WhatsAppNotification::ReturnReminder {
                customer_name,
                booking_number,
                return_date,
            } => vec![
                customer_name.clone(),
                booking_number.clone(),
                return_date.clone(),
            ],
            WhatsAppNotification::Invoice {
                customer_name,
                booking_number,
                ..
            } => vec![customer_name.clone(), booking_number.clone()],
        }
    }

    /// Invoices also push the PDF as a document after the template.
    pub fn document(&self) -> Option<(String, String)> {
        match self {
            WhatsAppNotification::Invoice {
                booking_number,
                invoice_url,
                ..
            } => Some((
                invoice_url.clone(),
                format!("Invoice for booking {booking_number}"),
            )),
            _ => None,
        }
    }
}

/// Amounts the way Indian customers read them: grouped thousands, paise
/// only when present.
pub fn format_inr(amount: f64) -> String {
    let rounded = round2(amount);
    let negative = rounded < 0.0;
    let cents_total = (rounded.abs() * 100.0).round() as i64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents != 0 {
        if cents % 10 == 0 {
            out.push_str(&format!(".{}", cents / 10));
        } else {
            out.push_str(&format!(".{cents:02}"));
        }
    }
    out
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

impl Display for NotificationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for NotificationStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(NotificationStatus::Sent),
            "failed" => Ok(NotificationStatus::Failed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown notification status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NotificationLog {
    pub id: i32,
    pub franchise_id: i32,
    pub notification_type: NotificationKind,
    pub phone: String,
    pub message: String,
    pub status: NotificationStatus,
    pub error: Option<String>,
    pub booking_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewNotificationLog {
    pub franchise_id: i32,
    pub notification_type: NotificationKind,
    pub phone: String,
    pub message: String,
    pub status: NotificationStatus,
    pub error: Option<String>,
    pub booking_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inr_groups_thousands() {
        assert_eq!(format_inr(0.0), "0");
        assert_eq!(format_inr(999.0), "999");
        assert_eq!(format_inr(12_345.0), "12,345");
        assert_eq!(format_inr(1_234_567.0), "1,234,567");
        assert_eq!(format_inr(12_345.5), "12,345.5");
        assert_eq!(format_inr(12_345.75), "12,345.75");
        assert_eq!(format_inr(-1_500.0), "-1,500");
    }

    #[test]
    fn booking_confirmation_parameters() {
        let n = WhatsAppNotification::BookingConfirmation {
            customer_name: "Asha".into(),
            booking_number: "PKG-1718000000-123".into(),
            booking_date: "2025-06-10".into(),
            total_amount: 45_000.0,
        };
        assert_eq!(n.template_name(), "booking_confirmation");
        assert_eq!(
            n.parameters(),
            vec!["Asha", "PKG-1718000000-123", "2025-06-10", "₹45,000"]
        );
        assert!(n.document().is_none());
    }

    #[test]
    fn invoice_uses_sent_template_and_document() {
        let n = WhatsAppNotification::Invoice {
            customer_name: "Ravi".into(),
            booking_number: "BO-1".into(),
            invoice_url: "https://files.example/inv.pdf".into(),
        };
        assert_eq!(n.template_name(), "invoice_sent");
        assert_eq!(n.parameters(), vec!["Ravi", "BO-1"]);
        assert_eq!(
            n.document(),
            Some((
                "https://files.example/inv.pdf".to_string(),
                "Invoice for booking BO-1".to_string()
            ))
        );
    }

    #[test]
    fn payment_parameters_formatted() {
        let n = WhatsAppNotification::PaymentReceived {
            customer_name: "Asha".into(),
            booking_number: "BO-9".into(),
            amount_paid: 5_000.0,
            remaining_balance: 1_250.5,
        };
        assert_eq!(n.parameters()[2], "₹5,000");
        assert_eq!(n.parameters()[3], "₹1,250.5");
    }
}
