//! Diesel models for payments and invoice sequences.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::payment::{
    InvoiceSequence as DomainInvoiceSequence, NewPayment as DomainNewPayment,
    Payment as DomainPayment,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::payments)]
pub struct Payment {
    pub id: i32,
    pub franchise_id: i32,
    pub booking_id: i32,
    pub amount: f64,
    pub payment_method: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub received_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub franchise_id: i32,
    pub booking_id: i32,
    pub amount: f64,
    pub payment_method: String,
    pub reference: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub received_by: i32,
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: payment.id,
            franchise_id: payment.franchise_id,
            booking_id: payment.booking_id,
            amount: payment.amount,
            method: payment.payment_method.parse()?,
            reference: payment.reference,
            notes: payment.notes,
            received_by: payment.received_by,
            created_at: payment.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPayment> for NewPayment<'a> {
    fn from(payment: &'a DomainNewPayment) -> Self {
        Self {
            franchise_id: payment.franchise_id,
            booking_id: payment.booking_id,
            amount: payment.amount,
            payment_method: payment.method.to_string(),
            reference: payment.reference.as_deref(),
            notes: payment.notes.as_deref(),
            received_by: payment.received_by,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::invoice_sequences)]
pub struct InvoiceSequence {
    pub id: i32,
    pub franchise_id: i32,
    pub prefix: String,
    pub last_number: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::invoice_sequences)]
pub struct NewInvoiceSequence<'a> {
    pub franchise_id: i32,
    pub prefix: &'a str,
    pub last_number: i32,
}

impl From<InvoiceSequence> for DomainInvoiceSequence {
    fn from(seq: InvoiceSequence) -> Self {
        Self {
            id: seq.id,
            franchise_id: seq.franchise_id,
            prefix: seq.prefix,
            last_number: seq.last_number,
            updated_at: seq.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;

    #[test]
    fn new_payment_renders_method_as_text() {
        let domain = DomainNewPayment {
            franchise_id: 1,
            booking_id: 9,
            amount: 2_500.0,
            method: PaymentMethod::BankTransfer,
            reference: Some("UTR123".to_string()),
            notes: None,
            received_by: 4,
        };
        let new: NewPayment = (&domain).into();
        assert_eq!(new.payment_method, "bank_transfer");
        assert_eq!(new.reference, Some("UTR123"));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let row = Payment {
            id: 1,
            franchise_id: 1,
            booking_id: 1,
            amount: 100.0,
            payment_method: "cheque".to_string(),
            reference: None,
            notes: None,
            received_by: 1,
            created_at: chrono::Utc::now().naive_utc(),
        };
        assert!(DomainPayment::try_from(row).is_err());
    }
}
