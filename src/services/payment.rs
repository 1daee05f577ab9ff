//! Payments against bookings and per-franchise invoice numbering.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::payment::{InvoiceSequence, NewPayment, Payment, parse_invoice_number};
use crate::domain::user::{Module, Role};
use crate::dto::payment::{BookingSettlement, IssuedInvoice};
use crate::forms::payment::{InvoiceSequenceForm, RecordPaymentForm};
use crate::repository::{BookingReader, PaymentReader, PaymentWriter, SettingsReader};
use crate::services::{ServiceError, ServiceResult};

const DEFAULT_INVOICE_PREFIX: &str = "INV-";

pub fn record_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RecordPaymentForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Payment>
where
    R: PaymentWriter + BookingReader + ?Sized,
{
    user.ensure(Role::Staff, Module::Invoices)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let booking = repo
        .get_booking_by_id(form.booking_id, franchise_id)?
        .ok_or_else(|| ServiceError::Validation("booking not found".to_string()))?;
    if booking.is_quote {
        return Err(ServiceError::Validation(
            "payments cannot be recorded against a quote".to_string(),
        ));
    }

    Ok(repo.record_payment(&NewPayment {
        franchise_id,
        booking_id: booking.id,
        amount: form.amount,
        method: form.method,
        reference: form.reference,
        notes: form.notes,
        received_by: user.id(),
    })?)
}

/// Money state of one booking: totals plus the payment trail.
pub fn get_settlement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    booking_id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<BookingSettlement>
where
    R: PaymentReader + BookingReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Invoices)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let booking = repo
        .get_booking_by_id(booking_id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    let payments = repo.list_payments_for_booking(booking_id, franchise_id)?;
    Ok(BookingSettlement::new(&booking, payments))
}

pub fn get_invoice_sequence<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Option<InvoiceSequence>>
where
    R: PaymentReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Invoices)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.get_invoice_sequence(franchise_id)?)
}

/// Records the last invoice number written outside the system so the
/// counter continues from it.
pub fn set_invoice_sequence<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: InvoiceSequenceForm,
) -> ServiceResult<InvoiceSequence>
where
    R: PaymentWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Invoices)?;
    form.validate()?;
    let franchise_id = user.franchise_for(form.franchise_id)?;

    let (prefix, last_number) = parse_invoice_number(form.invoice_number.trim())
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    Ok(repo.set_invoice_sequence(franchise_id, &prefix, last_number)?)
}

/// Issues the next invoice number for a booking. Seeds the counter with the
/// company settings prefix when the franchise has none yet.
pub fn issue_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    booking_id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<IssuedInvoice>
where
    R: PaymentWriter + BookingReader + SettingsReader + ?Sized,
{
    user.ensure(Role::Staff, Module::Invoices)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let booking = repo
        .get_booking_by_id(booking_id, franchise_id)?
        .ok_or(ServiceError::NotFound)?;
    if booking.is_quote {
        return Err(ServiceError::Validation(
            "invoices are issued for bookings, not quotes".to_string(),
        ));
    }

    let default_prefix = repo
        .get_company_settings(franchise_id)?
        .map(|s| s.invoice_prefix)
        .unwrap_or_else(|| DEFAULT_INVOICE_PREFIX.to_string());
    let invoice_number = repo.next_invoice_number(franchise_id, &default_prefix)?;
    Ok(IssuedInvoice {
        booking_id: booking.id,
        booking_number: booking.booking_number,
        invoice_number,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::user::{User, UserPermissions};
    use crate::repository::mock::MockRepository;

    fn caller(role: Role, franchise_id: Option<i32>) -> AuthenticatedUser {
        let created = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        AuthenticatedUser {
            user: User {
                id: 7,
                franchise_id,
                name: "Asha".into(),
                email: "asha@safawala.test".into(),
                password_hash: String::new(),
                role,
                permissions: UserPermissions::for_role(role),
                is_active: true,
                created_at: created,
                updated_at: created,
            },
            session_id: "s".into(),
        }
    }

    #[test]
    fn invoice_sequence_requires_franchise_admin() {
        let repo = MockRepository::new();
        let form = InvoiceSequenceForm {
            franchise_id: None,
            invoice_number: "SAF-040".into(),
        };
        let err = set_invoice_sequence(&repo, &caller(Role::Staff, Some(1)), form).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden));
    }

    #[test]
    fn invoice_sequence_parses_prefix_and_counter() {
        let mut repo = MockRepository::new();
        repo.expect_set_invoice_sequence()
            .withf(|fid, prefix, last| *fid == 1 && prefix == "SAF-" && *last == 40)
            .returning(|fid, prefix, last| {
                Ok(InvoiceSequence {
                    id: 1,
                    franchise_id: fid,
                    prefix: prefix.to_string(),
                    last_number: last,
                    updated_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                })
            });

        let sequence = set_invoice_sequence(
            &repo,
            &caller(Role::FranchiseAdmin, Some(1)),
            InvoiceSequenceForm {
                franchise_id: None,
                invoice_number: "SAF-040".into(),
            },
        )
        .unwrap();
        assert_eq!(sequence.prefix, "SAF-");
        assert_eq!(sequence.last_number, 40);
    }

    #[test]
    fn malformed_invoice_numbers_are_rejected() {
        let repo = MockRepository::new();
        let err = set_invoice_sequence(
            &repo,
            &caller(Role::FranchiseAdmin, Some(1)),
            InvoiceSequenceForm {
                franchise_id: None,
                invoice_number: "040SAF".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
