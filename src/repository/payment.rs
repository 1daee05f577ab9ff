//! Repository implementation for payments and invoice numbering.

use diesel::prelude::*;

use crate::{
    domain::payment::{InvoiceSequence, NewPayment, Payment},
    domain::types::round2,
    models::booking::Booking as DbBooking,
    models::payment::{
        InvoiceSequence as DbInvoiceSequence, NewInvoiceSequence as DbNewInvoiceSequence,
        NewPayment as DbNewPayment, Payment as DbPayment,
    },
    repository::{
        DieselRepository, PaymentReader, PaymentWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl PaymentReader for DieselRepository {
    fn list_payments_for_booking(
        &self,
        booking_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<Payment>> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        payments::table
            .filter(payments::booking_id.eq(booking_id))
            .filter(payments::franchise_id.eq(franchise_id))
            .order(payments::created_at.asc())
            .load::<DbPayment>(&mut conn)?
            .into_iter()
            .map(|db_payment| Payment::try_from(db_payment).map_err(RepositoryError::from))
            .collect()
    }

    fn get_invoice_sequence(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Option<InvoiceSequence>> {
        use crate::schema::invoice_sequences;

        let mut conn = self.conn()?;
        let sequence = invoice_sequences::table
            .filter(invoice_sequences::franchise_id.eq(franchise_id))
            .first::<DbInvoiceSequence>(&mut conn)
            .optional()?;

        Ok(sequence.map(Into::into))
    }
}

impl PaymentWriter for DieselRepository {
    fn record_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment> {
        use crate::schema::{bookings, payments};

        let mut conn = self.conn()?;

        let db_payment = conn.immediate_transaction::<DbPayment, RepositoryError, _>(|conn| {
            let db_booking = bookings::table
                .filter(bookings::id.eq(new_payment.booking_id))
                .filter(bookings::franchise_id.eq(new_payment.franchise_id))
                .first::<DbBooking>(conn)?;

            if db_booking.is_quote {
                return Err(RepositoryError::ValidationError(
                    "Payments cannot be recorded against a quote".to_string(),
                ));
            }
            if new_payment.amount <= 0.0 {
                return Err(RepositoryError::ValidationError(
                    "Payment amount must be positive".to_string(),
                ));
            }

            let new_paid = round2(db_booking.amount_paid + new_payment.amount);
            if new_paid > db_booking.total_amount {
                return Err(RepositoryError::ValidationError(
                    "Payment exceeds the remaining balance on this booking".to_string(),
                ));
            }

            let db_payment = diesel::insert_into(payments::table)
                .values(&DbNewPayment::from(new_payment))
                .get_result::<DbPayment>(conn)?;

            diesel::update(bookings::table.find(db_booking.id))
                .set((
                    bookings::amount_paid.eq(new_paid),
                    bookings::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            Ok(db_payment)
        })?;

        Payment::try_from(db_payment).map_err(RepositoryError::from)
    }

    fn set_invoice_sequence(
        &self,
        franchise_id: i32,
        prefix: &str,
        last_number: i32,
    ) -> RepositoryResult<InvoiceSequence> {
        use crate::schema::invoice_sequences;

        let mut conn = self.conn()?;
        let sequence = diesel::insert_into(invoice_sequences::table)
            .values(&DbNewInvoiceSequence {
                franchise_id,
                prefix,
                last_number,
            })
            .on_conflict(invoice_sequences::franchise_id)
            .do_update()
            .set((
                invoice_sequences::prefix.eq(prefix),
                invoice_sequences::last_number.eq(last_number),
                invoice_sequences::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<DbInvoiceSequence>(&mut conn)?;

        Ok(sequence.into())
    }

    fn next_invoice_number(
        &self,
        franchise_id: i32,
        default_prefix: &str,
    ) -> RepositoryResult<String> {
        use crate::schema::invoice_sequences;

        let mut conn = self.conn()?;

        let sequence = conn
            .immediate_transaction::<DbInvoiceSequence, diesel::result::Error, _>(|conn| {
                let existing = invoice_sequences::table
                    .filter(invoice_sequences::franchise_id.eq(franchise_id))
                    .first::<DbInvoiceSequence>(conn)
                    .optional()?;

                match existing {
                    Some(sequence) => diesel::update(invoice_sequences::table.find(sequence.id))
                        .set((
                            invoice_sequences::last_number.eq(sequence.last_number + 1),
                            invoice_sequences::updated_at.eq(diesel::dsl::now),
                        ))
                        .get_result::<DbInvoiceSequence>(conn),
                    None => diesel::insert_into(invoice_sequences::table)
                        .values(&DbNewInvoiceSequence {
                            franchise_id,
                            prefix: default_prefix,
                            last_number: 1,
                        })
                        .get_result::<DbInvoiceSequence>(conn),
                }
            })
            .map_err(RepositoryError::from)?;

        Ok(InvoiceSequence::render(
            &sequence.prefix,
            sequence.last_number,
        ))
    }
}
