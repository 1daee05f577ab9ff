//! WhatsApp notification sending and the delivery log.

use crate::auth::AuthenticatedUser;
use crate::domain::notification::{
    NewNotificationLog, NotificationLog, NotificationStatus, WhatsAppNotification, format_inr,
};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::forms::notification::NotifyForm;
use crate::integrations::whatsapp::WatiClient;
use crate::repository::{
    NotificationListQuery, NotificationReader, NotificationWriter, SettingsReader,
};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult};

pub struct NotificationListParams {
    pub franchise_id: Option<i32>,
    pub booking_id: Option<i32>,
    pub status: Option<NotificationStatus>,
    pub page: usize,
}

/// Renders the message text the customer reads, mirroring the WATI template
/// bodies.
fn render_message(notification: &WhatsAppNotification) -> String {
    match notification {
        WhatsAppNotification::BookingConfirmation {
            customer_name,
            booking_number,
            booking_date,
            total_amount,
        } => format!(
            "Hi {customer_name}, your booking {booking_number} for {booking_date} is confirmed. \
             Total amount: ₹{}. Thank you for choosing us!",
            format_inr(*total_amount)
        ),
        WhatsAppNotification::PaymentReceived {
            customer_name,
            booking_number,
            amount_paid,
            remaining_balance,
        } => format!(
            "Hi {customer_name}, we received ₹{} against booking {booking_number}. \
             Remaining balance: ₹{}.",
            format_inr(*amount_paid),
            format_inr(*remaining_balance)
        ),
        WhatsAppNotification::DeliveryReminder {
            customer_name,
            booking_number,
            delivery_date,
            delivery_time,
        } => format!(
            "Hi {customer_name}, a reminder that your booking {booking_number} will be \
             delivered on {delivery_date} at {delivery_time}."
        ),
        WhatsAppNotification::ReturnReminder {
            customer_name,
            booking_number,
            return_date,
        } => format!(
            "Hi {customer_name}, a reminder that the items for booking {booking_number} \
             are due back on {return_date}."
        ),
        WhatsAppNotification::Invoice {
            customer_name,
            booking_number,
            invoice_url,
        } => format!(
            "Hi {customer_name}, the invoice for booking {booking_number} is ready: \
             {invoice_url}"
        ),
    }
}

fn into_notification(form: NotifyForm) -> (String, Option<i32>, WhatsAppNotification) {
    match form {
        NotifyForm::BookingConfirmation {
            phone,
            customer_name,
            booking_number,
            booking_date,
            total_amount,
            booking_id,
        } => (
            phone,
            booking_id,
            WhatsAppNotification::BookingConfirmation {
                customer_name,
                booking_number,
                booking_date,
                total_amount,
            },
        ),
        NotifyForm::PaymentReceived {
            phone,
            customer_name,
            booking_number,
            amount_paid,
            remaining_balance,
            booking_id,
        } => (
            phone,
            booking_id,
            WhatsAppNotification::PaymentReceived {
                customer_name,
                booking_number,
                amount_paid,
                remaining_balance,
            },
        ),
        NotifyForm::DeliveryReminder {
            phone,
            customer_name,
            booking_number,
            delivery_date,
            delivery_time,
            booking_id,
        } => (
            phone,
            booking_id,
            WhatsAppNotification::DeliveryReminder {
                customer_name,
                booking_number,
                delivery_date,
                delivery_time,
            },
        ),
        NotifyForm::ReturnReminder {
            phone,
            customer_name,
            booking_number,
            return_date,
            booking_id,
        } => (
            phone,
            booking_id,
            WhatsAppNotification::ReturnReminder {
                customer_name,
                booking_number,
                return_date,
            },
        ),
        NotifyForm::Invoice {
            phone,
            customer_name,
            booking_number,
            invoice_url,
            booking_id,
        } => (
            phone,
            booking_id,
            WhatsAppNotification::Invoice {
                customer_name,
                booking_number,
                invoice_url,
            },
        ),
    }
}

/// Sends one WhatsApp notification through WATI. Every attempt lands in the
/// notification log, failed sends included.
pub async fn send_notification<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: NotifyForm,
    franchise_id: Option<i32>,
) -> ServiceResult<NotificationLog>
where
    R: SettingsReader + NotificationWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let settings = repo
        .get_whatsapp_settings(franchise_id)?
        .filter(|s| s.enabled)
        .ok_or_else(|| {
            ServiceError::Conflict("WhatsApp notifications are not enabled".to_string())
        })?;
    let client = WatiClient::new(&settings)?;

    let (phone, booking_id, notification) = into_notification(form);
    if phone.trim().is_empty() {
        return Err(ServiceError::Validation("phone is required".to_string()));
    }
    let message = render_message(&notification);

    let (status, error) = match client.send_message(&phone, &message).await {
        Ok(()) => (NotificationStatus::Sent, None),
        Err(err) => (NotificationStatus::Failed, Some(err.to_string())),
    };
    if let Some(err) = &error {
        log::warn!("WhatsApp send to {phone} failed: {err}");
    }

    Ok(repo.log_notification(&NewNotificationLog {
        franchise_id,
        notification_type: notification.kind(),
        phone,
        message,
        status,
        error,
        booking_id,
    })?)
}

/// Connectivity probe for the settings screen.
pub async fn test_connection<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: SettingsReader + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Settings)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let settings = repo
        .get_whatsapp_settings(franchise_id)?
        .filter(|s| s.enabled)
        .ok_or_else(|| {
            ServiceError::Conflict("WhatsApp notifications are not enabled".to_string())
        })?;
    let client = WatiClient::new(&settings)?;
    client.test_connection().await?;
    Ok(())
}

pub fn list_notifications<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: NotificationListParams,
) -> ServiceResult<Paginated<NotificationLog>>
where
    R: NotificationReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Settings)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = NotificationListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(booking_id) = params.booking_id {
        query = query.booking(booking_id);
    }
    if let Some(status) = params.status {
        query = query.status(status);
    }

    let (total, logs) = repo.list_notifications(query)?;
    Ok(Paginated::new(total, page, DEFAULT_ITEMS_PER_PAGE, logs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_text_includes_amounts_and_numbers() {
        let message = render_message(&WhatsAppNotification::BookingConfirmation {
            customer_name: "Asha".into(),
            booking_number: "PKG-1718000000-123".into(),
            booking_date: "2025-06-10".into(),
            total_amount: 45_000.0,
        });
        assert!(message.contains("Asha"));
        assert!(message.contains("PKG-1718000000-123"));
        assert!(message.contains("₹45,000"));
    }

    #[test]
    fn invoice_message_carries_url() {
        let message = render_message(&WhatsAppNotification::Invoice {
            customer_name: "Ravi".into(),
            booking_number: "BO-7".into(),
            invoice_url: "https://files.example/inv.pdf".into(),
        });
        assert!(message.contains("https://files.example/inv.pdf"));
    }
}
