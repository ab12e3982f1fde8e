//! Notification service for the booking lifecycle emails.
//!
//! One orchestration method per intent. Every invocation is stateless:
//! one store read, zero-to-two mail dispatches, no retries, no persistence
//! of the outcome. Preconditions are checked in order and the first failure
//! short-circuits; concurrent invocations for the same appointment are not
//! coordinated at this layer.

use uuid::Uuid;

use super::mailer::MailDispatcher;
use super::templates::{self, AppointmentChanges, AppointmentView};
use crate::error::{AppError, AppResult};
use crate::models::{AppointmentDetails, Establishment};
use crate::repositories::{AppointmentRepository, EstablishmentRepository};

/// Outcome of the new-booking flow: which of the two notices went out.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingCreatedOutcome {
    pub establishment_notified: bool,
    pub client_notified: bool,
}

/// Notification service handling the five appointment intents.
#[derive(Clone)]
pub struct NotificationService {
    appointments: AppointmentRepository,
    establishments: EstablishmentRepository,
    dispatcher: MailDispatcher,
}

impl NotificationService {
    /// Creates a new NotificationService.
    ///
    /// # Arguments
    /// * `appointments` - Repository for appointment snapshots
    /// * `establishments` - Repository for establishment lookups
    /// * `dispatcher` - Mail dispatcher (possibly soft-disabled)
    pub fn new(
        appointments: AppointmentRepository,
        establishments: EstablishmentRepository,
        dispatcher: MailDispatcher,
    ) -> Self {
        Self {
            appointments,
            establishments,
            dispatcher,
        }
    }

    // ========================================================================
    // Intents
    // ========================================================================

    /// New-booking flow: always notifies the establishment, and additionally
    /// confirms to the client when `auto_confirm` is set. This is the one
    /// branching point in the pipeline.
    ///
    /// The establishment is resolved independently of the appointment join;
    /// either lookup failing is a NotFound.
    pub async fn notify_booking_created(
        &self,
        appointment_id: Uuid,
        establishment_id: Uuid,
        auto_confirm: bool,
    ) -> AppResult<BookingCreatedOutcome> {
        let details = self.load_appointment(appointment_id).await?;
        let establishment = self
            .establishments
            .find_by_id(establishment_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("establishment", "id", establishment_id.to_string())
            })?;

        Self::send_booking_created(&self.dispatcher, &details, &establishment, auto_confirm).await
    }

    /// Confirms the appointment to the client.
    ///
    /// # Returns
    /// Whether an email actually went out (false when sending is disabled).
    pub async fn notify_confirmation(&self, appointment_id: Uuid) -> AppResult<bool> {
        let details = self.load_appointment(appointment_id).await?;
        Self::send_confirmation(&self.dispatcher, &details).await
    }

    /// Notifies the establishment that the client cancelled.
    pub async fn notify_client_cancellation(&self, appointment_id: Uuid) -> AppResult<bool> {
        let details = self.load_appointment(appointment_id).await?;
        Self::send_client_cancellation(&self.dispatcher, &details).await
    }

    /// Notifies the client that the establishment cancelled, with an
    /// optional free-text reason.
    pub async fn notify_establishment_cancellation(
        &self,
        appointment_id: Uuid,
        reason: Option<String>,
    ) -> AppResult<bool> {
        let details = self.load_appointment(appointment_id).await?;
        Self::send_establishment_cancellation(&self.dispatcher, &details, reason.as_deref()).await
    }

    /// Notifies the client that the appointment was modified.
    pub async fn notify_modification(
        &self,
        appointment_id: Uuid,
        changes: AppointmentChanges,
    ) -> AppResult<bool> {
        let details = self.load_appointment(appointment_id).await?;
        Self::send_modification(&self.dispatcher, &details, &changes).await
    }

    // ========================================================================
    // Send steps
    //
    // Separated from the store read so the render/dispatch path is testable
    // against an in-memory transport.
    // ========================================================================

    pub(crate) async fn send_booking_created(
        dispatcher: &MailDispatcher,
        details: &AppointmentDetails,
        establishment: &Establishment,
        auto_confirm: bool,
    ) -> AppResult<BookingCreatedOutcome> {
        let view = AppointmentView::from_details(details);
        let mut outcome = BookingCreatedOutcome::default();

        match non_empty(establishment.email.as_deref()) {
            Some(to) => {
                let email = templates::booking_created_notice(&view);
                outcome.establishment_notified = dispatcher.dispatch(to, &email).await?;
            }
            None => {
                tracing::warn!(
                    establishment_id = %establishment.id,
                    "establishment has no email, skipping new-booking notice"
                );
            }
        }

        if auto_confirm {
            match details.client_email() {
                Some(to) => {
                    let email = templates::booking_confirmation(&view);
                    outcome.client_notified = dispatcher.dispatch(to, &email).await?;
                }
                None => {
                    tracing::warn!(
                        appointment_id = %details.appointment.id,
                        "appointment has no client email, skipping auto-confirmation"
                    );
                }
            }
        }

        Ok(outcome)
    }

    pub(crate) async fn send_confirmation(
        dispatcher: &MailDispatcher,
        details: &AppointmentDetails,
    ) -> AppResult<bool> {
        let to = Self::require_client_email(details)?;
        let email = templates::booking_confirmation(&AppointmentView::from_details(details));
        dispatcher.dispatch(&to, &email).await
    }

    pub(crate) async fn send_client_cancellation(
        dispatcher: &MailDispatcher,
        details: &AppointmentDetails,
    ) -> AppResult<bool> {
        let view = AppointmentView::from_details(details);
        let Some(to) = non_empty(details.establishment.email.as_deref()) else {
            tracing::warn!(
                establishment_id = %details.establishment.id,
                "establishment has no email, skipping cancellation notice"
            );
            return Ok(false);
        };
        let email = templates::client_cancellation_notice(&view);
        dispatcher.dispatch(to, &email).await
    }

    pub(crate) async fn send_establishment_cancellation(
        dispatcher: &MailDispatcher,
        details: &AppointmentDetails,
        reason: Option<&str>,
    ) -> AppResult<bool> {
        let to = Self::require_client_email(details)?;
        let email = templates::establishment_cancellation(
            &AppointmentView::from_details(details),
            reason,
        );
        dispatcher.dispatch(&to, &email).await
    }

    pub(crate) async fn send_modification(
        dispatcher: &MailDispatcher,
        details: &AppointmentDetails,
        changes: &AppointmentChanges,
    ) -> AppResult<bool> {
        let to = Self::require_client_email(details)?;
        let email =
            templates::modification_notice(&AppointmentView::from_details(details), changes);
        dispatcher.dispatch(&to, &email).await
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    async fn load_appointment(&self, appointment_id: Uuid) -> AppResult<AppointmentDetails> {
        self.appointments
            .find_with_relations(appointment_id)
            .await?
            .ok_or_else(|| AppError::not_found("appointment", "id", appointment_id.to_string()))
    }

    /// Client-facing intents require a resolvable client email; absence is a
    /// hard precondition failure, not a soft default.
    fn require_client_email(details: &AppointmentDetails) -> AppResult<String> {
        details
            .client_email()
            .map(String::from)
            .ok_or_else(|| AppError::bad_request("appointment has no client email"))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, ClientProfile, Service};
    use crate::services::notifications::mailer::MemoryMailer;
    use bigdecimal::BigDecimal;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;
    use std::sync::Arc;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn establishment() -> Establishment {
        Establishment {
            id: Uuid::new_v4(),
            name: "Salon Lumière".to_string(),
            email: Some("contact@salon-lumiere.fr".to_string()),
            phone: Some("01 23 45 67 89".to_string()),
            address: None,
            city: Some("Lyon".to_string()),
            created_at: at(8, 0),
        }
    }

    fn details() -> AppointmentDetails {
        let establishment = establishment();
        AppointmentDetails {
            appointment: Appointment {
                id: Uuid::new_v4(),
                establishment_id: establishment.id,
                service_id: None,
                client_profile_id: None,
                client_first_name: Some("Marie".to_string()),
                client_last_name: Some("Dupont".to_string()),
                client_name: None,
                client_email: Some("marie@example.com".to_string()),
                client_phone: Some("06 12 34 56 78".to_string()),
                client_instagram: None,
                notes: None,
                start_time: at(14, 30),
                end_time: at(15, 15),
                created_at: at(8, 0),
                updated_at: at(8, 0),
            },
            establishment,
            service: Some(Service {
                id: Uuid::new_v4(),
                establishment_id: Uuid::new_v4(),
                name: "Coupe".to_string(),
                price: Some(BigDecimal::from_str("45").unwrap()),
                duration_minutes: 45,
                created_at: at(8, 0),
            }),
            client_profile: None,
        }
    }

    fn dispatcher() -> (MailDispatcher, Arc<MemoryMailer>) {
        let mailer = Arc::new(MemoryMailer::new());
        let dispatcher =
            MailDispatcher::new(mailer.clone(), "GlowPlan <notifications@glowplan.fr>");
        (dispatcher, mailer)
    }

    fn profile(email: Option<&str>) -> ClientProfile {
        ClientProfile {
            id: Uuid::new_v4(),
            first_name: None,
            last_name: None,
            email: email.map(String::from),
            phone: None,
            created_at: at(8, 0),
        }
    }

    #[tokio::test]
    async fn confirmation_goes_to_client() {
        let (dispatcher, mailer) = dispatcher();

        let sent = NotificationService::send_confirmation(&dispatcher, &details())
            .await
            .unwrap();
        assert!(sent);

        let messages = mailer.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "marie@example.com");
        assert!(messages[0].subject.contains("Salon Lumière"));
        assert!(messages[0].html.contains("14:30 - 15:15"));
        assert!(messages[0].html.contains("45€"));
    }

    #[tokio::test]
    async fn confirmation_without_client_email_is_bad_request_and_sends_nothing() {
        let (dispatcher, mailer) = dispatcher();
        let mut details = details();
        details.appointment.client_email = None;

        let result = NotificationService::send_confirmation(&dispatcher, &details).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
        assert!(mailer.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn confirmation_resolves_email_through_profile_fallback() {
        let (dispatcher, mailer) = dispatcher();
        let mut details = details();
        details.appointment.client_email = None;
        details.client_profile = Some(profile(Some("profil@example.com")));

        let sent = NotificationService::send_confirmation(&dispatcher, &details)
            .await
            .unwrap();
        assert!(sent);
        assert_eq!(mailer.sent_messages()[0].to, "profil@example.com");
    }

    #[tokio::test]
    async fn disabled_dispatcher_reports_not_sent_without_failing() {
        let dispatcher = MailDispatcher::disabled("GlowPlan <notifications@glowplan.fr>");

        let sent = NotificationService::send_confirmation(&dispatcher, &details())
            .await
            .unwrap();
        assert!(!sent);
    }

    #[tokio::test]
    async fn booking_created_notifies_establishment_only_by_default() {
        let (dispatcher, mailer) = dispatcher();
        let details = details();
        let establishment = details.establishment.clone();

        let outcome = NotificationService::send_booking_created(
            &dispatcher,
            &details,
            &establishment,
            false,
        )
        .await
        .unwrap();

        assert!(outcome.establishment_notified);
        assert!(!outcome.client_notified);

        let messages = mailer.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "contact@salon-lumiere.fr");
    }

    #[tokio::test]
    async fn booking_created_with_auto_confirm_fans_out_to_client() {
        let (dispatcher, mailer) = dispatcher();
        let details = details();
        let establishment = details.establishment.clone();

        let outcome = NotificationService::send_booking_created(
            &dispatcher,
            &details,
            &establishment,
            true,
        )
        .await
        .unwrap();

        assert!(outcome.establishment_notified);
        assert!(outcome.client_notified);

        let messages = mailer.sent_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].to, "contact@salon-lumiere.fr");
        assert_eq!(messages[1].to, "marie@example.com");
    }

    #[tokio::test]
    async fn booking_created_skips_client_when_email_missing() {
        let (dispatcher, mailer) = dispatcher();
        let mut details = details();
        details.appointment.client_email = None;
        let establishment = details.establishment.clone();

        let outcome = NotificationService::send_booking_created(
            &dispatcher,
            &details,
            &establishment,
            true,
        )
        .await
        .unwrap();

        assert!(outcome.establishment_notified);
        assert!(!outcome.client_notified);
        assert_eq!(mailer.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn client_cancellation_goes_to_establishment() {
        let (dispatcher, mailer) = dispatcher();

        let sent = NotificationService::send_client_cancellation(&dispatcher, &details())
            .await
            .unwrap();
        assert!(sent);

        let messages = mailer.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "contact@salon-lumiere.fr");
        assert!(messages[0].html.contains("Marie Dupont"));
    }

    #[tokio::test]
    async fn client_cancellation_skips_when_establishment_has_no_email() {
        let (dispatcher, mailer) = dispatcher();
        let mut details = details();
        details.establishment.email = None;

        let sent = NotificationService::send_client_cancellation(&dispatcher, &details)
            .await
            .unwrap();
        assert!(!sent);
        assert!(mailer.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn establishment_cancellation_carries_reason() {
        let (dispatcher, mailer) = dispatcher();

        NotificationService::send_establishment_cancellation(
            &dispatcher,
            &details(),
            Some("Fermeture exceptionnelle"),
        )
        .await
        .unwrap();

        let messages = mailer.sent_messages();
        assert_eq!(messages[0].to, "marie@example.com");
        assert!(messages[0].html.contains("Fermeture exceptionnelle"));
    }

    #[tokio::test]
    async fn modification_requires_client_email() {
        let (dispatcher, mailer) = dispatcher();
        let mut details = details();
        details.appointment.client_email = None;

        let result = NotificationService::send_modification(
            &dispatcher,
            &details,
            &AppointmentChanges::default(),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
        assert!(mailer.sent_messages().is_empty());
    }
}
