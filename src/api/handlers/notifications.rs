//! Notification API handlers.
//!
//! One HTTP POST endpoint per notification intent. Each handler is a
//! stateless request/response operation: one store read, zero-to-two mail
//! dispatches, one JSON reply. Precondition failures short-circuit with
//! specific statuses (404 unknown record, 400 missing client email); every
//! other failure surfaces as a generic 500.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{
    BookingCreatedRequest, BookingCreatedResponse, ClientCancellationRequest,
    ConfirmationRequest, ConfirmationResponse, ErrorResponse,
    EstablishmentCancellationRequest, ModificationRequest, NotificationResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates notification-related routes.
///
/// Routes:
/// - POST /booking-created             - New-booking notice (+ optional client confirmation)
/// - POST /confirmation                - Booking confirmation to the client
/// - POST /client-cancellation         - Cancellation notice to the establishment
/// - POST /establishment-cancellation  - Cancellation notice to the client
/// - POST /modification                - Modification notice to the client
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(booking_created))
        .routes(routes!(confirmation))
        .routes(routes!(client_cancellation))
        .routes(routes!(establishment_cancellation))
        .routes(routes!(modification))
}

/// POST /api/notifications/booking-created - New-booking notice
///
/// Always notifies the establishment; additionally sends the client
/// confirmation when `autoConfirm` is set. The establishment is resolved
/// independently of the appointment.
#[utoipa::path(
    post,
    path = "/booking-created",
    tag = NOTIFICATION_TAG,
    request_body = BookingCreatedRequest,
    responses(
        (status = 200, description = "Notices processed", body = BookingCreatedResponse),
        (status = 404, description = "Appointment or establishment not found", body = ErrorResponse),
        (status = 500, description = "Store or mail failure", body = ErrorResponse)
    )
)]
async fn booking_created(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BookingCreatedRequest>,
) -> AppResult<Json<BookingCreatedResponse>> {
    let outcome = state
        .services
        .notifications
        .notify_booking_created(
            payload.appointment_id,
            payload.establishment_id,
            payload.auto_confirm,
        )
        .await?;

    Ok(Json(BookingCreatedResponse {
        success: true,
        message: "Notifications de nouvelle réservation traitées".to_string(),
        establishment_notified: outcome.establishment_notified,
        client_notified: outcome.client_notified,
    }))
}

/// POST /api/notifications/confirmation - Booking confirmation
///
/// Sends the confirmation email to the client. `emailSent` is false when
/// outbound mail is disabled by configuration.
#[utoipa::path(
    post,
    path = "/confirmation",
    tag = NOTIFICATION_TAG,
    request_body = ConfirmationRequest,
    responses(
        (status = 200, description = "Confirmation processed", body = ConfirmationResponse),
        (status = 400, description = "Appointment has no client email", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Store or mail failure", body = ErrorResponse)
    )
)]
async fn confirmation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ConfirmationRequest>,
) -> AppResult<Json<ConfirmationResponse>> {
    let email_sent = state
        .services
        .notifications
        .notify_confirmation(payload.appointment_id)
        .await?;

    Ok(Json(ConfirmationResponse {
        success: true,
        message: "Notification de confirmation traitée".to_string(),
        email_sent,
    }))
}

/// POST /api/notifications/client-cancellation - Client cancelled
///
/// Notifies the establishment that the client cancelled the appointment.
#[utoipa::path(
    post,
    path = "/client-cancellation",
    tag = NOTIFICATION_TAG,
    request_body = ClientCancellationRequest,
    responses(
        (status = 200, description = "Cancellation processed", body = NotificationResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Store or mail failure", body = ErrorResponse)
    )
)]
async fn client_cancellation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ClientCancellationRequest>,
) -> AppResult<Json<NotificationResponse>> {
    state
        .services
        .notifications
        .notify_client_cancellation(payload.appointment_id)
        .await?;

    Ok(Json(NotificationResponse {
        success: true,
        message: "Annulation transmise à l'établissement".to_string(),
    }))
}

/// POST /api/notifications/establishment-cancellation - Establishment cancelled
///
/// Notifies the client that the establishment cancelled, with an optional
/// free-text reason.
#[utoipa::path(
    post,
    path = "/establishment-cancellation",
    tag = NOTIFICATION_TAG,
    request_body = EstablishmentCancellationRequest,
    responses(
        (status = 200, description = "Cancellation processed", body = NotificationResponse),
        (status = 400, description = "Appointment has no client email", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Store or mail failure", body = ErrorResponse)
    )
)]
async fn establishment_cancellation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EstablishmentCancellationRequest>,
) -> AppResult<Json<NotificationResponse>> {
    state
        .services
        .notifications
        .notify_establishment_cancellation(payload.appointment_id, payload.reason)
        .await?;

    Ok(Json(NotificationResponse {
        success: true,
        message: "Annulation transmise au client".to_string(),
    }))
}

/// POST /api/notifications/modification - Appointment modified
///
/// Notifies the client of a modification, rendering the structured
/// before/after changes into the notice.
#[utoipa::path(
    post,
    path = "/modification",
    tag = NOTIFICATION_TAG,
    request_body = ModificationRequest,
    responses(
        (status = 200, description = "Modification processed", body = NotificationResponse),
        (status = 400, description = "Appointment has no client email", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Store or mail failure", body = ErrorResponse)
    )
)]
async fn modification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ModificationRequest>,
) -> AppResult<Json<NotificationResponse>> {
    state
        .services
        .notifications
        .notify_modification(payload.appointment_id, payload.changes)
        .await?;

    Ok(Json(NotificationResponse {
        success: true,
        message: "Modification transmise au client".to_string(),
    }))
}
