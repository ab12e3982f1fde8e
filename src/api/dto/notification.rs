//! Notification-related DTOs for API requests and responses.
//!
//! Bodies use camelCase field names, matching what the booking frontend
//! sends and expects.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::services::notifications::AppointmentChanges;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to notify about a newly created booking.
///
/// The establishment notice is always attempted; the client confirmation is
/// sent only when `autoConfirm` is true.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "appointmentId": "8f9f1c2e-1111-4222-8333-444455556666",
    "establishmentId": "0a1b2c3d-7777-4888-9999-000011112222",
    "autoConfirm": true
}))]
pub struct BookingCreatedRequest {
    /// Identifier of the appointment to notify about
    pub appointment_id: Uuid,

    /// Identifier of the establishment to notify
    pub establishment_id: Uuid,

    /// Whether to also send the client confirmation immediately
    #[serde(default)]
    pub auto_confirm: bool,
}

/// Request to send the booking confirmation to the client.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    /// Identifier of the appointment to confirm
    pub appointment_id: Uuid,
}

/// Request to notify the establishment of a client-initiated cancellation.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientCancellationRequest {
    /// Identifier of the cancelled appointment
    pub appointment_id: Uuid,
}

/// Request to notify the client of an establishment-initiated cancellation.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentCancellationRequest {
    /// Identifier of the cancelled appointment
    pub appointment_id: Uuid,

    /// Optional free-text reason shown to the client
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Request to notify the client that the appointment was modified.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "appointmentId": "8f9f1c2e-1111-4222-8333-444455556666",
    "changes": {
        "date": {"oldDate": "10 mars", "newDate": "12 mars"}
    }
}))]
pub struct ModificationRequest {
    /// Identifier of the modified appointment
    pub appointment_id: Uuid,

    /// Structured before/after changes rendered into the notice
    #[serde(default)]
    pub changes: AppointmentChanges,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response for the new-booking flow with its per-recipient outcome.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub message: String,
    pub establishment_notified: bool,
    pub client_notified: bool,
}

/// Response for the confirmation intent.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResponse {
    pub success: bool,
    pub message: String,
    pub email_sent: bool,
}

/// Generic response for cancellation and modification intents.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_created_request_deserializes_camel_case() {
        let request: BookingCreatedRequest = serde_json::from_str(
            r#"{
                "appointmentId": "8f9f1c2e-1111-4222-8333-444455556666",
                "establishmentId": "0a1b2c3d-7777-4888-9999-000011112222",
                "autoConfirm": true
            }"#,
        )
        .unwrap();

        assert!(request.auto_confirm);
        assert_eq!(
            request.appointment_id.to_string(),
            "8f9f1c2e-1111-4222-8333-444455556666"
        );
    }

    #[test]
    fn auto_confirm_defaults_to_false() {
        let request: BookingCreatedRequest = serde_json::from_str(
            r#"{
                "appointmentId": "8f9f1c2e-1111-4222-8333-444455556666",
                "establishmentId": "0a1b2c3d-7777-4888-9999-000011112222"
            }"#,
        )
        .unwrap();

        assert!(!request.auto_confirm);
    }

    #[test]
    fn modification_request_defaults_to_empty_changes() {
        let request: ModificationRequest = serde_json::from_str(
            r#"{"appointmentId": "8f9f1c2e-1111-4222-8333-444455556666"}"#,
        )
        .unwrap();

        assert!(request.changes.lines().is_empty());
    }

    #[test]
    fn confirmation_response_serializes_camel_case() {
        let response = ConfirmationResponse {
            success: true,
            message: "ok".to_string(),
            email_sent: false,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["emailSent"], false);
        assert!(json.get("email_sent").is_none());
    }

    #[test]
    fn booking_created_response_serializes_camel_case() {
        let response = BookingCreatedResponse {
            success: true,
            message: "ok".to_string(),
            establishment_notified: true,
            client_notified: false,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["establishmentNotified"], true);
        assert_eq!(json["clientNotified"], false);
    }
}
