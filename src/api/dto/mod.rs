//! Data transfer objects for API requests and responses.

mod error;
mod notification;

pub use error::ErrorResponse;
pub use notification::{
    BookingCreatedRequest, BookingCreatedResponse, ClientCancellationRequest,
    ConfirmationRequest, ConfirmationResponse, EstablishmentCancellationRequest,
    ModificationRequest, NotificationResponse,
};
