use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notifications";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GlowPlan Notify",
        description = "Transactional notification service for GlowPlan bookings",
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::readiness_check,
        crate::api::handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = NOTIFICATION_TAG, description = "Appointment notification endpoints"),
    )
)]
pub struct ApiDoc;
