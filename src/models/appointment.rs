//! Appointment models for database reads.
//!
//! An appointment row references exactly one establishment and at most one
//! service and one client profile. The joins may be absent; display helpers
//! on [`AppointmentDetails`] encode the documented fallback rules so callers
//! never poke at nullable fields directly.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// Display fallback when the service join is absent.
const UNSPECIFIED_SERVICE: &str = "Non spécifié";

/// Display fallback when no client name can be resolved.
const FALLBACK_CLIENT_NAME: &str = "Client";

// ============================================================================
// Row models
// ============================================================================

/// Appointment query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Appointment {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub service_id: Option<Uuid>,
    pub client_profile_id: Option<Uuid>,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_instagram: Option<String>,
    pub notes: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Client profile query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::client_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientProfile {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Establishment query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::establishments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Service query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub price: Option<BigDecimal>,
    pub duration_minutes: i32,
    pub created_at: NaiveDateTime,
}

// ============================================================================
// Joined snapshot
// ============================================================================

/// One appointment with its joined relations, as returned by
/// `AppointmentRepository::find_with_relations`.
///
/// This is the point-in-time snapshot the notification pipeline works from.
#[derive(Debug, Clone)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub establishment: Establishment,
    pub service: Option<Service>,
    pub client_profile: Option<ClientProfile>,
}

impl AppointmentDetails {
    /// Resolves the client display name.
    ///
    /// Fallback chain, tried in order until one yields a usable value:
    /// 1. first/last name stored on the appointment itself
    /// 2. first/last name from the linked client profile
    /// 3. the raw stored display name
    /// 4. the literal `"Client"`
    pub fn client_display_name(&self) -> String {
        if let Some(name) = join_name_parts(
            self.appointment.client_first_name.as_deref(),
            self.appointment.client_last_name.as_deref(),
        ) {
            return name;
        }

        if let Some(profile) = &self.client_profile {
            if let Some(name) =
                join_name_parts(profile.first_name.as_deref(), profile.last_name.as_deref())
            {
                return name;
            }
        }

        if let Some(name) = non_empty(self.appointment.client_name.as_deref()) {
            return name.to_string();
        }

        FALLBACK_CLIENT_NAME.to_string()
    }

    /// Resolves the client email address: the appointment's own email first,
    /// then the linked profile's. Returns `None` when neither is present,
    /// which is a hard precondition failure for client-facing intents.
    pub fn client_email(&self) -> Option<&str> {
        non_empty(self.appointment.client_email.as_deref()).or_else(|| {
            self.client_profile
                .as_ref()
                .and_then(|p| non_empty(p.email.as_deref()))
        })
    }

    /// Service display name, falling back when the join is absent.
    pub fn service_name(&self) -> &str {
        self.service
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or(UNSPECIFIED_SERVICE)
    }

    /// Service price when the join is present and the price is set.
    pub fn service_price(&self) -> Option<&BigDecimal> {
        self.service.as_ref().and_then(|s| s.price.as_ref())
    }
}

/// Joins non-empty first/last name parts with a space.
///
/// Returns `None` when both parts are missing or blank.
fn join_name_parts(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Treats blank strings as absent values.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
