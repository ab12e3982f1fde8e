//! Appointment repository for async database reads.
//!
//! Fetches one appointment by primary key with its establishment, service
//! and client-profile relations joined in a single query.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Appointment, AppointmentDetails, ClientProfile, Establishment, Service,
};

/// Appointment repository
#[derive(Clone)]
pub struct AppointmentRepository {
    pool: AsyncDbPool,
}

impl AppointmentRepository {
    /// Creates a new AppointmentRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Fetches an appointment snapshot with its joined relations.
    ///
    /// The establishment join is required; service and client profile are
    /// left joins and may be absent.
    ///
    /// # Arguments
    /// * `appointment_id` - The ID of the appointment to fetch
    ///
    /// # Returns
    /// Some(AppointmentDetails) if found, None otherwise
    pub async fn find_with_relations(
        &self,
        appointment_id: Uuid,
    ) -> AppResult<Option<AppointmentDetails>> {
        use crate::schema::{appointments, client_profiles, establishments, services};

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        let row = appointments::table
            .filter(appointments::id.eq(appointment_id))
            .inner_join(establishments::table)
            .left_join(services::table)
            .left_join(client_profiles::table)
            .select((
                Appointment::as_select(),
                Establishment::as_select(),
                Option::<Service>::as_select(),
                Option::<ClientProfile>::as_select(),
            ))
            .first::<(
                Appointment,
                Establishment,
                Option<Service>,
                Option<ClientProfile>,
            )>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        Ok(row.map(
            |(appointment, establishment, service, client_profile)| AppointmentDetails {
                appointment,
                establishment,
                service,
                client_profile,
            },
        ))
    }
}
