//! Establishment repository for async database reads.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Establishment;

/// Establishment repository
#[derive(Clone)]
pub struct EstablishmentRepository {
    pool: AsyncDbPool,
}

impl EstablishmentRepository {
    /// Creates a new EstablishmentRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Finds an establishment by ID.
    ///
    /// # Arguments
    /// * `establishment_id` - The ID of the establishment to find
    ///
    /// # Returns
    /// Some(Establishment) if found, None otherwise
    pub async fn find_by_id(
        &self,
        establishment_id: Uuid,
    ) -> AppResult<Option<Establishment>> {
        use crate::schema::establishments::dsl::*;

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        establishments
            .filter(id.eq(establishment_id))
            .select(Establishment::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
