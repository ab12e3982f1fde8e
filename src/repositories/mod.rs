//! Repository layer for data access operations.
//!
//! All access is read-only: the notification pipeline performs point-in-time
//! reads and never mutates the store.

mod appointment_repo;
mod establishment_repo;

pub use appointment_repo::AppointmentRepository;
pub use establishment_repo::EstablishmentRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub appointments: AppointmentRepository,
    pub establishments: EstablishmentRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            appointments: AppointmentRepository::new(pool.clone()),
            establishments: EstablishmentRepository::new(pool),
        }
    }
}
