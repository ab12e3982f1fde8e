//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::MailConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::services::notifications::MailDispatcher;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and mail
    /// settings.
    ///
    /// The mail credential is injected here, once, at construction; an
    /// empty key builds a soft-disabled dispatcher.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    /// * `mail` - Outbound mail configuration
    pub fn new(pool: AsyncDbPool, mail: &MailConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        let dispatcher = MailDispatcher::from_config(mail);
        let services = Services::new(repos, dispatcher);
        Self {
            services,
            db_pool: pool,
        }
    }
}
