//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

pub mod notifications;

pub use notifications::NotificationService;

use crate::repositories::Repositories;
use crate::services::notifications::MailDispatcher;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub notifications: NotificationService,
}

impl Services {
    /// Creates a new Services instance from repositories and the mail
    /// dispatcher.
    pub fn new(repos: Repositories, dispatcher: MailDispatcher) -> Self {
        Self {
            notifications: NotificationService::new(
                repos.appointments,
                repos.establishments,
                dispatcher,
            ),
        }
    }
}
