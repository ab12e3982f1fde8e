//! Appointment notification pipeline: formatting, templates, mail transport
//! and the per-intent orchestration service.

pub mod format;
pub mod mailer;
pub mod templates;

mod notification_service;

pub use mailer::{EmailSender, MailDispatcher, MemoryMailer, ResendMailer};
pub use notification_service::{BookingCreatedOutcome, NotificationService};
pub use templates::{AppointmentChanges, AppointmentView, RenderedEmail};
