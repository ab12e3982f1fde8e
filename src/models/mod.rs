//! Data models for the appointment store.
//!
//! All models are read-only snapshots: the notification pipeline never
//! writes to the store.

mod appointment;

pub use appointment::{
    Appointment, AppointmentDetails, ClientProfile, Establishment, Service,
};
