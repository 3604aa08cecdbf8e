//! Event entity: events and registrations.

pub mod model;
pub mod registration;

pub use model::{CreateEvent, Event, EventFilter, EventStatus};
pub use registration::{EventRegistration, RegistrationStatus};
