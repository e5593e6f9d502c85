//! Clinic Booking Service
//!
//! This library implements the appointment workflow of a clinic patient
//! portal: fetching bookable time slots, editing a doctor's availability
//! grid, and confirming bookings into a shared appointment store.
//! Everything runs against a simulated backend with artificial latency;
//! there is no real transport behind it.
//!
//! # Modules
//!
//! - `provider`: the `AvailabilityProvider` seam the workflow is built on
//! - `provider_mock`: the simulated clinic backend with canned slot data
//! - `services`: slot picker, availability editor, appointment store, and
//!   the booking coordinator
//! - `models`: slots, grids, and appointment records
//!
//! # Workflow
//!
//! A `SlotPicker` fetches slots whenever its date or doctor selection
//! changes, tracking the fetch lifecycle explicitly and discarding stale
//! responses. Picking an available slot yields a `BookingSelection`, which
//! the `BookingCoordinator` turns into a stored `AppointmentRecord` on
//! confirmation. On the doctor side, an `AvailabilityEditor` runs the
//! edit, toggle, save or cancel cycle over a half-hour grid against the
//! same provider.

pub mod errors;
pub mod models;
pub mod provider;
pub mod provider_mock;
pub mod services;

// Include provider mock tests
#[cfg(test)]
#[path = "provider_mock_test.rs"]
mod provider_mock_tests;

// Shared fixtures and end-to-end workflow tests
#[cfg(test)]
mod tests;

// Re-export the main workflow types for ease of use
pub use errors::ScheduleError;
pub use models::appointment::{
    AppointmentModality, AppointmentParty, AppointmentRecord, AppointmentStatus,
    BookingSelection, Doctor,
};
pub use models::slot::{
    default_workday_slots, AvailabilitySlot, DailyAvailability, TimeSlot, WORKDAY_SLOT_COUNT,
};
pub use provider::AvailabilityProvider;
pub use provider_mock::{demo_doctors, weekday_slots, MockScheduleProvider};
pub use services::availability::AvailabilityEditor;
pub use services::booking::{BookingCoordinator, BookingReview};
pub use services::slot_picker::{parse_slot_label, FetchState, SlotPicker};
pub use services::store::{create_appointment_store, AppointmentStore};
