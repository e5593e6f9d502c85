use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::appointment::{
    AppointmentModality, AppointmentParty, AppointmentRecord, AppointmentStatus,
    BookingSelection, Doctor,
};
use crate::services::store::AppointmentStore;

// Stored fallbacks when the selection carries no resolvable doctor.
const FALLBACK_DOCTOR_NAME: &str = "Selected Doctor";
const FALLBACK_SPECIALTY: &str = "N/A";

// Display-only label for a selection without a doctor filter. Never stored.
const ANY_AVAILABLE: &str = "Any Available";

/// What the confirmation step shows before the user commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReview {
    pub doctor_name: String,
    pub date: String,
    pub time: String,
}

/// Owner of the pending slot selection and the path from selection to
/// stored record.
///
/// At most one selection is pending at a time; starting a new one replaces
/// it. `confirm` is the only way a booking creates an appointment record.
pub struct BookingCoordinator {
    store: Arc<AppointmentStore>,
    doctors: Vec<Doctor>,
    pending: Mutex<Option<BookingSelection>>,
}

impl BookingCoordinator {
    pub fn new(store: Arc<AppointmentStore>, doctors: Vec<Doctor>) -> Self {
        Self {
            store,
            doctors,
            pending: Mutex::new(None),
        }
    }

    /// Open the confirmation step for a selection, replacing any pending
    /// one. Returns the details the confirmation dialog shows.
    pub fn begin(&self, selection: BookingSelection) -> BookingReview {
        let review = self.review_of(&selection);
        let mut pending = self.pending.lock();
        if pending.is_some() {
            debug!("Replacing pending booking selection");
        }
        *pending = Some(selection);
        review
    }

    /// Confirmation details for the pending selection, if one exists.
    pub fn review(&self) -> Option<BookingReview> {
        let pending = self.pending.lock();
        pending.as_ref().map(|selection| self.review_of(selection))
    }

    fn review_of(&self, selection: &BookingSelection) -> BookingReview {
        let doctor_name = self
            .lookup_doctor(selection)
            .map(|doctor| doctor.name.clone())
            .unwrap_or_else(|| ANY_AVAILABLE.to_string());
        BookingReview {
            doctor_name,
            date: format_record_date(selection.date_time),
            time: format_record_time(selection.date_time),
        }
    }

    fn lookup_doctor(&self, selection: &BookingSelection) -> Option<&Doctor> {
        let id = selection.doctor_id.as_deref()?;
        self.doctors.iter().find(|doctor| doctor.id == id)
    }

    /// Commit the pending selection as a confirmed in-person appointment.
    /// Returns the stored record, or `None` when nothing was pending.
    pub fn confirm(&self) -> Option<AppointmentRecord> {
        let selection = self.pending.lock().take()?;

        let doctor = self.lookup_doctor(&selection);
        let party = AppointmentParty::Patient {
            doctor_name: doctor
                .map(|doctor| doctor.name.clone())
                .unwrap_or_else(|| FALLBACK_DOCTOR_NAME.to_string()),
            specialty: doctor
                .map(|doctor| doctor.specialty.clone())
                .unwrap_or_else(|| FALLBACK_SPECIALTY.to_string()),
        };

        let record = self.store.append(
            party,
            format_record_date(selection.date_time),
            format_record_time(selection.date_time),
            AppointmentStatus::Confirmed,
            AppointmentModality::InPerson,
        );
        info!(
            "Booking confirmed for {} {} (record {})",
            record.date, record.time, record.id
        );
        Some(record)
    }

    /// Drop the pending selection without creating a record.
    pub fn dismiss(&self) {
        if self.pending.lock().take().is_some() {
            debug!("Booking selection dismissed");
        }
    }

    pub fn pending(&self) -> Option<BookingSelection> {
        self.pending.lock().clone()
    }
}

// Record dates are stored as ISO calendar days, e.g. "2024-08-15".
fn format_record_date(date_time: NaiveDateTime) -> String {
    date_time.format("%Y-%m-%d").to_string()
}

// Record times are stored as 12-hour labels, e.g. "10:00 AM".
fn format_record_time(date_time: NaiveDateTime) -> String {
    date_time.format("%I:%M %p").to_string()
}
