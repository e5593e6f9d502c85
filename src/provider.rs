use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ScheduleError;
use crate::models::slot::{AvailabilitySlot, TimeSlot};

/// Backend seam for the booking workflow.
///
/// The portal never talks to a transport directly. The slot picker and the
/// availability editor are handed an implementation of this trait and call
/// it whenever the selected date or doctor changes (fetch) or an edited
/// grid is persisted (save).
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    /// List the bookable slots for one calendar date, optionally narrowed
    /// to a single doctor.
    async fn fetch_slots(
        &self,
        date: NaiveDate,
        doctor_id: Option<&str>,
    ) -> Result<Vec<TimeSlot>, ScheduleError>;

    /// Persist a doctor's edited grid for one calendar date.
    async fn save_availability(
        &self,
        date: NaiveDate,
        slots: &[AvailabilitySlot],
    ) -> Result<(), ScheduleError>;
}
