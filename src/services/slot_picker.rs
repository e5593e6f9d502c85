use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::errors::ScheduleError;
use crate::models::appointment::BookingSelection;
use crate::models::slot::TimeSlot;
use crate::provider::AvailabilityProvider;

/// Fetch lifecycle for the currently selected date and doctor pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing selected yet.
    Idle,
    /// A fetch is in flight; any previous slot list is gone.
    Loading,
    /// The latest fetch completed with this slot list (possibly empty).
    Ready(Vec<TimeSlot>),
    /// The latest fetch failed; no slot list is shown.
    Failed,
}

struct PickerInner {
    selected_date: Option<NaiveDate>,
    selected_doctor: Option<String>,
    selected_slot: Option<TimeSlot>,
    state: FetchState,
    // Monotonic request id. A completing fetch applies its result only if
    // it still holds the latest id, so a slow response for an old selection
    // can never overwrite a newer one.
    seq: u64,
}

/// Date and doctor selection plus the slot list fetched for that selection.
///
/// Cloning yields a handle to the same state, so an in-flight fetch and a
/// newer selection can overlap; the request id decides which response
/// lands. Re-selecting the current date still refetches, there is no
/// caching.
#[derive(Clone)]
pub struct SlotPicker {
    provider: Arc<dyn AvailabilityProvider>,
    inner: Arc<Mutex<PickerInner>>,
}

impl SlotPicker {
    pub fn new(provider: Arc<dyn AvailabilityProvider>) -> Self {
        Self {
            provider,
            inner: Arc::new(Mutex::new(PickerInner {
                selected_date: None,
                selected_doctor: None,
                selected_slot: None,
                state: FetchState::Idle,
                seq: 0,
            })),
        }
    }

    /// Select a calendar date and fetch its slots.
    ///
    /// Dates before today are not selectable and leave the picker
    /// untouched. While the fetch is pending the state is `Loading` and any
    /// previously chosen slot is cleared.
    pub async fn select_date(&self, date: NaiveDate) -> Result<(), ScheduleError> {
        if date < Local::now().date_naive() {
            warn!("Ignoring selection of past date {}", date);
            return Ok(());
        }

        let (seq, doctor) = {
            let mut inner = self.inner.lock();
            inner.selected_date = Some(date);
            inner.selected_slot = None;
            inner.state = FetchState::Loading;
            inner.seq += 1;
            (inner.seq, inner.selected_doctor.clone())
        };

        self.run_fetch(seq, date, doctor).await
    }

    /// Select a doctor filter, or clear it with `None`. Refetches when a
    /// date is already selected; otherwise just records the filter.
    pub async fn select_doctor(&self, doctor_id: Option<&str>) -> Result<(), ScheduleError> {
        let (seq, date) = {
            let mut inner = self.inner.lock();
            inner.selected_doctor = doctor_id.map(str::to_string);
            let date = match inner.selected_date {
                Some(date) => date,
                None => {
                    debug!("Doctor filter set to {:?} with no date selected", doctor_id);
                    return Ok(());
                }
            };
            inner.selected_slot = None;
            inner.state = FetchState::Loading;
            inner.seq += 1;
            (inner.seq, date)
        };

        self.run_fetch(seq, date, doctor_id.map(str::to_string)).await
    }

    async fn run_fetch(
        &self,
        seq: u64,
        date: NaiveDate,
        doctor: Option<String>,
    ) -> Result<(), ScheduleError> {
        debug!(
            "Fetching slots for {} (doctor: {:?}, request {})",
            date, doctor, seq
        );
        let result = self.provider.fetch_slots(date, doctor.as_deref()).await;

        let mut inner = self.inner.lock();
        if inner.seq != seq {
            debug!(
                "Discarding stale slot response for {} (request {} superseded by {})",
                date, seq, inner.seq
            );
            return Ok(());
        }

        match result {
            Ok(slots) => {
                if slots.is_empty() {
                    info!("No slots available for {}", date);
                }
                inner.state = FetchState::Ready(slots);
                Ok(())
            }
            Err(err) => {
                error!("Slot fetch failed for {}: {}", date, err);
                inner.state = FetchState::Failed;
                Err(err)
            }
        }
    }

    /// Choose one of the fetched slots by id.
    ///
    /// Picking an unavailable slot, an unknown id, or anything while no
    /// slot list is ready is a no-op. On success returns the combined
    /// date-time selection ready for confirmation.
    pub fn select_slot(&self, slot_id: &str) -> Option<BookingSelection> {
        let mut inner = self.inner.lock();
        let date = inner.selected_date?;

        let slot = match &inner.state {
            FetchState::Ready(slots) => slots.iter().find(|slot| slot.id == slot_id).cloned(),
            _ => None,
        }?;

        if !slot.available {
            debug!(
                "Ignoring selection of unavailable slot {} ({})",
                slot.id, slot.label
            );
            return None;
        }

        let time = match parse_slot_label(&slot.label) {
            Some(time) => time,
            None => {
                warn!("Slot {} has unparseable label {:?}", slot.id, slot.label);
                return None;
            }
        };

        info!("Slot selected: {} on {}", slot.label, date);
        let selection = BookingSelection {
            date_time: NaiveDateTime::new(date, time),
            doctor_id: inner.selected_doctor.clone(),
        };
        inner.selected_slot = Some(slot);
        Some(selection)
    }

    pub fn fetch_state(&self) -> FetchState {
        self.inner.lock().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.inner.lock().state, FetchState::Loading)
    }

    /// The slot list from the latest completed fetch, empty unless the
    /// state is `Ready`.
    pub fn slots(&self) -> Vec<TimeSlot> {
        match &self.inner.lock().state {
            FetchState::Ready(slots) => slots.clone(),
            _ => Vec::new(),
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.inner.lock().selected_date
    }

    pub fn selected_doctor(&self) -> Option<String> {
        self.inner.lock().selected_doctor.clone()
    }

    pub fn selected_slot(&self) -> Option<TimeSlot> {
        self.inner.lock().selected_slot.clone()
    }
}

/// Parse a 12-hour clock label like "09:30 AM" or "02:00 PM" into a time of
/// day. "12:xx AM" is just after midnight and "12:xx PM" just after noon.
pub fn parse_slot_label(label: &str) -> Option<NaiveTime> {
    let (clock, meridiem) = label.trim().split_once(' ')?;
    let (hours, minutes) = clock.split_once(':')?;

    let mut hour: u32 = hours.parse().ok()?;
    let minute: u32 = minutes.parse().ok()?;

    match meridiem {
        "AM" => {
            if hour == 12 {
                hour = 0;
            }
        }
        "PM" => {
            if hour != 12 {
                hour = hour.checked_add(12)?;
            }
        }
        _ => return None,
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
