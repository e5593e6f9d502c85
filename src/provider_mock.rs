use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use dotenv::dotenv;
use parking_lot::Mutex;
use std::env;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::errors::ScheduleError;
use crate::models::appointment::Doctor;
use crate::models::slot::{AvailabilitySlot, TimeSlot};
use crate::provider::AvailabilityProvider;

// Default latencies for the simulated backend.
const DEFAULT_FETCH_DELAY_MS: u64 = 500;
const DEFAULT_SAVE_DELAY_MS: u64 = 1000;

/// Simulated clinic backend: canned weekday slots, empty weekends, and
/// artificial latency. The whole portal runs against this; there is no real
/// transport behind it.
///
/// Failure toggles and a ledger of saved grids are exposed so callers can
/// script outages and observe what was persisted.
pub struct MockScheduleProvider {
    fetch_delay: Mutex<Duration>,
    save_delay: Mutex<Duration>,
    fail_fetch: Mutex<bool>,
    fail_save: Mutex<bool>,
    fetch_calls: Mutex<usize>,
    saved_grids: Mutex<Vec<(NaiveDate, Vec<AvailabilitySlot>)>>,
}

impl MockScheduleProvider {
    pub fn new() -> Self {
        Self::with_delays(
            Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            Duration::from_millis(DEFAULT_SAVE_DELAY_MS),
        )
    }

    pub fn with_delays(fetch_delay: Duration, save_delay: Duration) -> Self {
        Self {
            fetch_delay: Mutex::new(fetch_delay),
            save_delay: Mutex::new(save_delay),
            fail_fetch: Mutex::new(false),
            fail_save: Mutex::new(false),
            fetch_calls: Mutex::new(0),
            saved_grids: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider with latencies from environment variables,
    /// falling back to the defaults.
    ///
    /// Reads `CLINIC_FETCH_DELAY_MS` and `CLINIC_SAVE_DELAY_MS`.
    pub fn from_env() -> Self {
        // Load environment variables from .env file if available
        dotenv().ok();

        let fetch_ms = env::var("CLINIC_FETCH_DELAY_MS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_FETCH_DELAY_MS);
        let save_ms = env::var("CLINIC_SAVE_DELAY_MS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_SAVE_DELAY_MS);

        info!(
            "Mock schedule provider configured (fetch {}ms, save {}ms)",
            fetch_ms, save_ms
        );

        Self::with_delays(
            Duration::from_millis(fetch_ms),
            Duration::from_millis(save_ms),
        )
    }

    // Adjusting the fetch delay only affects calls that start afterwards;
    // calls already in flight keep the delay they started with.
    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock() = delay;
    }

    pub fn set_save_delay(&self, delay: Duration) {
        *self.save_delay.lock() = delay;
    }

    pub fn fetch_delay(&self) -> Duration {
        *self.fetch_delay.lock()
    }

    pub fn save_delay(&self) -> Duration {
        *self.save_delay.lock()
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock() = fail;
    }

    pub fn set_fail_save(&self, fail: bool) {
        *self.fail_save.lock() = fail;
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock()
    }

    /// Grids accepted by `save_availability`, in save order.
    pub fn saved_grids(&self) -> Vec<(NaiveDate, Vec<AvailabilitySlot>)> {
        self.saved_grids.lock().clone()
    }
}

impl Default for MockScheduleProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityProvider for MockScheduleProvider {
    async fn fetch_slots(
        &self,
        date: NaiveDate,
        doctor_id: Option<&str>,
    ) -> Result<Vec<TimeSlot>, ScheduleError> {
        let delay = *self.fetch_delay.lock();
        *self.fetch_calls.lock() += 1;

        debug!("Fetching slots for {} (doctor: {:?})", date, doctor_id);
        tokio::time::sleep(delay).await;

        if *self.fail_fetch.lock() {
            warn!("Simulated fetch failure for {}", date);
            return Err(ScheduleError::FetchFailed(
                "simulated backend outage".to_string(),
            ));
        }

        // The clinic is closed on weekends
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            info!("No slots on {} ({})", date, date.weekday());
            return Ok(Vec::new());
        }

        Ok(weekday_slots())
    }

    async fn save_availability(
        &self,
        date: NaiveDate,
        slots: &[AvailabilitySlot],
    ) -> Result<(), ScheduleError> {
        let delay = *self.save_delay.lock();

        info!("Saving {} slots for {}", slots.len(), date);
        tokio::time::sleep(delay).await;

        if *self.fail_save.lock() {
            warn!("Simulated save failure for {}", date);
            return Err(ScheduleError::SaveFailed(
                "simulated backend outage".to_string(),
            ));
        }

        self.saved_grids.lock().push((date, slots.to_vec()));
        info!("Availability saved for {}", date);
        Ok(())
    }
}

/// The canned weekday slot list. "09:30 AM" is pre-booked; the rest are
/// open.
pub fn weekday_slots() -> Vec<TimeSlot> {
    vec![
        TimeSlot {
            id: "slot1".to_string(),
            label: "09:00 AM".to_string(),
            available: true,
        },
        TimeSlot {
            id: "slot2".to_string(),
            label: "09:30 AM".to_string(),
            available: false,
        },
        TimeSlot {
            id: "slot3".to_string(),
            label: "10:00 AM".to_string(),
            available: true,
        },
        TimeSlot {
            id: "slot4".to_string(),
            label: "02:00 PM".to_string(),
            available: true,
        },
    ]
}

/// The demo doctor directory shown in the portal's booking filter.
pub fn demo_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "doc123".to_string(),
            name: "Dr. Emily Carter".to_string(),
            specialty: "Cardiology".to_string(),
        },
        Doctor {
            id: "doc456".to_string(),
            name: "Dr. Ben Miller".to_string(),
            specialty: "Pediatrics".to_string(),
        },
    ]
}
