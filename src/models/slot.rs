use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Number of half-hour entries in a standard workday grid (09:00 to 16:30).
pub const WORKDAY_SLOT_COUNT: usize = 16;

// A bookable slot as returned by the availability provider.
// Labels use the 12-hour clock, e.g. "09:00 AM".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub label: String,
    pub available: bool,
}

// One cell of a doctor's editable grid. Labels use the 24-hour clock,
// e.g. "09:30".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub label: String,
    pub available: bool,
}

// A doctor's editable grid for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAvailability {
    pub date: NaiveDate,
    pub slots: Vec<AvailabilitySlot>,
}

/// Default workday grid: half-hour entries from 09:00 through 16:30, all
/// unavailable until the doctor opens them up.
pub fn default_workday_slots() -> Vec<AvailabilitySlot> {
    let mut slots = Vec::with_capacity(WORKDAY_SLOT_COUNT);
    for hour in 9..17 {
        slots.push(AvailabilitySlot {
            label: format!("{:02}:00", hour),
            available: false,
        });
        slots.push(AvailabilitySlot {
            label: format!("{:02}:30", hour),
            available: false,
        });
    }
    slots
}
