use chrono::{Duration, Local, NaiveDate};

use crate::models::slot::{default_workday_slots, DailyAvailability};

/// Install a log subscriber so test output is visible when RUST_LOG is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A weekday (a Friday) far enough in the future that tests never race the
/// calendar
pub fn future_weekday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 3, 30).unwrap()
}

/// The Saturday right after `future_weekday`
pub fn future_saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 3, 31).unwrap()
}

/// The Sunday right after `future_weekday`
pub fn future_sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 4, 1).unwrap()
}

/// The Monday after that weekend, for date-switch scenarios
pub fn next_weekday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 4, 2).unwrap()
}

/// A date that is always in the past
pub fn past_date() -> NaiveDate {
    Local::now().date_naive() - Duration::days(1)
}

/// Generate a stored grid for one date with the first two morning entries
/// opened up
pub fn generate_morning_grid(date: NaiveDate) -> DailyAvailability {
    let mut slots = default_workday_slots();
    slots[0].available = true; // 09:00
    slots[1].available = true; // 09:30
    DailyAvailability { date, slots }
}
