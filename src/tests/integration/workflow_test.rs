use std::sync::Arc;
use std::time::Duration;

use crate::models::appointment::{AppointmentParty, AppointmentStatus};
use crate::provider_mock::{demo_doctors, MockScheduleProvider};
use crate::services::availability::AvailabilityEditor;
use crate::services::booking::BookingCoordinator;
use crate::services::slot_picker::{FetchState, SlotPicker};
use crate::services::store::AppointmentStore;
use crate::tests::common::fixtures;

/// End-to-end workflow tests
#[cfg(test)]
mod workflow_tests {
    use super::*;

    // Helper to set up a portal environment with a fast simulated backend
    fn setup_portal() -> (
        Arc<MockScheduleProvider>,
        SlotPicker,
        BookingCoordinator,
        Arc<AppointmentStore>,
    ) {
        fixtures::init_tracing();
        let provider = Arc::new(MockScheduleProvider::with_delays(
            Duration::from_millis(10),
            Duration::from_millis(10),
        ));
        let store = Arc::new(AppointmentStore::with_demo_data());
        let picker = SlotPicker::new(provider.clone());
        let coordinator = BookingCoordinator::new(store.clone(), demo_doctors());
        (provider, picker, coordinator, store)
    }

    // Test the complete patient booking journey
    #[tokio::test]
    async fn test_complete_booking_workflow() {
        let (_provider, picker, coordinator, store) = setup_portal();

        // 1. Pick a weekday and wait for the slot list
        picker.select_date(fixtures::future_weekday()).await.unwrap();
        assert_eq!(picker.slots().len(), 4);

        // 2. Narrow to a doctor; the list is refetched
        picker.select_doctor(Some("doc123")).await.unwrap();
        assert!(matches!(picker.fetch_state(), FetchState::Ready(_)));

        // 3. Booked slots cannot be chosen
        assert!(picker.select_slot("slot2").is_none());

        // 4. Choose an open slot and review the booking
        let selection = picker.select_slot("slot3").unwrap();
        let review = coordinator.begin(selection);
        assert_eq!(review.doctor_name, "Dr. Emily Carter");
        assert_eq!(review.date, "2035-03-30");
        assert_eq!(review.time, "10:00 AM");

        // 5. Confirm and check the stored record
        let record = coordinator.confirm().unwrap();
        assert_eq!(record.id, "4"); // the demo data holds three records
        assert_eq!(record.status, AppointmentStatus::Confirmed);
        assert_eq!(record.date, "2035-03-30");
        assert_eq!(record.time, "10:00 AM");
        assert_eq!(store.len(), 4);
        assert_eq!(store.patient_view().len(), 3);
        assert_eq!(coordinator.pending(), None);
    }

    // Test booking without a doctor filter
    #[tokio::test]
    async fn test_any_available_booking_stores_fallbacks() {
        let (_provider, picker, coordinator, store) = setup_portal();

        picker.select_date(fixtures::future_weekday()).await.unwrap();
        let selection = picker.select_slot("slot4").unwrap();

        let review = coordinator.begin(selection);
        assert_eq!(review.doctor_name, "Any Available");
        assert_eq!(review.time, "02:00 PM");

        let record = coordinator.confirm().unwrap();
        assert_eq!(
            record.party,
            AppointmentParty::Patient {
                doctor_name: "Selected Doctor".to_string(),
                specialty: "N/A".to_string(),
            }
        );
        assert_eq!(store.len(), 4);
    }

    // Test dismissing the confirmation dialog
    #[tokio::test]
    async fn test_dismissed_booking_stores_nothing() {
        let (_provider, picker, coordinator, store) = setup_portal();

        picker.select_date(fixtures::future_weekday()).await.unwrap();
        let selection = picker.select_slot("slot1").unwrap();
        coordinator.begin(selection);
        coordinator.dismiss();

        assert!(coordinator.confirm().is_none());
        assert_eq!(store.len(), 3);
    }

    // Test that a weekend shows an empty list, not an error
    #[tokio::test]
    async fn test_weekend_workflow_shows_empty_list() {
        let (_provider, picker, _coordinator, _store) = setup_portal();

        picker.select_date(fixtures::future_sunday()).await.unwrap();
        assert_eq!(picker.fetch_state(), FetchState::Ready(Vec::new()));
        assert!(picker.select_slot("slot1").is_none());
    }

    // Test a fetch outage and recovery mid-journey
    #[tokio::test]
    async fn test_fetch_outage_and_recovery() {
        let (provider, picker, coordinator, store) = setup_portal();

        provider.set_fail_fetch(true);
        assert!(picker.select_date(fixtures::future_weekday()).await.is_err());
        assert_eq!(picker.fetch_state(), FetchState::Failed);
        assert!(picker.select_slot("slot1").is_none());

        // The backend recovers; re-selecting the same date refetches
        provider.set_fail_fetch(false);
        picker.select_date(fixtures::future_weekday()).await.unwrap();
        let selection = picker.select_slot("slot1").unwrap();
        coordinator.begin(selection);
        assert!(coordinator.confirm().is_some());
        assert_eq!(store.len(), 4);
    }

    // Test the doctor-side editing journey against the same provider
    #[tokio::test]
    async fn test_doctor_edits_and_saves_availability() {
        let (provider, _picker, _coordinator, _store) = setup_portal();
        let mut editor = AvailabilityEditor::with_schedule(
            provider.clone(),
            vec![fixtures::generate_morning_grid(fixtures::future_weekday())],
        );

        // 1. Load the stored grid
        editor.select_date(fixtures::future_weekday());
        assert!(editor.slots()[0].available);

        // 2. Open an edit session and close the 09:00 entry
        editor.begin_edit();
        assert!(editor.toggle_slot(0));

        // 3. A failed save keeps the session open
        provider.set_fail_save(true);
        assert!(editor.save().await.is_err());
        assert!(editor.is_editing());

        // 4. The retry succeeds and the grid lands in the ledger
        provider.set_fail_save(false);
        editor.save().await.unwrap();
        assert!(!editor.is_editing());
        let saved = provider.saved_grids();
        assert_eq!(saved.len(), 1);
        assert!(!saved[0].1[0].available);
        assert!(saved[0].1[1].available); // 09:30 stayed open
    }

    // Test that a slow response for an old date never lands on a new one
    #[tokio::test]
    async fn test_switching_dates_mid_fetch_keeps_newest_result() {
        fixtures::init_tracing();
        let provider = Arc::new(MockScheduleProvider::with_delays(
            Duration::from_millis(120),
            Duration::from_millis(10),
        ));
        let picker = SlotPicker::new(provider.clone());

        // 1. Start a slow fetch for a weekday
        let slow_picker = picker.clone();
        let weekday = fixtures::future_weekday();
        let slow = tokio::spawn(async move { slow_picker.select_date(weekday).await });
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(picker.is_loading());

        // 2. Switch to the Saturday while the first fetch is still pending
        provider.set_fetch_delay(Duration::from_millis(10));
        picker
            .select_date(fixtures::future_saturday())
            .await
            .unwrap();
        assert_eq!(picker.fetch_state(), FetchState::Ready(Vec::new()));

        // 3. The late weekday response must be discarded
        slow.await.unwrap().unwrap();
        assert_eq!(picker.selected_date(), Some(fixtures::future_saturday()));
        assert_eq!(picker.fetch_state(), FetchState::Ready(Vec::new()));
        assert!(picker.slots().is_empty());
    }
}
