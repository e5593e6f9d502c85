use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::appointment::{
    AppointmentModality, AppointmentParty, AppointmentRecord, AppointmentStatus,
};

/// In-memory appointment book shared by the portal's views.
///
/// `append` and `update_status` are the only mutations. Records are never
/// deleted, which keeps the sequential id scheme collision-free.
pub struct AppointmentStore {
    records: Mutex<Vec<AppointmentRecord>>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Store pre-loaded with the portal's demo records.
    pub fn with_demo_data() -> Self {
        let records = vec![
            AppointmentRecord {
                id: "1".to_string(),
                party: AppointmentParty::Patient {
                    doctor_name: "Dr. Emily Carter".to_string(),
                    specialty: "Cardiology".to_string(),
                },
                date: "2024-08-15".to_string(),
                time: "10:00 AM".to_string(),
                status: AppointmentStatus::Confirmed,
                modality: AppointmentModality::InPerson,
            },
            AppointmentRecord {
                id: "2".to_string(),
                party: AppointmentParty::Doctor {
                    patient_name: "Alice Johnson".to_string(),
                    service: "General Checkup".to_string(),
                },
                date: "2024-08-16".to_string(),
                time: "02:30 PM".to_string(),
                status: AppointmentStatus::Completed,
                modality: AppointmentModality::Telehealth,
            },
            AppointmentRecord {
                id: "3".to_string(),
                party: AppointmentParty::Patient {
                    doctor_name: "Dr. Ben Miller".to_string(),
                    specialty: "Pediatrics".to_string(),
                },
                date: "2024-07-20".to_string(),
                time: "11:00 AM".to_string(),
                status: AppointmentStatus::Cancelled,
                modality: AppointmentModality::InPerson,
            },
        ];

        Self {
            records: Mutex::new(records),
        }
    }

    /// Append a new record, assigning the next sequential id. Returns the
    /// stored record.
    pub fn append(
        &self,
        party: AppointmentParty,
        date: String,
        time: String,
        status: AppointmentStatus,
        modality: AppointmentModality,
    ) -> AppointmentRecord {
        let mut records = self.records.lock();
        let record = AppointmentRecord {
            id: (records.len() + 1).to_string(),
            party,
            date,
            time,
            status,
            modality,
        };
        records.push(record.clone());
        info!(
            "Stored appointment {} ({} {})",
            record.id, record.date, record.time
        );
        record
    }

    /// Transition a record's status. Returns false when no record has the
    /// given id.
    pub fn update_status(&self, id: &str, status: AppointmentStatus) -> bool {
        let mut records = self.records.lock();
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                info!("Appointment {} status: {} -> {}", id, record.status, status);
                record.status = status;
                true
            }
            None => {
                warn!("No appointment with id {}", id);
                false
            }
        }
    }

    pub fn list(&self) -> Vec<AppointmentRecord> {
        self.records.lock().clone()
    }

    /// Records rendered for the patient: visits with a doctor.
    pub fn patient_view(&self) -> Vec<AppointmentRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| matches!(record.party, AppointmentParty::Patient { .. }))
            .cloned()
            .collect()
    }

    /// Records rendered for the doctor: booked patients and services.
    pub fn doctor_view(&self) -> Vec<AppointmentRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| matches!(record.party, AppointmentParty::Doctor { .. }))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the shared store handle the portal pages hold, seeded with the
/// demo records.
pub fn create_appointment_store() -> Arc<AppointmentStore> {
    Arc::new(AppointmentStore::with_demo_data())
}
