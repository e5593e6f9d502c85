use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// Lifecycle of a booked appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

// How the visit is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentModality {
    InPerson,
    Telehealth,
}

impl fmt::Display for AppointmentModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentModality::InPerson => "In-Person",
            AppointmentModality::Telehealth => "Telehealth",
        };
        write!(f, "{}", label)
    }
}

/// Counterpart details for whichever side of the visit the record is
/// rendered for. A patient's record names the doctor and specialty; a
/// doctor's record names the patient and the booked service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "viewer_role", rename_all = "snake_case")]
pub enum AppointmentParty {
    Patient {
        doctor_name: String,
        specialty: String,
    },
    Doctor {
        patient_name: String,
        service: String,
    },
}

// A booked appointment as shown in the portal's appointment tables.
// `date` is an ISO calendar day ("2024-08-15") and `time` a 12-hour label
// ("10:00 AM"), both kept as display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    #[serde(flatten)]
    pub party: AppointmentParty,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub modality: AppointmentModality,
}

// A slot choice awaiting confirmation. Exists only between slot selection
// and the confirm or dismiss decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub date_time: NaiveDateTime,
    pub doctor_id: Option<String>,
}

// Directory entry used to resolve a doctor id for display and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
}
