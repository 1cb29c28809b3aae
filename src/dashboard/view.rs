//! # Patient Dashboard State
//!
//! Owns the combined dashboard data and the last error. Calls take `&mut self`, so the
//! borrow checker already serializes them and no busy flag is needed.
//!
//! Booking an appointment and adding a medication are optimistic: after the backend
//! accepts the POST, the submitted record is appended locally without re-reading.

use crate::dashboard::DashboardBackend;
use crate::framework::{Outcome, ResourceError};
use crate::model::{Appointment, CombinedData, DoctorVisit, Medication, OutgoingMessage};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};

pub struct PatientDashboard<B> {
    backend: B,
    data: CombinedData,
    error: Option<String>,
}

impl<B: DashboardBackend> PatientDashboard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            data: CombinedData::default(),
            error: None,
        }
    }

    pub fn data(&self) -> &CombinedData {
        &self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the dashboard data with the backend's combined view.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Outcome {
        let result = self.backend.fetch_combined().await;
        match self.settle("load", result) {
            Some(data) => {
                info!(
                    visits = data.doctor_visits.len(),
                    medications = data.medications.len(),
                    appointments = data.appointments.len(),
                    "Dashboard loaded"
                );
                self.data = data;
                Outcome::Applied
            }
            None => Outcome::Failed,
        }
    }

    /// Sends a message to the care team. Blank messages are not sent.
    #[instrument(skip(self, text))]
    pub async fn send_message(&mut self, text: &str) -> Outcome {
        let message = text.trim();
        if message.is_empty() {
            warn!("Blank message not sent");
            return Outcome::Skipped;
        }
        let body = OutgoingMessage {
            message: message.to_string(),
        };
        let result = self.backend.send_message(&body).await;
        match self.settle("send_message", result) {
            Some(()) => Outcome::Applied,
            None => Outcome::Failed,
        }
    }

    #[instrument(skip(self))]
    pub async fn book_appointment(&mut self, appointment: Appointment) -> Outcome {
        let result = self.backend.book_appointment(&appointment).await;
        match self.settle("book_appointment", result) {
            Some(()) => {
                self.data.appointments.push(appointment);
                Outcome::Applied
            }
            None => Outcome::Failed,
        }
    }

    #[instrument(skip(self))]
    pub async fn add_medication(&mut self, medication: Medication) -> Outcome {
        let result = self.backend.add_medication(&medication).await;
        match self.settle("add_medication", result) {
            Some(()) => {
                self.data.medications.push(medication);
                Outcome::Applied
            }
            None => Outcome::Failed,
        }
    }

    /// Appointments at or after `now`, soonest first.
    pub fn upcoming_appointments(&self, now: DateTime<Utc>) -> Vec<&Appointment> {
        let mut upcoming: Vec<_> = self
            .data
            .appointments
            .iter()
            .filter(|a| a.date >= now)
            .collect();
        upcoming.sort_by_key(|a| a.date);
        upcoming
    }

    /// Visits within `window` before `now` (inclusive), newest first. A window reaching
    /// past the earliest representable date covers every visit up to `now`.
    pub fn recent_visits(&self, now: DateTime<Utc>, window: Duration) -> Vec<&DoctorVisit> {
        let since = now
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut recent: Vec<_> = self
            .data
            .doctor_visits
            .iter()
            .filter(|v| v.date >= since && v.date <= now)
            .collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent
    }

    fn settle<R>(&mut self, operation: &str, result: Result<R, ResourceError>) -> Option<R> {
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                warn!(operation, error = %e, "Dashboard call failed");
                self.error = Some(e.user_message());
                None
            }
        }
    }
}
