use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A past consultation shown under "Recent Doctor Visits".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorVisit {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: DateTime<Utc>,
    pub doctor_name: String,
    pub reason: String,
}

/// One entry of the medication schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub schedule: String,
}

/// A booked appointment. Also the body of `POST /bookAppointment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: DateTime<Utc>,
    pub doctor_name: String,
    pub purpose: String,
}

impl Appointment {
    pub fn new(
        date: DateTime<Utc>,
        doctor_name: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            date,
            doctor_name: doctor_name.into(),
            purpose: purpose.into(),
        }
    }
}

/// Everything the dashboard shows, served in one call by `GET /combinedData`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    #[serde(default)]
    pub doctor_visits: Vec<DoctorVisit>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

/// Body of `POST /sendMessage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub message: String,
}

/// Accepts RFC 3339 timestamps, timestamps without an offset (read as UTC) and bare
/// dates (midnight UTC).
fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    let raw = String::deserialize(deserializer)?;
    let value = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| de::Error::custom(format!("unrecognized date '{raw}'")))
}
