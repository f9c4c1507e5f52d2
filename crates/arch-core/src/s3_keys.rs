//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the ARCH S3 bucket.

use uuid::Uuid;

pub fn patient_readings_prefix(patient_id: Uuid) -> String {
    format!("patients/{patient_id}/readings/")
}

/// Reading keys embed a zero-padded millisecond timestamp so a prefix listing
/// comes back in chronological order.
pub fn patient_reading(patient_id: Uuid, recorded_at: jiff::Timestamp, reading_id: Uuid) -> String {
    format!(
        "{}{}-{reading_id}.json",
        patient_readings_prefix(patient_id),
        reading_sort_key(recorded_at)
    )
}

/// The timestamp component of a reading key. Pre-epoch times clamp to zero.
pub fn reading_sort_key(recorded_at: jiff::Timestamp) -> String {
    let millis = u64::try_from(recorded_at.as_millisecond()).unwrap_or(0);
    format!("{millis:020}")
}

pub fn assessment(reading_id: Uuid) -> String {
    format!("assessments/{reading_id}.json")
}

pub fn alert(id: Uuid) -> String {
    format!("alerts/{id}.json")
}

pub const ALERTS_PREFIX: &str = "alerts/";
