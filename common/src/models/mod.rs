//! Backend records and their edit forms
//!
//! - Patient: `/api/paciente`
//! - Appointment: `/api/citas`
//! - Dentist: `/api/odontologo`
//! - Office: `/api/consultorio`
//! - Radiograph: `/api/radiografias`

pub mod appointment;
pub mod dentist;
pub mod office;
pub mod patient;
pub mod radiograph;

pub use appointment::{Appointment, AppointmentForm, AppointmentStatus};
pub use dentist::{Dentist, DentistForm};
pub use office::{Office, OfficeForm};
pub use patient::{Patient, PatientForm};
pub use radiograph::{Radiograph, RadiographForm};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    /// `null` becomes the default value
    pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagRepr {
        Bool(bool),
        Text(String),
    }

    /// Yes/no flags arrive either as JSON booleans or as "Si"/"No"
    pub fn flag_text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<FlagRepr>::deserialize(deserializer)? {
            Some(FlagRepr::Bool(true)) => "Si".to_string(),
            Some(FlagRepr::Bool(false)) => "No".to_string(),
            Some(FlagRepr::Text(text)) => text,
            None => String::new(),
        })
    }
}

/// Yes/no options shared by the patient form
pub const YES_NO: &[&str] = &["Si", "No"];

/// Parse a backend timestamp into local wall-clock time.
///
/// Accepts RFC 3339 (`2024-11-20T15:00:00Z`, with offset) and naive forms
/// (`2024-11-20T10:00:00`, `2024-11-20T10:00`, `2024-11-20`); naive values are
/// taken as local time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Date part (`YYYY-MM-DD`) of a backend timestamp, for date inputs
pub fn date_input(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.trim().to_string())
}

/// `YYYY-MM-DDTHH:MM` in local time, for datetime-local inputs
pub fn datetime_input(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_else(|| value.trim().to_string())
}

/// Human display of a backend timestamp
pub fn display_datetime(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

pub fn display_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_timestamp_naive_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 20)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-11-20T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-11-20T10:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-11-20T10:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-11-20").map(|d| d.hour()), Some(0));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("mañana"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_input_formats() {
        assert_eq!(date_input("2024-11-20T00:00:00"), "2024-11-20");
        assert_eq!(datetime_input("2024-11-20T09:05:00"), "2024-11-20T09:05");
        assert_eq!(display_datetime("2024-11-20T09:05:00"), "20/11/2024 09:05");
        assert_eq!(display_date("sin fecha"), "sin fecha");
    }
}
