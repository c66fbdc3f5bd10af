//! Appointments (`/api/citas`)

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{datetime_input, de, display_datetime, parse_timestamp};
use crate::entity::{Entity, Labels};
use crate::error::{Error, Result};
use crate::form::{parse_reference, reference_text, FieldKind, FieldSpec, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Completada")]
    Completed,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pendiente",
            AppointmentStatus::Completed => "Completada",
            AppointmentStatus::Cancelled => "Cancelada",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_value("estado", s))
    }
}

const STATUS_OPTIONS: &[&str] = &["Pendiente", "Completada", "Cancelada"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    pub id: u64,
    /// ISO date-time as sent by the backend
    #[serde(rename = "fecha", deserialize_with = "de::nullable")]
    pub date: String,
    /// Kept as text so an unexpected status does not break the whole list
    #[serde(rename = "estado", deserialize_with = "de::nullable")]
    pub status: String,
    #[serde(rename = "motivo", deserialize_with = "de::nullable")]
    pub reason: String,
    #[serde(rename = "pacienteId")]
    pub patient_id: Option<u64>,
    #[serde(rename = "nombrePaciente", deserialize_with = "de::nullable")]
    pub patient_name: String,
    #[serde(rename = "correoElectronicoPaciente", deserialize_with = "de::nullable")]
    pub patient_email: String,
    #[serde(rename = "odontologoId")]
    pub dentist_id: Option<u64>,
    #[serde(rename = "nombreOdontologo", deserialize_with = "de::nullable")]
    pub dentist_name: String,
}

impl Appointment {
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date)
    }

    pub fn parsed_status(&self) -> Option<AppointmentStatus> {
        self.status.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentForm {
    /// `YYYY-MM-DDTHH:MM`, local time
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "estado")]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "pacienteId")]
    pub patient_id: Option<u64>,
    #[serde(rename = "odontologoId")]
    pub dentist_id: Option<u64>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("fecha", "Fecha y hora", FieldKind::DateTime),
    FieldSpec::required("estado", "Estado", FieldKind::Choice(STATUS_OPTIONS)),
    FieldSpec::required("motivo", "Motivo", FieldKind::TextArea),
    FieldSpec::required("pacienteId", "Paciente", FieldKind::Reference("paciente")),
    FieldSpec::required("odontologoId", "Odontólogo", FieldKind::Reference("odontologo")),
];

/// Local wall-clock input to the UTC instant the backend stores
/// (`2024-11-20T15:00:00.000Z`)
pub fn local_input_to_iso(value: &str) -> Result<String> {
    let naive = parse_timestamp(value).ok_or_else(|| Error::invalid_value("fecha", value))?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| Error::invalid_value("fecha", value))?;
    Ok(local
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl FormState for AppointmentForm {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn value(&self, name: &str) -> Option<String> {
        Some(match name {
            "fecha" => self.date.clone(),
            "estado" => self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            "motivo" => self.reason.clone(),
            "pacienteId" => reference_text(self.patient_id),
            "odontologoId" => reference_text(self.dentist_id),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "fecha" => {
                if !value.trim().is_empty() && parse_timestamp(value).is_none() {
                    return Err(Error::invalid_value(name, value));
                }
                self.date = datetime_input(value);
            }
            "estado" => {
                self.status = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                }
            }
            "motivo" => self.reason = value.to_string(),
            "pacienteId" => self.patient_id = parse_reference(name, value)?,
            "odontologoId" => self.dentist_id = parse_reference(name, value)?,
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn payload(&self) -> Result<Value> {
        Ok(json!({
            "fecha": local_input_to_iso(&self.date)?,
            "estado": self.status,
            "motivo": self.reason,
            "pacienteId": self.patient_id,
            "odontologoId": self.dentist_id,
        }))
    }
}

impl Entity for Appointment {
    type Form = AppointmentForm;

    const ENDPOINT: &'static str = "citas";
    const LABELS: Labels = Labels {
        title: "Citas",
        singular: "la cita",
        plural: "las citas",
        created: "Cita agregada exitosamente.",
        updated: "Cita actualizada exitosamente.",
        deleted: "Cita eliminada exitosamente.",
    };
    const PAGE_SIZE: usize = 5;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.patient_name, display_datetime(&self.date))
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Fecha", "Estado", "Motivo", "Paciente", "Odontólogo"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            display_datetime(&self.date),
            self.status.clone(),
            self.reason.clone(),
            self.patient_name.clone(),
            self.dentist_name.clone(),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.patient_name.clone(),
            self.status.clone(),
            self.dentist_name.clone(),
            self.date.clone(),
            self.reason.clone(),
        ]
    }

    fn to_form(&self) -> AppointmentForm {
        AppointmentForm {
            date: datetime_input(&self.date),
            status: self.parsed_status(),
            reason: self.reason.clone(),
            patient_id: self.patient_id,
            dentist_id: self.dentist_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_status_round_trip() {
        assert_eq!("pendiente".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Pending);
        assert_eq!(AppointmentStatus::Cancelled.to_string(), "Cancelada");
        assert!("Reprogramada".parse::<AppointmentStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Completed).unwrap(),
            "\"Completada\""
        );
    }

    #[test]
    fn test_unknown_status_does_not_break_deserialization() {
        let json = r#"[{"id": 1, "fecha": "2024-11-20T10:00:00", "estado": "Reprogramada",
                        "motivo": "Control", "pacienteId": 2, "nombrePaciente": "Ana",
                        "odontologoId": 3, "nombreOdontologo": "Dr. Ruiz"}]"#;
        let items: Vec<Appointment> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].status, "Reprogramada");
        assert_eq!(items[0].parsed_status(), None);
        assert!(items[0].scheduled_at().is_some());
    }

    #[test]
    fn test_payload_converts_local_input_to_utc_iso() {
        let mut form = AppointmentForm::default();
        form.set_field("fecha", "2024-11-20T10:30").unwrap();
        form.set_field("estado", "Pendiente").unwrap();
        form.set_field("motivo", "Limpieza").unwrap();
        form.set_field("pacienteId", "2").unwrap();
        form.set_field("odontologoId", "3").unwrap();

        let payload = form.payload().unwrap();
        let fecha = payload["fecha"].as_str().unwrap();
        assert!(fecha.ends_with('Z'));
        let instant = DateTime::parse_from_rfc3339(fecha).unwrap();
        let back = instant.with_timezone(&Local).naive_local();
        assert_eq!(back.format("%Y-%m-%dT%H:%M").to_string(), "2024-11-20T10:30");
        assert_eq!(payload["estado"], "Pendiente");
        assert_eq!(payload["pacienteId"], 2);
        assert_eq!(payload["odontologoId"], 3);
    }

    #[test]
    fn test_set_field_rejects_bad_date_and_status() {
        let mut form = AppointmentForm::default();
        assert!(form.set_field("fecha", "ayer").is_err());
        assert!(form.set_field("estado", "Perdida").is_err());
        form.set_field("estado", "").unwrap();
        assert_eq!(form.status, None);
    }

    #[test]
    fn test_missing_date_fails_payload() {
        let form = AppointmentForm::default();
        assert!(matches!(form.payload(), Err(Error::InvalidValue { .. })));
        assert!(matches!(form.validate(), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_to_form_uses_datetime_input() {
        let appointment = Appointment {
            id: 8,
            date: "2024-11-20T10:30:00".into(),
            status: "Completada".into(),
            patient_id: Some(1),
            ..Default::default()
        };
        let form = appointment.to_form();
        assert_eq!(form.date, "2024-11-20T10:30");
        assert_eq!(form.status, Some(AppointmentStatus::Completed));
        assert_eq!(form.patient_id, Some(1));
    }
}
