//! Dashboard and clinic overview aggregation

use chrono::{Duration, NaiveDateTime};

use crate::api::ApiError;
use crate::client::ResourceClient;
use crate::entity::ListQuery;
use crate::models::{Appointment, AppointmentStatus, Dentist, Patient};
use crate::transport::Transport;

/// How far ahead the upcoming list looks
pub const UPCOMING_WINDOW_DAYS: i64 = 7;
pub const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingAppointment {
    pub appointment: Appointment,
    pub scheduled_at: NaiveDateTime,
    /// `rutaImagen` of the patient, when there is one
    pub patient_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub total_patients: usize,
    pub total_appointments: usize,
    pub upcoming: Vec<UpcomingAppointment>,
}

/// Appointments in `[now, now + 7 days]`, soonest first, at most five
pub fn build_dashboard(
    patients: &[Patient],
    appointments: &[Appointment],
    now: NaiveDateTime,
) -> Dashboard {
    let horizon = now + Duration::days(UPCOMING_WINDOW_DAYS);

    let mut upcoming: Vec<UpcomingAppointment> = appointments
        .iter()
        .filter_map(|appointment| {
            let scheduled_at = appointment.scheduled_at()?;
            (scheduled_at >= now && scheduled_at <= horizon).then(|| UpcomingAppointment {
                appointment: appointment.clone(),
                scheduled_at,
                patient_image: patient_image(patients, appointment.patient_id),
            })
        })
        .collect();
    upcoming.sort_by_key(|u| u.scheduled_at);
    upcoming.truncate(UPCOMING_LIMIT);

    Dashboard {
        total_patients: patients.len(),
        total_appointments: appointments.len(),
        upcoming,
    }
}

fn patient_image(patients: &[Patient], patient_id: Option<u64>) -> Option<String> {
    let id = patient_id?;
    patients
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.image_path.clone())
        .filter(|path| !path.is_empty())
}

/// Patients first, then appointments
pub async fn load_dashboard<T: Transport>(
    client: &ResourceClient<T>,
    now: NaiveDateTime,
) -> Result<Dashboard, ApiError> {
    let query = ListQuery::default();
    let patients = client.list::<Patient>(&query).await?;
    let appointments = client.list::<Appointment>(&query).await?;
    Ok(build_dashboard(&patients, &appointments, now))
}

/// Clinic-wide counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClinicOverview {
    pub patients: usize,
    pub dentists: usize,
    pub appointments: usize,
    pub pending_appointments: usize,
}

impl ClinicOverview {
    pub fn from_collections(
        patients: &[Patient],
        dentists: &[Dentist],
        appointments: &[Appointment],
    ) -> Self {
        Self {
            patients: patients.len(),
            dentists: dentists.len(),
            appointments: appointments.len(),
            pending_appointments: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Pending.as_str())
                .count(),
        }
    }
}

pub async fn load_overview<T: Transport>(
    client: &ResourceClient<T>,
) -> Result<ClinicOverview, ApiError> {
    let query = ListQuery::default();
    let patients = client.list::<Patient>(&query).await?;
    let dentists = client.list::<Dentist>(&query).await?;
    let appointments = client.list::<Appointment>(&query).await?;
    Ok(ClinicOverview::from_collections(&patients, &dentists, &appointments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawResponse;
    use crate::transport::mock::ScriptedTransport;
    use chrono::NaiveDate;
    use futures::executor::block_on;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn appointment(id: u64, date: NaiveDateTime, patient_id: u64, status: &str) -> Appointment {
        Appointment {
            id,
            date: date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            status: status.to_string(),
            patient_id: Some(patient_id),
            ..Default::default()
        }
    }

    #[test]
    fn test_upcoming_window_sort_and_limit() {
        let now = at(10, 9);
        let patients = vec![Patient {
            id: 1,
            name: "Ana".into(),
            image_path: "/uploads/ana.png".into(),
            ..Default::default()
        }];
        let appointments = vec![
            appointment(1, at(9, 10), 1, "Completada"),  // past
            appointment(2, at(16, 10), 1, "Pendiente"),
            appointment(3, at(11, 10), 2, "Pendiente"),
            appointment(4, at(10, 9), 1, "Pendiente"),   // exactly now
            appointment(5, at(18, 10), 1, "Pendiente"),  // beyond 7 days
            appointment(6, at(12, 8), 1, "Pendiente"),
            appointment(7, at(13, 8), 1, "Pendiente"),
            appointment(8, at(14, 8), 1, "Pendiente"),
        ];

        let dashboard = build_dashboard(&patients, &appointments, now);
        assert_eq!(dashboard.total_patients, 1);
        assert_eq!(dashboard.total_appointments, 8);

        let ids: Vec<u64> = dashboard.upcoming.iter().map(|u| u.appointment.id).collect();
        assert_eq!(ids, vec![4, 3, 6, 7, 8]);
        assert_eq!(dashboard.upcoming[0].patient_image.as_deref(), Some("/uploads/ana.png"));
        // patient 2 is unknown
        assert_eq!(dashboard.upcoming[1].patient_image, None);
    }

    #[test]
    fn test_unparseable_dates_are_skipped() {
        let mut broken = appointment(1, at(11, 10), 1, "Pendiente");
        broken.date = "pronto".into();
        let dashboard = build_dashboard(&[], &[broken], at(10, 9));
        assert!(dashboard.upcoming.is_empty());
        assert_eq!(dashboard.total_appointments, 1);
    }

    #[test]
    fn test_overview_counts_pending() {
        let appointments = vec![
            appointment(1, at(11, 10), 1, "Pendiente"),
            appointment(2, at(12, 10), 1, "Completada"),
            appointment(3, at(13, 10), 1, "Pendiente"),
        ];
        let overview = ClinicOverview::from_collections(&[], &[Dentist::default()], &appointments);
        assert_eq!(overview.dentists, 1);
        assert_eq!(overview.appointments, 3);
        assert_eq!(overview.pending_appointments, 2);
    }

    #[test]
    fn test_load_dashboard_fetches_patients_first() {
        let transport = ScriptedTransport::new()
            .respond(RawResponse::json(200, r#"[{"id": 1, "nombre": "Ana"}]"#))
            .respond(RawResponse::json(
                200,
                r#"[{"id": 1, "fecha": "2024-11-11T10:00:00", "estado": "Pendiente", "pacienteId": 1}]"#,
            ));
        let client = ResourceClient::new(transport);
        let dashboard = block_on(load_dashboard(&client, at(10, 9))).unwrap();
        assert_eq!(dashboard.upcoming.len(), 1);

        let paths: Vec<String> = client.transport().requests().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec!["paciente", "citas"]);
    }

    #[test]
    fn test_load_overview_stops_on_error() {
        let transport = ScriptedTransport::new()
            .respond(RawResponse::json(200, "[]"))
            .respond(RawResponse::text(500, "caído"));
        let client = ResourceClient::new(transport);
        let err = block_on(load_overview(&client)).unwrap_err();
        assert_eq!(err.message, "caído");
        assert_eq!(client.transport().requests().len(), 2);
    }
}
