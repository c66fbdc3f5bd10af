//! Sonrisas Admin Common Library
//!
//! Entities, form state, the resource client and list state shared by the
//! CLI and the web (WASM) front-end.

pub mod api;
pub mod client;
pub mod collection;
pub mod confirm;
pub mod dashboard;
pub mod entity;
pub mod error;
pub mod form;
pub mod listing;
pub mod models;
pub mod notice;
pub mod transport;

pub use api::{ApiError, ApiRequest, ErrorKind, Method, RawResponse, RequestBody, Upload};
pub use client::{MutationResult, ResourceClient};
pub use collection::{CollectionState, ResourcePage};
pub use confirm::{ConfirmDialog, ConfirmState};
pub use dashboard::{build_dashboard, ClinicOverview, Dashboard, UpcomingAppointment};
pub use entity::{Entity, Labels, ListQuery};
pub use error::{Error, Result};
pub use form::{Choice, FieldKind, FieldSpec, FormState};
pub use listing::{ListView, PageSlice};
pub use models::{
    Appointment, AppointmentForm, AppointmentStatus, Dentist, DentistForm, Office, OfficeForm,
    Patient, PatientForm, Radiograph, RadiographForm,
};
pub use notice::{Notice, NoticeChannel, NoticeKind};
pub use transport::Transport;

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "https://sonrisasbackendelectivaiv.somee.com";

/// Base URLs must be absolute http(s) URLs
pub fn validate_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(Error::Config(format!(
            "la URL base debe comenzar con http:// o https://: '{}'",
            url
        ))),
    }
}
