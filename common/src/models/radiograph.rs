//! Dental radiographs (`/api/radiografias`)
//!
//! The endpoint differs from the others: the list is capped
//! (`recientes?cantidad=N`), search runs server-side (`buscar?termino=`),
//! uploads are multipart and records cannot be edited.

use serde::{Deserialize, Serialize};

use super::{date_input, de, display_date};
use crate::api::{ApiRequest, FormPart, Upload};
use crate::entity::{Entity, Labels, ListQuery};
use crate::error::{Error, Result};
use crate::form::{parse_reference, reference_text, FieldKind, FieldSpec, FormState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Radiograph {
    pub id: u64,
    #[serde(rename = "imageUrl", deserialize_with = "de::nullable")]
    pub image_url: String,
    #[serde(rename = "descripcion", deserialize_with = "de::nullable")]
    pub description: String,
    #[serde(rename = "fecha", deserialize_with = "de::nullable")]
    pub date: String,
    #[serde(rename = "pacienteId", deserialize_with = "de::nullable")]
    pub patient_id: u64,
    #[serde(rename = "nombrePaciente", deserialize_with = "de::nullable")]
    pub patient_name: String,
    #[serde(
        rename = "correoElectronicoPaciente",
        alias = "emailPaciente",
        deserialize_with = "de::nullable"
    )]
    pub patient_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadiographForm {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "pacienteId")]
    pub patient_id: Option<u64>,
    #[serde(skip)]
    pub image: Option<Upload>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("imagen", "Imagen", FieldKind::Image),
    FieldSpec::required("descripcion", "Descripción", FieldKind::TextArea),
    FieldSpec::required("fecha", "Fecha", FieldKind::Date),
    FieldSpec::required("pacienteId", "Paciente", FieldKind::Reference("paciente")),
];

impl FormState for RadiographForm {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn value(&self, name: &str) -> Option<String> {
        Some(match name {
            "imagen" => self
                .image
                .as_ref()
                .map(|u| u.file_name.clone())
                .unwrap_or_default(),
            "descripcion" => self.description.clone(),
            "fecha" => self.date.clone(),
            "pacienteId" => reference_text(self.patient_id),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "descripcion" => self.description = value.to_string(),
            "fecha" => self.date = date_input(value),
            "pacienteId" => self.patient_id = parse_reference(name, value)?,
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn set_upload(&mut self, name: &str, upload: Upload) -> Result<()> {
        if name != "imagen" {
            return Err(Error::UnknownField(name.to_string()));
        }
        upload.validate_image()?;
        self.image = Some(upload);
        Ok(())
    }
}

impl Entity for Radiograph {
    type Form = RadiographForm;

    const ENDPOINT: &'static str = "radiografias";
    const LABELS: Labels = Labels {
        title: "Radiografías",
        singular: "la radiografía",
        plural: "las radiografías",
        created: "Radiografía subida exitosamente.",
        updated: "Radiografía actualizada exitosamente.",
        deleted: "Radiografía eliminada exitosamente.",
    };
    const PAGE_SIZE: usize = 4;
    const SERVER_SEARCH: bool = true;
    const EDITABLE: bool = false;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} - {}", self.patient_name, self.description)
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Fecha", "Descripción", "Paciente", "Email"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            display_date(&self.date),
            self.description.clone(),
            self.patient_name.clone(),
            self.patient_email.clone(),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.description.clone(), self.patient_name.clone()]
    }

    fn to_form(&self) -> RadiographForm {
        RadiographForm {
            description: self.description.clone(),
            date: date_input(&self.date),
            patient_id: Some(self.patient_id).filter(|id| *id != 0),
            image: None,
        }
    }

    fn thumbnail(&self) -> Option<&str> {
        Some(self.image_url.as_str()).filter(|u| !u.is_empty())
    }

    fn list_request(query: &ListQuery) -> ApiRequest {
        let term = query.search.trim();
        if term.is_empty() {
            ApiRequest::get(format!("{}/recientes", Self::ENDPOINT))
                .with_query("cantidad", query.recent.to_string())
        } else {
            ApiRequest::get(format!("{}/buscar", Self::ENDPOINT)).with_query("termino", term)
        }
    }

    fn create_request(form: &RadiographForm) -> Result<ApiRequest> {
        let image = form
            .image
            .clone()
            .ok_or_else(|| Error::MissingField("Imagen".to_string()))?;
        let patient_id = form
            .patient_id
            .ok_or_else(|| Error::MissingField("Paciente".to_string()))?;
        Ok(ApiRequest::post_multipart(
            Self::ENDPOINT,
            vec![
                FormPart::file("Imagen", image),
                FormPart::text("Descripcion", form.description.clone()),
                FormPart::text("Fecha", form.date.clone()),
                FormPart::text("PacienteId", patient_id.to_string()),
            ],
        ))
    }

    fn update_request(_id: u64, _form: &RadiographForm) -> Result<ApiRequest> {
        Err(Error::Unsupported(
            "las radiografías no se pueden editar".to_string(),
        ))
    }
}
