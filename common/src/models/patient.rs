//! Patients (`/api/paciente`)

use serde::{Deserialize, Serialize};

use super::{date_input, de, display_date, YES_NO};
use crate::api::{ApiRequest, FormPart, Upload};
use crate::entity::{Entity, Labels};
use crate::error::{Error, Result};
use crate::form::{
    parse_choice, parse_number, parse_reference, reference_text, FieldKind, FieldSpec, FormState,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub id: u64,
    #[serde(rename = "nombre", deserialize_with = "de::nullable")]
    pub name: String,
    #[serde(rename = "cedula", deserialize_with = "de::nullable")]
    pub national_id: String,
    #[serde(rename = "edad", deserialize_with = "de::nullable")]
    pub age: u32,
    #[serde(rename = "fechaCita", deserialize_with = "de::nullable")]
    pub appointment_date: String,
    #[serde(rename = "nuevoPaciente", deserialize_with = "de::flag_text")]
    pub is_new: String,
    #[serde(rename = "pacienteRecomendado", deserialize_with = "de::flag_text")]
    pub referred: String,
    #[serde(rename = "motivoConsulta", deserialize_with = "de::nullable")]
    pub reason: String,
    #[serde(rename = "telefono", deserialize_with = "de::nullable")]
    pub phone: String,
    #[serde(rename = "correoElectronico", deserialize_with = "de::nullable")]
    pub email: String,
    #[serde(rename = "direccion", deserialize_with = "de::nullable")]
    pub address: String,
    #[serde(rename = "rutaImagen", deserialize_with = "de::nullable")]
    pub image_path: String,
    #[serde(rename = "odontologoId")]
    pub dentist_id: Option<u64>,
    #[serde(rename = "nombreOdontologo", deserialize_with = "de::nullable")]
    pub dentist_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "edad")]
    pub age: u32,
    #[serde(rename = "fechaCita")]
    pub appointment_date: String,
    #[serde(rename = "nuevoPaciente")]
    pub is_new: String,
    #[serde(rename = "pacienteRecomendado")]
    pub referred: String,
    #[serde(rename = "motivoConsulta")]
    pub reason: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "correoElectronico")]
    pub email: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "rutaImagen")]
    pub image_path: String,
    #[serde(rename = "odontologoId")]
    pub dentist_id: Option<u64>,
    #[serde(skip)]
    pub image: Option<Upload>,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            national_id: String::new(),
            age: 0,
            appointment_date: String::new(),
            is_new: "Si".to_string(),
            referred: "Si".to_string(),
            reason: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            image_path: String::new(),
            dentist_id: None,
            image: None,
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre completo", FieldKind::Text),
    FieldSpec::required("cedula", "Cédula", FieldKind::Text),
    FieldSpec::required("edad", "Edad", FieldKind::Number),
    FieldSpec::required("fechaCita", "Fecha de cita", FieldKind::Date),
    FieldSpec::required("nuevoPaciente", "Paciente nuevo", FieldKind::Choice(YES_NO)),
    FieldSpec::required("pacienteRecomendado", "Paciente recomendado", FieldKind::Choice(YES_NO)),
    FieldSpec::required("motivoConsulta", "Motivo de consulta", FieldKind::TextArea),
    FieldSpec::required("telefono", "Teléfono", FieldKind::Tel),
    FieldSpec::optional("correoElectronico", "Correo electrónico", FieldKind::Email),
    FieldSpec::required("direccion", "Dirección", FieldKind::Text),
    FieldSpec::required("odontologoId", "Odontólogo", FieldKind::Reference("odontologo")),
    FieldSpec::optional("imagen", "Imagen", FieldKind::Image),
];

impl FormState for PatientForm {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn value(&self, name: &str) -> Option<String> {
        Some(match name {
            "nombre" => self.name.clone(),
            "cedula" => self.national_id.clone(),
            "edad" => self.age.to_string(),
            "fechaCita" => self.appointment_date.clone(),
            "nuevoPaciente" => self.is_new.clone(),
            "pacienteRecomendado" => self.referred.clone(),
            "motivoConsulta" => self.reason.clone(),
            "telefono" => self.phone.clone(),
            "correoElectronico" => self.email.clone(),
            "direccion" => self.address.clone(),
            "rutaImagen" => self.image_path.clone(),
            "odontologoId" => reference_text(self.dentist_id),
            "imagen" => self
                .image
                .as_ref()
                .map(|u| u.file_name.clone())
                .unwrap_or_default(),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "nombre" => self.name = value.to_string(),
            "cedula" => self.national_id = value.to_string(),
            "edad" => self.age = parse_number(name, value)?,
            "fechaCita" => self.appointment_date = date_input(value),
            "nuevoPaciente" => self.is_new = parse_choice(name, YES_NO, value)?,
            "pacienteRecomendado" => self.referred = parse_choice(name, YES_NO, value)?,
            "motivoConsulta" => self.reason = value.to_string(),
            "telefono" => self.phone = value.to_string(),
            "correoElectronico" => self.email = value.to_string(),
            "direccion" => self.address = value.to_string(),
            "rutaImagen" => self.image_path = value.to_string(),
            "odontologoId" => self.dentist_id = parse_reference(name, value)?,
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

impl PatientForm {
    /// Multipart body of a new patient; the server stores the image and sets `rutaImagen`
    fn multipart(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("nombre", self.name.clone()),
            FormPart::text("cedula", self.national_id.clone()),
            FormPart::text("edad", self.age.to_string()),
            FormPart::text("fechaCita", self.appointment_date.clone()),
            FormPart::text("nuevoPaciente", self.is_new.clone()),
            FormPart::text("pacienteRecomendado", self.referred.clone()),
            FormPart::text("motivoConsulta", self.reason.clone()),
            FormPart::text("telefono", self.phone.clone()),
            FormPart::text("correoElectronico", self.email.clone()),
            FormPart::text("direccion", self.address.clone()),
        ];
        if let Some(id) = self.dentist_id {
            parts.push(FormPart::text("odontologoId", id.to_string()));
        }
        if let Some(image) = &self.image {
            parts.push(FormPart::file("imagen", image.clone()));
        }
        parts
    }
}

impl Entity for Patient {
    type Form = PatientForm;

    const ENDPOINT: &'static str = "paciente";
    const LABELS: Labels = Labels {
        title: "Pacientes",
        singular: "el paciente",
        plural: "los pacientes",
        created: "Paciente agregado exitosamente.",
        updated: "Paciente actualizado exitosamente.",
        deleted: "Paciente eliminado exitosamente.",
    };
    const PAGE_SIZE: usize = 4;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Nombre", "Cédula", "Edad", "Fecha cita", "Teléfono", "Odontólogo"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.national_id.clone(),
            self.age.to_string(),
            display_date(&self.appointment_date),
            self.phone.clone(),
            self.dentist_name.clone(),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.national_id.clone(),
            self.dentist_name.clone(),
        ]
    }

    fn to_form(&self) -> PatientForm {
        PatientForm {
            name: self.name.clone(),
            national_id: self.national_id.clone(),
            age: self.age,
            appointment_date: date_input(&self.appointment_date),
            is_new: self.is_new.clone(),
            referred: self.referred.clone(),
            reason: self.reason.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            image_path: self.image_path.clone(),
            dentist_id: self.dentist_id,
            image: None,
        }
    }

    fn thumbnail(&self) -> Option<&str> {
        Some(self.image_path.as_str()).filter(|p| !p.is_empty())
    }

    fn create_request(form: &PatientForm) -> Result<ApiRequest> {
        Ok(ApiRequest::post_multipart(Self::ENDPOINT, form.multipart()))
    }
}
