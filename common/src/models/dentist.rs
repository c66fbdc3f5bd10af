//! Dentists (`/api/odontologo`)

use serde::{Deserialize, Serialize};

use super::de;
use crate::entity::{Entity, Labels};
use crate::error::{Error, Result};
use crate::form::{parse_number, FieldKind, FieldSpec, FormState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dentist {
    pub id: u64,
    #[serde(rename = "nombre", deserialize_with = "de::nullable")]
    pub name: String,
    #[serde(rename = "apellido", deserialize_with = "de::nullable")]
    pub surname: String,
    #[serde(rename = "numeroLicencia", deserialize_with = "de::nullable")]
    pub license_number: String,
    #[serde(rename = "telefono", deserialize_with = "de::nullable")]
    pub phone: String,
    #[serde(deserialize_with = "de::nullable")]
    pub email: String,
    #[serde(rename = "consultorioId", deserialize_with = "de::nullable")]
    pub office_id: u64,
}

impl Dentist {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DentistForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    #[serde(rename = "numeroLicencia")]
    pub license_number: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "consultorioId")]
    pub office_id: u64,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", FieldKind::Text),
    FieldSpec::required("apellido", "Apellido", FieldKind::Text),
    FieldSpec::required("numeroLicencia", "Número de licencia", FieldKind::Text),
    FieldSpec::required("telefono", "Teléfono", FieldKind::Tel),
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required("consultorioId", "Consultorio", FieldKind::Reference("consultorio")),
];

impl FormState for DentistForm {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn value(&self, name: &str) -> Option<String> {
        Some(match name {
            "nombre" => self.name.clone(),
            "apellido" => self.surname.clone(),
            "numeroLicencia" => self.license_number.clone(),
            "telefono" => self.phone.clone(),
            "email" => self.email.clone(),
            // 0 means "no office selected"
            "consultorioId" => match self.office_id {
                0 => String::new(),
                id => id.to_string(),
            },
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "nombre" => self.name = value.to_string(),
            "apellido" => self.surname = value.to_string(),
            "numeroLicencia" => self.license_number = value.to_string(),
            "telefono" => self.phone = value.to_string(),
            "email" => self.email = value.to_string(),
            "consultorioId" => self.office_id = parse_number(name, value)?,
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

impl Entity for Dentist {
    type Form = DentistForm;

    const ENDPOINT: &'static str = "odontologo";
    const LABELS: Labels = Labels {
        title: "Odontólogos",
        singular: "el odontólogo",
        plural: "los odontólogos",
        created: "Odontólogo agregado exitosamente.",
        updated: "Odontólogo actualizado exitosamente.",
        deleted: "Odontólogo eliminado exitosamente.",
    };
    const PAGE_SIZE: usize = 5;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Nombre", "Apellido", "Licencia", "Teléfono", "Email", "Consultorio"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.surname.clone(),
            self.license_number.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.office_id.to_string(),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.surname.clone(),
            self.license_number.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.office_id.to_string(),
        ]
    }

    fn to_form(&self) -> DentistForm {
        DentistForm {
            name: self.name.clone(),
            surname: self.surname.clone(),
            license_number: self.license_number.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            office_id: self.office_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_contact_fields() {
        let json = r#"{"id": 2, "nombre": "Laura", "apellido": "Ruiz",
                       "numeroLicencia": null, "telefono": null, "email": null, "consultorioId": 1}"#;
        let dentist: Dentist = serde_json::from_str(json).unwrap();
        assert_eq!(dentist.license_number, "");
        assert_eq!(dentist.full_name(), "Laura Ruiz");
        assert_eq!(dentist.office_id, 1);
    }

    #[test]
    fn test_office_id_is_numeric() {
        let mut form = DentistForm::default();
        assert_eq!(form.value("consultorioId").as_deref(), Some(""));
        form.set_field("consultorioId", "7").unwrap();
        assert_eq!(form.office_id, 7);
        assert!(form.set_field("consultorioId", "norte").is_err());

        let payload = form.payload().unwrap();
        assert_eq!(payload["consultorioId"], 7);
    }

    #[test]
    fn test_search_includes_office_id() {
        let dentist = Dentist {
            id: 1,
            name: "Laura".into(),
            office_id: 42,
            ..Default::default()
        };
        assert!(dentist.search_fields().contains(&"42".to_string()));
    }
}
