//! Offices (`/api/consultorio`)

use serde::{Deserialize, Serialize};

use super::{de, Dentist};
use crate::entity::{Entity, Labels};
use crate::error::{Error, Result};
use crate::form::{FieldKind, FieldSpec, FormState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Office {
    pub id: u64,
    #[serde(rename = "nombre", deserialize_with = "de::nullable")]
    pub name: String,
    #[serde(rename = "direccion", deserialize_with = "de::nullable")]
    pub address: String,
    #[serde(rename = "telefono", deserialize_with = "de::nullable")]
    pub phone: String,
    /// Denormalized, read-only
    #[serde(rename = "odontologos", deserialize_with = "de::nullable")]
    pub dentists: Vec<Dentist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OfficeForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono")]
    pub phone: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", FieldKind::Text),
    FieldSpec::required("direccion", "Dirección", FieldKind::Text),
    FieldSpec::required("telefono", "Teléfono", FieldKind::Tel),
];

impl FormState for OfficeForm {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn value(&self, name: &str) -> Option<String> {
        Some(match name {
            "nombre" => self.name.clone(),
            "direccion" => self.address.clone(),
            "telefono" => self.phone.clone(),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "nombre" => self.name = value.to_string(),
            "direccion" => self.address = value.to_string(),
            "telefono" => self.phone = value.to_string(),
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

impl Entity for Office {
    type Form = OfficeForm;

    const ENDPOINT: &'static str = "consultorio";
    const LABELS: Labels = Labels {
        title: "Consultorios",
        singular: "el consultorio",
        plural: "los consultorios",
        created: "Consultorio agregado exitosamente.",
        updated: "Consultorio actualizado exitosamente.",
        deleted: "Consultorio eliminado exitosamente.",
    };
    const PAGE_SIZE: usize = 4;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Nombre", "Dirección", "Teléfono", "Odontólogos"]
    }

    fn cells(&self) -> Vec<String> {
        let dentists = if self.dentists.is_empty() {
            "Sin odontólogos".to_string()
        } else {
            self.dentists
                .iter()
                .map(Dentist::full_name)
                .collect::<Vec<_>>()
                .join(", ")
        };
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.address.clone(),
            self.phone.clone(),
            dentists,
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.address.clone(), self.phone.clone()]
    }

    fn to_form(&self) -> OfficeForm {
        OfficeForm {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_dentists() {
        let json = r#"{"id": 1, "nombre": "Norte", "direccion": "Calle 1", "telefono": "022",
                       "odontologos": [{"id": 5, "nombre": "Laura", "apellido": "Ruiz", "consultorioId": 1}]}"#;
        let office: Office = serde_json::from_str(json).unwrap();
        assert_eq!(office.dentists.len(), 1);
        assert_eq!(office.cells()[4], "Laura Ruiz");
    }

    #[test]
    fn test_null_dentist_list() {
        let office: Office =
            serde_json::from_str(r#"{"id": 2, "nombre": "Sur", "odontologos": null}"#).unwrap();
        assert!(office.dentists.is_empty());
        assert_eq!(office.cells()[4], "Sin odontólogos");
    }

    #[test]
    fn test_payload_has_only_editable_fields() {
        let form = Office {
            id: 3,
            name: "Centro".into(),
            address: "Av. 10".into(),
            phone: "099".into(),
            dentists: vec![Dentist::default()],
        }
        .to_form();
        let payload = form.payload().unwrap();
        assert_eq!(payload["nombre"], "Centro");
        assert!(payload.get("odontologos").is_none());
        assert!(payload.get("id").is_none());
    }
}
