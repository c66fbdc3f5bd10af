//! Form state holders
//!
//! One editable record per entity, addressed by wire field name so that a
//! single change handler (web) or `--field name=value` (CLI) can drive it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::Upload;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Tel,
    Number,
    Date,
    DateTime,
    /// Fixed list of accepted values
    Choice(&'static [&'static str]),
    /// Id of a record from another endpoint
    Reference(&'static str),
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }
}

pub trait FormState: Default + Clone + Serialize + Send + Sync + 'static {
    /// Field descriptors, in display order
    fn fields() -> &'static [FieldSpec];

    /// Current value rendered as text; `None` for an unknown field
    fn value(&self, name: &str) -> Option<String>;

    /// Assign one field from its text input
    fn set_field(&mut self, name: &str, value: &str) -> Result<()>;

    /// Attach an image; forms without an image field reject it
    fn set_upload(&mut self, name: &str, _upload: Upload) -> Result<()> {
        Err(Error::UnknownField(name.to_string()))
    }

    /// Required fields must be non-blank
    fn validate(&self) -> Result<()> {
        for field in Self::fields().iter().filter(|f| f.required) {
            let value = self.value(field.name).unwrap_or_default();
            if value.trim().is_empty() {
                return Err(Error::MissingField(field.label.to_string()));
            }
        }
        Ok(())
    }

    /// JSON request body
    fn payload(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Look up a field descriptor by wire name
pub fn field_spec<F: FormState>(name: &str) -> Option<&'static FieldSpec> {
    F::fields().iter().find(|f| f.name == name)
}

/// Numeric coercion at assignment time: blank input becomes zero
pub fn parse_number<T: FromStr + Default>(field: &str, value: &str) -> Result<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse()
        .map_err(|_| Error::invalid_value(field, value))
}

/// Reference ids: blank input clears the selection
pub fn parse_reference(field: &str, value: &str) -> Result<Option<u64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| Error::invalid_value(field, value))
}

pub fn parse_choice(field: &str, options: &[&str], value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(trimmed))
        .map(|option| option.to_string())
        .ok_or_else(|| Error::invalid_value(field, value))
}

pub fn reference_text(id: Option<u64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// An option for a reference field, read from any endpoint whose records
/// carry `id` and `nombre`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: u64,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "apellido", default)]
    pub surname: Option<String>,
}

impl Choice {
    pub fn label(&self) -> String {
        match self.surname.as_deref().map(str::trim) {
            Some(surname) if !surname.is_empty() => format!("{} {}", self.name, surname),
            _ => self.name.clone(),
        }
    }
}
